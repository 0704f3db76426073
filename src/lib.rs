//! # Roster - Account Persistence Library
//!
//! Facade crate that re-exports the public APIs of the roster components:
//! validated account types, the account store port, use cases, the Postgres
//! and in-memory stores, and the plain-value `AccountService`.
//!
//! ## Usage
//!
//! Add to your `Cargo.toml`:
//! ```toml
//! [dependencies]
//! roster = { path = "../roster" }
//! ```
//!
//! ## Structure
//!
//! - **Core domain types**: `Name`, `Email`, `Password`, `DateOfBirth`, `Account`, etc.
//! - **Repository traits**: `AccountStore`, `CredentialHasher`
//! - **Use cases**: `CreateAccountUseCase`, `AuthenticateUseCase`, etc.
//! - **Adapters**: `PostgresAccountStore`, `HashMapAccountStore`, `Argon2Hasher`
//! - **Service**: `AccountService` - The main entry point

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types and value objects
pub mod core {
    pub use roster_core::*;
}

// Re-export most commonly used core types at the root level
pub use roster_core::{
    Account, AccountFields, AccountFieldsError, AccountId, DateOfBirth, DateOfBirthError, Email,
    EmailError, FieldError, Name, NameError, NewAccount, Password, PasswordError,
};

// ============================================================================
// Repository Traits (Ports)
// ============================================================================

/// Repository trait definitions
pub mod repositories {
    pub use roster_core::{AccountStore, AccountStoreError, CredentialHasher, HashingError};
}

pub use repositories::{AccountStore, AccountStoreError, CredentialHasher, HashingError};

// ============================================================================
// Use Cases (Application Layer)
// ============================================================================

/// Application use cases
pub mod use_cases {
    pub use roster_application::*;
}

pub use roster_application::{
    AuthenticateUseCase, CreateAccountUseCase, DeleteAccountUseCase, GetAccountUseCase,
};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    /// Account stores and the id pool
    pub mod persistence {
        pub use roster_adapters::persistence::*;
    }

    /// Password hashing
    pub mod hashing {
        pub use roster_adapters::hashing::*;
    }

    /// Configuration
    pub mod config {
        pub use roster_adapters::config::*;
    }
}

pub use roster_adapters::{
    config::RosterSettings,
    hashing::Argon2Hasher,
    persistence::{HashMapAccountStore, PostgresAccountStore},
};

// ============================================================================
// Account Service (Main Entry Point)
// ============================================================================

pub use roster_service::{
    AccountService, AccountServiceError, AccountView, configure_postgresql, get_postgres_pool,
    init_tracing,
};

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing repository traits
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};

pub use sqlx::PgPool;
