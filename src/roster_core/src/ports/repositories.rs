use async_trait::async_trait;
use secrecy::Secret;
use thiserror::Error;

use crate::domain::{
    account::{Account, AccountId},
    email::Email,
    new_account::NewAccount,
};

// AccountStore port trait and errors
#[derive(Debug, Error)]
pub enum AccountStoreError {
    #[error("Email already in use")]
    DuplicateEmail,
    #[error("Account not found")]
    AccountNotFound,
    #[error("Invalid email")]
    InvalidEmail,
    #[error("Invalid password")]
    InvalidPassword,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl PartialEq for AccountStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::DuplicateEmail, Self::DuplicateEmail)
                | (Self::AccountNotFound, Self::AccountNotFound)
                | (Self::InvalidEmail, Self::InvalidEmail)
                | (Self::InvalidPassword, Self::InvalidPassword)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}

/// Sole owner of the account table and the identifier pool.
///
/// Implementations are shared between concurrent callers and must keep every
/// multi-row change (allocation plus insert, release plus delete) atomic.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Store a new account, reusing a released id when one is available.
    async fn add_account(&self, account: NewAccount) -> Result<AccountId, AccountStoreError>;

    /// Check a password against the account registered under `email`
    /// (exact, case-sensitive match).
    async fn authenticate(
        &self,
        email: &str,
        password: &Secret<String>,
    ) -> Result<AccountId, AccountStoreError>;

    /// Read a complete account. Missing and malformed rows are both `None`.
    async fn get_account(&self, id: AccountId) -> Result<Option<Account>, AccountStoreError>;

    async fn find_id_by_email(&self, email: &Email) -> Result<Option<AccountId>, AccountStoreError>;

    /// Remove the account and release its id for reuse.
    async fn delete_account(&self, id: AccountId) -> Result<(), AccountStoreError>;
}
