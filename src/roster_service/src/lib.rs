mod account_service;
pub mod helpers;

pub use account_service::{AccountService, AccountServiceError, AccountView};
pub use helpers::{
    PostgresAccountService, build_account_service, configure_postgresql, get_postgres_pool,
    init_tracing,
};
