use chrono::{DateTime, NaiveDate, Utc};
use roster_application::{
    AuthenticateError, AuthenticateUseCase, CreateAccountUseCase, DeleteAccountError,
    DeleteAccountUseCase, GetAccountUseCase,
};
use roster_core::{
    Account, AccountFields, AccountFieldsError, AccountId, AccountStore, AccountStoreError,
    NewAccount,
};
use secrecy::Secret;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AccountServiceError {
    #[error("Invalid input: {0}")]
    InvalidInput(AccountFieldsError),

    #[error("Email already in use")]
    EmailInUse,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Account not found")]
    NotFound,

    #[error("Internal error")]
    Internal,
}

impl From<AccountFieldsError> for AccountServiceError {
    fn from(error: AccountFieldsError) -> Self {
        AccountServiceError::InvalidInput(error)
    }
}

impl From<AccountStoreError> for AccountServiceError {
    fn from(error: AccountStoreError) -> Self {
        match error {
            AccountStoreError::DuplicateEmail => AccountServiceError::EmailInUse,
            AccountStoreError::AccountNotFound => AccountServiceError::NotFound,
            AccountStoreError::InvalidEmail | AccountStoreError::InvalidPassword => {
                AccountServiceError::InvalidCredentials
            }
            AccountStoreError::UnexpectedError(e) => {
                tracing::error!(error = %e, "Account store failure");
                AccountServiceError::Internal
            }
        }
    }
}

impl From<AuthenticateError> for AccountServiceError {
    fn from(error: AuthenticateError) -> Self {
        match error {
            AuthenticateError::InvalidCredentials => AccountServiceError::InvalidCredentials,
            AuthenticateError::AccountStoreError(e) => e.into(),
        }
    }
}

impl From<DeleteAccountError> for AccountServiceError {
    fn from(error: DeleteAccountError) -> Self {
        match error {
            DeleteAccountError::AccountStoreError(e) => e.into(),
        }
    }
}

/// Read-only copy of a stored account, free of store types. The password
/// hash is never exposed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountView {
    pub id: i64,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub email: String,
    pub date_of_birth: NaiveDate,
    pub created_on: DateTime<Utc>,
}

impl From<&Account> for AccountView {
    fn from(account: &Account) -> Self {
        AccountView {
            id: account.id().value(),
            first_name: account.first_name().to_string(),
            middle_name: account.middle_name().map(ToString::to_string),
            last_name: account.last_name().to_string(),
            email: account.email().to_string(),
            date_of_birth: account.date_of_birth().date(),
            created_on: account.created_on(),
        }
    }
}

/// Entry point for callers that deal in plain values.
///
/// Validates raw fields, drives the use cases and folds every internal error
/// into [`AccountServiceError`]. Cloning is cheap when the store is.
#[derive(Clone)]
pub struct AccountService<U> {
    account_store: U,
}

impl<U> AccountService<U>
where
    U: AccountStore + Clone,
{
    pub fn new(account_store: U) -> Self {
        Self { account_store }
    }

    /// Validate `fields` and store a new account.
    ///
    /// # Returns
    /// The new account id. Every failing field is reported, not only the
    /// first.
    #[tracing::instrument(name = "AccountService::create_account", skip_all)]
    pub async fn create_account(&self, fields: AccountFields) -> Result<i64, AccountServiceError> {
        let account = NewAccount::parse(fields)?;

        let id = CreateAccountUseCase::new(&self.account_store)
            .execute(account)
            .await?;

        Ok(id.value())
    }

    #[tracing::instrument(name = "AccountService::authenticate", skip(self, password))]
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<i64, AccountServiceError> {
        let id = AuthenticateUseCase::new(self.account_store.clone())
            .execute(email, Secret::from(password.to_string()))
            .await?;

        Ok(id.value())
    }

    /// Non-positive ids can never exist and read as `None`.
    #[tracing::instrument(name = "AccountService::get_account", skip(self))]
    pub async fn get_account(&self, id: i64) -> Result<Option<AccountView>, AccountServiceError> {
        let Some(id) = AccountId::new(id) else {
            return Ok(None);
        };

        let account = GetAccountUseCase::new(&self.account_store)
            .execute(id)
            .await?;

        Ok(account.as_ref().map(AccountView::from))
    }

    #[tracing::instrument(name = "AccountService::delete_account", skip(self))]
    pub async fn delete_account(&self, id: i64) -> Result<(), AccountServiceError> {
        let id = AccountId::new(id).ok_or(AccountServiceError::NotFound)?;

        DeleteAccountUseCase::new(&self.account_store)
            .execute(id)
            .await?;

        Ok(())
    }
}
