use roster_core::{AccountId, AccountStore, AccountStoreError};
use secrecy::Secret;

/// Error types specific to authenticate use case
#[derive(Debug, thiserror::Error)]
pub enum AuthenticateError {
    /// Unknown email or wrong password; the two are not told apart.
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Account store error: {0}")]
    AccountStoreError(#[from] AccountStoreError),
}

/// Authenticate use case - checks an email and password pair
pub struct AuthenticateUseCase<U>
where
    U: AccountStore,
{
    account_store: U,
}

impl<U> AuthenticateUseCase<U>
where
    U: AccountStore,
{
    pub fn new(account_store: U) -> Self {
        Self { account_store }
    }

    /// Execute the authenticate use case
    ///
    /// # Arguments
    /// * `email` - Email as entered, matched exactly
    /// * `password` - Raw password candidate
    ///
    /// # Returns
    /// The account id on success, InvalidCredentials for any credential
    /// mismatch
    #[tracing::instrument(name = "AuthenticateUseCase::execute", skip(self, password))]
    pub async fn execute(
        &self,
        email: &str,
        password: Secret<String>,
    ) -> Result<AccountId, AuthenticateError> {
        match self.account_store.authenticate(email, &password).await {
            Ok(id) => Ok(id),
            Err(AccountStoreError::InvalidEmail) => {
                tracing::debug!("No account registered under this email");
                Err(AuthenticateError::InvalidCredentials)
            }
            Err(AccountStoreError::InvalidPassword) => {
                tracing::debug!("Password does not match");
                Err(AuthenticateError::InvalidCredentials)
            }
            Err(e) => Err(e.into()),
        }
    }
}
