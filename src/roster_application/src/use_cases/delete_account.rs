use roster_core::{AccountId, AccountStore, AccountStoreError};

/// Error types for delete account use case
#[derive(Debug, thiserror::Error)]
pub enum DeleteAccountError {
    #[error("Account store error: {0}")]
    AccountStoreError(#[from] AccountStoreError),
}

/// Delete account use case - removes an account and frees its id
pub struct DeleteAccountUseCase<'a, U>
where
    U: AccountStore,
{
    account_store: &'a U,
}

impl<'a, U> DeleteAccountUseCase<'a, U>
where
    U: AccountStore,
{
    pub fn new(account_store: &'a U) -> Self {
        Self { account_store }
    }

    /// Execute the delete account use case
    ///
    /// # Arguments
    /// * `id` - Id of the account to remove
    ///
    /// # Returns
    /// Ok(()) on success, or DeleteAccountError
    #[tracing::instrument(name = "DeleteAccountUseCase::execute", skip(self))]
    pub async fn execute(&self, id: AccountId) -> Result<(), DeleteAccountError> {
        self.account_store.delete_account(id).await?;

        Ok(())
    }
}
