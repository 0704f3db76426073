use roster_core::{Account, AccountId, AccountStore, AccountStoreError};

/// Get account use case - reads one complete account
pub struct GetAccountUseCase<'a, U>
where
    U: AccountStore,
{
    account_store: &'a U,
}

impl<'a, U> GetAccountUseCase<'a, U>
where
    U: AccountStore,
{
    pub fn new(account_store: &'a U) -> Self {
        Self { account_store }
    }

    /// Execute the get account use case
    ///
    /// # Returns
    /// `None` when no complete account exists under `id`
    #[tracing::instrument(name = "GetAccountUseCase::execute", skip(self))]
    pub async fn execute(&self, id: AccountId) -> Result<Option<Account>, AccountStoreError> {
        self.account_store.get_account(id).await
    }
}
