use roster_core::{AccountId, AccountStore, AccountStoreError, NewAccount};

/// Create account use case - persists a validated account
pub struct CreateAccountUseCase<'a, U>
where
    U: AccountStore,
{
    account_store: &'a U,
}

impl<'a, U> CreateAccountUseCase<'a, U>
where
    U: AccountStore,
{
    pub fn new(account_store: &'a U) -> Self {
        Self { account_store }
    }

    /// Execute the create account use case
    ///
    /// # Arguments
    /// * `account` - Account whose fields have all passed validation
    ///
    /// # Returns
    /// The new account's id, or AccountStoreError if the email is taken or
    /// the store fails
    #[tracing::instrument(name = "CreateAccountUseCase::execute", skip_all)]
    pub async fn execute(&self, account: NewAccount) -> Result<AccountId, AccountStoreError> {
        self.account_store.add_account(account).await
    }
}
