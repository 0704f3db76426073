use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use roster_core::{
    Account, AccountId, AccountRecord, AccountStore, AccountStoreError, CredentialHasher, Email,
    NewAccount,
};
use secrecy::Secret;
use tokio::sync::RwLock;

use super::id_pool::{Allocation, IdPool};

/// In-memory account store.
///
/// Accounts, the email index and the id pool share one lock, which makes
/// every mutation atomic. Passwords are hashed before the lock is taken.
#[derive(Clone)]
pub struct HashMapAccountStore<H> {
    state: Arc<RwLock<State>>,
    hasher: H,
}

#[derive(Default)]
struct State {
    accounts: HashMap<AccountId, Account>,
    ids_by_email: HashMap<Email, AccountId>,
    id_pool: IdPool,
    last_id: i64,
}

impl<H> HashMapAccountStore<H>
where
    H: CredentialHasher,
{
    pub fn new(hasher: H) -> Self {
        Self {
            state: Arc::new(RwLock::new(State::default())),
            hasher,
        }
    }

    /// Number of released ids waiting to be reused.
    pub async fn released_ids(&self) -> usize {
        self.state.read().await.id_pool.len()
    }
}

#[async_trait::async_trait]
impl<H> AccountStore for HashMapAccountStore<H>
where
    H: CredentialHasher,
{
    async fn add_account(&self, account: NewAccount) -> Result<AccountId, AccountStoreError> {
        if self.find_id_by_email(account.email()).await?.is_some() {
            return Err(AccountStoreError::DuplicateEmail);
        }

        let password_hash = self
            .hasher
            .hash(account.password())
            .await
            .map_err(|e| AccountStoreError::UnexpectedError(e.to_string()))?;

        let mut state = self.state.write().await;
        // Re-checked under the write lock; another caller may have won the
        // race while we were hashing.
        if state.ids_by_email.contains_key(account.email()) {
            return Err(AccountStoreError::DuplicateEmail);
        }

        let allocation = state.id_pool.next_id();
        let raw_id = match allocation {
            Allocation::Recycled(id) => id.value(),
            Allocation::Fresh => {
                state.last_id += 1;
                state.last_id
            }
        };

        let record = AccountRecord {
            id: Some(raw_id),
            first_name: Some(account.first_name().to_string()),
            middle_name: account.middle_name().map(ToString::to_string),
            last_name: Some(account.last_name().to_string()),
            email: Some(account.email().to_string()),
            password_hash: Some(password_hash.as_ref().clone()),
            date_of_birth: Some(account.date_of_birth().date()),
            created_on: Some(Utc::now()),
        };
        let stored = match Account::try_from(record) {
            Ok(stored) => stored,
            Err(e) => {
                // Undo the allocation so the pool is left as it was found.
                if let Allocation::Recycled(id) = allocation {
                    state.id_pool.release(id);
                }
                return Err(AccountStoreError::UnexpectedError(e.to_string()));
            }
        };

        let id = stored.id();
        state.ids_by_email.insert(stored.email().clone(), id);
        state.accounts.insert(id, stored);

        tracing::info!(account_id = %id, recycled = allocation.is_recycled(), "Account created");
        Ok(id)
    }

    async fn authenticate(
        &self,
        email: &str,
        password: &Secret<String>,
    ) -> Result<AccountId, AccountStoreError> {
        // Clone out of the lock; verification is slow.
        let found = {
            let state = self.state.read().await;
            Email::parse(email)
                .ok()
                .and_then(|email| state.ids_by_email.get(&email).copied())
                .and_then(|id| state.accounts.get(&id))
                .map(|account| (account.id(), account.password_hash().clone()))
        };

        let Some((id, password_hash)) = found else {
            self.hasher.verify_dummy(password).await;
            return Err(AccountStoreError::InvalidEmail);
        };

        if !self.hasher.verify(&password_hash, password).await {
            return Err(AccountStoreError::InvalidPassword);
        }

        Ok(id)
    }

    async fn get_account(&self, id: AccountId) -> Result<Option<Account>, AccountStoreError> {
        let state = self.state.read().await;
        Ok(state.accounts.get(&id).cloned())
    }

    async fn find_id_by_email(&self, email: &Email) -> Result<Option<AccountId>, AccountStoreError> {
        let state = self.state.read().await;
        Ok(state.ids_by_email.get(email).copied())
    }

    async fn delete_account(&self, id: AccountId) -> Result<(), AccountStoreError> {
        let mut state = self.state.write().await;
        let account = state
            .accounts
            .remove(&id)
            .ok_or(AccountStoreError::AccountNotFound)?;
        state.ids_by_email.remove(account.email());
        state.id_pool.release(id);

        tracing::info!(account_id = %id, "Account deleted and id released");
        Ok(())
    }
}
