use chrono::{DateTime, NaiveDate, Utc};
use roster_core::{
    Account, AccountId, AccountRecord, AccountStore, AccountStoreError, CredentialHasher, Email,
    NewAccount, PasswordHash,
};
use secrecy::{ExposeSecret, Secret};
use sqlx::{PgConnection, PgPool, Postgres, Transaction};

use super::{id_pool::Allocation, postgres_id_allocator::PostgresIdAllocator};

const EMAIL_UNIQUE_CONSTRAINT: &str = "accounts_email_key";

#[derive(Clone)]
pub struct PostgresAccountStore<H> {
    pool: PgPool,
    hasher: H,
    allocator: PostgresIdAllocator,
}

impl<H> PostgresAccountStore<H>
where
    H: CredentialHasher,
{
    pub fn new(pool: PgPool, hasher: H) -> Self {
        PostgresAccountStore {
            pool,
            hasher,
            allocator: PostgresIdAllocator,
        }
    }
}

#[derive(sqlx::FromRow)]
struct AccountRow {
    id: Option<i64>,
    first_name: Option<String>,
    middle_name: Option<String>,
    last_name: Option<String>,
    email: Option<String>,
    password_hash: Option<String>,
    date_of_birth: Option<NaiveDate>,
    created_on: Option<DateTime<Utc>>,
}

impl From<AccountRow> for AccountRecord {
    fn from(row: AccountRow) -> Self {
        AccountRecord {
            id: row.id,
            first_name: row.first_name,
            middle_name: row.middle_name,
            last_name: row.last_name,
            email: row.email,
            password_hash: row.password_hash.map(Secret::from),
            date_of_birth: row.date_of_birth,
            created_on: row.created_on,
        }
    }
}

#[async_trait::async_trait]
impl<H> AccountStore for PostgresAccountStore<H>
where
    H: CredentialHasher,
{
    #[tracing::instrument(name = "Adding account to PostgreSQL", skip_all)]
    async fn add_account(&self, account: NewAccount) -> Result<AccountId, AccountStoreError> {
        if self.find_id_by_email(account.email()).await?.is_some() {
            return Err(AccountStoreError::DuplicateEmail);
        }

        // Hash before the transaction opens so no row lock is held while the
        // hasher runs.
        let password_hash = self
            .hasher
            .hash(account.password())
            .await
            .map_err(|e| AccountStoreError::UnexpectedError(e.to_string()))?;

        let mut tx = self.pool.begin().await.map_err(unexpected)?;
        let inserted = insert_account(&mut tx, &self.allocator, &account, &password_hash).await;
        let (id, allocation) = match inserted {
            Ok(inserted) => inserted,
            Err(e) => {
                rollback(tx).await;
                return Err(e);
            }
        };
        tx.commit().await.map_err(unexpected)?;

        tracing::info!(account_id = %id, recycled = allocation.is_recycled(), "Account created");
        Ok(id)
    }

    #[tracing::instrument(name = "Validating account credentials in PostgreSQL", skip_all)]
    async fn authenticate(
        &self,
        email: &str,
        password: &Secret<String>,
    ) -> Result<AccountId, AccountStoreError> {
        let row: Option<(i64, String)> = sqlx::query_as(
            r#"
                SELECT id, password_hash
                FROM accounts
                WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?;

        let Some((id, password_hash)) = row else {
            self.hasher.verify_dummy(password).await;
            return Err(AccountStoreError::InvalidEmail);
        };

        let verified = match PasswordHash::new(Secret::from(password_hash)) {
            Some(password_hash) => self.hasher.verify(&password_hash, password).await,
            None => {
                tracing::warn!(account_id = id, "Account has an empty password hash");
                self.hasher.verify_dummy(password).await;
                false
            }
        };
        if !verified {
            return Err(AccountStoreError::InvalidPassword);
        }

        AccountId::new(id)
            .ok_or_else(|| AccountStoreError::UnexpectedError(format!("invalid account id {id}")))
    }

    #[tracing::instrument(name = "Retrieving account from PostgreSQL", skip(self))]
    async fn get_account(&self, id: AccountId) -> Result<Option<Account>, AccountStoreError> {
        let row: Option<AccountRow> = sqlx::query_as(
            r#"
                SELECT id, first_name, middle_name, last_name, email,
                       password_hash, date_of_birth, created_on
                FROM accounts
                WHERE id = $1
            "#,
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?;

        let Some(row) = row else {
            return Ok(None);
        };

        match Account::try_from(AccountRecord::from(row)) {
            Ok(account) => Ok(Some(account)),
            Err(e) => {
                tracing::warn!(account_id = %id, error = %e, "Ignoring malformed account row");
                Ok(None)
            }
        }
    }

    #[tracing::instrument(name = "Finding account id by email", skip_all)]
    async fn find_id_by_email(&self, email: &Email) -> Result<Option<AccountId>, AccountStoreError> {
        let id: Option<i64> = sqlx::query_scalar(
            r#"
                SELECT id
                FROM accounts
                WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?;

        Ok(id.and_then(AccountId::new))
    }

    #[tracing::instrument(name = "Delete account from PostgreSQL", skip(self))]
    async fn delete_account(&self, id: AccountId) -> Result<(), AccountStoreError> {
        let mut tx = self.pool.begin().await.map_err(unexpected)?;
        let removed = release_and_remove(&mut tx, &self.allocator, id).await;
        if let Err(e) = removed {
            rollback(tx).await;
            return Err(e);
        }
        tx.commit().await.map_err(unexpected)?;

        tracing::info!(account_id = %id, "Account deleted and id released");
        Ok(())
    }
}

async fn insert_account(
    conn: &mut PgConnection,
    allocator: &PostgresIdAllocator,
    account: &NewAccount,
    password_hash: &PasswordHash,
) -> Result<(AccountId, Allocation), AccountStoreError> {
    let allocation = allocator.next_id(conn).await.map_err(unexpected)?;

    let first_name = account.first_name().to_string();
    let middle_name = account.middle_name().map(ToString::to_string);
    let last_name = account.last_name().to_string();

    let sql = match allocation {
        Allocation::Recycled(_) => {
            r#"
                INSERT INTO accounts (first_name, middle_name, last_name, email,
                                      password_hash, date_of_birth, id)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                RETURNING id
            "#
        }
        Allocation::Fresh => {
            r#"
                INSERT INTO accounts (first_name, middle_name, last_name, email,
                                      password_hash, date_of_birth)
                VALUES ($1, $2, $3, $4, $5, $6)
                RETURNING id
            "#
        }
    };

    let query = sqlx::query_scalar::<Postgres, i64>(sql)
        .bind(first_name)
        .bind(middle_name)
        .bind(last_name)
        .bind(account.email().as_str())
        .bind(password_hash.as_ref().expose_secret().as_str())
        .bind(account.date_of_birth().date());
    let query = match allocation {
        Allocation::Recycled(id) => query.bind(id.value()),
        Allocation::Fresh => query,
    };

    let id = query
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation()
                    && db_err.constraint() == Some(EMAIL_UNIQUE_CONSTRAINT)
                {
                    return AccountStoreError::DuplicateEmail;
                }
            }
            unexpected(e)
        })?;

    let id = AccountId::new(id)
        .ok_or_else(|| AccountStoreError::UnexpectedError(format!("invalid account id {id}")))?;
    Ok((id, allocation))
}

async fn release_and_remove(
    conn: &mut PgConnection,
    allocator: &PostgresIdAllocator,
    id: AccountId,
) -> Result<(), AccountStoreError> {
    let locked: Option<i64> = sqlx::query_scalar(
        r#"
            SELECT id
            FROM accounts
            WHERE id = $1
            FOR UPDATE
        "#,
    )
    .bind(id.value())
    .fetch_optional(&mut *conn)
    .await
    .map_err(unexpected)?;

    if locked.is_none() {
        return Err(AccountStoreError::AccountNotFound);
    }

    allocator.release(conn, id).await.map_err(unexpected)?;

    let result = sqlx::query(
        r#"
            DELETE FROM accounts
            WHERE id = $1
        "#,
    )
    .bind(id.value())
    .execute(&mut *conn)
    .await
    .map_err(unexpected)?;

    if result.rows_affected() != 1 {
        return Err(AccountStoreError::UnexpectedError(format!(
            "expected to delete account {id}, deleted {} rows",
            result.rows_affected()
        )));
    }

    Ok(())
}

async fn rollback(tx: Transaction<'_, Postgres>) {
    if let Err(e) = tx.rollback().await {
        tracing::error!(error = %e, "Failed to roll back transaction");
    }
}

fn unexpected(e: sqlx::Error) -> AccountStoreError {
    tracing::error!(error = %e, "Unexpected database error");
    AccountStoreError::UnexpectedError(e.to_string())
}
