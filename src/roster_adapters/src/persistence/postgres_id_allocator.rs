use roster_core::AccountId;
use sqlx::PgConnection;

use super::id_pool::Allocation;

/// Identifier allocator backed by the `id_pool` table.
///
/// Both operations run on a connection that is inside the caller's
/// transaction, so a consumed or released id only becomes visible once that
/// transaction commits.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresIdAllocator;

impl PostgresIdAllocator {
    /// Claim the oldest released id, deleting its pool entry.
    ///
    /// Entries locked by another open transaction are skipped, so two
    /// concurrent allocations never claim the same id.
    #[tracing::instrument(name = "Allocating account id", skip_all)]
    pub async fn next_id(&self, conn: &mut PgConnection) -> Result<Allocation, sqlx::Error> {
        let recycled: Option<i64> = sqlx::query_scalar(
            r#"
                DELETE FROM id_pool
                WHERE id = (
                    SELECT id
                    FROM id_pool
                    ORDER BY released_on, id
                    LIMIT 1
                    FOR UPDATE SKIP LOCKED
                )
                RETURNING id
            "#,
        )
        .fetch_optional(&mut *conn)
        .await?;

        Ok(match recycled.and_then(AccountId::new) {
            Some(id) => Allocation::Recycled(id),
            None => Allocation::Fresh,
        })
    }

    #[tracing::instrument(name = "Releasing account id", skip(self, conn))]
    pub async fn release(&self, conn: &mut PgConnection, id: AccountId) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
                INSERT INTO id_pool (id)
                VALUES ($1)
            "#,
        )
        .bind(id.value())
        .execute(&mut *conn)
        .await?;

        Ok(())
    }
}
