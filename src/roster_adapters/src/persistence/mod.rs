mod hashmap_account_store;
mod id_pool;
mod postgres_account_store;
mod postgres_id_allocator;

pub use hashmap_account_store::HashMapAccountStore;
pub use id_pool::{Allocation, IdPool};
pub use postgres_account_store::PostgresAccountStore;
pub use postgres_id_allocator::PostgresIdAllocator;
