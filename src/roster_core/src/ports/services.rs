use async_trait::async_trait;
use secrecy::Secret;
use thiserror::Error;

use crate::domain::{password::Password, password_hash::PasswordHash};

#[derive(Debug, Error)]
#[error("Failed to hash password: {0}")]
pub struct HashingError(pub String);

/// Port trait for one-way password hashing
#[async_trait]
pub trait CredentialHasher: Send + Sync {
    async fn hash(&self, password: &Password) -> Result<PasswordHash, HashingError>;

    /// Returns `true` only when `candidate` matches `hash`. A garbled digest
    /// is a mismatch.
    async fn verify(&self, hash: &PasswordHash, candidate: &Secret<String>) -> bool;

    /// Spend the same effort as [`CredentialHasher::verify`] without a stored
    /// digest, so unknown accounts cannot be told apart by response time.
    async fn verify_dummy(&self, candidate: &Secret<String>);
}
