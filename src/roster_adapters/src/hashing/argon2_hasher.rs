use std::sync::Arc;

use argon2::{
    Algorithm, Argon2, Params, PasswordHash as PhcString, PasswordVerifier, Version,
    password_hash::{self, PasswordHasher, SaltString, rand_core},
};
use roster_core::{CredentialHasher, HashingError, Password, PasswordHash};
use secrecy::{ExposeSecret, Secret};
use tokio::sync::OnceCell;

use crate::config::hashing::{ITERATIONS, MEMORY_KIB, PARALLELISM};

const DUMMY_PASSWORD: &str = "roster-dummy-password-Aa11!!";

/// Argon2id password hasher.
///
/// Hashing and verification run on the blocking thread pool so they never
/// stall the async runtime.
#[derive(Clone, Default)]
pub struct Argon2Hasher {
    dummy_hash: Arc<OnceCell<Secret<String>>>,
}

impl Argon2Hasher {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl CredentialHasher for Argon2Hasher {
    async fn hash(&self, password: &Password) -> Result<PasswordHash, HashingError> {
        let digest = compute_password_hash(password.as_ref().clone())
            .await
            .map_err(HashingError)?;

        PasswordHash::new(digest).ok_or_else(|| HashingError("empty digest".to_string()))
    }

    async fn verify(&self, hash: &PasswordHash, candidate: &Secret<String>) -> bool {
        match verify_password_hash(hash.as_ref().clone(), candidate.clone()).await {
            Ok(()) => true,
            Err(VerifyError::Mismatch) => false,
            Err(VerifyError::Unexpected(e)) => {
                tracing::warn!(error = %e, "Stored password hash could not be verified");
                // Must cost as much as a real mismatch.
                self.verify_dummy(candidate).await;
                false
            }
        }
    }

    async fn verify_dummy(&self, candidate: &Secret<String>) {
        let dummy_hash = self
            .dummy_hash
            .get_or_try_init(|| compute_password_hash(Secret::from(DUMMY_PASSWORD.to_string())))
            .await;

        match dummy_hash {
            Ok(dummy_hash) => {
                // The outcome is irrelevant, only the time spent matters.
                let _ = verify_password_hash(dummy_hash.clone(), candidate.clone()).await;
            }
            Err(e) => tracing::warn!(error = %e, "Failed to prepare dummy password hash"),
        }
    }
}

enum VerifyError {
    Mismatch,
    Unexpected(String),
}

fn password_hasher() -> Result<Argon2<'static>, String> {
    let params = Params::new(MEMORY_KIB, ITERATIONS, PARALLELISM, None).map_err(|e| e.to_string())?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

#[tracing::instrument(name = "Verify password hash", skip_all)]
async fn verify_password_hash(
    expected_password_hash: Secret<String>,
    password_candidate: Secret<String>,
) -> Result<(), VerifyError> {
    let current_span: tracing::Span = tracing::Span::current();
    tokio::task::spawn_blocking(move || {
        current_span.in_scope(|| {
            let expected_password_hash = PhcString::new(expected_password_hash.expose_secret())
                .map_err(|e| VerifyError::Unexpected(e.to_string()))?;

            password_hasher()
                .map_err(VerifyError::Unexpected)?
                .verify_password(
                    password_candidate.expose_secret().as_bytes(),
                    &expected_password_hash,
                )
                .map_err(|e| match e {
                    password_hash::Error::Password => VerifyError::Mismatch,
                    other => VerifyError::Unexpected(other.to_string()),
                })
        })
    })
    .await
    .map_err(|e| VerifyError::Unexpected(e.to_string()))?
}

#[tracing::instrument(name = "Computing password hash", skip_all)]
async fn compute_password_hash(password: Secret<String>) -> Result<Secret<String>, String> {
    let current_span: tracing::Span = tracing::Span::current();

    tokio::task::spawn_blocking(move || {
        current_span.in_scope(move || {
            let salt: SaltString = SaltString::generate(rand_core::OsRng);
            password_hasher()?
                .hash_password(password.expose_secret().as_bytes(), &salt)
                .map(|h| Secret::from(h.to_string()))
                .map_err(|e| e.to_string())
        })
    })
    .await
    .map_err(|e| e.to_string())?
}
