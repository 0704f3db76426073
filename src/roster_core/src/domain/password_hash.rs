use secrecy::{ExposeSecret, Secret};

/// An opaque password digest as produced by a [`CredentialHasher`].
///
/// [`CredentialHasher`]: crate::ports::services::CredentialHasher
#[derive(Debug, Clone)]
pub struct PasswordHash(Secret<String>);

impl PasswordHash {
    /// Wrap a stored digest. Returns `None` for an empty digest, which can
    /// never verify.
    pub fn new(digest: Secret<String>) -> Option<Self> {
        if digest.expose_secret().trim().is_empty() {
            return None;
        }
        Some(Self(digest))
    }
}

impl AsRef<Secret<String>> for PasswordHash {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}
