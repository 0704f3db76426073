use std::sync::LazyLock;

use regex::Regex;
use secrecy::{ExposeSecret, Secret};
use thiserror::Error;

pub const MIN_PASSWORD_LEN: usize = 12;

// Each pattern requires two non-overlapping occurrences of its class.
static LOWERCASE: LazyLock<Regex> = LazyLock::new(|| class_pair(r"\p{Ll}"));
static UPPERCASE: LazyLock<Regex> = LazyLock::new(|| class_pair(r"\p{Lu}"));
static DIGIT: LazyLock<Regex> = LazyLock::new(|| class_pair(r"[0-9]"));
static SYMBOL: LazyLock<Regex> = LazyLock::new(|| class_pair(r"[^\p{L}\p{N}\s]"));

fn class_pair(class: &str) -> Regex {
    // The patterns are static and known to compile.
    Regex::new(&format!("(?s){class}.*{class}")).unwrap()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PasswordError {
    #[error("password must have at least {MIN_PASSWORD_LEN} characters")]
    TooShort,
    #[error("password must not contain spaces")]
    Whitespace,
    #[error("password must contain at least 2 of each: lowercase, uppercase, symbols, numbers")]
    TooSimple,
}

/// A raw password that satisfies the password policy.
///
/// The value stays wrapped in a [`Secret`] so it never shows up in `Debug`
/// output or logs.
#[derive(Debug, Clone)]
pub struct Password(Secret<String>);

impl Password {
    pub fn parse(input: Secret<String>) -> Result<Self, PasswordError> {
        let raw = input.expose_secret();

        if raw.chars().count() < MIN_PASSWORD_LEN {
            return Err(PasswordError::TooShort);
        }
        if raw.chars().any(char::is_whitespace) {
            return Err(PasswordError::Whitespace);
        }
        let strong = [&LOWERCASE, &UPPERCASE, &DIGIT, &SYMBOL]
            .iter()
            .all(|pattern| pattern.is_match(raw));
        if !strong {
            return Err(PasswordError::TooSimple);
        }

        Ok(Self(input))
    }
}

impl AsRef<Secret<String>> for Password {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

impl TryFrom<Secret<String>> for Password {
    type Error = PasswordError;

    fn try_from(value: Secret<String>) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}
