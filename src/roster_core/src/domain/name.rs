use std::fmt;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NameError {
    #[error("name cannot be empty")]
    Empty,
    #[error("name must not lead or trail with a space, nor have double spaces")]
    Malformed,
    #[error("name can only contain letters")]
    NonLetter,
}

/// A person's name, one or more words of letters separated by single spaces.
///
/// Each word is stored in proper-noun casing: a leading capital followed by
/// lowercase letters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Name(Vec<String>);

impl Name {
    pub fn parse(input: &str) -> Result<Self, NameError> {
        if input.is_empty() {
            return Err(NameError::Empty);
        }

        input
            .split(' ')
            .map(proper_noun)
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }

    pub fn words(&self) -> &[String] {
        &self.0
    }
}

fn proper_noun(word: &str) -> Result<String, NameError> {
    if word.is_empty() {
        return Err(NameError::Malformed);
    }
    if !word.chars().all(char::is_alphabetic) {
        return Err(NameError::NonLetter);
    }

    let mut noun = String::with_capacity(word.len());
    for (i, c) in word.chars().enumerate() {
        if i == 0 {
            push_recased(&mut noun, c, c.to_uppercase());
        } else {
            push_recased(&mut noun, c, c.to_lowercase());
        }
    }
    Ok(noun)
}

// Some case mappings expand into combining marks (e.g. 'İ' lowercases to
// "i\u{307}"); the letter is kept as written so the stored name still parses.
fn push_recased(noun: &mut String, original: char, recased: impl Iterator<Item = char> + Clone) {
    if recased.clone().all(char::is_alphabetic) {
        noun.extend(recased);
    } else {
        noun.push(original);
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(" "))
    }
}

impl TryFrom<&str> for Name {
    type Error = NameError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}
