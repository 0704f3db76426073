use chrono::{NaiveDate, Utc};
use secrecy::Secret;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::{
    date_of_birth::{DateOfBirth, DateOfBirthError},
    email::{Email, EmailError},
    name::{Name, NameError},
    password::{Password, PasswordError},
};

/// Raw, unvalidated input for a new account.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountFields {
    pub first_name: String,
    /// `None` and the empty string both mean "no middle name".
    #[serde(default)]
    pub middle_name: Option<String>,
    pub last_name: String,
    pub email: String,
    pub password: Secret<String>,
    pub date_of_birth: String,
}

/// A single rejected field together with the reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("first name: {0}")]
    FirstName(NameError),
    #[error("middle name: {0}")]
    MiddleName(NameError),
    #[error("last name: {0}")]
    LastName(NameError),
    #[error("email: {0}")]
    Email(EmailError),
    #[error("password: {0}")]
    Password(PasswordError),
    #[error("date of birth: {0}")]
    DateOfBirth(DateOfBirthError),
}

impl FieldError {
    /// Name of the input field this error belongs to.
    pub fn field(&self) -> &'static str {
        match self {
            FieldError::FirstName(_) => "first_name",
            FieldError::MiddleName(_) => "middle_name",
            FieldError::LastName(_) => "last_name",
            FieldError::Email(_) => "email",
            FieldError::Password(_) => "password",
            FieldError::DateOfBirth(_) => "date_of_birth",
        }
    }
}

/// Every field that failed validation, in input order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", .0.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "))]
pub struct AccountFieldsError(Vec<FieldError>);

impl AccountFieldsError {
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }
}

/// Validated input for a new account, ready to be stored.
#[derive(Debug, Clone)]
pub struct NewAccount {
    first_name: Name,
    middle_name: Option<Name>,
    last_name: Name,
    email: Email,
    password: Password,
    date_of_birth: DateOfBirth,
}

impl NewAccount {
    pub fn parse(fields: AccountFields) -> Result<Self, AccountFieldsError> {
        Self::parse_on(fields, Utc::now().date_naive())
    }

    /// Validate every field, collecting all failures rather than stopping at
    /// the first one.
    pub fn parse_on(fields: AccountFields, today: NaiveDate) -> Result<Self, AccountFieldsError> {
        let mut errors = Vec::new();

        let first_name = Name::parse(&fields.first_name)
            .map_err(|e| errors.push(FieldError::FirstName(e)))
            .ok();
        let middle_name = match fields.middle_name.as_deref() {
            None | Some("") => Some(None),
            Some(raw) => Name::parse(raw)
                .map(Some)
                .map_err(|e| errors.push(FieldError::MiddleName(e)))
                .ok(),
        };
        let last_name = Name::parse(&fields.last_name)
            .map_err(|e| errors.push(FieldError::LastName(e)))
            .ok();
        let email = Email::parse(&fields.email)
            .map_err(|e| errors.push(FieldError::Email(e)))
            .ok();
        let password = Password::parse(fields.password)
            .map_err(|e| errors.push(FieldError::Password(e)))
            .ok();
        let date_of_birth = DateOfBirth::parse_on(&fields.date_of_birth, today)
            .map_err(|e| errors.push(FieldError::DateOfBirth(e)))
            .ok();

        match (
            first_name,
            middle_name,
            last_name,
            email,
            password,
            date_of_birth,
        ) {
            (
                Some(first_name),
                Some(middle_name),
                Some(last_name),
                Some(email),
                Some(password),
                Some(date_of_birth),
            ) if errors.is_empty() => Ok(Self {
                first_name,
                middle_name,
                last_name,
                email,
                password,
                date_of_birth,
            }),
            _ => Err(AccountFieldsError(errors)),
        }
    }

    pub fn first_name(&self) -> &Name {
        &self.first_name
    }

    pub fn middle_name(&self) -> Option<&Name> {
        self.middle_name.as_ref()
    }

    pub fn last_name(&self) -> &Name {
        &self.last_name
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password(&self) -> &Password {
        &self.password
    }

    pub fn date_of_birth(&self) -> DateOfBirth {
        self.date_of_birth
    }
}
