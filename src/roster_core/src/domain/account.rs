use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use secrecy::Secret;
use thiserror::Error;

use crate::domain::{
    date_of_birth::DateOfBirth, email::Email, name::Name, password_hash::PasswordHash,
};

/// Identifier of an account. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AccountId(i64);

impl AccountId {
    pub fn new(value: i64) -> Option<Self> {
        (value > 0).then_some(Self(value))
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A fully stored account. Instances only exist when every field is present
/// and valid.
#[derive(Debug, Clone)]
pub struct Account {
    id: AccountId,
    first_name: Name,
    middle_name: Option<Name>,
    last_name: Name,
    email: Email,
    password_hash: PasswordHash,
    date_of_birth: DateOfBirth,
    created_on: DateTime<Utc>,
}

impl Account {
    pub fn id(&self) -> AccountId {
        self.id
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

    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    pub fn date_of_birth(&self) -> DateOfBirth {
        self.date_of_birth
    }

    pub fn created_on(&self) -> DateTime<Utc> {
        self.created_on
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AccountRecordError {
    #[error("missing column {0}")]
    Missing(&'static str),
    #[error("malformed column {0}")]
    Malformed(&'static str),
}

/// An account row as read back from storage, before the completeness check.
#[derive(Debug, Clone, Default)]
pub struct AccountRecord {
    pub id: Option<i64>,
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<Secret<String>>,
    pub date_of_birth: Option<NaiveDate>,
    pub created_on: Option<DateTime<Utc>>,
}

impl TryFrom<AccountRecord> for Account {
    type Error = AccountRecordError;

    fn try_from(record: AccountRecord) -> Result<Self, Self::Error> {
        use AccountRecordError::{Malformed, Missing};

        let id = record.id.ok_or(Missing("id"))?;
        let id = AccountId::new(id).ok_or(Malformed("id"))?;

        let first_name = record.first_name.ok_or(Missing("first_name"))?;
        let first_name = Name::parse(&first_name).map_err(|_| Malformed("first_name"))?;

        let middle_name = match record.middle_name.as_deref() {
            None | Some("") => None,
            Some(raw) => Some(Name::parse(raw).map_err(|_| Malformed("middle_name"))?),
        };

        let last_name = record.last_name.ok_or(Missing("last_name"))?;
        let last_name = Name::parse(&last_name).map_err(|_| Malformed("last_name"))?;

        let email = record.email.ok_or(Missing("email"))?;
        let email = Email::parse(&email).map_err(|_| Malformed("email"))?;

        let password_hash = record.password_hash.ok_or(Missing("password_hash"))?;
        let password_hash = PasswordHash::new(password_hash).ok_or(Malformed("password_hash"))?;

        let date_of_birth = record.date_of_birth.ok_or(Missing("date_of_birth"))?;
        let created_on = record.created_on.ok_or(Missing("created_on"))?;
        // Checked against the insertion date, not today, so stored accounts do
        // not age out of the valid range.
        let date_of_birth = DateOfBirth::from_date_on(date_of_birth, created_on.date_naive())
            .map_err(|_| Malformed("date_of_birth"))?;

        Ok(Self {
            id,
            first_name,
            middle_name,
            last_name,
            email,
            password_hash,
            date_of_birth,
            created_on,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    fn complete_record() -> AccountRecord {
        AccountRecord {
            id: Some(7),
            first_name: Some("Ada".to_string()),
            middle_name: None,
            last_name: Some("Lovelace".to_string()),
            email: Some("ada@example.com".to_string()),
            password_hash: Some(Secret::from("$argon2id$v=19$stub".to_string())),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 12, 10),
            created_on: Some(Utc::now()),
        }
    }

    #[test]
    fn test_account_id_must_be_positive() {
        assert!(AccountId::new(0).is_none());
        assert!(AccountId::new(-3).is_none());
        assert_eq!(AccountId::new(5).unwrap().value(), 5);
    }

    #[test]
    fn test_complete_record_becomes_account() {
        let account = Account::try_from(complete_record()).unwrap();
        assert_eq!(account.id().value(), 7);
        assert_eq!(account.first_name().to_string(), "Ada");
        assert!(account.middle_name().is_none());
        assert_eq!(account.email().as_str(), "ada@example.com");
        assert_eq!(
            account.password_hash().as_ref().expose_secret(),
            "$argon2id$v=19$stub"
        );
    }

    #[test]
    fn test_stored_normalized_names_read_back() {
        let first_name = Name::parse("Aİ").unwrap();
        let record = AccountRecord {
            first_name: Some(first_name.to_string()),
            ..complete_record()
        };

        let account = Account::try_from(record).unwrap();
        assert_eq!(account.first_name(), &first_name);
    }

    #[test]
    fn test_missing_columns_are_rejected() {
        let record = AccountRecord {
            email: None,
            ..complete_record()
        };
        assert_eq!(
            Account::try_from(record).unwrap_err(),
            AccountRecordError::Missing("email")
        );

        let record = AccountRecord {
            created_on: None,
            ..complete_record()
        };
        assert_eq!(
            Account::try_from(record).unwrap_err(),
            AccountRecordError::Missing("created_on")
        );
    }

    #[test]
    fn test_malformed_columns_are_rejected() {
        let record = AccountRecord {
            first_name: Some("ad4".to_string()),
            ..complete_record()
        };
        assert_eq!(
            Account::try_from(record).unwrap_err(),
            AccountRecordError::Malformed("first_name")
        );

        let record = AccountRecord {
            password_hash: Some(Secret::from(String::new())),
            ..complete_record()
        };
        assert_eq!(
            Account::try_from(record).unwrap_err(),
            AccountRecordError::Malformed("password_hash")
        );

        let record = AccountRecord {
            id: Some(0),
            ..complete_record()
        };
        assert_eq!(
            Account::try_from(record).unwrap_err(),
            AccountRecordError::Malformed("id")
        );
    }
}
