pub mod domain;
pub mod ports;

// Re-export commonly used types for convenience
pub use domain::{
    account::{Account, AccountId, AccountRecord, AccountRecordError},
    date_of_birth::{DateOfBirth, DateOfBirthError},
    email::{Email, EmailError},
    name::{Name, NameError},
    new_account::{AccountFields, AccountFieldsError, FieldError, NewAccount},
    password::{Password, PasswordError},
    password_hash::PasswordHash,
};

pub use ports::{
    repositories::{AccountStore, AccountStoreError},
    services::{CredentialHasher, HashingError},
};
