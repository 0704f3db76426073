pub mod account;
pub mod date_of_birth;
pub mod email;
pub mod name;
pub mod new_account;
pub mod password;
pub mod password_hash;
