pub mod authenticate;
pub mod create_account;
pub mod delete_account;
pub mod get_account;
