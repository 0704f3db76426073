pub mod use_cases;

pub use use_cases::{
    authenticate::{AuthenticateError, AuthenticateUseCase},
    create_account::CreateAccountUseCase,
    delete_account::{DeleteAccountError, DeleteAccountUseCase},
    get_account::GetAccountUseCase,
};
