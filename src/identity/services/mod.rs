//! Application services for account orchestration.

mod accounts;

pub use accounts::{
    AccountService, AccountServiceError, AccountServiceResult, CreateUserRequest,
    RegisterUserRequest,
};
