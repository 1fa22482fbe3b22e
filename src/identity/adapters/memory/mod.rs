//! In-memory adapters for the identity module.

mod user;

pub use user::InMemoryUserRepository;
