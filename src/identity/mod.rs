//! User accounts, registration, and login for Taskforge.
//!
//! Identity is established by an exact (email, nickname) match; there is no
//! password in this design. Both attributes are unique across users. The
//! module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
