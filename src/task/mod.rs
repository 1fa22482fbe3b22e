//! Task lifecycle management for Taskforge.
//!
//! Tasks move through `NEW -> IN_PROGRESS -> DONE | CANCELED` under
//! assignee-only authorization, every mutation appends an audit event, and
//! writes go through optimistic locking so concurrent claims have exactly
//! one winner. The module follows hexagonal architecture:
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
