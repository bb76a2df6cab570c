//! Directory of users, teams, and team memberships.
//!
//! Users and teams are referenced by every other context but owned by none
//! of them. The directory registers them and answers the lookups the other
//! services resolve against:
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
