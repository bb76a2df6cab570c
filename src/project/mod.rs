//! Project lifecycle management.
//!
//! A project is created `IN_PROGRESS` and afterwards changes status only
//! through the transition path, which checks every move against an explicit
//! allow-list. Field edits go through a separate patch path that cannot
//! carry a status at all. The module follows hexagonal architecture:
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
