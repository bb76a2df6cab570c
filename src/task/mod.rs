//! Task coordination inside projects.
//!
//! Tasks belong to a project and are created by a user. Unlike projects,
//! task status has no transition table: any status may overwrite any other.
//! The module follows hexagonal architecture:
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
