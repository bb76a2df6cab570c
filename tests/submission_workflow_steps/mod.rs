//! Step definitions for submission workflow scenarios.

pub mod given;
pub mod when;
pub mod world;
