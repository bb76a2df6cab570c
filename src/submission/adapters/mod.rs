//! Adapter implementations for submission ports.

pub mod memory;
pub mod postgres;
