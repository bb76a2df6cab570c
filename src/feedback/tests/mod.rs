//! Unit tests for the feedback module.
