//! Unit tests for the submission module.
