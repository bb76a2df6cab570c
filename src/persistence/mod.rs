//! Shared `PostgreSQL` plumbing used by every context's Diesel adapter.
//!
//! Each context owns its row models and repository; this module only holds
//! the connection pool, the blocking-call helper, and the Diesel schema.

mod blocking;
pub(crate) mod schema;

pub use blocking::{PgPool, connect};
pub(crate) use blocking::{FromPersistence, run_blocking};
