//! Coursework: project management backend for academic courses.
//!
//! Teachers and students organise work into projects, break projects into
//! tasks, hand in submissions against tasks, and exchange feedback on those
//! submissions. Submitting work notifies the submitter.
//!
//! # Architecture
//!
//! Every bounded context follows hexagonal architecture:
//!
//! - **Domain**: Pure business rules with no infrastructure dependencies
//! - **Ports**: Repository traits the services depend on
//! - **Adapters**: In-memory and `PostgreSQL` implementations of the ports
//! - **Services**: Orchestration that resolves references and enforces access
//!
//! # Modules
//!
//! - [`directory`]: Users, roles, and teams
//! - [`project`]: Project lifecycle and per-user project queries
//! - [`task`]: Tasks inside projects and visibility filtering
//! - [`submission`]: Submissions and the notification they raise
//! - [`notification`]: Per-user notification inbox
//! - [`feedback`]: Feedback on submissions and responses to it
//! - [`platform`]: Wiring of all services over `PostgreSQL`

pub mod config;
pub mod directory;
pub mod error;
pub mod feedback;
pub mod lookup;
pub mod notification;
pub mod persistence;
pub mod platform;
pub mod project;
pub mod submission;
pub mod task;
pub mod telemetry;
