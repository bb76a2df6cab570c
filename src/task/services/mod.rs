//! Application services for task coordination.

mod coordinator;

pub use coordinator::{TaskCoordinatorError, TaskCoordinatorResult, TaskCoordinatorService};
