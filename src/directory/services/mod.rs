//! Application services for the directory.

mod directory;

pub use directory::{
    DirectoryService, DirectoryServiceError, DirectoryServiceResult, RegisterUserRequest,
};
