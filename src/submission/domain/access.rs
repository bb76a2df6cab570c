//! Capability required for unfiltered submission listings.

use crate::directory::domain::{Role, User};

/// Proof that the caller may read every submission on the platform.
///
/// The value can only be obtained from a [`Role::Admin`] user, so listing
/// everything is never the default path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdministrativeAccess {
    _private: (),
}

impl AdministrativeAccess {
    /// Grants access when `user` is an administrator.
    #[must_use]
    pub fn for_user(user: &User) -> Option<Self> {
        (user.role() == Role::Admin).then_some(Self { _private: () })
    }
}
