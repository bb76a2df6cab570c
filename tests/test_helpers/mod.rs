//! Process environment helpers shared by integration tests.

use std::env;
use std::ffi::{OsStr, OsString};
use std::sync::{Mutex, MutexGuard, OnceLock};

/// One environment change: a variable name and its new value, or `None` to
/// unset it.
pub type EnvChange = (OsString, Option<OsString>);

static ENV_MUTEX: OnceLock<Mutex<()>> = OnceLock::new();

/// Holds the environment lock while the cluster bootstrap reads its
/// variables, and puts the previous values back on drop.
pub struct EnvVarGuard {
    restore: Vec<EnvChange>,
    _lock: MutexGuard<'static, ()>,
}

impl EnvVarGuard {
    /// Applies every change in order.
    pub fn set_many(changes: &[EnvChange]) -> Self {
        let lock = ENV_MUTEX
            .get_or_init(|| Mutex::new(()))
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let restore = changes
            .iter()
            .map(|(key, value)| {
                let previous = env::var_os(key);
                write_var(key, value.as_deref());
                (key.clone(), previous)
            })
            .collect();

        Self {
            restore,
            _lock: lock,
        }
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        for (key, value) in self.restore.drain(..).rev() {
            write_var(&key, value.as_deref());
        }
    }
}

fn write_var(key: &OsStr, value: Option<&OsStr>) {
    // SAFETY: callers hold `ENV_MUTEX`, so no other test thread touches the
    // environment concurrently.
    unsafe {
        match value {
            Some(new_value) => env::set_var(key, new_value),
            None => env::remove_var(key),
        }
    }
}
