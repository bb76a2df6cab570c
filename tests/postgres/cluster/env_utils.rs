//! Environment preparation for the embedded cluster bootstrap.

use super::BoxError;
use crate::test_helpers::EnvChange;
use pg_embedded_setup_unpriv::{ExecutionPrivileges, detect_execution_privileges};
use std::ffi::OsString;
use std::net::TcpListener;

pub(super) fn env_vars_to_os(env_vars: &[(String, Option<String>)]) -> Vec<EnvChange> {
    env_vars
        .iter()
        .map(|(key, value)| (OsString::from(key), value.as_ref().map(OsString::from)))
        .collect()
}

/// Picks a free port unless `PG_PORT` is already set.
///
/// Running as root needs a worker binary that drops privileges; it has to be
/// supplied through `PG_EMBEDDED_WORKER`.
pub(super) fn bootstrap_env_changes() -> Result<Vec<EnvChange>, BoxError> {
    if matches!(detect_execution_privileges(), ExecutionPrivileges::Root)
        && std::env::var_os("PG_EMBEDDED_WORKER").is_none()
    {
        return Err(Box::new(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "running as root requires PG_EMBEDDED_WORKER to name a pg_worker binary",
        )));
    }

    if std::env::var_os("PG_PORT").is_some() {
        return Ok(Vec::new());
    }

    let listener = TcpListener::bind(("127.0.0.1", 0)).map_err(|err| Box::new(err) as BoxError)?;
    let port = listener
        .local_addr()
        .map(|addr| addr.port())
        .map_err(|err| Box::new(err) as BoxError)?;
    drop(listener);

    Ok(vec![(
        OsString::from("PG_PORT"),
        Some(OsString::from(port.to_string())),
    )])
}
