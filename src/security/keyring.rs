use tracing::debug;

use crate::core::errors::{SyncError, SyncResult};

const SERVICE: &str = "innkeep";
const ACCOUNT: &str = "admin-token";

pub fn set_admin_token(token: &str) -> SyncResult<()> {
    let entry = keyring::Entry::new(SERVICE, ACCOUNT)
        .map_err(|err| SyncError::Credentials(err.to_string()))?;
    entry
        .set_password(token)
        .map_err(|err| SyncError::Credentials(err.to_string()))
}

/// The admin bearer token for remote writes, if one is configured: the
/// `INNKEEP_ADMIN_TOKEN` environment variable wins, then the OS keyring.
/// Absence is not an error; reads of the content store are public.
pub fn admin_token() -> Option<String> {
    if let Ok(token) = std::env::var("INNKEEP_ADMIN_TOKEN") {
        if !token.trim().is_empty() {
            return Some(token);
        }
    }
    let entry = keyring::Entry::new(SERVICE, ACCOUNT).ok()?;
    match entry.get_password() {
        Ok(token) => Some(token),
        Err(err) => {
            debug!("no admin token in keyring: {err}");
            None
        }
    }
}
