use serde::ser::SerializeStruct;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("invalid content: {0}")]
    InvalidContent(String),
    #[error("remote store unreachable: {0}")]
    RemoteUnreachable(String),
    #[error("remote store rejected write: {0}")]
    RemoteRejected(String),
    #[error("remote document changed since last load")]
    RemoteConflict,
    #[error("snapshot cache error: {0}")]
    Cache(String),
    #[error("credential store error: {0}")]
    Credentials(String),
    #[error("media probe failed: {0}")]
    Probe(String),
    #[error("io error: {0}")]
    Io(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl serde::Serialize for SyncError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("SyncError", 2)?;
        state.serialize_field("code", self.code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

impl SyncError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidContent(_) => "INVALID_CONTENT",
            Self::RemoteUnreachable(_) => "REMOTE_UNREACHABLE",
            Self::RemoteRejected(_) => "REMOTE_REJECTED",
            Self::RemoteConflict => "REMOTE_CONFLICT",
            Self::Cache(_) => "CACHE_ERROR",
            Self::Credentials(_) => "CREDENTIAL_ERROR",
            Self::Probe(_) => "PROBE_FAILED",
            Self::Io(_) => "IO_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn retryable(&self) -> bool {
        matches!(self, Self::RemoteUnreachable(_) | Self::Probe(_))
    }
}

impl From<std::io::Error> for SyncError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value.to_string())
    }
}

impl From<sqlx::Error> for SyncError {
    fn from(value: sqlx::Error) -> Self {
        Self::Cache(value.to_string())
    }
}

impl From<sqlx::migrate::MigrateError> for SyncError {
    fn from(value: sqlx::migrate::MigrateError) -> Self {
        Self::Cache(value.to_string())
    }
}

impl From<serde_json::Error> for SyncError {
    fn from(value: serde_json::Error) -> Self {
        Self::InvalidContent(value.to_string())
    }
}

pub type SyncResult<T> = Result<T, SyncError>;
