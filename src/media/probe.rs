use std::path::PathBuf;

use crate::{
    config::EngineConfig,
    core::errors::{SyncError, SyncResult},
    media::ExistenceProbe,
};

/// HEAD-request probe against the deployment that serves the uploads.
/// Any 2xx means the file exists; any other status means it does not.
#[derive(Debug, Clone)]
pub struct HttpProbe {
    http: reqwest::Client,
    base_url: String,
}

impl HttpProbe {
    pub fn new(config: &EngineConfig) -> SyncResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|err| SyncError::Internal(err.to_string()))?;
        Ok(Self {
            http,
            base_url: config.remote_base_url.trim_end_matches('/').to_string(),
        })
    }
}

impl ExistenceProbe for HttpProbe {
    async fn exists(&self, url: &str) -> SyncResult<bool> {
        let endpoint = format!("{}{}", self.base_url, url);
        let response = self
            .http
            .head(&endpoint)
            .send()
            .await
            .map_err(|err| SyncError::Probe(err.to_string()))?;
        Ok(response.status().is_success())
    }
}

/// Filesystem probe for when the uploads directory is reachable directly:
/// a site-relative URL like `/uploads/a.jpg` maps to `<public_dir>/uploads/a.jpg`.
#[derive(Debug, Clone)]
pub struct FsProbe {
    public_dir: PathBuf,
}

impl FsProbe {
    pub fn new(public_dir: impl Into<PathBuf>) -> Self {
        Self {
            public_dir: public_dir.into(),
        }
    }
}

impl ExistenceProbe for FsProbe {
    async fn exists(&self, url: &str) -> SyncResult<bool> {
        let relative = url.trim_start_matches('/');
        Ok(self.public_dir.join(relative).exists())
    }
}
