use reqwest::{header, StatusCode};
use serde_json::Value;
use tracing::debug;

use crate::{
    config::EngineConfig,
    core::errors::{SyncError, SyncResult},
    core::types::ContentDocument,
    security::keyring,
    store::{ContentStore, PutOutcome},
};

/// HTTP adapter for the content API: `GET /api/content` returns
/// `{success, data?, error?}`, `POST /api/content` accepts
/// `{content, expectedVersion}` and answers `{success, error?}` (409 on a
/// version conflict). Writes carry a bearer token when one is configured;
/// authorizing them is the store's job, not ours.
#[derive(Debug, Clone)]
pub struct HttpContentStore {
    http: reqwest::Client,
    base_url: String,
    admin_token: Option<String>,
}

impl HttpContentStore {
    pub fn new(config: &EngineConfig) -> SyncResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|err| SyncError::Internal(err.to_string()))?;
        Ok(Self {
            http,
            base_url: config.remote_base_url.trim_end_matches('/').to_string(),
            admin_token: keyring::admin_token(),
        })
    }

    fn content_endpoint(&self, bust_cache: bool) -> String {
        if bust_cache {
            format!("{}/api/content?bust=true", self.base_url)
        } else {
            format!("{}/api/content", self.base_url)
        }
    }
}

impl ContentStore for HttpContentStore {
    async fn get(&self, bust_cache: bool) -> SyncResult<Option<Value>> {
        let mut request = self.http.get(self.content_endpoint(bust_cache));
        if bust_cache {
            request = request.header(header::CACHE_CONTROL, "no-store");
        }
        let response = request.send().await.map_err(|err| {
            if err.is_timeout() {
                SyncError::RemoteUnreachable("request timed out".to_string())
            } else {
                SyncError::RemoteUnreachable(err.to_string())
            }
        })?;

        match response.status() {
            StatusCode::NOT_FOUND => return Ok(None),
            status if !status.is_success() => {
                let body = response.text().await.unwrap_or_default();
                return Err(SyncError::RemoteUnreachable(format!(
                    "status {status} body {body}"
                )));
            }
            _ => {}
        }

        let body: Value = response
            .json()
            .await
            .map_err(|err| SyncError::InvalidContent(err.to_string()))?;
        let success = body
            .get("success")
            .and_then(Value::as_bool)
            .unwrap_or(false);
        if !success {
            let message = body
                .get("error")
                .and_then(Value::as_str)
                .unwrap_or("store reported failure");
            return Err(SyncError::RemoteUnreachable(message.to_string()));
        }
        match body.get("data") {
            Some(Value::Null) | None => Ok(None),
            Some(data) => Ok(Some(data.clone())),
        }
    }

    async fn put(&self, doc: &ContentDocument, expected_version: u64) -> SyncResult<PutOutcome> {
        let payload = serde_json::json!({
            "content": doc,
            "expectedVersion": expected_version,
        });
        let mut request = self.http.post(self.content_endpoint(false)).json(&payload);
        if let Some(token) = &self.admin_token {
            request = request.bearer_auth(token);
        }
        let response = request.send().await.map_err(|err| {
            if err.is_timeout() {
                SyncError::RemoteUnreachable("request timed out".to_string())
            } else {
                SyncError::RemoteUnreachable(err.to_string())
            }
        })?;

        match response.status() {
            StatusCode::CONFLICT => {
                debug!("remote version advanced past {expected_version}");
                return Ok(PutOutcome::Conflict);
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(SyncError::RemoteRejected(
                    "write not authorized by the content store".to_string(),
                ));
            }
            status if status.is_server_error() => {
                let body = response.text().await.unwrap_or_default();
                return Err(SyncError::RemoteUnreachable(format!(
                    "status {status} body {body}"
                )));
            }
            status if !status.is_success() => {
                let body = response.text().await.unwrap_or_default();
                return Err(SyncError::RemoteRejected(format!(
                    "status {status} body {body}"
                )));
            }
            _ => {}
        }

        let body: Value = response
            .json()
            .await
            .map_err(|err| SyncError::InvalidContent(err.to_string()))?;
        if body
            .get("success")
            .and_then(Value::as_bool)
            .unwrap_or(false)
        {
            Ok(PutOutcome::Stored {
                version: doc.metadata.version,
            })
        } else {
            let message = body
                .get("error")
                .and_then(Value::as_str)
                .unwrap_or("store reported failure");
            if message.to_ascii_lowercase().contains("conflict") {
                Ok(PutOutcome::Conflict)
            } else {
                Err(SyncError::RemoteRejected(message.to_string()))
            }
        }
    }
}
