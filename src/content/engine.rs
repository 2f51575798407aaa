//! The synchronization core: owns the in-memory content document, loads it
//! remote-first or local-first, debounces write-backs, and degrades to the
//! snapshot cache whenever the remote store is out of reach. No operation
//! here propagates a remote failure; callers observe `SyncStatus`.

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use serde_json::Value;
use sha2::{Digest, Sha256};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    config::{EngineConfig, LoadStrategy},
    content::migrate,
    core::{
        defaults,
        types::{
            CleanupReport, Connection, ContentDocument, ContentSource, PersistOutcome, SyncStatus,
        },
    },
    db::{
        repositories::snapshots::{self, CONTENT_KEY},
        Database,
    },
    media::{checker, cleanup, ExistenceProbe},
    store::{ContentStore, PutOutcome},
};

struct EngineState {
    content: ContentDocument,
    is_loading: bool,
    connection: Connection,
    last_error: Option<String>,
    last_synced_at: Option<chrono::DateTime<Utc>>,
    content_source: ContentSource,
    /// Remote version observed at the last load or successful persist; the
    /// compare-and-swap expectation for the next write.
    remote_version: u64,
    /// Fingerprint of the content as of the last successful sync, used to
    /// skip write-backs that would not change anything.
    synced_fingerprint: Option<String>,
    pending_media_errors: Vec<String>,
}

/// Cheaply clonable handle; all clones share one content document and one
/// pending autosave slot. The engine instance is the sole writer of the
/// document for the lifetime of the session.
pub struct ContentEngine<S: ContentStore> {
    store: S,
    cache: Database,
    config: Arc<EngineConfig>,
    state: Arc<Mutex<EngineState>>,
    autosave: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl<S: ContentStore> Clone for ContentEngine<S>
where
    S: Clone,
{
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            cache: self.cache.clone(),
            config: Arc::clone(&self.config),
            state: Arc::clone(&self.state),
            autosave: Arc::clone(&self.autosave),
        }
    }
}

impl<S> ContentEngine<S>
where
    S: ContentStore + Clone + 'static,
{
    pub fn new(store: S, cache: Database, config: EngineConfig) -> Self {
        Self {
            store,
            cache,
            config: Arc::new(config),
            state: Arc::new(Mutex::new(EngineState {
                content: defaults::default_content(),
                is_loading: true,
                connection: Connection::Unknown,
                last_error: None,
                last_synced_at: None,
                content_source: ContentSource::Defaults,
                remote_version: 0,
                synced_fingerprint: None,
                pending_media_errors: Vec::new(),
            })),
            autosave: Arc::new(Mutex::new(None)),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn content(&self) -> ContentDocument {
        self.state().content.clone()
    }

    pub fn status(&self) -> SyncStatus {
        let state = self.state();
        SyncStatus {
            is_loading: state.is_loading,
            connection: state.connection,
            last_error: state.last_error.clone(),
            last_synced_at: state.last_synced_at,
            content_source: state.content_source,
        }
    }

    /// Initial load. Local content (snapshot or defaults) is installed
    /// before the remote call resolves, so there is never a blank screen;
    /// what happens next depends on the configured strategy.
    pub async fn load(&self) {
        self.load_inner(false).await;
    }

    /// Re-runs `load` with HTTP cache busting, for pulling remote changes
    /// made by someone else on demand.
    pub async fn refresh(&self) {
        self.load_inner(true).await;
    }

    async fn load_inner(&self, bust_cache: bool) {
        {
            let mut state = self.state();
            state.is_loading = true;
            state.last_error = None;
        }
        self.seed_from_snapshot().await;

        match self.config.load_strategy {
            LoadStrategy::RemoteFirst => self.refresh_from_remote(bust_cache).await,
            LoadStrategy::LocalFirst => {
                self.state().is_loading = false;
                let engine = self.clone();
                tokio::spawn(async move {
                    engine.refresh_from_remote(bust_cache).await;
                });
            }
        }
    }

    /// Installs the newest snapshot if nothing better is in memory yet. A
    /// missing or corrupt snapshot is not an error; defaults stay in place.
    async fn seed_from_snapshot(&self) {
        if self.state().content_source != ContentSource::Defaults {
            return;
        }
        let snapshot = match snapshots::load(self.cache.pool(), CONTENT_KEY).await {
            Ok(found) => found,
            Err(err) => {
                warn!("snapshot cache unavailable: {err}");
                None
            }
        };
        if let Some(snapshot) = snapshot {
            let doc = migrate(snapshot.document);
            let mut state = self.state();
            state.remote_version = doc.metadata.version;
            state.content = doc;
            state.content_source = ContentSource::Snapshot;
            debug!("seeded content from snapshot saved at {}", snapshot.saved_at);
        }
    }

    async fn refresh_from_remote(&self, bust_cache: bool) {
        match self.store.get(bust_cache).await {
            Ok(Some(raw)) => {
                let doc = migrate(raw);
                let fingerprint = fingerprint(&doc);
                {
                    let mut state = self.state();
                    state.remote_version = doc.metadata.version;
                    state.content = doc.clone();
                    state.content_source = ContentSource::Remote;
                    state.connection = Connection::Connected;
                    state.last_error = None;
                    state.last_synced_at = Some(Utc::now());
                    state.synced_fingerprint = Some(fingerprint);
                    state.is_loading = false;
                }
                self.mirror_to_cache(&doc).await;
                info!("content loaded from remote store (v{})", doc.metadata.version);
            }
            Ok(None) => {
                // First run: the store is reachable but empty. Seed it with
                // the compiled-in defaults so every client sees the same
                // document from here on.
                info!("remote store holds no document yet, seeding defaults");
                {
                    let mut state = self.state();
                    state.content = defaults::default_content();
                    state.content_source = ContentSource::Defaults;
                    state.remote_version = 0;
                    state.is_loading = false;
                }
                self.persist_current(true).await;
            }
            Err(err) => {
                let mut state = self.state();
                state.connection = Connection::Disconnected;
                state.is_loading = false;
                let shown = match state.content_source {
                    ContentSource::Snapshot => "locally cached content",
                    _ => "default content",
                };
                state.last_error = Some(format!("content store unreachable, showing {shown}: {err}"));
                warn!("remote load failed: {err}");
            }
        }
    }

    /// Applies `mutator` to the in-memory document and re-arms the debounced
    /// write-back. The new value is observable immediately; the write fires
    /// only after a quiet period, and reads the then-current state rather
    /// than a captured copy.
    pub fn update(&self, mutator: impl FnOnce(&mut ContentDocument)) -> ContentDocument {
        let updated = {
            let mut state = self.state();
            mutator(&mut state.content);
            state.content.clone()
        };
        self.schedule_autosave();
        updated
    }

    /// Cancels any pending debounced write and persists right now. Returns
    /// the outcome so a save button can report it.
    pub async fn save_now(&self) -> PersistOutcome {
        self.cancel_autosave();
        self.persist_current(true).await
    }

    /// Unconditionally cancels a pending autosave. Call when the owning
    /// session ends, so no write fires after teardown.
    pub fn shutdown(&self) {
        self.cancel_autosave();
    }

    /// Explicit observer for broken media discovered by the rendering layer.
    /// The engine records the URL; the owner decides when to run a cleanup.
    pub fn report_media_error(&self, url: &str) {
        if url.is_empty() {
            return;
        }
        let mut state = self.state();
        if !state.pending_media_errors.iter().any(|known| known == url) {
            state.pending_media_errors.push(url.to_string());
        }
    }

    pub fn pending_media_errors(&self) -> Vec<String> {
        self.state().pending_media_errors.clone()
    }

    /// Maintenance pass: probe every referenced media URL, prune dead local
    /// references from the document, and persist if anything changed.
    pub async fn run_media_cleanup<P: ExistenceProbe>(&self, probe: &P) -> CleanupReport {
        let doc = self.content();
        let report = checker::check_content_media(&doc, probe, &self.config.uploads_prefix).await;
        let removed = {
            let mut state = self.state();
            state.pending_media_errors.clear();
            cleanup::prune_missing(&mut state.content, &report)
        };
        let outcome = if removed > 0 {
            info!("media cleanup pruned {removed} dead reference(s)");
            Some(self.persist_current(true).await)
        } else {
            None
        };
        CleanupReport {
            id: Uuid::new_v4(),
            removed,
            persisted: matches!(outcome, Some(PersistOutcome::Synced { .. })),
            outcome,
            summary: report.summary,
        }
    }

    fn schedule_autosave(&self) {
        let engine = self.clone();
        let delay = self.config.debounce;
        let mut slot = self.autosave_slot();
        if let Some(previous) = slot.take() {
            previous.abort();
        }
        *slot = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            engine.persist_current(false).await;
        }));
    }

    fn cancel_autosave(&self) {
        if let Some(task) = self.autosave_slot().take() {
            task.abort();
        }
    }

    /// Writes the current in-memory document to the remote store with a
    /// compare-and-swap on the version loaded last. Every failure mode ends
    /// up in the snapshot cache and the status fields; nothing is thrown.
    async fn persist_current(&self, force: bool) -> PersistOutcome {
        let (doc, expected_version, already_synced) = {
            let state = self.state();
            let fingerprint = fingerprint(&state.content);
            let unchanged = state.connection == Connection::Connected
                && state.synced_fingerprint.as_deref() == Some(fingerprint.as_str());
            (state.content.clone(), state.remote_version, unchanged)
        };
        if already_synced && !force {
            debug!("content unchanged since last sync, skipping write");
            return PersistOutcome::Unchanged;
        }

        let mut outgoing = doc;
        outgoing.metadata.version = expected_version + 1;
        outgoing.metadata.last_updated = Some(Utc::now());

        match self.store.put(&outgoing, expected_version).await {
            Ok(PutOutcome::Stored { version }) => {
                let fingerprint = fingerprint(&outgoing);
                {
                    let mut state = self.state();
                    state.connection = Connection::Connected;
                    state.last_error = None;
                    state.remote_version = version;
                    state.content.metadata = outgoing.metadata.clone();
                    state.synced_fingerprint = Some(fingerprint);
                    state.last_synced_at = Some(Utc::now());
                }
                self.mirror_to_cache(&outgoing).await;
                info!("content persisted to remote store (v{version})");
                PersistOutcome::Synced { version }
            }
            Ok(PutOutcome::Conflict) => {
                // The write was not applied; keep the unbumped version so a
                // later snapshot load does not claim a version the remote
                // never stored.
                outgoing.metadata.version = expected_version;
                {
                    let mut state = self.state();
                    state.connection = Connection::Connected;
                    state.last_error = Some(
                        "remote content changed since last load; refresh before saving".to_string(),
                    );
                }
                self.mirror_to_cache(&outgoing).await;
                warn!("persist rejected: remote version advanced past {expected_version}");
                PersistOutcome::Conflict
            }
            Err(err) => {
                outgoing.metadata.version = expected_version;
                {
                    let mut state = self.state();
                    state.connection = Connection::Disconnected;
                    state.last_error = Some(format!(
                        "saved locally; will retry connecting to the remote store: {err}"
                    ));
                }
                self.mirror_to_cache(&outgoing).await;
                warn!("persist failed, content mirrored to snapshot cache: {err}");
                PersistOutcome::SavedLocally
            }
        }
    }

    async fn mirror_to_cache(&self, doc: &ContentDocument) {
        let value = match serde_json::to_value(doc) {
            Ok(value) => value,
            Err(err) => {
                warn!("could not serialize content for the snapshot cache: {err}");
                return;
            }
        };
        if let Err(err) = snapshots::save(self.cache.pool(), CONTENT_KEY, &value).await {
            warn!("snapshot cache write failed: {err}");
        }
    }

    fn state(&self) -> MutexGuard<'_, EngineState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn autosave_slot(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.autosave
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Content hash over everything except the write-tracking metadata, so a
/// version bump alone never reads as an edit.
fn fingerprint(doc: &ContentDocument) -> String {
    let mut value = serde_json::to_value(doc).unwrap_or(Value::Null);
    if let Some(map) = value.as_object_mut() {
        map.remove("metadata");
    }
    let mut hasher = Sha256::new();
    hasher.update(value.to_string().as_bytes());
    format!("{:x}", hasher.finalize())
}
