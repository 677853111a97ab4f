//! State persistence
//!
//! Only the durable subset of the tree is written: auth, user, and the
//! theme/language pair from the UI slice. It is stored as one JSON document
//! under the configured key.
//!
//! Automatic persistence goes through a background writer. Each dispatch
//! that touches the durable subset publishes a snapshot on a `watch`
//! channel; the writer waits for the debounce window, then writes whatever
//! snapshot is newest, so a burst of dispatches produces one write.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use vita_config::KeyValueStorage;

use crate::error::StoreError;
use crate::reducers::ChangeSet;
use crate::state::{AuthState, SliceName, StateTree, Theme, UserState};

pub const PERSISTED_STATE_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistMeta {
    pub version: u32,
    pub saved_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PersistedUi {
    pub theme: Theme,
    pub language: String,
}

/// The durable subset of the state tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedState {
    pub meta: PersistMeta,
    #[serde(default)]
    pub auth: AuthState,
    #[serde(default)]
    pub user: UserState,
    #[serde(default)]
    pub ui: PersistedUi,
}

impl PersistedState {
    pub fn capture(state: &StateTree, saved_at: DateTime<Utc>) -> Self {
        Self {
            meta: PersistMeta {
                version: PERSISTED_STATE_VERSION,
                saved_at,
            },
            auth: state.auth.clone(),
            user: state.user.clone(),
            ui: PersistedUi {
                theme: state.ui.theme,
                language: state.ui.language.clone(),
            },
        }
    }

    /// Merge the durable fields into `state`, leaving everything else alone
    pub fn apply_to(&self, state: &mut StateTree) {
        state.auth = self.auth.clone();
        state.user = self.user.clone();
        state.ui.theme = self.ui.theme;
        if !self.ui.language.is_empty() {
            state.ui.language.clone_from(&self.ui.language);
        }
    }

    pub fn encode(&self) -> Result<String, StoreError> {
        serde_json::to_string(self).map_err(StoreError::Encode)
    }

    /// Parse a stored document, rejecting other schema versions
    pub fn decode(raw: &str) -> Result<Self, StoreError> {
        let persisted: Self = serde_json::from_str(raw).map_err(StoreError::Decode)?;
        if persisted.meta.version != PERSISTED_STATE_VERSION {
            return Err(StoreError::UnsupportedVersion {
                found: persisted.meta.version,
                expected: PERSISTED_STATE_VERSION,
            });
        }
        Ok(persisted)
    }
}

/// Whether a transition from `prev` to `next` changed anything that is persisted
pub fn durable_change(prev: &StateTree, next: &StateTree, changes: ChangeSet) -> bool {
    if changes.intersects(ChangeSet::AUTH | ChangeSet::USER) {
        return true;
    }
    changes.touches(SliceName::Ui)
        && (prev.ui.theme != next.ui.theme || prev.ui.language != next.ui.language)
}

pub async fn write(
    storage: &dyn KeyValueStorage,
    key: &str,
    persisted: &PersistedState,
) -> Result<(), StoreError> {
    let raw = persisted.encode()?;
    storage.set(key, raw).await?;
    Ok(())
}

/// Read the stored document; `Ok(None)` when nothing has been saved yet
pub async fn read(
    storage: &dyn KeyValueStorage,
    key: &str,
) -> Result<Option<PersistedState>, StoreError> {
    match storage.get(key).await? {
        Some(raw) => PersistedState::decode(&raw).map(Some),
        None => Ok(None),
    }
}

/// Handle to the background writer task
pub(crate) struct PersistWriter {
    tx: watch::Sender<Option<PersistedState>>,
    handle: JoinHandle<()>,
}

impl PersistWriter {
    pub(crate) fn spawn(
        storage: Arc<dyn KeyValueStorage>,
        key: String,
        debounce: Duration,
    ) -> Self {
        let (tx, rx) = watch::channel(None);
        let handle = tokio::spawn(run_writer(storage, key, debounce, rx));
        Self { tx, handle }
    }

    /// Queue a snapshot; replaces any snapshot not yet written
    pub(crate) fn schedule(&self, persisted: PersistedState) {
        self.tx.send_replace(Some(persisted));
    }

    /// Close the channel and wait for the last snapshot to be written
    pub(crate) async fn finish(self) {
        let Self { tx, handle } = self;
        drop(tx);
        if let Err(e) = handle.await {
            log::error!("Persist writer task failed: {}", e);
        }
    }
}

async fn run_writer(
    storage: Arc<dyn KeyValueStorage>,
    key: String,
    debounce: Duration,
    mut rx: watch::Receiver<Option<PersistedState>>,
) {
    // `changed` still reports a pending value after the sender is dropped,
    // so the final snapshot is written before the loop exits
    while rx.changed().await.is_ok() {
        if !debounce.is_zero() {
            tokio::time::sleep(debounce).await;
        }
        let snapshot = rx.borrow_and_update().clone();
        let Some(persisted) = snapshot else {
            continue;
        };
        match write(storage.as_ref(), &key, &persisted).await {
            Ok(()) => log::debug!("Persisted state under {}", key),
            Err(e) => log::error!("Failed to persist state: {}", e),
        }
    }
    log::debug!("Persist writer stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use vita_config::MemoryStorage;

    fn saved_at() -> DateTime<Utc> {
        DateTime::from_timestamp_millis(1_700_000_000_000).unwrap()
    }

    #[test]
    fn test_capture_and_apply_only_durable_fields() {
        let mut source = StateTree::initial();
        source.auth.is_logged_in = true;
        source.auth.token = Some("t".to_string());
        source.user.vitamin_consumption.count = 7;
        source.ui.theme = Theme::Dark;
        source.ui.language = "en".to_string();
        source.ui.drawer_open = true;
        source.reports.loading = true;

        let persisted = PersistedState::capture(&source, saved_at());
        let mut target = StateTree::initial();
        persisted.apply_to(&mut target);

        assert_eq!(target.auth, source.auth);
        assert_eq!(target.user, source.user);
        assert_eq!(target.ui.theme, Theme::Dark);
        assert_eq!(target.ui.language, "en");
        assert!(!target.ui.drawer_open);
        assert!(!target.reports.loading);
    }

    #[test]
    fn test_decode_rejects_other_versions() {
        let mut persisted = PersistedState::capture(&StateTree::initial(), saved_at());
        persisted.meta.version = PERSISTED_STATE_VERSION + 1;
        let raw = serde_json::to_string(&persisted).unwrap();

        let err = PersistedState::decode(&raw).unwrap_err();
        assert!(matches!(err, StoreError::UnsupportedVersion { found: 2, expected: 1 }));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(
            PersistedState::decode("{not json"),
            Err(StoreError::Decode(_))
        ));
    }

    #[test]
    fn test_document_uses_camel_case() {
        let persisted = PersistedState::capture(&StateTree::initial(), saved_at());
        let value: serde_json::Value = serde_json::from_str(&persisted.encode().unwrap()).unwrap();
        assert!(value["meta"]["savedAt"].is_string());
        assert_eq!(value["ui"]["theme"], "light");
        assert!(value["user"]["vitaminConsumption"].is_object());
    }

    #[test]
    fn test_durable_change() {
        let prev = StateTree::initial();
        let mut next = prev.clone();
        next.ui.drawer_open = true;
        assert!(!durable_change(&prev, &next, ChangeSet::UI));
        next.ui.theme = Theme::Dark;
        assert!(durable_change(&prev, &next, ChangeSet::UI));
        assert!(durable_change(&prev, &prev, ChangeSet::USER));
        assert!(!durable_change(&prev, &prev, ChangeSet::REPORTS | ChangeSet::NOTIFICATIONS));
    }

    #[tokio::test(start_paused = true)]
    async fn test_writer_coalesces_bursts() {
        let storage = MemoryStorage::new();
        let writer = PersistWriter::spawn(
            Arc::new(storage.clone()),
            "vita.state".to_string(),
            Duration::from_millis(250),
        );

        let mut state = StateTree::initial();
        for count in 1..=5 {
            state.user.vitamin_consumption.count = count;
            writer.schedule(PersistedState::capture(&state, saved_at()));
        }
        tokio::time::sleep(Duration::from_millis(500)).await;

        assert_eq!(storage.write_count(), 1);
        let stored = PersistedState::decode(&storage.peek("vita.state").unwrap()).unwrap();
        assert_eq!(stored.user.vitamin_consumption.count, 5);
        writer.finish().await;
    }

    #[tokio::test]
    async fn test_finish_flushes_pending_snapshot() {
        let storage = MemoryStorage::new();
        let writer = PersistWriter::spawn(
            Arc::new(storage.clone()),
            "vita.state".to_string(),
            Duration::from_millis(10),
        );
        let mut state = StateTree::initial();
        state.ui.language = "en".to_string();
        writer.schedule(PersistedState::capture(&state, saved_at()));
        writer.finish().await;

        let stored = read(&storage, "vita.state").await.unwrap().unwrap();
        assert_eq!(stored.ui.language, "en");
    }
}
