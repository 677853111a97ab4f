//! Local copy of the report and notification lists
//!
//! The store only persists auth, user and display preferences. Between CLI
//! invocations the lists are kept here, playing the part of the backend the
//! app would normally fetch them from: loaded into the store with the
//! `SET_LIST` actions at startup and written back before exit.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use vita_config::KeyValueStorage;
use vita_store::actions::{NotificationAction, ReportAction, ReportListPayload};
use vita_store::domain_models::{Notification, Report};
use vita_store::Store;

pub const LISTS_KEY: &str = "vita.lists";

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ListCache {
    pub reports: Vec<Report>,
    pub notifications: Vec<Notification>,
}

impl ListCache {
    pub fn capture(store: &Store) -> Self {
        let state = store.state();
        Self {
            reports: state.reports.list.clone(),
            notifications: state.notifications.list.clone(),
        }
    }
}

/// Load cached lists into the store
///
/// A missing cache leaves the store as is. An unreadable one is logged and
/// skipped, so the command still runs and the next save replaces it.
pub async fn hydrate(store: &mut Store, storage: &dyn KeyValueStorage) {
    let cache = match load(storage).await {
        Ok(Some(cache)) => cache,
        Ok(None) => {
            log::debug!("No cached lists");
            return;
        }
        Err(e) => {
            log::error!("{:#}; starting with empty lists", e);
            return;
        }
    };

    log::debug!(
        "Hydrating {} reports and {} notifications",
        cache.reports.len(),
        cache.notifications.len()
    );
    if !cache.reports.is_empty() {
        store.dispatch(ReportAction::SetList(ReportListPayload {
            reports: cache.reports,
            total: None,
        }));
    }
    if !cache.notifications.is_empty() {
        store.dispatch(NotificationAction::SetList(cache.notifications));
    }
}

async fn load(storage: &dyn KeyValueStorage) -> Result<Option<ListCache>> {
    let Some(raw) = storage
        .get(LISTS_KEY)
        .await
        .context("Failed to read cached lists")?
    else {
        return Ok(None);
    };
    let cache = serde_json::from_str(&raw).context("Failed to parse cached lists")?;
    Ok(Some(cache))
}

pub async fn save(store: &Store, storage: &dyn KeyValueStorage) -> Result<()> {
    let raw = serde_json::to_string(&ListCache::capture(store))
        .context("Failed to serialize lists")?;
    storage
        .set(LISTS_KEY, raw)
        .await
        .context("Failed to write cached lists")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use vita_config::{FileStorage, MemoryStorage};
    use vita_store::domain_models::{NotificationDraft, ReportDraft};

    #[tokio::test]
    async fn test_lists_survive_a_new_store() {
        let storage = MemoryStorage::new();

        let mut first = Store::builder().build_detached();
        first.dispatch(ReportAction::Add(ReportDraft::new("one")));
        first.dispatch(NotificationAction::Add(NotificationDraft::new("hello")));
        save(&first, &storage).await.unwrap();

        let mut second = Store::builder().build_detached();
        hydrate(&mut second, &storage).await;

        let state = second.state();
        assert_eq!(state.reports.list.len(), 1);
        assert_eq!(state.reports.statistics.pending, 1);
        assert_eq!(state.notifications.unread_count, 1);
    }

    #[tokio::test]
    async fn test_missing_cache_is_fine() {
        let mut store = Store::builder().build_detached();
        hydrate(&mut store, &MemoryStorage::new()).await;
        assert!(store.history().is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_cache_is_skipped_and_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        storage
            .set(LISTS_KEY, "{ not json".to_string())
            .await
            .unwrap();

        let mut store = Store::builder().build_detached();
        hydrate(&mut store, &storage).await;
        assert!(store.state().reports.list.is_empty());

        store.dispatch(ReportAction::Add(ReportDraft::new("fresh")));
        save(&store, &storage).await.unwrap();

        let mut reloaded = Store::builder().build_detached();
        hydrate(&mut reloaded, &storage).await;
        assert_eq!(reloaded.state().reports.list.len(), 1);
        assert_eq!(reloaded.state().reports.list[0].title, "fresh");
    }
}
