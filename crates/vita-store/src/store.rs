use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use vita_config::{KeyValueStorage, StoreConfig};

use crate::actions::{Action, ActionRecord, AppAction};
use crate::clock::{Clock, SystemClock};
use crate::error::StoreError;
use crate::history::ActionHistory;
use crate::middleware::Middleware;
use crate::persistence::{self, PersistWriter, PersistedState};
use crate::reducers::app_reducer::{diff, reduce};
use crate::reducers::ReduceContext;
use crate::state::{Slice, SliceName, StateTree};
use crate::subscription::{Subscriber, SubscriberList, Subscription};

/// Store - holds application state and manages the Redux loop
///
/// Dispatch is synchronous: middleware, reducer and subscribers all run to
/// completion before `dispatch` returns. Only persistence is asynchronous.
pub struct Store {
    state: StateTree,
    config: StoreConfig,
    middleware: Vec<Box<dyn Middleware>>,
    subscribers: SubscriberList,
    history: ActionHistory,
    clock: Arc<dyn Clock>,
    storage: Option<Arc<dyn KeyValueStorage>>,
    writer: Option<PersistWriter>,
}

impl Store {
    /// Store without storage, using the default configuration and wall clock
    pub fn new(initial_state: StateTree) -> Self {
        StoreBuilder::new().initial_state(initial_state).build_detached()
    }

    pub fn builder() -> StoreBuilder {
        StoreBuilder::new()
    }

    /// Add middleware to the end of the chain
    pub fn add_middleware(&mut self, middleware: Box<dyn Middleware>) {
        self.middleware.push(middleware);
    }

    /// Get the current state
    pub fn state(&self) -> &StateTree {
        &self.state
    }

    /// Owned copy of the whole tree; later dispatches do not affect it
    pub fn get_state(&self) -> StateTree {
        self.state.clone()
    }

    pub fn get_state_slice(&self, name: SliceName) -> Slice {
        self.state.slice(name)
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Current time according to the store's clock
    pub fn now_ms(&self) -> i64 {
        self.clock.now_ms()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.auth.is_authenticated(self.now_ms())
    }

    pub fn needs_token_refresh(&self) -> bool {
        self.state
            .auth
            .needs_refresh(self.now_ms(), self.config.token_refresh_threshold_ms)
    }

    /// Register a change listener
    pub fn subscribe<F>(&mut self, listener: F) -> Subscription
    where
        F: FnMut(&StateTree, &StateTree, &ActionRecord) -> anyhow::Result<()> + Send + 'static,
    {
        self.subscribers.add(Box::new(listener))
    }

    pub fn add_subscriber(&mut self, subscriber: Box<dyn Subscriber>) -> Subscription {
        self.subscribers.add(subscriber)
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Process an action through middleware chain and reducer
    pub fn dispatch(&mut self, action: impl Into<Action>) -> ActionRecord {
        let mut record = ActionRecord::new(action, self.clock.now_ms());

        for middleware in &mut self.middleware {
            record = middleware.handle(record, &self.state);
        }

        let ctx = ReduceContext::new(record.timestamp, &self.config);
        let (next, changes) = reduce(self.state.clone(), &record.action, &ctx);

        if !changes.is_empty() {
            let prev = std::mem::replace(&mut self.state, next);
            self.subscribers.notify(&self.state, &prev, &record);
            if persistence::durable_change(&prev, &self.state, changes) {
                self.schedule_persist();
            }
        }

        self.history.push(record.clone());
        record
    }

    /// Dispatch by catalog identifier with a JSON payload
    pub fn dispatch_raw(&mut self, action_type: &str, payload: Value) -> ActionRecord {
        self.dispatch(Action::from_parts(action_type, payload))
    }

    /// Return every slice to its initial state
    pub fn reset(&mut self) -> ActionRecord {
        self.dispatch(AppAction::Reset)
    }

    /// Recent actions, oldest first
    pub fn history(&self) -> Vec<ActionRecord> {
        self.history.to_vec()
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    fn snapshot(&self) -> PersistedState {
        let saved_at =
            chrono::DateTime::from_timestamp_millis(self.clock.now_ms()).unwrap_or_default();
        PersistedState::capture(&self.state, saved_at)
    }

    fn schedule_persist(&self) {
        if let Some(writer) = &self.writer {
            writer.schedule(self.snapshot());
        }
    }

    /// Write the durable subset now, logging failures
    pub async fn persist(&self) {
        if let Err(e) = self.try_persist().await {
            log::error!("Failed to persist state: {}", e);
        }
    }

    pub async fn try_persist(&self) -> Result<(), StoreError> {
        let storage = self.storage.as_ref().ok_or(StoreError::NoStorage)?;
        persistence::write(storage.as_ref(), &self.config.storage_key, &self.snapshot()).await?;
        log::info!("Persisted state under {}", self.config.storage_key);
        Ok(())
    }

    /// Load the durable subset from storage, logging failures.
    ///
    /// Returns whether anything was restored.
    pub async fn restore(&mut self) -> bool {
        match self.try_restore().await {
            Ok(restored) => restored,
            Err(e) => {
                log::error!("Failed to restore state: {}", e);
                false
            }
        }
    }

    /// Load the durable subset from storage.
    ///
    /// `Ok(false)` means nothing was stored. Subscribers are notified with
    /// `Action::Restored` when the restored data changed the tree.
    pub async fn try_restore(&mut self) -> Result<bool, StoreError> {
        let storage = self.storage.as_ref().ok_or(StoreError::NoStorage)?;
        let Some(persisted) = persistence::read(storage.as_ref(), &self.config.storage_key).await?
        else {
            log::info!("No persisted state under {}", self.config.storage_key);
            return Ok(false);
        };

        let mut next = self.state.clone();
        persisted.apply_to(&mut next);
        log::info!(
            "Restored state saved at {}",
            persisted.meta.saved_at.to_rfc3339()
        );

        if !diff(&self.state, &next).is_empty() {
            let prev = std::mem::replace(&mut self.state, next);
            let record = ActionRecord::new(Action::Restored, self.clock.now_ms());
            self.subscribers.notify(&self.state, &prev, &record);
        }
        Ok(true)
    }

    /// Flush pending automatic persistence and stop the background writer
    pub async fn shutdown(mut self) {
        if let Some(writer) = self.writer.take() {
            writer.finish().await;
        }
    }
}

/// Builder for `Store`
///
/// `build` must run inside a tokio runtime when storage is configured: it
/// restores persisted state and starts the background writer.
pub struct StoreBuilder {
    config: StoreConfig,
    storage: Option<Arc<dyn KeyValueStorage>>,
    clock: Arc<dyn Clock>,
    middleware: Vec<Box<dyn Middleware>>,
    initial_state: StateTree,
    auto_persist: bool,
    restore: bool,
}

impl Default for StoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl StoreBuilder {
    pub fn new() -> Self {
        Self {
            config: StoreConfig::default(),
            storage: None,
            clock: Arc::new(SystemClock),
            middleware: Vec::new(),
            initial_state: StateTree::initial(),
            auto_persist: true,
            restore: true,
        }
    }

    pub fn config(mut self, config: StoreConfig) -> Self {
        self.config = config;
        self
    }

    pub fn storage(self, storage: impl KeyValueStorage + 'static) -> Self {
        self.shared_storage(Arc::new(storage))
    }

    pub fn shared_storage(mut self, storage: Arc<dyn KeyValueStorage>) -> Self {
        self.storage = Some(storage);
        self
    }

    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn middleware(mut self, middleware: impl Middleware + 'static) -> Self {
        self.middleware.push(Box::new(middleware));
        self
    }

    pub fn initial_state(mut self, state: StateTree) -> Self {
        self.initial_state = state;
        self
    }

    /// Persist automatically after dispatches that change durable state
    pub fn auto_persist(mut self, enabled: bool) -> Self {
        self.auto_persist = enabled;
        self
    }

    /// Restore persisted state while building
    pub fn restore_on_build(mut self, enabled: bool) -> Self {
        self.restore = enabled;
        self
    }

    /// Build without touching storage or spawning tasks
    pub fn build_detached(self) -> Store {
        Store {
            state: self.initial_state,
            history: ActionHistory::new(self.config.max_history_size),
            config: self.config,
            middleware: self.middleware,
            subscribers: SubscriberList::default(),
            clock: self.clock,
            storage: self.storage,
            writer: None,
        }
    }

    pub async fn build(self) -> Store {
        let auto_persist = self.auto_persist;
        let restore = self.restore;
        let mut store = self.build_detached();

        let Some(storage) = store.storage.clone() else {
            return store;
        };
        if restore {
            store.restore().await;
        }
        if auto_persist {
            store.writer = Some(PersistWriter::spawn(
                storage,
                store.config.storage_key.clone(),
                Duration::from_millis(store.config.persist_debounce_ms),
            ));
        }
        store
    }
}
