//! Redux-style state store for vitamin consumption and hemoglobin tracking
//!
//! One `Store` owns a `StateTree` of five slices (auth, user, reports,
//! notifications, ui). State changes only through dispatched actions:
//!
//! ```text
//! dispatch(action) -> middleware chain -> root reducer -> subscribers
//!                                              │
//!                                              └─> background persist
//! ```

pub mod actions;
pub mod clock;
pub mod domain_models;
pub mod error;
pub mod history;
pub mod middleware;
pub mod persistence;
pub mod reducers;
pub mod state;
pub mod store;
pub mod subscription;

pub use actions::{Action, ActionRecord, ActionType};
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::StoreError;
pub use middleware::{LoggingMiddleware, Middleware, SanitizeMiddleware};
pub use persistence::{PersistedState, PERSISTED_STATE_VERSION};
pub use reducers::ChangeSet;
pub use state::{Slice, SliceName, StateTree};
pub use store::{Store, StoreBuilder};
pub use subscription::{Subscriber, Subscription};
