//! Change subscribers
//!
//! Subscribers are called after every dispatch that changed the tree, with
//! the new state, the previous state and the action responsible. A failing
//! or panicking subscriber is logged and skipped; the others still run.

use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::actions::ActionRecord;
use crate::state::StateTree;

pub trait Subscriber: Send {
    fn on_change(
        &mut self,
        state: &StateTree,
        prev: &StateTree,
        record: &ActionRecord,
    ) -> anyhow::Result<()>;
}

impl<F> Subscriber for F
where
    F: FnMut(&StateTree, &StateTree, &ActionRecord) -> anyhow::Result<()> + Send,
{
    fn on_change(
        &mut self,
        state: &StateTree,
        prev: &StateTree,
        record: &ActionRecord,
    ) -> anyhow::Result<()> {
        self(state, prev, record)
    }
}

/// Handle returned by `Store::subscribe`
///
/// Dropping the handle keeps the subscription alive; call `unsubscribe`
/// to stop receiving notifications. Safe to call from inside a subscriber.
#[derive(Debug, Clone)]
pub struct Subscription {
    id: u64,
    active: Arc<AtomicBool>,
}

impl Subscription {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn unsubscribe(&self) {
        self.active.store(false, Ordering::SeqCst);
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }
}

struct Entry {
    id: u64,
    active: Arc<AtomicBool>,
    subscriber: Box<dyn Subscriber>,
}

#[derive(Default)]
pub(crate) struct SubscriberList {
    next_id: u64,
    entries: Vec<Entry>,
}

impl SubscriberList {
    pub(crate) fn add(&mut self, subscriber: Box<dyn Subscriber>) -> Subscription {
        self.next_id += 1;
        let active = Arc::new(AtomicBool::new(true));
        self.entries.push(Entry {
            id: self.next_id,
            active: Arc::clone(&active),
            subscriber,
        });
        Subscription {
            id: self.next_id,
            active,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.active.load(Ordering::SeqCst))
            .count()
    }

    /// Call every active subscriber in subscription order
    pub(crate) fn notify(&mut self, state: &StateTree, prev: &StateTree, record: &ActionRecord) {
        self.entries
            .retain(|entry| entry.active.load(Ordering::SeqCst));

        for entry in &mut self.entries {
            if !entry.active.load(Ordering::SeqCst) {
                continue;
            }
            let outcome = catch_unwind(AssertUnwindSafe(|| {
                entry.subscriber.on_change(state, prev, record)
            }));
            match outcome {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    log::error!(
                        "Subscriber {} failed on {}: {:#}",
                        entry.id,
                        record.action.name(),
                        e
                    );
                }
                Err(panic) => {
                    log::error!(
                        "Subscriber {} panicked on {}: {}",
                        entry.id,
                        record.action.name(),
                        panic_message(panic.as_ref())
                    );
                }
            }
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message
    } else {
        "non-string panic payload"
    }
}
