//! Key initialization notifications.
//!
//! When [`TranslationTable::tr`](crate::TranslationTable::tr) fills missing
//! auto-init languages of a source text, every registered handler is called
//! once, synchronously, before `tr` returns.

use std::fmt;

use crate::table::TranslationTable;
use crate::validate::{
    Entries,
    Targets,
};

/// Event name used in log records.
pub const KEY_INITIALIZED: &str = "init-key";

/// Payload of a key initialization notification.
///
/// `entries` and `targets` borrow the table's live state, so handlers see
/// the translations just added. They are not snapshots.
///
/// Handlers are detached from the table while they run, so `table` reports
/// no subscribers for the duration of the call.
#[derive(Debug, Clone, Copy)]
pub struct KeyInitialized<'a> {
    pub table: &'a TranslationTable,
    pub entries: &'a Entries,
    pub source: &'a str,
    pub targets: &'a Targets,
}

/// Handle returned by [`TranslationTable::on_key_initialized`], used to
/// unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

/// Boxed handler callback.
type Handler = Box<dyn FnMut(&KeyInitialized<'_>) + Send>;

/// Registered handlers in subscription order.
#[derive(Default)]
pub(crate) struct Subscribers {
    /// Next id to hand out
    next_id: u64,
    /// Handlers with their ids, in subscription order
    handlers: Vec<(SubscriptionId, Handler)>,
}

impl Subscribers {
    pub(crate) fn subscribe(&mut self, handler: Handler) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.handlers.push((id, handler));
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(handler_id, _)| *handler_id != id);
        self.handlers.len() != before
    }

    pub(crate) fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Call every handler in subscription order.
    pub(crate) fn notify(&mut self, event: &KeyInitialized<'_>) {
        for (_, handler) in &mut self.handlers {
            handler(event);
        }
    }
}

impl fmt::Debug for Subscribers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscribers").field("handlers", &self.len()).finish()
    }
}
