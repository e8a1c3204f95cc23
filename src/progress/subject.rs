use std::{cell::Cell, rc::Rc};

use crate::foundation::error::{ReelError, ReelResult};

/// Handle returned by [`Subject::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener<T> = Box<dyn FnMut(&T)>;

/// Observable value stream with a bounded listener list.
///
/// Listeners run synchronously on [`Subject::publish`], in subscription order.
pub struct Subject<T> {
    listeners: Vec<(SubscriptionId, Listener<T>)>,
    next_id: u64,
    max_listeners: usize,
}

impl<T> Subject<T> {
    /// Subject accepting at most `max_listeners` concurrent subscriptions.
    pub fn new(max_listeners: usize) -> Self {
        Self {
            listeners: Vec::new(),
            next_id: 0,
            max_listeners,
        }
    }

    /// Register `f`. Fails once the listener bound is reached.
    pub fn subscribe(&mut self, f: impl FnMut(&T) + 'static) -> ReelResult<SubscriptionId> {
        if self.listeners.len() >= self.max_listeners {
            return Err(ReelError::validation(format!(
                "subject listener limit {} reached",
                self.max_listeners
            )));
        }
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(f)));
        tracing::debug!(listeners = self.listeners.len(), "subscribed");
        Ok(id)
    }

    /// Remove a listener. Returns `false` when `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        before != self.listeners.len()
    }

    /// Notify every listener with `value`.
    pub fn publish(&mut self, value: &T) {
        for (_, f) in &mut self.listeners {
            f(value);
        }
    }

    /// Number of active listeners.
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Return `true` when nothing is subscribed.
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl<T> std::fmt::Debug for Subject<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subject")
            .field("listeners", &self.listeners.len())
            .field("max_listeners", &self.max_listeners)
            .finish()
    }
}

/// Single-slot mailbox holding the most recent published value.
///
/// Bursts of publications between two reads collapse into the last one.
#[derive(Debug)]
pub struct LatestSlot<T: Copy> {
    cell: Rc<Cell<Option<T>>>,
}

impl<T: Copy + 'static> LatestSlot<T> {
    /// Empty mailbox.
    pub fn new() -> Self {
        Self {
            cell: Rc::new(Cell::new(None)),
        }
    }

    /// Listener that overwrites the slot with each published value.
    pub fn listener(&self) -> impl FnMut(&T) + 'static {
        let cell = Rc::clone(&self.cell);
        move |v: &T| cell.set(Some(*v))
    }

    /// Take the pending value, leaving the slot empty.
    pub fn take(&self) -> Option<T> {
        self.cell.take()
    }

    /// Return `true` when a value is waiting.
    pub fn is_pending(&self) -> bool {
        self.cell.get().is_some()
    }
}

impl<T: Copy + 'static> Default for LatestSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/progress/subject.rs"]
mod tests;
