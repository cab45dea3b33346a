//! Append-only queue of transient user-facing messages.
//!
//! The queue itself has no notion of time beyond stamping `created_at_ms`;
//! expiry is driven by whoever owns it (see `MarketplaceContext::notify`).

use crate::domain::{AppNotification, NotificationId, NotificationKind, TimestampMs};

#[derive(Debug, Clone, Default)]
pub struct NotificationQueue {
    next_id: u64,
    items: Vec<AppNotification>,
}

impl NotificationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a notification. Ids are never reused, even after `clear`.
    pub fn push(
        &mut self,
        message: impl Into<String>,
        kind: NotificationKind,
        now: TimestampMs,
    ) -> NotificationId {
        self.next_id = self.next_id.saturating_add(1);
        let id = NotificationId(self.next_id);
        self.items.push(AppNotification {
            id,
            message: message.into(),
            kind,
            created_at_ms: now,
        });
        id
    }

    /// Returns false when the notification was already gone.
    pub fn remove(&mut self, id: NotificationId) -> bool {
        match self.items.iter().position(|n| n.id == id) {
            Some(idx) => {
                self.items.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, id: NotificationId) -> bool {
        self.items.iter().any(|n| n.id == id)
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &AppNotification> {
        self.items.iter()
    }

    pub fn snapshot(&self) -> Vec<AppNotification> {
        self.items.clone()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
