//! crates/portal_core/src/notifications.rs
//!
//! In-memory notice board for one session. Newest notices sit at the front.

use uuid::Uuid;

use crate::domain::{Notification, NotificationKind};

#[derive(Debug, Clone, Default)]
pub struct NotificationStore {
    items: Vec<Notification>,
}

impl NotificationStore {
    /// Seeds the store. `initial` is expected newest-first already.
    pub fn new(initial: Vec<Notification>) -> Self {
        Self { items: initial }
    }

    /// Prepends a notice. No deduplication and no capacity limit.
    pub fn inject(&mut self, notification: Notification) {
        self.items.insert(0, notification);
    }

    pub fn mark_all_read(&mut self) {
        for item in &mut self.items {
            item.read = true;
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn unread_count(&self) -> usize {
        self.items.iter().filter(|n| !n.read).count()
    }

    pub fn items(&self) -> &[Notification] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// The synthetic notice delivered a few seconds into every session.
pub fn grade_published() -> Notification {
    Notification {
        id: format!("new-{}", Uuid::new_v4()),
        title: "New Grade Published".to_string(),
        message: "Mid-term results for Algebra & Calculus have been released.".to_string(),
        time: "Just now".to_string(),
        kind: NotificationKind::Success,
        read: false,
    }
}
