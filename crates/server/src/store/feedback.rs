//! Feedback accessors over the store.

use mensa_core::OrderId;

use super::StoreInner;
use crate::models::Feedback;

impl StoreInner {
    /// Insert a fully-built feedback entry.
    pub fn insert_feedback(&mut self, feedback: Feedback) {
        self.feedback.insert(feedback.id, feedback);
    }

    /// Feedback entries newest first, optionally narrowed to one order,
    /// capped at `limit`.
    pub fn feedback_newest_first(&self, order_id: Option<OrderId>, limit: usize) -> Vec<Feedback> {
        let mut entries: Vec<Feedback> = self
            .feedback
            .values()
            .filter(|entry| match order_id {
                Some(wanted) => entry.order_id == wanted,
                None => true,
            })
            .cloned()
            .collect();
        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        entries.truncate(limit);
        entries
    }
}
