//! Order feedback domain type.

use chrono::{DateTime, Utc};

use mensa_core::{FeedbackId, OrderId};

/// Feedback left on a single order.
///
/// Feedback is append-only: once recorded it is never edited or deleted,
/// so reports always see what the customer actually said.
#[derive(Debug, Clone)]
pub struct Feedback {
    /// Unique feedback ID.
    pub id: FeedbackId,
    /// The order this feedback refers to.
    pub order_id: OrderId,
    /// Star rating, 1 through 5 (enforced by the feedback service).
    pub rating: u8,
    /// Free-form comment; empty when the customer left none.
    pub comment: String,
    /// When the feedback was recorded.
    pub created_at: DateTime<Utc>,
}
