//! Order feedback service.

use chrono::Utc;
use thiserror::Error;
use tracing::info;

use mensa_core::OrderId;

use crate::models::Feedback;
use crate::store::Store;

/// How many feedback entries a listing returns at most.
const LIST_LIMIT: usize = 100;

/// Errors that can occur during feedback operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FeedbackError {
    /// Referenced order does not exist.
    #[error("order not found")]
    OrderNotFound,

    /// The rating falls outside the 1-5 star scale.
    #[error("rating must be between 1 and 5 (got {0})")]
    InvalidRating(u8),
}

/// Feedback service.
pub struct FeedbackService<'a> {
    store: &'a Store,
}

impl<'a> FeedbackService<'a> {
    /// Create a new feedback service.
    #[must_use]
    pub const fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Record feedback on an order.
    ///
    /// # Errors
    ///
    /// [`FeedbackError::InvalidRating`] for a rating outside 1-5,
    /// [`FeedbackError::OrderNotFound`] if the order does not exist.
    pub async fn create(
        &self,
        order_id: OrderId,
        rating: u8,
        comment: String,
    ) -> Result<Feedback, FeedbackError> {
        if !(1..=5).contains(&rating) {
            return Err(FeedbackError::InvalidRating(rating));
        }

        let mut inner = self.store.write().await;
        if inner.order(order_id).is_none() {
            return Err(FeedbackError::OrderNotFound);
        }

        let feedback = Feedback {
            id: inner.next_feedback_id(),
            order_id,
            rating,
            comment,
            created_at: Utc::now(),
        };
        inner.insert_feedback(feedback.clone());

        info!(feedback_id = %feedback.id, order_id = %order_id, rating, "feedback recorded");
        Ok(feedback)
    }

    /// Feedback entries newest first, optionally narrowed to one order.
    pub async fn list(&self, order_id: Option<OrderId>) -> Vec<Feedback> {
        self.store
            .read()
            .await
            .feedback_newest_first(order_id, LIST_LIMIT)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::services::OrderService;
    use crate::services::reservation::LineRequest;
    use crate::store::catalog::tests::draft;
    use mensa_core::{Category, CustomerRef, Stock};

    async fn store_with_order() -> (Store, OrderId) {
        let store = Store::new();
        let mut inner = store.write().await;
        let item = inner.insert_menu_item(draft("Samosa", Category::Snacks, Stock::Unlimited));
        drop(inner);

        let order = OrderService::new(&store)
            .create(
                CustomerRef::Guest("Sam".to_owned()),
                "Sam".to_owned(),
                &[LineRequest {
                    menu_item_id: item.id,
                    qty: 1,
                }],
            )
            .await
            .unwrap();
        (store, order.id)
    }

    #[tokio::test]
    async fn test_create_records_rating_and_comment() {
        let (store, order_id) = store_with_order().await;
        let feedback = FeedbackService::new(&store);

        let entry = feedback
            .create(order_id, 4, "Crispy".to_owned())
            .await
            .unwrap();
        assert_eq!(entry.order_id, order_id);
        assert_eq!(entry.rating, 4);
        assert_eq!(entry.comment, "Crispy");
    }

    #[tokio::test]
    async fn test_rating_outside_scale_rejected() {
        let (store, order_id) = store_with_order().await;
        let feedback = FeedbackService::new(&store);

        for rating in [0, 6] {
            let err = feedback
                .create(order_id, rating, String::new())
                .await
                .unwrap_err();
            assert_eq!(err, FeedbackError::InvalidRating(rating));
        }
        assert!(feedback.list(None).await.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_order_rejected() {
        let store = Store::new();
        let feedback = FeedbackService::new(&store);

        let err = feedback
            .create(OrderId::new(99), 5, String::new())
            .await
            .unwrap_err();
        assert_eq!(err, FeedbackError::OrderNotFound);
    }

    #[tokio::test]
    async fn test_list_filters_by_order() {
        let (store, order_id) = store_with_order().await;
        let feedback = FeedbackService::new(&store);

        feedback.create(order_id, 5, String::new()).await.unwrap();
        feedback.create(order_id, 3, String::new()).await.unwrap();

        assert_eq!(feedback.list(Some(order_id)).await.len(), 2);
        assert!(feedback.list(Some(OrderId::new(99))).await.is_empty());
    }
}
