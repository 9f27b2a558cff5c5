//! Order feedback routes.

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use mensa_core::{FeedbackId, OrderId};

use crate::error::Result;
use crate::models::Feedback;
use crate::services::FeedbackService;
use crate::state::AppState;

/// Body for `POST /feedback`.
#[derive(Debug, Deserialize)]
pub struct CreateFeedbackRequest {
    pub order_id: OrderId,
    /// Star rating, 1 through 5.
    pub rating: u8,
    #[serde(default)]
    pub comment: String,
}

/// Wire representation of a feedback entry.
#[derive(Debug, Serialize)]
pub struct FeedbackResponse {
    pub id: FeedbackId,
    pub order_id: OrderId,
    pub rating: u8,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

impl From<Feedback> for FeedbackResponse {
    fn from(feedback: Feedback) -> Self {
        Self {
            id: feedback.id,
            order_id: feedback.order_id,
            rating: feedback.rating,
            comment: feedback.comment,
            created_at: feedback.created_at,
        }
    }
}

/// POST /feedback
///
/// # Errors
///
/// 404 for an unknown order, 400 for a rating outside 1-5.
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateFeedbackRequest>,
) -> Result<(StatusCode, Json<FeedbackResponse>)> {
    let feedback = FeedbackService::new(state.store())
        .create(body.order_id, body.rating, body.comment)
        .await?;
    Ok((StatusCode::CREATED, Json(feedback.into())))
}

/// Query parameters for the feedback listing.
#[derive(Debug, Deserialize, Default)]
pub struct FeedbackQuery {
    pub order_id: Option<OrderId>,
}

/// GET /feedback
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<FeedbackQuery>,
) -> Result<Json<Vec<FeedbackResponse>>> {
    let entries = FeedbackService::new(state.store())
        .list(query.order_id)
        .await;
    Ok(Json(entries.into_iter().map(FeedbackResponse::from).collect()))
}
