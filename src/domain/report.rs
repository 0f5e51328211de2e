//! Per-user review report.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::restaurant::RestaurantId;

/// Review count for a single restaurant within one author's reviews.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantReviewCount {
    pub restaurant_id: RestaurantId,
    pub name: String,
    pub count: i64,
}

/// Aggregates over the reviews authored by one user.
///
/// `average_rating` is `None` and `most_reviewed` is `None` when the user
/// has authored no reviews.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewReport {
    pub average_rating: Option<f64>,
    pub most_reviewed: Option<RestaurantReviewCount>,
}
