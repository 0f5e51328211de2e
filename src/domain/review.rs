//! Review entity and mutation payloads.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::restaurant::RestaurantId;
use crate::domain::user::UserId;

/// Stable review identifier assigned by the store.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct ReviewId(i32);

impl ReviewId {
    /// Wrap a store-assigned identifier.
    pub fn new(raw: i32) -> Self {
        Self(raw)
    }

    /// Access the raw identifier.
    pub fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for ReviewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A user's review of a restaurant.
///
/// ## Invariants
/// - `author` references an existing user and `restaurant_id` an existing
///   restaurant; deleting either parent deletes the review (store cascade).
/// - `text` is non-empty.
/// - `rating` is an unbounded integer; no range is enforced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: ReviewId,
    #[schema(example = "Great coffee, slow service.")]
    pub text: String,
    pub rating: i32,
    pub author: UserId,
    pub restaurant_id: RestaurantId,
    pub created_at: DateTime<Utc>,
}

/// Creation data accepted by the review repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReview {
    pub text: String,
    pub rating: i32,
    pub author: UserId,
    pub restaurant_id: RestaurantId,
}

/// Validated field changes applied when editing a review.
///
/// `restaurant_id` is `None` when the caller did not supply one, in which
/// case the stored value is retained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewUpdate {
    pub text: String,
    pub rating: i32,
    pub restaurant_id: Option<RestaurantId>,
}
