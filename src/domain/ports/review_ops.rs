//! Driving ports for review mutation and listing use-cases.

use async_trait::async_trait;

use crate::domain::error::Error;
use crate::domain::restaurant::RestaurantId;
use crate::domain::review::{Review, ReviewId};
use crate::domain::user::UserId;

/// Raw review creation input as submitted by the client.
///
/// Fields are optional so the use-case can report which required input is
/// missing, in a fixed order: text, then restaurant, then rating.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateReviewRequest {
    pub text: Option<String>,
    pub restaurant_id: Option<RestaurantId>,
    pub rating: Option<i32>,
}

/// Raw review edit input as submitted by the client.
///
/// `restaurant_id` is genuinely optional: when absent the review keeps its
/// current restaurant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditReviewRequest {
    pub text: Option<String>,
    pub rating: Option<i32>,
    pub restaurant_id: Option<RestaurantId>,
}

/// Domain use-case port for review mutations.
///
/// Every method takes the authenticated principal explicitly; there is no
/// ambient current-user state in the domain.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewCommand: Send + Sync {
    /// Create a review authored by `principal`.
    async fn create_review(
        &self,
        principal: UserId,
        request: CreateReviewRequest,
    ) -> Result<Review, Error>;

    /// Edit a review; only its author may do so.
    async fn edit_review(
        &self,
        principal: UserId,
        id: ReviewId,
        request: EditReviewRequest,
    ) -> Result<Review, Error>;

    /// Delete a review; only its author may do so.
    async fn delete_review(&self, principal: UserId, id: ReviewId) -> Result<(), Error>;
}

/// Domain use-case port for review reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewQuery: Send + Sync {
    /// Every review in the store, unfiltered and unpaginated.
    async fn list_reviews(&self) -> Result<Vec<Review>, Error>;
}
