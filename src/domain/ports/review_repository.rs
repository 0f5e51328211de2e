//! Port abstraction for review persistence adapters and their errors.
//!
//! Beyond plain CRUD this port carries the two aggregate queries used by the
//! report endpoint, so backref-style object graph traversal never leaks into
//! the domain: callers always ask the store an explicit question.

use async_trait::async_trait;

use crate::domain::report::RestaurantReviewCount;
use crate::domain::review::{NewReview, Review, ReviewId, ReviewUpdate};
use crate::domain::user::UserId;

/// Persistence errors raised by review repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReviewPersistenceError {
    /// Repository connection could not be established.
    #[error("review repository connection failed: {message}")]
    Connection { message: String },

    /// Query or mutation failed during execution.
    #[error("review repository query failed: {message}")]
    Query { message: String },

    /// The review referenced a user or restaurant the store does not know.
    #[error("review references a missing row: {message}")]
    ForeignKeyViolation { message: String },
}

impl ReviewPersistenceError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Create a foreign-key violation error with the given message.
    pub fn foreign_key_violation(message: impl Into<String>) -> Self {
        Self::ForeignKeyViolation {
            message: message.into(),
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Insert a new review and return the stored record with its id.
    async fn insert(&self, new_review: &NewReview) -> Result<Review, ReviewPersistenceError>;

    /// Fetch a review by id.
    async fn find_by_id(&self, id: ReviewId) -> Result<Option<Review>, ReviewPersistenceError>;

    /// Apply the given field changes to a review inside one transaction and
    /// return the updated record. A failure leaves the stored row untouched.
    async fn update(
        &self,
        id: ReviewId,
        changes: &ReviewUpdate,
    ) -> Result<Review, ReviewPersistenceError>;

    /// Delete a review by id.
    async fn delete(&self, id: ReviewId) -> Result<(), ReviewPersistenceError>;

    /// Fetch every review, ordered by id.
    async fn list_all(&self) -> Result<Vec<Review>, ReviewPersistenceError>;

    /// Mean rating across the author's reviews; `None` without reviews.
    async fn average_rating(
        &self,
        author: UserId,
    ) -> Result<Option<f64>, ReviewPersistenceError>;

    /// The author's most-reviewed restaurant with its review count.
    ///
    /// Ties break on the lowest restaurant id so the result is deterministic.
    async fn most_reviewed_restaurant(
        &self,
        author: UserId,
    ) -> Result<Option<RestaurantReviewCount>, ReviewPersistenceError>;
}
