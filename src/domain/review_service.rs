//! Review domain service.
//!
//! Implements the [`ReviewCommand`] and [`ReviewQuery`] driving ports over a
//! [`ReviewRepository`]. Validation is fail-fast and runs before any store
//! mutation; ownership checks gate every mutation of an existing review.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::error::Error;
use crate::domain::ports::{
    CreateReviewRequest, EditReviewRequest, ReviewCommand, ReviewPersistenceError, ReviewQuery,
    ReviewRepository,
};
use crate::domain::review::{NewReview, Review, ReviewId, ReviewUpdate};
use crate::domain::user::UserId;

/// Review service implementing the driving ports.
#[derive(Clone)]
pub struct ReviewService<R> {
    reviews: Arc<R>,
}

impl<R> ReviewService<R> {
    /// Create a new service over the given review repository.
    pub fn new(reviews: Arc<R>) -> Self {
        Self { reviews }
    }
}

fn validate_text(text: Option<&str>) -> Result<String, Error> {
    match text {
        Some(text) if !text.trim().is_empty() => Ok(text.to_owned()),
        _ => Err(Error::invalid_request("review text cannot be empty")),
    }
}

fn validate_rating(rating: Option<i32>) -> Result<i32, Error> {
    rating.ok_or_else(|| Error::invalid_request("a rating must be provided"))
}

fn map_persistence_error(error: ReviewPersistenceError) -> Error {
    match error {
        ReviewPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("review repository unavailable: {message}"))
        }
        ReviewPersistenceError::Query { message } => {
            Error::internal(format!("review repository error: {message}"))
        }
        ReviewPersistenceError::ForeignKeyViolation { .. } => {
            Error::not_found("restaurant does not exist")
        }
    }
}

impl<R: ReviewRepository> ReviewService<R> {
    /// Fetch a review and enforce that `principal` authored it.
    async fn find_owned(
        &self,
        principal: UserId,
        id: ReviewId,
        denial: &'static str,
    ) -> Result<Review, Error> {
        let review = self
            .reviews
            .find_by_id(id)
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(|| Error::not_found("review does not exist"))?;

        if review.author != principal {
            return Err(Error::forbidden(denial));
        }

        Ok(review)
    }
}

#[async_trait]
impl<R: ReviewRepository> ReviewCommand for ReviewService<R> {
    async fn create_review(
        &self,
        principal: UserId,
        request: CreateReviewRequest,
    ) -> Result<Review, Error> {
        // Ordered checks: text, then restaurant, then rating. The first
        // missing input names the failure.
        let text = validate_text(request.text.as_deref())?;
        let restaurant_id = request
            .restaurant_id
            .ok_or_else(|| Error::invalid_request("a restaurant must be selected"))?;
        let rating = validate_rating(request.rating)?;

        let new_review = NewReview {
            text,
            rating,
            author: principal,
            restaurant_id,
        };
        self.reviews
            .insert(&new_review)
            .await
            .map_err(map_persistence_error)
    }

    async fn edit_review(
        &self,
        principal: UserId,
        id: ReviewId,
        request: EditReviewRequest,
    ) -> Result<Review, Error> {
        // Existence and ownership are established before input validation,
        // so a non-author probing with garbage input still sees Forbidden.
        self.find_owned(principal, id, "you do not have permission to edit this review")
            .await?;

        let text = validate_text(request.text.as_deref())?;
        let rating = validate_rating(request.rating)?;
        let changes = ReviewUpdate {
            text,
            rating,
            restaurant_id: request.restaurant_id,
        };

        self.reviews
            .update(id, &changes)
            .await
            .map_err(|error| match error {
                ReviewPersistenceError::Query { message } => {
                    Error::internal(format!("review update failed: {message}"))
                }
                other => map_persistence_error(other),
            })
    }

    async fn delete_review(&self, principal: UserId, id: ReviewId) -> Result<(), Error> {
        self.find_owned(
            principal,
            id,
            "you do not have permission to delete this review",
        )
        .await?;

        self.reviews.delete(id).await.map_err(map_persistence_error)
    }
}

#[async_trait]
impl<R: ReviewRepository> ReviewQuery for ReviewService<R> {
    async fn list_reviews(&self) -> Result<Vec<Review>, Error> {
        self.reviews
            .list_all()
            .await
            .map_err(map_persistence_error)
    }
}
