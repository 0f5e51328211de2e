//! Reporting domain service.
//!
//! Implements the [`ReportQuery`] driving port by combining the two
//! aggregate reads exposed by the review repository.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::error::Error;
use crate::domain::ports::{ReportQuery, ReviewPersistenceError, ReviewRepository};
use crate::domain::report::ReviewReport;
use crate::domain::user::UserId;

/// Reporting service implementing the driving port.
#[derive(Clone)]
pub struct ReportingService<R> {
    reviews: Arc<R>,
}

impl<R> ReportingService<R> {
    /// Create a new service over the given review repository.
    pub fn new(reviews: Arc<R>) -> Self {
        Self { reviews }
    }
}

fn map_persistence_error(error: ReviewPersistenceError) -> Error {
    match error {
        ReviewPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("review repository unavailable: {message}"))
        }
        other => Error::internal(format!("report aggregation failed: {other}")),
    }
}

#[async_trait]
impl<R: ReviewRepository> ReportQuery for ReportingService<R> {
    async fn report(&self, principal: UserId) -> Result<ReviewReport, Error> {
        let average_rating = self
            .reviews
            .average_rating(principal)
            .await
            .map_err(map_persistence_error)?;
        let most_reviewed = self
            .reviews
            .most_reviewed_restaurant(principal)
            .await
            .map_err(map_persistence_error)?;

        Ok(ReviewReport {
            average_rating,
            most_reviewed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockReviewRepository;
    use crate::domain::report::RestaurantReviewCount;
    use crate::domain::restaurant::RestaurantId;

    fn service(repo: MockReviewRepository) -> ReportingService<MockReviewRepository> {
        ReportingService::new(Arc::new(repo))
    }

    #[tokio::test]
    async fn combines_both_aggregates() {
        let mut repo = MockReviewRepository::new();
        repo.expect_average_rating()
            .withf(|author| *author == UserId::new(5))
            .times(1)
            .return_once(|_| Ok(Some(4.5)));
        repo.expect_most_reviewed_restaurant()
            .withf(|author| *author == UserId::new(5))
            .times(1)
            .return_once(|_| {
                Ok(Some(RestaurantReviewCount {
                    restaurant_id: RestaurantId::new(2),
                    name: "Cafe".into(),
                    count: 3,
                }))
            });

        let report = service(repo)
            .report(UserId::new(5))
            .await
            .expect("report succeeds");
        assert_eq!(report.average_rating, Some(4.5));
        let most = report.most_reviewed.expect("aggregate present");
        assert_eq!(most.name, "Cafe");
        assert_eq!(most.count, 3);
    }

    #[tokio::test]
    async fn empty_history_yields_absent_aggregates() {
        let mut repo = MockReviewRepository::new();
        repo.expect_average_rating().times(1).return_once(|_| Ok(None));
        repo.expect_most_reviewed_restaurant()
            .times(1)
            .return_once(|_| Ok(None));

        let report = service(repo)
            .report(UserId::new(5))
            .await
            .expect("report succeeds");
        assert_eq!(report.average_rating, None);
        assert!(report.most_reviewed.is_none());
    }

    #[tokio::test]
    async fn surfaces_connection_failure() {
        let mut repo = MockReviewRepository::new();
        repo.expect_average_rating()
            .times(1)
            .return_once(|_| Err(ReviewPersistenceError::connection("pool exhausted")));
        repo.expect_most_reviewed_restaurant().times(0);

        let error = service(repo)
            .report(UserId::new(5))
            .await
            .expect_err("connection failure surfaces");
        assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
    }
}
