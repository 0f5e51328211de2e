//! Driving port for the per-user review report.

use async_trait::async_trait;

use crate::domain::error::Error;
use crate::domain::report::ReviewReport;
use crate::domain::user::UserId;

/// Domain use-case port for the report read.
///
/// A pure read: no mutation, no side effects. When the principal has
/// authored no reviews both aggregates are absent. The most-reviewed
/// selection breaks ties on the lowest restaurant id.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReportQuery: Send + Sync {
    /// Aggregate the principal's reviews.
    async fn report(&self, principal: UserId) -> Result<ReviewReport, Error>;
}
