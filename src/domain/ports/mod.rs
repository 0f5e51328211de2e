//! Domain ports and supporting types for the hexagonal boundary.

mod auth_command;
mod report_query;
mod restaurant_ops;
mod restaurant_repository;
mod review_ops;
mod review_repository;
mod user_repository;

#[cfg(test)]
pub use auth_command::MockAuthCommand;
pub use auth_command::AuthCommand;
#[cfg(test)]
pub use report_query::MockReportQuery;
pub use report_query::ReportQuery;
#[cfg(test)]
pub use restaurant_ops::{MockRestaurantCommand, MockRestaurantQuery};
pub use restaurant_ops::{AddRestaurantRequest, RestaurantCommand, RestaurantQuery};
#[cfg(test)]
pub use restaurant_repository::MockRestaurantRepository;
pub use restaurant_repository::{RestaurantPersistenceError, RestaurantRepository};
#[cfg(test)]
pub use review_ops::{MockReviewCommand, MockReviewQuery};
pub use review_ops::{CreateReviewRequest, EditReviewRequest, ReviewCommand, ReviewQuery};
#[cfg(test)]
pub use review_repository::MockReviewRepository;
pub use review_repository::{ReviewPersistenceError, ReviewRepository};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
