//! Core domain model and services.
//!
//! Entities and use-case services live here together with the ports they
//! depend on. Nothing in this module knows about HTTP or Diesel; adapters on
//! either side of the hexagon translate to and from these types.

mod auth_service;
mod error;
pub mod ports;
mod report;
mod reporting_service;
mod restaurant;
mod restaurant_service;
mod review;
mod review_service;
mod user;

pub use auth_service::AuthService;
pub use error::{Error, ErrorCode};
pub use report::{RestaurantReviewCount, ReviewReport};
pub use reporting_service::ReportingService;
pub use restaurant::{NewRestaurant, Restaurant, RestaurantId};
pub use restaurant_service::RestaurantService;
pub use review::{NewReview, Review, ReviewId, ReviewUpdate};
pub use review_service::ReviewService;
pub use user::{NewUser, User, UserId};
