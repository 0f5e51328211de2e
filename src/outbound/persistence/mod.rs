//! Diesel-backed persistence adapters for PostgreSQL.

pub mod diesel_restaurant_repository;
pub mod diesel_review_repository;
pub mod diesel_user_repository;
pub mod models;
pub mod pool;
pub mod schema;

pub use diesel_restaurant_repository::DieselRestaurantRepository;
pub use diesel_review_repository::DieselReviewRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
