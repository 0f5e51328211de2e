//! Port abstraction for restaurant persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::restaurant::{NewRestaurant, Restaurant};

/// Persistence errors raised by restaurant repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RestaurantPersistenceError {
    /// Repository connection could not be established.
    #[error("restaurant repository connection failed: {message}")]
    Connection { message: String },

    /// Query or mutation failed during execution.
    #[error("restaurant repository query failed: {message}")]
    Query { message: String },
}

impl RestaurantPersistenceError {
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
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RestaurantRepository: Send + Sync {
    /// Insert a new restaurant and return the stored record with its id.
    async fn insert(
        &self,
        new_restaurant: &NewRestaurant,
    ) -> Result<Restaurant, RestaurantPersistenceError>;

    /// Fetch every restaurant, ordered by id.
    async fn list_all(&self) -> Result<Vec<Restaurant>, RestaurantPersistenceError>;
}
