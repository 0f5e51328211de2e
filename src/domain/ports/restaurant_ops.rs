//! Driving ports for restaurant creation and listing use-cases.

use async_trait::async_trait;

use crate::domain::error::Error;
use crate::domain::restaurant::Restaurant;

/// Raw restaurant creation input as submitted by the client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddRestaurantRequest {
    pub name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
}

/// Domain use-case port for restaurant mutations.
///
/// Creation is access-gated (a principal must exist) but not
/// ownership-gated; the route enforces the session, so the port does not
/// take a principal.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RestaurantCommand: Send + Sync {
    /// Create a restaurant from the submitted fields.
    async fn add_restaurant(&self, request: AddRestaurantRequest) -> Result<Restaurant, Error>;
}

/// Domain use-case port for restaurant reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RestaurantQuery: Send + Sync {
    /// Every restaurant in the store, used to populate selection inputs.
    async fn list_restaurants(&self) -> Result<Vec<Restaurant>, Error>;
}
