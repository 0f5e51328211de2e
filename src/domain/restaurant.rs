//! Restaurant entity.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Stable restaurant identifier assigned by the store.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct RestaurantId(i32);

impl RestaurantId {
    /// Wrap a store-assigned identifier.
    pub fn new(raw: i32) -> Self {
        Self(raw)
    }

    /// Access the raw identifier.
    pub fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for RestaurantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Reviewable restaurant.
///
/// ## Invariants
/// - All four descriptive fields are non-empty at creation. Restaurants are
///   never updated or deleted through the application surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub id: RestaurantId,
    #[schema(example = "Cafe Nero")]
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
}

/// Creation data accepted by the restaurant repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRestaurant {
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
}

impl NewRestaurant {
    /// Validate the combined non-empty condition over all four fields.
    ///
    /// The check is intentionally a single condition: the caller learns that
    /// a field is missing, not which one, matching the application's
    /// single-message validation.
    pub fn try_new(
        name: impl Into<String>,
        address: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
    ) -> Option<Self> {
        let candidate = Self {
            name: name.into(),
            address: address.into(),
            city: city.into(),
            state: state.into(),
        };
        let complete = [
            &candidate.name,
            &candidate.address,
            &candidate.city,
            &candidate.state,
        ]
        .iter()
        .all(|field| !field.trim().is_empty());
        complete.then_some(candidate)
    }
}
