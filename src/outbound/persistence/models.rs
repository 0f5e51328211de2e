//! Diesel row types mirroring the database schema.
//!
//! Rows convert into domain entities at the adapter boundary; nothing above
//! the persistence layer sees these types.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::{Restaurant, RestaurantId, Review, ReviewId, User, UserId};

use super::schema::{restaurants, reviews, users};

/// Database row for a user.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    pub id: i32,
    pub email: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: UserId::new(row.id),
            email: row.email,
            username: row.username,
            created_at: row.created_at,
        }
    }
}

/// Insertable user row; `id` and `created_at` come from the database.
#[derive(Debug, Insertable)]
#[diesel(table_name = users)]
pub struct NewUserRow<'a> {
    pub email: &'a str,
    pub username: &'a str,
}

/// Database row for a restaurant.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = restaurants)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct RestaurantRow {
    pub id: i32,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
}

impl From<RestaurantRow> for Restaurant {
    fn from(row: RestaurantRow) -> Self {
        Self {
            id: RestaurantId::new(row.id),
            name: row.name,
            address: row.address,
            city: row.city,
            state: row.state,
        }
    }
}

/// Insertable restaurant row.
#[derive(Debug, Insertable)]
#[diesel(table_name = restaurants)]
pub struct NewRestaurantRow<'a> {
    pub name: &'a str,
    pub address: &'a str,
    pub city: &'a str,
    pub state: &'a str,
}

/// Database row for a review.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = reviews)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ReviewRow {
    pub id: i32,
    pub text: String,
    pub rating: i32,
    pub author: i32,
    pub restaurant_id: i32,
    pub created_at: DateTime<Utc>,
}

impl From<ReviewRow> for Review {
    fn from(row: ReviewRow) -> Self {
        Self {
            id: ReviewId::new(row.id),
            text: row.text,
            rating: row.rating,
            author: UserId::new(row.author),
            restaurant_id: RestaurantId::new(row.restaurant_id),
            created_at: row.created_at,
        }
    }
}

/// Insertable review row.
#[derive(Debug, Insertable)]
#[diesel(table_name = reviews)]
pub struct NewReviewRow<'a> {
    pub text: &'a str,
    pub rating: i32,
    pub author: i32,
    pub restaurant_id: i32,
}

/// Changeset applied when editing a review.
///
/// `restaurant_id` is skipped when `None`, keeping the stored value.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = reviews)]
pub struct ReviewChangeset<'a> {
    pub text: &'a str,
    pub rating: i32,
    pub restaurant_id: Option<i32>,
}
