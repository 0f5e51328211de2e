//! PostgreSQL-backed `RestaurantRepository` implementation.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{RestaurantPersistenceError, RestaurantRepository};
use crate::domain::{NewRestaurant, Restaurant};

use super::models::{NewRestaurantRow, RestaurantRow};
use super::pool::{DbPool, PoolError};
use super::schema::restaurants;

/// Diesel-backed implementation of the `RestaurantRepository` port.
#[derive(Clone)]
pub struct DieselRestaurantRepository {
    pool: DbPool,
}

impl DieselRestaurantRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> RestaurantPersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            RestaurantPersistenceError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> RestaurantPersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    if let DieselError::DatabaseError(kind, info) = &error {
        debug!(?kind, message = info.message(), "diesel operation failed");
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            RestaurantPersistenceError::connection("database connection error")
        }
        DieselError::NotFound => RestaurantPersistenceError::query("record not found"),
        _ => RestaurantPersistenceError::query("database error"),
    }
}

#[async_trait]
impl RestaurantRepository for DieselRestaurantRepository {
    async fn insert(
        &self,
        new_restaurant: &NewRestaurant,
    ) -> Result<Restaurant, RestaurantPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = NewRestaurantRow {
            name: &new_restaurant.name,
            address: &new_restaurant.address,
            city: &new_restaurant.city,
            state: &new_restaurant.state,
        };
        let inserted: RestaurantRow = diesel::insert_into(restaurants::table)
            .values(&row)
            .returning(RestaurantRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(inserted.into())
    }

    async fn list_all(&self) -> Result<Vec<Restaurant>, RestaurantPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<RestaurantRow> = restaurants::table
            .order(restaurants::id.asc())
            .select(RestaurantRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let repo_err = map_pool_error(PoolError::checkout("connection refused"));

        assert!(matches!(
            repo_err,
            RestaurantPersistenceError::Connection { .. }
        ));
    }

    #[rstest]
    fn database_error_maps_to_query_error() {
        let repo_err = map_diesel_error(diesel::result::Error::NotFound);

        assert!(matches!(repo_err, RestaurantPersistenceError::Query { .. }));
    }
}
