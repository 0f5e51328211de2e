//! PostgreSQL-backed `ReviewRepository` implementation.
//!
//! Carries the plain CRUD surface plus the two aggregate queries behind the
//! report endpoint. The aggregates run in SQL so the whole review history
//! never crosses the wire.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sql_types::{Double, Nullable};
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use tracing::debug;

use crate::domain::ports::{ReviewPersistenceError, ReviewRepository};
use crate::domain::{
    NewReview, RestaurantId, RestaurantReviewCount, Review, ReviewId, ReviewUpdate, UserId,
};

use super::models::{NewReviewRow, ReviewChangeset, ReviewRow};
use super::pool::{DbPool, PoolError};
use super::schema::{restaurants, reviews};

/// Diesel-backed implementation of the `ReviewRepository` port.
#[derive(Clone)]
pub struct DieselReviewRepository {
    pool: DbPool,
}

impl DieselReviewRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ReviewPersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            ReviewPersistenceError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> ReviewPersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    if let DieselError::DatabaseError(kind, info) = &error {
        debug!(?kind, message = info.message(), "diesel operation failed");
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
            ReviewPersistenceError::foreign_key_violation(
                info.constraint_name().unwrap_or("unknown").to_owned(),
            )
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            ReviewPersistenceError::connection("database connection error")
        }
        DieselError::NotFound => ReviewPersistenceError::query("record not found"),
        _ => ReviewPersistenceError::query("database error"),
    }
}

#[async_trait]
impl ReviewRepository for DieselReviewRepository {
    async fn insert(&self, new_review: &NewReview) -> Result<Review, ReviewPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = NewReviewRow {
            text: &new_review.text,
            rating: new_review.rating,
            author: new_review.author.get(),
            restaurant_id: new_review.restaurant_id.get(),
        };
        let inserted: ReviewRow = diesel::insert_into(reviews::table)
            .values(&row)
            .returning(ReviewRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(inserted.into())
    }

    async fn find_by_id(&self, id: ReviewId) -> Result<Option<Review>, ReviewPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<ReviewRow> = reviews::table
            .find(id.get())
            .select(ReviewRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(Into::into))
    }

    async fn update(
        &self,
        id: ReviewId,
        changes: &ReviewUpdate,
    ) -> Result<Review, ReviewPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let changeset = ReviewChangeset {
            text: &changes.text,
            rating: changes.rating,
            restaurant_id: changes.restaurant_id.map(RestaurantId::get),
        };

        // A failing statement rolls the transaction back, so the stored row
        // is either fully updated or untouched.
        let updated: ReviewRow = conn
            .transaction(|conn| {
                async move {
                    diesel::update(reviews::table.find(id.get()))
                        .set(&changeset)
                        .returning(ReviewRow::as_returning())
                        .get_result(conn)
                        .await
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        Ok(updated.into())
    }

    async fn delete(&self, id: ReviewId) -> Result<(), ReviewPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::delete(reviews::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Review>, ReviewPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<ReviewRow> = reviews::table
            .order(reviews::id.asc())
            .select(ReviewRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn average_rating(
        &self,
        author: UserId,
    ) -> Result<Option<f64>, ReviewPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // avg(integer) yields numeric; cast to float8 to read it as f64.
        let average: Option<f64> = reviews::table
            .filter(reviews::author.eq(author.get()))
            .select(diesel::dsl::sql::<Nullable<Double>>("avg(rating)::float8"))
            .first(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(average)
    }

    async fn most_reviewed_restaurant(
        &self,
        author: UserId,
    ) -> Result<Option<RestaurantReviewCount>, ReviewPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // Ties break on the lowest restaurant id.
        let row: Option<(i32, String, i64)> = reviews::table
            .inner_join(restaurants::table)
            .filter(reviews::author.eq(author.get()))
            .group_by((restaurants::id, restaurants::name))
            .select((
                restaurants::id,
                restaurants::name,
                diesel::dsl::count(reviews::id),
            ))
            .order((diesel::dsl::count(reviews::id).desc(), restaurants::id.asc()))
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(|(restaurant_id, name, count)| RestaurantReviewCount {
            restaurant_id: RestaurantId::new(restaurant_id),
            name,
            count,
        }))
    }
}
