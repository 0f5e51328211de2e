//! In-memory adapters implementing the persistence ports.
//!
//! Backs the server when no database is configured and the integration
//! tests. The store mirrors the relational semantics the SQL schema
//! guarantees: unique emails and usernames, a review's restaurant must
//! exist, and deleting a user or restaurant cascades to its reviews.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::ports::{
    RestaurantPersistenceError, RestaurantRepository, ReviewPersistenceError, ReviewRepository,
    UserPersistenceError, UserRepository,
};
use crate::domain::{
    NewRestaurant, NewReview, NewUser, Restaurant, RestaurantId, RestaurantReviewCount, Review,
    ReviewId, ReviewUpdate, User, UserId,
};

#[derive(Default)]
struct StoreState {
    users: Vec<User>,
    restaurants: Vec<Restaurant>,
    reviews: Vec<Review>,
    next_user_id: i32,
    next_restaurant_id: i32,
    next_review_id: i32,
}

/// Shared in-memory store implementing all three repository ports.
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<StoreState>,
}

impl MemoryStore {
    /// Create an empty store behind an `Arc` for sharing across adapters.
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn lock(&self) -> Result<MutexGuard<'_, StoreState>, String> {
        self.state
            .lock()
            .map_err(|_| "store lock poisoned".to_owned())
    }

    /// Delete a user and, as the schema's cascade would, their reviews.
    pub fn delete_user(&self, id: UserId) -> Result<(), UserPersistenceError> {
        let mut state = self.lock().map_err(UserPersistenceError::query)?;
        state.users.retain(|user| user.id != id);
        state.reviews.retain(|review| review.author != id);
        Ok(())
    }

    /// Delete a restaurant and cascade away its reviews.
    pub fn delete_restaurant(&self, id: RestaurantId) -> Result<(), RestaurantPersistenceError> {
        let mut state = self.lock().map_err(RestaurantPersistenceError::query)?;
        state.restaurants.retain(|restaurant| restaurant.id != id);
        state.reviews.retain(|review| review.restaurant_id != id);
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn insert(&self, new_user: &NewUser) -> Result<User, UserPersistenceError> {
        let mut state = self.lock().map_err(UserPersistenceError::query)?;
        if state.users.iter().any(|user| user.email == new_user.email) {
            return Err(UserPersistenceError::unique_violation("users_email_key"));
        }
        if state
            .users
            .iter()
            .any(|user| user.username == new_user.username)
        {
            return Err(UserPersistenceError::unique_violation("users_username_key"));
        }

        state.next_user_id += 1;
        let user = User {
            id: UserId::new(state.next_user_id),
            email: new_user.email.clone(),
            username: new_user.username.clone(),
            created_at: Utc::now(),
        };
        state.users.push(user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserPersistenceError> {
        let state = self.lock().map_err(UserPersistenceError::query)?;
        Ok(state.users.iter().find(|user| user.email == email).cloned())
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<User>, UserPersistenceError> {
        let state = self.lock().map_err(UserPersistenceError::query)?;
        Ok(state
            .users
            .iter()
            .find(|user| user.username == username)
            .cloned())
    }
}

#[async_trait]
impl RestaurantRepository for MemoryStore {
    async fn insert(
        &self,
        new_restaurant: &NewRestaurant,
    ) -> Result<Restaurant, RestaurantPersistenceError> {
        let mut state = self.lock().map_err(RestaurantPersistenceError::query)?;
        state.next_restaurant_id += 1;
        let restaurant = Restaurant {
            id: RestaurantId::new(state.next_restaurant_id),
            name: new_restaurant.name.clone(),
            address: new_restaurant.address.clone(),
            city: new_restaurant.city.clone(),
            state: new_restaurant.state.clone(),
        };
        state.restaurants.push(restaurant.clone());
        Ok(restaurant)
    }

    async fn list_all(&self) -> Result<Vec<Restaurant>, RestaurantPersistenceError> {
        let state = self.lock().map_err(RestaurantPersistenceError::query)?;
        Ok(state.restaurants.clone())
    }
}

#[async_trait]
impl ReviewRepository for MemoryStore {
    async fn insert(&self, new_review: &NewReview) -> Result<Review, ReviewPersistenceError> {
        let mut state = self.lock().map_err(ReviewPersistenceError::query)?;
        let restaurant_exists = state
            .restaurants
            .iter()
            .any(|restaurant| restaurant.id == new_review.restaurant_id);
        if !restaurant_exists {
            return Err(ReviewPersistenceError::foreign_key_violation(
                "reviews_restaurant_id_fkey",
            ));
        }

        state.next_review_id += 1;
        let review = Review {
            id: ReviewId::new(state.next_review_id),
            text: new_review.text.clone(),
            rating: new_review.rating,
            author: new_review.author,
            restaurant_id: new_review.restaurant_id,
            created_at: Utc::now(),
        };
        state.reviews.push(review.clone());
        Ok(review)
    }

    async fn find_by_id(&self, id: ReviewId) -> Result<Option<Review>, ReviewPersistenceError> {
        let state = self.lock().map_err(ReviewPersistenceError::query)?;
        Ok(state.reviews.iter().find(|review| review.id == id).cloned())
    }

    async fn update(
        &self,
        id: ReviewId,
        changes: &ReviewUpdate,
    ) -> Result<Review, ReviewPersistenceError> {
        let mut state = self.lock().map_err(ReviewPersistenceError::query)?;
        // Validate the new restaurant reference before touching the row so a
        // failure leaves it unchanged, as the SQL transaction does.
        if let Some(restaurant_id) = changes.restaurant_id {
            let exists = state
                .restaurants
                .iter()
                .any(|restaurant| restaurant.id == restaurant_id);
            if !exists {
                return Err(ReviewPersistenceError::foreign_key_violation(
                    "reviews_restaurant_id_fkey",
                ));
            }
        }

        let review = state
            .reviews
            .iter_mut()
            .find(|review| review.id == id)
            .ok_or_else(|| ReviewPersistenceError::query("record not found"))?;
        review.text = changes.text.clone();
        review.rating = changes.rating;
        if let Some(restaurant_id) = changes.restaurant_id {
            review.restaurant_id = restaurant_id;
        }
        Ok(review.clone())
    }

    async fn delete(&self, id: ReviewId) -> Result<(), ReviewPersistenceError> {
        let mut state = self.lock().map_err(ReviewPersistenceError::query)?;
        state.reviews.retain(|review| review.id != id);
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Review>, ReviewPersistenceError> {
        let state = self.lock().map_err(ReviewPersistenceError::query)?;
        Ok(state.reviews.clone())
    }

    async fn average_rating(
        &self,
        author: UserId,
    ) -> Result<Option<f64>, ReviewPersistenceError> {
        let state = self.lock().map_err(ReviewPersistenceError::query)?;
        let ratings: Vec<i32> = state
            .reviews
            .iter()
            .filter(|review| review.author == author)
            .map(|review| review.rating)
            .collect();
        if ratings.is_empty() {
            return Ok(None);
        }
        let sum: i64 = ratings.iter().map(|rating| i64::from(*rating)).sum();
        Ok(Some(sum as f64 / ratings.len() as f64))
    }

    async fn most_reviewed_restaurant(
        &self,
        author: UserId,
    ) -> Result<Option<RestaurantReviewCount>, ReviewPersistenceError> {
        let state = self.lock().map_err(ReviewPersistenceError::query)?;
        let mut counts: Vec<(RestaurantId, i64)> = Vec::new();
        for review in state.reviews.iter().filter(|review| review.author == author) {
            match counts
                .iter_mut()
                .find(|(restaurant_id, _)| *restaurant_id == review.restaurant_id)
            {
                Some((_, count)) => *count += 1,
                None => counts.push((review.restaurant_id, 1)),
            }
        }

        // Highest count first; ties break on the lowest restaurant id.
        counts.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        let Some((restaurant_id, count)) = counts.first().copied() else {
            return Ok(None);
        };

        let name = state
            .restaurants
            .iter()
            .find(|restaurant| restaurant.id == restaurant_id)
            .map(|restaurant| restaurant.name.clone())
            .ok_or_else(|| ReviewPersistenceError::query("restaurant row missing"))?;

        Ok(Some(RestaurantReviewCount {
            restaurant_id,
            name,
            count,
        }))
    }
}
