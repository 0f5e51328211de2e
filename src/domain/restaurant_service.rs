//! Restaurant domain service.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::error::Error;
use crate::domain::ports::{
    AddRestaurantRequest, RestaurantCommand, RestaurantPersistenceError, RestaurantQuery,
    RestaurantRepository,
};
use crate::domain::restaurant::{NewRestaurant, Restaurant};

/// Restaurant service implementing the driving ports.
#[derive(Clone)]
pub struct RestaurantService<R> {
    restaurants: Arc<R>,
}

impl<R> RestaurantService<R> {
    /// Create a new service over the given restaurant repository.
    pub fn new(restaurants: Arc<R>) -> Self {
        Self { restaurants }
    }
}

fn map_persistence_error(error: RestaurantPersistenceError) -> Error {
    match error {
        RestaurantPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("restaurant repository unavailable: {message}"))
        }
        RestaurantPersistenceError::Query { message } => {
            Error::internal(format!("restaurant repository error: {message}"))
        }
    }
}

#[async_trait]
impl<R: RestaurantRepository> RestaurantCommand for RestaurantService<R> {
    async fn add_restaurant(&self, request: AddRestaurantRequest) -> Result<Restaurant, Error> {
        // One combined condition over all four fields; the response does not
        // say which field was missing.
        let new_restaurant = NewRestaurant::try_new(
            request.name.unwrap_or_default(),
            request.address.unwrap_or_default(),
            request.city.unwrap_or_default(),
            request.state.unwrap_or_default(),
        )
        .ok_or_else(|| Error::invalid_request("all restaurant fields are required"))?;

        self.restaurants
            .insert(&new_restaurant)
            .await
            .map_err(map_persistence_error)
    }
}

#[async_trait]
impl<R: RestaurantRepository> RestaurantQuery for RestaurantService<R> {
    async fn list_restaurants(&self) -> Result<Vec<Restaurant>, Error> {
        self.restaurants
            .list_all()
            .await
            .map_err(map_persistence_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockRestaurantRepository;
    use crate::domain::restaurant::RestaurantId;
    use rstest::rstest;

    fn stored_restaurant(id: i32, name: &str) -> Restaurant {
        Restaurant {
            id: RestaurantId::new(id),
            name: name.into(),
            address: "1 Main St".into(),
            city: "Springfield".into(),
            state: "IL".into(),
        }
    }

    fn complete_request() -> AddRestaurantRequest {
        AddRestaurantRequest {
            name: Some("Cafe".into()),
            address: Some("1 Main St".into()),
            city: Some("Springfield".into()),
            state: Some("IL".into()),
        }
    }

    fn service(repo: MockRestaurantRepository) -> RestaurantService<MockRestaurantRepository> {
        RestaurantService::new(Arc::new(repo))
    }

    #[rstest]
    #[case(AddRestaurantRequest::default())]
    #[case(AddRestaurantRequest { name: None, ..complete_request() })]
    #[case(AddRestaurantRequest { address: Some("  ".into()), ..complete_request() })]
    #[case(AddRestaurantRequest { city: Some(String::new()), ..complete_request() })]
    #[case(AddRestaurantRequest { state: None, ..complete_request() })]
    #[tokio::test]
    async fn rejects_any_missing_field_with_one_message(#[case] request: AddRestaurantRequest) {
        let mut repo = MockRestaurantRepository::new();
        repo.expect_insert().times(0);

        let error = service(repo)
            .add_restaurant(request)
            .await
            .expect_err("incomplete input must fail");
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        assert_eq!(error.message(), "all restaurant fields are required");
    }

    #[tokio::test]
    async fn inserts_complete_restaurant() {
        let mut repo = MockRestaurantRepository::new();
        repo.expect_insert()
            .withf(|new_restaurant: &NewRestaurant| new_restaurant.name == "Cafe")
            .times(1)
            .return_once(|_| Ok(stored_restaurant(3, "Cafe")));

        let restaurant = service(repo)
            .add_restaurant(complete_request())
            .await
            .expect("complete input creates");
        assert_eq!(restaurant.id, RestaurantId::new(3));
    }

    #[tokio::test]
    async fn list_returns_every_restaurant() {
        let mut repo = MockRestaurantRepository::new();
        repo.expect_list_all().times(1).return_once(|| {
            Ok(vec![
                stored_restaurant(1, "Cafe"),
                stored_restaurant(2, "Diner"),
            ])
        });

        let restaurants = service(repo)
            .list_restaurants()
            .await
            .expect("list succeeds");
        assert_eq!(restaurants.len(), 2);
    }

    #[tokio::test]
    async fn maps_connection_failure_to_service_unavailable() {
        let mut repo = MockRestaurantRepository::new();
        repo.expect_list_all()
            .times(1)
            .return_once(|| Err(RestaurantPersistenceError::connection("pool exhausted")));

        let error = service(repo)
            .list_restaurants()
            .await
            .expect_err("connection failure surfaces");
        assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
    }
}
