//! Restaurant API handlers.
//!
//! ```text
//! GET  /api/v1/restaurants
//! POST /api/v1/restaurants {"name":"Cafe","address":"1 Main St","city":"Springfield","state":"IL"}
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::ports::AddRestaurantRequest;
use crate::domain::{Error, Restaurant};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Request body for `POST /api/v1/restaurants`.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddRestaurantBody {
    #[schema(example = "Cafe Nero")]
    pub name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
}

impl From<AddRestaurantBody> for AddRestaurantRequest {
    fn from(body: AddRestaurantBody) -> Self {
        Self {
            name: body.name,
            address: body.address,
            city: body.city,
            state: body.state,
        }
    }
}

/// List every restaurant.
#[utoipa::path(
    get,
    path = "/api/v1/restaurants",
    responses(
        (status = 200, description = "All restaurants", body = [Restaurant]),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["restaurants"],
    operation_id = "listRestaurants"
)]
#[get("/restaurants")]
pub async fn list_restaurants(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<Restaurant>>> {
    session.require_user_id()?;
    let restaurants = state.restaurants_query.list_restaurants().await?;
    Ok(web::Json(restaurants))
}

/// Create a restaurant.
///
/// Access-gated but not ownership-gated: any authenticated user may add any
/// restaurant.
#[utoipa::path(
    post,
    path = "/api/v1/restaurants",
    request_body = AddRestaurantBody,
    responses(
        (status = 201, description = "Restaurant created", body = Restaurant),
        (status = 400, description = "A field is missing or empty", body = Error),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["restaurants"],
    operation_id = "addRestaurant"
)]
#[post("/restaurants")]
pub async fn add_restaurant(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<AddRestaurantBody>,
) -> ApiResult<HttpResponse> {
    session.require_user_id()?;
    let restaurant = state
        .restaurants
        .add_restaurant(payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Created().json(restaurant))
}
