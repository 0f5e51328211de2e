//! Review API handlers.
//!
//! ```text
//! GET    /api/v1/reviews
//! POST   /api/v1/reviews        {"text":"...","restaurantId":1,"rating":4}
//! PUT    /api/v1/reviews/{id}   {"text":"...","rating":5,"restaurantId":2}
//! DELETE /api/v1/reviews/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};

use crate::domain::ports::{CreateReviewRequest, EditReviewRequest};
use crate::domain::{Error, RestaurantId, Review, ReviewId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Request body for `POST /api/v1/reviews`.
///
/// All fields are required; they are optional here so the domain can name
/// the first missing one instead of a generic deserialisation failure.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewBody {
    #[schema(example = "Great coffee, slow service.")]
    pub text: Option<String>,
    pub restaurant_id: Option<RestaurantId>,
    pub rating: Option<i32>,
}

impl From<CreateReviewBody> for CreateReviewRequest {
    fn from(body: CreateReviewBody) -> Self {
        Self {
            text: body.text,
            restaurant_id: body.restaurant_id,
            rating: body.rating,
        }
    }
}

/// Request body for `PUT /api/v1/reviews/{id}`.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EditReviewBody {
    pub text: Option<String>,
    pub rating: Option<i32>,
    /// When absent the review keeps its current restaurant.
    pub restaurant_id: Option<RestaurantId>,
}

impl From<EditReviewBody> for EditReviewRequest {
    fn from(body: EditReviewBody) -> Self {
        Self {
            text: body.text,
            rating: body.rating,
            restaurant_id: body.restaurant_id,
        }
    }
}

/// List every review.
#[utoipa::path(
    get,
    path = "/api/v1/reviews",
    responses(
        (status = 200, description = "All reviews", body = [Review]),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["reviews"],
    operation_id = "listReviews"
)]
#[get("/reviews")]
pub async fn list_reviews(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<Review>>> {
    session.require_user_id()?;
    let reviews = state.reviews_query.list_reviews().await?;
    Ok(web::Json(reviews))
}

/// Create a review authored by the session principal.
#[utoipa::path(
    post,
    path = "/api/v1/reviews",
    request_body = CreateReviewBody,
    responses(
        (status = 201, description = "Review created", body = Review),
        (status = 400, description = "Missing text, restaurant or rating", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Restaurant does not exist", body = Error)
    ),
    tags = ["reviews"],
    operation_id = "createReview"
)]
#[post("/reviews")]
pub async fn create_review(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateReviewBody>,
) -> ApiResult<HttpResponse> {
    let principal = session.require_user_id()?;
    let review = state
        .reviews
        .create_review(principal, payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Created().json(review))
}

/// Edit a review; only its author may do so.
#[utoipa::path(
    put,
    path = "/api/v1/reviews/{id}",
    request_body = EditReviewBody,
    params(("id" = i32, Path, description = "Review id")),
    responses(
        (status = 200, description = "Review updated", body = Review),
        (status = 400, description = "Missing text or rating", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Not the author", body = Error),
        (status = 404, description = "Review does not exist", body = Error)
    ),
    tags = ["reviews"],
    operation_id = "editReview"
)]
#[put("/reviews/{id}")]
pub async fn edit_review(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i32>,
    payload: web::Json<EditReviewBody>,
) -> ApiResult<web::Json<Review>> {
    let principal = session.require_user_id()?;
    let id = ReviewId::new(path.into_inner());
    let review = state
        .reviews
        .edit_review(principal, id, payload.into_inner().into())
        .await?;
    Ok(web::Json(review))
}

/// Delete a review; only its author may do so.
#[utoipa::path(
    delete,
    path = "/api/v1/reviews/{id}",
    params(("id" = i32, Path, description = "Review id")),
    responses(
        (status = 204, description = "Review deleted"),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Not the author", body = Error),
        (status = 404, description = "Review does not exist", body = Error)
    ),
    tags = ["reviews"],
    operation_id = "deleteReview"
)]
#[delete("/reviews/{id}")]
pub async fn delete_review(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let principal = session.require_user_id()?;
    state
        .reviews
        .delete_review(principal, ReviewId::new(path.into_inner()))
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserId;
    use crate::domain::ports::{MockReviewCommand, MockReviewQuery};
    use crate::inbound::http::test_utils::{session_cookie, test_state};
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse as TestHttpResponse, test, web};
    use chrono::Utc;
    use serde_json::Value;

    fn stored_review(id: i32, author: i32) -> Review {
        Review {
            id: ReviewId::new(id),
            text: "solid lunch spot".into(),
            rating: 4,
            author: UserId::new(author),
            restaurant_id: RestaurantId::new(1),
            created_at: Utc::now(),
        }
    }

    fn app_with(
        commands: MockReviewCommand,
        query: MockReviewQuery,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let mut state = test_state();
        state.reviews = std::sync::Arc::new(commands);
        state.reviews_query = std::sync::Arc::new(query);
        App::new()
            .wrap(crate::inbound::http::test_utils::test_session_middleware())
            .app_data(web::Data::new(state))
            .service(
                web::scope("/api/v1")
                    .service(list_reviews)
                    .service(create_review)
                    .service(edit_review)
                    .service(delete_review),
            )
            .route(
                "/test/login",
                web::get().to(|session: SessionContext| async move {
                    session.persist_user(UserId::new(1))?;
                    Ok::<_, Error>(TestHttpResponse::Ok())
                }),
            )
    }

    async fn login_cookie<S, B>(app: &S) -> actix_web::cookie::Cookie<'static>
    where
        S: actix_web::dev::Service<
                actix_http::Request,
                Response = actix_web::dev::ServiceResponse<B>,
                Error = actix_web::Error,
            >,
        B: actix_web::body::MessageBody,
    {
        let res =
            test::call_service(app, test::TestRequest::get().uri("/test/login").to_request())
                .await;
        session_cookie(&res).into_owned()
    }

    #[actix_web::test]
    async fn list_rejects_without_session() {
        let app = test::init_service(app_with(
            MockReviewCommand::new(),
            MockReviewQuery::new(),
        ))
        .await;

        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/api/v1/reviews").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn list_returns_reviews_for_session() {
        let mut query = MockReviewQuery::new();
        query
            .expect_list_reviews()
            .times(1)
            .return_once(|| Ok(vec![stored_review(1, 1), stored_review(2, 2)]));
        let app = test::init_service(app_with(MockReviewCommand::new(), query)).await;
        let cookie = login_cookie(&app).await;

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/v1/reviews")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body.as_array().map(Vec::len), Some(2));
    }

    #[actix_web::test]
    async fn create_passes_principal_and_returns_created() {
        let mut commands = MockReviewCommand::new();
        commands
            .expect_create_review()
            .withf(|principal, request| {
                *principal == UserId::new(1) && request.rating == Some(4)
            })
            .times(1)
            .return_once(|_, _| Ok(stored_review(1, 1)));
        let app = test::init_service(app_with(commands, MockReviewQuery::new())).await;
        let cookie = login_cookie(&app).await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/reviews")
                .cookie(cookie)
                .set_json(&CreateReviewBody {
                    text: Some("solid lunch spot".into()),
                    restaurant_id: Some(RestaurantId::new(1)),
                    rating: Some(4),
                })
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(res).await;
        // camelCase field names on the wire.
        assert!(body.get("restaurantId").is_some());
        assert!(body.get("restaurant_id").is_none());
    }

    #[actix_web::test]
    async fn create_surfaces_validation_failure() {
        let mut commands = MockReviewCommand::new();
        commands
            .expect_create_review()
            .times(1)
            .return_once(|_, _| Err(Error::invalid_request("review text cannot be empty")));
        let app = test::init_service(app_with(commands, MockReviewQuery::new())).await;
        let cookie = login_cookie(&app).await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/reviews")
                .cookie(cookie)
                .set_json(&CreateReviewBody::default())
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn edit_targets_the_path_id() {
        let mut commands = MockReviewCommand::new();
        commands
            .expect_edit_review()
            .withf(|_, id, request| {
                *id == ReviewId::new(42) && request.restaurant_id.is_none()
            })
            .times(1)
            .return_once(|_, _, _| Ok(stored_review(42, 1)));
        let app = test::init_service(app_with(commands, MockReviewQuery::new())).await;
        let cookie = login_cookie(&app).await;

        let res = test::call_service(
            &app,
            test::TestRequest::put()
                .uri("/api/v1/reviews/42")
                .cookie(cookie)
                .set_json(&EditReviewBody {
                    text: Some("better now".into()),
                    rating: Some(5),
                    restaurant_id: None,
                })
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn delete_returns_no_content() {
        let mut commands = MockReviewCommand::new();
        commands
            .expect_delete_review()
            .withf(|principal, id| *principal == UserId::new(1) && *id == ReviewId::new(7))
            .times(1)
            .return_once(|_, _| Ok(()));
        let app = test::init_service(app_with(commands, MockReviewQuery::new())).await;
        let cookie = login_cookie(&app).await;

        let res = test::call_service(
            &app,
            test::TestRequest::delete()
                .uri("/api/v1/reviews/7")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::NO_CONTENT);
    }

    #[actix_web::test]
    async fn delete_surfaces_forbidden() {
        let mut commands = MockReviewCommand::new();
        commands.expect_delete_review().times(1).return_once(|_, _| {
            Err(Error::forbidden(
                "you do not have permission to delete this review",
            ))
        });
        let app = test::init_service(app_with(commands, MockReviewQuery::new())).await;
        let cookie = login_cookie(&app).await;

        let res = test::call_service(
            &app,
            test::TestRequest::delete()
                .uri("/api/v1/reviews/7")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
    }
}
