//! Authentication API handlers.
//!
//! ```text
//! POST /api/v1/auth/login    {"email":"ada@example.com","username":"ada"}
//! POST /api/v1/auth/sign-up  {"email":"ada@example.com","username":"ada"}
//! POST /api/v1/auth/logout
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::{Error, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Request body shared by login and sign-up.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CredentialsRequest {
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[schema(example = "ada")]
    pub username: String,
}

/// Authenticate an existing user and establish a session.
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "Login success", body = User, headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 401, description = "Username does not match", body = Error),
        (status = 404, description = "Email not registered", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CredentialsRequest>,
) -> ApiResult<web::Json<User>> {
    let payload = payload.into_inner();
    let user = state.auth.login(&payload.email, &payload.username).await?;
    session.persist_user(user.id)?;
    Ok(web::Json(user))
}

/// Register a new user and establish a session.
#[utoipa::path(
    post,
    path = "/api/v1/auth/sign-up",
    request_body = CredentialsRequest,
    responses(
        (status = 201, description = "User created", body = User, headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid email", body = Error),
        (status = 409, description = "Email or username already in use", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "signUp",
    security([])
)]
#[post("/auth/sign-up")]
pub async fn sign_up(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CredentialsRequest>,
) -> ApiResult<HttpResponse> {
    let payload = payload.into_inner();
    let user = state
        .auth
        .sign_up(&payload.email, &payload.username)
        .await?;
    session.persist_user(user.id)?;
    Ok(HttpResponse::Created().json(user))
}

/// Drop the session.
#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    responses(
        (status = 204, description = "Session purged"),
        (status = 401, description = "No active session", body = Error)
    ),
    tags = ["auth"],
    operation_id = "logout"
)]
#[post("/auth/logout")]
pub async fn logout(session: SessionContext) -> ApiResult<HttpResponse> {
    session.require_user_id()?;
    session.purge();
    Ok(HttpResponse::NoContent().finish())
}
