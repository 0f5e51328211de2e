//! OpenAPI documentation configuration.
//!
//! Generates the OpenAPI specification for the REST API: every endpoint from
//! the inbound layer, the shared error and entity schemas, and the session
//! cookie security scheme. Swagger UI serves the document in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode, Restaurant, Review, User};
use crate::inbound::http::auth::CredentialsRequest;
use crate::inbound::http::reports::ReportResponse;
use crate::inbound::http::restaurants::AddRestaurantBody;
use crate::inbound::http::reviews::{CreateReviewBody, EditReviewBody};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/auth/login or /api/v1/auth/sign-up.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Tableside API",
        description = "Restaurant reviews: session-authenticated review and restaurant management with a per-user report."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::sign_up,
        crate::inbound::http::auth::logout,
        crate::inbound::http::reviews::list_reviews,
        crate::inbound::http::reviews::create_review,
        crate::inbound::http::reviews::edit_review,
        crate::inbound::http::reviews::delete_review,
        crate::inbound::http::restaurants::list_restaurants,
        crate::inbound::http::restaurants::add_restaurant,
        crate::inbound::http::reports::report,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        User,
        Restaurant,
        Review,
        Error,
        ErrorCode,
        CredentialsRequest,
        CreateReviewBody,
        EditReviewBody,
        AddRestaurantBody,
        ReportResponse,
    )),
    tags(
        (name = "auth", description = "Login, sign-up and logout"),
        (name = "reviews", description = "Review CRUD"),
        (name = "restaurants", description = "Restaurant creation and listing"),
        (name = "report", description = "Per-user review aggregates"),
        (name = "health", description = "Probes for orchestration")
    )
)]
pub struct ApiDoc;
