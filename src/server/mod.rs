//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_session::{
    SessionMiddleware,
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::domain::ports::{ReviewRepository, UserRepository};
use crate::domain::{AuthService, ReportingService, RestaurantService, ReviewService};
use crate::inbound::http::auth::{login, logout, sign_up};
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::reports::report;
use crate::inbound::http::restaurants::{add_restaurant, list_restaurants};
use crate::inbound::http::reviews::{create_review, delete_review, edit_review, list_reviews};
use crate::inbound::http::state::HttpState;
use crate::middleware::Trace;
use crate::outbound::MemoryStore;
use crate::outbound::persistence::{
    DieselRestaurantRepository, DieselReviewRepository, DieselUserRepository,
};

fn http_state_from_repos<U, R, S>(users: Arc<U>, reviews: Arc<R>, restaurants: Arc<S>) -> HttpState
where
    U: UserRepository + 'static,
    R: ReviewRepository + 'static,
    S: crate::domain::ports::RestaurantRepository + 'static,
{
    let review_service = Arc::new(ReviewService::new(Arc::clone(&reviews)));
    let restaurant_service = Arc::new(RestaurantService::new(restaurants));
    HttpState {
        auth: Arc::new(AuthService::new(users)),
        reviews: review_service.clone(),
        reviews_query: review_service,
        restaurants: restaurant_service.clone(),
        restaurants_query: restaurant_service,
        reports: Arc::new(ReportingService::new(reviews)),
    }
}

/// Build the handler state from the configured persistence backend.
///
/// A configured pool selects the Diesel adapters; otherwise a shared
/// in-memory store backs every port.
pub fn build_http_state(config: &ServerConfig) -> HttpState {
    match &config.db_pool {
        Some(pool) => http_state_from_repos(
            Arc::new(DieselUserRepository::new(pool.clone())),
            Arc::new(DieselReviewRepository::new(pool.clone())),
            Arc::new(DieselRestaurantRepository::new(pool.clone())),
        ),
        None => memory_http_state(),
    }
}

/// Handler state over a fresh in-memory store.
pub fn memory_http_state() -> HttpState {
    let store = MemoryStore::shared();
    http_state_from_repos(Arc::clone(&store), Arc::clone(&store), store)
}

/// Dependency bundle consumed by [`build_app`].
#[derive(Clone)]
pub struct AppDependencies {
    pub health_state: web::Data<HealthState>,
    pub http_state: web::Data<HttpState>,
    pub key: Key,
    pub cookie_secure: bool,
    pub same_site: SameSite,
}

/// Assemble the application: session middleware on the API scope, trace
/// middleware everywhere, health probes outside the session.
pub fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        key,
        cookie_secure,
        same_site,
    } = deps;

    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(same_site)
        .session_lifecycle(
            PersistentSession::default().session_ttl(actix_web::cookie::time::Duration::hours(2)),
        )
        .build();

    let api = web::scope("/api/v1")
        .wrap(session)
        .service(login)
        .service(sign_up)
        .service(logout)
        .service(list_reviews)
        .service(create_review)
        .service(edit_review)
        .service(delete_review)
        .service(list_restaurants)
        .service(add_restaurant)
        .service(report);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server from the given configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = web::Data::new(build_http_state(&config));
    let ServerConfig {
        key,
        cookie_secure,
        same_site,
        bind_addr,
        db_pool: _,
    } = config;

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            key: key.clone(),
            cookie_secure,
            same_site,
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
