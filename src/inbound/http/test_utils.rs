//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};

use crate::domain::ports::{
    MockAuthCommand, MockReportQuery, MockRestaurantCommand, MockRestaurantQuery,
    MockReviewCommand, MockReviewQuery,
};
use crate::inbound::http::state::HttpState;

/// Build a session middleware configured for tests.
///
/// Generates a fresh signing/encryption key per invocation, names the cookie
/// `session` and disables the `Secure` flag for plain-HTTP test requests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// State bundle populated with expectation-free mocks.
///
/// Callers replace the ports a test exercises; any other port panics when
/// called, which is itself a useful assertion.
pub fn test_state() -> HttpState {
    HttpState {
        auth: Arc::new(MockAuthCommand::new()),
        reviews: Arc::new(MockReviewCommand::new()),
        reviews_query: Arc::new(MockReviewQuery::new()),
        restaurants: Arc::new(MockRestaurantCommand::new()),
        restaurants_query: Arc::new(MockRestaurantQuery::new()),
        reports: Arc::new(MockReportQuery::new()),
    }
}

/// Extract the `session` cookie from a response.
pub fn session_cookie<B>(res: &actix_web::dev::ServiceResponse<B>) -> Cookie<'_> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie set")
}
