//! Shared HTTP adapter state.
//!
//! Handlers receive this bundle via `actix_web::web::Data`, so they depend
//! only on domain ports and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AuthCommand, ReportQuery, RestaurantCommand, RestaurantQuery, ReviewCommand, ReviewQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub auth: Arc<dyn AuthCommand>,
    pub reviews: Arc<dyn ReviewCommand>,
    pub reviews_query: Arc<dyn ReviewQuery>,
    pub restaurants: Arc<dyn RestaurantCommand>,
    pub restaurants_query: Arc<dyn RestaurantQuery>,
    pub reports: Arc<dyn ReportQuery>,
}
