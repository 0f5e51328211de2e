//! Restaurant review service library.
//!
//! Hexagonal layout: `domain` holds the entities, services and ports,
//! `inbound` the HTTP adapter, `outbound` the persistence adapters, and
//! `server` the wiring that assembles them into an Actix application.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

pub use doc::ApiDoc;
pub use middleware::Trace;
