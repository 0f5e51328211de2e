//! Driving port for login and sign-up use-cases.
//!
//! In hexagonal terms this is a *driving* port: the HTTP adapter calls it to
//! resolve credentials to a user without knowing the backing infrastructure,
//! which keeps handler tests deterministic. Session establishment stays in
//! the adapter; the domain only answers "who is this".

use async_trait::async_trait;

use crate::domain::error::Error;
use crate::domain::user::User;

/// Domain use-case port for authentication.
///
/// Authentication is password-less by design: a login succeeds when the
/// submitted username matches the user stored under the submitted email.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthCommand: Send + Sync {
    /// Resolve an (email, username) pair to the stored user.
    async fn login(&self, email: &str, username: &str) -> Result<User, Error>;

    /// Register a new user from an (email, username) pair.
    async fn sign_up(&self, email: &str, username: &str) -> Result<User, Error>;
}
