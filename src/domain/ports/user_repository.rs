//! Port abstraction for user persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::user::{NewUser, User};

/// Persistence errors raised by user repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserPersistenceError {
    /// Repository connection could not be established.
    #[error("user repository connection failed: {message}")]
    Connection { message: String },

    /// Query or mutation failed during execution.
    #[error("user repository query failed: {message}")]
    Query { message: String },

    /// A unique constraint (email or username) rejected the insert.
    #[error("user uniqueness violated: {constraint}")]
    UniqueViolation { constraint: String },
}

impl UserPersistenceError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Create a unique-violation error naming the violated constraint.
    pub fn unique_violation(constraint: impl Into<String>) -> Self {
        Self::UniqueViolation {
            constraint: constraint.into(),
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user and return the stored record with its assigned id.
    async fn insert(&self, new_user: &NewUser) -> Result<User, UserPersistenceError>;

    /// Fetch a user by exact email.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch a user by exact username.
    async fn find_by_username(&self, username: &str)
    -> Result<Option<User>, UserPersistenceError>;
}
