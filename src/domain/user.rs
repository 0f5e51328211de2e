//! User entity.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Stable user identifier assigned by the store.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct UserId(i32);

impl UserId {
    /// Wrap a store-assigned identifier.
    pub fn new(raw: i32) -> Self {
        Self(raw)
    }

    /// Access the raw identifier.
    pub fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Registered user.
///
/// ## Invariants
/// - `email` and `username` are each unique across all users (enforced by
///   the store and re-checked at sign-up for ordered error messages).
///
/// There is deliberately no password: login authenticates by knowledge of
/// the (email, username) pair for behavioural parity with the source
/// application. This is a known security gap, not an omission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[schema(example = "ada")]
    pub username: String,
    pub created_at: DateTime<Utc>,
}

/// Sign-up data accepted by the user repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub email: String,
    pub username: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_id_is_transparent_in_json() {
        let id = UserId::new(7);
        assert_eq!(serde_json::to_string(&id).expect("serialise"), "7");
    }

    #[test]
    fn user_serialises_camel_case() {
        let user = User {
            id: UserId::new(1),
            email: "ada@example.com".into(),
            username: "ada".into(),
            created_at: Utc::now(),
        };
        let value = serde_json::to_value(&user).expect("serialise user");
        assert!(value.get("createdAt").is_some());
        assert!(value.get("created_at").is_none());
    }
}
