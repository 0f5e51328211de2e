//! Authentication domain service.
//!
//! Implements the [`AuthCommand`] driving port over a [`UserRepository`].
//! Login is password-less by design: the submitted username is compared
//! against the record stored under the submitted email. Reimplementations
//! keep this behaviour for parity with the source application; adding a real
//! credential check is an explicit product decision, not a bug fix.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::error::Error;
use crate::domain::ports::{AuthCommand, UserPersistenceError, UserRepository};
use crate::domain::user::{NewUser, User};

/// Minimum accepted email length at sign-up, in characters.
const EMAIL_MIN_CHARS: usize = 4;

/// Authentication service implementing the driving port.
#[derive(Clone)]
pub struct AuthService<U> {
    users: Arc<U>,
}

impl<U> AuthService<U> {
    /// Create a new service over the given user repository.
    pub fn new(users: Arc<U>) -> Self {
        Self { users }
    }
}

impl<U: UserRepository> AuthService<U> {
    fn map_persistence_error(error: UserPersistenceError) -> Error {
        match error {
            UserPersistenceError::Connection { message } => {
                Error::service_unavailable(format!("user repository unavailable: {message}"))
            }
            UserPersistenceError::Query { message } => {
                Error::internal(format!("user repository error: {message}"))
            }
            // Backstop for the insert race: a concurrent sign-up can slip
            // past the pre-checks, so the unique key still maps to Conflict.
            UserPersistenceError::UniqueViolation { constraint } => {
                if constraint.contains("email") {
                    Error::conflict("email is already in use")
                } else {
                    Error::conflict("username is already in use")
                }
            }
        }
    }
}

#[async_trait]
impl<U: UserRepository> AuthCommand for AuthService<U> {
    async fn login(&self, email: &str, username: &str) -> Result<User, Error> {
        let user = self
            .users
            .find_by_email(email)
            .await
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| Error::not_found("email does not exist"))?;

        if user.username != username {
            return Err(Error::invalid_credentials("information is incorrect"));
        }

        Ok(user)
    }

    async fn sign_up(&self, email: &str, username: &str) -> Result<User, Error> {
        // Check order decides which message surfaces when several conditions
        // fail at once: email in use, then username in use, then email shape.
        if self
            .users
            .find_by_email(email)
            .await
            .map_err(Self::map_persistence_error)?
            .is_some()
        {
            return Err(Error::conflict("email is already in use"));
        }

        if self
            .users
            .find_by_username(username)
            .await
            .map_err(Self::map_persistence_error)?
            .is_some()
        {
            return Err(Error::conflict("username is already in use"));
        }

        if email.chars().count() < EMAIL_MIN_CHARS {
            return Err(Error::invalid_request("email is invalid"));
        }

        let new_user = NewUser {
            email: email.to_owned(),
            username: username.to_owned(),
        };
        self.users
            .insert(&new_user)
            .await
            .map_err(Self::map_persistence_error)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for login/sign-up semantics and check ordering.

    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockUserRepository;
    use crate::domain::user::UserId;
    use chrono::Utc;
    use rstest::rstest;

    fn stored_user(id: i32, email: &str, username: &str) -> User {
        User {
            id: UserId::new(id),
            email: email.into(),
            username: username.into(),
            created_at: Utc::now(),
        }
    }

    fn service(repo: MockUserRepository) -> AuthService<MockUserRepository> {
        AuthService::new(Arc::new(repo))
    }

    #[tokio::test]
    async fn login_rejects_unknown_email_with_not_found() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .times(1)
            .return_once(|_| Ok(None));

        let error = service(repo)
            .login("ghost@example.com", "ghost")
            .await
            .expect_err("unknown email must fail");
        assert_eq!(error.code(), ErrorCode::NotFound);
        assert_eq!(error.message(), "email does not exist");
    }

    #[tokio::test]
    async fn login_rejects_mismatched_username() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .times(1)
            .return_once(|_| Ok(Some(stored_user(1, "ada@example.com", "ada"))));

        let error = service(repo)
            .login("ada@example.com", "not-ada")
            .await
            .expect_err("mismatched username must fail");
        assert_eq!(error.code(), ErrorCode::InvalidCredentials);
        assert_eq!(error.message(), "information is incorrect");
    }

    #[tokio::test]
    async fn login_returns_user_on_match() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .withf(|email| email == "ada@example.com")
            .times(1)
            .return_once(|_| Ok(Some(stored_user(1, "ada@example.com", "ada"))));

        let user = service(repo)
            .login("ada@example.com", "ada")
            .await
            .expect("matching pair logs in");
        assert_eq!(user.id, UserId::new(1));
    }

    #[tokio::test]
    async fn sign_up_rejects_taken_email_before_other_checks() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .times(1)
            .return_once(|_| Ok(Some(stored_user(1, "a@b", "ada"))));
        // Username lookup must not run once the email check failed.
        repo.expect_find_by_username().times(0);

        // Email is also shorter than four characters; the in-use message
        // still wins because checks run in order.
        let error = service(repo)
            .sign_up("a@b", "other")
            .await
            .expect_err("taken email must fail");
        assert_eq!(error.code(), ErrorCode::Conflict);
        assert_eq!(error.message(), "email is already in use");
    }

    #[tokio::test]
    async fn sign_up_rejects_taken_username_second() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .times(1)
            .return_once(|_| Ok(None));
        repo.expect_find_by_username()
            .times(1)
            .return_once(|_| Ok(Some(stored_user(1, "ada@example.com", "ada"))));

        let error = service(repo)
            .sign_up("new@example.com", "ada")
            .await
            .expect_err("taken username must fail");
        assert_eq!(error.code(), ErrorCode::Conflict);
        assert_eq!(error.message(), "username is already in use");
    }

    #[rstest]
    #[case("")]
    #[case("a@b")]
    #[tokio::test]
    async fn sign_up_rejects_short_email_after_uniqueness(#[case] email: &str) {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .times(1)
            .return_once(|_| Ok(None));
        repo.expect_find_by_username()
            .times(1)
            .return_once(|_| Ok(None));
        repo.expect_insert().times(0);

        let error = service(repo)
            .sign_up(email, "someone")
            .await
            .expect_err("short email must fail");
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        assert_eq!(error.message(), "email is invalid");
    }

    #[tokio::test]
    async fn sign_up_inserts_when_all_checks_pass() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .times(1)
            .return_once(|_| Ok(None));
        repo.expect_find_by_username()
            .times(1)
            .return_once(|_| Ok(None));
        repo.expect_insert()
            .withf(|new_user: &NewUser| {
                new_user.email == "ada@example.com" && new_user.username == "ada"
            })
            .times(1)
            .return_once(|_| Ok(stored_user(7, "ada@example.com", "ada")));

        let user = service(repo)
            .sign_up("ada@example.com", "ada")
            .await
            .expect("sign-up succeeds");
        assert_eq!(user.id, UserId::new(7));
    }

    #[rstest]
    #[case("users_email_key", "email is already in use")]
    #[case("users_username_key", "username is already in use")]
    #[tokio::test]
    async fn sign_up_maps_insert_race_to_conflict(
        #[case] constraint: &'static str,
        #[case] expected_message: &str,
    ) {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .times(1)
            .return_once(|_| Ok(None));
        repo.expect_find_by_username()
            .times(1)
            .return_once(|_| Ok(None));
        repo.expect_insert()
            .times(1)
            .return_once(move |_| Err(UserPersistenceError::unique_violation(constraint)));

        let error = service(repo)
            .sign_up("ada@example.com", "ada")
            .await
            .expect_err("insert race must surface as conflict");
        assert_eq!(error.code(), ErrorCode::Conflict);
        assert_eq!(error.message(), expected_message);
    }

    #[tokio::test]
    async fn login_maps_connection_failure_to_service_unavailable() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .times(1)
            .return_once(|_| Err(UserPersistenceError::connection("database unavailable")));

        let error = service(repo)
            .login("ada@example.com", "ada")
            .await
            .expect_err("connection failure surfaces");
        assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
    }
}
