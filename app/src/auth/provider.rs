//! Registration and login against the user directory.

use super::password::PasswordHashing;
use eventease_core::providers::UserDirectory;
use eventease_core::types::normalize_email;
use eventease_core::{BookingError, Registration, Result, Role, User, UserId};
use std::sync::Arc;

/// Minimum accepted password length
pub const MIN_PASSWORD_LEN: usize = 8;

/// Authentication provider.
pub struct AuthProvider {
    directory: Arc<dyn UserDirectory>,
    hashing: PasswordHashing,
}

impl std::fmt::Debug for AuthProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthProvider")
            .field("hashing", &self.hashing)
            .finish_non_exhaustive()
    }
}

impl AuthProvider {
    /// Create a provider over `directory`
    #[must_use]
    pub fn new(directory: Arc<dyn UserDirectory>, hashing: PasswordHashing) -> Self {
        Self { directory, hashing }
    }

    /// Registers an account. Organizers start out pending approval.
    ///
    /// # Errors
    ///
    /// - [`BookingError::Unauthorized`] when signing up as an admin
    /// - [`BookingError::Validation`] for a blank name, malformed email or short password
    /// - [`BookingError::EmailTaken`] if the email is already registered
    #[tracing::instrument(skip(self, registration), fields(role = %registration.role))]
    pub async fn register(&self, registration: Registration) -> Result<User> {
        if registration.role == Role::Admin {
            return Err(BookingError::unauthorized(
                "admin accounts cannot be created through sign-up",
            ));
        }

        let name = registration.name.trim();
        if name.is_empty() {
            return Err(BookingError::Validation("name must not be empty".to_string()));
        }
        let email = normalize_email(&registration.email);
        if !is_plausible_email(&email) {
            return Err(BookingError::Validation(format!("invalid email address: {email}")));
        }
        if registration.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(BookingError::Validation(format!(
                "password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }

        if self.directory.find_by_email(&email).await?.is_some() {
            return Err(BookingError::EmailTaken { email });
        }

        let hash = self.hashing.hash(&registration.password).await?;
        let user = self
            .directory
            .insert(User::new(UserId::new(), name, &email, hash, registration.role))
            .await?;

        tracing::info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    /// Creates an account outside of sign-up, for seeding and bootstrap.
    /// Any role is accepted and `user.organizer_status` is kept.
    ///
    /// # Errors
    ///
    /// - [`BookingError::EmailTaken`] if the email is already registered
    /// - [`BookingError::Storage`] if hashing or the directory fails
    #[tracing::instrument(skip(self, user, password), fields(user_id = %user.id, role = %user.role))]
    pub async fn provision(&self, mut user: User, password: &str) -> Result<User> {
        user.password_hash = self.hashing.hash(password).await?;
        let user = self.directory.insert(user).await?;
        tracing::debug!("Account provisioned");
        Ok(user)
    }

    /// Checks credentials.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::InvalidCredentials`] for an unknown email or a wrong password.
    #[tracing::instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<User> {
        let Some(user) = self.directory.find_by_email(email).await? else {
            tracing::info!("Login failed: unknown email");
            return Err(BookingError::InvalidCredentials);
        };

        if !self.hashing.verify(password, &user.password_hash).await {
            tracing::info!(user_id = %user.id, "Login failed: wrong password");
            return Err(BookingError::InvalidCredentials);
        }

        tracing::info!(user_id = %user.id, "User logged in");
        Ok(user)
    }

    /// Looks up an account by id.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::Storage`] on backend failure.
    pub async fn user(&self, user_id: UserId) -> Result<Option<User>> {
        self.directory.get(user_id).await
    }
}

fn is_plausible_email(email: &str) -> bool {
    email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.') && !domain.starts_with('.'))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::stores::InMemoryDirectory;
    use eventease_core::OrganizerStatus;

    fn provider() -> AuthProvider {
        AuthProvider::new(
            Arc::new(InMemoryDirectory::new()),
            PasswordHashing::new(1_024, 1),
        )
    }

    fn registration(email: &str, role: Role) -> Registration {
        Registration {
            name: "Dana".to_string(),
            email: email.to_string(),
            password: "correct horse".to_string(),
            role,
        }
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let auth = provider();
        let user = auth
            .register(registration("Dana@Example.com", Role::User))
            .await
            .unwrap();
        assert_eq!(user.email, "dana@example.com");

        let logged_in = auth.login("dana@example.com", "correct horse").await.unwrap();
        assert_eq!(logged_in.id, user.id);
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_email_look_the_same() {
        let auth = provider();
        auth.register(registration("dana@example.com", Role::User))
            .await
            .unwrap();

        let wrong = auth.login("dana@example.com", "nope nope").await.unwrap_err();
        let unknown = auth.login("ghost@example.com", "correct horse").await.unwrap_err();
        assert_eq!(wrong, BookingError::InvalidCredentials);
        assert_eq!(unknown, BookingError::InvalidCredentials);
    }

    #[tokio::test]
    async fn test_duplicate_email_is_taken() {
        let auth = provider();
        auth.register(registration("dana@example.com", Role::User))
            .await
            .unwrap();
        let err = auth
            .register(registration(" DANA@example.com", Role::Organizer))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "EMAIL_TAKEN");
    }

    #[tokio::test]
    async fn test_admin_sign_up_is_rejected() {
        let err = provider()
            .register(registration("root@example.com", Role::Admin))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "UNAUTHORIZED");
    }

    #[tokio::test]
    async fn test_organizer_starts_pending() {
        let user = provider()
            .register(registration("org@example.com", Role::Organizer))
            .await
            .unwrap();
        assert_eq!(user.organizer_status, Some(OrganizerStatus::Pending));
    }

    #[tokio::test]
    async fn test_provisioned_admin_can_log_in() {
        let auth = provider();
        let admin = User::new(UserId::new(), "Root", "root@example.com", "", Role::Admin);
        auth.provision(admin.clone(), "password").await.unwrap();

        let logged_in = auth.login("root@example.com", "password").await.unwrap();
        assert_eq!(logged_in.id, admin.id);
        assert!(logged_in.is_admin());
    }

    #[tokio::test]
    async fn test_registration_validation() {
        let auth = provider();
        let mut bad = registration("not-an-email", Role::User);
        assert_eq!(auth.register(bad.clone()).await.unwrap_err().code(), "VALIDATION");

        bad.email = "dana@example.com".to_string();
        bad.password = "short".to_string();
        assert_eq!(auth.register(bad).await.unwrap_err().code(), "VALIDATION");
    }
}
