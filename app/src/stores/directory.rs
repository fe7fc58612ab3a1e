//! In-memory user directory.

use super::poisoned;
use eventease_core::providers::UserDirectory;
use eventease_core::types::normalize_email;
use eventease_core::{BookingError, BoxFuture, OrganizerStatus, Result, User, UserId};
use futures::future;
use std::collections::HashMap;
use std::sync::RwLock;

#[derive(Default)]
struct Inner {
    users: HashMap<UserId, User>,
    by_email: HashMap<String, UserId>,
    /// Registration order
    order: Vec<UserId>,
}

/// Accounts, unique by normalized email.
#[derive(Default)]
pub struct InMemoryDirectory {
    inner: RwLock<Inner>,
}

impl std::fmt::Debug for InMemoryDirectory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let users = self.inner.read().map(|inner| inner.users.len()).unwrap_or_default();
        f.debug_struct("InMemoryDirectory").field("users", &users).finish()
    }
}

impl InMemoryDirectory {
    /// Create an empty directory
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn insert_now(&self, mut user: User) -> Result<User> {
        user.email = normalize_email(&user.email);

        let mut inner = self.inner.write().map_err(poisoned)?;
        if inner.by_email.contains_key(&user.email) {
            return Err(BookingError::EmailTaken { email: user.email });
        }
        if inner.users.contains_key(&user.id) {
            return Err(BookingError::Validation(format!("user {} already exists", user.id)));
        }

        inner.by_email.insert(user.email.clone(), user.id);
        inner.order.push(user.id);
        inner.users.insert(user.id, user.clone());
        Ok(user)
    }

    fn get_now(&self, user_id: UserId) -> Result<Option<User>> {
        let inner = self.inner.read().map_err(poisoned)?;
        Ok(inner.users.get(&user_id).cloned())
    }

    fn find_by_email_now(&self, email: &str) -> Result<Option<User>> {
        let inner = self.inner.read().map_err(poisoned)?;
        Ok(inner
            .by_email
            .get(&normalize_email(email))
            .and_then(|id| inner.users.get(id))
            .cloned())
    }

    fn set_status_now(&self, user_id: UserId, status: OrganizerStatus) -> Result<User> {
        let mut inner = self.inner.write().map_err(poisoned)?;
        let user = inner
            .users
            .get_mut(&user_id)
            .ok_or_else(|| BookingError::user_not_found(user_id))?;

        user.organizer_status = Some(status);
        Ok(user.clone())
    }

    fn remove_now(&self, user_id: UserId) -> Result<Option<User>> {
        let mut inner = self.inner.write().map_err(poisoned)?;
        let Some(user) = inner.users.remove(&user_id) else {
            return Ok(None);
        };
        inner.by_email.remove(&user.email);
        inner.order.retain(|id| *id != user_id);
        Ok(Some(user))
    }

    fn list_now(&self) -> Result<Vec<User>> {
        let inner = self.inner.read().map_err(poisoned)?;
        Ok(inner
            .order
            .iter()
            .filter_map(|id| inner.users.get(id).cloned())
            .collect())
    }
}

impl UserDirectory for InMemoryDirectory {
    fn insert(&self, user: User) -> BoxFuture<'_, Result<User>> {
        Box::pin(future::ready(self.insert_now(user)))
    }

    fn get(&self, user_id: UserId) -> BoxFuture<'_, Result<Option<User>>> {
        Box::pin(future::ready(self.get_now(user_id)))
    }

    fn find_by_email<'a>(&'a self, email: &'a str) -> BoxFuture<'a, Result<Option<User>>> {
        Box::pin(future::ready(self.find_by_email_now(email)))
    }

    fn set_organizer_status(
        &self,
        user_id: UserId,
        status: OrganizerStatus,
    ) -> BoxFuture<'_, Result<User>> {
        Box::pin(future::ready(self.set_status_now(user_id, status)))
    }

    fn remove(&self, user_id: UserId) -> BoxFuture<'_, Result<Option<User>>> {
        Box::pin(future::ready(self.remove_now(user_id)))
    }

    fn list(&self) -> BoxFuture<'_, Result<Vec<User>>> {
        Box::pin(future::ready(self.list_now()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use eventease_testing::fixtures;

    #[test]
    fn test_email_is_unique_case_insensitively() {
        let directory = InMemoryDirectory::new();
        directory.insert_now(fixtures::alice()).unwrap();

        let mut twin = fixtures::attendee("Other");
        twin.email = " ALICE@example.com ".to_string();
        let err = directory.insert_now(twin).unwrap_err();
        assert_eq!(
            err,
            BookingError::EmailTaken {
                email: "alice@example.com".to_string()
            }
        );
    }

    #[test]
    fn test_find_by_email_normalizes() {
        let directory = InMemoryDirectory::new();
        let alice = directory.insert_now(fixtures::alice()).unwrap();
        let found = directory.find_by_email_now("Alice@Example.com").unwrap();
        assert_eq!(found.map(|u| u.id), Some(alice.id));
    }

    #[test]
    fn test_remove_frees_email_and_keeps_order() {
        let directory = InMemoryDirectory::new();
        let alice = directory.insert_now(fixtures::alice()).unwrap();
        let bob = directory.insert_now(fixtures::approved_organizer()).unwrap();
        let charlie = directory.insert_now(fixtures::admin()).unwrap();

        directory.remove_now(bob.id).unwrap();
        let ids: Vec<UserId> = directory.list_now().unwrap().iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![alice.id, charlie.id]);
        assert!(directory.insert_now(fixtures::approved_organizer()).is_ok());
    }

    #[test]
    fn test_set_status_on_missing_user() {
        let directory = InMemoryDirectory::new();
        let err = directory
            .set_status_now(UserId::new(), OrganizerStatus::Approved)
            .unwrap_err();
        assert_eq!(err.code(), "NOT_FOUND");
    }
}
