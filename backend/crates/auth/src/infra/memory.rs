//! In-Memory Repository Implementation
//!
//! Backs tests and database-less local runs. The map is keyed by canonical
//! user name, so the uniqueness check and the insert happen under one write
//! lock.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::user_name::UserName;
use crate::error::{AuthError, AuthResult};

/// In-memory auth repository
#[derive(Clone, Default)]
pub struct InMemoryAuthRepository {
    users: Arc<RwLock<HashMap<String, User>>>,
}

impl InMemoryAuthRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered users
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

impl UserRepository for InMemoryAuthRepository {
    async fn create(&self, user: &User) -> AuthResult<()> {
        let mut users = self.users.write().await;
        if users.contains_key(user.user_name.as_str()) {
            return Err(AuthError::DuplicateUsername);
        }
        users.insert(user.user_name.as_str().to_string(), user.clone());
        Ok(())
    }

    async fn find_by_user_name(&self, user_name: &UserName) -> AuthResult<Option<User>> {
        Ok(self.users.read().await.get(user_name.as_str()).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::user_password::UserPassword;

    fn user(name: &str) -> User {
        User::new(
            UserName::new(name).unwrap(),
            UserPassword::from_db("$argon2id$placeholder"),
        )
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let repo = InMemoryAuthRepository::new();
        let alice = user("alice");
        repo.create(&alice).await.unwrap();

        let found = repo
            .find_by_user_name(&UserName::new("ALICE").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.user_id, alice.user_id);
    }

    #[tokio::test]
    async fn test_duplicate_rejected() {
        let repo = InMemoryAuthRepository::new();
        repo.create(&user("alice")).await.unwrap();

        let err = repo.create(&user("Alice")).await.unwrap_err();
        assert!(matches!(err, AuthError::DuplicateUsername));
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_concurrent_duplicates_register_once() {
        let repo = InMemoryAuthRepository::new();
        let mut handles = Vec::new();
        for _ in 0..8 {
            let repo = repo.clone();
            handles.push(tokio::spawn(async move { repo.create(&user("bob")).await }));
        }

        let mut ok = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                ok += 1;
            }
        }
        assert_eq!(ok, 1);
        assert_eq!(repo.len().await, 1);
    }
}
