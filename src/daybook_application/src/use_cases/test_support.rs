use std::{
    collections::HashMap,
    sync::atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use daybook_core::{
    Email, HashedPassword, Password, PasswordHashError, PasswordHasher, User, UserStore,
    UserStoreError,
};
use secrecy::{ExposeSecret, Secret};
use tokio::sync::RwLock;

#[derive(Default)]
pub struct RecordingUserStore {
    users: RwLock<HashMap<Email, User>>,
}

impl RecordingUserStore {
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }
}

#[async_trait]
impl UserStore for RecordingUserStore {
    async fn add_user(&self, user: User) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        if users.contains_key(user.email()) {
            return Err(UserStoreError::UserAlreadyExists);
        }
        users.insert(user.email().clone(), user);
        Ok(())
    }

    async fn get_user(&self, email: &Email) -> Result<User, UserStoreError> {
        self.users
            .read()
            .await
            .get(email)
            .cloned()
            .ok_or(UserStoreError::UserNotFound)
    }

    async fn upsert_federated_user(
        &self,
        email: &Email,
        image: Option<String>,
    ) -> Result<User, UserStoreError> {
        let mut users = self.users.write().await;
        let user = users
            .entry(email.clone())
            .and_modify(|u| u.set_image(image.clone()))
            .or_insert_with(|| User::federated(email.clone(), image));
        Ok(user.clone())
    }
}

/// Reversible stand-in for a real hasher that counts its calls.
#[derive(Default)]
pub struct PlainTextHasher {
    hash_calls: AtomicUsize,
    verify_calls: AtomicUsize,
}

impl PlainTextHasher {
    pub fn hash_calls(&self) -> usize {
        self.hash_calls.load(Ordering::SeqCst)
    }

    pub fn verify_calls(&self) -> usize {
        self.verify_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PasswordHasher for PlainTextHasher {
    async fn hash(&self, password: Password) -> Result<HashedPassword, PasswordHashError> {
        self.hash_calls.fetch_add(1, Ordering::SeqCst);
        Ok(HashedPassword::new(Secret::new(format!(
            "plain${}",
            password.as_ref().expose_secret()
        ))))
    }

    async fn verify(
        &self,
        candidate: &Password,
        hashed: &HashedPassword,
    ) -> Result<bool, PasswordHashError> {
        self.verify_calls.fetch_add(1, Ordering::SeqCst);
        let stored = hashed.as_ref().expose_secret();
        let plain = stored
            .strip_prefix("plain$")
            .ok_or_else(|| PasswordHashError::MalformedHash(stored.to_string()))?;
        Ok(plain == candidate.as_ref().expose_secret())
    }
}
