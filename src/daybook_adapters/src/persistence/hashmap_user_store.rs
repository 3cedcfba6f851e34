use std::{collections::HashMap, sync::Arc};

use daybook_core::{Email, User, UserStore, UserStoreError};
use tokio::sync::RwLock;

#[derive(Debug, Default, Clone)]
pub struct HashMapUserStore {
    users: Arc<RwLock<HashMap<Email, User>>>,
}

impl HashMapUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait::async_trait]
impl UserStore for HashMapUserStore {
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
            .and_modify(|user| user.set_image(image.clone()))
            .or_insert_with(|| User::federated(email.clone(), image));
        Ok(user.clone())
    }
}
