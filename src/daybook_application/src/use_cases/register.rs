use daybook_core::{
    Credentials, Email, PasswordHashError, PasswordHasher, User, UserStore, UserStoreError,
};

#[derive(Debug, thiserror::Error)]
pub enum RegisterError {
    #[error("User store error: {0}")]
    UserStoreError(#[from] UserStoreError),
    #[error("{0}")]
    PasswordHashError(#[from] PasswordHashError),
}

/// Register use case - creates a user record with a hashed password
pub struct RegisterUseCase<'a, U, H>
where
    U: UserStore,
    H: PasswordHasher,
{
    user_store: &'a U,
    hasher: &'a H,
}

impl<'a, U, H> RegisterUseCase<'a, U, H>
where
    U: UserStore,
    H: PasswordHasher,
{
    pub fn new(user_store: &'a U, hasher: &'a H) -> Self {
        Self { user_store, hasher }
    }

    /// Hash the password and insert the user.
    ///
    /// A duplicate email is rejected by the store with
    /// `UserStoreError::UserAlreadyExists`, so retrying never creates a
    /// second record.
    #[tracing::instrument(name = "RegisterUseCase::execute", skip_all)]
    pub async fn execute(&self, credentials: Credentials) -> Result<Email, RegisterError> {
        let (email, password) = credentials.into_parts();
        let hashed = self.hasher.hash(password).await?;

        self.user_store
            .add_user(User::new(email.clone(), hashed))
            .await?;

        tracing::info!("user registered");
        Ok(email)
    }
}
