use daybook_core::{
    Email, Password, PasswordHashError, PasswordHasher, User, UserStore, UserStoreError,
};

/// Error types specific to credential verification
#[derive(Debug, thiserror::Error)]
pub enum VerifyCredentialsError {
    /// Unknown email, wrong password, or an account without a password.
    /// Deliberately indistinguishable to the caller.
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("User store error: {0}")]
    UserStoreError(UserStoreError),
    #[error("{0}")]
    PasswordHashError(#[from] PasswordHashError),
}

impl From<UserStoreError> for VerifyCredentialsError {
    fn from(error: UserStoreError) -> Self {
        match error {
            UserStoreError::UserNotFound => VerifyCredentialsError::InvalidCredentials,
            other => VerifyCredentialsError::UserStoreError(other),
        }
    }
}

/// Looks up the user and checks the password through the hashing primitive.
pub struct VerifyCredentialsUseCase<'a, U, H>
where
    U: UserStore,
    H: PasswordHasher,
{
    user_store: &'a U,
    hasher: &'a H,
}

impl<'a, U, H> VerifyCredentialsUseCase<'a, U, H>
where
    U: UserStore,
    H: PasswordHasher,
{
    pub fn new(user_store: &'a U, hasher: &'a H) -> Self {
        Self { user_store, hasher }
    }

    #[tracing::instrument(name = "VerifyCredentialsUseCase::execute", skip_all)]
    pub async fn execute(
        &self,
        email: &Email,
        password: &Password,
    ) -> Result<User, VerifyCredentialsError> {
        let user = self.user_store.get_user(email).await?;

        let Some(hashed) = user.hashed_password() else {
            tracing::debug!("account has no password, federated signin only");
            return Err(VerifyCredentialsError::InvalidCredentials);
        };

        if !self.hasher.verify(password, hashed).await? {
            return Err(VerifyCredentialsError::InvalidCredentials);
        }

        Ok(user)
    }
}
