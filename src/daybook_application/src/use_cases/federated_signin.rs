use daybook_core::{FederatedProfile, User, UserStore, UserStoreError};

/// Federated signin use case - links a provider identity to a user record
pub struct FederatedSigninUseCase<'a, U>
where
    U: UserStore,
{
    user_store: &'a U,
}

impl<'a, U> FederatedSigninUseCase<'a, U>
where
    U: UserStore,
{
    pub fn new(user_store: &'a U) -> Self {
        Self { user_store }
    }

    /// Creates the user on first signin; later signins refresh the avatar.
    #[tracing::instrument(name = "FederatedSigninUseCase::execute", skip_all)]
    pub async fn execute(&self, profile: FederatedProfile) -> Result<User, UserStoreError> {
        self.user_store
            .upsert_federated_user(&profile.email, profile.image)
            .await
    }
}
