use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordVerifier, Version,
    password_hash::{self, PasswordHasher as _, SaltString, rand_core},
};
use daybook_core::{HashedPassword, Password, PasswordHashError, PasswordHasher};
use secrecy::{ExposeSecret, Secret};

/// Argon2id with the cost parameters used for every stored hash.
#[derive(Debug, Clone, Copy)]
pub struct Argon2Hasher {
    memory_kib: u32,
    iterations: u32,
    parallelism: u32,
}

impl Default for Argon2Hasher {
    fn default() -> Self {
        Self {
            memory_kib: 15000,
            iterations: 2,
            parallelism: 1,
        }
    }
}

impl Argon2Hasher {
    pub fn new() -> Self {
        Self::default()
    }

    fn argon2(&self) -> Result<Argon2<'static>, String> {
        let params = Params::new(self.memory_kib, self.iterations, self.parallelism, None)
            .map_err(|e| e.to_string())?;
        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }
}

#[async_trait::async_trait]
impl PasswordHasher for Argon2Hasher {
    #[tracing::instrument(name = "Computing password hash", skip_all)]
    async fn hash(&self, password: Password) -> Result<HashedPassword, PasswordHashError> {
        let current_span: tracing::Span = tracing::Span::current();
        let hasher = *self;

        let result = tokio::task::spawn_blocking(move || {
            current_span.in_scope(move || {
                let salt: SaltString = SaltString::generate(rand_core::OsRng);
                hasher
                    .argon2()?
                    .hash_password(password.as_ref().expose_secret().as_bytes(), &salt)
                    .map(|h| HashedPassword::new(Secret::new(h.to_string())))
                    .map_err(|e| e.to_string())
            })
        })
        .await
        .map_err(|e| PasswordHashError::Hashing(e.to_string()))?;

        result.map_err(PasswordHashError::Hashing)
    }

    #[tracing::instrument(name = "Verify password hash", skip_all)]
    async fn verify(
        &self,
        candidate: &Password,
        hashed: &HashedPassword,
    ) -> Result<bool, PasswordHashError> {
        let current_span: tracing::Span = tracing::Span::current();
        let hasher = *self;
        let candidate = candidate.clone();
        let expected = hashed.as_ref().clone();

        tokio::task::spawn_blocking(move || {
            current_span.in_scope(|| {
                let expected = PasswordHash::new(expected.expose_secret())
                    .map_err(|e| PasswordHashError::MalformedHash(e.to_string()))?;

                let argon2 = hasher.argon2().map_err(PasswordHashError::Hashing)?;
                match argon2
                    .verify_password(candidate.as_ref().expose_secret().as_bytes(), &expected)
                {
                    Ok(()) => Ok(true),
                    Err(password_hash::Error::Password) => Ok(false),
                    Err(e) => Err(PasswordHashError::Hashing(e.to_string())),
                }
            })
        })
        .await
        .map_err(|e| PasswordHashError::Hashing(e.to_string()))?
    }
}
