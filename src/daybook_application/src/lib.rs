pub mod use_cases;

pub use use_cases::{
    federated_signin::FederatedSigninUseCase,
    register::{RegisterError, RegisterUseCase},
    verify_credentials::{VerifyCredentialsError, VerifyCredentialsUseCase},
};
