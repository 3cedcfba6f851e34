pub mod federated_signin;
pub mod register;
pub mod verify_credentials;

#[cfg(test)]
pub(crate) mod test_support;
