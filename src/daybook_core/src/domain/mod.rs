pub mod credentials;
pub mod email;
pub mod navigation;
pub mod password;
pub mod session;
pub mod user;
