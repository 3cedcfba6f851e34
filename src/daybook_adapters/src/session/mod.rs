pub mod jwt;
pub mod validator;

pub use jwt::{
    SessionClaims, SessionConfig, TokenAuthError, create_removal_cookie, create_session_cookie,
    generate_session_token, validate_session_token,
};
pub use validator::JwtSessionValidator;
