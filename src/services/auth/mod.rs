pub mod access_jwt;
pub mod authenticator;
pub mod factory;
pub mod token_issuer;

pub use access_jwt::AccessTokenVerifier;
pub use authenticator::{AuthError, Authenticator};
pub use factory::build_authenticator;
pub use token_issuer::AccessTokenIssuer;
