//! Credential primitives: bcrypt password hashing and HS256 tokens

pub mod credentials;
pub mod jwt;
pub mod password;

pub use credentials::JwtCredentialService;
pub use jwt::JwtConfig;
