//! Authentication - password hashing and cookie sessions
//!
//! Passwords are hashed with Argon2id. Sessions are opaque random
//! tokens handed out in an HttpOnly cookie; the database stores only
//! the SHA-256 hash of the token.

pub mod password;
pub mod session;

pub use password::{hash_password, verify_password};
pub use session::{
    clear_session_cookie, generate_token, hash_token, session_cookie_value, session_expiry,
    set_session_cookie, SESSION_COOKIE,
};

/// Authentication error type
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("password hashing failed: {0}")]
    Hash(String),
}
