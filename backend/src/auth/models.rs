//! Data structures for authentication-related entities.
//!
//! This module defines the login/registration request payload and the
//! response bodies returned by the auth endpoints.

use serde::Serialize;
use serde_json::Value;

use super::errors::AuthError;

/// Placeholder session token handed out on successful login. It is not
/// checked anywhere and carries no authority.
pub const SESSION_TOKEN: &str = "valid-user-session";

/// Username/password pair taken from a request body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    /// Both fields must be present, strings, and non-empty.
    pub fn from_json(body: &Value) -> Result<Self, AuthError> {
        let field = |name: &str| {
            body.get(name)
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        match (field("username"), field("password")) {
            (Some(username), Some(password)) => Ok(Self { username, password }),
            _ => Err(AuthError::MissingCredentials),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: &'static str,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: &'static str,
}
