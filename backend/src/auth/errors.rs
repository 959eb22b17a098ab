//! Custom error types specific to authentication failures.
//!
//! Messages here are returned to clients verbatim, so a failed login never
//! says whether the username exists.

use thiserror::Error;

use crate::database::DbError;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AuthError {
    #[error("Username and password are required")]
    MissingCredentials,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Username already exists")]
    DuplicateUser,

    #[error("Credential store unavailable: {0}")]
    Store(String),
}

impl From<DbError> for AuthError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Duplicate(_) => AuthError::DuplicateUser,
            other => AuthError::Store(other.to_string()),
        }
    }
}
