//! Rust structs that represent database table mappings.
//!
//! These models define the structure of data as it is stored in and retrieved
//! from the database. They differ from the API models: a stored user never
//! carries a plaintext password.

/// The stored secret for one user: what login verification reads.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserCredentials {
    pub password_hash: String,
    pub salt: String,
}

/// Values for inserting a new user.
#[derive(Debug, Clone)]
pub struct NewUser<'a> {
    pub username: &'a str,
    pub password_hash: &'a str,
    pub salt: &'a str,
}
