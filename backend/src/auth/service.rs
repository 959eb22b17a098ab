//! Core business logic for the authentication system.
//!
//! This service handles user creation, password hashing and credential
//! verification. It talks to storage only through the `CredentialStore`
//! trait, so handlers never touch the database directly.

use std::sync::Arc;

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use sqlx::SqlitePool;

use super::errors::AuthError;
use super::models::{Credentials, LoginResponse, RegisterResponse, SESSION_TOKEN};
use crate::database::models::NewUser;
use crate::database::queries;

/// Account created on first run.
pub const DEFAULT_USERNAME: &str = "admin";
pub const DEFAULT_PASSWORD: &str = "admin123";

#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Returns true only if the user exists and the password matches.
    async fn verify(&self, username: &str, password: &str) -> Result<bool, AuthError>;

    /// Fails with `AuthError::DuplicateUser` if the username is taken.
    async fn create(&self, username: &str, password: &str) -> Result<(), AuthError>;
}

/// SQLite-backed credential store with salted SHA-256 password hashes.
#[derive(Clone)]
pub struct SqliteCredentialStore {
    pool: SqlitePool,
}

impl SqliteCredentialStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Creates the default account unless it already exists.
    pub async fn seed_default_user(&self) -> Result<(), AuthError> {
        let salt = new_salt();
        let password_hash = hash_password(&salt, DEFAULT_PASSWORD);
        let created = queries::insert_user_if_absent(
            &self.pool,
            &NewUser {
                username: DEFAULT_USERNAME,
                password_hash: &password_hash,
                salt: &salt,
            },
        )
        .await?;

        if created {
            tracing::info!(username = DEFAULT_USERNAME, "Seeded default user");
        }
        Ok(())
    }
}

#[async_trait]
impl CredentialStore for SqliteCredentialStore {
    async fn verify(&self, username: &str, password: &str) -> Result<bool, AuthError> {
        let user = queries::find_user_credentials(&self.pool, username).await?;

        // Unknown users still pay for a hash and comparison.
        let (salt, stored_hash, known) = match &user {
            Some(user) => (user.salt.as_str(), user.password_hash.as_str(), true),
            None => (UNKNOWN_USER_SALT, UNKNOWN_USER_HASH, false),
        };
        let matches = constant_time_eq(
            hash_password(salt, password).as_bytes(),
            stored_hash.as_bytes(),
        );
        Ok(known && matches)
    }

    async fn create(&self, username: &str, password: &str) -> Result<(), AuthError> {
        let salt = new_salt();
        let password_hash = hash_password(&salt, password);
        queries::insert_user(
            &self.pool,
            &NewUser {
                username,
                password_hash: &password_hash,
                salt: &salt,
            },
        )
        .await?;
        Ok(())
    }
}

const UNKNOWN_USER_SALT: &str = "00000000000000000000000000000000";
const UNKNOWN_USER_HASH: &str = "0000000000000000000000000000000000000000000000000000000000000000";

fn new_salt() -> String {
    hex::encode(rand::random::<[u8; 16]>())
}

fn hash_password(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

/// Compares without exiting at the first differing byte.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn CredentialStore>,
}

impl AuthService {
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }

    pub async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, AuthError> {
        if self
            .store
            .verify(&credentials.username, &credentials.password)
            .await?
        {
            tracing::debug!(username = %credentials.username, "Login succeeded");
            Ok(LoginResponse {
                token: SESSION_TOKEN,
            })
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }

    pub async fn register(&self, credentials: &Credentials) -> Result<RegisterResponse, AuthError> {
        self.store
            .create(&credentials.username, &credentials.password)
            .await?;
        tracing::info!(username = %credentials.username, "Registered user");
        Ok(RegisterResponse {
            message: "User registered successfully",
        })
    }
}
