//! Storage contract consumed by the authentication service.
//!
//! The contract is split into narrow capabilities so the service (and its
//! tests) only depend on what each operation needs. Email uniqueness is the
//! backing store's job: implementations must report a violated unique
//! constraint as [`StorageError::UserExists`] instead of checking first.

pub mod entities;
mod sqlite;

use std::time::Duration;

use async_trait::async_trait;
use sea_orm::DbErr;
use thiserror::Error;

use domain::{App, User};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

pub use sqlite::SqliteStorage;

/// Failures reported by a storage implementation.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("user already exists")]
    UserExists,

    #[error("user not found")]
    UserNotFound,

    #[error("app not found")]
    AppNotFound,

    #[error("storage call exceeded its {0:?} deadline")]
    Timeout(Duration),

    #[error("database error: {0}")]
    Database(#[from] DbErr),
}

/// Result type alias for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Persists new users.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserSaver: Send + Sync {
    /// Insert a user and return the id assigned by storage.
    async fn save_user(&self, email: &str, password_hash: &[u8]) -> StorageResult<i64>;
}

/// Looks up users.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserProvider: Send + Sync {
    async fn find_user_by_email(&self, email: &str) -> StorageResult<User>;
}

/// Looks up client applications.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AppProvider: Send + Sync {
    async fn find_app_by_id(&self, app_id: i32) -> StorageResult<App>;
}
