//! SQLite implementation of the storage contract.

use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set, SqlErr,
};
use tracing::debug;

use super::entities::app::Entity as AppEntity;
use super::entities::user::{self, Entity as UserEntity};
use super::{AppProvider, StorageError, StorageResult, UserProvider, UserSaver};
use domain::{App, User};

/// Users and apps stored in SQLite through SeaORM.
///
/// Cheap to clone; every clone shares the same connection pool.
#[derive(Clone)]
pub struct SqliteStorage {
    db: DatabaseConnection,
}

impl SqliteStorage {
    /// Create new storage over an already migrated connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Map an insert failure, recognising the `users.email` unique constraint.
fn insert_error(err: DbErr) -> StorageError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => StorageError::UserExists,
        _ => StorageError::Database(err),
    }
}

#[async_trait]
impl UserSaver for SqliteStorage {
    async fn save_user(&self, email: &str, password_hash: &[u8]) -> StorageResult<i64> {
        let active_model = user::ActiveModel {
            email: Set(email.to_owned()),
            pass_hash: Set(password_hash.to_vec()),
            ..Default::default()
        };

        let result = UserEntity::insert(active_model)
            .exec(&self.db)
            .await
            .map_err(insert_error)?;

        debug!(user_id = result.last_insert_id, "user row inserted");
        Ok(result.last_insert_id)
    }
}

#[async_trait]
impl UserProvider for SqliteStorage {
    async fn find_user_by_email(&self, email: &str) -> StorageResult<User> {
        UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await?
            .map(User::from)
            .ok_or(StorageError::UserNotFound)
    }
}

#[async_trait]
impl AppProvider for SqliteStorage {
    async fn find_app_by_id(&self, app_id: i32) -> StorageResult<App> {
        AppEntity::find_by_id(app_id)
            .one(&self.db)
            .await?
            .map(App::from)
            .ok_or(StorageError::AppNotFound)
    }
}
