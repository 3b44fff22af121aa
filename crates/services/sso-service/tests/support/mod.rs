//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tracing::Span;

use domain::{App, HashCost, User};
use sso_service_lib::service::{AuthSettings, Authenticator};
use sso_service_lib::storage::{
    AppProvider, StorageError, StorageResult, UserProvider, UserSaver,
};

pub const CHEAP: HashCost = HashCost::new(1024, 1, 1);

pub fn test_settings() -> AuthSettings {
    AuthSettings {
        token_ttl: Duration::from_secs(3600),
        storage_timeout: Duration::from_secs(2),
        hash_cost: CHEAP,
    }
}

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    apps: HashMap<i32, App>,
}

/// Storage held in memory; the lock makes the email check and insert atomic.
#[derive(Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_app(self, id: i32, name: &str, secret: &str) -> Self {
        self.tables
            .lock()
            .unwrap()
            .apps
            .insert(id, App::new(id, name, secret));
        self
    }

    pub fn user_count(&self) -> usize {
        self.tables.lock().unwrap().users.len()
    }

    pub fn stored_hash(&self, email: &str) -> Option<Vec<u8>> {
        self.tables
            .lock()
            .unwrap()
            .users
            .iter()
            .find(|u| u.email == email)
            .map(|u| u.password_hash.clone())
    }
}

#[async_trait]
impl UserSaver for InMemoryStore {
    async fn save_user(&self, email: &str, password_hash: &[u8]) -> StorageResult<i64> {
        let mut tables = self.tables.lock().unwrap();
        if tables.users.iter().any(|u| u.email == email) {
            return Err(StorageError::UserExists);
        }
        let id = tables.users.len() as i64 + 1;
        tables
            .users
            .push(User::new(id, email, password_hash.to_vec()));
        Ok(id)
    }
}

#[async_trait]
impl UserProvider for InMemoryStore {
    async fn find_user_by_email(&self, email: &str) -> StorageResult<User> {
        self.tables
            .lock()
            .unwrap()
            .users
            .iter()
            .find(|u| u.email == email)
            .cloned()
            .ok_or(StorageError::UserNotFound)
    }
}

#[async_trait]
impl AppProvider for InMemoryStore {
    async fn find_app_by_id(&self, app_id: i32) -> StorageResult<App> {
        self.tables
            .lock()
            .unwrap()
            .apps
            .get(&app_id)
            .cloned()
            .ok_or(StorageError::AppNotFound)
    }
}

/// Authenticator wired to a single store for every capability.
pub fn authenticator(store: Arc<InMemoryStore>) -> Authenticator {
    Authenticator::new(
        Span::none(),
        store.clone(),
        store.clone(),
        store,
        test_settings(),
    )
}
