//! Authentication service - registration and per-app login.
//!
//! Stateless orchestration over the storage contract: hashing runs on the
//! blocking pool, every storage call is bounded by a deadline, and every
//! failure is classified into an [`AppError`] before it leaves this module.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use once_cell::sync::OnceCell;
use tokio::task::{self, JoinError};
use tracing::{error, info, info_span, warn, Instrument, Span};

use crate::storage::{AppProvider, StorageError, StorageResult, UserProvider, UserSaver};
use crate::token;
use common::{AppError, AppResult};
use domain::{HashCost, Password, DEFAULT_STORAGE_TIMEOUT_SECS, DEFAULT_TOKEN_TTL_SECS};

/// Operation name attached to register failures and logs
pub const REGISTER_OPERATION: &str = "Auth.Register";

/// Operation name attached to login failures and logs
pub const LOGIN_OPERATION: &str = "Auth.Login";

// Verified against when the email is unknown, so both paths pay for a hash check
const DUMMY_PASSWORD: &str = "dummy-password-for-unknown-users";

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new user and return the id assigned by storage
    async fn register(&self, email: &str, password: &str) -> AppResult<i64>;

    /// Check credentials and return a token signed for `app_id`
    async fn login(&self, email: &str, password: &str, app_id: i32) -> AppResult<String>;
}

/// Tunables consumed by [`Authenticator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthSettings {
    /// Lifetime of issued tokens
    pub token_ttl: Duration,
    /// Deadline for each storage call
    pub storage_timeout: Duration,
    /// Password hashing work factor
    pub hash_cost: HashCost,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            token_ttl: Duration::from_secs(DEFAULT_TOKEN_TTL_SECS),
            storage_timeout: Duration::from_secs(DEFAULT_STORAGE_TIMEOUT_SECS),
            hash_cost: HashCost::default(),
        }
    }
}

/// Concrete implementation of AuthService over the storage contract.
pub struct Authenticator {
    span: Span,
    user_saver: Arc<dyn UserSaver>,
    user_provider: Arc<dyn UserProvider>,
    app_provider: Arc<dyn AppProvider>,
    settings: AuthSettings,
    dummy_password: Arc<OnceCell<Password>>,
}

impl Authenticator {
    /// Create new auth service instance.
    ///
    /// `span` is the parent of every operation span the service opens.
    pub fn new(
        span: Span,
        user_saver: Arc<dyn UserSaver>,
        user_provider: Arc<dyn UserProvider>,
        app_provider: Arc<dyn AppProvider>,
        settings: AuthSettings,
    ) -> Self {
        Self {
            span,
            user_saver,
            user_provider,
            app_provider,
            settings,
            dummy_password: Arc::new(OnceCell::new()),
        }
    }

    /// Run a read-only storage call under the configured deadline.
    ///
    /// Writes never go through here: dropping an in-flight insert does not
    /// stop the driver from committing it. Lock waits on writes are bounded
    /// by the store instead.
    async fn bounded<T, F>(&self, call: F) -> StorageResult<T>
    where
        F: Future<Output = StorageResult<T>>,
    {
        let deadline = self.settings.storage_timeout;
        tokio::time::timeout(deadline, call)
            .await
            .map_err(|_| StorageError::Timeout(deadline))?
    }

    async fn hash_password(&self, plain_text: &str) -> AppResult<Password> {
        let cost = self.settings.hash_cost;
        let plain_text = plain_text.to_owned();

        match task::spawn_blocking(move || Password::with_cost(&plain_text, &cost)).await {
            Ok(Ok(password)) => Ok(password),
            Ok(Err(e)) => {
                error!(error = %e, "failed to generate password hash");
                Err(AppError::registration_failed(REGISTER_OPERATION, e))
            }
            Err(e) => {
                error!(error = %e, "password hashing task failed");
                Err(AppError::registration_failed(REGISTER_OPERATION, e))
            }
        }
    }

    async fn verify_password(stored: Password, plain_text: &str) -> Result<bool, JoinError> {
        let plain_text = plain_text.to_owned();
        task::spawn_blocking(move || stored.verify(&plain_text)).await
    }

    /// Spend a verification on a throwaway hash so unknown emails take as
    /// long as wrong passwords.
    async fn verify_dummy(&self, plain_text: &str) {
        let cell = Arc::clone(&self.dummy_password);
        let cost = self.settings.hash_cost;
        let plain_text = plain_text.to_owned();

        let outcome = task::spawn_blocking(move || {
            cell.get_or_try_init(|| Password::with_cost(DUMMY_PASSWORD, &cost))
                .map(|dummy| dummy.verify(&plain_text))
        })
        .await;

        match outcome {
            Ok(Ok(_)) => {}
            Ok(Err(e)) => error!(error = %e, "failed to build dummy password hash"),
            Err(e) => error!(error = %e, "dummy verification task failed"),
        }
    }

    async fn register_user(&self, email: &str, password: &str) -> AppResult<i64> {
        info!("registering new user");

        let password_hash = self.hash_password(password).await?;

        match self
            .user_saver
            .save_user(email, password_hash.as_bytes())
            .await
        {
            Ok(id) => {
                info!(user_id = id, "user registered");
                Ok(id)
            }
            Err(StorageError::UserExists) => {
                warn!("user already exists");
                Err(AppError::user_exists(REGISTER_OPERATION))
            }
            Err(e) => {
                error!(error = %e, "failed to save new user");
                Err(AppError::registration_failed(REGISTER_OPERATION, e))
            }
        }
    }

    async fn login_user(&self, email: &str, password: &str, app_id: i32) -> AppResult<String> {
        info!("attempting to login user");

        let user = match self.bounded(self.user_provider.find_user_by_email(email)).await {
            Ok(user) => user,
            Err(StorageError::UserNotFound) => {
                warn!("user not found");
                self.verify_dummy(password).await;
                return Err(AppError::invalid_credentials(LOGIN_OPERATION));
            }
            Err(e) => {
                error!(error = %e, "failed to get user");
                return Err(AppError::storage_failure(LOGIN_OPERATION, e));
            }
        };

        let app = match self.bounded(self.app_provider.find_app_by_id(app_id)).await {
            Ok(app) => app,
            Err(StorageError::AppNotFound) => {
                warn!("app not found");
                return Err(AppError::app_not_found(LOGIN_OPERATION));
            }
            Err(e) => {
                error!(error = %e, "failed to get app");
                return Err(AppError::storage_failure(LOGIN_OPERATION, e));
            }
        };

        match Self::verify_password(user.password(), password).await {
            Ok(true) => {}
            Ok(false) => {
                warn!(user_id = user.id, "invalid credentials");
                return Err(AppError::invalid_credentials(LOGIN_OPERATION));
            }
            Err(e) => {
                error!(error = %e, "password verification task failed");
                return Err(AppError::internal(LOGIN_OPERATION, e));
            }
        }

        let token = token::issue_token(&user, &app, self.settings.token_ttl).map_err(|e| {
            error!(error = %e, "failed to create token");
            AppError::internal(LOGIN_OPERATION, e)
        })?;

        info!(user_id = user.id, "user logged in successfully");
        Ok(token)
    }
}

#[async_trait]
impl AuthService for Authenticator {
    async fn register(&self, email: &str, password: &str) -> AppResult<i64> {
        let span = info_span!(parent: &self.span, "register", method = REGISTER_OPERATION, email = %email);
        self.register_user(email, password).instrument(span).await
    }

    async fn login(&self, email: &str, password: &str, app_id: i32) -> AppResult<String> {
        let span = info_span!(
            parent: &self.span,
            "login",
            method = LOGIN_OPERATION,
            email = %email,
            app_id
        );
        self.login_user(email, password, app_id).instrument(span).await
    }
}
