//! Externally visible error taxonomy.
//!
//! Every failure leaving the authentication service is one of the
//! [`ErrorKind`]s below. Variants carry the operation that failed and, where
//! relevant, the internal cause as a `source`. The cause is for logs only:
//! it never reaches the caller through [`AppError::user_message`] or the
//! gRPC status.

use thiserror::Error;
use tonic::Status;

/// Boxed internal cause kept for diagnostics.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Stable classification callers can match on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    UserExists,
    RegistrationFailed,
    InvalidCredentials,
    AppNotFound,
    StorageFailure,
    Validation,
    Internal,
}

/// Application error with operation context.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{operation}: user already exists")]
    UserExists { operation: &'static str },

    #[error("{operation}: registration failed")]
    RegistrationFailed {
        operation: &'static str,
        #[source]
        source: BoxError,
    },

    #[error("{operation}: invalid credentials")]
    InvalidCredentials { operation: &'static str },

    #[error("{operation}: app not found")]
    AppNotFound { operation: &'static str },

    #[error("{operation}: storage failure")]
    StorageFailure {
        operation: &'static str,
        #[source]
        source: BoxError,
    },

    // Request rejected before reaching the service
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("{operation}: internal error")]
    Internal {
        operation: &'static str,
        #[source]
        source: BoxError,
    },
}

impl AppError {
    /// Classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::UserExists { .. } => ErrorKind::UserExists,
            AppError::RegistrationFailed { .. } => ErrorKind::RegistrationFailed,
            AppError::InvalidCredentials { .. } => ErrorKind::InvalidCredentials,
            AppError::AppNotFound { .. } => ErrorKind::AppNotFound,
            AppError::StorageFailure { .. } => ErrorKind::StorageFailure,
            AppError::Validation(_) => ErrorKind::Validation,
            AppError::Internal { .. } => ErrorKind::Internal,
        }
    }

    /// Operation that produced the error, if it came from the service.
    pub fn operation(&self) -> Option<&'static str> {
        match self {
            AppError::UserExists { operation }
            | AppError::RegistrationFailed { operation, .. }
            | AppError::InvalidCredentials { operation }
            | AppError::AppNotFound { operation }
            | AppError::StorageFailure { operation, .. }
            | AppError::Internal { operation, .. } => Some(*operation),
            AppError::Validation(_) => None,
        }
    }

    /// Get error code for client
    pub fn code(&self) -> &'static str {
        match self.kind() {
            ErrorKind::UserExists => "USER_EXISTS",
            ErrorKind::RegistrationFailed => "REGISTRATION_FAILED",
            ErrorKind::InvalidCredentials => "INVALID_CREDENTIALS",
            ErrorKind::AppNotFound => "APP_NOT_FOUND",
            ErrorKind::StorageFailure => "STORAGE_FAILURE",
            ErrorKind::Validation => "VALIDATION_ERROR",
            ErrorKind::Internal => "INTERNAL_ERROR",
        }
    }

    /// Get user-facing message (hides internal details)
    pub fn user_message(&self) -> String {
        match self {
            AppError::UserExists { .. } => "user already exists".to_string(),
            AppError::InvalidCredentials { .. } => "invalid email or password".to_string(),
            AppError::AppNotFound { .. } => "app not found".to_string(),
            AppError::Validation(msg) => msg.clone(),

            AppError::RegistrationFailed { operation, source } => {
                tracing::error!(%operation, error = %source, "registration failed");
                "failed to register user".to_string()
            }
            AppError::StorageFailure { operation, source } => {
                tracing::error!(%operation, error = %source, "storage failure");
                "a storage error occurred".to_string()
            }
            AppError::Internal { operation, source } => {
                tracing::error!(%operation, error = %source, "internal error");
                "an internal error occurred".to_string()
            }
        }
    }
}

/// Convenience constructors
impl AppError {
    pub fn user_exists(operation: &'static str) -> Self {
        AppError::UserExists { operation }
    }

    pub fn registration_failed(operation: &'static str, cause: impl Into<BoxError>) -> Self {
        AppError::RegistrationFailed {
            operation,
            source: cause.into(),
        }
    }

    pub fn invalid_credentials(operation: &'static str) -> Self {
        AppError::InvalidCredentials { operation }
    }

    pub fn app_not_found(operation: &'static str) -> Self {
        AppError::AppNotFound { operation }
    }

    pub fn storage_failure(operation: &'static str, cause: impl Into<BoxError>) -> Self {
        AppError::StorageFailure {
            operation,
            source: cause.into(),
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn internal(operation: &'static str, cause: impl Into<BoxError>) -> Self {
        AppError::Internal {
            operation,
            source: cause.into(),
        }
    }
}

// =============================================================================
// gRPC Status (Tonic)
// =============================================================================

impl From<AppError> for Status {
    fn from(err: AppError) -> Self {
        let code = match err.kind() {
            ErrorKind::UserExists => tonic::Code::AlreadyExists,
            ErrorKind::InvalidCredentials => tonic::Code::Unauthenticated,
            ErrorKind::AppNotFound => tonic::Code::NotFound,
            ErrorKind::Validation => tonic::Code::InvalidArgument,
            ErrorKind::RegistrationFailed | ErrorKind::StorageFailure | ErrorKind::Internal => {
                tonic::Code::Internal
            }
        };

        Status::new(code, err.user_message())
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;
