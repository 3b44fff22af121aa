//! Common utilities shared across the workspace.
//!
//! This crate provides:
//! - The externally visible error taxonomy and its gRPC mapping
//! - Configuration structures

pub mod config;
pub mod error;

pub use config::*;
pub use error::{AppError, AppResult, BoxError, ErrorKind};
