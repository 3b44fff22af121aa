//! Domain-level constants.

// =============================================================================
// Authentication
// =============================================================================

/// Default access token lifetime in seconds
pub const DEFAULT_TOKEN_TTL_SECS: u64 = 3600;

/// Default deadline for a single storage call in seconds
pub const DEFAULT_STORAGE_TIMEOUT_SECS: u64 = 5;

// =============================================================================
// Token claims
// =============================================================================

/// Claim holding the user id
pub const CLAIM_UID: &str = "uid";

/// Claim holding the user email
pub const CLAIM_EMAIL: &str = "email";

/// Claim holding the app id the token is scoped to
pub const CLAIM_APP_ID: &str = "app_id";

/// Claim holding the expiration time (Unix seconds)
pub const CLAIM_EXP: &str = "exp";
