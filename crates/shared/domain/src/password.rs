//! Password value object - credential hashing and verification.
//!
//! Hashes are Argon2id PHC strings with a random per-password salt, kept as
//! opaque bytes so storage never needs to interpret them.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};

use crate::error::{DomainError, DomainResult};

/// Argon2 work factor.
///
/// Tune so a single hash costs roughly 100-300ms on the deployment hardware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashCost {
    /// Memory cost in KiB
    pub memory_kib: u32,
    /// Number of passes
    pub iterations: u32,
    /// Degree of parallelism (lanes)
    pub parallelism: u32,
}

impl HashCost {
    pub const fn new(memory_kib: u32, iterations: u32, parallelism: u32) -> Self {
        Self {
            memory_kib,
            iterations,
            parallelism,
        }
    }

    /// Check the parameters are accepted by Argon2.
    ///
    /// # Errors
    /// Returns [`DomainError::Hashing`] describing the rejected parameter.
    pub fn validate(&self) -> DomainResult<()> {
        self.params().map(|_| ())
    }

    fn params(&self) -> DomainResult<Params> {
        Params::new(self.memory_kib, self.iterations, self.parallelism, None)
            .map_err(|e| DomainError::hashing(format!("invalid cost parameters: {}", e)))
    }
}

impl Default for HashCost {
    fn default() -> Self {
        Self::new(
            Params::DEFAULT_M_COST,
            Params::DEFAULT_T_COST,
            Params::DEFAULT_P_COST,
        )
    }
}

/// Password value object that handles hashing and verification.
///
/// Holds only the hash, never the plain text.
#[derive(Clone, PartialEq, Eq)]
pub struct Password {
    hash: Vec<u8>,
}

// Don't expose hash in debug output
impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Hash the plain text with the default work factor.
    pub fn new(plain_text: &str) -> DomainResult<Self> {
        Self::with_cost(plain_text, &HashCost::default())
    }

    /// Hash the plain text with an explicit work factor.
    ///
    /// # Errors
    /// Returns [`DomainError::Hashing`] if the cost parameters are rejected
    /// or the hashing primitive fails.
    pub fn with_cost(plain_text: &str, cost: &HashCost) -> DomainResult<Self> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, cost.params()?);
        let hash = argon2
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| DomainError::hashing(e.to_string()))?;

        Ok(Self {
            hash: hash.to_string().into_bytes(),
        })
    }

    /// Create a Password from an existing hash (from storage).
    pub fn from_hash(hash: impl Into<Vec<u8>>) -> Self {
        Self { hash: hash.into() }
    }

    /// Get the hash bytes for storage.
    pub fn as_bytes(&self) -> &[u8] {
        &self.hash
    }

    /// Consume and return the hash bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.hash
    }

    /// Verify a plain text password against this hash.
    ///
    /// A mismatch is `false`, and so is a stored hash that cannot be parsed.
    pub fn verify(&self, plain_text: &str) -> bool {
        let Ok(encoded) = std::str::from_utf8(&self.hash) else {
            return false;
        };
        let Ok(parsed) = PasswordHash::new(encoded) else {
            return false;
        };

        // Cost parameters are read back from the PHC string
        Argon2::default()
            .verify_password(plain_text.as_bytes(), &parsed)
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHEAP: HashCost = HashCost::new(1024, 1, 1);

    #[test]
    fn test_password_hash_and_verify() {
        let plain = "SecurePassword123!";
        let password = Password::with_cost(plain, &CHEAP).unwrap();

        assert!(password.verify(plain));
        assert!(!password.verify("WrongPassword123"));
    }

    #[test]
    fn test_password_from_hash() {
        let plain = "pw1";
        let password = Password::with_cost(plain, &CHEAP).unwrap();

        let restored = Password::from_hash(password.as_bytes().to_vec());
        assert!(restored.verify(plain));
    }

    #[test]
    fn test_same_password_different_salts() {
        let plain = "SamePassword123";
        let pass1 = Password::with_cost(plain, &CHEAP).unwrap();
        let pass2 = Password::with_cost(plain, &CHEAP).unwrap();

        assert_ne!(pass1.as_bytes(), pass2.as_bytes());
        assert!(pass1.verify(plain));
        assert!(pass2.verify(plain));
    }

    #[test]
    fn test_hash_is_argon2id_phc_string() {
        let password = Password::with_cost("pw", &CHEAP).unwrap();
        let encoded = std::str::from_utf8(password.as_bytes()).unwrap();

        assert!(encoded.starts_with("$argon2id$v=19$m=1024,t=1,p=1$"));
        assert!(!encoded.contains("pw$"));
    }

    #[test]
    fn test_default_cost_hashes() {
        let password = Password::new("default-cost").unwrap();
        assert!(password.verify("default-cost"));
    }

    #[test]
    fn test_invalid_cost_is_hashing_error() {
        let result = Password::with_cost("pw", &HashCost::new(1, 1, 1));
        assert!(matches!(result, Err(DomainError::Hashing(_))));
    }

    #[test]
    fn test_cost_validation() {
        assert!(CHEAP.validate().is_ok());
        assert!(HashCost::default().validate().is_ok());
        assert!(matches!(
            HashCost::new(1, 1, 1).validate(),
            Err(DomainError::Hashing(_))
        ));
        assert!(HashCost::new(1024, 0, 1).validate().is_err());
        assert!(HashCost::new(1024, 1, 0).validate().is_err());
    }

    #[test]
    fn test_garbage_hash_never_verifies() {
        assert!(!Password::from_hash(b"not-a-phc-string".to_vec()).verify("anything"));
        assert!(!Password::from_hash(vec![0xff, 0xfe]).verify("anything"));
        assert!(!Password::from_hash(Vec::new()).verify(""));
    }

    #[test]
    fn test_debug_redacts_hash() {
        let password = Password::with_cost("pw", &CHEAP).unwrap();
        assert!(format!("{:?}", password).contains("[REDACTED]"));
    }
}
