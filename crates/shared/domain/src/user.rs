//! User domain entity.

use std::fmt;

use crate::password::Password;

/// Registered user.
///
/// `id` is assigned by storage; `email` uniqueness is a storage constraint.
#[derive(Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub password_hash: Vec<u8>,
}

impl User {
    pub fn new(id: i64, email: impl Into<String>, password_hash: impl Into<Vec<u8>>) -> Self {
        Self {
            id,
            email: email.into(),
            password_hash: password_hash.into(),
        }
    }

    /// Stored hash as a verifiable value object.
    pub fn password(&self) -> Password {
        Password::from_hash(self.password_hash.clone())
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("password_hash", &"[REDACTED]")
            .finish()
    }
}
