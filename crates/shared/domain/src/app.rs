//! Client application (tenant) entity.

/// Client application holding its own token signing secret.
///
/// Apps are provisioned by the storage owner; the identity core only reads them.
#[derive(Clone, PartialEq, Eq)]
pub struct App {
    pub id: i32,
    pub name: String,
    pub secret: String,
}

impl App {
    pub fn new(id: i32, name: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            secret: secret.into(),
        }
    }

    /// Signing key material for this app's tokens.
    pub fn secret_bytes(&self) -> &[u8] {
        self.secret.as_bytes()
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_secret() {
        let app = App::new(1, "test", "super-secret-value");
        let out = format!("{:?}", app);

        assert!(out.contains("[REDACTED]"));
        assert!(!out.contains("super-secret-value"));
    }
}
