//! Shared-secret credential.

use std::fmt;

/// The shared secret a webhook is signed with.
///
/// Supplied by the caller for each delivery. The secret bytes never
/// appear in `Debug` output, so a credential can sit inside logged
/// structures without leaking.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    secret: Vec<u8>,
}

impl Credential {
    /// Creates a credential from raw secret bytes.
    ///
    /// An empty secret is accepted here and rejected when signing.
    #[must_use]
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Returns the secret bytes.
    #[must_use]
    pub fn secret(&self) -> &[u8] {
        &self.secret
    }

    /// Returns true if the secret is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.secret.is_empty()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

impl From<&str> for Credential {
    fn from(secret: &str) -> Self {
        Self::new(secret.as_bytes())
    }
}

impl From<String> for Credential {
    fn from(secret: String) -> Self {
        Self::new(secret.into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_secret() {
        let credential = Credential::from("s3cr3t");
        let debug = format!("{credential:?}");

        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("s3cr3t"));
    }

    #[test]
    fn keeps_secret_bytes() {
        let credential = Credential::new(vec![0_u8, 159, 146, 150]);

        assert_eq!(credential.secret(), &[0, 159, 146, 150]);
        assert!(!credential.is_empty());
    }

    #[test]
    fn empty_secret_is_representable() {
        assert!(Credential::from(String::new()).is_empty());
    }
}
