//! Admin gate
//!
//! Mutating upload-store operations require an [`AdminToken`], and the only
//! way to get one is to present the configured passphrase to the gate.
//!
//! This is a UI convenience, not access control: the passphrase is a plain
//! string in the config and anyone with the binary can read it.

use tracing::warn;

/// Passphrase used when the config does not set one
pub const DEFAULT_PASSPHRASE: &str = "Gentleman";

/// Wrong passphrase
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Access denied: admin passphrase does not match")]
pub struct AccessDenied;

/// Proof that the admin gate was passed
#[derive(Debug)]
pub struct AdminToken {
    _private: (),
}

/// Passphrase check guarding admin operations
#[derive(Debug, Clone)]
pub struct AdminGate {
    passphrase: String,
}

impl AdminGate {
    pub fn new(passphrase: impl Into<String>) -> Self {
        Self {
            passphrase: passphrase.into(),
        }
    }

    /// Exchange a candidate passphrase for a token
    pub fn unlock(&self, candidate: &str) -> Result<AdminToken, AccessDenied> {
        if candidate == self.passphrase {
            Ok(AdminToken { _private: () })
        } else {
            warn!("admin unlock rejected");
            Err(AccessDenied)
        }
    }
}

impl Default for AdminGate {
    fn default() -> Self {
        Self::new(DEFAULT_PASSPHRASE)
    }
}
