//! PIN credential handling
//!
//! A PIN is stored only as its hex-encoded SHA-256 digest. The digest is
//! deterministic and unsalted, so equal PINs yield equal credentials; that
//! matches the rails this mock stands in for and keeps seeded fixtures
//! reproducible.

use sha2::{Digest, Sha256};

/// One-way transform of a PIN into a stored credential.
#[derive(Debug, Clone, Copy, Default)]
pub struct PinHasher;

impl PinHasher {
    /// Create a hasher.
    pub fn new() -> Self {
        Self
    }

    /// Hash a PIN into its stored credential form.
    pub fn hash(&self, pin: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(pin.as_bytes());
        let digest = hasher.finalize();
        digest.iter().map(|b| format!("{:02x}", b)).collect()
    }

    /// Check a PIN against a stored credential.
    pub fn verify(&self, pin: &str, credential: &str) -> bool {
        self.hash(pin) == credential
    }
}
