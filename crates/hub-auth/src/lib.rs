//! Salted password credentials
//!
//! Stores `sha256(salt || password)` with a random per-credential salt,
//! encoded as `hex(salt) "$" hex(digest)`. Only the hash is ever
//! persisted; the password itself is never recoverable from the record.

#![warn(unreachable_pub)]

use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Salt length in bytes
pub const SALT_LEN: usize = 16;

/// Credential errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialError {
    /// Stored credential does not match the `salt$digest` encoding
    #[error("malformed stored credential")]
    Malformed,
}

/// A salted password hash
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credential(String);

impl Credential {
    /// Derive a credential from a password with a fresh random salt
    #[must_use]
    pub fn derive(password: &str) -> Self {
        let mut salt = [0u8; SALT_LEN];
        OsRng.fill_bytes(&mut salt);
        let digest = hash_with_salt(&salt, password);
        Self(format!("{}${}", hex::encode(salt), hex::encode(digest)))
    }

    /// Verify a password against this credential
    ///
    /// # Errors
    /// `CredentialError::Malformed` if the stored encoding is invalid.
    pub fn verify(&self, password: &str) -> Result<bool, CredentialError> {
        let (salt_hex, digest_hex) = self.0.split_once('$').ok_or(CredentialError::Malformed)?;
        let salt = hex::decode(salt_hex).map_err(|_| CredentialError::Malformed)?;
        if salt.len() != SALT_LEN || digest_hex.len() != 64 {
            return Err(CredentialError::Malformed);
        }
        let digest = hash_with_salt(&salt, password);
        Ok(hex::encode(digest) == digest_hex)
    }

    /// Encoded form, as persisted
    #[inline]
    #[must_use]
    pub fn encoded(&self) -> &str {
        &self.0
    }
}

fn hash_with_salt(salt: &[u8], password: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    hasher.finalize().into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derive_and_verify() {
        let cred = Credential::derive("Abcdefg1");
        assert!(cred.verify("Abcdefg1").unwrap());
        assert!(!cred.verify("Abcdefg2").unwrap());
    }

    #[test]
    fn fresh_salt_per_derivation() {
        let a = Credential::derive("Abcdefg1");
        let b = Credential::derive("Abcdefg1");
        assert_ne!(a.encoded(), b.encoded());
        assert!(a.verify("Abcdefg1").unwrap());
        assert!(b.verify("Abcdefg1").unwrap());
    }

    #[test]
    fn encoding_shape() {
        let cred = Credential::derive("pw");
        let (salt, digest) = cred.encoded().split_once('$').unwrap();
        assert_eq!(salt.len(), SALT_LEN * 2);
        assert_eq!(digest.len(), 64);
        assert!(salt.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn malformed_credential_rejected() {
        let cred = Credential("not-a-credential".to_string());
        assert_eq!(cred.verify("pw"), Err(CredentialError::Malformed));

        let cred = Credential("zz$zz".to_string());
        assert_eq!(cred.verify("pw"), Err(CredentialError::Malformed));
    }
}
