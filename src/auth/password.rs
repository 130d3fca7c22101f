//! Credential sealing and verification.
//!
//! Two schemes are supported. `Argon2` stores a salted Argon2id hash in PHC
//! string format; `Plain` stores the password verbatim for byte-for-byte
//! compatibility with account files written by the original deployment.
//! Verification is driven by the stored value's format, so a store switched
//! from one scheme to the other keeps accepting its existing records.

use argon2::{
    password_hash::{rand_core::OsRng, SaltString},
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
};

/// How signup stores the supplied password.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialScheme {
    /// Store the password verbatim (parity with the original service).
    Plain,
    /// Store a salted Argon2id hash.
    Argon2,
}

impl std::str::FromStr for CredentialScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "plain" => Ok(CredentialScheme::Plain),
            "argon2" => Ok(CredentialScheme::Argon2),
            _ => Err(format!("Invalid credential scheme: {}", s)),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("Credential hashing failed: {0}")]
    Hash(argon2::password_hash::Error),
}

/// Seal a password for storage under the given scheme.
pub fn seal_secret(scheme: CredentialScheme, secret: &str) -> Result<String, PasswordError> {
    match scheme {
        CredentialScheme::Plain => Ok(secret.to_string()),
        CredentialScheme::Argon2 => {
            let salt = SaltString::generate(&mut OsRng);
            Argon2::default()
                .hash_password(secret.as_bytes(), &salt)
                .map(|hash| hash.to_string())
                .map_err(PasswordError::Hash)
        }
    }
}

/// Check a supplied password against a stored credential value.
///
/// A stored value that parses as a PHC hash is verified with Argon2; anything
/// else is treated as a plaintext credential and compared for equality.
pub fn verify_secret(stored: &str, supplied: &str) -> bool {
    match PasswordHash::new(stored) {
        Ok(parsed) => Argon2::default()
            .verify_password(supplied.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => stored == supplied,
    }
}
