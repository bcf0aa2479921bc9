//! Password hashing with PBKDF2-HMAC-SHA256.
//!
//! Digests are PHC strings, e.g.
//!
//! ```text
//! $pbkdf2-sha256$i=600000,l=32$<salt>$<hash>
//! ```
//!
//! Round count and salt are stored inside the digest, so a digest produced
//! under older settings keeps verifying after the configured defaults change.
use pbkdf2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Params, Pbkdf2,
};
use rand::{rngs::OsRng, RngCore};
use crate::config::AuthConfig;

const OUTPUT_LEN: usize = 32;

#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("Failed to hash password: {0}")]
    Hash(String),

    #[error("Hashing task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

#[derive(Debug, Clone, Copy)]
pub struct CredentialService {
    rounds: u32,
    salt_length: usize,
}

impl CredentialService {
    pub fn new(rounds: u32, salt_length: usize) -> Self {
        Self { rounds, salt_length }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(config.pbkdf2_rounds, config.salt_length)
    }

    /// Salts and hashes `password`. A fresh random salt is drawn for every call.
    pub fn hash(&self, password: &str) -> Result<String, CredentialError> {
        let mut salt_bytes = vec![0u8; self.salt_length];
        OsRng.fill_bytes(&mut salt_bytes);
        let salt = SaltString::encode_b64(&salt_bytes)
            .map_err(|e| CredentialError::Hash(format!("Invalid salt: {}", e)))?;

        let params = Params {
            rounds: self.rounds,
            output_length: OUTPUT_LEN,
        };

        let digest = Pbkdf2
            .hash_password_customized(
                password.as_bytes(),
                Some(Algorithm::PBKDF2_SHA256_IDENT),
                None,
                params,
                &salt,
            )
            .map_err(|e| CredentialError::Hash(e.to_string()))?;

        Ok(digest.to_string())
    }

    /// True only when `candidate` hashes to `digest`. The final comparison is constant time.
    pub fn verify(&self, digest: &str, candidate: &str) -> bool {
        let parsed = match PasswordHash::new(digest) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Stored password hash is malformed: {}", e);
                return false;
            }
        };

        Pbkdf2.verify_password(candidate.as_bytes(), &parsed).is_ok()
    }

    /// Runs `hash` on the blocking pool.
    pub async fn hash_blocking(&self, password: String) -> Result<String, CredentialError> {
        let service = *self;
        tokio::task::spawn_blocking(move || service.hash(&password)).await?
    }

    /// Runs `verify` on the blocking pool.
    pub async fn verify_blocking(&self, digest: String, candidate: String) -> Result<bool, CredentialError> {
        let service = *self;
        Ok(tokio::task::spawn_blocking(move || service.verify(&digest, &candidate)).await?)
    }
}
