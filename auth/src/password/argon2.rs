use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::Error as HashError;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::Version;

use super::errors::PasswordError;

/// Memory cost in KiB.
pub const MEMORY_COST_KIB: u32 = 19 * 1024;

/// Number of passes over memory.
pub const TIME_COST: u32 = 2;

/// Degree of parallelism.
pub const PARALLELISM: u32 = 1;

const PLACEHOLDER_SALT: &str = "dW5rbm93bi1hY2NvdW50IQ";
const PLACEHOLDER_DIGEST: &str = "AAECAwQFBgcICQoLDA0ODxAREhMUFRYXGBkaGxwdHh8";

/// Password hashing implementation.
///
/// Argon2id with fixed cost parameters. Every hash carries its own random salt
/// and parameters in PHC string form, so verification never depends on the
/// parameters the hasher was built with.
pub struct PasswordHasher {
    params: Params,
    placeholder_hash: String,
}

impl PasswordHasher {
    /// Create a new password hasher with the fixed cost parameters.
    ///
    /// # Returns
    /// PasswordHasher instance
    pub fn new() -> Self {
        let params = Params::new(MEMORY_COST_KIB, TIME_COST, PARALLELISM, None)
            .unwrap_or_default();
        // Matches no password, but costs the same to check as a stored hash.
        let placeholder_hash = format!(
            "$argon2id$v=19$m={},t={},p={}${}${}",
            params.m_cost(),
            params.t_cost(),
            params.p_cost(),
            PLACEHOLDER_SALT,
            PLACEHOLDER_DIGEST
        );
        Self {
            params,
            placeholder_hash,
        }
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hash a plaintext password.
    ///
    /// Two calls with the same input yield different hashes because a fresh
    /// salt is drawn each time.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// PHC string format hash (algorithm, parameters, salt and digest)
    ///
    /// # Errors
    /// * `HashingFailed` - Password hashing operation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a candidate password against a stored hash.
    ///
    /// The candidate is re-derived with the salt and parameters embedded in
    /// `stored_hash` and compared in constant time.
    ///
    /// # Arguments
    /// * `stored_hash` - Stored password hash in PHC string format
    /// * `candidate` - Plaintext password to verify
    ///
    /// # Returns
    /// True if the candidate matches, false otherwise
    ///
    /// # Errors
    /// * `VerificationFailed` - Stored hash is not a valid PHC string
    pub fn verify(&self, stored_hash: &str, candidate: &str) -> Result<bool, PasswordError> {
        let parsed_hash = PasswordHash::new(stored_hash).map_err(|e| {
            PasswordError::VerificationFailed(format!("Invalid password hash: {}", e))
        })?;

        match self
            .argon2()
            .verify_password(candidate.as_bytes(), &parsed_hash)
        {
            Ok(()) => Ok(true),
            Err(HashError::Password) => Ok(false),
            Err(e) => Err(PasswordError::VerificationFailed(e.to_string())),
        }
    }

    /// Run a full verification that can never succeed.
    ///
    /// Used when there is no stored hash to check against, so that the caller
    /// spends the same effort as for a wrong password.
    ///
    /// # Returns
    /// Always false
    pub fn verify_placeholder(&self, candidate: &str) -> bool {
        matches!(self.verify(&self.placeholder_hash, candidate), Ok(true))
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}
