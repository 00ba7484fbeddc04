use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::JwtError;

/// A freshly signed session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    /// Compact JWS string
    pub token: String,

    /// Expiration time (Unix timestamp)
    pub expires_at: i64,
}

/// Session token codec.
///
/// Signs and verifies HS256 tokens with a single shared secret. The same
/// secret is used for every subject and is never rotated, so whoever holds it
/// can mint tokens for any user.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl JwtHandler {
    /// Create a new handler with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Shared signing secret
    ///
    /// # Returns
    /// JwtHandler configured with HS256
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        }
    }

    /// Issue a session token for a subject.
    ///
    /// # Arguments
    /// * `subject_id` - Identity placed in the issuer claim
    ///
    /// # Returns
    /// Signed token and its expiration timestamp (now + 24h)
    ///
    /// # Errors
    /// * `EncodingFailed` - Signing failed
    pub fn issue(&self, subject_id: &str) -> Result<IssuedToken, JwtError> {
        let claims = Claims::for_subject(subject_id);
        let token = self.encode(&claims)?;

        Ok(IssuedToken {
            token,
            expires_at: claims.exp,
        })
    }

    /// Encode claims into a signed token.
    ///
    /// # Errors
    /// * `EncodingFailed` - Signing failed
    pub fn encode(&self, claims: &Claims) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Decode and validate a token.
    ///
    /// Expiry is checked without leeway: a token is rejected as soon as its
    /// `exp` is not in the future.
    ///
    /// # Errors
    /// * `InvalidSignature` - Signature does not verify under the secret
    /// * `TokenExpired` - `exp` has passed
    /// * `Malformed` - Token structure or payload is invalid
    pub fn decode(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                    ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                    _ => JwtError::Malformed(e.to_string()),
                }
            })?;

        if token_data.claims.is_expired(Utc::now().timestamp()) {
            return Err(JwtError::TokenExpired);
        }

        Ok(token_data.claims)
    }

    /// Verify a token and return its issuer claim verbatim.
    ///
    /// Callers parse the issuer into their own identifier type.
    ///
    /// # Errors
    /// Same as [`JwtHandler::decode`]
    pub fn verify_and_extract_issuer(&self, token: &str) -> Result<String, JwtError> {
        self.decode(token).map(|claims| claims.iss)
    }
}
