//! Authentication utilities library
//!
//! Provides the credential and session primitives of the back-office service:
//! - Password hashing (Argon2id, fixed cost)
//! - Session token issuance and verification (HS256, 24h lifetime)
//! - Authentication coordination
//!
//! The service defines its own ports and error taxonomy and adapts these
//! implementations behind them.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify(&hash, "my_password").unwrap());
//! ```
//!
//! ## Session Tokens
//! ```
//! use auth::JwtHandler;
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!");
//! let issued = handler.issue("42").unwrap();
//! let issuer = handler.verify_and_extract_issuer(&issued.token).unwrap();
//! assert_eq!(issuer, "42");
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::Authenticator;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!");
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue token
//! let issued = auth.authenticate("password123", &hash, "42").unwrap();
//!
//! // Validate token
//! assert_eq!(auth.verify_and_extract_issuer(&issued.token).unwrap(), "42");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::IssuedToken;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
