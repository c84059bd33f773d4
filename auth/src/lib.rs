//! Authentication primitives for the SSO service
//!
//! Provides the building blocks the service composes:
//! - Password hashing (Argon2id) and the password composition policy
//! - RSA signing key material
//! - RS256 token encoding and verification
//!
//! The crate holds no state and performs no I/O; key lifecycle and
//! credential storage belong to the service.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::{PasswordHasher, PasswordPolicy};
//!
//! PasswordPolicy::check("Corr3ct-horse").unwrap();
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("Corr3ct-horse").unwrap();
//! assert!(hasher.verify("Corr3ct-horse", &hash).is_ok());
//! ```
//!
//! ## Tokens
//! ```no_run
//! use auth::{Claims, KeyPair, TokenCodec};
//! use chrono::{Duration, Utc};
//!
//! let key = KeyPair::generate().unwrap();
//! let codec = TokenCodec::new();
//!
//! let claims = Claims::issued("sso", "auth", "user123", Utc::now(), Duration::hours(2));
//! let token = codec.encode(&key, &claims).unwrap();
//!
//! let decoded = codec.decode(key.public_key(), &token).unwrap();
//! assert_eq!(decoded, claims);
//! ```

pub mod jwt;
pub mod keys;
pub mod password;

// Re-export commonly used items
pub use jwt::Claims;
pub use jwt::TokenCodec;
pub use jwt::TokenError;
pub use keys::KeyError;
pub use keys::KeyPair;
pub use keys::PublicKey;
pub use password::generate_password;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use password::PasswordPolicy;
