//! Authentication primitives.
//!
//! - [`password`] -- Argon2id senha hashing and verification.
//! - [`jwt`] -- JWT generation and validation under a configurable expiry policy.

pub mod jwt;
pub mod password;
