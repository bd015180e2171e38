//! # roomhub-auth
//!
//! Authentication and authorization for RoomHub: JWT token pairs,
//! Argon2id password hashing, and the per-request access policies.

pub mod jwt;
pub mod password;
pub mod policy;

pub use jwt::{Claims, JwtDecoder, JwtEncoder, TokenPair};
pub use password::PasswordHasher;
pub use policy::{AccessPolicy, Action, Actor};
