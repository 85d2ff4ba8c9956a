//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password hashing (Argon2id with optional pepper)
//! - Signed access tokens (RS256 JWT)

pub mod password;
pub mod token;
