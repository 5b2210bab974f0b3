//! Password hashing
//!
//! bcrypt at the default cost. Hashes are stored opaque in
//! `users.password_hash` and never cross the API boundary.

use bcrypt::{hash, verify, DEFAULT_COST};

/// Hash a plaintext password for storage.
pub fn hash_password(password: &str) -> Result<String, bcrypt::BcryptError> {
    hash(password, DEFAULT_COST)
}

/// Check a login attempt against the stored hash.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, bcrypt::BcryptError> {
    verify(password, hash)
}

// ── Tests ──────────────────────────────────────────────────────
