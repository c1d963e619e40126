//! Password hashing for stored credentials.
//!
//! Users carry a per-account random salt and a PBKDF2-SHA256 hash, both
//! base64-encoded for TEXT columns. Verification recomputes the hash and
//! compares in constant time.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use subtle::ConstantTimeEq;

pub const PBKDF2_ITERATIONS: u32 = 600_000;
pub const HASH_LENGTH: usize = 32;
pub const SALT_LENGTH: usize = 32;

/// Generate a cryptographically random salt
pub fn generate_salt() -> [u8; SALT_LENGTH] {
    use rand::RngCore;
    let mut salt = [0u8; SALT_LENGTH];
    rand::thread_rng().fill_bytes(&mut salt);
    salt
}

/// Derive the raw hash from password + salt using PBKDF2-SHA256
fn derive_hash(password: &str, salt: &[u8]) -> [u8; HASH_LENGTH] {
    let mut hash = [0u8; HASH_LENGTH];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, PBKDF2_ITERATIONS, &mut hash);
    hash
}

/// Hash a password for storage, base64-encoded.
pub fn hash_password(password: &str, salt: &[u8]) -> String {
    BASE64.encode(derive_hash(password, salt))
}

/// Encode a salt for storage alongside the hash.
pub fn encode_salt(salt: &[u8]) -> String {
    BASE64.encode(salt)
}

/// Check a password against the stored salt + hash.
///
/// Malformed stored values verify as false rather than erroring; a
/// credential that cannot be decoded can never match.
pub fn verify_password(password: &str, stored_salt: &str, stored_hash: &str) -> bool {
    let Ok(salt) = BASE64.decode(stored_salt) else {
        return false;
    };
    let Ok(expected) = BASE64.decode(stored_hash) else {
        return false;
    };
    let computed = derive_hash(password, &salt);
    computed.ct_eq(&expected).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_deterministic_for_same_salt() {
        let salt = [42u8; SALT_LENGTH];
        assert_eq!(hash_password("secret", &salt), hash_password("secret", &salt));
    }

    #[test]
    fn different_salts_produce_different_hashes() {
        let h1 = hash_password("secret", &[1u8; SALT_LENGTH]);
        let h2 = hash_password("secret", &[2u8; SALT_LENGTH]);
        assert_ne!(h1, h2);
    }

    #[test]
    fn generate_salt_is_random() {
        let s1 = generate_salt();
        let s2 = generate_salt();
        assert_ne!(s1, s2);
    }

    #[test]
    fn verify_accepts_correct_password() {
        let salt = generate_salt();
        let hash = hash_password("doctor123", &salt);
        assert!(verify_password("doctor123", &encode_salt(&salt), &hash));
    }

    #[test]
    fn verify_rejects_wrong_password() {
        let salt = generate_salt();
        let hash = hash_password("doctor123", &salt);
        assert!(!verify_password("doctor124", &encode_salt(&salt), &hash));
    }

    #[test]
    fn verify_rejects_malformed_stored_values() {
        assert!(!verify_password("anything", "not base64!!", "also not base64!!"));
        let salt = generate_salt();
        assert!(!verify_password("anything", &encode_salt(&salt), "@@@"));
    }
}
