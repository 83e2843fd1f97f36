use bcrypt::{hash, verify, BcryptError, DEFAULT_COST};

/// Hash a plaintext password with a freshly generated salt. Hashing the same
/// password twice yields different digests; both verify.
pub fn hash_password(password: &str) -> Result<String, BcryptError> {
    hash(password, DEFAULT_COST)
}

/// Check a plaintext password against a stored digest. A wrong password is
/// `Ok(false)`, never an error; only a malformed digest fails. The comparison
/// inside bcrypt is constant-time.
pub fn check_password_hash(password: &str, digest: &str) -> Result<bool, BcryptError> {
    verify(password, digest)
}

#[cfg(test)]
mod tests {
    use super::*;

    // bcrypt at DEFAULT_COST is slow by design; share the digests
    fn hashed(password: &str) -> String {
        hash_password(password).expect("hashing should succeed")
    }

    #[test]
    fn correct_password_verifies() {
        let digest = hashed("correctPassword123!");
        assert!(check_password_hash("correctPassword123!", &digest).unwrap());
    }

    #[test]
    fn wrong_password_is_rejected_without_error() {
        let digest = hashed("correctPassword123!");
        assert!(!check_password_hash("anotherPassword456!", &digest).unwrap());
    }

    #[test]
    fn same_password_hashes_differently_but_both_verify() {
        let first = hashed("correctPassword123!");
        let second = hashed("correctPassword123!");
        assert_ne!(first, second);
        assert!(check_password_hash("correctPassword123!", &first).unwrap());
        assert!(check_password_hash("correctPassword123!", &second).unwrap());
    }

    #[test]
    fn malformed_digest_is_an_error() {
        assert!(check_password_hash("whatever", "not-a-bcrypt-digest").is_err());
    }
}
