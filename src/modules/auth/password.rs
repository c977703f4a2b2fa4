use crate::utils::random::{random_bytes, SharedRng};
use anyhow::Result;

/// A bcrypt hash and the salt it was computed with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashedPassword {
    pub salt: String,
    pub hash: String,
}

#[derive(Clone)]
pub struct PasswordHasher {
    cost: u32,
    rng: SharedRng,
}

impl PasswordHasher {
    pub fn new(cost: u32, rng: SharedRng) -> Self {
        PasswordHasher { cost, rng }
    }

    /// hashes the password with a fresh salt drawn from the shared rng
    pub async fn hash(&self, password: &str) -> Result<HashedPassword> {
        let salt = random_bytes::<16>(&self.rng).await;

        let parts = bcrypt::hash_with_salt(password, self.cost, salt)?;

        Ok(HashedPassword {
            salt: parts.get_salt(),
            hash: parts.to_string(),
        })
    }

    pub fn verify(&self, password: &str, hash: &str) -> Result<bool> {
        Ok(bcrypt::verify(password, hash)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::random::new_shared_rng;

    #[tokio::test]
    async fn verifies_only_the_hashed_password() {
        let hasher = PasswordHasher::new(4, new_shared_rng());

        let hashed = hasher.hash("qwerty1").await.unwrap();

        assert!(hashed.hash.contains(&hashed.salt));
        assert!(hasher.verify("qwerty1", &hashed.hash).unwrap());
        assert!(!hasher.verify("qwerty2", &hashed.hash).unwrap());
    }

    #[tokio::test]
    async fn salts_are_unique() {
        let hasher = PasswordHasher::new(4, new_shared_rng());

        let first = hasher.hash("qwerty1").await.unwrap();
        let second = hasher.hash("qwerty1").await.unwrap();

        assert_ne!(first.salt, second.salt);
        assert_ne!(first.hash, second.hash);
    }
}
