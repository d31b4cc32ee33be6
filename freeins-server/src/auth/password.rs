//! bcrypt hashing on the blocking pool

use super::AuthError;

/// Hash a password with the given bcrypt cost.
pub async fn hash_password(password: &str, cost: u32) -> Result<String, AuthError> {
    let password = password.to_owned();
    let hash = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost)).await??;
    Ok(hash)
}

/// Compare a password with a stored hash.
///
/// A stored hash that bcrypt cannot parse counts as a mismatch.
pub async fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
    let password = password.to_owned();
    let hash = hash.to_owned();
    let result = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash)).await?;

    match result {
        Ok(matched) => Ok(matched),
        Err(e) => {
            tracing::warn!(error = %e, "stored password hash is unreadable");
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_COST: u32 = 4;

    #[tokio::test]
    async fn hash_then_verify() {
        let hash = hash_password("admin", TEST_COST).await.unwrap();
        assert!(hash.starts_with("$2"));
        assert!(verify_password("admin", &hash).await.unwrap());
        assert!(!verify_password("Admin", &hash).await.unwrap());
    }

    #[tokio::test]
    async fn garbage_hash_is_a_mismatch() {
        assert!(!verify_password("admin", "not-a-hash").await.unwrap());
    }

    #[tokio::test]
    async fn invalid_cost_is_an_error() {
        let err = hash_password("admin", 99).await.unwrap_err();
        assert!(matches!(err, AuthError::Hash(_)));
    }
}
