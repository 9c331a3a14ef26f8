use crate::error::{AppError, AppResult};

/// bcrypt work factor for stored passwords.
pub const BCRYPT_COST: u32 = 10;

/// Hashes a plaintext password with a fresh salt. Runs on the blocking pool.
pub async fn hash_password(password: String) -> AppResult<String> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, BCRYPT_COST))
        .await
        .map_err(|e| AppError::Internal(format!("password hashing task failed: {}", e)))?
        .map_err(|e| AppError::Internal(format!("failed to hash password: {}", e)))
}

/// Checks a plaintext password against a stored bcrypt hash.
pub async fn verify_password(password: String, hash: String) -> AppResult<bool> {
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| AppError::Internal(format!("password verification task failed: {}", e)))?
        .map_err(|e| AppError::Internal(format!("failed to verify password: {}", e)))
}
