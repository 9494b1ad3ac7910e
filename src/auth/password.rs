//! bcrypt password hashing, run off the async workers.

use crate::error::AppError;

#[derive(Clone, Copy, Debug)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        PasswordHasher { cost }
    }

    pub async fn hash(&self, password: String) -> Result<String, AppError> {
        let cost = self.cost;
        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| AppError::Internal(e.to_string()))?
            .map_err(|e| AppError::Internal(format!("password hash: {}", e)))
    }

    pub async fn verify(&self, password: String, hashed: String) -> Result<bool, AppError> {
        tokio::task::spawn_blocking(move || bcrypt::verify(password, &hashed))
            .await
            .map_err(|e| AppError::Internal(e.to_string()))?
            .map_err(|e| AppError::Internal(format!("password verify: {}", e)))
    }
}
