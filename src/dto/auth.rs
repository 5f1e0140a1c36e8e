use serde::Deserialize;
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};

#[derive(Deserialize, Debug, ToSchema)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl RegisterForm {
    /// Reject empty fields and implausible emails before anything is hashed
    /// or written.
    pub fn validate(&self) -> AppResult<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::Validation("name must not be empty".into()));
        }
        if self.email.trim().is_empty() || !self.email.contains('@') {
            return Err(AppError::Validation("email is not valid".into()));
        }
        if self.password.is_empty() {
            return Err(AppError::Validation("password must not be empty".into()));
        }
        Ok(())
    }
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}
