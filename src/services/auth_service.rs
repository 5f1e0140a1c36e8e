use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use chrono::{Duration, Utc};
use password_hash::rand_core::OsRng;
use uuid::Uuid;

use crate::{
    audit::{self, AuditAction},
    db::DbPool,
    dto::auth::{LoginForm, RegisterForm},
    error::{AppError, AppResult},
    models::{Session, User},
};

pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?
        .to_string();
    Ok(hash)
}

pub fn verify_password(stored_hash: &str, password: &str) -> AppResult<bool> {
    let parsed_hash = PasswordHash::new(stored_hash)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("Invalid password hash")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Create an account. Email uniqueness is enforced by the database; a
/// violation surfaces as `DuplicateEmail`, not as a pre-check race.
pub async fn register_user(pool: &DbPool, payload: RegisterForm) -> AppResult<User> {
    payload.validate()?;
    let RegisterForm {
        name,
        email,
        password,
    } = payload;

    let password_hash = hash_password(&password)?;
    let id = Uuid::new_v4();

    let user: User = sqlx::query_as(
        "INSERT INTO users (id, name, email, password_hash) VALUES ($1, $2, $3, $4) RETURNING *",
    )
    .bind(id)
    .bind(name.trim())
    .bind(email.trim())
    .bind(password_hash)
    .fetch_one(pool)
    .await
    .map_err(|e| AppError::from_unique_violation(e, AppError::DuplicateEmail))?;

    audit::record(pool, user.id, AuditAction::Register, None).await;
    Ok(user)
}

/// Check credentials. Unknown email and wrong password take the same exit so
/// the response never reveals whether an account exists.
pub async fn authenticate(pool: &DbPool, payload: LoginForm) -> AppResult<User> {
    let LoginForm { email, password } = payload;
    let user: Option<User> = sqlx::query_as("SELECT * FROM users WHERE email = $1")
        .bind(email.trim())
        .fetch_optional(pool)
        .await?;

    let user = match user {
        Some(u) => u,
        None => return Err(AppError::InvalidCredentials),
    };

    if !verify_password(&user.password_hash, &password)? {
        return Err(AppError::InvalidCredentials);
    }

    audit::record(pool, user.id, AuditAction::Login, None).await;

    Ok(user)
}

/// Issue an opaque server-tracked session token. Expired sessions for the
/// same user are swept on the way in.
pub async fn establish_session(
    pool: &DbPool,
    user_id: Uuid,
    ttl_hours: i64,
) -> AppResult<Session> {
    sqlx::query("DELETE FROM sessions WHERE user_id = $1 AND expires_at <= now()")
        .bind(user_id)
        .execute(pool)
        .await?;

    let token = Uuid::new_v4();
    let expires_at = Utc::now() + Duration::hours(ttl_hours);

    let session: Session = sqlx::query_as(
        "INSERT INTO sessions (token, user_id, expires_at) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(token)
    .bind(user_id)
    .bind(expires_at)
    .fetch_one(pool)
    .await?;

    Ok(session)
}

/// Drop a session so the token stops resolving immediately.
pub async fn revoke_session(pool: &DbPool, token: Uuid) -> AppResult<()> {
    sqlx::query("DELETE FROM sessions WHERE token = $1")
        .bind(token)
        .execute(pool)
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_round_trips_and_rejects_wrong_password() {
        let hash = hash_password("pw123").unwrap();
        assert_ne!(hash, "pw123");
        assert!(verify_password(&hash, "pw123").unwrap());
        assert!(!verify_password(&hash, "pw124").unwrap());
    }

    #[test]
    fn hashes_are_salted() {
        let a = hash_password("pw123").unwrap();
        let b = hash_password("pw123").unwrap();
        assert_ne!(a, b);
    }
}
