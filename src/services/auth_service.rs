use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use password_hash::rand_core::OsRng;
use uuid::Uuid;

use crate::{
    db::DbPool,
    dto::auth::{Claims, LoginRequest, RegisterRequest},
    error::{AppError, AppResult},
    models::User,
};

const MIN_PASSWORD_LEN: usize = 8;

pub async fn register_user(pool: &DbPool, payload: RegisterRequest) -> AppResult<String> {
    let RegisterRequest {
        name,
        email,
        password,
    } = payload;

    let exist: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM users WHERE email = $1")
        .bind(email.as_str())
        .fetch_optional(pool)
        .await?;
    if exist.is_some() {
        return Err(AppError::BadRequest("User already exists".to_string()));
    }

    if !is_valid_email(&email) {
        return Err(AppError::BadRequest(
            "Please enter a valid email".to_string(),
        ));
    }
    if password.len() < MIN_PASSWORD_LEN {
        return Err(AppError::BadRequest(
            "Please enter a strong password".to_string(),
        ));
    }

    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?
        .to_string();

    let id = Uuid::new_v4();
    sqlx::query("INSERT INTO users (id, name, email, password_hash) VALUES ($1, $2, $3, $4)")
        .bind(id)
        .bind(name.as_str())
        .bind(email.as_str())
        .bind(password_hash)
        .execute(pool)
        .await?;

    tracing::info!(user_id = %id, "user registered");
    issue_token(id)
}

pub async fn login_user(pool: &DbPool, payload: LoginRequest) -> AppResult<String> {
    let LoginRequest { email, password } = payload;

    let user: Option<User> = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
        .bind(email.as_str())
        .fetch_optional(pool)
        .await?;
    let user = match user {
        Some(u) => u,
        None => return Err(AppError::BadRequest("User doesn't exist".into())),
    };

    let parsed_hash = PasswordHash::new(&user.password_hash)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("Invalid password hash")))?;

    let argon2 = Argon2::default();
    if argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_err()
    {
        return Err(AppError::BadRequest("Invalid credentials".into()));
    }

    tracing::info!(user_id = %user.id, "user logged in");
    issue_token(user.id)
}

fn issue_token(user_id: Uuid) -> AppResult<String> {
    let secret = std::env::var("JWT_SECRET")
        .map_err(|_| AppError::Internal(anyhow::anyhow!("JWT_SECRET is not set")))?;

    let expiration = Utc::now()
        .checked_add_signed(Duration::hours(24))
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to set expiration")))?;

    let claims = Claims {
        sub: user_id.to_string(),
        exp: expiration.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))
}

/// Minimal structural check: one `@`, a non-empty local part, a dotted
/// domain, no whitespace.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain.contains('.') && domain.split('.').all(|label| !label.is_empty())
}
