//! First-run super admin provisioning.
//!
//! A fresh database has no users, so nobody could log in to create one.
//! When `ADMIN_EMAIL` and `ADMIN_PASSWORD` are set, startup creates a super
//! admin with those credentials unless that email is already registered.

use hrdesk_core::error::CoreError;
use hrdesk_core::roles::ROLE_SUPER_ADMIN;
use hrdesk_db::models::user::{CreateUser, UserResponse};
use hrdesk_db::repositories::UserRepo;
use hrdesk_db::DbPool;
use validator::Validate;

use crate::auth::password::{hash_password, validate_password_strength, MIN_PASSWORD_LENGTH};
use crate::error::{AppError, AppResult};

/// Credentials for the bootstrap super admin.
#[derive(Debug, Clone, Validate)]
pub struct AdminSeed {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    pub password: String,
    pub name: String,
}

impl AdminSeed {
    /// Read the seed from `ADMIN_EMAIL`, `ADMIN_PASSWORD` and `ADMIN_NAME`
    /// (default `Administrator`). Returns `None` unless both email and
    /// password are set and non-empty.
    pub fn from_env() -> Option<Self> {
        let email = std::env::var("ADMIN_EMAIL").ok().filter(|v| !v.trim().is_empty())?;
        let password = std::env::var("ADMIN_PASSWORD").ok().filter(|v| !v.is_empty())?;
        let name = std::env::var("ADMIN_NAME").unwrap_or_else(|_| "Administrator".into());
        Some(Self {
            email,
            password,
            name,
        })
    }
}

/// Create the seed super admin if no user with that email exists yet.
///
/// Returns the created account, or `None` when it was already present.
pub async fn ensure_admin(pool: &DbPool, seed: &AdminSeed) -> AppResult<Option<UserResponse>> {
    seed.validate()?;
    validate_password_strength(&seed.password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    if UserRepo::find_by_email(pool, &seed.email).await?.is_some() {
        return Ok(None);
    }

    let password_hash = hash_password(&seed.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    let user = UserRepo::create(
        pool,
        &CreateUser {
            name: seed.name.clone(),
            email: seed.email.clone(),
            password_hash,
            role: ROLE_SUPER_ADMIN.to_string(),
        },
    )
    .await?;

    Ok(Some(UserResponse::from(user)))
}
