use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use password_hash::rand_core::OsRng;
use sea_orm::{ActiveModelTrait, ActiveValue::NotSet, Set};

use crate::{
    dto::auth::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse},
    entity::users::ActiveModel as UserActive,
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::User,
    response::{ApiResponse, MessageResponse},
    services::required,
    state::AppState,
};

const EMAIL_TAKEN: &str = "Email sudah terdaftar";
const INVALID_CREDENTIALS: &str = "Email atau password salah";

pub async fn register_user(
    state: &AppState,
    payload: RegisterRequest,
) -> AppResult<ApiResponse<RegisterResponse>> {
    let nama_user = required(&payload.nama_user, "nama_user")?;
    let email = required(&payload.email, "email")?;
    if payload.password.is_empty() {
        return Err(AppError::bad_request("password wajib diisi"));
    }

    let exist: Option<(i32,)> = sqlx::query_as("SELECT id_user FROM tbl_user WHERE email = $1")
        .bind(email.as_str())
        .fetch_optional(&state.pool)
        .await?;

    if exist.is_some() {
        return Err(AppError::Conflict(EMAIL_TAKEN.to_string()));
    }

    let password_hash = hash_password(&payload.password)?;

    let user = UserActive {
        id_user: NotSet,
        nama_user: Set(nama_user),
        email: Set(email),
        password: Set(password_hash),
    }
    .insert(&state.orm)
    .await
    .map_err(|err| match AppError::from(err) {
        // Lost a race with a concurrent registration.
        err if err.is_unique_violation() => AppError::Conflict(EMAIL_TAKEN.to_string()),
        err => err,
    })?;

    tracing::info!(id_user = user.id_user, "user registered");

    Ok(ApiResponse::success(
        "User berhasil didaftarkan",
        RegisterResponse {
            id_user: user.id_user,
        },
    ))
}

pub async fn login_user(
    state: &AppState,
    payload: LoginRequest,
) -> AppResult<ApiResponse<LoginResponse>> {
    let LoginRequest { email, password } = payload;
    let user: Option<User> = sqlx::query_as::<_, User>("SELECT * FROM tbl_user WHERE email = $1")
        .bind(email.trim())
        .fetch_optional(&state.pool)
        .await?;

    let user = match user {
        Some(u) => u,
        None => return Err(AppError::unauthorized(INVALID_CREDENTIALS)),
    };

    if !verify_password(&password, &user.password)? {
        return Err(AppError::unauthorized(INVALID_CREDENTIALS));
    }

    let token = state.tokens.issue(user.id_user, &user.email)?;

    tracing::info!(id_user = user.id_user, "user logged in");

    Ok(ApiResponse::success(
        "Login berhasil",
        LoginResponse {
            token,
            user: user.into(),
        },
    ))
}

/// Tokens are stateless, so there is nothing to revoke server-side.
pub fn logout_user(user: &AuthUser) -> MessageResponse {
    tracing::info!(id_user = user.id_user, "user logged out");
    MessageResponse::new("Logout berhasil")
}

pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?
        .to_string();
    Ok(hash)
}

pub fn verify_password(password: &str, stored_hash: &str) -> AppResult<bool> {
    let parsed_hash = PasswordHash::new(stored_hash)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("Invalid password hash")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
