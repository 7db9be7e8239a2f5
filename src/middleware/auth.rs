use axum::{extract::FromRequestParts, http::header, http::request::Parts};

use crate::{error::AppError, state::AppState};

/// Identity taken from a verified bearer token. Adding it as a handler
/// argument makes the route protected.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id_user: i32,
    pub email: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or_else(|| AppError::unauthorized("Token tidak ditemukan"))?;

        let auth_str = auth_header
            .to_str()
            .map_err(|_| AppError::unauthorized("Token tidak valid"))?;

        let token = auth_str
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| AppError::unauthorized("Format token tidak valid"))?;

        let claims = state.tokens.verify(token)?;

        Ok(AuthUser {
            id_user: claims.id_user,
            email: claims.email,
        })
    }
}
