use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::PublicUser;

#[derive(Deserialize, Debug, ToSchema)]
pub struct RegisterRequest {
    #[schema(example = "Eureka")]
    pub nama_user: String,
    #[schema(example = "eureka@example.com")]
    pub email: String,
    #[schema(example = "eur@2026")]
    pub password: String,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "eureka@example.com")]
    pub email: String,
    #[schema(example = "eur@2026")]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RegisterResponse {
    pub id_user: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub user: PublicUser,
}

/// Claims carried by the bearer token.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct Claims {
    pub id_user: i32,
    pub email: String,
    pub iat: usize,
    pub exp: usize,
}
