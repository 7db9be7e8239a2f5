use axum::{Json, Router, extract::State, http::StatusCode, routing::get};

use crate::{
    dto::stok::{StokCreated, StokRequest},
    error::AppResult,
    middleware::{
        auth::AuthUser,
        extract::{AppJson, IdPath},
    },
    models::Stok,
    response::{ApiResponse, MessageResponse},
    services::stok_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_stok).post(create_stok))
        .route("/{id}", get(get_stok).put(update_stok).delete(delete_stok))
}

#[utoipa::path(
    get,
    path = "/api/stok",
    responses(
        (status = 200, description = "List stok beserta nama produk", body = Vec<Stok>),
        (status = 401, description = "Token tidak valid", body = MessageResponse)
    ),
    tag = "Stok"
)]
pub async fn list_stok(
    _user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Stok>>> {
    Ok(Json(stok_service::list_stok(&state).await?))
}

#[utoipa::path(
    get,
    path = "/api/stok/{id}",
    params(("id" = i32, Path, description = "ID stok")),
    responses(
        (status = 200, description = "Detail stok", body = Stok),
        (status = 404, description = "Stok tidak ditemukan", body = MessageResponse)
    ),
    tag = "Stok"
)]
pub async fn get_stok(
    _user: AuthUser,
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<Json<Stok>> {
    Ok(Json(stok_service::get_stok(&state, id).await?))
}

#[utoipa::path(
    post,
    path = "/api/stok",
    request_body = StokRequest,
    responses(
        (status = 201, description = "Stok berhasil ditambahkan", body = ApiResponse<StokCreated>),
        (status = 400, description = "Input tidak valid", body = MessageResponse)
    ),
    tag = "Stok"
)]
pub async fn create_stok(
    _user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<StokRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<StokCreated>>)> {
    let resp = stok_service::create_stok(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/stok/{id}",
    params(("id" = i32, Path, description = "ID stok")),
    request_body = StokRequest,
    responses(
        (status = 200, description = "Stok berhasil diupdate", body = MessageResponse),
        (status = 404, description = "Stok tidak ditemukan", body = MessageResponse)
    ),
    tag = "Stok"
)]
pub async fn update_stok(
    _user: AuthUser,
    State(state): State<AppState>,
    IdPath(id): IdPath,
    AppJson(payload): AppJson<StokRequest>,
) -> AppResult<Json<MessageResponse>> {
    Ok(Json(stok_service::update_stok(&state, id, payload).await?))
}

#[utoipa::path(
    delete,
    path = "/api/stok/{id}",
    params(("id" = i32, Path, description = "ID stok")),
    responses(
        (status = 200, description = "Stok berhasil dihapus", body = MessageResponse),
        (status = 404, description = "Stok tidak ditemukan", body = MessageResponse)
    ),
    tag = "Stok"
)]
pub async fn delete_stok(
    _user: AuthUser,
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<Json<MessageResponse>> {
    Ok(Json(stok_service::delete_stok(&state, id).await?))
}
