use axum::{Json, Router, extract::State, http::StatusCode, routing::get};

use crate::{
    dto::kategori::{KategoriCreated, KategoriRequest},
    error::AppResult,
    middleware::{
        auth::AuthUser,
        extract::{AppJson, IdPath},
    },
    models::Kategori,
    response::{ApiResponse, MessageResponse},
    services::kategori_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_kategori).post(create_kategori))
        .route(
            "/{id}",
            get(get_kategori)
                .put(update_kategori)
                .delete(delete_kategori),
        )
}

#[utoipa::path(
    get,
    path = "/api/kategori",
    responses(
        (status = 200, description = "List kategori", body = Vec<Kategori>),
        (status = 401, description = "Token tidak valid", body = MessageResponse)
    ),
    tag = "Kategori"
)]
pub async fn list_kategori(
    _user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Kategori>>> {
    Ok(Json(kategori_service::list_kategori(&state).await?))
}

#[utoipa::path(
    get,
    path = "/api/kategori/{id}",
    params(("id" = i32, Path, description = "ID kategori")),
    responses(
        (status = 200, description = "Detail kategori", body = Kategori),
        (status = 404, description = "Kategori tidak ditemukan", body = MessageResponse)
    ),
    tag = "Kategori"
)]
pub async fn get_kategori(
    _user: AuthUser,
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<Json<Kategori>> {
    Ok(Json(kategori_service::get_kategori(&state, id).await?))
}

#[utoipa::path(
    post,
    path = "/api/kategori",
    request_body = KategoriRequest,
    responses(
        (status = 201, description = "Kategori berhasil ditambahkan", body = ApiResponse<KategoriCreated>),
        (status = 400, description = "Input tidak valid", body = MessageResponse)
    ),
    tag = "Kategori"
)]
pub async fn create_kategori(
    _user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<KategoriRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<KategoriCreated>>)> {
    let resp = kategori_service::create_kategori(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/kategori/{id}",
    params(("id" = i32, Path, description = "ID kategori")),
    request_body = KategoriRequest,
    responses(
        (status = 200, description = "Kategori berhasil diupdate", body = MessageResponse),
        (status = 404, description = "Kategori tidak ditemukan", body = MessageResponse)
    ),
    tag = "Kategori"
)]
pub async fn update_kategori(
    _user: AuthUser,
    State(state): State<AppState>,
    IdPath(id): IdPath,
    AppJson(payload): AppJson<KategoriRequest>,
) -> AppResult<Json<MessageResponse>> {
    Ok(Json(
        kategori_service::update_kategori(&state, id, payload).await?,
    ))
}

#[utoipa::path(
    delete,
    path = "/api/kategori/{id}",
    params(("id" = i32, Path, description = "ID kategori")),
    responses(
        (status = 200, description = "Kategori berhasil dihapus", body = MessageResponse),
        (status = 404, description = "Kategori tidak ditemukan", body = MessageResponse)
    ),
    tag = "Kategori"
)]
pub async fn delete_kategori(
    _user: AuthUser,
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<Json<MessageResponse>> {
    Ok(Json(kategori_service::delete_kategori(&state, id).await?))
}
