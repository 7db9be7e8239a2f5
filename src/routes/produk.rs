use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, State, multipart::MultipartRejection},
    http::StatusCode,
    routing::get,
};

use crate::{
    dto::produk::{ProdukCreated, ProdukForm, ProdukInput, ProdukUpdated, initial_stock},
    error::{AppError, AppResult},
    middleware::{
        auth::AuthUser,
        extract::{IdPath, RequestOrigin},
    },
    models::Produk,
    response::{ApiResponse, MessageResponse},
    services::produk_service,
    state::AppState,
    upload::{MultipartForm, read_form},
};

/// Whole-request ceiling for product forms. A body cut off here is reported
/// the same way as an oversized photo.
pub const PRODUK_BODY_LIMIT: usize = 8 * 1024 * 1024;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_produk).post(create_produk))
        .route(
            "/{id}",
            get(get_produk).put(update_produk).delete(delete_produk),
        )
        .layer(DefaultBodyLimit::max(PRODUK_BODY_LIMIT))
}

async fn parse_form(multipart: Result<Multipart, MultipartRejection>) -> AppResult<MultipartForm> {
    let multipart = multipart.map_err(|e| AppError::BadRequest(e.body_text()))?;
    read_form(multipart).await
}

#[utoipa::path(
    get,
    path = "/api/produk",
    responses(
        (status = 200, description = "List produk dengan URL foto", body = Vec<Produk>),
        (status = 401, description = "Token tidak valid", body = MessageResponse)
    ),
    tag = "Produk"
)]
pub async fn list_produk(
    _user: AuthUser,
    State(state): State<AppState>,
    RequestOrigin(origin): RequestOrigin,
) -> AppResult<Json<Vec<Produk>>> {
    Ok(Json(produk_service::list_produk(&state, &origin).await?))
}

#[utoipa::path(
    get,
    path = "/api/produk/{id}",
    params(("id" = i32, Path, description = "ID produk")),
    responses(
        (status = 200, description = "Detail produk dengan URL foto", body = Produk),
        (status = 404, description = "Produk tidak ditemukan", body = MessageResponse)
    ),
    tag = "Produk"
)]
pub async fn get_produk(
    _user: AuthUser,
    State(state): State<AppState>,
    RequestOrigin(origin): RequestOrigin,
    IdPath(id): IdPath,
) -> AppResult<Json<Produk>> {
    Ok(Json(produk_service::get_produk(&state, &origin, id).await?))
}

#[utoipa::path(
    post,
    path = "/api/produk",
    request_body(content = ProdukForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Produk berhasil ditambahkan", body = ApiResponse<ProdukCreated>),
        (status = 400, description = "Input atau file tidak valid", body = MessageResponse)
    ),
    tag = "Produk"
)]
pub async fn create_produk(
    _user: AuthUser,
    State(state): State<AppState>,
    RequestOrigin(origin): RequestOrigin,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<(StatusCode, Json<ApiResponse<ProdukCreated>>)> {
    let form = parse_form(multipart).await?;
    if form.image.is_none() {
        return Err(AppError::bad_request("Foto produk wajib diupload"));
    }
    let input = ProdukInput::from_form(&form)?;
    let jumlah_barang = initial_stock(&form)?;

    let resp =
        produk_service::create_produk(&state, &origin, input, jumlah_barang, form.image).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/produk/{id}",
    params(("id" = i32, Path, description = "ID produk")),
    request_body(content = ProdukForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Produk berhasil diupdate", body = ApiResponse<ProdukUpdated>),
        (status = 400, description = "Input atau file tidak valid", body = MessageResponse),
        (status = 404, description = "Produk tidak ditemukan", body = MessageResponse)
    ),
    tag = "Produk"
)]
pub async fn update_produk(
    _user: AuthUser,
    State(state): State<AppState>,
    RequestOrigin(origin): RequestOrigin,
    IdPath(id): IdPath,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Json<ApiResponse<ProdukUpdated>>> {
    let form = parse_form(multipart).await?;
    let input = ProdukInput::from_form(&form)?;

    let resp = produk_service::update_produk(&state, &origin, id, input, form.image).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/produk/{id}",
    params(("id" = i32, Path, description = "ID produk")),
    responses(
        (status = 200, description = "Produk berhasil dihapus", body = MessageResponse),
        (status = 404, description = "Produk tidak ditemukan", body = MessageResponse)
    ),
    tag = "Produk"
)]
pub async fn delete_produk(
    _user: AuthUser,
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<Json<MessageResponse>> {
    Ok(Json(produk_service::delete_produk(&state, id).await?))
}
