use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set,
    sea_query::Expr,
};

use crate::{
    dto::kategori::{KategoriCreated, KategoriRequest},
    entity::kategori::{ActiveModel, Column, Entity as KategoriEntity, Model as KategoriModel},
    error::{AppError, AppResult},
    models::Kategori,
    response::{ApiResponse, MessageResponse},
    services::required,
    state::AppState,
};

const NOT_FOUND: &str = "Kategori tidak ditemukan";

pub async fn list_kategori(state: &AppState) -> AppResult<Vec<Kategori>> {
    let items = KategoriEntity::find()
        .order_by_asc(Column::IdKategori)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(kategori_from_entity)
        .collect();
    Ok(items)
}

pub async fn get_kategori(state: &AppState, id: i32) -> AppResult<Kategori> {
    KategoriEntity::find_by_id(id)
        .one(&state.orm)
        .await?
        .map(kategori_from_entity)
        .ok_or_else(|| AppError::not_found(NOT_FOUND))
}

pub async fn create_kategori(
    state: &AppState,
    payload: KategoriRequest,
) -> AppResult<ApiResponse<KategoriCreated>> {
    let nama_kategori = required(&payload.nama_kategori, "nama_kategori")?;
    let kategori = ActiveModel {
        id_kategori: NotSet,
        nama_kategori: Set(nama_kategori),
    }
    .insert(&state.orm)
    .await?;

    tracing::debug!(id_kategori = kategori.id_kategori, "kategori created");

    Ok(ApiResponse::success(
        "Kategori berhasil ditambahkan",
        KategoriCreated {
            id_kategori: kategori.id_kategori,
        },
    ))
}

pub async fn update_kategori(
    state: &AppState,
    id: i32,
    payload: KategoriRequest,
) -> AppResult<MessageResponse> {
    let nama_kategori = required(&payload.nama_kategori, "nama_kategori")?;
    let result = KategoriEntity::update_many()
        .col_expr(Column::NamaKategori, Expr::value(nama_kategori))
        .filter(Column::IdKategori.eq(id))
        .exec(&state.orm)
        .await?;

    if result.rows_affected == 0 {
        return Err(AppError::not_found(NOT_FOUND));
    }

    Ok(MessageResponse::new("Kategori berhasil diupdate"))
}

/// Products in the category keep existing with `id_kategori` cleared by the store.
pub async fn delete_kategori(state: &AppState, id: i32) -> AppResult<MessageResponse> {
    let result = KategoriEntity::delete_by_id(id).exec(&state.orm).await?;

    if result.rows_affected == 0 {
        return Err(AppError::not_found(NOT_FOUND));
    }

    Ok(MessageResponse::new("Kategori berhasil dihapus"))
}

fn kategori_from_entity(model: KategoriModel) -> Kategori {
    Kategori {
        id_kategori: model.id_kategori,
        nama_kategori: model.nama_kategori,
    }
}
