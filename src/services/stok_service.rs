use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, EntityTrait, QueryFilter, Set,
    sea_query::Expr,
};

use crate::{
    dto::stok::{StokCreated, StokRequest},
    entity::stok::{ActiveModel, Column, Entity as StokEntity},
    error::{AppError, AppResult},
    models::Stok,
    response::{ApiResponse, MessageResponse},
    state::AppState,
};

const NOT_FOUND: &str = "Stok tidak ditemukan";

const SELECT_STOK: &str = r#"
    SELECT s.id_stok, s.id_produk, s.jumlah_barang, s.tgl_update,
           p.nama_produk, p.kode_produk
    FROM tbl_stok s
    LEFT JOIN tbl_produk p ON s.id_produk = p.id_produk
"#;

pub async fn list_stok(state: &AppState) -> AppResult<Vec<Stok>> {
    let items = sqlx::query_as::<_, Stok>(&format!("{SELECT_STOK} ORDER BY s.id_stok"))
        .fetch_all(&state.pool)
        .await?;
    Ok(items)
}

pub async fn get_stok(state: &AppState, id: i32) -> AppResult<Stok> {
    sqlx::query_as::<_, Stok>(&format!("{SELECT_STOK} WHERE s.id_stok = $1"))
        .bind(id)
        .fetch_optional(&state.pool)
        .await?
        .ok_or_else(|| AppError::not_found(NOT_FOUND))
}

pub async fn create_stok(
    state: &AppState,
    payload: StokRequest,
) -> AppResult<ApiResponse<StokCreated>> {
    validate_quantity(payload.jumlah_barang)?;

    let stok = ActiveModel {
        id_stok: NotSet,
        id_produk: Set(payload.id_produk),
        jumlah_barang: Set(payload.jumlah_barang),
        tgl_update: Set(Utc::now().date_naive()),
    }
    .insert(&state.orm)
    .await?;

    tracing::debug!(id_stok = stok.id_stok, id_produk = stok.id_produk, "stok created");

    Ok(ApiResponse::success(
        "Stok berhasil ditambahkan",
        StokCreated {
            id_stok: stok.id_stok,
        },
    ))
}

pub async fn update_stok(
    state: &AppState,
    id: i32,
    payload: StokRequest,
) -> AppResult<MessageResponse> {
    validate_quantity(payload.jumlah_barang)?;

    let result = StokEntity::update_many()
        .col_expr(Column::IdProduk, Expr::value(payload.id_produk))
        .col_expr(Column::JumlahBarang, Expr::value(payload.jumlah_barang))
        .col_expr(Column::TglUpdate, Expr::value(Utc::now().date_naive()))
        .filter(Column::IdStok.eq(id))
        .exec(&state.orm)
        .await?;

    if result.rows_affected == 0 {
        return Err(AppError::not_found(NOT_FOUND));
    }

    Ok(MessageResponse::new("Stok berhasil diupdate"))
}

pub async fn delete_stok(state: &AppState, id: i32) -> AppResult<MessageResponse> {
    let result = StokEntity::delete_by_id(id).exec(&state.orm).await?;

    if result.rows_affected == 0 {
        return Err(AppError::not_found(NOT_FOUND));
    }

    Ok(MessageResponse::new("Stok berhasil dihapus"))
}

fn validate_quantity(jumlah_barang: i32) -> AppResult<()> {
    if jumlah_barang < 0 {
        return Err(AppError::bad_request(
            "jumlah_barang tidak boleh negatif",
        ));
    }
    Ok(())
}
