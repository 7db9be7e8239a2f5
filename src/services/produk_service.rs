use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, Set, TransactionTrait, sea_query::Expr,
};

use crate::{
    dto::produk::{ProdukCreated, ProdukInput, ProdukUpdated},
    entity::{
        produk::{ActiveModel as ProdukActive, Column, Entity as ProdukEntity},
        stok::{ActiveModel as StokActive, Column as StokColumn, Entity as StokEntity},
    },
    error::{AppError, AppResult},
    models::Produk,
    response::{ApiResponse, MessageResponse},
    state::AppState,
    upload::{UploadedImage, foto_url},
};

const NOT_FOUND: &str = "Produk tidak ditemukan";

const SELECT_PRODUK: &str = r#"
    SELECT p.id_produk, p.id_kategori, p.nama_produk, p.kode_produk,
           p.foto_produk, p.tgl_register, k.nama_kategori
    FROM tbl_produk p
    LEFT JOIN tbl_kategori k ON p.id_kategori = k.id_kategori
"#;

pub async fn list_produk(state: &AppState, origin: &str) -> AppResult<Vec<Produk>> {
    let items = sqlx::query_as::<_, Produk>(&format!("{SELECT_PRODUK} ORDER BY p.id_produk"))
        .fetch_all(&state.pool)
        .await?
        .into_iter()
        .map(|produk| with_foto_url(produk, origin))
        .collect();
    Ok(items)
}

pub async fn get_produk(state: &AppState, origin: &str, id: i32) -> AppResult<Produk> {
    sqlx::query_as::<_, Produk>(&format!("{SELECT_PRODUK} WHERE p.id_produk = $1"))
        .bind(id)
        .fetch_optional(&state.pool)
        .await?
        .map(|produk| with_foto_url(produk, origin))
        .ok_or_else(|| AppError::not_found(NOT_FOUND))
}

/// Store the photo, then insert the product and its optional initial stock in
/// one transaction. The photo is removed again if the insert fails.
pub async fn create_produk(
    state: &AppState,
    origin: &str,
    input: ProdukInput,
    jumlah_barang: Option<i32>,
    image: Option<UploadedImage>,
) -> AppResult<ApiResponse<ProdukCreated>> {
    let image = image.ok_or_else(|| AppError::bad_request("Foto produk wajib diupload"))?;
    let foto_produk = state.uploads.save(&image).await?;
    let today = Utc::now().date_naive();

    let id_produk = match insert_with_stok(&state.orm, input, &foto_produk, jumlah_barang, today)
        .await
    {
        Ok(id) => id,
        Err(err) => {
            state.uploads.remove(&foto_produk).await;
            return Err(err);
        }
    };

    tracing::info!(id_produk, foto = %foto_produk, "produk created");

    Ok(ApiResponse::success(
        "Produk berhasil ditambahkan",
        ProdukCreated {
            id_produk,
            foto_url: foto_url(origin, Some(&foto_produk)),
        },
    ))
}

async fn insert_with_stok(
    orm: &DatabaseConnection,
    input: ProdukInput,
    foto_produk: &str,
    jumlah_barang: Option<i32>,
    today: NaiveDate,
) -> AppResult<i32> {
    let txn = orm.begin().await?;

    let produk = ProdukActive {
        id_produk: NotSet,
        id_kategori: Set(input.id_kategori),
        nama_produk: Set(input.nama_produk),
        kode_produk: Set(input.kode_produk),
        foto_produk: Set(Some(foto_produk.to_string())),
        tgl_register: Set(today),
    }
    .insert(&txn)
    .await?;

    if let Some(jumlah_barang) = jumlah_barang {
        StokActive {
            id_stok: NotSet,
            id_produk: Set(produk.id_produk),
            jumlah_barang: Set(jumlah_barang),
            tgl_update: Set(today),
        }
        .insert(&txn)
        .await?;
    }

    txn.commit().await?;
    Ok(produk.id_produk)
}

/// Full-row update. The stored photo is only replaced when a new one is sent;
/// the replaced file is removed once the row points at the new one.
pub async fn update_produk(
    state: &AppState,
    origin: &str,
    id: i32,
    input: ProdukInput,
    image: Option<UploadedImage>,
) -> AppResult<ApiResponse<ProdukUpdated>> {
    let existing = ProdukEntity::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::not_found(NOT_FOUND))?;

    let new_foto = match &image {
        Some(image) => Some(state.uploads.save(image).await?),
        None => None,
    };

    let mut update = ProdukEntity::update_many()
        .col_expr(Column::IdKategori, Expr::value(input.id_kategori))
        .col_expr(Column::NamaProduk, Expr::value(input.nama_produk))
        .col_expr(Column::KodeProduk, Expr::value(input.kode_produk));
    if let Some(foto) = &new_foto {
        update = update.col_expr(Column::FotoProduk, Expr::value(foto.clone()));
    }

    let outcome = update
        .filter(Column::IdProduk.eq(id))
        .exec(&state.orm)
        .await
        .map_err(AppError::from)
        .and_then(|result| match result.rows_affected {
            0 => Err(AppError::not_found(NOT_FOUND)),
            _ => Ok(()),
        });

    if let Err(err) = outcome {
        if let Some(foto) = &new_foto {
            state.uploads.remove(foto).await;
        }
        return Err(err);
    }

    if let (Some(new), Some(old)) = (&new_foto, &existing.foto_produk) {
        if new != old {
            state.uploads.remove(old).await;
        }
    }

    Ok(ApiResponse::success(
        "Produk berhasil diupdate",
        ProdukUpdated {
            foto_url: foto_url(origin, new_foto.as_deref()),
        },
    ))
}

/// Deletes the product together with its stock rows, then its photo file.
pub async fn delete_produk(state: &AppState, id: i32) -> AppResult<MessageResponse> {
    let txn = state.orm.begin().await?;

    let existing = ProdukEntity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::not_found(NOT_FOUND))?;

    let stok_removed = StokEntity::delete_many()
        .filter(StokColumn::IdProduk.eq(id))
        .exec(&txn)
        .await?
        .rows_affected;

    let result = ProdukEntity::delete_by_id(id).exec(&txn).await?;
    if result.rows_affected == 0 {
        return Err(AppError::not_found(NOT_FOUND));
    }

    txn.commit().await?;

    if let Some(foto) = &existing.foto_produk {
        state.uploads.remove(foto).await;
    }

    tracing::info!(id_produk = id, stok_removed, "produk deleted");

    Ok(MessageResponse::new("Produk berhasil dihapus"))
}

fn with_foto_url(mut produk: Produk, origin: &str) -> Produk {
    produk.foto_url = foto_url(origin, produk.foto_produk.as_deref());
    produk
}
