use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Full user row. The password hash never leaves the service.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct User {
    pub id_user: i32,
    pub nama_user: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PublicUser {
    pub id_user: i32,
    pub nama_user: String,
    pub email: String,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id_user: user.id_user,
            nama_user: user.nama_user,
            email: user.email,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Kategori {
    pub id_kategori: i32,
    pub nama_kategori: String,
}

/// Product row joined with its category name.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct Produk {
    pub id_produk: i32,
    pub id_kategori: Option<i32>,
    pub nama_produk: String,
    pub kode_produk: String,
    pub foto_produk: Option<String>,
    pub tgl_register: NaiveDate,
    pub nama_kategori: Option<String>,
    #[sqlx(skip)]
    pub foto_url: Option<String>,
}

/// Stock row joined with the product it counts.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct Stok {
    pub id_stok: i32,
    pub id_produk: i32,
    pub jumlah_barang: i32,
    pub tgl_update: NaiveDate,
    pub nama_produk: Option<String>,
    pub kode_produk: Option<String>,
}
