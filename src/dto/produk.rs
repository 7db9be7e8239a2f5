use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    upload::MultipartForm,
};

/// Multipart body of `POST /api/produk` and `PUT /api/produk/{id}`. Only used
/// to describe the form in the API docs; handlers read the raw multipart stream.
#[allow(dead_code)]
#[derive(ToSchema)]
pub struct ProdukForm {
    /// Category id, may be left empty.
    pub id_kategori: Option<i32>,
    pub nama_produk: String,
    pub kode_produk: String,
    /// Initial stock quantity, create only.
    pub jumlah_barang: Option<i32>,
    /// jpeg, jpg, png or gif, at most 5MB. Required on create.
    #[schema(value_type = Option<String>, format = Binary)]
    pub foto_produk: Option<Vec<u8>>,
}

/// Validated text fields of a product form.
#[derive(Debug, Clone, PartialEq)]
pub struct ProdukInput {
    pub id_kategori: Option<i32>,
    pub nama_produk: String,
    pub kode_produk: String,
}

impl ProdukInput {
    pub fn from_form(form: &MultipartForm) -> AppResult<Self> {
        let id_kategori = match form.text("id_kategori").map(str::trim) {
            None | Some("") | Some("null") => None,
            Some(raw) => Some(
                raw.parse::<i32>()
                    .map_err(|_| AppError::bad_request("id_kategori harus berupa angka"))?,
            ),
        };

        Ok(Self {
            id_kategori,
            nama_produk: required_text(form, "nama_produk")?,
            kode_produk: required_text(form, "kode_produk")?,
        })
    }
}

/// Optional initial stock quantity sent along with a new product.
pub fn initial_stock(form: &MultipartForm) -> AppResult<Option<i32>> {
    match form.text("jumlah_barang").map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => match raw.parse::<i32>() {
            Ok(qty) if qty >= 0 => Ok(Some(qty)),
            _ => Err(AppError::bad_request(
                "jumlah_barang harus berupa angka positif",
            )),
        },
    }
}

fn required_text(form: &MultipartForm, name: &str) -> AppResult<String> {
    form.text(name)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .ok_or_else(|| AppError::bad_request(format!("{name} wajib diisi")))
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProdukCreated {
    pub id_produk: i32,
    pub foto_url: Option<String>,
}

/// `foto_url` is only set when the update carried a new photo.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProdukUpdated {
    pub foto_url: Option<String>,
}
