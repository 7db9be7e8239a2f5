pub mod auth_service;
pub mod kategori_service;
pub mod produk_service;
pub mod stok_service;
pub mod token_service;

use crate::error::{AppError, AppResult};

/// Trimmed value of a required text input, or a 400 naming the field.
pub(crate) fn required(value: &str, field: &str) -> AppResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::bad_request(format!("{field} wajib diisi")));
    }
    Ok(value.to_string())
}
