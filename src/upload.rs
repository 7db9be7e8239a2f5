//! Product photo uploads: multipart parsing, image checks and on-disk storage.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use axum::{
    extract::multipart::{Field, Multipart, MultipartError},
    http::StatusCode,
};
use chrono::Utc;
use rand::Rng;

use crate::error::{AppError, AppResult};

/// Multipart field that carries the product photo.
pub const FOTO_FIELD: &str = "foto_produk";
/// Largest accepted photo, in bytes.
pub const MAX_FILE_SIZE: usize = 5 * 1024 * 1024;
/// Public path the upload directory is served under.
pub const PUBLIC_PATH: &str = "/uploads";

const ALLOWED_TYPES: [&str; 4] = ["jpeg", "jpg", "png", "gif"];

pub const INVALID_TYPE_MESSAGE: &str = "Hanya file gambar yang diperbolehkan (jpeg, jpg, png, gif)";
pub const TOO_LARGE_MESSAGE: &str = "Ukuran file maksimal 5MB";

#[derive(Debug)]
pub struct UploadedImage {
    /// Lowercased extension without the leading dot.
    pub extension: String,
    pub bytes: Vec<u8>,
}

/// Text fields and the optional photo of a product form.
#[derive(Debug, Default)]
pub struct MultipartForm {
    pub fields: HashMap<String, String>,
    pub image: Option<UploadedImage>,
}

impl MultipartForm {
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

/// Drain a multipart body. The photo is validated while it is read so a
/// bad upload never reaches the disk.
pub async fn read_form(mut multipart: Multipart) -> AppResult<MultipartForm> {
    let mut form = MultipartForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| form_error(e, "Form tidak valid"))?
    {
        let name = field.name().unwrap_or_default().to_string();

        if field.file_name().is_some() {
            if name != FOTO_FIELD {
                return Err(AppError::bad_request(format!(
                    "Field file tidak dikenal: {name}"
                )));
            }
            if form.image.is_some() {
                return Err(AppError::bad_request("Hanya satu foto yang diperbolehkan"));
            }
            let extension = validate_image(
                field.file_name().unwrap_or_default(),
                field.content_type(),
            )?;
            let bytes = read_limited(field, MAX_FILE_SIZE).await?;
            form.image = Some(UploadedImage { extension, bytes });
        } else {
            let value = field
                .text()
                .await
                .map_err(|e| form_error(e, "Form tidak valid"))?;
            form.fields.insert(name, value);
        }
    }

    Ok(form)
}

async fn read_limited(mut field: Field<'_>, limit: usize) -> AppResult<Vec<u8>> {
    let mut bytes = Vec::new();
    while let Some(chunk) = field
        .chunk()
        .await
        .map_err(|e| form_error(e, "Gagal membaca file"))?
    {
        if bytes.len() + chunk.len() > limit {
            return Err(AppError::bad_request(TOO_LARGE_MESSAGE));
        }
        bytes.extend_from_slice(&chunk);
    }
    Ok(bytes)
}

/// A body cut off by the request size limit reads as an oversized photo.
fn form_error(err: MultipartError, context: &str) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::bad_request(TOO_LARGE_MESSAGE)
    } else {
        AppError::bad_request(format!("{context}: {err}"))
    }
}

/// Both the file extension and the declared content type must name an allowed
/// image type. Returns the lowercased extension.
pub fn validate_image(file_name: &str, content_type: Option<&str>) -> AppResult<String> {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .filter(|ext| ALLOWED_TYPES.contains(&ext.as_str()));

    let mime_ok = content_type
        .map(str::to_ascii_lowercase)
        .and_then(|mime| {
            mime.split(';')
                .next()
                .and_then(|essence| essence.trim().strip_prefix("image/"))
                .map(|subtype| ALLOWED_TYPES.contains(&subtype))
        })
        .unwrap_or(false);

    match extension {
        Some(ext) if mime_ok => Ok(ext),
        _ => Err(AppError::bad_request(INVALID_TYPE_MESSAGE)),
    }
}

/// `produk-<unix millis>-<random>.<ext>`
pub fn generate_filename(extension: &str) -> String {
    let suffix: u32 = rand::rng().random_range(0..1_000_000_000);
    format!(
        "produk-{}-{}.{}",
        Utc::now().timestamp_millis(),
        suffix,
        extension
    )
}

/// Absolute URL of a stored photo, or `None` when the product has none.
pub fn foto_url(origin: &str, filename: Option<&str>) -> Option<String> {
    filename
        .filter(|name| !name.is_empty())
        .map(|name| format!("{}{}/{}", origin.trim_end_matches('/'), PUBLIC_PATH, name))
}

/// Generated names are flat; anything else did not come from us.
fn is_stored_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('.')
        && !name.contains(['/', '\\', '\0'])
}

#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub async fn ensure_dir(&self) -> std::io::Result<()> {
        tokio::fs::create_dir_all(&self.dir).await
    }

    /// Write the image under a freshly generated name and return that name.
    pub async fn save(&self, image: &UploadedImage) -> AppResult<String> {
        self.ensure_dir().await?;
        let filename = generate_filename(&image.extension);
        tokio::fs::write(self.dir.join(&filename), &image.bytes).await?;
        tracing::debug!(file = %filename, size = image.bytes.len(), "photo stored");
        Ok(filename)
    }

    pub async fn exists(&self, filename: &str) -> bool {
        is_stored_name(filename) && tokio::fs::try_exists(self.dir.join(filename)).await.unwrap_or(false)
    }

    /// Best-effort removal; a leftover file is logged, never surfaced to the client.
    pub async fn remove(&self, filename: &str) {
        if !is_stored_name(filename) {
            tracing::warn!(file = %filename, "refusing to remove unexpected photo name");
            return;
        }
        if let Err(err) = tokio::fs::remove_file(self.dir.join(filename)).await {
            if err.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(file = %filename, error = %err, "photo removal failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_allowed_images() {
        assert_eq!(validate_image("kopi.JPG", Some("image/jpeg")).unwrap(), "jpg");
        assert_eq!(validate_image("kopi.jpeg", Some("image/jpeg")).unwrap(), "jpeg");
        assert_eq!(validate_image("logo.png", Some("image/png")).unwrap(), "png");
        assert_eq!(validate_image("anim.gif", Some("image/gif; charset=binary")).unwrap(), "gif");
    }

    #[test]
    fn rejects_when_either_check_fails() {
        for (name, mime) in [
            ("notes.txt", Some("text/plain")),
            ("notes.txt", Some("image/png")),
            ("photo.png", Some("text/plain")),
            ("photo.png", Some("application/octet-stream")),
            ("photo.png", None),
            ("photo", Some("image/png")),
            ("photo.webp", Some("image/webp")),
        ] {
            let err = validate_image(name, mime).unwrap_err();
            assert_eq!(err.to_string(), INVALID_TYPE_MESSAGE, "{name} {mime:?}");
        }
    }

    #[test]
    fn generated_names_are_unique_and_keep_the_extension() {
        let a = generate_filename("png");
        let b = generate_filename("png");
        assert!(a.starts_with("produk-"));
        assert!(a.ends_with(".png"));
        assert!(is_stored_name(&a));
        assert_ne!(a, b);
    }

    #[test]
    fn foto_url_joins_origin_and_public_path() {
        assert_eq!(
            foto_url("http://localhost:3000", Some("produk-1-2.png")).as_deref(),
            Some("http://localhost:3000/uploads/produk-1-2.png")
        );
        assert_eq!(
            foto_url("https://shop.example/", Some("a.gif")).as_deref(),
            Some("https://shop.example/uploads/a.gif")
        );
        assert_eq!(foto_url("http://localhost", None), None);
        assert_eq!(foto_url("http://localhost", Some("")), None);
    }

    #[test]
    fn stored_names_must_be_flat() {
        assert!(!is_stored_name("../etc/passwd"));
        assert!(!is_stored_name("a/b.png"));
        assert!(!is_stored_name(".hidden"));
        assert!(!is_stored_name(""));
    }

    #[tokio::test]
    async fn save_and_remove_round_trip_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path().join("uploads"));
        let image = UploadedImage {
            extension: "png".into(),
            bytes: vec![0x89, b'P', b'N', b'G'],
        };

        let name = store.save(&image).await.unwrap();
        assert!(store.exists(&name).await);
        assert_eq!(
            tokio::fs::read(store.dir().join(&name)).await.unwrap(),
            image.bytes
        );

        store.remove(&name).await;
        assert!(!store.exists(&name).await);
        // Removing twice is silent.
        store.remove(&name).await;
    }
}
