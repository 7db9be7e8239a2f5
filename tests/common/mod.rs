#![allow(dead_code)]

use std::path::Path;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use inventory_api::{
    config::AppConfig,
    routes::{create_app, create_service},
    state::AppState,
};
use serde_json::Value;
use sqlx::postgres::{PgPool, PgPoolOptions};
use tower::ServiceExt;

pub const SECRET: &str = "inventory-test-secret";
pub const BOUNDARY: &str = "inventory-test-boundary";
/// Nothing listens here; used where a request must never reach the database.
pub const UNREACHABLE_DB: &str = "postgres://inventory@127.0.0.1:1/inventory";

pub fn config(database_url: &str, upload_dir: &Path) -> AppConfig {
    AppConfig::from_lookup(|key| match key {
        "DATABASE_URL" => Some(database_url.to_string()),
        "JWT_SECRET" => Some(SECRET.to_string()),
        "UPLOAD_DIR" => Some(upload_dir.display().to_string()),
        _ => None,
    })
    .expect("test config")
}

/// App over a pool that never connects until a query runs.
pub fn offline_app(upload_dir: &Path) -> (Router, AppState) {
    let config = config(UNREACHABLE_DB, upload_dir);
    let pool = PgPoolOptions::new()
        .connect_lazy(UNREACHABLE_DB)
        .expect("lazy pool");
    let state = AppState::new(&config, pool);
    (create_app(state.clone()), state)
}

/// Same as `offline_app`, but with the layers the server binary runs.
pub fn offline_service(upload_dir: &Path) -> (Router, AppState) {
    let (_, state) = offline_app(upload_dir);
    (create_service(state.clone()), state)
}

pub fn app_with_pool(pool: PgPool, database_url: &str, upload_dir: &Path) -> (Router, AppState) {
    let config = config(database_url, upload_dir);
    let state = AppState::new(&config, pool);
    (create_app(state.clone()), state)
}

pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

pub async fn send(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app.clone().oneshot(request).await.expect("router is infallible");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body");
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    TestResponse { status, body }
}

pub fn json_request(method: Method, uri: &str, token: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::HOST, "localhost:3000")
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder
        .body(Body::from(serde_json::to_vec(body).expect("json body")))
        .expect("request")
}

pub fn empty_request(method: Method, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::HOST, "localhost:3000");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).expect("request")
}

pub enum Part<'a> {
    Text(&'a str, &'a str),
    File {
        name: &'a str,
        filename: &'a str,
        content_type: &'a str,
        bytes: &'a [u8],
    },
}

pub fn multipart_request(
    method: Method,
    uri: &str,
    token: Option<&str>,
    parts: &[Part<'_>],
) -> Request<Body> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n")
                        .as_bytes(),
                );
            }
            Part::File {
                name,
                filename,
                content_type,
                bytes,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(bytes);
                body.extend_from_slice(b"\r\n");
            }
        }
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::HOST, "localhost:3000")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .header(header::CONTENT_LENGTH, body.len());
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body)).expect("request")
}

/// Smallest valid PNG signature plus some filler; content is never decoded.
pub const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\n-inventory-test-image";

pub fn png(filename: &str) -> Part<'_> {
    Part::File {
        name: "foto_produk",
        filename,
        content_type: "image/png",
        bytes: PNG_BYTES,
    }
}

pub fn files_in(dir: &Path) -> Vec<String> {
    match std::fs::read_dir(dir) {
        Ok(entries) => entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect(),
        Err(_) => Vec::new(),
    }
}
