mod common;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use chrono::{Duration, Utc};
use inventory_api::{
    dto::auth::Claims, routes::produk::PRODUK_BODY_LIMIT, services::token_service::TokenKeys,
};
use serde_json::json;

use common::{
    Part, empty_request, files_in, json_request, multipart_request, offline_app, offline_service,
    png, send,
};

fn valid_token() -> String {
    TokenKeys::new(common::SECRET.as_bytes())
        .issue(1, "a@x.com")
        .expect("token")
}

#[tokio::test]
async fn protected_routes_require_a_token() {
    let dir = tempfile::tempdir().unwrap();
    let (app, _) = offline_app(dir.path());

    for (method, uri) in [
        (Method::GET, "/api/kategori"),
        (Method::GET, "/api/kategori/1"),
        (Method::DELETE, "/api/produk/1"),
        (Method::GET, "/api/stok"),
        (Method::POST, "/api/auth/logout"),
    ] {
        let res = send(&app, empty_request(method.clone(), uri, None)).await;
        assert_eq!(res.status, StatusCode::UNAUTHORIZED, "{method} {uri}");
        assert_eq!(res.body["message"], "Token tidak ditemukan");
    }
}

#[tokio::test]
async fn malformed_authorization_header_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let (app, _) = offline_app(dir.path());

    for value in ["Token abc", "Bearer", "Bearer ", "bearer abc", "Bearer not.a.jwt"] {
        let request = Request::builder()
            .uri("/api/kategori")
            .header(header::AUTHORIZATION, value)
            .body(Body::empty())
            .unwrap();
        let res = send(&app, request).await;
        assert_eq!(res.status, StatusCode::UNAUTHORIZED, "{value:?}");
        assert!(res.body["message"].is_string());
    }
}

#[tokio::test]
async fn token_signed_with_another_secret_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let (app, _) = offline_app(dir.path());
    let forged = TokenKeys::new(b"someone-else").issue(1, "a@x.com").unwrap();

    let res = send(&app, empty_request(Method::GET, "/api/produk", Some(&forged))).await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert_eq!(res.body["message"], "Token tidak valid");
}

#[tokio::test]
async fn expired_token_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let (app, _) = offline_app(dir.path());
    let issued = Utc::now() - Duration::hours(48);
    let expired = TokenKeys::new(common::SECRET.as_bytes())
        .sign(&Claims {
            id_user: 1,
            email: "a@x.com".into(),
            iat: issued.timestamp() as usize,
            exp: (issued + Duration::hours(24)).timestamp() as usize,
        })
        .unwrap();

    let res = send(&app, empty_request(Method::POST, "/api/auth/logout", Some(&expired))).await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn logout_with_valid_token_is_acknowledged() {
    let dir = tempfile::tempdir().unwrap();
    let (app, _) = offline_app(dir.path());

    let res = send(
        &app,
        empty_request(Method::POST, "/api/auth/logout", Some(&valid_token())),
    )
    .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, json!({ "message": "Logout berhasil" }));
}

#[tokio::test]
async fn non_numeric_id_is_a_bad_request() {
    let dir = tempfile::tempdir().unwrap();
    let (app, _) = offline_app(dir.path());

    let res = send(
        &app,
        empty_request(Method::GET, "/api/kategori/abc", Some(&valid_token())),
    )
    .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["message"], "ID tidak valid");
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let dir = tempfile::tempdir().unwrap();
    let (app, _) = offline_app(dir.path());

    let res = send(
        &app,
        json_request(
            Method::POST,
            "/api/kategori",
            Some(&valid_token()),
            &json!({ "nama": "missing field" }),
        ),
    )
    .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert!(res.body["message"].is_string());

    let res = send(
        &app,
        json_request(
            Method::POST,
            "/api/auth/register",
            None,
            &json!({ "email": "a@x.com" }),
        ),
    )
    .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn disallowed_upload_is_rejected_before_anything_is_stored() {
    let dir = tempfile::tempdir().unwrap();
    let (app, state) = offline_app(dir.path());

    let res = send(
        &app,
        multipart_request(
            Method::POST,
            "/api/produk",
            Some(&valid_token()),
            &[
                Part::Text("nama_produk", "Kopi"),
                Part::Text("kode_produk", "K-01"),
                Part::File {
                    name: "foto_produk",
                    filename: "notes.txt",
                    content_type: "text/plain",
                    bytes: b"hello",
                },
            ],
        ),
    )
    .await;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        res.body["message"],
        "Hanya file gambar yang diperbolehkan (jpeg, jpg, png, gif)"
    );
    assert!(files_in(state.uploads.dir()).is_empty());
}

#[tokio::test]
async fn image_with_spoofed_content_type_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let (app, _) = offline_app(dir.path());

    let res = send(
        &app,
        multipart_request(
            Method::POST,
            "/api/produk",
            Some(&valid_token()),
            &[
                Part::Text("nama_produk", "Kopi"),
                Part::Text("kode_produk", "K-01"),
                Part::File {
                    name: "foto_produk",
                    filename: "photo.png",
                    content_type: "application/x-msdownload",
                    bytes: b"MZ",
                },
            ],
        ),
    )
    .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn oversized_upload_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let (app, state) = offline_app(dir.path());
    let big = vec![0u8; 5 * 1024 * 1024 + 1];

    let res = send(
        &app,
        multipart_request(
            Method::POST,
            "/api/produk",
            Some(&valid_token()),
            &[
                Part::Text("nama_produk", "Kopi"),
                Part::Text("kode_produk", "K-01"),
                Part::File {
                    name: "foto_produk",
                    filename: "big.png",
                    content_type: "image/png",
                    bytes: &big,
                },
            ],
        ),
    )
    .await;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["message"], "Ukuran file maksimal 5MB");
    assert!(files_in(state.uploads.dir()).is_empty());
}

#[tokio::test]
async fn photo_beyond_request_limit_is_rejected_as_oversized() {
    let dir = tempfile::tempdir().unwrap();
    let (app, state) = offline_service(dir.path());
    let big = vec![0u8; PRODUK_BODY_LIMIT + 1024 * 1024];

    let res = send(
        &app,
        multipart_request(
            Method::POST,
            "/api/produk",
            Some(&valid_token()),
            &[
                Part::Text("nama_produk", "Kopi"),
                Part::Text("kode_produk", "K-01"),
                Part::File {
                    name: "foto_produk",
                    filename: "big.png",
                    content_type: "image/png",
                    bytes: &big,
                },
            ],
        ),
    )
    .await;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["message"], "Ukuran file maksimal 5MB");
    assert!(files_in(state.uploads.dir()).is_empty());
}

#[tokio::test]
async fn served_stack_tags_responses_with_a_request_id() {
    let dir = tempfile::tempdir().unwrap();
    let (app, _) = offline_service(dir.path());

    let response = tower::ServiceExt::oneshot(
        app,
        empty_request(Method::GET, "/api/kategori", None),
    )
    .await
    .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn create_without_photo_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let (app, _) = offline_app(dir.path());

    let res = send(
        &app,
        multipart_request(
            Method::POST,
            "/api/produk",
            Some(&valid_token()),
            &[
                Part::Text("nama_produk", "Kopi"),
                Part::Text("kode_produk", "K-01"),
            ],
        ),
    )
    .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["message"], "Foto produk wajib diupload");
}

#[tokio::test]
async fn second_photo_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let (app, _) = offline_app(dir.path());

    let res = send(
        &app,
        multipart_request(
            Method::POST,
            "/api/produk",
            Some(&valid_token()),
            &[
                Part::Text("nama_produk", "Kopi"),
                Part::Text("kode_produk", "K-01"),
                png("a.png"),
                png("b.png"),
            ],
        ),
    )
    .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn produk_form_must_be_multipart() {
    let dir = tempfile::tempdir().unwrap();
    let (app, _) = offline_app(dir.path());

    let res = send(
        &app,
        json_request(
            Method::PUT,
            "/api/produk/1",
            Some(&valid_token()),
            &json!({ "nama_produk": "Kopi" }),
        ),
    )
    .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert!(res.body["message"].is_string());
}

#[tokio::test]
async fn unknown_routes_return_json_404() {
    let dir = tempfile::tempdir().unwrap();
    let (app, _) = offline_app(dir.path());

    let res = send(&app, empty_request(Method::GET, "/api/pelanggan", None)).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.body, json!({ "message": "Endpoint tidak ditemukan" }));
}

#[tokio::test]
async fn banner_and_health_are_public() {
    let dir = tempfile::tempdir().unwrap();
    let (app, _) = offline_app(dir.path());

    let res = send(&app, empty_request(Method::GET, "/", None)).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["documentation"], "/api-docs");

    let res = send(&app, empty_request(Method::GET, "/health", None)).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["status"], "ok");
}

#[tokio::test]
async fn uploaded_photos_are_served_statically() {
    let dir = tempfile::tempdir().unwrap();
    let (app, state) = offline_app(dir.path());
    state.uploads.ensure_dir().await.unwrap();
    std::fs::write(state.uploads.dir().join("produk-1-1.png"), common::PNG_BYTES).unwrap();

    let response = tower::ServiceExt::oneshot(
        app.clone(),
        empty_request(Method::GET, "/uploads/produk-1-1.png", None),
    )
    .await
    .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], common::PNG_BYTES);
}
