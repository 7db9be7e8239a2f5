use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        auth::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse},
        kategori::{KategoriCreated, KategoriRequest},
        produk::{ProdukCreated, ProdukForm, ProdukUpdated},
        stok::{StokCreated, StokRequest},
    },
    models::{Kategori, Produk, PublicUser, Stok},
    response::{ApiResponse, MessageResponse},
    routes::{auth, health, kategori, produk, stok},
};

pub const DOCS_PATH: &str = "/api-docs";

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "API Inventory",
        description = "API untuk manajemen kategori, produk, dan stok"
    ),
    paths(
        health::index,
        health::health_check,
        auth::register,
        auth::login,
        auth::logout,
        kategori::list_kategori,
        kategori::get_kategori,
        kategori::create_kategori,
        kategori::update_kategori,
        kategori::delete_kategori,
        produk::list_produk,
        produk::get_produk,
        produk::create_produk,
        produk::update_produk,
        produk::delete_produk,
        stok::list_stok,
        stok::get_stok,
        stok::create_stok,
        stok::update_stok,
        stok::delete_stok
    ),
    components(
        schemas(
            PublicUser,
            Kategori,
            Produk,
            Stok,
            RegisterRequest,
            LoginRequest,
            KategoriRequest,
            StokRequest,
            ProdukForm,
            MessageResponse,
            ApiResponse<RegisterResponse>,
            ApiResponse<LoginResponse>,
            ApiResponse<KategoriCreated>,
            ApiResponse<ProdukCreated>,
            ApiResponse<ProdukUpdated>,
            ApiResponse<StokCreated>
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service status"),
        (name = "Auth", description = "Authentication endpoints"),
        (name = "Kategori", description = "Kategori management"),
        (name = "Produk", description = "Produk management"),
        (name = "Stok", description = "Stok management"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url(DOCS_PATH, ApiDoc::openapi())
}
