use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct KategoriRequest {
    #[schema(example = "Minuman")]
    pub nama_kategori: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct KategoriCreated {
    pub id_kategori: i32,
}
