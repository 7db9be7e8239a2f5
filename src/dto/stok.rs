use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct StokRequest {
    pub id_produk: i32,
    #[schema(minimum = 0)]
    pub jumlah_barang: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StokCreated {
    pub id_stok: i32,
}
