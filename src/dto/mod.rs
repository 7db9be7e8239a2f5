pub mod auth;
pub mod kategori;
pub mod produk;
pub mod stok;
