pub mod kategori;
pub mod produk;
pub mod stok;
pub mod users;
