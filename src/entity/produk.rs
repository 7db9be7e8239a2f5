use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "tbl_produk")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id_produk: i32,
    pub id_kategori: Option<i32>,
    pub nama_produk: String,
    pub kode_produk: String,
    pub foto_produk: Option<String>,
    pub tgl_register: Date,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::kategori::Entity",
        from = "Column::IdKategori",
        to = "super::kategori::Column::IdKategori",
        on_delete = "SetNull"
    )]
    Kategori,
    #[sea_orm(has_many = "super::stok::Entity")]
    Stok,
}

impl Related<super::kategori::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Kategori.def()
    }
}

impl Related<super::stok::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Stok.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
