use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "tbl_stok")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id_stok: i32,
    pub id_produk: i32,
    pub jumlah_barang: i32,
    pub tgl_update: Date,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::produk::Entity",
        from = "Column::IdProduk",
        to = "super::produk::Column::IdProduk"
    )]
    Produk,
}

impl Related<super::produk::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Produk.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
