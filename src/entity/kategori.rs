use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "tbl_kategori")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id_kategori: i32,
    pub nama_kategori: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::produk::Entity")]
    Produk,
}

impl Related<super::produk::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Produk.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
