//! Product-attribute link entity - Many-to-many join between products and
//! attributes. The composite primary key makes duplicate links impossible.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Product-attribute link database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "product_attributes")]
pub struct Model {
    /// ID of the linked product
    #[sea_orm(primary_key, auto_increment = false)]
    pub product_id: String,
    /// ID of the linked attribute
    #[sea_orm(primary_key, auto_increment = false)]
    pub attribute_id: String,
}

/// Defines relationships between the link table and its endpoints
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each link belongs to one product
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id"
    )]
    Product,
    /// Each link belongs to one attribute
    #[sea_orm(
        belongs_to = "super::attribute::Entity",
        from = "Column::AttributeId",
        to = "super::attribute::Column::Id"
    )]
    Attribute,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl Related<super::attribute::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Attribute.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
