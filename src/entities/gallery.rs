//! Gallery entity - An image attached to a product.
//!
//! Display order is the persisted `image_order` column, not insertion order.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Gallery entry database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "product_gallery")]
pub struct Model {
    /// Unique identifier for the gallery entry
    #[sea_orm(primary_key)]
    pub id: i32,
    /// ID of the product this image belongs to
    pub product_id: String,
    /// Image URL
    pub image_url: String,
    /// Explicit display position, used for ORDER BY
    pub image_order: i32,
}

/// Defines relationships between Gallery and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each gallery entry belongs to one product
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id"
    )]
    Product,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
