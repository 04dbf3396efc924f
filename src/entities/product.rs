//! Product entity - Represents a catalog product.
//!
//! Products use a string slug as their natural primary key (e.g., "ps-5").
//! The `kind` column is the variant discriminator selecting type-specific
//! projection behavior; unknown values are read as the generic kind.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Product database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    /// Natural string key for the product (slug)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// ID of the category this product belongs to
    pub category_id: i32,
    /// Display name of the product
    pub name: String,
    /// Long-form product description (may contain markup)
    pub description: String,
    /// Whether the product can currently be ordered
    pub in_stock: bool,
    /// Optional brand name
    pub brand: Option<String>,
    /// Variant kind discriminator: `"generic"`, `"clothes"`, or `"tech"`
    pub kind: String,
}

/// Defines relationships between Product and other entities
///
/// The category reference is intentionally not modeled as a relation: the
/// read path tolerates a dangling `category_id` (projected as a null
/// category), which a generated foreign key would make unrepresentable.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One product has many gallery entries
    #[sea_orm(has_many = "super::gallery::Entity")]
    Gallery,
    /// One product has many price rows (one per currency)
    #[sea_orm(has_many = "super::price::Entity")]
    Prices,
    /// One product has many attribute links
    #[sea_orm(has_many = "super::product_attribute::Entity")]
    ProductAttributes,
    /// One product appears in many order items
    #[sea_orm(has_many = "super::order_item::Entity")]
    OrderItems,
}

impl Related<super::gallery::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Gallery.def()
    }
}

impl Related<super::price::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Prices.def()
    }
}

// Products reach attributes through the product_attributes link table.
impl Related<super::attribute::Entity> for Entity {
    fn to() -> RelationDef {
        super::product_attribute::Relation::Attribute.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::product_attribute::Relation::Product.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
