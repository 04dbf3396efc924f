//! Attribute entity - A reusable attribute set such as "Size" or "Color".
//!
//! Attributes are shared across products by identity through the
//! `product_attributes` link table: updating an attribute updates it for
//! every linked product. The `kind` column is the formatting dispatch key;
//! unknown values are read as the text kind.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Attribute database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "attributes")]
pub struct Model {
    /// Natural string key for the attribute (e.g., "Size")
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Display name of the attribute
    pub name: String,
    /// Formatting kind discriminator: `"text"` or `"swatch"`
    pub kind: String,
}

/// Defines relationships between Attribute and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One attribute has many items
    #[sea_orm(has_many = "super::attribute_item::Entity")]
    Items,
    /// One attribute is linked to many products
    #[sea_orm(has_many = "super::product_attribute::Entity")]
    ProductAttributes,
}

impl Related<super::attribute_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Items.def()
    }
}

// Attributes reach products through the product_attributes link table.
impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        super::product_attribute::Relation::Product.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::product_attribute::Relation::Attribute.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
