//! Attribute item entity - One selectable value of an attribute.
//!
//! `item_id` is unique within its attribute. For swatch attributes `value`
//! holds a 6-hex-digit color code; for text attributes it conventionally
//! equals the display value.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Attribute item database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "attribute_items")]
pub struct Model {
    /// Unique identifier for the item row
    #[sea_orm(primary_key)]
    pub id: i32,
    /// ID of the attribute this item belongs to
    pub attribute_id: String,
    /// Item key, unique within the attribute (e.g., "40", "Green")
    pub item_id: String,
    /// Human-readable display string
    pub display_value: String,
    /// Raw value (hex color code for swatch items)
    pub value: String,
}

/// Defines relationships between AttributeItem and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each item belongs to one attribute
    #[sea_orm(
        belongs_to = "super::attribute::Entity",
        from = "Column::AttributeId",
        to = "super::attribute::Column::Id"
    )]
    Attribute,
}

impl Related<super::attribute::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Attribute.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
