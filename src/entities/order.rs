//! Order entity - A committed customer order.
//!
//! The currency label and symbol are denormalized from the first line item's
//! price at creation time; an order is always single-currency. The total
//! always equals the sum of its persisted line items' unit_price × quantity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Order database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    /// Unique identifier, assigned on insert
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Sum of unit_price × quantity across line items
    pub total_amount: Decimal,
    /// Currency label inherited from the first line item (e.g., "USD")
    pub currency_label: String,
    /// Currency symbol matching the label (e.g., "$")
    pub currency_symbol: String,
    /// Order status, `"pending"` on creation
    pub status: String,
    /// When the order was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Order and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One order has many line items
    #[sea_orm(has_many = "super::order_item::Entity")]
    Items,
}

impl Related<super::order_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Items.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
