//! Order item entity - One line of an order.
//!
//! The unit price is a snapshot captured at order time and is immune to
//! later price changes. Selected attributes are stored as a serialized JSON
//! map from attribute id to the chosen item id.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Order item database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "order_items")]
pub struct Model {
    /// Unique identifier for the line item
    #[sea_orm(primary_key)]
    pub id: i32,
    /// ID of the order this line belongs to
    pub order_id: i32,
    /// ID of the ordered product
    pub product_id: String,
    /// Ordered quantity (positive)
    pub quantity: i32,
    /// Unit price snapshot at order time
    pub unit_price: Decimal,
    /// JSON map of attribute id → chosen attribute item id
    pub selected_attributes: String,
}

/// Defines relationships between OrderItem and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each line item belongs to one order
    #[sea_orm(
        belongs_to = "super::order::Entity",
        from = "Column::OrderId",
        to = "super::order::Column::Id"
    )]
    Order,
    /// Each line item references one product
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id"
    )]
    Product,
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Order.def()
    }
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
