//! Price entity - A product's amount in one currency.
//!
//! A product carries at most one price row per currency; multiple currencies
//! per product are allowed.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Price database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "product_prices")]
pub struct Model {
    /// Unique identifier for the price row
    #[sea_orm(primary_key)]
    pub id: i32,
    /// ID of the product this price belongs to
    pub product_id: String,
    /// ID of the currency the amount is denominated in
    pub currency_id: i32,
    /// Decimal amount
    pub amount: Decimal,
}

/// Defines relationships between Price and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each price belongs to one product
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id"
    )]
    Product,
    /// Each price is denominated in one currency
    #[sea_orm(
        belongs_to = "super::currency::Entity",
        from = "Column::CurrencyId",
        to = "super::currency::Column::Id"
    )]
    Currency,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl Related<super::currency::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Currency.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
