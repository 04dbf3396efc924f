//! Currency entity - A shared, interned currency row.
//!
//! Currencies are deduplicated by their unique label: the first writer of a
//! label creates the row, subsequent writers reuse it.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Currency database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "currencies")]
pub struct Model {
    /// Unique identifier for the currency
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Unique currency label (e.g., "USD")
    #[sea_orm(unique)]
    pub label: String,
    /// Currency symbol (e.g., "$")
    pub symbol: String,
}

/// Defines relationships between Currency and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One currency is referenced by many price rows
    #[sea_orm(has_many = "super::price::Entity")]
    Prices,
}

impl Related<super::price::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Prices.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
