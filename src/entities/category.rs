//! Category entity - Represents a browsing category for products.
//!
//! Categories are created by the bulk importer and read-only at request
//! time. The name is the natural key and is unique across the table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Category database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    /// Unique identifier for the category
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Unique, non-empty category name (e.g., "clothes", "tech")
    #[sea_orm(unique)]
    pub name: String,
}

// Products reference categories by id without a schema-level foreign key:
// the read path must keep serving a product whose category row is gone
// (projected with a null category), so the link stays application-managed.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
