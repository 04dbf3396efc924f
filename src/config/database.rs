//! Database configuration module.
//!
//! Handles `SQLite` database connection and table creation using `SeaORM`.
//! Table creation uses `Schema::create_table_from_entity` so the database
//! schema is generated from the entity definitions without manual SQL.

use crate::entities::{
    Attribute, AttributeItem, Category, Currency, Gallery, Order, OrderItem, Price, Product,
    ProductAttribute,
};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};
use tracing::info;

/// Establishes a connection to the database at the given URL.
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    let db = Database::connect(database_url).await?;
    info!("Database connection established: {}", database_url);
    Ok(db)
}

/// Creates all tables from the entity definitions if they do not exist.
///
/// Referenced tables are created before the tables referencing them so that
/// the generated foreign keys always point at an existing table.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut statements = vec![
        schema.create_table_from_entity(Category),
        schema.create_table_from_entity(Product),
        schema.create_table_from_entity(Gallery),
        schema.create_table_from_entity(Currency),
        schema.create_table_from_entity(Price),
        schema.create_table_from_entity(Attribute),
        schema.create_table_from_entity(AttributeItem),
        schema.create_table_from_entity(ProductAttribute),
        schema.create_table_from_entity(Order),
        schema.create_table_from_entity(OrderItem),
    ];

    for statement in &mut statements {
        statement.if_not_exists();
        db.execute(builder.build(statement)).await?;
    }

    Ok(())
}
