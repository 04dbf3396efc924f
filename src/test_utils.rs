//! Shared test utilities.
//!
//! Provides the in-memory database fixture every integration test starts
//! from, a small seeded catalog document, and row-level helpers for tests
//! that need precise control over catalog state.

use crate::{
    config,
    core::import::{self, ImportDocument},
    entities::{attribute, attribute_item, category, product, product_attribute},
    errors::{Error, Result},
};
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    config::database::create_tables(&db).await?;
    Ok(db)
}

/// A small catalog document covering all three variant kinds, text and
/// swatch attributes, galleries, and prices.
pub fn sample_document() -> ImportDocument {
    let raw = r##"{
        "data": {
            "categories": ["all", "clothes", "tech"],
            "products": [
                {
                    "id": "huarache-x-stussy-le",
                    "category": "clothes",
                    "name": "Nike Air Huarache Le",
                    "description": "<p>Great sneakers for everyday use!</p>",
                    "inStock": true,
                    "brand": "Nike x Stussy",
                    "gallery": [
                        "https://images.example.com/huarache-1.jpg",
                        "https://images.example.com/huarache-2.jpg"
                    ],
                    "prices": [
                        {"amount": 144.69, "currency": {"label": "USD", "symbol": "$"}}
                    ],
                    "attributes": [
                        {
                            "id": "Size",
                            "name": "Size",
                            "type": "text",
                            "items": [
                                {"id": "40", "displayValue": "40", "value": "40"},
                                {"id": "41", "displayValue": "41", "value": "41"},
                                {"id": "42", "displayValue": "42", "value": "42"},
                                {"id": "43", "displayValue": "43", "value": "43"}
                            ]
                        }
                    ]
                },
                {
                    "id": "ps-5",
                    "category": "tech",
                    "name": "PlayStation 5",
                    "description": "<p>A good gaming console.</p>",
                    "inStock": true,
                    "brand": "Sony",
                    "gallery": [
                        "https://images.example.com/ps5-front.jpg",
                        "https://images.example.com/ps5-back.jpg"
                    ],
                    "prices": [
                        {"amount": 844.02, "currency": {"label": "USD", "symbol": "$"}}
                    ],
                    "attributes": [
                        {
                            "id": "Color",
                            "name": "Color",
                            "type": "swatch",
                            "items": [
                                {"id": "Green", "displayValue": "Green", "value": "#44FF03"},
                                {"id": "Black", "displayValue": "Black", "value": "#1D1F22"}
                            ]
                        },
                        {
                            "id": "Capacity",
                            "name": "Capacity",
                            "type": "text",
                            "items": [
                                {"id": "512G", "displayValue": "512G", "value": "512G"},
                                {"id": "1T", "displayValue": "1T", "value": "1T"}
                            ]
                        }
                    ]
                },
                {
                    "id": "xbox-series-s",
                    "category": "tech",
                    "name": "Xbox Series S 512GB",
                    "description": "<p>Hardware-beschleunigtes Raytracing.</p>",
                    "inStock": false,
                    "brand": "Microsoft",
                    "gallery": [
                        "https://images.example.com/xbox-s.jpg"
                    ],
                    "prices": [
                        {"amount": 333.99, "currency": {"label": "USD", "symbol": "$"}}
                    ],
                    "attributes": []
                }
            ]
        }
    }"##;

    import::parse_document(raw).expect("sample document is valid JSON")
}

/// Imports [`sample_document`] into the database, failing the test when the
/// import reports any error.
pub async fn seed_catalog(db: &DatabaseConnection) -> Result<()> {
    let report = import::import_document(db, &sample_document()).await;
    if report.errors.is_empty() {
        Ok(())
    } else {
        Err(Error::Import {
            message: format!("Seeding failed: {:?}", report.errors),
        })
    }
}

/// Creates a category row directly.
pub async fn create_test_category(
    db: &DatabaseConnection,
    name: &str,
) -> Result<category::Model> {
    category::ActiveModel {
        name: Set(name.to_string()),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Creates a product row directly, without gallery, prices, or attributes.
pub async fn create_test_product(
    db: &DatabaseConnection,
    id: &str,
    category_id: i32,
    in_stock: bool,
    kind: &str,
) -> Result<product::Model> {
    product::ActiveModel {
        id: Set(id.to_string()),
        category_id: Set(category_id),
        name: Set(format!("Test {id}")),
        description: Set(String::new()),
        in_stock: Set(in_stock),
        brand: Set(None),
        kind: Set(kind.to_string()),
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Adds a price row for a product, interning the currency by label.
pub async fn add_test_price(
    db: &DatabaseConnection,
    product_id: &str,
    currency_label: &str,
    currency_symbol: &str,
    amount: &str,
) -> Result<()> {
    let currency_id = import::ensure_currency(db, currency_label, currency_symbol).await?;
    let amount = amount.parse().map_err(|_| Error::Import {
        message: format!("Bad test amount: {amount}"),
    })?;

    crate::entities::price::ActiveModel {
        product_id: Set(product_id.to_string()),
        currency_id: Set(currency_id),
        amount: Set(amount),
        ..Default::default()
    }
    .insert(db)
    .await?;

    Ok(())
}

/// Creates an attribute with its items, in the given order.
pub async fn create_test_attribute(
    db: &DatabaseConnection,
    id: &str,
    name: &str,
    kind: &str,
    items: &[(&str, &str, &str)],
) -> Result<attribute::Model> {
    let created = attribute::ActiveModel {
        id: Set(id.to_string()),
        name: Set(name.to_string()),
        kind: Set(kind.to_string()),
    }
    .insert(db)
    .await?;

    for (item_id, display_value, value) in items {
        attribute_item::ActiveModel {
            attribute_id: Set(id.to_string()),
            item_id: Set((*item_id).to_string()),
            display_value: Set((*display_value).to_string()),
            value: Set((*value).to_string()),
            ..Default::default()
        }
        .insert(db)
        .await?;
    }

    Ok(created)
}

/// Links an existing attribute to an existing product.
pub async fn link_test_attribute(
    db: &DatabaseConnection,
    product_id: &str,
    attribute_id: &str,
) -> Result<()> {
    product_attribute::ActiveModel {
        product_id: Set(product_id.to_string()),
        attribute_id: Set(attribute_id.to_string()),
    }
    .insert(db)
    .await?;

    Ok(())
}
