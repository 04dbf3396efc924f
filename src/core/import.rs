//! Bulk import pipeline - loads a JSON catalog document into the schema.
//!
//! The whole import runs as one transaction. Every step is idempotent, so
//! re-running the same document yields identical read projections: category
//! and attribute rows upsert on their natural keys, currencies are interned
//! by label, and per-product collections (gallery, prices, attribute items)
//! are replaced wholesale in input order. Any failure rolls everything back
//! and is reported in the returned [`ImportReport`] instead of being raised.

use crate::{
    core::catalog::ProductKind,
    entities::{
        Attribute, AttributeItem, Category, Currency, Gallery, Price, Product, ProductAttribute,
        attribute, attribute_item, category, currency, gallery, price, product, product_attribute,
    },
    errors::{Error, Result},
};
use sea_orm::{
    Set, TransactionTrait,
    prelude::*,
    sea_query::OnConflict,
};
use serde::Deserialize;
use std::collections::HashSet;
use tracing::{info, warn};

/// A bulk catalog document, either at the top level of the JSON file or
/// nested under a `data` key.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ImportDocument {
    /// Categories to upsert
    #[serde(default)]
    pub categories: Vec<CategoryEntry>,
    /// Products to upsert with their nested collections
    #[serde(default)]
    pub products: Vec<ProductEntry>,
}

/// A category in the document: either a bare name or an object.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum CategoryEntry {
    /// `"clothes"`
    Name(String),
    /// `{ "name": "clothes" }`
    Object { name: String },
}

impl CategoryEntry {
    fn name(&self) -> &str {
        match self {
            Self::Name(name) | Self::Object { name } => name,
        }
    }
}

/// One product in the document.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductEntry {
    /// Product id (slug)
    pub id: String,
    /// Declared category name; also drives the stored variant kind
    pub category: String,
    /// Display name
    pub name: String,
    /// Long-form description
    #[serde(default)]
    pub description: String,
    /// Stock flag, defaults to true when absent
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
    /// Optional brand
    #[serde(default)]
    pub brand: Option<String>,
    /// Image URLs; input order becomes the persisted display order
    #[serde(default)]
    pub gallery: Vec<String>,
    /// Prices, one per currency
    #[serde(default)]
    pub prices: Vec<PriceEntry>,
    /// Attribute sets with their items
    #[serde(default)]
    pub attributes: Vec<AttributeEntry>,
}

const fn default_in_stock() -> bool {
    true
}

/// One price in the document.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PriceEntry {
    /// Decimal amount, kept as a JSON number until converted exactly
    pub amount: serde_json::Number,
    /// Currency the amount is denominated in
    pub currency: CurrencyEntry,
}

/// A currency reference in the document.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CurrencyEntry {
    /// Currency label (e.g., "USD")
    pub label: String,
    /// Currency symbol (e.g., "$")
    pub symbol: String,
}

/// One attribute set in the document.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct AttributeEntry {
    /// Attribute id (e.g., "Size")
    pub id: String,
    /// Display name
    pub name: String,
    /// Kind discriminator; defaults to `"text"` when absent
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    /// Items in input order
    #[serde(default)]
    pub items: Vec<AttributeItemEntry>,
}

/// One attribute item in the document.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AttributeItemEntry {
    /// Item key, unique within the attribute
    pub id: String,
    /// Display string; empty values fall back to `value` at format time
    #[serde(default)]
    pub display_value: String,
    /// Raw value
    pub value: String,
}

/// Outcome of an import run. Counts describe committed state only: a rolled
/// back import reports zero counts plus the captured error.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    /// Categories processed
    pub categories_count: u32,
    /// Products upserted
    pub products_count: u32,
    /// Distinct attributes upserted
    pub attributes_count: u32,
    /// Failure messages; empty on success
    pub errors: Vec<String>,
}

/// Reads and imports a JSON document from disk.
///
/// I/O and parse failures are captured in the report like any other import
/// failure; this function never returns an error to the caller.
pub async fn import_file(db: &DatabaseConnection, path: &str) -> ImportReport {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) => {
            return ImportReport {
                errors: vec![format!("Cannot read {path}: {e}")],
                ..ImportReport::default()
            };
        }
    };

    let document = match parse_document(&raw) {
        Ok(document) => document,
        Err(e) => {
            return ImportReport {
                errors: vec![format!("Invalid JSON in {path}: {e}")],
                ..ImportReport::default()
            };
        }
    };

    import_document(db, &document).await
}

/// Parses a document from raw JSON, unwrapping an optional top-level `data`
/// key.
pub fn parse_document(raw: &str) -> Result<ImportDocument> {
    let mut value: serde_json::Value = serde_json::from_str(raw)?;
    if let Some(inner) = value.as_object_mut().and_then(|map| map.remove("data")) {
        value = inner;
    }
    Ok(serde_json::from_value(value)?)
}

/// Imports a parsed document inside one transaction.
pub async fn import_document(db: &DatabaseConnection, document: &ImportDocument) -> ImportReport {
    let mut report = ImportReport::default();

    let txn = match db.begin().await {
        Ok(txn) => txn,
        Err(e) => {
            report.errors.push(e.to_string());
            return report;
        }
    };

    match run_import(&txn, document, &mut report).await {
        Ok(()) => {
            if let Err(e) = txn.commit().await {
                report = ImportReport {
                    errors: vec![e.to_string()],
                    ..ImportReport::default()
                };
            } else {
                info!(
                    "Import committed: {} categories, {} products, {} attributes",
                    report.categories_count, report.products_count, report.attributes_count
                );
            }
        }
        Err(e) => {
            if let Err(rollback_err) = txn.rollback().await {
                warn!("Import rollback failed: {}", rollback_err);
            }
            report = ImportReport {
                errors: vec![e.to_string()],
                ..ImportReport::default()
            };
        }
    }

    report
}

async fn run_import<C>(db: &C, document: &ImportDocument, report: &mut ImportReport) -> Result<()>
where
    C: ConnectionTrait,
{
    report.categories_count = import_categories(db, &document.categories).await?;

    let mut attribute_ids = HashSet::new();
    for entry in &document.products {
        import_product(db, entry, &mut attribute_ids).await?;
    }
    report.products_count = document.products.len() as u32;
    report.attributes_count = attribute_ids.len() as u32;

    Ok(())
}

/// Upserts categories by unique name; existing names are left untouched.
async fn import_categories<C>(db: &C, categories: &[CategoryEntry]) -> Result<u32>
where
    C: ConnectionTrait,
{
    for entry in categories {
        let name = entry.name().trim();
        if name.is_empty() {
            return Err(Error::Import {
                message: "Category name cannot be empty".to_string(),
            });
        }

        Category::insert(category::ActiveModel {
            name: Set(name.to_string()),
            ..Default::default()
        })
        .on_conflict(
            OnConflict::column(category::Column::Name)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(db)
        .await?;
    }

    Ok(categories.len() as u32)
}

/// Upserts one product and replaces its gallery, prices, and attributes.
async fn import_product<C>(
    db: &C,
    entry: &ProductEntry,
    attribute_ids: &mut HashSet<String>,
) -> Result<()>
where
    C: ConnectionTrait,
{
    // The stored variant kind derives from the declared category name and
    // stays consistent with the discriminator the read path dispatches on.
    let kind = ProductKind::for_category(&entry.category);

    let category_id = Category::find()
        .filter(category::Column::Name.eq(&entry.category))
        .one(db)
        .await?
        .map(|c| c.id)
        .ok_or_else(|| Error::UnknownCategory {
            name: format!("{} (product: {})", entry.category, entry.id),
        })?;

    Product::insert(product::ActiveModel {
        id: Set(entry.id.clone()),
        category_id: Set(category_id),
        name: Set(entry.name.clone()),
        description: Set(entry.description.clone()),
        in_stock: Set(entry.in_stock),
        brand: Set(entry.brand.clone()),
        kind: Set(kind.as_str().to_string()),
    })
    .on_conflict(
        OnConflict::column(product::Column::Id)
            .update_columns([
                product::Column::CategoryId,
                product::Column::Name,
                product::Column::Description,
                product::Column::InStock,
                product::Column::Brand,
                product::Column::Kind,
            ])
            .to_owned(),
    )
    .exec_without_returning(db)
    .await?;

    import_gallery(db, &entry.id, &entry.gallery).await?;
    import_prices(db, &entry.id, &entry.prices).await?;
    import_attributes(db, &entry.id, &entry.attributes, attribute_ids).await?;

    Ok(())
}

/// Replaces a product's gallery, persisting input order as the display order.
async fn import_gallery<C>(db: &C, product_id: &str, images: &[String]) -> Result<()>
where
    C: ConnectionTrait,
{
    Gallery::delete_many()
        .filter(gallery::Column::ProductId.eq(product_id))
        .exec(db)
        .await?;

    for (order, url) in images.iter().enumerate() {
        gallery::ActiveModel {
            product_id: Set(product_id.to_string()),
            image_url: Set(url.clone()),
            image_order: Set(order as i32),
            ..Default::default()
        }
        .insert(db)
        .await?;
    }

    Ok(())
}

/// Replaces a product's prices. Currencies are interned by label.
async fn import_prices<C>(db: &C, product_id: &str, prices: &[PriceEntry]) -> Result<()>
where
    C: ConnectionTrait,
{
    Price::delete_many()
        .filter(price::Column::ProductId.eq(product_id))
        .exec(db)
        .await?;

    for entry in prices {
        let currency_id = ensure_currency(db, &entry.currency.label, &entry.currency.symbol).await?;
        let amount: Decimal = entry.amount.to_string().parse().map_err(|_| Error::Import {
            message: format!("Invalid amount `{}` for product {product_id}", entry.amount),
        })?;

        price::ActiveModel {
            product_id: Set(product_id.to_string()),
            currency_id: Set(currency_id),
            amount: Set(amount),
            ..Default::default()
        }
        .insert(db)
        .await?;
    }

    Ok(())
}

/// Finds or creates a currency row by its unique label.
///
/// The insert is conditional on the unique key, so concurrent writers of the
/// same label cannot duplicate it; the first writer's symbol wins.
pub(crate) async fn ensure_currency<C>(db: &C, label: &str, symbol: &str) -> Result<i32>
where
    C: ConnectionTrait,
{
    Currency::insert(currency::ActiveModel {
        label: Set(label.to_string()),
        symbol: Set(symbol.to_string()),
        ..Default::default()
    })
    .on_conflict(
        OnConflict::column(currency::Column::Label)
            .do_nothing()
            .to_owned(),
    )
    .exec_without_returning(db)
    .await?;

    Currency::find()
        .filter(currency::Column::Label.eq(label))
        .one(db)
        .await?
        .map(|c| c.id)
        .ok_or_else(|| Error::Import {
            message: format!("Currency {label} disappeared during import"),
        })
}

/// Replaces a product's attribute links, upserting each attribute set and
/// replacing its items.
async fn import_attributes<C>(
    db: &C,
    product_id: &str,
    attributes: &[AttributeEntry],
    attribute_ids: &mut HashSet<String>,
) -> Result<()>
where
    C: ConnectionTrait,
{
    ProductAttribute::delete_many()
        .filter(product_attribute::Column::ProductId.eq(product_id))
        .exec(db)
        .await?;

    for entry in attributes {
        let kind = entry.kind.clone().unwrap_or_else(|| "text".to_string());

        // Attributes are shared by identity: this overwrites name and kind
        // for every product linked to the same attribute id.
        Attribute::insert(attribute::ActiveModel {
            id: Set(entry.id.clone()),
            name: Set(entry.name.clone()),
            kind: Set(kind),
        })
        .on_conflict(
            OnConflict::column(attribute::Column::Id)
                .update_columns([attribute::Column::Name, attribute::Column::Kind])
                .to_owned(),
        )
        .exec_without_returning(db)
        .await?;

        AttributeItem::delete_many()
            .filter(attribute_item::Column::AttributeId.eq(&entry.id))
            .exec(db)
            .await?;

        for item in &entry.items {
            attribute_item::ActiveModel {
                attribute_id: Set(entry.id.clone()),
                item_id: Set(item.id.clone()),
                display_value: Set(item.display_value.clone()),
                value: Set(item.value.clone()),
                ..Default::default()
            }
            .insert(db)
            .await?;
        }

        ProductAttribute::insert(product_attribute::ActiveModel {
            product_id: Set(product_id.to_string()),
            attribute_id: Set(entry.id.clone()),
        })
        .on_conflict(
            OnConflict::columns([
                product_attribute::Column::ProductId,
                product_attribute::Column::AttributeId,
            ])
            .do_nothing()
            .to_owned(),
        )
        .exec_without_returning(db)
        .await?;

        attribute_ids.insert(entry.id.clone());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::catalog::get_product_by_id;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_import_reports_counts() -> Result<()> {
        let db = setup_test_db().await?;

        let report = import_document(&db, &sample_document()).await;
        assert!(report.errors.is_empty(), "errors: {:?}", report.errors);
        assert_eq!(report.categories_count, 3);
        assert_eq!(report.products_count, 3);
        // Size, Color, Capacity
        assert_eq!(report.attributes_count, 3);

        Ok(())
    }

    #[tokio::test]
    async fn test_import_round_trip() -> Result<()> {
        let db = setup_test_db().await?;
        seed_catalog(&db).await?;

        let shoes = get_product_by_id(&db, "huarache-x-stussy-le").await?.unwrap();
        assert_eq!(shoes.name, "Nike Air Huarache Le");
        assert_eq!(shoes.brand.as_deref(), Some("Nike x Stussy"));
        assert_eq!(shoes.category.as_deref(), Some("clothes"));
        assert_eq!(shoes.product_type, "clothes");

        // Gallery preserved in exact input order.
        assert_eq!(
            shoes.gallery,
            vec![
                "https://images.example.com/huarache-1.jpg".to_string(),
                "https://images.example.com/huarache-2.jpg".to_string(),
            ]
        );

        // Prices match input labels, symbols, and amounts.
        assert_eq!(shoes.prices.len(), 1);
        assert_eq!(shoes.prices[0].amount, "144.69".parse::<Decimal>().unwrap());
        assert_eq!(shoes.prices[0].currency.label, "USD");

        // Swatch values round-trip unchanged.
        let console = get_product_by_id(&db, "ps-5").await?.unwrap();
        let color = console
            .attributes
            .iter()
            .find(|attr| attr.id == "Color")
            .unwrap();
        assert!(color.items.iter().any(|item| item.value == "#1D1F22"));

        Ok(())
    }

    #[tokio::test]
    async fn test_import_is_idempotent() -> Result<()> {
        let db = setup_test_db().await?;
        let document = sample_document();

        let first = import_document(&db, &document).await;
        assert!(first.errors.is_empty());
        let after_first = get_product_by_id(&db, "ps-5").await?;

        let second = import_document(&db, &document).await;
        assert!(second.errors.is_empty());
        let after_second = get_product_by_id(&db, "ps-5").await?;

        // Identical projections, and the currency was never duplicated.
        assert_eq!(after_first, after_second);
        let currencies = Currency::find().all(&db).await?;
        assert_eq!(currencies.len(), 1);
        assert_eq!(currencies[0].label, "USD");

        Ok(())
    }

    #[tokio::test]
    async fn test_import_unknown_category_rolls_back_everything() -> Result<()> {
        let db = setup_test_db().await?;

        let raw = r#"{
            "categories": ["tech"],
            "products": [
                {"id": "ok", "category": "tech", "name": "Fine", "inStock": true},
                {"id": "broken", "category": "nowhere", "name": "Nope", "inStock": true}
            ]
        }"#;
        let document = parse_document(raw)?;

        let report = import_document(&db, &document).await;
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains("nowhere"));
        assert_eq!(report.categories_count, 0);
        assert_eq!(report.products_count, 0);

        // Hard per-import failure: even the valid rows rolled back.
        assert!(Category::find().all(&db).await?.is_empty());
        assert!(Product::find().all(&db).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_import_updates_existing_product() -> Result<()> {
        let db = setup_test_db().await?;
        seed_catalog(&db).await?;

        let raw = r#"{
            "categories": ["tech"],
            "products": [
                {
                    "id": "ps-5",
                    "category": "tech",
                    "name": "PlayStation 5 Slim",
                    "inStock": false,
                    "gallery": ["https://images.example.com/ps5-slim.jpg"],
                    "prices": [{"amount": 799.0, "currency": {"label": "USD", "symbol": "$"}}],
                    "attributes": []
                }
            ]
        }"#;
        let report = import_document(&db, &parse_document(raw)?).await;
        assert!(report.errors.is_empty());

        let console = get_product_by_id(&db, "ps-5").await?.unwrap();
        assert_eq!(console.name, "PlayStation 5 Slim");
        assert!(!console.in_stock);
        assert_eq!(console.gallery, vec!["https://images.example.com/ps5-slim.jpg"]);
        assert_eq!(console.prices.len(), 1);
        assert_eq!(console.prices[0].amount, "799".parse::<Decimal>().unwrap());
        // The replaced attribute links are gone.
        assert!(console.attributes.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_import_shared_attribute_updates_for_all_products() -> Result<()> {
        let db = setup_test_db().await?;

        let raw = r#"{
            "categories": ["clothes"],
            "products": [
                {
                    "id": "shirt",
                    "category": "clothes",
                    "name": "Shirt",
                    "inStock": true,
                    "attributes": [
                        {"id": "Size", "name": "Size", "type": "text",
                         "items": [{"id": "S", "displayValue": "Small", "value": "S"}]}
                    ]
                },
                {
                    "id": "jacket",
                    "category": "clothes",
                    "name": "Jacket",
                    "inStock": true,
                    "attributes": [
                        {"id": "Size", "name": "Sizing", "type": "text",
                         "items": [{"id": "M", "displayValue": "Medium", "value": "M"}]}
                    ]
                }
            ]
        }"#;
        let report = import_document(&db, &parse_document(raw)?).await;
        assert!(report.errors.is_empty());
        assert_eq!(report.attributes_count, 1);

        // The attribute is shared by identity: the last writer's definition
        // is what every linked product sees.
        let shirt = get_product_by_id(&db, "shirt").await?.unwrap();
        assert_eq!(shirt.attributes.len(), 1);
        assert_eq!(shirt.attributes[0].name, "Sizing");
        assert_eq!(shirt.attributes[0].items.len(), 1);
        assert_eq!(shirt.attributes[0].items[0].id, "M");

        Ok(())
    }

    #[tokio::test]
    async fn test_parse_document_unwraps_data_key() -> Result<()> {
        let nested = parse_document(r#"{"data": {"categories": ["tech"], "products": []}}"#)?;
        let flat = parse_document(r#"{"categories": ["tech"], "products": []}"#)?;
        assert_eq!(nested, flat);
        assert_eq!(nested.categories.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_parse_document_accepts_category_objects() -> Result<()> {
        let document =
            parse_document(r#"{"categories": [{"name": "tech"}, "clothes"], "products": []}"#)?;
        assert_eq!(document.categories[0].name(), "tech");
        assert_eq!(document.categories[1].name(), "clothes");
        Ok(())
    }

    #[tokio::test]
    async fn test_import_file_missing_path_is_reported() -> Result<()> {
        let db = setup_test_db().await?;
        let report = import_file(&db, "/no/such/file.json").await;
        assert_eq!(report.categories_count, 0);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains("/no/such/file.json"));
        Ok(())
    }
}
