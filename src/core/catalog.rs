//! Catalog read assembly - loads products and hydrates their full read
//! projection from normalized storage.
//!
//! Every externally visible product projection is fully hydrated: gallery in
//! persisted display order, prices joined with their currency, attributes
//! formatted per kind, and the category name. Partial hydration is never
//! returned to a caller.

use crate::{
    core::attribute::{AttributeItemProjection, AttributeProjection, attributes_for_product},
    entities::{Category, Currency, Gallery, Price, Product, category, gallery, price, product},
    errors::Result,
};
use sea_orm::{QueryOrder, prelude::*};
use serde::Serialize;

/// Variant kind of a product, selecting type-specific projection behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductKind {
    /// No specialized behavior
    Generic,
    /// Clothing; exposes size queries over its attribute set
    Clothes,
    /// Tech; exposes capacity and color queries over its attribute set
    Tech,
}

impl ProductKind {
    /// Parses the stored discriminator column. Unknown or missing values map
    /// to the generic kind.
    pub fn from_discriminator(value: &str) -> Self {
        match value {
            "clothes" => Self::Clothes,
            "tech" => Self::Tech,
            _ => Self::Generic,
        }
    }

    /// Derives the kind a product gets from its declared category name at
    /// import time. The importer keeps this consistent with the stored
    /// discriminator the read path dispatches on.
    pub fn for_category(name: &str) -> Self {
        match name {
            "clothes" => Self::Clothes,
            "tech" => Self::Tech,
            _ => Self::Generic,
        }
    }

    /// The canonical discriminator string for this kind.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Generic => "generic",
            Self::Clothes => "clothes",
            Self::Tech => "tech",
        }
    }
}

/// Currency as reported inside price and order projections.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrencyProjection {
    /// Currency label (e.g., "USD")
    pub label: String,
    /// Currency symbol (e.g., "$")
    pub symbol: String,
}

/// One price of a product in a single currency.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceProjection {
    /// Decimal amount
    pub amount: Decimal,
    /// Currency the amount is denominated in
    pub currency: CurrencyProjection,
}

/// The fully hydrated, externally visible representation of a product.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductProjection {
    /// Product id (slug)
    pub id: String,
    /// Display name
    pub name: String,
    /// Long-form description
    pub description: String,
    /// Whether the product can currently be ordered
    pub in_stock: bool,
    /// Optional brand name
    pub brand: Option<String>,
    /// Category name; `None` when the category row no longer exists
    pub category: Option<String>,
    /// Image URLs in persisted display order
    pub gallery: Vec<String>,
    /// Prices, one per currency
    pub prices: Vec<PriceProjection>,
    /// Attributes with their formatted item lists
    pub attributes: Vec<AttributeProjection>,
    /// Variant kind tag
    pub product_type: String,
}

impl ProductProjection {
    /// The variant kind this projection was built with.
    pub fn kind(&self) -> ProductKind {
        ProductKind::from_discriminator(&self.product_type)
    }

    /// Available sizes of a clothing product: the display values of its
    /// "size" attribute. Empty for other kinds.
    pub fn available_sizes(&self) -> Vec<String> {
        if self.kind() != ProductKind::Clothes {
            return Vec::new();
        }
        self.attribute_display_values("size")
    }

    /// Whether a clothing product offers the given size.
    pub fn has_size_available(&self, size: &str) -> bool {
        self.available_sizes().iter().any(|s| s == size)
    }

    /// Available capacities of a tech product: the display values of its
    /// "capacity" attribute. Empty for other kinds.
    pub fn available_capacities(&self) -> Vec<String> {
        if self.kind() != ProductKind::Tech {
            return Vec::new();
        }
        self.attribute_display_values("capacity")
    }

    /// Available colors of a tech product: the items of its "color"
    /// attribute. Empty for other kinds.
    pub fn available_colors(&self) -> Vec<AttributeItemProjection> {
        if self.kind() != ProductKind::Tech {
            return Vec::new();
        }
        self.attributes
            .iter()
            .find(|attr| attr.name.eq_ignore_ascii_case("color"))
            .map(|attr| attr.items.clone())
            .unwrap_or_default()
    }

    fn attribute_display_values(&self, attribute_name: &str) -> Vec<String> {
        self.attributes
            .iter()
            .find(|attr| attr.name.eq_ignore_ascii_case(attribute_name))
            .map(|attr| {
                attr.items
                    .iter()
                    .map(|item| item.display_value.clone())
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Retrieves every product, fully hydrated, ordered by id.
pub async fn get_all_products(db: &DatabaseConnection) -> Result<Vec<ProductProjection>> {
    let rows = Product::find()
        .order_by_asc(product::Column::Id)
        .all(db)
        .await?;
    hydrate_all(db, rows).await
}

/// Retrieves the products of one category by category name.
///
/// The sentinel name `"all"` is equivalent to an unfiltered listing. A name
/// with no matching category row yields an empty list.
pub async fn get_products_by_category(
    db: &DatabaseConnection,
    category_name: &str,
) -> Result<Vec<ProductProjection>> {
    if category_name == "all" {
        return get_all_products(db).await;
    }

    let Some(category) = Category::find()
        .filter(category::Column::Name.eq(category_name))
        .one(db)
        .await?
    else {
        return Ok(Vec::new());
    };

    let rows = Product::find()
        .filter(product::Column::CategoryId.eq(category.id))
        .order_by_asc(product::Column::Id)
        .all(db)
        .await?;
    hydrate_all(db, rows).await
}

/// Retrieves a single product by id, fully hydrated. `None` for an unknown
/// id - callers distinguish "found" from "absent" without an error.
pub async fn get_product_by_id(
    db: &DatabaseConnection,
    product_id: &str,
) -> Result<Option<ProductProjection>> {
    match Product::find_by_id(product_id).one(db).await? {
        Some(row) => Ok(Some(hydrate(db, row).await?)),
        None => Ok(None),
    }
}

async fn hydrate_all(
    db: &DatabaseConnection,
    rows: Vec<product::Model>,
) -> Result<Vec<ProductProjection>> {
    let mut projections = Vec::with_capacity(rows.len());
    for row in rows {
        projections.push(hydrate(db, row).await?);
    }
    Ok(projections)
}

/// Hydrates one product row into its full projection.
async fn hydrate<C>(db: &C, row: product::Model) -> Result<ProductProjection>
where
    C: ConnectionTrait,
{
    let kind = ProductKind::from_discriminator(&row.kind);

    let gallery = Gallery::find()
        .filter(gallery::Column::ProductId.eq(&row.id))
        .order_by_asc(gallery::Column::ImageOrder)
        .all(db)
        .await?
        .into_iter()
        .map(|entry| entry.image_url)
        .collect();

    let prices = Price::find()
        .find_also_related(Currency)
        .filter(price::Column::ProductId.eq(&row.id))
        .order_by_asc(price::Column::CurrencyId)
        .all(db)
        .await?
        .into_iter()
        .filter_map(|(price, currency)| {
            currency.map(|currency| PriceProjection {
                amount: price.amount,
                currency: CurrencyProjection {
                    label: currency.label,
                    symbol: currency.symbol,
                },
            })
        })
        .collect();

    let attributes = attributes_for_product(db, &row.id).await?;

    let category = Category::find_by_id(row.category_id)
        .one(db)
        .await?
        .map(|category| category.name);

    Ok(ProductProjection {
        id: row.id,
        name: row.name,
        description: row.description,
        in_stock: row.in_stock,
        brand: row.brand,
        category,
        gallery,
        prices,
        attributes,
        product_type: kind.as_str().to_string(),
    })
}
