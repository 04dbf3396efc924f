//! Order business logic - turns a validated cart into a persisted order.
//!
//! Order creation runs inside a single storage transaction: every requested
//! item is priced and stock-checked against current catalog state, the total
//! is computed, and the order row plus all line items are inserted. Any
//! failure rolls the whole transaction back - either the order and all of
//! its items exist, or none of it does. Stock is only checked, never
//! decremented; two concurrent orders can both observe "in stock".

use crate::{
    core::catalog::CurrencyProjection,
    entities::{Currency, Order, OrderItem, Price, Product, order, order_item, price},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::info;

/// One requested line of a new order.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemInput {
    /// Product to order
    pub product_id: String,
    /// Requested quantity (must be positive)
    pub quantity: i32,
    /// Chosen attribute values; duplicates collapse last-write-wins
    #[serde(default)]
    pub selected_attributes: Vec<SelectedAttributeInput>,
}

/// One chosen attribute value on a line item.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SelectedAttributeInput {
    /// Attribute id (e.g., "Size")
    pub attribute_id: String,
    /// Chosen item id within the attribute (e.g., "41")
    pub attribute_item_id: String,
}

/// What the caller gets back after a successful order creation. Reflects
/// exactly what was committed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderReceipt {
    /// Generated order id
    pub id: i32,
    /// Committed total amount
    pub total_amount: Decimal,
    /// Currency label of the order
    pub currency: String,
    /// Order status (`"pending"`)
    pub status: String,
    /// Number of line items
    pub item_count: usize,
}

/// Read-back projection of a persisted order and its raw line items.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderProjection {
    /// Order id
    pub id: i32,
    /// Committed total amount
    pub total_amount: Decimal,
    /// Currency of the order
    pub currency: CurrencyProjection,
    /// Order status
    pub status: String,
    /// Line items in insertion order
    pub items: Vec<OrderLineProjection>,
}

/// One persisted line item as stored, without re-resolving the product.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineProjection {
    /// Ordered product id
    pub product_id: String,
    /// Ordered quantity
    pub quantity: i32,
    /// Unit price snapshot captured at order time
    pub unit_price: Decimal,
    /// Chosen attribute values, attribute id → item id
    pub selected_attributes: BTreeMap<String, String>,
}

/// Current price/stock state of a product, as resolved for one line item.
struct PriceQuote {
    unit_price: Decimal,
    currency_label: String,
    currency_symbol: String,
    in_stock: bool,
}

/// Creates an order from a non-empty list of cart items.
///
/// Runs as one atomic transaction. Fails with a validation error when the
/// item list is empty, a quantity is not positive, a product has no price
/// row, a product is out of stock, or a later item resolves to a currency
/// different from the first item's. No partial state survives a failure.
pub async fn create_order(
    db: &DatabaseConnection,
    items: Vec<OrderItemInput>,
) -> Result<OrderReceipt> {
    if items.is_empty() {
        return Err(Error::EmptyOrder);
    }

    let txn = db.begin().await?;

    let mut total_amount = Decimal::ZERO;
    let mut order_currency: Option<(String, String)> = None;
    let mut lines = Vec::with_capacity(items.len());

    for item in &items {
        if item.quantity < 1 {
            return Err(Error::InvalidQuantity {
                product_id: item.product_id.clone(),
                quantity: item.quantity,
            });
        }

        let quote = resolve_quote(&txn, &item.product_id).await?;
        if !quote.in_stock {
            return Err(Error::OutOfStock {
                id: item.product_id.clone(),
            });
        }

        // The first line item fixes the order currency; mixed carts are
        // rejected rather than silently summed across currencies.
        match &order_currency {
            None => {
                order_currency = Some((quote.currency_label.clone(), quote.currency_symbol.clone()));
            }
            Some((label, _)) if *label != quote.currency_label => {
                return Err(Error::CurrencyMismatch {
                    expected: label.clone(),
                    found: quote.currency_label,
                });
            }
            Some(_) => {}
        }

        total_amount += quote.unit_price * Decimal::from(item.quantity);

        // Last write wins on duplicate attribute ids within one line.
        let selections: BTreeMap<String, String> = item
            .selected_attributes
            .iter()
            .map(|s| (s.attribute_id.clone(), s.attribute_item_id.clone()))
            .collect();

        lines.push((item, quote.unit_price, serde_json::to_string(&selections)?));
    }

    let (currency_label, currency_symbol) = order_currency.ok_or(Error::EmptyOrder)?;

    let created = order::ActiveModel {
        total_amount: Set(total_amount),
        currency_label: Set(currency_label.clone()),
        currency_symbol: Set(currency_symbol),
        status: Set("pending".to_string()),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    for (item, unit_price, selections) in lines {
        order_item::ActiveModel {
            order_id: Set(created.id),
            product_id: Set(item.product_id.clone()),
            quantity: Set(item.quantity),
            unit_price: Set(unit_price),
            selected_attributes: Set(selections),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
    }

    txn.commit().await?;

    info!(
        "Created order {} with {} items, total {} {}",
        created.id,
        items.len(),
        total_amount,
        currency_label
    );

    Ok(OrderReceipt {
        id: created.id,
        total_amount,
        currency: currency_label,
        status: created.status,
        item_count: items.len(),
    })
}

/// Resolves the current unit price, currency, and stock flag for a product.
///
/// When a product carries price rows in several currencies, the row with the
/// lowest currency id (the first currency ever registered) is taken, so the
/// pick is deterministic. A product with no price row is reported as not
/// found.
async fn resolve_quote<C>(db: &C, product_id: &str) -> Result<PriceQuote>
where
    C: ConnectionTrait,
{
    let row = Price::find()
        .find_also_related(Currency)
        .filter(price::Column::ProductId.eq(product_id))
        .order_by_asc(price::Column::CurrencyId)
        .one(db)
        .await?;

    let Some((price, Some(currency))) = row else {
        return Err(Error::ProductNotFound {
            id: product_id.to_string(),
        });
    };

    let product = Product::find_by_id(product_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::ProductNotFound {
            id: product_id.to_string(),
        })?;

    Ok(PriceQuote {
        unit_price: price.amount,
        currency_label: currency.label,
        currency_symbol: currency.symbol,
        in_stock: product.in_stock,
    })
}

/// Retrieves a persisted order with its raw line items, or `None` for an
/// unknown id. Nothing is re-resolved or re-validated.
pub async fn get_order_by_id(
    db: &DatabaseConnection,
    order_id: i32,
) -> Result<Option<OrderProjection>> {
    let Some(order) = Order::find_by_id(order_id).one(db).await? else {
        return Ok(None);
    };

    let rows = OrderItem::find()
        .filter(order_item::Column::OrderId.eq(order_id))
        .order_by_asc(order_item::Column::Id)
        .all(db)
        .await?;

    let mut items = Vec::with_capacity(rows.len());
    for row in rows {
        let selected_attributes: BTreeMap<String, String> =
            serde_json::from_str(&row.selected_attributes)?;
        items.push(OrderLineProjection {
            product_id: row.product_id,
            quantity: row.quantity,
            unit_price: row.unit_price,
            selected_attributes,
        });
    }

    Ok(Some(OrderProjection {
        id: order.id,
        total_amount: order.total_amount,
        currency: CurrencyProjection {
            label: order.currency_label,
            symbol: order.currency_symbol,
        },
        status: order.status,
        items,
    }))
}
