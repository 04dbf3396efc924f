//! Attribute formatting - kind-dispatched projection of attribute items.
//!
//! Attributes declare a kind (`text` or `swatch`) that selects how their
//! items are presented. Unknown kinds fall back to text formatting rather
//! than failing, matching the permissive read path of the catalog.

use crate::{
    entities::{Attribute, AttributeItem, attribute, attribute_item, product_attribute},
    errors::Result,
};
use sea_orm::{JoinType, QueryOrder, QuerySelect, prelude::*};
use serde::Serialize;

/// Formatting kind of an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKind {
    /// Plain text values; display value falls back to the raw value
    Text,
    /// Color swatches; the raw value is a hex color code
    Swatch,
}

impl AttributeKind {
    /// Parses the stored discriminator. Anything that is not `"swatch"`
    /// formats as text.
    pub fn from_discriminator(value: &str) -> Self {
        match value {
            "swatch" => Self::Swatch,
            _ => Self::Text,
        }
    }

    /// The canonical discriminator string for this kind.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Swatch => "swatch",
        }
    }
}

/// One formatted attribute item as returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeItemProjection {
    /// Item key, unique within the attribute
    pub id: String,
    /// Human-readable display string
    pub display_value: String,
    /// Raw value (hex color code for swatch items)
    pub value: String,
}

/// One fully hydrated attribute with its formatted item list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributeProjection {
    /// Attribute id (e.g., "Size")
    pub id: String,
    /// Display name of the attribute
    pub name: String,
    /// Normalized kind discriminator
    #[serde(rename = "type")]
    pub kind: String,
    /// Formatted items in storage order
    pub items: Vec<AttributeItemProjection>,
}

/// Formats a single attribute item according to the attribute's kind.
///
/// Text items fall back to the raw value when the stored display value is
/// empty; swatch items are returned verbatim. The swatch hex code is not
/// validated here - producers call [`is_valid_hex_color`] before writing.
pub fn format_item(kind: AttributeKind, item: &attribute_item::Model) -> AttributeItemProjection {
    let display_value = match kind {
        AttributeKind::Text if item.display_value.is_empty() => item.value.clone(),
        _ => item.display_value.clone(),
    };

    AttributeItemProjection {
        id: item.item_id.clone(),
        display_value,
        value: item.value.clone(),
    }
}

/// Checks whether a string is a 6-hex-digit color code such as `#1D1F22`.
///
/// Pure predicate for producers of swatch values; formatting never calls it.
pub fn is_valid_hex_color(value: &str) -> bool {
    let Some(digits) = value.strip_prefix('#') else {
        return false;
    };
    digits.len() == 6 && digits.chars().all(|c| c.is_ascii_hexdigit())
}

/// Loads every attribute linked to a product, each hydrated with its full
/// ordered item list and formatted per its kind.
pub async fn attributes_for_product<C>(db: &C, product_id: &str) -> Result<Vec<AttributeProjection>>
where
    C: ConnectionTrait,
{
    let attributes = Attribute::find()
        .join(
            JoinType::InnerJoin,
            attribute::Relation::ProductAttributes.def(),
        )
        .filter(product_attribute::Column::ProductId.eq(product_id))
        .order_by_asc(attribute::Column::Id)
        .all(db)
        .await?;

    let mut projections = Vec::with_capacity(attributes.len());
    for attr in attributes {
        let kind = AttributeKind::from_discriminator(&attr.kind);
        let items = AttributeItem::find()
            .filter(attribute_item::Column::AttributeId.eq(&attr.id))
            .order_by_asc(attribute_item::Column::Id)
            .all(db)
            .await?;

        projections.push(AttributeProjection {
            id: attr.id,
            name: attr.name,
            kind: kind.as_str().to_string(),
            items: items.iter().map(|item| format_item(kind, item)).collect(),
        });
    }

    Ok(projections)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    fn item(item_id: &str, display_value: &str, value: &str) -> attribute_item::Model {
        attribute_item::Model {
            id: 0,
            attribute_id: "test".to_string(),
            item_id: item_id.to_string(),
            display_value: display_value.to_string(),
            value: value.to_string(),
        }
    }

    #[test]
    fn test_text_item_keeps_display_value() {
        let formatted = format_item(AttributeKind::Text, &item("40", "40 EU", "40"));
        assert_eq!(formatted.display_value, "40 EU");
        assert_eq!(formatted.value, "40");
    }

    #[test]
    fn test_text_item_falls_back_to_value() {
        let formatted = format_item(AttributeKind::Text, &item("40", "", "40"));
        assert_eq!(formatted.display_value, "40");
    }

    #[test]
    fn test_swatch_item_is_verbatim() {
        let formatted = format_item(AttributeKind::Swatch, &item("Black", "Black", "#1D1F22"));
        assert_eq!(formatted.id, "Black");
        assert_eq!(formatted.display_value, "Black");
        assert_eq!(formatted.value, "#1D1F22");
    }

    #[test]
    fn test_swatch_empty_display_value_stays_empty() {
        // Swatch formatting never substitutes the color code for the label.
        let formatted = format_item(AttributeKind::Swatch, &item("Black", "", "#1D1F22"));
        assert_eq!(formatted.display_value, "");
    }

    #[test]
    fn test_unknown_kind_defaults_to_text() {
        assert_eq!(
            AttributeKind::from_discriminator("dropdown"),
            AttributeKind::Text
        );
        assert_eq!(AttributeKind::from_discriminator(""), AttributeKind::Text);
        assert_eq!(
            AttributeKind::from_discriminator("swatch"),
            AttributeKind::Swatch
        );
    }

    #[test]
    fn test_is_valid_hex_color() {
        assert!(is_valid_hex_color("#1D1F22"));
        assert!(is_valid_hex_color("#abcdef"));
        assert!(is_valid_hex_color("#ABCDEF"));
        assert!(!is_valid_hex_color("1D1F22"));
        assert!(!is_valid_hex_color("#1D1F2"));
        assert!(!is_valid_hex_color("#1D1F222"));
        assert!(!is_valid_hex_color("#1D1F2G"));
        assert!(!is_valid_hex_color(""));
    }

    #[tokio::test]
    async fn test_attributes_for_product() -> Result<()> {
        let db = setup_test_db().await?;
        let category = create_test_category(&db, "shoes").await?;
        create_test_product(&db, "runner-1", category.id, true, "generic").await?;

        create_test_attribute(
            &db,
            "Size",
            "Size",
            "text",
            &[("40", "40", "40"), ("41", "", "41")],
        )
        .await?;
        create_test_attribute(&db, "Color", "Color", "swatch", &[("Black", "Black", "#1D1F22")])
            .await?;
        link_test_attribute(&db, "runner-1", "Size").await?;
        link_test_attribute(&db, "runner-1", "Color").await?;

        let attributes = attributes_for_product(&db, "runner-1").await?;
        assert_eq!(attributes.len(), 2);

        // Ordered by attribute id: Color before Size.
        assert_eq!(attributes[0].id, "Color");
        assert_eq!(attributes[0].kind, "swatch");
        assert_eq!(attributes[0].items[0].value, "#1D1F22");

        assert_eq!(attributes[1].id, "Size");
        assert_eq!(attributes[1].kind, "text");
        assert_eq!(attributes[1].items.len(), 2);
        // Missing display value falls back to the raw value.
        assert_eq!(attributes[1].items[1].display_value, "41");

        Ok(())
    }

    #[tokio::test]
    async fn test_attributes_for_product_without_links() -> Result<()> {
        let db = setup_test_db().await?;
        let category = create_test_category(&db, "shoes").await?;
        create_test_product(&db, "runner-1", category.id, true, "generic").await?;

        let attributes = attributes_for_product(&db, "runner-1").await?;
        assert!(attributes.is_empty());

        Ok(())
    }
}
