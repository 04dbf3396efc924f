//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod attribute;
pub mod attribute_item;
pub mod category;
pub mod currency;
pub mod gallery;
pub mod order;
pub mod order_item;
pub mod price;
pub mod product;
pub mod product_attribute;

// Re-export specific types to avoid conflicts
pub use attribute::{Column as AttributeColumn, Entity as Attribute, Model as AttributeModel};
pub use attribute_item::{
    Column as AttributeItemColumn, Entity as AttributeItem, Model as AttributeItemModel,
};
pub use category::{Column as CategoryColumn, Entity as Category, Model as CategoryModel};
pub use currency::{Column as CurrencyColumn, Entity as Currency, Model as CurrencyModel};
pub use gallery::{Column as GalleryColumn, Entity as Gallery, Model as GalleryModel};
pub use order::{Column as OrderColumn, Entity as Order, Model as OrderModel};
pub use order_item::{Column as OrderItemColumn, Entity as OrderItem, Model as OrderItemModel};
pub use price::{Column as PriceColumn, Entity as Price, Model as PriceModel};
pub use product::{Column as ProductColumn, Entity as Product, Model as ProductModel};
pub use product_attribute::{
    Column as ProductAttributeColumn, Entity as ProductAttribute, Model as ProductAttributeModel,
};
