//! Core business logic - framework-agnostic catalog, order, and import
//! operations. Everything here works against an explicitly passed database
//! handle and is exercised directly by the API boundary.

/// Attribute kinds and kind-dispatched item formatting
pub mod attribute;
/// Product read assembly and variant kinds
pub mod catalog;
/// Category reads
pub mod category;
/// Bulk catalog import pipeline
pub mod import;
/// Order creation transaction and order read-back
pub mod order;
