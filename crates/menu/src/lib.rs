//! # Order Menu
//!
//! Read-only view of the menu catalog and the extras eligibility rule.
//!
//! Category inference is a chain of [`CategorySource`]s: the catalog built from the menu
//! document answers first, keyword heuristics answer for anything it does not list.

mod catalog;
mod category;
mod extras;

pub use catalog::{CatalogError, CatalogIndex, MenuCategory, MenuDocument, MenuItem, Result};
pub use category::{
    CategorySource, FallbackSource, KeywordSource, MenuCategories, BREAKFAST_SANDWICHES,
    COLD_BEVERAGES, DONUTS_AND_BAKERY, SIGNATURE_LATTES,
};
pub use extras::{DenyReason, ExtrasDecision, ExtrasPolicy, EXTRAS_KEYWORDS};
