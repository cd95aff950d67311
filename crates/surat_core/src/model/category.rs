//! Classification taxonomy types.
//!
//! # Responsibility
//! - Describe the category -> subcategory -> child tree used for numbering.
//! - Provide the flat option shapes consumed by form dropdowns.
//!
//! # Invariants
//! - Nesting is at most two levels below a category.
//! - Declared order is meaningful and must be preserved by consumers.

use serde::Serialize;

/// Leaf classification code under a subcategory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubSubCategory {
    pub value: &'static str,
    pub text: &'static str,
}

/// Classification code directly under a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubCategory {
    pub value: &'static str,
    pub text: &'static str,
    pub children: &'static [SubSubCategory],
}

/// Top-level classification, e.g. `KP` (Kepegawaian).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub id: &'static str,
    pub name: &'static str,
    pub subcategories: &'static [SubCategory],
}

/// Dropdown entry for a top-level category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryOption {
    pub id: String,
    pub name: String,
}

/// Dropdown entry for a subcategory or child code.
///
/// `text` is always `"{code} - {description}"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubcategoryOption {
    pub value: String,
    pub text: String,
}

impl SubcategoryOption {
    pub(crate) fn labeled(value: &str, description: &str) -> Self {
        Self {
            value: value.to_string(),
            text: format!("{value} - {description}"),
        }
    }
}
