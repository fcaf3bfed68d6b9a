//! Error types
//!
//! `RecommendError` is the only error a recommendation call can return.
//! `CatalogError` covers data invariants checked once when the catalog loads.

use thiserror::Error;

/// Errors surfaced to the caller of a recommendation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecommendError {
    /// A structurally required query field is absent or blank
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// Month outside 1-12 supplied for season/weather context
    #[error("month {0} is out of range (expected 1-12)")]
    InvalidMonth(u32),
}

/// Invariant violations found while loading crop data
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("crop entry has an empty name")]
    EmptyName,

    #[error("crop '{0}' has an empty crop family")]
    EmptyFamily(String),

    #[error("duplicate crop name in catalog: {0}")]
    DuplicateCrop(String),

    #[error("crop '{crop}' lists month {month} outside 1-12")]
    InvalidMonth { crop: String, month: u8 },

    #[error("crop '{0}' lists no seasons")]
    NoSeasons(String),
}
