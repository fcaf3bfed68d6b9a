//! Data model for the recommendation engine
//!
//! - `crop`: immutable catalog entries and their ordinal attributes
//! - `query`: the farm query snapshot and its derived ranges/tiers
//! - `scored`: per-call output records

pub mod crop;
pub mod query;
pub mod scored;

pub use crop::{parse_market_price, CropDefinition, Level, Rating, WaterTier};
pub use query::{DurationRange, FarmQuery, WaterAvailability, WaterSource, HISTORY_DEPTH};
pub use scored::ScoredCrop;
