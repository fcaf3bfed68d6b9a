//! Crop Advisor
//!
//! Crop recommendation engine for the farmer-advisory portal.
//!
//! Given a farm's district, soil, water access, budget, duration preference
//! and recent cropping history, it filters a fixed crop catalog and ranks the
//! survivors by a weighted smart score with a crop-rotation penalty.
//!
//! - `model/`: catalog entries, farm query, scored output
//! - `data`: catalog and district index loading (JSON)
//! - `filter`: hard eligibility constraints
//! - `scoring/`: smart score sub-factors and the rotation penalty
//! - `ranking`: sort keys and display filters
//! - `recommender`: the end-to-end pipeline
//! - `api_server` (feature `api`): Axum HTTP wrapper

pub mod config;
pub mod data;
pub mod error;
pub mod filter;
pub mod model;
pub mod ranking;
pub mod recommender;
pub mod scoring;
pub mod season;
pub mod weather;

#[cfg(feature = "api")]
pub mod api_server;

// Re-export commonly used types
pub use config::ServerConfig;
pub use data::{AdvisorData, CropCatalog, DistrictEligibilityIndex};
pub use error::{CatalogError, RecommendError};
pub use model::{CropDefinition, FarmQuery, ScoredCrop, WaterSource};
pub use ranking::{DisplayFilters, SortKey};
pub use recommender::{recommend, CropRecommender, RecommendOptions};
pub use scoring::{smart_score, ScoreBreakdown};
pub use season::{ScoringContext, Season};

#[cfg(feature = "api")]
pub use api_server::{create_router, AppState};
