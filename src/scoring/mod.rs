//! Smart score engine
//!
//! Ten weighted sub-factors combine into a bounded 0-100 desirability score.
//! The rotation penalty (`rotation`) is applied afterwards on top of this
//! base score.
//!
//! - `factors`: enum and ratio lookups for each sub-factor
//! - `rotation`: crop-family history penalty

pub mod factors;
pub mod rotation;

pub use rotation::{penalize, rotation_multiplier, RotationHistory};

use crate::model::{CropDefinition, DurationRange, FarmQuery};
use crate::season::ScoringContext;
use factors::*;
use serde::Serialize;

/// Factor weights; they sum to 1.0
pub mod weights {
    pub const PROFIT: f64 = 0.25;
    pub const DEMAND: f64 = 0.15;
    pub const RISK: f64 = 0.15;
    pub const WATER: f64 = 0.10;
    pub const SEASON: f64 = 0.10;
    pub const EXPORT: f64 = 0.08;
    pub const MECHANIZATION: f64 = 0.05;
    pub const WEATHER: f64 = 0.09;
    pub const DURATION: f64 = 0.02;
    pub const STORAGE: f64 = 0.01;
}

pub const MAX_SCORE: f64 = 100.0;

/// Individual sub-scores for one crop
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub profit_ratio: f64,
    pub demand: f64,
    pub risk: f64,
    pub water: f64,
    pub season: f64,
    pub export: f64,
    pub mechanization: f64,
    pub weather: f64,
    pub duration: f64,
    pub storage: f64,
}

impl ScoreBreakdown {
    pub fn compute(crop: &CropDefinition, range: &DurationRange, ctx: &ScoringContext) -> Self {
        Self {
            profit_ratio: crop.profit_ratio(),
            demand: demand_score(crop.market_demand),
            risk: risk_score(crop.risk_factor),
            water: water_efficiency_score(crop.water_efficiency),
            season: season_score(crop, ctx),
            export: export_score(crop.export_potential),
            mechanization: mechanization_score(crop.mechanization),
            weather: weather_score(crop, ctx),
            duration: duration_score(crop, range),
            storage: storage_score(crop.storage_life),
        }
    }

    pub fn weighted_sum(&self) -> f64 {
        self.profit_ratio * weights::PROFIT
            + self.demand * weights::DEMAND
            + self.risk * weights::RISK
            + self.water * weights::WATER
            + self.season * weights::SEASON
            + self.export * weights::EXPORT
            + self.mechanization * weights::MECHANIZATION
            + self.weather * weights::WEATHER
            + self.duration * weights::DURATION
            + self.storage * weights::STORAGE
    }

    /// Weighted sum scaled to 0-100 and rounded to 2 decimals
    pub fn base_score(&self) -> f64 {
        round2((self.weighted_sum() * 100.0).clamp(0.0, MAX_SCORE))
    }
}

/// Base (pre-rotation) smart score of a crop for a query
pub fn smart_score(crop: &CropDefinition, query: &FarmQuery, ctx: &ScoringContext) -> f64 {
    ScoreBreakdown::compute(crop, &query.duration_range(), ctx).base_score()
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
