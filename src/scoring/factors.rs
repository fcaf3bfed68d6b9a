//! Sub-score lookups
//!
//! Each factor maps one crop attribute (or a crop/query relation) to a small
//! multiplier around 1.0. The weighted combination lives in `scoring::mod`.

use crate::model::{CropDefinition, DurationRange, Level, Rating};
use crate::season::ScoringContext;

pub fn demand_score(demand: Rating) -> f64 {
    match demand {
        Rating::VeryHigh => 1.4,
        Rating::High => 1.3,
        Rating::Medium => 1.0,
        Rating::Low => 0.7,
    }
}

/// Inverted: lower risk scores higher
pub fn risk_score(risk: Level) -> f64 {
    match risk {
        Level::Low => 1.3,
        Level::Medium => 1.0,
        Level::High => 0.7,
    }
}

pub fn water_efficiency_score(efficiency: Rating) -> f64 {
    match efficiency {
        Rating::VeryHigh => 1.4,
        Rating::High => 1.2,
        Rating::Medium => 1.0,
        Rating::Low => 0.8,
    }
}

pub fn export_score(potential: Rating) -> f64 {
    match potential {
        Rating::VeryHigh => 1.3,
        Rating::High => 1.2,
        Rating::Medium => 1.0,
        Rating::Low => 0.9,
    }
}

/// More mechanization means lower labour cost
pub fn mechanization_score(level: Level) -> f64 {
    match level {
        Level::High => 1.2,
        Level::Medium => 1.0,
        Level::Low => 0.9,
    }
}

pub fn season_score(crop: &CropDefinition, ctx: &ScoringContext) -> f64 {
    if crop.suits_season(ctx.season) {
        1.2
    } else {
        0.8
    }
}

/// Neutral without weather data; otherwise rewards sowing in a planting month
pub fn weather_score(crop: &CropDefinition, ctx: &ScoringContext) -> f64 {
    if !ctx.weather_available {
        1.0
    } else if crop.is_planting_month(ctx.month) {
        1.15
    } else {
        0.95
    }
}

pub fn duration_score(crop: &CropDefinition, range: &DurationRange) -> f64 {
    if range.contains(crop.growing_duration) {
        1.1
    } else {
        0.9
    }
}

/// Longer shelf life is better
pub fn storage_score(storage_months: u32) -> f64 {
    if storage_months > 6 {
        1.1
    } else if storage_months > 3 {
        1.0
    } else {
        0.9
    }
}
