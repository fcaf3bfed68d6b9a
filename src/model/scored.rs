//! Scored recommendation records
//!
//! Created fresh for each recommendation call and handed to the caller.
//! The crop itself is borrowed from the shared catalog.

use super::crop::CropDefinition;
use crate::weather::SeasonalOutlook;
use serde::Serialize;

/// A catalog crop with its score for one farm query
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredCrop<'a> {
    /// Original crop attributes
    #[serde(flatten)]
    pub crop: &'a CropDefinition,

    /// Weighted score before the rotation penalty
    pub base_score: f64,

    /// Harshest rotation multiplier that applied (1.0 = no penalty)
    pub rotation_multiplier: f64,

    /// Final score in [0, 100]
    pub smart_score: f64,

    /// Per-acre profit (yield × price − investment)
    pub profit: f64,

    /// 1-based position in the ranked list; 0 until ranked
    pub rank: usize,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub planting_weather: Option<SeasonalOutlook>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub harvest_weather: Option<SeasonalOutlook>,
}

impl<'a> ScoredCrop<'a> {
    pub fn name(&self) -> &'a str {
        &self.crop.name
    }

    /// Same record at a new list position
    pub fn at_rank(self, rank: usize) -> Self {
        Self { rank, ..self }
    }
}
