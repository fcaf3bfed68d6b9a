//! Crop rotation penalty
//!
//! Discourages planting a crop from the same botanical family as recent
//! cycles. History slots keep their position: a blank or unknown entry is a
//! cycle with no known family, it never matches and it breaks a
//! monoculture streak.

use super::round2;
use crate::data::CropCatalog;
use crate::model::HISTORY_DEPTH;

/// Same family in the last two cycles, applied to every candidate
pub const MONOCULTURE_MULTIPLIER: f64 = 0.6;

/// Candidate shares the family of the previous cycle, 2nd previous, 3rd previous
pub const REPEAT_MULTIPLIERS: [f64; HISTORY_DEPTH] = [0.01, 0.4, 0.8];

/// Resolved crop families of the last cycles, most recent first
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RotationHistory<'c> {
    families: [Option<&'c str>; HISTORY_DEPTH],
}

impl<'c> RotationHistory<'c> {
    /// Resolve crop names to families through the catalog
    pub fn resolve(previous_crops: &[String], catalog: &'c CropCatalog) -> Self {
        let mut families = [None; HISTORY_DEPTH];
        for (slot, name) in families.iter_mut().zip(previous_crops) {
            *slot = catalog.family_of(name);
        }
        Self { families }
    }

    /// Build directly from families (blank strings count as unknown)
    pub fn from_families(families: &[Option<&'c str>]) -> Self {
        let mut slots = [None; HISTORY_DEPTH];
        for (slot, family) in slots.iter_mut().zip(families) {
            *slot = (*family).filter(|f| !f.trim().is_empty());
        }
        Self { families: slots }
    }

    pub fn families(&self) -> &[Option<&'c str>; HISTORY_DEPTH] {
        &self.families
    }

    pub fn is_empty(&self) -> bool {
        self.families.iter().all(Option::is_none)
    }

    /// Both of the two most recent cycles resolved to the same family
    ///
    /// Slots 0 and 1 are compared in place. A blank or unknown slot 0 is a
    /// season the field was not under that family (fallow, or a crop outside
    /// the catalog), so `["", "Paddy", "Maize"]` is not two consecutive
    /// cereal seasons and does not count.
    pub fn is_monoculture(&self) -> bool {
        matches!(self.families, [Some(a), Some(b), _] if a == b)
    }
}

/// Harshest multiplier triggered for a candidate family (1.0 when none)
pub fn rotation_multiplier(candidate_family: &str, history: &RotationHistory<'_>) -> f64 {
    let mut multiplier: f64 = 1.0;

    if history.is_monoculture() {
        multiplier = multiplier.min(MONOCULTURE_MULTIPLIER);
    }

    // Only the most recent matching position counts
    let repeat = history
        .families
        .iter()
        .position(|f| *f == Some(candidate_family));
    if let Some(pos) = repeat {
        multiplier = multiplier.min(REPEAT_MULTIPLIERS[pos]);
    }

    multiplier
}

/// Apply the rotation multiplier to a base score, rounded to 2 decimals
pub fn penalize(base_score: f64, candidate_family: &str, history: &RotationHistory<'_>) -> f64 {
    round2(base_score * rotation_multiplier(candidate_family, history)).max(0.0)
}
