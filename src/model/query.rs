//! Farm query snapshot
//!
//! A `FarmQuery` is everything the farmer told the portal, captured once per
//! request. Optional fields fall back to permissive defaults; only `district`
//! and `soilType` are required (see `FarmQuery::validate`).

use super::crop::WaterTier;
use crate::error::RecommendError;
use serde::{Deserialize, Deserializer, Serialize};
use smallvec::SmallVec;

/// Number of past cropping cycles the rotation penalty looks at
pub const HISTORY_DEPTH: usize = 3;

/// Water source labels offered by the portal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WaterSource {
    Rainwater,
    #[serde(rename = "Pond/Well")]
    PondWell,
    #[serde(rename = "Borewell/Tubewell")]
    BorewellTubewell,
    #[serde(rename = "Canal Irrigation")]
    CanalIrrigation,
    /// Any label the portal does not know; contributes no water tier
    #[serde(other)]
    Other,
}

impl WaterSource {
    pub fn tier(self) -> Option<WaterTier> {
        match self {
            WaterSource::Rainwater | WaterSource::PondWell => Some(WaterTier::Low),
            WaterSource::BorewellTubewell => Some(WaterTier::Medium),
            WaterSource::CanalIrrigation => Some(WaterTier::High),
            WaterSource::Other => None,
        }
    }
}

/// Water tiers the farmer has access to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WaterAvailability {
    pub low: bool,
    pub medium: bool,
    pub high: bool,
}

impl WaterAvailability {
    pub fn from_sources(sources: &[WaterSource]) -> Self {
        sources
            .iter()
            .filter_map(|s| s.tier())
            .fold(Self::default(), |mut acc, tier| {
                match tier {
                    WaterTier::Low => acc.low = true,
                    WaterTier::Medium => acc.medium = true,
                    WaterTier::High => acc.high = true,
                }
                acc
            })
    }

    /// A higher tier of supply also covers every lower requirement
    pub fn permits(&self, requirement: WaterTier) -> bool {
        match requirement {
            WaterTier::High => self.high,
            WaterTier::Medium => self.high || self.medium,
            WaterTier::Low => self.high || self.medium || self.low,
        }
    }
}

/// Inclusive growing-duration preference in months
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DurationRange {
    pub min: u32,
    pub max: u32,
}

impl Default for DurationRange {
    fn default() -> Self {
        Self {
            min: Self::DEFAULT_MIN,
            max: Self::DEFAULT_MAX,
        }
    }
}

impl DurationRange {
    pub const DEFAULT_MIN: u32 = 1;
    pub const DEFAULT_MAX: u32 = 999;

    /// Parse "min-max"
    ///
    /// Each bound falls back on its own: a missing, unparseable or zero lower
    /// bound becomes 1 and the same for the upper bound becomes 999. Absent
    /// input yields the full `[1, 999]` range.
    pub fn parse(input: Option<&str>) -> Self {
        let Some(text) = input else {
            return Self::default();
        };

        let mut parts = text.split('-').map(|p| p.trim().parse::<u32>().ok().filter(|v| *v > 0));
        let min = parts.next().flatten().unwrap_or(Self::DEFAULT_MIN);
        let max = parts.next().flatten().unwrap_or(Self::DEFAULT_MAX);
        Self { min, max }
    }

    pub fn contains(&self, months: u32) -> bool {
        self.min <= months && months <= self.max
    }
}

/// Everything the farmer entered, as one immutable snapshot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FarmQuery {
    pub district: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    pub soil_type: String,

    pub water_sources: Vec<WaterSource>,

    /// Ceiling on per-acre investment; `None` means no ceiling
    #[serde(deserialize_with = "deserialize_budget")]
    pub investment_budget: Option<f64>,

    /// "min-max" in months, e.g. "4-6"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub growing_duration: Option<String>,

    /// Crop names, most recent first; blank entries mean fallow/unknown
    pub previous_crops: SmallVec<[String; HISTORY_DEPTH]>,
}

impl FarmQuery {
    pub fn new(district: impl Into<String>, soil_type: impl Into<String>) -> Self {
        Self {
            district: district.into(),
            soil_type: soil_type.into(),
            ..Self::default()
        }
    }

    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    pub fn with_water_sources(mut self, sources: &[WaterSource]) -> Self {
        self.water_sources = sources.to_vec();
        self
    }

    pub fn with_budget(mut self, budget: f64) -> Self {
        self.investment_budget = Some(budget);
        self
    }

    pub fn with_duration(mut self, range: impl Into<String>) -> Self {
        self.growing_duration = Some(range.into());
        self
    }

    pub fn with_previous_crops<S: AsRef<str>>(mut self, crops: &[S]) -> Self {
        self.previous_crops = crops.iter().map(|c| c.as_ref().to_string()).collect();
        self
    }

    /// Reject queries missing a structurally required field
    pub fn validate(&self) -> Result<(), RecommendError> {
        if self.district.trim().is_empty() {
            return Err(RecommendError::MissingField("district"));
        }
        if self.soil_type.trim().is_empty() {
            return Err(RecommendError::MissingField("soilType"));
        }
        Ok(())
    }

    pub fn duration_range(&self) -> DurationRange {
        DurationRange::parse(self.growing_duration.as_deref())
    }

    pub fn water_availability(&self) -> WaterAvailability {
        WaterAvailability::from_sources(&self.water_sources)
    }

    pub fn within_budget(&self, investment: f64) -> bool {
        self.investment_budget.map_or(true, |budget| investment <= budget)
    }

    /// Up to `HISTORY_DEPTH` most recent entries
    pub fn recent_history(&self) -> &[String] {
        let n = self.previous_crops.len().min(HISTORY_DEPTH);
        &self.previous_crops[..n]
    }
}

/// Budgets arrive from web forms as numbers, numeric strings, "" or null
fn deserialize_budget<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BudgetRepr {
        Number(f64),
        Text(String),
    }

    let budget = match Option::<BudgetRepr>::deserialize(deserializer)? {
        None => return Ok(None),
        Some(BudgetRepr::Number(n)) => n,
        Some(BudgetRepr::Text(s)) if s.trim().is_empty() => return Ok(None),
        Some(BudgetRepr::Text(s)) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| serde::de::Error::custom(format!("invalid investmentBudget: {s:?}")))?,
    };

    // "NaN" and "inf" parse as f64 but are not a ceiling
    if !budget.is_finite() {
        return Err(serde::de::Error::custom(format!(
            "investmentBudget must be a finite number, got {budget}"
        )));
    }
    Ok(Some(budget))
}
