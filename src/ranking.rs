//! Ranking and display filtering
//!
//! The default order is smart score, highest first. An alternate sort key
//! replaces that order entirely; keys are never combined. Sorting is stable,
//! so ties keep catalog order.

use crate::model::{CropDefinition, Level, Rating, ScoredCrop};
use serde::de::{DeserializeOwned, IntoDeserializer};
use serde::{Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;

/// Ordering requested by the caller
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    /// Smart score, descending
    #[default]
    SmartScore,
    /// Per-acre profit, descending
    Profit,
    /// Risk factor, Low first
    Risk,
    /// Water efficiency, Low first
    #[serde(alias = "water")]
    WaterEfficiency,
}

impl SortKey {
    fn compare(self, a: &ScoredCrop<'_>, b: &ScoredCrop<'_>) -> Ordering {
        match self {
            SortKey::SmartScore => b.smart_score.total_cmp(&a.smart_score),
            SortKey::Profit => b.profit.total_cmp(&a.profit),
            SortKey::Risk => a.crop.risk_factor.cmp(&b.crop.risk_factor),
            SortKey::WaterEfficiency => a.crop.water_efficiency.cmp(&b.crop.water_efficiency),
        }
    }
}

/// Sort by `key` and assign 1-based ranks
pub fn rank(mut scored: Vec<ScoredCrop<'_>>, key: SortKey) -> Vec<ScoredCrop<'_>> {
    scored.sort_by(|a, b| key.compare(a, b));
    renumber(scored)
}

fn renumber(list: Vec<ScoredCrop<'_>>) -> Vec<ScoredCrop<'_>> {
    list.into_iter()
        .enumerate()
        .map(|(i, s)| s.at_rank(i + 1))
        .collect()
}

/// Optional post-ranking filters offered next to the result list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DisplayFilters {
    /// Keep only crops with exactly this risk level
    #[serde(
        default,
        rename = "riskFilter",
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub risk: Option<Level>,

    /// Keep crops whose efficiency label contains this label,
    /// so `High` also keeps `Very High`
    #[serde(
        default,
        rename = "waterFilter",
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub water_efficiency: Option<Rating>,
}

/// Select fields arrive as "" when nothing is chosen
pub(crate) fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(label) => T::deserialize(label.into_deserializer()).map(Some),
    }
}

/// Blank or null `sortBy` means the default order
pub(crate) fn deserialize_sort_key<'de, D>(deserializer: D) -> Result<SortKey, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(blank_as_none(deserializer)?.unwrap_or_default())
}

impl DisplayFilters {
    pub fn is_empty(&self) -> bool {
        self.risk.is_none() && self.water_efficiency.is_none()
    }

    pub fn matches(&self, crop: &CropDefinition) -> bool {
        let risk_ok = self.risk.map_or(true, |r| crop.risk_factor == r);
        let water_ok = self
            .water_efficiency
            .map_or(true, |w| crop.water_efficiency.label().contains(w.label()));
        risk_ok && water_ok
    }
}

/// Drop crops that fail the display filters; ranks follow the shown order
pub fn apply_display_filters<'a>(
    ranked: Vec<ScoredCrop<'a>>,
    filters: &DisplayFilters,
) -> Vec<ScoredCrop<'a>> {
    if filters.is_empty() {
        return ranked;
    }
    renumber(ranked.into_iter().filter(|s| filters.matches(s.crop)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::crop::fixtures::crop;

    fn scored<'a>(crop: &'a CropDefinition, smart_score: f64) -> ScoredCrop<'a> {
        ScoredCrop {
            crop,
            base_score: smart_score,
            rotation_multiplier: 1.0,
            smart_score,
            profit: crop.profit(),
            rank: 0,
            planting_weather: None,
            harvest_weather: None,
        }
    }

    fn crops() -> Vec<CropDefinition> {
        let mut a = crop("A", "F1");
        a.risk_factor = Level::High;
        a.water_efficiency = Rating::VeryHigh;
        a.avg_yield = 10.0; // profit 0

        let mut b = crop("B", "F2");
        b.risk_factor = Level::Low;
        b.water_efficiency = Rating::High;
        b.avg_yield = 30.0; // profit 40000

        let mut c = crop("C", "F3");
        c.risk_factor = Level::Medium;
        c.water_efficiency = Rating::Low;
        c.avg_yield = 20.0; // profit 20000

        vec![a, b, c]
    }

    fn names<'a>(list: &[ScoredCrop<'a>]) -> Vec<&'a str> {
        list.iter().map(|s| s.name()).collect()
    }

    #[test]
    fn test_default_rank_by_score() {
        let cs = crops();
        let list = vec![scored(&cs[0], 70.0), scored(&cs[1], 85.5), scored(&cs[2], 60.0)];
        let ranked = rank(list, SortKey::default());

        assert_eq!(names(&ranked), vec!["B", "A", "C"]);
        let ranks: Vec<usize> = ranked.iter().map(|s| s.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
    }

    #[test]
    fn test_alternate_keys_ignore_score() {
        let cs = crops();
        let list = || vec![scored(&cs[0], 99.0), scored(&cs[1], 10.0), scored(&cs[2], 50.0)];

        assert_eq!(names(&rank(list(), SortKey::Profit)), vec!["B", "C", "A"]);
        assert_eq!(names(&rank(list(), SortKey::Risk)), vec!["B", "C", "A"]);
        assert_eq!(names(&rank(list(), SortKey::WaterEfficiency)), vec!["C", "B", "A"]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let cs = crops();
        let list = vec![scored(&cs[0], 50.0), scored(&cs[1], 50.0), scored(&cs[2], 50.0)];
        assert_eq!(names(&rank(list, SortKey::SmartScore)), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_sort_key_names() {
        let key: SortKey = serde_json::from_str(r#""water""#).unwrap();
        assert_eq!(key, SortKey::WaterEfficiency);
        let key: SortKey = serde_json::from_str(r#""smartScore""#).unwrap();
        assert_eq!(key, SortKey::SmartScore);
    }

    #[test]
    fn test_blank_filters_mean_no_filter() {
        let filters: DisplayFilters =
            serde_json::from_str(r#"{"riskFilter": "", "waterFilter": " "}"#).unwrap();
        assert!(filters.is_empty());

        let filters: DisplayFilters =
            serde_json::from_str(r#"{"riskFilter": null, "waterFilter": "Very High"}"#).unwrap();
        assert_eq!(filters.risk, None);
        assert_eq!(filters.water_efficiency, Some(Rating::VeryHigh));

        assert!(serde_json::from_str::<DisplayFilters>(r#"{"riskFilter": "Extreme"}"#).is_err());
    }

    #[test]
    fn test_display_filters() {
        let cs = crops();
        let ranked = rank(
            vec![scored(&cs[0], 70.0), scored(&cs[1], 85.5), scored(&cs[2], 60.0)],
            SortKey::SmartScore,
        );

        let high_water = DisplayFilters { risk: None, water_efficiency: Some(Rating::High) };
        let shown = apply_display_filters(ranked.clone(), &high_water);
        assert_eq!(names(&shown), vec!["B", "A"]);
        assert_eq!(shown[1].rank, 2);

        let low_risk = DisplayFilters { risk: Some(Level::Medium), water_efficiency: None };
        let shown = apply_display_filters(ranked.clone(), &low_risk);
        assert_eq!(names(&shown), vec!["C"]);
        assert_eq!(shown[0].rank, 1);

        let none = DisplayFilters::default();
        assert_eq!(apply_display_filters(ranked.clone(), &none), ranked);
    }
}
