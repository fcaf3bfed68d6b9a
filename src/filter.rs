//! Hard constraint filter
//!
//! Pass/fail eligibility predicates applied before scoring. A crop failing
//! any of them is excluded outright, never down-scored.

use crate::data::{CropCatalog, DistrictEligibilityIndex};
use crate::model::{CropDefinition, DurationRange, FarmQuery, WaterAvailability};
use crate::season::Season;

/// Which hard constraint rejected a crop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    District,
    Season,
    Soil,
    Duration,
    Budget,
    Water,
}

/// Query-derived values shared by every per-crop check
#[derive(Debug, Clone)]
pub struct HardConstraints<'q> {
    query: &'q FarmQuery,
    season: Season,
    duration: DurationRange,
    water: WaterAvailability,
}

impl<'q> HardConstraints<'q> {
    pub fn new(query: &'q FarmQuery, season: Season) -> Self {
        Self {
            query,
            season,
            duration: query.duration_range(),
            water: query.water_availability(),
        }
    }

    /// First constraint (in evaluation order) the crop fails, if any
    pub fn first_violation(
        &self,
        crop: &CropDefinition,
        index: &DistrictEligibilityIndex,
    ) -> Option<Constraint> {
        if !index.is_eligible(self.query.district.trim(), &crop.name) {
            return Some(Constraint::District);
        }
        if !crop.passes_season_gate(self.season) {
            return Some(Constraint::Season);
        }
        if !crop.grows_in_soil(self.query.soil_type.trim()) {
            return Some(Constraint::Soil);
        }
        if !self.duration.contains(crop.growing_duration) {
            return Some(Constraint::Duration);
        }
        if !self.query.within_budget(crop.investment) {
            return Some(Constraint::Budget);
        }
        if !self.water.permits(crop.water) {
            return Some(Constraint::Water);
        }
        None
    }

    pub fn admits(&self, crop: &CropDefinition, index: &DistrictEligibilityIndex) -> bool {
        self.first_violation(crop, index).is_none()
    }
}

/// Crops eligible for the query, in catalog order
///
/// An unknown district or an over-constrained query yields an empty list.
pub fn filter_eligible<'c>(
    query: &FarmQuery,
    catalog: &'c CropCatalog,
    index: &DistrictEligibilityIndex,
    season: Season,
) -> Vec<&'c CropDefinition> {
    let constraints = HardConstraints::new(query, season);
    catalog
        .iter()
        .filter(|crop| constraints.admits(crop, index))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::crop::fixtures::crop;
    use crate::model::{WaterSource, WaterTier};

    fn setup() -> (CropCatalog, DistrictEligibilityIndex) {
        let mut paddy = crop("Paddy", "Poaceae");
        paddy.water = WaterTier::High;
        paddy.investment = 25000.0;

        let mut maize = crop("Maize", "Poaceae");
        maize.water = WaterTier::Medium;

        let mut wheat = crop("Wheat", "Poaceae");
        wheat.seasons = vec![Season::Rabi];

        let mut sugarcane = crop("Sugarcane", "Poaceae");
        sugarcane.seasons = vec![Season::Annual];
        sugarcane.growing_duration = 12;

        let mut groundnut = crop("Groundnut", "Fabaceae");
        groundnut.soil = vec!["Sandy".into()];

        let catalog =
            CropCatalog::from_crops(vec![paddy, maize, wheat, sugarcane, groundnut]).unwrap();
        let index = DistrictEligibilityIndex::from_map([(
            "Medak",
            vec!["Paddy", "Maize", "Wheat", "Sugarcane", "Groundnut"],
        )]);
        (catalog, index)
    }

    fn names(crops: &[&CropDefinition]) -> Vec<String> {
        crops.iter().map(|c| c.name.clone()).collect()
    }

    #[test]
    fn test_all_constraints_kharif_canal() {
        let (catalog, index) = setup();
        let query = FarmQuery::new("Medak", "Loamy")
            .with_water_sources(&[WaterSource::CanalIrrigation])
            .with_budget(50000.0)
            .with_duration("4-6");

        let eligible = filter_eligible(&query, &catalog, &index, Season::Kharif);
        assert_eq!(names(&eligible), vec!["Paddy", "Maize"]);
    }

    #[test]
    fn test_unknown_district_is_empty() {
        let (catalog, index) = setup();
        let query = FarmQuery::new("Nowhereville", "Loamy")
            .with_water_sources(&[WaterSource::CanalIrrigation]);
        assert!(filter_eligible(&query, &catalog, &index, Season::Kharif).is_empty());
    }

    #[test]
    fn test_annual_crop_passes_any_season() {
        let (catalog, index) = setup();
        let query = FarmQuery::new("Medak", "Loamy")
            .with_water_sources(&[WaterSource::Rainwater]);

        let eligible = filter_eligible(&query, &catalog, &index, Season::Zaid);
        assert_eq!(names(&eligible), vec!["Sugarcane"]);
    }

    #[test]
    fn test_water_tiers() {
        let (catalog, index) = setup();
        let query = FarmQuery::new("Medak", "Loamy")
            .with_water_sources(&[WaterSource::BorewellTubewell]);

        let eligible = filter_eligible(&query, &catalog, &index, Season::Kharif);
        // Paddy needs canal water
        assert_eq!(names(&eligible), vec!["Maize", "Sugarcane"]);

        let dry = FarmQuery::new("Medak", "Loamy");
        assert!(filter_eligible(&dry, &catalog, &index, Season::Kharif).is_empty());
    }

    #[test]
    fn test_budget_and_duration() {
        let (catalog, index) = setup();
        let query = FarmQuery::new("Medak", "Loamy")
            .with_water_sources(&[WaterSource::CanalIrrigation])
            .with_budget(20000.0)
            .with_duration("1-3");
        assert!(filter_eligible(&query, &catalog, &index, Season::Kharif).is_empty());

        let query = query.with_duration("4-6");
        assert_eq!(
            names(&filter_eligible(&query, &catalog, &index, Season::Kharif)),
            vec!["Maize"]
        );
    }

    #[test]
    fn test_first_violation_reports_reason() {
        let (catalog, index) = setup();
        let query = FarmQuery::new("Medak", "Loamy")
            .with_water_sources(&[WaterSource::Rainwater])
            .with_budget(50000.0);
        let constraints = HardConstraints::new(&query, Season::Kharif);

        let reason = |name: &str| constraints.first_violation(catalog.get(name).unwrap(), &index);
        assert_eq!(reason("Wheat"), Some(Constraint::Season));
        assert_eq!(reason("Groundnut"), Some(Constraint::Soil));
        assert_eq!(reason("Paddy"), Some(Constraint::Water));
        assert_eq!(reason("Maize"), Some(Constraint::Water));
        assert_eq!(reason("Sugarcane"), None);

        let query = query.with_budget(10000.0);
        let constraints = HardConstraints::new(&query, Season::Kharif);
        assert_eq!(
            constraints.first_violation(catalog.get("Sugarcane").unwrap(), &index),
            Some(Constraint::Budget)
        );
    }
}
