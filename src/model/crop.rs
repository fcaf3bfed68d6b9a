//! Crop catalog entries
//!
//! Ordinal catalog attributes are closed enums. Unrecognised labels fail
//! deserialization, so a bad catalog is rejected at load time instead of
//! silently scoring as neutral.

use crate::error::CatalogError;
use crate::season::Season;
use serde::{Deserialize, Deserializer, Serialize};

/// Four-level ordinal used for demand, water efficiency and export potential
///
/// Ordering follows declaration: Low < Medium < High < VeryHigh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rating {
    Low,
    Medium,
    High,
    #[serde(rename = "Very High", alias = "VeryHigh")]
    VeryHigh,
}

impl Rating {
    pub fn label(self) -> &'static str {
        match self {
            Rating::Low => "Low",
            Rating::Medium => "Medium",
            Rating::High => "High",
            Rating::VeryHigh => "Very High",
        }
    }
}

/// Three-level ordinal used for risk and mechanization (Low < Medium < High)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Level {
    Low,
    Medium,
    High,
}

/// Irrigation requirement of a crop
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WaterTier {
    Low,
    Medium,
    High,
}

/// One immutable catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CropDefinition {
    /// Unique key
    pub name: String,

    /// Cereal, Pulse, Oilseed, ... (display only)
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub crop_type: Option<String>,

    /// Botanical family used by the rotation penalty (e.g. "Poaceae")
    pub crop_family: String,

    /// Soil types the crop grows in
    pub soil: Vec<String>,

    pub water: WaterTier,

    /// Months from sowing to harvest
    pub growing_duration: u32,

    pub planting_months: Vec<u8>,
    pub harvest_months: Vec<u8>,

    /// Input cost per acre
    pub investment: f64,

    /// Yield per acre (quintals)
    pub avg_yield: f64,

    /// Price per quintal; accepts a number or a display string like "₹2,200/quintal"
    #[serde(deserialize_with = "deserialize_market_price")]
    pub market_price: f64,

    pub market_demand: Rating,
    pub risk_factor: Level,
    pub water_efficiency: Rating,
    pub export_potential: Rating,
    pub mechanization: Level,

    /// Months the harvested produce keeps
    pub storage_life: u32,

    /// Ordered; a leading Annual/Perennial tag lets the crop pass any season
    pub seasons: Vec<Season>,

    #[serde(default)]
    pub inter_cropping: Vec<String>,

    #[serde(default)]
    pub varieties: Vec<String>,

    #[serde(default)]
    pub common_risks: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nutritional_value: Option<String>,
}

impl CropDefinition {
    /// Gross return minus investment, per acre
    pub fn profit(&self) -> f64 {
        self.avg_yield * self.market_price - self.investment
    }

    /// Profit relative to investment
    ///
    /// Zero investment cannot be divided by; it resolves to 1.0 when the crop
    /// still makes a profit and 0.0 otherwise.
    pub fn profit_ratio(&self) -> f64 {
        let profit = self.profit();
        if self.investment > 0.0 {
            profit / self.investment
        } else if profit > 0.0 {
            1.0
        } else {
            0.0
        }
    }

    pub fn grows_in_soil(&self, soil_type: &str) -> bool {
        self.soil.iter().any(|s| s == soil_type)
    }

    /// True if any season tag matches, or the crop is tagged Annual/Perennial anywhere
    pub fn suits_season(&self, season: Season) -> bool {
        self.seasons
            .iter()
            .any(|s| *s == season || s.is_year_round())
    }

    /// True if the current season is listed, or the primary (first) tag is year-round
    pub fn passes_season_gate(&self, season: Season) -> bool {
        self.seasons.contains(&season)
            || self.seasons.first().is_some_and(|s| s.is_year_round())
    }

    pub fn is_planting_month(&self, month: u32) -> bool {
        self.planting_months.iter().any(|m| u32::from(*m) == month)
    }

    /// Check the per-entry catalog invariants
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.name.trim().is_empty() {
            return Err(CatalogError::EmptyName);
        }
        if self.crop_family.trim().is_empty() {
            return Err(CatalogError::EmptyFamily(self.name.clone()));
        }
        if self.seasons.is_empty() {
            return Err(CatalogError::NoSeasons(self.name.clone()));
        }
        let bad_month = self
            .planting_months
            .iter()
            .chain(&self.harvest_months)
            .find(|m| !(1..=12).contains(*m));
        if let Some(&month) = bad_month {
            return Err(CatalogError::InvalidMonth {
                crop: self.name.clone(),
                month,
            });
        }
        Ok(())
    }
}

/// Extract the first numeric run from a price label, ignoring thousands separators
///
/// "₹2,200/quintal" -> 2200.0, "1850.5" -> 1850.5, "N/A" -> 0.0
pub fn parse_market_price(label: &str) -> f64 {
    let cleaned: String = label.chars().filter(|c| *c != ',').collect();
    let start = match cleaned.find(|c: char| c.is_ascii_digit()) {
        Some(i) => i,
        None => return 0.0,
    };
    let rest = &cleaned[start..];
    let mut seen_dot = false;
    let end = rest
        .char_indices()
        .find(|&(_, c)| {
            if c == '.' && !seen_dot {
                seen_dot = true;
                false
            } else {
                !c.is_ascii_digit()
            }
        })
        .map(|(i, _)| i)
        .unwrap_or(rest.len());
    rest[..end].trim_end_matches('.').parse().unwrap_or(0.0)
}

fn deserialize_market_price<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum PriceRepr {
        Number(f64),
        Label(String),
    }

    Ok(match PriceRepr::deserialize(deserializer)? {
        PriceRepr::Number(n) => n,
        PriceRepr::Label(s) => parse_market_price(&s),
    })
}


#[cfg(test)]
mod tests {
    use super::fixtures::crop;
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parse_market_price() {
        assert_relative_eq!(parse_market_price("₹2,200/quintal"), 2200.0);
        assert_relative_eq!(parse_market_price("1850.5"), 1850.5);
        assert_relative_eq!(parse_market_price("₹2,000-2,500/quintal"), 2000.0);
        assert_relative_eq!(parse_market_price("Rs. 45/kg"), 45.0);
        assert_relative_eq!(parse_market_price("N/A"), 0.0);
        assert_relative_eq!(parse_market_price(""), 0.0);
    }

    #[test]
    fn test_deserialize_catalog_entry() {
        let json = r#"{
            "name": "Paddy",
            "type": "Cereal",
            "cropFamily": "Poaceae",
            "soil": ["Clayey", "Loamy"],
            "water": "high",
            "growingDuration": 4,
            "plantingMonths": [6, 7],
            "harvestMonths": [10, 11],
            "investment": 25000,
            "avgYield": 22,
            "marketPrice": "₹2,183/quintal",
            "marketDemand": "Very High",
            "riskFactor": "Medium",
            "waterEfficiency": "Low",
            "exportPotential": "High",
            "mechanization": "High",
            "storageLife": 12,
            "seasons": ["Kharif"]
        }"#;

        let paddy: CropDefinition = serde_json::from_str(json).unwrap();
        assert_eq!(paddy.crop_type.as_deref(), Some("Cereal"));
        assert_eq!(paddy.water, WaterTier::High);
        assert_eq!(paddy.market_demand, Rating::VeryHigh);
        assert_relative_eq!(paddy.market_price, 2183.0);
        assert!(paddy.inter_cropping.is_empty());
        assert!(paddy.validate().is_ok());
    }

    #[test]
    fn test_unknown_ordinal_is_rejected() {
        let json = r#"{
            "name": "Mystery", "cropFamily": "X", "soil": [], "water": "low",
            "growingDuration": 3, "plantingMonths": [], "harvestMonths": [],
            "investment": 1, "avgYield": 1, "marketPrice": 1,
            "marketDemand": "Extreme", "riskFactor": "Low", "waterEfficiency": "Low",
            "exportPotential": "Low", "mechanization": "Low", "storageLife": 1,
            "seasons": ["Rabi"]
        }"#;
        assert!(serde_json::from_str::<CropDefinition>(json).is_err());
    }

    #[test]
    fn test_rating_order() {
        assert!(Rating::Low < Rating::Medium);
        assert!(Rating::High < Rating::VeryHigh);
        assert!(Level::Medium < Level::High);
    }

    #[test]
    fn test_profit_ratio_division_guard() {
        let mut c = crop("Free", "F");
        c.investment = 0.0;
        c.avg_yield = 10.0;
        c.market_price = 100.0;
        assert_relative_eq!(c.profit_ratio(), 1.0);

        c.avg_yield = 0.0;
        assert_relative_eq!(c.profit_ratio(), 0.0);

        let mut c = crop("Paid", "F");
        c.investment = 10000.0;
        c.avg_yield = 10.0;
        c.market_price = 1500.0;
        assert_relative_eq!(c.profit_ratio(), 0.5);
    }

    #[test]
    fn test_season_gates() {
        let mut c = crop("Sugarcane", "Poaceae");
        c.seasons = vec![Season::Annual, Season::Kharif];
        assert!(c.passes_season_gate(Season::Rabi));
        assert!(c.suits_season(Season::Rabi));

        // Year-round tag in a secondary position scores well but does not open the gate
        c.seasons = vec![Season::Kharif, Season::Perennial];
        assert!(!c.passes_season_gate(Season::Rabi));
        assert!(c.suits_season(Season::Rabi));
    }

    #[test]
    fn test_validate_invariants() {
        let mut c = crop("Wheat", "  ");
        assert_eq!(c.validate(), Err(CatalogError::EmptyFamily("Wheat".into())));

        c.crop_family = "Poaceae".into();
        c.harvest_months = vec![13];
        assert_eq!(
            c.validate(),
            Err(CatalogError::InvalidMonth { crop: "Wheat".into(), month: 13 })
        );
    }
}
