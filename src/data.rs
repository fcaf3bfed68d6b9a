//! Data Loading and Management
//!
//! Loads the crop catalog and the district eligibility index from JSON.
//! Both are read once at start-up and shared read-only afterwards.

use crate::error::CatalogError;
use crate::model::CropDefinition;
use anyhow::{Context, Result};
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Immutable list of crop definitions, keyed by name
#[derive(Debug, Clone, Default)]
pub struct CropCatalog {
    crops: Vec<CropDefinition>,
    by_name: FxHashMap<String, usize>,
}

impl CropCatalog {
    /// Build a catalog, checking per-entry invariants and name uniqueness
    pub fn from_crops(crops: Vec<CropDefinition>) -> Result<Self, CatalogError> {
        let mut by_name = FxHashMap::default();
        for (idx, crop) in crops.iter().enumerate() {
            crop.validate()?;
            if by_name.insert(crop.name.clone(), idx).is_some() {
                return Err(CatalogError::DuplicateCrop(crop.name.clone()));
            }
        }
        Ok(Self { crops, by_name })
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let crops: Vec<CropDefinition> =
            serde_json::from_str(json).with_context(|| "Failed to parse crop catalog JSON")?;
        Ok(Self::from_crops(crops)?)
    }

    /// Load catalog from a JSON array of crop definitions
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read crop catalog: {:?}", path))?;
        let catalog = Self::from_json_str(&contents)
            .with_context(|| format!("Invalid crop catalog: {:?}", path))?;
        tracing::info!("Loaded {} crops from {:?}", catalog.len(), path);
        Ok(catalog)
    }

    pub fn get(&self, name: &str) -> Option<&CropDefinition> {
        self.by_name.get(name).map(|&idx| &self.crops[idx])
    }

    /// Crop family for a crop name; blank or unknown names resolve to `None`
    pub fn family_of(&self, name: &str) -> Option<&str> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        self.get(name).map(|c| c.crop_family.as_str())
    }

    /// Entries in catalog order
    pub fn iter(&self) -> impl Iterator<Item = &CropDefinition> {
        self.crops.iter()
    }

    pub fn crops(&self) -> &[CropDefinition] {
        &self.crops
    }

    pub fn len(&self) -> usize {
        self.crops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.crops.is_empty()
    }
}

/// District → names of crops historically grown there
#[derive(Debug, Clone, Default)]
pub struct DistrictEligibilityIndex {
    districts: FxHashMap<String, FxHashSet<String>>,
}

impl DistrictEligibilityIndex {
    pub fn from_map<I, D, C>(entries: I) -> Self
    where
        I: IntoIterator<Item = (D, Vec<C>)>,
        D: Into<String>,
        C: Into<String>,
    {
        let districts = entries
            .into_iter()
            .map(|(district, crops)| {
                (district.into(), crops.into_iter().map(Into::into).collect())
            })
            .collect();
        Self { districts }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: BTreeMap<String, Vec<String>> = serde_json::from_str(json)
            .with_context(|| "Failed to parse district crops JSON")?;
        Ok(Self::from_map(raw))
    }

    /// Load from a JSON object `{ "District": ["Crop", ...], ... }`
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read district crops: {:?}", path))?;
        let index = Self::from_json_str(&contents)
            .with_context(|| format!("Invalid district crops: {:?}", path))?;
        tracing::info!("Loaded crop lists for {} districts from {:?}", index.len(), path);
        Ok(index)
    }

    /// Crops grown in a district; `None` for an unknown district
    pub fn crops_for(&self, district: &str) -> Option<&FxHashSet<String>> {
        self.districts.get(district)
    }

    pub fn is_eligible(&self, district: &str, crop_name: &str) -> bool {
        self.crops_for(district)
            .is_some_and(|crops| crops.contains(crop_name))
    }

    /// Sorted crop names for a district (empty for an unknown district)
    pub fn sorted_crops_for(&self, district: &str) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .crops_for(district)
            .map(|set| set.iter().map(String::as_str).collect())
            .unwrap_or_default();
        names.sort_unstable();
        names
    }

    pub fn districts(&self) -> impl Iterator<Item = &str> {
        self.districts.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.districts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.districts.is_empty()
    }
}

/// Catalog plus district index, as loaded from a data directory
pub struct AdvisorData {
    pub catalog: CropCatalog,
    pub districts: DistrictEligibilityIndex,
}

impl AdvisorData {
    pub const CATALOG_FILE: &'static str = "crops.json";
    pub const DISTRICTS_FILE: &'static str = "district_crops.json";

    /// Load `crops.json` and `district_crops.json` from `data_dir`
    pub fn load(data_dir: &Path) -> Result<Self> {
        let catalog = CropCatalog::load(&data_dir.join(Self::CATALOG_FILE))?;
        let districts = DistrictEligibilityIndex::load(&data_dir.join(Self::DISTRICTS_FILE))?;

        let data = Self { catalog, districts };
        data.warn_unknown_crops();
        Ok(data)
    }

    // Names in the index that the catalog lacks can never be recommended
    fn warn_unknown_crops(&self) {
        for district in self.districts.districts() {
            for name in self.districts.sorted_crops_for(district) {
                if self.catalog.get(name).is_none() {
                    tracing::warn!("District '{}' lists crop '{}' missing from catalog", district, name);
                }
            }
        }
    }
}
