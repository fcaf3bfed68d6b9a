//! Crop Recommender - main coordinator for the recommendation pipeline
//!
//! query → hard constraints → smart score → rotation penalty → ranking
//!
//! Every call is independent: the catalog and district index are read-only
//! and shared, and all per-call records are owned by the call.

use crate::data::{AdvisorData, CropCatalog, DistrictEligibilityIndex};
use crate::error::RecommendError;
use crate::filter::filter_eligible;
use crate::model::{CropDefinition, DurationRange, FarmQuery, ScoredCrop};
use crate::ranking::{apply_display_filters, rank, DisplayFilters, SortKey};
use crate::scoring::{penalize, rotation_multiplier, RotationHistory, ScoreBreakdown};
use crate::season::ScoringContext;
use crate::weather::seasonal_outlook;
use anyhow::Result;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

/// Presentation options for one call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecommendOptions {
    #[serde(deserialize_with = "crate::ranking::deserialize_sort_key")]
    pub sort_by: SortKey,
    #[serde(flatten)]
    pub filters: DisplayFilters,
    /// Attach planting/harvest weather outlooks to each result
    pub weather_outlook: bool,
}

/// Run the full pipeline against explicit catalog and index references
pub fn recommend<'c>(
    query: &FarmQuery,
    catalog: &'c CropCatalog,
    districts: &DistrictEligibilityIndex,
    ctx: &ScoringContext,
    options: &RecommendOptions,
) -> Result<Vec<ScoredCrop<'c>>, RecommendError> {
    query.validate()?;
    if !(1..=12).contains(&ctx.month) {
        return Err(RecommendError::InvalidMonth(ctx.month));
    }

    let eligible = filter_eligible(query, catalog, districts, ctx.season);
    tracing::debug!(
        "District '{}' ({} season): {} of {} crops pass hard constraints",
        query.district,
        ctx.season,
        eligible.len(),
        catalog.len()
    );
    if eligible.is_empty() {
        return Ok(Vec::new());
    }

    let history = RotationHistory::resolve(query.recent_history(), catalog);
    let range = query.duration_range();

    // Order-preserving parallel map keeps output deterministic
    let scored: Vec<ScoredCrop<'c>> = eligible
        .par_iter()
        .map(|&crop| score_candidate(crop, &range, ctx, &history, options))
        .collect();

    let ranked = rank(scored, options.sort_by);
    let shown = apply_display_filters(ranked, &options.filters);
    tracing::debug!("Returning {} ranked crops (sort: {:?})", shown.len(), options.sort_by);
    Ok(shown)
}

fn score_candidate<'c>(
    crop: &'c CropDefinition,
    range: &DurationRange,
    ctx: &ScoringContext,
    history: &RotationHistory<'_>,
    options: &RecommendOptions,
) -> ScoredCrop<'c> {
    let base_score = ScoreBreakdown::compute(crop, range, ctx).base_score();
    let (planting_weather, harvest_weather) = if options.weather_outlook {
        (
            seasonal_outlook(&crop.planting_months),
            seasonal_outlook(&crop.harvest_months),
        )
    } else {
        (None, None)
    };

    ScoredCrop {
        crop,
        base_score,
        rotation_multiplier: rotation_multiplier(&crop.crop_family, history),
        smart_score: penalize(base_score, &crop.crop_family, history),
        profit: crop.profit(),
        rank: 0,
        planting_weather,
        harvest_weather,
    }
}

/// Shareable recommender holding the loaded catalog and district index
#[derive(Debug, Clone)]
pub struct CropRecommender {
    catalog: Arc<CropCatalog>,
    districts: Arc<DistrictEligibilityIndex>,
}

impl CropRecommender {
    pub fn new(catalog: Arc<CropCatalog>, districts: Arc<DistrictEligibilityIndex>) -> Self {
        Self { catalog, districts }
    }

    pub fn from_data(data: AdvisorData) -> Self {
        Self::new(Arc::new(data.catalog), Arc::new(data.districts))
    }

    /// Load catalog and district index from a data directory
    pub fn load(data_dir: &Path) -> Result<Self> {
        tracing::info!("Loading crop data from {:?}", data_dir);
        Ok(Self::from_data(AdvisorData::load(data_dir)?))
    }

    pub fn catalog(&self) -> &CropCatalog {
        &self.catalog
    }

    pub fn districts(&self) -> &DistrictEligibilityIndex {
        &self.districts
    }

    /// Ranked by smart score, no display filters
    pub fn recommend(
        &self,
        query: &FarmQuery,
        ctx: &ScoringContext,
    ) -> Result<Vec<ScoredCrop<'_>>, RecommendError> {
        self.recommend_with(query, ctx, &RecommendOptions::default())
    }

    pub fn recommend_with(
        &self,
        query: &FarmQuery,
        ctx: &ScoringContext,
        options: &RecommendOptions,
    ) -> Result<Vec<ScoredCrop<'_>>, RecommendError> {
        recommend(query, &self.catalog, &self.districts, ctx, options)
    }
}
