//! Cropping seasons and the per-call scoring context
//!
//! The season is derived from the calendar month by the caller (or by
//! `ScoringContext::current`) before a recommendation runs. The engine never
//! reads the clock itself.

use crate::error::RecommendError;
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Indian cropping seasons plus the two year-round tags used in the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Season {
    /// Monsoon season, June-October
    Kharif,
    /// Winter season, November-April
    Rabi,
    /// Short summer window between Rabi and Kharif
    Zaid,
    Annual,
    Perennial,
}

impl Season {
    /// Season for a calendar month (1-12)
    ///
    /// Months 6-10 map to Kharif, 11-4 to Rabi, and the remaining month to Zaid.
    pub fn from_month(month: u32) -> Result<Self, RecommendError> {
        match month {
            6..=10 => Ok(Season::Kharif),
            11 | 12 | 1..=4 => Ok(Season::Rabi),
            5 => Ok(Season::Zaid),
            _ => Err(RecommendError::InvalidMonth(month)),
        }
    }

    /// Annual and Perennial crops are not tied to a cropping window
    pub fn is_year_round(self) -> bool {
        matches!(self, Season::Annual | Season::Perennial)
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Season::Kharif => "Kharif",
            Season::Rabi => "Rabi",
            Season::Zaid => "Zaid",
            Season::Annual => "Annual",
            Season::Perennial => "Perennial",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Pre-fetched scalar hints consumed by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringContext {
    /// Current cropping season
    pub season: Season,

    /// Current calendar month (1-12), used for the planting-month check
    pub month: u32,

    /// Whether live weather data was available for the farm's district.
    /// Without it the weather sub-score stays neutral.
    pub weather_available: bool,
}

impl ScoringContext {
    /// Context for an explicit month, without weather data
    pub fn for_month(month: u32) -> Result<Self, RecommendError> {
        Ok(Self {
            season: Season::from_month(month)?,
            month,
            weather_available: false,
        })
    }

    /// Context for today's local date
    pub fn current() -> Self {
        let month = chrono::Local::now().month();
        Self {
            season: Season::from_month(month).unwrap_or(Season::Zaid),
            month,
            weather_available: false,
        }
    }

    pub fn with_weather(mut self, available: bool) -> Self {
        self.weather_available = available;
        self
    }

    /// Override the derived season (e.g. an agronomist planning ahead)
    pub fn with_season(mut self, season: Season) -> Self {
        self.season = season;
        self
    }
}
