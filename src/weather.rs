//! Seasonal weather outlook
//!
//! Static month climatology used to describe the planting and harvest windows
//! of a recommended crop. This is descriptive only and never feeds the score.

use serde::Serialize;

/// Rainfall class of a month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Rainfall {
    #[serde(rename = "VL")]
    VeryLow,
    #[serde(rename = "L")]
    Low,
    #[serde(rename = "M")]
    Moderate,
    #[serde(rename = "H")]
    Heavy,
}

#[derive(Debug, Clone, Copy)]
struct MonthClimate {
    temp_c: (i32, i32),
    rainfall: Rainfall,
    humidity_pct: (i32, i32),
}

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const fn month(t: (i32, i32), rainfall: Rainfall, h: (i32, i32)) -> MonthClimate {
    MonthClimate { temp_c: t, rainfall, humidity_pct: h }
}

// Plains climatology, January first
const CLIMATOLOGY: [MonthClimate; 12] = [
    month((10, 22), Rainfall::VeryLow, (65, 75)),
    month((13, 26), Rainfall::Low, (60, 70)),
    month((18, 30), Rainfall::Low, (55, 65)),
    month((24, 37), Rainfall::Low, (45, 55)),
    month((28, 42), Rainfall::Low, (40, 50)),
    month((29, 39), Rainfall::Moderate, (60, 70)),
    month((27, 35), Rainfall::Heavy, (75, 85)),
    month((26, 34), Rainfall::Heavy, (80, 90)),
    month((25, 34), Rainfall::Moderate, (70, 80)),
    month((20, 32), Rainfall::Low, (60, 70)),
    month((14, 28), Rainfall::VeryLow, (55, 65)),
    month((8, 20), Rainfall::VeryLow, (65, 75)),
];

/// Expected conditions for one month
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthOutlook {
    pub month: &'static str,
    /// e.g. "29-39°C"
    pub temp: String,
    pub rainfall: Rainfall,
    /// e.g. "60-70%"
    pub humidity: String,
}

/// Summary over a set of months
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonalOutlook {
    /// Mean of the monthly maximum temperatures, rounded
    pub avg_max_temp_c: i32,
    /// Mean of the monthly maximum humidity, rounded
    pub avg_max_humidity_pct: i32,
    /// e.g. "~35°C | 78% Hum"
    pub summary: String,
    pub details: Vec<MonthOutlook>,
}

/// Build the outlook for the given months (1-12)
///
/// Returns `None` when no valid month is supplied.
pub fn seasonal_outlook(months: &[u8]) -> Option<SeasonalOutlook> {
    let known: Vec<(usize, &MonthClimate)> = months
        .iter()
        .filter(|m| (1..=12).contains(*m))
        .map(|m| {
            let idx = usize::from(*m) - 1;
            (idx, &CLIMATOLOGY[idx])
        })
        .collect();

    if known.is_empty() {
        return None;
    }

    let n = known.len() as f64;
    let temp_sum: i32 = known.iter().map(|(_, c)| c.temp_c.1).sum();
    let hum_sum: i32 = known.iter().map(|(_, c)| c.humidity_pct.1).sum();
    let avg_max_temp_c = (f64::from(temp_sum) / n).round() as i32;
    let avg_max_humidity_pct = (f64::from(hum_sum) / n).round() as i32;

    let details = known
        .iter()
        .map(|(idx, c)| MonthOutlook {
            month: MONTH_NAMES[*idx],
            temp: format!("{}-{}°C", c.temp_c.0, c.temp_c.1),
            rainfall: c.rainfall,
            humidity: format!("{}-{}%", c.humidity_pct.0, c.humidity_pct.1),
        })
        .collect();

    Some(SeasonalOutlook {
        avg_max_temp_c,
        avg_max_humidity_pct,
        summary: format!("~{}°C | {}% Hum", avg_max_temp_c, avg_max_humidity_pct),
        details,
    })
}
