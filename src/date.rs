use std::ops::RangeInclusive;

use chrono::{DateTime, Datelike, Utc};

use crate::error::{Error, Result};

/// First year of the ERA5 reanalysis.
pub const ERA5_FIRST_YEAR: i32 = 1940;
/// First year of ERA5-Land.
pub const LAND_FIRST_YEAR: i32 = 1950;
/// The preliminary back extension covers 1950 to 1978 only.
pub const PRELIMBE_YEARS: RangeInclusive<i32> = 1950..=1978;

/// Zero-pad `values` to two digits after checking `min <= v <= max`.
pub fn zpad(values: &[u32], field: &'static str, min: u32, max: u32) -> Result<Vec<String>> {
    values
        .iter()
        .map(|&v| {
            if v < min || v > max {
                Err(Error::InvalidValue {
                    field,
                    value: v as i64,
                })
            } else {
                Ok(format!("{v:02}"))
            }
        })
        .collect()
}

pub fn zpad_months(values: &[u32]) -> Result<Vec<String>> {
    zpad(values, "months", 1, 12)
}

pub fn zpad_days(values: &[u32]) -> Result<Vec<String>> {
    zpad(values, "days", 1, 31)
}

/// Hours 0-23 as `HH:00` strings.
pub fn format_hours(values: &[u32]) -> Result<Vec<String>> {
    values
        .iter()
        .map(|&v| {
            if v > 23 {
                Err(Error::InvalidValue {
                    field: "hours",
                    value: v as i64,
                })
            } else {
                Ok(format!("{v:02}:00"))
            }
        })
        .collect()
}

/// Years available for the requested dataset, up to the current year.
pub fn year_bounds(land: bool, prelimbe: bool, now: DateTime<Utc>) -> RangeInclusive<i32> {
    if prelimbe {
        PRELIMBE_YEARS
    } else if land {
        LAND_FIRST_YEAR..=now.year()
    } else {
        ERA5_FIRST_YEAR..=now.year()
    }
}

/// Expand `start..=end` (end defaults to start) after checking both ends.
pub fn year_list(start: i32, end: Option<i32>, bounds: RangeInclusive<i32>) -> Result<Vec<i32>> {
    let end = end.unwrap_or(start);
    for year in [start, end] {
        if !bounds.contains(&year) {
            return Err(Error::InvalidYears(format!(
                "year should be between {} and {}, got {year}",
                bounds.start(),
                bounds.end()
            )));
        }
    }
    if end < start {
        return Err(Error::InvalidYears(format!(
            "endyear {end} should be >= startyear {start}"
        )));
    }
    Ok((start..=end).collect())
}
