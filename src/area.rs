use tracing::info;

use crate::error::{Error, Result};

/// Bounding box as sent to the CDS: `[lat_max, lon_min, lat_min, lon_max]`.
///
/// `lon_min > lon_max` is allowed and selects a region wrapping across the
/// antimeridian.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Area {
    pub lat_max: f64,
    pub lon_min: f64,
    pub lat_min: f64,
    pub lon_max: f64,
}

impl Area {
    pub fn new(lat_max: f64, lon_min: f64, lat_min: f64, lon_max: f64) -> Self {
        Self {
            lat_max,
            lon_min,
            lat_min,
            lon_max,
        }
    }

    pub fn from_slice(values: &[f64]) -> Result<Self> {
        match values {
            [lat_max, lon_min, lat_min, lon_max] => {
                Ok(Self::new(*lat_max, *lon_min, *lat_min, *lon_max))
            }
            _ => Err(Error::InvalidArea(format!(
                "expected 4 values (lat_max lon_min lat_min lon_max), got {}",
                values.len()
            ))),
        }
    }

    pub fn to_array(self) -> [f64; 4] {
        [self.lat_max, self.lon_min, self.lat_min, self.lon_max]
    }

    pub fn validate(&self) -> Result<()> {
        let [lat_max, lon_min, lat_min, lon_max] = self.to_array();
        if !(-90.0..=90.0).contains(&lat_max) || !(-90.0..=90.0).contains(&lat_min) {
            return Err(Error::InvalidArea(format!(
                "latitudes must be within -90 and 90, got {lat_max} and {lat_min}"
            )));
        }
        if !(-180.0..=180.0).contains(&lon_min) || !(-180.0..=180.0).contains(&lon_max) {
            return Err(Error::InvalidArea(format!(
                "longitudes must be within -180 and 180, got {lon_min} and {lon_max}"
            )));
        }
        if lat_max <= lat_min {
            return Err(Error::InvalidArea(format!(
                "lat_max ({lat_max}) must be larger than lat_min ({lat_min})"
            )));
        }
        if lon_max == lon_min {
            return Err(Error::InvalidArea(format!(
                "lon_min and lon_max must differ, both are {lon_min}"
            )));
        }
        Ok(())
    }

    /// Each coordinate rounded down to two decimals.
    pub fn rounded(&self) -> Self {
        let [a, b, c, d] = self.to_array().map(floor_2dp);
        Self::new(a, b, c, d)
    }

    /// Validate and round; logs a notice when rounding changed anything.
    ///
    /// The rounded area is validated again, as rounding can collapse two
    /// close coordinates into one.
    pub fn checked(&self) -> Result<Self> {
        self.validate()?;
        let rounded = self.rounded();
        rounded.validate()?;
        if rounded != *self {
            info!(
                "Area coordinates rounded down to two decimals: {:?} -> {:?}",
                self.to_array(),
                rounded.to_array()
            );
        }
        Ok(rounded)
    }
}

// The tolerance keeps values that are already at two decimals fixed, since
// e.g. 0.29 * 100.0 is slightly below 29.
fn floor_2dp(v: f64) -> f64 {
    ((v * 100.0) + 1e-6).floor() / 100.0
}
