//! Request size estimate, checked before anything is sent.
//!
//! The CDS counts one item per 2D field: one variable at one time step on one
//! level. Requests above the limit are refused by the service.

use crate::catalog;
use crate::error::{Error, Result};
use crate::options::{Fanout, Fetch, Period};

/// Item limit for the ERA5 single and pressure level datasets.
pub const MAX_REQUEST_SIZE: usize = 120_000;
/// Item limit for ERA5-Land, which has a finer grid.
pub const MAX_REQUEST_SIZE_LAND: usize = 1_000;
/// Hours at which the ensemble is available.
pub const ENSEMBLE_HOURS: [u32; 8] = [0, 3, 6, 9, 12, 15, 18, 21];

pub fn n_hours(fetch: &Fetch) -> usize {
    let hourly = matches!(fetch.period(), Period::Hourly { .. });
    if hourly && fetch.product().is_ensemble() {
        ENSEMBLE_HOURS
            .iter()
            .filter(|h| fetch.hours().contains(*h))
            .count()
    } else {
        fetch.hours().len()
    }
}

pub fn limit(fetch: &Fetch) -> usize {
    if fetch.product().is_land() {
        MAX_REQUEST_SIZE_LAND
    } else {
        MAX_REQUEST_SIZE
    }
}

pub fn request_size(fetch: &Fetch) -> usize {
    let n_months = match fetch.fanout() {
        Fanout::SplitMonths => 1,
        _ => fetch.months().len(),
    };
    let n_days = fetch.period().days().map_or(1, |d| d.len());
    let mut size = n_months * n_days * n_hours(fetch);

    if fetch.product().is_land() {
        return size;
    }

    if fetch
        .variables()
        .iter()
        .any(|v| catalog::is_pressure_level(v))
    {
        size *= fetch.levels().len();
    }

    // reanalysis, ensemble mean and ensemble spread
    if fetch.period().is_statistics() {
        size *= 3;
    }

    size
}

pub fn check(fetch: &Fetch) -> Result<()> {
    let size = request_size(fetch);
    let limit = limit(fetch);
    if size > limit {
        return Err(Error::TooLargeRequest { size, limit });
    }
    Ok(())
}
