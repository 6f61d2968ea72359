//! Turns one [`Job`] into the dataset name, payload and file name sent to the CDS.

use tracing::{info, warn};

use crate::catalog;
use crate::date::{format_hours, zpad_days, zpad_months};
use crate::error::{Error, Result};
use crate::naming::output_filename;
use crate::options::{Fetch, Levels, Period, Product};
use crate::planner::Job;
use crate::request::{Request, RequestValue};

const BASE_DATASET: &str = "reanalysis-era5";
const DEPRECATED_OROGRAPHY: &str = "orography";
const GEOPOTENTIAL: &str = "geopotential";

#[derive(Debug, Clone, PartialEq)]
pub struct BuiltRequest {
    pub dataset: String,
    pub request: Request,
    pub filename: String,
}

/// Result of resolving a variable to a CDS dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub dataset: String,
    /// Variable name to request, which differs from the user's for deprecated names.
    pub variable: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Levelling {
    Single,
    Pressure,
}

pub fn build(fetch: &Fetch, job: &Job) -> Result<BuiltRequest> {
    check_variable(fetch, &job.variable)?;
    let resolved = resolve_dataset(&job.variable, fetch.product(), fetch.period(), fetch.levels());

    let year = match job.years.as_slice() {
        [single] => RequestValue::Int(*single as i64),
        years => RequestValue::from(years.to_vec()),
    };
    let month = match job.month {
        Some(m) => RequestValue::Str(format!("{m:02}")),
        None => RequestValue::StrList(zpad_months(fetch.months())?),
    };

    let mut request = Request::new()
        .kw("variable", resolved.variable.as_str())
        .kw("year", year)
        .kw("month", month)
        .kw("time", format_hours(fetch.hours())?)
        .kw("format", fetch.format().as_str());

    if resolved.dataset.contains("pressure-levels") {
        let levels = fetch.levels().validated()?;
        request.set("pressure_level", RequestValue::from(levels.to_vec()));
    }
    if let Some(area) = fetch.area() {
        request.set("area", RequestValue::from(area.to_array().to_vec()));
    }
    if let Some(product_type) = product_type(fetch.product(), fetch.period()) {
        request.set("product_type", product_type);
    }
    if let Some(days) = fetch.period().days() {
        request.set("day", RequestValue::StrList(zpad_days(days)?));
    }

    Ok(BuiltRequest {
        dataset: resolved.dataset,
        request,
        filename: output_filename(fetch, &job.variable, &job.years, job.month)?,
    })
}

/// Catalog membership of `variable` for the requested dataset and period.
pub fn check_variable(fetch: &Fetch, variable: &str) -> Result<()> {
    if fetch.product().is_land() {
        if !catalog::is_land(variable) {
            return Err(Error::NotInLand(variable.to_string()));
        }
        return Ok(());
    }
    if !catalog::is_single_level(variable) && !catalog::is_pressure_level(variable) {
        return Err(Error::InvalidVariable(format!(
            "'{variable}', see `era5cli info 2Dvars` and `era5cli info 3Dvars`"
        )));
    }
    if matches!(fetch.period(), Period::Monthly { .. }) && !catalog::has_monthly_data(variable) {
        return Err(Error::NoMonthlyData(variable.to_string()));
    }
    Ok(())
}

/// Pick the dataset for `variable`, substituting deprecated names.
///
/// Logs a notice when `orography` is replaced or when `geopotential` has to be
/// disambiguated between single and pressure levels.
pub fn resolve_dataset(variable: &str, product: Product, period: &Period, levels: &Levels) -> Resolved {
    let mut resolved_variable = variable.to_string();
    let mut dataset = BASE_DATASET.to_string();

    match product {
        Product::Land => dataset.push_str("-land"),
        Product::Era5 { .. } => {
            let levelling = if variable == DEPRECATED_OROGRAPHY {
                warn!(
                    "The variable 'orography' has been deprecated by CDS. Use \
                     `--variables geopotential --levels surface` to request orography \
                     from now on."
                );
                resolved_variable = GEOPOTENTIAL.to_string();
                Levelling::Single
            } else if variable == GEOPOTENTIAL {
                if *levels == Levels::Surface {
                    info!(
                        "Getting variable from surface level data. To get geopotential \
                         on pressure levels, omit `--levels surface`."
                    );
                    Levelling::Single
                } else {
                    info!(
                        "Getting variable from pressure level data. To get geopotential \
                         on the surface (orography), use `--levels surface`."
                    );
                    Levelling::Pressure
                }
            } else if catalog::is_single_level(variable) {
                Levelling::Single
            } else {
                Levelling::Pressure
            };
            dataset.push_str(match levelling {
                Levelling::Single => "-single-levels",
                Levelling::Pressure => "-pressure-levels",
            });
        }
    }

    if matches!(period, Period::Monthly { .. }) {
        dataset.push_str("-monthly-means");
    }
    if product.is_prelimbe() {
        dataset.push_str("-preliminary-back-extension");
    }

    Resolved {
        dataset,
        variable: resolved_variable,
    }
}

/// The `product_type` keyword, or `None` when the CDS infers it (hourly ERA5-Land).
pub fn product_type(product: Product, period: &Period) -> Option<RequestValue> {
    let ensemble = product.is_ensemble();
    match period {
        Period::Hourly {
            statistics: true, ..
        } if ensemble => Some(RequestValue::from(vec![
            "ensemble_members",
            "ensemble_mean",
            "ensemble_spread",
        ])),
        Period::Hourly { .. } if product.is_land() => None,
        Period::Hourly { .. } => Some(RequestValue::from(base_product(ensemble))),
        Period::Monthly { synoptic } if product.is_prelimbe() => {
            let prefix = if ensemble { "members-" } else { "reanalysis-" };
            let suffix = if *synoptic {
                "synoptic-monthly-means"
            } else {
                "monthly-means-of-daily-means"
            };
            Some(RequestValue::Str(format!("{prefix}{suffix}")))
        }
        Period::Monthly { synoptic } => {
            let mut name = format!("monthly_averaged_{}", base_product(ensemble));
            if *synoptic {
                name.push_str("_by_hour_of_day");
            }
            Some(RequestValue::Str(name))
        }
    }
}

fn base_product(ensemble: bool) -> &'static str {
    if ensemble { "ensemble_members" } else { "reanalysis" }
}
