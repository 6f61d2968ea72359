use std::fmt;
use std::str::FromStr;

use chrono::Utc;

use crate::area::Area;
use crate::catalog;
use crate::date::{format_hours, year_bounds, year_list, zpad_days, zpad_months};
use crate::error::{Error, Result};
use crate::size;

/// Maximum number of parallel download threads.
pub const MAX_THREADS: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Netcdf,
    Grib,
}

impl OutputFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Netcdf => "netcdf",
            OutputFormat::Grib => "grib",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Netcdf => "nc",
            OutputFormat::Grib => "grb",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "netcdf" => Ok(OutputFormat::Netcdf),
            "grib" => Ok(OutputFormat::Grib),
            _ => Err(Error::UnknownFormat(s.to_string())),
        }
    }
}

/// Which temporal resolution the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodKind {
    Hourly,
    Monthly,
}

impl PeriodKind {
    pub fn as_str(self) -> &'static str {
        match self {
            PeriodKind::Hourly => "hourly",
            PeriodKind::Monthly => "monthly",
        }
    }
}

impl fmt::Display for PeriodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Requested vertical levels.
///
/// `Surface` asks for the single level variant of a variable that exists on
/// both single and pressure levels (`geopotential`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Levels {
    Pressure(Vec<u32>),
    Surface,
}

impl Default for Levels {
    fn default() -> Self {
        Levels::Pressure(catalog::PRESSURE_LEVELS.to_vec())
    }
}

impl Levels {
    /// Parse command line tokens: either the single word `surface` or integers.
    pub fn parse<S: AsRef<str>>(tokens: &[S]) -> Result<Self> {
        if let [only] = tokens {
            if only.as_ref() == "surface" {
                return Ok(Levels::Surface);
            }
        }
        let levels = tokens
            .iter()
            .map(|t| {
                let t = t.as_ref();
                t.parse::<u32>().map_err(|_| {
                    Error::InvalidLevels(format!(
                        "'{t}' is not a pressure level; use integers or a single 'surface'"
                    ))
                })
            })
            .collect::<Result<Vec<u32>>>()?;
        Ok(Levels::Pressure(levels))
    }

    /// Every level must be non-empty and listed in the catalog.
    pub fn validated(&self) -> Result<&[u32]> {
        match self {
            Levels::Surface => Err(Error::InvalidLevels(
                "'surface' is only available for variables on single levels".into(),
            )),
            Levels::Pressure(levels) if levels.is_empty() => Err(Error::InvalidLevels(
                "at least one pressure level is required".into(),
            )),
            Levels::Pressure(levels) => {
                if let Some(bad) = levels.iter().find(|l| !catalog::is_pressure_level_value(**l)) {
                    return Err(Error::InvalidLevels(format!(
                        "{bad} is not an available pressure level, see `era5cli info levels`"
                    )));
                }
                Ok(levels)
            }
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Levels::Pressure(levels) => levels.len(),
            Levels::Surface => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Raw user input, validated by [`Fetch::new`].
#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub period: PeriodKind,
    pub start_year: i32,
    pub end_year: Option<i32>,
    pub months: Vec<u32>,
    /// Ignored for monthly requests.
    pub days: Vec<u32>,
    /// Ignored for monthly requests, which use `synoptic` instead.
    pub hours: Vec<u32>,
    pub variables: Vec<String>,
    pub area: Option<Area>,
    pub levels: Levels,
    pub format: String,
    pub output_prefix: String,
    pub ensemble: bool,
    pub statistics: bool,
    /// Monthly only. `Some(vec![])` selects all 24 hours.
    pub synoptic: Option<Vec<u32>>,
    pub land: bool,
    pub prelimbe: bool,
    pub splitmonths: bool,
    pub merge: bool,
    pub threads: usize,
    pub dashed_varname: bool,
    pub overwrite: bool,
}

impl FetchOptions {
    pub fn new(period: PeriodKind, variables: Vec<String>, start_year: i32) -> Self {
        Self {
            period,
            start_year,
            end_year: None,
            months: (1..=12).collect(),
            days: (1..=31).collect(),
            hours: (0..24).collect(),
            variables,
            area: None,
            levels: Levels::default(),
            format: OutputFormat::Netcdf.as_str().to_string(),
            output_prefix: "era5".to_string(),
            ensemble: false,
            statistics: false,
            synoptic: None,
            land: false,
            prelimbe: false,
            splitmonths: false,
            merge: false,
            threads: 1,
            dashed_varname: false,
            overwrite: false,
        }
    }
}

/// Dataset family. ERA5-Land has neither an ensemble nor a back extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Product {
    Era5 { ensemble: bool, prelimbe: bool },
    Land,
}

impl Product {
    pub fn is_land(self) -> bool {
        matches!(self, Product::Land)
    }

    pub fn is_ensemble(self) -> bool {
        matches!(self, Product::Era5 { ensemble: true, .. })
    }

    pub fn is_prelimbe(self) -> bool {
        matches!(self, Product::Era5 { prelimbe: true, .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Period {
    Hourly { days: Vec<u32>, statistics: bool },
    Monthly { synoptic: bool },
}

impl Period {
    pub fn kind(&self) -> PeriodKind {
        match self {
            Period::Hourly { .. } => PeriodKind::Hourly,
            Period::Monthly { .. } => PeriodKind::Monthly,
        }
    }

    pub fn days(&self) -> Option<&[u32]> {
        match self {
            Period::Hourly { days, .. } => Some(days),
            Period::Monthly { .. } => None,
        }
    }

    pub fn is_statistics(&self) -> bool {
        matches!(self, Period::Hourly { statistics: true, .. })
    }

    pub fn is_synoptic(&self) -> bool {
        matches!(self, Period::Monthly { synoptic: true })
    }
}

/// How variables and years are split over requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fanout {
    /// One request per variable and year.
    Yearly,
    /// One request per variable covering all years.
    Merge,
    /// One request per variable, year and month.
    SplitMonths,
}

/// A validated download request, read-only once constructed.
#[derive(Debug, Clone)]
pub struct Fetch {
    pub(crate) years: Vec<i32>,
    pub(crate) months: Vec<u32>,
    pub(crate) hours: Vec<u32>,
    pub(crate) variables: Vec<String>,
    pub(crate) area: Option<Area>,
    pub(crate) levels: Levels,
    pub(crate) format: OutputFormat,
    pub(crate) output_prefix: String,
    pub(crate) period: Period,
    pub(crate) product: Product,
    pub(crate) fanout: Fanout,
    pub(crate) threads: usize,
    pub(crate) dashed_varname: bool,
    pub(crate) overwrite: bool,
}

impl Fetch {
    pub fn new(opts: FetchOptions) -> Result<Self> {
        let format: OutputFormat = opts.format.parse()?;

        if opts.merge && opts.splitmonths {
            return Err(Error::ConflictingOptions(
                "--merge and --splitmonths cannot be combined".into(),
            ));
        }
        let fanout = if opts.merge {
            Fanout::Merge
        } else if opts.splitmonths {
            Fanout::SplitMonths
        } else {
            Fanout::Yearly
        };

        let product = match (opts.land, opts.ensemble, opts.prelimbe) {
            (true, true, _) => {
                return Err(Error::ConflictingOptions(
                    "ERA5-Land has no ensemble, remove --ensemble or --land".into(),
                ));
            }
            (true, _, true) => {
                return Err(Error::ConflictingOptions(
                    "the back extension is not available for ERA5-Land, remove --prelimbe or --land"
                        .into(),
                ));
            }
            (true, false, false) => Product::Land,
            (false, ensemble, prelimbe) => Product::Era5 { ensemble, prelimbe },
        };

        if opts.statistics && !opts.ensemble {
            return Err(Error::ConflictingOptions(
                "statistics can only be computed over an ensemble, add --ensemble or remove --statistics"
                    .into(),
            ));
        }

        let (period, hours) = match opts.period {
            PeriodKind::Hourly => {
                if opts.synoptic.is_some() {
                    return Err(Error::InvalidOption(
                        "synoptic means are only available for monthly data".into(),
                    ));
                }
                zpad_days(&opts.days)?;
                non_empty("days", &opts.days)?;
                let period = Period::Hourly {
                    days: opts.days,
                    statistics: opts.statistics,
                };
                (period, opts.hours)
            }
            PeriodKind::Monthly => {
                if opts.statistics {
                    return Err(Error::InvalidOption(
                        "statistics are only available for hourly data".into(),
                    ));
                }
                match opts.synoptic {
                    None => (Period::Monthly { synoptic: false }, vec![0]),
                    Some(hours) if hours.is_empty() => {
                        (Period::Monthly { synoptic: true }, (0..24).collect())
                    }
                    Some(hours) => (Period::Monthly { synoptic: true }, hours),
                }
            }
        };
        format_hours(&hours)?;
        non_empty("hours", &hours)?;
        zpad_months(&opts.months)?;
        non_empty("months", &opts.months)?;

        let years = year_list(
            opts.start_year,
            opts.end_year,
            year_bounds(product.is_land(), product.is_prelimbe(), Utc::now()),
        )?;

        if opts.variables.is_empty() {
            return Err(Error::InvalidOption("at least one variable is required".into()));
        }
        if !product.is_land() {
            check_levels(&opts.variables, &opts.levels)?;
        }

        if opts.threads == 0 || opts.threads > MAX_THREADS {
            return Err(Error::InvalidOption(format!(
                "threads must be between 1 and {MAX_THREADS}, got {}",
                opts.threads
            )));
        }

        let area = opts.area.map(|a| a.checked()).transpose()?;

        let fetch = Self {
            years,
            months: opts.months,
            hours,
            variables: opts.variables,
            area,
            levels: opts.levels,
            format,
            output_prefix: opts.output_prefix,
            period,
            product,
            fanout,
            threads: opts.threads,
            dashed_varname: opts.dashed_varname,
            overwrite: opts.overwrite,
        };
        size::check(&fetch)?;
        Ok(fetch)
    }

    pub fn years(&self) -> &[i32] {
        &self.years
    }

    pub fn months(&self) -> &[u32] {
        &self.months
    }

    pub fn hours(&self) -> &[u32] {
        &self.hours
    }

    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    pub fn area(&self) -> Option<Area> {
        self.area
    }

    pub fn levels(&self) -> &Levels {
        &self.levels
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn output_prefix(&self) -> &str {
        &self.output_prefix
    }

    pub fn period(&self) -> &Period {
        &self.period
    }

    pub fn product(&self) -> Product {
        self.product
    }

    pub fn fanout(&self) -> Fanout {
        self.fanout
    }

    pub fn threads(&self) -> usize {
        self.threads
    }

    pub fn overwrite(&self) -> bool {
        self.overwrite
    }
}

fn non_empty(field: &str, values: &[u32]) -> Result<()> {
    if values.is_empty() {
        return Err(Error::InvalidOption(format!("no {field} selected")));
    }
    Ok(())
}

// Pressure level variables need valid levels. `surface` only makes sense when
// every such variable also exists on single levels.
fn check_levels(variables: &[String], levels: &Levels) -> Result<()> {
    let pressure_only: Vec<&String> = variables
        .iter()
        .filter(|v| catalog::is_pressure_level(v) && !catalog::is_single_level(v))
        .collect();
    let any_pressure = variables.iter().any(|v| catalog::is_pressure_level(v));

    match levels {
        Levels::Surface if !pressure_only.is_empty() => Err(Error::InvalidLevels(format!(
            "'surface' cannot be used for pressure level variables: {}",
            pressure_only
                .iter()
                .map(|s| s.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        ))),
        Levels::Surface => Ok(()),
        Levels::Pressure(_) if any_pressure => levels.validated().map(|_| ()),
        Levels::Pressure(_) => Ok(()),
    }
}
