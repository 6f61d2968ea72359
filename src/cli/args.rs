use clap::{Args, Parser, Subcommand};

use era5cli::{Area, FetchOptions, Levels, MAX_THREADS, PeriodKind};

use super::errors::AppError;

#[derive(Parser, Debug)]
#[command(name = "era5cli", version)]
#[command(about = "Download ERA5 data from the Copernicus Climate Data Store", long_about = None)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch hourly data.
    Hourly(HourlyArgs),
    /// Fetch monthly averaged data.
    Monthly(MonthlyArgs),
    /// Show the available variables or levels, or which list holds a name.
    Info {
        /// `levels`, `2Dvars`, `3Dvars`, `land`, or a variable or pressure level name
        name: String,
    },
    /// Configure the CDS login for era5cli.
    Config(ConfigArgs),
}

#[derive(Args, Debug)]
pub struct CommonArgs {
    /// Variables to download, see `era5cli info 2Dvars` for the names
    #[arg(long, required = true, num_args = 1..)]
    pub variables: Vec<String>,

    /// Single year or first year of the range to download
    #[arg(long)]
    pub startyear: i32,

    /// Last year of the range to download (defaults to the start year)
    #[arg(long)]
    pub endyear: Option<i32>,

    /// Pressure levels in hPa, or `surface` for geopotential at the surface
    /// (defaults to all levels)
    #[arg(long, num_args = 1..)]
    pub levels: Option<Vec<String>>,

    /// Months to download (defaults to all)
    #[arg(long, num_args = 1..)]
    pub months: Option<Vec<u32>>,

    /// Prefix of the output file names
    #[arg(long, default_value = "era5")]
    pub outputprefix: String,

    /// Output file format
    #[arg(long, default_value = "netcdf", value_parser = ["netcdf", "grib"])]
    pub format: String,

    /// Write all years of a variable into a single file
    #[arg(long, default_value_t = false)]
    pub merge: bool,

    /// Write every month into a separate file
    #[arg(long, default_value_t = false)]
    pub splitmonths: bool,

    /// Number of parallel requests
    #[arg(long, default_value_t = 1,
          value_parser = clap::value_parser!(u8).range(1..=MAX_THREADS as i64))]
    pub threads: u8,

    /// Download ensemble members instead of the reanalysis (HRES)
    #[arg(long, default_value_t = false)]
    pub ensemble: bool,

    /// Print the requests instead of sending them
    #[arg(long, default_value_t = false)]
    pub dryrun: bool,

    /// Download ERA5-Land data
    #[arg(long, default_value_t = false)]
    pub land: bool,

    /// Download the preliminary back extension (1950-1978)
    #[arg(long, default_value_t = false)]
    pub prelimbe: bool,

    /// Subregion as `LAT_MAX LON_MIN LAT_MIN LON_MAX`, rounded down to two decimals
    #[arg(long, num_args = 4, allow_negative_numbers = true,
          value_names = ["LAT_MAX", "LON_MIN", "LAT_MIN", "LON_MAX"])]
    pub area: Option<Vec<f64>>,

    /// Overwrite existing output files
    #[arg(long, default_value_t = false)]
    pub overwrite: bool,

    /// Use dashes instead of underscores in the variable part of file names
    #[arg(long, default_value_t = false)]
    pub dashed_varname: bool,
}

#[derive(Args, Debug)]
pub struct HourlyArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Days of the month to download (defaults to all)
    #[arg(long, num_args = 1..)]
    pub days: Option<Vec<u32>>,

    /// Hours of the day to download (defaults to all)
    #[arg(long, num_args = 1..)]
    pub hours: Option<Vec<u32>>,

    /// Download ensemble mean and spread, requires `--ensemble`
    #[arg(long, default_value_t = false)]
    pub statistics: bool,
}

#[derive(Args, Debug)]
pub struct MonthlyArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Synoptic monthly means for these hours; without hours, for all 24
    #[arg(long, num_args = 0..)]
    pub synoptic: Option<Vec<u32>>,
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Print the stored url and key
    #[arg(long, default_value_t = false)]
    pub show: bool,

    /// Your CDS personal access token
    #[arg(long)]
    pub key: Option<String>,

    /// URL of the CDS API
    #[arg(long, default_value = era5cli::DEFAULT_CDS_URL)]
    pub url: String,

    /// No longer used by the CDS
    #[arg(long, hide = true)]
    pub uid: Option<String>,
}

impl CommonArgs {
    fn options(&self, period: PeriodKind) -> Result<FetchOptions, AppError> {
        let mut opts = FetchOptions::new(period, self.variables.clone(), self.startyear);
        opts.end_year = self.endyear;
        if let Some(months) = &self.months {
            opts.months = months.clone();
        }
        if let Some(levels) = &self.levels {
            opts.levels = Levels::parse(levels)?;
        }
        if let Some(area) = &self.area {
            opts.area = Some(Area::from_slice(area)?);
        }
        opts.output_prefix = self.outputprefix.clone();
        opts.format = self.format.clone();
        opts.merge = self.merge;
        opts.splitmonths = self.splitmonths;
        opts.threads = usize::from(self.threads);
        opts.ensemble = self.ensemble;
        opts.land = self.land;
        opts.prelimbe = self.prelimbe;
        opts.overwrite = self.overwrite;
        opts.dashed_varname = self.dashed_varname;
        Ok(opts)
    }
}

impl HourlyArgs {
    pub fn options(&self) -> Result<FetchOptions, AppError> {
        let mut opts = self.common.options(PeriodKind::Hourly)?;
        if let Some(days) = &self.days {
            opts.days = days.clone();
        }
        if let Some(hours) = &self.hours {
            opts.hours = hours.clone();
        }
        opts.statistics = self.statistics;
        Ok(opts)
    }
}

impl MonthlyArgs {
    pub fn options(&self) -> Result<FetchOptions, AppError> {
        let mut opts = self.common.options(PeriodKind::Monthly)?;
        opts.synoptic = self.synoptic.clone();
        Ok(opts)
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    fn parse(args: &[&str]) -> CliArgs {
        CliArgs::try_parse_from(std::iter::once("era5cli").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn command_definition_is_consistent() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn hourly_defaults() {
        let Command::Hourly(hourly) = parse(&[
            "hourly",
            "--variables",
            "2m_temperature",
            "total_precipitation",
            "--startyear",
            "2008",
        ])
        .command
        else {
            panic!("expected hourly");
        };
        let opts = hourly.options().unwrap();
        assert_eq!(opts.variables, vec!["2m_temperature", "total_precipitation"]);
        assert_eq!(opts.days.len(), 31);
        assert_eq!(opts.hours.len(), 24);
        assert_eq!(opts.months.len(), 12);
        assert_eq!(opts.format, "netcdf");
        assert_eq!(opts.threads, 1);
        assert_eq!(opts.levels, Levels::default());
        assert!(hourly.common.endyear.is_none() && !hourly.common.dryrun);
    }

    #[test]
    fn area_accepts_negative_coordinates() {
        let Command::Hourly(hourly) = parse(&[
            "hourly",
            "--variables",
            "2m_temperature",
            "--startyear",
            "2008",
            "--area",
            "-10",
            "-75.5",
            "-30",
            "12",
        ])
        .command
        else {
            panic!("expected hourly");
        };
        let opts = hourly.options().unwrap();
        assert_eq!(opts.area, Some(Area::new(-10.0, -75.5, -30.0, 12.0)));
    }

    #[test]
    fn synoptic_without_hours_is_present_but_empty() {
        let monthly = |extra: &[&str]| {
            let mut args = vec!["monthly", "--variables", "2m_temperature", "--startyear", "2008"];
            args.extend_from_slice(extra);
            match parse(&args).command {
                Command::Monthly(m) => m.options().unwrap().synoptic,
                _ => panic!("expected monthly"),
            }
        };
        assert_eq!(monthly(&[]), None);
        assert_eq!(monthly(&["--synoptic"]), Some(vec![]));
        assert_eq!(monthly(&["--synoptic", "0", "12"]), Some(vec![0, 12]));
    }

    #[test]
    fn levels_surface() {
        let Command::Hourly(hourly) = parse(&[
            "hourly",
            "--variables",
            "geopotential",
            "--startyear",
            "2008",
            "--levels",
            "surface",
        ])
        .command
        else {
            panic!("expected hourly");
        };
        assert_eq!(hourly.options().unwrap().levels, Levels::Surface);
    }

    #[test]
    fn threads_and_format_are_restricted() {
        let base = ["hourly", "--variables", "2m_temperature", "--startyear", "2008"];
        let with = |extra: &[&str]| {
            CliArgs::try_parse_from(
                std::iter::once("era5cli")
                    .chain(base.iter().copied())
                    .chain(extra.iter().copied()),
            )
        };
        assert!(with(&["--threads", "7"]).is_err());
        assert!(with(&["--threads", "6"]).is_ok());
        assert!(with(&["--format", "zarr"]).is_err());
    }

    #[test]
    fn info_and_config() {
        match parse(&["info", "2Dvars"]).command {
            Command::Info { name } => assert_eq!(name, "2Dvars"),
            other => panic!("unexpected {other:?}"),
        }
        match parse(&["config", "--key", "abc"]).command {
            Command::Config(c) => {
                assert_eq!(c.key.as_deref(), Some("abc"));
                assert_eq!(c.url, era5cli::DEFAULT_CDS_URL);
                assert!(!c.show);
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
