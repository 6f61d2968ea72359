use std::io::Write;
use std::path::Path;
use std::sync::{Arc, Mutex};

use pretty_assertions::assert_eq;
use tracing_subscriber::fmt::MakeWriter;

use era5cli::{
    DryRun, Error, Fetch, FetchOptions, Levels, PeriodKind, Request, Transport, dispatch, plan,
};

fn quoted(values: impl IntoIterator<Item = String>) -> String {
    let items: Vec<String> = values.into_iter().map(|v| format!("'{v}'")).collect();
    format!("[{}]", items.join(", "))
}

fn all_months() -> String {
    quoted((1..=12).map(|m| format!("{m:02}")))
}

fn all_hours() -> String {
    quoted((0..24).map(|h| format!("{h:02}:00")))
}

fn all_days() -> String {
    quoted((1..=31).map(|d| format!("{d:02}")))
}

const ALL_LEVELS: &str = "[1, 2, 3, 5, 7, 10, 20, 30, 50, 70, 100, 125, 150, 175, 200, 225, 250, \
                          300, 350, 400, 450, 500, 550, 600, 650, 700, 750, 775, 800, 825, 850, \
                          875, 900, 925, 950, 975, 1000]";

fn dry_run(opts: FetchOptions) -> Vec<String> {
    let fetch = Fetch::new(opts).unwrap();
    let out = DryRun::new(Vec::new());
    let outcomes = dispatch(&fetch, plan(&fetch), &out).unwrap();
    assert!(outcomes.iter().all(|o| o.is_ok()));
    String::from_utf8(out.into_inner())
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

/// Log output collected by a scoped subscriber.
#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Write for Captured {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for Captured {
    type Writer = Captured;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Dry run `opts` and return the log lines it emitted.
fn notices(opts: FetchOptions) -> String {
    let captured = Captured::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(captured.clone())
        .with_max_level(tracing::Level::INFO)
        .with_ansi(false)
        .finish();
    tracing::subscriber::with_default(subscriber, || {
        dry_run(opts);
    });
    let bytes = captured.0.lock().unwrap().clone();
    String::from_utf8(bytes).unwrap()
}

fn hourly(variable: &str) -> FetchOptions {
    FetchOptions::new(PeriodKind::Hourly, vec![variable.to_string()], 2008)
}

fn monthly(variable: &str, year: i32) -> FetchOptions {
    FetchOptions::new(PeriodKind::Monthly, vec![variable.to_string()], year)
}

#[test]
fn orography_is_requested_as_surface_geopotential() {
    assert_eq!(
        dry_run(hourly("orography")),
        vec![format!(
            "reanalysis-era5-single-levels {{'variable': 'geopotential', 'year': 2008, \
             'month': {}, 'time': {}, 'format': 'netcdf', 'product_type': 'reanalysis', \
             'day': {}}} era5_orography_2008_hourly.nc",
            all_months(),
            all_hours(),
            all_days()
        )]
    );
}

#[test]
fn surface_geopotential_uses_single_levels() {
    let opts = FetchOptions {
        levels: Levels::Surface,
        ..hourly("geopotential")
    };
    assert_eq!(
        dry_run(opts),
        vec![format!(
            "reanalysis-era5-single-levels {{'variable': 'geopotential', 'year': 2008, \
             'month': {}, 'time': {}, 'format': 'netcdf', 'product_type': 'reanalysis', \
             'day': {}}} era5_geopotential_2008_hourly.nc",
            all_months(),
            all_hours(),
            all_days()
        )]
    );
}

#[test]
fn geopotential_defaults_to_pressure_levels() {
    let opts = FetchOptions {
        days: vec![1],
        ..hourly("geopotential")
    };
    assert_eq!(
        dry_run(opts),
        vec![format!(
            "reanalysis-era5-pressure-levels {{'variable': 'geopotential', 'year': 2008, \
             'month': {}, 'time': {}, 'format': 'netcdf', 'pressure_level': {ALL_LEVELS}, \
             'product_type': 'reanalysis', 'day': ['01']}} era5_geopotential_2008_hourly.nc",
            all_months(),
            all_hours(),
        )]
    );
}

#[test]
fn full_year_on_all_levels_is_too_large() {
    assert!(matches!(
        Fetch::new(hourly("geopotential")),
        Err(Error::TooLargeRequest {
            size: 330_336,
            limit: 120_000
        })
    ));
}

#[test]
fn back_extension_monthly_means() {
    assert_eq!(
        dry_run(FetchOptions {
            prelimbe: true,
            ..monthly("temperature", 1960)
        }),
        vec![format!(
            "reanalysis-era5-pressure-levels-monthly-means-preliminary-back-extension \
             {{'variable': 'temperature', 'year': 1960, 'month': {}, 'time': ['00:00'], \
             'format': 'netcdf', 'pressure_level': {ALL_LEVELS}, \
             'product_type': 'reanalysis-monthly-means-of-daily-means'}} \
             era5_temperature_1960_monthly.nc",
            all_months(),
        )]
    );
}

#[test]
fn land_monthly_means() {
    assert_eq!(
        dry_run(FetchOptions {
            land: true,
            ..monthly("snow_cover", 2008)
        }),
        vec![format!(
            "reanalysis-era5-land-monthly-means {{'variable': 'snow_cover', 'year': 2008, \
             'month': {}, 'time': ['00:00'], 'format': 'netcdf', \
             'product_type': 'monthly_averaged_reanalysis'}} era5-land_snow_cover_2008_monthly.nc",
            all_months(),
        )]
    );
}

#[test]
fn merged_years_with_area_and_grib() {
    let opts = FetchOptions {
        end_year: Some(2010),
        merge: true,
        format: "grib".into(),
        area: Some(era5cli::Area::new(60.129, -10.0, 50.0, 10.0)),
        ..monthly("total_precipitation", 2008)
    };
    assert_eq!(
        dry_run(opts),
        vec![format!(
            "reanalysis-era5-single-levels-monthly-means {{'variable': 'total_precipitation', \
             'year': [2008, 2009, 2010], 'month': {}, 'time': ['00:00'], 'format': 'grib', \
             'area': [60.12, -10.0, 50.0, 10.0], 'product_type': 'monthly_averaged_reanalysis'}} \
             era5_total_precipitation_2008-2010_monthly_10W-10E_50N-60N.grb",
            all_months(),
        )]
    );
}

#[test]
fn splitmonths_names_every_month() {
    let opts = FetchOptions {
        splitmonths: true,
        months: vec![1, 2],
        days: vec![1],
        hours: vec![0],
        dashed_varname: true,
        ..hourly("2m_temperature")
    };
    assert_eq!(
        dry_run(opts),
        vec![
            "reanalysis-era5-single-levels {'variable': '2m_temperature', 'year': 2008, \
             'month': '01', 'time': ['00:00'], 'format': 'netcdf', 'product_type': 'reanalysis', \
             'day': ['01']} era5_2m-temperature_2008-01_hourly.nc"
                .to_string(),
            "reanalysis-era5-single-levels {'variable': '2m_temperature', 'year': 2008, \
             'month': '02', 'time': ['00:00'], 'format': 'netcdf', 'product_type': 'reanalysis', \
             'day': ['01']} era5_2m-temperature_2008-02_hourly.nc"
                .to_string(),
        ]
    );
}

#[test]
fn merge_and_splitmonths_conflict() {
    let opts = FetchOptions {
        merge: true,
        splitmonths: true,
        ..hourly("2m_temperature")
    };
    assert!(matches!(Fetch::new(opts), Err(Error::ConflictingOptions(_))));
}

struct Recording {
    calls: Mutex<Vec<(String, String, String)>>,
}

impl Transport for Recording {
    fn retrieve(&self, dataset: &str, request: &Request, target: &Path) -> era5cli::Result<u64> {
        self.calls.lock().unwrap().push((
            dataset.to_string(),
            serde_json::to_string(request)?,
            target.display().to_string(),
        ));
        Ok(0)
    }

    fn writes_files(&self) -> bool {
        false
    }
}

#[test]
fn transports_receive_the_json_payload() {
    let fetch = Fetch::new(FetchOptions {
        ensemble: true,
        statistics: true,
        days: vec![1],
        hours: vec![0, 1, 3],
        threads: 2,
        ..hourly("2m_temperature")
    })
    .unwrap();
    let recording = Recording {
        calls: Mutex::new(Vec::new()),
    };
    let outcomes = dispatch(&fetch, plan(&fetch), &recording).unwrap();
    assert_eq!(outcomes.len(), 1);

    let calls = recording.calls.into_inner().unwrap();
    assert_eq!(
        calls,
        vec![(
            "reanalysis-era5-single-levels".to_string(),
            format!(
                r#"{{"variable":"2m_temperature","year":2008,"month":{},"time":["00:00","01:00","03:00"],"format":"netcdf","product_type":["ensemble_members","ensemble_mean","ensemble_spread"],"day":["01"]}}"#,
                serde_json::to_string(&(1..=12).map(|m| format!("{m:02}")).collect::<Vec<_>>())
                    .unwrap()
            ),
            "era5_2m_temperature_2008_hourly_ensemble_statistics.nc".to_string(),
        )]
    );
}

#[test]
fn orography_logs_a_deprecation_warning() {
    let logs = notices(hourly("orography"));
    assert!(logs.contains("WARN"), "{logs}");
    assert!(
        logs.contains("The variable 'orography' has been deprecated by CDS."),
        "{logs}"
    );
}

#[test]
fn geopotential_logs_which_levels_were_chosen() {
    let surface = notices(FetchOptions {
        levels: Levels::Surface,
        ..hourly("geopotential")
    });
    assert!(surface.contains("Getting variable from surface level data."), "{surface}");

    let pressure = notices(FetchOptions {
        days: vec![1],
        ..hourly("geopotential")
    });
    assert!(pressure.contains("Getting variable from pressure level data."), "{pressure}");
    assert!(!pressure.contains("surface level data"), "{pressure}");
}

#[test]
fn rounded_area_is_reported() {
    let logs = notices(FetchOptions {
        area: Some(era5cli::Area::new(60.129, -10.0, 50.0, 10.0)),
        ..monthly("total_precipitation", 2008)
    });
    assert!(logs.contains("Area coordinates rounded down to two decimals"), "{logs}");
    assert_eq!(logs.matches("rounded down").count(), 1);
}

#[test]
fn plain_requests_are_silent() {
    let logs = notices(FetchOptions {
        land: true,
        ..monthly("snow_cover", 2008)
    });
    assert_eq!(logs, "");
}
