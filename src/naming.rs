use crate::area::Area;
use crate::error::{Error, Result};
use crate::options::Fetch;

/// Output file name for one job, e.g. `era5_2m_temperature_2008-2010_hourly.nc`.
///
/// The name encodes every setting that changes the file content so that two
/// different jobs never write to the same file.
pub fn output_filename(
    fetch: &Fetch,
    variable: &str,
    years: &[i32],
    month: Option<u32>,
) -> Result<String> {
    let (start, end) = match (years.first(), years.last()) {
        (Some(start), Some(end)) => (*start, *end),
        _ => return Err(Error::InvalidYears("job without years".into())),
    };

    let prefix = if fetch.product().is_land() {
        format!("{}-land", fetch.output_prefix())
    } else {
        fetch.output_prefix().to_string()
    };
    let variable = if fetch.dashed_varname {
        variable.replace('_', "-")
    } else {
        variable.to_string()
    };

    let mut name = format!("{prefix}_{variable}_{}", year_segment(start, end));
    if let Some(month) = month {
        name.push_str(&format!("-{month:02}"));
    }
    name.push('_');
    name.push_str(fetch.period().kind().as_str());

    if let Some(area) = fetch.area() {
        name.push_str(&area_segment(&area));
    }
    if fetch.product().is_ensemble() {
        name.push_str("_ensemble");
    }
    if fetch.period().is_statistics() {
        name.push_str("_statistics");
    }
    if fetch.period().is_synoptic() {
        name.push_str("_synoptic");
    }

    name.push('.');
    name.push_str(fetch.format().extension());
    Ok(name)
}

fn year_segment(start: i32, end: i32) -> String {
    if start == end {
        start.to_string()
    } else {
        format!("{start}-{end}")
    }
}

/// `_{lon_min}-{lon_max}_{lat_min}-{lat_max}` with whole-degree compass tokens.
fn area_segment(area: &Area) -> String {
    format!(
        "_{}-{}_{}-{}",
        compass(area.lon_min, 'E', 'W'),
        compass(area.lon_max, 'E', 'W'),
        compass(area.lat_min, 'N', 'S'),
        compass(area.lat_max, 'N', 'S'),
    )
}

fn compass(value: f64, positive: char, negative: char) -> String {
    let rounded = value.round();
    let hemisphere = if rounded >= 0.0 { positive } else { negative };
    format!("{}{hemisphere}", rounded.abs() as i64)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::options::{FetchOptions, PeriodKind};

    fn opts(period: PeriodKind) -> FetchOptions {
        FetchOptions {
            days: vec![1],
            ..FetchOptions::new(period, vec!["2m_temperature".into()], 2008)
        }
    }

    fn name(opts: FetchOptions, years: &[i32], month: Option<u32>) -> String {
        let fetch = Fetch::new(opts).unwrap();
        output_filename(&fetch, "2m_temperature", years, month).unwrap()
    }

    #[test]
    fn plain_names() {
        assert_eq!(
            name(opts(PeriodKind::Hourly), &[2008], None),
            "era5_2m_temperature_2008_hourly.nc"
        );
        assert_eq!(
            name(opts(PeriodKind::Monthly), &[2008, 2009], None),
            "era5_2m_temperature_2008-2009_monthly.nc"
        );
        assert_eq!(
            name(
                FetchOptions {
                    format: "grib".into(),
                    ..opts(PeriodKind::Hourly)
                },
                &[2008],
                Some(7)
            ),
            "era5_2m_temperature_2008-07_hourly.grb"
        );
    }

    #[test]
    fn flags_are_appended_in_order() {
        assert_eq!(
            name(
                FetchOptions {
                    ensemble: true,
                    statistics: true,
                    ..opts(PeriodKind::Hourly)
                },
                &[2008],
                None
            ),
            "era5_2m_temperature_2008_hourly_ensemble_statistics.nc"
        );
        assert_eq!(
            name(
                FetchOptions {
                    ensemble: true,
                    synoptic: Some(vec![]),
                    ..opts(PeriodKind::Monthly)
                },
                &[2008],
                None
            ),
            "era5_2m_temperature_2008_monthly_ensemble_synoptic.nc"
        );
    }

    #[test]
    fn land_prefix_and_dashed_names() {
        assert_eq!(
            name(
                FetchOptions {
                    land: true,
                    dashed_varname: true,
                    output_prefix: "out".into(),
                    ..opts(PeriodKind::Monthly)
                },
                &[2008],
                None
            ),
            "out-land_2m-temperature_2008_monthly.nc"
        );
    }

    #[test]
    fn area_uses_compass_tokens() {
        assert_eq!(
            name(
                FetchOptions {
                    area: Some(Area::new(-10.4, -75.6, -30.0, 12.0)),
                    ..opts(PeriodKind::Hourly)
                },
                &[2008],
                None
            ),
            "era5_2m_temperature_2008_hourly_76W-12E_30S-10S.nc"
        );
    }

    #[test]
    fn distinct_settings_give_distinct_names() {
        let variants = vec![
            opts(PeriodKind::Hourly),
            opts(PeriodKind::Monthly),
            FetchOptions {
                ensemble: true,
                ..opts(PeriodKind::Hourly)
            },
            FetchOptions {
                ensemble: true,
                statistics: true,
                ..opts(PeriodKind::Hourly)
            },
            FetchOptions {
                synoptic: Some(vec![]),
                ..opts(PeriodKind::Monthly)
            },
            FetchOptions {
                land: true,
                ..opts(PeriodKind::Hourly)
            },
            FetchOptions {
                area: Some(Area::new(60.0, 0.0, 50.0, 10.0)),
                ..opts(PeriodKind::Hourly)
            },
        ];
        let mut seen = HashSet::new();
        for v in variants {
            for years in [&[2008][..], &[2008, 2009][..]] {
                assert!(seen.insert(name(v.clone(), years, None)));
            }
        }
    }
}
