//! CDS credentials stored under `~/.config/era5cli/cds_key.txt`.
//!
//! The file holds two lines, `url: <url>` and `key: <key>`. When it is missing,
//! a `~/.cdsapirc` written for the current CDS is adopted instead.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{Error, Result};

pub const DEFAULT_CDS_URL: &str = "https://cds.climate.copernicus.eu/api";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub url: String,
    pub key: String,
}

pub fn era5cli_config_path() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(".config").join("era5cli").join("cds_key.txt"))
        .ok_or_else(|| Error::Config("cannot determine the home directory".into()))
}

pub fn cdsapirc_path() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(".cdsapirc"))
        .ok_or_else(|| Error::Config("cannot determine the home directory".into()))
}

fn field(contents: &str, name: &str) -> Option<String> {
    contents.lines().find_map(|line| {
        line.trim()
            .strip_prefix(name)
            .and_then(|rest| rest.strip_prefix(':'))
            .map(|value| value.trim().to_string())
    })
}

fn parse(contents: &str, path: &Path) -> Result<Credentials> {
    let missing = |name: &str| {
        Error::Config(format!("no '{name}:' line in {}", path.display()))
    };
    Ok(Credentials {
        url: field(contents, "url").ok_or_else(|| missing("url"))?,
        key: field(contents, "key").ok_or_else(|| missing("key"))?,
    })
}

pub fn load_era5cli_config(path: &Path) -> Result<Credentials> {
    let contents = fs::read_to_string(path)?;
    if field(&contents, "uid").is_some() {
        return Err(Error::InvalidLogin(
            "old config detected; the new CDS API only needs a key, \
             reconfigure your login with `era5cli config --key <KEY>`"
                .into(),
        ));
    }
    parse(&contents, path)
}

pub fn write_era5cli_config(path: &Path, credentials: &Credentials) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(
        path,
        format!("url: {}\nkey: {}\n", credentials.url, credentials.key),
    )?;
    Ok(())
}

pub fn load_cdsapi_config(path: &Path) -> Result<Credentials> {
    let credentials = parse(&fs::read_to_string(path)?, path)?;
    if credentials.key.contains(':') || credentials.url.contains("api/v2") {
        return Err(Error::InvalidLogin(format!(
            "{} contains a UID entry or the URL of the old CDS; \
             reconfigure your key for the new CDS",
            path.display()
        )));
    }
    Ok(credentials)
}

/// Credentials from the era5cli file, falling back to (and adopting) `.cdsapirc`.
pub fn resolve_credentials(era5cli_path: &Path, cdsapirc_path: &Path) -> Result<Credentials> {
    if era5cli_path.exists() {
        return load_era5cli_config(era5cli_path);
    }
    if cdsapirc_path.exists() {
        info!(
            "era5cli configuration file not found, using the key in {}",
            cdsapirc_path.display()
        );
        let credentials = load_cdsapi_config(cdsapirc_path)?;
        write_era5cli_config(era5cli_path, &credentials)?;
        return Ok(credentials);
    }
    Err(Error::InvalidLogin(
        "no CDS login found, configure it with `era5cli config --key <KEY>`".into(),
    ))
}
