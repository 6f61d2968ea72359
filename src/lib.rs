#![forbid(unsafe_code)]

//! Bulk downloads of ERA5 reanalysis data from the Copernicus Climate Data Store.
//!
//! A download is described once with [`FetchOptions`] and validated into a
//! [`Fetch`]. The planner expands it into one [`Job`] per variable and year
//! (or per variable with `merge`, or per month with `splitmonths`), the
//! builder turns each job into a CDS dataset name, payload and output file
//! name, and [`dispatch`] hands the jobs to a [`Transport`] on a worker pool.
//!
//! **Dry run**
//! ```no_run
//! use era5cli::{DryRun, Fetch, FetchOptions, PeriodKind, dispatch, plan};
//!
//! let fetch = Fetch::new(FetchOptions {
//!     end_year: Some(2010),
//!     ..FetchOptions::new(PeriodKind::Monthly, vec!["total_precipitation".into()], 2008)
//! })?;
//! let outcomes = dispatch(&fetch, plan(&fetch), &DryRun::stdout())?;
//! assert!(outcomes.iter().all(|o| o.is_ok()));
//! # Ok::<(), era5cli::Error>(())
//! ```
//!
//! **Downloading**
//! ```no_run
//! use era5cli::{CdsClient, ClientOptions, Fetch, FetchOptions, PeriodKind, config, dispatch, plan};
//!
//! let credentials = config::resolve_credentials(
//!     &config::era5cli_config_path()?,
//!     &config::cdsapirc_path()?,
//! )?;
//! let client = CdsClient::new(ClientOptions::new(credentials))?;
//! client.check_authentication()?;
//!
//! let fetch = Fetch::new(FetchOptions {
//!     days: vec![1],
//!     hours: vec![0, 12],
//!     ..FetchOptions::new(PeriodKind::Hourly, vec!["2m_temperature".into()], 2008)
//! })?;
//! for outcome in dispatch(&fetch, plan(&fetch), &client)? {
//!     if let Ok(done) = outcome.result {
//!         println!("{} ({} bytes)", done.built.filename, done.bytes);
//!     }
//! }
//! # Ok::<(), era5cli::Error>(())
//! ```
//!
//! Notes:
//! - Data are governed by the Copernicus licence, which is accepted per dataset
//!   on the CDS website.
//! - Dry runs print `{dataset} {payload} {filename}` lines and never touch the network.

mod area;
mod builder;
pub mod catalog;
mod client;
pub mod config;
pub mod date;
mod dispatch;
mod error;
mod info;
mod naming;
mod options;
mod planner;
mod request;
pub mod size;

pub use crate::area::Area;
pub use crate::builder::{BuiltRequest, Resolved, build, check_variable, product_type, resolve_dataset};
pub use crate::client::{CdsClient, ClientOptions};
pub use crate::config::{Credentials, DEFAULT_CDS_URL};
pub use crate::dispatch::{Completed, DryRun, JobOutcome, Transport, dispatch};
pub use crate::error::{Error, Result};
pub use crate::info::Info;
pub use crate::naming::output_filename;
pub use crate::options::{
    Fanout, Fetch, FetchOptions, Levels, MAX_THREADS, OutputFormat, Period, PeriodKind, Product,
};
pub use crate::planner::{Job, plan};
pub use crate::request::{Request, RequestValue};
