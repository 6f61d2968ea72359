use std::fs;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use era5cli::config::{self, Credentials};
use era5cli::{CdsClient, ClientOptions, DryRun, Fetch, FetchOptions, Info, JobOutcome, dispatch, plan};

use super::args::{CliArgs, Command, ConfigArgs};
use super::errors::AppError;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // A subscriber may already be installed when embedded in tests.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn download(opts: FetchOptions, dryrun: bool) -> Result<(), AppError> {
    let fetch = Fetch::new(opts)?;
    let jobs = plan(&fetch);
    info!("{} request(s) on {} thread(s)", jobs.len(), fetch.threads());

    let outcomes = if dryrun {
        dispatch(&fetch, jobs, &DryRun::stdout())?
    } else {
        let credentials = config::resolve_credentials(
            &config::era5cli_config_path()?,
            &config::cdsapirc_path()?,
        )?;
        let client = CdsClient::new(ClientOptions::new(credentials))?;
        client.check_authentication()?;
        dispatch(&fetch, jobs, &client)?
    };
    summarize(&outcomes)
}

fn summarize(outcomes: &[JobOutcome]) -> Result<(), AppError> {
    let mut failed = 0;
    for outcome in outcomes {
        if let Err(e) = &outcome.result {
            error!(
                "{} for {:?}: {e}",
                outcome.job.variable, outcome.job.years
            );
            failed += 1;
        }
    }
    info!("Completed: {}", outcomes.len() - failed);
    info!("Failed: {failed}");

    if failed > 0 {
        return Err(AppError::JobsFailed {
            failed,
            total: outcomes.len(),
        });
    }
    Ok(())
}

fn configure(args: ConfigArgs) -> Result<(), AppError> {
    if args.uid.is_some() {
        return Err(AppError::Input(
            "--uid is no longer used by the CDS, pass only --key".into(),
        ));
    }

    match (args.show, args.key) {
        (true, Some(_)) => Err(AppError::Input(
            "--show cannot be combined with --key".into(),
        )),
        (false, None) => Err(AppError::Input(
            "pass --key to store a CDS key, or --show to print the stored one".into(),
        )),
        (true, None) => {
            let path = config::era5cli_config_path()?;
            if !path.exists() {
                return Err(AppError::Input(format!(
                    "no configuration found at {}, set one with `era5cli config --key <KEY>`",
                    path.display()
                )));
            }
            print!("{}", fs::read_to_string(&path)?);
            Ok(())
        }
        (false, Some(key)) => {
            let path = config::era5cli_config_path()?;
            let credentials = Credentials { url: args.url, key };
            CdsClient::new(ClientOptions::new(credentials.clone()))?.check_authentication()?;
            config::write_era5cli_config(&path, &credentials)?;
            println!("Keys successfully validated and stored in {}", path.display());
            Ok(())
        }
    }
}

pub fn run(args: CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    match args.command {
        Command::Hourly(hourly) => {
            let opts = hourly.options()?;
            download(opts, hourly.common.dryrun)?
        }
        Command::Monthly(monthly) => {
            let opts = monthly.options()?;
            download(opts, monthly.common.dryrun)?
        }
        Command::Info { name } => print!("{}", Info::new(&name)?),
        Command::Config(config) => configure(config)?,
    }
    Ok(())
}
