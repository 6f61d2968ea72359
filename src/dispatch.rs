//! Runs jobs on a worker pool and reports the outcome of each one.
//!
//! A failing job never aborts its siblings; every job ends up in the returned
//! list with either the built request or the error it hit.

use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use rayon::prelude::*;
use tracing::{info, warn};

use crate::builder::{BuiltRequest, build};
use crate::error::{Error, Result};
use crate::options::Fetch;
use crate::planner::Job;
use crate::request::Request;

/// Something that delivers a built request, normally the CDS itself.
pub trait Transport: Sync {
    /// Retrieve `request` from `dataset` into `target`, returning the bytes written.
    fn retrieve(&self, dataset: &str, request: &Request, target: &Path) -> Result<u64>;

    /// Whether `target` is written, which enables the overwrite check.
    fn writes_files(&self) -> bool {
        true
    }
}

/// Prints `{dataset} {payload} {filename}` instead of downloading.
#[derive(Debug)]
pub struct DryRun<W> {
    out: Mutex<W>,
}

impl DryRun<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> DryRun<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        match self.out.into_inner() {
            Ok(w) => w,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl<W: Write + Send> Transport for DryRun<W> {
    fn retrieve(&self, dataset: &str, request: &Request, target: &Path) -> Result<u64> {
        let mut out = self
            .out
            .lock()
            .map_err(|_| Error::Io(std::io::Error::other("dry run output lock poisoned")))?;
        writeln!(out, "{dataset} {request} {}", target.display())?;
        Ok(0)
    }

    fn writes_files(&self) -> bool {
        false
    }
}

#[derive(Debug)]
pub struct Completed {
    pub built: BuiltRequest,
    pub bytes: u64,
}

#[derive(Debug)]
pub struct JobOutcome {
    pub job: Job,
    pub result: Result<Completed>,
}

impl JobOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Build and deliver every job on a pool of `fetch.threads()` workers.
///
/// Outcomes are returned in job order.
pub fn dispatch<T: Transport>(fetch: &Fetch, jobs: Vec<Job>, transport: &T) -> Result<Vec<JobOutcome>> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(fetch.threads())
        .build()
        .map_err(|e| Error::Config(format!("cannot start worker pool: {e}")))?;

    // Pool threads log to the caller's subscriber, scoped or global.
    let dispatcher = tracing::dispatcher::get_default(|d| d.clone());
    let outcomes: Vec<JobOutcome> = pool.install(|| {
        jobs.into_par_iter()
            .map(|job| {
                tracing::dispatcher::with_default(&dispatcher, || {
                    let result = run_job(fetch, &job, transport);
                    if let Err(e) = &result {
                        warn!(variable = %job.variable, years = ?job.years, "job failed: {e}");
                    }
                    JobOutcome { job, result }
                })
            })
            .collect()
    });
    Ok(outcomes)
}

fn run_job<T: Transport>(fetch: &Fetch, job: &Job, transport: &T) -> Result<Completed> {
    let built = build(fetch, job)?;
    let target = Path::new(&built.filename);

    if transport.writes_files() && target.exists() && !fetch.overwrite() {
        return Err(Error::FileExists(built.filename.clone()));
    }

    let bytes = transport.retrieve(&built.dataset, &built.request, target)?;
    if transport.writes_files() {
        info!(
            "Downloaded {bytes} bytes to {} using {} {} from {} {}",
            built.filename,
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION"),
            built.dataset,
            built.request
        );
    }
    Ok(Completed { built, bytes })
}
