use std::path::Path;
use std::thread;
use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::Client as HttpClient;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use serde::Deserialize;
use tempfile::NamedTempFile;
use tracing::{debug, info};
use url::Url;

use crate::config::Credentials;
use crate::dispatch::Transport;
use crate::error::{Error, Result};
use crate::request::Request;

#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub url: String,
    pub key: String,
    pub verify_tls: bool,
    /// First wait between job status polls.
    pub poll_interval: Duration,
    /// Upper bound the poll interval grows to.
    pub max_poll_interval: Duration,
}

impl ClientOptions {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            url: credentials.url,
            key: credentials.key,
            verify_tls: true,
            poll_interval: Duration::from_secs(1),
            max_poll_interval: Duration::from_secs(120),
        }
    }
}

#[derive(Debug, Deserialize)]
struct JobStatus {
    #[serde(rename = "jobID")]
    job_id: String,
    status: String,
}

#[derive(Debug, Deserialize)]
struct JobResults {
    asset: Asset,
}

#[derive(Debug, Deserialize)]
struct Asset {
    value: AssetValue,
}

#[derive(Debug, Deserialize)]
struct AssetValue {
    href: String,
}

#[derive(Debug, Deserialize)]
struct Problem {
    title: Option<String>,
    detail: Option<String>,
}

/// Blocking client for the CDS retrieve API.
#[derive(Debug, Clone)]
pub struct CdsClient {
    opts: ClientOptions,
    base_url: Url,
    http: HttpClient,
}

impl CdsClient {
    pub fn new(opts: ClientOptions) -> Result<Self> {
        let base_url = Url::parse(opts.url.trim_end_matches('/'))?;

        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("era5cli-rs/", env!("CARGO_PKG_VERSION"))),
        );
        let token = HeaderValue::from_str(&opts.key)
            .map_err(|_| Error::Config("the CDS key contains invalid characters".into()))?;
        headers.insert(HeaderName::from_static("private-token"), token);

        let mut builder = HttpClient::builder().default_headers(headers);
        if !opts.verify_tls {
            builder = builder.danger_accept_invalid_certs(true);
        }
        let http = builder.build()?;

        Ok(Self {
            opts,
            base_url,
            http,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url.as_str().trim_end_matches('/'))
    }

    /// Probe the account endpoint with the configured key.
    pub fn check_authentication(&self) -> Result<()> {
        let url = self.endpoint("profiles/v1/account/verification/pat");
        let resp = self.http.post(&url).send()?;
        if resp.status() == StatusCode::UNAUTHORIZED {
            return Err(Error::InvalidLogin(
                "authorization with the CDS failed, likely due to an incorrect key; \
                 reconfigure it with `era5cli config --key <KEY>`"
                    .into(),
            ));
        }
        resp.error_for_status()?;
        debug!("authenticated against {}", self.base_url);
        Ok(())
    }

    fn submit(&self, dataset: &str, request: &Request) -> Result<JobStatus> {
        let url = self.endpoint(&format!("retrieve/v1/processes/{dataset}/execution"));
        let body = serde_json::json!({ "inputs": request });
        let resp = self.http.post(&url).json(&body).send()?;
        if !resp.status().is_success() {
            let status = resp.status();
            let problem: Option<Problem> = resp.json().ok();
            return Err(Error::Remote {
                job: dataset.to_string(),
                message: describe(status, problem),
            });
        }
        Ok(resp.json()?)
    }

    fn wait(&self, mut job: JobStatus) -> Result<String> {
        let mut interval = self.opts.poll_interval;
        loop {
            match job.status.as_str() {
                "successful" => return Ok(job.job_id),
                "failed" | "dismissed" | "rejected" => {
                    let message = self.failure_reason(&job.job_id);
                    return Err(Error::Remote {
                        job: job.job_id,
                        message,
                    });
                }
                other => debug!(job = %job.job_id, "status {other}, next poll in {interval:?}"),
            }
            thread::sleep(interval);
            interval = (interval * 3 / 2).min(self.opts.max_poll_interval);

            let url = self.endpoint(&format!("retrieve/v1/jobs/{}", job.job_id));
            job = self.http.get(&url).send()?.error_for_status()?.json()?;
        }
    }

    fn failure_reason(&self, job_id: &str) -> String {
        let url = self.endpoint(&format!("retrieve/v1/jobs/{job_id}/results"));
        match self.http.get(&url).send() {
            Ok(resp) => {
                let status = resp.status();
                describe(status, resp.json().ok())
            }
            Err(e) => e.to_string(),
        }
    }

    fn result_url(&self, job_id: &str) -> Result<Url> {
        let url = self.endpoint(&format!("retrieve/v1/jobs/{job_id}/results"));
        let results: JobResults = self.http.get(&url).send()?.error_for_status()?.json()?;
        Ok(self.base_url.join(&results.asset.value.href)?)
    }

    /// Stream `url` into `target`. Nothing is written to `target` unless the
    /// whole body arrived.
    fn download(&self, url: Url, target: &Path) -> Result<u64> {
        let mut resp = self.http.get(url).send()?.error_for_status()?;

        let dir = match target.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        let mut partial = NamedTempFile::new_in(dir)?;
        let bytes = resp.copy_to(&mut partial)?;
        partial.persist(target).map_err(|e| e.error)?;
        Ok(bytes)
    }
}

impl Transport for CdsClient {
    fn retrieve(&self, dataset: &str, request: &Request, target: &Path) -> Result<u64> {
        let job = self.submit(dataset, request)?;
        info!("Submitted request for {} as job {}", target.display(), job.job_id);
        let job_id = self.wait(job)?;
        let url = self.result_url(&job_id)?;
        self.download(url, target)
    }
}

fn describe(status: StatusCode, problem: Option<Problem>) -> String {
    match problem {
        Some(Problem {
            title: Some(title),
            detail,
        }) => match detail {
            Some(detail) => format!("{title}: {detail}"),
            None => title,
        },
        _ => status.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Read, Write};
    use std::net::TcpListener;

    use super::*;

    /// Serve one canned HTTP response on a local port.
    fn serve_once(response: &'static str) -> Url {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut buf = [0u8; 4096];
            let _ = stream.read(&mut buf);
            stream.write_all(response.as_bytes()).unwrap();
        });
        Url::parse(&format!("http://{addr}/result.nc")).unwrap()
    }

    fn client(url: &str, key: &str) -> Result<CdsClient> {
        CdsClient::new(ClientOptions::new(Credentials {
            url: url.to_string(),
            key: key.to_string(),
        }))
    }

    #[test]
    fn endpoints_join_under_the_api_root() {
        let c = client("https://cds.climate.copernicus.eu/api/", "abc-def").unwrap();
        assert_eq!(
            c.endpoint("retrieve/v1/jobs/123"),
            "https://cds.climate.copernicus.eu/api/retrieve/v1/jobs/123"
        );
    }

    #[test]
    fn rejects_bad_urls_and_keys() {
        assert!(matches!(client("not a url", "abc"), Err(Error::Url(_))));
        assert!(matches!(
            client("https://cds.climate.copernicus.eu/api", "bad\nkey"),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn describes_remote_problems() {
        let problem = Problem {
            title: Some("The job failed".into()),
            detail: Some("invalid request".into()),
        };
        assert_eq!(
            describe(StatusCode::BAD_REQUEST, Some(problem)),
            "The job failed: invalid request"
        );
        assert_eq!(
            describe(StatusCode::BAD_REQUEST, None),
            "400 Bad Request"
        );
    }

    #[test]
    fn parses_job_documents() {
        let status: JobStatus =
            serde_json::from_str(r#"{"jobID": "abc", "status": "accepted", "type": "process"}"#)
                .unwrap();
        assert_eq!(status.job_id, "abc");
        let results: JobResults = serde_json::from_str(
            r#"{"asset": {"value": {"href": "https://x/y.nc", "file:size": 10}}}"#,
        )
        .unwrap();
        assert_eq!(results.asset.value.href, "https://x/y.nc");
    }

    #[test]
    fn failed_download_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("era5_2m_temperature_2008_hourly.nc");
        let url = serve_once("HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n");

        let c = client("https://cds.climate.copernicus.eu/api", "abc-def").unwrap();
        assert!(matches!(c.download(url, &target), Err(Error::Http(_))));
        assert!(!target.exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn download_replaces_the_target() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("era5_2m_temperature_2008_hourly.nc");
        std::fs::write(&target, b"old contents").unwrap();
        let url = serve_once("HTTP/1.1 200 OK\r\nContent-Length: 4\r\nConnection: close\r\n\r\nCDF1");

        let c = client("https://cds.climate.copernicus.eu/api", "abc-def").unwrap();
        assert_eq!(c.download(url, &target).unwrap(), 4);
        assert_eq!(std::fs::read(&target).unwrap(), b"CDF1");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
