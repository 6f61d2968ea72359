use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid option: {0}")]
    InvalidOption(String),

    #[error("conflicting options: {0}")]
    ConflictingOptions(String),

    #[error("invalid variable name: {0}")]
    InvalidVariable(String),

    #[error("variable '{0}' is not available in ERA5-Land")]
    NotInLand(String),

    #[error("variable '{0}' has no monthly data, use the hourly period instead")]
    NoMonthlyData(String),

    #[error("invalid pressure levels: {0}")]
    InvalidLevels(String),

    #[error("invalid area: {0}")]
    InvalidArea(String),

    #[error("invalid years: {0}")]
    InvalidYears(String),

    #[error("invalid value specified for {field}: {value}")]
    InvalidValue { field: &'static str, value: i64 },

    #[error("unknown output format: {0}")]
    UnknownFormat(String),

    #[error(
        "request too large: {size} items requested, the CDS accepts at most {limit}; \
         request fewer days, hours, levels or use --splitmonths"
    )]
    TooLargeRequest { size: usize, limit: usize },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid login: {0}")]
    InvalidLogin(String),

    #[error("remote job {job} failed: {message}")]
    Remote { job: String, message: String },

    #[error("output file already exists: {0} (use --overwrite to replace it)")]
    FileExists(String),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("url parse error: {0}")]
    Url(#[from] url::ParseError),
}
