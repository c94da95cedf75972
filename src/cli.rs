use clap::Parser;
use reqwest::blocking::Client;
use tracing::{ debug, info, warn, };
use crate::error::GradeError;
use std::{
    fs::write,
    time::Duration,
    path::{
        Path,
        PathBuf,
    },
};




pub const URL_DEFAULT: &str = "http://shrouded-fjord-1085.herokuapp.com/";
pub const HTMLFILE_DEFAULT: &str = "index.html";
pub const CHECKSFILE_DEFAULT: &str = "checks.json";
pub const CACHEFILE_DEFAULT: &str = "url.html";





/// Grade an HTML document for the presence of CSS selectors
#[derive(Debug, Parser)]
#[command(name = "grade-me", version)]
pub struct Cli {
    /// path to the JSON array of selectors to check
    #[arg(short, long, default_value = CHECKSFILE_DEFAULT)]
    pub checks: PathBuf,
    /// path to a local HTML file
    #[arg(short, long, default_value = HTMLFILE_DEFAULT, conflicts_with = "url")]
    pub file: PathBuf,
    /// fetch the HTML from this URL instead of reading a local file
    #[arg(short, long, num_args = 0..=1, default_missing_value = URL_DEFAULT)]
    pub url: Option<String>,
    /// where a fetched document is written before it is graded
    #[arg(long, default_value = CACHEFILE_DEFAULT)]
    pub cache: PathBuf,
}

impl Cli {
    pub fn args() -> Self {
        Cli::parse()
    }
}





/// Where the HTML for this run comes from. Decided once from the parsed flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    File(PathBuf),
    Url(String),
}

impl Mode {
    pub fn from_cli(cli: &Cli) -> Self {
        match &cli.url {
            Some(url) => Self::Url(url.clone()),
            None => Self::File(cli.file.clone()),
        }
    }

    /// Returns a path holding the HTML to grade. In URL mode the body is
    /// fetched and written to `cache` first, replacing whatever was there.
    pub fn resolve(&self, cache: &Path) -> Result<PathBuf, GradeError> {
        match self {
            Self::File(file) => Self::file(file),
            Self::Url(url) => Self::url(url, cache),
        }
    }

    fn file(file: &Path) -> Result<PathBuf, GradeError> {
        if !file.exists() {
            return Err(GradeError::MissingFile(file.to_owned()));
        }
        debug!(file = %file.display(), "grading local file");
        Ok(file.to_owned())
    }

    fn url(url: &str, cache: &Path) -> Result<PathBuf, GradeError> {
        let failed = |source| GradeError::Fetch { url: url.to_owned(), source };
        info!(%url, "fetching document");
        let client = Client::builder()
            .timeout(None::<Duration>)
            .build()
            .map_err(failed)?;
        let response = client.get(url).send().map_err(failed)?;
        let status = response.status();
        if !status.is_success() {
            warn!(%url, %status, "server answered with an error status, grading its body anyway");
        }
        let body = response.bytes().map_err(failed)?;
        write(cache, &body)
            .map_err(|source| GradeError::Cache { path: cache.to_owned(), source })?;
        debug!(cache = %cache.display(), bytes = body.len(), "cached fetched document");
        Ok(cache.to_owned())
    }
}
