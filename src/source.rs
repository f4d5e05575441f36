//! Snapshot fetching from an HTTP base URL or a local directory.
//!
//! Resource paths are page-relative (`dashboard_stats.json`,
//! `../data/prices.json`) or site-root relative (`/data/searches/latest.json`)
//! and are resolved the way a browser resolves them against the page location.

use crate::error::{DashboardError, Result};
use flate2::read::GzDecoder;
use reqwest::blocking::Client;
use reqwest::Url;
use serde::de::DeserializeOwned;
use std::fmt;
use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Where the dashboard page lives.
#[derive(Debug, Clone)]
pub enum Location {
    /// Page URL (e.g. `http://host/web/`); resources are joined onto it.
    Url(Url),
    /// Page directory on disk plus the directory that `/`-prefixed paths
    /// resolve against.
    Dir { page_dir: PathBuf, site_root: PathBuf },
}

/// A fully resolved resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Url(Url),
    File(PathBuf),
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Url(url) => write!(f, "{url}"),
            Target::File(path) => write!(f, "{}", path.display()),
        }
    }
}

impl Location {
    /// Parse a page URL.
    ///
    /// A base without a trailing slash names a document, so relative paths
    /// resolve against its parent, as in a browser.
    pub fn url(base: &str) -> Result<Self> {
        let url = Url::parse(base)
            .map_err(|e| DashboardError::InvalidArgument(format!("bad base URL {base}: {e}")))?;
        if url.cannot_be_a_base() {
            return Err(DashboardError::InvalidArgument(format!(
                "{base} cannot be used as a base URL"
            )));
        }
        Ok(Location::Url(url))
    }

    pub fn dir<P: AsRef<Path>, R: AsRef<Path>>(page_dir: P, site_root: R) -> Self {
        Location::Dir {
            page_dir: page_dir.as_ref().to_path_buf(),
            site_root: site_root.as_ref().to_path_buf(),
        }
    }

    /// Resolve a resource path against this location.
    pub fn resolve(&self, path: &str) -> Result<Target> {
        match self {
            Location::Url(base) => base
                .join(path)
                .map(Target::Url)
                .map_err(|e| DashboardError::InvalidArgument(format!("bad path {path}: {e}"))),
            Location::Dir {
                page_dir,
                site_root,
            } => {
                let target = match path.strip_prefix('/') {
                    Some(rooted) => site_root.join(rooted),
                    None => page_dir.join(path),
                };
                Ok(Target::File(target))
            }
        }
    }
}

/// Fetches and decodes JSON snapshots.
///
/// Cheap to share across threads: every fetch takes `&self` and the HTTP
/// client is internally reference counted.
pub struct SnapshotSource {
    /// Page location that resource paths are resolved against.
    pub location: Location,
    client: Client,
}

impl SnapshotSource {
    /// Create a source for `location` with the given HTTP timeout.
    ///
    /// Must not be called from inside an async runtime (the blocking client
    /// owns its own runtime).
    pub fn new(location: Location, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;
        Ok(Self { location, client })
    }

    /// Fetch `path` and decode it as `T`.
    pub fn fetch<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let target = self.location.resolve(path)?;
        tracing::debug!(resource = %target, "fetching snapshot");
        let bytes = match &target {
            Target::Url(url) => self.fetch_url(url)?,
            Target::File(file) => read_file(file)?,
        };
        Ok(serde_json::from_slice(&bytes)?)
    }

    fn fetch_url(&self, url: &Url) -> Result<Vec<u8>> {
        let resp = self.client.get(url.clone()).send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(DashboardError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(resp.bytes()?.to_vec())
    }
}

/// Read a snapshot file, falling back to a gzipped sibling (`name.json.gz`).
fn read_file(path: &Path) -> Result<Vec<u8>> {
    if path.extension().and_then(|e| e.to_str()) == Some("gz") {
        return gunzip(path);
    }
    if path.exists() {
        return Ok(fs::read(path)?);
    }
    let mut gz = path.as_os_str().to_owned();
    gz.push(".gz");
    let gz = PathBuf::from(gz);
    if gz.exists() {
        return gunzip(&gz);
    }
    Err(DashboardError::NotFound(format!(
        "snapshot {} does not exist",
        path.display()
    )))
}

fn gunzip(path: &Path) -> Result<Vec<u8>> {
    let file = fs::File::open(path)?;
    let mut decoder = GzDecoder::new(BufReader::new(file));
    let mut buf = Vec::new();
    decoder.read_to_end(&mut buf)?;
    Ok(buf)
}
