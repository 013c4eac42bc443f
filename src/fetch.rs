//! Archive retrieval
//!
//! HTTP(S) URLs are downloaded with a blocking client; `file://` URLs and plain
//! paths are copied. Either way the archive lands at the destination through an
//! atomic write.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use url::Url;

use crate::error::SyncError;
use crate::store;

/// Where an archive comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    Remote(Url),
    Local(PathBuf),
}

impl Location {
    pub fn parse(location: &str) -> Result<Self, SyncError> {
        match Url::parse(location) {
            Ok(url) if url.scheme() == "file" => url
                .to_file_path()
                .map(Self::Local)
                .map_err(|()| SyncError::InvalidUrl {
                    url: location.to_string(),
                    reason: "not a local file path".to_string(),
                }),
            Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(Self::Remote(url)),
            Ok(url) => Err(SyncError::InvalidUrl {
                url: location.to_string(),
                reason: format!("unsupported scheme '{}'", url.scheme()),
            }),
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                Ok(Self::Local(PathBuf::from(location)))
            }
            Err(e) => Err(SyncError::InvalidUrl {
                url: location.to_string(),
                reason: e.to_string(),
            }),
        }
    }
}

/// Obtain an HTTP client, taking proxy environment variables into account
pub fn http_client() -> reqwest::Result<reqwest::blocking::Client> {
    let mut builder = reqwest::blocking::ClientBuilder::new()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")));

    for (key, value) in std::env::vars() {
        let key = key.to_lowercase();
        let Some(schema) = key.strip_suffix("_proxy") else {
            continue;
        };
        let Ok(url) = Url::parse(&value) else {
            continue;
        };

        let proxy = match schema {
            "http" => reqwest::Proxy::http(url.as_str()),
            "https" => reqwest::Proxy::https(url.as_str()),
            _ => continue,
        };
        if let Ok(proxy) = proxy {
            builder = builder.proxy(proxy.no_proxy(reqwest::NoProxy::from_env()));
        }
    }

    builder.build()
}

/// Fetch the archive at `location` into `dest`
pub fn download(location: &str, dest: &Path) -> Result<(), SyncError> {
    let data = match Location::parse(location)? {
        Location::Remote(url) => {
            info!(url = %url, "downloading archive");
            fetch_remote(location, url)?
        }
        Location::Local(path) => {
            info!(path = %path.display(), "copying local archive");
            fs::read(&path).map_err(|e| SyncError::io(path, e))?
        }
    };

    debug!(bytes = data.len(), dest = %dest.display(), "storing archive");
    store::write_atomic(dest, &data)
}

fn fetch_remote(location: &str, url: Url) -> Result<Vec<u8>, SyncError> {
    let transfer = |source| SyncError::Transfer {
        url: location.to_string(),
        source,
    };

    let client = http_client().map_err(transfer)?;
    let data = client
        .get(url)
        .send()
        .and_then(|r| r.error_for_status())
        .and_then(|r| r.bytes())
        .map_err(transfer)?;

    Ok(data.to_vec())
}
