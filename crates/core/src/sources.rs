//! Loading specification documents from a local file or remote URLs.

use std::path::{Path, PathBuf};

use futures_util::future::try_join_all;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{Error, Result};
use crate::openapi::naming::camelize;
use crate::openapi::spec::{SpecDocument, SpecFormat};

/// Where the specification documents come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecSource {
    File(PathBuf),
    /// One or more URLs, merged in this order.
    Urls(Vec<String>),
}

impl SpecSource {
    /// Build a source from the `--file` and comma-separated `--url` values.
    ///
    /// A file takes precedence when both are given.
    pub fn from_args(file: Option<PathBuf>, urls: Option<&str>) -> Result<Self> {
        match (file, urls) {
            (Some(path), ignored) => {
                if ignored.is_some() {
                    warn!(file = %path.display(), "both --file and --url given, using the file");
                }
                Ok(Self::File(path))
            }
            (None, Some(list)) => {
                let urls = split_urls(list);
                if urls.is_empty() {
                    Err(Error::MissingSource)
                } else {
                    Ok(Self::Urls(urls))
                }
            }
            (None, None) => Err(Error::MissingSource),
        }
    }
}

/// A parsed document and the prefix its identifiers get.
#[derive(Debug)]
pub struct LoadedSpec {
    pub document: SpecDocument,
    /// Empty unless several documents are merged.
    pub prefix: String,
    /// File path or URL, for messages.
    pub origin: String,
}

/// Split a comma-separated URL list, dropping blanks.
pub fn split_urls(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .map(str::to_string)
        .collect()
}

/// Camelized second-to-last path segment of `url`
/// (`https://host/crm/openapi.json` gives `crm`); empty when there is none.
pub fn derive_prefix(url: &str) -> String {
    let parsed = match Url::parse(url) {
        Ok(parsed) => parsed,
        Err(err) => {
            debug!(url, error = %err, "cannot parse URL, using no prefix");
            return String::new();
        }
    };
    let segments: Vec<&str> = parsed
        .path_segments()
        .map(|segments| segments.filter(|s| !s.is_empty()).collect())
        .unwrap_or_default();

    match segments.len() {
        0 | 1 => String::new(),
        len => camelize(segments[len - 2]),
    }
}

/// Load every document of `source`. Remote documents are fetched
/// concurrently; any failure aborts the whole load.
pub async fn load(source: &SpecSource, client: &reqwest::Client) -> Result<Vec<LoadedSpec>> {
    match source {
        SpecSource::File(path) => Ok(vec![load_file(path)?]),
        SpecSource::Urls(urls) => {
            let prefixed = urls.len() > 1;
            let documents = try_join_all(urls.iter().map(|url| fetch_document(client, url))).await?;
            Ok(urls
                .iter()
                .zip(documents)
                .map(|(url, document)| LoadedSpec {
                    document,
                    prefix: if prefixed { derive_prefix(url) } else { String::new() },
                    origin: url.clone(),
                })
                .collect())
        }
    }
}

fn load_file(path: &Path) -> Result<LoadedSpec> {
    let origin = path.display().to_string();
    debug!(path = %origin, "reading specification file");
    let text = std::fs::read_to_string(path).map_err(|source| Error::ReadSpec {
        path: path.to_path_buf(),
        source,
    })?;
    let document = SpecDocument::parse(&text, &origin, SpecFormat::detect(&origin))?;
    info!(path = %origin, title = document.title(), "loaded specification");
    Ok(LoadedSpec {
        document,
        prefix: String::new(),
        origin,
    })
}

async fn fetch_document(client: &reqwest::Client, url: &str) -> Result<SpecDocument> {
    debug!(url, "fetching specification");
    let fetch_error = |source| Error::Fetch {
        url: url.to_string(),
        source,
    };
    let text = client
        .get(url)
        .send()
        .await
        .map_err(fetch_error)?
        .error_for_status()
        .map_err(fetch_error)?
        .text()
        .await
        .map_err(fetch_error)?;
    let document = SpecDocument::parse(&text, url, SpecFormat::detect(url))?;
    info!(url, title = document.title(), "loaded specification");
    Ok(document)
}
