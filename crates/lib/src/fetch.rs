//! Source archive download.
//!
//! Archives land in `root/src/` under a name derived from their URL. The
//! sysroot script recognises packages by file name, so the derivation rules
//! matter: SourceForge URLs end in `/download` and carry the real name in the
//! segment before it, and `.tgz` must be spelled `.tar.gz`.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{info, warn};

use crate::config::BuildOptions;
use crate::layout::Layout;
use crate::pipeline::StageOutcome;

#[derive(Debug, Error)]
pub enum FetchError {
  /// No path segment of the URL names an archive.
  #[error("cannot derive an archive name from {0}")]
  ArchiveName(String),

  /// HTTP request failed.
  #[error("fetch failed for {url}: {message}")]
  Request { url: String, message: String },

  #[error("io error at {path}: {source}")]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
}

/// Derive the local file name for a source archive URL.
///
/// The last path segment is used when it ends in `z` or `zip` (`.tar.gz`,
/// `.tgz`, `.zip`); otherwise the second-to-last segment is used and must end
/// the same way. A `.tgz` suffix becomes `.tar.gz`.
pub fn derive_archive_name(url: &str) -> Result<String, FetchError> {
  let invalid = || FetchError::ArchiveName(url.to_string());

  let path = url.split(['?', '#']).next().unwrap_or(url);
  let path = path.split_once("://").map_or(path, |(_, rest)| rest);
  let mut segments = path.rsplit('/');
  let last = segments.next().unwrap_or_default();

  let name = if is_archive(last) {
    last
  } else {
    let previous = segments.next().filter(|s| !s.is_empty()).ok_or_else(invalid)?;
    if !is_archive(previous) {
      return Err(invalid());
    }
    previous
  };

  match name.strip_suffix(".tgz") {
    Some(stem) => Ok(format!("{stem}.tar.gz")),
    None => Ok(name.to_string()),
  }
}

fn is_archive(segment: &str) -> bool {
  segment.ends_with('z') || segment.ends_with("zip")
}

/// Recreate `root/src/` and download every package into it.
///
/// With `refresh_sources` off nothing is touched and no request is made.
pub async fn fetch_sources(
  options: &BuildOptions,
  layout: &Layout,
  packages: &[String],
) -> Result<StageOutcome, FetchError> {
  if !options.refresh_sources {
    info!("keeping existing sources");
    return Ok(StageOutcome::Skipped);
  }

  // Names are derived up front so a bad URL fails before the old tree is wiped.
  let names = packages
    .iter()
    .map(|url| derive_archive_name(url))
    .collect::<Result<Vec<_>, _>>()?;

  let sysroot = layout.sysroot();
  if fs::try_exists(&sysroot).await.map_err(|e| io_error(&sysroot, e))? {
    info!(path = %sysroot.display(), "deleting root directory");
    fs::remove_dir_all(&sysroot).await.map_err(|e| io_error(&sysroot, e))?;
  }
  for dir in [sysroot, layout.sources()] {
    info!(path = %dir.display(), "creating directory");
    fs::create_dir(&dir).await.map_err(|e| io_error(&dir, e))?;
  }

  let client = reqwest::Client::new();
  let sources = layout.sources();
  for (url, name) in packages.iter().zip(names) {
    download(&client, url, &sources.join(name)).await?;
  }
  Ok(StageOutcome::Ran)
}

/// Download a single URL to `dest`. Any failure is fatal; there is no retry.
pub async fn download(client: &reqwest::Client, url: &str, dest: &Path) -> Result<(), FetchError> {
  info!(url = %url, "fetching archive");
  let request_error = |e: reqwest::Error| FetchError::Request {
    url: url.to_string(),
    message: e.to_string(),
  };

  let response = client.get(url).send().await.map_err(request_error)?;
  if !response.status().is_success() {
    warn!(url = %url, status = %response.status(), "download rejected");
    return Err(FetchError::Request {
      url: url.to_string(),
      message: format!("HTTP {}", response.status()),
    });
  }
  let bytes = response.bytes().await.map_err(request_error)?;

  let mut file = fs::File::create(dest).await.map_err(|e| io_error(dest, e))?;
  file.write_all(&bytes).await.map_err(|e| io_error(dest, e))?;
  file.flush().await.map_err(|e| io_error(dest, e))?;

  info!(path = %dest.display(), size = bytes.len(), "download complete");
  Ok(())
}

fn io_error(path: &Path, source: std::io::Error) -> FetchError {
  FetchError::Io {
    path: path.to_path_buf(),
    source,
  }
}
