//! Zipping the finished binary into `TruFont.zip`.
//!
//! The archive holds exactly the binary as `TruFont.run` and, when the
//! modules directory has one, the `pyclipper` native extension as
//! `pyclipper.so`.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::consts::{ARCHIVE_BINARY_NAME, ARCHIVE_EXTENSION_NAME, EXTENSION_PREFIX, EXTENSION_SUFFIX};
use crate::layout::Layout;
use crate::pipeline::StageOutcome;
use crate::platform::Os;

#[derive(Debug, Error)]
pub enum PackageError {
  #[error("built binary not found: {0}")]
  MissingBinary(PathBuf),

  #[error("io error at {path}: {source}")]
  Io {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to write archive: {0}")]
  Zip(#[from] zip::result::ZipError),
}

/// First `pyclipper*.so` in `modules`, by file name.
///
/// A missing modules directory simply means no extension.
pub fn find_extension(modules: &Path) -> Option<PathBuf> {
  let entries = fs::read_dir(modules).ok()?;
  let mut matches: Vec<PathBuf> = entries
    .filter_map(Result::ok)
    .filter(|entry| entry.file_type().is_ok_and(|t| t.is_file()))
    .filter(|entry| {
      let name = entry.file_name();
      let name = name.to_string_lossy();
      name.starts_with(EXTENSION_PREFIX) && name.ends_with(EXTENSION_SUFFIX)
    })
    .map(|entry| entry.path())
    .collect();
  matches.sort();
  matches.into_iter().next()
}

/// Write a fresh archive, replacing any existing one.
pub fn write_bundle(layout: &Layout) -> Result<PathBuf, PackageError> {
  let binary = layout.binary();
  if !binary.is_file() {
    return Err(PackageError::MissingBinary(binary));
  }
  let extension = find_extension(&layout.modules());

  let archive = layout.archive();
  if archive.exists() {
    info!(path = %archive.display(), "deleting existing archive");
    fs::remove_file(&archive).map_err(|e| io_error(&archive, e))?;
  }

  info!(path = %archive.display(), "making a zip file");
  let file = File::create(&archive).map_err(|e| io_error(&archive, e))?;
  let mut writer = ZipWriter::new(file);

  add_file(&mut writer, &binary, ARCHIVE_BINARY_NAME)?;
  if let Some(extension) = extension {
    add_file(&mut writer, &extension, ARCHIVE_EXTENSION_NAME)?;
  }
  writer.finish()?;

  Ok(archive)
}

fn add_file(writer: &mut ZipWriter<File>, source: &Path, name: &str) -> Result<(), PackageError> {
  let mut input = File::open(source).map_err(|e| io_error(source, e))?;
  let options = SimpleFileOptions::default().unix_permissions(0o755);
  writer.start_file(name, options)?;
  io::copy(&mut input, writer).map_err(|e| io_error(source, e))?;
  Ok(())
}

/// Bundle on Linux; a no-op elsewhere.
pub fn package(os: Os, layout: &Layout) -> Result<(StageOutcome, Option<PathBuf>), PackageError> {
  if !os.bundles_archive() {
    info!(os = %os, "no bundle for this platform");
    return Ok((StageOutcome::Skipped, None));
  }
  let archive = write_bundle(layout)?;
  Ok((StageOutcome::Ran, Some(archive)))
}

fn io_error(path: &Path, source: io::Error) -> PackageError {
  PackageError::Io {
    path: path.to_path_buf(),
    source,
  }
}

#[cfg(test)]
mod tests {
  use std::io::Read;

  use super::*;
  use tempfile::TempDir;

  fn built_project() -> (TempDir, Layout) {
    let temp = TempDir::new().unwrap();
    let layout = Layout::new(temp.path(), Os::Linux);
    fs::create_dir_all(layout.dist()).unwrap();
    fs::write(layout.binary(), b"ELF binary").unwrap();
    (temp, layout)
  }

  fn entries(archive: &Path) -> Vec<String> {
    let zip = zip::ZipArchive::new(File::open(archive).unwrap()).unwrap();
    let mut names: Vec<String> = zip.file_names().map(str::to_string).collect();
    names.sort();
    names
  }

  #[test]
  fn binary_only_without_extension() {
    let (_temp, layout) = built_project();

    let archive = write_bundle(&layout).unwrap();

    assert_eq!(entries(&archive), vec!["TruFont.run"]);
    let mut zip = zip::ZipArchive::new(File::open(&archive).unwrap()).unwrap();
    let mode = zip.by_name("TruFont.run").unwrap().unix_mode().unwrap();
    assert_eq!(mode & 0o777, 0o755);
  }

  #[test]
  fn extension_is_bundled_under_fixed_name() {
    let (_temp, layout) = built_project();
    fs::create_dir_all(layout.modules()).unwrap();
    fs::write(
      layout.modules().join("pyclipper.cpython-36m-x86_64-linux-gnu.so"),
      b"extension",
    )
    .unwrap();
    fs::write(layout.modules().join("defcon.py"), b"").unwrap();

    let archive = write_bundle(&layout).unwrap();

    assert_eq!(entries(&archive), vec!["TruFont.run", "pyclipper.so"]);
    let mut zip = zip::ZipArchive::new(File::open(&archive).unwrap()).unwrap();
    let mut content = String::new();
    zip.by_name("pyclipper.so").unwrap().read_to_string(&mut content).unwrap();
    assert_eq!(content, "extension");
  }

  #[test]
  fn existing_archive_is_replaced() {
    let (_temp, layout) = built_project();
    {
      let mut stale = ZipWriter::new(File::create(layout.archive()).unwrap());
      stale.start_file("stale.txt", SimpleFileOptions::default()).unwrap();
      stale.finish().unwrap();
    }

    write_bundle(&layout).unwrap();

    assert_eq!(entries(&layout.archive()), vec!["TruFont.run"]);
  }

  #[test]
  fn missing_binary_is_reported() {
    let temp = TempDir::new().unwrap();
    let layout = Layout::new(temp.path(), Os::Linux);
    assert!(matches!(write_bundle(&layout), Err(PackageError::MissingBinary(_))));
    assert!(!layout.archive().exists());
  }

  #[test]
  fn extension_lookup_is_sorted_and_filtered() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("pyclipper-b.so"), b"").unwrap();
    fs::write(temp.path().join("pyclipper-a.so"), b"").unwrap();
    fs::write(temp.path().join("pyclipper.pyd"), b"").unwrap();
    fs::create_dir(temp.path().join("pyclipper-dir.so")).unwrap();

    assert_eq!(find_extension(temp.path()), Some(temp.path().join("pyclipper-a.so")));
    assert_eq!(find_extension(&temp.path().join("missing")), None);
  }

  #[test]
  fn other_platforms_skip_packaging() {
    let (_temp, layout) = built_project();
    for os in [Os::MacOs, Os::Windows] {
      let (outcome, archive) = package(os, &layout).unwrap();
      assert_eq!(outcome, StageOutcome::Skipped);
      assert!(archive.is_none());
    }
    assert!(!layout.archive().exists());
  }
}
