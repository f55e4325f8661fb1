//! Output directory handling.
//!
//! Every export begins by emptying its output directories so that no file
//! from a previous build survives. [`reset_dir`] does this in place.
//!
//! [`OutputDir`] adds an optional staged mode. Staged, all files are written
//! to a hidden sibling directory first:
//!
//! ```text
//! source/json/
//! ├── .pagination.staging/   ← written here during the export
//! └── pagination/            ← previous build, untouched until commit
//! ```
//!
//! and [`OutputDir::commit`] swaps it into place once every write succeeded.
//! A failed export therefore leaves the previous build readable. Unstaged,
//! writes go straight into the live directory and a failure leaves it
//! partially populated until the next successful run.

use serde::Serialize;
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Make sure `path` exists and is empty.
///
/// Missing parents are created. Files, symlinks and subdirectories inside
/// `path` are removed; `path` itself is kept.
pub fn reset_dir(path: &Path) -> io::Result<()> {
    fs::create_dir_all(path)?;
    for entry in fs::read_dir(path)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            fs::remove_dir_all(entry.path())?;
        } else {
            fs::remove_file(entry.path())?;
        }
    }
    Ok(())
}

/// Serialize `value` as JSON into `path`, replacing any existing file.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T, pretty: bool) -> io::Result<()> {
    let mut writer = BufWriter::new(fs::File::create(path)?);
    if pretty {
        serde_json::to_writer_pretty(&mut writer, value)?;
    } else {
        serde_json::to_writer(&mut writer, value)?;
    }
    writer.flush()
}

/// A freshly emptied directory that export files are written into.
#[derive(Debug)]
pub struct OutputDir {
    live: PathBuf,
    staging: Option<PathBuf>,
}

impl OutputDir {
    /// An output directory for `live`, written through its staging sibling
    /// when `staged` is set. Nothing is touched until [`OutputDir::reset`].
    pub fn new(live: &Path, staged: bool) -> io::Result<OutputDir> {
        let staging = if staged {
            Some(staging_path(live)?)
        } else {
            None
        };
        Ok(OutputDir {
            live: live.to_path_buf(),
            staging,
        })
    }

    /// Where files should be written right now.
    pub fn path(&self) -> &Path {
        self.staging.as_deref().unwrap_or(&self.live)
    }

    /// Empty [`OutputDir::path`], creating it if needed.
    pub fn reset(&self) -> io::Result<()> {
        reset_dir(self.path())
    }

    /// Write `value` to `relative` inside the directory, creating nested
    /// parents as needed.
    pub fn write_json<T: Serialize + ?Sized>(
        &self,
        relative: &Path,
        value: &T,
        pretty: bool,
    ) -> io::Result<PathBuf> {
        let target = self.path().join(relative);
        if let Some(parent) = target.parent() {
            if parent != self.path() {
                fs::create_dir_all(parent)?;
            }
        }
        write_json(&target, value, pretty)?;
        Ok(target)
    }

    /// Publish the written files. A no-op for unstaged directories.
    pub fn commit(self) -> io::Result<()> {
        let Some(staging) = self.staging else {
            return Ok(());
        };
        match fs::remove_dir_all(&self.live) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e),
        }
        fs::rename(&staging, &self.live)
    }
}

/// `<parent>/.<name>.staging` for a live directory `<parent>/<name>`.
pub fn staging_path(live: &Path) -> io::Result<PathBuf> {
    let name = live.file_name().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("output directory has no name: {}", live.display()),
        )
    })?;
    let mut staged = std::ffi::OsString::from(".");
    staged.push(name);
    staged.push(".staging");
    Ok(live.with_file_name(staged))
}
