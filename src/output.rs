//! Archive file placement and atomic writes

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

/// Default name of the generated archive
pub const DEFAULT_ARCHIVE_NAME: &str = "favicons.zip";

/// Suffix of the in-progress archive file
const PARTIAL_SUFFIX: &str = ".partial";

/// Check that an archive name is a bare `*.zip` file name.
pub fn is_valid_archive_name(name: &str) -> bool {
    let stem = match name.strip_suffix(".zip") {
        Some(stem) => stem,
        None => return false,
    };
    !stem.is_empty() && !name.contains(['/', '\\']) && !stem.starts_with('.')
}

/// Path of the archive inside the output directory.
pub fn archive_path(output_dir: &Path, archive_name: &str) -> PathBuf {
    output_dir.join(archive_name)
}

/// Path of the temporary file an archive is written to before it is committed.
pub fn partial_path(final_path: &Path) -> PathBuf {
    let mut name = final_path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(PARTIAL_SUFFIX);
    final_path.with_file_name(name)
}

/// An archive being written to a temporary sibling file.
///
/// [`PendingArchive::commit`] renames it over the final path. Dropping it
/// uncommitted removes the temporary file, so a failed generation never
/// leaves a truncated archive behind.
#[derive(Debug)]
pub struct PendingArchive {
    final_path: PathBuf,
    partial_path: PathBuf,
    committed: bool,
}

impl PendingArchive {
    /// Create the temporary file, creating parent directories if they don't exist.
    pub fn create(final_path: &Path) -> io::Result<(Self, File)> {
        if let Some(parent) = final_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let partial_path = partial_path(final_path);
        let file = File::create(&partial_path)?;

        Ok((
            Self { final_path: final_path.to_path_buf(), partial_path, committed: false },
            file,
        ))
    }

    /// Move the finished archive into place, replacing any previous one.
    pub fn commit(mut self) -> io::Result<PathBuf> {
        fs::rename(&self.partial_path, &self.final_path)?;
        self.committed = true;
        Ok(self.final_path.clone())
    }
}

impl Drop for PendingArchive {
    fn drop(&mut self) {
        if !self.committed {
            let _ = fs::remove_file(&self.partial_path);
        }
    }
}
