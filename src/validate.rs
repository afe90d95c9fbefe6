//! Boundary validation for user-supplied inputs
//!
//! Everything here runs before generation starts: PWA fields, the source
//! image path and the output directory. The generation pipeline assumes its
//! inputs already passed these checks.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::color::{normalize_hex_color, ColorError};

/// Maximum PWA app name length, in characters
pub const PWA_NAME_MAX_LENGTH: usize = 30;

/// Maximum PWA description length, in characters
pub const PWA_DESCRIPTION_MAX_LENGTH: usize = 300;

/// Accepted source image extensions (lowercase, without the dot)
pub const SUPPORTED_EXTENSIONS: [&str; 5] = ["jpeg", "jpg", "png", "svg", "webp"];

/// Scratch file created and removed to test output directory write access
const WRITE_CHECK_PREFIX: &str = ".favpack-write-check";

/// Malformed PWA metadata
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please provide the app name.")]
    EmptyName,
    #[error("The app name must not have more than {max} characters (got {len}).")]
    NameTooLong { len: usize, max: usize },
    #[error("Please provide the app description.")]
    EmptyDescription,
    #[error("The app description must not have more than {max} characters (got {len}).")]
    DescriptionTooLong { len: usize, max: usize },
    #[error("\"{value}\" is not a valid color hex code: {source}")]
    InvalidColor {
        value: String,
        #[source]
        source: ColorError,
    },
    #[error("unknown display mode \"{0}\", expected one of: standalone, minimal-ui, browser, fullscreen")]
    UnknownDisplayMode(String),
}

/// Invalid input or output path
#[derive(Debug, Error)]
pub enum PathError {
    #[error("Input path \"{}\" does not exist or is not a file.", .0.display())]
    NotFound(PathBuf),
    #[error("Input path \"{}\" is not a file.", .0.display())]
    NotAFile(PathBuf),
    #[error("Output path \"{}\" is not a directory.", .0.display())]
    NotADirectory(PathBuf),
    #[error("Filetype not supported. Accepted filetypes: {}.", supported_extensions_list())]
    UnsupportedFiletype(PathBuf),
    #[error("Not enough permissions to access \"{}\".", .0.display())]
    PermissionDenied(PathBuf),
    #[error("There was an error trying to create output path \"{}\": {source}", path.display())]
    CreateFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl PathError {
    /// Permission failures abort instead of re-prompting.
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, PathError::PermissionDenied(_))
    }
}

pub fn validate_pwa_name(name: &str) -> Result<(), ValidationError> {
    let len = name.chars().count();
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if len > PWA_NAME_MAX_LENGTH {
        return Err(ValidationError::NameTooLong { len, max: PWA_NAME_MAX_LENGTH });
    }
    Ok(())
}

pub fn validate_pwa_description(description: &str) -> Result<(), ValidationError> {
    let len = description.chars().count();
    if description.trim().is_empty() {
        return Err(ValidationError::EmptyDescription);
    }
    if len > PWA_DESCRIPTION_MAX_LENGTH {
        return Err(ValidationError::DescriptionTooLong { len, max: PWA_DESCRIPTION_MAX_LENGTH });
    }
    Ok(())
}

/// Validate a theme color and return its normalized form.
pub fn validate_pwa_color(color: &str) -> Result<String, ValidationError> {
    normalize_hex_color(color)
        .map_err(|source| ValidationError::InvalidColor { value: color.to_string(), source })
}

/// Comma-separated list of accepted extensions, e.g. `.jpeg,.jpg,...`
pub fn supported_extensions_list() -> String {
    SUPPORTED_EXTENSIONS.iter().map(|ext| format!(".{}", ext)).collect::<Vec<_>>().join(",")
}

fn extension_lowercase(path: &Path) -> Option<String> {
    path.extension().and_then(|e| e.to_str()).map(|e| e.to_ascii_lowercase())
}

/// Check if a path has an accepted source image extension (case-insensitive).
pub fn is_supported_filetype(path: &Path) -> bool {
    extension_lowercase(path).is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
}

/// Check if a path points to a vector (SVG) source.
pub fn is_vector_source(path: &Path) -> bool {
    extension_lowercase(path).is_some_and(|ext| ext == "svg")
}

/// Resolve a path against the current directory when it is relative.
pub fn to_abs_path(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    std::env::current_dir().unwrap_or_default().join(path)
}

/// Validate the source image path.
///
/// The file must exist, be a regular file with a supported extension, and be
/// readable. Returns the absolute path.
pub fn validate_input_path(path: &Path) -> Result<PathBuf, PathError> {
    let path = to_abs_path(path);

    let metadata = match fs::metadata(&path) {
        Ok(m) => m,
        Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
            return Err(PathError::PermissionDenied(path))
        }
        Err(_) => return Err(PathError::NotFound(path)),
    };

    if !metadata.is_file() {
        return Err(PathError::NotAFile(path));
    }

    if !is_supported_filetype(&path) {
        return Err(PathError::UnsupportedFiletype(path));
    }

    if let Err(e) = File::open(&path) {
        if e.kind() == io::ErrorKind::PermissionDenied {
            return Err(PathError::PermissionDenied(path));
        }
        return Err(PathError::NotFound(path));
    }

    Ok(path)
}

/// Validate the output directory, creating it (recursively) when absent.
///
/// Write access is checked by creating and removing a scratch file, so the
/// result reflects what this process can actually do rather than mode bits.
/// Returns the absolute path.
pub fn validate_output_dir(path: &Path) -> Result<PathBuf, PathError> {
    let path = to_abs_path(path);

    match fs::metadata(&path) {
        Ok(metadata) if !metadata.is_dir() => return Err(PathError::NotADirectory(path)),
        Ok(_) => {}
        Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
            return Err(PathError::PermissionDenied(path))
        }
        Err(_) => match fs::create_dir_all(&path) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
                return Err(PathError::PermissionDenied(path))
            }
            Err(source) => return Err(PathError::CreateFailed { path, source }),
        },
    }

    check_writable(path)
}

fn check_writable(path: PathBuf) -> Result<PathBuf, PathError> {
    let scratch = path.join(format!("{}-{}", WRITE_CHECK_PREFIX, std::process::id()));

    match fs::OpenOptions::new().write(true).create_new(true).open(&scratch) {
        Ok(file) => {
            drop(file);
            let _ = fs::remove_file(&scratch);
            Ok(path)
        }
        Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
            Err(PathError::PermissionDenied(path))
        }
        Err(source) => Err(PathError::CreateFailed { path, source }),
    }
}
