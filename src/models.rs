//! Data models for favicon generation (dimensions, relations, PWA metadata)

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::validate::{self, ValidationError};

/// Target output size of a rendered favicon.
///
/// A `Square` size is rendered center-cropped to cover the whole target, a
/// `Rect` size is fitted inside the target and padded with transparency.
///
/// Two dimensions are equal when their width and height match, regardless of
/// variant: `Square(16) == Rect(16, 16)`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Dimension {
    Square(u32),
    Rect(u32, u32),
}

/// How a source image is mapped onto a target dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fit {
    /// Scale to cover the target, cropping the overflow around the center
    Cover,
    /// Scale to fit inside the target, padding the rest with transparency
    Contain,
}

impl Dimension {
    pub const fn width(&self) -> u32 {
        match *self {
            Dimension::Square(side) => side,
            Dimension::Rect(width, _) => width,
        }
    }

    pub const fn height(&self) -> u32 {
        match *self {
            Dimension::Square(side) => side,
            Dimension::Rect(_, height) => height,
        }
    }

    /// The value used for ordering assets: the side of a square, the width of a rectangle.
    pub const fn primary(&self) -> u32 {
        self.width()
    }

    pub const fn fit(&self) -> Fit {
        match self {
            Dimension::Square(_) => Fit::Cover,
            Dimension::Rect(_, _) => Fit::Contain,
        }
    }

    /// Whether either axis is zero.
    pub const fn is_degenerate(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// The `{w}x{h}` string used in `sizes` attributes.
    pub fn proportions(&self) -> String {
        format!("{}x{}", self.width(), self.height())
    }

    /// File name of the PNG rendered at this dimension.
    pub fn file_name(&self) -> String {
        format!("favicon-{}.png", self.proportions())
    }
}

impl PartialEq for Dimension {
    fn eq(&self, other: &Self) -> bool {
        self.width() == other.width() && self.height() == other.height()
    }
}

impl Eq for Dimension {}

impl Hash for Dimension {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.width().hash(state);
        self.height().hash(state);
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width(), self.height())
    }
}

/// Semantic role of a generated asset in the example HTML.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Relation {
    Icon,
    AppleTouchIcon,
}

impl Relation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Relation::Icon => "icon",
            Relation::AppleTouchIcon => "apple-touch-icon",
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// PWA display mode written to `manifest.json`
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum DisplayMode {
    /// Looks like a standalone application (most used)
    #[default]
    Standalone,
    /// Standalone with a minimal set of navigation controls
    MinimalUi,
    /// Opens in a regular browser tab
    Browser,
    /// Uses the entire display, no browser UI
    Fullscreen,
}

impl DisplayMode {
    /// All display modes, most used first.
    pub const ALL: [DisplayMode; 4] = [
        DisplayMode::Standalone,
        DisplayMode::MinimalUi,
        DisplayMode::Browser,
        DisplayMode::Fullscreen,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayMode::Standalone => "standalone",
            DisplayMode::MinimalUi => "minimal-ui",
            DisplayMode::Browser => "browser",
            DisplayMode::Fullscreen => "fullscreen",
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DisplayMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DisplayMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownDisplayMode(s.to_string()))
    }
}

/// Progressive Web App metadata.
///
/// Only constructible through [`PwaConfig::new`], so every instance carries
/// validated fields and a normalized `#rrggbb`/`#rgb` color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PwaConfig {
    name: String,
    description: String,
    display: DisplayMode,
    color: String,
}

impl PwaConfig {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        display: DisplayMode,
        color: &str,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        let description = description.into();
        validate::validate_pwa_name(&name)?;
        validate::validate_pwa_description(&description)?;
        let color = validate::validate_pwa_color(color)?;

        Ok(Self { name, description, display, color })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn display(&self) -> DisplayMode {
        self.display
    }

    pub fn color(&self) -> &str {
        &self.color
    }
}

/// A rendered PNG, ready to be appended to the archive.
#[derive(Debug, Clone)]
pub struct RenderedAsset {
    pub relation: Option<Relation>,
    pub dimension: Dimension,
    pub file_name: String,
    pub data: Vec<u8>,
}

impl RenderedAsset {
    pub fn new(relation: Option<Relation>, dimension: Dimension, data: Vec<u8>) -> Self {
        Self { relation, dimension, file_name: dimension.file_name(), data }
    }
}
