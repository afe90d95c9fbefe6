//! Size catalog: the selectable favicon categories and the fixed size sets
//!
//! Categories are pure data. The only per-category behavior, emitting an
//! extra file into the archive, is described by [`AuxiliaryFile`] and carried
//! out by the archive assembler.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::descriptors::build_legacy_config;
use crate::models::{Dimension, Relation};

/// Sizes that are always generated, and packed into `favicon.ico`.
pub const BASELINE_SIZES: [Dimension; 3] =
    [Dimension::Square(16), Dimension::Square(32), Dimension::Square(64)];

/// Relation of the baseline sizes.
pub const BASELINE_RELATION: Option<Relation> = Some(Relation::Icon);

/// Sizes added when a PWA manifest is generated.
pub const PWA_SIZES: [Dimension; 2] = [Dimension::Square(192), Dimension::Square(512)];

const APPLE_SIZES: [Dimension; 10] = [
    Dimension::Square(57),
    Dimension::Square(60),
    Dimension::Square(72),
    Dimension::Square(76),
    Dimension::Square(114),
    Dimension::Square(120),
    Dimension::Square(144),
    Dimension::Square(152),
    Dimension::Square(167),
    Dimension::Square(180),
];

const GOOGLE_SIZES: [Dimension; 5] = [
    Dimension::Square(96),
    Dimension::Square(128),
    Dimension::Square(196),
    Dimension::Square(256),
    Dimension::Square(384),
];

const INTERNET_EXPLORER_SIZES: [Dimension; 1] = [Dimension::Square(24)];

const WINDOWS_SIZES: [Dimension; 4] = [
    Dimension::Square(128),
    Dimension::Square(270),
    Dimension::Square(558),
    Dimension::Rect(558, 270),
];

/// A user-selectable group of favicon sizes.
///
/// Declaration order is catalog order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    /// Apple touch icons
    Apple,
    /// Google & Chrome icons
    Google,
    /// Internet Explorer icon
    InternetExplorer,
    /// Windows 8.1 tiles (adds browserconfig.xml)
    Windows,
}

impl Category {
    /// All categories, in catalog order.
    pub const ALL: [Category; 4] =
        [Category::Apple, Category::Google, Category::InternetExplorer, Category::Windows];

    /// Identifier used on the command line and in `favpack.toml`.
    pub fn id(&self) -> &'static str {
        match self {
            Category::Apple => "apple",
            Category::Google => "google",
            Category::InternetExplorer => "internet-explorer",
            Category::Windows => "windows",
        }
    }

    /// Display name shown in selection menus.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Apple => "Apple related",
            Category::Google => "Google & Chrome related",
            Category::InternetExplorer => "Internet Explorer",
            Category::Windows => "Windows 8.1",
        }
    }

    pub fn relation(&self) -> Option<Relation> {
        match self {
            Category::Apple => Some(Relation::AppleTouchIcon),
            Category::Google | Category::InternetExplorer => Some(Relation::Icon),
            Category::Windows => None,
        }
    }

    pub fn sizes(&self) -> &'static [Dimension] {
        match self {
            Category::Apple => &APPLE_SIZES,
            Category::Google => &GOOGLE_SIZES,
            Category::InternetExplorer => &INTERNET_EXPLORER_SIZES,
            Category::Windows => &WINDOWS_SIZES,
        }
    }

    /// Extra file this category contributes to the archive, if any.
    pub fn auxiliary(&self) -> Option<AuxiliaryFile> {
        match self {
            Category::Windows => Some(AuxiliaryFile::BrowserConfig),
            _ => None,
        }
    }
}

/// Extra archive entries contributed by a category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuxiliaryFile {
    /// `browserconfig.xml` for legacy Windows tiles
    BrowserConfig,
}

impl AuxiliaryFile {
    pub fn file_name(&self) -> &'static str {
        match self {
            AuxiliaryFile::BrowserConfig => "browserconfig.xml",
        }
    }

    pub fn contents(&self) -> String {
        match self {
            AuxiliaryFile::BrowserConfig => build_legacy_config(),
        }
    }
}

/// One size to render, tagged with the relation of the set it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeRequest {
    pub relation: Option<Relation>,
    pub dimension: Dimension,
}

/// Sort a selection into catalog order and drop repeats.
pub fn normalize_selection(categories: &[Category]) -> Vec<Category> {
    let mut normalized = categories.to_vec();
    normalized.sort();
    normalized.dedup();
    normalized
}

/// Expand a selection into the list of sizes to render.
///
/// The result is the union of the baseline sizes, every selected category's
/// sizes and, when `with_pwa` is set, the PWA sizes. Dimensions with the same
/// width and height are collapsed; the first occurrence (baseline, then
/// categories in catalog order, then PWA) keeps its relation.
pub fn resolve_sizes(categories: &[Category], with_pwa: bool) -> Vec<SizeRequest> {
    let mut seen = HashSet::new();
    let mut sizes = Vec::new();

    let mut push_all = |relation: Option<Relation>, dimensions: &[Dimension]| {
        for &dimension in dimensions {
            if seen.insert(dimension) {
                sizes.push(SizeRequest { relation, dimension });
            }
        }
    };

    push_all(BASELINE_RELATION, &BASELINE_SIZES);
    for category in normalize_selection(categories) {
        push_all(category.relation(), category.sizes());
    }
    if with_pwa {
        push_all(None, &PWA_SIZES);
    }

    sizes
}

/// Auxiliary files contributed by a selection, in catalog order, without repeats.
pub fn auxiliary_files(categories: &[Category]) -> Vec<AuxiliaryFile> {
    let mut files: Vec<AuxiliaryFile> = Vec::new();
    for file in normalize_selection(categories).iter().filter_map(Category::auxiliary) {
        if !files.contains(&file) {
            files.push(file);
        }
    }
    files
}

/// Whether a dimension belongs to the baseline (ICO) set.
pub fn is_baseline(dimension: &Dimension) -> bool {
    BASELINE_SIZES.contains(dimension)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dims(sizes: &[SizeRequest]) -> HashSet<Dimension> {
        sizes.iter().map(|s| s.dimension).collect()
    }

    #[test]
    fn test_baseline_only() {
        let sizes = resolve_sizes(&[], false);
        assert_eq!(sizes.len(), 3);
        assert!(sizes.iter().all(|s| s.relation == Some(Relation::Icon)));
        assert_eq!(
            sizes.iter().map(|s| s.dimension).collect::<Vec<_>>(),
            BASELINE_SIZES.to_vec()
        );
    }

    #[test]
    fn test_pwa_adds_large_sizes_without_relation() {
        let sizes = resolve_sizes(&[], true);
        assert_eq!(sizes.len(), 5);
        let pwa: Vec<_> = sizes.iter().filter(|s| s.relation.is_none()).collect();
        assert_eq!(pwa.len(), 2);
        assert!(dims(&sizes).contains(&Dimension::Square(512)));
    }

    #[test]
    fn test_union_matches_every_selection() {
        // Every subset of the catalog resolves to the deduplicated union
        for mask in 0u8..16 {
            let selection: Vec<Category> = Category::ALL
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, c)| *c)
                .collect();

            for with_pwa in [false, true] {
                let resolved = resolve_sizes(&selection, with_pwa);

                let mut expected: HashSet<Dimension> = BASELINE_SIZES.iter().copied().collect();
                for category in &selection {
                    expected.extend(category.sizes().iter().copied());
                }
                if with_pwa {
                    expected.extend(PWA_SIZES.iter().copied());
                }

                assert_eq!(dims(&resolved), expected, "selection {:?}", selection);
                assert_eq!(resolved.len(), expected.len(), "duplicates for {:?}", selection);
            }
        }
    }

    #[test]
    fn test_shared_size_keeps_first_relation() {
        // 128 appears in both Google (icon) and Windows (no relation)
        let sizes = resolve_sizes(&[Category::Windows, Category::Google], false);
        let size_128: Vec<_> =
            sizes.iter().filter(|s| s.dimension == Dimension::Square(128)).collect();
        assert_eq!(size_128.len(), 1);
        assert_eq!(size_128[0].relation, Some(Relation::Icon));
    }

    #[test]
    fn test_rectangular_size_is_distinct() {
        let sizes = resolve_sizes(&[Category::Windows], false);
        let set = dims(&sizes);
        assert!(set.contains(&Dimension::Rect(558, 270)));
        assert!(set.contains(&Dimension::Square(558)));
        assert_eq!(sizes.len(), 3 + 4);
    }

    #[test]
    fn test_normalize_selection() {
        let normalized = normalize_selection(&[
            Category::Windows,
            Category::Apple,
            Category::Windows,
            Category::Google,
        ]);
        assert_eq!(normalized, vec![Category::Apple, Category::Google, Category::Windows]);
    }

    #[test]
    fn test_auxiliary_files() {
        assert!(auxiliary_files(&[Category::Apple, Category::Google]).is_empty());
        assert_eq!(
            auxiliary_files(&[Category::Windows, Category::Windows]),
            vec![AuxiliaryFile::BrowserConfig]
        );
        assert_eq!(AuxiliaryFile::BrowserConfig.file_name(), "browserconfig.xml");
        assert!(AuxiliaryFile::BrowserConfig.contents().contains("<browserconfig>"));
    }

    #[test]
    fn test_category_metadata() {
        assert_eq!(Category::Apple.relation(), Some(Relation::AppleTouchIcon));
        assert_eq!(Category::Windows.relation(), None);
        assert_eq!(Category::InternetExplorer.sizes(), &[Dimension::Square(24)]);
        assert_eq!(Category::InternetExplorer.id(), "internet-explorer");
        assert_eq!(Category::Google.label(), "Google & Chrome related");
    }

    #[test]
    fn test_category_deserializes_from_kebab_case() {
        let parsed: Vec<Category> =
            serde_json::from_str(r#"["apple", "internet-explorer", "windows"]"#).unwrap();
        assert_eq!(parsed, vec![Category::Apple, Category::InternetExplorer, Category::Windows]);
    }

    #[test]
    fn test_is_baseline() {
        assert!(is_baseline(&Dimension::Square(32)));
        assert!(is_baseline(&Dimension::Rect(64, 64)));
        assert!(!is_baseline(&Dimension::Square(24)));
    }
}
