//! Favicon package assembly
//!
//! Ties the pipeline together: resolve sizes, render them in parallel, pack
//! the ICO, build the descriptors and write everything into one zip archive.
//!
//! Entry order is fixed regardless of which render finishes first:
//!
//! 1. auxiliary files of the selected categories (`browserconfig.xml`)
//! 2. one PNG per size, in resolved size order
//! 3. `favicon.ico`
//! 4. `favicon.svg` (vector sources only)
//! 5. `manifest.json` (PWA only)
//! 6. `index.html`

use rayon::prelude::*;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::catalog::{auxiliary_files, is_baseline, resolve_sizes, Category, SizeRequest};
use crate::descriptors::{
    build_example_html, build_manifest, HTML_FILE_NAME, ICO_FILE_NAME, MANIFEST_FILE_NAME,
    SVG_FILE_NAME,
};
use crate::ico::{self, PackError};
use crate::models::{PwaConfig, RenderedAsset};
use crate::output::{archive_path, PendingArchive, DEFAULT_ARCHIVE_NAME};
use crate::renderer::{render, RenderError, SourceImage};
use crate::svg::{optimize_svg, OptimizeError};

/// Deflate level used for every archive entry
pub const ZIP_COMPRESSION_LEVEL: i64 = 9;

/// Error type for favicon package generation
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error(transparent)]
    Pack(#[from] PackError),
    #[error(transparent)]
    Optimize(#[from] OptimizeError),
    #[error("Failed to serialize manifest: {0}")]
    Manifest(#[from] serde_json::Error),
    #[error("Failed to write archive '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to write archive entry: {0}")]
    Archive(#[from] zip::result::ZipError),
}

/// Everything needed to generate a favicon package.
///
/// Paths are expected to be validated already (see [`crate::validate`]).
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub input_path: PathBuf,
    pub output_dir: PathBuf,
    pub categories: Vec<Category>,
    pub pwa: Option<PwaConfig>,
    /// Only used for vector sources
    pub optimize_svg: bool,
    pub archive_name: String,
}

impl GenerationRequest {
    pub fn new(input_path: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            output_dir: output_dir.into(),
            categories: Vec::new(),
            pwa: None,
            optimize_svg: false,
            archive_name: DEFAULT_ARCHIVE_NAME.to_string(),
        }
    }

    pub fn with_categories(mut self, categories: Vec<Category>) -> Self {
        self.categories = categories;
        self
    }

    pub fn with_pwa(mut self, pwa: Option<PwaConfig>) -> Self {
        self.pwa = pwa;
        self
    }

    pub fn with_optimize_svg(mut self, optimize_svg: bool) -> Self {
        self.optimize_svg = optimize_svg;
        self
    }

    pub fn with_archive_name(mut self, archive_name: impl Into<String>) -> Self {
        self.archive_name = archive_name.into();
        self
    }

    pub fn archive_path(&self) -> PathBuf {
        archive_path(&self.output_dir, &self.archive_name)
    }
}

/// A named file inside the archive
#[derive(Debug, Clone)]
pub struct ArchiveEntry {
    pub name: String,
    pub data: Vec<u8>,
}

impl ArchiveEntry {
    pub fn new(name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self { name: name.into(), data: data.into() }
    }
}

/// Outcome of a successful generation
#[derive(Debug, Clone)]
pub struct GenerationReport {
    pub archive_path: PathBuf,
    /// Entry names in archive order
    pub entries: Vec<String>,
}

/// Generate the favicon package described by `request`.
///
/// Any failure aborts the whole run; no archive is left at the target path
/// unless every entry was written.
pub fn generate(request: &GenerationRequest) -> Result<GenerationReport, GenerateError> {
    let input = &request.input_path;
    info!(input = %input.display(), output = %request.output_dir.display(), "generating favicons");

    let (source, bytes) = SourceImage::open(input)?;
    let svg = source.is_vector().then_some(bytes.as_slice());
    let entries = assemble_entries(request, &source, svg)?;
    let archive_path = write_archive(&request.archive_path(), &entries)?;

    info!(archive = %archive_path.display(), entries = entries.len(), "favicons package written");

    Ok(GenerationReport {
        archive_path,
        entries: entries.into_iter().map(|entry| entry.name).collect(),
    })
}

/// Build every archive entry in archive order.
///
/// `svg` carries the raw source document when the source is a vector image.
pub fn assemble_entries(
    request: &GenerationRequest,
    source: &SourceImage,
    svg: Option<&[u8]>,
) -> Result<Vec<ArchiveEntry>, GenerateError> {
    let sizes = resolve_sizes(&request.categories, request.pwa.is_some());
    info!(count = sizes.len(), "resolved favicon sizes");

    let assets = render_all(source, &sizes)?;

    let baseline: Vec<&[u8]> = assets
        .iter()
        .filter(|asset| is_baseline(&asset.dimension))
        .map(|asset| asset.data.as_slice())
        .collect();
    let ico = ico::pack(&baseline)?;

    let svg = match svg {
        Some(data) if request.optimize_svg => {
            let optimized = optimize_svg(data)?;
            debug!(before = data.len(), after = optimized.len(), "optimized svg");
            Some(optimized.into_bytes())
        }
        Some(data) => Some(data.to_vec()),
        None => None,
    };
    let has_vector_icon = svg.is_some();

    let manifest = match &request.pwa {
        Some(pwa) => Some(build_manifest(pwa, &assets, has_vector_icon)?),
        None => None,
    };
    let html = build_example_html(request.pwa.as_ref(), &assets, has_vector_icon);

    let mut entries: Vec<ArchiveEntry> = auxiliary_files(&request.categories)
        .into_iter()
        .map(|file| ArchiveEntry::new(file.file_name(), file.contents()))
        .collect();
    entries.extend(assets.into_iter().map(|asset| ArchiveEntry::new(asset.file_name, asset.data)));
    entries.push(ArchiveEntry::new(ICO_FILE_NAME, ico));
    if let Some(svg) = svg {
        entries.push(ArchiveEntry::new(SVG_FILE_NAME, svg));
    }
    if let Some(manifest) = manifest {
        entries.push(ArchiveEntry::new(MANIFEST_FILE_NAME, manifest));
    }
    entries.push(ArchiveEntry::new(HTML_FILE_NAME, html));

    Ok(entries)
}

/// Render every requested size against the shared source.
///
/// Renders run in parallel; the result keeps the order of `sizes`.
pub fn render_all(
    source: &SourceImage,
    sizes: &[SizeRequest],
) -> Result<Vec<RenderedAsset>, RenderError> {
    sizes
        .par_iter()
        .map(|size| {
            let data = render(source, size.dimension)?;
            debug!(size = %size.dimension, bytes = data.len(), "rendered");
            Ok(RenderedAsset::new(size.relation, size.dimension, data))
        })
        .collect()
}

/// Write entries into a deflate-compressed zip archive at `path`.
pub fn write_archive(path: &Path, entries: &[ArchiveEntry]) -> Result<PathBuf, GenerateError> {
    let io_error = |source| GenerateError::Io { path: path.to_path_buf(), source };

    let (pending, file) = PendingArchive::create(path).map_err(io_error)?;
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .compression_level(Some(ZIP_COMPRESSION_LEVEL));

    for entry in entries {
        debug!(name = %entry.name, bytes = entry.data.len(), "adding archive entry");
        zip.start_file(entry.name.as_str(), options)?;
        zip.write_all(&entry.data).map_err(io_error)?;
    }

    let file = zip.finish()?;
    file.sync_all().map_err(io_error)?;
    drop(file);

    pending.commit().map_err(io_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Dimension, DisplayMode};
    use image::{DynamicImage, Rgba, RgbaImage};
    use std::fs::File;
    use std::io::Read;

    fn source() -> SourceImage {
        SourceImage::Raster(DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            64,
            64,
            Rgba([0, 128, 255, 255]),
        )))
    }

    fn names(entries: &[ArchiveEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_assemble_baseline_only() {
        let request = GenerationRequest::new("/in/logo.png", "/out");
        let entries = assemble_entries(&request, &source(), None).unwrap();
        assert_eq!(
            names(&entries),
            vec![
                "favicon-16x16.png",
                "favicon-32x32.png",
                "favicon-64x64.png",
                "favicon.ico",
                "index.html"
            ]
        );
    }

    #[test]
    fn test_assemble_entry_order_with_everything() {
        let pwa = PwaConfig::new("App", "An app", DisplayMode::Standalone, "#000").unwrap();
        let request = GenerationRequest::new("/in/logo.svg", "/out")
            .with_categories(vec![Category::Windows, Category::InternetExplorer])
            .with_pwa(Some(pwa));
        let svg = br#"<svg xmlns="http://www.w3.org/2000/svg" width="8" height="8"/>"#;

        let entries = assemble_entries(&request, &source(), Some(svg.as_slice())).unwrap();
        let names = names(&entries);

        assert_eq!(names[0], "browserconfig.xml");
        assert_eq!(&names[names.len() - 4..], &["favicon.ico", "favicon.svg", "manifest.json", "index.html"]);
        // baseline + IE + windows + pwa sizes
        let pngs = names.iter().filter(|n| n.ends_with(".png")).count();
        assert_eq!(pngs, 3 + 1 + 4 + 2);
    }

    #[test]
    fn test_svg_kept_verbatim_without_optimization() {
        let request = GenerationRequest::new("/in/logo.svg", "/out");
        let svg = b"<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"8\" height=\"8\"><!-- keep --></svg>";
        let entries = assemble_entries(&request, &source(), Some(svg.as_slice())).unwrap();
        let entry = entries.iter().find(|e| e.name == "favicon.svg").unwrap();
        assert_eq!(entry.data, svg.to_vec());
    }

    #[test]
    fn test_render_all_keeps_request_order() {
        let sizes = resolve_sizes(&Category::ALL, true);
        let assets = render_all(&source(), &sizes).unwrap();
        let dims: Vec<Dimension> = assets.iter().map(|a| a.dimension).collect();
        let expected: Vec<Dimension> = sizes.iter().map(|s| s.dimension).collect();
        assert_eq!(dims, expected);
    }

    #[test]
    fn test_render_all_fails_on_degenerate_size() {
        let sizes = vec![
            SizeRequest { relation: None, dimension: Dimension::Square(16) },
            SizeRequest { relation: None, dimension: Dimension::Rect(0, 10) },
        ];
        assert!(matches!(render_all(&source(), &sizes), Err(RenderError::InvalidDimension(_))));
    }

    #[test]
    fn test_write_archive_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("favicons.zip");
        let entries = vec![ArchiveEntry::new("a.txt", "hello"), ArchiveEntry::new("b.txt", "world")];

        let written = write_archive(&path, &entries).unwrap();
        assert_eq!(written, path);

        let mut archive = zip::ZipArchive::new(File::open(&path).unwrap()).unwrap();
        assert_eq!(archive.len(), 2);
        let mut content = String::new();
        archive.by_name("b.txt").unwrap().read_to_string(&mut content).unwrap();
        assert_eq!(content, "world");
        assert_eq!(archive.by_index(0).unwrap().compression(), CompressionMethod::Deflated);
    }

    #[test]
    fn test_generate_decode_failure_leaves_no_archive() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("broken.png");
        std::fs::write(&input, b"garbage").unwrap();

        let request = GenerationRequest::new(&input, dir.path());
        let result = generate(&request);

        assert!(matches!(result, Err(GenerateError::Render(RenderError::Decode(_)))));
        assert!(!request.archive_path().exists());
    }
}
