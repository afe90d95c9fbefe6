//! Source image decoding and per-size rendering to PNG
//!
//! A [`SourceImage`] is decoded once and only read afterwards, so renders for
//! different sizes can run in parallel against the same source.

use image::codecs::png::{CompressionType, FilterType as PngFilterType, PngEncoder};
use image::imageops::{self, FilterType};
use image::{ColorType, DynamicImage, ImageEncoder, Rgba, RgbaImage};
use resvg::{tiny_skia, usvg};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::models::{Dimension, Fit};
use crate::validate::is_vector_source;

/// Transparent color used for padding
const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Resampling filter for raster sources
const RESIZE_FILTER: FilterType = FilterType::Lanczos3;

/// Error type for decoding and rendering
#[derive(Debug, Error)]
pub enum RenderError {
    /// The source file could not be read
    #[error("Failed to read source image '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The source is not a decodable raster image
    #[error("Failed to decode source image: {0}")]
    Decode(#[source] image::ImageError),
    /// The source is not a parsable SVG document
    #[error("Failed to parse SVG source: {0}")]
    DecodeSvg(#[source] usvg::Error),
    /// Width or height is zero
    #[error("Invalid target dimension {0}: width and height must be positive")]
    InvalidDimension(Dimension),
    /// The vector rasterizer could not allocate the target canvas
    #[error("Failed to rasterize SVG source at {0}")]
    Rasterize(Dimension),
    /// PNG encoding failed
    #[error("Failed to encode PNG: {0}")]
    Encode(#[source] image::ImageError),
}

/// A decoded source image.
pub enum SourceImage {
    Raster(DynamicImage),
    Vector(usvg::Tree),
}

impl std::fmt::Debug for SourceImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceImage::Raster(img) => {
                write!(f, "SourceImage::Raster({}x{})", img.width(), img.height())
            }
            SourceImage::Vector(tree) => {
                let size = tree.size();
                write!(f, "SourceImage::Vector({}x{})", size.width(), size.height())
            }
        }
    }
}

impl SourceImage {
    /// Read and decode a source image. `.svg` files are parsed as vectors,
    /// everything else is decoded as a raster with its format guessed from content.
    ///
    /// The raw bytes are returned too, since vector sources are embedded as-is.
    pub fn open(path: &Path) -> Result<(Self, Vec<u8>), RenderError> {
        let bytes = std::fs::read(path)
            .map_err(|source| RenderError::Read { path: path.to_path_buf(), source })?;

        let source =
            if is_vector_source(path) { Self::from_svg(&bytes)? } else { Self::from_raster(&bytes)? };
        Ok((source, bytes))
    }

    pub fn from_raster(bytes: &[u8]) -> Result<Self, RenderError> {
        image::load_from_memory(bytes).map(SourceImage::Raster).map_err(RenderError::Decode)
    }

    pub fn from_svg(bytes: &[u8]) -> Result<Self, RenderError> {
        usvg::Tree::from_data(bytes, &usvg::Options::default())
            .map(SourceImage::Vector)
            .map_err(RenderError::DecodeSvg)
    }

    pub fn is_vector(&self) -> bool {
        matches!(self, SourceImage::Vector(_))
    }
}

/// Render the source at `dimension` and encode it as PNG.
///
/// The output is exactly `dimension` in size. Square dimensions cover the
/// target (center crop), rectangular ones are fitted and padded with
/// transparent pixels.
pub fn render(source: &SourceImage, dimension: Dimension) -> Result<Vec<u8>, RenderError> {
    let image = render_image(source, dimension)?;
    encode_png(&image)
}

/// Render the source at `dimension` without encoding.
pub fn render_image(source: &SourceImage, dimension: Dimension) -> Result<RgbaImage, RenderError> {
    if dimension.is_degenerate() {
        return Err(RenderError::InvalidDimension(dimension));
    }

    match source {
        SourceImage::Raster(img) => Ok(resize_raster(img, dimension)),
        SourceImage::Vector(tree) => rasterize_vector(tree, dimension),
    }
}

/// Encode an RGBA image as PNG with maximum compression.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, RenderError> {
    let mut buf = Vec::new();
    PngEncoder::new_with_quality(&mut buf, CompressionType::Best, PngFilterType::Adaptive)
        .write_image(image.as_raw(), image.width(), image.height(), ColorType::Rgba8)
        .map_err(RenderError::Encode)?;
    Ok(buf)
}

fn resize_raster(img: &DynamicImage, dimension: Dimension) -> RgbaImage {
    let (width, height) = (dimension.width(), dimension.height());

    match dimension.fit() {
        Fit::Cover => img.resize_to_fill(width, height, RESIZE_FILTER).to_rgba8(),
        Fit::Contain => {
            let fitted = img.resize(width, height, RESIZE_FILTER).to_rgba8();
            let mut canvas = RgbaImage::from_pixel(width, height, TRANSPARENT);
            let x = width.saturating_sub(fitted.width()) / 2;
            let y = height.saturating_sub(fitted.height()) / 2;
            imageops::overlay(&mut canvas, &fitted, x as i64, y as i64);
            canvas
        }
    }
}

fn rasterize_vector(tree: &usvg::Tree, dimension: Dimension) -> Result<RgbaImage, RenderError> {
    let (width, height) = (dimension.width(), dimension.height());
    let size = tree.size();

    let scale_x = width as f32 / size.width();
    let scale_y = height as f32 / size.height();
    let scale = match dimension.fit() {
        Fit::Cover => scale_x.max(scale_y),
        Fit::Contain => scale_x.min(scale_y),
    };

    // Center the scaled viewport; negative offsets crop for Cover
    let offset_x = (width as f32 - size.width() * scale) / 2.0;
    let offset_y = (height as f32 - size.height() * scale) / 2.0;
    let transform = tiny_skia::Transform::from_row(scale, 0.0, 0.0, scale, offset_x, offset_y);

    let mut pixmap =
        tiny_skia::Pixmap::new(width, height).ok_or(RenderError::Rasterize(dimension))?;
    resvg::render(tree, transform, &mut pixmap.as_mut());

    // tiny-skia stores premultiplied alpha
    let mut image = RgbaImage::new(width, height);
    for (src, dst) in pixmap.pixels().iter().zip(image.pixels_mut()) {
        let color = src.demultiply();
        *dst = Rgba([color.red(), color.green(), color.blue(), color.alpha()]);
    }

    Ok(image)
}
