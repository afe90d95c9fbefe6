//! Multi-resolution `favicon.ico` packing
//!
//! Every input PNG becomes one PNG-encoded entry of the icon directory.

use ico::{IconDir, IconDirEntry, IconImage, ResourceType};
use std::io::{self, Cursor};
use thiserror::Error;

/// Error type for ICO packing
#[derive(Debug, Error)]
pub enum PackError {
    /// No images were given
    #[error("cannot pack an icon container without images")]
    Empty,
    /// An input buffer is not a valid PNG
    #[error("image {index} is not a valid PNG: {source}")]
    InvalidImage {
        index: usize,
        #[source]
        source: io::Error,
    },
    /// An image could not be encoded into the container (e.g. larger than 256px)
    #[error("image {index} cannot be stored in an icon container: {source}")]
    Encode {
        index: usize,
        #[source]
        source: io::Error,
    },
    /// Writing the container failed
    #[error("failed to write icon container: {0}")]
    Io(#[from] io::Error),
}

/// Pack PNG buffers into a single ICO container, keeping their order.
///
/// # Examples
///
/// ```
/// use favpack::ico::pack;
/// use favpack::renderer::encode_png;
/// use image::RgbaImage;
///
/// let png16 = encode_png(&RgbaImage::new(16, 16)).unwrap();
/// let png32 = encode_png(&RgbaImage::new(32, 32)).unwrap();
///
/// let ico = pack(&[png16.as_slice(), png32.as_slice()]).unwrap();
/// assert_eq!(&ico[..4], &[0, 0, 1, 0]);
/// ```
pub fn pack(buffers: &[&[u8]]) -> Result<Vec<u8>, PackError> {
    if buffers.is_empty() {
        return Err(PackError::Empty);
    }

    let mut icon_dir = IconDir::new(ResourceType::Icon);
    for (index, buffer) in buffers.iter().enumerate() {
        let image = IconImage::read_png(Cursor::new(buffer))
            .map_err(|source| PackError::InvalidImage { index, source })?;
        let entry = IconDirEntry::encode_as_png(&image)
            .map_err(|source| PackError::Encode { index, source })?;
        icon_dir.add_entry(entry);
    }

    let mut out = Vec::new();
    icon_dir.write(&mut out)?;
    Ok(out)
}
