//! SVG optimization for the embedded `favicon.svg`
//!
//! The document is parsed with usvg and written back from the normalized
//! tree. The result draws the same picture but drops comments, metadata,
//! editor namespaces, unused definitions and CSS, and resolves `use`
//! references and inherited attributes.

use resvg::usvg;
use thiserror::Error;

/// Error type for SVG optimization
#[derive(Debug, Error)]
pub enum OptimizeError {
    /// The document is not valid SVG
    #[error("Failed to parse SVG for optimization: {0}")]
    Parse(#[from] usvg::Error),
}

/// Optimize an SVG document, returning the re-serialized markup.
pub fn optimize_svg(data: &[u8]) -> Result<String, OptimizeError> {
    let tree = usvg::Tree::from_data(data, &usvg::Options::default())?;
    Ok(tree.to_string(&usvg::WriteOptions::default()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLOATED_SVG: &str = r##"<?xml version="1.0" encoding="UTF-8" standalone="no"?>
<!-- Created with an editor -->
<svg xmlns="http://www.w3.org/2000/svg"
     xmlns:inkscape="http://www.inkscape.org/namespaces/inkscape"
     width="32" height="32" viewBox="0 0 32 32" inkscape:version="1.0">
  <metadata>
    <rdf>lots of metadata</rdf>
  </metadata>
  <defs>
    <linearGradient id="unused"><stop offset="0" stop-color="#000"/></linearGradient>
  </defs>
  <rect x="0" y="0" width="32" height="32" fill="#ff0000"/>
</svg>"##;

    #[test]
    fn test_optimize_drops_editor_noise() {
        let optimized = optimize_svg(BLOATED_SVG.as_bytes()).unwrap();

        assert!(optimized.contains("<svg"));
        assert!(!optimized.contains("Created with an editor"));
        assert!(!optimized.contains("inkscape"));
        assert!(!optimized.contains("metadata"));
        assert!(optimized.len() < BLOATED_SVG.len());
    }

    #[test]
    fn test_optimized_output_is_valid_svg() {
        let optimized = optimize_svg(BLOATED_SVG.as_bytes()).unwrap();
        let tree = usvg::Tree::from_data(optimized.as_bytes(), &usvg::Options::default()).unwrap();
        assert_eq!(tree.size().width(), 32.0);
        assert_eq!(tree.size().height(), 32.0);
    }

    #[test]
    fn test_optimize_rejects_invalid_svg() {
        assert!(matches!(optimize_svg(b"<html></html>"), Err(OptimizeError::Parse(_))));
    }
}
