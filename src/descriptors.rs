//! Descriptor files written next to the rendered icons
//!
//! - `manifest.json` for Progressive Web Apps
//! - `browserconfig.xml` for legacy Windows tiles
//! - `index.html` showing how to reference everything
//!
//! All builders are pure: they only look at the asset list and the optional
//! PWA metadata.

use serde::Serialize;
use std::cmp::Reverse;

use crate::catalog::BASELINE_SIZES;
use crate::models::{DisplayMode, PwaConfig, Relation, RenderedAsset};

pub const MANIFEST_FILE_NAME: &str = "manifest.json";
pub const HTML_FILE_NAME: &str = "index.html";
pub const ICO_FILE_NAME: &str = "favicon.ico";
pub const SVG_FILE_NAME: &str = "favicon.svg";

/// Size advertised for the SVG icon in the manifest
const SVG_MANIFEST_SIZES: &str = "512x512";

const PNG_MIME: &str = "image/png";
const SVG_MIME: &str = "image/svg+xml";
const ICO_MIME: &str = "image/x-icon";

/// Title used in the example HTML when no PWA name is configured
const PLACEHOLDER_TITLE: &str = "Your app";

#[derive(Debug, Serialize)]
struct Manifest<'a> {
    name: &'a str,
    description: &'a str,
    display: DisplayMode,
    background_color: &'a str,
    theme_color: &'a str,
    icons: Vec<ManifestIcon>,
}

#[derive(Debug, Serialize)]
struct ManifestIcon {
    src: String,
    sizes: String,
    #[serde(rename = "type")]
    mime_type: &'static str,
}

/// Build `manifest.json`.
///
/// The SVG icon, when present, comes first. PNG icons follow in ascending
/// order of their primary dimension (side or width); equal widths keep their
/// input order.
pub fn build_manifest(
    pwa: &PwaConfig,
    assets: &[RenderedAsset],
    has_vector_icon: bool,
) -> Result<String, serde_json::Error> {
    let mut sorted: Vec<&RenderedAsset> = assets.iter().collect();
    sorted.sort_by_key(|asset| asset.dimension.primary());

    let mut icons = Vec::with_capacity(sorted.len() + 1);
    if has_vector_icon {
        icons.push(ManifestIcon {
            src: SVG_FILE_NAME.to_string(),
            sizes: SVG_MANIFEST_SIZES.to_string(),
            mime_type: SVG_MIME,
        });
    }
    icons.extend(sorted.into_iter().map(|asset| ManifestIcon {
        src: asset.file_name.clone(),
        sizes: asset.dimension.proportions(),
        mime_type: PNG_MIME,
    }));

    let manifest = Manifest {
        name: pwa.name(),
        description: pwa.description(),
        display: pwa.display(),
        background_color: pwa.color(),
        theme_color: pwa.color(),
        icons,
    };

    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    manifest.serialize(&mut serializer)?;

    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Build `browserconfig.xml`, referencing the Windows tile PNGs.
pub fn build_legacy_config() -> String {
    r#"<?xml version="1.0" encoding="utf-8"?>
<browserconfig>
    <msapplication>
        <tile>
            <square70x70logo src="favicon-128x128.png" />
            <square150x150logo src="favicon-270x270.png" />
            <wide310x150logo src="favicon-558x270.png" />
            <square310x310logo src="favicon-558x558.png" />
        </tile>
    </msapplication>
</browserconfig>"#
        .to_string()
}

/// Build the example `index.html`.
///
/// Link order: apple-touch-icon PNGs, then icon PNGs (each group largest
/// first), then the SVG icon if present, then `favicon.ico`. Assets without a
/// relation are not linked.
pub fn build_example_html(
    pwa: Option<&PwaConfig>,
    assets: &[RenderedAsset],
    has_vector_icon: bool,
) -> String {
    let mut linked: Vec<(&RenderedAsset, Relation)> =
        assets.iter().filter_map(|asset| asset.relation.map(|rel| (asset, rel))).collect();
    linked.sort_by_key(|(asset, rel)| (relation_rank(*rel), Reverse(asset.dimension.primary())));

    let title = pwa.map(PwaConfig::name).unwrap_or(PLACEHOLDER_TITLE);
    let mut tags = vec![format!("<title>{}</title>", escape_html(title))];

    if let Some(pwa) = pwa {
        tags.push(format!(
            r#"<meta name="description" content="{}" />"#,
            escape_html(pwa.description())
        ));
        tags.push(format!(r#"<meta name="theme-color" content="{}" />"#, pwa.color()));
        tags.push(format!(r#"<link rel="manifest" href="/{}" />"#, MANIFEST_FILE_NAME));
    }

    for (asset, rel) in &linked {
        tags.push(format!(
            r#"<link rel="{}" href="/{}" sizes="{}" type="{}" />"#,
            rel,
            asset.file_name,
            asset.dimension.proportions(),
            PNG_MIME
        ));
    }

    if has_vector_icon {
        tags.push(format!(
            r#"<link rel="icon" href="/{}" sizes="any" type="{}" />"#,
            SVG_FILE_NAME, SVG_MIME
        ));
    }

    let ico_sizes = BASELINE_SIZES.iter().map(|d| d.proportions()).collect::<Vec<_>>().join(" ");
    tags.push(format!(
        r#"<link rel="icon" href="/{}" sizes="{}" type="{}" />"#,
        ICO_FILE_NAME, ico_sizes, ICO_MIME
    ));

    let head = tags.iter().map(|tag| format!("        {}\n", tag)).collect::<String>();

    format!(
        "<!doctype html>\n\
         <html lang=\"en\">\n    \
             <head>\n        \
                 <meta charset=\"utf-8\" />\n        \
                 <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\" />\n\
         {head}    \
             </head>\n    \
             <body></body>\n\
         </html>"
    )
}

fn relation_rank(relation: Relation) -> u8 {
    match relation {
        Relation::AppleTouchIcon => 0,
        Relation::Icon => 1,
    }
}

/// Escape text for use in HTML content and double-quoted attributes.
fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Dimension;
    use serde_json::Value;

    fn asset(relation: Option<Relation>, dimension: Dimension) -> RenderedAsset {
        RenderedAsset::new(relation, dimension, Vec::new())
    }

    fn pwa() -> PwaConfig {
        PwaConfig::new("Test", "A test app", DisplayMode::Standalone, "#ff0000").unwrap()
    }

    fn sample_assets() -> Vec<RenderedAsset> {
        vec![
            asset(Some(Relation::Icon), Dimension::Square(16)),
            asset(Some(Relation::Icon), Dimension::Square(64)),
            asset(Some(Relation::AppleTouchIcon), Dimension::Square(57)),
            asset(None, Dimension::Rect(558, 270)),
            asset(Some(Relation::AppleTouchIcon), Dimension::Square(180)),
            asset(Some(Relation::Icon), Dimension::Square(32)),
            asset(None, Dimension::Square(192)),
        ]
    }

    #[test]
    fn test_manifest_fields() {
        let json = build_manifest(&pwa(), &sample_assets(), false).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["name"], "Test");
        assert_eq!(value["description"], "A test app");
        assert_eq!(value["display"], "standalone");
        assert_eq!(value["background_color"], "#ff0000");
        assert_eq!(value["theme_color"], "#ff0000");
    }

    #[test]
    fn test_manifest_icons_sorted_ascending() {
        let json = build_manifest(&pwa(), &sample_assets(), false).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        let icons = value["icons"].as_array().unwrap();

        assert_eq!(icons.len(), 7);
        let widths: Vec<u32> = icons
            .iter()
            .map(|icon| {
                let sizes = icon["sizes"].as_str().unwrap();
                sizes.split('x').next().unwrap().parse().unwrap()
            })
            .collect();
        let mut sorted = widths.clone();
        sorted.sort();
        assert_eq!(widths, sorted);

        assert_eq!(icons[0]["src"], "favicon-16x16.png");
        assert_eq!(icons[0]["type"], "image/png");
        assert_eq!(icons[6]["sizes"], "558x270");
    }

    #[test]
    fn test_manifest_svg_icon_first() {
        let json = build_manifest(&pwa(), &sample_assets(), true).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        let icons = value["icons"].as_array().unwrap();

        assert_eq!(icons.len(), 8);
        assert_eq!(icons[0]["src"], "favicon.svg");
        assert_eq!(icons[0]["sizes"], "512x512");
        assert_eq!(icons[0]["type"], "image/svg+xml");
    }

    #[test]
    fn test_manifest_key_order_and_indent() {
        let json = build_manifest(&pwa(), &[], false).unwrap();
        let name = json.find("\"name\"").unwrap();
        let theme = json.find("\"theme_color\"").unwrap();
        let icons = json.find("\"icons\"").unwrap();
        assert!(name < theme && theme < icons);
        assert!(json.contains("\n    \"name\": \"Test\""));
    }

    #[test]
    fn test_legacy_config() {
        let xml = build_legacy_config();
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>"));
        for name in [
            "favicon-128x128.png",
            "favicon-270x270.png",
            "favicon-558x270.png",
            "favicon-558x558.png",
        ] {
            assert!(xml.contains(name), "missing {}", name);
        }
        assert!(xml.ends_with("</browserconfig>"));
    }

    fn link_lines(html: &str) -> Vec<&str> {
        html.lines().map(str::trim).filter(|l| l.starts_with("<link rel=\"")).collect()
    }

    #[test]
    fn test_html_link_order() {
        let html = build_example_html(None, &sample_assets(), false);
        let links = link_lines(&html);

        assert_eq!(
            links,
            vec![
                r#"<link rel="apple-touch-icon" href="/favicon-180x180.png" sizes="180x180" type="image/png" />"#,
                r#"<link rel="apple-touch-icon" href="/favicon-57x57.png" sizes="57x57" type="image/png" />"#,
                r#"<link rel="icon" href="/favicon-64x64.png" sizes="64x64" type="image/png" />"#,
                r#"<link rel="icon" href="/favicon-32x32.png" sizes="32x32" type="image/png" />"#,
                r#"<link rel="icon" href="/favicon-16x16.png" sizes="16x16" type="image/png" />"#,
                r#"<link rel="icon" href="/favicon.ico" sizes="16x16 32x32 64x64" type="image/x-icon" />"#,
            ]
        );
    }

    #[test]
    fn test_html_skips_assets_without_relation() {
        let html = build_example_html(None, &sample_assets(), false);
        assert!(!html.contains("favicon-558x270.png"));
        assert!(!html.contains("favicon-192x192.png"));
    }

    #[test]
    fn test_html_without_pwa() {
        let html = build_example_html(None, &[], false);
        assert!(html.starts_with("<!doctype html>"));
        assert!(html.contains("<title>Your app</title>"));
        assert!(!html.contains("manifest.json"));
        assert!(!html.contains("theme-color"));
        assert!(html.ends_with("</html>"));
    }

    #[test]
    fn test_html_with_pwa_and_svg() {
        let html = build_example_html(Some(&pwa()), &sample_assets(), true);
        assert!(html.contains("<title>Test</title>"));
        assert!(html.contains(r#"<meta name="description" content="A test app" />"#));
        assert!(html.contains(r##"<meta name="theme-color" content="#ff0000" />"##));
        assert!(html.contains(r#"<link rel="manifest" href="/manifest.json" />"#));

        let links = link_lines(&html);
        let n = links.len();
        assert_eq!(
            links[n - 2],
            r#"<link rel="icon" href="/favicon.svg" sizes="any" type="image/svg+xml" />"#
        );
        assert!(links[n - 1].contains("/favicon.ico"));
    }

    #[test]
    fn test_html_escapes_user_text() {
        let config =
            PwaConfig::new("A & B <app>", "Say \"hi\"", DisplayMode::Browser, "#000").unwrap();
        let html = build_example_html(Some(&config), &[], false);
        assert!(html.contains("<title>A &amp; B &lt;app&gt;</title>"));
        assert!(html.contains("content=\"Say &quot;hi&quot;\""));
    }
}
