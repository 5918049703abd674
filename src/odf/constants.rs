//! ODF constants: MIME types, package paths and the part-name table.
//!
//! # References
//!
//! - odfdo: `3rdparty/odfdo/src/odfdo/const.py`

use phf::{Map, phf_map};

/// ODF specification version written into new parts
pub const OFFICE_VERSION: &str = "1.2";

// ============================================================================
// MIME TYPES
// ============================================================================

/// MIME type for OpenDocument Text (.odt)
pub const ODF_TEXT: &str = "application/vnd.oasis.opendocument.text";

/// MIME type for OpenDocument Spreadsheet (.ods)
pub const ODF_SPREADSHEET: &str = "application/vnd.oasis.opendocument.spreadsheet";

/// MIME type for OpenDocument Presentation (.odp)
pub const ODF_PRESENTATION: &str = "application/vnd.oasis.opendocument.presentation";

/// MIME type for OpenDocument Drawing (.odg)
pub const ODF_DRAWING: &str = "application/vnd.oasis.opendocument.graphics";

/// Suffix that distinguishes template MIME types (`...text-template`)
pub const TEMPLATE_SUFFIX: &str = "-template";

// ============================================================================
// PACKAGE PATHS
// ============================================================================

/// Path of the uncompressed MIME type entry
pub const ODF_MIMETYPE: &str = "mimetype";

/// Path to content.xml (main document content)
pub const ODF_CONTENT: &str = "content.xml";

/// Path to meta.xml (document metadata)
pub const ODF_META: &str = "meta.xml";

/// Path to settings.xml (application settings)
pub const ODF_SETTINGS: &str = "settings.xml";

/// Path to styles.xml (document styles)
pub const ODF_STYLES: &str = "styles.xml";

/// Path to manifest.xml (package manifest)
pub const ODF_MANIFEST: &str = "META-INF/manifest.xml";

/// Part name to package path (compile-time perfect hash map)
static PART_PATHS: Map<&'static str, &'static str> = phf_map! {
    "content" => ODF_CONTENT,
    "meta" => ODF_META,
    "settings" => ODF_SETTINGS,
    "styles" => ODF_STYLES,
    "manifest" => ODF_MANIFEST,
};

/// Name of the part holding the document body
pub const PART_CONTENT: &str = "content";

/// Name of the part holding common, automatic-for-styles and master styles
pub const PART_STYLES: &str = "styles";

/// Resolve a part name (`"content"`) to its path inside the package.
///
/// Names outside the standard table are taken as literal package paths.
///
/// ```
/// use odfdoc::odf::constants::part_path;
///
/// assert_eq!(part_path("content"), "content.xml");
/// assert_eq!(part_path("manifest"), "META-INF/manifest.xml");
/// assert_eq!(part_path("Pictures/a.png"), "Pictures/a.png");
/// ```
#[inline]
pub fn part_path(name: &str) -> &str {
    PART_PATHS.get(name).copied().unwrap_or(name)
}

/// Inverse of [`part_path`]: the standard part name stored at `path`, or
/// `path` itself.
///
/// ```
/// use odfdoc::odf::constants::part_name;
///
/// assert_eq!(part_name("styles.xml"), "styles");
/// assert_eq!(part_name("Pictures/a.png"), "Pictures/a.png");
/// ```
pub fn part_name(path: &str) -> &str {
    PART_PATHS
        .entries()
        .find(|(_, p)| **p == path)
        .map(|(name, _)| *name)
        .unwrap_or(path)
}
