//! ODF package writing and skeletons for new documents.
//!
//! The package layout follows ODF 1.2 part 3: the `mimetype` entry comes
//! first and is stored uncompressed, everything else is deflated.

use crate::common::xml::escape_xml;
use crate::common::{Error, Result};
use crate::odf::constants::{
    ODF_DRAWING, ODF_MIMETYPE, ODF_PRESENTATION, ODF_SPREADSHEET, ODF_TEXT, OFFICE_VERSION,
};
use std::fmt;
use std::io::{Seek, Write};
use std::str::FromStr;
use zip::write::{SimpleFileOptions, ZipWriter};

/// Writer for ODF packages (ZIP archives).
///
/// The mimetype entry is written on construction, so it always leads the
/// archive.
///
/// # Examples
///
/// ```
/// # use odfdoc::odf::core::PackageWriter;
/// # fn example() -> odfdoc::Result<()> {
/// let mut writer = PackageWriter::new("application/vnd.oasis.opendocument.text")?;
/// writer.add_file("content.xml", b"<office:document-content/>")?;
/// let bytes = writer.finish_to_bytes()?;
/// assert_eq!(&bytes[30..38], b"mimetype");
/// # Ok(())
/// # }
/// # example().unwrap();
/// ```
pub struct PackageWriter<W: Write + Seek> {
    zip_writer: ZipWriter<W>,
}

impl PackageWriter<std::io::Cursor<Vec<u8>>> {
    /// Create a package writer that writes to memory.
    pub fn new(mimetype: &str) -> Result<Self> {
        Self::with_writer(std::io::Cursor::new(Vec::new()), mimetype)
    }

    /// Finish writing and return the bytes.
    pub fn finish_to_bytes(self) -> Result<Vec<u8>> {
        let cursor = self.finish()?;
        Ok(cursor.into_inner())
    }
}

impl<W: Write + Seek> PackageWriter<W> {
    /// Create a package writer over `writer` and write the mimetype entry.
    pub fn with_writer(writer: W, mimetype: &str) -> Result<Self> {
        if mimetype.is_empty() {
            return Err(Error::InvalidFormat("MIME type not set".to_string()));
        }
        let mut zip_writer = ZipWriter::new(writer);
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
        zip_writer.start_file(ODF_MIMETYPE, options)?;
        zip_writer.write_all(mimetype.as_bytes())?;
        Ok(Self { zip_writer })
    }

    /// Add a file (deflated). Paths ending in `/` become directory entries.
    pub fn add_file(&mut self, path: &str, content: &[u8]) -> Result<()> {
        if path == ODF_MIMETYPE {
            return Err(Error::InvalidArgument(
                "the mimetype entry is written by the package writer".to_string(),
            ));
        }
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);
        if path.ends_with('/') {
            self.zip_writer.add_directory(path, options)?;
        } else {
            self.zip_writer.start_file(path, options)?;
            self.zip_writer.write_all(content)?;
        }
        Ok(())
    }

    /// Finalize the archive.
    pub fn finish(self) -> Result<W> {
        Ok(self.zip_writer.finish()?)
    }
}

/// Guess a manifest media type from a package path.
pub fn guess_media_type(path: &str) -> &'static str {
    let lower = path.to_ascii_lowercase();
    if lower.ends_with(".xml") {
        "text/xml"
    } else if lower.ends_with(".png") {
        "image/png"
    } else if lower.ends_with(".jpg") || lower.ends_with(".jpeg") {
        "image/jpeg"
    } else if lower.ends_with(".gif") {
        "image/gif"
    } else if lower.ends_with(".svg") {
        "image/svg+xml"
    } else if lower.ends_with('/') {
        ""
    } else {
        "application/octet-stream"
    }
}

/// Render `META-INF/manifest.xml` for a package with the given entries.
///
/// The root entry (`/`) carries the package MIME type.
pub fn generate_manifest<'a>(mimetype: &str, paths: impl IntoIterator<Item = &'a str>) -> String {
    let mut manifest = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <manifest:manifest xmlns:manifest=\"urn:oasis:names:tc:opendocument:xmlns:manifest:1.0\" manifest:version=\"",
    );
    manifest.push_str(OFFICE_VERSION);
    manifest.push_str("\">\n");

    let mut entry = |path: &str, media_type: &str| {
        manifest.push_str(&format!(
            " <manifest:file-entry manifest:full-path=\"{}\" manifest:media-type=\"{}\"/>\n",
            escape_xml(path),
            escape_xml(media_type)
        ));
    };
    entry("/", mimetype);
    for path in paths {
        entry(path, guess_media_type(path));
    }

    manifest.push_str("</manifest:manifest>\n");
    manifest
}

/// Kind of document created by [`OdfStructure`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentClass {
    /// OpenDocument Text (.odt)
    Text,
    /// OpenDocument Spreadsheet (.ods)
    Spreadsheet,
    /// OpenDocument Presentation (.odp)
    Presentation,
    /// OpenDocument Drawing (.odg)
    Drawing,
}

impl DocumentClass {
    /// MIME type of packages of this class.
    pub const fn mimetype(self) -> &'static str {
        match self {
            DocumentClass::Text => ODF_TEXT,
            DocumentClass::Spreadsheet => ODF_SPREADSHEET,
            DocumentClass::Presentation => ODF_PRESENTATION,
            DocumentClass::Drawing => ODF_DRAWING,
        }
    }

    /// Tag of the top-level container inside `office:body`.
    pub const fn body_tag(self) -> &'static str {
        match self {
            DocumentClass::Text => "office:text",
            DocumentClass::Spreadsheet => "office:spreadsheet",
            DocumentClass::Presentation => "office:presentation",
            DocumentClass::Drawing => "office:drawing",
        }
    }

    /// Class name (`text`, `spreadsheet`, `presentation`, `drawing`).
    pub const fn as_str(self) -> &'static str {
        match self {
            DocumentClass::Text => "text",
            DocumentClass::Spreadsheet => "spreadsheet",
            DocumentClass::Presentation => "presentation",
            DocumentClass::Drawing => "drawing",
        }
    }
}

impl FromStr for DocumentClass {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "text" => Ok(DocumentClass::Text),
            "spreadsheet" => Ok(DocumentClass::Spreadsheet),
            "presentation" => Ok(DocumentClass::Presentation),
            "drawing" => Ok(DocumentClass::Drawing),
            _ => Err(Error::InvalidArgument(format!(
                "unknown document class: {}",
                s
            ))),
        }
    }
}

impl fmt::Display for DocumentClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Namespaces declared on the root of every generated part.
const NAMESPACES: &[(&str, &str)] = &[
    ("office", "urn:oasis:names:tc:opendocument:xmlns:office:1.0"),
    ("style", "urn:oasis:names:tc:opendocument:xmlns:style:1.0"),
    ("text", "urn:oasis:names:tc:opendocument:xmlns:text:1.0"),
    ("table", "urn:oasis:names:tc:opendocument:xmlns:table:1.0"),
    ("draw", "urn:oasis:names:tc:opendocument:xmlns:drawing:1.0"),
    ("fo", "urn:oasis:names:tc:opendocument:xmlns:xsl-fo-compatible:1.0"),
    ("xlink", "http://www.w3.org/1999/xlink"),
    ("dc", "http://purl.org/dc/elements/1.1/"),
    ("meta", "urn:oasis:names:tc:opendocument:xmlns:meta:1.0"),
    ("number", "urn:oasis:names:tc:opendocument:xmlns:datastyle:1.0"),
    ("presentation", "urn:oasis:names:tc:opendocument:xmlns:presentation:1.0"),
    ("svg", "urn:oasis:names:tc:opendocument:xmlns:svg-compatible:1.0"),
    ("chart", "urn:oasis:names:tc:opendocument:xmlns:chart:1.0"),
    ("config", "urn:oasis:names:tc:opendocument:xmlns:config:1.0"),
];

/// Skeletons of the XML parts of a new document.
pub struct OdfStructure;

impl OdfStructure {
    fn open_root(tag: &str) -> String {
        let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<");
        xml.push_str(tag);
        for (prefix, uri) in NAMESPACES {
            xml.push_str(&format!(" xmlns:{}=\"{}\"", prefix, uri));
        }
        xml.push_str(&format!(" office:version=\"{}\">\n", OFFICE_VERSION));
        xml
    }

    /// `content.xml` with an empty body of the given class.
    pub fn default_content_xml(class: DocumentClass) -> String {
        let mut xml = Self::open_root("office:document-content");
        xml.push_str(" <office:scripts/>\n <office:font-face-decls/>\n <office:automatic-styles/>\n");
        xml.push_str(&format!(
            " <office:body>\n  <{0}/>\n </office:body>\n</office:document-content>\n",
            class.body_tag()
        ));
        xml
    }

    /// `styles.xml` with all four style areas present and empty.
    pub fn default_styles_xml() -> String {
        let mut xml = Self::open_root("office:document-styles");
        xml.push_str(
            " <office:font-face-decls/>\n <office:styles/>\n <office:automatic-styles/>\n \
             <office:master-styles/>\n</office:document-styles>\n",
        );
        xml
    }

    /// `meta.xml` stamped with the current time.
    pub fn default_meta_xml() -> String {
        let now = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%S").to_string();
        let mut xml = Self::open_root("office:document-meta");
        xml.push_str(&format!(
            " <office:meta>\n  <meta:generator>odfdoc/{}</meta:generator>\n  \
             <meta:creation-date>{}</meta:creation-date>\n  <dc:date>{}</dc:date>\n \
             </office:meta>\n</office:document-meta>\n",
            env!("CARGO_PKG_VERSION"),
            now,
            now
        ));
        xml
    }

    /// `settings.xml` with no settings.
    pub fn default_settings_xml() -> String {
        let mut xml = Self::open_root("office:document-settings");
        xml.push_str(" <office:settings/>\n</office:document-settings>\n");
        xml
    }
}
