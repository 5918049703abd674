/// Configuration types for saving documents.
///
/// # Examples
///
/// ```rust
/// use odfdoc::odf::core::{Packaging, SaveOptions};
///
/// let options = SaveOptions::new()
///     .with_packaging(Packaging::Folder)
///     .with_pretty(true);
/// assert!(options.pretty);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SaveOptions {
    /// Physical layout of the saved package
    pub packaging: Packaging,
    /// Indent the XML of modified parts
    pub pretty: bool,
}

impl SaveOptions {
    /// Default options: zip packaging, compact XML.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the packaging.
    #[inline]
    pub fn with_packaging(mut self, packaging: Packaging) -> Self {
        self.packaging = packaging;
        self
    }

    /// Set whether modified parts are pretty printed.
    #[inline]
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

/// How a package is laid out on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Packaging {
    /// A single ZIP file
    #[default]
    Zip,
    /// An unpacked directory tree
    Folder,
}
