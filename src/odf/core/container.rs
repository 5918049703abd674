//! ODF package container.
//!
//! A [`Container`] holds every entry of a package as bytes, in package
//! order, plus the MIME type. Entries are addressed either by part name
//! (`content`, `styles`, ...) or by literal package path.

use super::options::Packaging;
use super::writer::{DocumentClass, OdfStructure, PackageWriter, generate_manifest};
use crate::common::{Error, Result};
use crate::odf::constants::{
    ODF_CONTENT, ODF_MANIFEST, ODF_META, ODF_MIMETYPE, ODF_SETTINGS, ODF_STYLES, TEMPLATE_SUFFIX,
    part_path,
};
use crate::odf::xml::Element;
use std::fs;
use std::io::{Read, Seek};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    path: String,
    data: Vec<u8>,
}

impl Entry {
    fn is_dir(&self) -> bool {
        self.path.ends_with('/')
    }
}

/// In-memory ODF package.
///
/// Cloning copies every byte, so a clone is fully independent.
#[derive(Debug, Clone)]
pub struct Container {
    mimetype: String,
    entries: Vec<Entry>,
    source: Option<PathBuf>,
}

impl Container {
    /// Open a package file or an unpacked package folder.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut container = if path.is_dir() {
            Self::read_folder(path)?
        } else {
            Self::from_reader(fs::File::open(path)?)?
        };
        container.source = Some(path.to_path_buf());
        Ok(container)
    }

    /// Read a package from memory.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_reader(std::io::Cursor::new(bytes))
    }

    /// Read a package from any seekable reader.
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        let mut archive = zip::ZipArchive::new(reader)
            .map_err(|_| Error::InvalidFormat("Invalid ZIP archive".to_string()))?;

        let mut mimetype = None;
        let mut entries = Vec::with_capacity(archive.len());
        for i in 0..archive.len() {
            let mut file = archive.by_index(i)?;
            let path = file.name().to_string();
            let mut data = Vec::new();
            file.read_to_end(&mut data)?;
            if path == ODF_MIMETYPE {
                mimetype = Some(String::from_utf8(data)?.trim().to_string());
            } else {
                entries.push(Entry { path, data });
            }
        }

        let mimetype = mimetype.ok_or_else(|| {
            Error::InvalidFormat("No mimetype file found in ODF package".to_string())
        })?;
        Ok(Self {
            mimetype,
            entries,
            source: None,
        })
    }

    /// Build a container from a MIME type and `(path, bytes)` entries.
    pub fn from_parts<I, S>(mimetype: &str, parts: I) -> Self
    where
        I: IntoIterator<Item = (S, Vec<u8>)>,
        S: Into<String>,
    {
        Self {
            mimetype: mimetype.to_string(),
            entries: parts
                .into_iter()
                .map(|(path, data)| Entry {
                    path: path.into(),
                    data,
                })
                .filter(|entry| entry.path != ODF_MIMETYPE)
                .collect(),
            source: None,
        }
    }

    /// A new, empty document of the given class.
    pub fn new_from_class(class: DocumentClass) -> Self {
        let mimetype = class.mimetype();
        let parts = [
            (ODF_CONTENT, OdfStructure::default_content_xml(class)),
            (ODF_STYLES, OdfStructure::default_styles_xml()),
            (ODF_META, OdfStructure::default_meta_xml()),
            (ODF_SETTINGS, OdfStructure::default_settings_xml()),
        ];
        let manifest = generate_manifest(mimetype, parts.iter().map(|(path, _)| *path));

        Self::from_parts(
            mimetype,
            parts
                .into_iter()
                .map(|(path, xml)| (path, xml.into_bytes()))
                .chain(std::iter::once((ODF_MANIFEST, manifest.into_bytes()))),
        )
    }

    /// A new document from a template package.
    ///
    /// The `-template` suffix is dropped from the MIME type and from the
    /// manifest's root entry. The result has no source path.
    pub fn new_from_template<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut container = Self::open(path)?;
        container.source = None;

        let Some(mimetype) = container.mimetype.strip_suffix(TEMPLATE_SUFFIX) else {
            return Ok(container);
        };
        let mimetype = mimetype.to_string();

        if container.has_part("manifest") {
            let manifest = Element::from_bytes(container.get_part("manifest")?)?;
            let root_entry = manifest
                .get_element(r#"//manifest:file-entry[@manifest:full-path="/"]"#)?;
            if let Some(entry) = root_entry {
                entry.set_attribute("manifest:media-type", &mimetype);
                container.set_part("manifest", manifest.to_bytes(false));
            }
        }
        container.mimetype = mimetype;
        Ok(container)
    }

    /// Package MIME type.
    pub fn mimetype(&self) -> &str {
        &self.mimetype
    }

    /// Replace the package MIME type.
    pub fn set_mimetype(&mut self, mimetype: &str) {
        self.mimetype = mimetype.to_string();
    }

    /// Path the container was opened from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Bytes of a part, by part name or package path.
    ///
    /// Fails with [`Error::PartNotFound`] carrying the requested name.
    pub fn get_part(&self, name: &str) -> Result<&[u8]> {
        let path = part_path(name);
        self.entries
            .iter()
            .find(|entry| entry.path == path)
            .map(|entry| entry.data.as_slice())
            .ok_or_else(|| Error::PartNotFound(name.to_string()))
    }

    /// Whether a part exists.
    pub fn has_part(&self, name: &str) -> bool {
        self.get_part(name).is_ok()
    }

    /// Replace a part, or append it when new.
    pub fn set_part(&mut self, name: &str, data: Vec<u8>) {
        let path = part_path(name);
        match self.entries.iter_mut().find(|entry| entry.path == path) {
            Some(entry) => entry.data = data,
            None => self.entries.push(Entry {
                path: path.to_string(),
                data,
            }),
        }
    }

    /// Remove a part, returning its bytes.
    pub fn del_part(&mut self, name: &str) -> Option<Vec<u8>> {
        let path = part_path(name);
        let index = self.entries.iter().position(|entry| entry.path == path)?;
        Some(self.entries.remove(index).data)
    }

    /// Package paths of all entries except `mimetype`, in package order.
    pub fn part_paths(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.path.as_str())
    }

    /// Persist the package.
    ///
    /// Without a destination the package is written back to the path it was
    /// opened from; a container with no such path fails with
    /// [`Error::InvalidArgument`].
    pub fn save(&self, destination: Option<&Path>, packaging: Packaging) -> Result<()> {
        let destination = destination.or(self.source.as_deref()).ok_or_else(|| {
            Error::InvalidArgument("no destination given and no source path to save to".to_string())
        })?;

        match packaging {
            Packaging::Zip => {
                let file = fs::File::create(destination)?;
                let mut writer = PackageWriter::with_writer(file, &self.mimetype)?;
                self.write_entries(&mut writer)?;
                writer.finish()?;
            },
            Packaging::Folder => self.write_folder(destination)?,
        }

        log::debug!(
            "saved {} package to {} ({} entries)",
            self.mimetype,
            destination.display(),
            self.entries.len() + 1
        );
        Ok(())
    }

    /// Render the package as ZIP bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut writer = PackageWriter::new(&self.mimetype)?;
        self.write_entries(&mut writer)?;
        writer.finish_to_bytes()
    }

    fn write_entries<W: std::io::Write + Seek>(&self, writer: &mut PackageWriter<W>) -> Result<()> {
        for entry in &self.entries {
            writer.add_file(&entry.path, &entry.data)?;
        }
        Ok(())
    }

    fn write_folder(&self, root: &Path) -> Result<()> {
        fs::create_dir_all(root)?;
        fs::write(root.join(ODF_MIMETYPE), self.mimetype.as_bytes())?;
        for entry in &self.entries {
            let target = root.join(safe_relative_path(&entry.path)?);
            if entry.is_dir() {
                fs::create_dir_all(&target)?;
                continue;
            }
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&target, &entry.data)?;
        }
        Ok(())
    }

    fn read_folder(root: &Path) -> Result<Self> {
        let mimetype = fs::read_to_string(root.join(ODF_MIMETYPE)).map_err(|_| {
            Error::InvalidFormat(format!("No mimetype file found in {}", root.display()))
        })?;

        let mut entries = Vec::new();
        collect_folder(root, "", &mut entries)?;
        entries.retain(|entry| entry.path != ODF_MIMETYPE);
        Ok(Self {
            mimetype: mimetype.trim().to_string(),
            entries,
            source: None,
        })
    }
}

/// Walk `dir` depth-first in name order, recording files and directories
/// with `/`-separated package paths.
fn collect_folder(dir: &Path, prefix: &str, entries: &mut Vec<Entry>) -> Result<()> {
    let mut children = fs::read_dir(dir)?.collect::<std::io::Result<Vec<_>>>()?;
    children.sort_by_key(|child| child.file_name());

    for child in children {
        let name = child.file_name().to_string_lossy().into_owned();
        let path = format!("{}{}", prefix, name);
        if child.file_type()?.is_dir() {
            let dir_path = format!("{}/", path);
            entries.push(Entry {
                path: dir_path.clone(),
                data: Vec::new(),
            });
            collect_folder(&child.path(), &dir_path, entries)?;
        } else {
            entries.push(Entry {
                data: fs::read(child.path())?,
                path,
            });
        }
    }
    Ok(())
}

/// Package path to a relative file-system path, refusing escapes.
fn safe_relative_path(path: &str) -> Result<PathBuf> {
    let mut out = PathBuf::new();
    for segment in path.split('/').filter(|s| !s.is_empty()) {
        if segment == ".." || segment == "." {
            return Err(Error::InvalidFormat(format!("unsafe package path: {}", path)));
        }
        out.push(segment);
    }
    Ok(out)
}
