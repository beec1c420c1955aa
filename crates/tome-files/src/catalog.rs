//! Ordered collection of discovered files.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::error::FilesError;
use crate::file::FileRecord;

/// All files of a build, in discovery order.
///
/// Lookups by `src_uri` go through an index that is built on first use and
/// dropped whenever the collection changes. A catalog never holds two records
/// with the same `src_uri`.
#[derive(Debug, Default, Clone)]
pub struct FileCatalog {
    files: Vec<FileRecord>,
    src_uris: OnceLock<HashMap<String, usize>>,
}

impl FileCatalog {
    /// Create a catalog from records, keeping the first record of each `src_uri`.
    #[must_use]
    pub fn new(files: impl IntoIterator<Item = FileRecord>) -> Self {
        let mut catalog = Self::default();
        for file in files {
            catalog.append(file);
        }
        catalog
    }

    /// Iterate over records in order.
    pub fn iter(&self) -> std::slice::Iter<'_, FileRecord> {
        self.files.iter()
    }

    /// Iterate mutably over records in order.
    ///
    /// Records expose no way to change their `src_uri`, so the index stays valid.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, FileRecord> {
        self.files.iter_mut()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// `src_uri` → position index, built lazily.
    pub fn src_uris(&self) -> &HashMap<String, usize> {
        self.src_uris.get_or_init(|| {
            self.files
                .iter()
                .enumerate()
                .map(|(i, f)| (f.src_uri().to_owned(), i))
                .collect()
        })
    }

    /// Whether a record with this `src_uri` exists.
    pub fn contains(&self, src_uri: &str) -> bool {
        self.src_uris().contains_key(src_uri)
    }

    /// Look up a record by `src_uri`.
    pub fn get(&self, src_uri: &str) -> Option<&FileRecord> {
        let index = *self.src_uris().get(src_uri)?;
        self.files.get(index)
    }

    /// Look up a record by `src_uri` for modification.
    pub fn get_mut(&mut self, src_uri: &str) -> Option<&mut FileRecord> {
        let index = *self.src_uris().get(src_uri)?;
        self.files.get_mut(index)
    }

    /// Add a record at the end.
    ///
    /// Returns `false` and leaves the catalog unchanged when a record with the
    /// same `src_uri` is already present.
    pub fn append(&mut self, file: FileRecord) -> bool {
        if self.contains(file.src_uri()) {
            tracing::debug!("Ignoring duplicate file: '{}'", file.src_uri());
            return false;
        }
        self.files.push(file);
        self.src_uris.take();
        true
    }

    /// Remove and return the record with this `src_uri`.
    pub fn remove(&mut self, src_uri: &str) -> Option<FileRecord> {
        let index = *self.src_uris().get(src_uri)?;
        let file = self.files.remove(index);
        self.src_uris.take();
        Some(file)
    }

    /// Markdown pages.
    pub fn documentation_pages(&self) -> impl Iterator<Item = &FileRecord> {
        self.files.iter().filter(|f| f.is_documentation_page())
    }

    /// HTML, XML and JSON pages.
    pub fn static_pages(&self) -> impl Iterator<Item = &FileRecord> {
        self.files.iter().filter(|f| f.is_static_page())
    }

    /// Everything that is not a page.
    pub fn media_files(&self) -> impl Iterator<Item = &FileRecord> {
        self.files.iter().filter(|f| f.is_media_file())
    }

    /// JavaScript files.
    pub fn javascript_files(&self) -> impl Iterator<Item = &FileRecord> {
        self.files.iter().filter(|f| f.is_javascript())
    }

    /// CSS files.
    pub fn css_files(&self) -> impl Iterator<Item = &FileRecord> {
        self.files.iter().filter(|f| f.is_css())
    }

    /// Copy every non-Markdown file to its destination.
    ///
    /// Returns the number of files visited; with `dirty` set, up-to-date
    /// destinations are counted but not rewritten.
    pub fn copy_static_files(&self, dirty: bool) -> Result<usize, FilesError> {
        let mut count = 0;
        for file in self.files.iter().filter(|f| !f.is_documentation_page()) {
            file.copy_file(dirty)?;
            count += 1;
        }
        Ok(count)
    }
}

impl<'a> IntoIterator for &'a FileCatalog {
    type Item = &'a FileRecord;
    type IntoIter = std::slice::Iter<'a, FileRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for FileCatalog {
    type Item = FileRecord;
    type IntoIter = std::vec::IntoIter<FileRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.into_iter()
    }
}

impl FromIterator<FileRecord> for FileCatalog {
    fn from_iter<I: IntoIterator<Item = FileRecord>>(iter: I) -> Self {
        Self::new(iter)
    }
}
