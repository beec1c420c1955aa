//! Single source file and its derived destination.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::FilesError;
use crate::url::{encode_url_path, join_uri, normalize_path, relative_url, split_uri, to_portable};

/// Extensions of documentation (Markdown) pages.
pub const MARKDOWN_EXTENSIONS: &[&str] = &[".markdown", ".mdown", ".mkdn", ".mkd", ".md"];

/// Extensions of pages copied verbatim but served as documents.
pub const STATIC_PAGE_EXTENSIONS: &[&str] = &[".html", ".htm", ".xml", ".json"];

/// Extensions of script files.
pub const SCRIPT_EXTENSIONS: &[&str] = &[".js", ".javascript"];

/// Extensions of stylesheet files.
pub const STYLESHEET_EXTENSIONS: &[&str] = &[".css"];

/// Whether the path names a Markdown file.
pub fn is_markdown_file(path: &str) -> bool {
    has_extension(path, MARKDOWN_EXTENSIONS)
}

fn has_extension(path: &str, extensions: &[&str]) -> bool {
    extensions.iter().any(|ext| path.ends_with(ext))
}

/// Handle of a page in a navigation graph.
///
/// Stored on a [`FileRecord`] once a page has been built for it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageId(usize);

impl PageId {
    /// Wrap an arena index.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Arena index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Content category derived from a file's extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FileCategory {
    /// Markdown source rendered into HTML.
    Documentation,
    /// HTML, XML or JSON copied as-is.
    StaticPage,
    /// JavaScript asset.
    Script,
    /// CSS asset.
    Stylesheet,
    /// Any other asset.
    Media,
}

impl fmt::Display for FileCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Documentation => "page",
            Self::StaticPage => "static",
            Self::Script => "script",
            Self::Stylesheet => "stylesheet",
            Self::Media => "media",
        };
        f.write_str(label)
    }
}

/// A source file and the location it is written to.
///
/// `dest_uri` and `url` are derived from `src_uri` and the directory-URL flag
/// at construction, and only change through [`FileRecord::rederive`].
#[derive(Clone)]
pub struct FileRecord {
    src_uri: String,
    abs_src_path: PathBuf,
    name: String,
    dest_uri: String,
    abs_dest_path: PathBuf,
    url: String,
    page: Option<PageId>,
}

impl FileRecord {
    /// Build a record for `path`, relative to `src_dir`, written under `dest_dir`.
    ///
    /// When `use_directory_urls` is set, `foo.md` maps to `foo/index.html` with
    /// the URL `foo/`; otherwise to `foo.html`. Non-documentation files keep
    /// their source path.
    pub fn new(
        path: impl AsRef<Path>,
        src_dir: impl AsRef<Path>,
        dest_dir: impl AsRef<Path>,
        use_directory_urls: bool,
    ) -> Self {
        let src_uri = to_portable(path.as_ref());
        let abs_src_path = normalize_path(&src_dir.as_ref().join(&src_uri));
        let name = stem(&src_uri);
        let mut file = Self {
            src_uri,
            abs_src_path,
            name,
            dest_uri: String::new(),
            abs_dest_path: PathBuf::new(),
            url: String::new(),
            page: None,
        };
        file.rederive(dest_dir.as_ref(), use_directory_urls);
        file
    }

    /// Recompute destination path and URL, e.g. after the directory-URL flag changed.
    pub fn rederive(&mut self, dest_dir: &Path, use_directory_urls: bool) {
        self.dest_uri = self.derive_dest_uri(use_directory_urls);
        self.abs_dest_path = normalize_path(&dest_dir.join(&self.dest_uri));
        self.url = self.derive_url(use_directory_urls);
    }

    fn derive_dest_uri(&self, use_directory_urls: bool) -> String {
        if !self.is_documentation_page() {
            return self.src_uri.clone();
        }
        let (parent, _) = split_uri(&self.src_uri);
        if !use_directory_urls || self.name == "index" {
            // index.md or README.md => index.html, foo.md => foo.html
            join_uri(parent, &format!("{}.html", self.name))
        } else {
            // foo.md => foo/index.html
            join_uri(&join_uri(parent, &self.name), "index.html")
        }
    }

    fn derive_url(&self, use_directory_urls: bool) -> String {
        let url = match split_uri(&self.dest_uri) {
            ("", "index.html") if use_directory_urls => ".".to_owned(),
            (dir, "index.html") if use_directory_urls => format!("{dir}/"),
            _ => self.dest_uri.clone(),
        };
        encode_url_path(&url)
    }

    /// Source path relative to the docs directory, always `/`-separated.
    pub fn src_uri(&self) -> &str {
        &self.src_uri
    }

    /// Source path relative to the docs directory in platform form.
    pub fn src_path(&self) -> PathBuf {
        PathBuf::from_iter(self.src_uri.split('/'))
    }

    /// Absolute source path.
    pub fn abs_src_path(&self) -> &Path {
        &self.abs_src_path
    }

    /// Destination path relative to the site directory, always `/`-separated.
    pub fn dest_uri(&self) -> &str {
        &self.dest_uri
    }

    /// Destination path relative to the site directory in platform form.
    pub fn dest_path(&self) -> PathBuf {
        PathBuf::from_iter(self.dest_uri.split('/'))
    }

    /// Absolute destination path.
    pub fn abs_dest_path(&self) -> &Path {
        &self.abs_dest_path
    }

    /// Percent-encoded URL of the destination, relative to the site root.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// File stem, with `README` folded into `index`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Page attached to this file during navigation building.
    pub fn page(&self) -> Option<PageId> {
        self.page
    }

    /// Attach a page. The first attachment wins; returns `false` if a page was
    /// already attached.
    pub fn attach_page(&mut self, page: PageId) -> bool {
        if self.page.is_some() {
            return false;
        }
        self.page = Some(page);
        true
    }

    /// Forget the attached page, e.g. before rebuilding navigation from the
    /// same catalog.
    pub fn detach_page(&mut self) {
        self.page = None;
    }

    /// This file's URL relative to `other` (a URL or another file's URL).
    pub fn url_relative_to(&self, other: &str) -> String {
        relative_url(&self.url, other)
    }

    /// Whether the file is a Markdown page.
    pub fn is_documentation_page(&self) -> bool {
        is_markdown_file(&self.src_uri)
    }

    /// Whether the file is a static page (HTML, XML, JSON).
    pub fn is_static_page(&self) -> bool {
        has_extension(&self.src_uri, STATIC_PAGE_EXTENSIONS)
    }

    /// Whether the file is neither a documentation page nor a static page.
    pub fn is_media_file(&self) -> bool {
        !(self.is_documentation_page() || self.is_static_page())
    }

    /// Whether the file is a JavaScript file.
    pub fn is_javascript(&self) -> bool {
        has_extension(&self.src_uri, SCRIPT_EXTENSIONS)
    }

    /// Whether the file is a CSS file.
    pub fn is_css(&self) -> bool {
        has_extension(&self.src_uri, STYLESHEET_EXTENSIONS)
    }

    /// Most specific category of the file.
    pub fn category(&self) -> FileCategory {
        if self.is_documentation_page() {
            FileCategory::Documentation
        } else if self.is_static_page() {
            FileCategory::StaticPage
        } else if self.is_javascript() {
            FileCategory::Script
        } else if self.is_css() {
            FileCategory::Stylesheet
        } else {
            FileCategory::Media
        }
    }

    /// Whether the destination is missing or older than the source.
    pub fn is_modified(&self) -> Result<bool, FilesError> {
        if !self.abs_dest_path.is_file() {
            return Ok(true);
        }
        let dest_mtime = modified(&self.abs_dest_path)?;
        let src_mtime = modified(&self.abs_src_path)?;
        Ok(dest_mtime < src_mtime)
    }

    /// Copy the source to the destination, creating parent directories.
    ///
    /// With `dirty` set, files whose destination is up to date are skipped.
    /// Copying a file onto itself is a no-op, which lets other tools write
    /// straight into the site directory.
    pub fn copy_file(&self, dirty: bool) -> Result<(), FilesError> {
        if dirty && !self.is_modified()? {
            tracing::debug!("Skip copying unmodified file: '{}'", self.src_uri);
            return Ok(());
        }
        tracing::debug!("Copying media file: '{}'", self.src_uri);
        copy_file(&self.abs_src_path, &self.abs_dest_path)
    }
}

impl PartialEq for FileRecord {
    fn eq(&self, other: &Self) -> bool {
        self.src_uri == other.src_uri
            && self.abs_src_path == other.abs_src_path
            && self.url == other.url
    }
}

impl Eq for FileRecord {}

impl fmt::Debug for FileRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileRecord")
            .field("src_uri", &self.src_uri)
            .field("dest_uri", &self.dest_uri)
            .field("name", &self.name)
            .field("url", &self.url)
            .finish_non_exhaustive()
    }
}

/// File stem of the last path component; `index` and `README` both become `index`.
fn stem(src_uri: &str) -> String {
    let (_, filename) = split_uri(src_uri);
    let stem = Path::new(filename)
        .file_stem()
        .map_or_else(String::new, |s| s.to_string_lossy().into_owned());
    if stem == "README" {
        "index".to_owned()
    } else {
        stem
    }
}

fn modified(path: &Path) -> Result<std::time::SystemTime, FilesError> {
    fs::metadata(path)
        .and_then(|m| m.modified())
        .map_err(|e| FilesError::io(e, path))
}

/// Copy `source` to `output`, creating parent directories.
///
/// `output` may be an existing directory, in which case the file keeps its name.
fn copy_file(source: &Path, output: &Path) -> Result<(), FilesError> {
    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent).map_err(|e| FilesError::io(e, parent))?;
    }
    let output = match source.file_name() {
        Some(name) if output.is_dir() => output.join(name),
        _ => output.to_path_buf(),
    };
    if is_same_file(source, &output) {
        return Ok(());
    }
    fs::copy(source, &output).map_err(|e| FilesError::io(e, &output))?;
    Ok(())
}

fn is_same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
