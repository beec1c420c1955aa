//! Static files contributed by theme directories.
//!
//! Theme files never override files from the docs directory. When several
//! theme directories provide the same path, the first one wins.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::catalog::FileCatalog;
use crate::error::FilesError;
use crate::file::{FileRecord, MARKDOWN_EXTENSIONS};
use crate::url::join_uri;

/// Patterns of theme paths that are never published.
///
/// `.*` catches dotfiles at the top level; `*/.*` catches them below it.
const THEME_IGNORE: &[&str] = &[
    ".*",
    "*/.*",
    "*.py",
    "*.pyc",
    "*.html",
    "*readme*",
    "tome_theme.toml",
    "locales/*",
];

/// Decides which theme paths become catalog entries.
#[derive(Debug, Clone)]
pub struct ThemeFilter {
    patterns: Vec<glob::Pattern>,
}

impl ThemeFilter {
    /// Build the filter from the built-in rules plus configured static templates.
    pub fn new(static_templates: &[impl AsRef<str>]) -> Result<Self, FilesError> {
        let markdown = MARKDOWN_EXTENSIONS.iter().map(|ext| format!("*{ext}"));
        let templates = static_templates.iter().map(|t| t.as_ref().to_owned());
        let patterns = THEME_IGNORE
            .iter()
            .map(|&p| p.to_owned())
            .chain(markdown)
            .chain(templates)
            .map(|pattern| {
                glob::Pattern::new(&pattern)
                    .map_err(|source| FilesError::Pattern { pattern, source })
            })
            .collect::<Result<_, _>>()?;
        Ok(Self { patterns })
    }

    /// Whether `path` (relative to a theme dir) should be published.
    ///
    /// Matching is case-insensitive and `*` crosses directory separators.
    pub fn accepts(&self, path: &str) -> bool {
        let name = path.to_lowercase();
        !self.patterns.iter().any(|p| p.matches(&name))
    }
}

/// Theme directories and the destination of the files they contribute.
#[derive(Debug, Clone)]
pub struct SearchPath {
    /// Theme directories in priority order.
    pub dirs: Vec<PathBuf>,
    /// Site output directory.
    pub site_dir: PathBuf,
    /// Directory-style URL flag of the build.
    pub use_directory_urls: bool,
    /// Templates rendered by the theme rather than copied.
    pub static_templates: Vec<String>,
}

impl SearchPath {
    /// Create a search path with no static templates.
    pub fn new(dirs: Vec<PathBuf>, site_dir: impl Into<PathBuf>, use_directory_urls: bool) -> Self {
        Self {
            dirs,
            site_dir: site_dir.into(),
            use_directory_urls,
            static_templates: Vec::new(),
        }
    }

    /// Set templates that are excluded from copying.
    #[must_use]
    pub fn with_static_templates(mut self, templates: Vec<String>) -> Self {
        self.static_templates = templates;
        self
    }

    /// First directory that physically contains `path`.
    fn locate(&self, path: &str) -> Option<&Path> {
        self.dirs
            .iter()
            .map(PathBuf::as_path)
            .find(|dir| dir.join(path).is_file())
    }
}

/// List every file under the theme directories as sorted, unique `/`-separated
/// paths. Missing directories are skipped.
pub fn list_theme_files(dirs: &[PathBuf]) -> Result<Vec<String>, FilesError> {
    let mut found = BTreeSet::new();
    for dir in dirs {
        if !dir.is_dir() {
            tracing::debug!("Theme directory not found: '{}'", dir.display());
            continue;
        }
        walk(dir, "", &mut found)?;
    }
    Ok(found.into_iter().collect())
}

fn walk(dir: &Path, rel_dir: &str, found: &mut BTreeSet<String>) -> Result<(), FilesError> {
    let entries = fs::read_dir(dir).map_err(|e| FilesError::io(e, dir))?;
    for entry in entries {
        let entry = entry.map_err(|e| FilesError::io(e, dir))?;
        let file_type = entry.file_type().map_err(|e| FilesError::io(e, entry.path()))?;
        let name = entry.file_name().to_string_lossy().into_owned();
        let rel = join_uri(rel_dir, &name);
        if file_type.is_dir() {
            walk(&entry.path(), &rel, found)?;
        } else if entry.path().is_file() {
            found.insert(rel);
        }
    }
    Ok(())
}

impl FileCatalog {
    /// Append theme files that pass the [`ThemeFilter`] and are not already
    /// in the catalog. Each record is rooted at the first theme directory that
    /// contains the path. Returns the number of files added.
    pub fn add_from_search_path<I>(&mut self, candidates: I, search: &SearchPath) -> Result<usize, FilesError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let filter = ThemeFilter::new(search.static_templates.as_slice())?;
        let mut added = 0;
        for candidate in candidates {
            let path = candidate.as_ref().replace('\\', "/");
            if !filter.accepts(&path) || self.contains(&path) {
                continue;
            }
            let Some(dir) = search.locate(&path) else {
                continue;
            };
            let file = FileRecord::new(&path, dir, &search.site_dir, search.use_directory_urls);
            if self.append(file) {
                added += 1;
            }
        }
        Ok(added)
    }
}
