//! Source discovery by filesystem walking.
//!
//! The walk follows symlinks, prunes excluded directories before descending
//! and yields files in a stable order: within each directory the index page
//! comes first, then the remaining files by name, then each subdirectory by
//! name.

use std::fs;
use std::path::{Path, PathBuf};

use crate::catalog::FileCatalog;
use crate::error::FilesError;
use crate::file::FileRecord;
use crate::url::join_uri;

/// One git-ignore style exclude rule.
///
/// A trailing `/` restricts the rule to directories. A leading `/` matches
/// against the path relative to the docs root instead of the basename.
#[derive(Debug, Clone)]
pub(crate) struct ExcludePattern {
    pattern: glob::Pattern,
    dir_only: bool,
    full_path: bool,
}

impl ExcludePattern {
    pub fn new(raw: &str) -> Result<Self, FilesError> {
        let pattern = glob::Pattern::new(raw.trim_matches('/')).map_err(|source| {
            FilesError::Pattern {
                pattern: raw.to_owned(),
                source,
            }
        })?;
        Ok(Self {
            pattern,
            dir_only: raw.ends_with('/'),
            full_path: raw.starts_with('/'),
        })
    }

    pub fn matches(&self, basename: &str, path: &str, is_dir: bool) -> bool {
        if self.dir_only && !is_dir {
            return false;
        }
        let subject = if self.full_path { path } else { basename };
        self.pattern.matches(subject)
    }
}

/// Walks a docs directory and returns `src_uri`s in discovery order.
pub(crate) struct Scanner {
    root: PathBuf,
    excludes: Vec<ExcludePattern>,
}

impl Scanner {
    /// Create a scanner; fails if an exclude pattern does not compile.
    pub fn new(root: &Path, exclude: &[impl AsRef<str>]) -> Result<Self, FilesError> {
        let excludes = exclude
            .iter()
            .map(|raw| ExcludePattern::new(raw.as_ref()))
            .collect::<Result<_, _>>()?;
        Ok(Self {
            root: root.to_path_buf(),
            excludes,
        })
    }

    fn is_excluded(&self, basename: &str, path: &str, is_dir: bool) -> bool {
        self.excludes
            .iter()
            .any(|p| p.matches(basename, path, is_dir))
    }

    /// Walk the tree. The root must exist.
    pub fn scan(&self) -> Result<Vec<String>, FilesError> {
        let mut found = Vec::new();
        let mut ancestors = Vec::new();
        self.scan_directory(&self.root, "", &mut ancestors, &mut found)?;
        Ok(found)
    }

    fn scan_directory(
        &self,
        dir_path: &Path,
        rel_dir: &str,
        ancestors: &mut Vec<PathBuf>,
        found: &mut Vec<String>,
    ) -> Result<(), FilesError> {
        let canonical = fs::canonicalize(dir_path).map_err(|e| FilesError::io(e, dir_path))?;
        if ancestors.contains(&canonical) {
            tracing::warn!(
                "Skipping '{}': symlink loop back to '{}'",
                dir_path.display(),
                canonical.display()
            );
            return Ok(());
        }

        let entries = fs::read_dir(dir_path).map_err(|e| FilesError::io(e, dir_path))?;

        let mut dirs = Vec::new();
        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| FilesError::io(e, dir_path))?;
            let path = entry.path();
            // Follows symlinks; a dangling link is an error.
            let metadata = fs::metadata(&path).map_err(|e| FilesError::io(e, &path))?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if metadata.is_dir() {
                dirs.push(name);
            } else {
                files.push(name);
            }
        }

        let has_index = files.iter().any(|f| f == "index.md");
        files.sort_by(|a, b| sort_key(a).cmp(&sort_key(b)));
        for name in files {
            let path = join_uri(rel_dir, &name);
            if self.is_excluded(&name, &path, false) {
                continue;
            }
            if name == "README.md" && has_index {
                tracing::warn!(
                    "Both index.md and README.md found. Skipping README.md from '{}'",
                    dir_path.display()
                );
                continue;
            }
            found.push(path);
        }

        dirs.retain(|name| !self.is_excluded(name, &join_uri(rel_dir, name), true));
        dirs.sort();

        ancestors.push(canonical);
        for name in dirs {
            self.scan_directory(&dir_path.join(&name), &join_uri(rel_dir, &name), ancestors, found)?;
        }
        ancestors.pop();
        Ok(())
    }
}

/// Index and README files sort before everything else.
fn sort_key(name: &str) -> (bool, &str) {
    let stem = Path::new(name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(name);
    (!matches!(stem, "index" | "README"), name)
}

impl FileCatalog {
    /// Walk `docs_dir` and build a catalog of every file not matched by `exclude`.
    ///
    /// I/O failures abort discovery. Exclude rules are git-ignore style: a
    /// trailing `/` matches directories only, a leading `/` matches the path
    /// from the docs root, anything else matches the basename.
    pub fn discover(
        docs_dir: &Path,
        site_dir: &Path,
        use_directory_urls: bool,
        exclude: &[impl AsRef<str>],
    ) -> Result<Self, FilesError> {
        let scanner = Scanner::new(docs_dir, exclude)?;
        let src_uris = scanner.scan()?;
        tracing::debug!(
            "Discovered {} files in '{}'",
            src_uris.len(),
            docs_dir.display()
        );
        Ok(src_uris
            .into_iter()
            .map(|uri| FileRecord::new(uri, docs_dir, site_dir, use_directory_urls))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

    const DEFAULT_EXCLUDE: [&str; 2] = [".*", "/templates"];

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, rel).unwrap();
    }

    fn scan(root: &Path, exclude: &[&str]) -> Vec<String> {
        Scanner::new(root, exclude).unwrap().scan().unwrap()
    }

    #[test]
    fn test_exclude_pattern_basename() {
        let pattern = ExcludePattern::new(".*").unwrap();

        assert!(pattern.matches(".git", ".git", true));
        assert!(pattern.matches(".hidden.md", "guide/.hidden.md", false));
        assert!(!pattern.matches("guide", "guide", true));
    }

    #[test]
    fn test_exclude_pattern_full_path() {
        let pattern = ExcludePattern::new("/templates").unwrap();

        assert!(pattern.matches("templates", "templates", true));
        assert!(!pattern.matches("templates", "guide/templates", true));
    }

    #[test]
    fn test_exclude_pattern_dir_only() {
        let pattern = ExcludePattern::new("build/").unwrap();

        assert!(pattern.matches("build", "build", true));
        assert!(!pattern.matches("build", "build", false));
    }

    #[test]
    fn test_exclude_pattern_invalid() {
        let err = ExcludePattern::new("[abc").unwrap_err();
        assert!(matches!(err, FilesError::Pattern { ref pattern, .. } if pattern == "[abc"));
    }

    #[test]
    fn test_scan_order() {
        let temp = tempfile::tempdir().unwrap();
        for rel in [
            "zeta.md",
            "alpha.md",
            "index.md",
            "b/index.md",
            "b/a.md",
            "a/z.png",
            "a/README.md",
        ] {
            touch(temp.path(), rel);
        }

        assert_eq!(
            scan(temp.path(), &DEFAULT_EXCLUDE),
            vec![
                "index.md",
                "alpha.md",
                "zeta.md",
                "a/README.md",
                "a/z.png",
                "b/index.md",
                "b/a.md",
            ]
        );
    }

    #[test]
    fn test_scan_default_exclude() {
        let temp = tempfile::tempdir().unwrap();
        for rel in [
            "index.md",
            ".hidden.md",
            ".git/config",
            "templates/base.html",
            "guide/templates/snippet.md",
        ] {
            touch(temp.path(), rel);
        }

        assert_eq!(
            scan(temp.path(), &DEFAULT_EXCLUDE),
            vec!["index.md", "guide/templates/snippet.md"]
        );
    }

    #[test]
    fn test_scan_readme_dropped_when_index_exists() {
        let temp = tempfile::tempdir().unwrap();
        for rel in ["index.md", "README.md", "guide/README.md"] {
            touch(temp.path(), rel);
        }

        assert_eq!(scan(temp.path(), &[]), vec!["index.md", "guide/README.md"]);
    }

    #[test]
    fn test_scan_duplicate_index_warns_once() {
        #[derive(Clone, Default)]
        struct WarnCount(Arc<AtomicUsize>);

        impl<S: tracing::Subscriber> Layer<S> for WarnCount {
            fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
                if *event.metadata().level() == tracing::Level::WARN {
                    self.0.fetch_add(1, Ordering::Relaxed);
                }
            }
        }

        let temp = tempfile::tempdir().unwrap();
        for rel in ["index.md", "README.md", "guide/README.md", "guide/a.md"] {
            touch(temp.path(), rel);
        }
        let count = WarnCount::default();
        let subscriber = tracing_subscriber::registry().with(count.clone());

        let found = tracing::subscriber::with_default(subscriber, || scan(temp.path(), &[]));

        assert_eq!(found, vec!["index.md", "guide/README.md", "guide/a.md"]);
        assert_eq!(count.0.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_scan_missing_root_is_error() {
        let temp = tempfile::tempdir().unwrap();
        let scanner = Scanner::new(&temp.path().join("missing"), &[] as &[&str]).unwrap();

        let err = scanner.scan().unwrap_err();
        assert_eq!(err.io_kind(), Some(std::io::ErrorKind::NotFound));
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_follows_symlinked_dirs_and_skips_loops() {
        let temp = tempfile::tempdir().unwrap();
        touch(temp.path(), "index.md");
        touch(temp.path(), "shared/page.md");
        std::os::unix::fs::symlink(temp.path().join("shared"), temp.path().join("linked")).unwrap();
        std::os::unix::fs::symlink(temp.path(), temp.path().join("shared/loop")).unwrap();

        assert_eq!(
            scan(temp.path(), &[]),
            vec!["index.md", "linked/page.md", "shared/page.md"]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_dangling_symlink_is_error() {
        let temp = tempfile::tempdir().unwrap();
        touch(temp.path(), "index.md");
        std::os::unix::fs::symlink(temp.path().join("nowhere.md"), temp.path().join("dead.md"))
            .unwrap();

        let err = Scanner::new(temp.path(), &[] as &[&str]).unwrap().scan().unwrap_err();
        assert_eq!(err.io_kind(), Some(std::io::ErrorKind::NotFound));
    }

    #[test]
    fn test_discover_builds_records() {
        let temp = tempfile::tempdir().unwrap();
        let docs = temp.path().join("docs");
        let site = temp.path().join("site");
        for rel in ["index.md", "guide/install.md", "img/logo.png"] {
            touch(&docs, rel);
        }

        let catalog = FileCatalog::discover(&docs, &site, true, &DEFAULT_EXCLUDE).unwrap();

        let urls: Vec<_> = catalog.iter().map(|f| (f.src_uri(), f.url())).collect();
        assert_eq!(
            urls,
            vec![
                ("index.md", "."),
                ("guide/install.md", "guide/install/"),
                ("img/logo.png", "img/logo.png"),
            ]
        );
        assert_eq!(
            catalog.get("guide/install.md").unwrap().abs_dest_path(),
            site.join("guide/install/index.html")
        );
    }
}
