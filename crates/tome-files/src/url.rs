//! URL and path derivation helpers.
//!
//! All URLs handled here are `/`-separated path strings, not full URLs with
//! schemes. [`PathCodec`] memoizes [`relative_url`] results so renderers can
//! ask for the same page-to-page links many times per build.

use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use std::sync::{LazyLock, Mutex, PoisonError};

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use regex::Regex;

/// Characters left untouched when encoding a URL path: ASCII alphanumerics,
/// the unreserved marks `-._~` and the path separator.
const URL_PATH_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'/')
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// URL scheme prefix such as `https:` or `mailto:`.
static SCHEME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*:").unwrap());

/// Shape of a URL as written in a nav entry or a link.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UrlKind {
    /// Has a scheme (`https:`) or a network authority (`//host`).
    External,
    /// Starts with `/`.
    RootAbsolute,
    /// Starts with `#`.
    Fragment,
    /// Anything else; resolved against the current page.
    Relative,
}

/// Classify a URL string without resolving it.
pub fn classify_url(url: &str) -> UrlKind {
    let (has_scheme, rest) = match SCHEME_RE.find(url) {
        Some(scheme) => (true, &url[scheme.end()..]),
        None => (false, url),
    };
    let has_authority = rest
        .strip_prefix("//")
        .is_some_and(|r| !r.is_empty() && !r.starts_with(['/', '?', '#']));

    if has_scheme || has_authority {
        UrlKind::External
    } else if url.starts_with('/') {
        UrlKind::RootAbsolute
    } else if url.starts_with('#') {
        UrlKind::Fragment
    } else {
        UrlKind::Relative
    }
}

/// Percent-encode a `/`-separated path for use in a browser.
pub fn encode_url_path(path: &str) -> String {
    utf8_percent_encode(path, URL_PATH_ENCODE_SET).to_string()
}

/// Join two `/`-separated path fragments.
pub(crate) fn join_uri(parent: &str, child: &str) -> String {
    if parent.is_empty() {
        child.to_owned()
    } else if parent.ends_with('/') {
        format!("{parent}{child}")
    } else {
        format!("{parent}/{child}")
    }
}

/// Split a `/`-separated path into its parent and final component.
pub(crate) fn split_uri(uri: &str) -> (&str, &str) {
    uri.rsplit_once('/').unwrap_or(("", uri))
}

/// Convert a platform path into its portable `/`-separated form.
///
/// `.` components are dropped; `..` components are kept verbatim.
pub fn to_portable(path: &Path) -> String {
    let mut out = String::new();
    for component in path.components() {
        let segment = match component {
            Component::CurDir => continue,
            Component::RootDir => {
                out.push('/');
                continue;
            }
            Component::Prefix(prefix) => {
                out.push_str(&prefix.as_os_str().to_string_lossy());
                continue;
            }
            Component::ParentDir => "..".into(),
            Component::Normal(name) => name.to_string_lossy(),
        };
        if !out.is_empty() && !out.ends_with('/') {
            out.push('/');
        }
        out.push_str(&segment);
    }
    out
}

/// Lexically normalize a platform path, resolving `.` and `..` without
/// touching the filesystem.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

/// Split a URL into root-relative segments, resolving `.` and `..`.
///
/// The leading `/` is implied and `..` never climbs above the root.
fn norm_parts(path: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                parts.pop();
            }
            other => parts.push(other),
        }
    }
    parts
}

/// Return `url` relative to `other`.
///
/// Both are treated as `/`-separated paths. The last segment of `other` is
/// dropped when it contains a `.` (it names a file); otherwise `other` is
/// already a directory. A trailing `/` on `url` is kept.
///
/// ```
/// use tome_files::relative_url;
///
/// assert_eq!(relative_url("a/b/", "a/c/d.html"), "../b/");
/// assert_eq!(relative_url("img/logo.png", "guide/"), "../img/logo.png");
/// assert_eq!(relative_url("guide/", "guide/index.html"), "./");
/// ```
pub fn relative_url(url: &str, other: &str) -> String {
    let other_dir = match split_uri(other) {
        (dir, name) if name.contains('.') => dir,
        _ => other,
    };

    let other_parts = norm_parts(other_dir);
    let dest_parts = norm_parts(url);
    let common = other_parts
        .iter()
        .zip(&dest_parts)
        .take_while(|(a, b)| a == b)
        .count();

    let mut rel_parts = vec![".."; other_parts.len() - common];
    rel_parts.extend_from_slice(&dest_parts[common..]);

    let mut rel = rel_parts.join("/");
    if rel.is_empty() {
        rel.push('.');
    }
    if url.ends_with('/') {
        rel.push('/');
    }
    rel
}

/// Relative-URL resolver with a memoizing cache.
///
/// Results are pure functions of their inputs, so one codec can be shared by
/// every page rendered during a build.
#[derive(Debug, Default)]
pub struct PathCodec {
    relative: Mutex<HashMap<(String, String), String>>,
}

impl PathCodec {
    /// Create a codec with an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached [`relative_url`].
    pub fn relative_url(&self, url: &str, other: &str) -> String {
        let key = (url.to_owned(), other.to_owned());
        let mut cache = self.relative.lock().unwrap_or_else(PoisonError::into_inner);
        cache
            .entry(key)
            .or_insert_with(|| relative_url(url, other))
            .clone()
    }

    /// Number of memoized `(url, other)` pairs.
    pub fn cached_len(&self) -> usize {
        self.relative
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Drop all memoized results.
    pub fn clear(&self) {
        self.relative
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Resolve a link written in content or a theme.
    ///
    /// External, root-absolute and fragment URLs are returned unchanged.
    /// Other paths are made relative to `page_url` when given, or joined onto
    /// `base` otherwise.
    pub fn normalize_url(&self, path: &str, page_url: Option<&str>, base: &str) -> String {
        let path = portable_url(path);
        match classify_url(&path) {
            UrlKind::External | UrlKind::RootAbsolute | UrlKind::Fragment => path,
            UrlKind::Relative => match page_url {
                Some(page_url) => self.relative_url(&path, page_url),
                None => join_uri(base, &path),
            },
        }
    }
}

/// Empty paths point at the current directory; platform separators are
/// rewritten with a warning.
fn portable_url(path: &str) -> String {
    if path.is_empty() {
        return ".".to_owned();
    }
    let sep = std::path::MAIN_SEPARATOR;
    if sep != '/' && path.contains(sep) {
        tracing::warn!(
            "Path '{path}' uses OS-specific separator '{sep}', \
             change it to '/' so it is recognized on other systems."
        );
        return path.replace(sep, "/");
    }
    path.to_owned()
}
