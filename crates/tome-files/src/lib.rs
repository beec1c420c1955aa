//! Source file discovery and URL derivation for Tome.
//!
//! This crate provides:
//! - [`FileCatalog`]: ordered collection of discovered files with `src_uri` lookup
//! - [`FileRecord`]: one file's source and destination paths and URL
//! - [`PathCodec`]: relative-URL resolution with a memoizing cache
//! - Theme file merging via [`FileCatalog::add_from_search_path`]
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), tome_files::FilesError> {
//! use std::path::Path;
//! use tome_files::{FileCatalog, PathCodec};
//!
//! let catalog = FileCatalog::discover(
//!     Path::new("docs"),
//!     Path::new("site"),
//!     true,
//!     &[".*", "/templates"],
//! )?;
//!
//! let codec = PathCodec::new();
//! for file in catalog.documentation_pages() {
//!     println!("{} -> {}", file.src_uri(), codec.relative_url(file.url(), "guide/"));
//! }
//! # Ok(())
//! # }
//! ```

mod catalog;
mod error;
mod file;
mod scanner;
mod theme;
mod url;

pub use catalog::FileCatalog;
pub use error::FilesError;
pub use file::{
    FileCategory, FileRecord, MARKDOWN_EXTENSIONS, PageId, SCRIPT_EXTENSIONS,
    STATIC_PAGE_EXTENSIONS, STYLESHEET_EXTENSIONS, is_markdown_file,
};
pub use theme::{SearchPath, ThemeFilter, list_theme_files};
pub use url::{PathCodec, UrlKind, classify_url, encode_url_path, normalize_path, relative_url, to_portable};
