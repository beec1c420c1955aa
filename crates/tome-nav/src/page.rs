//! Pages and the factory that creates them.

use std::fmt;
use std::path::Path;

use tome_config::Config;
use tome_files::{FileRecord, PageId};

use crate::infer::dirname_to_title;
use crate::navigation::SectionId;

/// A navigation leaf bound to a documentation file.
///
/// Links between pages (`parent`, `previous_page`, `next_page`) are assigned
/// by the navigation builder and read-only afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page {
    title: Option<String>,
    src_uri: String,
    url: String,
    title_stem: String,
    is_index: bool,
    pub(crate) parent: Option<SectionId>,
    pub(crate) previous_page: Option<PageId>,
    pub(crate) next_page: Option<PageId>,
    pub(crate) active: bool,
}

impl Page {
    /// Create a page for `file`. `title` is the explicit nav title, if any.
    pub fn new(title: Option<String>, file: &FileRecord) -> Self {
        Self {
            title,
            src_uri: file.src_uri().to_owned(),
            url: file.url().to_owned(),
            title_stem: title_stem(file),
            is_index: file.name() == "index",
            parent: None,
            previous_page: None,
            next_page: None,
            active: false,
        }
    }

    /// Title given in the nav specification.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Override the title, e.g. with one read from the document.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    /// Title to show: the explicit one, `Home` for the homepage, otherwise
    /// derived from the file name (or the enclosing directory for index pages,
    /// which for the root index is the docs directory itself).
    pub fn display_title(&self) -> String {
        if let Some(title) = &self.title {
            return title.clone();
        }
        if self.is_homepage() {
            return "Home".to_owned();
        }
        dirname_to_title(&self.title_stem)
    }

    /// `src_uri` of the file this page renders.
    pub fn src_uri(&self) -> &str {
        &self.src_uri
    }

    /// URL of the page relative to the site root.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Whether the page is an `index`/`README` file.
    pub fn is_index(&self) -> bool {
        self.is_index
    }

    /// Whether the page is top-level and renders the site root index.
    pub fn is_homepage(&self) -> bool {
        self.parent.is_none() && self.is_index && matches!(self.url.as_str(), "." | "./" | "index.html")
    }

    /// Enclosing section; `None` at the top level and for pages absent from the nav.
    pub fn parent(&self) -> Option<SectionId> {
        self.parent
    }

    /// Previous page in reading order.
    pub fn previous_page(&self) -> Option<PageId> {
        self.previous_page
    }

    /// Next page in reading order.
    pub fn next_page(&self) -> Option<PageId> {
        self.next_page
    }

    /// Whether this is the page currently being rendered.
    pub fn active(&self) -> bool {
        self.active
    }
}

/// Name a title is derived from: the enclosing directory of index pages,
/// the file stem otherwise.
fn title_stem(file: &FileRecord) -> String {
    let dir = file.abs_src_path().parent().and_then(Path::file_name);
    match dir {
        Some(dir) if file.name() == "index" => dir.to_string_lossy().into_owned(),
        _ => file.name().to_owned(),
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.title {
            Some(title) => write!(f, "Page(title='{title}', url='{}')", self.url),
            None => write!(f, "Page(title=[blank], url='{}')", self.url),
        }
    }
}

/// Creates pages for files reached by the navigation builder.
///
/// The builder attaches the returned page to `file` after the call.
pub trait PageFactory {
    /// Create the page for `file` with the nav `title`, if one was given.
    fn create_page(&self, title: Option<String>, file: &FileRecord, config: &Config) -> Page;
}

/// Factory producing plain [`Page`]s.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultPageFactory;

impl PageFactory for DefaultPageFactory {
    fn create_page(&self, title: Option<String>, file: &FileRecord, _config: &Config) -> Page {
        Page::new(title, file)
    }
}

impl<F> PageFactory for F
where
    F: Fn(Option<String>, &FileRecord, &Config) -> Page,
{
    fn create_page(&self, title: Option<String>, file: &FileRecord, config: &Config) -> Page {
        self(title, file, config)
    }
}
