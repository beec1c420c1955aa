//! Navigation building from a nav specification and a file catalog.

use std::path::Path;

use tome_config::{Config, NavSpec};
use tome_files::{FileCatalog, UrlKind, classify_url, normalize_path, to_portable};

use crate::error::NavError;
use crate::infer::infer_nav;
use crate::navigation::{NavItem, Navigation};
use crate::page::{DefaultPageFactory, PageFactory};

/// Builds a [`Navigation`] for a catalog.
///
/// The nav specification comes from `docs.nav` unless overridden with
/// [`NavigationBuilder::with_spec`]; without either, one is inferred from the
/// documentation files in the catalog.
pub struct NavigationBuilder<'a> {
    config: &'a Config,
    spec: Option<&'a NavSpec>,
    factory: &'a dyn PageFactory,
}

impl<'a> NavigationBuilder<'a> {
    /// Create a builder that makes plain pages.
    pub fn new(config: &'a Config) -> Self {
        Self {
            config,
            spec: config.docs_resolved.nav.as_ref(),
            factory: &DefaultPageFactory,
        }
    }

    /// Use `factory` to create pages.
    #[must_use]
    pub fn with_page_factory(mut self, factory: &'a dyn PageFactory) -> Self {
        self.factory = factory;
        self
    }

    /// Use `spec` instead of the configured nav.
    #[must_use]
    pub fn with_spec(mut self, spec: &'a NavSpec) -> Self {
        self.spec = Some(spec);
        self
    }

    /// Nav specification the build will use, inferring one when none is set.
    pub fn effective_spec(&self, catalog: &FileCatalog) -> NavSpec {
        match self.spec {
            Some(spec) => spec.clone(),
            None => infer_nav(catalog.documentation_pages().map(|f| f.src_uri())),
        }
    }

    /// Build the navigation and attach a page to every documentation file.
    ///
    /// Pages attached by an earlier build of the same catalog are discarded.
    ///
    /// # Errors
    ///
    /// Returns [`NavError`] when the specification contains a list entry that
    /// cannot be interpreted; no pages stay attached in that case.
    pub fn build(&self, catalog: &mut FileCatalog) -> Result<Navigation, NavError> {
        for file in catalog.iter_mut() {
            file.detach_page();
        }

        let spec = self.effective_spec(catalog);
        let mut nav = Navigation::default();
        let items = match self.convert(&spec, catalog, &mut nav, "nav") {
            Ok(items) => items,
            Err(err) => {
                for file in catalog.iter_mut() {
                    file.detach_page();
                }
                return Err(err);
            }
        };
        nav.set_items(items);

        let reachable: Vec<_> = nav
            .walk()
            .filter_map(|item| match item {
                NavItem::Page(id) => Some(id),
                _ => None,
            })
            .collect();
        for id in reachable {
            nav.push_reading_order(id);
        }

        nav.assign_parents();
        self.add_orphan_pages(catalog, &mut nav);
        nav.assign_previous_next();
        check_links(&nav);

        Ok(nav)
    }

    /// Convert one specification value into items.
    fn convert(
        &self,
        spec: &NavSpec,
        catalog: &mut FileCatalog,
        nav: &mut Navigation,
        location: &str,
    ) -> Result<Vec<NavItem>, NavError> {
        match spec {
            NavSpec::Path(path) => Ok(vec![self.leaf(None, path, catalog, nav)]),
            NavSpec::Map(entries) => entries
                .iter()
                .map(|(title, value)| self.convert_entry(title, value, catalog, nav, location))
                .collect(),
            NavSpec::List(items) => {
                let mut converted = Vec::with_capacity(items.len());
                for (index, item) in items.iter().enumerate() {
                    let location = format!("{location} > [{index}]");
                    let item = match item {
                        NavSpec::Path(path) => self.leaf(None, path, catalog, nav),
                        NavSpec::Map(entries) => match entries.as_slice() {
                            [(title, value)] => {
                                self.convert_entry(title, value, catalog, nav, &location)?
                            }
                            _ => {
                                return Err(NavError::AmbiguousEntry {
                                    location,
                                    keys: entries.iter().map(|(k, _)| k.clone()).collect(),
                                });
                            }
                        },
                        NavSpec::List(_) => {
                            return Err(NavError::InvalidEntry {
                                location,
                                reason: "a list cannot directly contain another list; \
                                         give it a title to make a section"
                                    .to_owned(),
                            });
                        }
                    };
                    converted.push(item);
                }
                Ok(converted)
            }
        }
    }

    /// A titled mapping entry: a leaf when the value is a path, else a section.
    fn convert_entry(
        &self,
        title: &str,
        value: &NavSpec,
        catalog: &mut FileCatalog,
        nav: &mut Navigation,
        location: &str,
    ) -> Result<NavItem, NavError> {
        if let NavSpec::Path(path) = value {
            return Ok(self.leaf(Some(title.to_owned()), path, catalog, nav));
        }
        let location = format!("{location} > {title}");
        let children = self.convert(value, catalog, nav, &location)?;
        Ok(NavItem::Section(nav.push_section(title.to_owned(), children)))
    }

    /// Resolve a path against the catalog: a page when found, a link otherwise.
    fn leaf(
        &self,
        title: Option<String>,
        path: &str,
        catalog: &mut FileCatalog,
        nav: &mut Navigation,
    ) -> NavItem {
        let src_uri = to_portable(&normalize_path(Path::new(path)));
        let Some(file) = catalog.get_mut(&src_uri) else {
            return NavItem::Link(nav.push_link(title, path.to_owned()));
        };
        let id = nav.push_page(self.factory.create_page(title, file, self.config));
        if !file.attach_page(id) {
            tracing::debug!("'{src_uri}' appears more than once in the nav; keeping the first page");
        }
        NavItem::Page(id)
    }

    /// Create pages for documentation files the nav does not mention.
    fn add_orphan_pages(&self, catalog: &mut FileCatalog, nav: &mut Navigation) {
        let mut orphans = Vec::new();
        for file in catalog.iter_mut() {
            if !file.is_documentation_page() || file.page().is_some() {
                continue;
            }
            let id = nav.push_page(self.factory.create_page(None, file, self.config));
            file.attach_page(id);
            nav.push_reading_order(id);
            orphans.push(file.src_uri().to_owned());
        }

        if !orphans.is_empty() {
            tracing::info!(
                "The following pages exist in the docs directory, but are not included in the \
                 \"nav\" configuration:\n  - {}",
                orphans.join("\n  - ")
            );
        }
    }
}

/// Report links that look like they were meant to be documents.
fn check_links(nav: &Navigation) {
    for id in nav.links() {
        let url = nav.link(id).url();
        match classify_url(url) {
            UrlKind::External => {
                tracing::debug!("An external link to '{url}' is included in the nav.");
            }
            UrlKind::RootAbsolute => {
                tracing::debug!(
                    "An absolute path to '{url}' is included in the nav, \
                     which presumably points to an external resource."
                );
            }
            UrlKind::Fragment | UrlKind::Relative => {
                tracing::warn!(
                    "A relative path to '{url}' is included in the nav, \
                     which is not found in the documentation files."
                );
            }
        }
    }
}
