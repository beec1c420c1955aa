//! Navigation graph.
//!
//! # Architecture
//!
//! Pages, sections and links live in flat arenas owned by [`Navigation`] and
//! refer to each other through typed indices. Sections own their children
//! (a list of [`NavItem`] handles); `parent` fields are plain lookups back up
//! the tree. This gives:
//! - O(1) access to any node from a handle
//! - O(d) ancestor walks where d is the nesting depth
//! - no reference cycles between parents and children

use std::fmt;

use serde::Serialize;
use tome_files::PageId;

use crate::page::Page;

/// Handle of a section in a [`Navigation`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SectionId(usize);

impl SectionId {
    pub(crate) const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Arena index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Handle of a link in a [`Navigation`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LinkId(usize);

impl LinkId {
    /// Arena index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// One node of the navigation tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NavItem {
    /// Leaf bound to a documentation file.
    Page(PageId),
    /// Titled group of child items.
    Section(SectionId),
    /// Leaf pointing at an arbitrary URL.
    Link(LinkId),
}

/// Titled group of navigation items.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Section {
    title: String,
    children: Vec<NavItem>,
    parent: Option<SectionId>,
    active: bool,
}

impl Section {
    /// Section title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Child items in nav order.
    pub fn children(&self) -> &[NavItem] {
        &self.children
    }

    /// Enclosing section; `None` at the top level.
    pub fn parent(&self) -> Option<SectionId> {
        self.parent
    }

    /// Whether the current page is somewhere below this section.
    pub fn active(&self) -> bool {
        self.active
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Section(title='{}')", self.title)
    }
}

/// Navigation entry that did not resolve to a documentation file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Link {
    title: Option<String>,
    url: String,
    parent: Option<SectionId>,
}

impl Link {
    /// Title given in the nav specification.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// URL exactly as written.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Enclosing section; `None` at the top level.
    pub fn parent(&self) -> Option<SectionId> {
        self.parent
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.title {
            Some(title) => write!(f, "Link(title='{title}', url='{}')", self.url),
            None => write!(f, "Link(title=[blank], url='{}')", self.url),
        }
    }
}

/// Navigation of a site: a tree of items plus every page in reading order.
///
/// `pages()` lists the pages reached from the tree depth-first, followed by
/// pages for documentation files the nav does not mention. The latter have
/// no parent and are not reachable through `items()`.
#[derive(Clone, Debug, Default)]
pub struct Navigation {
    items: Vec<NavItem>,
    pages: Vec<PageId>,
    page_arena: Vec<Page>,
    sections: Vec<Section>,
    links: Vec<Link>,
}

impl Navigation {
    /// Top-level items.
    pub fn items(&self) -> &[NavItem] {
        &self.items
    }

    /// Every page in reading order.
    pub fn pages(&self) -> &[PageId] {
        &self.pages
    }

    /// Number of top-level items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether there are no top-level items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Page by handle.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this navigation.
    pub fn page(&self, id: PageId) -> &Page {
        &self.page_arena[id.index()]
    }

    /// Mutable page by handle, e.g. to set a title read from the document.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this navigation.
    pub fn page_mut(&mut self, id: PageId) -> &mut Page {
        &mut self.page_arena[id.index()]
    }

    /// Section by handle.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this navigation.
    pub fn section(&self, id: SectionId) -> &Section {
        &self.sections[id.0]
    }

    /// Link by handle.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this navigation.
    pub fn link(&self, id: LinkId) -> &Link {
        &self.links[id.0]
    }

    /// All sections, depth-first.
    pub fn sections(&self) -> Vec<SectionId> {
        self.walk()
            .filter_map(|item| match item {
                NavItem::Section(id) => Some(id),
                _ => None,
            })
            .collect()
    }

    /// All links, depth-first.
    pub fn links(&self) -> Vec<LinkId> {
        self.walk()
            .filter_map(|item| match item {
                NavItem::Link(id) => Some(id),
                _ => None,
            })
            .collect()
    }

    /// First page in reading order that is the site homepage.
    pub fn homepage(&self) -> Option<PageId> {
        self.pages
            .iter()
            .copied()
            .find(|&id| self.page(id).is_homepage())
    }

    /// Page whose file has this `src_uri`, first in reading order.
    pub fn page_by_src_uri(&self, src_uri: &str) -> Option<PageId> {
        self.pages
            .iter()
            .copied()
            .find(|&id| self.page(id).src_uri() == src_uri)
    }

    /// Parent section of any item.
    pub fn parent(&self, item: NavItem) -> Option<SectionId> {
        match item {
            NavItem::Page(id) => self.page(id).parent(),
            NavItem::Section(id) => self.section(id).parent(),
            NavItem::Link(id) => self.link(id).parent(),
        }
    }

    /// Enclosing sections of `item`, nearest first.
    pub fn ancestors(&self, item: NavItem) -> Vec<SectionId> {
        let mut ancestors = Vec::new();
        let mut current = self.parent(item);
        while let Some(id) = current {
            ancestors.push(id);
            current = self.section(id).parent;
        }
        ancestors
    }

    /// Children of a section; pages and links have none.
    pub fn children(&self, item: NavItem) -> &[NavItem] {
        match item {
            NavItem::Section(id) => self.section(id).children(),
            NavItem::Page(_) | NavItem::Link(_) => &[],
        }
    }

    /// Set a section's `active` flag together with every enclosing section.
    pub fn set_section_active(&mut self, id: SectionId, active: bool) {
        let mut current = Some(id);
        while let Some(id) = current {
            let section = &mut self.sections[id.0];
            section.active = active;
            current = section.parent;
        }
    }

    /// Mark a page as the current one, cascading into its sections.
    pub fn set_page_active(&mut self, id: PageId, active: bool) {
        let page = &mut self.page_arena[id.index()];
        page.active = active;
        if let Some(parent) = page.parent {
            self.set_section_active(parent, active);
        }
    }

    /// Depth-first, left-to-right iterator over every item in the tree.
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            nav: self,
            stack: self.items.iter().rev().copied().collect(),
        }
    }

    /// Serializable tree for JSON output.
    pub fn tree(&self) -> Vec<NavNode> {
        self.items.iter().map(|&item| self.node(item)).collect()
    }

    fn node(&self, item: NavItem) -> NavNode {
        match item {
            NavItem::Page(id) => {
                let page = self.page(id);
                NavNode::Page {
                    title: page.display_title(),
                    url: page.url().to_owned(),
                    src_uri: page.src_uri().to_owned(),
                    active: page.active(),
                }
            }
            NavItem::Section(id) => {
                let section = self.section(id);
                NavNode::Section {
                    title: section.title().to_owned(),
                    active: section.active(),
                    children: section.children().iter().map(|&c| self.node(c)).collect(),
                }
            }
            NavItem::Link(id) => {
                let link = self.link(id);
                NavNode::Link {
                    title: link.title().map(str::to_owned),
                    url: link.url().to_owned(),
                }
            }
        }
    }

    fn fmt_item(&self, f: &mut fmt::Formatter<'_>, item: NavItem, depth: usize) -> fmt::Result {
        let indent = "    ".repeat(depth);
        match item {
            NavItem::Page(id) => writeln!(f, "{indent}{}", self.page(id)),
            NavItem::Link(id) => writeln!(f, "{indent}{}", self.link(id)),
            NavItem::Section(id) => {
                let section = self.section(id);
                writeln!(f, "{indent}{section}")?;
                for &child in section.children() {
                    self.fmt_item(f, child, depth + 1)?;
                }
                Ok(())
            }
        }
    }

    // Arena construction, used by the builder.

    pub(crate) fn push_page(&mut self, page: Page) -> PageId {
        self.page_arena.push(page);
        PageId::new(self.page_arena.len() - 1)
    }

    pub(crate) fn push_section(&mut self, title: String, children: Vec<NavItem>) -> SectionId {
        self.sections.push(Section {
            title,
            children,
            parent: None,
            active: false,
        });
        SectionId(self.sections.len() - 1)
    }

    pub(crate) fn push_link(&mut self, title: Option<String>, url: String) -> LinkId {
        self.links.push(Link {
            title,
            url,
            parent: None,
        });
        LinkId(self.links.len() - 1)
    }

    pub(crate) fn set_items(&mut self, items: Vec<NavItem>) {
        self.items = items;
    }

    pub(crate) fn push_reading_order(&mut self, id: PageId) {
        self.pages.push(id);
    }

    /// Point every direct child of every section at its section.
    pub(crate) fn assign_parents(&mut self) {
        for index in 0..self.sections.len() {
            let parent = SectionId(index);
            let children = self.sections[index].children.clone();
            for child in children {
                match child {
                    NavItem::Page(id) => self.page_arena[id.index()].parent = Some(parent),
                    NavItem::Section(id) => self.sections[id.0].parent = Some(parent),
                    NavItem::Link(id) => self.links[id.0].parent = Some(parent),
                }
            }
        }
    }

    /// Chain `previous_page`/`next_page` along the reading order.
    pub(crate) fn assign_previous_next(&mut self) {
        let order = &self.pages;
        for (position, &id) in order.iter().enumerate() {
            let page = &mut self.page_arena[id.index()];
            page.previous_page = position.checked_sub(1).map(|p| order[p]);
            page.next_page = order.get(position + 1).copied();
        }
    }
}

impl fmt::Display for Navigation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &item in &self.items {
            self.fmt_item(f, item, 0)?;
        }
        Ok(())
    }
}

/// Iterator returned by [`Navigation::walk`].
pub struct Walk<'a> {
    nav: &'a Navigation,
    stack: Vec<NavItem>,
}

impl Iterator for Walk<'_> {
    type Item = NavItem;

    fn next(&mut self) -> Option<NavItem> {
        let item = self.stack.pop()?;
        self.stack
            .extend(self.nav.children(item).iter().rev().copied());
        Some(item)
    }
}

/// Owned, serializable view of one navigation node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NavNode {
    /// A page.
    Page {
        /// Display title.
        title: String,
        /// Page URL relative to the site root.
        url: String,
        /// Source file.
        #[serde(rename = "srcUri")]
        src_uri: String,
        /// Whether this is the current page.
        #[serde(skip_serializing_if = "std::ops::Not::not")]
        active: bool,
    },
    /// A section.
    Section {
        /// Section title.
        title: String,
        /// Whether the current page is below this section.
        #[serde(skip_serializing_if = "std::ops::Not::not")]
        active: bool,
        /// Child nodes.
        children: Vec<NavNode>,
    },
    /// A link.
    Link {
        /// Title, if given.
        #[serde(skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        /// URL as written.
        url: String,
    },
}
