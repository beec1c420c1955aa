//! Navigation graph building for Tome.
//!
//! This crate provides:
//! - [`NavigationBuilder`]: turns a nav specification and a file catalog into a [`Navigation`]
//! - [`Navigation`]: tree of pages, sections and links plus pages in reading order
//! - [`PageFactory`]: hook for creating pages with extra data
//! - [`infer_nav`]: nav specification derived from the docs directory layout
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use tome_config::Config;
//! use tome_files::FileCatalog;
//! use tome_nav::NavigationBuilder;
//!
//! let config = Config::load(None, None)?;
//! let docs = &config.docs_resolved;
//! let mut catalog =
//!     FileCatalog::discover(&docs.docs_dir, &docs.site_dir, docs.use_directory_urls, &docs.exclude)?;
//!
//! let nav = NavigationBuilder::new(&config).build(&mut catalog)?;
//! print!("{nav}");
//! # Ok(())
//! # }
//! ```

mod builder;
mod error;
mod infer;
mod navigation;
mod page;

pub use builder::NavigationBuilder;
pub use error::NavError;
pub use infer::{dirname_to_title, infer_nav};
pub use navigation::{Link, LinkId, NavItem, NavNode, Navigation, Section, SectionId, Walk};
pub use page::{DefaultPageFactory, Page, PageFactory};
