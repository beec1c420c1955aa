//! `tome nav` command implementation.

use clap::Args;
use tome_files::PathCodec;
use tome_nav::{NavItem, Navigation, NavigationBuilder};

use super::{GlobalArgs, SiteArgs};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the nav command.
#[derive(Args)]
pub(crate) struct NavArgs {
    #[command(flatten)]
    site: SiteArgs,

    /// Print the navigation tree as JSON.
    #[arg(long, conflicts_with_all = ["pages", "spec"])]
    json: bool,

    /// Print pages in reading order with previous/next links.
    #[arg(long, conflicts_with = "spec")]
    pages: bool,

    /// Print the effective nav specification as YAML.
    #[arg(long)]
    spec: bool,
}

impl NavArgs {
    pub(crate) fn execute(self, global: &GlobalArgs) -> Result<(), CliError> {
        let output = Output::new();
        let mut site = self.site.load(global)?;
        let builder = NavigationBuilder::new(&site.config);

        if self.spec {
            let spec = builder.effective_spec(&site.catalog);
            output.raw(&serde_yaml::to_string(&spec)?);
            return global.finish(&site.config);
        }

        let nav = builder.build(&mut site.catalog)?;
        if self.json {
            output.line(&serde_json::to_string_pretty(&nav.tree())?);
        } else if self.pages {
            print_pages(&output, &nav);
        } else {
            print_tree(&output, &nav, nav.items(), 0);
        }

        global.finish(&site.config)
    }
}

fn print_tree(output: &Output, nav: &Navigation, items: &[NavItem], depth: usize) {
    let indent = "  ".repeat(depth);
    for &item in items {
        match item {
            NavItem::Page(id) => {
                let page = nav.page(id);
                output.line(&format!(
                    "{indent}{} {}",
                    page.display_title(),
                    output.dim(&format!("({})", page.url()))
                ));
            }
            NavItem::Section(id) => {
                output.line(&format!("{indent}{}", output.highlight(nav.section(id).title())));
                print_tree(output, nav, nav.section(id).children(), depth + 1);
            }
            NavItem::Link(id) => {
                let link = nav.link(id);
                output.line(&format!(
                    "{indent}{} {}",
                    link.title().unwrap_or(link.url()),
                    output.dim(&format!("-> {}", link.url()))
                ));
            }
        }
    }
}

/// One line per page: URL, then previous and next links relative to it.
fn print_pages(output: &Output, nav: &Navigation) {
    let codec = PathCodec::new();
    for &id in nav.pages() {
        let page = nav.page(id);
        let relative = |other: Option<_>| {
            other.map_or_else(
                || "-".to_owned(),
                |other| codec.relative_url(nav.page(other).url(), page.url()),
            )
        };
        output.line(&format!(
            "{:<40} {} {}",
            page.url(),
            output.dim(&format!("prev: {}", relative(page.previous_page()))),
            output.dim(&format!("next: {}", relative(page.next_page())))
        ));
    }
}
