//! `tome files` command implementation.

use clap::Args;
use tome_files::{FileCatalog, FileRecord};

use super::{GlobalArgs, SiteArgs};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the files command.
#[derive(Args)]
pub(crate) struct FilesArgs {
    #[command(flatten)]
    site: SiteArgs,

    /// Print the catalog as JSON.
    #[arg(long)]
    json: bool,
}

impl FilesArgs {
    pub(crate) fn execute(self, global: &GlobalArgs) -> Result<(), CliError> {
        let output = Output::new();
        let site = self.site.load(global)?;

        if self.json {
            let json = serde_json::to_string_pretty(&catalog_json(&site.catalog))?;
            output.line(&json);
        } else {
            for file in &site.catalog {
                output.line(&format_file(&output, file));
            }
            output.info(&format!(
                "{} files, {} pages",
                site.catalog.len(),
                site.catalog.documentation_pages().count()
            ));
        }

        global.finish(&site.config)
    }
}

fn format_file(output: &Output, file: &FileRecord) -> String {
    format!(
        "{:<10} {} {} {} {}",
        file.category().to_string(),
        file.src_uri(),
        output.dim("->"),
        file.dest_uri(),
        output.dim(&format!("({})", file.url()))
    )
}

fn catalog_json(catalog: &FileCatalog) -> serde_json::Value {
    catalog
        .iter()
        .map(|file| {
            serde_json::json!({
                "srcUri": file.src_uri(),
                "destUri": file.dest_uri(),
                "url": file.url(),
                "category": file.category().to_string(),
                "absSrcPath": file.abs_src_path(),
                "absDestPath": file.abs_dest_path(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_catalog_json() {
        let catalog = FileCatalog::new([
            FileRecord::new("index.md", "/docs", "/site", true),
            FileRecord::new("img/a.png", "/docs", "/site", true),
        ]);

        let json = catalog_json(&catalog);

        assert_eq!(json[0]["srcUri"], "index.md");
        assert_eq!(json[0]["url"], ".");
        assert_eq!(json[0]["category"], "page");
        assert_eq!(json[1]["destUri"], "img/a.png");
        assert_eq!(json[1]["absDestPath"], "/site/img/a.png");
    }
}
