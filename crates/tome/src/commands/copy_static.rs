//! `tome copy-static` command implementation.

use clap::Args;

use super::{GlobalArgs, SiteArgs};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the copy-static command.
#[derive(Args)]
pub(crate) struct CopyStaticArgs {
    #[command(flatten)]
    site: SiteArgs,

    /// Only copy files whose destination is missing or older than the source.
    #[arg(long)]
    dirty: bool,
}

impl CopyStaticArgs {
    pub(crate) fn execute(self, global: &GlobalArgs) -> Result<(), CliError> {
        let output = Output::new();
        let site = self.site.load(global)?;
        let site_dir = &site.config.docs_resolved.site_dir;

        output.info(&format!(
            "Source: {}",
            site.config.docs_resolved.docs_dir.display()
        ));
        output.info(&format!("Output: {}", site_dir.display()));

        let count = site.catalog.copy_static_files(self.dirty)?;

        output.success(&format!(
            "Copied {count} static files to {}",
            site_dir.display()
        ));
        global.finish(&site.config)
    }
}
