//! CLI command implementations.

pub(crate) mod copy_static;
pub(crate) mod files;
pub(crate) mod nav;

use std::path::PathBuf;

use clap::Args;
use tome_config::{CliSettings, Config};
use tome_files::{FileCatalog, SearchPath, list_theme_files};

use crate::error::CliError;
use crate::logging::WarningCount;

pub(crate) use copy_static::CopyStaticArgs;
pub(crate) use files::FilesArgs;
pub(crate) use nav::NavArgs;

/// Options shared by every command.
pub(crate) struct GlobalArgs {
    pub(crate) config: Option<PathBuf>,
    pub(crate) strict: Option<bool>,
    pub(crate) warnings: WarningCount,
}

impl GlobalArgs {
    /// Fail if strict mode is on and any warning was logged.
    pub(crate) fn finish(&self, config: &Config) -> Result<(), CliError> {
        match self.warnings.get() {
            count if config.strict && count > 0 => Err(CliError::Strict(count)),
            _ => Ok(()),
        }
    }
}

/// Site location overrides.
#[derive(Args)]
pub(crate) struct SiteArgs {
    /// Markdown source directory (overrides config).
    #[arg(short, long)]
    docs_dir: Option<PathBuf>,

    /// Output directory for the built site (overrides config).
    #[arg(short, long)]
    site_dir: Option<PathBuf>,

    /// Map `page.md` to `page.html` instead of `page/index.html`.
    #[arg(long)]
    no_directory_urls: bool,

    /// Theme directory searched before configured ones; repeatable.
    #[arg(long = "theme-dir")]
    theme_dirs: Vec<PathBuf>,
}

/// Loaded configuration and the files it describes.
pub(crate) struct Site {
    pub(crate) config: Config,
    pub(crate) catalog: FileCatalog,
}

impl SiteArgs {
    /// Load config and discover docs plus theme files.
    pub(crate) fn load(&self, global: &GlobalArgs) -> Result<Site, CliError> {
        let cli_settings = CliSettings {
            docs_dir: self.docs_dir.clone(),
            site_dir: self.site_dir.clone(),
            use_directory_urls: self.no_directory_urls.then_some(false),
            strict: global.strict,
            theme_dirs: self.theme_dirs.clone(),
        };
        let config = Config::load(global.config.as_deref(), Some(&cli_settings))?;
        let docs = &config.docs_resolved;

        let mut catalog = FileCatalog::discover(
            &docs.docs_dir,
            &docs.site_dir,
            docs.use_directory_urls,
            &docs.exclude,
        )?;

        let theme = &config.theme_resolved;
        if !theme.dirs.is_empty() {
            let search = SearchPath::new(theme.dirs.clone(), &docs.site_dir, docs.use_directory_urls)
                .with_static_templates(theme.static_templates.clone());
            let candidates = list_theme_files(&search.dirs)?;
            let added = catalog.add_from_search_path(&candidates, &search)?;
            tracing::info!("Added {added} files from theme directories");
        }

        Ok(Site { config, catalog })
    }
}
