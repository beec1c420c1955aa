//! Configuration management for Tome.
//!
//! Parses `tome.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `site_name`
//! - `docs.docs_dir`
//! - `docs.site_dir`
//! - `theme.dirs`

mod expand;
mod nav_spec;

use serde::Deserialize;
use std::path::{Path, PathBuf};

pub use nav_spec::NavSpec;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override docs source directory.
    pub docs_dir: Option<PathBuf>,
    /// Override site output directory.
    pub site_dir: Option<PathBuf>,
    /// Override directory-style URL flag.
    pub use_directory_urls: Option<bool>,
    /// Override strict mode.
    pub strict: Option<bool>,
    /// Additional theme directories, searched before configured ones.
    pub theme_dirs: Vec<PathBuf>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "tome.toml";

/// Ignore patterns applied during file discovery when `docs.exclude` is unset.
pub const DEFAULT_EXCLUDE: &[&str] = &[".*", "/templates"];

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site name shown by themes.
    pub site_name: String,
    /// Treat warnings emitted during a build as errors.
    pub strict: bool,
    /// Documentation configuration (paths are relative strings from TOML).
    docs: DocsConfigRaw,
    /// Theme configuration (paths are relative strings from TOML).
    theme: ThemeConfigRaw,

    /// Resolved docs configuration (set after loading).
    #[serde(skip)]
    pub docs_resolved: DocsConfig,
    /// Resolved theme configuration (set after loading).
    #[serde(skip)]
    pub theme_resolved: ThemeConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw docs configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocsConfigRaw {
    docs_dir: Option<String>,
    site_dir: Option<String>,
    use_directory_urls: Option<bool>,
    exclude: Option<Vec<String>>,
    nav: Option<NavSpec>,
}

/// Resolved documentation configuration with absolute paths.
#[derive(Debug)]
pub struct DocsConfig {
    /// Source directory for documentation files.
    pub docs_dir: PathBuf,
    /// Output directory for the built site.
    pub site_dir: PathBuf,
    /// Map `name.md` to `name/index.html` and drop `index.html` from URLs.
    pub use_directory_urls: bool,
    /// Git-ignore style patterns pruned during discovery.
    pub exclude: Vec<String>,
    /// Explicit navigation; inferred from the docs tree when absent.
    pub nav: Option<NavSpec>,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            docs_dir: PathBuf::from("docs"),
            site_dir: PathBuf::from("site"),
            use_directory_urls: true,
            exclude: default_exclude(),
            nav: None,
        }
    }
}

/// Raw theme configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ThemeConfigRaw {
    dirs: Option<Vec<String>>,
    static_templates: Option<Vec<String>>,
}

/// Resolved theme configuration.
#[derive(Debug, Default)]
pub struct ThemeConfig {
    /// Theme directories in lookup order.
    pub dirs: Vec<PathBuf>,
    /// Templates rendered as standalone pages, never copied verbatim.
    pub static_templates: Vec<String>,
}

fn default_exclude() -> Vec<String> {
    DEFAULT_EXCLUDE.iter().map(|&p| p.to_owned()).collect()
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`docs.site_dir`").
        field: String,
        /// Error message (e.g., "${`SITE_DIR`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `tome.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values. The merged result
    /// is validated last.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails or
    /// the merged configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;
        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(docs_dir) = &settings.docs_dir {
            self.docs_resolved.docs_dir.clone_from(docs_dir);
        }
        if let Some(site_dir) = &settings.site_dir {
            self.docs_resolved.site_dir.clone_from(site_dir);
        }
        if let Some(use_directory_urls) = settings.use_directory_urls {
            self.docs_resolved.use_directory_urls = use_directory_urls;
        }
        if let Some(strict) = settings.strict {
            self.strict = strict;
        }
        if !settings.theme_dirs.is_empty() {
            let mut dirs = settings.theme_dirs.clone();
            dirs.append(&mut self.theme_resolved.dirs);
            self.theme_resolved.dirs = dirs;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            site_name: "Documentation".to_owned(),
            strict: false,
            docs: DocsConfigRaw::default(),
            theme: ThemeConfigRaw::default(),
            docs_resolved: DocsConfig {
                docs_dir: base.join("docs"),
                site_dir: base.join("site"),
                ..DocsConfig::default()
            },
            theme_resolved: ThemeConfig::default(),
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.site_name, "site_name")?;
        self.validate_exclude()?;
        self.validate_dirs()?;
        Ok(())
    }

    /// Every exclude entry must be a usable glob once its slashes are stripped.
    fn validate_exclude(&self) -> Result<(), ConfigError> {
        for pattern in &self.docs_resolved.exclude {
            let bare = pattern.trim_matches('/');
            require_non_empty(bare, "docs.exclude")?;
            glob::Pattern::new(bare).map_err(|e| {
                ConfigError::Validation(format!("docs.exclude pattern '{pattern}' is invalid: {e}"))
            })?;
        }
        Ok(())
    }

    /// The docs and site directories must not contain each other.
    fn validate_dirs(&self) -> Result<(), ConfigError> {
        let docs_dir = &self.docs_resolved.docs_dir;
        let site_dir = &self.docs_resolved.site_dir;

        if docs_dir == site_dir {
            return Err(ConfigError::Validation(
                "docs.docs_dir and docs.site_dir cannot be the same directory".to_owned(),
            ));
        }
        if site_dir.starts_with(docs_dir) {
            return Err(ConfigError::Validation(format!(
                "docs.site_dir ({}) cannot be inside docs.docs_dir ({})",
                site_dir.display(),
                docs_dir.display()
            )));
        }
        if docs_dir.starts_with(site_dir) {
            return Err(ConfigError::Validation(format!(
                "docs.docs_dir ({}) cannot be inside docs.site_dir ({})",
                docs_dir.display(),
                site_dir.display()
            )));
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        expand::expand_in_place("site_name", [&mut self.site_name])?;
        expand::expand_in_place("docs.docs_dir", self.docs.docs_dir.as_mut())?;
        expand::expand_in_place("docs.site_dir", self.docs.site_dir.as_mut())?;
        expand::expand_in_place("theme.dirs", self.theme.dirs.iter_mut().flatten())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.docs_resolved = DocsConfig {
            docs_dir: resolve(self.docs.docs_dir.as_deref(), "docs"),
            site_dir: resolve(self.docs.site_dir.as_deref(), "site"),
            use_directory_urls: self.docs.use_directory_urls.unwrap_or(true),
            exclude: self.docs.exclude.clone().unwrap_or_else(default_exclude),
            nav: self.docs.nav.take(),
        };

        self.theme_resolved = ThemeConfig {
            dirs: self
                .theme
                .dirs
                .iter()
                .flatten()
                .map(|d| config_dir.join(d))
                .collect(),
            static_templates: self.theme.static_templates.clone().unwrap_or_default(),
        };
    }
}
