//! Configuration file loader with multi-source merging

use super::error::ConfigError;
use super::file_config::FileConfig;
use borg_domain::{ConfigIssue, ServerConfig, Severity};
use figment::{
    Figment,
    providers::{Format, Serialized, Toml, Yaml},
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

/// Project-level config files, checked in order
const PROJECT_CONFIG_FILES: &[&str] = &["config/server_config.yml", "borg.yml"];

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Explicit config path (if provided)
    /// 2. Project: `./config/server_config.yml` or `./borg.yml`
    /// 3. Global: `$XDG_CONFIG_HOME/borg/config.yml`
    /// 4. Default values
    pub fn load(config_path: Option<&Path>) -> Result<FileConfig, ConfigError> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                debug!("Loading global config {}", global_path.display());
                figment = Self::merge_file(figment, &global_path);
            }
        }

        if let Some(path) = Self::project_config_path() {
            debug!("Loading project config {}", path.display());
            figment = Self::merge_file(figment, &path);
        }

        if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            debug!("Loading config {}", path.display());
            figment = Self::merge_file(figment, path);
        }

        figment.extract().map_err(|e| ConfigError::Load(Box::new(e)))
    }

    /// Load only default configuration
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Load, validate and compile the configuration for serving analyses.
    ///
    /// Warnings are logged; any error-level issue rejects the configuration.
    pub fn load_server_config(
        config_path: Option<&Path>,
    ) -> Result<(FileConfig, Arc<ServerConfig>), ConfigError> {
        let file_config = Self::load(config_path)?;
        let issues = file_config.validate();
        for issue in issues.iter().filter(|i| i.severity == Severity::Warning) {
            warn!("{}", issue);
        }
        if ConfigIssue::has_errors(&issues) {
            let errors = issues
                .into_iter()
                .filter(|i| i.severity == Severity::Error)
                .collect();
            return Err(ConfigError::Invalid(errors));
        }
        let server_config = file_config.into_server_config()?;
        Ok((file_config, Arc::new(server_config)))
    }

    /// `.toml` files are read as TOML, anything else as YAML
    fn merge_file(figment: Figment, path: &Path) -> Figment {
        let is_toml = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
        if is_toml {
            figment.merge(Toml::file(path))
        } else {
            figment.merge(Yaml::file(path))
        }
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/borg/config.yml if set,
    /// otherwise falls back to ~/.config/borg/config.yml
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("borg").join("config.yml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_CONFIG_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources(config_path: Option<&Path>) {
        println!("Configuration sources (in priority order):");

        if let Some(path) = config_path {
            let found = if path.exists() { "FOUND" } else { "MISSING" };
            println!("  [{:<7}] Explicit: {}", found, path.display());
        }

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND  ] Project: {}", path.display());
        } else {
            println!("  [       ] Project: {}", PROJECT_CONFIG_FILES.join(" or "));
        }

        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                println!("  [FOUND  ] Global:  {}", path.display());
            } else {
                println!("  [       ] Global:  {}", path.display());
            }
        }

        println!("  [       ] Default: built-in defaults");
    }
}
