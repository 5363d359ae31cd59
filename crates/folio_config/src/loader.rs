//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::ProjectConfig;
use std::path::Path;

/// Name of the configuration file within a project directory.
pub const CONFIG_FILE: &str = "folio.toml";

/// Loads and validates `folio.toml` from a project directory.
pub fn load_config(project_dir: &Path) -> Result<ProjectConfig, ConfigError> {
    let config_path = project_dir.join(CONFIG_FILE);
    let content = std::fs::read_to_string(&config_path)?;
    load_config_from_str(&content)
}

/// Parses and validates a `folio.toml` configuration from a string.
pub fn load_config_from_str(content: &str) -> Result<ProjectConfig, ConfigError> {
    let mut config: ProjectConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    normalize_extensions(&mut config);
    Ok(config)
}

/// Validates that required fields are present and directories are consistent.
fn validate_config(config: &ProjectConfig) -> Result<(), ConfigError> {
    if config.project.name.is_empty() {
        return Err(ConfigError::MissingField("project.name".to_string()));
    }
    if config.project.output_dir.is_empty() {
        return Err(ConfigError::MissingField("project.output_dir".to_string()));
    }
    if Path::new(&config.project.source_dir) == Path::new(&config.project.output_dir) {
        return Err(ConfigError::ValidationError(format!(
            "output_dir '{}' must differ from source_dir",
            config.project.output_dir
        )));
    }
    for ext in config.documents.extensions.keys() {
        if ext.is_empty() || ext.starts_with('.') {
            return Err(ConfigError::ValidationError(format!(
                "document extension '{ext}' must be non-empty and have no leading dot"
            )));
        }
    }
    Ok(())
}

/// Lowercases extension keys so lookups are case-insensitive.
fn normalize_extensions(config: &mut ProjectConfig) {
    let extensions = std::mem::take(&mut config.documents.extensions);
    config.documents.extensions = extensions
        .into_iter()
        .map(|(ext, ty)| (ext.to_ascii_lowercase(), ty))
        .collect();
}
