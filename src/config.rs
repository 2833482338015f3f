//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/avltree/avltree.toml`
//! 3. Local config: `<project_dir>/.avltree.toml`
//! 4. Environment variables: `AVLTREE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;

/// Graphviz rendering settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RenderConfig {
    /// Renderer executable (default: "dot")
    pub dot_command: String,
    /// Output format passed as `-T<format>`, also the image file extension
    pub image_format: String,
    /// Name of the emitted digraph
    pub graph_name: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            dot_command: "dot".into(),
            image_format: "jpg".into(),
            graph_name: "G".into(),
        }
    }
}

/// Balance factor report settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PrintConfig {
    /// Text between `key(bf)` entries
    pub separator: String,
}

impl Default for PrintConfig {
    fn default() -> Self {
        Self {
            separator: ", ".into(),
        }
    }
}

/// Raw render config for intermediate parsing (`None` means "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawRenderConfig {
    pub dot_command: Option<String>,
    pub image_format: Option<String>,
    pub graph_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawPrintConfig {
    pub separator: Option<String>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub render: RawRenderConfig,
    pub print: RawPrintConfig,
}

impl RenderConfig {
    /// Overlay wins where it specifies a value, otherwise keep self.
    pub fn merge(&self, overlay: &RawRenderConfig) -> Self {
        Self {
            dot_command: overlay
                .dot_command
                .clone()
                .unwrap_or_else(|| self.dot_command.clone()),
            image_format: overlay
                .image_format
                .clone()
                .unwrap_or_else(|| self.image_format.clone()),
            graph_name: overlay
                .graph_name
                .clone()
                .unwrap_or_else(|| self.graph_name.clone()),
        }
    }
}

impl PrintConfig {
    pub fn merge(&self, overlay: &RawPrintConfig) -> Self {
        Self {
            separator: overlay
                .separator
                .clone()
                .unwrap_or_else(|| self.separator.clone()),
        }
    }
}

/// Unified configuration for avltree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Settings {
    /// Graphviz rendering settings
    pub render: RenderConfig,
    /// Balance factor report settings
    pub print: PrintConfig,
}

/// Get the XDG config directory for avltree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "avltree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("avltree.toml"))
}

/// Get the path to the local config file in a project directory.
pub fn local_config_path(project_dir: &Path) -> PathBuf {
    project_dir.join(".avltree.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            render: self.render.merge(&overlay.render),
            print: self.print.merge(&overlay.print),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `project_dir` - Optional directory holding a local `.avltree.toml`
    ///
    /// Each layer only overrides the fields it specifies.
    pub fn load(project_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        // 3. Local config
        if let Some(dir) = project_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw);
            }
        }

        // 4. Environment variables
        Self::apply_env_overrides(current)
    }

    /// Apply AVLTREE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("AVLTREE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("render.dot_command") {
            settings.render.dot_command = val;
        }
        if let Ok(val) = config.get_string("render.image_format") {
            settings.render.image_format = val;
        }
        if let Ok(val) = config.get_string("render.graph_name") {
            settings.render.graph_name = val;
        }
        if let Ok(val) = config.get_string("print.separator") {
            settings.print.separator = val;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# avltree configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/avltree/avltree.toml
#   Local:  <project_dir>/.avltree.toml
#   Env:    AVLTREE_* environment variables, e.g. AVLTREE_RENDER__DOT_COMMAND

[render]
# Graphviz executable used to turn the .dot file into an image
# dot_command = "dot"

# Image format, passed as -T<format> and used as the image extension
# image_format = "jpg"

# Name of the emitted digraph
# graph_name = "G"

[print]
# Separator between key(balance) entries
# separator = ", "
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_default_settings_when_created_then_renders_jpg_with_dot() {
        let settings = Settings::default();
        assert_eq!(settings.render.dot_command, "dot");
        assert_eq!(settings.render.image_format, "jpg");
        assert_eq!(settings.render.graph_name, "G");
        assert_eq!(settings.print.separator, ", ");
    }

    #[test]
    fn given_partial_overlay_when_merging_then_unspecified_fields_inherit() {
        let overlay = RawSettings {
            render: RawRenderConfig {
                image_format: Some("png".into()),
                ..Default::default()
            },
            print: RawPrintConfig::default(),
        };

        let merged = Settings::default().merge_with(&overlay);

        assert_eq!(merged.render.image_format, "png");
        assert_eq!(merged.render.dot_command, "dot");
        assert_eq!(merged.print.separator, ", ");
    }

    #[test]
    fn given_template_when_parsed_then_is_valid_toml() {
        let raw: RawSettings = toml::from_str(&Settings::template()).expect("parse template");
        assert!(raw.render.dot_command.is_none());
    }
}
