//! Configuration management for pubmd.
//!
//! Parses `pubmd.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories. Every section is
//! optional; without a config file the defaults produce the standard screen,
//! PDF-ready and complete-publication HTML files next to the source.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ```toml
//! [document]
//! title = "Enhanced Ensemble Methods"
//! author = "A. Researcher"
//!
//! [paths]
//! source = "paper.md"
//! output_dir = "dist"
//!
//! [footer]
//! lines = ["Rochester Institute of Technology"]
//!
//! [[outputs]]
//! file = "paper.html"
//!
//! [[outputs]]
//! file = "paper_print.html"
//! pdf_ready = true
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override markdown source file.
    pub source: Option<PathBuf>,
    /// Override output directory.
    pub output_dir: Option<PathBuf>,
    /// Override document title.
    pub title: Option<String>,
    /// Override footer enabled flag.
    pub footer_enabled: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "pubmd.toml";

/// Markdown source used when neither the config nor the CLI names one.
pub const DEFAULT_SOURCE: &str = "FINAL_PUBLICATION.md";

/// Placeholder in output titles replaced with the document title.
const TITLE_PLACEHOLDER: &str = "{title}";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Document metadata.
    pub document: DocumentConfig,
    /// Source and output locations (relative strings from TOML).
    paths: PathsConfigRaw,
    /// Publication footer.
    pub footer: FooterConfig,
    /// Output variants rendered from the same source.
    pub outputs: Vec<OutputConfig>,

    /// Resolved paths (set after loading).
    #[serde(skip)]
    pub paths_resolved: PathsConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Document metadata.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DocumentConfig {
    /// Document title.
    pub title: String,
    /// Author for the `author` meta tag.
    pub author: Option<String>,
    /// Summary for the `description` meta tag.
    pub description: Option<String>,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            title: "Research Publication".to_owned(),
            author: None,
            description: None,
        }
    }
}

/// Raw paths configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct PathsConfigRaw {
    source: Option<String>,
    output_dir: Option<String>,
}

/// Resolved source and output locations.
#[derive(Debug, Default)]
pub struct PathsConfig {
    /// Markdown source file.
    pub source: PathBuf,
    /// Directory receiving the generated HTML files.
    pub output_dir: PathBuf,
}

/// Publication footer configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct FooterConfig {
    /// Whether the footer is rendered.
    pub enabled: bool,
    /// Whether a "Generated on" timestamp line is included.
    pub timestamp: bool,
    /// Additional footer lines (e.g. affiliation, copyright).
    pub lines: Vec<String>,
}

impl Default for FooterConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            timestamp: true,
            lines: Vec::new(),
        }
    }
}

/// A single output variant.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct OutputConfig {
    /// Output file name, written inside the output directory.
    pub file: String,
    /// Title override; `{title}` expands to the document title.
    pub title: Option<String>,
    /// Use print-oriented page sizing and font scaling.
    #[serde(default)]
    pub pdf_ready: bool,
    /// Short description shown in the build summary.
    pub description: Option<String>,
}

impl OutputConfig {
    /// Title for this variant, falling back to the document title.
    #[must_use]
    pub fn resolved_title(&self, document_title: &str) -> String {
        match &self.title {
            Some(title) => title.replace(TITLE_PLACEHOLDER, document_title),
            None => document_title.to_owned(),
        }
    }
}

/// Default output variants: screen, PDF-ready and complete publication.
fn default_outputs() -> Vec<OutputConfig> {
    vec![
        OutputConfig {
            file: "FINAL_PUBLICATION.html".to_owned(),
            title: None,
            pdf_ready: false,
            description: Some("Standard HTML for web viewing".to_owned()),
        },
        OutputConfig {
            file: "FINAL_PUBLICATION_PDF_READY.html".to_owned(),
            title: None,
            pdf_ready: true,
            description: Some("PDF-ready HTML (optimized for printing)".to_owned()),
        },
        OutputConfig {
            file: "COMPLETE_PROJECT_PUBLICATION.html".to_owned(),
            title: Some(format!("Complete Project Publication - {TITLE_PLACEHOLDER}")),
            pdf_ready: true,
            description: Some("Complete project publication".to_owned()),
        },
    ]
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
    /// Otherwise, searches for `pubmd.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values. The final
    /// configuration is validated.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails
    /// or the resulting configuration is invalid.
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
        if let Some(source) = &settings.source {
            self.paths_resolved.source.clone_from(source);
        }
        if let Some(output_dir) = &settings.output_dir {
            self.paths_resolved.output_dir.clone_from(output_dir);
        }
        if let Some(title) = &settings.title {
            self.document.title.clone_from(title);
        }
        if let Some(footer_enabled) = settings.footer_enabled {
            self.footer.enabled = footer_enabled;
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
            document: DocumentConfig::default(),
            paths: PathsConfigRaw::default(),
            footer: FooterConfig::default(),
            outputs: default_outputs(),
            paths_resolved: PathsConfig {
                source: base.join(DEFAULT_SOURCE),
                output_dir: base.to_path_buf(),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically by [`Config::load`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.document.title, "document.title")?;
        self.validate_outputs()?;
        Ok(())
    }

    /// Validate output variants.
    fn validate_outputs(&self) -> Result<(), ConfigError> {
        if self.outputs.is_empty() {
            return Err(ConfigError::Validation(
                "at least one [[outputs]] entry is required".to_owned(),
            ));
        }

        let mut seen = HashSet::new();
        for output in &self.outputs {
            require_non_empty(&output.file, "outputs.file")?;
            if output.file.contains(['/', '\\']) {
                return Err(ConfigError::Validation(format!(
                    "outputs.file must be a file name, got {:?}",
                    output.file
                )));
            }
            if !seen.insert(output.file.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "outputs.file {:?} is listed more than once",
                    output.file
                )));
            }
        }

        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.paths_resolved = PathsConfig {
            source: config_dir.join(self.paths.source.as_deref().unwrap_or(DEFAULT_SOURCE)),
            output_dir: self
                .paths
                .output_dir
                .as_deref()
                .map_or_else(|| config_dir.to_path_buf(), |dir| config_dir.join(dir)),
        };
    }
}
