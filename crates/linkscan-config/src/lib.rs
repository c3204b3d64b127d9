//! Configuration loading for linkscan.
//! Reads linkscan.toml from the current directory or the path in the LINKSCAN_CONFIG env var.
//! YAML and JSON files are accepted too, chosen by extension.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use linkscan_classifier::{EntityClassifier, FieldSelection, ImportanceRules};
use linkscan_common::{LinkscanError, Result, TierBand, TierTable};
use linkscan_patterns::{embedded, CategorySpec, FalsePositiveFilter, PatternLibrary};

pub const CONFIG_ENV: &str = "LINKSCAN_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "linkscan.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeploymentConfig {
    /// Fall back to the embedded categories when none are given. The embedded
    /// exclusions come with them unless `exclusions` is set.
    #[serde(default = "bool_true")]
    pub use_embedded_library: bool,
    /// `None` means "not configured"; an explicit empty list disables exclusions.
    #[serde(default)]
    pub exclusions: Option<Vec<String>>,
    #[serde(default)]
    pub fields: FieldSelection,
    #[serde(default)]
    pub categories: Vec<CategorySpec>,
    #[serde(default = "default_tier_thresholds")]
    pub tier_thresholds: Vec<TierBand>,
    #[serde(default)]
    pub importance: Option<ImportanceRules>,
}

fn bool_true() -> bool { true }

fn default_tier_thresholds() -> Vec<TierBand> {
    TierTable::default().bands().to_vec()
}

impl Default for DeploymentConfig {
    fn default() -> Self {
        Self {
            use_embedded_library: true,
            exclusions: None,
            fields: FieldSelection::default(),
            categories: Vec::new(),
            tier_thresholds: default_tier_thresholds(),
            importance: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Yaml,
    Json,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("toml") => Ok(Self::Toml),
            Some("yaml") | Some("yml") => Ok(Self::Yaml),
            Some("json") => Ok(Self::Json),
            _ => Err(LinkscanError::config(format!(
                "unsupported config file extension: {}",
                path.display()
            ))),
        }
    }
}

/// A validated, ready-to-run deployment.
#[derive(Debug, Clone)]
pub struct Deployment {
    pub classifier: EntityClassifier,
    pub importance: Option<ImportanceRules>,
}

impl DeploymentConfig {
    /// Load configuration.
    /// Checks LINKSCAN_CONFIG env var first, then linkscan.toml in the current directory.
    pub fn load() -> Result<Self> {
        let path = config_path(std::env::var(CONFIG_ENV).ok());
        if !path.exists() {
            return Err(LinkscanError::config(format!(
                "Config file not found: {}\n\
                 Copy linkscan.example.toml to linkscan.toml and edit it.",
                path.display()
            )));
        }
        Self::from_path(&path)
    }

    /// Like [`load`](Self::load), but an absent default file yields the embedded defaults.
    /// A path named explicitly through LINKSCAN_CONFIG must exist.
    pub fn load_or_default() -> Result<Self> {
        let explicit = std::env::var(CONFIG_ENV).ok();
        let path = config_path(explicit.clone());
        if explicit.is_none() && !path.exists() {
            debug!("No {} found, using embedded defaults", DEFAULT_CONFIG_FILE);
            return Ok(Self::default());
        }
        Self::load()
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let format = ConfigFormat::from_path(path)?;
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_str_as(&content, format)
            .map_err(|e| LinkscanError::Parse(format!("{}: {e}", path.display())))?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Self::from_str_as(content, ConfigFormat::Toml)
    }

    pub fn from_str_as(content: &str, format: ConfigFormat) -> Result<Self> {
        match format {
            ConfigFormat::Toml => {
                toml::from_str(content).map_err(|e| LinkscanError::Parse(e.to_string()))
            }
            ConfigFormat::Yaml => {
                serde_yaml::from_str(content).map_err(|e| LinkscanError::Parse(e.to_string()))
            }
            ConfigFormat::Json => Ok(serde_json::from_str(content)?),
        }
    }

    /// Validate everything and compile the classifier. Fails on the first problem.
    pub fn build(&self) -> Result<Deployment> {
        if self.fields.scan.is_empty() {
            return Err(LinkscanError::config("fields.scan must name at least one field"));
        }
        if let Some(exclusion) = &self.fields.exclusion {
            if exclusion.is_empty() {
                return Err(LinkscanError::config(
                    "fields.exclusion must not be empty when given",
                ));
            }
        }

        let tiers = TierTable::new(self.tier_thresholds.clone())?;

        // Embedded exclusions only accompany the embedded categories.
        let embedded_in_use = self.categories.is_empty() && self.use_embedded_library;

        let library = if embedded_in_use {
            PatternLibrary::embedded()?
        } else if !self.categories.is_empty() {
            PatternLibrary::new(&self.categories)?
        } else {
            warn!(
                "No categories configured and embedded library disabled; every record will score 0"
            );
            PatternLibrary::new(&[])?
        };

        let exclusions = match &self.exclusions {
            Some(entries) => FalsePositiveFilter::new(entries)?,
            None if embedded_in_use => FalsePositiveFilter::new(embedded::exclusions())?,
            None => FalsePositiveFilter::empty(),
        };

        let importance = match &self.importance {
            Some(rules) => {
                rules.validate(&library)?;
                Some(rules.clone())
            }
            None => {
                let rules = ImportanceRules::default();
                match rules.validate(&library) {
                    Ok(()) => Some(rules),
                    Err(e) => {
                        debug!("Importance rules not enabled: {}", e);
                        None
                    }
                }
            }
        };

        info!(
            "Deployment ready: {} categories, {} exclusions, {} tiers, importance {}",
            library.categories().len(),
            exclusions.len(),
            tiers.bands().len(),
            if importance.is_some() { "on" } else { "off" }
        );

        Ok(Deployment {
            classifier: EntityClassifier::new(library, exclusions, tiers, self.fields.clone()),
            importance,
        })
    }
}

fn config_path(from_env: Option<String>) -> PathBuf {
    PathBuf::from(from_env.unwrap_or_else(|| DEFAULT_CONFIG_FILE.to_string()))
}
