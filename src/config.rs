//! Configuration loaded from environment variables and a TOML rule file.
//!
//! Configuration is loaded once at startup, validated, and then handed to the
//! [`Normalizer`] by value. Nothing in the crate reads it lazily afterwards.
//!
//! ## Variables
//!
//! - `NORMALIZATION_CONFIG` - Path to the URL rule file (default: `config.toml`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//!
//! ## Rule File
//!
//! ```toml
//! [UrlNormalisations]
//! add-www = ["theguardian.com"]
//! remove-www = ["www.jacobin.com"]
//! force-https = ["www.theguardian.com", "jacobin.com"]
//!
//! [UrlNormalisations.replace-domain]
//! "jacobinmag.com" = "jacobin.com"
//! ```
//!
//! A missing rule file yields an empty rule set; a malformed one is an error.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::{env, fs, io};

use crate::utils::url_normalizer::Normalizer;

const DEFAULT_RULES_PATH: &str = "config.toml";

/// Host-keyed URL rewrite rules.
///
/// Every collection matches exact host strings. See [`Normalizer::normalize`]
/// for the order in which they apply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct NormalizationConfig {
    /// Hosts that gain a `www.` prefix.
    pub add_www: HashSet<String>,
    /// Hosts that lose a leading `www.`.
    pub remove_www: HashSet<String>,
    /// Exact host substitutions. Empty targets are ignored.
    pub replace_domain: HashMap<String, String>,
    /// Hosts whose scheme becomes `https`.
    pub force_https: HashSet<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RuleFile {
    #[serde(rename = "UrlNormalisations", default)]
    url_normalisations: NormalizationConfig,
}

impl NormalizationConfig {
    /// Parses the `[UrlNormalisations]` table out of a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, toml::de::Error> {
        let file: RuleFile = toml::from_str(source)?;
        Ok(file.url_normalisations)
    }

    /// Reads rules from `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    /// A missing file is not an error: an empty rule set is returned.
    pub fn load(path: &Path) -> Result<Self> {
        let source = match fs::read_to_string(path) {
            Ok(source) => source,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::warn!(path = %path.display(), "URL rule file not found, using no rules");
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read URL rule file {}", path.display()));
            }
        };

        Self::from_toml_str(&source)
            .with_context(|| format!("Failed to parse URL rule file {}", path.display()))
    }

    /// Total number of host entries across all rule sets.
    pub fn rule_count(&self) -> usize {
        self.add_www.len() + self.remove_www.len() + self.replace_domain.len() + self.force_https.len()
    }
}

/// Importer configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub rules_path: PathBuf,
    pub log_level: String,
    pub log_format: String,
    pub normalizations: NormalizationConfig,
}

impl Config {
    /// Loads configuration from environment variables and the rule file.
    ///
    /// # Errors
    ///
    /// Returns an error if the rule file cannot be read or parsed.
    pub fn from_env() -> Result<Self> {
        let rules_path = env::var("NORMALIZATION_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_RULES_PATH));
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let normalizations =
            NormalizationConfig::load(&rules_path).context("Failed to load URL normalizations")?;

        Ok(Self {
            rules_path,
            log_level,
            log_format,
            normalizations,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - the rules are not idempotent, i.e. some host keeps changing when
    ///   normalized a second time
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        let normalizer = Normalizer::new(self.normalizations.clone());
        if let Some(host) = normalizer.find_unstable_host() {
            anyhow::bail!(
                "URL rules in {} are not idempotent: '{}' changes again when re-normalized",
                self.rules_path.display(),
                host
            );
        }

        Ok(())
    }

    /// Builds the normalizer that owns these rules.
    pub fn normalizer(&self) -> Normalizer {
        Normalizer::new(self.normalizations.clone())
    }

    /// Prints a configuration summary.
    pub fn print_summary(&self) {
        let rules = &self.normalizations;
        tracing::info!("Configuration loaded:");
        tracing::info!("  Rule file: {}", self.rules_path.display());
        tracing::info!("  add-www: {} hosts", rules.add_www.len());
        tracing::info!("  remove-www: {} hosts", rules.remove_www.len());
        tracing::info!("  replace-domain: {} hosts", rules.replace_domain.len());
        tracing::info!("  force-https: {} hosts", rules.force_https.len());
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if the rule file is unreadable or validation fails.
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
