use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::license::classifier::Classifier;
use crate::license::reference::DirectoryTexts;

/// Root configuration structure, deserialized from `.license-matchr/config.toml`.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub classifier: ClassifierConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

/// How candidates are scored.
#[derive(Debug, Default, Deserialize)]
pub struct ClassifierConfig {
    /// Maximum number of scoring tasks in flight. `0` uses the available
    /// parallelism.
    #[serde(default)]
    pub jobs: usize,
    /// Directory of `<slug>.txt` files used instead of the bundled texts.
    /// Relative paths resolve against the directory holding the config file.
    #[serde(default)]
    pub licenses_dir: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
pub struct ReportConfig {
    /// Number of ranked candidates shown by the terminal report.
    #[serde(default = "default_top")]
    pub top: usize,
}

fn default_top() -> usize {
    5
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig { top: default_top() }
    }
}

impl Config {
    /// Build a classifier honoring `jobs` and `licenses_dir`.
    pub fn classifier(&self) -> Classifier {
        let classifier = match &self.classifier.licenses_dir {
            Some(dir) => Classifier::with_source(DirectoryTexts::new(dir)),
            None => Classifier::new(),
        };
        classifier.jobs(self.classifier.jobs)
    }
}

/// Load the configuration, searching in order:
///
/// 1. `config_override`, the path passed via `--config`
/// 2. `<project_path>/.license-matchr/config.toml`
/// 3. `~/.config/license-matchr/config.toml`
/// 4. Built-in [`Config::default`]
pub fn load_config(project_path: &Path, config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        return read_config(path);
    }

    let project_config = project_path.join(".license-matchr").join("config.toml");
    if project_config.exists() {
        return read_config(&project_config);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home
            .join(".config")
            .join("license-matchr")
            .join("config.toml");
        if home_config.exists() {
            return read_config(&home_config);
        }
    }

    Ok(Config::default())
}

fn read_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let mut config: Config = toml::from_str(&content)
        .with_context(|| format!("Invalid config {}", path.display()))?;

    if let (Some(dir), Some(base)) = (config.classifier.licenses_dir.as_mut(), path.parent()) {
        if dir.is_relative() {
            *dir = base.join(&*dir);
        }
    }

    Ok(config)
}
