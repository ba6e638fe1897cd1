// Startup configuration with TOML file support.
//
// Every section uses #[serde(default)] so a partial file (e.g. only `[links]`)
// keeps the defaults for everything it leaves out.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::PortfolioError;

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "portfolio.toml";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct PortfolioConfig {
    pub window: WindowConfig,
    pub scene: SceneConfig,
    pub links: LinkConfig,
    pub assets: AssetConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Unity Developer Portfolio".to_owned(),
            width: 1280,
            height: 720,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SceneConfig {
    /// Seed for the randomized layout and gauge walk. `None` = fresh entropy each run.
    pub seed: Option<u64>,
    pub star_count: usize,
    pub particle_count: usize,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            seed: None,
            star_count: 20_000,
            particle_count: 1_000,
        }
    }
}

/// Targets of the contact panel buttons.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LinkConfig {
    pub github_url: String,
    pub discord_app_url: String,
    pub discord_web_url: String,
    /// Site-absolute path of the downloadable resume, resolved against `assets.root`.
    pub resume_path: String,
    /// Program used to open URLs instead of the platform default (xdg-open, open, start).
    pub opener: Option<String>,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            github_url: "https://github.com/smartdev2048".to_owned(),
            discord_app_url: "discord://users/techmaster1992".to_owned(),
            discord_web_url: "https://discord.com/users/techmaster1992".to_owned(),
            resume_path: "/resume.pdf".to_owned(),
            opener: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AssetConfig {
    /// Directory that site-absolute paths like `/images/x.png` resolve against.
    pub root: PathBuf,
    pub placeholder: String,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("public"),
            placeholder: "/placeholder.svg".to_owned(),
        }
    }
}

impl AssetConfig {
    /// Map a site-absolute path onto the asset root.
    pub fn resolve(&self, site_path: &str) -> PathBuf {
        self.root.join(site_path.trim_start_matches('/'))
    }
}

impl PortfolioConfig {
    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, PortfolioError> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| PortfolioError::Config(e.to_string()))
    }

    /// Explicit path must load; otherwise fall back to `portfolio.toml`, then defaults.
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self, PortfolioError> {
        if let Some(path) = explicit {
            log::info!("Loading config from {}", path.display());
            return Self::load(path);
        }
        let implicit = Path::new(DEFAULT_CONFIG_FILE);
        if implicit.is_file() {
            log::info!("Loading config from {}", implicit.display());
            return Self::load(implicit);
        }
        Ok(Self::default())
    }

    pub fn to_toml(&self) -> Result<String, PortfolioError> {
        toml::to_string_pretty(self).map_err(|e| PortfolioError::Config(e.to_string()))
    }
}
