use anyhow::{Result, anyhow};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

const DEFAULT_CONFIG: &str = include_str!("../../config/default.toml");

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub general: GeneralConfig,
    pub icons: IconConfig,
    pub host: HostConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeneralConfig {
    /// Forum install root; icon directory is resolved against it.
    pub install_root: String,
    /// Where the file-backed cache, templates and logs live.
    #[serde(default)]
    pub data_dir: Option<String>,
    pub log_filter: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IconConfig {
    pub directory: String,
    pub class: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HostConfig {
    pub namespace: String,
    pub template: String,
    pub plugins_url: String,
}

impl AppConfig {
    /// Load configuration with layering: defaults → user config.
    pub fn load() -> Result<Self> {
        let mut config = Self::defaults()?;

        if let Some(proj_dirs) = directories::ProjectDirs::from("", "", "heroicon") {
            let config_path = proj_dirs.config_dir().join("config.toml");
            if config_path.exists() {
                let user_str = fs::read_to_string(&config_path)?;
                config = Self::from_toml_str(&user_str)?;
                tracing::debug!("loaded user config from {}", config_path.display());
            }
        }

        config.expand_paths()?;
        Ok(config)
    }

    /// The embedded defaults, without any user overrides.
    pub fn defaults() -> Result<Self> {
        Self::from_toml_str(DEFAULT_CONFIG)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    pub fn install_root(&self) -> PathBuf {
        PathBuf::from(&self.general.install_root)
    }

    pub fn icon_dir(&self) -> PathBuf {
        self.install_root().join(&self.icons.directory)
    }

    pub fn data_dir(&self) -> PathBuf {
        if let Some(dir) = self.general.data_dir.as_ref() {
            return PathBuf::from(dir);
        }

        directories::ProjectDirs::from("", "", "heroicon")
            .map(|d| d.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from(".heroicon"))
    }

    fn expand_paths(&mut self) -> Result<()> {
        if self.general.install_root.starts_with('~') {
            self.general.install_root = expand_tilde(&self.general.install_root)?;
        }

        if let Some(dir) = self.general.data_dir.as_ref().filter(|d| d.starts_with('~')) {
            self.general.data_dir = Some(expand_tilde(dir)?);
        }

        Ok(())
    }
}

fn expand_tilde(path: &str) -> Result<String> {
    let home = dirs_home().ok_or_else(|| anyhow!("cannot determine home directory"))?;
    Ok(path.replacen('~', &home.to_string_lossy(), 1))
}

fn dirs_home() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|d| d.home_dir().to_path_buf())
}
