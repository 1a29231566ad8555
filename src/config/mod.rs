use std::fs;
use std::path::PathBuf;

use directories::UserDirs;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Gemini API key. May also come from `GEMINI_API_KEY`/`GOOGLE_API_KEY`.
    pub api_key: Option<String>,

    #[serde(default)]
    pub gateway: GatewayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    pub base_url: String,
    pub text_model: String,
    pub image_model: String,
    /// Per-request timeout. Poster synthesis is the slow path, so this is
    /// sized for the image model.
    pub request_timeout_secs: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            text_model: "gemini-3-flash-preview".to_string(),
            image_model: "gemini-2.5-flash-image".to_string(),
            request_timeout_secs: 120,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let home =
            UserDirs::new().map_or_else(|| PathBuf::from("."), |u| u.home_dir().to_path_buf());

        Self {
            config_path: home.join(".brandloom").join("config.toml"),
            api_key: None,
            gateway: GatewayConfig::default(),
        }
    }
}

impl Config {
    /// Load `~/.brandloom/config.toml`, writing a default file on first run.
    pub fn load_or_init() -> Result<Self> {
        let home = UserDirs::new()
            .map(|u| u.home_dir().to_path_buf())
            .ok_or_else(|| ConfigError::Load("could not find home directory".to_string()))?;
        let brandloom_dir = home.join(".brandloom");
        let config_path = brandloom_dir.join("config.toml");

        if !brandloom_dir.exists() {
            fs::create_dir_all(&brandloom_dir).map_err(ConfigError::Io)?;
        }

        if config_path.exists() {
            let contents = fs::read_to_string(&config_path).map_err(ConfigError::Io)?;
            let mut config: Config = toml::from_str(&contents)
                .map_err(|e| ConfigError::Load(format!("parse {}: {e}", config_path.display())))?;
            config.config_path = config_path;
            Ok(config)
        } else {
            let config = Self {
                config_path,
                ..Self::default()
            };
            config.save()?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        let toml_str =
            toml::to_string_pretty(self).map_err(|e| ConfigError::Save(e.to_string()))?;
        fs::write(&self.config_path, toml_str).map_err(ConfigError::Io)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gateway_defaults_point_at_the_public_endpoint() {
        let gateway = GatewayConfig::default();
        assert!(gateway.base_url.starts_with("https://generativelanguage"));
        assert_eq!(gateway.text_model, "gemini-3-flash-preview");
        assert_eq!(gateway.image_model, "gemini-2.5-flash-image");
        assert_eq!(gateway.request_timeout_secs, 120);
    }

    #[test]
    fn partial_toml_fills_in_gateway_defaults() {
        let config: Config = toml::from_str(
            r#"
            api_key = "sk-test"

            [gateway]
            text_model = "gemini-custom"
            "#,
        )
        .unwrap();
        assert_eq!(config.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.gateway.text_model, "gemini-custom");
        assert_eq!(config.gateway.request_timeout_secs, 120);
    }

    #[test]
    fn save_then_load_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let config = Config {
            config_path: path.clone(),
            api_key: Some("sk-roundtrip".to_string()),
            gateway: GatewayConfig::default(),
        };
        config.save().unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let loaded: Config = toml::from_str(&contents).unwrap();
        assert_eq!(loaded.api_key.as_deref(), Some("sk-roundtrip"));
        assert!(!contents.contains("config_path"));
    }
}
