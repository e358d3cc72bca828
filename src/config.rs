use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::records::{Fragility, TopN};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub defaults: DefaultsConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BackendConfig {
    #[serde(default = "default_backend_url")]
    pub url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct DefaultsConfig {
    #[serde(default)]
    pub top_n: TopN,
    #[serde(default)]
    pub fragility: Fragility,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DisplayConfig {
    #[serde(default = "default_true")]
    pub chart: bool,
    #[serde(default = "default_chart_width")]
    pub chart_width: usize,
}

#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub backend_url: Option<String>,
    pub api_key: Option<String>,
}

impl Config {
    pub fn default_path() -> PathBuf {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.join(".config/ecopack-dash/config.toml")
    }

    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path
            .map(|p| p.to_path_buf())
            .unwrap_or_else(Self::default_path);
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = fs::read_to_string(&path)
            .with_context(|| format!("failed reading config: {}", path.display()))?;
        let parsed: Self = toml::from_str(&data)
            .with_context(|| format!("failed parsing TOML config: {}", path.display()))?;
        Ok(parsed)
    }

    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(url) = overrides.backend_url {
            self.backend.url = url;
        }
        if let Some(api_key) = overrides.api_key {
            self.backend.api_key = api_key;
        }
    }

    pub fn write_template(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed creating config directory: {}", parent.display())
            })?;
        }
        fs::write(path, Self::default_template())
            .with_context(|| format!("failed writing config template: {}", path.display()))
    }

    /// Copy safe to print: the api key is masked.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if !copy.backend.api_key.is_empty() {
            copy.backend.api_key = "********".to_string();
        }
        copy
    }

    pub fn default_template() -> String {
        let template = r#"[backend]
url = "http://127.0.0.1:5000"
# sent as the x-api-key header when set
api_key = ""
timeout_secs = 12
connect_timeout_secs = 6

[defaults]
top_n = 5
fragility = "auto"

[display]
chart = true
chart_width = 40
"#;
        template.to_string()
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: default_backend_url(),
            api_key: String::new(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            chart: true,
            chart_width: default_chart_width(),
        }
    }
}

fn default_backend_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_timeout_secs() -> u64 {
    12
}

fn default_connect_timeout_secs() -> u64 {
    6
}

fn default_chart_width() -> usize {
    40
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_parses_to_defaults() {
        let parsed: Config = toml::from_str(&Config::default_template()).expect("template");
        assert_eq!(parsed, Config::default());
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = Config::load(Some(&dir.path().join("absent.toml"))).expect("load");
        assert_eq!(config.backend.url, "http://127.0.0.1:5000");
        assert_eq!(config.defaults.top_n, TopN::Five);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[backend]\nurl = \"https://eco.example.com\"\n[defaults]\ntop_n = 10\nfragility = \"high\"\n",
        )
        .expect("write");
        let config = Config::load(Some(&path)).expect("load");
        assert_eq!(config.backend.url, "https://eco.example.com");
        assert_eq!(config.backend.timeout_secs, 12);
        assert_eq!(config.defaults.top_n, TopN::Ten);
        assert_eq!(config.defaults.fragility, Fragility::High);
        assert!(config.display.chart);
    }

    #[test]
    fn rejects_unsupported_top_n() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "[defaults]\ntop_n = 7\n").expect("write");
        assert!(Config::load(Some(&path)).is_err());
    }

    #[test]
    fn write_template_creates_parent_dirs() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested/dir/config.toml");
        Config::write_template(&path).expect("write template");
        assert_eq!(Config::load(Some(&path)).expect("load"), Config::default());
    }

    #[test]
    fn overrides_and_redaction() {
        let mut config = Config::default();
        config.apply_overrides(ConfigOverrides {
            backend_url: Some("http://10.0.0.5:8080".to_string()),
            api_key: Some("secret".to_string()),
        });
        assert_eq!(config.backend.url, "http://10.0.0.5:8080");
        assert_eq!(config.redacted().backend.api_key, "********");
        assert_eq!(config.backend.api_key, "secret");
    }
}
