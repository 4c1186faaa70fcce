use luma_quant::BitDepth;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Application configuration loaded from a YAML file
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Address the HTTP server listens on
    pub bind_addr: String,

    /// Largest accepted upload body, in bytes
    pub max_upload_bytes: usize,

    /// Largest accepted image width or height, in pixels
    pub max_dimension: u32,

    /// Bit depth used when a request does not name one
    pub default_bit_depth: u8,

    /// Number of originals kept in memory before the oldest is evicted
    pub store_capacity: usize,

    /// Re-compress exported PNGs with oxipng
    pub optimize_png: bool,
}

impl AppConfig {
    /// Load configuration from `CONFIG_FILE` (if set), then apply `BIND_ADDR`.
    pub fn from_env() -> Self {
        let config_file = std::env::var("CONFIG_FILE").ok().map(PathBuf::from);
        let mut config = Self::load(config_file.as_deref());
        if let Ok(bind_addr) = std::env::var("BIND_ADDR") {
            config.bind_addr = bind_addr;
        }
        config
    }

    /// Load configuration from a YAML file, falling back to defaults.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };
        match std::fs::read_to_string(path) {
            Ok(content) => match Self::from_yaml(&content) {
                Ok(config) => {
                    tracing::info!(
                        path = %path.display(),
                        default_bit_depth = config.default_bit_depth,
                        store_capacity = config.store_capacity,
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, path = %path.display(), "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, path = %path.display(), "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// Parse YAML; missing keys take their default values.
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    /// The configured default depth, or 8-bit if the configured value is invalid.
    pub fn default_depth(&self) -> BitDepth {
        BitDepth::new(self.default_bit_depth).unwrap_or_else(|e| {
            tracing::warn!(%e, "Invalid default_bit_depth, using 8");
            BitDepth::ORIGINAL
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3000".to_string(),
            max_upload_bytes: 32 * 1024 * 1024,
            max_dimension: 8192,
            default_bit_depth: 8,
            store_capacity: 64,
            optimize_png: false,
        }
    }
}
