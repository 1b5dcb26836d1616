//! Game configuration
//!
//! Broker endpoint, paddle node ids and the physical court range. Persisted as
//! JSON (LocalStorage on web, a file for the native replay driver).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::sim::PaddleSide;

/// Physical range along the paddle axis (meters)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CourtRange {
    pub x_min_meters: f32,
    pub x_max_meters: f32,
}

impl Default for CourtRange {
    fn default() -> Self {
        Self {
            x_min_meters: 6.1,
            x_max_meters: 7.7,
        }
    }
}

impl CourtRange {
    pub fn new(x_min_meters: f32, x_max_meters: f32) -> Self {
        Self {
            x_min_meters,
            x_max_meters,
        }
    }
}

/// MQTT broker connection parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BrokerConfig {
    pub host: String,
    pub port: u16,
    /// `wss` or `ws`
    pub protocol: String,
    pub username: String,
    pub password: String,
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            host: "YOUR_MQTT_HOSTNAME_HERE".to_string(),
            port: 9001,
            protocol: "wss".to_string(),
            username: "YOUR_USERNAME_HERE".to_string(),
            password: "YOUR_PASSWORD_HERE".to_string(),
        }
    }
}

impl BrokerConfig {
    /// WebSocket URL for the broker
    pub fn url(&self) -> String {
        format!("{}://{}:{}", self.protocol, self.host, self.port)
    }
}

/// Full game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub broker: BrokerConfig,
    /// Topic namespace of the location uplink (`<namespace>/node/<id>/...`)
    pub namespace: String,
    pub left_paddle_node_id: String,
    pub right_paddle_node_id: String,
    pub court: CourtRange,
    /// Moving average window length (1 = no smoothing)
    pub position_average_count: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            broker: BrokerConfig::default(),
            namespace: "dwm".to_string(),
            left_paddle_node_id: "4a96".to_string(),
            right_paddle_node_id: "9a93".to_string(),
            court: CourtRange::default(),
            position_average_count: 1,
        }
    }
}

/// Configuration errors
#[derive(Debug)]
pub enum ConfigError {
    /// JSON could not be parsed into a `Config`
    Parse(serde_json::Error),
    /// Court range is empty, inverted or not finite
    InvalidCourtRange { x_min_meters: f32, x_max_meters: f32 },
    /// A paddle node id is empty
    EmptyNodeId(PaddleSide),
    /// Both paddles use the same node
    DuplicateNodeId(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(e) => write!(f, "invalid config JSON: {}", e),
            ConfigError::InvalidCourtRange {
                x_min_meters,
                x_max_meters,
            } => write!(
                f,
                "court range [{}, {}] must be finite with min < max",
                x_min_meters, x_max_meters
            ),
            ConfigError::EmptyNodeId(side) => write!(f, "{:?} paddle node id is empty", side),
            ConfigError::DuplicateNodeId(id) => {
                write!(f, "both paddles use node id {}", id)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl Config {
    /// Parse and validate a JSON config. Missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let CourtRange {
            x_min_meters,
            x_max_meters,
        } = self.court;
        if !x_min_meters.is_finite() || !x_max_meters.is_finite() || x_max_meters <= x_min_meters {
            return Err(ConfigError::InvalidCourtRange {
                x_min_meters,
                x_max_meters,
            });
        }
        if self.left_paddle_node_id.is_empty() {
            return Err(ConfigError::EmptyNodeId(PaddleSide::Left));
        }
        if self.right_paddle_node_id.is_empty() {
            return Err(ConfigError::EmptyNodeId(PaddleSide::Right));
        }
        if self.left_paddle_node_id == self.right_paddle_node_id {
            return Err(ConfigError::DuplicateNodeId(
                self.left_paddle_node_id.clone(),
            ));
        }
        Ok(())
    }

    /// Node id assigned to a paddle
    pub fn node_id(&self, side: PaddleSide) -> &str {
        match side {
            PaddleSide::Left => &self.left_paddle_node_id,
            PaddleSide::Right => &self.right_paddle_node_id,
        }
    }

    /// Location uplink topic for a paddle
    pub fn location_topic(&self, side: PaddleSide) -> String {
        format!(
            "{}/node/{}/uplink/location",
            self.namespace,
            self.node_id(side)
        )
    }

    /// Both subscription topics, left first
    pub fn subscriptions(&self) -> [String; 2] {
        [
            self.location_topic(PaddleSide::Left),
            self.location_topic(PaddleSide::Right),
        ]
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "uwb_pong_config";

    /// Load config from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json_str(&json) {
                    Ok(config) => {
                        log::info!("Loaded config from LocalStorage");
                        return config;
                    }
                    Err(e) => log::warn!("Stored config rejected: {}", e),
                }
            }
        }

        log::info!("Using default config");
        Self::default()
    }

    /// Load config from a JSON file (native only)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_file(path: &std::path::Path) -> anyhow::Result<Self> {
        use anyhow::Context;

        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = Self::from_json_str(&json)
            .with_context(|| format!("loading config {}", path.display()))?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }
}
