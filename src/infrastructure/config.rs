use crate::domain::risk::{Palette, Risk};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";
const DEFAULT_MAX_POINTS: usize = 150;

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default)]
    pub server: ServerSettings,
    pub upstream: UpstreamSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct UpstreamSettings {
    pub host: String,
    #[serde(default)]
    pub token: String,
    #[serde(default = "default_max_points")]
    pub max_points: usize,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct PaletteConfig {
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

impl PaletteConfig {
    /// Build the palette; a table without any usable entry falls back to the
    /// built-in colors.
    pub fn into_palette(self) -> Palette {
        if self.colors.is_empty() {
            return Palette::default();
        }

        let colors = self
            .colors
            .into_iter()
            .filter_map(|(key, token)| match Risk::parse(&key) {
                Risk::Unrecognized(_) => {
                    tracing::warn!("Ignoring palette entry for unknown risk level: {}", key);
                    None
                }
                risk => Some((risk, token)),
            })
            .collect();

        let palette = Palette::new(colors);
        if palette.is_empty() {
            tracing::warn!("No usable palette entries, using built-in colors");
            return Palette::default();
        }

        palette
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct TimelinesConfig {
    #[serde(default)]
    pub timelines: Vec<TimelineConfig>,
}

impl TimelinesConfig {
    pub fn find(&self, id: &str) -> Option<&TimelineConfig> {
        self.timelines.iter().find(|t| t.id == id)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TimelineConfig {
    pub id: String,
    pub title: String,
    pub unit: Option<String>,
    /// Upstream path template, may use `${source}` and `${hours}`
    #[serde(skip_serializing)]
    pub path: String,
    #[serde(default, skip_serializing)]
    pub max_points: Option<usize>,
}

fn default_bind_address() -> String {
    DEFAULT_BIND_ADDRESS.to_string()
}

fn default_max_points() -> usize {
    DEFAULT_MAX_POINTS
}

pub fn load_server_config() -> anyhow::Result<ServerConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/server"))
        .add_source(config::Environment::with_prefix("RISK_TIMELINE").separator("__"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

pub fn load_palette_config() -> anyhow::Result<PaletteConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/palette").required(false))
        .build()?;

    Ok(settings.try_deserialize()?)
}

pub fn load_timelines_config() -> anyhow::Result<TimelinesConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/timelines"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

/// Replace template variables in a path or query string
pub fn prepare_template(template: &str, vars: &HashMap<String, String>) -> String {
    let mut result = template.to_string();
    for (key, value) in vars {
        let placeholder = format!("${{{}}}", key);
        result = result.replace(&placeholder, value);
    }
    result
}
