// Risk levels and their color resolution
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

/// Categorical health indicator attached to a sample.
///
/// Known levels are ordered by severity (see [`Risk::severity`]). Anything the
/// backend sends that is not a known level is kept as `Unrecognized` so a
/// partial payload still deserializes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Risk {
    NoData,
    NoAnalysis,
    Healthy,
    Observe,
    Warning,
    NeedAttention,
    Unhealthy,
    Unrecognized(String),
}

impl Risk {
    pub const KNOWN: [Risk; 7] = [
        Risk::NoData,
        Risk::NoAnalysis,
        Risk::Healthy,
        Risk::Observe,
        Risk::Warning,
        Risk::NeedAttention,
        Risk::Unhealthy,
    ];

    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_uppercase().as_str() {
            "NO_DATA" => Risk::NoData,
            "NO_ANALYSIS" => Risk::NoAnalysis,
            "HEALTHY" => Risk::Healthy,
            "OBSERVE" => Risk::Observe,
            "WARNING" => Risk::Warning,
            "NEED_ATTENTION" => Risk::NeedAttention,
            "UNHEALTHY" => Risk::Unhealthy,
            _ => Risk::Unrecognized(raw.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Risk::NoData => "NO_DATA",
            Risk::NoAnalysis => "NO_ANALYSIS",
            Risk::Healthy => "HEALTHY",
            Risk::Observe => "OBSERVE",
            Risk::Warning => "WARNING",
            Risk::NeedAttention => "NEED_ATTENTION",
            Risk::Unhealthy => "UNHEALTHY",
            Risk::Unrecognized(raw) => raw,
        }
    }

    /// Severity rank, `None` for unrecognized levels.
    pub fn severity(&self) -> Option<u8> {
        match self {
            Risk::NoData => Some(0),
            Risk::NoAnalysis => Some(1),
            Risk::Healthy => Some(2),
            Risk::Observe => Some(3),
            Risk::Warning => Some(4),
            Risk::NeedAttention => Some(5),
            Risk::Unhealthy => Some(6),
            Risk::Unrecognized(_) => None,
        }
    }
}

impl fmt::Display for Risk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Risk {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Risk {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Risk::parse(&raw))
    }
}

/// Color of a zone. `Unknown` never equals a resolved color, whatever the
/// palette contains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ZoneColor {
    Resolved(String),
    Unknown,
}

impl ZoneColor {
    pub const UNKNOWN_TOKEN: &'static str = "unknown";

    pub fn token(&self) -> &str {
        match self {
            ZoneColor::Resolved(token) => token,
            ZoneColor::Unknown => Self::UNKNOWN_TOKEN,
        }
    }
}

impl Serialize for ZoneColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.token())
    }
}

/// Maps a sample's risk to the color its zone is drawn with.
pub trait ColorResolver: Send + Sync {
    fn resolve(&self, risk: Option<&Risk>) -> ZoneColor;
}

impl<F> ColorResolver for F
where
    F: Fn(Option<&Risk>) -> ZoneColor + Send + Sync,
{
    fn resolve(&self, risk: Option<&Risk>) -> ZoneColor {
        self(risk)
    }
}

/// Fixed risk -> color token table.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: HashMap<Risk, String>,
}

impl Palette {
    pub fn new(colors: HashMap<Risk, String>) -> Self {
        // Unrecognized keys can never be looked up, drop them
        let colors = colors
            .into_iter()
            .filter(|(risk, _)| risk.severity().is_some())
            .collect();
        Self { colors }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

impl Default for Palette {
    fn default() -> Self {
        let colors = Risk::KNOWN
            .into_iter()
            .map(|risk| {
                let token = match risk {
                    Risk::NoData | Risk::NoAnalysis => "grey",
                    Risk::Healthy => "green",
                    Risk::Observe => "yellow",
                    Risk::Warning | Risk::NeedAttention => "orange",
                    _ => "red",
                };
                (risk, token.to_string())
            })
            .collect();
        Self { colors }
    }
}

impl ColorResolver for Palette {
    fn resolve(&self, risk: Option<&Risk>) -> ZoneColor {
        risk.and_then(|r| self.colors.get(r))
            .map(|token| ZoneColor::Resolved(token.clone()))
            .unwrap_or(ZoneColor::Unknown)
    }
}
