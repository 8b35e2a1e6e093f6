// Risk-annotated samples and the chart series built from them
use super::risk::{Risk, ZoneColor};
use serde::{Deserialize, Serialize};

/// One raw observation as delivered by the upstream API.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Sample {
    pub timestamp: Option<i64>,
    pub value: Option<f64>,
    pub risk: Option<Risk>,
}

impl Sample {
    pub fn new(timestamp: i64, value: f64, risk: Risk) -> Self {
        Self {
            timestamp: Some(timestamp),
            value: Some(value),
            risk: Some(risk),
        }
    }

    /// Sort key; a missing timestamp orders as 0.
    pub fn sort_key(&self) -> i64 {
        self.timestamp.unwrap_or(0)
    }

    /// Timestamp, value and risk all present
    pub fn is_complete(&self) -> bool {
        self.timestamp.is_some() && self.value.is_some() && self.risk.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotPoint {
    pub x: i64,
    pub y: Option<f64>,
    /// Drawn with a transparent marker
    pub gap: bool,
}

impl PlotPoint {
    pub fn value(x: i64, y: f64) -> Self {
        Self {
            x,
            y: Some(y),
            gap: false,
        }
    }

    pub fn gap(x: i64) -> Self {
        Self {
            x,
            y: None,
            gap: true,
        }
    }
}

/// A contiguous run of points sharing one color. `end` is where the next
/// zone starts; the last zone of a series is open.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Zone {
    pub end: Option<i64>,
    pub color: ZoneColor,
}

impl Zone {
    pub fn open(color: ZoneColor) -> Self {
        Self { end: None, color }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub points: Vec<PlotPoint>,
    pub zones: Vec<Zone>,
}
