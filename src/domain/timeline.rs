// Timeline chart domain model
use super::series::Series;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct TimelineChart {
    pub id: String,
    pub title: String,
    pub unit: Option<String>,
    pub source: String,
    pub hours: i32,
    /// `None` when the upstream returned no samples for the window
    pub series: Option<Series>,
}

impl TimelineChart {
    pub fn new(
        id: String,
        title: String,
        unit: Option<String>,
        source: String,
        hours: i32,
        series: Option<Series>,
    ) -> Self {
        Self {
            id,
            title,
            unit,
            source,
            hours,
            series,
        }
    }
}
