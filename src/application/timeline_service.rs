// Timeline service - Use case for building risk-zoned charts
use crate::application::sample_repository::{SampleRepository, TimelineQuery};
use crate::domain::bucketizer::{bucketize, BucketizeError};
use crate::domain::downsample::downsample;
use crate::domain::risk::ColorResolver;
use crate::domain::series::Series;
use crate::domain::timeline::TimelineChart;
use crate::infrastructure::config::{prepare_template, TimelineConfig, TimelinesConfig};
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Clone)]
pub struct TimelineService {
    repository: Arc<dyn SampleRepository>,
    resolver: Arc<dyn ColorResolver>,
    timelines: Arc<TimelinesConfig>,
    max_points: usize,
}

impl TimelineService {
    pub fn new(
        repository: Arc<dyn SampleRepository>,
        resolver: Arc<dyn ColorResolver>,
        timelines: TimelinesConfig,
        max_points: usize,
    ) -> Self {
        Self {
            repository,
            resolver,
            timelines: Arc::new(timelines),
            max_points,
        }
    }

    pub fn list_timelines(&self) -> &[TimelineConfig] {
        &self.timelines.timelines
    }

    pub async fn get_timeline(
        &self,
        timeline_id: &str,
        source: &str,
        hours: i32,
    ) -> anyhow::Result<Option<TimelineChart>> {
        let Some(timeline) = self.timelines.find(timeline_id) else {
            return Ok(None);
        };

        let series = self.load_series(timeline, source, hours).await?;

        Ok(Some(TimelineChart::new(
            timeline.id.clone(),
            timeline.title.clone(),
            timeline.unit.clone(),
            source.to_string(),
            hours,
            series,
        )))
    }

    /// Fetch, downsample and bucketize one timeline. `None` means no data.
    pub async fn load_series(
        &self,
        timeline: &TimelineConfig,
        source: &str,
        hours: i32,
    ) -> anyhow::Result<Option<Series>> {
        let query = Self::build_query(timeline, source, hours);
        tracing::debug!("Fetching samples for timeline {} from {}", timeline.id, query.path);

        let mut samples = self.repository.fetch_samples(&query).await?;
        let fetched = samples.len();

        samples.sort_by_key(|s| s.sort_key());
        let samples = downsample(samples, timeline.max_points.unwrap_or(self.max_points));

        tracing::debug!(
            "Timeline {}: {} samples fetched, {} after downsampling",
            timeline.id,
            fetched,
            samples.len()
        );

        match bucketize(&samples, self.resolver.as_ref()) {
            Ok(series) => Ok(Some(series)),
            Err(BucketizeError::EmptyInput) => Ok(None),
        }
    }

    fn build_query(timeline: &TimelineConfig, source: &str, hours: i32) -> TimelineQuery {
        let mut vars = HashMap::new();
        vars.insert("source".to_string(), source.to_string());
        vars.insert("hours".to_string(), hours.to_string());

        TimelineQuery {
            path: prepare_template(&timeline.path, &vars),
            source: source.to_string(),
            hours,
        }
    }
}
