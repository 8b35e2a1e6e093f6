// Repository trait for risk sample access
use crate::domain::series::Sample;
use async_trait::async_trait;

/// What to fetch: a resolved upstream path for one source and time window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineQuery {
    pub path: String,
    pub source: String,
    pub hours: i32,
}

#[async_trait]
pub trait SampleRepository: Send + Sync {
    /// Fetch the raw risk-annotated samples of a timeline, in any order
    async fn fetch_samples(&self, query: &TimelineQuery) -> anyhow::Result<Vec<Sample>>;
}
