// Messages of a progressively loaded board
use super::series::Series;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct TimelineSkeleton {
    pub id: String,
    pub title: String,
    pub unit: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BoardSkeleton {
    pub source: String,
    pub hours: i32,
    pub timelines: Vec<TimelineSkeleton>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TimelineUpdate {
    pub id: String,
    pub series: Series,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompletionEvent {
    pub timelines: usize,
    pub duration_ms: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StreamMessage {
    Skeleton(BoardSkeleton),
    TimelineUpdate(TimelineUpdate),
    Complete(CompletionEvent),
}
