// Application state for HTTP handlers
use crate::application::streaming_service::StreamingBoardService;
use crate::application::timeline_service::TimelineService;

#[derive(Clone)]
pub struct AppState {
    pub timeline_service: TimelineService,
    pub streaming_service: StreamingBoardService,
}
