// Streaming board service - Progressive loading of every configured timeline
use crate::application::timeline_service::TimelineService;
use crate::domain::board::{
    BoardSkeleton, CompletionEvent, StreamMessage, TimelineSkeleton, TimelineUpdate,
};
use std::time::Instant;
use tokio::sync::mpsc;

#[derive(Clone)]
pub struct StreamingBoardService {
    timeline_service: TimelineService,
}

impl StreamingBoardService {
    pub fn new(timeline_service: TimelineService) -> Self {
        Self { timeline_service }
    }

    pub async fn stream_board(&self, source: &str, hours: i32) -> mpsc::Receiver<StreamMessage> {
        let (tx, rx) = mpsc::channel(100);
        let start_time = Instant::now();

        // 1. Skeleton goes out before any upstream query
        let skeleton = self.build_skeleton(source, hours);
        let total_timelines = skeleton.timelines.len();
        let _ = tx.send(StreamMessage::Skeleton(skeleton)).await;

        // 2. One task per timeline
        let mut handles = Vec::with_capacity(total_timelines);
        for timeline in self.timeline_service.list_timelines() {
            let tx = tx.clone();
            let service = self.timeline_service.clone();
            let timeline = timeline.clone();
            let source = source.to_string();

            handles.push(tokio::spawn(async move {
                match service.load_series(&timeline, &source, hours).await {
                    Ok(Some(series)) => {
                        let update = TimelineUpdate {
                            id: timeline.id,
                            series,
                        };
                        let _ = tx.send(StreamMessage::TimelineUpdate(update)).await;
                    }
                    Ok(None) => {
                        tracing::debug!("No samples for timeline {} of {}", timeline.id, source);
                    }
                    Err(e) => {
                        tracing::error!("Error loading timeline {} of {}: {:#}", timeline.id, source, e);
                    }
                }
            }));
        }

        // 3. Completion once every timeline task is done
        tokio::spawn(async move {
            for result in futures::future::join_all(handles).await {
                if let Err(e) = result {
                    tracing::error!("Timeline task failed: {}", e);
                }
            }

            let complete = CompletionEvent {
                timelines: total_timelines,
                duration_ms: start_time.elapsed().as_millis() as i64,
            };
            let _ = tx.send(StreamMessage::Complete(complete)).await;
        });

        rx
    }

    fn build_skeleton(&self, source: &str, hours: i32) -> BoardSkeleton {
        let timelines = self
            .timeline_service
            .list_timelines()
            .iter()
            .map(|t| TimelineSkeleton {
                id: t.id.clone(),
                title: t.title.clone(),
                unit: t.unit.clone(),
            })
            .collect();

        BoardSkeleton {
            source: source.to_string(),
            hours,
            timelines,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::timeline_service::tests::{service, timeline, StaticRepository};
    use crate::domain::risk::Risk;
    use crate::domain::series::Sample;

    async fn collect(mut rx: mpsc::Receiver<StreamMessage>) -> Vec<StreamMessage> {
        let mut messages = Vec::new();
        while let Some(msg) = rx.recv().await {
            messages.push(msg);
        }
        messages
    }

    #[tokio::test]
    async fn test_stream_board_order() {
        let mut repository = StaticRepository::default();
        repository.samples.insert(
            "metrics/checkout/latency?h=6".to_string(),
            vec![Sample::new(1, 1.0, Risk::Healthy), Sample::new(2, 1.0, Risk::Warning)],
        );
        repository.samples.insert(
            "metrics/checkout/errors?h=6".to_string(),
            vec![Sample::new(1, 0.0, Risk::Healthy)],
        );
        repository.failing.push("metrics/checkout/saturation?h=6".to_string());

        let timelines = vec![
            timeline("latency", None),
            timeline("errors", None),
            timeline("saturation", None),
            timeline("throughput", None),
        ];
        let streaming = StreamingBoardService::new(service(repository, timelines));

        let messages = collect(streaming.stream_board("checkout", 6).await).await;

        match messages.first() {
            Some(StreamMessage::Skeleton(skeleton)) => {
                assert_eq!(skeleton.source, "checkout");
                assert_eq!(skeleton.timelines.len(), 4);
            }
            other => panic!("expected skeleton first, got {:?}", other),
        }

        match messages.last() {
            Some(StreamMessage::Complete(complete)) => assert_eq!(complete.timelines, 4),
            other => panic!("expected completion last, got {:?}", other),
        }

        let mut updated: Vec<String> = messages
            .iter()
            .filter_map(|m| match m {
                StreamMessage::TimelineUpdate(update) => Some(update.id.clone()),
                _ => None,
            })
            .collect();
        updated.sort();
        assert_eq!(updated, vec!["errors".to_string(), "latency".to_string()]);
    }

    #[tokio::test]
    async fn test_stream_board_without_timelines() {
        let streaming = StreamingBoardService::new(service(StaticRepository::default(), Vec::new()));
        let messages = collect(streaming.stream_board("checkout", 1).await).await;

        assert_eq!(messages.len(), 2);
        assert!(matches!(messages[1], StreamMessage::Complete(ref c) if c.timelines == 0));
    }

    #[test]
    fn test_stream_message_is_tagged() {
        let msg = StreamMessage::Complete(CompletionEvent {
            timelines: 3,
            duration_ms: 42,
        });
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"type": "complete", "timelines": 3, "duration_ms": 42})
        );
    }
}
