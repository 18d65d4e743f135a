//! Event publishing toward the host (chat, stat refresh, logs)

use crate::error::{ArenaError, Result};
use crate::events::messages::ArenaEvent;
use async_trait::async_trait;
use std::sync::Mutex;
use tracing::{debug, info};

/// Trait for publishing solo arena events
#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, event: ArenaEvent) -> Result<()>;
}

/// Publisher that writes every event to the log as JSON
#[derive(Debug, Clone, Default)]
pub struct TracingEventPublisher;

#[async_trait]
impl EventPublisher for TracingEventPublisher {
    async fn publish(&self, event: ArenaEvent) -> Result<()> {
        let payload = serde_json::to_string(&event)?;
        info!(event_type = event.event_type(), "{}", payload);
        Ok(())
    }
}

/// Publisher that keeps events in memory for later inspection
#[derive(Debug, Default)]
pub struct RecordingEventPublisher {
    events: Mutex<Vec<ArenaEvent>>,
}

impl RecordingEventPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// All events published so far
    pub fn events(&self) -> Vec<ArenaEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Count events of a specific type
    pub fn count_events_of_type(&self, event_type: &str) -> usize {
        self.events()
            .iter()
            .filter(|event| event.event_type() == event_type)
            .count()
    }

    /// Remove and return all recorded events
    pub fn drain(&self) -> Vec<ArenaEvent> {
        self.events
            .lock()
            .map(|mut events| std::mem::take(&mut *events))
            .unwrap_or_default()
    }
}

#[async_trait]
impl EventPublisher for RecordingEventPublisher {
    async fn publish(&self, event: ArenaEvent) -> Result<()> {
        debug!("Recording {} event", event.event_type());
        let mut events = self.events.lock().map_err(|_| ArenaError::InternalError {
            message: "Failed to acquire events lock".to_string(),
        })?;
        events.push(event);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::messages::SystemMessage;
    use crate::utils::current_timestamp;

    fn message(player: u64) -> ArenaEvent {
        ArenaEvent::SystemMessage(SystemMessage {
            player,
            text: "hello".to_string(),
            timestamp: current_timestamp(),
        })
    }

    #[tokio::test]
    async fn test_recording_publisher() {
        let publisher = RecordingEventPublisher::new();
        publisher.publish(message(1)).await.unwrap();
        publisher.publish(message(2)).await.unwrap();

        assert_eq!(publisher.count_events_of_type("SystemMessage"), 2);
        assert_eq!(publisher.drain().len(), 2);
        assert!(publisher.events().is_empty());
    }

    #[test]
    fn test_tracing_publisher() {
        let publisher = TracingEventPublisher;
        tokio_test::block_on(publisher.publish(message(1))).unwrap();
    }
}
