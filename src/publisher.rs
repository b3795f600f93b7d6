use crate::types::{OutcomeEvent, Result, WorkerError};
use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::info;

/// Trait for handing a terminal outcome event to a downstream sink.
#[async_trait]
pub trait PublishOutcome: Send + Sync {
    async fn publish(&self, event: &OutcomeEvent) -> Result<()>;
}

/// Publisher that logs the event as pretty-printed JSON.
pub struct LogPublisher;

#[async_trait]
impl PublishOutcome for LogPublisher {
    async fn publish(&self, event: &OutcomeEvent) -> Result<()> {
        let payload = serde_json::to_string_pretty(event)
            .map_err(|e| WorkerError::Publish(e.to_string()))?;
        info!("Publishing outcome event:\n{}", payload);
        Ok(())
    }
}

/// Publisher that forwards events into an in-process channel, so an
/// embedding application (or test) can consume the outcome stream.
pub struct ChannelPublisher {
    sender: mpsc::UnboundedSender<OutcomeEvent>,
}

impl ChannelPublisher {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<OutcomeEvent>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

#[async_trait]
impl PublishOutcome for ChannelPublisher {
    async fn publish(&self, event: &OutcomeEvent) -> Result<()> {
        self.sender
            .send(event.clone())
            .map_err(|e| WorkerError::Publish(e.to_string()))
    }
}
