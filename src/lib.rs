pub mod agent;
pub mod config;
pub mod detector;
pub mod mapper;
pub mod publisher;
pub mod selector;
pub mod types;
pub mod worker;

pub use config::WorkerConfig;
pub use detector::{DetectionClient, RunDetection};
pub use mapper::AnnotationMapper;
pub use publisher::{ChannelPublisher, LogPublisher, PublishOutcome};
pub use types::*;
pub use worker::{AnnotationWorker, LogNotifier, NotifyRunning};
