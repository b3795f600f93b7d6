use crate::config::WorkerConfig;
use crate::detector::{DetectionClient, RunDetection};
use crate::mapper::AnnotationMapper;
use crate::publisher::{LogPublisher, PublishOutcome};
use crate::types::{AnnotationJob, OutcomeEvent, Result, WorkerError};
use async_trait::async_trait;
use backoff::{backoff::Backoff, exponential::ExponentialBackoff};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};
use url::Url;

/// Capability for marking a job as running in some external system.
///
/// Best-effort: a notification has no failure semantics and must never
/// fail the job.
#[async_trait]
pub trait NotifyRunning: Send + Sync {
    async fn notify(&self, job_id: &str);
}

/// Default notifier that only logs the state change.
pub struct LogNotifier;

#[async_trait]
impl NotifyRunning for LogNotifier {
    async fn notify(&self, job_id: &str) {
        info!("Marking job {} as running", job_id);
    }
}

/// Per-job orchestrator: pulls one job at a time through detection and
/// mapping, then emits exactly one outcome event.
///
/// Holds no cross-job state and never retries a failed job itself; the
/// queue's at-least-once redelivery covers that, and processing is safe
/// to re-run for the same payload.
pub struct AnnotationWorker {
    detector: Arc<dyn RunDetection>,
    mapper: AnnotationMapper,
    notifier: Arc<dyn NotifyRunning>,
    publisher: Arc<dyn PublishOutcome>,
    config: WorkerConfig,
}

impl AnnotationWorker {
    pub fn new(config: WorkerConfig) -> Self {
        let detector = Arc::new(DetectionClient::new(&config));
        Self {
            detector,
            mapper: AnnotationMapper::new(),
            notifier: Arc::new(LogNotifier),
            publisher: Arc::new(LogPublisher),
            config,
        }
    }

    pub fn with_detector(mut self, detector: Arc<dyn RunDetection>) -> Self {
        self.detector = detector;
        self
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn NotifyRunning>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn with_publisher(mut self, publisher: Arc<dyn PublishOutcome>) -> Self {
        self.publisher = publisher;
        self
    }

    /// Consume jobs from the queue seam until the channel closes.
    pub async fn run(&self, mut jobs: mpsc::UnboundedReceiver<Value>) {
        info!("Worker consuming jobs");
        while let Some(payload) = jobs.recv().await {
            self.process(payload).await;
        }
        info!("Job stream closed, worker stopping");
    }

    /// Process a single raw job payload to its terminal outcome.
    ///
    /// Every failure before the terminal state is converted into a failure
    /// event carrying the job id, or the sentinel "unknown" when the id
    /// itself could not be extracted. Nothing propagates out of here.
    pub async fn process(&self, payload: Value) {
        let job_id = payload
            .get("jobId")
            .and_then(Value::as_str)
            .unwrap_or("unknown")
            .to_string();

        info!("Processing job {}", job_id);

        let event = match self.run_job(&job_id, &payload).await {
            Ok(event) => event,
            Err(e) => {
                error!("Job {} failed: {}", job_id, e);
                OutcomeEvent::Failure {
                    job_id: job_id.clone(),
                    error: e.to_string(),
                }
            }
        };

        self.publish_with_retry(event).await;
    }

    async fn run_job(&self, job_id: &str, payload: &Value) -> Result<OutcomeEvent> {
        self.notifier.notify(job_id).await;

        let job: AnnotationJob = serde_json::from_value(payload.clone())
            .map_err(|e| WorkerError::MalformedJob(format!("invalid job payload: {}", e)))?;

        let access_uri = job
            .object
            .access_uri
            .as_deref()
            .filter(|uri| !uri.is_empty())
            .ok_or_else(|| {
                WorkerError::MalformedJob(format!(
                    "job {} has no image access URI",
                    job.job_id
                ))
            })?;

        Url::parse(access_uri).map_err(|e| {
            WorkerError::MalformedJob(format!("invalid access URI {}: {}", access_uri, e))
        })?;

        debug!("Job {} awaiting detection for {}", job.job_id, access_uri);
        let detection = self.detector.detect(access_uri).await?;

        debug!("Job {} mapping {} detections", job.job_id, detection.output.len());
        let annotations = self.mapper.map(
            &job.object,
            &detection.output,
            detection.image_height,
            detection.image_width,
        )?;

        info!(
            "Job {} produced {} annotations",
            job.job_id,
            annotations.len()
        );
        Ok(OutcomeEvent::Success {
            job_id: job.job_id,
            annotations,
        })
    }

    /// Hand the outcome event to the publisher, retrying rejected deliveries
    /// with exponential backoff. After the configured attempts the event is
    /// dropped with an error log; delivery is always attempted at least once.
    async fn publish_with_retry(&self, event: OutcomeEvent) {
        let delay = Duration::from_secs(self.config.publish_retry_delay_seconds);
        let mut backoff: ExponentialBackoff<backoff::SystemClock> = ExponentialBackoff {
            current_interval: delay,
            initial_interval: delay,
            max_interval: delay * 8,
            multiplier: 2.0,
            max_elapsed_time: None,
            ..Default::default()
        };

        let mut last_error = None;

        for attempt in 0..=self.config.publish_retries {
            match self.publisher.publish(&event).await {
                Ok(()) => {
                    debug!("Published outcome event for job {}", event.job_id());
                    return;
                }
                Err(e) => {
                    if attempt < self.config.publish_retries {
                        if let Some(wait) = backoff.next_backoff() {
                            warn!(
                                "Publish attempt {} failed for job {}: {}, retrying in {:?}",
                                attempt + 1,
                                event.job_id(),
                                e,
                                wait
                            );
                            tokio::time::sleep(wait).await;
                            last_error = Some(e);
                            continue;
                        }
                    }
                    last_error = Some(e);
                    break;
                }
            }
        }

        let error_msg = last_error
            .map(|e| e.to_string())
            .unwrap_or_else(|| "unknown error".to_string());
        error!(
            "Dropping outcome event for job {} after {} attempts: {}",
            event.job_id(),
            self.config.publish_retries + 1,
            error_msg
        );
    }
}
