use annotation_worker::{AnnotationWorker, WorkerConfig};
use serde_json::json;
use tokio::sync::mpsc;
use tracing::info;
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = WorkerConfig::from_env();
    info!(
        "Starting annotation worker (detection endpoint: {})",
        config.detection_endpoint
    );

    let worker = AnnotationWorker::new(config);

    // Example run: feed one generated job through the queue seam. A real
    // deployment wires the receiver to the broker consumer instead.
    let (jobs, receiver) = mpsc::unbounded_channel();
    let test_job = json!({
        "jobId": Uuid::new_v4().to_string(),
        "object": {
            "id": "urn:example:1234",
            "type": "DigitalMediaObject",
            "ac:accessURI": "https://example.org/test-image.jpg"
        }
    });
    jobs.send(test_job)?;
    drop(jobs);

    worker.run(receiver).await;

    info!("Annotation worker finished");
    Ok(())
}
