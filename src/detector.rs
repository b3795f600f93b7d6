use crate::config::WorkerConfig;
use crate::types::{DetectionRequest, DetectionResponse, Result, WorkerError};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};

/// Trait for invoking an object-detection backend against one image.
#[async_trait]
pub trait RunDetection: Send + Sync {
    /// Run detection against the image at `image_uri`.
    ///
    /// Returns the raw detections plus the reported image dimensions.
    async fn detect(&self, image_uri: &str) -> Result<DetectionResponse>;
}

/// HTTP client for the external detection service.
///
/// Issues one bounded-timeout POST per job and does not retry internally;
/// redelivery is the queue's concern. Partial response bodies are tolerated
/// (missing detections become an empty list, missing dimensions -1), but a
/// failed request, non-2xx status, or unparsable body fails the call.
pub struct DetectionClient {
    client: Client,
    endpoint: String,
}

impl DetectionClient {
    pub fn new(config: &WorkerConfig) -> Self {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            endpoint: config.detection_endpoint.clone(),
        }
    }
}

#[async_trait]
impl RunDetection for DetectionClient {
    async fn detect(&self, image_uri: &str) -> Result<DetectionResponse> {
        debug!("Requesting detection for image: {}", image_uri);

        let request = DetectionRequest {
            image_url: image_uri.to_string(),
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| WorkerError::DetectionService(e.to_string()))?
            .error_for_status()
            .map_err(|e| WorkerError::DetectionService(e.to_string()))?;

        let result: DetectionResponse = response
            .json()
            .await
            .map_err(|e| WorkerError::DetectionService(format!("invalid response body: {}", e)))?;

        info!(
            "Detection returned {} results for {} ({}x{})",
            result.output.len(),
            image_uri,
            result.image_width,
            result.image_height
        );
        Ok(result)
    }
}
