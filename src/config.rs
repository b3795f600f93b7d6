use std::env;

/// Runtime configuration for the worker and its detection client.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    pub detection_endpoint: String,
    pub user_agent: String,
    pub timeout_seconds: u64,
    pub publish_retries: u32,
    pub publish_retry_delay_seconds: u64,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            detection_endpoint: "https://wildlive.senckenberg.de/run_jaquar_detection"
                .to_string(),
            user_agent: "Annotation-Worker/1.0".to_string(),
            timeout_seconds: 15,
            publish_retries: 3,
            publish_retry_delay_seconds: 1,
        }
    }
}

impl WorkerConfig {
    /// Default configuration with environment overrides applied.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(endpoint) = env::var("DETECTION_ENDPOINT") {
            config.detection_endpoint = endpoint;
        }
        if let Some(timeout) = env::var("DETECTION_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            config.timeout_seconds = timeout;
        }

        config
    }
}
