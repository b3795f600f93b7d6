use serde::{Deserialize, Serialize};

/// One inbound unit of work: annotate a single digital object's image.
#[derive(Debug, Clone, Deserialize)]
pub struct AnnotationJob {
    #[serde(rename = "jobId")]
    pub job_id: String,
    pub object: DigitalObject,
}

/// The media item being annotated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DigitalObject {
    pub id: String,
    #[serde(rename = "type", default)]
    pub object_type: String,
    /// Locator of the image to analyze. The upstream payload uses the
    /// `ac:` prefixed key; the bare form is accepted as well.
    #[serde(rename = "ac:accessURI", alias = "accessURI", default)]
    pub access_uri: Option<String>,
}

/// Request body sent to the detection endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct DetectionRequest {
    pub image_url: String,
}

fn default_dimension() -> i64 {
    -1
}

/// Raw detection-service response. Partial responses are tolerated: a
/// missing `output` means zero detections and missing dimensions become -1.
#[derive(Debug, Clone, Deserialize)]
pub struct DetectionResponse {
    #[serde(default)]
    pub output: Vec<Detection>,
    #[serde(default = "default_dimension")]
    pub image_height: i64,
    #[serde(default = "default_dimension")]
    pub image_width: i64,
}

impl Default for DetectionResponse {
    fn default() -> Self {
        Self {
            output: Vec::new(),
            image_height: default_dimension(),
            image_width: default_dimension(),
        }
    }
}

/// One raw classification result. Label and score are carried verbatim,
/// absent values included; no range or emptiness validation happens here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Detection {
    #[serde(rename = "class", default)]
    pub class_label: Option<String>,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(rename = "boundingBox", default)]
    pub bounding_box: BoundingBox,
}

/// Pixel bounding box. Fields arrive as JSON numbers and are truncated to
/// whole pixels when the fragment selector is built; missing fields are 0.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
}

/// The fixed software agent stamped on every annotation as its creator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub agent_type: String,
}

/// The fixed service descriptor stamped on every annotation as its generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Generator {
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(rename = "@type")]
    pub generator_type: String,
    #[serde(rename = "wlmo:name")]
    pub name: String,
}

/// JSON-LD context carried by every annotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationContext {
    pub wlmo: String,
}

/// Media-fragment selector addressing a rectangular image sub-region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FragmentSelector {
    #[serde(rename = "@type")]
    pub selector_type: String,
    #[serde(rename = "wlmo:value")]
    pub value: String,
    #[serde(rename = "wlmo:conformsTo")]
    pub conforms_to: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationTarget {
    #[serde(rename = "@type")]
    pub target_type: String,
    #[serde(rename = "wlmo:id")]
    pub id: String,
    #[serde(rename = "wlmo:hasSelector")]
    pub selector: FragmentSelector,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationBody {
    #[serde(rename = "@type")]
    pub body_type: String,
    #[serde(rename = "wlmo:vernacularName")]
    pub vernacular_name: Option<String>,
    #[serde(rename = "wlmo:confidenceScore")]
    pub confidence_score: Option<f64>,
}

/// One standardized linked-data annotation record, produced per detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    #[serde(rename = "@context")]
    pub context: AnnotationContext,
    #[serde(rename = "@type")]
    pub annotation_type: String,
    #[serde(rename = "wlmo:creator")]
    pub creator: Agent,
    #[serde(rename = "wlmo:created")]
    pub created: String,
    #[serde(rename = "wlmo:motivation")]
    pub motivation: String,
    #[serde(rename = "wlmo:target")]
    pub target: AnnotationTarget,
    #[serde(rename = "wlmo:hasBody")]
    pub body: AnnotationBody,
    #[serde(rename = "wlmo:generator")]
    pub generator: Generator,
}

/// The single terminal message emitted per job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OutcomeEvent {
    Success {
        #[serde(rename = "jobId")]
        job_id: String,
        annotations: Vec<Annotation>,
    },
    Failure {
        #[serde(rename = "jobId")]
        job_id: String,
        error: String,
    },
}

impl OutcomeEvent {
    pub fn job_id(&self) -> &str {
        match self {
            OutcomeEvent::Success { job_id, .. } => job_id,
            OutcomeEvent::Failure { job_id, .. } => job_id,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, OutcomeEvent::Success { .. })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum WorkerError {
    #[error("malformed job: {0}")]
    MalformedJob(String),

    #[error("detection service error: {0}")]
    DetectionService(String),

    #[error("annotation mapping failed: {0}")]
    Mapping(String),

    #[error("failed to publish outcome event: {0}")]
    Publish(String),
}

pub type Result<T> = std::result::Result<T, WorkerError>;
