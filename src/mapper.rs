use crate::agent;
use crate::selector;
use crate::types::{
    Agent, Annotation, AnnotationBody, AnnotationContext, AnnotationTarget, Detection,
    DigitalObject, Result,
};
use tracing::debug;

pub const WLMO_NAMESPACE: &str = "https://w3id.org/wlmo#";
pub const MOTIVATION_CLASSIFYING: &str = "classifying";

/// Transforms raw detections into linked-data annotation records.
pub struct AnnotationMapper;

impl AnnotationMapper {
    pub fn new() -> Self {
        Self
    }

    /// Produce one annotation per detection, preserving detection order.
    ///
    /// The creation timestamp and creator are computed once per call, so
    /// every annotation of a job shares the same `created` value. Labels
    /// and confidence scores are carried over verbatim, absent values
    /// included. Image dimensions are accepted for future selector
    /// refinement but are not embedded in the record; -1 means the
    /// service did not report them.
    pub fn map(
        &self,
        object: &DigitalObject,
        detections: &[Detection],
        image_height: i64,
        image_width: i64,
    ) -> Result<Vec<Annotation>> {
        debug!(
            "Mapping {} detections for object {} (image {}x{})",
            detections.len(),
            object.id,
            image_width,
            image_height
        );

        let created = agent::timestamp_now();
        let creator = agent::software_agent();

        let annotations = detections
            .iter()
            .map(|detection| self.annotation_for(object, detection, &creator, &created))
            .collect();

        Ok(annotations)
    }

    fn annotation_for(
        &self,
        object: &DigitalObject,
        detection: &Detection,
        creator: &Agent,
        created: &str,
    ) -> Annotation {
        Annotation {
            context: AnnotationContext {
                wlmo: WLMO_NAMESPACE.to_string(),
            },
            annotation_type: "wlmo:Annotation".to_string(),
            creator: creator.clone(),
            created: created.to_string(),
            motivation: MOTIVATION_CLASSIFYING.to_string(),
            target: AnnotationTarget {
                target_type: "wlmo:DigitalObject".to_string(),
                id: object.id.clone(),
                selector: selector::fragment_selector(&detection.bounding_box),
            },
            body: AnnotationBody {
                body_type: "wlmo:TextualBody".to_string(),
                vernacular_name: detection.class_label.clone(),
                confidence_score: detection.score,
            },
            generator: agent::generator(),
        }
    }
}

impl Default for AnnotationMapper {
    fn default() -> Self {
        Self::new()
    }
}
