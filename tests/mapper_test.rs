use annotation_worker::{
    selector, AnnotationMapper, BoundingBox, Detection, DigitalObject,
};
use serde_json::{json, Value};

fn test_object() -> DigitalObject {
    DigitalObject {
        id: "urn:example:1234".to_string(),
        object_type: "DigitalMediaObject".to_string(),
        access_uri: Some("https://example.org/test-image.jpg".to_string()),
    }
}

fn detection(label: &str, score: f64, x: f64, y: f64, width: f64, height: f64) -> Detection {
    Detection {
        class_label: Some(label.to_string()),
        score: Some(score),
        bounding_box: BoundingBox {
            x,
            y,
            width,
            height,
        },
    }
}

#[test]
fn selector_encodes_bounding_box() {
    let bounding_box = BoundingBox {
        x: 30.0,
        y: 50.0,
        width: 100.0,
        height: 120.0,
    };
    let selector = selector::fragment_selector(&bounding_box);

    assert_eq!(selector.value, "xywh=30,50,100,120");
    assert_eq!(selector.conforms_to, "http://www.w3.org/TR/media-frags/");
    assert_eq!(selector.selector_type, "wlmo:FragmentSelector");
}

#[test]
fn selector_defaults_missing_fields_to_zero() {
    let selector = selector::fragment_selector(&BoundingBox::default());
    assert_eq!(selector.value, "xywh=0,0,0,0");
}

#[test]
fn selector_passes_negative_values_through() {
    let bounding_box = BoundingBox {
        x: -5.0,
        y: -10.0,
        width: 100.0,
        height: 120.0,
    };
    let selector = selector::fragment_selector(&bounding_box);
    assert_eq!(selector.value, "xywh=-5,-10,100,120");
}

#[test]
fn selector_truncates_fractional_pixels() {
    let bounding_box = BoundingBox {
        x: 30.9,
        y: 50.2,
        width: 100.7,
        height: 120.1,
    };
    let selector = selector::fragment_selector(&bounding_box);
    assert_eq!(selector.value, "xywh=30,50,100,120");
}

#[test]
fn mapper_produces_one_annotation_per_detection_in_order() {
    let mapper = AnnotationMapper::new();
    let detections = vec![
        detection("Jaquar", 0.91, 30.0, 50.0, 100.0, 120.0),
        detection("Tapir", 0.42, 0.0, 0.0, 10.0, 10.0),
        detection("Capuchin", 0.77, 5.0, 5.0, 20.0, 30.0),
    ];

    let annotations = mapper
        .map(&test_object(), &detections, 1024, 768)
        .expect("mapping should succeed");

    assert_eq!(annotations.len(), 3);
    assert_eq!(
        annotations[0].body.vernacular_name.as_deref(),
        Some("Jaquar")
    );
    assert_eq!(annotations[1].body.vernacular_name.as_deref(), Some("Tapir"));
    assert_eq!(
        annotations[2].body.vernacular_name.as_deref(),
        Some("Capuchin")
    );
    assert_eq!(annotations[0].target.selector.value, "xywh=30,50,100,120");
    assert_eq!(annotations[0].target.id, "urn:example:1234");
    assert_eq!(annotations[0].motivation, "classifying");
}

#[test]
fn annotations_of_one_job_share_a_timestamp() {
    let mapper = AnnotationMapper::new();
    let detections = vec![
        detection("Jaquar", 0.91, 30.0, 50.0, 100.0, 120.0),
        detection("Tapir", 0.42, 0.0, 0.0, 10.0, 10.0),
    ];

    let annotations = mapper
        .map(&test_object(), &detections, 1024, 768)
        .expect("mapping should succeed");

    assert_eq!(annotations[0].created, annotations[1].created);
    assert!(annotations[0].created.ends_with('Z'));
}

#[test]
fn mapper_passes_absent_label_and_score_through() {
    let mapper = AnnotationMapper::new();
    let detections = vec![Detection {
        class_label: None,
        score: None,
        bounding_box: BoundingBox::default(),
    }];

    let annotations = mapper
        .map(&test_object(), &detections, -1, -1)
        .expect("mapping should succeed");

    assert_eq!(annotations.len(), 1);
    assert_eq!(annotations[0].body.vernacular_name, None);
    assert_eq!(annotations[0].body.confidence_score, None);
}

#[test]
fn mapper_is_deterministic_modulo_timestamp() {
    let mapper = AnnotationMapper::new();
    let detections = vec![
        detection("Jaquar", 0.91, 30.0, 50.0, 100.0, 120.0),
        detection("Tapir", 0.42, 0.0, 0.0, 10.0, 10.0),
    ];

    let first = mapper
        .map(&test_object(), &detections, 1024, 768)
        .expect("mapping should succeed");
    let second = mapper
        .map(&test_object(), &detections, 1024, 768)
        .expect("mapping should succeed");

    assert_eq!(strip_created(&first), strip_created(&second));
}

fn strip_created(annotations: &[annotation_worker::Annotation]) -> Vec<Value> {
    annotations
        .iter()
        .map(|a| {
            let mut value = serde_json::to_value(a).expect("annotation serializes");
            value
                .as_object_mut()
                .expect("annotation is an object")
                .remove("wlmo:created");
            value
        })
        .collect()
}

#[test]
fn annotation_serializes_to_wlmo_shape() {
    let mapper = AnnotationMapper::new();
    let detections = vec![detection("Jaquar", 0.91, 30.0, 50.0, 100.0, 120.0)];

    let annotations = mapper
        .map(&test_object(), &detections, 1024, 768)
        .expect("mapping should succeed");
    let value = serde_json::to_value(&annotations[0]).expect("annotation serializes");

    assert_eq!(value["@context"]["wlmo"], json!("https://w3id.org/wlmo#"));
    assert_eq!(value["@type"], json!("wlmo:Annotation"));
    assert_eq!(value["wlmo:motivation"], json!("classifying"));
    assert_eq!(value["wlmo:creator"]["type"], json!("SoftwareAgent"));
    assert_eq!(value["wlmo:target"]["wlmo:id"], json!("urn:example:1234"));
    assert_eq!(
        value["wlmo:target"]["wlmo:hasSelector"]["wlmo:value"],
        json!("xywh=30,50,100,120")
    );
    assert_eq!(value["wlmo:hasBody"]["wlmo:confidenceScore"], json!(0.91));
    assert_eq!(value["wlmo:generator"]["@type"], json!("wlmo:Software"));
}
