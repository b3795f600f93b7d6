use crate::types::{BoundingBox, FragmentSelector};

pub const SELECTOR_TYPE: &str = "wlmo:FragmentSelector";
pub const MEDIA_FRAGS_URI: &str = "http://www.w3.org/TR/media-frags/";

/// Build a media-fragment selector from a pixel bounding box.
///
/// Coordinates are truncated to whole pixels. Fields the service omitted
/// have already defaulted to 0 at the parsing boundary; negative values
/// pass through unchanged.
pub fn fragment_selector(bounding_box: &BoundingBox) -> FragmentSelector {
    let x = bounding_box.x as i64;
    let y = bounding_box.y as i64;
    let width = bounding_box.width as i64;
    let height = bounding_box.height as i64;

    FragmentSelector {
        selector_type: SELECTOR_TYPE.to_string(),
        value: format!("xywh={},{},{},{}", x, y, width, height),
        conforms_to: MEDIA_FRAGS_URI.to_string(),
    }
}
