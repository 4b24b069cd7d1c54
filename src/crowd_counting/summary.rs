use crate::annotations::bounding_box::BoundingBoxGeometry;
use crate::annotations::detection::Detection;
use serde::Serialize;

/// How many detections of one class an image holds, and how sure the model was about them.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct DetectionSummary {
    pub count: usize,
    /// Mean confidence of the counted detections, exactly 0.0 when nothing was counted.
    pub confidence: f64,
}

pub fn summarize_class<T: BoundingBoxGeometry>(
    detections: &[Detection<T>],
    class_id: usize,
) -> DetectionSummary {
    let confidences: Vec<f64> = detections
        .iter()
        .filter(|detection| detection.class_id == class_id)
        .map(|detection| detection.confidence)
        .collect();
    let count = confidences.len();
    let confidence = if count > 0 {
        confidences.iter().sum::<f64>() / count as f64
    } else {
        0.0
    };
    DetectionSummary { count, confidence }
}
