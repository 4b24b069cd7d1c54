use crate::annotations::bounding_box::BoundingBoxGeometry;

/// A detection is what is produced as output from an object detection model.
///
/// A detection is any annotation combined with the index of its class in the model's label table
/// and a confidence score: a probability value that encodes the model's belief that the detection
/// is true.
#[derive(Clone, Debug, PartialEq)]
pub struct Detection<T: BoundingBoxGeometry> {
    pub annotation: T,
    pub class_id: usize,
    pub confidence: f64,
}
