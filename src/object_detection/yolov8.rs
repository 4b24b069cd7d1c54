use crate::annotations::bounding_box::BoundingBox;
use crate::annotations::detection::Detection;
use crate::object_detection::object_detection_model::{ModelError, ObjectDetectionModel};
use crate::object_detection::ort_inference_session::OrtInferenceSession;
use itertools::Itertools;
use ndarray::{Array4, ArrayView2, Axis, Ix2, s};
use ort::{inputs, session::SessionOutputs, value::TensorRef};
use std::path::Path;
use tracing::debug;

/// Number of leading rows in the output holding (cx, cy, w, h).
const BOX_ROWS: usize = 4;

/// A YOLOv8 detection model exported to ONNX.
///
/// The exported graph takes a single `images` input of shape (1, 3, height, width) and produces
/// a single `output0` of shape (1, 4 + classes, candidates).
pub struct Yolov8 {
    ort_session: OrtInferenceSession,
    class_names: Vec<String>,
    input_width: u32,
    input_height: u32,
}

impl Yolov8 {
    pub fn new(
        model_path: &Path,
        class_names: Vec<String>,
        input_width: u32,
        input_height: u32,
    ) -> Result<Self, ModelError> {
        let ort_session = OrtInferenceSession::new(model_path)?;
        Ok(Yolov8 {
            ort_session,
            class_names,
            input_width,
            input_height,
        })
    }
}

impl ObjectDetectionModel<BoundingBox> for Yolov8 {
    fn input_size(&self) -> (u32, u32) {
        (self.input_width, self.input_height)
    }

    fn class_names(&self) -> &[String] {
        &self.class_names
    }

    fn run_inference(
        &mut self,
        input_array: &Array4<f32>,
        confidence: f32,
    ) -> Result<Vec<Detection<BoundingBox>>, ModelError> {
        let outputs: SessionOutputs = self
            .ort_session
            .session
            .run(inputs!["images" => TensorRef::from_array_view(input_array)?])?;
        let output = outputs["output0"].try_extract_array::<f32>()?;
        let shape = output.shape().to_vec();
        debug!(?shape, "yolov8 output");
        if shape.len() != 3 || shape[0] != 1 || shape[1] <= BOX_ROWS {
            return Err(ModelError::UnexpectedOutputShape(shape));
        }
        let output = output
            .index_axis(Axis(0), 0)
            .into_dimensionality::<Ix2>()
            .map_err(|_| ModelError::UnexpectedOutputShape(shape))?;
        decode_yolov8_output(output, &self.class_names, confidence)
    }
}

/// Turns the (4 + classes, candidates) output matrix into detections.
///
/// Each column is one candidate. Its class is the highest scoring class and its confidence is
/// that score; candidates with a confidence at or below `confidence` are dropped.
pub fn decode_yolov8_output(
    output: ArrayView2<f32>,
    class_names: &[String],
    confidence: f32,
) -> Result<Vec<Detection<BoundingBox>>, ModelError> {
    let found = output.nrows().saturating_sub(BOX_ROWS);
    if found != class_names.len() {
        return Err(ModelError::ClassCountMismatch {
            expected: class_names.len(),
            found,
        });
    }
    let mut detections: Vec<Detection<BoundingBox>> = Vec::new();
    for column in output.axis_iter(Axis(1)) {
        let scores = column.slice(s![BOX_ROWS..]);
        let Some(class_id) = scores.iter().position_max_by(|a, b| a.total_cmp(b)) else {
            continue;
        };
        let prob = scores[class_id];
        // Written so a NaN score is dropped too.
        if !(prob > confidence) {
            continue;
        }
        let Ok(bbox) = BoundingBox::from_cxcywh(
            column[0],
            column[1],
            column[2],
            column[3],
            class_names[class_id].clone(),
        ) else {
            continue;
        };
        detections.push(Detection {
            annotation: bbox,
            class_id,
            confidence: prob as f64,
        });
    }
    Ok(detections)
}
