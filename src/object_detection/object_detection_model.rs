use crate::annotations::bounding_box::BoundingBoxGeometry;
use crate::annotations::detection::Detection;
use ndarray::Array4;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("model file does not exist, or cannot be read: {0}")]
    MissingModel(PathBuf),
    #[error("onnxruntime error: {0}")]
    Ort(#[from] ort::Error),
    #[error("unexpected model output shape {0:?}")]
    UnexpectedOutputShape(Vec<usize>),
    #[error("model predicts {found} classes but the label table has {expected}")]
    ClassCountMismatch { expected: usize, found: usize },
}

/// Defines a trait that all object detection models must follow.
///
/// Models are plain values owned by the caller, so a process that scores many images can load
/// the weights once and keep reusing the same instance.
pub trait ObjectDetectionModel<T: BoundingBoxGeometry> {
    /// Width and height of the input tensor the model expects.
    fn input_size(&self) -> (u32, u32);

    /// Class names indexed by class id.
    fn class_names(&self) -> &[String];

    /// Runs the model on a (1, 3, height, width) array and returns every candidate whose
    /// confidence is strictly greater than `confidence`, in input-tensor coordinates.
    ///
    /// ONNX Runtime sessions need exclusive access to run, hence `&mut self`.
    fn run_inference(
        &mut self,
        input_array: &Array4<f32>,
        confidence: f32,
    ) -> Result<Vec<Detection<T>>, ModelError>;
}
