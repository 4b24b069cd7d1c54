use crate::object_detection::object_detection_model::ModelError;
use ort::session::Session;
use std::path::Path;
use tracing::debug;

/// An onnxruntime inference session.
///
/// All of the object detection classes in this project are just wrappers
/// around an ONNX inference session that handles running the model on
/// hardware.
pub struct OrtInferenceSession {
    pub session: Session,
}

impl OrtInferenceSession {
    pub fn new(model_path: &Path) -> Result<Self, ModelError> {
        if !model_path.is_file() {
            return Err(ModelError::MissingModel(model_path.to_path_buf()));
        }
        debug!(model = %model_path.display(), "loading onnx model");
        let session = Session::builder()?.commit_from_file(model_path)?;
        debug!(
            inputs = session.inputs.len(),
            outputs = session.outputs.len(),
            "onnx session ready"
        );
        Ok(Self { session })
    }
}
