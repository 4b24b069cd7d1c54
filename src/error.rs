use crate::object_detection::object_detection_model::ModelError;
use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;

/// Everything that can stop a run, split so callers can tell a bad invocation from a failed
/// inference without parsing messages.
#[derive(Error, Debug)]
pub enum CrowdDetectError {
    #[error("usage: crowd-detect <image_path>")]
    Usage,
    #[error("failed to read image {path:?}: {source}")]
    ReadImage {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("class `{0}` is not in the model's label table")]
    UnknownClass(String),
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error("failed to serialize summary: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl CrowdDetectError {
    pub fn is_usage(&self) -> bool {
        matches!(self, CrowdDetectError::Usage)
    }

    pub fn exit_code(&self) -> ExitCode {
        if self.is_usage() {
            ExitCode::from(1)
        } else {
            ExitCode::from(2)
        }
    }
}
