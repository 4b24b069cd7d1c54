use std::path::PathBuf;

/// ONNX export of the `yolov8x.pt` checkpoint.
pub const DEFAULT_MODEL_PATH: &str = "./data/models/yolov8x.onnx";

/// Fixed settings for a people-counting run. The binary reads no configuration source; the
/// model's label table is the built-in COCO list.
#[derive(Clone, Debug, PartialEq)]
pub struct DetectorConfig {
    pub model_path: PathBuf,
    pub input_width: u32,
    pub input_height: u32,
    pub confidence_threshold: f32,
    pub iou_threshold: f32,
    /// Upper bound on detections kept after suppression, most confident first.
    pub max_detections: usize,
    /// Name of the class to count, checked against the label table at startup.
    pub target_class: String,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        DetectorConfig {
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            input_width: 640,
            input_height: 640,
            confidence_threshold: 0.25,
            iou_threshold: 0.7,
            max_detections: 300,
            target_class: "person".to_string(),
        }
    }
}
