use crate::annotations::bounding_box::{BoundingBox, BoundingBoxGeometry};
use crate::annotations::detection::Detection;
use crate::config::DetectorConfig;
use crate::crowd_counting::summary::{DetectionSummary, summarize_class};
use crate::error::CrowdDetectError;
use crate::image_utils::image_conversion::convert_rgb_image_to_owned_array;
use crate::image_utils::image_io::read_image_as_rgb8;
use crate::image_utils::padding::letterbox_rgb8;
use crate::object_detection::object_detection_model::{ModelError, ObjectDetectionModel};
use crate::object_detection::object_detection_utils::{non_maximum_suppression, resolve_class_id};
use image::RgbImage;
use std::path::Path;
use tracing::debug;

/// Counts the instances of one class in images with a caller supplied detection model.
///
/// The counter owns the model, so the weights stay loaded for as long as the counter lives.
pub struct PeopleCounter<M> {
    model: M,
    target_class_id: usize,
    confidence_threshold: f32,
    iou_threshold: f32,
    max_detections: usize,
}

impl<M: ObjectDetectionModel<BoundingBox>> PeopleCounter<M> {
    /// Fails if the configured target class is not one of the model's classes.
    pub fn new(model: M, config: &DetectorConfig) -> Result<Self, CrowdDetectError> {
        let target_class_id = resolve_class_id(model.class_names(), &config.target_class)
            .ok_or_else(|| CrowdDetectError::UnknownClass(config.target_class.clone()))?;
        debug!(
            target_class = %config.target_class,
            target_class_id,
            "resolved target class"
        );
        Ok(PeopleCounter {
            model,
            target_class_id,
            confidence_threshold: config.confidence_threshold,
            iou_threshold: config.iou_threshold,
            max_detections: config.max_detections,
        })
    }

    pub fn target_class_id(&self) -> usize {
        self.target_class_id
    }

    /// Runs the model on `image` and returns de-duplicated detections of every class, with
    /// boxes in `image` pixel coordinates.
    pub fn detect(&mut self, image: &RgbImage) -> Result<Vec<Detection<BoundingBox>>, ModelError> {
        let (input_width, input_height) = self.model.input_size();
        let letterbox = letterbox_rgb8(image, input_width, input_height);
        let input_array = convert_rgb_image_to_owned_array(&letterbox.image);
        let (width, height) = (image.width() as f32, image.height() as f32);
        // Suppression runs in input-tensor space, before boxes are clamped to the image.
        let mut detections = non_maximum_suppression(
            self.model
                .run_inference(&input_array, self.confidence_threshold)?,
            self.iou_threshold,
        );
        detections.truncate(self.max_detections);
        let detections: Vec<Detection<BoundingBox>> = detections
            .into_iter()
            .map(|detection| Detection {
                annotation: detection.annotation.rescaled(letterbox.scale, width, height),
                class_id: detection.class_id,
                confidence: detection.confidence,
            })
            .collect();
        for detection in &detections {
            debug!(
                category = detection.annotation.category(),
                confidence = detection.confidence,
                "{}",
                detection.annotation
            );
        }
        Ok(detections)
    }

    pub fn count_people(&mut self, image: &RgbImage) -> Result<DetectionSummary, ModelError> {
        let detections = self.detect(image)?;
        Ok(summarize_class(&detections, self.target_class_id))
    }

    pub fn count_people_in_file(&mut self, path: &Path) -> Result<DetectionSummary, CrowdDetectError> {
        debug!(image = %path.display(), "processing image");
        let image = read_image_as_rgb8(path).map_err(|source| CrowdDetectError::ReadImage {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(self.count_people(&image)?)
    }
}
