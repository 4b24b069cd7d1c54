use crate::annotations::bounding_box::BoundingBoxGeometry;
use crate::annotations::detection::Detection;

/// The 80 COCO categories, in the order YOLO checkpoints trained on COCO emit them.
pub const COCO_CLASSES: [&str; 80] = [
    "person", "bicycle", "car", "motorcycle", "airplane", "bus", "train", "truck", "boat",
    "traffic light", "fire hydrant", "stop sign", "parking meter", "bench", "bird", "cat", "dog",
    "horse", "sheep", "cow", "elephant", "bear", "zebra", "giraffe", "backpack", "umbrella",
    "handbag", "tie", "suitcase", "frisbee", "skis", "snowboard", "sports ball", "kite",
    "baseball bat", "baseball glove", "skateboard", "surfboard", "tennis racket", "bottle",
    "wine glass", "cup", "fork", "knife", "spoon", "bowl", "banana", "apple", "sandwich", "orange",
    "broccoli", "carrot", "hot dog", "pizza", "donut", "cake", "chair", "couch", "potted plant",
    "bed", "dining table", "toilet", "tv", "laptop", "mouse", "remote", "keyboard", "cell phone",
    "microwave", "oven", "toaster", "sink", "refrigerator", "book", "clock", "vase", "scissors",
    "teddy bear", "hair drier", "toothbrush",
];

pub fn coco_class_names() -> Vec<String> {
    COCO_CLASSES.iter().map(|name| name.to_string()).collect()
}

/// Looks up the class id of `name` in the label table.
pub fn resolve_class_id(class_names: &[String], name: &str) -> Option<usize> {
    class_names.iter().position(|class_name| class_name == name)
}

/// Non maxmimum suppression is a way of removing duplicate detections.
///
/// Detections are ordered by descending confidence; a detection is dropped when it overlaps an
/// already kept detection of the same class with an IoU above `iou_threshold`.
pub fn non_maximum_suppression<T: BoundingBoxGeometry>(
    mut detections: Vec<Detection<T>>,
    iou_threshold: f32,
) -> Vec<Detection<T>> {
    detections.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
    let mut detections_to_remove: Vec<bool> = vec![false; detections.len()];
    for (current_index, current_det) in detections.iter().enumerate() {
        if detections_to_remove[current_index] {
            continue;
        }
        for (other_index, other_det) in detections[current_index + 1..].iter().enumerate() {
            if detections_to_remove[current_index + other_index + 1] {
                continue;
            }
            if current_det.class_id != other_det.class_id {
                continue;
            }
            let iou = current_det
                .annotation
                .intersection_over_union(&other_det.annotation);
            if iou > iou_threshold {
                detections_to_remove[current_index + other_index + 1] = true;
            }
        }
    }
    let mut drop_iter = detections_to_remove.into_iter();
    detections.retain(|_| !drop_iter.next().unwrap_or(false));
    detections
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotations::bounding_box::BoundingBox;

    fn det(
        left: f32,
        top: f32,
        right: f32,
        bottom: f32,
        class_id: usize,
        confidence: f64,
    ) -> Detection<BoundingBox> {
        Detection {
            annotation: BoundingBox::new(left, top, right, bottom, format!("class_{class_id}"))
                .unwrap(),
            class_id,
            confidence,
        }
    }

    #[test]
    fn nms_no_overlap() {
        let dets = vec![
            det(0_f32, 0_f32, 1_f32, 1_f32, 0, 0.6),
            det(2_f32, 2_f32, 3_f32, 3_f32, 0, 0.6),
        ];
        let nms_result = non_maximum_suppression(dets.clone(), 0.5_f32);
        assert_eq!(dets, nms_result);
    }

    #[test]
    fn nms_standard_usage() {
        let dets = vec![
            det(0_f32, 0_f32, 4_f32, 4_f32, 0, 0.6),
            det(0_f32, 0_f32, 5_f32, 5_f32, 0, 0.55),
            det(6_f32, 6_f32, 10_f32, 10_f32, 0, 0.75),
        ];
        let nms_result = non_maximum_suppression(dets, 0.5_f32);
        let true_dets = vec![
            det(6_f32, 6_f32, 10_f32, 10_f32, 0, 0.75),
            det(0_f32, 0_f32, 4_f32, 4_f32, 0, 0.6),
        ];
        assert_eq!(true_dets, nms_result);
    }

    #[test]
    fn nms_overlap_but_different_classes() {
        let dets = vec![
            det(0_f32, 0_f32, 4.5_f32, 4.5_f32, 0, 0.6),
            det(0_f32, 0_f32, 5_f32, 5_f32, 1, 0.55),
            det(0.5_f32, 0.5_f32, 4_f32, 4_f32, 0, 0.8),
            det(6_f32, 6_f32, 10_f32, 10_f32, 0, 0.75),
        ];
        let nms_result = non_maximum_suppression(dets, 0.5_f32);
        let true_dets = vec![
            det(0.5_f32, 0.5_f32, 4_f32, 4_f32, 0, 0.8),
            det(6_f32, 6_f32, 10_f32, 10_f32, 0, 0.75),
            det(0_f32, 0_f32, 5_f32, 5_f32, 1, 0.55),
        ];
        assert_eq!(true_dets, nms_result);
    }

    #[test]
    fn person_is_the_first_coco_class() {
        assert_eq!(resolve_class_id(&coco_class_names(), "person"), Some(0));
        assert_eq!(resolve_class_id(&coco_class_names(), "car"), Some(2));
        assert_eq!(resolve_class_id(&coco_class_names(), "yeti"), None);
    }
}
