use std::fmt;

/// A struct representing a bounding box.
///
/// A bounding box is a rectangle around an object in an image together with a category denoting
/// what object it is. When an object detection model runs, it outputs bounding boxes along with a
/// probability encoding its confidence in that box+category.
///
/// This project uses the standard convention of the left side of the image being x=0 and the top
/// of the image being y=0.
#[derive(Clone, Debug, PartialEq)]
pub struct BoundingBox {
    left: f32,
    top: f32,
    right: f32,
    bottom: f32,
    category: String,
}

impl BoundingBox {
    /// Checks if a box has valid parameters before constructing.
    pub fn new(
        left: f32,
        top: f32,
        right: f32,
        bottom: f32,
        category: String,
    ) -> Result<Self, String> {
        if left > right {
            Err(format!(
                "Failed to create BoundingBox, value for left > value for right ({} > {}).",
                left, right
            ))
        } else if top > bottom {
            Err(format!(
                "Failed to create BoundingBox, value for top > value for bottom ({} > {}).",
                top, bottom
            ))
        } else {
            Ok(BoundingBox {
                left,
                top,
                right,
                bottom,
                category,
            })
        }
    }

    /// Builds a box from the (center x, center y, width, height) layout YOLO heads emit.
    pub fn from_cxcywh(cx: f32, cy: f32, w: f32, h: f32, category: String) -> Result<Self, String> {
        BoundingBox::new(
            cx - (w / 2.0),
            cy - (h / 2.0),
            cx + (w / 2.0),
            cy + (h / 2.0),
            category,
        )
    }

    /// Divides every coordinate by `scale` and clamps the result into `[0, width] x [0, height]`.
    ///
    /// Used to undo the letterbox resize so boxes are expressed in source image pixels.
    pub fn rescaled(&self, scale: f32, width: f32, height: f32) -> BoundingBox {
        BoundingBox {
            left: (self.left / scale).clamp(0.0, width),
            top: (self.top / scale).clamp(0.0, height),
            right: (self.right / scale).clamp(0.0, width),
            bottom: (self.bottom / scale).clamp(0.0, height),
            category: self.category.clone(),
        }
    }
}

pub trait BoundingBoxGeometry {
    fn left(&self) -> f32;
    fn top(&self) -> f32;
    fn right(&self) -> f32;
    fn bottom(&self) -> f32;
    fn category(&self) -> &str;

    fn width(&self) -> f32 {
        self.right() - self.left()
    }

    fn height(&self) -> f32 {
        self.bottom() - self.top()
    }

    fn area(&self) -> f32 {
        self.width() * self.height()
    }

    fn as_xyxy(&self) -> (f32, f32, f32, f32) {
        (self.left(), self.top(), self.right(), self.bottom())
    }

    /// Area of the overlap divided by the area of the union. Zero when the boxes are disjoint.
    fn intersection_over_union(&self, other: &Self) -> f32 {
        let inter_left = self.left().max(other.left());
        let inter_top = self.top().max(other.top());
        let inter_right = self.right().min(other.right());
        let inter_bottom = self.bottom().min(other.bottom());
        let intersection = (inter_right - inter_left).max(0.0) * (inter_bottom - inter_top).max(0.0);
        let union = self.area() + other.area() - intersection;
        if union <= 0.0 {
            return 0.0;
        }
        intersection / union
    }
}

impl BoundingBoxGeometry for BoundingBox {
    fn left(&self) -> f32 {
        self.left
    }

    fn top(&self) -> f32 {
        self.top
    }

    fn right(&self) -> f32 {
        self.right
    }

    fn bottom(&self) -> f32 {
        self.bottom
    }

    fn category(&self) -> &str {
        &self.category
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BoundingBox {{ left: {}, top: {}, right: {}, bottom: {}, category: {} }}",
            self.left, self.top, self.right, self.bottom, self.category
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_inverted_box() {
        assert!(BoundingBox::new(2_f32, 0_f32, 1_f32, 1_f32, "test".to_string()).is_err());
        assert!(BoundingBox::new(0_f32, 2_f32, 1_f32, 1_f32, "test".to_string()).is_err());
    }

    #[test]
    fn from_cxcywh_centers_box() {
        let bbox = BoundingBox::from_cxcywh(5_f32, 5_f32, 4_f32, 2_f32, "test".to_string()).unwrap();
        assert_eq!(bbox.as_xyxy(), (3_f32, 4_f32, 7_f32, 6_f32));
        assert_eq!(bbox.area(), 8_f32);
    }

    #[test]
    fn iou_of_partial_overlap() {
        let a = BoundingBox::new(0_f32, 0_f32, 2_f32, 2_f32, "test".to_string()).unwrap();
        let b = BoundingBox::new(1_f32, 0_f32, 3_f32, 2_f32, "test".to_string()).unwrap();
        // intersection 2, union 6
        assert!((a.intersection_over_union(&b) - (1_f32 / 3_f32)).abs() < 1e-6);
    }

    #[test]
    fn iou_of_disjoint_boxes_is_zero() {
        let a = BoundingBox::new(0_f32, 0_f32, 1_f32, 1_f32, "test".to_string()).unwrap();
        let b = BoundingBox::new(2_f32, 2_f32, 3_f32, 3_f32, "test".to_string()).unwrap();
        assert_eq!(a.intersection_over_union(&b), 0_f32);
    }

    #[test]
    fn rescaled_clamps_to_image() {
        let bbox = BoundingBox::new(-4_f32, 10_f32, 40_f32, 20_f32, "test".to_string()).unwrap();
        let rescaled = bbox.rescaled(2_f32, 16_f32, 16_f32);
        assert_eq!(rescaled.as_xyxy(), (0_f32, 5_f32, 16_f32, 10_f32));
    }
}
