use image::{self, ImageResult, RgbImage};
use std::path::Path;

/// Decodes any format the `image` crate understands and drops the alpha channel, if any.
pub fn read_image_as_rgb8(filepath: &Path) -> ImageResult<RgbImage> {
    Ok(image::open(filepath)?.into_rgb8())
}
