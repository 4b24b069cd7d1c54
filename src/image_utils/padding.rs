use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};

/// Grey used by YOLO exporters to fill letterbox borders.
pub const LETTERBOX_FILL: Rgb<u8> = Rgb([114, 114, 114]);

/// An image resized and padded to a model's input size, along with the factor that was applied.
pub struct Letterbox {
    pub image: RgbImage,
    pub scale: f32,
}

/// Pads an rgb8 image by adding `fill` pixels to the right and bottom of the image.
pub fn pad_right_bottom_img_rbg8(
    original_image: &RgbImage,
    new_width: u32,
    new_height: u32,
    fill: Rgb<u8>,
) -> RgbImage {
    let mut padded_image: RgbImage = RgbImage::from_pixel(new_width, new_height, fill);
    for (x, y, pixel) in original_image.enumerate_pixels() {
        if x < new_width && y < new_height {
            padded_image.put_pixel(x, y, *pixel);
        }
    }
    padded_image
}

/// Resizes an image to fit inside `target_width` x `target_height` without changing its aspect
/// ratio, then pads the right and bottom edges up to the target size.
pub fn letterbox_rgb8(original_image: &RgbImage, target_width: u32, target_height: u32) -> Letterbox {
    let (width, height) = original_image.dimensions();
    let scale = (target_width as f32 / width.max(1) as f32)
        .min(target_height as f32 / height.max(1) as f32);
    let resized_width = ((width as f32 * scale).round() as u32).clamp(1, target_width);
    let resized_height = ((height as f32 * scale).round() as u32).clamp(1, target_height);
    let resized = imageops::resize(
        original_image,
        resized_width,
        resized_height,
        FilterType::Triangle,
    );
    Letterbox {
        image: pad_right_bottom_img_rbg8(&resized, target_width, target_height, LETTERBOX_FILL),
        scale,
    }
}
