use crate::core::framebuffer::FrameBuffer;
use image::RgbImage;
use log::error;
use std::path::Path;

/// Saves the frame buffer to an image file. The format follows the extension.
pub fn save_framebuffer<P: AsRef<Path>>(frame: &FrameBuffer, path: P) -> Result<(), String> {
    let path = path.as_ref();
    let img_buf = RgbImage::from_raw(frame.width as u32, frame.height as u32, frame.as_raw())
        .ok_or_else(|| {
            format!(
                "Frame buffer of {}x{} does not match its pixel data",
                frame.width, frame.height
            )
        })?;

    img_buf.save(path).map_err(|e| {
        error!("Failed to save image to '{}': {}", path.display(), e);
        format!("Failed to save image to '{}': {}", path.display(), e)
    })
}
