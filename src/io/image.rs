//! Image file loading and PNG export for 8-bit pixel buffers

use crate::engine::PixelBuffer;
use crate::io::error::{OrbitError, Result, WithPath, invalid_parameter};
use image::{ColorType, DynamicImage, GrayAlphaImage, GrayImage, RgbImage, RgbaImage};
use std::path::Path;

/// Load an image file into an 8-bit pixel buffer
///
/// Gray, gray+alpha, RGB and RGBA images at 8 bits keep their channel layout.
/// Every other color type is converted to 8-bit RGBA.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or decoded.
pub fn load_pixel_buffer<P: AsRef<Path>>(path: P) -> Result<PixelBuffer<u8>> {
    let path = path.as_ref();
    let img = image::open(path).with_path(path)?;
    Ok(from_dynamic_image(img))
}

/// Convert a decoded image into an 8-bit pixel buffer
pub fn from_dynamic_image(img: DynamicImage) -> PixelBuffer<u8> {
    let (width, height) = (img.width() as usize, img.height() as usize);

    let (channels, data) = match img.color() {
        ColorType::L8 => (1, img.into_luma8().into_raw()),
        ColorType::La8 => (2, img.into_luma_alpha8().into_raw()),
        ColorType::Rgb8 => (3, img.into_rgb8().into_raw()),
        _ => (4, img.into_rgba8().into_raw()),
    };

    PixelBuffer::new(width, height, channels, data)
}

/// Convert an 8-bit pixel buffer into an image the encoders understand
///
/// # Errors
///
/// Returns an error if:
/// - The channel count is not 1, 2, 3 or 4
/// - The data length disagrees with the declared shape
pub fn to_dynamic_image(buffer: &PixelBuffer<u8>) -> Result<DynamicImage> {
    let width = u32::try_from(buffer.width)
        .map_err(|e| invalid_parameter("width", &buffer.width, &e))?;
    let height = u32::try_from(buffer.height)
        .map_err(|e| invalid_parameter("height", &buffer.height, &e))?;
    let data = buffer.data.clone();

    let img = match buffer.channels {
        1 => GrayImage::from_raw(width, height, data).map(DynamicImage::ImageLuma8),
        2 => GrayAlphaImage::from_raw(width, height, data).map(DynamicImage::ImageLumaA8),
        3 => RgbImage::from_raw(width, height, data).map(DynamicImage::ImageRgb8),
        4 => RgbaImage::from_raw(width, height, data).map(DynamicImage::ImageRgba8),
        other => {
            return Err(invalid_parameter(
                "channels",
                &other,
                &"only 1 to 4 channels can be encoded",
            ));
        }
    };

    img.ok_or_else(|| OrbitError::ChannelMismatch {
        width: buffer.width,
        height: buffer.height,
        channels: buffer.channels,
        expected: buffer.expected_len(),
        actual: buffer.data.len(),
    })
}

/// Write a pixel buffer as a PNG file, creating parent directories
///
/// # Errors
///
/// Returns an error if:
/// - The buffer cannot be converted to an image
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_png(buffer: &PixelBuffer<u8>, output_path: &Path) -> Result<()> {
    let img = to_dynamic_image(buffer)?;

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| OrbitError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    img.save_with_format(output_path, image::ImageFormat::Png)
        .map_err(|e| OrbitError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })
}
