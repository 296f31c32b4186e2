//! Tests for image file loading, conversion and PNG export

#[cfg(test)]
mod tests {
    use catorbit::OrbitError;
    use catorbit::engine::buffer::PixelBuffer;
    use catorbit::io::image::{
        export_png, from_dynamic_image, load_pixel_buffer, to_dynamic_image,
    };
    use image::{DynamicImage, GrayImage, ImageBuffer, Luma, Rgb, RgbImage};

    // Tests PNG export followed by loading keeps pixels and layout
    // Verified by saving as RGBA regardless of channel count
    #[test]
    fn test_export_then_load_rgb() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("nested/rgb.png");
        let buffer = PixelBuffer::from_fn(3, 3, 3, |col, row, channel| {
            (col * 80 + row * 20 + channel) as u8
        });

        export_png(&buffer, &path).expect("export");
        let loaded = load_pixel_buffer(&path).expect("load");

        assert!(path.exists(), "parent directory should be created");
        assert_eq!(loaded, buffer);
    }

    // Tests grayscale images keep one channel
    // Verified by converting everything to RGBA
    #[test]
    fn test_from_dynamic_image_gray() {
        let gray: GrayImage = ImageBuffer::from_fn(2, 2, |x, y| Luma([(x + 2 * y) as u8]));

        let buffer = from_dynamic_image(DynamicImage::ImageLuma8(gray));

        assert_eq!(buffer.channels, 1);
        assert_eq!(buffer.data, vec![0, 1, 2, 3]);
    }

    // Tests wide color types fall back to 8-bit RGBA
    // Verified by keeping the 16-bit layout
    #[test]
    fn test_from_dynamic_image_sixteen_bit() {
        let wide = DynamicImage::new_rgb16(2, 2);

        let buffer = from_dynamic_image(wide);

        assert_eq!(buffer.channels, 4);
        assert_eq!(buffer.data.len(), 16);
    }

    // Tests conversion picks the matching image type
    // Verified by swapping the RGB and RGBA arms
    #[test]
    fn test_to_dynamic_image_rgb() {
        let rgb: RgbImage = ImageBuffer::from_pixel(2, 2, Rgb([1, 2, 3]));
        let buffer = from_dynamic_image(DynamicImage::ImageRgb8(rgb));

        let img = to_dynamic_image(&buffer).expect("convert");

        assert_eq!(img.color(), image::ColorType::Rgb8);
        assert_eq!((img.width(), img.height()), (2, 2));
    }

    // Tests unsupported channel counts are refused
    // Verified by treating five channels as RGBA
    #[test]
    fn test_to_dynamic_image_too_many_channels() {
        let buffer = PixelBuffer::new(1, 1, 5, vec![0u8; 5]);

        assert!(matches!(
            to_dynamic_image(&buffer),
            Err(OrbitError::InvalidParameter { .. })
        ));
    }

    // Tests short buffers are refused
    // Verified by padding the data
    #[test]
    fn test_to_dynamic_image_short_data() {
        let buffer = PixelBuffer::new(2, 2, 1, vec![0u8; 3]);

        assert!(matches!(
            to_dynamic_image(&buffer),
            Err(OrbitError::ChannelMismatch { .. })
        ));
    }

    // Tests missing files report the path that was requested
    // Verified by leaving the placeholder path
    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("missing.png");

        match load_pixel_buffer(&path) {
            Err(OrbitError::ImageLoad { path: reported, .. }) => assert_eq!(reported, path),
            other => unreachable!("Expected ImageLoad error, got {other:?}"),
        }
    }
}
