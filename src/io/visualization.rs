//! Frame sampling and GIF generation for orbit animations

use crate::engine::PixelBuffer;
use crate::io::configuration::{FINAL_FRAME_HOLD, VIEWER_MIN_FRAME_DELAY_MS};
use crate::io::error::{OrbitError, Result};
use crate::io::image::to_dynamic_image;
use image::{Delay, Frame, RgbaImage};
use std::path::Path;

/// Iterate indices kept when an orbit of `len` buffers is cut to `max_frames`
///
/// Indices are evenly spaced. With two or more frames the sample starts at the
/// original and ends at the last iterate; a single frame shows the last iterate.
pub fn sample_indices(len: usize, max_frames: usize) -> Vec<usize> {
    if len == 0 || max_frames == 0 {
        return Vec::new();
    }
    if len <= max_frames {
        return (0..len).collect();
    }
    if max_frames == 1 {
        return vec![len - 1];
    }

    let last = len - 1;
    let steps = max_frames - 1;
    (0..max_frames).map(|i| i * last / steps).collect()
}

/// Rendered frames of an orbit, ready to encode
pub struct OrbitAnimation {
    frames: Vec<(usize, RgbaImage)>,
}

impl OrbitAnimation {
    /// Render a sample of `iterates` as RGBA frames
    ///
    /// # Errors
    ///
    /// Returns an error if an iterate cannot be converted to an image.
    pub fn from_iterates(iterates: &[PixelBuffer<u8>], max_frames: usize) -> Result<Self> {
        let mut frames = Vec::new();
        for index in sample_indices(iterates.len(), max_frames) {
            if let Some(buffer) = iterates.get(index) {
                frames.push((index, to_dynamic_image(buffer)?.into_rgba8()));
            }
        }
        Ok(Self { frames })
    }

    /// Orbit indices of the captured frames
    pub fn frame_indices(&self) -> Vec<usize> {
        self.frames.iter().map(|(index, _)| *index).collect()
    }

    /// Returns the number of captured frames
    pub const fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Export the captured frames as a looping GIF
    ///
    /// The delay is raised to what viewers reliably support, and the final
    /// frame is held for `FINAL_FRAME_HOLD` delays.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No frames were captured
    /// - File system operations fail
    /// - GIF encoding fails
    pub fn export_gif(&self, output_path: &Path, frame_delay_ms: u32) -> Result<()> {
        if self.frames.is_empty() {
            return Err(OrbitError::InvalidParameter {
                parameter: "frames",
                value: "0".to_string(),
                reason: "No iterates captured for the animation".to_string(),
            });
        }

        let delay_ms = frame_delay_ms.max(VIEWER_MIN_FRAME_DELAY_MS);
        let last = self.frames.len() - 1;
        let frames = self.frames.iter().enumerate().map(|(position, (_, img))| {
            let hold = if position == last { FINAL_FRAME_HOLD } else { 1 };
            Frame::from_parts(
                img.clone(),
                0,
                0,
                Delay::from_numer_denom_ms(delay_ms * hold, 1),
            )
        });

        if let Some(parent) = output_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| OrbitError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }

        let file = std::fs::File::create(output_path).map_err(|e| OrbitError::FileSystem {
            path: output_path.to_path_buf(),
            operation: "create file",
            source: e,
        })?;

        let export_error = |e| OrbitError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        };

        let mut encoder = image::codecs::gif::GifEncoder::new(file);
        encoder
            .set_repeat(image::codecs::gif::Repeat::Infinite)
            .map_err(export_error)?;
        encoder.encode_frames(frames).map_err(export_error)
    }
}
