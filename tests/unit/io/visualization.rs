//! Tests for orbit frame sampling and GIF export

#[cfg(test)]
mod tests {
    use catorbit::engine::buffer::PixelBuffer;
    use catorbit::io::visualization::{OrbitAnimation, sample_indices};
    use catorbit::orbit::tracker::run;

    // Tests short orbits keep every iterate
    // Verified by always sampling
    #[test]
    fn test_sample_indices_short_orbit() {
        assert_eq!(sample_indices(4, 10), vec![0, 1, 2, 3]);
        assert!(sample_indices(0, 10).is_empty());
        assert!(sample_indices(5, 0).is_empty());
    }

    // Tests long orbits keep both ends and stay within the budget
    // Verified by dropping the last iterate
    #[test]
    fn test_sample_indices_long_orbit() {
        let indices = sample_indices(101, 5);

        assert_eq!(indices, vec![0, 25, 50, 75, 100]);
        assert_eq!(sample_indices(50, 1), vec![49]);

        let many = sample_indices(1000, 240);
        assert_eq!(many.len(), 240);
        assert_eq!(many.first(), Some(&0));
        assert_eq!(many.last(), Some(&999));
        assert!(many.windows(2).all(|pair| pair[0] < pair[1]));
    }

    // Tests frames are rendered for a sampled orbit
    // Verified by skipping the original frame
    #[test]
    fn test_animation_from_iterates() {
        let original = PixelBuffer::from_fn(3, 3, 1, |col, row, _| (row * 3 + col) as u8 * 20);
        let result = run(original, 10).expect("valid");

        let animation = OrbitAnimation::from_iterates(&result.iterates, 3).expect("render");

        assert_eq!(animation.frame_count(), 3);
        assert_eq!(animation.frame_indices(), vec![0, 2, 4]);
    }

    // Tests GIF export writes a file
    // Verified by disabling the encoder
    #[test]
    fn test_export_gif_creates_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("orbit.gif");
        let original = PixelBuffer::from_fn(4, 4, 4, |col, row, channel| {
            if channel == 3 { 255 } else { (col * 60 + row * 5) as u8 }
        });
        let result = run(original, 10).expect("valid");

        let animation = OrbitAnimation::from_iterates(&result.iterates, 16).expect("render");
        animation.export_gif(&path, 50).expect("export");

        assert!(path.exists());
        assert!(std::fs::metadata(&path).expect("metadata").len() > 0);
    }

    // Tests error when exporting an empty animation
    // Verified by removing empty frames check
    #[test]
    fn test_export_gif_no_frames() {
        let animation = OrbitAnimation::from_iterates(&[], 10).expect("render");

        assert_eq!(animation.frame_count(), 0);
        assert!(
            animation
                .export_gif(std::path::Path::new("/dev/null/orbit.gif"), 50)
                .is_err()
        );
    }
}
