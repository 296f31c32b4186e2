//! Tests for the L1 dissimilarity metric and first-maximum tracking

#[cfg(test)]
mod tests {
    use catorbit::OrbitError;
    use catorbit::engine::buffer::PixelBuffer;
    use catorbit::orbit::divergence::{Divergence, DivergenceTracker, dissimilarity};

    // Tests the metric sums absolute differences over every channel
    // Verified by summing signed differences
    #[test]
    fn test_dissimilarity_sums_channels() {
        let a = PixelBuffer::new(1, 1, 3, vec![10u8, 200, 0]);
        let b = PixelBuffer::new(1, 1, 3, vec![20u8, 100, 255]);

        assert_eq!(dissimilarity(&a, &b).expect("same shape"), 10 + 100 + 255);
        assert_eq!(dissimilarity(&b, &a).expect("same shape"), 365);
    }

    // Tests identical buffers score zero
    // Verified by adding one to every score
    #[test]
    fn test_dissimilarity_identical_is_zero() {
        let a = PixelBuffer::from_fn(4, 4, 4, |col, row, channel| (col + row + channel) as u8);

        assert_eq!(dissimilarity(&a, &a.clone()).expect("same shape"), 0);
    }

    // Tests wide channels do not overflow
    // Verified by accumulating in the channel type
    #[test]
    fn test_dissimilarity_wide_channels() {
        let a = PixelBuffer::new(2, 2, 1, vec![0u16; 4]);
        let b = PixelBuffer::new(2, 2, 1, vec![u16::MAX; 4]);

        assert_eq!(dissimilarity(&a, &b).expect("same shape"), 4 * 65_535);
    }

    // Tests differently shaped buffers are refused
    // Verified by zipping to the shorter buffer
    #[test]
    fn test_dissimilarity_shape_mismatch() {
        let gray = PixelBuffer::new(2, 2, 1, vec![0u8; 4]);
        let rgb = PixelBuffer::new(2, 2, 3, vec![0u8; 12]);

        assert!(matches!(
            dissimilarity(&gray, &rgb),
            Err(OrbitError::ChannelMismatch { .. })
        ));
    }

    // Tests ties keep the first index reaching the maximum
    // Verified by using >= in observe
    #[test]
    fn test_tracker_first_maximum_wins() {
        let mut tracker = DivergenceTracker::new();

        for (index, score) in [5, 9, 9, 3].into_iter().enumerate() {
            tracker.observe(index + 1, score);
        }

        assert_eq!(tracker.best(), Some(Divergence { index: 2, score: 9 }));
    }

    // Tests observe reports improvements only
    // Verified by always returning true
    #[test]
    fn test_tracker_observe_return_value() {
        let mut tracker = DivergenceTracker::default();

        assert!(tracker.best().is_none());
        assert!(tracker.observe(1, 0));
        assert!(!tracker.observe(2, 0));
        assert!(tracker.observe(3, 4));
        assert!(!tracker.observe(4, 1));
        assert_eq!(tracker.best(), Some(Divergence { index: 3, score: 4 }));
    }
}
