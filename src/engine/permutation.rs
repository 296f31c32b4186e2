//! Cat map pixel permutation
//!
//! The map sends the bottom-up coordinate `(x, y)` to
//! `((2x + y) mod W, (x + y) mod H)`, the unimodular matrix `[[2, 1], [1, 1]]`
//! taken modulo the grid. Buffers are stored top-down, so a coordinate `y`
//! lives in storage row `H - 1 - y`.
//!
//! Every call allocates a fresh buffer and never writes through its input.
//! Destination coverage is tracked with a bit set; a destination written
//! twice or never written is reported as [`OrbitError::NotBijective`].

use crate::engine::buffer::{Channel, PixelBuffer, validate_grid};
use crate::io::error::{OrbitError, Result, computation_error};
use bitvec::prelude::*;
use ndarray::{ArrayView1, ArrayView3, ArrayViewMut3, Axis};

/// Image of the bottom-up coordinate `(x, y)` under the cat map
pub const fn cat_map(x: usize, y: usize, width: usize, height: usize) -> (usize, usize) {
    ((2 * x + y) % width, (x + y) % height)
}

/// Apply the cat map once
///
/// # Errors
///
/// Returns an error if:
/// - The image has a zero or non-square shape (`InvalidDimensions`)
/// - The data length disagrees with the declared shape (`ChannelMismatch`)
pub fn transform<T: Channel>(image: &PixelBuffer<T>) -> Result<PixelBuffer<T>> {
    permute(image, None).map(|(next, _)| next)
}

/// Apply the cat map once while comparing the result against `reference`
///
/// Each destination pixel is compared with the reference pixel at the same
/// position as it is written; the returned flag is the running AND of those
/// comparisons, so it is true exactly when the new buffer equals `reference`.
///
/// # Errors
///
/// Returns an error if either buffer fails validation or the two buffers
/// differ in shape.
pub fn transform_and_compare<T: Channel>(
    image: &PixelBuffer<T>,
    reference: &PixelBuffer<T>,
) -> Result<(PixelBuffer<T>, bool)> {
    reference.validate()?;
    if !image.same_shape(reference) {
        return Err(OrbitError::InvalidDimensions {
            width: image.width,
            height: image.height,
            reason: "reference image has a different shape",
        });
    }
    permute(image, Some(reference))
}

fn permute<T: Channel>(
    image: &PixelBuffer<T>,
    reference: Option<&PixelBuffer<T>>,
) -> Result<(PixelBuffer<T>, bool)> {
    image.validate()?;

    let (width, height, channels) = (image.width, image.height, image.channels);
    let shape = (height, width, channels);

    let source = ArrayView3::from_shape(shape, image.data.as_slice())
        .map_err(|e| computation_error("source pixel view", &e))?;
    let reference = reference
        .map(|r| ArrayView3::from_shape(shape, r.data.as_slice()))
        .transpose()
        .map_err(|e| computation_error("reference pixel view", &e))?;

    let mut data = vec![T::zero(); image.expected_len()];
    let mut written = bitvec![0; image.pixel_count()];
    let mut identical = true;

    {
        let mut target = ArrayViewMut3::from_shape(shape, data.as_mut_slice())
            .map_err(|e| computation_error("target pixel view", &e))?;

        for x in 0..width {
            for y in 0..height {
                let (nx, ny) = cat_map(x, y, width, height);
                let source_row = height - 1 - y;
                let target_row = height - 1 - ny;

                if written.replace(target_row * width + nx, true) {
                    return Err(OrbitError::NotBijective {
                        width,
                        height,
                        reason: "destination written twice",
                    });
                }

                let pixel = lane(&source, source_row, x);
                target
                    .index_axis_mut(Axis(0), target_row)
                    .index_axis_move(Axis(0), nx)
                    .assign(&pixel);

                if identical && let Some(reference) = &reference {
                    identical = lane(reference, target_row, nx) == pixel;
                }
            }
        }
    }

    if written.not_all() {
        return Err(OrbitError::NotBijective {
            width,
            height,
            reason: "destination never written",
        });
    }

    Ok((PixelBuffer::new(width, height, channels, data), identical))
}

// Channel values of one pixel in a (row, column, channel) view
fn lane<'a, T>(view: &'a ArrayView3<'_, T>, row: usize, col: usize) -> ArrayView1<'a, T> {
    view.index_axis(Axis(0), row).index_axis_move(Axis(0), col)
}

/// Destination storage index for every source storage index
///
/// Storage indices are `row * width + column` with rows top-down.
///
/// # Errors
///
/// Returns `InvalidDimensions` for a zero or non-square grid.
pub fn permutation_table(width: usize, height: usize) -> Result<Vec<usize>> {
    validate_grid(width, height)?;

    let mut table = vec![0; width * height];
    for x in 0..width {
        for y in 0..height {
            let (nx, ny) = cat_map(x, y, width, height);
            let source = (height - 1 - y) * width + x;
            if let Some(slot) = table.get_mut(source) {
                *slot = (height - 1 - ny) * width + nx;
            }
        }
    }
    Ok(table)
}

/// Order of the coordinate permutation, the lcm of its cycle lengths
///
/// Any image returns to itself after this many transforms. The orbit tracker
/// never uses it; it exists to check empirically found periods.
///
/// # Errors
///
/// Returns `InvalidDimensions` for a zero or non-square grid.
pub fn permutation_order(width: usize, height: usize) -> Result<u64> {
    let table = permutation_table(width, height)?;
    let mut visited = bitvec![0; table.len()];
    let mut order = 1u64;

    for start in 0..table.len() {
        if visited.replace(start, true) {
            continue;
        }
        let mut length = 1u64;
        let mut current = table.get(start).copied().unwrap_or(start);
        while current != start {
            visited.set(current, true);
            length += 1;
            current = table.get(current).copied().unwrap_or(start);
        }
        order = order / gcd(order, length) * length;
    }

    Ok(order)
}

const fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}
