//! Kernel generation for Lenia.
//!
//! The neighborhood kernel is a single radial bump, normalized over its dense square
//! and then compacted into a sparse list of offsets for the step loop.

use crate::schema::{MAX_KERNEL_RADIUS, MIN_KERNEL_RADIUS};

/// Normalized weights at or below this value are dropped when compacting the kernel.
///
/// At radius 13 the smallest in-disk weight is ~1.4e-4, so the whole disk survives.
/// Radii beyond roughly 50 start trimming the outer rim.
pub const KERNEL_WEIGHT_THRESHOLD: f32 = 1e-5;

/// One retained kernel tap: neighbor offset and its normalized weight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KernelEntry {
    pub dx: i32,
    pub dy: i32,
    pub weight: f32,
}

/// Precomputed sparse kernel ready for convolution.
#[derive(Debug, Clone)]
pub struct Kernel {
    /// Radius the kernel was built for.
    radius: f32,
    /// Side of the dense square the weights were sampled on.
    size: usize,
    /// Retained taps, in row-major order of the dense square.
    entries: Vec<KernelEntry>,
}

impl Kernel {
    /// Build the kernel for `radius` cells.
    ///
    /// `radius` is clamped to [`MIN_KERNEL_RADIUS`, `MAX_KERNEL_RADIUS`]; NaN builds the
    /// smallest kernel.
    pub fn new(radius: f32) -> Self {
        let radius = if radius.is_nan() {
            MIN_KERNEL_RADIUS
        } else {
            radius.clamp(MIN_KERNEL_RADIUS, MAX_KERNEL_RADIUS)
        };
        let dense = dense_weights(radius);
        let size = dense_size(radius);

        let sum: f32 = dense.iter().sum();
        let inv_sum = if sum > 0.0 { 1.0 / sum } else { 0.0 };

        let mut entries = Vec::new();
        for j in 0..size {
            for i in 0..size {
                let weight = dense[j * size + i] * inv_sum;
                if weight > KERNEL_WEIGHT_THRESHOLD {
                    entries.push(KernelEntry {
                        dx: (i as f32 - radius).round() as i32,
                        dy: (j as f32 - radius).round() as i32,
                        weight,
                    });
                }
            }
        }

        log::debug!(
            "Built kernel: radius={radius}, size={size}, taps={}, weight_sum={:.6}",
            entries.len(),
            entries.iter().map(|e| e.weight).sum::<f32>()
        );

        Self {
            radius,
            size,
            entries,
        }
    }

    /// Radius this kernel was built for.
    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Side of the dense sampling square, ceil(2R + 1).
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Retained taps.
    #[inline]
    pub fn entries(&self) -> &[KernelEntry] {
        &self.entries
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of retained weights. Slightly below 1 once the threshold trims taps.
    pub fn weight_sum(&self) -> f32 {
        self.entries.iter().map(|e| e.weight).sum()
    }
}

fn dense_size(radius: f32) -> usize {
    (2.0 * radius + 1.0).ceil() as usize
}

/// Unnormalized bump exp(4 * (1 - d^2)) sampled on the dense square, d = |offset| / R.
fn dense_weights(radius: f32) -> Vec<f32> {
    let size = dense_size(radius);
    let mut data = vec![0.0f32; size * size];

    for j in 0..size {
        for i in 0..size {
            let dx = i as f32 - radius;
            let dy = j as f32 - radius;
            let norm_dist = (dx * dx + dy * dy).sqrt() / radius;

            // Skip if outside kernel radius
            if norm_dist > 1.0 {
                continue;
            }

            data[j * size + i] = (4.0 * (1.0 - norm_dist * norm_dist)).exp();
        }
    }

    data
}
