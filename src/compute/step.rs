//! Per-step update: sparse toroidal convolution, growth, and clamped integration.
//!
//! # Complexity
//!
//! O(N * K) per step where N is the cell count and K the number of retained kernel taps.
//! Rows are independent, so native builds fan them out over the rayon pool.

#[cfg(not(target_arch = "wasm32"))]
use rayon::prelude::*;

use super::grid::{clamp_unit, wrap_coord};
use super::growth::growth_with_inv_sigma;
use super::kernel::Kernel;

/// Scalar parameters read once per step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepParams {
    /// Integration step size.
    pub dt: f32,
    /// Growth center.
    pub mu: f32,
    /// Growth width. Must be non-zero.
    pub sigma: f32,
}

/// Perform sparse convolution with periodic boundary conditions.
pub fn convolve(input: &[f32], kernel: &Kernel, width: usize, height: usize) -> Vec<f32> {
    let mut output = vec![0.0f32; width * height];
    convolve_into(input, kernel, width, height, &mut output);
    output
}

/// Perform sparse convolution into pre-allocated buffer.
pub fn convolve_into(
    input: &[f32],
    kernel: &Kernel,
    width: usize,
    height: usize,
    output: &mut [f32],
) {
    let mut row_bases = Vec::with_capacity(kernel.len());
    for (y, row) in output.chunks_mut(width).enumerate().take(height) {
        fill_tap_row_bases(&mut row_bases, kernel, y, width, height);
        for (x, out) in row.iter_mut().enumerate() {
            *out = convolve_cell(input, kernel, &row_bases, x, width);
        }
    }
}

/// Compute every cell of `next` from `current`.
///
/// `next` is fully overwritten; `current` is only read. Each row of `next` is written by
/// exactly one task and all tasks have joined when this returns.
pub fn step_into(
    current: &[f32],
    next: &mut [f32],
    kernel: &Kernel,
    params: StepParams,
    width: usize,
    height: usize,
) {
    debug_assert_eq!(current.len(), width * height);
    debug_assert_eq!(next.len(), width * height);

    let inv_sigma = 1.0 / params.sigma;
    let update_row = |row_bases: &mut Vec<usize>, (y, row): (usize, &mut [f32])| {
        fill_tap_row_bases(row_bases, kernel, y, width, height);
        let src_row = &current[y * width..(y + 1) * width];
        for (x, out) in row.iter_mut().enumerate() {
            let u = convolve_cell(current, kernel, row_bases, x, width);
            let g = growth_with_inv_sigma(u, params.mu, inv_sigma);
            *out = clamp_unit(src_row[x] + params.dt * g);
        }
    };

    // One scratch buffer per worker, reused across the rows it handles.
    #[cfg(not(target_arch = "wasm32"))]
    next.par_chunks_mut(width).enumerate().for_each_init(
        || Vec::with_capacity(kernel.len()),
        |row_bases, item| update_row(row_bases, item),
    );

    #[cfg(target_arch = "wasm32")]
    {
        let mut row_bases = Vec::with_capacity(kernel.len());
        next.chunks_mut(width)
            .enumerate()
            .for_each(|item| update_row(&mut row_bases, item));
    }
}

/// Fill `row_bases` with the flat offset of the wrapped source row for every tap,
/// for output row `y`.
#[inline]
fn fill_tap_row_bases(
    row_bases: &mut Vec<usize>,
    kernel: &Kernel,
    y: usize,
    width: usize,
    height: usize,
) {
    row_bases.clear();
    row_bases.extend(
        kernel
            .entries()
            .iter()
            .map(|e| wrap_coord(y as i32 + e.dy, height) * width),
    );
}

#[inline]
fn convolve_cell(
    input: &[f32],
    kernel: &Kernel,
    row_bases: &[usize],
    x: usize,
    width: usize,
) -> f32 {
    kernel
        .entries()
        .iter()
        .zip(row_bases)
        .map(|(e, &base)| input[base + wrap_coord(x as i32 + e.dx, width)] * e.weight)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::growth;

    fn params() -> StepParams {
        StepParams {
            dt: 0.1,
            mu: 0.15,
            sigma: 0.015,
        }
    }

    #[test]
    fn test_convolve_uniform() {
        let kernel = Kernel::new(3.0);
        let width = 8;
        let height = 8;

        // Uniform input should give uniform output scaled by the retained weight sum
        let input = vec![1.0f32; width * height];
        let output = convolve(&input, &kernel, width, height);
        let expected = kernel.weight_sum();

        for &v in &output {
            assert!(
                (v - expected).abs() < 1e-5,
                "Uniform input should give uniform output"
            );
        }
    }

    #[test]
    fn test_convolve_impulse_matches_kernel() {
        let kernel = Kernel::new(2.0);
        let width = 16;
        let height = 16;

        let mut input = vec![0.0f32; width * height];
        input[8 * width + 8] = 1.0;

        let output = convolve(&input, &kernel, width, height);

        // A cell at (x, y) picks up the impulse through the tap pointing back at (8, 8).
        for e in kernel.entries() {
            let x = (8 - e.dx) as usize;
            let y = (8 - e.dy) as usize;
            assert!((output[y * width + x] - e.weight).abs() < 1e-7);
        }
    }

    #[test]
    fn test_convolve_wrap() {
        let kernel = Kernel::new(2.0);
        let width = 8;
        let height = 8;

        // Impulse at corner
        let mut input = vec![0.0f32; width * height];
        input[0] = 1.0;

        let output = convolve(&input, &kernel, width, height);

        assert!(output[0] > 0.0, "Top-left should receive contribution");
        assert!(output[width - 1] > 0.0, "Top-right should wrap");
        assert!(output[(height - 1) * width] > 0.0, "Bottom-left should wrap");
        assert!(
            output[(height - 1) * width + (width - 1)] > 0.0,
            "Bottom-right should wrap"
        );
        assert_eq!(output[4 * width + 4], 0.0, "Far cell should be untouched");
    }

    #[test]
    fn test_convolve_wrap_reverse() {
        // The opposite corner feeds back into (0, 0).
        let kernel = Kernel::new(2.0);
        let width = 8;
        let height = 8;

        let mut input = vec![0.0f32; width * height];
        input[(height - 1) * width + (width - 1)] = 1.0;

        let output = convolve(&input, &kernel, width, height);
        assert!(output[0] > 0.0);
    }

    #[test]
    fn test_step_empty_stays_empty() {
        let kernel = Kernel::new(5.0);
        let current = vec![0.0f32; 32 * 32];
        let mut next = vec![1.0f32; 32 * 32];

        step_into(&current, &mut next, &kernel, params(), 32, 32);
        assert!(next.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_step_saturated_decays_and_stays_bounded() {
        let kernel = Kernel::new(5.0);
        let current = vec![1.0f32; 16 * 16];
        let mut next = vec![0.0f32; 16 * 16];

        step_into(&current, &mut next, &kernel, params(), 16, 16);
        for &v in &next {
            assert!((0.0..1.0).contains(&v), "value {v} should decay but stay in range");
        }
    }

    #[test]
    fn test_step_matches_scalar_formula() {
        let kernel = Kernel::new(3.0);
        let width = 12;
        let height = 10;
        let current: Vec<f32> = (0..width * height)
            .map(|i| ((i * 37) % 100) as f32 / 100.0)
            .collect();
        let mut next = vec![0.0f32; width * height];
        let p = params();

        step_into(&current, &mut next, &kernel, p, width, height);
        let conv = convolve(&current, &kernel, width, height);

        for i in 0..width * height {
            let g = growth(conv[i], p.mu, p.sigma);
            let expected = (current[i] + p.dt * g).clamp(0.0, 1.0);
            assert!(
                (next[i] - expected).abs() < 1e-5,
                "cell {i}: {} vs {expected}",
                next[i]
            );
        }
    }

    #[test]
    fn test_step_deterministic() {
        let kernel = Kernel::new(4.0);
        let width = 24;
        let height = 24;
        let current: Vec<f32> = (0..width * height)
            .map(|i| ((i * 17) % 23) as f32 / 23.0)
            .collect();

        let mut a = vec![0.0f32; width * height];
        let mut b = vec![0.0f32; width * height];
        step_into(&current, &mut a, &kernel, params(), width, height);
        step_into(&current, &mut b, &kernel, params(), width, height);
        assert_eq!(a, b);
    }

    #[test]
    fn test_kernel_larger_than_grid_wraps_repeatedly() {
        // Radius exceeds both dimensions; every tap still lands inside the grid.
        let kernel = Kernel::new(6.0);
        let input = vec![0.5f32; 3 * 2];
        let output = convolve(&input, &kernel, 3, 2);
        for &v in &output {
            assert!((v - 0.5 * kernel.weight_sum()).abs() < 1e-5);
        }
    }

    #[test]
    fn test_reused_row_offsets_match_direct_sum() {
        // Many rows per worker; each row must see offsets for its own y only.
        let kernel = Kernel::new(5.0);
        let width = 9;
        let height = 64;
        let input: Vec<f32> = (0..width * height)
            .map(|i| ((i * 29) % 31) as f32 / 31.0)
            .collect();
        let output = convolve(&input, &kernel, width, height);

        let mut next = vec![0.0f32; width * height];
        step_into(&input, &mut next, &kernel, params(), width, height);

        for y in 0..height {
            for x in 0..width {
                let expected: f32 = kernel
                    .entries()
                    .iter()
                    .map(|e| {
                        let sx = wrap_coord(x as i32 + e.dx, width);
                        let sy = wrap_coord(y as i32 + e.dy, height);
                        input[sy * width + sx] * e.weight
                    })
                    .sum();
                let i = y * width + x;
                assert!((output[i] - expected).abs() < 1e-5, "conv ({x}, {y})");

                let g = growth(expected, params().mu, params().sigma);
                let stepped = (input[i] + params().dt * g).clamp(0.0, 1.0);
                assert!((next[i] - stepped).abs() < 1e-4, "step ({x}, {y})");
            }
        }
    }
}
