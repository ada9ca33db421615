//! Growth function for Lenia.
//!
//! The growth function determines how a cell reacts to its local neighborhood density.

/// Compute growth function: G(u; mu, sigma) = 2 * exp(-((u - mu) / sigma)^2 / 2) - 1
///
/// Output range: [-1, 1]
/// - Returns 1.0 when u == mu (optimal activation)
/// - Returns -1.0 when u is far from mu
///
/// `sigma` must be non-zero; callers clamp it before stepping.
#[inline]
pub fn growth(u: f32, mu: f32, sigma: f32) -> f32 {
    let z = (u - mu) / sigma;
    2.0 * (-0.5 * z * z).exp() - 1.0
}

/// Growth with a precomputed `1 / sigma`, used in the per-cell hot loop.
#[inline]
pub(crate) fn growth_with_inv_sigma(u: f32, mu: f32, inv_sigma: f32) -> f32 {
    let z = (u - mu) * inv_sigma;
    2.0 * (-0.5 * z * z).exp() - 1.0
}
