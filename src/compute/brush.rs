//! Brush painting on the current buffer.
//!
//! Unlike the convolution, painting does not wrap: cells outside the grid are skipped.

use super::grid::{Grid, clamp_unit};

/// Add a cone-shaped stroke centered at (cx, cy).
///
/// Every in-bounds cell within `radius` of the center receives
/// `intensity * (1 - d / radius)`, then is clamped to [0, 1]. Negative intensity erases.
/// A non-positive or non-finite radius paints nothing.
pub fn paint(grid: &mut Grid, cx: f32, cy: f32, radius: f32, intensity: f32) {
    if !radius.is_finite() || radius <= 0.0 || !cx.is_finite() || !cy.is_finite() {
        return;
    }

    let width = grid.width();
    let height = grid.height();

    let x_min = (cx - radius).floor().max(0.0);
    let y_min = (cy - radius).floor().max(0.0);
    let x_max = (cx + radius).ceil().min(width as f32 - 1.0);
    let y_max = (cy + radius).ceil().min(height as f32 - 1.0);
    if x_min > x_max || y_min > y_max {
        return;
    }

    let (x_min, x_max) = (x_min as usize, x_max as usize);
    let (y_min, y_max) = (y_min as usize, y_max as usize);
    let cells = grid.current_mut();

    for y in y_min..=y_max {
        let dy = y as f32 - cy;
        let row = &mut cells[y * width..(y + 1) * width];
        for (x, cell) in row.iter_mut().enumerate().take(x_max + 1).skip(x_min) {
            let dx = x as f32 - cx;
            let dist = (dx * dx + dy * dy).sqrt();
            if dist <= radius {
                *cell = clamp_unit(*cell + intensity * (1.0 - dist / radius));
            }
        }
    }
}
