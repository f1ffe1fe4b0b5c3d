use crate::model::Position;

// Canvas sizing derived from the viewport; recomputed on every resize.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportGeometry {
    /// Square canvas edge in device pixels.
    pub canvas_side: f64,
    pub cell_size: f64,
}

impl Default for ViewportGeometry {
    fn default() -> Self {
        Self {
            canvas_side: 500.0,
            cell_size: 20.0,
        }
    }
}

impl ViewportGeometry {
    /// `side = min(0.6 * height, 0.8 * width)`, truncated to whole pixels the
    /// way a canvas `width` attribute is; `cell = side / cols`.
    pub fn from_viewport(width: f64, height: f64, cols: u32) -> Self {
        let side = (height * 0.6).min(width * 0.8).max(0.0).floor();
        let cell_size = if cols == 0 { 0.0 } else { side / cols as f64 };
        Self {
            canvas_side: side,
            cell_size,
        }
    }

    /// `(row, col) = floor(offset / cell)` for an offset relative to the
    /// canvas rectangle. May be negative or past the grid; callers bound it.
    pub fn cell_at(&self, x: f64, y: f64) -> Option<(i64, i64)> {
        if self.cell_size <= 0.0 || !x.is_finite() || !y.is_finite() {
            return None;
        }
        let col = (x / self.cell_size).floor() as i64;
        let row = (y / self.cell_size).floor() as i64;
        Some((row, col))
    }

    /// Top-left pixel of a cell.
    pub fn cell_origin(&self, pos: Position) -> (f64, f64) {
        (
            pos.col as f64 * self.cell_size,
            pos.row as f64 * self.cell_size,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_is_limited_by_height_or_width() {
        let tall = ViewportGeometry::from_viewport(1000.0, 2000.0, 25);
        assert_eq!(tall.canvas_side, 800.0);
        assert_eq!(tall.cell_size, 32.0);

        let wide = ViewportGeometry::from_viewport(2000.0, 1000.0, 25);
        assert_eq!(wide.canvas_side, 600.0);
        assert_eq!(wide.cell_size, 24.0);
    }

    #[test]
    fn side_is_whole_pixels() {
        let g = ViewportGeometry::from_viewport(1280.0, 721.0, 25);
        assert_eq!(g.canvas_side, 432.0);
    }

    #[test]
    fn hit_test_floors_offsets() {
        let g = ViewportGeometry::from_viewport(1000.0, 1000.0, 25);
        assert_eq!(g.cell_size, 24.0);
        assert_eq!(g.cell_at(0.0, 0.0), Some((0, 0)));
        assert_eq!(g.cell_at(23.9, 24.0), Some((1, 0)));
        assert_eq!(g.cell_at(-0.5, 5.0), Some((0, -1)));
        assert_eq!(g.cell_at(600.0, 599.0), Some((24, 25)));
    }

    #[test]
    fn degenerate_viewport_hits_nothing() {
        let g = ViewportGeometry::from_viewport(0.0, 0.0, 25);
        assert_eq!(g.cell_at(3.0, 3.0), None);
    }
}
