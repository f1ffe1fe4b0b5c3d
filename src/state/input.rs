//! Pointer handling for the grid canvas: wall toggling and marker drags.

use crate::model::{GridModel, Marker};
use crate::state::ViewportGeometry;

#[derive(Default, Debug, Clone)]
pub struct InputController {
    dragging: Option<Marker>,
}

impl InputController {
    /// Marker currently being dragged, if any.
    pub fn dragging(&self) -> Option<Marker> {
        self.dragging
    }

    /// Markers win the hit test and start a drag; any other cell toggles its
    /// wall. Returns whether the grid changed.
    pub fn pointer_down(
        &mut self,
        grid: &mut GridModel,
        geometry: &ViewportGeometry,
        x: f64,
        y: f64,
    ) -> bool {
        let Some(pos) = geometry
            .cell_at(x, y)
            .and_then(|(row, col)| grid.position(row, col))
        else {
            return false;
        };
        if let Some(marker) = grid.marker_at(pos) {
            self.dragging = Some(marker);
            return false;
        }
        grid.toggle_wall(pos)
    }

    /// While dragging, moves the marker to the hovered cell. Positions off
    /// the grid are ignored rather than clamped.
    pub fn pointer_move(
        &mut self,
        grid: &mut GridModel,
        geometry: &ViewportGeometry,
        x: f64,
        y: f64,
    ) -> bool {
        let Some(marker) = self.dragging else {
            return false;
        };
        match geometry
            .cell_at(x, y)
            .and_then(|(row, col)| grid.position(row, col))
        {
            Some(pos) => grid.move_marker(marker, pos),
            None => false,
        }
    }

    /// Pointer released or left the canvas.
    pub fn pointer_up(&mut self) {
        self.dragging = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Cell, GridSize, Position};

    fn setup() -> (GridModel, ViewportGeometry, InputController) {
        let grid = GridModel::new(GridSize { rows: 10, cols: 10 }).unwrap();
        // 500px canvas, 50px cells
        let geometry = ViewportGeometry::from_viewport(625.0, 1000.0, 10);
        (grid, geometry, InputController::default())
    }

    fn center(p: Position) -> (f64, f64) {
        (p.col as f64 * 50.0 + 25.0, p.row as f64 * 50.0 + 25.0)
    }

    #[test]
    fn click_toggles_wall() {
        let (mut grid, geo, mut input) = setup();
        let (x, y) = center(Position::new(5, 1));
        assert!(input.pointer_down(&mut grid, &geo, x, y));
        assert_eq!(grid.cell(Position::new(5, 1)), Some(Cell::Wall));
        input.pointer_up();
        assert!(input.pointer_down(&mut grid, &geo, x, y));
        assert_eq!(grid.cell(Position::new(5, 1)), Some(Cell::Open));
        assert_eq!(input.dragging(), None);
    }

    #[test]
    fn press_on_marker_starts_drag_without_mutation() {
        let (mut grid, geo, mut input) = setup();
        let before = grid.clone();
        let (x, y) = center(grid.goal());
        assert!(!input.pointer_down(&mut grid, &geo, x, y));
        assert_eq!(input.dragging(), Some(Marker::Goal));
        assert_eq!(grid, before);
    }

    #[test]
    fn drag_moves_marker_and_ignores_off_grid() {
        let (mut grid, geo, mut input) = setup();
        let (x, y) = center(grid.start());
        input.pointer_down(&mut grid, &geo, x, y);

        let (x, y) = center(Position::new(0, 9));
        assert!(input.pointer_move(&mut grid, &geo, x, y));
        assert_eq!(grid.start(), Position::new(0, 9));

        assert!(!input.pointer_move(&mut grid, &geo, 510.0, 20.0));
        assert!(!input.pointer_move(&mut grid, &geo, 20.0, -3.0));
        assert_eq!(grid.start(), Position::new(0, 9));
    }

    #[test]
    fn release_ends_drag() {
        let (mut grid, geo, mut input) = setup();
        let (x, y) = center(grid.start());
        input.pointer_down(&mut grid, &geo, x, y);
        input.pointer_up();
        let before = grid.clone();
        let (x, y) = center(Position::new(4, 4));
        assert!(!input.pointer_move(&mut grid, &geo, x, y));
        assert_eq!(grid, before);
    }

    #[test]
    fn move_without_drag_is_ignored() {
        let (mut grid, geo, mut input) = setup();
        let (x, y) = center(Position::new(3, 3));
        assert!(!input.pointer_move(&mut grid, &geo, x, y));
        assert_eq!(grid.wall_count(), 0);
    }

    #[test]
    fn press_outside_grid_does_nothing() {
        let (mut grid, geo, mut input) = setup();
        assert!(!input.pointer_down(&mut grid, &geo, 700.0, 10.0));
        assert_eq!(input.dragging(), None);
        assert_eq!(grid.wall_count(), 0);
    }
}
