//! Core data models for the pathfinding visualizer.
//! The editable grid with its start/goal markers, and the step trace the
//! solver sends back for playback.

use serde::{Deserialize, Serialize};

use crate::error::GridError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSize {
    pub rows: u32,
    pub cols: u32,
}

impl Default for GridSize {
    fn default() -> Self {
        Self { rows: 25, cols: 25 }
    }
}

/// A grid coordinate. On the wire it is a `[row, col]` pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u32; 2]", into = "[u32; 2]")]
pub struct Position {
    pub row: u32,
    pub col: u32,
}

impl Position {
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }
}

impl From<[u32; 2]> for Position {
    fn from([row, col]: [u32; 2]) -> Self {
        Self { row, col }
    }
}

impl From<Position> for [u32; 2] {
    fn from(p: Position) -> Self {
        [p.row, p.col]
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Open,
    /// Blocks traversal; never placed under a marker.
    Wall,
}

impl Cell {
    pub fn wire_value(self) -> u8 {
        match self {
            Cell::Open => 0,
            Cell::Wall => 1,
        }
    }

    fn flipped(self) -> Self {
        match self {
            Cell::Open => Cell::Wall,
            Cell::Wall => Cell::Open,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Marker {
    Start,
    Goal,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridModel {
    size: GridSize,
    /// Row-major cells; length = rows * cols.
    cells: Vec<Cell>,
    start: Position,
    goal: Position,
}

impl Default for GridModel {
    fn default() -> Self {
        let size = GridSize::default();
        Self {
            size,
            cells: vec![Cell::Open; (size.rows * size.cols) as usize],
            start: Position::new(2, 2),
            goal: Position::new(size.rows - 3, size.cols - 3),
        }
    }
}

impl GridModel {
    /// All-open grid with `start=(2,2)` and `goal=(rows-3, cols-3)`.
    pub fn new(size: GridSize) -> Result<Self, GridError> {
        let GridSize { rows, cols } = size;
        if rows == 0 || cols == 0 {
            return Err(GridError::InvalidSize { rows, cols });
        }
        if rows < 3 || cols < 3 {
            return Err(GridError::MarkersDoNotFit { rows, cols });
        }
        Self::with_markers(size, Position::new(2, 2), Position::new(rows - 3, cols - 3))
    }

    /// All-open grid with explicit marker positions.
    pub fn with_markers(size: GridSize, start: Position, goal: Position) -> Result<Self, GridError> {
        let GridSize { rows, cols } = size;
        if rows == 0 || cols == 0 {
            return Err(GridError::InvalidSize { rows, cols });
        }
        let inside = |p: Position| p.row < rows && p.col < cols;
        if !inside(start) || !inside(goal) || start == goal {
            return Err(GridError::MarkersDoNotFit { rows, cols });
        }
        Ok(Self {
            size,
            cells: vec![Cell::Open; (rows * cols) as usize],
            start,
            goal,
        })
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn goal(&self) -> Position {
        self.goal
    }

    pub fn marker(&self, which: Marker) -> Position {
        match which {
            Marker::Start => self.start,
            Marker::Goal => self.goal,
        }
    }

    pub fn marker_at(&self, pos: Position) -> Option<Marker> {
        if pos == self.start {
            Some(Marker::Start)
        } else if pos == self.goal {
            Some(Marker::Goal)
        } else {
            None
        }
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.size.rows && pos.col < self.size.cols
    }

    /// Converts signed hit-test coordinates into an in-bounds position.
    pub fn position(&self, row: i64, col: i64) -> Option<Position> {
        if row < 0 || col < 0 {
            return None;
        }
        let pos = Position::new(u32::try_from(row).ok()?, u32::try_from(col).ok()?);
        self.contains(pos).then_some(pos)
    }

    fn index(&self, pos: Position) -> usize {
        (pos.row * self.size.cols + pos.col) as usize
    }

    pub fn cell(&self, pos: Position) -> Option<Cell> {
        self.contains(pos).then(|| self.cells[self.index(pos)])
    }

    pub fn is_wall(&self, pos: Position) -> bool {
        self.cell(pos) == Some(Cell::Wall)
    }

    pub fn wall_count(&self) -> usize {
        self.cells.iter().filter(|c| **c == Cell::Wall).count()
    }

    /// Flips `Open <-> Wall`. Marker cells and out-of-bounds positions are
    /// refused. Returns whether the grid changed.
    pub fn toggle_wall(&mut self, pos: Position) -> bool {
        if !self.contains(pos) || self.marker_at(pos).is_some() {
            return false;
        }
        let idx = self.index(pos);
        self.cells[idx] = self.cells[idx].flipped();
        true
    }

    /// Relocates a marker. Out-of-bounds targets and the other marker's cell
    /// are ignored; a wall under the new position is cleared.
    pub fn move_marker(&mut self, which: Marker, pos: Position) -> bool {
        if !self.contains(pos) {
            return false;
        }
        let other = match which {
            Marker::Start => self.goal,
            Marker::Goal => self.start,
        };
        if pos == other || pos == self.marker(which) {
            return false;
        }
        let idx = self.index(pos);
        self.cells[idx] = Cell::Open;
        match which {
            Marker::Start => self.start = pos,
            Marker::Goal => self.goal = pos,
        }
        true
    }

    /// Every non-marker cell becomes a wall with independent probability
    /// `probability`. `random` yields samples in `[0, 1)`.
    pub fn randomize_walls(&mut self, probability: f64, mut random: impl FnMut() -> f64) {
        for row in 0..self.size.rows {
            for col in 0..self.size.cols {
                let pos = Position::new(row, col);
                if self.marker_at(pos).is_some() {
                    continue;
                }
                let idx = self.index(pos);
                self.cells[idx] = if random() < probability {
                    Cell::Wall
                } else {
                    Cell::Open
                };
            }
        }
    }

    /// Back to the freshly created grid for the current dimensions.
    pub fn reset(&mut self) {
        match Self::new(self.size) {
            Ok(fresh) => *self = fresh,
            // Only reachable through `with_markers`; keep its markers.
            Err(_) => self.cells.fill(Cell::Open),
        }
    }

    /// Row-major 0/1 matrix for the solver request.
    pub fn to_wire(&self) -> Vec<Vec<u8>> {
        self.cells
            .chunks(self.size.cols as usize)
            .map(|row| row.iter().map(|c| c.wire_value()).collect())
            .collect()
    }
}

// ---------------- Step trace -----------------

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepKind {
    /// Discovered but not yet finalized.
    Frontier,
    /// Finalized by the solver.
    Visited,
    /// On the reconstructed route.
    Path,
}

impl StepKind {
    pub fn from_wire(tag: &str) -> Option<Self> {
        match tag {
            "frontier" => Some(StepKind::Frontier),
            "visit" => Some(StepKind::Visited),
            "path" => Some(StepKind::Path),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Step {
    pub kind: StepKind,
    pub position: Position,
}

/// Ordered solver output. Entries the solver sent without a usable kind or
/// position stay in the sequence (the cursor counts them) but are never drawn.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StepTrace {
    entries: Vec<Option<Step>>,
}

impl StepTrace {
    pub fn new(entries: Vec<Option<Step>>) -> Self {
        Self { entries }
    }

    #[cfg(test)]
    pub fn from_steps(steps: impl IntoIterator<Item = Step>) -> Self {
        Self {
            entries: steps.into_iter().map(Some).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn malformed_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_none()).count()
    }

    /// Drawable steps among the first `cursor` entries, in trace order.
    pub fn revealed(&self, cursor: usize) -> impl Iterator<Item = &Step> {
        self.entries[..cursor.min(self.entries.len())]
            .iter()
            .filter_map(Option::as_ref)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn lcg(seed: u64) -> impl FnMut() -> f64 {
        let mut state = seed;
        move || {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            (state >> 11) as f64 / (1u64 << 53) as f64
        }
    }

    #[test]
    fn default_grid_matches_new_25x25() {
        assert_eq!(GridModel::default(), GridModel::new(GridSize::default()).unwrap());
        let g = GridModel::default();
        assert_eq!(g.start(), Position::new(2, 2));
        assert_eq!(g.goal(), Position::new(22, 22));
    }

    #[test]
    fn rejects_sizes_that_cannot_hold_markers() {
        assert_eq!(
            GridModel::new(GridSize { rows: 0, cols: 4 }),
            Err(GridError::InvalidSize { rows: 0, cols: 4 })
        );
        assert!(matches!(
            GridModel::new(GridSize { rows: 2, cols: 9 }),
            Err(GridError::MarkersDoNotFit { .. })
        ));
        assert!(matches!(
            GridModel::new(GridSize { rows: 5, cols: 5 }),
            Err(GridError::MarkersDoNotFit { .. })
        ));
        assert!(GridModel::new(GridSize { rows: 3, cols: 3 }).is_ok());
    }

    #[test]
    fn explicit_markers_must_be_distinct_and_inside() {
        let size = GridSize { rows: 5, cols: 5 };
        let g = GridModel::with_markers(size, Position::new(0, 0), Position::new(4, 4)).unwrap();
        assert_eq!((g.start(), g.goal()), (Position::new(0, 0), Position::new(4, 4)));
        assert!(GridModel::with_markers(size, Position::new(1, 1), Position::new(1, 1)).is_err());
        assert!(GridModel::with_markers(size, Position::new(0, 0), Position::new(5, 0)).is_err());
    }

    #[test]
    fn toggle_refuses_markers_and_out_of_bounds() {
        let mut g = GridModel::default();
        assert!(!g.toggle_wall(g.start()));
        assert!(!g.toggle_wall(g.goal()));
        assert!(!g.toggle_wall(Position::new(25, 0)));
        assert_eq!(g.wall_count(), 0);
    }

    #[test]
    fn move_marker_refuses_other_marker_and_clears_wall() {
        let mut g = GridModel::default();
        assert!(!g.move_marker(Marker::Start, g.goal()));
        assert_eq!(g.start(), Position::new(2, 2));

        let target = Position::new(7, 7);
        assert!(g.toggle_wall(target));
        assert!(g.move_marker(Marker::Goal, target));
        assert_eq!(g.goal(), target);
        assert_eq!(g.cell(target), Some(Cell::Open));
    }

    #[test]
    fn position_rejects_negative_and_overflowing_coordinates() {
        let g = GridModel::default();
        assert_eq!(g.position(-1, 3), None);
        assert_eq!(g.position(3, 25), None);
        assert_eq!(g.position(24, 24), Some(Position::new(24, 24)));
    }

    #[test]
    fn reset_clears_walls_and_restores_markers() {
        let mut g = GridModel::default();
        g.randomize_walls(0.5, lcg(7));
        g.move_marker(Marker::Start, Position::new(10, 10));
        g.reset();
        assert_eq!(g, GridModel::default());
    }

    #[test]
    fn wire_matrix_uses_zero_and_one() {
        let mut g = GridModel::new(GridSize { rows: 4, cols: 6 }).unwrap();
        g.toggle_wall(Position::new(0, 5));
        let wire = g.to_wire();
        assert_eq!(wire.len(), 4);
        assert!(wire.iter().all(|r| r.len() == 6));
        assert_eq!(wire[0][5], 1);
        assert_eq!(wire.iter().flatten().map(|v| *v as usize).sum::<usize>(), 1);
    }

    #[test]
    fn randomize_marginal_frequency_is_close_to_probability() {
        let mut g = GridModel::new(GridSize { rows: 100, cols: 100 }).unwrap();
        g.randomize_walls(0.28, lcg(42));
        let ratio = g.wall_count() as f64 / (100.0 * 100.0 - 2.0);
        assert!((ratio - 0.28).abs() < 0.03, "ratio {ratio}");
    }

    #[test]
    fn revealed_skips_malformed_entries() {
        let step = Step { kind: StepKind::Visited, position: Position::new(1, 1) };
        let trace = StepTrace::new(vec![None, Some(step), None]);
        assert_eq!(trace.len(), 3);
        assert_eq!(trace.malformed_count(), 2);
        assert_eq!(trace.revealed(1).count(), 0);
        assert_eq!(trace.revealed(10).collect::<Vec<_>>(), vec![&step]);
    }

    fn valid_size() -> impl Strategy<Value = GridSize> {
        (3u32..40, 3u32..40)
            .prop_filter("5x5 puts both markers on (2,2)", |(r, c)| !(*r == 5 && *c == 5))
            .prop_map(|(rows, cols)| GridSize { rows, cols })
    }

    proptest! {
        #[test]
        fn created_grid_keeps_marker_invariants(size in valid_size()) {
            let g = GridModel::new(size).unwrap();
            prop_assert_ne!(g.start(), g.goal());
            prop_assert!(g.contains(g.start()) && g.contains(g.goal()));
            prop_assert_eq!(g.cell(g.start()), Some(Cell::Open));
            prop_assert_eq!(g.cell(g.goal()), Some(Cell::Open));
        }

        #[test]
        fn toggle_twice_restores_cell(size in valid_size(), r in 0u32..40, c in 0u32..40, seed in any::<u64>()) {
            let mut g = GridModel::new(size).unwrap();
            g.randomize_walls(0.3, lcg(seed));
            let pos = Position::new(r % size.rows, c % size.cols);
            prop_assume!(g.marker_at(pos).is_none());
            let before = g.cell(pos);
            prop_assert!(g.toggle_wall(pos));
            prop_assert_ne!(g.cell(pos), before);
            prop_assert!(g.toggle_wall(pos));
            prop_assert_eq!(g.cell(pos), before);
        }

        #[test]
        fn move_marker_lands_in_bounds_or_ignores(size in valid_size(), r in 0u32..60, c in 0u32..60, goal in any::<bool>()) {
            let mut g = GridModel::new(size).unwrap();
            let which = if goal { Marker::Goal } else { Marker::Start };
            let other = if goal { g.start() } else { g.goal() };
            let before = g.marker(which);
            let pos = Position::new(r, c);
            prop_assume!(pos != other);
            g.move_marker(which, pos);
            if g.contains(pos) {
                prop_assert_eq!(g.marker(which), pos);
            } else {
                prop_assert_eq!(g.marker(which), before);
            }
        }

        #[test]
        fn randomize_never_walls_markers(size in valid_size(), p in 0.0f64..=1.0, seed in any::<u64>()) {
            let mut g = GridModel::new(size).unwrap();
            g.randomize_walls(p, lcg(seed));
            prop_assert!(!g.is_wall(g.start()));
            prop_assert!(!g.is_wall(g.goal()));
        }
    }
}
