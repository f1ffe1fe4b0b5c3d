//! Frame composition for the grid canvas.
//!
//! `compose` turns the current grid, trace and cursor into a flat display
//! list; `paint` replays it on a 2D context. Every frame is a full repaint in
//! three layers: base cells, revealed steps in trace order, then markers.

use web_sys::CanvasRenderingContext2d;

use crate::model::{GridModel, Position, StepKind, StepTrace};
use crate::state::ViewportGeometry;

pub const OPEN_COLOR: &str = "#ffffff";
pub const WALL_COLOR: &str = "#888888";
pub const GRID_LINE_COLOR: &str = "#cccccc";
pub const FRONTIER_COLOR: &str = "#a0d468";
pub const VISITED_COLOR: &str = "#4caf50";
pub const PATH_COLOR: &str = "#9b59b6";
pub const START_COLOR: &str = "#5ab4f8";
pub const GOAL_COLOR: &str = "#f5a623";

/// Filled cells leave this many pixels of the grid line visible on each side.
const INSET: f64 = 1.0;

pub fn step_color(kind: StepKind) -> &'static str {
    match kind {
        StepKind::Frontier => FRONTIER_COLOR,
        StepKind::Visited => VISITED_COLOR,
        StepKind::Path => PATH_COLOR,
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Clear { width: f64, height: f64 },
    Fill { rect: Rect, color: &'static str },
    Stroke { rect: Rect, color: &'static str },
}

fn cell_rect(geometry: &ViewportGeometry, pos: Position) -> Rect {
    let (x, y) = geometry.cell_origin(pos);
    Rect {
        x,
        y,
        w: geometry.cell_size,
        h: geometry.cell_size,
    }
}

fn inset_rect(geometry: &ViewportGeometry, pos: Position) -> Rect {
    let outer = cell_rect(geometry, pos);
    Rect {
        x: outer.x + INSET,
        y: outer.y + INSET,
        w: (outer.w - 2.0 * INSET).max(0.0),
        h: (outer.h - 2.0 * INSET).max(0.0),
    }
}

/// Builds the display list for one frame. Pure: equal inputs give an equal
/// list. Steps with positions outside the grid are skipped.
pub fn compose(
    grid: &GridModel,
    trace: &StepTrace,
    cursor: usize,
    geometry: &ViewportGeometry,
) -> Vec<DrawOp> {
    let size = grid.size();
    let mut ops = Vec::with_capacity((size.rows * size.cols * 3) as usize + cursor + 3);
    ops.push(DrawOp::Clear {
        width: geometry.canvas_side,
        height: geometry.canvas_side,
    });

    for row in 0..size.rows {
        for col in 0..size.cols {
            let pos = Position::new(row, col);
            let outer = cell_rect(geometry, pos);
            ops.push(DrawOp::Fill {
                rect: outer,
                color: OPEN_COLOR,
            });
            if grid.is_wall(pos) {
                ops.push(DrawOp::Fill {
                    rect: inset_rect(geometry, pos),
                    color: WALL_COLOR,
                });
            }
            ops.push(DrawOp::Stroke {
                rect: outer,
                color: GRID_LINE_COLOR,
            });
        }
    }

    for step in trace.revealed(cursor) {
        if !grid.contains(step.position) {
            continue;
        }
        ops.push(DrawOp::Fill {
            rect: inset_rect(geometry, step.position),
            color: step_color(step.kind),
        });
    }

    ops.push(DrawOp::Fill {
        rect: inset_rect(geometry, grid.start()),
        color: START_COLOR,
    });
    ops.push(DrawOp::Fill {
        rect: inset_rect(geometry, grid.goal()),
        color: GOAL_COLOR,
    });
    ops
}

pub fn paint(ctx: &CanvasRenderingContext2d, ops: &[DrawOp]) {
    ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0).ok();
    ctx.set_line_width(1.0);
    for op in ops {
        match *op {
            DrawOp::Clear { width, height } => ctx.clear_rect(0.0, 0.0, width, height),
            DrawOp::Fill { rect, color } => {
                ctx.set_fill_style_str(color);
                ctx.fill_rect(rect.x, rect.y, rect.w, rect.h);
            }
            DrawOp::Stroke { rect, color } => {
                ctx.set_stroke_style_str(color);
                ctx.stroke_rect(rect.x, rect.y, rect.w, rect.h);
            }
        }
    }
}
