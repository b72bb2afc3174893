//! Row-major cell centers for a rows×cols grid

use super::types::{BoundingBox, Point, Size};

/// Centers of every cell, row 0 left to right, then row 1, and so on
pub fn grid_positions(
    top_left: Point,
    rows: u32,
    cols: u32,
    cell_width: f64,
    cell_height: f64,
    spacing: f64,
) -> Vec<Point> {
    let mut positions = Vec::with_capacity((rows * cols) as usize);
    for row in 0..rows {
        for col in 0..cols {
            positions.push(Point {
                x: top_left.x + col as f64 * (cell_width + spacing) + cell_width / 2.0,
                y: top_left.y + row as f64 * (cell_height + spacing) + cell_height / 2.0,
            });
        }
    }
    positions
}

/// Total width and height covered by the grid, spacing only between cells
pub fn grid_extent(rows: u32, cols: u32, cell_width: f64, cell_height: f64, spacing: f64) -> Size {
    let span = |n: u32, cell: f64| {
        if n == 0 {
            0.0
        } else {
            n as f64 * cell + (n - 1) as f64 * spacing
        }
    };
    Size::new(span(cols, cell_width), span(rows, cell_height))
}

/// Top-left corner that centers a grid of `extent` on `center`
pub fn centered_top_left(center: Point, extent: Size) -> Point {
    Point::new(center.x - extent.width / 2.0, center.y - extent.height / 2.0)
}

/// Cell size that fills `available` with `n` cells separated by `spacing`.
///
/// Never negative; a spacing that eats the whole span leaves zero-sized cells.
pub fn fitted_cell(available: f64, n: u32, spacing: f64) -> f64 {
    if n == 0 {
        return 0.0;
    }
    ((available - (n - 1) as f64 * spacing) / n as f64).max(0.0)
}

/// Bounds of a cell given its center
pub fn cell_bounds(center: Point, cell_width: f64, cell_height: f64) -> BoundingBox {
    BoundingBox::centered(center, Size::new(cell_width, cell_height))
}
