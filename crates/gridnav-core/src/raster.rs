//! Integer Bresenham rasterization.

use crate::geom::Cell;

/// Cells on the segment `a → b`, both endpoints included.
///
/// Steps one unit along the major axis at a time and accumulates twice the
/// minor delta into an error term; whenever the error reaches the major
/// delta the minor coordinate advances and the error drops by twice the
/// major delta. No division is involved.
///
/// The segment is always rasterized from the row-major lesser endpoint, so
/// `line(b, a)` is exactly `line(a, b)` reversed.
pub fn line(a: Cell, b: Cell) -> Vec<Cell> {
    if b < a {
        let mut cells = line(b, a);
        cells.reverse();
        return cells;
    }

    let d_row = (b.row - a.row).abs();
    let d_col = (b.col - a.col).abs();
    let s_row = (b.row - a.row).signum();
    let s_col = (b.col - a.col).signum();

    let mut cells = Vec::with_capacity(d_row.max(d_col) as usize + 1);
    let mut cur = a;
    cells.push(cur);

    let mut error = 0;
    if d_row >= d_col {
        for _ in 0..d_row {
            cur.row += s_row;
            error += d_col * 2;
            if error >= d_row {
                cur.col += s_col;
                error -= d_row * 2;
            }
            cells.push(cur);
        }
    } else {
        for _ in 0..d_col {
            cur.col += s_col;
            error += d_row * 2;
            if error >= d_col {
                cur.row += s_row;
                error -= d_col * 2;
            }
            cells.push(cur);
        }
    }
    cells
}
