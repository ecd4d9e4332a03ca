//! Snapshot helpers: render strips and frames to plain text.
//!
//! These back the insta snapshot tests: widgets and whole desktop frames
//! flatten to strings with trailing spaces trimmed, one line per row.

use crate::css::styles::Styles;
use crate::geometry::Region;
use crate::render::compositor::Compositor;
use crate::render::strip::Strip;
use crate::widget::traits::Widget;

/// Flatten strips into a `width` x `height` text block.
///
/// Cells outside every strip are spaces; trailing spaces are trimmed per
/// line.
pub fn strips_to_string(strips: &[Strip], width: i32, height: i32) -> String {
    let w = width.max(0) as usize;
    let h = height.max(0) as usize;
    let mut grid = vec![vec![' '; w]; h];

    for strip in strips {
        if strip.y < 0 || strip.y as usize >= h {
            continue;
        }
        let row = strip.y as usize;
        for (i, cell) in strip.cells.iter().enumerate() {
            let x = strip.x_offset + i as i32;
            if x < 0 {
                continue;
            }
            let col = x as usize;
            if col < w {
                grid[row][col] = cell.ch;
            }
        }
    }

    grid.iter()
        .map(|row| {
            let line: String = row.iter().collect();
            line.trim_end().to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render a widget with empty styles and flatten to text.
pub fn render_to_string(widget: &dyn Widget, width: i32, height: i32) -> String {
    render_to_styled_string(widget, width, height, &Styles::new())
}

/// Render a widget with the given styles and flatten to text.
pub fn render_to_styled_string(
    widget: &dyn Widget,
    width: i32,
    height: i32,
    styles: &Styles,
) -> String {
    let strips = widget.render(Region::new(0, 0, width, height), styles);
    strips_to_string(&strips, width, height)
}

/// Flatten a compositor's assembling frame to text.
pub fn compositor_to_string(compositor: &Compositor) -> String {
    let mut lines = Vec::with_capacity(compositor.height as usize);
    for y in 0..compositor.height {
        let line: String = (0..compositor.width)
            .map(|x| compositor.get_cell(x, y).map(|c| c.ch).unwrap_or(' '))
            .collect();
        lines.push(line.trim_end().to_string());
    }
    lines.join("\n")
}
