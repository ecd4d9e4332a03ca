//! Bevel chrome: the two-tone borders that sell the retro depth illusion.
//!
//! A raised panel is lit from the top-left: its top row and left column use
//! the highlight color, the bottom row and right column the shadow color.
//! A sunken well inverts the two. Bevels are one cell thick.

use crate::css::styles::{BevelKind, Styles};
use crate::geometry::Region;
use crate::render::strip::{CellStyle, Strip};

/// Half-block glyphs give the bevel a thinner look than full background
/// cells: the top edge paints the lower half of its row, the bottom edge the
/// upper half, so adjacent chrome appears to touch.
const UPPER_HALF: char = '▀';
const LOWER_HALF: char = '▄';
const FULL_BLOCK: char = '█';

/// Resolve the highlight/shadow pair for a bevel from computed styles.
///
/// Falls back to plain white/dark-gray when the stylesheet leaves the edge
/// colors unset.
fn edge_colors(styles: &Styles) -> (String, String) {
    let light = styles.border_light.clone().unwrap_or_else(|| "white".into());
    let dark = styles.border_dark.clone().unwrap_or_else(|| "dark_gray".into());
    (light, dark)
}

/// Render a one-cell bevel frame around the inside edge of `region`.
///
/// Returns an empty vec when the region is too small for a frame or the
/// computed styles carry no bevel. The frame cells keep the widget's
/// background so the bevel reads as an edge, not a box.
pub fn frame_strips(region: Region, styles: &Styles) -> Vec<Strip> {
    let kind = styles.bevel_kind();
    if kind == BevelKind::None || region.width < 2 || region.height < 2 {
        return Vec::new();
    }

    let (light, dark) = edge_colors(styles);
    let (top_left, bottom_right) = match kind {
        BevelKind::Raised => (light, dark),
        BevelKind::Sunken => (dark, light),
        BevelKind::None => unreachable!(),
    };

    let bg = styles.background.clone();
    let edge = |fg: &str| CellStyle {
        fg: Some(fg.to_string()),
        bg: bg.clone(),
        ..CellStyle::default()
    };

    let mut strips = Vec::with_capacity(region.height as usize);

    // Top row: left corner + top edge in the top-left tone.
    let mut top = Strip::new(region.y, region.x);
    top.push(FULL_BLOCK, edge(&top_left));
    for _ in 1..region.width - 1 {
        top.push(UPPER_HALF, edge(&top_left));
    }
    top.push(UPPER_HALF, edge(&bottom_right));
    strips.push(top);

    // Middle rows: single edge cell on each side.
    for row in 1..region.height - 1 {
        let mut left = Strip::new(region.y + row, region.x);
        left.push(FULL_BLOCK, edge(&top_left));
        strips.push(left);

        let mut right = Strip::new(region.y + row, region.right() - 1);
        right.push(FULL_BLOCK, edge(&bottom_right));
        strips.push(right);
    }

    // Bottom row: bottom edge + right corner in the bottom-right tone.
    let mut bottom = Strip::new(region.bottom() - 1, region.x);
    bottom.push(LOWER_HALF, edge(&top_left));
    for _ in 1..region.width {
        bottom.push(LOWER_HALF, edge(&bottom_right));
    }
    strips.push(bottom);

    strips
}

/// The interior of a beveled region: the region shrunk by the frame, or the
/// region itself when the styles carry no bevel.
pub fn interior(region: Region, styles: &Styles) -> Region {
    if styles.bevel_kind() == BevelKind::None {
        region
    } else {
        region.shrink(crate::geometry::Spacing::all(1))
    }
}
