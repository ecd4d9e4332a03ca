//! Strip: a horizontal line of styled terminal cells.
//!
//! A `Strip` is the fundamental rendering primitive in tui95. It represents a
//! single horizontal row of `StyledCell`s placed into the compositor's screen
//! buffer. Widgets produce `Vec<Strip>` from their `render()` method; the
//! desktop clips and stacks them in window z-order.

use crate::css::styles::Styles;

// ---------------------------------------------------------------------------
// CellStyle
// ---------------------------------------------------------------------------

/// Visual style for a single terminal cell.
///
/// Colors are stored as strings that the driver parses as named colors or
/// `#rrggbb` hex values — the same representation the CSS layer produces.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CellStyle {
    pub fg: Option<String>,
    pub bg: Option<String>,
    pub bold: bool,
    pub dim: bool,
    pub underline: bool,
    pub reverse: bool,
}

impl CellStyle {
    /// Create a new `CellStyle` with all attributes unset/false.
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert CSS [`Styles`] into a `CellStyle`, extracting color,
    /// background, and text-style flags.
    pub fn from_styles(styles: &Styles) -> Self {
        let flags = styles.text_style.unwrap_or_default();
        CellStyle {
            fg: styles.color.clone(),
            bg: styles.background.clone(),
            bold: flags.bold.unwrap_or(false),
            dim: flags.dim.unwrap_or(false),
            underline: flags.underline.unwrap_or(false),
            reverse: flags.reverse.unwrap_or(false),
        }
    }

    /// A copy of this style with the foreground replaced.
    pub fn with_fg(mut self, fg: impl Into<String>) -> Self {
        self.fg = Some(fg.into());
        self
    }

    /// A copy of this style with the background replaced.
    pub fn with_bg(mut self, bg: impl Into<String>) -> Self {
        self.bg = Some(bg.into());
        self
    }
}

// ---------------------------------------------------------------------------
// StyledCell
// ---------------------------------------------------------------------------

/// A single terminal cell: one character with associated style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledCell {
    pub ch: char,
    pub style: CellStyle,
}

impl StyledCell {
    /// Create a new styled cell.
    pub fn new(ch: char, style: CellStyle) -> Self {
        Self { ch, style }
    }

    /// A blank (space) cell with default style.
    pub fn blank() -> Self {
        Self { ch: ' ', style: CellStyle::default() }
    }

    /// A blank (space) cell with the given style.
    pub fn blank_styled(style: CellStyle) -> Self {
        Self { ch: ' ', style }
    }
}

impl Default for StyledCell {
    fn default() -> Self {
        Self::blank()
    }
}

// ---------------------------------------------------------------------------
// Strip
// ---------------------------------------------------------------------------

/// A horizontal line of styled terminal cells.
///
/// Each Strip represents one row (at a given y position) starting at
/// `x_offset`. Positions are absolute screen coordinates by the time strips
/// reach the compositor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Strip {
    /// The row this strip occupies.
    pub y: i32,
    /// Starting x position for this strip's cells.
    pub x_offset: i32,
    /// The cells in left-to-right order.
    pub cells: Vec<StyledCell>,
}

impl Strip {
    /// Create a new empty strip at the given row and x offset.
    pub fn new(y: i32, x_offset: i32) -> Self {
        Self { y, x_offset, cells: Vec::new() }
    }

    /// Push a single character with the given style.
    pub fn push(&mut self, ch: char, style: CellStyle) {
        self.cells.push(StyledCell::new(ch, style));
    }

    /// Push every character of `text` with the same style.
    pub fn push_str(&mut self, text: &str, style: CellStyle) {
        for ch in text.chars() {
            self.cells.push(StyledCell::new(ch, style.clone()));
        }
    }

    /// The width of this strip in cells.
    pub fn width(&self) -> i32 {
        self.cells.len() as i32
    }

    /// Pad the strip to exactly `width` cells using spaces with the given
    /// style. If the strip is already wider than `width`, it is truncated.
    pub fn fill(&mut self, width: i32, style: CellStyle) {
        let w = width.max(0) as usize;
        if self.cells.len() < w {
            self.cells.resize(w, StyledCell::blank_styled(style));
        } else if self.cells.len() > w {
            self.cells.truncate(w);
        }
    }

    /// Translate the strip by (dx, dy). Used to move widget-local strips into
    /// absolute screen coordinates.
    pub fn translate(mut self, dx: i32, dy: i32) -> Strip {
        self.x_offset += dx;
        self.y += dy;
        self
    }

    /// The rightmost x position (exclusive) of this strip.
    pub fn right(&self) -> i32 {
        self.x_offset + self.width()
    }
}

/// Build a strip covering `region`'s row `row` filled with blanks.
pub fn blank_row(region: crate::geometry::Region, row: i32, style: CellStyle) -> Strip {
    let mut strip = Strip::new(region.y + row, region.x);
    strip.fill(region.width, style);
    strip
}

// ===========================================================================
// Tests
// ===========================================================================
