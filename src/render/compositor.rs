//! Screen buffer assembly and frame diffing.
//!
//! The `Compositor` maintains two 2D grids of `StyledCell`s: the frame being
//! assembled and the frame last shown. Each render cycle the desktop paints
//! the surface and then every window back-to-front (z-order is paint order),
//! clipped to the screen; `finish_frame` diffs the two grids and yields only
//! the `CellUpdate`s the driver must emit.

use crate::geometry::Region;
use super::strip::{CellStyle, Strip, StyledCell};

// ---------------------------------------------------------------------------
// CellUpdate
// ---------------------------------------------------------------------------

/// A single cell that changed between frames.
///
/// Used by the driver to emit minimal terminal escape sequences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellUpdate {
    pub x: u16,
    pub y: u16,
    pub cell: StyledCell,
}

// ---------------------------------------------------------------------------
// Compositor
// ---------------------------------------------------------------------------

/// Double-buffered screen compositor with a whole-frame dirty flag.
///
/// Overlapping windows make per-region dirty tracking unprofitable — moving
/// or raising one window exposes arbitrary cells of the ones beneath it — so
/// the compositor repaints the full frame when anything changed and relies on
/// the cell diff to keep terminal output small.
#[derive(Debug, Clone)]
pub struct Compositor {
    /// The frame being assembled. `current[y][x]` is column x, row y.
    current: Vec<Vec<StyledCell>>,
    /// The frame last handed to the driver.
    shown: Vec<Vec<StyledCell>>,
    /// Terminal width.
    pub width: u16,
    /// Terminal height.
    pub height: u16,
    /// Whether anything changed since the last finished frame.
    dirty: bool,
}

impl Compositor {
    /// Create a new compositor with blank buffers of the given dimensions.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            current: Self::blank_buffer(width, height),
            shown: Self::blank_buffer(width, height),
            width,
            height,
            dirty: true,
        }
    }

    /// Resize both buffers. All cells reset to blank and the frame is dirty.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.current = Self::blank_buffer(width, height);
        // Blank the shown frame too so the next diff repaints everything.
        self.shown = Self::blank_buffer(width, height);
        self.dirty = true;
    }

    /// Mark the frame dirty (something changed; repaint needed).
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Whether a repaint is needed.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Reset the assembling frame to a uniform background.
    pub fn begin_frame(&mut self, background: CellStyle) {
        for row in &mut self.current {
            for cell in row.iter_mut() {
                *cell = StyledCell::blank_styled(background.clone());
            }
        }
    }

    /// Place rendered strips into the assembling frame, clipped to `clip`.
    ///
    /// Strips carry absolute screen coordinates. Cells falling outside both
    /// the clip region and the screen bounds are discarded — this is what
    /// lets a window hang off any screen edge. A cell with an unset
    /// background is transparent: it inherits the background of whatever was
    /// painted beneath it, so labels sit on their window's surface.
    pub fn place_strips(&mut self, strips: &[Strip], clip: Region) {
        let screen = Region::new(0, 0, self.width as i32, self.height as i32);
        let clip = clip.intersection(screen);

        if clip.width <= 0 || clip.height <= 0 {
            return;
        }

        for strip in strips {
            let y = strip.y;
            if y < clip.y || y >= clip.bottom() {
                continue;
            }
            let row = y as usize;

            for (i, cell) in strip.cells.iter().enumerate() {
                let x = strip.x_offset + i as i32;
                if x < clip.x || x >= clip.right() {
                    continue;
                }
                let col = x as usize;
                let mut cell = cell.clone();
                if cell.style.bg.is_none() {
                    cell.style.bg = self.current[row][col].style.bg.clone();
                }
                self.current[row][col] = cell;
            }
        }
    }

    /// Finish the frame: diff against the shown frame, promote the current
    /// frame to shown, clear the dirty flag, and return the changed cells.
    pub fn finish_frame(&mut self) -> Vec<CellUpdate> {
        let mut updates = Vec::new();

        for y in 0..self.height as usize {
            for x in 0..self.width as usize {
                if self.current[y][x] != self.shown[y][x] {
                    updates.push(CellUpdate {
                        x: x as u16,
                        y: y as u16,
                        cell: self.current[y][x].clone(),
                    });
                }
            }
        }

        self.shown = self.current.clone();
        self.dirty = false;
        updates
    }

    /// The assembling frame's cell at (x, y), if in bounds.
    pub fn get_cell(&self, x: u16, y: u16) -> Option<&StyledCell> {
        self.current.get(y as usize).and_then(|row| row.get(x as usize))
    }

    fn blank_buffer(width: u16, height: u16) -> Vec<Vec<StyledCell>> {
        (0..height as usize)
            .map(|_| (0..width as usize).map(|_| StyledCell::blank()).collect())
            .collect()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn make_strip(y: i32, x_offset: i32, text: &str) -> Strip {
        let mut strip = Strip::new(y, x_offset);
        strip.push_str(text, CellStyle::default());
        strip
    }

    fn teal() -> CellStyle {
        CellStyle { bg: Some("#008080".into()), ..CellStyle::default() }
    }

    #[test]
    fn new_compositor_is_dirty() {
        let comp = Compositor::new(10, 4);
        assert!(comp.is_dirty());
        assert_eq!(comp.width, 10);
        assert_eq!(comp.height, 4);
    }

    #[test]
    fn place_and_read_cell() {
        let mut comp = Compositor::new(10, 4);
        comp.place_strips(&[make_strip(1, 2, "OK")], Region::new(0, 0, 10, 4));
        assert_eq!(comp.get_cell(2, 1).unwrap().ch, 'O');
        assert_eq!(comp.get_cell(3, 1).unwrap().ch, 'K');
        assert_eq!(comp.get_cell(4, 1).unwrap().ch, ' ');
    }

    #[test]
    fn clips_to_region() {
        let mut comp = Compositor::new(10, 4);
        comp.place_strips(&[make_strip(0, 0, "ABCDEFGH")], Region::new(0, 0, 3, 4));
        assert_eq!(comp.get_cell(2, 0).unwrap().ch, 'C');
        assert_eq!(comp.get_cell(3, 0).unwrap().ch, ' '); // clipped
    }

    #[test]
    fn clips_to_screen_bounds() {
        let mut comp = Compositor::new(5, 2);
        // Strip starts off-screen to the left and runs past the right edge.
        comp.place_strips(&[make_strip(0, -2, "ABCDEFGH")], Region::new(-5, 0, 20, 2));
        // 'C' is the first visible cell (x = 0).
        assert_eq!(comp.get_cell(0, 0).unwrap().ch, 'C');
        assert_eq!(comp.get_cell(4, 0).unwrap().ch, 'G');
    }

    #[test]
    fn rows_outside_clip_skipped() {
        let mut comp = Compositor::new(10, 4);
        comp.place_strips(&[make_strip(3, 0, "XX")], Region::new(0, 0, 10, 2));
        assert_eq!(comp.get_cell(0, 3).unwrap().ch, ' ');
    }

    #[test]
    fn later_strips_paint_over_earlier() {
        // Back-to-front window painting: the topmost window wins the overlap.
        let mut comp = Compositor::new(10, 2);
        let screen = Region::new(0, 0, 10, 2);
        comp.place_strips(&[make_strip(0, 0, "AAAA")], screen);
        comp.place_strips(&[make_strip(0, 2, "BB")], screen);
        assert_eq!(comp.get_cell(1, 0).unwrap().ch, 'A');
        assert_eq!(comp.get_cell(2, 0).unwrap().ch, 'B');
        assert_eq!(comp.get_cell(3, 0).unwrap().ch, 'B');
    }

    #[test]
    fn unset_background_inherits_from_beneath() {
        let mut comp = Compositor::new(6, 1);
        let screen = Region::new(0, 0, 6, 1);
        comp.begin_frame(teal());

        // A label with no background of its own lands on the teal surface.
        let mut strip = Strip::new(0, 0);
        strip.push_str("Hi", CellStyle { fg: Some("white".into()), ..CellStyle::default() });
        comp.place_strips(&[strip], screen);

        let cell = comp.get_cell(0, 0).unwrap();
        assert_eq!(cell.ch, 'H');
        assert_eq!(cell.style.fg, Some("white".into()));
        assert_eq!(cell.style.bg, Some("#008080".into()));
    }

    #[test]
    fn explicit_background_paints_over() {
        let mut comp = Compositor::new(4, 1);
        let screen = Region::new(0, 0, 4, 1);
        comp.begin_frame(teal());

        let mut strip = Strip::new(0, 0);
        strip.push('x', CellStyle { bg: Some("#c0c0c0".into()), ..CellStyle::default() });
        comp.place_strips(&[strip], screen);

        assert_eq!(
            comp.get_cell(0, 0).unwrap().style.bg,
            Some("#c0c0c0".into())
        );
    }

    #[test]
    fn begin_frame_fills_background() {
        let mut comp = Compositor::new(4, 2);
        comp.place_strips(&[make_strip(0, 0, "XX")], Region::new(0, 0, 4, 2));
        comp.begin_frame(teal());
        let cell = comp.get_cell(0, 0).unwrap();
        assert_eq!(cell.ch, ' ');
        assert_eq!(cell.style, teal());
    }

    #[test]
    fn finish_frame_diffs_and_clears_dirty() {
        let mut comp = Compositor::new(10, 2);
        comp.place_strips(&[make_strip(0, 0, "Hi")], Region::new(0, 0, 10, 2));
        let updates = comp.finish_frame();
        assert!(!comp.is_dirty());
        // Only the two changed cells are reported.
        assert_eq!(updates.len(), 2);
        assert_eq!(updates[0].cell.ch, 'H');
        assert_eq!((updates[0].x, updates[0].y), (0, 0));
    }

    #[test]
    fn unchanged_frame_yields_no_updates() {
        let mut comp = Compositor::new(10, 2);
        comp.place_strips(&[make_strip(0, 0, "Hi")], Region::new(0, 0, 10, 2));
        let _ = comp.finish_frame();

        // Repaint the identical frame.
        comp.place_strips(&[make_strip(0, 0, "Hi")], Region::new(0, 0, 10, 2));
        let updates = comp.finish_frame();
        assert!(updates.is_empty());
    }

    #[test]
    fn moved_content_reports_old_and_new_cells() {
        let mut comp = Compositor::new(10, 1);
        let screen = Region::new(0, 0, 10, 1);
        comp.place_strips(&[make_strip(0, 0, "W")], screen);
        let _ = comp.finish_frame();

        comp.begin_frame(CellStyle::default());
        comp.place_strips(&[make_strip(0, 3, "W")], screen);
        let updates = comp.finish_frame();
        // Old position blanked, new position painted.
        assert_eq!(updates.len(), 2);
        assert!(updates.iter().any(|u| u.x == 0 && u.cell.ch == ' '));
        assert!(updates.iter().any(|u| u.x == 3 && u.cell.ch == 'W'));
    }

    #[test]
    fn resize_marks_dirty_and_blanks() {
        let mut comp = Compositor::new(4, 2);
        comp.place_strips(&[make_strip(0, 0, "XX")], Region::new(0, 0, 4, 2));
        let _ = comp.finish_frame();

        comp.resize(6, 3);
        assert!(comp.is_dirty());
        assert_eq!(comp.width, 6);
        assert_eq!(comp.height, 3);
        // After resize, a finished blank frame produces no updates (both
        // buffers were reset) — the next real paint repaints everything.
        let updates = comp.finish_frame();
        assert!(updates.is_empty());
    }

    #[test]
    fn mark_dirty_roundtrip() {
        let mut comp = Compositor::new(2, 2);
        let _ = comp.finish_frame();
        assert!(!comp.is_dirty());
        comp.mark_dirty();
        assert!(comp.is_dirty());
    }
}
