//! Taffy-powered window interior layout.
//!
//! A window's interior is a vertical flex stack inside its bevel frame:
//! title bar, optional menu bar, content (which grows), optional button row.
//! [`solve_window`] builds a taffy tree for one window, computes it, and
//! reads the result back as absolute [`Region`]s ready for hit-testing and
//! rendering. Sizing follows CSS: explicit `width`/`height` win, otherwise
//! the window wraps its content.

use taffy::prelude::*;

use crate::css::scalar::Scalar;
use crate::geometry::{Offset, Region, Size as CellSize, Spacing};

/// Horizontal placement of the button row's buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    Start,
    Center,
    #[default]
    End,
}

/// Everything the solver needs to know about one window.
///
/// Widths and heights are in cells. The desktop assembles this from the
/// modal widget and its computed styles.
#[derive(Debug, Clone, Default)]
pub struct WindowSpec {
    /// Cells needed by the title bar's left side (icon + title text).
    pub title_width: i32,
    /// Menu header labels, left to right. Empty = no menu bar.
    pub menu_names: Vec<String>,
    /// Button labels for the bottom row. Empty = no button row.
    pub button_labels: Vec<String>,
    /// Placement of the buttons within their row.
    pub buttons_alignment: Alignment,
    /// Intrinsic height of each content child, in order.
    pub content_rows: Vec<i32>,
    /// Widest intrinsic content child width.
    pub content_min_width: i32,
    /// Padding inside the content region.
    pub content_padding: Spacing,
    /// Explicit frame width from styles, if any.
    pub width: Option<Scalar>,
    /// Explicit frame height from styles, if any.
    pub height: Option<Scalar>,
}

/// The computed regions of one window, in absolute screen coordinates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WindowLayout {
    /// The full window frame, bevel included.
    pub frame: Region,
    /// The title bar row (also the drag handle).
    pub title_bar: Region,
    /// The `?` affordance in the title bar.
    pub help_button: Region,
    /// The `X` affordance in the title bar.
    pub close_button: Region,
    /// The menu bar row, when the window has menus.
    pub menu_bar: Option<Region>,
    /// One region per menu header, parallel to `WindowSpec::menu_names`.
    pub menu_items: Vec<Region>,
    /// The content region (inside content padding).
    pub content: Region,
    /// One region per content child, parallel to `WindowSpec::content_rows`.
    pub content_children: Vec<Region>,
    /// The button row, when the window has buttons.
    pub button_row: Option<Region>,
    /// One region per button, parallel to `WindowSpec::button_labels`.
    pub buttons: Vec<Region>,
}

/// Width of a title bar affordance button (`?` / `X`).
const AFFORDANCE_WIDTH: i32 = 3;
/// Minimum button width, matching the chunky original buttons.
const MIN_BUTTON_WIDTH: i32 = 10;
/// Hard floor for a window frame.
const MIN_FRAME_WIDTH: i32 = 20;

/// A menu header occupies its name plus one cell of padding each side.
pub fn menu_item_width(name: &str) -> i32 {
    name.chars().count() as i32 + 2
}

/// A button occupies its label plus padding, with a chunky minimum.
pub fn button_width(label: &str) -> i32 {
    (label.chars().count() as i32 + 4).max(MIN_BUTTON_WIDTH)
}

/// The region a submenu list occupies: anchored under its menu header.
pub fn submenu_region(anchor: Region, rows: i32, width: i32) -> Region {
    Region::new(anchor.x, anchor.bottom(), width, rows)
}

/// Resolve the frame size: explicit styles win, otherwise the frame wraps
/// its chrome and content. Returned as `(width, height)` in cells.
fn resolve_frame_size(spec: &WindowSpec, viewport: CellSize) -> (i32, i32) {
    let title_min = spec.title_width + 2 * AFFORDANCE_WIDTH + 1;
    let menu_sum: i32 = spec.menu_names.iter().map(|n| menu_item_width(n)).sum();
    let buttons_sum: i32 = spec
        .button_labels
        .iter()
        .map(|l| button_width(l))
        .sum::<i32>()
        + spec.button_labels.len().saturating_sub(1) as i32;
    let content_min = spec.content_min_width + spec.content_padding.horizontal();

    let wrap_width = title_min.max(menu_sum).max(buttons_sum).max(content_min) + 2;
    let width = spec
        .width
        .as_ref()
        .and_then(|s| s.resolve(viewport.width))
        .unwrap_or(wrap_width)
        .max(MIN_FRAME_WIDTH);

    let content_rows: i32 = spec.content_rows.iter().map(|&r| r.max(1)).sum::<i32>().max(1);
    let wrap_height = 2 // bevel
        + 1 // title bar
        + i32::from(!spec.menu_names.is_empty())
        + content_rows
        + spec.content_padding.vertical()
        + i32::from(!spec.button_labels.is_empty());
    let height = spec
        .height
        .as_ref()
        .and_then(|s| s.resolve(viewport.height))
        .unwrap_or(wrap_height)
        .max(4);

    (width, height)
}

/// Read a taffy layout back as a region offset by `parent` absolute position.
fn region_of(tree: &TaffyTree, node: taffy::prelude::NodeId, parent: Offset) -> Region {
    let layout = tree.layout(node).expect("taffy layout should exist");
    Region {
        x: parent.x + layout.location.x.round() as i32,
        y: parent.y + layout.location.y.round() as i32,
        width: layout.size.width.round() as i32,
        height: layout.size.height.round() as i32,
    }
}

/// Compute the layout of one window whose frame's top-left corner sits at
/// `origin`.
///
/// The viewport only matters for percentage sizes; windows are free to hang
/// off any screen edge.
pub fn solve_window(spec: &WindowSpec, origin: Offset, viewport: CellSize) -> WindowLayout {
    let mut tree: TaffyTree = TaffyTree::new();

    // ── Build the tree bottom-up ─────────────────────────────────────

    // Title bar: fixed single row; its minimum width reserves space for the
    // title text and both affordances.
    let title_min = spec.title_width + 2 * AFFORDANCE_WIDTH + 1;
    let title = tree
        .new_leaf(Style {
            size: Size { width: auto(), height: length(1.0) },
            min_size: Size { width: length(title_min as f32), height: length(1.0) },
            flex_shrink: 0.0,
            ..Default::default()
        })
        .expect("taffy leaf");

    // Menu bar: one row of headers, each sized to its name.
    let mut menu_item_nodes = Vec::new();
    let menu_bar = if spec.menu_names.is_empty() {
        None
    } else {
        for name in &spec.menu_names {
            let node = tree
                .new_leaf(Style {
                    size: Size {
                        width: length(menu_item_width(name) as f32),
                        height: length(1.0),
                    },
                    flex_shrink: 0.0,
                    ..Default::default()
                })
                .expect("taffy leaf");
            menu_item_nodes.push(node);
        }
        Some(
            tree.new_with_children(
                Style {
                    flex_direction: FlexDirection::Row,
                    size: Size { width: auto(), height: length(1.0) },
                    flex_shrink: 0.0,
                    ..Default::default()
                },
                &menu_item_nodes,
            )
            .expect("taffy node"),
        )
    };

    // Content: grows to absorb leftover height; children stack vertically.
    let mut content_child_nodes = Vec::new();
    for &rows in &spec.content_rows {
        let node = tree
            .new_leaf(Style {
                size: Size { width: auto(), height: length(rows.max(1) as f32) },
                min_size: Size {
                    width: length(spec.content_min_width as f32),
                    height: auto(),
                },
                flex_shrink: 0.0,
                ..Default::default()
            })
            .expect("taffy leaf");
        content_child_nodes.push(node);
    }
    let content_min_height = spec
        .content_rows
        .iter()
        .map(|&r| r.max(1))
        .sum::<i32>()
        .max(1);
    let content = tree
        .new_with_children(
            Style {
                flex_direction: FlexDirection::Column,
                flex_grow: 1.0,
                min_size: Size {
                    width: length(
                        (spec.content_min_width + spec.content_padding.horizontal()) as f32,
                    ),
                    height: length(
                        (content_min_height + spec.content_padding.vertical()) as f32,
                    ),
                },
                padding: Rect {
                    top: LengthPercentage::from_length(spec.content_padding.top as f32),
                    right: LengthPercentage::from_length(spec.content_padding.right as f32),
                    bottom: LengthPercentage::from_length(spec.content_padding.bottom as f32),
                    left: LengthPercentage::from_length(spec.content_padding.left as f32),
                },
                ..Default::default()
            },
            &content_child_nodes,
        )
        .expect("taffy node");

    // Button row: horizontal, justified per alignment, one cell gaps.
    let mut button_nodes = Vec::new();
    let button_row = if spec.button_labels.is_empty() {
        None
    } else {
        for label in &spec.button_labels {
            let node = tree
                .new_leaf(Style {
                    size: Size {
                        width: length(button_width(label) as f32),
                        height: length(1.0),
                    },
                    flex_shrink: 0.0,
                    ..Default::default()
                })
                .expect("taffy leaf");
            button_nodes.push(node);
        }
        let justify = match spec.buttons_alignment {
            Alignment::Start => JustifyContent::FlexStart,
            Alignment::Center => JustifyContent::Center,
            Alignment::End => JustifyContent::FlexEnd,
        };
        Some(
            tree.new_with_children(
                Style {
                    flex_direction: FlexDirection::Row,
                    justify_content: Some(justify),
                    gap: Size { width: length(1.0), height: zero() },
                    size: Size { width: auto(), height: length(1.0) },
                    flex_shrink: 0.0,
                    ..Default::default()
                },
                &button_nodes,
            )
            .expect("taffy node"),
        )
    };

    // Root: vertical stack inside a one-cell bevel frame.
    let mut root_children = vec![title];
    if let Some(mb) = menu_bar {
        root_children.push(mb);
    }
    root_children.push(content);
    if let Some(br) = button_row {
        root_children.push(br);
    }

    let (frame_width, frame_height) = resolve_frame_size(spec, viewport);
    let root = tree
        .new_with_children(
            Style {
                flex_direction: FlexDirection::Column,
                size: Size {
                    width: length(frame_width as f32),
                    height: length(frame_height as f32),
                },
                padding: Rect {
                    top: LengthPercentage::from_length(1.0),
                    right: LengthPercentage::from_length(1.0),
                    bottom: LengthPercentage::from_length(1.0),
                    left: LengthPercentage::from_length(1.0),
                },
                ..Default::default()
            },
            &root_children,
        )
        .expect("taffy node");

    tree.compute_layout(
        root,
        Size {
            width: AvailableSpace::Definite(viewport.width as f32),
            height: AvailableSpace::Definite(viewport.height as f32),
        },
    )
    .expect("taffy layout computation");

    // ── Read back absolute regions ───────────────────────────────────

    let frame = region_of(&tree, root, origin);
    let frame_origin = frame.offset();

    let title_bar = region_of(&tree, title, frame_origin);
    let close_button = Region::new(
        title_bar.right() - AFFORDANCE_WIDTH,
        title_bar.y,
        AFFORDANCE_WIDTH,
        1,
    );
    let help_button = Region::new(
        close_button.x - AFFORDANCE_WIDTH,
        title_bar.y,
        AFFORDANCE_WIDTH,
        1,
    );

    let menu_bar_region = menu_bar.map(|mb| region_of(&tree, mb, frame_origin));
    let menu_items = match (menu_bar, menu_bar_region) {
        (Some(_), Some(bar)) => menu_item_nodes
            .iter()
            .map(|&node| region_of(&tree, node, bar.offset()))
            .collect(),
        _ => Vec::new(),
    };

    let content_region = region_of(&tree, content, frame_origin);
    let content_children = content_child_nodes
        .iter()
        .map(|&node| region_of(&tree, node, content_region.offset()))
        .collect();
    let content_interior = content_region.shrink(spec.content_padding);

    let button_row_region = button_row.map(|br| region_of(&tree, br, frame_origin));
    let buttons = match (button_row, button_row_region) {
        (Some(_), Some(row)) => button_nodes
            .iter()
            .map(|&node| region_of(&tree, node, row.offset()))
            .collect(),
        _ => Vec::new(),
    };

    WindowLayout {
        frame,
        title_bar,
        help_button,
        close_button,
        menu_bar: menu_bar_region,
        menu_items,
        content: content_interior,
        content_children,
        button_row: button_row_region,
        buttons,
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn basic_spec() -> WindowSpec {
        WindowSpec {
            title_width: 9, // "≡ Notepad"
            content_rows: vec![1, 1],
            content_min_width: 12,
            content_padding: Spacing::new(0, 1, 0, 1),
            ..Default::default()
        }
    }

    fn viewport() -> CellSize {
        CellSize::new(80, 24)
    }

    #[test]
    fn frame_positioned_at_origin() {
        let layout = solve_window(&basic_spec(), Offset::new(5, 3), viewport());
        assert_eq!(layout.frame.x, 5);
        assert_eq!(layout.frame.y, 3);
    }

    #[test]
    fn auto_height_wraps_chrome_and_content() {
        let layout = solve_window(&basic_spec(), Offset::ZERO, viewport());
        // bevel(2) + title(1) + content(2 rows)
        assert_eq!(layout.frame.height, 5);
        assert_eq!(layout.title_bar.height, 1);
        assert!(layout.menu_bar.is_none());
        assert!(layout.button_row.is_none());
    }

    #[test]
    fn menu_and_buttons_add_rows() {
        let mut spec = basic_spec();
        spec.menu_names = vec!["File".into(), "Edit".into()];
        spec.button_labels = vec!["Ok".into()];
        let layout = solve_window(&spec, Offset::ZERO, viewport());
        // bevel(2) + title(1) + menu(1) + content(2) + buttons(1)
        assert_eq!(layout.frame.height, 7);
        assert!(layout.menu_bar.is_some());
        assert!(layout.button_row.is_some());
    }

    #[test]
    fn explicit_size_wins() {
        let mut spec = basic_spec();
        spec.width = Some(Scalar::cells(50.0));
        spec.height = Some(Scalar::cells(15.0));
        let layout = solve_window(&spec, Offset::ZERO, viewport());
        assert_eq!(layout.frame.width, 50);
        assert_eq!(layout.frame.height, 15);
        // Content absorbs the extra height.
        assert!(layout.content.height > 2);
    }

    #[test]
    fn percent_width_resolves_against_viewport() {
        let mut spec = basic_spec();
        spec.width = Some(Scalar::percent(50.0));
        let layout = solve_window(&spec, Offset::ZERO, viewport());
        assert_eq!(layout.frame.width, 40);
    }

    #[test]
    fn title_bar_spans_interior() {
        let mut spec = basic_spec();
        spec.width = Some(Scalar::cells(40.0));
        let layout = solve_window(&spec, Offset::new(2, 2), viewport());
        assert_eq!(layout.title_bar.y, 3); // below the top bevel
        assert_eq!(layout.title_bar.x, 3);
        assert_eq!(layout.title_bar.width, 38); // frame minus both bevels
    }

    #[test]
    fn affordances_sit_at_title_right_edge() {
        let mut spec = basic_spec();
        spec.width = Some(Scalar::cells(40.0));
        let layout = solve_window(&spec, Offset::ZERO, viewport());
        assert_eq!(layout.close_button.right(), layout.title_bar.right());
        assert_eq!(layout.help_button.right(), layout.close_button.x);
        assert_eq!(layout.close_button.width, 3);
        assert_eq!(layout.close_button.y, layout.title_bar.y);
    }

    #[test]
    fn menu_items_sized_to_names() {
        let mut spec = basic_spec();
        spec.menu_names = vec!["File".into(), "Edit".into(), "Help".into()];
        let layout = solve_window(&spec, Offset::ZERO, viewport());
        let bar = layout.menu_bar.unwrap();
        assert_eq!(layout.menu_items.len(), 3);

        let file = layout.menu_items[0];
        assert_eq!(file.x, bar.x);
        assert_eq!(file.width, 6); // "File" + 2
        let edit = layout.menu_items[1];
        assert_eq!(edit.x, file.right());
    }

    #[test]
    fn buttons_align_end_by_default() {
        let mut spec = basic_spec();
        spec.width = Some(Scalar::cells(40.0));
        spec.button_labels = vec!["Ok".into(), "Cancel".into()];
        let layout = solve_window(&spec, Offset::ZERO, viewport());
        let row = layout.button_row.unwrap();
        assert_eq!(layout.buttons.len(), 2);
        // Last button flush against the row's right edge.
        assert_eq!(layout.buttons[1].right(), row.right());
        // One-cell gap between buttons.
        assert_eq!(layout.buttons[1].x - layout.buttons[0].right(), 1);
    }

    #[test]
    fn buttons_align_center_and_start() {
        let mut spec = basic_spec();
        spec.width = Some(Scalar::cells(40.0));
        spec.button_labels = vec!["Ok".into()];

        spec.buttons_alignment = Alignment::Start;
        let layout = solve_window(&spec, Offset::ZERO, viewport());
        let row = layout.button_row.unwrap();
        assert_eq!(layout.buttons[0].x, row.x);

        spec.buttons_alignment = Alignment::Center;
        let layout = solve_window(&spec, Offset::ZERO, viewport());
        let row = layout.button_row.unwrap();
        let slack = row.width - layout.buttons[0].width;
        assert_eq!(layout.buttons[0].x - row.x, slack / 2);
    }

    #[test]
    fn button_width_has_minimum() {
        assert_eq!(button_width("Ok"), 10);
        assert_eq!(button_width("Continue..."), 15);
    }

    #[test]
    fn content_children_stack_vertically() {
        let layout = solve_window(&basic_spec(), Offset::ZERO, viewport());
        assert_eq!(layout.content_children.len(), 2);
        let first = layout.content_children[0];
        let second = layout.content_children[1];
        assert_eq!(second.y, first.bottom());
    }

    #[test]
    fn content_padding_applied() {
        let layout = solve_window(&basic_spec(), Offset::ZERO, viewport());
        // Children are inset by the horizontal padding.
        assert_eq!(layout.content_children[0].x, layout.content.x);
        assert!(layout.content.x > layout.frame.x + 1);
    }

    #[test]
    fn min_frame_width_enforced() {
        let spec = WindowSpec {
            title_width: 1,
            content_rows: vec![1],
            ..Default::default()
        };
        let layout = solve_window(&spec, Offset::ZERO, viewport());
        assert!(layout.frame.width >= 20);
    }

    #[test]
    fn empty_content_still_gets_a_row() {
        let spec = WindowSpec { title_width: 5, ..Default::default() };
        let layout = solve_window(&spec, Offset::ZERO, viewport());
        assert!(layout.content.height >= 1);
        assert!(layout.content_children.is_empty());
    }

    #[test]
    fn submenu_anchors_below_header() {
        let anchor = Region::new(10, 4, 6, 1);
        let sub = submenu_region(anchor, 3, 12);
        assert_eq!(sub, Region::new(10, 5, 12, 3));
    }

    #[test]
    fn negative_origin_allowed() {
        // A window dragged past the top-left corner keeps its layout.
        let layout = solve_window(&basic_spec(), Offset::new(-4, -2), viewport());
        assert_eq!(layout.frame.x, -4);
        assert_eq!(layout.frame.y, -2);
        assert_eq!(layout.title_bar.x, -3);
    }
}
