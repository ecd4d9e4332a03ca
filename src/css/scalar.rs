//! CSS scalar values: Scalar, Unit (cells, %, auto), ScalarBox shorthand.

use std::fmt;

use crate::geometry::Spacing;

/// A CSS unit type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Unit {
    /// Cell count (default terminal unit, like "px" in CSS).
    Cells,
    /// Percentage of the parent dimension.
    Percent,
    /// Auto-size (content-based).
    Auto,
}

/// A scalar value with a unit, e.g. `10`, `50%`, `auto`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scalar {
    pub value: f32,
    pub unit: Unit,
}

impl Scalar {
    /// Create a scalar in cell units.
    pub fn cells(value: f32) -> Self {
        Self { value, unit: Unit::Cells }
    }

    /// Create a scalar as a percentage.
    pub fn percent(value: f32) -> Self {
        Self { value, unit: Unit::Percent }
    }

    /// Create an auto scalar.
    pub fn auto() -> Self {
        Self { value: 0.0, unit: Unit::Auto }
    }

    /// Returns `true` if this scalar is auto-sized.
    pub fn is_auto(&self) -> bool {
        self.unit == Unit::Auto
    }

    /// Resolve against a basis dimension (in cells).
    ///
    /// Returns `None` for `auto` — the caller decides what auto means.
    pub fn resolve(&self, basis: i32) -> Option<i32> {
        match self.unit {
            Unit::Cells => Some(self.value.round() as i32),
            Unit::Percent => Some((self.value / 100.0 * basis as f32).round() as i32),
            Unit::Auto => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.unit {
            Unit::Auto => write!(f, "auto"),
            Unit::Cells => {
                if self.value.fract() == 0.0 {
                    write!(f, "{}", self.value as i64)
                } else {
                    write!(f, "{}", self.value)
                }
            }
            Unit::Percent => {
                if self.value.fract() == 0.0 {
                    write!(f, "{}%", self.value as i64)
                } else {
                    write!(f, "{}%", self.value)
                }
            }
        }
    }
}

/// Four scalars, one per edge — the parsed form of `margin` / `padding`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScalarBox {
    pub top: Scalar,
    pub right: Scalar,
    pub bottom: Scalar,
    pub left: Scalar,
}

impl ScalarBox {
    /// Create a box with explicit edges.
    pub fn new(top: Scalar, right: Scalar, bottom: Scalar, left: Scalar) -> Self {
        Self { top, right, bottom, left }
    }

    /// The same scalar on every edge.
    pub fn all(value: Scalar) -> Self {
        Self { top: value, right: value, bottom: value, left: value }
    }

    /// Vertical / horizontal pairs (CSS two-value shorthand).
    pub fn symmetric(vertical: Scalar, horizontal: Scalar) -> Self {
        Self {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }

    /// Resolve to concrete [`Spacing`] cells against horizontal/vertical bases.
    ///
    /// `auto` edges resolve to zero.
    pub fn resolve(&self, h_basis: i32, v_basis: i32) -> Spacing {
        Spacing {
            top: self.top.resolve(v_basis).unwrap_or(0),
            right: self.right.resolve(h_basis).unwrap_or(0),
            bottom: self.bottom.resolve(v_basis).unwrap_or(0),
            left: self.left.resolve(h_basis).unwrap_or(0),
        }
    }
}
