//! Styles struct with typed Option<T> fields for all supported properties.
//!
//! This is the central style representation. Every property has a typed
//! `Option<T>` field. `None` means "not set" (falls through the cascade).

use crate::css::scalar::{Scalar, ScalarBox};

/// Text alignment options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// Display property options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Display {
    Block,
    None,
}

/// Visibility property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Visible,
    Hidden,
}

/// Bevel border style.
///
/// Retro chrome draws its depth illusion with two-tone bevels: a raised
/// surface is lit from the top-left (light edge top/left, dark edge
/// bottom/right), a sunken well is the opposite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BevelKind {
    None,
    /// Light top/left, dark bottom/right (buttons, window frames).
    Raised,
    /// Dark top/left, light bottom/right (text fields, check boxes).
    Sunken,
}

/// A bevel border.
#[derive(Debug, Clone, PartialEq)]
pub struct Bevel {
    pub kind: BevelKind,
}

/// Text style flags (bold, dim, underline, reverse).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextStyleFlags {
    pub bold: Option<bool>,
    pub dim: Option<bool>,
    pub underline: Option<bool>,
    pub reverse: Option<bool>,
}

/// All style properties for a node. Each field is `Option<T>` — `None` means unset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Styles {
    // Display
    pub display: Option<Display>,
    pub visibility: Option<Visibility>,

    // Sizing
    pub width: Option<Scalar>,
    pub height: Option<Scalar>,
    pub min_width: Option<Scalar>,
    pub min_height: Option<Scalar>,

    // Spacing
    pub margin: Option<ScalarBox>,
    pub padding: Option<ScalarBox>,

    // Colors
    pub color: Option<String>,
    pub background: Option<String>,

    // Bevel edge colors (highlight / shadow)
    pub border_light: Option<String>,
    pub border_dark: Option<String>,

    // Text
    pub text_align: Option<TextAlign>,
    pub text_style: Option<TextStyleFlags>,

    // Border
    pub border: Option<Bevel>,
}

impl Styles {
    /// Create a new `Styles` with all fields set to `None`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge `other` on top of `self`. For each field, if `other` has a value
    /// (`Some`), use it; otherwise keep `self`'s value. This implements the
    /// CSS cascade: lower-specificity styles are `self`, higher-specificity
    /// styles are `other`.
    pub fn merge(&self, other: &Styles) -> Styles {
        /// Helper: pick `other` if set, otherwise keep `base`.
        fn merge_opt<T: Clone>(base: &Option<T>, other: &Option<T>) -> Option<T> {
            if other.is_some() {
                other.clone()
            } else {
                base.clone()
            }
        }

        Styles {
            display: merge_opt(&self.display, &other.display),
            visibility: merge_opt(&self.visibility, &other.visibility),

            width: merge_opt(&self.width, &other.width),
            height: merge_opt(&self.height, &other.height),
            min_width: merge_opt(&self.min_width, &other.min_width),
            min_height: merge_opt(&self.min_height, &other.min_height),

            margin: merge_opt(&self.margin, &other.margin),
            padding: merge_opt(&self.padding, &other.padding),

            color: merge_opt(&self.color, &other.color),
            background: merge_opt(&self.background, &other.background),

            border_light: merge_opt(&self.border_light, &other.border_light),
            border_dark: merge_opt(&self.border_dark, &other.border_dark),

            text_align: merge_opt(&self.text_align, &other.text_align),
            text_style: merge_opt(&self.text_style, &other.text_style),

            border: merge_opt(&self.border, &other.border),
        }
    }

    /// Returns `true` if all fields are `None` (no properties set).
    pub fn is_empty(&self) -> bool {
        self.display.is_none()
            && self.visibility.is_none()
            && self.width.is_none()
            && self.height.is_none()
            && self.min_width.is_none()
            && self.min_height.is_none()
            && self.margin.is_none()
            && self.padding.is_none()
            && self.color.is_none()
            && self.background.is_none()
            && self.border_light.is_none()
            && self.border_dark.is_none()
            && self.text_align.is_none()
            && self.text_style.is_none()
            && self.border.is_none()
    }

    /// The bevel kind, defaulting to `None` when unset.
    pub fn bevel_kind(&self) -> BevelKind {
        self.border
            .as_ref()
            .map(|b| b.kind)
            .unwrap_or(BevelKind::None)
    }
}
