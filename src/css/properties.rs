//! Property parsing: token values → typed property values.
//!
//! Parses string/token-based CSS declaration values into the typed fields
//! on [`crate::css::styles::Styles`].

use crate::css::model::DeclarationValue;
use crate::css::scalar::{Scalar, ScalarBox};
use crate::css::styles::*;

/// Errors from property parsing.
#[derive(Debug, thiserror::Error)]
pub enum PropertyError {
    #[error("unknown property: {0}")]
    UnknownProperty(String),
    #[error("invalid value for {property}: {message}")]
    InvalidValue { property: String, message: String },
    #[error("unresolved theme variable ${0}")]
    UnresolvedVariable(String),
}

/// Parse a single declaration value into a [`Scalar`].
pub fn parse_scalar(value: &DeclarationValue) -> Result<Scalar, PropertyError> {
    match value {
        DeclarationValue::Number(n) => Ok(Scalar::cells(*n)),
        DeclarationValue::Dimension(n, unit) => match unit.as_str() {
            "%" => Ok(Scalar::percent(*n)),
            other => Err(PropertyError::InvalidValue {
                property: "scalar".into(),
                message: format!("unknown unit: {other}"),
            }),
        },
        DeclarationValue::Ident(name) if name.eq_ignore_ascii_case("auto") => Ok(Scalar::auto()),
        DeclarationValue::Variable(name) => {
            Err(PropertyError::UnresolvedVariable(name.clone()))
        }
        other => Err(PropertyError::InvalidValue {
            property: "scalar".into(),
            message: format!("expected number, percentage, or 'auto', got: {other:?}"),
        }),
    }
}

/// Parse 1-4 scalar values into a [`ScalarBox`] (CSS shorthand).
///
/// - 1 value: all sides
/// - 2 values: vertical, horizontal
/// - 3 values: top, horizontal, bottom
/// - 4 values: top, right, bottom, left
pub fn parse_scalar_box(values: &[DeclarationValue]) -> Result<ScalarBox, PropertyError> {
    match values.len() {
        1 => {
            let v = parse_scalar(&values[0])?;
            Ok(ScalarBox::all(v))
        }
        2 => {
            let vertical = parse_scalar(&values[0])?;
            let horizontal = parse_scalar(&values[1])?;
            Ok(ScalarBox::symmetric(vertical, horizontal))
        }
        3 => {
            let top = parse_scalar(&values[0])?;
            let horizontal = parse_scalar(&values[1])?;
            let bottom = parse_scalar(&values[2])?;
            Ok(ScalarBox::new(top, horizontal, bottom, horizontal))
        }
        4 => {
            let top = parse_scalar(&values[0])?;
            let right = parse_scalar(&values[1])?;
            let bottom = parse_scalar(&values[2])?;
            let left = parse_scalar(&values[3])?;
            Ok(ScalarBox::new(top, right, bottom, left))
        }
        n => Err(PropertyError::InvalidValue {
            property: "margin/padding".into(),
            message: format!("expected 1-4 values, got {n}"),
        }),
    }
}

/// Extract a single identifier, erroring with the given property name.
fn require_single_ident<'a>(
    values: &'a [DeclarationValue],
    property: &str,
) -> Result<&'a str, PropertyError> {
    if values.len() != 1 {
        return Err(PropertyError::InvalidValue {
            property: property.into(),
            message: format!("expected 1 value, got {}", values.len()),
        });
    }
    match &values[0] {
        DeclarationValue::Ident(name) => Ok(name.as_str()),
        DeclarationValue::Variable(name) => Err(PropertyError::UnresolvedVariable(name.clone())),
        other => Err(PropertyError::InvalidValue {
            property: property.into(),
            message: format!("expected identifier, got: {other:?}"),
        }),
    }
}

/// Extract a color value (ident or hex color) from values.
fn require_color_value(
    values: &[DeclarationValue],
    property: &str,
) -> Result<String, PropertyError> {
    if values.len() != 1 {
        return Err(PropertyError::InvalidValue {
            property: property.into(),
            message: format!("expected 1 color value, got {}", values.len()),
        });
    }
    match &values[0] {
        DeclarationValue::Ident(name) => Ok(name.clone()),
        DeclarationValue::Color(hex) => Ok(format!("#{hex}")),
        DeclarationValue::Variable(name) => Err(PropertyError::UnresolvedVariable(name.clone())),
        other => Err(PropertyError::InvalidValue {
            property: property.into(),
            message: format!("expected color name or hex color, got: {other:?}"),
        }),
    }
}

/// Extract a single scalar, erroring with the given property name.
fn require_single_scalar(
    values: &[DeclarationValue],
    property: &str,
) -> Result<Scalar, PropertyError> {
    if values.len() != 1 {
        return Err(PropertyError::InvalidValue {
            property: property.into(),
            message: format!("expected 1 value, got {}", values.len()),
        });
    }
    parse_scalar(&values[0])
}

/// Parse bevel border values: `raised`, `sunken`, or `none`.
fn parse_bevel(values: &[DeclarationValue]) -> Result<Bevel, PropertyError> {
    let name = require_single_ident(values, "border")?;
    let kind = match name {
        "none" => BevelKind::None,
        "raised" => BevelKind::Raised,
        "sunken" => BevelKind::Sunken,
        other => {
            return Err(PropertyError::InvalidValue {
                property: "border".into(),
                message: format!("expected raised|sunken|none, got: {other}"),
            });
        }
    };
    Ok(Bevel { kind })
}

/// Parse text-style values: one or more of bold, dim, underline, reverse.
fn parse_text_style(values: &[DeclarationValue]) -> Result<TextStyleFlags, PropertyError> {
    let mut flags = TextStyleFlags::default();

    for value in values {
        let name = match value {
            DeclarationValue::Ident(name) => name.as_str(),
            other => {
                return Err(PropertyError::InvalidValue {
                    property: "text-style".into(),
                    message: format!("expected text style identifier, got: {other:?}"),
                });
            }
        };
        match name {
            "bold" => flags.bold = Some(true),
            "dim" => flags.dim = Some(true),
            "underline" => flags.underline = Some(true),
            "reverse" => flags.reverse = Some(true),
            "none" => {
                flags.bold = Some(false);
                flags.dim = Some(false);
                flags.underline = Some(false);
                flags.reverse = Some(false);
            }
            other => {
                return Err(PropertyError::InvalidValue {
                    property: "text-style".into(),
                    message: format!("unknown text style: {other}"),
                });
            }
        }
    }

    Ok(flags)
}

/// Apply a CSS declaration (property name + values) to a mutable [`Styles`].
///
/// Returns an error for unknown properties or invalid values.
pub fn apply_declaration(
    styles: &mut Styles,
    property: &str,
    values: &[DeclarationValue],
) -> Result<(), PropertyError> {
    match property {
        // Display
        "display" => {
            let name = require_single_ident(values, "display")?;
            styles.display = Some(match name {
                "block" => Display::Block,
                "none" => Display::None,
                other => {
                    return Err(PropertyError::InvalidValue {
                        property: "display".into(),
                        message: format!("expected block|none, got: {other}"),
                    });
                }
            });
        }
        "visibility" => {
            let name = require_single_ident(values, "visibility")?;
            styles.visibility = Some(match name {
                "visible" => Visibility::Visible,
                "hidden" => Visibility::Hidden,
                other => {
                    return Err(PropertyError::InvalidValue {
                        property: "visibility".into(),
                        message: format!("expected visible|hidden, got: {other}"),
                    });
                }
            });
        }

        // Sizing
        "width" => styles.width = Some(require_single_scalar(values, "width")?),
        "height" => styles.height = Some(require_single_scalar(values, "height")?),
        "min-width" => styles.min_width = Some(require_single_scalar(values, "min-width")?),
        "min-height" => styles.min_height = Some(require_single_scalar(values, "min-height")?),

        // Spacing
        "margin" => styles.margin = Some(parse_scalar_box(values)?),
        "padding" => styles.padding = Some(parse_scalar_box(values)?),

        // Colors
        "color" => styles.color = Some(require_color_value(values, "color")?),
        "background" => styles.background = Some(require_color_value(values, "background")?),
        "border-light" => {
            styles.border_light = Some(require_color_value(values, "border-light")?);
        }
        "border-dark" => {
            styles.border_dark = Some(require_color_value(values, "border-dark")?);
        }

        // Text
        "text-align" => {
            let name = require_single_ident(values, "text-align")?;
            styles.text_align = Some(match name {
                "left" => TextAlign::Left,
                "center" => TextAlign::Center,
                "right" => TextAlign::Right,
                other => {
                    return Err(PropertyError::InvalidValue {
                        property: "text-align".into(),
                        message: format!("expected left|center|right, got: {other}"),
                    });
                }
            });
        }
        "text-style" => styles.text_style = Some(parse_text_style(values)?),

        // Border
        "border" => styles.border = Some(parse_bevel(values)?),

        other => return Err(PropertyError::UnknownProperty(other.to_string())),
    }

    Ok(())
}
