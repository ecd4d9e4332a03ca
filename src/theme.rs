//! Retro palette tokens and the default chrome stylesheet.
//!
//! A [`Theme`] is a set of named color tokens. Stylesheets reference tokens
//! as `$variables` (`background: $material;`); [`Theme::resolve`] substitutes
//! the concrete values before compilation, so the property layer only ever
//! sees plain colors.

use std::collections::HashMap;

use crate::css::model::{DeclarationValue, StyleSheet};

/// A named set of palette tokens.
#[derive(Debug, Clone, Default)]
pub struct Theme {
    vars: HashMap<String, DeclarationValue>,
}

impl Theme {
    /// Create an empty theme with no tokens.
    pub fn new() -> Self {
        Self::default()
    }

    /// The classic retro desktop palette: silver chrome, navy title bars,
    /// teal desktop.
    pub fn retro() -> Self {
        let mut theme = Self::new();
        theme
            .set("desktop", color("008080"))
            .set("material", color("c0c0c0"))
            .set("material-dark", color("9a9e9c"))
            .set("material-text", color("0a0a0a"))
            .set("canvas", color("ffffff"))
            .set("canvas-text", color("0a0a0a"))
            .set("canvas-text-disabled", color("848584"))
            .set("header-background", color("000080"))
            .set("header-text", color("ffffff"))
            .set("header-not-active-background", color("7f787f"))
            .set("header-not-active-text", color("c0c7c8"))
            .set("border-light", color("ffffff"))
            .set("border-dark", color("5a5e5b"));
        theme
    }

    /// Set (or replace) a token. Chainable.
    pub fn set(&mut self, name: impl Into<String>, value: DeclarationValue) -> &mut Self {
        self.vars.insert(name.into(), value);
        self
    }

    /// Look up a token by name.
    pub fn get(&self, name: &str) -> Option<&DeclarationValue> {
        self.vars.get(name)
    }

    /// Number of tokens in the theme.
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Whether the theme has no tokens.
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Substitute every `$variable` value in the stylesheet with its token.
    ///
    /// Unknown variables are left in place; the property layer reports them
    /// as unresolved when the declaration is applied.
    pub fn resolve(&self, stylesheet: &StyleSheet) -> StyleSheet {
        let mut resolved = stylesheet.clone();
        for rule in &mut resolved.rules {
            for decl in &mut rule.declarations {
                for value in &mut decl.values {
                    if let DeclarationValue::Variable(name) = value {
                        if let Some(token) = self.vars.get(name.as_str()) {
                            *value = token.clone();
                        }
                    }
                }
            }
        }
        resolved
    }
}

/// Shorthand for a hex color token.
fn color(hex: &str) -> DeclarationValue {
    DeclarationValue::Color(hex.to_string())
}

/// The built-in stylesheet for the desktop chrome.
///
/// Widget `default_css` carries per-widget structure; this sheet carries the
/// palette wiring so swapping the [`Theme`] recolors the whole tree.
pub const DEFAULT_CHROME_CSS: &str = "\
Desktop { background: $desktop; }

Modal { background: $material; color: $material-text; border: raised; border-light: $border-light; border-dark: $border-dark; }
Modal:inactive { background: $material-dark; }

Modal:active TitleBar { background: $header-background; color: $header-text; }
Modal:inactive TitleBar { background: $header-not-active-background; color: $header-not-active-text; }
TitleBar { text-style: bold; }

MenuBar { background: $material; color: $material-text; }
MenuItem:open { background: $header-background; color: $header-text; }

Content { background: $material; color: $material-text; padding: 0 1; }
ButtonRow { background: $material; }

Button { background: $material; color: $material-text; border: raised; border-light: $border-light; border-dark: $border-dark; }
Button:active { border: sunken; text-style: reverse; }
Button:disabled { color: $canvas-text-disabled; }

Checkbox { color: $canvas-text; }
Checkbox:disabled { color: $canvas-text-disabled; }
Checkbox:focus { text-style: underline; }

Dropdown { background: $canvas; color: $canvas-text; border: sunken; border-light: $border-light; border-dark: $border-dark; }
Dropdown:disabled { color: $canvas-text-disabled; }

List { background: $material; color: $material-text; border: raised; border-light: $border-light; border-dark: $border-dark; }

Label { color: $material-text; }
";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::css::parse_css;

    #[test]
    fn retro_theme_has_core_tokens() {
        let theme = Theme::retro();
        assert!(!theme.is_empty());
        for token in [
            "desktop",
            "material",
            "material-dark",
            "canvas",
            "canvas-text",
            "canvas-text-disabled",
            "header-background",
            "header-text",
            "header-not-active-background",
            "header-not-active-text",
            "border-light",
            "border-dark",
        ] {
            assert!(theme.get(token).is_some(), "missing token {token}");
        }
    }

    #[test]
    fn resolve_substitutes_variables() {
        let theme = Theme::retro();
        let sheet = parse_css("TitleBar { background: $header-background; }").unwrap();
        let resolved = theme.resolve(&sheet);
        assert_eq!(
            resolved.rules[0].declarations[0].values[0],
            DeclarationValue::Color("000080".into())
        );
    }

    #[test]
    fn resolve_leaves_unknown_variables() {
        let theme = Theme::retro();
        let sheet = parse_css("TitleBar { background: $no-such-token; }").unwrap();
        let resolved = theme.resolve(&sheet);
        assert_eq!(
            resolved.rules[0].declarations[0].values[0],
            DeclarationValue::Variable("no-such-token".into())
        );
    }

    #[test]
    fn resolve_does_not_touch_plain_values() {
        let theme = Theme::retro();
        let sheet = parse_css("Modal { border: raised; width: 40; }").unwrap();
        let resolved = theme.resolve(&sheet);
        assert_eq!(resolved.rules[0], sheet.rules[0]);
    }

    #[test]
    fn custom_token_overrides() {
        let mut theme = Theme::retro();
        theme.set("material", DeclarationValue::Color("333333".into()));
        let sheet = parse_css("Modal { background: $material; }").unwrap();
        let resolved = theme.resolve(&sheet);
        assert_eq!(
            resolved.rules[0].declarations[0].values[0],
            DeclarationValue::Color("333333".into())
        );
    }

    #[test]
    fn default_chrome_css_parses() {
        let sheet = parse_css(DEFAULT_CHROME_CSS).unwrap();
        assert!(sheet.rules.len() >= 10);
    }

    #[test]
    fn default_chrome_css_fully_resolves() {
        let theme = Theme::retro();
        let resolved = theme.resolve(&parse_css(DEFAULT_CHROME_CSS).unwrap());
        for rule in &resolved.rules {
            for decl in &rule.declarations {
                for value in &decl.values {
                    assert!(
                        !matches!(value, DeclarationValue::Variable(_)),
                        "unresolved variable in default chrome: {decl:?}"
                    );
                }
            }
        }
    }
}
