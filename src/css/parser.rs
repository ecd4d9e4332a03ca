//! Recursive descent CSS parser.
//!
//! Parses CSS text into a [`StyleSheet`] (a vector of [`RuleSet`]s) using the
//! logos-based tokenizer from [`crate::css::tokenizer`].

use logos::Logos;

use crate::css::model::*;
use crate::css::tokenizer::Token;

/// Errors from CSS parsing.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("unexpected token at position {position}: {message}")]
    UnexpectedToken { position: usize, message: String },
    #[error("unexpected end of input: {0}")]
    UnexpectedEof(String),
}

/// A positioned token with byte spans for whitespace detection.
///
/// Adjacency between spans decides whether `.class` extends the current
/// compound selector or starts a descendant combinator.
#[derive(Debug, Clone)]
struct PToken {
    token: Token,
    text: String,
    /// Index in the token stream (for error reporting).
    pos: usize,
    byte_start: usize,
    byte_end: usize,
}

/// Strip CSS block comments (`/* ... */`), replacing each with a space.
fn strip_comments(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let bytes = input.as_bytes();
    let len = bytes.len();
    let mut i = 0;

    while i < len {
        if i + 1 < len && bytes[i] == b'/' && bytes[i + 1] == b'*' {
            i += 2;
            let mut found_end = false;
            while i + 1 < len {
                if bytes[i] == b'*' && bytes[i + 1] == b'/' {
                    i += 2;
                    found_end = true;
                    break;
                }
                i += 1;
            }
            if !found_end {
                // Unterminated comment consumes the rest of the input.
                i = len;
            }
            result.push(' ');
        } else {
            result.push(bytes[i] as char);
            i += 1;
        }
    }

    result
}

/// Tokenize input with span information preserved.
fn tokenize_with_spans(input: &str) -> Vec<PToken> {
    let lexer = Token::lexer(input);
    let mut tokens = Vec::new();
    let mut idx = 0;

    for (result, span) in lexer.spanned() {
        if let Ok(token) = result {
            tokens.push(PToken {
                text: input[span.clone()].to_string(),
                token,
                pos: idx,
                byte_start: span.start,
                byte_end: span.end,
            });
            idx += 1;
        }
    }

    tokens
}

/// Parse a CSS string into a [`StyleSheet`].
pub fn parse_css(input: &str) -> Result<StyleSheet, ParseError> {
    let cleaned = strip_comments(input);
    let tokens = tokenize_with_spans(&cleaned);

    let mut parser = Parser { tokens, cursor: 0 };

    let mut rules = Vec::new();
    while !parser.is_eof() {
        rules.push(parser.parse_rule()?);
    }

    Ok(StyleSheet { rules })
}

/// Recursive descent parser state.
struct Parser {
    tokens: Vec<PToken>,
    cursor: usize,
}

impl Parser {
    fn is_eof(&self) -> bool {
        self.cursor >= self.tokens.len()
    }

    fn peek(&self) -> Option<&PToken> {
        self.tokens.get(self.cursor)
    }

    fn advance(&mut self) -> Option<&PToken> {
        if self.cursor < self.tokens.len() {
            let tok = &self.tokens[self.cursor];
            self.cursor += 1;
            Some(tok)
        } else {
            None
        }
    }

    fn expect(&mut self, expected: &Token) -> Result<PToken, ParseError> {
        match self.advance() {
            Some(tok) if &tok.token == expected => Ok(tok.clone()),
            Some(tok) => Err(ParseError::UnexpectedToken {
                position: tok.pos,
                message: format!("expected {:?}, got {:?} '{}'", expected, tok.token, tok.text),
            }),
            None => Err(ParseError::UnexpectedEof(format!("expected {expected:?}"))),
        }
    }

    fn current_pos(&self) -> usize {
        self.peek().map(|t| t.pos).unwrap_or(self.tokens.len())
    }

    /// Whether the current token touches the previous one (no whitespace gap).
    fn is_adjacent(&self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let prev = &self.tokens[self.cursor - 1];
        match self.peek() {
            Some(curr) => curr.byte_start == prev.byte_end,
            None => false,
        }
    }

    /// Parse a single CSS rule: selector(s) `{` declarations `}`.
    fn parse_rule(&mut self) -> Result<RuleSet, ParseError> {
        let selectors = self.parse_selector_list()?;
        self.expect(&Token::BraceOpen)?;
        let declarations = self.parse_declarations()?;
        self.expect(&Token::BraceClose)?;

        Ok(RuleSet { selectors, declarations })
    }

    /// Parse a comma-separated list of selectors (before `{`).
    fn parse_selector_list(&mut self) -> Result<Vec<Selector>, ParseError> {
        let mut selectors = vec![self.parse_selector()?];

        while self.peek().is_some_and(|t| t.token == Token::Comma) {
            self.advance(); // consume comma
            selectors.push(self.parse_selector()?);
        }

        Ok(selectors)
    }

    /// Parse one selector: compound selectors joined by combinators.
    ///
    /// `Modal:active > TitleBar` becomes:
    /// - `Compound([Type("Modal"), PseudoClass("active")])`
    /// - `Combinator(Child)`
    /// - `Compound([Type("TitleBar")])`
    fn parse_selector(&mut self) -> Result<Selector, ParseError> {
        let mut parts = Vec::new();

        parts.push(SelectorPart::Compound(self.parse_compound_selector()?));

        loop {
            match self.peek() {
                // `>` is the child combinator.
                Some(t) if t.token == Token::GreaterThan => {
                    self.advance();
                    parts.push(SelectorPart::Combinator(Combinator::Child));
                    parts.push(SelectorPart::Compound(self.parse_compound_selector()?));
                }
                // A selector-starting token after whitespace is a descendant
                // combinator. Adjacent tokens were already consumed by
                // parse_compound_selector.
                Some(t)
                    if matches!(
                        t.token,
                        Token::Ident
                            | Token::Hash
                            | Token::Dot
                            | Token::Star
                            | Token::PseudoClass
                    ) =>
                {
                    parts.push(SelectorPart::Combinator(Combinator::Descendant));
                    parts.push(SelectorPart::Compound(self.parse_compound_selector()?));
                }
                _ => break,
            }
        }

        Ok(Selector { parts })
    }

    /// Parse one simple selector component: `.class`, `#id`, or `:pseudo`.
    ///
    /// Assumes the introducing token (`Dot` / `Hash` / `PseudoClass`) is
    /// current. Shared by the leading and trailing positions of a compound.
    fn parse_simple_component(&mut self) -> Result<SelectorComponent, ParseError> {
        let tok = self
            .advance()
            .ok_or_else(|| ParseError::UnexpectedEof("expected selector component".into()))?
            .clone();

        match tok.token {
            Token::Dot => {
                let name_tok = self.advance().ok_or_else(|| {
                    ParseError::UnexpectedEof("expected class name after '.'".into())
                })?;
                if name_tok.token != Token::Ident {
                    return Err(ParseError::UnexpectedToken {
                        position: name_tok.pos,
                        message: format!(
                            "expected class name, got {:?} '{}'",
                            name_tok.token, name_tok.text
                        ),
                    });
                }
                Ok(SelectorComponent::Class(name_tok.text.clone()))
            }
            Token::Hash => {
                let name_tok = self.advance().ok_or_else(|| {
                    ParseError::UnexpectedEof("expected id name after '#'".into())
                })?;
                if name_tok.token != Token::Ident {
                    return Err(ParseError::UnexpectedToken {
                        position: name_tok.pos,
                        message: format!(
                            "expected id name, got {:?} '{}'",
                            name_tok.token, name_tok.text
                        ),
                    });
                }
                Ok(SelectorComponent::Id(name_tok.text.clone()))
            }
            Token::PseudoClass => {
                Ok(SelectorComponent::PseudoClass(tok.text[1..].to_string()))
            }
            _ => Err(ParseError::UnexpectedToken {
                position: tok.pos,
                message: format!("expected selector part, got {:?} '{}'", tok.token, tok.text),
            }),
        }
    }

    /// Parse a compound selector: simple selectors with no whitespace between,
    /// e.g. `Checkbox.small:checked`.
    ///
    /// Span adjacency decides where the compound ends: `.class`, `#id`, and
    /// `:pseudo` only extend the compound when they touch the previous token.
    fn parse_compound_selector(&mut self) -> Result<CompoundSelector, ParseError> {
        let mut components = Vec::new();

        // Leading component: type name, `*`, or a simple component.
        match self.peek() {
            Some(t) if t.token == Token::Ident => {
                let name = t.text.clone();
                self.advance();
                components.push(SelectorComponent::Type(name));
            }
            Some(t) if t.token == Token::Star => {
                self.advance();
                components.push(SelectorComponent::Universal);
            }
            Some(t)
                if matches!(t.token, Token::Dot | Token::Hash | Token::PseudoClass) =>
            {
                components.push(self.parse_simple_component()?);
            }
            _ => {
                return Err(ParseError::UnexpectedToken {
                    position: self.current_pos(),
                    message: "expected selector part".into(),
                });
            }
        }

        // Trailing components while adjacent.
        while self.is_adjacent() {
            match self.peek() {
                Some(t)
                    if matches!(t.token, Token::Dot | Token::Hash | Token::PseudoClass) =>
                {
                    components.push(self.parse_simple_component()?);
                }
                _ => break,
            }
        }

        Ok(CompoundSelector { components })
    }

    /// Parse declarations between `{` and `}`.
    fn parse_declarations(&mut self) -> Result<Vec<Declaration>, ParseError> {
        let mut declarations = Vec::new();

        while self.peek().is_some_and(|t| t.token != Token::BraceClose) {
            declarations.push(self.parse_declaration()?);
        }

        Ok(declarations)
    }

    /// Parse one declaration: `property: value1 value2 [!important];`
    fn parse_declaration(&mut self) -> Result<Declaration, ParseError> {
        let prop_tok = self
            .advance()
            .ok_or_else(|| ParseError::UnexpectedEof("expected property name".into()))?;
        if prop_tok.token != Token::Ident {
            return Err(ParseError::UnexpectedToken {
                position: prop_tok.pos,
                message: format!(
                    "expected property name, got {:?} '{}'",
                    prop_tok.token, prop_tok.text
                ),
            });
        }
        let property = prop_tok.text.clone();

        self.expect(&Token::Colon)?;

        let mut values = Vec::new();
        let mut important = false;

        loop {
            match self.peek() {
                None
                | Some(PToken { token: Token::Semicolon, .. })
                | Some(PToken { token: Token::BraceClose, .. }) => break,
                Some(PToken { token: Token::Important, .. }) => {
                    self.advance();
                    important = true;
                    break;
                }
                Some(_) => values.push(self.parse_declaration_value()?),
            }
        }

        // Consume optional semicolon.
        if self.peek().is_some_and(|t| t.token == Token::Semicolon) {
            self.advance();
        }

        Ok(Declaration { property, values, important })
    }

    /// Parse a single value token into a [`DeclarationValue`].
    fn parse_declaration_value(&mut self) -> Result<DeclarationValue, ParseError> {
        let tok = self
            .advance()
            .ok_or_else(|| ParseError::UnexpectedEof("expected declaration value".into()))?;

        match &tok.token {
            Token::Number => {
                let n: f32 = tok.text.parse().map_err(|_| ParseError::UnexpectedToken {
                    position: tok.pos,
                    message: format!("invalid number: {}", tok.text),
                })?;
                Ok(DeclarationValue::Number(n))
            }
            Token::Dimension => {
                let num_str = tok.text.trim_end_matches('%');
                let n: f32 = num_str.parse().map_err(|_| ParseError::UnexpectedToken {
                    position: tok.pos,
                    message: format!("invalid number in dimension: {num_str}"),
                })?;
                Ok(DeclarationValue::Dimension(n, "%".to_string()))
            }
            Token::Ident => Ok(DeclarationValue::Ident(tok.text.clone())),
            Token::HexColor => {
                let hex = tok.text.strip_prefix('#').unwrap_or(&tok.text);
                Ok(DeclarationValue::Color(hex.to_string()))
            }
            Token::StringLiteral | Token::StringLiteralSingle => {
                let inner = &tok.text[1..tok.text.len() - 1];
                Ok(DeclarationValue::String(inner.to_string()))
            }
            Token::Variable => {
                Ok(DeclarationValue::Variable(tok.text[1..].to_string()))
            }
            other => Err(ParseError::UnexpectedToken {
                position: tok.pos,
                message: format!("unexpected value token: {:?} '{}'", other, tok.text),
            }),
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn first_rule(css: &str) -> RuleSet {
        parse_css(css).unwrap().rules.into_iter().next().unwrap()
    }

    // ── Rules & selectors ────────────────────────────────────────────

    #[test]
    fn parse_empty_stylesheet() {
        let sheet = parse_css("").unwrap();
        assert!(sheet.rules.is_empty());
    }

    #[test]
    fn parse_type_selector() {
        let rule = first_rule("Modal { background: silver; }");
        assert_eq!(rule.selectors.len(), 1);
        let parts = &rule.selectors[0].parts;
        assert_eq!(parts.len(), 1);
        assert!(matches!(
            &parts[0],
            SelectorPart::Compound(cs)
                if cs.components == vec![SelectorComponent::Type("Modal".into())]
        ));
    }

    #[test]
    fn parse_class_selector() {
        let rule = first_rule(".draggable { color: black; }");
        assert!(matches!(
            &rule.selectors[0].parts[0],
            SelectorPart::Compound(cs)
                if cs.components == vec![SelectorComponent::Class("draggable".into())]
        ));
    }

    #[test]
    fn parse_id_selector() {
        let rule = first_rule("#titlebar { color: white; }");
        assert!(matches!(
            &rule.selectors[0].parts[0],
            SelectorPart::Compound(cs)
                if cs.components == vec![SelectorComponent::Id("titlebar".into())]
        ));
    }

    #[test]
    fn parse_universal_selector() {
        let rule = first_rule("* { color: black; }");
        assert!(matches!(
            &rule.selectors[0].parts[0],
            SelectorPart::Compound(cs)
                if cs.components == vec![SelectorComponent::Universal]
        ));
    }

    #[test]
    fn parse_compound_with_pseudo() {
        let rule = first_rule("Modal:active { background: silver; }");
        assert!(matches!(
            &rule.selectors[0].parts[0],
            SelectorPart::Compound(cs) if cs.components == vec![
                SelectorComponent::Type("Modal".into()),
                SelectorComponent::PseudoClass("active".into()),
            ]
        ));
    }

    #[test]
    fn parse_child_combinator() {
        let rule = first_rule("Modal:active > TitleBar { text-style: bold; }");
        let parts = &rule.selectors[0].parts;
        assert_eq!(parts.len(), 3);
        assert!(matches!(parts[1], SelectorPart::Combinator(Combinator::Child)));
    }

    #[test]
    fn parse_descendant_combinator() {
        let rule = first_rule("Modal Button { border: raised; }");
        let parts = &rule.selectors[0].parts;
        assert_eq!(parts.len(), 3);
        assert!(matches!(parts[1], SelectorPart::Combinator(Combinator::Descendant)));
    }

    #[test]
    fn adjacency_splits_descendant_class() {
        // `Modal .option` is descendant; `Modal.option` is compound.
        let descendant = first_rule("Modal .option { color: black; }");
        assert_eq!(descendant.selectors[0].parts.len(), 3);

        let compound = first_rule("Modal.option { color: black; }");
        assert_eq!(compound.selectors[0].parts.len(), 1);
    }

    #[test]
    fn parse_selector_list() {
        let rule = first_rule("Checkbox, Dropdown, Button { color: black; }");
        assert_eq!(rule.selectors.len(), 3);
    }

    // ── Declarations ─────────────────────────────────────────────────

    #[test]
    fn parse_multiple_declarations() {
        let rule = first_rule("Modal { background: silver; border: raised; width: 40; }");
        assert_eq!(rule.declarations.len(), 3);
        assert_eq!(rule.declarations[0].property, "background");
        assert_eq!(rule.declarations[1].property, "border");
        assert_eq!(rule.declarations[2].property, "width");
    }

    #[test]
    fn parse_hex_color_value() {
        let rule = first_rule("TitleBar { background: #000080; }");
        assert_eq!(
            rule.declarations[0].values,
            vec![DeclarationValue::Color("000080".into())]
        );
    }

    #[test]
    fn parse_variable_value() {
        let rule = first_rule("TitleBar { background: $header-background; }");
        assert_eq!(
            rule.declarations[0].values,
            vec![DeclarationValue::Variable("header-background".into())]
        );
    }

    #[test]
    fn parse_percent_value() {
        let rule = first_rule("Modal { width: 50%; }");
        assert_eq!(
            rule.declarations[0].values,
            vec![DeclarationValue::Dimension(50.0, "%".into())]
        );
    }

    #[test]
    fn parse_multi_value_shorthand() {
        let rule = first_rule("Content { padding: 1 2; }");
        assert_eq!(
            rule.declarations[0].values,
            vec![DeclarationValue::Number(1.0), DeclarationValue::Number(2.0)]
        );
    }

    #[test]
    fn parse_important() {
        let rule = first_rule("Modal { background: teal !important; }");
        assert!(rule.declarations[0].important);
    }

    #[test]
    fn parse_string_value() {
        let rule = first_rule(r#"Label { color: "black"; }"#);
        assert_eq!(
            rule.declarations[0].values,
            vec![DeclarationValue::String("black".into())]
        );
    }

    #[test]
    fn missing_semicolon_before_brace_is_ok() {
        let rule = first_rule("Modal { color: black }");
        assert_eq!(rule.declarations.len(), 1);
    }

    // ── Comments ─────────────────────────────────────────────────────

    #[test]
    fn strips_block_comments() {
        let rule = first_rule("/* chrome */ Modal { /* bg */ background: silver; }");
        assert_eq!(rule.declarations.len(), 1);
    }

    #[test]
    fn unterminated_comment_consumes_rest() {
        let sheet = parse_css("Modal { color: black; } /* trailing").unwrap();
        assert_eq!(sheet.rules.len(), 1);
    }

    // ── Errors ───────────────────────────────────────────────────────

    #[test]
    fn error_on_missing_brace() {
        assert!(parse_css("Modal color: black; }").is_err());
    }

    #[test]
    fn error_on_unclosed_rule() {
        assert!(parse_css("Modal { color: black;").is_err());
    }

    #[test]
    fn error_on_dot_without_class_name() {
        assert!(parse_css(". { color: black; }").is_err());
    }

    #[test]
    fn error_messages_are_displayable() {
        let err = parse_css("Modal {").unwrap_err();
        assert!(!err.to_string().is_empty());
    }

    // ── Multiple rules ───────────────────────────────────────────────

    #[test]
    fn parse_multiple_rules() {
        let sheet = parse_css(
            "Modal { background: silver; }\n\
             TitleBar { background: navy; color: white; }\n\
             Checkbox:checked { text-style: bold; }",
        )
        .unwrap();
        assert_eq!(sheet.rules.len(), 3);
    }
}
