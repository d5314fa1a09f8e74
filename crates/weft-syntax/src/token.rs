//! Host-language tokens.

use std::{fmt, sync::Arc};

use weft_core::{CsTokenKind, SourceSpan, TokenError, Vocabulary};

use crate::literal_text::{
    self, IntegerLiteral, IntegerSuffix, LiteralError, NumericLiteral, RealLiteral, RealSuffix,
};

/// The value carried by a token.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenValue {
    /// Punctuation and keywords carry no value beyond their kind.
    None,
    /// An identifier, without its escape marker.
    Identifier(Arc<str>),
    Integer(IntegerLiteral),
    Real(RealLiteral),
    Char(char),
    String(Arc<str>),
}

/// A token of the host-language syntax tree.
///
/// The text is exactly what the printer writes; the value is its meaning.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxToken {
    kind: CsTokenKind,
    text: Arc<str>,
    value: TokenValue,
    span: Option<SourceSpan>,
}

impl SyntaxToken {
    /// Create a token with the canonical text of `kind`.
    ///
    /// Identifier and literal kinds have no canonical text and come out
    /// empty; use [`SyntaxToken::try_fixed`] where `kind` is not a constant.
    pub fn fixed(kind: CsTokenKind) -> Self {
        debug_assert!(
            kind.fixed_text().is_some(),
            "{kind:?} has no fixed text"
        );
        Self {
            kind,
            text: Arc::from(kind.fixed_text().unwrap_or_default()),
            value: TokenValue::None,
            span: None,
        }
    }

    /// Create a token with the canonical text of `kind`.
    ///
    /// # Errors
    ///
    /// Fails with [`TokenError::NoFixedText`] for identifier and literal kinds.
    pub fn try_fixed(kind: CsTokenKind) -> Result<Self, TokenError> {
        let text = kind.text()?;
        Ok(Self {
            kind,
            text: Arc::from(text),
            value: TokenValue::None,
            span: None,
        })
    }

    /// Create an identifier token, escaping it if it collides with a keyword.
    pub fn identifier(name: &str) -> Self {
        let escaped = CsTokenKind::escape_identifier(name);
        let bare = CsTokenKind::unescape_identifier(name);
        Self {
            kind: CsTokenKind::Identifier,
            text: Arc::from(escaped.as_ref()),
            value: TokenValue::Identifier(Arc::from(bare)),
            span: None,
        }
    }

    /// Create a literal token from its source text.
    ///
    /// # Errors
    ///
    /// Fails if `text` does not follow the lexical rules of `kind`, or if
    /// `kind` is not one of the literal kinds.
    pub fn literal(kind: CsTokenKind, text: &str) -> Result<Self, LiteralError> {
        let value = match kind {
            CsTokenKind::NumericLiteral => match literal_text::parse_numeric(text)? {
                NumericLiteral::Integer(integer) => TokenValue::Integer(integer),
                NumericLiteral::Real(real) => TokenValue::Real(real),
            },
            CsTokenKind::CharacterLiteral => TokenValue::Char(literal_text::parse_char(text)?),
            CsTokenKind::StringLiteral => {
                TokenValue::String(Arc::from(literal_text::parse_string(text)?))
            }
            _ => return Err(LiteralError::NotALiteralKind { kind }),
        };
        Ok(Self {
            kind,
            text: Arc::from(text),
            value,
            span: None,
        })
    }

    pub fn string_literal(value: &str) -> Self {
        Self {
            kind: CsTokenKind::StringLiteral,
            text: Arc::from(literal_text::quote_string(value)),
            value: TokenValue::String(Arc::from(value)),
            span: None,
        }
    }

    pub fn char_literal(value: char) -> Self {
        Self {
            kind: CsTokenKind::CharacterLiteral,
            text: Arc::from(literal_text::quote_char(value)),
            value: TokenValue::Char(value),
            span: None,
        }
    }

    pub fn integer_literal(value: u64, suffix: IntegerSuffix) -> Self {
        Self {
            kind: CsTokenKind::NumericLiteral,
            text: Arc::from(literal_text::format_integer(value, suffix)),
            value: TokenValue::Integer(IntegerLiteral {
                value,
                suffix,
                hexadecimal: false,
            }),
            span: None,
        }
    }

    /// Create a real literal token. `value` must be finite.
    pub fn real_literal(value: f64, suffix: RealSuffix) -> Self {
        debug_assert!(value.is_finite(), "non-finite real literal {value}");
        Self {
            kind: CsTokenKind::NumericLiteral,
            text: Arc::from(literal_text::format_real(value, suffix)),
            value: TokenValue::Real(RealLiteral { value, suffix }),
            span: None,
        }
    }

    /// Create a decimal (`M`) literal token from its digits, keeping them exact.
    pub fn decimal_literal(digits: &str) -> Result<Self, LiteralError> {
        Self::literal(CsTokenKind::NumericLiteral, &format!("{digits}M"))
    }

    /// Create a decimal (`M`) literal from an unscaled value and a scale:
    /// `(12345, 2)` is `123.45M`.
    pub fn decimal_from_parts(unscaled: u128, scale: u32) -> Self {
        let digits = unscaled.to_string();
        let scale = scale as usize;
        let body = if scale == 0 {
            digits
        } else {
            let padded = format!("{digits:0>width$}", width = scale + 1);
            let (whole, fraction) = padded.split_at(padded.len() - scale);
            format!("{whole}.{fraction}")
        };
        Self {
            kind: CsTokenKind::NumericLiteral,
            text: Arc::from(format!("{body}M")),
            value: TokenValue::Real(RealLiteral {
                value: body.parse().unwrap_or_default(),
                suffix: RealSuffix::Decimal,
            }),
            span: None,
        }
    }

    pub fn kind(&self) -> CsTokenKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn value(&self) -> &TokenValue {
        &self.value
    }

    /// The identifier without its escape marker, if this is an identifier.
    pub fn identifier_name(&self) -> Option<&str> {
        match &self.value {
            TokenValue::Identifier(name) => Some(name),
            _ => None,
        }
    }

    pub fn is_kind(&self, kind: CsTokenKind) -> bool {
        self.kind == kind
    }

    pub(crate) fn span_ref(&self) -> Option<&SourceSpan> {
        self.span.as_ref()
    }

    pub(crate) fn span_mut(&mut self) -> &mut Option<SourceSpan> {
        &mut self.span
    }
}

impl From<CsTokenKind> for SyntaxToken {
    fn from(kind: CsTokenKind) -> Self {
        SyntaxToken::fixed(kind)
    }
}

impl fmt::Display for SyntaxToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_tokens() {
        let token = SyntaxToken::fixed(CsTokenKind::PlusEquals);
        assert_eq!(token.text(), "+=");
        assert_eq!(token.value(), &TokenValue::None);
        assert!(SyntaxToken::try_fixed(CsTokenKind::Identifier).is_err());
    }

    #[test]
    fn test_identifier_escaping() {
        let token = SyntaxToken::identifier("class");
        assert_eq!(token.text(), "@class");
        assert_eq!(token.identifier_name(), Some("class"));

        let already = SyntaxToken::identifier("@event");
        assert_eq!(already.text(), "@event");
        assert_eq!(already.identifier_name(), Some("event"));

        let plain = SyntaxToken::identifier("@Order");
        assert_eq!(plain.text(), "Order");
    }

    #[test]
    fn test_literal_tokens() {
        let number = SyntaxToken::literal(CsTokenKind::NumericLiteral, "0x10").unwrap();
        assert!(matches!(
            number.value(),
            TokenValue::Integer(IntegerLiteral { value: 16, .. })
        ));
        assert_eq!(number.text(), "0x10");

        let text = SyntaxToken::literal(CsTokenKind::StringLiteral, r#""a\"b""#).unwrap();
        assert_eq!(text.value(), &TokenValue::String(Arc::from("a\"b")));

        assert_eq!(
            SyntaxToken::literal(CsTokenKind::Semicolon, ";"),
            Err(LiteralError::NotALiteralKind {
                kind: CsTokenKind::Semicolon
            })
        );
    }

    #[test]
    fn test_generated_literals() {
        assert_eq!(SyntaxToken::string_literal("x\ny").text(), r#""x\ny""#);
        assert_eq!(SyntaxToken::char_literal('\\').text(), r"'\\'");
        assert_eq!(
            SyntaxToken::integer_literal(3, IntegerSuffix::UnsignedLong).text(),
            "3UL"
        );
        assert_eq!(SyntaxToken::real_literal(2.0, RealSuffix::Float).text(), "2.0F");
        assert_eq!(SyntaxToken::decimal_literal("1.10").unwrap().text(), "1.10M");
    }

    #[test]
    fn test_decimal_from_parts() {
        assert_eq!(SyntaxToken::decimal_from_parts(12345, 2).text(), "123.45M");
        assert_eq!(SyntaxToken::decimal_from_parts(5, 3).text(), "0.005M");
        assert_eq!(SyntaxToken::decimal_from_parts(7, 0).text(), "7M");
        let token = SyntaxToken::decimal_from_parts(5, 3);
        assert!(matches!(
            token.value(),
            TokenValue::Real(RealLiteral {
                suffix: RealSuffix::Decimal,
                ..
            })
        ));
    }
}
