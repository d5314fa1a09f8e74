//! Literal token text.
//!
//! Parsing turns the source text of a numeric, character or string literal
//! into its value; quoting is the inverse used when printing generated
//! literals. Both follow the host language's lexical rules: decimal and
//! hexadecimal integers with `U`/`L`/`UL` suffixes, reals with fraction,
//! exponent and `F`/`D`/`M` suffixes, simple and `\x`/`\u`/`\U` escapes, and
//! verbatim `@"..."` strings.

use thiserror::Error;
use winnow::{
    Parser as _,
    combinator::{alt, delimited, opt, preceded, repeat},
    error::{ContextError, ErrMode},
    token::{any, none_of, one_of, take_while},
};

use weft_core::CsTokenKind;

type Input<'a> = &'a str;
type PResult<O> = Result<O, ErrMode<ContextError>>;

/// Errors raised when literal text does not follow the lexical rules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LiteralError {
    #[error("invalid integer literal `{text}`")]
    InvalidInteger { text: String },

    #[error("integer literal `{text}` is out of range")]
    IntegerOverflow { text: String },

    #[error("invalid real literal `{text}`")]
    InvalidReal { text: String },

    #[error("invalid character literal `{text}`")]
    InvalidChar { text: String },

    #[error("invalid string literal `{text}`")]
    InvalidString { text: String },

    #[error("token kind `{kind:?}` is not a literal kind")]
    NotALiteralKind { kind: CsTokenKind },
}

/// Suffix of an integer literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IntegerSuffix {
    #[default]
    None,
    Unsigned,
    Long,
    UnsignedLong,
}

impl IntegerSuffix {
    pub fn as_str(self) -> &'static str {
        match self {
            IntegerSuffix::None => "",
            IntegerSuffix::Unsigned => "U",
            IntegerSuffix::Long => "L",
            IntegerSuffix::UnsignedLong => "UL",
        }
    }
}

/// Suffix of a real literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RealSuffix {
    #[default]
    None,
    Float,
    Double,
    Decimal,
}

impl RealSuffix {
    pub fn as_str(self) -> &'static str {
        match self {
            RealSuffix::None => "",
            RealSuffix::Float => "F",
            RealSuffix::Double => "D",
            RealSuffix::Decimal => "M",
        }
    }
}

/// A parsed integer literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IntegerLiteral {
    pub value: u64,
    pub suffix: IntegerSuffix,
    pub hexadecimal: bool,
}

/// A parsed real literal.
///
/// Decimal (`M`) literals keep their value as the nearest `f64`; the token
/// text stays authoritative for printing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RealLiteral {
    pub value: f64,
    pub suffix: RealSuffix,
}

/// A parsed numeric literal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericLiteral {
    Integer(IntegerLiteral),
    Real(RealLiteral),
}

fn backtrack() -> ErrMode<ContextError> {
    ErrMode::Backtrack(ContextError::new())
}

fn is_hex(c: char) -> bool {
    c.is_ascii_hexdigit()
}

fn decimal_digits<'a>(input: &mut Input<'a>) -> PResult<&'a str> {
    take_while(1.., |c: char| c.is_ascii_digit()).parse_next(input)
}

/// The digits of an integer literal and their radix.
fn integer_digits<'a>(input: &mut Input<'a>) -> PResult<(&'a str, u32)> {
    alt((
        preceded(alt(("0x", "0X")), take_while(1.., is_hex)).map(|digits| (digits, 16)),
        decimal_digits.map(|digits| (digits, 10)),
    ))
    .parse_next(input)
}

fn integer_suffix(input: &mut Input<'_>) -> PResult<IntegerSuffix> {
    alt((
        alt(("ul", "uL", "Ul", "UL", "lu", "lU", "Lu", "LU")).value(IntegerSuffix::UnsignedLong),
        one_of(['u', 'U']).value(IntegerSuffix::Unsigned),
        one_of(['l', 'L']).value(IntegerSuffix::Long),
    ))
    .parse_next(input)
}

fn real_suffix(input: &mut Input<'_>) -> PResult<RealSuffix> {
    alt((
        one_of(['f', 'F']).value(RealSuffix::Float),
        one_of(['d', 'D']).value(RealSuffix::Double),
        one_of(['m', 'M']).value(RealSuffix::Decimal),
    ))
    .parse_next(input)
}

fn exponent(input: &mut Input<'_>) -> PResult<()> {
    (one_of(['e', 'E']), opt(one_of(['+', '-'])), decimal_digits)
        .void()
        .parse_next(input)
}

/// The body of a real literal, without its suffix.
///
/// Requires a fraction or an exponent; integral bodies are only reals when a
/// real suffix follows, which the caller checks.
fn real_body<'a>(input: &mut Input<'a>) -> PResult<(&'a str, bool)> {
    let start = *input;
    let whole = opt(decimal_digits).parse_next(input)?;
    let fraction = opt(preceded('.', decimal_digits)).parse_next(input)?;
    if whole.is_none() && fraction.is_none() {
        return Err(backtrack());
    }
    let exponent = opt(exponent).parse_next(input)?;
    let consumed = start.len() - input.len();
    let is_real = fraction.is_some() || exponent.is_some();
    Ok((&start[..consumed], is_real))
}

fn simple_escape(input: &mut Input<'_>) -> PResult<char> {
    any.verify_map(|c: char| match c {
        '\'' => Some('\''),
        '"' => Some('"'),
        '\\' => Some('\\'),
        '0' => Some('\0'),
        'a' => Some('\u{07}'),
        'b' => Some('\u{08}'),
        'f' => Some('\u{0C}'),
        'n' => Some('\n'),
        'r' => Some('\r'),
        't' => Some('\t'),
        'v' => Some('\u{0B}'),
        _ => None,
    })
    .parse_next(input)
}

fn hex_char(digits: &str) -> Option<char> {
    u32::from_str_radix(digits, 16).ok().and_then(char::from_u32)
}

fn escape_sequence(input: &mut Input<'_>) -> PResult<char> {
    preceded(
        '\\',
        alt((
            simple_escape,
            preceded('x', take_while(1..=4, is_hex)).verify_map(hex_char),
            preceded('u', take_while(4, is_hex)).verify_map(hex_char),
            preceded('U', take_while(8, is_hex)).verify_map(hex_char),
        )),
    )
    .parse_next(input)
}

fn char_literal_body(input: &mut Input<'_>) -> PResult<char> {
    delimited(
        '\'',
        alt((escape_sequence, none_of(['\'', '\\', '\n', '\r']))),
        '\'',
    )
    .parse_next(input)
}

fn regular_string(input: &mut Input<'_>) -> PResult<String> {
    delimited(
        '"',
        repeat(0.., alt((escape_sequence, none_of(['"', '\\', '\n', '\r'])))).fold(
            String::new,
            |mut acc, ch| {
                acc.push(ch);
                acc
            },
        ),
        '"',
    )
    .parse_next(input)
}

fn verbatim_string(input: &mut Input<'_>) -> PResult<String> {
    delimited(
        "@\"",
        repeat(0.., alt(("\"\"".value('"'), none_of(['"'])))).fold(
            String::new,
            |mut acc, ch| {
                acc.push(ch);
                acc
            },
        ),
        '"',
    )
    .parse_next(input)
}

/// Run `parser` over all of `text`, failing if anything is left over.
fn parse_complete<'a, O>(
    text: &'a str,
    mut parser: impl FnMut(&mut Input<'a>) -> PResult<O>,
) -> Option<O> {
    let mut input = text;
    let output = parser(&mut input).ok()?;
    input.is_empty().then_some(output)
}

/// Parse the text of an integer literal.
pub fn parse_integer(text: &str) -> Result<IntegerLiteral, LiteralError> {
    let invalid = || LiteralError::InvalidInteger {
        text: text.to_string(),
    };
    let ((digits, radix), suffix) = parse_complete(text, |input| {
        let digits = integer_digits(input)?;
        let suffix = opt(integer_suffix).parse_next(input)?;
        Ok((digits, suffix.unwrap_or_default()))
    })
    .ok_or_else(invalid)?;

    let value = u64::from_str_radix(digits, radix).map_err(|_| LiteralError::IntegerOverflow {
        text: text.to_string(),
    })?;
    Ok(IntegerLiteral {
        value,
        suffix,
        hexadecimal: radix == 16,
    })
}

/// Parse the text of a real literal.
pub fn parse_real(text: &str) -> Result<RealLiteral, LiteralError> {
    let invalid = || LiteralError::InvalidReal {
        text: text.to_string(),
    };
    let ((body, is_real), suffix) = parse_complete(text, |input| {
        let body = real_body(input)?;
        let suffix = opt(real_suffix).parse_next(input)?;
        Ok((body, suffix.unwrap_or_default()))
    })
    .ok_or_else(invalid)?;

    if !is_real && suffix == RealSuffix::None {
        return Err(invalid());
    }
    let value = body.parse::<f64>().map_err(|_| invalid())?;
    Ok(RealLiteral { value, suffix })
}

/// Parse the text of a numeric literal, integer or real.
pub fn parse_numeric(text: &str) -> Result<NumericLiteral, LiteralError> {
    match parse_integer(text) {
        Ok(integer) => Ok(NumericLiteral::Integer(integer)),
        Err(overflow @ LiteralError::IntegerOverflow { .. }) => Err(overflow),
        Err(_) => parse_real(text).map(NumericLiteral::Real),
    }
}

/// Parse the text of a character literal, quotes included.
pub fn parse_char(text: &str) -> Result<char, LiteralError> {
    parse_complete(text, char_literal_body).ok_or_else(|| LiteralError::InvalidChar {
        text: text.to_string(),
    })
}

/// Parse the text of a regular or verbatim string literal, quotes included.
pub fn parse_string(text: &str) -> Result<String, LiteralError> {
    parse_complete(text, |input| alt((verbatim_string, regular_string)).parse_next(input))
        .ok_or_else(|| LiteralError::InvalidString {
            text: text.to_string(),
        })
}

fn push_escaped(out: &mut String, ch: char, quote: char) {
    match ch {
        '\\' => out.push_str("\\\\"),
        '\0' => out.push_str("\\0"),
        '\u{07}' => out.push_str("\\a"),
        '\u{08}' => out.push_str("\\b"),
        '\u{0C}' => out.push_str("\\f"),
        '\n' => out.push_str("\\n"),
        '\r' => out.push_str("\\r"),
        '\t' => out.push_str("\\t"),
        '\u{0B}' => out.push_str("\\v"),
        c if c == quote => {
            out.push('\\');
            out.push(c);
        }
        c if c.is_control() || c == '\u{2028}' || c == '\u{2029}' => {
            out.push_str(&format!("\\u{:04X}", c as u32));
        }
        c => out.push(c),
    }
}

/// Quote `value` as a regular string literal.
pub fn quote_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        push_escaped(&mut out, ch, '"');
    }
    out.push('"');
    out
}

/// Quote `value` as a character literal.
pub fn quote_char(value: char) -> String {
    let mut out = String::with_capacity(4);
    out.push('\'');
    push_escaped(&mut out, value, '\'');
    out.push('\'');
    out
}

/// Format an integer literal.
pub fn format_integer(value: u64, suffix: IntegerSuffix) -> String {
    format!("{value}{}", suffix.as_str())
}

/// Format a finite real literal so that it reads back as a real.
///
/// Non-finite values have no literal form; callers print them as member
/// accesses such as `double.NaN`.
pub fn format_real(value: f64, suffix: RealSuffix) -> String {
    format!("{value:?}{}", suffix.as_str())
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    // ===================
    // Property Test Functions
    // ===================

    /// Quoting any string and parsing the result gives the string back.
    fn check_string_quote_round_trip(value: &str) -> Result<(), TestCaseError> {
        let quoted = quote_string(value);
        prop_assert_eq!(parse_string(&quoted).unwrap(), value);
        Ok(())
    }

    /// Quoting any character and parsing the result gives it back.
    fn check_char_quote_round_trip(value: char) -> Result<(), TestCaseError> {
        let quoted = quote_char(value);
        prop_assert_eq!(parse_char(&quoted).unwrap(), value);
        Ok(())
    }

    /// Formatted finite doubles parse back to the same value.
    fn check_real_format_round_trip(value: f64) -> Result<(), TestCaseError> {
        let text = format_real(value, RealSuffix::None);
        let parsed = parse_numeric(&text).unwrap();
        prop_assert_eq!(
            parsed,
            NumericLiteral::Real(RealLiteral {
                value,
                suffix: RealSuffix::None,
            })
        );
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn string_quote_round_trip(value in "\\PC*") {
            check_string_quote_round_trip(&value)?;
        }

        #[test]
        fn char_quote_round_trip(value in proptest::char::range('\0', '\u{FFFF}')) {
            check_char_quote_round_trip(value)?;
        }

        #[test]
        fn real_format_round_trip(value in 0.0f64..1.0e12) {
            check_real_format_round_trip(value)?;
        }
    }
}
