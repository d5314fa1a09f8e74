//! Typed constant values.
//!
//! A [`Literal`] is a value of one of the primitive kinds the DSLs can
//! express as a constant, and knows the host expression that recreates it.

use std::sync::Arc;

use weft_core::CsTokenKind;

use crate::{
    factory::{exprs, names},
    literal_text::{IntegerSuffix, RealSuffix},
    syntax::{Expr, TypeSyntax},
    token::SyntaxToken,
};

/// The type of a constant value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Bool,
    Char,
    SByte,
    Byte,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Single,
    Double,
    Decimal,
    String,
    Bytes,
    DateTime,
    DateTimeOffset,
    TimeSpan,
    Guid,
    Uri,
    XName,
    XNamespace,
}

impl PrimitiveKind {
    pub fn type_syntax(self) -> TypeSyntax {
        let predefined = TypeSyntax::predefined;
        match self {
            PrimitiveKind::Bool => predefined(CsTokenKind::BoolKeyword),
            PrimitiveKind::Char => predefined(CsTokenKind::CharKeyword),
            PrimitiveKind::SByte => predefined(CsTokenKind::SByteKeyword),
            PrimitiveKind::Byte => predefined(CsTokenKind::ByteKeyword),
            PrimitiveKind::Int16 => predefined(CsTokenKind::ShortKeyword),
            PrimitiveKind::UInt16 => predefined(CsTokenKind::UShortKeyword),
            PrimitiveKind::Int32 => predefined(CsTokenKind::IntKeyword),
            PrimitiveKind::UInt32 => predefined(CsTokenKind::UIntKeyword),
            PrimitiveKind::Int64 => predefined(CsTokenKind::LongKeyword),
            PrimitiveKind::UInt64 => predefined(CsTokenKind::ULongKeyword),
            PrimitiveKind::Single => predefined(CsTokenKind::FloatKeyword),
            PrimitiveKind::Double => predefined(CsTokenKind::DoubleKeyword),
            PrimitiveKind::Decimal => predefined(CsTokenKind::DecimalKeyword),
            PrimitiveKind::String => predefined(CsTokenKind::StringKeyword),
            PrimitiveKind::Bytes => TypeSyntax::array(predefined(CsTokenKind::ByteKeyword), 1),
            PrimitiveKind::DateTime => names::date_time(),
            PrimitiveKind::DateTimeOffset => names::date_time_offset(),
            PrimitiveKind::TimeSpan => names::time_span(),
            PrimitiveKind::Guid => names::guid(),
            PrimitiveKind::Uri => names::uri(),
            PrimitiveKind::XName => names::xname(),
            PrimitiveKind::XNamespace => names::xnamespace(),
        }
    }

    /// Whether values of this kind are references and so need no `?` to be null.
    pub fn is_reference(self) -> bool {
        matches!(
            self,
            PrimitiveKind::String
                | PrimitiveKind::Bytes
                | PrimitiveKind::Uri
                | PrimitiveKind::XName
                | PrimitiveKind::XNamespace
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DateTimeKind {
    #[default]
    Unspecified,
    Utc,
    Local,
}

impl DateTimeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DateTimeKind::Unspecified => "Unspecified",
            DateTimeKind::Utc => "Utc",
            DateTimeKind::Local => "Local",
        }
    }
}

/// A constant value.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Bool(bool),
    Char(char),
    SByte(i8),
    Byte(u8),
    Int16(i16),
    UInt16(u16),
    Int32(i32),
    UInt32(u32),
    Int64(i64),
    UInt64(u64),
    Single(f32),
    Double(f64),
    /// `unscaled / 10^scale`
    Decimal {
        unscaled: i128,
        scale: u32,
    },
    String(Arc<str>),
    Bytes(Arc<[u8]>),
    /// 100-nanosecond ticks since 0001-01-01.
    DateTime {
        ticks: i64,
        kind: DateTimeKind,
    },
    DateTimeOffset {
        ticks: i64,
        offset_minutes: i16,
    },
    TimeSpan {
        ticks: i64,
    },
    Guid(u128),
    Uri(Arc<str>),
    XName {
        namespace: Arc<str>,
        local_name: Arc<str>,
    },
    XNamespace(Arc<str>),
    /// A member of an enum type.
    Enum {
        ty: TypeSyntax,
        member: Arc<str>,
    },
    /// The null value of a kind.
    Null(PrimitiveKind),
}

fn integer(negative: bool, magnitude: u64, suffix: IntegerSuffix) -> Expr {
    let literal = Expr::literal(SyntaxToken::integer_literal(magnitude, suffix));
    if negative {
        exprs::negate(literal)
    } else {
        literal
    }
}

/// Integers of kinds without a literal suffix are written as a cast int.
fn narrow_integer(keyword: CsTokenKind, value: i64) -> Expr {
    exprs::cast(
        TypeSyntax::predefined(keyword),
        integer(value < 0, value.unsigned_abs(), IntegerSuffix::None),
    )
}

fn real(value: f64, suffix: RealSuffix, keyword: CsTokenKind) -> Expr {
    let special = if value.is_nan() {
        Some("NaN")
    } else if value == f64::INFINITY {
        Some("PositiveInfinity")
    } else if value == f64::NEG_INFINITY {
        Some("NegativeInfinity")
    } else {
        None
    };
    if let Some(member) = special {
        return exprs::member(exprs::type_name(TypeSyntax::predefined(keyword)), member);
    }
    let literal = Expr::literal(SyntaxToken::real_literal(value.abs(), suffix));
    if value.is_sign_negative() {
        exprs::negate(literal)
    } else {
        literal
    }
}

fn format_guid(value: u128) -> String {
    format!(
        "{:08x}-{:04x}-{:04x}-{:04x}-{:012x}",
        value >> 96,
        (value >> 80) & 0xffff,
        (value >> 64) & 0xffff,
        (value >> 48) & 0xffff,
        value & 0xffff_ffff_ffff
    )
}

impl Literal {
    /// The kind of the value, or `None` for enum members.
    pub fn kind(&self) -> Option<PrimitiveKind> {
        let kind = match self {
            Literal::Bool(_) => PrimitiveKind::Bool,
            Literal::Char(_) => PrimitiveKind::Char,
            Literal::SByte(_) => PrimitiveKind::SByte,
            Literal::Byte(_) => PrimitiveKind::Byte,
            Literal::Int16(_) => PrimitiveKind::Int16,
            Literal::UInt16(_) => PrimitiveKind::UInt16,
            Literal::Int32(_) => PrimitiveKind::Int32,
            Literal::UInt32(_) => PrimitiveKind::UInt32,
            Literal::Int64(_) => PrimitiveKind::Int64,
            Literal::UInt64(_) => PrimitiveKind::UInt64,
            Literal::Single(_) => PrimitiveKind::Single,
            Literal::Double(_) => PrimitiveKind::Double,
            Literal::Decimal { .. } => PrimitiveKind::Decimal,
            Literal::String(_) => PrimitiveKind::String,
            Literal::Bytes(_) => PrimitiveKind::Bytes,
            Literal::DateTime { .. } => PrimitiveKind::DateTime,
            Literal::DateTimeOffset { .. } => PrimitiveKind::DateTimeOffset,
            Literal::TimeSpan { .. } => PrimitiveKind::TimeSpan,
            Literal::Guid(_) => PrimitiveKind::Guid,
            Literal::Uri(_) => PrimitiveKind::Uri,
            Literal::XName { .. } => PrimitiveKind::XName,
            Literal::XNamespace(_) => PrimitiveKind::XNamespace,
            Literal::Null(kind) => *kind,
            Literal::Enum { .. } => return None,
        };
        Some(kind)
    }

    /// The host expression that evaluates to this value.
    pub fn to_expr(&self) -> Expr {
        match self {
            Literal::Bool(value) => exprs::bool_literal(*value),
            Literal::Char(value) => Expr::literal(SyntaxToken::char_literal(*value)),
            Literal::SByte(value) => narrow_integer(CsTokenKind::SByteKeyword, i64::from(*value)),
            Literal::Byte(value) => narrow_integer(CsTokenKind::ByteKeyword, i64::from(*value)),
            Literal::Int16(value) => narrow_integer(CsTokenKind::ShortKeyword, i64::from(*value)),
            Literal::UInt16(value) => {
                narrow_integer(CsTokenKind::UShortKeyword, i64::from(*value))
            }
            Literal::Int32(value) => integer(
                *value < 0,
                u64::from(value.unsigned_abs()),
                IntegerSuffix::None,
            ),
            Literal::UInt32(value) => integer(false, u64::from(*value), IntegerSuffix::Unsigned),
            Literal::Int64(value) => integer(*value < 0, value.unsigned_abs(), IntegerSuffix::Long),
            Literal::UInt64(value) => integer(false, *value, IntegerSuffix::UnsignedLong),
            Literal::Single(value) => {
                // Widen through the shortest decimal text so 0.1f prints as 0.1F.
                let widened = format!("{value:?}").parse().unwrap_or(f64::from(*value));
                real(widened, RealSuffix::Float, CsTokenKind::FloatKeyword)
            }
            Literal::Double(value) => real(*value, RealSuffix::None, CsTokenKind::DoubleKeyword),
            Literal::Decimal { unscaled, scale } => {
                let literal = Expr::literal(SyntaxToken::decimal_from_parts(
                    unscaled.unsigned_abs(),
                    *scale,
                ));
                if *unscaled < 0 {
                    exprs::negate(literal)
                } else {
                    literal
                }
            }
            Literal::String(value) => exprs::string(value),
            Literal::Bytes(bytes) => exprs::new_array(
                TypeSyntax::predefined(CsTokenKind::ByteKeyword),
                bytes
                    .iter()
                    .map(|byte| integer(false, u64::from(*byte), IntegerSuffix::None)),
            ),
            Literal::DateTime { ticks, kind } => exprs::new_object(
                names::date_time(),
                [
                    Literal::Int64(*ticks).to_expr(),
                    exprs::member(exprs::type_name(names::date_time_kind()), kind.as_str()),
                ],
            ),
            Literal::DateTimeOffset {
                ticks,
                offset_minutes,
            } => exprs::new_object(
                names::date_time_offset(),
                [
                    Literal::Int64(*ticks).to_expr(),
                    exprs::invoke_member(
                        exprs::type_name(names::time_span()),
                        "FromMinutes",
                        [Literal::Int32(i32::from(*offset_minutes)).to_expr()],
                    ),
                ],
            ),
            Literal::TimeSpan { ticks } => {
                exprs::new_object(names::time_span(), [Literal::Int64(*ticks).to_expr()])
            }
            Literal::Guid(value) => {
                exprs::new_object(names::guid(), [exprs::string(&format_guid(*value))])
            }
            Literal::Uri(text) => exprs::new_object(
                names::uri(),
                [
                    exprs::string(text),
                    exprs::member(exprs::type_name(names::uri_kind()), "RelativeOrAbsolute"),
                ],
            ),
            Literal::XName {
                namespace,
                local_name,
            } => exprs::invoke_member(
                exprs::type_name(names::xname()),
                "Get",
                [exprs::string(local_name), exprs::string(namespace)],
            ),
            Literal::XNamespace(namespace) => exprs::invoke_member(
                exprs::type_name(names::xnamespace()),
                "Get",
                [exprs::string(namespace)],
            ),
            Literal::Enum { ty, member } => exprs::member(exprs::type_name(ty.clone()), member),
            Literal::Null(kind) => {
                let ty = if kind.is_reference() {
                    kind.type_syntax()
                } else {
                    TypeSyntax::nullable(kind.type_syntax())
                };
                exprs::cast(ty, exprs::null())
            }
        }
    }
}

macro_rules! literal_from {
    ($($ty:ty => $variant:ident,)*) => {
        $(
            impl From<$ty> for Literal {
                fn from(value: $ty) -> Self {
                    Literal::$variant(value)
                }
            }
        )*
    };
}

literal_from! {
    bool => Bool,
    char => Char,
    i8 => SByte,
    u8 => Byte,
    i16 => Int16,
    u16 => UInt16,
    i32 => Int32,
    u32 => UInt32,
    i64 => Int64,
    u64 => UInt64,
    f32 => Single,
    f64 => Double,
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Literal::String(Arc::from(value))
    }
}

impl From<String> for Literal {
    fn from(value: String) -> Self {
        Literal::String(Arc::from(value))
    }
}

impl From<&[u8]> for Literal {
    fn from(value: &[u8]) -> Self {
        Literal::Bytes(Arc::from(value))
    }
}

impl From<Vec<u8>> for Literal {
    fn from(value: Vec<u8>) -> Self {
        Literal::Bytes(Arc::from(value))
    }
}
