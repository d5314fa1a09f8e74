//! Token-kind vocabularies.
//!
//! Three independent closed vocabularies share one interface, the
//! [`Vocabulary`] trait:
//!
//! - [`CsTokenKind`] - the host language (C#) tokens
//! - [`SchemaTokenKind`] - the schema language keywords and punctuation
//! - [`WorkflowTokenKind`] - the workflow language keywords and punctuation
//!
//! Each vocabulary knows the fixed text of its kinds, keeps a lazily built
//! keyword set for lexers, hands out pre-built atom [`Node`]s, and escapes
//! identifiers that collide with its reserved keywords.

use std::{
    borrow::Cow,
    collections::HashSet,
    fmt,
    hash::Hash,
};

use thiserror::Error;

use crate::node::{AtomValue, Node};

/// Errors raised by vocabulary lookups.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("{vocabulary} token kind `{kind}` has no fixed text")]
    NoFixedText {
        vocabulary: &'static str,
        kind: &'static str,
    },
}

/// A closed enumeration of token kinds.
pub trait Vocabulary:
    Copy + Eq + Hash + fmt::Debug + Send + Sync + Into<AtomValue> + 'static
{
    /// Marker prefixed to identifiers that collide with a reserved keyword.
    const ESCAPE_MARKER: char;

    /// Human readable vocabulary name, used in error messages.
    const NAME: &'static str;

    /// Every kind, in declaration order.
    fn all() -> &'static [Self];

    /// The variant name of `self`.
    fn kind_name(self) -> &'static str;

    /// The fixed text of `self`, or `None` for identifier and literal kinds.
    fn fixed_text(self) -> Option<&'static str>;

    /// Whether `self` is a reserved keyword.
    fn is_reserved_keyword(self) -> bool;

    /// The set of reserved keyword texts.
    fn keywords() -> &'static HashSet<&'static str>;

    /// The kind whose fixed text is `text`, if any.
    fn from_fixed_text(text: &str) -> Option<Self>;

    /// The pre-built atom node wrapping `self`.
    fn atom(self) -> Node;

    /// The fixed text of `self`.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::NoFixedText`] for kinds without fixed text.
    /// Asking for one is a vocabulary mismatch between producer and consumer.
    fn text(self) -> Result<&'static str, TokenError> {
        self.fixed_text().ok_or(TokenError::NoFixedText {
            vocabulary: Self::NAME,
            kind: self.kind_name(),
        })
    }

    /// Whether `text` is a reserved keyword of this vocabulary.
    fn is_keyword(text: &str) -> bool {
        Self::keywords().contains(text)
    }

    /// Strip one leading escape marker from `text`.
    fn unescape_identifier(text: &str) -> &str {
        text.strip_prefix(Self::ESCAPE_MARKER).unwrap_or(text)
    }

    /// Escape `text` if its unescaped form is a reserved keyword.
    ///
    /// The unescaped form is derived first, so escaping an already escaped
    /// identifier does not add a second marker.
    fn escape_identifier(text: &str) -> Cow<'_, str> {
        let bare = Self::unescape_identifier(text);
        if Self::is_keyword(bare) {
            Cow::Owned(format!("{}{}", Self::ESCAPE_MARKER, bare))
        } else {
            Cow::Borrowed(bare)
        }
    }
}

macro_rules! token_vocabulary {
    (
        $(#[$meta:meta])*
        pub enum $name:ident ($vocab:literal, escape = $marker:literal) {
            fixed { $($fixed:ident => $ftext:literal,)* }
            keywords { $($kw:ident => $ktext:literal,)* }
            contextual { $($ckw:ident => $ctext:literal,)* }
            variable { $($var:ident,)* }
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
            serde::Serialize, serde::Deserialize,
        )]
        pub enum $name {
            $($fixed,)*
            $($kw,)*
            $($ckw,)*
            $($var,)*
        }

        impl $name {
            /// Every kind, in declaration order.
            pub const ALL: &'static [$name] = &[
                $($name::$fixed,)*
                $($name::$kw,)*
                $($name::$ckw,)*
                $($name::$var,)*
            ];

            /// Whether `self` is a contextual (non-reserved) keyword.
            #[allow(unreachable_patterns)]
            pub fn is_contextual_keyword(self) -> bool {
                match self {
                    $($name::$ckw => true,)*
                    _ => false,
                }
            }
        }

        impl $crate::token::Vocabulary for $name {
            const ESCAPE_MARKER: char = $marker;
            const NAME: &'static str = $vocab;

            fn all() -> &'static [Self] {
                Self::ALL
            }

            fn kind_name(self) -> &'static str {
                match self {
                    $($name::$fixed => stringify!($fixed),)*
                    $($name::$kw => stringify!($kw),)*
                    $($name::$ckw => stringify!($ckw),)*
                    $($name::$var => stringify!($var),)*
                }
            }

            fn fixed_text(self) -> Option<&'static str> {
                match self {
                    $($name::$fixed => Some($ftext),)*
                    $($name::$kw => Some($ktext),)*
                    $($name::$ckw => Some($ctext),)*
                    $($name::$var => None,)*
                }
            }

            #[allow(unreachable_patterns)]
            fn is_reserved_keyword(self) -> bool {
                match self {
                    $($name::$kw => true,)*
                    _ => false,
                }
            }

            fn keywords() -> &'static ::std::collections::HashSet<&'static str> {
                static KEYWORDS: ::std::sync::OnceLock<::std::collections::HashSet<&'static str>> =
                    ::std::sync::OnceLock::new();
                KEYWORDS.get_or_init(|| {
                    ::log::debug!(vocabulary = $vocab; "Initializing keyword set");
                    [$($ktext,)*].into_iter().collect()
                })
            }

            fn from_fixed_text(text: &str) -> Option<Self> {
                static BY_TEXT: ::std::sync::OnceLock<::std::collections::HashMap<&'static str, $name>> =
                    ::std::sync::OnceLock::new();
                BY_TEXT
                    .get_or_init(|| {
                        Self::ALL
                            .iter()
                            .filter_map(|kind| {
                                <$name as $crate::token::Vocabulary>::fixed_text(*kind)
                                    .map(|text| (text, *kind))
                            })
                            .collect()
                    })
                    .get(text)
                    .copied()
            }

            fn atom(self) -> $crate::node::Node {
                static ATOMS: ::std::sync::OnceLock<Vec<$crate::node::Node>> =
                    ::std::sync::OnceLock::new();
                let atoms = ATOMS.get_or_init(|| {
                    Self::ALL
                        .iter()
                        .map(|kind| $crate::node::Node::atom(*kind, None))
                        .collect()
                });
                atoms[self as usize].clone()
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                use $crate::token::Vocabulary as _;
                match self.fixed_text() {
                    Some(text) => f.write_str(text),
                    None => f.write_str(self.kind_name()),
                }
            }
        }
    };
}

mod csharp;
mod schema;
mod workflow;

pub use csharp::CsTokenKind;
pub use schema::SchemaTokenKind;
pub use workflow::WorkflowTokenKind;


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    // ===================
    // Strategies
    // ===================

    fn identifier_strategy() -> impl Strategy<Value = String> {
        prop_oneof![
            "[A-Za-z_][A-Za-z0-9_]{0,12}",
            prop::sample::select(
                CsTokenKind::keywords().iter().map(|k| k.to_string()).collect::<Vec<_>>()
            ),
        ]
    }

    // ===================
    // Property Test Functions
    // ===================

    /// Unescaping an escaped identifier gives back the identifier.
    fn check_escape_round_trip(text: &str) -> Result<(), TestCaseError> {
        let escaped = CsTokenKind::escape_identifier(text);
        prop_assert_eq!(CsTokenKind::unescape_identifier(&escaped), text);
        Ok(())
    }

    /// Escaping is idempotent and keywords always gain the marker.
    fn check_escape_idempotent(text: &str) -> Result<(), TestCaseError> {
        let once = CsTokenKind::escape_identifier(text).into_owned();
        let twice = CsTokenKind::escape_identifier(&once).into_owned();
        prop_assert_eq!(&once, &twice);
        if CsTokenKind::is_keyword(text) {
            prop_assert!(once.starts_with(CsTokenKind::ESCAPE_MARKER));
        }
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn escape_round_trip(text in identifier_strategy()) {
            check_escape_round_trip(&text)?;
        }

        #[test]
        fn escape_idempotent(text in identifier_strategy()) {
            check_escape_idempotent(&text)?;
        }
    }
}
