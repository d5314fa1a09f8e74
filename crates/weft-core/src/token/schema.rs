//! Schema language token kinds.

token_vocabulary! {
    /// Token kinds of the schema language.
    pub enum SchemaTokenKind ("schema", escape = '@') {
        fixed {
            OpenBrace => "{",
            CloseBrace => "}",
            OpenParen => "(",
            CloseParen => ")",
            OpenBracket => "[",
            CloseBracket => "]",
            Comma => ",",
            Semicolon => ";",
            Colon => ":",
            ColonColon => "::",
            Dot => ".",
            DotDot => "..",
            Equals => "=",
            EqualsEquals => "==",
            ExclamationEquals => "!=",
            LessThan => "<",
            LessThanEquals => "<=",
            GreaterThan => ">",
            GreaterThanEquals => ">=",
            Question => "?",
            Asterisk => "*",
            Plus => "+",
            Minus => "-",
            Slash => "/",
            Percent => "%",
            Bar => "|",
            BarBar => "||",
            AmpersandAmpersand => "&&",
            Exclamation => "!",
            Hash => "#",
            Dollar => "$",
        }
        keywords {
            AbstractKeyword => "abstract",
            AliasKeyword => "alias",
            AsKeyword => "as",
            AttributeKeyword => "attribute",
            AttributesKeyword => "attributes",
            ChoiceKeyword => "choice",
            ElementKeyword => "element",
            EnumKeyword => "enum",
            ExtendsKeyword => "extends",
            FacetsKeyword => "facets",
            FalseKeyword => "false",
            ImportKeyword => "import",
            IncludeKeyword => "include",
            InstanceKeyword => "instance",
            KeyKeyword => "key",
            KeyRefKeyword => "keyref",
            ListsKeyword => "lists",
            MixedKeyword => "mixed",
            NamespaceKeyword => "namespace",
            NullKeyword => "null",
            NullableKeyword => "nullable",
            RestrictsKeyword => "restricts",
            SealedKeyword => "sealed",
            SeqKeyword => "seq",
            SimpleKeyword => "simple",
            SubstituteKeyword => "substitute",
            TrueKeyword => "true",
            TypeKeyword => "type",
            UniqueKeyword => "unique",
            UnorderedKeyword => "unordered",
        }
        contextual {
            LengthsKeyword => "lengths",
            DigitsKeyword => "digits",
            EnumsKeyword => "enums",
            PatternKeyword => "pattern",
            WhitespaceKeyword => "whitespace",
            PreserveKeyword => "preserve",
            ReplaceKeyword => "replace",
            CollapseKeyword => "collapse",
            ValueKeyword => "value",
            ValuesKeyword => "values",
            QualifiedKeyword => "qualified",
            UnqualifiedKeyword => "unqualified",
            AnyKeyword => "any",
            StrictKeyword => "strict",
            LaxKeyword => "lax",
            SkipKeyword => "skip",
        }
        variable {
            Identifier,
            IntegerLiteral,
            DecimalLiteral,
            RealLiteral,
            StringLiteral,
            EndOfFile,
        }
    }
}

impl SchemaTokenKind {
    /// Whether `self` names a facet (`lengths`, `digits`, ...).
    pub fn is_facet(self) -> bool {
        matches!(
            self,
            SchemaTokenKind::LengthsKeyword
                | SchemaTokenKind::DigitsKeyword
                | SchemaTokenKind::EnumsKeyword
                | SchemaTokenKind::PatternKeyword
                | SchemaTokenKind::WhitespaceKeyword
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Vocabulary;

    #[test]
    fn test_schema_keywords() {
        assert!(SchemaTokenKind::is_keyword("choice"));
        assert!(SchemaTokenKind::is_keyword("keyref"));
        assert!(!SchemaTokenKind::is_keyword("pattern"));
        assert_eq!(SchemaTokenKind::escape_identifier("seq"), "@seq");
        assert_eq!(SchemaTokenKind::escape_identifier("digits"), "digits");
    }

    #[test]
    fn test_facets() {
        assert!(SchemaTokenKind::PatternKeyword.is_facet());
        assert!(!SchemaTokenKind::ElementKeyword.is_facet());
    }

    #[test]
    fn test_variable_kinds_have_no_text() {
        assert!(SchemaTokenKind::DecimalLiteral.fixed_text().is_none());
        assert!(SchemaTokenKind::DecimalLiteral.text().is_err());
    }
}
