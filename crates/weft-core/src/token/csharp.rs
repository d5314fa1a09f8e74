//! Host language (C#) token kinds.

token_vocabulary! {
    /// Token kinds of the host language.
    pub enum CsTokenKind ("C#", escape = '@') {
        fixed {
            Tilde => "~",
            Exclamation => "!",
            Percent => "%",
            Caret => "^",
            Ampersand => "&",
            Asterisk => "*",
            OpenParen => "(",
            CloseParen => ")",
            Minus => "-",
            Plus => "+",
            Equals => "=",
            OpenBrace => "{",
            CloseBrace => "}",
            OpenBracket => "[",
            CloseBracket => "]",
            Bar => "|",
            Colon => ":",
            Semicolon => ";",
            LessThan => "<",
            Comma => ",",
            GreaterThan => ">",
            Dot => ".",
            Question => "?",
            Slash => "/",
            BarBar => "||",
            AmpersandAmpersand => "&&",
            MinusMinus => "--",
            PlusPlus => "++",
            ColonColon => "::",
            QuestionQuestion => "??",
            MinusGreaterThan => "->",
            ExclamationEquals => "!=",
            EqualsEquals => "==",
            EqualsGreaterThan => "=>",
            LessThanEquals => "<=",
            LessThanLessThan => "<<",
            LessThanLessThanEquals => "<<=",
            GreaterThanEquals => ">=",
            GreaterThanGreaterThan => ">>",
            GreaterThanGreaterThanEquals => ">>=",
            SlashEquals => "/=",
            AsteriskEquals => "*=",
            BarEquals => "|=",
            AmpersandEquals => "&=",
            PlusEquals => "+=",
            MinusEquals => "-=",
            CaretEquals => "^=",
            PercentEquals => "%=",
        }
        keywords {
            AbstractKeyword => "abstract",
            AsKeyword => "as",
            BaseKeyword => "base",
            BoolKeyword => "bool",
            BreakKeyword => "break",
            ByteKeyword => "byte",
            CaseKeyword => "case",
            CatchKeyword => "catch",
            CharKeyword => "char",
            CheckedKeyword => "checked",
            ClassKeyword => "class",
            ConstKeyword => "const",
            ContinueKeyword => "continue",
            DecimalKeyword => "decimal",
            DefaultKeyword => "default",
            DelegateKeyword => "delegate",
            DoKeyword => "do",
            DoubleKeyword => "double",
            ElseKeyword => "else",
            EnumKeyword => "enum",
            EventKeyword => "event",
            ExplicitKeyword => "explicit",
            ExternKeyword => "extern",
            FalseKeyword => "false",
            FinallyKeyword => "finally",
            FixedKeyword => "fixed",
            FloatKeyword => "float",
            ForKeyword => "for",
            ForEachKeyword => "foreach",
            GotoKeyword => "goto",
            IfKeyword => "if",
            ImplicitKeyword => "implicit",
            InKeyword => "in",
            IntKeyword => "int",
            InterfaceKeyword => "interface",
            InternalKeyword => "internal",
            IsKeyword => "is",
            LockKeyword => "lock",
            LongKeyword => "long",
            NamespaceKeyword => "namespace",
            NewKeyword => "new",
            NullKeyword => "null",
            ObjectKeyword => "object",
            OperatorKeyword => "operator",
            OutKeyword => "out",
            OverrideKeyword => "override",
            ParamsKeyword => "params",
            PrivateKeyword => "private",
            ProtectedKeyword => "protected",
            PublicKeyword => "public",
            ReadOnlyKeyword => "readonly",
            RefKeyword => "ref",
            ReturnKeyword => "return",
            SByteKeyword => "sbyte",
            SealedKeyword => "sealed",
            ShortKeyword => "short",
            SizeOfKeyword => "sizeof",
            StackAllocKeyword => "stackalloc",
            StaticKeyword => "static",
            StringKeyword => "string",
            StructKeyword => "struct",
            SwitchKeyword => "switch",
            ThisKeyword => "this",
            ThrowKeyword => "throw",
            TrueKeyword => "true",
            TryKeyword => "try",
            TypeOfKeyword => "typeof",
            UIntKeyword => "uint",
            ULongKeyword => "ulong",
            UncheckedKeyword => "unchecked",
            UnsafeKeyword => "unsafe",
            UShortKeyword => "ushort",
            UsingKeyword => "using",
            VirtualKeyword => "virtual",
            VoidKeyword => "void",
            VolatileKeyword => "volatile",
            WhileKeyword => "while",
        }
        contextual {
            AddKeyword => "add",
            AliasKeyword => "alias",
            AscendingKeyword => "ascending",
            AsyncKeyword => "async",
            AwaitKeyword => "await",
            ByKeyword => "by",
            DescendingKeyword => "descending",
            DynamicKeyword => "dynamic",
            EqualsKeyword => "equals",
            FromKeyword => "from",
            GetKeyword => "get",
            GlobalKeyword => "global",
            GroupKeyword => "group",
            IntoKeyword => "into",
            JoinKeyword => "join",
            LetKeyword => "let",
            OnKeyword => "on",
            OrderByKeyword => "orderby",
            PartialKeyword => "partial",
            RemoveKeyword => "remove",
            SelectKeyword => "select",
            SetKeyword => "set",
            ValueKeyword => "value",
            VarKeyword => "var",
            WhenKeyword => "when",
            WhereKeyword => "where",
            YieldKeyword => "yield",
        }
        variable {
            Identifier,
            NumericLiteral,
            CharacterLiteral,
            StringLiteral,
            EndOfFile,
        }
    }
}

impl CsTokenKind {
    /// Whether `self` names a predefined type (`int`, `string`, ...).
    pub fn is_predefined_type(self) -> bool {
        matches!(
            self,
            CsTokenKind::BoolKeyword
                | CsTokenKind::ByteKeyword
                | CsTokenKind::SByteKeyword
                | CsTokenKind::ShortKeyword
                | CsTokenKind::UShortKeyword
                | CsTokenKind::IntKeyword
                | CsTokenKind::UIntKeyword
                | CsTokenKind::LongKeyword
                | CsTokenKind::ULongKeyword
                | CsTokenKind::DoubleKeyword
                | CsTokenKind::FloatKeyword
                | CsTokenKind::DecimalKeyword
                | CsTokenKind::StringKeyword
                | CsTokenKind::CharKeyword
                | CsTokenKind::ObjectKeyword
                | CsTokenKind::VoidKeyword
                | CsTokenKind::DynamicKeyword
        )
    }

    /// Whether `self` is a literal kind whose text must be parsed.
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            CsTokenKind::NumericLiteral | CsTokenKind::CharacterLiteral | CsTokenKind::StringLiteral
        )
    }

    /// Whether `self` is an assignment operator.
    pub fn is_assignment_operator(self) -> bool {
        matches!(
            self,
            CsTokenKind::Equals
                | CsTokenKind::PlusEquals
                | CsTokenKind::MinusEquals
                | CsTokenKind::AsteriskEquals
                | CsTokenKind::SlashEquals
                | CsTokenKind::PercentEquals
                | CsTokenKind::AmpersandEquals
                | CsTokenKind::BarEquals
                | CsTokenKind::CaretEquals
                | CsTokenKind::LessThanLessThanEquals
                | CsTokenKind::GreaterThanGreaterThanEquals
        )
    }

    /// Whether `self` can join the operands of a binary expression.
    ///
    /// Type tests (`is`, `as`) count as binary operators.
    pub fn is_binary_operator(self) -> bool {
        matches!(
            self,
            CsTokenKind::Plus
                | CsTokenKind::Minus
                | CsTokenKind::Asterisk
                | CsTokenKind::Slash
                | CsTokenKind::Percent
                | CsTokenKind::Ampersand
                | CsTokenKind::Bar
                | CsTokenKind::Caret
                | CsTokenKind::AmpersandAmpersand
                | CsTokenKind::BarBar
                | CsTokenKind::LessThanLessThan
                | CsTokenKind::GreaterThanGreaterThan
                | CsTokenKind::EqualsEquals
                | CsTokenKind::ExclamationEquals
                | CsTokenKind::LessThan
                | CsTokenKind::LessThanEquals
                | CsTokenKind::GreaterThan
                | CsTokenKind::GreaterThanEquals
                | CsTokenKind::QuestionQuestion
                | CsTokenKind::IsKeyword
                | CsTokenKind::AsKeyword
        )
    }

    /// Whether `self` can prefix the operand of a unary expression.
    pub fn is_prefix_unary_operator(self) -> bool {
        matches!(
            self,
            CsTokenKind::Plus
                | CsTokenKind::Minus
                | CsTokenKind::Exclamation
                | CsTokenKind::Tilde
                | CsTokenKind::PlusPlus
                | CsTokenKind::MinusMinus
                | CsTokenKind::Ampersand
                | CsTokenKind::Asterisk
        )
    }

    pub fn is_postfix_unary_operator(self) -> bool {
        matches!(self, CsTokenKind::PlusPlus | CsTokenKind::MinusMinus)
    }
}
