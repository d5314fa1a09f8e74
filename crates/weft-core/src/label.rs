//! Node labels.
//!
//! Every non-null [`Node`](crate::Node) may carry a label. Labels written with
//! the `_` sentinel prefix name native host-syntax shapes and form the closed
//! [`SyntaxLabel`] vocabulary consumed by the lowering stage. Any other label
//! is DSL-specific content the lowering stage does not interpret.

use std::{collections::HashMap, fmt, str::FromStr, sync::Arc, sync::OnceLock};

use serde::{Deserialize, Serialize};

/// Prefix that marks a native host-syntax label.
pub const NATIVE_LABEL_PREFIX: char = '_';

macro_rules! syntax_labels {
    ($($variant:ident => $text:literal,)*) => {
        /// The closed vocabulary of native host-syntax labels.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum SyntaxLabel {
            $($variant,)*
        }

        impl SyntaxLabel {
            /// Every label, in declaration order.
            pub const ALL: &'static [SyntaxLabel] = &[$(SyntaxLabel::$variant,)*];

            /// The label text, including the sentinel prefix.
            pub fn as_str(self) -> &'static str {
                match self {
                    $(SyntaxLabel::$variant => $text,)*
                }
            }
        }
    };
}

syntax_labels! {
    // Sentinels
    AllOmitted => "_AllOmitted",
    Token => "_Token",

    // Compilation units and directives
    CompilationUnit => "_CompilationUnit",
    ExternAliasDirective => "_ExternAliasDirective",
    UsingDirective => "_UsingDirective",
    NameEquals => "_NameEquals",
    NameColon => "_NameColon",
    NamespaceDeclaration => "_NamespaceDeclaration",

    // Attributes
    AttributeList => "_AttributeList",
    AttributeTargetSpecifier => "_AttributeTargetSpecifier",
    Attribute => "_Attribute",
    AttributeArgumentList => "_AttributeArgumentList",
    AttributeArgument => "_AttributeArgument",

    // Type declarations
    ClassDeclaration => "_ClassDeclaration",
    StructDeclaration => "_StructDeclaration",
    InterfaceDeclaration => "_InterfaceDeclaration",
    EnumDeclaration => "_EnumDeclaration",
    EnumMemberDeclaration => "_EnumMemberDeclaration",
    DelegateDeclaration => "_DelegateDeclaration",
    TypeParameterList => "_TypeParameterList",
    TypeParameter => "_TypeParameter",
    BaseList => "_BaseList",
    SimpleBaseType => "_SimpleBaseType",
    TypeParameterConstraintClause => "_TypeParameterConstraintClause",
    ConstructorConstraint => "_ConstructorConstraint",
    ClassOrStructConstraint => "_ClassOrStructConstraint",
    TypeConstraint => "_TypeConstraint",

    // Member declarations
    FieldDeclaration => "_FieldDeclaration",
    EventFieldDeclaration => "_EventFieldDeclaration",
    MethodDeclaration => "_MethodDeclaration",
    ExplicitInterfaceSpecifier => "_ExplicitInterfaceSpecifier",
    OperatorDeclaration => "_OperatorDeclaration",
    ConversionOperatorDeclaration => "_ConversionOperatorDeclaration",
    ConstructorDeclaration => "_ConstructorDeclaration",
    ConstructorInitializer => "_ConstructorInitializer",
    DestructorDeclaration => "_DestructorDeclaration",
    PropertyDeclaration => "_PropertyDeclaration",
    EventDeclaration => "_EventDeclaration",
    IndexerDeclaration => "_IndexerDeclaration",
    AccessorList => "_AccessorList",
    AccessorDeclaration => "_AccessorDeclaration",
    ParameterList => "_ParameterList",
    BracketedParameterList => "_BracketedParameterList",
    Parameter => "_Parameter",
    EqualsValueClause => "_EqualsValueClause",

    // Statements
    Block => "_Block",
    LocalDeclarationStatement => "_LocalDeclarationStatement",
    VariableDeclaration => "_VariableDeclaration",
    VariableDeclarator => "_VariableDeclarator",
    ExpressionStatement => "_ExpressionStatement",
    EmptyStatement => "_EmptyStatement",
    LabeledStatement => "_LabeledStatement",
    GotoStatement => "_GotoStatement",
    BreakStatement => "_BreakStatement",
    ContinueStatement => "_ContinueStatement",
    ReturnStatement => "_ReturnStatement",
    ThrowStatement => "_ThrowStatement",
    YieldStatement => "_YieldStatement",
    WhileStatement => "_WhileStatement",
    DoStatement => "_DoStatement",
    ForStatement => "_ForStatement",
    ForEachStatement => "_ForEachStatement",
    UsingStatement => "_UsingStatement",
    FixedStatement => "_FixedStatement",
    CheckedStatement => "_CheckedStatement",
    UnsafeStatement => "_UnsafeStatement",
    LockStatement => "_LockStatement",
    IfStatement => "_IfStatement",
    ElseClause => "_ElseClause",
    SwitchStatement => "_SwitchStatement",
    SwitchSection => "_SwitchSection",
    CaseSwitchLabel => "_CaseSwitchLabel",
    DefaultSwitchLabel => "_DefaultSwitchLabel",
    TryStatement => "_TryStatement",
    CatchClause => "_CatchClause",
    CatchDeclaration => "_CatchDeclaration",
    CatchFilterClause => "_CatchFilterClause",
    FinallyClause => "_FinallyClause",

    // Expressions
    ParenthesizedExpression => "_ParenthesizedExpression",
    PrefixUnaryExpression => "_PrefixUnaryExpression",
    PostfixUnaryExpression => "_PostfixUnaryExpression",
    BinaryExpression => "_BinaryExpression",
    AssignmentExpression => "_AssignmentExpression",
    ConditionalExpression => "_ConditionalExpression",
    CastExpression => "_CastExpression",
    LiteralExpression => "_LiteralExpression",
    ThisExpression => "_ThisExpression",
    BaseExpression => "_BaseExpression",
    TypeOfExpression => "_TypeOfExpression",
    DefaultExpression => "_DefaultExpression",
    SizeOfExpression => "_SizeOfExpression",
    CheckedExpression => "_CheckedExpression",
    InvocationExpression => "_InvocationExpression",
    ElementAccessExpression => "_ElementAccessExpression",
    ArgumentList => "_ArgumentList",
    BracketedArgumentList => "_BracketedArgumentList",
    Argument => "_Argument",
    MemberAccessExpression => "_MemberAccessExpression",
    ObjectCreationExpression => "_ObjectCreationExpression",
    AnonymousObjectCreationExpression => "_AnonymousObjectCreationExpression",
    AnonymousObjectMemberDeclarator => "_AnonymousObjectMemberDeclarator",
    ArrayCreationExpression => "_ArrayCreationExpression",
    ImplicitArrayCreationExpression => "_ImplicitArrayCreationExpression",
    InitializerExpression => "_InitializerExpression",
    SimpleLambdaExpression => "_SimpleLambdaExpression",
    ParenthesizedLambdaExpression => "_ParenthesizedLambdaExpression",
    AnonymousMethodExpression => "_AnonymousMethodExpression",
    AwaitExpression => "_AwaitExpression",

    // Query comprehensions
    QueryExpression => "_QueryExpression",
    FromClause => "_FromClause",
    QueryBody => "_QueryBody",
    LetClause => "_LetClause",
    WhereClause => "_WhereClause",
    JoinClause => "_JoinClause",
    JoinIntoClause => "_JoinIntoClause",
    OrderByClause => "_OrderByClause",
    Ordering => "_Ordering",
    SelectClause => "_SelectClause",
    GroupClause => "_GroupClause",
    QueryContinuation => "_QueryContinuation",

    // Names and types
    IdentifierName => "_IdentifierName",
    GenericName => "_GenericName",
    TypeArgumentList => "_TypeArgumentList",
    QualifiedName => "_QualifiedName",
    AliasQualifiedName => "_AliasQualifiedName",
    PredefinedType => "_PredefinedType",
    ArrayType => "_ArrayType",
    ArrayRankSpecifier => "_ArrayRankSpecifier",
    NullableType => "_NullableType",
    PointerType => "_PointerType",
    OmittedArraySizeExpression => "_OmittedArraySizeExpression",
    OmittedTypeArgument => "_OmittedTypeArgument",
}

impl SyntaxLabel {
    /// Look up a label by its text.
    pub fn from_text(text: &str) -> Option<SyntaxLabel> {
        static BY_TEXT: OnceLock<HashMap<&'static str, SyntaxLabel>> = OnceLock::new();
        BY_TEXT
            .get_or_init(|| {
                SyntaxLabel::ALL
                    .iter()
                    .map(|label| (label.as_str(), *label))
                    .collect()
            })
            .get(text)
            .copied()
    }
}

impl fmt::Display for SyntaxLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A node label: either a native syntax label or DSL-specific text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Label {
    Syntax(SyntaxLabel),
    Custom(Arc<str>),
}

impl Label {
    /// Parse a label, recognizing the native syntax vocabulary.
    pub fn parse(text: &str) -> Label {
        match SyntaxLabel::from_text(text) {
            Some(label) => Label::Syntax(label),
            None => Label::Custom(Arc::from(text)),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Label::Syntax(label) => label.as_str(),
            Label::Custom(text) => text,
        }
    }

    /// The native syntax label, if this is one.
    pub fn syntax(&self) -> Option<SyntaxLabel> {
        match self {
            Label::Syntax(label) => Some(*label),
            Label::Custom(_) => None,
        }
    }

    /// Whether this label names a native host-syntax shape.
    pub fn is_native(&self) -> bool {
        matches!(self, Label::Syntax(_))
    }
}

impl From<SyntaxLabel> for Label {
    fn from(label: SyntaxLabel) -> Self {
        Label::Syntax(label)
    }
}

impl From<&str> for Label {
    fn from(text: &str) -> Self {
        Label::parse(text)
    }
}

impl From<String> for Label {
    fn from(text: String) -> Self {
        Label::parse(&text)
    }
}

impl From<Label> for String {
    fn from(label: Label) -> Self {
        label.as_str().to_string()
    }
}

impl FromStr for Label {
    type Err = std::convert::Infallible;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Ok(Label::parse(text))
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
