//! Lowering of the generic node tree into host syntax.
//!
//! Nodes labelled with a native [`SyntaxLabel`] describe host-language syntax
//! by member name (see the per-category modules for the member names each
//! label reads). [`to_syntax_node`] turns such a node into the matching
//! [`SyntaxNode`], recursing through its members, and attaches the node's
//! span to the spanned syntax it produces.
//!
//! Tokens appear in two shapes: an unlabelled atom holding a host token kind
//! stands for that token's canonical text, and a struct labelled `_Token`
//! carries a `Kind` atom plus the `Text` of identifiers and literals.
//!
//! # Example
//!
//! ```
//! # use weft_compiler::lower::lower;
//! # use weft_core::{CsTokenKind, Node, SyntaxLabel};
//! # use weft_syntax::syntax::Stmt;
//! let name = Node::structure(
//!     SyntaxLabel::IdentifierName,
//!     None,
//!     [("Identifier", Node::token(CsTokenKind::Identifier, Some("total"), None))],
//! );
//! let node = Node::structure(SyntaxLabel::ReturnStatement, None, [("Expression", name)]);
//!
//! let stmt: Stmt = lower(&node).unwrap().unwrap();
//! assert_eq!(weft_syntax::print::to_text(&stmt), "return total;");
//! ```

mod decl;
mod expr;
mod query;
mod stmt;
mod types;

use log::trace;
use thiserror::Error;

use weft_core::{
    AtomValue, CsTokenKind, Label, Node, NodeError, NodeKind, SourceSpan, SyntaxLabel,
    TokenError, Vocabulary,
};
use weft_syntax::{
    LiteralError, ShapeError, SourceSpanned, SyntaxNode, SyntaxToken,
    list::{Element, ListError, SeparatedList},
    syntax::{
        ArgumentListKind, Constraint, Expr, ExprKind, MemberDecl, MemberKind, ParameterListKind,
        Stmt, StmtKind, SwitchLabel, TypeKind, TypeSyntax,
    },
};

/// Errors raised while lowering a node tree.
///
/// Every variant carries the span of the node being lowered, when it has
/// one.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LowerError {
    #[error("cannot lower an unlabelled {kind} node")]
    Unlabelled {
        kind: NodeKind,
        span: Option<SourceSpan>,
    },

    #[error("unknown syntax label `{label}`")]
    UnknownLabel {
        label: String,
        span: Option<SourceSpan>,
    },

    #[error("expected {expected}, found {found}")]
    UnexpectedShape {
        found: String,
        expected: &'static str,
        span: Option<SourceSpan>,
    },

    #[error("`{label}` node is missing required member `{member}`")]
    MissingMember {
        label: SyntaxLabel,
        member: &'static str,
        span: Option<SourceSpan>,
    },

    #[error("{context}: {source}")]
    Node {
        context: String,
        source: NodeError,
        span: Option<SourceSpan>,
    },

    #[error("{context}: {source}")]
    Shape {
        context: String,
        source: ShapeError,
        span: Option<SourceSpan>,
    },

    #[error("{source}")]
    Token {
        source: TokenError,
        span: Option<SourceSpan>,
    },

    #[error("{source}")]
    Literal {
        source: LiteralError,
        span: Option<SourceSpan>,
    },

    #[error("{source}")]
    List {
        source: ListError,
        span: Option<SourceSpan>,
    },

    #[error("{vocabulary} token `{kind}` cannot appear in host syntax")]
    ForeignToken {
        vocabulary: &'static str,
        kind: String,
        span: Option<SourceSpan>,
    },

    #[error("`{label}.{member}` has invalid value {found}")]
    InvalidValue {
        label: SyntaxLabel,
        member: &'static str,
        found: String,
        span: Option<SourceSpan>,
    },
}

impl LowerError {
    /// The span of the node that failed to lower.
    pub fn span(&self) -> Option<&SourceSpan> {
        match self {
            LowerError::Unlabelled { span, .. }
            | LowerError::UnknownLabel { span, .. }
            | LowerError::UnexpectedShape { span, .. }
            | LowerError::MissingMember { span, .. }
            | LowerError::Node { span, .. }
            | LowerError::Shape { span, .. }
            | LowerError::Token { span, .. }
            | LowerError::Literal { span, .. }
            | LowerError::List { span, .. }
            | LowerError::ForeignToken { span, .. }
            | LowerError::InvalidValue { span, .. } => span.as_ref(),
        }
    }
}

/// A syntax type a lowered node can be narrowed to.
pub trait FromSyntax: TryFrom<SyntaxNode, Error = ShapeError> {}

impl<T: TryFrom<SyntaxNode, Error = ShapeError>> FromSyntax for T {}

/// Lower `node` into host syntax.
///
/// A null node lowers to `None`.
///
/// # Errors
///
/// Fails if the node or any descendant has no native label, lacks a
/// required member, or holds a member of the wrong shape.
pub fn to_syntax_node(node: &Node) -> Result<Option<SyntaxNode>, LowerError> {
    if node.is_null() {
        return Ok(None);
    }
    let label = match node.label() {
        None => {
            return Err(LowerError::Unlabelled {
                kind: node.kind(),
                span: node.span().cloned(),
            });
        }
        Some(Label::Custom(text)) => {
            return Err(LowerError::UnknownLabel {
                label: text.to_string(),
                span: node.span().cloned(),
            });
        }
        Some(Label::Syntax(label)) => *label,
    };

    let mut lowered = lower_labelled(node, label)?;
    if let Some(span) = node.span() {
        lowered.set_source_span(Some(span.clone()));
    }
    Ok(Some(lowered))
}

/// Lower `node` and narrow the result to `T`.
///
/// # Errors
///
/// Fails as [`to_syntax_node`] does, and with [`LowerError::Shape`] when the
/// node lowers to something other than `T`.
pub fn lower<T: FromSyntax>(node: &Node) -> Result<Option<T>, LowerError> {
    let Some(syntax) = to_syntax_node(node)? else {
        return Ok(None);
    };
    T::try_from(syntax)
        .map(Some)
        .map_err(|source| LowerError::Shape {
            context: describe(node),
            source,
            span: node.span().cloned(),
        })
}

/// Lower a token node.
///
/// When `set_span` is `false` the token carries no span, whatever the node
/// says.
///
/// # Errors
///
/// Fails if `node` is not a token node, names a token of a DSL vocabulary,
/// or carries literal text that does not parse.
pub fn to_syntax_token(node: &Node, set_span: bool) -> Result<SyntaxToken, LowerError> {
    let span = node.span().cloned();
    let mut token = match node {
        Node::Atom(atom) if atom.label.is_none() => token_from_kind(&atom.value, node)?,
        Node::Struct(_) if node.syntax_label() == Some(SyntaxLabel::Token) => token_struct(node)?,
        _ => {
            return Err(LowerError::UnexpectedShape {
                found: describe(node),
                expected: "a token",
                span,
            });
        }
    };
    if set_span {
        token.set_source_span(span);
    }
    Ok(token)
}

/// Whether `node` has one of the two token shapes.
pub fn is_token_node(node: &Node) -> bool {
    match node {
        Node::Atom(atom) => {
            atom.label.is_none()
                && matches!(
                    atom.value,
                    AtomValue::CSharp(_) | AtomValue::Schema(_) | AtomValue::Workflow(_)
                )
        }
        Node::Struct(_) => node.syntax_label() == Some(SyntaxLabel::Token),
        _ => false,
    }
}

/// Lower every item of a list node.
///
/// Null items are skipped; with `native_only`, so are items whose label is
/// not a native syntax label.
///
/// # Errors
///
/// Fails if `node` is not a list or any kept item fails to lower.
pub fn to_syntax_list<T: FromSyntax>(node: &Node, native_only: bool) -> Result<Vec<T>, LowerError> {
    let items = node.items().map_err(|source| LowerError::Node {
        context: describe(node),
        source,
        span: node.span().cloned(),
    })?;

    let mut lowered = Vec::with_capacity(items.len());
    for item in items {
        if native_only && !item.label().is_some_and(Label::is_native) {
            if !item.is_null() {
                trace!(item = describe(item); "Skipping non-native list item");
            }
            continue;
        }
        if let Some(item) = lower::<T>(item)? {
            lowered.push(item);
        }
    }
    Ok(lowered)
}

/// Lower a list node of items and separator tokens.
///
/// The list takes one of three shapes:
/// - labelled `_AllOmitted`, it holds only separators, and every item is
///   produced by `omitted`: `n` separators give `n + 1` items;
/// - empty, it gives one omitted item if `omitted` is given and no items
///   otherwise;
/// - otherwise items and separator tokens alternate, starting with an item.
///   A null item is replaced by an omitted one. A list with no separator
///   tokens at all is taken to be comma separated.
///
/// # Errors
///
/// Fails if the elements do not alternate, an item fails to lower, or an
/// omitted item is needed without an `omitted` factory.
pub fn to_separated_list<T: FromSyntax>(
    node: &Node,
    omitted: Option<fn() -> T>,
) -> Result<SeparatedList<T>, LowerError> {
    let span = node.span().cloned();
    let items = node.items().map_err(|source| LowerError::Node {
        context: describe(node),
        source,
        span: span.clone(),
    })?;

    if node.syntax_label() == Some(SyntaxLabel::AllOmitted) {
        let separators = to_token_list(node)?;
        let Some(omitted) = omitted else {
            return Err(LowerError::UnexpectedShape {
                found: describe(node),
                expected: "a list with items",
                span,
            });
        };
        return Ok(SeparatedList::all_omitted(separators, omitted));
    }

    if items.is_empty() {
        return Ok(match omitted {
            Some(omitted) => SeparatedList::all_omitted(Vec::new(), omitted),
            None => SeparatedList::new(),
        });
    }

    let lower_item = |item: &Node| -> Result<T, LowerError> {
        match (lower::<T>(item)?, omitted) {
            (Some(item), _) => Ok(item),
            (None, Some(omitted)) => Ok(omitted()),
            (None, None) => Err(LowerError::UnexpectedShape {
                found: describe(item),
                expected: "a list item",
                span: span.clone(),
            }),
        }
    };

    if !items.iter().any(is_token_node) {
        let items = items.iter().map(lower_item).collect::<Result<Vec<_>, _>>()?;
        return Ok(SeparatedList::from_items(items));
    }

    let elements = items
        .iter()
        .map(|item| {
            if is_token_node(item) {
                to_syntax_token(item, true).map(Element::Separator)
            } else {
                lower_item(item).map(Element::Item)
            }
        })
        .collect::<Result<Vec<_>, _>>()?;
    SeparatedList::from_elements(elements).map_err(|source| LowerError::List { source, span })
}

/// Lower a list node of tokens, such as modifiers or commas.
///
/// # Errors
///
/// Fails if `node` is not a list or an item is not a token node.
pub fn to_token_list(node: &Node) -> Result<Vec<SyntaxToken>, LowerError> {
    let items = node.items().map_err(|source| LowerError::Node {
        context: describe(node),
        source,
        span: node.span().cloned(),
    })?;
    items
        .iter()
        .filter(|item| !item.is_null())
        .map(|item| to_syntax_token(item, true))
        .collect()
}

fn token_from_kind(value: &AtomValue, node: &Node) -> Result<SyntaxToken, LowerError> {
    let span = node.span().cloned();
    match value {
        AtomValue::CSharp(kind) => {
            SyntaxToken::try_fixed(*kind).map_err(|source| LowerError::Token { source, span })
        }
        AtomValue::Schema(kind) => Err(foreign_token(*kind, span)),
        AtomValue::Workflow(kind) => Err(foreign_token(*kind, span)),
        _ => Err(LowerError::UnexpectedShape {
            found: describe(node),
            expected: "a token",
            span,
        }),
    }
}

fn foreign_token<V: Vocabulary>(kind: V, span: Option<SourceSpan>) -> LowerError {
    LowerError::ForeignToken {
        vocabulary: V::NAME,
        kind: kind.kind_name().to_string(),
        span,
    }
}

fn token_struct(node: &Node) -> Result<SyntaxToken, LowerError> {
    let members = Members::new(node, SyntaxLabel::Token);
    let kind_node = members.get("Kind")?.ok_or_else(|| members.missing("Kind"))?;
    let kind = match kind_node.atom_value() {
        Ok(AtomValue::CSharp(kind)) => *kind,
        Ok(value) => return token_from_kind(value, kind_node),
        Err(source) => return Err(members.node_error("Kind", source)),
    };

    let span = node.span().cloned();
    match kind {
        CsTokenKind::Identifier => Ok(SyntaxToken::identifier(members.text("Text")?)),
        kind if kind.is_literal() => SyntaxToken::literal(kind, members.text("Text")?)
            .map_err(|source| LowerError::Literal { source, span }),
        kind => SyntaxToken::try_fixed(kind).map_err(|source| LowerError::Token { source, span }),
    }
}

/// A short description of a node for error messages.
fn describe(node: &Node) -> String {
    match node.label() {
        Some(label) => format!("`{label}` {} node", node.kind()),
        None => format!("unlabelled {} node", node.kind()),
    }
}

/// Member access on a labelled struct node.
///
/// Null members read as `None` or as an empty list.
pub(crate) struct Members<'a> {
    node: &'a Node,
    label: SyntaxLabel,
}

impl<'a> Members<'a> {
    pub(crate) fn new(node: &'a Node, label: SyntaxLabel) -> Self {
        Self { node, label }
    }

    fn span(&self) -> Option<SourceSpan> {
        self.node.span().cloned()
    }

    fn missing(&self, member: &'static str) -> LowerError {
        LowerError::MissingMember {
            label: self.label,
            member,
            span: self.span(),
        }
    }

    fn node_error(&self, member: &str, source: NodeError) -> LowerError {
        LowerError::Node {
            context: format!("{}.{member}", self.label),
            source,
            span: self.span(),
        }
    }

    /// The member `name`, or `None` if it holds an explicit null.
    ///
    /// An absent member is an error even where the syntax is optional: the
    /// producing grammar writes every member of a label, null or not.
    fn get(&self, name: &'static str) -> Result<Option<&'a Node>, LowerError> {
        match self.node.member(name) {
            Ok(member) if member.is_null() => Ok(None),
            Ok(member) => Ok(Some(member)),
            Err(NodeError::MissingMember { .. }) => Err(self.missing(name)),
            Err(source) => Err(self.node_error(name, source)),
        }
    }

    fn convert<T: FromSyntax>(&self, name: &str, syntax: SyntaxNode) -> Result<T, LowerError> {
        T::try_from(syntax).map_err(|source| LowerError::Shape {
            context: format!("{}.{name}", self.label),
            source,
            span: self.span(),
        })
    }

    pub(crate) fn optional<T: FromSyntax>(&self, name: &'static str) -> Result<Option<T>, LowerError> {
        let Some(member) = self.get(name)? else {
            return Ok(None);
        };
        match to_syntax_node(member)? {
            Some(syntax) => self.convert(name, syntax).map(Some),
            None => Ok(None),
        }
    }

    pub(crate) fn required<T: FromSyntax>(&self, name: &'static str) -> Result<T, LowerError> {
        self.optional(name)?.ok_or_else(|| self.missing(name))
    }

    pub(crate) fn boxed<T: FromSyntax>(&self, name: &'static str) -> Result<Box<T>, LowerError> {
        self.required(name).map(Box::new)
    }

    /// Every item of a list member.
    pub(crate) fn list<T: FromSyntax>(&self, name: &'static str) -> Result<Vec<T>, LowerError> {
        match self.get(name)? {
            Some(member) => to_syntax_list(member, false),
            None => Ok(Vec::new()),
        }
    }

    /// The natively labelled items of a list member.
    pub(crate) fn native_list<T: FromSyntax>(&self, name: &'static str) -> Result<Vec<T>, LowerError> {
        match self.get(name)? {
            Some(member) => to_syntax_list(member, true),
            None => Ok(Vec::new()),
        }
    }

    pub(crate) fn separated<T: FromSyntax>(
        &self,
        name: &'static str,
    ) -> Result<SeparatedList<T>, LowerError> {
        match self.get(name)? {
            Some(member) => to_separated_list(member, None),
            None => Ok(SeparatedList::new()),
        }
    }

    /// A separated list member whose empty positions hold `omitted` items.
    pub(crate) fn separated_or<T: FromSyntax>(
        &self,
        name: &'static str,
        omitted: fn() -> T,
    ) -> Result<SeparatedList<T>, LowerError> {
        match self.get(name)? {
            Some(member) => to_separated_list(member, Some(omitted)),
            None => Ok(SeparatedList::all_omitted(Vec::new(), omitted)),
        }
    }

    pub(crate) fn optional_token(&self, name: &'static str) -> Result<Option<SyntaxToken>, LowerError> {
        self.get(name)?
            .map(|member| to_syntax_token(member, true))
            .transpose()
    }

    pub(crate) fn token(&self, name: &'static str) -> Result<SyntaxToken, LowerError> {
        self.optional_token(name)?.ok_or_else(|| self.missing(name))
    }

    pub(crate) fn tokens(&self, name: &'static str) -> Result<Vec<SyntaxToken>, LowerError> {
        match self.get(name)? {
            Some(member) => to_token_list(member),
            None => Ok(Vec::new()),
        }
    }

    /// The string payload of an atom member.
    pub(crate) fn text(&self, name: &'static str) -> Result<&'a str, LowerError> {
        let member = self.get(name)?.ok_or_else(|| self.missing(name))?;
        let value = member
            .atom_value()
            .map_err(|source| self.node_error(name, source))?;
        value.as_str().ok_or_else(|| LowerError::InvalidValue {
            label: self.label,
            member: name,
            found: value.to_string(),
            span: self.span(),
        })
    }

    /// An identifier given either as a token or as an `_IdentifierName`.
    pub(crate) fn identifier_token(&self, name: &'static str) -> Result<SyntaxToken, LowerError> {
        let member = self.get(name)?.ok_or_else(|| self.missing(name))?;
        if is_token_node(member) {
            return to_syntax_token(member, true);
        }
        let ty: TypeSyntax = self.required(name)?;
        match ty.kind {
            TypeKind::Identifier(token) => Ok(token),
            _ => Err(LowerError::UnexpectedShape {
                found: describe(member),
                expected: "an identifier",
                span: member.span().cloned(),
            }),
        }
    }

    pub(crate) fn invalid(&self, member: &'static str, found: impl Into<String>) -> LowerError {
        LowerError::InvalidValue {
            label: self.label,
            member,
            found: found.into(),
            span: self.span(),
        }
    }
}

fn member(kind: MemberKind) -> SyntaxNode {
    SyntaxNode::Member(MemberDecl::new(kind))
}

fn statement(kind: StmtKind) -> SyntaxNode {
    SyntaxNode::Stmt(Stmt::new(kind))
}

fn expression(kind: ExprKind) -> SyntaxNode {
    SyntaxNode::Expr(Expr::new(kind))
}

fn type_syntax(kind: TypeKind) -> SyntaxNode {
    SyntaxNode::Type(TypeSyntax::new(kind))
}

fn lower_labelled(node: &Node, label: SyntaxLabel) -> Result<SyntaxNode, LowerError> {
    use SyntaxLabel as L;

    let m = Members::new(node, label);
    let lowered = match label {
        L::AllOmitted | L::Token => {
            return Err(LowerError::UnexpectedShape {
                found: describe(node),
                expected: "a syntax node",
                span: node.span().cloned(),
            });
        }

        // Compilation units and directives
        L::CompilationUnit => decl::compilation_unit(&m)?.into(),
        L::ExternAliasDirective => decl::extern_alias(&m)?.into(),
        L::UsingDirective => decl::using_directive(&m)?.into(),
        L::NameEquals => expr::name_equals(&m)?.into(),
        L::NameColon => expr::name_colon(&m)?.into(),
        L::NamespaceDeclaration => member(MemberKind::Namespace(decl::namespace(&m)?)),

        // Attributes
        L::AttributeList => decl::attribute_list(&m)?.into(),
        L::AttributeTargetSpecifier => decl::attribute_target(&m)?.into(),
        L::Attribute => decl::attribute(&m)?.into(),
        L::AttributeArgumentList => decl::attribute_argument_list(&m)?.into(),
        L::AttributeArgument => decl::attribute_argument(&m)?.into(),

        // Type declarations
        L::ClassDeclaration => member(MemberKind::Class(decl::type_decl(&m)?)),
        L::StructDeclaration => member(MemberKind::Struct(decl::type_decl(&m)?)),
        L::InterfaceDeclaration => member(MemberKind::Interface(decl::type_decl(&m)?)),
        L::EnumDeclaration => member(MemberKind::Enum(decl::enum_decl(&m)?)),
        L::EnumMemberDeclaration => decl::enum_member(&m)?.into(),
        L::DelegateDeclaration => member(MemberKind::Delegate(decl::delegate(&m)?)),
        L::TypeParameterList => decl::type_parameter_list(&m)?.into(),
        L::TypeParameter => decl::type_parameter(&m)?.into(),
        L::BaseList => decl::base_list(&m)?.into(),
        L::SimpleBaseType => SyntaxNode::Type(m.required("Type")?),
        L::TypeParameterConstraintClause => decl::constraint_clause(&m)?.into(),
        L::ConstructorConstraint => Constraint::Constructor.into(),
        L::ClassOrStructConstraint => Constraint::ClassOrStruct(m.token("Keyword")?).into(),
        L::TypeConstraint => Constraint::Type(m.required("Type")?).into(),

        // Member declarations
        L::FieldDeclaration => member(MemberKind::Field(decl::field(&m)?)),
        L::EventFieldDeclaration => member(MemberKind::EventField(decl::field(&m)?)),
        L::MethodDeclaration => member(MemberKind::Method(decl::method(&m)?)),
        L::ExplicitInterfaceSpecifier => decl::explicit_interface(&m)?.into(),
        L::OperatorDeclaration => member(MemberKind::Operator(decl::operator(&m)?)),
        L::ConversionOperatorDeclaration => {
            member(MemberKind::ConversionOperator(decl::conversion_operator(&m)?))
        }
        L::ConstructorDeclaration => member(MemberKind::Constructor(decl::constructor(&m)?)),
        L::ConstructorInitializer => decl::constructor_initializer(&m)?.into(),
        L::DestructorDeclaration => member(MemberKind::Destructor(decl::destructor(&m)?)),
        L::PropertyDeclaration => member(MemberKind::Property(decl::property(&m)?)),
        L::EventDeclaration => member(MemberKind::Event(decl::property(&m)?)),
        L::IndexerDeclaration => member(MemberKind::Indexer(decl::indexer(&m)?)),
        L::AccessorList => decl::accessor_list(&m)?.into(),
        L::AccessorDeclaration => decl::accessor(&m)?.into(),
        L::ParameterList => decl::parameter_list(&m, ParameterListKind::Parenthesized)?.into(),
        L::BracketedParameterList => decl::parameter_list(&m, ParameterListKind::Bracketed)?.into(),
        L::Parameter => decl::parameter(&m)?.into(),
        L::EqualsValueClause => stmt::equals_value(&m)?.into(),

        // Statements
        L::Block => SyntaxNode::Block(stmt::block(&m)?),
        L::LocalDeclarationStatement => statement(stmt::local_declaration(&m)?),
        L::VariableDeclaration => stmt::variable_declaration(&m)?.into(),
        L::VariableDeclarator => stmt::variable_declarator(&m)?.into(),
        L::ExpressionStatement => statement(StmtKind::Expression(m.required("Expression")?)),
        L::EmptyStatement => statement(StmtKind::Empty),
        L::LabeledStatement => statement(stmt::labeled(&m)?),
        L::GotoStatement => statement(stmt::goto(&m)?),
        L::BreakStatement => statement(StmtKind::Break),
        L::ContinueStatement => statement(StmtKind::Continue),
        L::ReturnStatement => statement(StmtKind::Return(m.optional("Expression")?)),
        L::ThrowStatement => statement(StmtKind::Throw(m.optional("Expression")?)),
        L::YieldStatement => statement(stmt::yield_statement(&m)?),
        L::WhileStatement => statement(stmt::while_statement(&m)?),
        L::DoStatement => statement(stmt::do_statement(&m)?),
        L::ForStatement => statement(stmt::for_statement(&m)?),
        L::ForEachStatement => statement(stmt::for_each(&m)?),
        L::UsingStatement => statement(stmt::using_statement(&m)?),
        L::FixedStatement => statement(stmt::fixed(&m)?),
        L::CheckedStatement => statement(stmt::checked(&m)?),
        L::UnsafeStatement => statement(StmtKind::Unsafe(m.required("Block")?)),
        L::LockStatement => statement(stmt::lock(&m)?),
        L::IfStatement => statement(stmt::if_statement(&m)?),
        L::ElseClause => stmt::else_clause(&m)?.into(),
        L::SwitchStatement => statement(stmt::switch(&m)?),
        L::SwitchSection => stmt::switch_section(&m)?.into(),
        L::CaseSwitchLabel => SwitchLabel::Case(m.required("Value")?).into(),
        L::DefaultSwitchLabel => SwitchLabel::Default.into(),
        L::TryStatement => statement(stmt::try_statement(&m)?),
        L::CatchClause => stmt::catch_clause(&m)?.into(),
        L::CatchDeclaration => stmt::catch_declaration(&m)?.into(),
        L::CatchFilterClause => stmt::catch_filter(&m)?.into(),
        L::FinallyClause => stmt::finally(&m)?.into(),

        // Expressions
        L::ParenthesizedExpression => expression(ExprKind::Parenthesized(m.boxed("Expression")?)),
        L::PrefixUnaryExpression => expression(expr::prefix_unary(&m)?),
        L::PostfixUnaryExpression => expression(expr::postfix_unary(&m)?),
        L::BinaryExpression => expression(expr::binary(&m)?),
        L::AssignmentExpression => expression(expr::assignment(&m)?),
        L::ConditionalExpression => expression(expr::conditional(&m)?),
        L::CastExpression => expression(expr::cast(&m)?),
        L::LiteralExpression => expression(ExprKind::Literal(m.token("Token")?)),
        L::ThisExpression => expression(ExprKind::This),
        L::BaseExpression => expression(ExprKind::Base),
        L::TypeOfExpression => expression(ExprKind::TypeOf(m.required("Type")?)),
        L::DefaultExpression => expression(ExprKind::Default(m.required("Type")?)),
        L::SizeOfExpression => expression(ExprKind::SizeOf(m.required("Type")?)),
        L::CheckedExpression => expression(expr::checked(&m)?),
        L::InvocationExpression => expression(expr::invocation(&m)?),
        L::ElementAccessExpression => expression(expr::element_access(&m)?),
        L::ArgumentList => expr::argument_list(&m, ArgumentListKind::Parenthesized)?.into(),
        L::BracketedArgumentList => expr::argument_list(&m, ArgumentListKind::Bracketed)?.into(),
        L::Argument => expr::argument(&m)?.into(),
        L::MemberAccessExpression => expression(expr::member_access(&m)?),
        L::ObjectCreationExpression => expression(expr::object_creation(&m)?),
        L::AnonymousObjectCreationExpression => expression(ExprKind::AnonymousObjectCreation {
            initializers: m.separated("Initializers")?,
        }),
        L::AnonymousObjectMemberDeclarator => expr::anonymous_member(&m)?.into(),
        L::ArrayCreationExpression => expression(expr::array_creation(&m)?),
        L::ImplicitArrayCreationExpression => expression(expr::implicit_array_creation(&m)?),
        L::InitializerExpression => expr::initializer(&m)?.into(),
        L::SimpleLambdaExpression => expression(expr::simple_lambda(&m)?),
        L::ParenthesizedLambdaExpression => expression(expr::parenthesized_lambda(&m)?),
        L::AnonymousMethodExpression => expression(expr::anonymous_method(&m)?),
        L::AwaitExpression => expression(ExprKind::Await(m.boxed("Expression")?)),

        // Query comprehensions
        L::QueryExpression => expression(ExprKind::Query(Box::new(query::query_expression(&m)?))),
        L::FromClause => SyntaxNode::FromClause(query::from_clause(&m)?),
        L::QueryBody => query::query_body(&m)?.into(),
        L::LetClause => SyntaxNode::QueryClause(query::let_clause(&m)?),
        L::WhereClause => SyntaxNode::QueryClause(query::where_clause(&m)?),
        L::JoinClause => SyntaxNode::QueryClause(query::join_clause(&m)?),
        L::JoinIntoClause => query::join_into(&m)?.into(),
        L::OrderByClause => SyntaxNode::QueryClause(query::order_by(&m)?),
        L::Ordering => query::ordering(&m)?.into(),
        L::SelectClause => query::select(&m)?.into(),
        L::GroupClause => query::group(&m)?.into(),
        L::QueryContinuation => query::continuation(&m)?.into(),

        // Names and types
        L::IdentifierName => type_syntax(TypeKind::Identifier(m.token("Identifier")?)),
        L::GenericName => type_syntax(types::generic_name(&m)?),
        L::TypeArgumentList => types::type_argument_list(&m)?.into(),
        L::QualifiedName => type_syntax(types::qualified_name(&m)?),
        L::AliasQualifiedName => type_syntax(types::alias_qualified_name(&m)?),
        L::PredefinedType => type_syntax(TypeKind::Predefined(m.token("Keyword")?)),
        L::ArrayType => type_syntax(types::array_type(&m)?),
        L::ArrayRankSpecifier => types::array_rank_specifier(&m)?.into(),
        L::NullableType => type_syntax(TypeKind::Nullable(m.boxed("ElementType")?)),
        L::PointerType => type_syntax(TypeKind::Pointer(m.boxed("ElementType")?)),
        L::OmittedArraySizeExpression => expression(ExprKind::OmittedArraySize),
        L::OmittedTypeArgument => type_syntax(TypeKind::Omitted),
    };
    Ok(lowered)
}
