//! The generic node tree.
//!
//! The schema and workflow parsers describe their results, including the
//! host-language fragments embedded in them, as a tree of [`Node`]s. The tree
//! is immutable once built: every payload sits behind an [`Arc`], so cloning a
//! node is cheap and subtrees are shared freely between owners.

use std::{fmt, sync::Arc};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    label::{Label, SyntaxLabel},
    span::{SourceSpan, SpanError},
    token::{CsTokenKind, SchemaTokenKind, WorkflowTokenKind},
};

/// The shape of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Null,
    Atom,
    Box,
    Struct,
    List,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::Null => "null",
            NodeKind::Atom => "atom",
            NodeKind::Box => "box",
            NodeKind::Struct => "struct",
            NodeKind::List => "list",
        };
        f.write_str(name)
    }
}

/// Errors raised when a node is accessed with the wrong expectations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NodeError {
    #[error("`{operation}` expects a {expected} node, found a {found} node")]
    WrongKind {
        expected: NodeKind,
        found: NodeKind,
        operation: &'static str,
    },

    #[error("{label} node has no member `{name}`")]
    MissingMember { name: String, label: String },

    #[error(transparent)]
    Span(#[from] SpanError),
}

/// The payload of an atom node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AtomValue {
    CSharp(CsTokenKind),
    Schema(SchemaTokenKind),
    Workflow(WorkflowTokenKind),
    Str(Arc<str>),
    Int(i64),
    Bool(bool),
    Char(char),
}

impl AtomValue {
    /// The host token kind, if this atom wraps one.
    pub fn cs_token_kind(&self) -> Option<CsTokenKind> {
        match self {
            AtomValue::CSharp(kind) => Some(*kind),
            _ => None,
        }
    }

    /// The string payload, if this atom wraps one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AtomValue::Str(text) => Some(text),
            _ => None,
        }
    }
}

impl From<CsTokenKind> for AtomValue {
    fn from(kind: CsTokenKind) -> Self {
        AtomValue::CSharp(kind)
    }
}

impl From<SchemaTokenKind> for AtomValue {
    fn from(kind: SchemaTokenKind) -> Self {
        AtomValue::Schema(kind)
    }
}

impl From<WorkflowTokenKind> for AtomValue {
    fn from(kind: WorkflowTokenKind) -> Self {
        AtomValue::Workflow(kind)
    }
}

impl From<&str> for AtomValue {
    fn from(text: &str) -> Self {
        AtomValue::Str(Arc::from(text))
    }
}

impl From<String> for AtomValue {
    fn from(text: String) -> Self {
        AtomValue::Str(Arc::from(text))
    }
}

impl From<i64> for AtomValue {
    fn from(value: i64) -> Self {
        AtomValue::Int(value)
    }
}

impl From<bool> for AtomValue {
    fn from(value: bool) -> Self {
        AtomValue::Bool(value)
    }
}

impl From<char> for AtomValue {
    fn from(value: char) -> Self {
        AtomValue::Char(value)
    }
}

impl fmt::Display for AtomValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AtomValue::CSharp(kind) => write!(f, "{kind}"),
            AtomValue::Schema(kind) => write!(f, "{kind}"),
            AtomValue::Workflow(kind) => write!(f, "{kind}"),
            AtomValue::Str(text) => write!(f, "{text:?}"),
            AtomValue::Int(value) => write!(f, "{value}"),
            AtomValue::Bool(value) => write!(f, "{value}"),
            AtomValue::Char(value) => write!(f, "{value:?}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtomNode {
    pub value: AtomValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<Label>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<SourceSpan>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<Label>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<SourceSpan>,
    #[serde(default)]
    pub singleton: Node,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<Label>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<SourceSpan>,
    #[serde(default)]
    pub members: IndexMap<Arc<str>, Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<Label>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<SourceSpan>,
    #[serde(default)]
    pub items: Vec<Node>,
}

/// A node of the generic tree.
///
/// Serialized with an internal `node` tag, so a struct node reads as
/// `{"node": "Struct", "label": "_Block", "members": {...}}`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "node")]
pub enum Node {
    #[default]
    Null,
    Atom(Arc<AtomNode>),
    Box(Arc<BoxNode>),
    Struct(Arc<StructNode>),
    List(Arc<ListNode>),
}

impl Node {
    /// Create an unlabelled atom.
    pub fn atom(value: impl Into<AtomValue>, span: Option<SourceSpan>) -> Node {
        Node::Atom(Arc::new(AtomNode {
            value: value.into(),
            label: None,
            span,
        }))
    }

    /// Create a labelled atom.
    pub fn labelled_atom(
        label: impl Into<Label>,
        value: impl Into<AtomValue>,
        span: Option<SourceSpan>,
    ) -> Node {
        Node::Atom(Arc::new(AtomNode {
            value: value.into(),
            label: Some(label.into()),
            span,
        }))
    }

    /// Create a box around `singleton`.
    pub fn boxed(label: impl Into<Label>, span: Option<SourceSpan>, singleton: Node) -> Node {
        Node::Box(Arc::new(BoxNode {
            label: Some(label.into()),
            span,
            singleton,
        }))
    }

    /// Create a struct node from `(name, member)` pairs, keeping their order.
    pub fn structure<I, K>(label: impl Into<Label>, span: Option<SourceSpan>, members: I) -> Node
    where
        I: IntoIterator<Item = (K, Node)>,
        K: Into<Arc<str>>,
    {
        Node::Struct(Arc::new(StructNode {
            label: Some(label.into()),
            span,
            members: members
                .into_iter()
                .map(|(name, node)| (name.into(), node))
                .collect(),
        }))
    }

    /// Create a list node.
    pub fn list(label: Option<Label>, span: Option<SourceSpan>, items: Vec<Node>) -> Node {
        Node::List(Arc::new(ListNode { label, span, items }))
    }

    /// Create a list node, turning absent items into [`Node::Null`].
    pub fn list_from_options<I>(label: Option<Label>, span: Option<SourceSpan>, items: I) -> Node
    where
        I: IntoIterator<Item = Option<Node>>,
    {
        Node::list(
            label,
            span,
            items.into_iter().map(Option::unwrap_or_default).collect(),
        )
    }

    /// Create the struct shape of a token with variable text.
    ///
    /// The struct is labelled `_Token`, its `Kind` member is an atom of
    /// `kind`, and its `Text` member, when present, is a string atom.
    pub fn token(kind: CsTokenKind, text: Option<&str>, span: Option<SourceSpan>) -> Node {
        let mut members = vec![("Kind", Node::atom(kind, span.clone()))];
        if let Some(text) = text {
            members.push(("Text", Node::atom(text, span.clone())));
        }
        Node::structure(SyntaxLabel::Token, span, members)
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Null => NodeKind::Null,
            Node::Atom(_) => NodeKind::Atom,
            Node::Box(_) => NodeKind::Box,
            Node::Struct(_) => NodeKind::Struct,
            Node::List(_) => NodeKind::List,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Node::Null)
    }

    pub fn label(&self) -> Option<&Label> {
        match self {
            Node::Null => None,
            Node::Atom(atom) => atom.label.as_ref(),
            Node::Box(boxed) => boxed.label.as_ref(),
            Node::Struct(structure) => structure.label.as_ref(),
            Node::List(list) => list.label.as_ref(),
        }
    }

    /// The native syntax label of this node, if it has one.
    pub fn syntax_label(&self) -> Option<SyntaxLabel> {
        self.label().and_then(Label::syntax)
    }

    pub fn span(&self) -> Option<&SourceSpan> {
        match self {
            Node::Null => None,
            Node::Atom(atom) => atom.span.as_ref(),
            Node::Box(boxed) => boxed.span.as_ref(),
            Node::Struct(structure) => structure.span.as_ref(),
            Node::List(list) => list.span.as_ref(),
        }
    }

    fn wrong_kind(&self, expected: NodeKind, operation: &'static str) -> NodeError {
        NodeError::WrongKind {
            expected,
            found: self.kind(),
            operation,
        }
    }

    /// The value of an atom node.
    pub fn atom_value(&self) -> Result<&AtomValue, NodeError> {
        match self {
            Node::Atom(atom) => Ok(&atom.value),
            _ => Err(self.wrong_kind(NodeKind::Atom, "atom_value")),
        }
    }

    /// The wrapped node of a box node.
    pub fn singleton(&self) -> Result<&Node, NodeError> {
        match self {
            Node::Box(boxed) => Ok(&boxed.singleton),
            _ => Err(self.wrong_kind(NodeKind::Box, "singleton")),
        }
    }

    /// The member `name` of a struct node.
    ///
    /// # Errors
    ///
    /// Fails with [`NodeError::MissingMember`] if the struct has no such
    /// member, and with [`NodeError::WrongKind`] if this is not a struct.
    pub fn member(&self, name: &str) -> Result<&Node, NodeError> {
        self.members()?
            .get(name)
            .ok_or_else(|| NodeError::MissingMember {
                name: name.to_string(),
                label: self.label_text(),
            })
    }

    /// The member `name` of a struct node, or `None` if it is absent.
    pub fn optional_member(&self, name: &str) -> Result<Option<&Node>, NodeError> {
        Ok(self.members()?.get(name))
    }

    pub fn members(&self) -> Result<&IndexMap<Arc<str>, Node>, NodeError> {
        match self {
            Node::Struct(structure) => Ok(&structure.members),
            _ => Err(self.wrong_kind(NodeKind::Struct, "members")),
        }
    }

    /// The items of a list node. A null node has no items.
    pub fn items(&self) -> Result<&[Node], NodeError> {
        match self {
            Node::List(list) => Ok(&list.items),
            Node::Null => Ok(&[]),
            _ => Err(self.wrong_kind(NodeKind::List, "items")),
        }
    }

    /// Return a new list with `item` appended.
    ///
    /// `self` is left unchanged. The new list's span covers the old span and
    /// the item's span; a null node is treated as an empty, unlabelled list.
    pub fn add_list_item(&self, item: Node) -> Result<Node, NodeError> {
        let (label, span, items) = match self {
            Node::List(list) => (list.label.clone(), list.span.clone(), list.items.as_slice()),
            Node::Null => (None, None, &[][..]),
            _ => return Err(self.wrong_kind(NodeKind::List, "add_list_item")),
        };

        let span = match (span, item.span()) {
            (Some(span), Some(item_span)) => Some(span.merge_with(item_span)?),
            (Some(span), None) => Some(span),
            (None, item_span) => item_span.cloned(),
        };

        let mut items = items.to_vec();
        items.push(item);
        Ok(Node::list(label, span, items))
    }

    fn label_text(&self) -> String {
        match self.label() {
            Some(label) => format!("`{label}`"),
            None => "unlabelled".to_string(),
        }
    }
}

impl From<CsTokenKind> for Node {
    fn from(kind: CsTokenKind) -> Self {
        Node::atom(kind, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::LineMap;

    fn span(range: std::ops::Range<usize>) -> SourceSpan {
        LineMap::new(&"x".repeat(100)).span("n.xs", range).unwrap()
    }

    fn identifier(name: &str) -> Node {
        Node::structure(
            SyntaxLabel::IdentifierName,
            None,
            [("Identifier", Node::token(CsTokenKind::Identifier, Some(name), None))],
        )
    }

    #[test]
    fn test_accessors_by_kind() {
        let atom = Node::atom(CsTokenKind::Semicolon, None);
        assert_eq!(atom.kind(), NodeKind::Atom);
        assert_eq!(
            atom.atom_value().unwrap(),
            &AtomValue::CSharp(CsTokenKind::Semicolon)
        );

        let boxed = Node::boxed("Wrapper", None, atom.clone());
        assert_eq!(boxed.singleton().unwrap(), &atom);
        assert_eq!(boxed.label().unwrap().as_str(), "Wrapper");

        let empty_box = Node::boxed("Wrapper", None, Node::Null);
        assert!(empty_box.singleton().unwrap().is_null());
    }

    #[test]
    fn test_wrong_kind_access_fails() {
        let atom = Node::atom(1i64, None);
        assert_eq!(
            atom.members().unwrap_err(),
            NodeError::WrongKind {
                expected: NodeKind::Struct,
                found: NodeKind::Atom,
                operation: "members",
            }
        );
        assert!(atom.singleton().is_err());
        assert!(atom.items().is_err());
        assert!(Node::Null.atom_value().is_err());
    }

    #[test]
    fn test_member_lookup() {
        let node = identifier("Order");
        let token = node.member("Identifier").unwrap();
        assert_eq!(token.syntax_label(), Some(SyntaxLabel::Token));
        assert_eq!(
            token.member("Text").unwrap().atom_value().unwrap().as_str(),
            Some("Order")
        );

        let missing = node.member("Name").unwrap_err();
        assert_eq!(
            missing,
            NodeError::MissingMember {
                name: "Name".to_string(),
                label: "`_IdentifierName`".to_string(),
            }
        );
        assert!(node.optional_member("Name").unwrap().is_none());
    }

    #[test]
    fn test_struct_members_keep_order() {
        let node = Node::structure(
            "Decl",
            None,
            [("b", Node::Null), ("a", Node::Null), ("c", Node::Null)],
        );
        let names: Vec<&str> = node.members().unwrap().keys().map(|k| &**k).collect();
        assert_eq!(names, ["b", "a", "c"]);
    }

    #[test]
    fn test_null_has_no_items() {
        assert!(Node::Null.items().unwrap().is_empty());
    }

    #[test]
    fn test_list_from_options() {
        let list = Node::list_from_options(None, None, [Some(identifier("a")), None]);
        let items = list.items().unwrap();
        assert_eq!(items.len(), 2);
        assert!(items[1].is_null());
    }

    #[test]
    fn test_add_list_item_is_non_destructive() {
        let original = Node::list(None, Some(span(0..3)), vec![identifier("a")]);
        let item = Node::atom(CsTokenKind::Comma, Some(span(10..11)));
        let extended = original.add_list_item(item).unwrap();

        assert_eq!(original.items().unwrap().len(), 1);
        assert_eq!(extended.items().unwrap().len(), 2);
        assert_eq!(extended.span().unwrap().range(), 0..11);
        assert_eq!(original.span().unwrap().range(), 0..3);
    }

    #[test]
    fn test_add_list_item_takes_item_span() {
        let list = Node::list(None, None, Vec::new());
        let extended = list
            .add_list_item(Node::atom(CsTokenKind::Comma, Some(span(4..5))))
            .unwrap();
        assert_eq!(extended.span(), Some(&span(4..5)));

        let from_null = Node::Null.add_list_item(identifier("x")).unwrap();
        assert_eq!(from_null.kind(), NodeKind::List);
        assert!(from_null.span().is_none());
    }

    #[test]
    fn test_add_list_item_cross_file_fails() {
        let list = Node::list(None, Some(span(0..1)), Vec::new());
        let foreign = LineMap::new("abc").span("other.xs", 0..1).unwrap();
        let result = list.add_list_item(Node::atom(true, Some(foreign)));
        assert!(matches!(result, Err(NodeError::Span(SpanError::CrossFileMerge { .. }))));
    }

    #[test]
    fn test_token_shape() {
        let token = Node::token(CsTokenKind::ClassKeyword, None, None);
        assert!(token.optional_member("Text").unwrap().is_none());
        assert_eq!(
            token.member("Kind").unwrap().atom_value().unwrap().cs_token_kind(),
            Some(CsTokenKind::ClassKeyword)
        );
    }

    #[test]
    fn test_serde_round_trip() {
        let node = Node::structure(
            SyntaxLabel::ReturnStatement,
            Some(span(2..9)),
            [
                ("Expression", identifier("value")),
                ("Trailing", Node::list(None, None, vec![Node::atom('c', None)])),
            ],
        );
        let json = serde_json::to_string(&node).unwrap();
        assert!(json.contains("\"_ReturnStatement\""));
        let parsed: Node = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, node);
    }

    #[test]
    fn test_deserialize_hand_written_json() {
        let json = r#"{
            "node": "Struct",
            "label": "_PredefinedType",
            "members": {
                "Keyword": { "node": "Atom", "value": { "CSharp": "IntKeyword" } }
            }
        }"#;
        let node: Node = serde_json::from_str(json).unwrap();
        assert_eq!(node.syntax_label(), Some(SyntaxLabel::PredefinedType));
        assert_eq!(
            node.member("Keyword").unwrap().atom_value().unwrap(),
            &AtomValue::CSharp(CsTokenKind::IntKeyword)
        );
    }
}
