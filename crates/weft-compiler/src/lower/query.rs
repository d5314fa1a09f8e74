//! Query comprehensions.

use weft_syntax::syntax::{
    FromClause, GroupClause, JoinClause, JoinIntoClause, LetClause, OrderByClause, Ordering,
    QueryBody, QueryClause, QueryContinuation, QueryExpression, SelectClause, SelectOrGroup,
    WhereClause,
};

use super::{LowerError, Members};

pub(super) fn query_expression(m: &Members) -> Result<QueryExpression, LowerError> {
    Ok(QueryExpression {
        from_clause: m.required("FromClause")?,
        body: m.required("Body")?,
    })
}

pub(super) fn from_clause(m: &Members) -> Result<FromClause, LowerError> {
    Ok(FromClause {
        ty: m.optional("Type")?,
        identifier: m.token("Identifier")?,
        expression: m.required("Expression")?,
    })
}

pub(super) fn query_body(m: &Members) -> Result<QueryBody, LowerError> {
    Ok(QueryBody {
        clauses: m.list("Clauses")?,
        select_or_group: m.required("SelectOrGroup")?,
        continuation: m.optional("Continuation")?.map(Box::new),
    })
}

pub(super) fn let_clause(m: &Members) -> Result<QueryClause, LowerError> {
    Ok(QueryClause::Let(LetClause {
        identifier: m.token("Identifier")?,
        expression: m.required("Expression")?,
    }))
}

pub(super) fn where_clause(m: &Members) -> Result<QueryClause, LowerError> {
    Ok(QueryClause::Where(WhereClause {
        condition: m.required("Condition")?,
    }))
}

pub(super) fn join_clause(m: &Members) -> Result<QueryClause, LowerError> {
    Ok(QueryClause::Join(JoinClause {
        ty: m.optional("Type")?,
        identifier: m.token("Identifier")?,
        in_expression: m.required("InExpression")?,
        left_expression: m.required("LeftExpression")?,
        right_expression: m.required("RightExpression")?,
        into: m.optional("Into")?,
    }))
}

pub(super) fn join_into(m: &Members) -> Result<JoinIntoClause, LowerError> {
    Ok(JoinIntoClause {
        identifier: m.token("Identifier")?,
    })
}

pub(super) fn order_by(m: &Members) -> Result<QueryClause, LowerError> {
    Ok(QueryClause::OrderBy(OrderByClause {
        orderings: m.separated("Orderings")?,
    }))
}

pub(super) fn ordering(m: &Members) -> Result<Ordering, LowerError> {
    Ok(Ordering {
        expression: m.required("Expression")?,
        direction: m.optional_token("AscendingOrDescendingKeyword")?,
    })
}

pub(super) fn select(m: &Members) -> Result<SelectOrGroup, LowerError> {
    Ok(SelectOrGroup::Select(SelectClause {
        expression: m.required("Expression")?,
    }))
}

pub(super) fn group(m: &Members) -> Result<SelectOrGroup, LowerError> {
    Ok(SelectOrGroup::Group(GroupClause {
        group_expression: m.required("GroupExpression")?,
        by_expression: m.required("ByExpression")?,
    }))
}

pub(super) fn continuation(m: &Members) -> Result<QueryContinuation, LowerError> {
    Ok(QueryContinuation {
        identifier: m.token("Identifier")?,
        body: m.required("Body")?,
    })
}
