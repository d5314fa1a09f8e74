use weft_core::CsTokenKind;

use super::{
    Emit, TokenSink, emit_braced, emit_lines, emit_modifiers, emit_separated, emit_spanned, punct,
    spaced,
};
use crate::syntax::{
    Block, CatchClause, CatchDeclaration, CatchFilterClause, ElseClause, EqualsValueClause,
    FinallyClause, Stmt, StmtKind, SwitchLabel, SwitchSection, VariableDeclaration,
    VariableDeclarator,
};

/// Emit the statement controlled by `if`, `while` and friends on the next
/// line, indented unless it is a block.
fn emit_embedded(sink: &mut dyn TokenSink, statement: &Stmt) {
    sink.newline();
    if statement.is_block() {
        statement.emit(sink);
    } else {
        sink.indent();
        statement.emit(sink);
        sink.dedent();
    }
}

/// `keyword (header)`
fn emit_header(sink: &mut dyn TokenSink, keyword: CsTokenKind, header: impl FnOnce(&mut dyn TokenSink)) {
    punct(sink, keyword);
    sink.space();
    punct(sink, CsTokenKind::OpenParen);
    header(sink);
    punct(sink, CsTokenKind::CloseParen);
}

fn emit_optional_expression(sink: &mut dyn TokenSink, expression: Option<&crate::syntax::Expr>) {
    if let Some(expression) = expression {
        sink.space();
        expression.emit(sink);
    }
}

impl Emit for Stmt {
    fn emit(&self, sink: &mut dyn TokenSink) {
        emit_spanned(sink, self.span.as_ref(), |sink| match &self.kind {
            StmtKind::Block(block) => block.emit(sink),
            StmtKind::LocalDeclaration {
                modifiers,
                declaration,
            } => {
                emit_modifiers(sink, modifiers);
                declaration.emit(sink);
                punct(sink, CsTokenKind::Semicolon);
            }
            StmtKind::Expression(expression) => {
                expression.emit(sink);
                punct(sink, CsTokenKind::Semicolon);
            }
            StmtKind::Empty => punct(sink, CsTokenKind::Semicolon),
            StmtKind::Labeled {
                identifier,
                statement,
            } => {
                sink.token(identifier);
                punct(sink, CsTokenKind::Colon);
                sink.newline();
                statement.emit(sink);
            }
            StmtKind::Goto {
                case_or_default,
                expression,
            } => {
                punct(sink, CsTokenKind::GotoKeyword);
                if let Some(keyword) = case_or_default {
                    sink.space();
                    sink.token(keyword);
                }
                emit_optional_expression(sink, expression.as_ref());
                punct(sink, CsTokenKind::Semicolon);
            }
            StmtKind::Break => {
                punct(sink, CsTokenKind::BreakKeyword);
                punct(sink, CsTokenKind::Semicolon);
            }
            StmtKind::Continue => {
                punct(sink, CsTokenKind::ContinueKeyword);
                punct(sink, CsTokenKind::Semicolon);
            }
            StmtKind::Return(expression) => {
                punct(sink, CsTokenKind::ReturnKeyword);
                emit_optional_expression(sink, expression.as_ref());
                punct(sink, CsTokenKind::Semicolon);
            }
            StmtKind::Throw(expression) => {
                punct(sink, CsTokenKind::ThrowKeyword);
                emit_optional_expression(sink, expression.as_ref());
                punct(sink, CsTokenKind::Semicolon);
            }
            StmtKind::Yield {
                return_or_break,
                expression,
            } => {
                punct(sink, CsTokenKind::YieldKeyword);
                sink.space();
                sink.token(return_or_break);
                emit_optional_expression(sink, expression.as_ref());
                punct(sink, CsTokenKind::Semicolon);
            }
            StmtKind::While {
                condition,
                statement,
            } => {
                emit_header(sink, CsTokenKind::WhileKeyword, |sink| condition.emit(sink));
                emit_embedded(sink, statement);
            }
            StmtKind::Do {
                statement,
                condition,
            } => {
                punct(sink, CsTokenKind::DoKeyword);
                emit_embedded(sink, statement);
                sink.newline();
                emit_header(sink, CsTokenKind::WhileKeyword, |sink| condition.emit(sink));
                punct(sink, CsTokenKind::Semicolon);
            }
            StmtKind::For {
                declaration,
                initializers,
                condition,
                incrementors,
                statement,
            } => {
                emit_header(sink, CsTokenKind::ForKeyword, |sink| {
                    if let Some(declaration) = declaration {
                        declaration.emit(sink);
                    } else {
                        emit_separated(sink, initializers);
                    }
                    punct(sink, CsTokenKind::Semicolon);
                    emit_optional_expression(sink, condition.as_ref());
                    punct(sink, CsTokenKind::Semicolon);
                    if !incrementors.is_empty() {
                        sink.space();
                        emit_separated(sink, incrementors);
                    }
                });
                emit_embedded(sink, statement);
            }
            StmtKind::ForEach {
                ty,
                identifier,
                expression,
                statement,
            } => {
                emit_header(sink, CsTokenKind::ForEachKeyword, |sink| {
                    ty.emit(sink);
                    sink.space();
                    sink.token(identifier);
                    spaced(sink, CsTokenKind::InKeyword);
                    expression.emit(sink);
                });
                emit_embedded(sink, statement);
            }
            StmtKind::Using {
                declaration,
                expression,
                statement,
            } => {
                emit_header(sink, CsTokenKind::UsingKeyword, |sink| {
                    if let Some(declaration) = declaration {
                        declaration.emit(sink);
                    } else if let Some(expression) = expression {
                        expression.emit(sink);
                    }
                });
                emit_embedded(sink, statement);
            }
            StmtKind::Fixed {
                declaration,
                statement,
            } => {
                emit_header(sink, CsTokenKind::FixedKeyword, |sink| declaration.emit(sink));
                emit_embedded(sink, statement);
            }
            StmtKind::Checked { keyword, block } => {
                sink.token(keyword);
                sink.newline();
                block.emit(sink);
            }
            StmtKind::Unsafe(block) => {
                punct(sink, CsTokenKind::UnsafeKeyword);
                sink.newline();
                block.emit(sink);
            }
            StmtKind::Lock {
                expression,
                statement,
            } => {
                emit_header(sink, CsTokenKind::LockKeyword, |sink| expression.emit(sink));
                emit_embedded(sink, statement);
            }
            StmtKind::If {
                condition,
                statement,
                else_clause,
            } => {
                emit_header(sink, CsTokenKind::IfKeyword, |sink| condition.emit(sink));
                emit_embedded(sink, statement);
                if let Some(else_clause) = else_clause {
                    sink.newline();
                    else_clause.emit(sink);
                }
            }
            StmtKind::Switch {
                expression,
                sections,
            } => {
                emit_header(sink, CsTokenKind::SwitchKeyword, |sink| expression.emit(sink));
                sink.newline();
                emit_braced(sink, |sink| emit_lines(sink, sections));
            }
            StmtKind::Try {
                block,
                catches,
                finally,
            } => {
                punct(sink, CsTokenKind::TryKeyword);
                sink.newline();
                block.emit(sink);
                for catch in catches {
                    sink.newline();
                    catch.emit(sink);
                }
                if let Some(finally) = finally {
                    sink.newline();
                    finally.emit(sink);
                }
            }
        });
    }
}

impl Emit for Block {
    fn emit(&self, sink: &mut dyn TokenSink) {
        emit_spanned(sink, self.span.as_ref(), |sink| {
            emit_braced(sink, |sink| emit_lines(sink, &self.statements));
        });
    }
}

impl Emit for VariableDeclaration {
    fn emit(&self, sink: &mut dyn TokenSink) {
        self.ty.emit(sink);
        sink.space();
        emit_separated(sink, &self.variables);
    }
}

impl Emit for VariableDeclarator {
    fn emit(&self, sink: &mut dyn TokenSink) {
        sink.token(&self.identifier);
        if let Some(arguments) = &self.arguments {
            arguments.emit(sink);
        }
        if let Some(initializer) = &self.initializer {
            initializer.emit(sink);
        }
    }
}

impl Emit for EqualsValueClause {
    fn emit(&self, sink: &mut dyn TokenSink) {
        spaced(sink, CsTokenKind::Equals);
        self.value.emit(sink);
    }
}

impl Emit for ElseClause {
    fn emit(&self, sink: &mut dyn TokenSink) {
        punct(sink, CsTokenKind::ElseKeyword);
        if matches!(self.statement.kind, StmtKind::If { .. }) {
            sink.space();
            self.statement.emit(sink);
        } else {
            emit_embedded(sink, &self.statement);
        }
    }
}

impl Emit for SwitchSection {
    fn emit(&self, sink: &mut dyn TokenSink) {
        for (index, label) in self.labels.iter().enumerate() {
            if index > 0 {
                sink.newline();
            }
            label.emit(sink);
        }
        sink.newline();
        sink.indent();
        for (index, statement) in self.statements.iter().enumerate() {
            if index > 0 {
                sink.newline();
            }
            statement.emit(sink);
        }
        sink.dedent();
    }
}

impl Emit for SwitchLabel {
    fn emit(&self, sink: &mut dyn TokenSink) {
        match self {
            SwitchLabel::Case(value) => {
                punct(sink, CsTokenKind::CaseKeyword);
                sink.space();
                value.emit(sink);
            }
            SwitchLabel::Default => punct(sink, CsTokenKind::DefaultKeyword),
        }
        punct(sink, CsTokenKind::Colon);
    }
}

impl Emit for CatchClause {
    fn emit(&self, sink: &mut dyn TokenSink) {
        punct(sink, CsTokenKind::CatchKeyword);
        if let Some(declaration) = &self.declaration {
            sink.space();
            declaration.emit(sink);
        }
        if let Some(filter) = &self.filter {
            sink.space();
            filter.emit(sink);
        }
        sink.newline();
        self.block.emit(sink);
    }
}

impl Emit for CatchDeclaration {
    fn emit(&self, sink: &mut dyn TokenSink) {
        punct(sink, CsTokenKind::OpenParen);
        self.ty.emit(sink);
        if let Some(identifier) = &self.identifier {
            sink.space();
            sink.token(identifier);
        }
        punct(sink, CsTokenKind::CloseParen);
    }
}

impl Emit for CatchFilterClause {
    fn emit(&self, sink: &mut dyn TokenSink) {
        emit_header(sink, CsTokenKind::WhenKeyword, |sink| self.condition.emit(sink));
    }
}

impl Emit for FinallyClause {
    fn emit(&self, sink: &mut dyn TokenSink) {
        punct(sink, CsTokenKind::FinallyKeyword);
        sink.newline();
        self.block.emit(sink);
    }
}
