//! Workflow language token kinds.

token_vocabulary! {
    /// Token kinds of the workflow language.
    pub enum WorkflowTokenKind ("workflow", escape = '@') {
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
            Dot => ".",
            Equals => "=",
            EqualsGreaterThan => "=>",
            MinusGreaterThan => "->",
            Question => "?",
            Hash => "#",
        }
        keywords {
            ActivityKeyword => "activity",
            AliasKeyword => "alias",
            BreakKeyword => "break",
            CancellableKeyword => "cancellable",
            CaseKeyword => "case",
            CatchKeyword => "catch",
            CompensateKeyword => "compensate",
            ConfirmKeyword => "confirm",
            ContractKeyword => "contract",
            ContinueKeyword => "continue",
            DefaultKeyword => "default",
            DelayKeyword => "delay",
            DoKeyword => "do",
            ElseKeyword => "else",
            FinallyKeyword => "finally",
            FlowKeyword => "flow",
            ForEachKeyword => "foreach",
            FifKeyword => "fif",
            FSwitchKeyword => "fswitch",
            GotoKeyword => "goto",
            IfKeyword => "if",
            ImportKeyword => "import",
            InKeyword => "in",
            NamespaceKeyword => "namespace",
            OnKeyword => "on",
            ParallelKeyword => "parallel",
            PersistKeyword => "persist",
            PickKeyword => "pick",
            ReceiveKeyword => "receive",
            ReplyKeyword => "reply",
            RethrowKeyword => "rethrow",
            SendKeyword => "send",
            SequenceKeyword => "sequence",
            StateKeyword => "state",
            StateMachineKeyword => "statemachine",
            SwitchKeyword => "switch",
            TerminateKeyword => "terminate",
            ThrowKeyword => "throw",
            TransactedKeyword => "transacted",
            TryKeyword => "try",
            WhileKeyword => "while",
        }
        contextual {
            CompletedKeyword => "completed",
            FaultedKeyword => "faulted",
            CanceledKeyword => "canceled",
            TimeoutKeyword => "timeout",
            ToKeyword => "to",
        }
        variable {
            Identifier,
            CSharpExpression,
            CSharpStatement,
            CSharpBlock,
            EndOfFile,
        }
    }
}

impl WorkflowTokenKind {
    /// Whether `self` introduces a compound control-flow construct.
    pub fn is_control_flow(self) -> bool {
        matches!(
            self,
            WorkflowTokenKind::IfKeyword
                | WorkflowTokenKind::WhileKeyword
                | WorkflowTokenKind::DoKeyword
                | WorkflowTokenKind::ForEachKeyword
                | WorkflowTokenKind::SwitchKeyword
                | WorkflowTokenKind::ParallelKeyword
                | WorkflowTokenKind::PickKeyword
                | WorkflowTokenKind::TryKeyword
                | WorkflowTokenKind::StateMachineKeyword
                | WorkflowTokenKind::FifKeyword
                | WorkflowTokenKind::FSwitchKeyword
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Vocabulary;

    #[test]
    fn test_workflow_keywords() {
        assert!(WorkflowTokenKind::is_keyword("statemachine"));
        assert!(!WorkflowTokenKind::is_keyword("timeout"));
        assert_eq!(
            WorkflowTokenKind::from_fixed_text("=>"),
            Some(WorkflowTokenKind::EqualsGreaterThan)
        );
    }

    #[test]
    fn test_control_flow() {
        assert!(WorkflowTokenKind::ParallelKeyword.is_control_flow());
        assert!(!WorkflowTokenKind::DelayKeyword.is_control_flow());
    }
}
