use crate::language::span::Span;
use crate::runtime::environment::VarId;

/// A whole program: the top-level statement sequence.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Program {
    pub statements: Vec<Statement>,
}

impl Program {
    pub fn new(statements: Vec<Statement>) -> Self {
        Self { statements }
    }

    /// Number of statements in the tree, loop bodies included.
    pub fn statement_count(&self) -> usize {
        count_statements(&self.statements)
    }
}

fn count_statements(block: &[Statement]) -> usize {
    block
        .iter()
        .map(|statement| match &statement.kind {
            StatementKind::While { body, .. } => 1 + count_statements(body),
            _ => 1,
        })
        .sum()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Statement {
    pub kind: StatementKind,
    /// 1-based source line of the statement's keyword.
    pub line: usize,
    pub span: Span,
}

impl Statement {
    pub fn new(kind: StatementKind, line: usize, span: Span) -> Self {
        Self { kind, line, span }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StatementKind {
    Clear(VarId),
    Incr(VarId),
    Decr(VarId),
    While {
        control: VarId,
        body: Vec<Statement>,
    },
    Copy {
        src: VarId,
        dest: VarId,
    },
    /// `dest += src; src = 0`. Only produced by the optimizer.
    AddClear {
        src: VarId,
        dest: VarId,
    },
}
