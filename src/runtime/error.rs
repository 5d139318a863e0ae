use crate::language::span::Span;
use thiserror::Error;

pub type RuntimeResult<T> = Result<T, RuntimeError>;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RuntimeError {
    #[error("line {line}: uninitialized variable `{name}`")]
    UninitializedVariable {
        name: String,
        line: usize,
        span: Span,
    },
    #[error("line {line}: overflow updating `{name}`")]
    Overflow {
        name: String,
        line: usize,
        span: Span,
    },
}

impl RuntimeError {
    pub fn line(&self) -> usize {
        match self {
            RuntimeError::UninitializedVariable { line, .. } | RuntimeError::Overflow { line, .. } => {
                *line
            }
        }
    }

    pub fn span(&self) -> Span {
        match self {
            RuntimeError::UninitializedVariable { span, .. } | RuntimeError::Overflow { span, .. } => {
                *span
            }
        }
    }

    pub fn label(&self) -> String {
        match self {
            RuntimeError::UninitializedVariable { name, .. } => {
                format!("`{}` is read here before it is set", name)
            }
            RuntimeError::Overflow { name, .. } => {
                format!("`{}` would exceed {}", name, u64::MAX)
            }
        }
    }

    pub fn help(&self) -> Option<String> {
        match self {
            RuntimeError::UninitializedVariable { name, .. } => Some(format!(
                "add `clear {};` before this statement or pass {}=<value>",
                name, name
            )),
            RuntimeError::Overflow { .. } => None,
        }
    }
}
