use crate::language::span::Span;

#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    Identifier(String),
    Integer(String),

    Clear,
    Incr,
    Decr,
    While,
    Not,
    Do,
    End,
    Copy,
    To,

    Semi,

    Unknown(char),
}

impl TokenKind {
    /// Keywords are matched without regard to case.
    pub fn keyword(word: &str) -> Option<TokenKind> {
        let kind = match word.to_ascii_lowercase().as_str() {
            "clear" => TokenKind::Clear,
            "incr" => TokenKind::Incr,
            "decr" => TokenKind::Decr,
            "while" => TokenKind::While,
            "not" => TokenKind::Not,
            "do" => TokenKind::Do,
            "end" => TokenKind::End,
            "copy" => TokenKind::Copy,
            "to" => TokenKind::To,
            _ => return None,
        };
        Some(kind)
    }

    pub fn describe(&self) -> String {
        match self {
            TokenKind::Identifier(name) => format!("identifier `{}`", name),
            TokenKind::Integer(digits) => format!("integer `{}`", digits),
            TokenKind::Clear => "`clear`".into(),
            TokenKind::Incr => "`incr`".into(),
            TokenKind::Decr => "`decr`".into(),
            TokenKind::While => "`while`".into(),
            TokenKind::Not => "`not`".into(),
            TokenKind::Do => "`do`".into(),
            TokenKind::End => "`end`".into(),
            TokenKind::Copy => "`copy`".into(),
            TokenKind::To => "`to`".into(),
            TokenKind::Semi => "`;`".into(),
            TokenKind::Unknown(ch) => format!("character `{}`", ch.escape_debug()),
        }
    }
}
