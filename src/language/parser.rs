use crate::language::{
    ast::{Program, Statement, StatementKind},
    errors::{SyntaxError, SyntaxErrors},
    lexer::tokenize,
    span::{LineIndex, Span},
    token::{Token, TokenKind},
};
use crate::runtime::environment::{VarId, VariableStore};

/// Parses `source` into a statement tree, resolving every variable name
/// through `store`. All syntax errors are collected before giving up.
pub fn parse(source: &str, store: &mut VariableStore) -> Result<Program, SyntaxErrors> {
    let tokens = tokenize(source);
    let mut parser = AstParser::new(source, &tokens, store);
    let program = parser.parse_program();
    if parser.errors.is_empty() {
        tracing::debug!(
            statements = program.statement_count(),
            variables = parser.store.len(),
            "parsed program"
        );
        Ok(program)
    } else {
        tracing::debug!(errors = parser.errors.len(), "parse failed");
        Err(SyntaxErrors::new(parser.errors))
    }
}

struct AstParser<'a, 's> {
    tokens: &'a [Token],
    position: usize,
    last_span: Option<Span>,
    lines: LineIndex,
    store: &'s mut VariableStore,
    errors: Vec<SyntaxError>,
}

impl<'a, 's> AstParser<'a, 's> {
    fn new(source: &str, tokens: &'a [Token], store: &'s mut VariableStore) -> Self {
        Self {
            tokens,
            position: 0,
            last_span: None,
            lines: LineIndex::new(source),
            store,
            errors: Vec::new(),
        }
    }

    fn parse_program(&mut self) -> Program {
        let mut statements = Vec::new();
        while let Some(lex) = self.peek() {
            if lex.kind == TokenKind::End {
                let span = lex.span;
                self.advance();
                self.eat(&TokenKind::Semi);
                self.report_error(
                    SyntaxError::new("`end` without a matching `while`", span)
                        .with_label("no loop is open here"),
                );
                continue;
            }
            self.parse_into(&mut statements);
        }
        Program::new(statements)
    }

    fn parse_into(&mut self, block: &mut Vec<Statement>) {
        match self.parse_statement() {
            Ok(statement) => block.push(statement),
            Err(err) => {
                self.report_error(err);
                self.synchronize();
            }
        }
    }

    fn parse_statement(&mut self) -> Result<Statement, SyntaxError> {
        let Some(lex) = self.advance() else {
            return Err(SyntaxError::new(
                "unexpected end of input while reading statement",
                self.eof_span(),
            ));
        };
        let span = lex.span;
        let line = self.lines.line_of(span.start);

        let kind = match &lex.kind {
            TokenKind::Clear => StatementKind::Clear(self.expect_variable("clear")?),
            TokenKind::Incr => StatementKind::Incr(self.expect_variable("incr")?),
            TokenKind::Decr => StatementKind::Decr(self.expect_variable("decr")?),
            TokenKind::Copy => {
                let src = self.expect_variable("copy")?;
                self.consume(&TokenKind::To, "expected `to` after the source variable")
                    .map_err(|err| err.with_help("syntax: copy <source> to <destination>;"))?;
                let dest = self.expect_variable("to")?;
                StatementKind::Copy { src, dest }
            }
            TokenKind::While => return self.parse_while(span, line),
            other => {
                return Err(SyntaxError::new(
                    format!("expected a statement, found {}", other.describe()),
                    span,
                )
                .with_label("statements start with clear, incr, decr, copy or while"));
            }
        };
        self.expect_semi()?;
        Ok(Statement::new(kind, line, span))
    }

    fn parse_while(&mut self, span: Span, line: usize) -> Result<Statement, SyntaxError> {
        let control = self.expect_variable("while")?;
        self.consume(&TokenKind::Not, "expected `not` after the loop variable")
            .map_err(|err| err.with_help(while_syntax_help()))?;
        self.expect_zero()?;
        self.consume(&TokenKind::Do, "expected `do` after `not 0`")
            .map_err(|err| err.with_help(while_syntax_help()))?;
        self.expect_semi()?;

        let mut body = Vec::new();
        loop {
            match self.peek() {
                Some(lex) if lex.kind == TokenKind::End => {
                    self.advance();
                    break;
                }
                Some(_) => self.parse_into(&mut body),
                None => {
                    return Err(SyntaxError::new("`while` loop is never closed", span)
                        .with_label("this loop has no matching `end`")
                        .with_help("close the loop with `end;`"));
                }
            }
        }
        self.expect_semi()?;

        Ok(Statement::new(
            StatementKind::While { control, body },
            line,
            span,
        ))
    }

    fn expect_variable(&mut self, after: &str) -> Result<VarId, SyntaxError> {
        let message = format!("expected a variable name after `{}`", after);
        match self.peek() {
            Some(Token {
                kind: TokenKind::Identifier(name),
                ..
            }) => {
                let name = name.clone();
                self.advance();
                Ok(self.store.lookup_or_create(&name))
            }
            Some(lex) => Err(SyntaxError::new(
                format!("{}, found {}", message, lex.kind.describe()),
                lex.span,
            )
            .with_label("variable name expected here")),
            None => Err(SyntaxError::new(
                format!("{}, reached end of input", message),
                self.eof_span(),
            )),
        }
    }

    fn expect_zero(&mut self) -> Result<(), SyntaxError> {
        match self.peek() {
            Some(Token {
                kind: TokenKind::Integer(digits),
                span,
            }) => {
                if digits.bytes().all(|digit| digit == b'0') {
                    self.advance();
                    Ok(())
                } else {
                    Err(SyntaxError::new("loops can only test against 0", *span)
                        .with_label("must be 0")
                        .with_help(while_syntax_help()))
                }
            }
            _ => self
                .consume(&TokenKind::Integer("0".into()), "expected `0` after `not`")
                .map_err(|err| err.with_help(while_syntax_help())),
        }
    }

    fn expect_semi(&mut self) -> Result<(), SyntaxError> {
        let hint = self.span_after_last();
        match self.peek() {
            Some(lex) if lex.kind == TokenKind::Semi => {
                self.advance();
                Ok(())
            }
            Some(lex) => Err(SyntaxError::new(
                format!("expected `;`, found {}", lex.kind.describe()),
                hint,
            )
            .with_label("`;` expected here")),
            None => Err(SyntaxError::new("expected `;`, reached end of input", hint)
                .with_label("`;` expected here")),
        }
    }

    fn consume(&mut self, expected: &TokenKind, message: &str) -> Result<(), SyntaxError> {
        match self.peek() {
            Some(lex) if &lex.kind == expected => {
                self.advance();
                Ok(())
            }
            Some(lex) => Err(SyntaxError::new(
                format!("{}, found {}", message, lex.kind.describe()),
                lex.span,
            )),
            None => Err(SyntaxError::new(
                format!("{}, reached end of input", message),
                self.eof_span(),
            )),
        }
    }

    fn eat(&mut self, expected: &TokenKind) -> bool {
        match self.peek() {
            Some(lex) if &lex.kind == expected => {
                self.advance();
                true
            }
            _ => false,
        }
    }

    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.position)
    }

    fn advance(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.position);
        if let Some(lex) = token {
            self.position += 1;
            self.last_span = Some(lex.span);
        }
        token
    }

    fn eof_span(&self) -> Span {
        match self.last_span.or_else(|| self.tokens.last().map(|t| t.span)) {
            Some(span) => Span::new(span.end, span.end),
            None => Span::default(),
        }
    }

    fn span_after_last(&self) -> Span {
        match self.last_span {
            Some(span) => Span::new(span.end, span.end),
            None => Span::default(),
        }
    }

    fn report_error(&mut self, err: SyntaxError) {
        self.errors.push(err);
    }

    /// Skips past the next `;`, or up to an `end` that belongs to an
    /// enclosing loop.
    fn synchronize(&mut self) {
        while let Some(lex) = self.peek() {
            match lex.kind {
                TokenKind::Semi => {
                    self.advance();
                    break;
                }
                TokenKind::End => break,
                _ => {
                    self.advance();
                }
            }
        }
    }
}

fn while_syntax_help() -> String {
    "syntax: while <variable> not 0 do; ... end;".into()
}
