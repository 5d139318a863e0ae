use crate::language::{
    span::Span,
    token::{Token, TokenKind},
};
use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{alpha1, alphanumeric1, anychar, digit1},
    combinator::recognize,
    multi::many0_count,
    sequence::pair,
    IResult, Parser as NomParser,
};

fn lex_word(input: &str) -> IResult<&str, TokenKind> {
    let (input, word) = recognize(pair(
        alt((alpha1, tag("_"))),
        many0_count(alt((alphanumeric1, tag("_")))),
    ))
    .parse(input)?;
    let kind = TokenKind::keyword(word).unwrap_or_else(|| TokenKind::Identifier(word.to_string()));
    Ok((input, kind))
}

fn lex_integer(input: &str) -> IResult<&str, TokenKind> {
    let (input, digits) = digit1(input)?;
    Ok((input, TokenKind::Integer(digits.to_string())))
}

fn lex_semi(input: &str) -> IResult<&str, TokenKind> {
    let (input, _) = tag(";")(input)?;
    Ok((input, TokenKind::Semi))
}

fn lex_unknown(input: &str) -> IResult<&str, TokenKind> {
    let (input, ch) = anychar(input)?;
    Ok((input, TokenKind::Unknown(ch)))
}

/// Splits `source` into tokens. Never fails: characters outside the
/// language come back as [`TokenKind::Unknown`] for the parser to report.
pub fn tokenize(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut remaining = source;
    let mut offset = 0usize;

    loop {
        let trimmed = remaining.trim_start();
        offset += remaining.len() - trimmed.len();
        remaining = trimmed;

        if remaining.is_empty() {
            break;
        }

        match alt((lex_word, lex_integer, lex_semi, lex_unknown)).parse(remaining) {
            Ok((rest, kind)) => {
                let consumed = remaining.len() - rest.len();
                tokens.push(Token {
                    kind,
                    span: Span::new(offset, offset + consumed),
                });
                offset += consumed;
                remaining = rest;
            }
            Err(_) => break,
        }
    }

    tracing::trace!(count = tokens.len(), "tokenized source");
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source).into_iter().map(|token| token.kind).collect()
    }

    #[test]
    fn keywords_ignore_case() {
        assert_eq!(
            kinds("CLEAR x; Incr y; dEcR z;"),
            vec![
                TokenKind::Clear,
                TokenKind::Identifier("x".into()),
                TokenKind::Semi,
                TokenKind::Incr,
                TokenKind::Identifier("y".into()),
                TokenKind::Semi,
                TokenKind::Decr,
                TokenKind::Identifier("z".into()),
                TokenKind::Semi,
            ]
        );
    }

    #[test]
    fn while_header_tokens() {
        assert_eq!(
            kinds("while X not 0 do;\nend;"),
            vec![
                TokenKind::While,
                TokenKind::Identifier("X".into()),
                TokenKind::Not,
                TokenKind::Integer("0".into()),
                TokenKind::Do,
                TokenKind::Semi,
                TokenKind::End,
                TokenKind::Semi,
            ]
        );
    }

    #[test]
    fn identifiers_may_contain_digits_and_underscores() {
        assert_eq!(
            kinds("copy _tmp1 to Total_2;"),
            vec![
                TokenKind::Copy,
                TokenKind::Identifier("_tmp1".into()),
                TokenKind::To,
                TokenKind::Identifier("Total_2".into()),
                TokenKind::Semi,
            ]
        );
    }

    #[test]
    fn keyword_prefix_is_still_an_identifier() {
        assert_eq!(
            kinds("increment"),
            vec![TokenKind::Identifier("increment".into())]
        );
    }

    #[test]
    fn unknown_characters_are_kept() {
        assert_eq!(
            kinds("incr X+;"),
            vec![
                TokenKind::Incr,
                TokenKind::Identifier("X".into()),
                TokenKind::Unknown('+'),
                TokenKind::Semi,
            ]
        );
    }

    #[test]
    fn spans_cover_token_text() {
        let source = "  clear   Counter;";
        let tokens = tokenize(source);
        let texts: Vec<&str> = tokens
            .iter()
            .map(|token| &source[token.span.start..token.span.end])
            .collect();
        assert_eq!(texts, vec!["clear", "Counter", ";"]);
    }

    #[test]
    fn whitespace_only_source_has_no_tokens() {
        assert!(tokenize(" \n\t\r\n ").is_empty());
    }
}
