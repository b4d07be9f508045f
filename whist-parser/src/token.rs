use std::fmt;

use crate::ParseError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokKind {
    Keyword,
    Ident,
    Number,
    Str,
    Op,
    Colon,
    Dot,
    LParen,
    RParen,
    Comma,
    Newline,
    Indent,
    Dedent,
    Eof,
}

impl fmt::Display for TokKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            TokKind::Keyword => "keyword",
            TokKind::Ident => "identifier",
            TokKind::Number => "number",
            TokKind::Str => "string",
            TokKind::Op => "operator",
            TokKind::Colon => "':'",
            TokKind::Dot => "'.'",
            TokKind::LParen => "'('",
            TokKind::RParen => "')'",
            TokKind::Comma => "','",
            TokKind::Newline => "newline",
            TokKind::Indent => "indent",
            TokKind::Dedent => "dedent",
            TokKind::Eof => "end of input",
        };
        write!(f, "{}", name)
    }
}

/// A lexed token. `line` is zero-based; errors report it one-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokKind,
    pub value: String,
    pub line: usize,
}

impl Token {
    fn new(kind: TokKind, value: impl Into<String>, line: usize) -> Token {
        Token { kind, value: value.into(), line }
    }
}

const KEYWORDS: &[&str] = &[
    "strategy", "game", "play", "bid", "trump", "discard", "leading", "following", "void",
    "when", "default", "pass", "choose", "keep", "drop", "suit", "direction",
    "and", "or", "not", "true", "false",
];

fn is_ident_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

fn is_ident_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

/// Lex a strategy script into a token stream.
///
/// Lines are handled one at a time: comments stripped at the first `#`,
/// blank lines skipped outright, and leading whitespace translated into
/// INDENT/DEDENT tokens against a stack of indent widths. A dedent that
/// lands between two pushed levels is a hard error. Each non-blank line
/// ends with a NEWLINE token and the stream ends with EOF.
pub fn tokenize(source: &str) -> Result<Vec<Token>, ParseError> {
    let lines: Vec<&str> = source.split('\n').collect();
    let mut tokens: Vec<Token> = Vec::new();
    let mut indent_stack: Vec<usize> = vec![0];

    for (line_num, raw_line) in lines.iter().enumerate() {
        let line = match raw_line.find('#') {
            Some(idx) => &raw_line[..idx],
            None => raw_line,
        };
        if line.trim().is_empty() {
            continue;
        }

        let chars: Vec<char> = line.chars().collect();
        let indent = chars
            .iter()
            .take_while(|&&ch| ch == ' ' || ch == '\t')
            .count();

        let current = *indent_stack.last().unwrap_or(&0);
        if indent > current {
            indent_stack.push(indent);
            tokens.push(Token::new(TokKind::Indent, "", line_num));
        } else {
            while indent < *indent_stack.last().unwrap_or(&0) {
                indent_stack.pop();
                tokens.push(Token::new(TokKind::Dedent, "", line_num));
            }
            if indent != *indent_stack.last().unwrap_or(&0) {
                return Err(ParseError::new(
                    format!("inconsistent dedent to column {}", indent),
                    line_num + 1,
                ));
            }
        }

        let mut pos = indent;
        while pos < chars.len() {
            let ch = chars[pos];

            if ch == ' ' || ch == '\t' {
                pos += 1;
                continue;
            }

            if ch == '"' {
                let mut value = String::new();
                pos += 1;
                while pos < chars.len() && chars[pos] != '"' {
                    value.push(chars[pos]);
                    pos += 1;
                }
                pos += 1; // closing quote
                tokens.push(Token::new(TokKind::Str, value, line_num));
                continue;
            }

            // A '-' directly followed by a digit always lexes as a negative
            // number; a bare '-' is a minus operator only after a value.
            let digit_next = pos + 1 < chars.len() && chars[pos + 1].is_ascii_digit();
            if ch.is_ascii_digit() || (ch == '-' && digit_next) {
                let mut value = String::new();
                if ch == '-' {
                    value.push('-');
                    pos += 1;
                }
                while pos < chars.len() && chars[pos].is_ascii_digit() {
                    value.push(chars[pos]);
                    pos += 1;
                }
                tokens.push(Token::new(TokKind::Number, value, line_num));
                continue;
            }

            let two: Option<&str> = match (ch, chars.get(pos + 1)) {
                ('=', Some('=')) => Some("=="),
                ('!', Some('=')) => Some("!="),
                ('>', Some('=')) => Some(">="),
                ('<', Some('=')) => Some("<="),
                _ => None,
            };
            if let Some(op) = two {
                tokens.push(Token::new(TokKind::Op, op, line_num));
                pos += 2;
                continue;
            }
            if ch == '>' || ch == '<' || ch == '+' {
                tokens.push(Token::new(TokKind::Op, ch.to_string(), line_num));
                pos += 1;
                continue;
            }
            if ch == '-' {
                let value_like = matches!(
                    tokens.last().map(|t| t.kind),
                    Some(TokKind::Number) | Some(TokKind::RParen) | Some(TokKind::Ident)
                );
                if value_like {
                    tokens.push(Token::new(TokKind::Op, "-", line_num));
                    pos += 1;
                    continue;
                }
                // Otherwise falls through to the unknown-character skip.
            }

            let single = match ch {
                ':' => Some(TokKind::Colon),
                '.' => Some(TokKind::Dot),
                '(' => Some(TokKind::LParen),
                ')' => Some(TokKind::RParen),
                ',' => Some(TokKind::Comma),
                _ => None,
            };
            if let Some(kind) = single {
                tokens.push(Token::new(kind, ch.to_string(), line_num));
                pos += 1;
                continue;
            }

            if is_ident_start(ch) {
                let mut ident = String::new();
                while pos < chars.len() && is_ident_char(chars[pos]) {
                    ident.push(chars[pos]);
                    pos += 1;
                }
                // Hyphenated names like downtown-noaces lex as one token.
                if pos + 1 < chars.len()
                    && chars[pos] == '-'
                    && chars[pos + 1].is_ascii_alphabetic()
                {
                    ident.push('-');
                    pos += 1;
                    while pos < chars.len() && is_ident_char(chars[pos]) {
                        ident.push(chars[pos]);
                        pos += 1;
                    }
                }
                let kind = if KEYWORDS.contains(&ident.as_str()) {
                    TokKind::Keyword
                } else {
                    TokKind::Ident
                };
                tokens.push(Token::new(kind, ident, line_num));
                continue;
            }

            // Unknown character, skip it.
            pos += 1;
        }

        tokens.push(Token::new(TokKind::Newline, "", line_num));
    }

    while indent_stack.len() > 1 {
        indent_stack.pop();
        tokens.push(Token::new(TokKind::Dedent, "", lines.len()));
    }
    tokens.push(Token::new(TokKind::Eof, "", lines.len()));
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokKind> {
        tokenize(source).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_simple_line() {
        let toks = tokenize("bid: 4").unwrap();
        assert_eq!(toks[0].kind, TokKind::Keyword);
        assert_eq!(toks[0].value, "bid");
        assert_eq!(toks[1].kind, TokKind::Colon);
        assert_eq!(toks[2].kind, TokKind::Number);
        assert_eq!(toks[2].value, "4");
        assert_eq!(toks[3].kind, TokKind::Newline);
        assert_eq!(toks[4].kind, TokKind::Eof);
    }

    #[test]
    fn test_comments_and_blank_lines() {
        let toks = tokenize("# header\n\nbid: 1 # trailing\n").unwrap();
        assert_eq!(
            toks.iter().map(|t| t.kind).collect::<Vec<_>>(),
            vec![TokKind::Keyword, TokKind::Colon, TokKind::Number, TokKind::Newline, TokKind::Eof]
        );
        assert_eq!(toks[0].line, 2);
    }

    #[test]
    fn test_indent_dedent_pairing() {
        let source = "bid:\n  when true:\n    pass\nplay:\n";
        let ks = kinds(source);
        let indents = ks.iter().filter(|&&k| k == TokKind::Indent).count();
        let dedents = ks.iter().filter(|&&k| k == TokKind::Dedent).count();
        assert_eq!(indents, 2);
        assert_eq!(dedents, 2);
    }

    #[test]
    fn test_trailing_dedents_closed_at_eof() {
        let ks = kinds("bid:\n  when true:\n    pass\n");
        assert_eq!(&ks[ks.len() - 3..], &[TokKind::Dedent, TokKind::Dedent, TokKind::Eof]);
    }

    #[test]
    fn test_inconsistent_dedent_is_error() {
        let err = tokenize("bid:\n    pass\n  pass\n").unwrap_err();
        assert_eq!(err.line, 3);
    }

    #[test]
    fn test_hyphenated_identifier() {
        let toks = tokenize("downtown-noaces").unwrap();
        assert_eq!(toks[0].kind, TokKind::Ident);
        assert_eq!(toks[0].value, "downtown-noaces");
    }

    #[test]
    fn test_negative_number_vs_minus() {
        // Digit right after '-' lexes as a negative literal.
        let toks = tokenize("bid -1").unwrap();
        assert_eq!(toks[1].kind, TokKind::Number);
        assert_eq!(toks[1].value, "-1");

        // Spaced '-' after an identifier is subtraction.
        let toks = tokenize("count - x").unwrap();
        assert_eq!(toks[1].kind, TokKind::Op);
        assert_eq!(toks[1].value, "-");
    }

    #[test]
    fn test_two_char_operators() {
        let toks = tokenize("a >= b == c != d <= e").unwrap();
        let ops: Vec<&str> = toks
            .iter()
            .filter(|t| t.kind == TokKind::Op)
            .map(|t| t.value.as_str())
            .collect();
        assert_eq!(ops, vec![">=", "==", "!=", "<="]);
    }

    #[test]
    fn test_string_literal() {
        let toks = tokenize("strategy \"My Strategy\"").unwrap();
        assert_eq!(toks[1].kind, TokKind::Str);
        assert_eq!(toks[1].value, "My Strategy");
    }

    #[test]
    fn test_unknown_characters_skipped() {
        let toks = tokenize("bid @ 1").unwrap();
        assert_eq!(toks[1].kind, TokKind::Number);
    }
}
