//! A hand-written, line-oriented tokeniser for the configuration language.
//!
//! Grounded on `cdcl_engine::builder::dimacs`'s own hand-rolled, line-at-a-time DIMACS
//! scanner: no external parser-combinator crate, just `str::split_whitespace` and a
//! small amount of manual character-class scanning for quoted strings and operators.

use std::rc::Rc;

use crate::error::ParseError;
use crate::symbol::Span;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    Ident(String),
    StringLit(String),
    AndAnd,
    OrOr,
    Bang,
    Equal,
    NotEqual,
    LParen,
    RParen,
    Eof,
}

#[derive(Clone, Debug)]
pub struct LocatedToken {
    pub token: Token,
    pub line: u32,
}

/// Tokenises the whole of `source`, attributing each token to its 1-indexed line.
pub fn tokenize(file: &Rc<str>, source: &str) -> Result<Vec<LocatedToken>, ParseError> {
    let mut tokens = Vec::new();

    for (line_index, raw_line) in source.lines().enumerate() {
        let line = (line_index + 1) as u32;
        let content = match raw_line.find('#') {
            Some(idx) => &raw_line[..idx],
            None => raw_line,
        };

        let mut chars = content.char_indices().peekable();
        while let Some((idx, ch)) = chars.peek().copied() {
            if ch.is_whitespace() {
                chars.next();
                continue;
            }

            match ch {
                '"' => {
                    chars.next();
                    let mut value = String::new();
                    let mut closed = false;
                    while let Some((_, c)) = chars.next() {
                        match c {
                            '"' => {
                                closed = true;
                                break;
                            }
                            '\\' => {
                                if let Some((_, escaped)) = chars.next() {
                                    value.push(escaped);
                                }
                            }
                            other => value.push(other),
                        }
                    }
                    if !closed {
                        return Err(ParseError::new(
                            Span::new(file.clone(), line),
                            "unterminated string literal",
                        ));
                    }
                    tokens.push(LocatedToken {
                        token: Token::StringLit(value),
                        line,
                    });
                }
                '&' if content[idx..].starts_with("&&") => {
                    chars.next();
                    chars.next();
                    tokens.push(LocatedToken {
                        token: Token::AndAnd,
                        line,
                    });
                }
                '|' if content[idx..].starts_with("||") => {
                    chars.next();
                    chars.next();
                    tokens.push(LocatedToken {
                        token: Token::OrOr,
                        line,
                    });
                }
                '!' if content[idx..].starts_with("!=") => {
                    chars.next();
                    chars.next();
                    tokens.push(LocatedToken {
                        token: Token::NotEqual,
                        line,
                    });
                }
                '!' => {
                    chars.next();
                    tokens.push(LocatedToken {
                        token: Token::Bang,
                        line,
                    });
                }
                '=' => {
                    chars.next();
                    tokens.push(LocatedToken {
                        token: Token::Equal,
                        line,
                    });
                }
                '(' => {
                    chars.next();
                    tokens.push(LocatedToken {
                        token: Token::LParen,
                        line,
                    });
                }
                ')' => {
                    chars.next();
                    tokens.push(LocatedToken {
                        token: Token::RParen,
                        line,
                    });
                }
                _ => {
                    let start = idx;
                    let mut end = idx;
                    while let Some((j, c)) = chars.peek().copied() {
                        if c.is_whitespace() || "&|!=()\"".contains(c) {
                            break;
                        }
                        end = j + c.len_utf8();
                        chars.next();
                    }
                    tokens.push(LocatedToken {
                        token: Token::Ident(content[start..end].to_string()),
                        line,
                    });
                }
            }
        }
    }

    tokens.push(LocatedToken {
        token: Token::Eof,
        line: (source.lines().count() + 1) as u32,
    });

    Ok(tokens)
}
