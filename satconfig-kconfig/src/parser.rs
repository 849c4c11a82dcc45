//! A recursive-descent parser over [lexer::tokenize]'s output, producing a
//! [SymbolTable](crate::table::SymbolTable).
//!
//! There is no grammar file and no parser-combinator crate in play here, the same way
//! `cdcl_engine`'s own `builder::dimacs` reads a DIMACS file by hand rather than reaching
//! for one: this is a small enough grammar that a hand-written descent is the more
//! legible choice.

use std::rc::Rc;

use crate::error::ParseError;
use crate::expr::Expr;
use crate::lexer::{self, LocatedToken, Token};
use crate::symbol::{Kind, PropertyKind, Span};
use crate::table::{SymbolId, SymbolTable};

/// A property whose `kind` is already known but whose final visibility condition is
/// not, pending the enclosing block's complete `depends on`/`visible if` condition.
struct PendingProperty {
    kind: PropertyKind,
    if_cond: Option<Expr>,
    span: Span,
}

struct Parser {
    tokens: Vec<LocatedToken>,
    pos: usize,
    file: Rc<str>,
    table: SymbolTable,
    /// `depends on`/menu conditions currently in scope, conjoined in order.
    menu_stack: Vec<Expr>,
}

/// Parses a complete configuration-language source file into a [SymbolTable].
pub fn parse(file_name: &str, source: &str) -> Result<SymbolTable, ParseError> {
    let file: Rc<str> = Rc::from(file_name);
    let tokens = lexer::tokenize(&file, source)?;
    log::debug!("{file}: {} tokens", tokens.len());
    let mut parser = Parser {
        tokens,
        pos: 0,
        file,
        table: SymbolTable::new(),
        menu_stack: Vec::new(),
    };
    parser.parse_file()?;
    log::debug!("{}: parsed {} symbols", parser.file, parser.table.len());
    Ok(parser.table)
}

impl Parser {
    fn peek(&self) -> &Token {
        &self.tokens[self.pos].token
    }

    fn peek_line(&self) -> u32 {
        self.tokens[self.pos].line
    }

    fn advance(&mut self) -> Token {
        let tok = self.tokens[self.pos].token.clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        tok
    }

    fn span(&self) -> Span {
        Span::new(self.file.clone(), self.peek_line())
    }

    fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError::new(self.span(), message)
    }

    fn at_keyword(&self, keyword: &str) -> bool {
        matches!(self.peek(), Token::Ident(word) if word == keyword)
    }

    fn eat_keyword(&mut self, keyword: &str) -> Result<(), ParseError> {
        if self.at_keyword(keyword) {
            self.advance();
            Ok(())
        } else {
            Err(self.error(format!("expected '{keyword}'")))
        }
    }

    fn eat_ident(&mut self) -> Result<String, ParseError> {
        match self.advance() {
            Token::Ident(name) => Ok(name),
            other => Err(ParseError::new(
                self.span(),
                format!("expected a name, found {other:?}"),
            )),
        }
    }

    fn eat_string(&mut self) -> Result<String, ParseError> {
        match self.advance() {
            Token::StringLit(value) => Ok(value),
            other => Err(ParseError::new(
                self.span(),
                format!("expected a string literal, found {other:?}"),
            )),
        }
    }

    /// Looks up `name`, declaring it as a forward reference of unknown kind if this is
    /// the first mention (`spec.md` allows `select`/`depends on` to name a symbol
    /// declared later in the file).
    fn resolve(&mut self, name: &str, span: Span) -> SymbolId {
        if let Some(id) = self.table.find(name) {
            return id;
        }
        log::trace!("{span}: forward reference to undeclared symbol '{name}'");
        self.table.declare(Some(name.to_string()), Kind::Unknown, span)
    }

    fn active_condition(&self) -> Option<Expr> {
        self.menu_stack
            .iter()
            .cloned()
            .reduce(|acc, cond| Expr::and(acc, cond))
    }

    fn conjoin(base: Option<Expr>, extra: Option<Expr>) -> Option<Expr> {
        match (base, extra) {
            (Some(a), Some(b)) => Some(Expr::and(a, b)),
            (Some(a), None) => Some(a),
            (None, Some(b)) => Some(b),
            (None, None) => None,
        }
    }

    fn parse_file(&mut self) -> Result<(), ParseError> {
        loop {
            match self.peek() {
                Token::Eof => {
                    if !self.menu_stack.is_empty() {
                        return Err(self.error("unterminated 'menu' block at end of file"));
                    }
                    return Ok(());
                }
                Token::Ident(word) if word == "mainmenu" => {
                    self.advance();
                    self.eat_string()?;
                }
                Token::Ident(word) if word == "config" => self.parse_config()?,
                Token::Ident(word) if word == "choice" => self.parse_choice()?,
                Token::Ident(word) if word == "menu" => self.parse_menu()?,
                Token::Ident(word) if word == "endmenu" => {
                    self.advance();
                    if self.menu_stack.pop().is_none() {
                        return Err(self.error("'endmenu' without matching 'menu'"));
                    }
                }
                other => return Err(self.error(format!("unexpected token {other:?}"))),
            }
        }
    }

    fn parse_menu(&mut self) -> Result<(), ParseError> {
        self.eat_keyword("menu")?;
        self.eat_string()?;
        let mut condition = None;
        while self.at_keyword("depends") {
            self.advance();
            self.eat_keyword("on")?;
            let expr = self.parse_expr()?;
            condition = Some(match condition {
                Some(existing) => Expr::and(existing, expr),
                None => expr,
            });
        }
        self.menu_stack
            .push(condition.unwrap_or(Expr::Symbol(crate::table::SYM_YES)));
        Ok(())
    }

    fn parse_config(&mut self) -> Result<(), ParseError> {
        let span = self.span();
        self.eat_keyword("config")?;
        let name = self.eat_ident()?;
        let id = self.resolve(&name, span.clone());

        let mut depends: Option<Expr> = None;
        let mut pending = Vec::new();
        loop {
            match self.peek().clone() {
                Token::Ident(word) if is_property_keyword(&word) => {
                    self.parse_property(id, &word, &mut depends, &mut pending)?;
                }
                _ => break,
            }
        }
        self.commit_properties(id, depends, pending);
        Ok(())
    }

    /// `depends on`/`visible if` can appear anywhere in a `config`/choice-member block
    /// and gate every property declared there, not just the ones textually after it —
    /// so properties are buffered as [PendingProperty]s and only turned into real
    /// [Property](crate::symbol::Property)s once the block's full dependency condition
    /// is known.
    fn commit_properties(&mut self, id: SymbolId, depends: Option<Expr>, pending: Vec<PendingProperty>) {
        let active = self.active_condition();
        for item in pending {
            let visibility = Self::conjoin(active.clone(), Self::conjoin(depends.clone(), item.if_cond));
            self.table
                .get_mut(id)
                .properties
                .push(crate::symbol::Property::new(item.kind, visibility, item.span));
        }
    }

    fn parse_choice(&mut self) -> Result<(), ParseError> {
        let span = self.span();
        self.eat_keyword("choice")?;
        let name = if matches!(self.peek(), Token::Ident(w) if !is_property_keyword(w) && w != "endchoice")
        {
            Some(self.eat_ident()?)
        } else {
            None
        };
        let choice_id = self.table.declare(name, Kind::Tristate, span);
        self.table.get_mut(choice_id).flags.choice = true;

        let mut depends: Option<Expr> = None;
        let mut pending = Vec::new();
        let mut members = Vec::new();

        loop {
            match self.peek().clone() {
                Token::Ident(word) if word == "endchoice" => {
                    self.advance();
                    break;
                }
                Token::Ident(word) if word == "config" => {
                    let member_span = self.span();
                    self.advance();
                    let member_name = self.eat_ident()?;
                    let member_id = self.resolve(&member_name, member_span);
                    self.table.get_mut(member_id).flags.choice_value = true;
                    members.push(member_id);

                    let mut member_depends: Option<Expr> = None;
                    let mut member_pending = Vec::new();
                    loop {
                        match self.peek().clone() {
                            Token::Ident(word) if is_property_keyword(&word) => {
                                self.parse_property(
                                    member_id,
                                    &word,
                                    &mut member_depends,
                                    &mut member_pending,
                                )?;
                            }
                            _ => break,
                        }
                    }
                    self.commit_properties(member_id, member_depends, member_pending);
                }
                Token::Ident(word) if is_property_keyword(&word) => {
                    self.parse_property(choice_id, &word, &mut depends, &mut pending)?;
                }
                other => return Err(self.error(format!("unexpected token in choice: {other:?}"))),
            }
        }
        self.commit_properties(choice_id, depends.clone(), pending);

        self.table
            .get_mut(choice_id)
            .properties
            .push(crate::symbol::Property::new(
                PropertyKind::Choices(members),
                depends,
                Span::synthetic(),
            ));
        Ok(())
    }

    fn parse_property(
        &mut self,
        id: SymbolId,
        keyword: &str,
        depends: &mut Option<Expr>,
        pending: &mut Vec<PendingProperty>,
    ) -> Result<(), ParseError> {
        let span = self.span();
        match keyword {
            "bool" | "tristate" | "int" | "hex" | "string" => {
                self.advance();
                let kind = match keyword {
                    "bool" => Kind::Bool,
                    "tristate" => Kind::Tristate,
                    "int" => Kind::Int,
                    "hex" => Kind::Hex,
                    "string" => Kind::String,
                    _ => unreachable!(),
                };
                self.table.get_mut(id).kind = kind;

                if let Token::StringLit(_) = self.peek() {
                    let text = self.eat_string()?;
                    let if_cond = self.parse_optional_if()?;
                    pending.push(PendingProperty {
                        kind: PropertyKind::Prompt(text),
                        if_cond,
                        span,
                    });
                }
            }
            "prompt" => {
                self.advance();
                let text = self.eat_string()?;
                let if_cond = self.parse_optional_if()?;
                pending.push(PendingProperty {
                    kind: PropertyKind::Prompt(text),
                    if_cond,
                    span,
                });
            }
            "default" => {
                self.advance();
                let value = self.parse_expr()?;
                let if_cond = self.parse_optional_if()?;
                pending.push(PendingProperty {
                    kind: PropertyKind::Default(value),
                    if_cond,
                    span,
                });
            }
            "select" => {
                self.advance();
                let target_name = self.eat_ident()?;
                let target = self.resolve(&target_name, span.clone());
                let if_cond = self.parse_optional_if()?;
                pending.push(PendingProperty {
                    kind: PropertyKind::Select(target),
                    if_cond,
                    span,
                });
            }
            "range" => {
                self.advance();
                let lo = self.parse_range_bound()?;
                let hi = self.parse_range_bound()?;
                let if_cond = self.parse_optional_if()?;
                pending.push(PendingProperty {
                    kind: PropertyKind::Range(lo, hi),
                    if_cond,
                    span,
                });
            }
            "env" => {
                self.advance();
                let var = self.eat_string()?;
                pending.push(PendingProperty {
                    kind: PropertyKind::Env(var),
                    if_cond: None,
                    span,
                });
            }
            "depends" => {
                self.advance();
                self.eat_keyword("on")?;
                let expr = self.parse_expr()?;
                *depends = Some(match depends.take() {
                    Some(existing) => Expr::and(existing, expr),
                    None => expr,
                });
            }
            "optional" => {
                self.advance();
                self.table.get_mut(id).flags.optional = true;
            }
            "visible" => {
                self.advance();
                self.eat_keyword("if")?;
                let expr = self.parse_expr()?;
                *depends = Some(match depends.take() {
                    Some(existing) => Expr::and(existing, expr),
                    None => expr,
                });
            }
            other => return Err(self.error(format!("unknown property keyword '{other}'"))),
        }
        Ok(())
    }

    fn parse_optional_if(&mut self) -> Result<Option<Expr>, ParseError> {
        if self.at_keyword("if") {
            self.advance();
            Ok(Some(self.parse_expr()?))
        } else {
            Ok(None)
        }
    }

    fn parse_range_bound(&mut self) -> Result<Expr, ParseError> {
        let span = self.span();
        match self.advance() {
            Token::Ident(name) => {
                if let Some(id) = self.table.find(&name) {
                    Ok(Expr::Symbol(id))
                } else {
                    Ok(Expr::Symbol(self.table.intern_constant(&name)))
                }
            }
            Token::StringLit(s) => Ok(Expr::Symbol(self.table.intern_constant(&s))),
            other => Err(ParseError::new(
                span,
                format!("expected a range bound, found {other:?}"),
            )),
        }
    }

    fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        self.parse_or()
    }

    fn parse_or(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.parse_and()?;
        while matches!(self.peek(), Token::OrOr) {
            self.advance();
            let rhs = self.parse_and()?;
            lhs = Expr::or(lhs, rhs);
        }
        Ok(lhs)
    }

    fn parse_and(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.parse_unary()?;
        while matches!(self.peek(), Token::AndAnd) {
            self.advance();
            let rhs = self.parse_unary()?;
            lhs = Expr::and(lhs, rhs);
        }
        Ok(lhs)
    }

    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        if matches!(self.peek(), Token::Bang) {
            self.advance();
            let inner = self.parse_unary()?;
            Ok(Expr::not(inner))
        } else {
            self.parse_atom()
        }
    }

    fn parse_atom(&mut self) -> Result<Expr, ParseError> {
        let span = self.span();
        match self.advance() {
            Token::LParen => {
                let inner = self.parse_expr()?;
                match self.advance() {
                    Token::RParen => Ok(inner),
                    other => Err(ParseError::new(
                        self.span(),
                        format!("expected ')', found {other:?}"),
                    )),
                }
            }
            Token::Ident(name) => {
                let id = self.resolve(&name, span.clone());
                match self.peek() {
                    Token::Equal => {
                        self.advance();
                        let rhs = self.parse_comparand()?;
                        Ok(Expr::Equal(id, rhs))
                    }
                    Token::NotEqual => {
                        self.advance();
                        let rhs = self.parse_comparand()?;
                        Ok(Expr::Unequal(id, rhs))
                    }
                    _ => Ok(Expr::Symbol(id)),
                }
            }
            other => Err(ParseError::new(
                span,
                format!("expected an expression, found {other:?}"),
            )),
        }
    }

    fn parse_comparand(&mut self) -> Result<SymbolId, ParseError> {
        let span = self.span();
        match self.advance() {
            Token::Ident(name) => {
                if let Some(id) = self.table.find(&name) {
                    Ok(id)
                } else {
                    Ok(self.table.intern_constant(&name))
                }
            }
            Token::StringLit(s) => Ok(self.table.intern_constant(&s)),
            other => Err(ParseError::new(
                span,
                format!("expected a name or string literal, found {other:?}"),
            )),
        }
    }
}

fn is_property_keyword(word: &str) -> bool {
    matches!(
        word,
        "bool"
            | "tristate"
            | "int"
            | "hex"
            | "string"
            | "prompt"
            | "default"
            | "select"
            | "depends"
            | "range"
            | "optional"
            | "visible"
            | "env"
    )
}
