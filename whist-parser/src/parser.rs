use crate::ast::{Action, BinOp, Expr, PlaySection, Rule, RuleBlock, StrategyAst};
use crate::token::{TokKind, Token};
use crate::ParseError;

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    eof: Token,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Parser {
        let line = tokens.last().map(|t| t.line).unwrap_or(0);
        Parser {
            tokens,
            pos: 0,
            eof: Token { kind: TokKind::Eof, value: String::new(), line },
        }
    }

    fn peek(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or(&self.eof)
    }

    fn advance(&mut self) -> Token {
        let tok = self.peek().clone();
        self.pos += 1;
        tok
    }

    fn expect(&mut self, kind: TokKind) -> Result<Token, ParseError> {
        let tok = self.advance();
        if tok.kind != kind {
            return Err(ParseError::new(
                format!("expected {}, got {} \"{}\"", kind, tok.kind, tok.value),
                tok.line + 1,
            ));
        }
        Ok(tok)
    }

    fn expect_keyword(&mut self, word: &str) -> Result<Token, ParseError> {
        let tok = self.advance();
        if tok.kind != TokKind::Keyword || tok.value != word {
            return Err(ParseError::new(
                format!("expected keyword \"{}\", got {} \"{}\"", word, tok.kind, tok.value),
                tok.line + 1,
            ));
        }
        Ok(tok)
    }

    fn at_keyword(&self, word: &str) -> bool {
        let tok = self.peek();
        tok.kind == TokKind::Keyword && tok.value == word
    }

    fn skip_newlines(&mut self) {
        while self.peek().kind == TokKind::Newline {
            self.advance();
        }
    }

    fn at_end(&self) -> bool {
        self.peek().kind == TokKind::Eof
    }

    pub fn parse(mut self) -> Result<StrategyAst, ParseError> {
        let mut ast = StrategyAst::default();

        self.skip_newlines();

        if self.at_keyword("strategy") {
            self.advance();
            ast.name = self.expect(TokKind::Str)?.value;
            self.skip_newlines();
        }

        if self.at_keyword("game") {
            self.advance();
            self.expect(TokKind::Colon)?;
            ast.game = self.expect(TokKind::Ident)?.value;
            self.skip_newlines();
        }

        while !self.at_end() {
            self.skip_newlines();
            if self.at_end() {
                break;
            }
            if self.at_keyword("play") {
                self.advance();
                self.expect(TokKind::Colon)?;
                self.skip_newlines();
                ast.play = Some(self.parse_play_section()?);
            } else if self.at_keyword("bid") {
                self.advance();
                self.expect(TokKind::Colon)?;
                self.skip_newlines();
                ast.bid = Some(self.parse_rule_block()?);
            } else if self.at_keyword("trump") {
                self.advance();
                self.expect(TokKind::Colon)?;
                self.skip_newlines();
                ast.trump = Some(self.parse_rule_block()?);
            } else if self.at_keyword("discard") {
                self.advance();
                self.expect(TokKind::Colon)?;
                self.skip_newlines();
                ast.discard = Some(self.parse_rule_block()?);
            } else {
                // Skip anything unrecognized at the top level.
                self.advance();
            }
        }

        Ok(ast)
    }

    fn parse_play_section(&mut self) -> Result<PlaySection, ParseError> {
        let mut section = PlaySection::default();

        self.expect(TokKind::Indent)?;
        self.skip_newlines();

        while self.peek().kind != TokKind::Dedent && !self.at_end() {
            self.skip_newlines();
            if self.peek().kind == TokKind::Dedent || self.at_end() {
                break;
            }

            let tok = self.peek();
            if tok.kind == TokKind::Keyword || tok.kind == TokKind::Ident {
                let name = tok.value.clone();
                self.advance();
                self.expect(TokKind::Colon)?;
                self.skip_newlines();
                match name.as_str() {
                    "leading" => section.leading = Some(self.parse_rule_block()?),
                    "following" => section.following = Some(self.parse_rule_block()?),
                    "void" => section.when_void = Some(self.parse_rule_block()?),
                    _ => {}
                }
            } else {
                self.advance();
            }
        }

        if self.peek().kind == TokKind::Dedent {
            self.advance();
        }
        Ok(section)
    }

    fn parse_rule_block(&mut self) -> Result<RuleBlock, ParseError> {
        let mut block = RuleBlock::default();

        self.expect(TokKind::Indent)?;
        self.skip_newlines();

        while self.peek().kind != TokKind::Dedent && !self.at_end() {
            self.skip_newlines();
            if self.peek().kind == TokKind::Dedent || self.at_end() {
                break;
            }

            if self.at_keyword("when") {
                self.advance();
                let condition = self.parse_expression()?;
                self.expect(TokKind::Colon)?;
                self.skip_newlines();
                let action = self.parse_action_body()?;
                block.rules.push(Rule { condition, action });
            } else if self.at_keyword("default") {
                self.advance();
                self.expect(TokKind::Colon)?;
                self.skip_newlines();
                block.default_action = Some(self.parse_action_body()?);
            } else {
                self.advance();
            }

            self.skip_newlines();
        }

        if self.peek().kind == TokKind::Dedent {
            self.advance();
        }
        Ok(block)
    }

    /// The action after a rule's colon, either inline on the same line or as
    /// a one-action indented block.
    fn parse_action_body(&mut self) -> Result<Action, ParseError> {
        if self.peek().kind != TokKind::Indent {
            return self.parse_action();
        }
        self.advance();
        self.skip_newlines();
        let action = self.parse_action()?;
        self.skip_newlines();
        while self.peek().kind != TokKind::Dedent
            && !self.at_end()
            && self.peek().kind != TokKind::Keyword
        {
            if self.peek().kind == TokKind::Newline {
                self.advance();
                continue;
            }
            break;
        }
        if self.peek().kind == TokKind::Dedent {
            self.advance();
        }
        Ok(action)
    }

    fn parse_action(&mut self) -> Result<Action, ParseError> {
        if self.at_keyword("play") {
            self.advance();
            let expr = self.parse_expression()?;
            self.skip_newlines();
            return Ok(Action::Play(expr));
        }

        if self.at_keyword("bid") {
            self.advance();
            let next = self.peek();
            if next.kind == TokKind::Ident && next.value == "take" {
                self.advance();
                self.skip_newlines();
                // "bid take" is the dealer claiming the standing high bid.
                return Ok(Action::Bid(Expr::Number(-1)));
            }
            let expr = self.parse_expression()?;
            self.skip_newlines();
            return Ok(Action::Bid(expr));
        }

        if self.at_keyword("pass") {
            self.advance();
            self.skip_newlines();
            return Ok(Action::Pass);
        }

        if self.at_keyword("keep") {
            self.advance();
            let expr = self.parse_expression()?;
            self.skip_newlines();
            return Ok(Action::Keep(expr));
        }

        if self.at_keyword("drop") {
            self.advance();
            let expr = self.parse_expression()?;
            self.skip_newlines();
            return Ok(Action::Drop(expr));
        }

        if self.at_keyword("choose") {
            self.advance();
            self.expect_keyword("suit")?;
            self.expect(TokKind::Colon)?;
            let suit = self.parse_expression()?;
            self.expect_keyword("direction")?;
            self.expect(TokKind::Colon)?;
            let direction = self.parse_expression()?;
            self.skip_newlines();
            return Ok(Action::Choose { suit, direction });
        }

        let tok = self.peek();
        Err(ParseError::new(
            format!(
                "expected action (play/bid/pass/choose/keep/drop), got {} \"{}\"",
                tok.kind, tok.value
            ),
            tok.line + 1,
        ))
    }

    fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        self.parse_or()
    }

    fn parse_or(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_and()?;
        while self.at_keyword("or") {
            self.advance();
            let right = self.parse_and()?;
            left = Expr::Binary { op: BinOp::Or, left: Box::new(left), right: Box::new(right) };
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_comparison()?;
        while self.at_keyword("and") {
            self.advance();
            let right = self.parse_comparison()?;
            left = Expr::Binary { op: BinOp::And, left: Box::new(left), right: Box::new(right) };
        }
        Ok(left)
    }

    fn parse_comparison(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_additive()?;
        loop {
            let op = if self.peek().kind == TokKind::Op {
                match self.peek().value.as_str() {
                    "==" => Some(BinOp::Eq),
                    "!=" => Some(BinOp::Ne),
                    ">" => Some(BinOp::Gt),
                    "<" => Some(BinOp::Lt),
                    ">=" => Some(BinOp::Ge),
                    "<=" => Some(BinOp::Le),
                    _ => None,
                }
            } else {
                None
            };
            let Some(op) = op else { break };
            self.advance();
            let right = self.parse_additive()?;
            left = Expr::Binary { op, left: Box::new(left), right: Box::new(right) };
        }
        Ok(left)
    }

    fn parse_additive(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_unary()?;
        loop {
            let op = if self.peek().kind == TokKind::Op {
                match self.peek().value.as_str() {
                    "+" => Some(BinOp::Add),
                    "-" => Some(BinOp::Sub),
                    _ => None,
                }
            } else {
                None
            };
            let Some(op) = op else { break };
            self.advance();
            let right = self.parse_unary()?;
            left = Expr::Binary { op, left: Box::new(left), right: Box::new(right) };
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        if self.at_keyword("not") {
            self.advance();
            let operand = self.parse_unary()?;
            return Ok(Expr::Not(Box::new(operand)));
        }
        self.parse_postfix()
    }

    fn parse_postfix(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.parse_primary()?;

        while self.peek().kind == TokKind::Dot {
            self.advance();
            let prop = self.advance();
            if prop.kind != TokKind::Ident && prop.kind != TokKind::Keyword {
                return Err(ParseError::new(
                    format!(
                        "expected property name after '.', got {} \"{}\"",
                        prop.kind, prop.value
                    ),
                    prop.line + 1,
                ));
            }
            let args = if self.peek().kind == TokKind::LParen {
                self.advance();
                Some(self.parse_args()?)
            } else {
                None
            };
            expr = Expr::Property { object: Box::new(expr), property: prop.value, args };
        }

        Ok(expr)
    }

    /// Argument list after an already-consumed '(' through the ')'.
    fn parse_args(&mut self) -> Result<Vec<Expr>, ParseError> {
        let mut args = Vec::new();
        if self.peek().kind != TokKind::RParen {
            args.push(self.parse_expression()?);
            while self.peek().kind == TokKind::Comma {
                self.advance();
                args.push(self.parse_expression()?);
            }
        }
        self.expect(TokKind::RParen)?;
        Ok(args)
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let tok = self.peek().clone();

        match tok.kind {
            TokKind::LParen => {
                self.advance();
                let expr = self.parse_expression()?;
                self.expect(TokKind::RParen)?;
                Ok(expr)
            }
            TokKind::Number => {
                self.advance();
                let value = tok.value.parse::<i64>().map_err(|_| {
                    ParseError::new(format!("bad number \"{}\"", tok.value), tok.line + 1)
                })?;
                Ok(Expr::Number(value))
            }
            TokKind::Str => {
                self.advance();
                Ok(Expr::Str(tok.value))
            }
            TokKind::Keyword if tok.value == "true" => {
                self.advance();
                Ok(Expr::Bool(true))
            }
            TokKind::Keyword if tok.value == "false" => {
                self.advance();
                Ok(Expr::Bool(false))
            }
            TokKind::Ident | TokKind::Keyword => {
                self.advance();
                if self.peek().kind == TokKind::LParen {
                    self.advance();
                    let args = self.parse_args()?;
                    Ok(Expr::Call { name: tok.value, args })
                } else {
                    Ok(Expr::Variable(tok.value))
                }
            }
            _ => Err(ParseError::new(
                format!("unexpected token {} \"{}\"", tok.kind, tok.value),
                tok.line + 1,
            )),
        }
    }
}
