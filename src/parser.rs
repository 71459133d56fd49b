//! A two-token-lookahead recursive-descent parser with precedence climbing
//! for expressions.
//!
//! Parsing never aborts: every failure appends one [`ParseError`] and the
//! parser keeps moving forward token by token, leaving the affected tree
//! slots empty. `parse_program` therefore always returns a tree; the caller
//! decides whether the accumulated error list is acceptable.

use serde::Serialize;
use tracing::trace;

use crate::ast::{BlockStatement, Expression, Identifier, Program, Statement};
use crate::lexer::Lexer;
use crate::token::{Token, TokenKind};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error, Serialize)]
pub enum ParseError {
    #[error("expected next token to be {expected}, got {actual} instead")]
    UnexpectedToken {
        expected: TokenKind,
        actual: TokenKind,
    },
    #[error("no prefix parse function for {kind} found")]
    MissingPrefixParseFn { kind: TokenKind },
    #[error("could not parse {literal} as integer")]
    InvalidIntegerLiteral { literal: String },
}

/// Binding power of an operator; a higher variant binds tighter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Precedence {
    Lowest,
    /// `==` and `!=`
    Equals,
    /// `<` and `>`
    LessGreater,
    /// `+` and `-`
    Sum,
    /// `*` and `/`
    Product,
    /// Unary `-` and `!`
    Prefix,
    /// Reserved for call expressions.
    #[allow(dead_code)]
    Call,
}

impl Precedence {
    /// Binding power of `kind` used as an infix operator, `None` for token
    /// kinds with no infix role.
    fn of_infix(kind: TokenKind) -> Option<Precedence> {
        match kind {
            TokenKind::Eq | TokenKind::NotEq => Some(Precedence::Equals),
            TokenKind::Lt | TokenKind::Gt => Some(Precedence::LessGreater),
            TokenKind::Plus | TokenKind::Minus => Some(Precedence::Sum),
            TokenKind::Asterisk | TokenKind::Slash => Some(Precedence::Product),
            _ => None,
        }
    }
}

pub struct Parser {
    lexer: Lexer,
    cur_token: Token,
    peek_token: Token,
    errors: Vec<ParseError>,
}

impl Parser {
    pub fn new(mut lexer: Lexer) -> Self {
        let cur_token = lexer.next_token();
        let peek_token = lexer.next_token();
        Self {
            lexer,
            cur_token,
            peek_token,
            errors: vec![],
        }
    }

    /// Parses the whole token stream into a program.
    ///
    /// Always returns a program; statements whose sub-parses failed come back
    /// partially filled, with the failures recorded in [`Parser::errors`].
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn parse_program(&mut self) -> Program {
        let mut program = Program { statements: vec![] };

        while !self.cur_token_is(TokenKind::Eof) {
            if let Some(statement) = self.parse_statement() {
                program.statements.push(statement);
            }
            self.next_token();
        }

        program
    }

    /// The diagnostics accumulated so far, in source order.
    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    fn next_token(&mut self) {
        self.cur_token = std::mem::replace(&mut self.peek_token, self.lexer.next_token());
    }

    fn cur_token_is(&self, kind: TokenKind) -> bool {
        self.cur_token.kind == kind
    }

    fn peek_token_is(&self, kind: TokenKind) -> bool {
        self.peek_token.kind == kind
    }

    /// Advances if the peek token has the expected kind; otherwise records a
    /// diagnostic and stays put.
    fn expect_peek(&mut self, expected: TokenKind) -> bool {
        if self.peek_token_is(expected) {
            self.next_token();
            true
        } else {
            self.errors.push(ParseError::UnexpectedToken {
                expected,
                actual: self.peek_token.kind,
            });
            false
        }
    }

    fn parse_statement(&mut self) -> Option<Statement> {
        trace!(cur_token = ?self.cur_token, "Parsing statement");

        match self.cur_token.kind {
            TokenKind::Let => Some(self.parse_let_statement()),
            TokenKind::Return => Some(self.parse_return_statement()),
            _ => Some(self.parse_expression_statement()),
        }
    }

    fn parse_let_statement(&mut self) -> Statement {
        let token = self.cur_token.clone();
        let mut name = None;
        let mut value = None;

        if !self.expect_peek(TokenKind::Ident) {
            return Statement::Let { token, name, value };
        }
        name = Some(self.parse_identifier());

        if !self.expect_peek(TokenKind::Assign) {
            return Statement::Let { token, name, value };
        }

        // Permissive value loop: keeps re-parsing until the semicolon, so
        // extra tokens overwrite `value` instead of raising an error.
        self.next_token();
        while !self.cur_token_is(TokenKind::Semicolon) && !self.cur_token_is(TokenKind::Eof) {
            value = self.parse_expression(Precedence::Lowest);
            self.next_token();
        }

        Statement::Let { token, name, value }
    }

    fn parse_return_statement(&mut self) -> Statement {
        let token = self.cur_token.clone();
        let mut value = None;

        self.next_token();
        while !self.cur_token_is(TokenKind::Semicolon) && !self.cur_token_is(TokenKind::Eof) {
            value = self.parse_expression(Precedence::Lowest);
            self.next_token();
        }

        Statement::Return { token, value }
    }

    fn parse_expression_statement(&mut self) -> Statement {
        let token = self.cur_token.clone();
        let value = self.parse_expression(Precedence::Lowest);

        // Semicolons are optional statement terminators, not separators.
        if self.peek_token_is(TokenKind::Semicolon) {
            self.next_token();
        }

        Statement::Expression { token, value }
    }

    fn parse_block_statement(&mut self) -> BlockStatement {
        let token = self.cur_token.clone();
        let mut statements = vec![];

        self.next_token();
        while !self.cur_token_is(TokenKind::RBrace) && !self.cur_token_is(TokenKind::Eof) {
            if let Some(statement) = self.parse_statement() {
                statements.push(statement);
            }
            self.next_token();
        }

        BlockStatement { token, statements }
    }

    fn parse_expression(&mut self, min_precedence: Precedence) -> Option<Expression> {
        trace!(cur_token = ?self.cur_token, ?min_precedence, "Parsing expression");

        let mut left = self.parse_prefix()?;

        while !self.peek_token_is(TokenKind::Semicolon) {
            match Precedence::of_infix(self.peek_token.kind) {
                Some(precedence) if min_precedence < precedence => {
                    self.next_token();
                    left = self.parse_infix_expression(left);
                }
                _ => break,
            }
        }

        Some(left)
    }

    /// Prefix dispatch over the current token kind.
    ///
    /// The token-kind set is closed, so this is an exhaustive `match` rather
    /// than a registry of handler closures.
    fn parse_prefix(&mut self) -> Option<Expression> {
        match self.cur_token.kind {
            TokenKind::Ident => Some(Expression::Identifier(self.parse_identifier())),
            TokenKind::Int => self.parse_integer_literal(),
            TokenKind::True | TokenKind::False => Some(Expression::BooleanLiteral {
                token: self.cur_token.clone(),
                value: self.cur_token_is(TokenKind::True),
            }),
            TokenKind::Bang | TokenKind::Minus => Some(self.parse_prefix_expression()),
            TokenKind::LParen => self.parse_grouped_expression(),
            TokenKind::If => self.parse_if_expression(),
            TokenKind::Function => self.parse_function_literal(),
            kind => {
                self.errors.push(ParseError::MissingPrefixParseFn { kind });
                None
            }
        }
    }

    fn parse_identifier(&self) -> Identifier {
        Identifier {
            token: self.cur_token.clone(),
            value: self.cur_token.literal.clone(),
        }
    }

    fn parse_integer_literal(&mut self) -> Option<Expression> {
        let token = self.cur_token.clone();
        match token.literal.parse::<i64>() {
            Ok(value) => Some(Expression::IntegerLiteral { token, value }),
            Err(_) => {
                self.errors.push(ParseError::InvalidIntegerLiteral {
                    literal: token.literal,
                });
                None
            }
        }
    }

    fn parse_prefix_expression(&mut self) -> Expression {
        let token = self.cur_token.clone();
        let operator = token.literal.clone();

        self.next_token();
        let right = self.parse_expression(Precedence::Prefix).map(Box::new);

        Expression::Prefix {
            token,
            operator,
            right,
        }
    }

    /// Builds an infix expression around `left`. The right side is parsed at
    /// the operator's own precedence, which makes equal-precedence chains
    /// group left-to-right.
    fn parse_infix_expression(&mut self, left: Expression) -> Expression {
        let token = self.cur_token.clone();
        let operator = token.literal.clone();
        let precedence = Precedence::of_infix(token.kind).unwrap_or(Precedence::Lowest);

        self.next_token();
        let right = self.parse_expression(precedence).map(Box::new);

        Expression::Infix {
            token,
            operator,
            left: Box::new(left),
            right,
        }
    }

    fn parse_grouped_expression(&mut self) -> Option<Expression> {
        self.next_token();
        let expression = self.parse_expression(Precedence::Lowest);

        if !self.expect_peek(TokenKind::RParen) {
            return None;
        }

        expression
    }

    fn parse_if_expression(&mut self) -> Option<Expression> {
        let token = self.cur_token.clone();

        if !self.expect_peek(TokenKind::LParen) {
            return None;
        }
        self.next_token();
        let condition = self.parse_expression(Precedence::Lowest).map(Box::new);

        if !self.expect_peek(TokenKind::RParen) {
            return None;
        }
        if !self.expect_peek(TokenKind::LBrace) {
            return None;
        }
        let consequence = self.parse_block_statement();

        let mut alternative = None;
        if self.peek_token_is(TokenKind::Else) {
            self.next_token();
            if !self.expect_peek(TokenKind::LBrace) {
                return None;
            }
            alternative = Some(self.parse_block_statement());
        }

        Some(Expression::If {
            token,
            condition,
            consequence,
            alternative,
        })
    }

    fn parse_function_literal(&mut self) -> Option<Expression> {
        let token = self.cur_token.clone();

        if !self.expect_peek(TokenKind::LParen) {
            return None;
        }
        let parameters = self.parse_function_parameters()?;

        if !self.expect_peek(TokenKind::LBrace) {
            return None;
        }
        let body = self.parse_block_statement();

        Some(Expression::FunctionLiteral {
            token,
            parameters,
            body,
        })
    }

    fn parse_function_parameters(&mut self) -> Option<Vec<Identifier>> {
        let mut parameters = vec![];

        if self.peek_token_is(TokenKind::RParen) {
            self.next_token();
            return Some(parameters);
        }

        self.next_token();
        parameters.push(self.parse_identifier());

        while self.peek_token_is(TokenKind::Comma) {
            self.next_token();
            self.next_token();
            parameters.push(self.parse_identifier());
        }

        if !self.expect_peek(TokenKind::RParen) {
            return None;
        }

        Some(parameters)
    }
}
