//! A lazy, forward-only tokenizer.
//!
//! [`Lexer::next_token`] produces one token per call and keeps yielding the
//! end-of-input token once the buffer is exhausted. A lexer is single-use; a
//! fresh one must be constructed to re-scan. The eager [`tokenize`] helper
//! drains a whole buffer at once for consumers that want the full list (the
//! driver's JSON dump, mostly).

use crate::token::{lookup_identifier, Token, TokenKind};

pub struct Lexer {
    input: Vec<char>,
    /// Index of the character in `ch`.
    position: usize,
    /// Index of the next character to read.
    read_position: usize,
    /// Current character, `None` once the buffer is exhausted.
    ch: Option<char>,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        let mut lexer = Self {
            input: input.chars().collect(),
            position: 0,
            read_position: 0,
            ch: None,
        };
        lexer.read_char();
        lexer
    }

    /// Scans and returns the next token.
    ///
    /// Single- and double-character tokens advance the cursor here, after
    /// classification; identifier and number runs advance it inside their own
    /// branch, so those return early.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let token = match self.ch {
            Some('=') => {
                if self.peek_char() == Some('=') {
                    self.read_char();
                    Token::new(TokenKind::Eq, "==")
                } else {
                    Token::new(TokenKind::Assign, "=")
                }
            }
            Some('!') => {
                if self.peek_char() == Some('=') {
                    self.read_char();
                    Token::new(TokenKind::NotEq, "!=")
                } else {
                    Token::new(TokenKind::Bang, "!")
                }
            }
            Some('+') => Token::new(TokenKind::Plus, "+"),
            Some('-') => Token::new(TokenKind::Minus, "-"),
            Some('*') => Token::new(TokenKind::Asterisk, "*"),
            Some('/') => Token::new(TokenKind::Slash, "/"),
            Some('<') => Token::new(TokenKind::Lt, "<"),
            Some('>') => Token::new(TokenKind::Gt, ">"),
            Some(',') => Token::new(TokenKind::Comma, ","),
            Some(';') => Token::new(TokenKind::Semicolon, ";"),
            Some('(') => Token::new(TokenKind::LParen, "("),
            Some(')') => Token::new(TokenKind::RParen, ")"),
            Some('{') => Token::new(TokenKind::LBrace, "{"),
            Some('}') => Token::new(TokenKind::RBrace, "}"),
            Some(ch) if is_letter(ch) => {
                let literal = self.read_identifier();
                return Token::new(lookup_identifier(&literal), literal);
            }
            Some(ch) if ch.is_ascii_digit() => {
                // Numeric conversion is deferred to the parser.
                return Token::new(TokenKind::Int, self.read_number());
            }
            Some(ch) => Token::new(TokenKind::Illegal, ch.to_string()),
            None => Token::new(TokenKind::Eof, ""),
        };

        self.read_char();
        token
    }

    fn read_char(&mut self) {
        self.ch = self.input.get(self.read_position).copied();
        self.position = self.read_position;
        self.read_position += 1;
    }

    fn peek_char(&self) -> Option<char> {
        self.input.get(self.read_position).copied()
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.ch, Some(' ' | '\t' | '\n' | '\r')) {
            self.read_char();
        }
    }

    fn read_identifier(&mut self) -> String {
        let start = self.position;
        while self.ch.is_some_and(is_letter) {
            self.read_char();
        }
        self.input[start..self.position].iter().collect()
    }

    fn read_number(&mut self) -> String {
        let start = self.position;
        while self.ch.is_some_and(|ch| ch.is_ascii_digit()) {
            self.read_char();
        }
        self.input[start..self.position].iter().collect()
    }
}

fn is_letter(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

/// Eagerly tokenizes a whole buffer, ending with the end-of-input token.
#[tracing::instrument(level = "trace", skip_all)]
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut lexer = Lexer::new(input);
    let mut tokens = vec![];
    loop {
        let token = lexer.next_token();
        let done = token.kind == TokenKind::Eof;
        tokens.push(token);
        if done {
            return tokens;
        }
    }
}
