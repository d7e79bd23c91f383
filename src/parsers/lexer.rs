//! Tokenizer for the declaration header of a Go source file
//!
//! Only the tokens that can appear in a package clause and import
//! declarations are distinguished; everything else collapses into
//! [`TokenKind::Other`]. Comments and whitespace are skipped.

use std::iter::Peekable;
use std::str::Chars;

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum TokenKind {
    Ident(String),
    /// Interpreted (`"..."`) or raw (`` `...` ``) string, contents unescaped
    StringLit(String),
    /// A string literal that reached end of line or input without closing
    UnterminatedString,
    LParen,
    RParen,
    Semicolon,
    Dot,
    Other(char),
    Eof,
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Token {
    pub kind: TokenKind,
    /// 1-based line the token starts on
    pub line: usize,
}

pub struct Lexer<'a> {
    source: Peekable<Chars<'a>>,
    line: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Lexer {
            source: source.chars().peekable(),
            line: 1,
        }
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.source.next();
        if ch == Some('\n') {
            self.line += 1;
        }
        ch
    }

    /// Skip whitespace and comments. An unterminated block comment runs to EOF.
    fn skip_trivia(&mut self) {
        loop {
            match self.source.peek() {
                Some(&ch) if ch.is_whitespace() => {
                    self.advance();
                }
                Some(&'/') => {
                    let mut lookahead = self.source.clone();
                    lookahead.next();
                    match lookahead.peek() {
                        Some(&'/') => {
                            while let Some(&ch) = self.source.peek() {
                                if ch == '\n' {
                                    break;
                                }
                                self.advance();
                            }
                        }
                        Some(&'*') => {
                            self.advance();
                            self.advance();
                            let mut prev = '\0';
                            while let Some(ch) = self.advance() {
                                if prev == '*' && ch == '/' {
                                    break;
                                }
                                prev = ch;
                            }
                        }
                        _ => return,
                    }
                }
                _ => return,
            }
        }
    }

    fn interpreted_string(&mut self) -> TokenKind {
        self.advance();
        let mut value = String::new();
        while let Some(&ch) = self.source.peek() {
            match ch {
                '"' => {
                    self.advance();
                    return TokenKind::StringLit(value);
                }
                '\n' => return TokenKind::UnterminatedString,
                '\\' => {
                    self.advance();
                    match self.advance() {
                        Some('n') => value.push('\n'),
                        Some('t') => value.push('\t'),
                        Some('\n') | None => return TokenKind::UnterminatedString,
                        Some(other) => value.push(other),
                    }
                }
                _ => {
                    value.push(ch);
                    self.advance();
                }
            }
        }
        TokenKind::UnterminatedString
    }

    fn raw_string(&mut self) -> TokenKind {
        self.advance();
        let mut value = String::new();
        while let Some(ch) = self.advance() {
            if ch == '`' {
                return TokenKind::StringLit(value);
            }
            value.push(ch);
        }
        TokenKind::UnterminatedString
    }

    /// Rune literals are skipped as a single opaque token
    fn rune(&mut self) -> TokenKind {
        self.advance();
        while let Some(&ch) = self.source.peek() {
            match ch {
                '\'' => {
                    self.advance();
                    break;
                }
                '\n' => break,
                '\\' => {
                    self.advance();
                    self.advance();
                }
                _ => {
                    self.advance();
                }
            }
        }
        TokenKind::Other('\'')
    }

    pub fn next_token(&mut self) -> Token {
        self.skip_trivia();
        let line = self.line;
        let kind = match self.source.peek() {
            Some(&ch) if ch.is_alphabetic() || ch == '_' => {
                let mut ident = String::new();
                while let Some(&ch) = self.source.peek() {
                    if !(ch.is_alphanumeric() || ch == '_') {
                        break;
                    }
                    ident.push(ch);
                    self.advance();
                }
                TokenKind::Ident(ident)
            }
            Some(&'"') => self.interpreted_string(),
            Some(&'`') => self.raw_string(),
            Some(&'\'') => self.rune(),
            Some(&'(') => {
                self.advance();
                TokenKind::LParen
            }
            Some(&')') => {
                self.advance();
                TokenKind::RParen
            }
            Some(&';') => {
                self.advance();
                TokenKind::Semicolon
            }
            Some(&'.') => {
                self.advance();
                TokenKind::Dot
            }
            Some(&ch) => {
                self.advance();
                TokenKind::Other(ch)
            }
            None => TokenKind::Eof,
        };
        Token { kind, line }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.next_token();
        if token.kind == TokenKind::Eof {
            None
        } else {
            Some(token)
        }
    }
}
