//! Lexer (tokenizer) for console statement text.
//!
//! The lexer only needs enough SQL to find statement boundaries, leading
//! keywords and table references. Operators are passed through as single
//! characters; SQL semantics are left to the backend.

use crate::{ParseError, ParseResult, Quote, Span};

/// Token types.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// Bare word: identifier or keyword, exactly as written.
    Word(String),
    /// Delimited identifier (`[..]`, backtick or double quote), without delimiters.
    Quoted(String, Quote),
    /// Single-quoted string literal, unescaped.
    String(String),
    /// Numeric literal, as written.
    Number(String),

    // Symbols
    Semicolon, // ;
    Comma,     // ,
    Dot,       // .
    LParen,    // (
    RParen,    // )
    Star,      // *
    /// Any other operator or punctuation character.
    Symbol(char),

    // End of input
    Eof,
}

impl TokenKind {
    pub fn name(&self) -> String {
        match self {
            TokenKind::Word(w) => format!("'{}'", w),
            TokenKind::Quoted(q, _) => format!("identifier '{}'", q),
            TokenKind::String(_) => "string".to_string(),
            TokenKind::Number(n) => format!("number {}", n),
            TokenKind::Semicolon => "';'".to_string(),
            TokenKind::Comma => "','".to_string(),
            TokenKind::Dot => "'.'".to_string(),
            TokenKind::LParen => "'('".to_string(),
            TokenKind::RParen => "')'".to_string(),
            TokenKind::Star => "'*'".to_string(),
            TokenKind::Symbol(c) => format!("'{}'", c),
            TokenKind::Eof => "end of input".to_string(),
        }
    }

    /// Returns true if this is a bare word equal to `keyword`, ignoring case.
    pub fn is_keyword(&self, keyword: &str) -> bool {
        matches!(self, TokenKind::Word(w) if w.eq_ignore_ascii_case(keyword))
    }

    /// Identifier text for words and delimited identifiers.
    pub fn ident(&self) -> Option<&str> {
        match self {
            TokenKind::Word(w) => Some(w),
            TokenKind::Quoted(q, _) => Some(q),
            _ => None,
        }
    }
}

/// A token with its span.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn eof(pos: usize, line: usize, column: usize) -> Self {
        Self {
            kind: TokenKind::Eof,
            span: Span::new(pos, pos, line, column),
        }
    }
}

/// Lexer state.
pub struct Lexer<'a> {
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    pos: usize,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.char_indices().peekable(),
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    /// Tokenize all input into a vector of tokens, ending with `Eof`.
    pub fn tokenize(mut self) -> ParseResult<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let is_eof = matches!(token.kind, TokenKind::Eof);
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        Ok(tokens)
    }

    fn span_from(&self, start: usize, start_line: usize, start_col: usize) -> Span {
        Span::new(start, self.pos, start_line, start_col)
    }

    fn peek_char(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    fn next_char(&mut self) -> Option<char> {
        if let Some((pos, c)) = self.chars.next() {
            self.pos = pos + c.len_utf8();
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
            Some(c)
        } else {
            None
        }
    }

    /// Skip whitespace and comments.
    fn skip_trivia(&mut self) -> ParseResult<()> {
        loop {
            match self.peek_char() {
                Some(c) if c.is_whitespace() => {
                    self.next_char();
                }
                Some('-') => {
                    let mut lookahead = self.chars.clone();
                    lookahead.next();
                    if !matches!(lookahead.peek(), Some((_, '-'))) {
                        return Ok(());
                    }
                    while let Some(c) = self.peek_char() {
                        if c == '\n' {
                            break;
                        }
                        self.next_char();
                    }
                }
                Some('/') => {
                    let mut lookahead = self.chars.clone();
                    lookahead.next();
                    if !matches!(lookahead.peek(), Some((_, '*'))) {
                        return Ok(());
                    }
                    let (start, start_line, start_col) = (self.pos, self.line, self.column);
                    self.next_char();
                    self.next_char();
                    let mut prev = '\0';
                    loop {
                        match self.next_char() {
                            Some('/') if prev == '*' => break,
                            Some(c) => prev = c,
                            None => {
                                return Err(ParseError::new(
                                    "unterminated block comment",
                                    self.span_from(start, start_line, start_col),
                                ));
                            }
                        }
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    fn next_token(&mut self) -> ParseResult<Token> {
        self.skip_trivia()?;

        let start = self.pos;
        let start_line = self.line;
        let start_col = self.column;

        let Some(c) = self.next_char() else {
            return Ok(Token::eof(self.pos, self.line, self.column));
        };

        let kind = match c {
            ';' => TokenKind::Semicolon,
            ',' => TokenKind::Comma,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '*' => TokenKind::Star,
            '.' => {
                if self.peek_char().is_some_and(|c| c.is_ascii_digit()) {
                    self.scan_number(c)
                } else {
                    TokenKind::Dot
                }
            }
            '\'' => self.scan_string(start, start_line, start_col)?,
            '[' => self.scan_delimited(']', Quote::Bracket, start, start_line, start_col)?,
            '`' => self.scan_delimited('`', Quote::Backtick, start, start_line, start_col)?,
            '"' => self.scan_delimited('"', Quote::Double, start, start_line, start_col)?,
            '_' | 'a'..='z' | 'A'..='Z' => self.scan_word(c),
            '0'..='9' => self.scan_number(c),
            other => TokenKind::Symbol(other),
        };

        Ok(Token::new(
            kind,
            self.span_from(start, start_line, start_col),
        ))
    }

    fn scan_string(
        &mut self,
        start: usize,
        start_line: usize,
        start_col: usize,
    ) -> ParseResult<TokenKind> {
        let mut value = String::new();

        loop {
            match self.next_char() {
                None => {
                    return Err(ParseError::new(
                        "unterminated string literal",
                        self.span_from(start, start_line, start_col),
                    ));
                }
                Some('\'') => {
                    // '' is an escaped quote
                    if self.peek_char() == Some('\'') {
                        self.next_char();
                        value.push('\'');
                    } else {
                        break;
                    }
                }
                Some(c) => value.push(c),
            }
        }

        Ok(TokenKind::String(value))
    }

    fn scan_delimited(
        &mut self,
        close: char,
        quote: Quote,
        start: usize,
        start_line: usize,
        start_col: usize,
    ) -> ParseResult<TokenKind> {
        let mut value = String::new();

        loop {
            match self.next_char() {
                None => {
                    return Err(ParseError::new(
                        format!("unterminated identifier, expected closing '{}'", close),
                        self.span_from(start, start_line, start_col),
                    ));
                }
                Some(c) if c == close => {
                    // Doubled closing delimiter is an escape, except for brackets.
                    if quote != Quote::Bracket && self.peek_char() == Some(close) {
                        self.next_char();
                        value.push(close);
                    } else {
                        break;
                    }
                }
                Some(c) => value.push(c),
            }
        }

        if value.trim().is_empty() {
            return Err(ParseError::new(
                "empty delimited identifier",
                self.span_from(start, start_line, start_col),
            ));
        }

        Ok(TokenKind::Quoted(value, quote))
    }

    fn scan_word(&mut self, first: char) -> TokenKind {
        let mut word = String::new();
        word.push(first);

        while let Some(c) = self.peek_char() {
            if c.is_alphanumeric() || c == '_' || c == '$' {
                word.push(c);
                self.next_char();
            } else {
                break;
            }
        }

        TokenKind::Word(word)
    }

    fn scan_number(&mut self, first: char) -> TokenKind {
        let mut number = String::new();
        number.push(first);

        while let Some(c) = self.peek_char() {
            if c.is_ascii_alphanumeric() || c == '.' || c == '_' {
                number.push(c);
                self.next_char();
            } else {
                break;
            }
        }

        TokenKind::Number(number)
    }
}
