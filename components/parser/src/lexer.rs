//! MiniJava scanner - turns source text into one token at a time
//!
//! The scanner owns a single current-token slot. Every call to
//! [`Scanner::next_token`] overwrites it; the parser borrows it read-only
//! between requests. Malformed input never aborts scanning: it yields a
//! [`TokenKind::Unknown`] token and leaves the error policy to the caller.

use core_types::SourcePosition;
use std::fmt;
use tracing::{trace, warn};

/// Identifiers longer than this are scanned as [`TokenKind::Unknown`].
pub const MAX_IDENTIFIER_LEN: usize = 31;

/// Lexical category of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// class keyword
    Class,
    /// public keyword
    Public,
    /// static keyword
    Static,
    /// void keyword
    Void,
    /// main keyword
    Main,
    /// String keyword
    StringType,
    /// final keyword
    Final,
    /// extends keyword
    Extends,
    /// return keyword
    Return,
    /// int keyword
    Int,
    /// boolean keyword
    Boolean,
    /// real keyword
    Real,
    /// if keyword
    If,
    /// else keyword
    Else,
    /// while keyword
    While,
    /// System.out.println, scanned as one word
    Print,
    /// length keyword
    Length,
    /// true keyword
    True,
    /// false keyword
    False,
    /// this keyword
    This,
    /// new keyword
    New,
    /// Identifier
    Identifier,
    /// Integer or real number literal
    Number,
    /// Double-quoted string literal
    StringLiteral,
    /// `+`, `-` or `||`
    AddOp,
    /// `*`, `/` or `&&`
    MulOp,
    /// `==`, `!=`, `<`, `<=`, `>` or `>=`
    RelOp,
    /// `=`
    Assign,
    /// `!`
    Not,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `,`
    Comma,
    /// `;`
    Semicolon,
    /// `.`
    Period,
    /// End of file
    Eof,
    /// Malformed or unrecognised input
    Unknown,
}

impl TokenKind {
    /// Classify a scanned word against the reserved words (case-sensitive).
    pub fn keyword(word: &str) -> Option<TokenKind> {
        let kind = match word {
            "class" => TokenKind::Class,
            "public" => TokenKind::Public,
            "static" => TokenKind::Static,
            "void" => TokenKind::Void,
            "main" => TokenKind::Main,
            "String" => TokenKind::StringType,
            "final" => TokenKind::Final,
            "extends" => TokenKind::Extends,
            "return" => TokenKind::Return,
            "int" => TokenKind::Int,
            "boolean" => TokenKind::Boolean,
            "real" => TokenKind::Real,
            "if" => TokenKind::If,
            "else" => TokenKind::Else,
            "while" => TokenKind::While,
            "System.out.println" => TokenKind::Print,
            "length" => TokenKind::Length,
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            "this" => TokenKind::This,
            "new" => TokenKind::New,
            _ => return None,
        };
        Some(kind)
    }

    /// True for the kinds the `Type` production accepts.
    pub fn is_type(self) -> bool {
        matches!(
            self,
            TokenKind::Int
                | TokenKind::Boolean
                | TokenKind::Real
                | TokenKind::Void
                | TokenKind::StringType
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            TokenKind::Class => "'class'",
            TokenKind::Public => "'public'",
            TokenKind::Static => "'static'",
            TokenKind::Void => "'void'",
            TokenKind::Main => "'main'",
            TokenKind::StringType => "'String'",
            TokenKind::Final => "'final'",
            TokenKind::Extends => "'extends'",
            TokenKind::Return => "'return'",
            TokenKind::Int => "'int'",
            TokenKind::Boolean => "'boolean'",
            TokenKind::Real => "'real'",
            TokenKind::If => "'if'",
            TokenKind::Else => "'else'",
            TokenKind::While => "'while'",
            TokenKind::Print => "'System.out.println'",
            TokenKind::Length => "'length'",
            TokenKind::True => "'true'",
            TokenKind::False => "'false'",
            TokenKind::This => "'this'",
            TokenKind::New => "'new'",
            TokenKind::Identifier => "identifier",
            TokenKind::Number => "number",
            TokenKind::StringLiteral => "string literal",
            TokenKind::AddOp => "additive operator",
            TokenKind::MulOp => "multiplicative operator",
            TokenKind::RelOp => "relational operator",
            TokenKind::Assign => "'='",
            TokenKind::Not => "'!'",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::LBracket => "'['",
            TokenKind::RBracket => "']'",
            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::Comma => "','",
            TokenKind::Semicolon => "';'",
            TokenKind::Period => "'.'",
            TokenKind::Eof => "end of file",
            TokenKind::Unknown => "unknown token",
        };
        f.write_str(text)
    }
}

/// Token produced by the scanner
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// Lexical category
    pub kind: TokenKind,
    /// Raw source text of the token
    pub lexeme: String,
    /// Decoded value of an integer literal
    pub value: Option<i32>,
    /// Decoded value of a real literal
    pub value_r: Option<f64>,
    /// Payload of a string literal, without the quotes
    pub literal: Option<String>,
    /// Line the token started on (1-based)
    pub line: u32,
    /// Column the token started on (1-based)
    pub column: u32,
    /// Character offset of the token's first character
    pub offset: usize,
}

impl Token {
    fn new(kind: TokenKind, lexeme: String, start: &SourcePosition) -> Self {
        Self {
            kind,
            lexeme,
            value: None,
            value_r: None,
            literal: None,
            line: start.line,
            column: start.column,
            offset: start.offset,
        }
    }

    /// Position of the first character of the token.
    pub fn position(&self) -> SourcePosition {
        SourcePosition {
            line: self.line,
            column: self.column,
            offset: self.offset,
        }
    }
}

/// Scanner for MiniJava source code
pub struct Scanner {
    chars: Vec<char>,
    position: usize,
    line: u32,
    column: u32,
    token: Token,
}

impl Scanner {
    /// Create a new scanner for the given source code.
    ///
    /// The current token starts out as an empty `Unknown` token; call
    /// [`Scanner::next_token`] to prime it.
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
            token: Token::new(
                TokenKind::Unknown,
                String::new(),
                &SourcePosition {
                    line: 1,
                    column: 1,
                    offset: 0,
                },
            ),
        }
    }

    /// Scan a whole buffer, returning every token up to and including `Eof`.
    pub fn tokenize(source: &str) -> Vec<Token> {
        let mut scanner = Scanner::new(source);
        let mut tokens = Vec::new();
        loop {
            let token = scanner.next_token().clone();
            let done = token.kind == TokenKind::Eof;
            tokens.push(token);
            if done {
                return tokens;
            }
        }
    }

    /// The most recently produced token.
    pub fn token(&self) -> &Token {
        &self.token
    }

    /// Character offset of the scan cursor.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Current line of the scan cursor (1-based).
    pub fn line(&self) -> u32 {
        self.line
    }

    /// Advance to the next token, overwriting the current-token slot.
    ///
    /// Keeps yielding `Eof` once the end of the buffer is reached.
    pub fn next_token(&mut self) -> &Token {
        self.token = self.scan_token();
        trace!(
            kind = ?self.token.kind,
            lexeme = %self.token.lexeme,
            line = self.token.line,
            "scanned token"
        );
        if self.token.kind == TokenKind::Unknown {
            warn!(
                lexeme = %self.token.lexeme,
                line = self.token.line,
                "unrecognised input"
            );
        }
        &self.token
    }

    fn scan_token(&mut self) -> Token {
        loop {
            self.skip_whitespace();

            if self.is_at_end() {
                return Token::new(TokenKind::Eof, String::new(), &self.mark());
            }

            let ch = self.peek();
            let next = self.peek_next();

            if ch.is_alphabetic() {
                return self.scan_word();
            }

            if ch.is_ascii_digit() || (ch == '.' && next.is_some_and(|c| c.is_ascii_digit())) {
                return self.scan_number();
            }

            match (ch, next) {
                ('/', Some('/')) => self.skip_line_comment(),
                ('/', Some('*')) => {
                    if !self.skip_block_comment() {
                        warn!(line = self.line, "unterminated block comment");
                        return Token::new(TokenKind::Eof, String::new(), &self.mark());
                    }
                }
                ('"', _) => return self.scan_string(),
                _ => return self.scan_symbol(),
            }
        }
    }

    fn skip_whitespace(&mut self) {
        while !self.is_at_end() {
            match self.peek() {
                '\n' => self.newline(),
                c if c.is_whitespace() => {
                    self.advance();
                }
                _ => break,
            }
        }
    }

    fn skip_line_comment(&mut self) {
        // The newline itself is left for skip_whitespace to count.
        while !self.is_at_end() && self.peek() != '\n' {
            self.advance();
        }
    }

    /// Returns false when the buffer ends before the closing `*/`.
    fn skip_block_comment(&mut self) -> bool {
        self.advance(); // /
        self.advance(); // *
        while !self.is_at_end() {
            if self.peek() == '*' && self.peek_next() == Some('/') {
                self.advance();
                self.advance();
                return true;
            }
            if self.peek() == '\n' {
                self.newline();
            } else {
                self.advance();
            }
        }
        false
    }

    fn scan_word(&mut self) -> Token {
        let start = self.mark();
        let mut word = String::new();

        while !self.is_at_end() && is_word_char(self.peek()) {
            word.push(self.advance());
        }

        // `System.out.println` is recognised as a single word.
        if word == "System" {
            while !self.is_at_end() && (is_word_char(self.peek()) || self.peek() == '.') {
                word.push(self.advance());
            }
        }

        let kind = match TokenKind::keyword(&word) {
            Some(kind) => kind,
            None if word.chars().count() > MAX_IDENTIFIER_LEN => TokenKind::Unknown,
            None => TokenKind::Identifier,
        };

        Token::new(kind, word, &start)
    }

    fn scan_number(&mut self) -> Token {
        let start = self.mark();
        let mut digits = String::new();

        self.take_digits(&mut digits);

        if !self.is_at_end() && self.peek() == '.' {
            digits.push(self.advance());

            // A bare trailing dot is not a number.
            if self.is_at_end() || !self.peek().is_ascii_digit() {
                return Token::new(TokenKind::Unknown, digits, &start);
            }
            self.take_digits(&mut digits);

            return match digits.parse::<f64>() {
                Ok(value) if value.is_finite() => {
                    let mut token = Token::new(TokenKind::Number, digits, &start);
                    token.value_r = Some(value);
                    token
                }
                _ => Token::new(TokenKind::Unknown, digits, &start),
            };
        }

        match digits.parse::<i32>() {
            Ok(value) => {
                let mut token = Token::new(TokenKind::Number, digits, &start);
                token.value = Some(value);
                token
            }
            Err(_) => Token::new(TokenKind::Unknown, digits, &start),
        }
    }

    fn take_digits(&mut self, out: &mut String) {
        while !self.is_at_end() && self.peek().is_ascii_digit() {
            out.push(self.advance());
        }
    }

    fn scan_string(&mut self) -> Token {
        let start = self.mark();
        let mut lexeme = String::new();
        let mut literal = String::new();

        lexeme.push(self.advance()); // opening quote

        loop {
            if self.is_at_end() {
                return Token::new(TokenKind::Unknown, lexeme, &start);
            }
            match self.peek() {
                // Left in place so the line counter still sees it.
                '\n' => return Token::new(TokenKind::Unknown, lexeme, &start),
                '"' => {
                    lexeme.push(self.advance());
                    break;
                }
                _ => {
                    let ch = self.advance();
                    lexeme.push(ch);
                    literal.push(ch);
                }
            }
        }

        let mut token = Token::new(TokenKind::StringLiteral, lexeme, &start);
        token.literal = Some(literal);
        token
    }

    fn scan_symbol(&mut self) -> Token {
        let start = self.mark();
        let ch = self.advance();

        let kind = match ch {
            '=' => {
                if self.match_char('=') {
                    TokenKind::RelOp
                } else {
                    TokenKind::Assign
                }
            }
            '<' | '>' => {
                self.match_char('=');
                TokenKind::RelOp
            }
            '!' => {
                if self.match_char('=') {
                    TokenKind::RelOp
                } else {
                    TokenKind::Not
                }
            }
            '&' => {
                if self.match_char('&') {
                    TokenKind::MulOp
                } else {
                    TokenKind::Unknown
                }
            }
            '|' => {
                if self.match_char('|') {
                    TokenKind::AddOp
                } else {
                    TokenKind::Unknown
                }
            }
            '+' | '-' => TokenKind::AddOp,
            '*' | '/' => TokenKind::MulOp,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            ',' => TokenKind::Comma,
            ';' => TokenKind::Semicolon,
            '.' => TokenKind::Period,
            _ => TokenKind::Unknown,
        };

        let lexeme: String = self.chars[start.offset..self.position].iter().collect();
        Token::new(kind, lexeme, &start)
    }

    fn mark(&self) -> SourcePosition {
        SourcePosition {
            line: self.line,
            column: self.column,
            offset: self.position,
        }
    }

    fn newline(&mut self) {
        self.position += 1;
        self.line += 1;
        self.column = 1;
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.chars.len()
    }

    fn peek(&self) -> char {
        if self.is_at_end() {
            '\0'
        } else {
            self.chars[self.position]
        }
    }

    fn peek_next(&self) -> Option<char> {
        self.chars.get(self.position + 1).copied()
    }

    fn advance(&mut self) -> char {
        let ch = self.chars[self.position];
        self.position += 1;
        self.column += 1;
        ch
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.is_at_end() || self.chars[self.position] != expected {
            false
        } else {
            self.position += 1;
            self.column += 1;
            true
        }
    }
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}
