//! Main lexer implementation for C++ headers.
//!
//! The [`Lexer`] converts source text into a stream of [`Token`]s, using
//! direct dispatch on the first character. Comments and preprocessor lines
//! are emitted as tokens of their own; the token stream decides what the
//! parser gets to see.
//!
//! `>>` is never produced: two adjacent `>` tokens come out instead (the
//! second with `space_before == false`) so template argument lists close
//! without any re-lexing.

use super::cursor::{Cursor, is_ident_continue, is_ident_start};
use super::error::LexError;
use super::{Span, Token, TokenKind};

/// Raw string delimiters longer than this are malformed.
const MAX_RAW_DELIMITER: usize = 16;

/// Lexer for C++ header source.
///
/// Lazily produces tokens; construct a new lexer to start over.
pub struct Lexer<'src> {
    /// Low-level character cursor.
    cursor: Cursor<'src>,
    /// Accumulated errors.
    errors: Vec<LexError>,
    /// Nothing but whitespace seen since the last newline.
    at_line_start: bool,
    /// Whitespace or a comment precedes the token being scanned.
    pending_space: bool,
    /// Start of the token being scanned.
    start_offset: u32,
    start_line: u32,
    start_col: u32,
    /// The EOF token has been produced.
    finished: bool,
}

impl<'src> Lexer<'src> {
    /// Create a new lexer for the given source text.
    pub fn new(source: &'src str) -> Self {
        Self {
            cursor: Cursor::new(source),
            errors: Vec::new(),
            at_line_start: true,
            pending_space: false,
            start_offset: 0,
            start_line: 1,
            start_col: 1,
            finished: false,
        }
    }

    /// Take accumulated errors, leaving an empty vec.
    pub fn take_errors(&mut self) -> Vec<LexError> {
        std::mem::take(&mut self.errors)
    }

    /// Check if any errors occurred.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Consume and return the next token.
    ///
    /// Returns [`TokenKind::Eof`] forever once the input is exhausted.
    pub fn next_token(&mut self) -> Token<'src> {
        self.skip_whitespace();

        self.start_offset = self.cursor.offset();
        self.start_line = self.cursor.line();
        self.start_col = self.cursor.column();

        let Some(c) = self.cursor.peek() else {
            self.finished = true;
            return self.make_token(TokenKind::Eof);
        };

        let token = match c {
            '#' if self.at_line_start => self.scan_preprocessor(),
            '/' => self.scan_slash(),
            '"' => self.scan_string(),
            '\'' => self.scan_char(),
            c if c.is_ascii_digit() => self.scan_number(),
            '.' if self.cursor.peek_nth(1).is_some_and(|c| c.is_ascii_digit()) => {
                self.scan_number()
            }
            c if is_ident_start(c) => self.scan_identifier(),
            _ => self.scan_operator(),
        };

        self.at_line_start = false;
        self.pending_space = token.kind.is_trivia();
        token
    }

    // =========================================
    // Internal: Token construction
    // =========================================

    /// Skip whitespace, BOM and backslash line splices.
    fn skip_whitespace(&mut self) {
        if self.cursor.offset() == 0 && self.cursor.eat('\u{FEFF}') {
            self.pending_space = true;
        }

        loop {
            match self.cursor.peek() {
                Some('\n') => {
                    self.at_line_start = true;
                    self.pending_space = true;
                    self.cursor.advance();
                }
                Some(c) if c.is_whitespace() => {
                    self.pending_space = true;
                    self.cursor.advance();
                }
                Some('\\') if self.splice_follows(1) => {
                    self.pending_space = true;
                    self.cursor.advance();
                    self.cursor.eat('\r');
                    self.cursor.advance();
                }
                _ => break,
            }
        }
    }

    /// Whether the character `n` ahead starts a line ending (`\n` or `\r\n`).
    fn splice_follows(&self, n: usize) -> bool {
        match self.cursor.peek_nth(n) {
            Some('\n') => true,
            Some('\r') => self.cursor.peek_nth(n + 1) == Some('\n'),
            _ => false,
        }
    }

    /// Create a token from the recorded start position to the current position.
    fn make_token(&self, kind: TokenKind) -> Token<'src> {
        let len = self.cursor.offset() - self.start_offset;
        let span = Span::new(self.start_offset, len, self.start_line, self.start_col);
        let lexeme = self.cursor.slice_from(self.start_offset);
        Token::new(kind, lexeme, span, self.pending_space)
    }

    /// Span from the token start to the current position, for errors.
    fn current_span(&self) -> Span {
        Span::new(
            self.start_offset,
            self.cursor.offset() - self.start_offset,
            self.start_line,
            self.start_col,
        )
    }

    // =========================================
    // Scanning: Preprocessor
    // =========================================

    /// Scan a directive to the end of its logical line.
    ///
    /// Backslash continuations extend the line, as does a block comment that
    /// opens inside the directive.
    fn scan_preprocessor(&mut self) -> Token<'src> {
        self.cursor.advance(); // '#'

        while let Some(c) = self.cursor.peek() {
            match c {
                '\n' => break,
                '\\' if self.splice_follows(1) => {
                    self.cursor.advance();
                    self.cursor.eat('\r');
                    self.cursor.advance();
                }
                '/' if self.cursor.check_str("//") => {
                    self.cursor.eat_line();
                    break;
                }
                '/' if self.cursor.check_str("/*") => {
                    self.cursor.eat_str("/*");
                    if !self.skip_past_comment_end() {
                        self.errors.push(LexError::UnterminatedComment {
                            span: self.current_span(),
                        });
                    }
                }
                '"' | '\'' => {
                    self.cursor.advance();
                    self.skip_quoted_body(c);
                }
                _ => {
                    self.cursor.advance();
                }
            }
        }

        // Trailing '\r' of a CRLF line belongs to the whitespace, not the directive.
        let mut token = self.make_token(TokenKind::Preprocessor);
        let trimmed = token.lexeme.trim_end();
        token.span.len = trimmed.len() as u32;
        token.lexeme = trimmed;
        token
    }

    // =========================================
    // Scanning: Comments and slash
    // =========================================

    /// Scan a slash, which could be `/`, `//`, `/*`, `/=`.
    fn scan_slash(&mut self) -> Token<'src> {
        self.cursor.advance(); // '/'

        match self.cursor.peek() {
            Some('/') => {
                self.cursor.eat_line();
                let mut token = self.make_token(TokenKind::LineComment);
                let trimmed = token.lexeme.trim_end();
                token.span.len = trimmed.len() as u32;
                token.lexeme = trimmed;
                token
            }
            Some('*') => {
                self.cursor.advance();
                if !self.skip_past_comment_end() {
                    self.errors.push(LexError::UnterminatedComment {
                        span: self.current_span(),
                    });
                }
                self.make_token(TokenKind::BlockComment)
            }
            Some('=') => {
                self.cursor.advance();
                self.make_token(TokenKind::SlashEqual)
            }
            _ => self.make_token(TokenKind::Slash),
        }
    }

    /// Advance past the next `*/`. Returns false if the input ran out first.
    fn skip_past_comment_end(&mut self) -> bool {
        loop {
            match self.cursor.advance() {
                None => return false,
                Some('*') if self.cursor.eat('/') => return true,
                Some(_) => {}
            }
        }
    }

    // =========================================
    // Scanning: Strings and characters
    // =========================================

    /// Consume a quoted body up to and including the closing quote.
    ///
    /// Stops before an unescaped newline. Returns false when unterminated.
    fn skip_quoted_body(&mut self, quote: char) -> bool {
        loop {
            match self.cursor.peek() {
                None | Some('\n') => return false,
                Some('\\') => {
                    self.cursor.advance();
                    if self.cursor.peek().is_some() {
                        self.cursor.advance();
                    }
                }
                Some(c) => {
                    self.cursor.advance();
                    if c == quote {
                        return true;
                    }
                }
            }
        }
    }

    /// Scan a string literal; the cursor sits on the opening quote.
    fn scan_string(&mut self) -> Token<'src> {
        self.cursor.advance();
        if !self.skip_quoted_body('"') {
            self.errors.push(LexError::UnterminatedString {
                span: self.current_span(),
            });
        }
        self.make_token(TokenKind::String)
    }

    /// Scan a character literal; the cursor sits on the opening quote.
    fn scan_char(&mut self) -> Token<'src> {
        self.cursor.advance();
        if !self.skip_quoted_body('\'') {
            self.errors.push(LexError::UnterminatedChar {
                span: self.current_span(),
            });
        }
        self.make_token(TokenKind::Char)
    }

    /// Scan a raw string; the cursor sits on the opening quote.
    fn scan_raw_string(&mut self) -> Token<'src> {
        self.cursor.advance(); // '"'

        let delimiter = self
            .cursor
            .eat_while(|c| !matches!(c, '(' | ')' | '\\' | '"' | '\n') && !c.is_whitespace());

        if delimiter.len() > MAX_RAW_DELIMITER || !self.cursor.eat('(') {
            // Malformed delimiter: lex the rest as an ordinary literal.
            if !self.skip_quoted_body('"') {
                self.errors.push(LexError::UnterminatedString {
                    span: self.current_span(),
                });
            }
            return self.make_token(TokenKind::String);
        }

        let terminator = format!("){delimiter}\"");
        loop {
            if self.cursor.eat_str(&terminator) {
                return self.make_token(TokenKind::String);
            }
            if self.cursor.advance().is_none() {
                self.errors.push(LexError::UnterminatedRawString {
                    delimiter: delimiter.to_string(),
                    span: self.current_span(),
                });
                return self.make_token(TokenKind::String);
            }
        }
    }

    // =========================================
    // Scanning: Numbers
    // =========================================

    /// Scan a preprocessing number.
    ///
    /// Accepts every C++ spelling (hex, binary, octal, floats, exponents,
    /// digit separators, suffixes) without validating it.
    fn scan_number(&mut self) -> Token<'src> {
        self.cursor.advance();

        loop {
            match self.cursor.peek() {
                Some('e' | 'E' | 'p' | 'P')
                    if matches!(self.cursor.peek_nth(1), Some('+' | '-')) =>
                {
                    self.cursor.advance();
                    self.cursor.advance();
                }
                Some('\'') if self.cursor.peek_nth(1).is_some_and(is_ident_continue) => {
                    self.cursor.advance();
                    self.cursor.advance();
                }
                Some('.') => {
                    self.cursor.advance();
                }
                Some(c) if is_ident_continue(c) => {
                    self.cursor.advance();
                }
                _ => break,
            }
        }

        self.make_token(TokenKind::Number)
    }

    // =========================================
    // Scanning: Identifiers
    // =========================================

    /// Scan an identifier, or a literal with an encoding prefix.
    fn scan_identifier(&mut self) -> Token<'src> {
        let word = self.cursor.eat_while(is_ident_continue);

        match (word, self.cursor.peek()) {
            ("L" | "u" | "U" | "u8", Some('"')) => self.scan_string(),
            ("L" | "u" | "U" | "u8", Some('\'')) => self.scan_char(),
            ("R" | "LR" | "uR" | "UR" | "u8R", Some('"')) => self.scan_raw_string(),
            _ => self.make_token(TokenKind::Identifier),
        }
    }

    // =========================================
    // Scanning: Operators
    // =========================================

    /// Scan an operator or punctuation token.
    fn scan_operator(&mut self) -> Token<'src> {
        let Some(c) = self.cursor.advance() else {
            return self.make_token(TokenKind::Eof);
        };
        let next = self.cursor.peek();

        let kind = match (c, next) {
            ('(', _) => TokenKind::LeftParen,
            (')', _) => TokenKind::RightParen,
            ('[', _) => TokenKind::LeftBracket,
            (']', _) => TokenKind::RightBracket,
            ('{', _) => TokenKind::LeftBrace,
            ('}', _) => TokenKind::RightBrace,
            (';', _) => TokenKind::Semicolon,
            (',', _) => TokenKind::Comma,
            ('~', _) => TokenKind::Tilde,
            ('?', _) => TokenKind::Question,

            (':', Some(':')) => { self.cursor.advance(); TokenKind::ColonColon }
            (':', _) => TokenKind::Colon,

            ('.', Some('.')) if self.cursor.peek_nth(1) == Some('.') => {
                self.cursor.eat_str("..");
                TokenKind::Ellipsis
            }
            ('.', Some('*')) => { self.cursor.advance(); TokenKind::DotStar }
            ('.', _) => TokenKind::Dot,

            ('+', Some('+')) => { self.cursor.advance(); TokenKind::PlusPlus }
            ('+', Some('=')) => { self.cursor.advance(); TokenKind::PlusEqual }
            ('+', _) => TokenKind::Plus,

            ('-', Some('>')) => {
                self.cursor.advance();
                if self.cursor.eat('*') {
                    TokenKind::ArrowStar
                } else {
                    TokenKind::Arrow
                }
            }
            ('-', Some('-')) => { self.cursor.advance(); TokenKind::MinusMinus }
            ('-', Some('=')) => { self.cursor.advance(); TokenKind::MinusEqual }
            ('-', _) => TokenKind::Minus,

            ('*', Some('=')) => { self.cursor.advance(); TokenKind::StarEqual }
            ('*', _) => TokenKind::Star,

            ('%', Some('=')) => { self.cursor.advance(); TokenKind::PercentEqual }
            ('%', _) => TokenKind::Percent,

            ('=', Some('=')) => { self.cursor.advance(); TokenKind::EqualEqual }
            ('=', _) => TokenKind::Equal,

            ('!', Some('=')) => { self.cursor.advance(); TokenKind::BangEqual }
            ('!', _) => TokenKind::Bang,

            ('<', Some('=')) => {
                self.cursor.advance();
                if self.cursor.eat('>') {
                    TokenKind::Spaceship
                } else {
                    TokenKind::LessEqual
                }
            }
            ('<', Some('<')) => {
                self.cursor.advance();
                if self.cursor.eat('=') {
                    TokenKind::LessLessEqual
                } else {
                    TokenKind::LessLess
                }
            }
            ('<', _) => TokenKind::Less,

            // `>>` and `>>=` come out as `>` followed by `>` or `>=`.
            ('>', Some('=')) => { self.cursor.advance(); TokenKind::GreaterEqual }
            ('>', _) => TokenKind::Greater,

            ('&', Some('=')) => { self.cursor.advance(); TokenKind::AmpEqual }
            ('&', Some('&')) => { self.cursor.advance(); TokenKind::AmpAmp }
            ('&', _) => TokenKind::Amp,

            ('|', Some('=')) => { self.cursor.advance(); TokenKind::PipeEqual }
            ('|', Some('|')) => { self.cursor.advance(); TokenKind::PipePipe }
            ('|', _) => TokenKind::Pipe,

            ('^', Some('=')) => { self.cursor.advance(); TokenKind::CaretEqual }
            ('^', _) => TokenKind::Caret,

            ('#', Some('#')) => { self.cursor.advance(); TokenKind::HashHash }
            ('#', _) => TokenKind::Hash,

            _ => {
                self.errors.push(LexError::UnexpectedChar {
                    ch: c,
                    span: self.current_span(),
                });
                TokenKind::Unknown
            }
        };

        self.make_token(kind)
    }
}

/// Implement Iterator for convenient token streaming.
///
/// Yields every token before [`TokenKind::Eof`], then stops.
impl<'src> Iterator for Lexer<'src> {
    type Item = Token<'src>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let token = self.next_token();
        if token.kind == TokenKind::Eof {
            None
        } else {
            Some(token)
        }
    }
}

/// Lex a whole buffer.
///
/// The returned vector always ends with exactly one [`TokenKind::Eof`] token.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn tokenize(source: &str) -> (Vec<Token<'_>>, Vec<LexError>) {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::with_capacity(source.len() / 4 + 1);
    loop {
        let token = lexer.next_token();
        let done = token.kind == TokenKind::Eof;
        tokens.push(token);
        if done {
            break;
        }
    }
    (tokens, lexer.take_errors())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper to collect all tokens from source.
    fn lex(source: &str) -> Vec<(TokenKind, String)> {
        Lexer::new(source)
            .map(|t| (t.kind, t.lexeme.to_string()))
            .collect()
    }

    /// Helper to get token kinds only.
    fn token_kinds(source: &str) -> Vec<TokenKind> {
        Lexer::new(source).map(|t| t.kind).collect()
    }

    // =========================================
    // Basic tokens
    // =========================================

    #[test]
    fn empty_source() {
        let mut lexer = Lexer::new("");
        assert_eq!(lexer.next_token().kind, TokenKind::Eof);
        assert_eq!(lexer.next_token().kind, TokenKind::Eof);
    }

    #[test]
    fn whitespace_only() {
        let mut lexer = Lexer::new("   \t\n\r  ");
        assert_eq!(lexer.next_token().kind, TokenKind::Eof);
    }

    #[test]
    fn bom_handling() {
        assert_eq!(
            lex("\u{FEFF}hello"),
            vec![(TokenKind::Identifier, "hello".to_string())]
        );
    }

    #[test]
    fn tokenize_ends_with_single_eof() {
        let (tokens, errors) = tokenize("class Foo;");
        assert!(errors.is_empty());
        assert_eq!(tokens.len(), 4);
        assert_eq!(tokens[3].kind, TokenKind::Eof);
        assert_eq!(tokens[3].span.offset, 10);
    }

    // =========================================
    // Identifiers and keywords
    // =========================================

    #[test]
    fn keywords_are_identifiers() {
        assert_eq!(
            token_kinds("class virtual const Foo"),
            vec![TokenKind::Identifier; 4]
        );
    }

    #[test]
    fn qualified_name_is_three_tokens() {
        assert_eq!(
            lex("std::string"),
            vec![
                (TokenKind::Identifier, "std".to_string()),
                (TokenKind::ColonColon, "::".to_string()),
                (TokenKind::Identifier, "string".to_string()),
            ]
        );
    }

    // =========================================
    // Numbers
    // =========================================

    #[test]
    fn numbers() {
        for text in [
            "42", "0x1F", "0b1010", "017", "3.14", ".5", "1e10", "1.5e-3f", "0x1p+3",
            "1'000'000", "42ULL", "10u",
        ] {
            assert_eq!(lex(text), vec![(TokenKind::Number, text.to_string())], "{text}");
        }
    }

    #[test]
    fn number_then_operator() {
        assert_eq!(
            token_kinds("1+2"),
            vec![TokenKind::Number, TokenKind::Plus, TokenKind::Number]
        );
    }

    // =========================================
    // Strings and characters
    // =========================================

    #[test]
    fn string_with_escapes() {
        assert_eq!(
            lex(r#""a\"b""#),
            vec![(TokenKind::String, r#""a\"b""#.to_string())]
        );
    }

    #[test]
    fn prefixed_literals() {
        for text in [r#"L"wide""#, r#"u8"utf""#, r#"u"x""#, r#"U"y""#] {
            assert_eq!(lex(text), vec![(TokenKind::String, text.to_string())]);
        }
        assert_eq!(lex("L'x'"), vec![(TokenKind::Char, "L'x'".to_string())]);
    }

    #[test]
    fn char_literals() {
        assert_eq!(
            token_kinds(r"'a' '\n' '\''"),
            vec![TokenKind::Char, TokenKind::Char, TokenKind::Char]
        );
    }

    #[test]
    fn raw_string() {
        let text = r#"R"xy(a ")" b)xy""#;
        assert_eq!(lex(text), vec![(TokenKind::String, text.to_string())]);
    }

    #[test]
    fn raw_string_spanning_lines() {
        let tokens = lex("R\"(line one\nline two)\" x");
        assert_eq!(tokens[0].0, TokenKind::String);
        assert_eq!(tokens[1], (TokenKind::Identifier, "x".to_string()));
    }

    #[test]
    fn unterminated_string_still_emits_token() {
        let mut lexer = Lexer::new("\"abc\nint");
        let token = lexer.next_token();
        assert_eq!(token.kind, TokenKind::String);
        assert_eq!(token.lexeme, "\"abc");
        assert_eq!(lexer.next_token().lexeme, "int");
        let errors = lexer.take_errors();
        assert!(matches!(errors[0], LexError::UnterminatedString { .. }));
    }

    #[test]
    fn unterminated_raw_string() {
        let mut lexer = Lexer::new("R\"d(never closed");
        let token = lexer.next_token();
        assert_eq!(token.kind, TokenKind::String);
        assert_eq!(lexer.next_token().kind, TokenKind::Eof);
        assert!(matches!(
            lexer.take_errors()[0],
            LexError::UnterminatedRawString { .. }
        ));
    }

    // =========================================
    // Comments
    // =========================================

    #[test]
    fn line_comment() {
        assert_eq!(
            lex("int // note\nx"),
            vec![
                (TokenKind::Identifier, "int".to_string()),
                (TokenKind::LineComment, "// note".to_string()),
                (TokenKind::Identifier, "x".to_string()),
            ]
        );
    }

    #[test]
    fn block_comment() {
        assert_eq!(
            lex("a /* b\n c */ d"),
            vec![
                (TokenKind::Identifier, "a".to_string()),
                (TokenKind::BlockComment, "/* b\n c */".to_string()),
                (TokenKind::Identifier, "d".to_string()),
            ]
        );
    }

    #[test]
    fn unterminated_comment() {
        let mut lexer = Lexer::new("a /* open");
        assert_eq!(lexer.next_token().kind, TokenKind::Identifier);
        let comment = lexer.next_token();
        assert_eq!(comment.kind, TokenKind::BlockComment);
        assert_eq!(comment.lexeme, "/* open");
        assert_eq!(lexer.next_token().kind, TokenKind::Eof);
        assert!(lexer.has_errors());
    }

    // =========================================
    // Preprocessor
    // =========================================

    #[test]
    fn preprocessor_line() {
        assert_eq!(
            lex("#include <vector>\nclass"),
            vec![
                (TokenKind::Preprocessor, "#include <vector>".to_string()),
                (TokenKind::Identifier, "class".to_string()),
            ]
        );
    }

    #[test]
    fn preprocessor_continuation() {
        let tokens = lex("  #define X(a) \\\n  (a + 1)\nint");
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].0, TokenKind::Preprocessor);
        assert!(tokens[0].1.ends_with("(a + 1)"));
    }

    #[test]
    fn preprocessor_with_multiline_comment() {
        let tokens = lex("#if 0 /* a\nb */ \nint");
        assert_eq!(tokens[0].0, TokenKind::Preprocessor);
        assert_eq!(tokens[1], (TokenKind::Identifier, "int".to_string()));
    }

    #[test]
    fn hash_mid_line_is_operator() {
        assert_eq!(
            token_kinds("a # b ## c"),
            vec![
                TokenKind::Identifier,
                TokenKind::Hash,
                TokenKind::Identifier,
                TokenKind::HashHash,
                TokenKind::Identifier,
            ]
        );
    }

    // =========================================
    // Operators
    // =========================================

    #[test]
    fn multi_char_operators() {
        assert_eq!(
            token_kinds(":: -> ->* ... .* << <<= == != <= >= <=> && || ++ --"),
            vec![
                TokenKind::ColonColon,
                TokenKind::Arrow,
                TokenKind::ArrowStar,
                TokenKind::Ellipsis,
                TokenKind::DotStar,
                TokenKind::LessLess,
                TokenKind::LessLessEqual,
                TokenKind::EqualEqual,
                TokenKind::BangEqual,
                TokenKind::LessEqual,
                TokenKind::GreaterEqual,
                TokenKind::Spaceship,
                TokenKind::AmpAmp,
                TokenKind::PipePipe,
                TokenKind::PlusPlus,
                TokenKind::MinusMinus,
            ]
        );
    }

    #[test]
    fn compound_assignments() {
        assert_eq!(
            token_kinds("+= -= *= /= %= ^= &= |="),
            vec![
                TokenKind::PlusEqual,
                TokenKind::MinusEqual,
                TokenKind::StarEqual,
                TokenKind::SlashEqual,
                TokenKind::PercentEqual,
                TokenKind::CaretEqual,
                TokenKind::AmpEqual,
                TokenKind::PipeEqual,
            ]
        );
    }

    #[test]
    fn shift_right_splits_into_two_greaters() {
        let tokens: Vec<_> = Lexer::new("vector<list<int>>").collect();
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Identifier,
                TokenKind::Less,
                TokenKind::Identifier,
                TokenKind::Less,
                TokenKind::Identifier,
                TokenKind::Greater,
                TokenKind::Greater,
            ]
        );
        assert!(!tokens[6].space_before);
    }

    #[test]
    fn space_before_flag() {
        let tokens: Vec<_> = Lexer::new("a  b(c").collect();
        assert!(!tokens[0].space_before);
        assert!(tokens[1].space_before);
        assert!(!tokens[2].space_before);
        assert!(!tokens[3].space_before);
    }

    #[test]
    fn unexpected_character() {
        let mut lexer = Lexer::new("a @ b");
        let kinds: Vec<_> = lexer.by_ref().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![TokenKind::Identifier, TokenKind::Unknown, TokenKind::Identifier]
        );
        assert!(matches!(
            lexer.take_errors()[0],
            LexError::UnexpectedChar { ch: '@', .. }
        ));
    }

    #[test]
    fn unicode_identifiers() {
        let mut lexer = Lexer::new("int é, größe;");
        let tokens: Vec<_> = lexer.by_ref().map(|t| (t.kind, t.lexeme)).collect();
        assert_eq!(
            tokens,
            vec![
                (TokenKind::Identifier, "int"),
                (TokenKind::Identifier, "é"),
                (TokenKind::Comma, ","),
                (TokenKind::Identifier, "größe"),
                (TokenKind::Semicolon, ";"),
            ]
        );
        assert!(lexer.take_errors().is_empty());
    }

    // =========================================
    // Positions
    // =========================================

    #[test]
    fn spans_track_lines_and_offsets() {
        let (tokens, _) = tokenize("class A {\n  virtual int f();\n};");
        let virt = tokens.iter().find(|t| t.lexeme == "virtual").map(|t| t.span);
        assert_eq!(virt, Some(Span::new(12, 7, 2, 3)));
    }

    #[test]
    fn every_non_whitespace_byte_is_covered() {
        let source = "#pragma once\nclass A { /* c */ int x = 1'0; }; // t\n";
        let (tokens, _) = tokenize(source);
        let covered: usize = tokens.iter().map(|t| t.span.len as usize).sum();
        let non_ws = source.chars().filter(|c| !c.is_whitespace()).count();
        let ws_inside: usize = tokens
            .iter()
            .map(|t| t.lexeme.chars().filter(|c| c.is_whitespace()).count())
            .sum();
        assert_eq!(covered - ws_inside, non_ws);
    }
}
