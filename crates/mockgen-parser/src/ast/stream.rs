//! Rewindable cursor over the significant tokens of a source buffer.
//!
//! Comments and preprocessor lines are dropped when the stream is built; the
//! parser never sees them. The stream always ends with exactly one
//! [`TokenKind::Eof`], and reading past it keeps returning that token.

use crate::ast::{ParseError, ParseErrorKind};
use crate::lexer::{self, LexError, Span, Token, TokenKind};

/// A saved cursor position for speculative parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint(usize);

/// Materialized token array with a movable cursor.
#[derive(Debug, Clone)]
pub struct TokenStream<'src> {
    tokens: Vec<Token<'src>>,
    position: usize,
}

impl<'src> TokenStream<'src> {
    /// Build a stream from lexer output, dropping trivia.
    pub fn new(tokens: impl IntoIterator<Item = Token<'src>>) -> Self {
        let mut significant: Vec<Token<'src>> = tokens
            .into_iter()
            .filter(|t| !t.kind.is_trivia() && t.kind != TokenKind::Eof)
            .collect();

        let end = significant
            .last()
            .map(|t| Span::point(t.span.end(), t.span.line, t.span.col + t.span.len))
            .unwrap_or_else(|| Span::point(0, 1, 1));
        significant.push(Token::new(TokenKind::Eof, "", end, true));

        Self {
            tokens: significant,
            position: 0,
        }
    }

    /// Tokenize `source` and build a stream over it.
    pub fn from_source(source: &'src str) -> (Self, Vec<LexError>) {
        let (tokens, errors) = lexer::tokenize(source);
        (Self::new(tokens), errors)
    }

    /// Number of tokens, including the trailing EOF.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the stream holds nothing but EOF.
    pub fn is_empty(&self) -> bool {
        self.tokens.len() <= 1
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    /// Index of the current token.
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Token at an absolute index, clamped to EOF.
    #[inline]
    pub fn token_at(&self, index: usize) -> Token<'src> {
        let last = self.tokens.len() - 1;
        self.tokens[index.min(last)]
    }

    /// Peek at the current token without consuming it.
    #[inline]
    pub fn peek(&self) -> Token<'src> {
        self.token_at(self.position)
    }

    /// Peek ahead `n` tokens without consuming.
    #[inline]
    pub fn peek_nth(&self, n: usize) -> Token<'src> {
        self.token_at(self.position + n)
    }

    /// The most recently consumed token, or the current one at the start.
    pub fn previous(&self) -> Token<'src> {
        self.token_at(self.position.saturating_sub(1))
    }

    /// Get the current token and advance to the next. Never moves past EOF.
    pub fn advance(&mut self) -> Token<'src> {
        let token = self.peek();
        if token.kind != TokenKind::Eof {
            self.position += 1;
        }
        token
    }

    /// Check if the current token matches the given kind.
    #[inline]
    pub fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    /// Check if the current token is EOF.
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.check(TokenKind::Eof)
    }

    /// If the current token matches the given kind, consume it and return Some.
    pub fn eat(&mut self, kind: TokenKind) -> Option<Token<'src>> {
        if self.check(kind) {
            Some(self.advance())
        } else {
            None
        }
    }

    /// Expect the current token to be of the given kind.
    pub fn expect(&mut self, kind: TokenKind) -> Result<Token<'src>, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            let token = self.peek();
            let error_kind = if token.kind == TokenKind::Eof {
                ParseErrorKind::UnexpectedEof
            } else {
                ParseErrorKind::ExpectedToken
            };
            Err(ParseError::new(
                error_kind,
                token.span,
                format!("expected {}, found {}", kind, token.kind),
            ))
        }
    }

    /// Check if the current token is an identifier with the given spelling.
    /// Used for keywords and contextual words like `override`.
    #[inline]
    pub fn check_name(&self, name: &str) -> bool {
        self.peek().is_name(name)
    }

    /// Consume an identifier with the given spelling.
    pub fn eat_name(&mut self, name: &str) -> Option<Token<'src>> {
        if self.check_name(name) {
            Some(self.advance())
        } else {
            None
        }
    }

    // ========================================================================
    // Backtracking
    // ========================================================================

    /// Save the current position.
    #[inline]
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.position)
    }

    /// Rewind to a saved position.
    #[inline]
    pub fn restore(&mut self, checkpoint: Checkpoint) {
        self.position = checkpoint.0;
    }

    /// Span from the token at `start` through the last consumed token.
    pub fn span_from(&self, start: usize) -> Span {
        let first = self.token_at(start).span;
        if self.position <= start {
            return Span::point(first.offset, first.line, first.col);
        }
        first.to(self.previous().span)
    }

    // ========================================================================
    // Bracket matching
    // ========================================================================

    /// Find the index of the token closing the bracket at `index`.
    ///
    /// `(`, `[` and `{` must nest properly with each other. A `<` closes at
    /// the first `>` at its own nesting level; brackets inside it are skipped
    /// and `;`, `{` or `}` give up, since no template argument list contains
    /// them. Returns `None` when the token is not an opening bracket or the
    /// close is missing.
    pub fn find_matching(&self, index: usize) -> Option<usize> {
        match self.token_at(index).kind {
            TokenKind::LeftParen | TokenKind::LeftBracket | TokenKind::LeftBrace => {
                self.find_matching_bracket(index)
            }
            TokenKind::Less => self.find_matching_angle(index),
            _ => None,
        }
    }

    fn find_matching_bracket(&self, index: usize) -> Option<usize> {
        let mut expected: Vec<TokenKind> = Vec::new();
        let mut i = index;
        loop {
            let kind = self.token_at(i).kind;
            match kind {
                TokenKind::Eof => return None,
                TokenKind::LeftParen | TokenKind::LeftBracket | TokenKind::LeftBrace => {
                    expected.extend(kind.closing());
                }
                TokenKind::RightParen | TokenKind::RightBracket | TokenKind::RightBrace => {
                    if expected.pop() != Some(kind) {
                        return None;
                    }
                    if expected.is_empty() {
                        return Some(i);
                    }
                }
                _ => {}
            }
            i += 1;
        }
    }

    fn find_matching_angle(&self, index: usize) -> Option<usize> {
        let mut depth = 0usize;
        let mut i = index;
        loop {
            match self.token_at(i).kind {
                TokenKind::Less => depth += 1,
                TokenKind::Greater => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(i);
                    }
                }
                TokenKind::LeftParen | TokenKind::LeftBracket => {
                    i = self.find_matching_bracket(i)?;
                }
                TokenKind::Semicolon
                | TokenKind::LeftBrace
                | TokenKind::RightBrace
                | TokenKind::RightParen
                | TokenKind::RightBracket
                | TokenKind::Eof => return None,
                _ => {}
            }
            i += 1;
        }
    }

    /// Skip the balanced group starting at the current token, which must be
    /// an opening bracket. Returns the closing token.
    pub fn skip_balanced(&mut self) -> Result<Token<'src>, ParseError> {
        let open = self.peek();
        match self.find_matching(self.position) {
            Some(close) => {
                self.position = close + 1;
                Ok(self.previous())
            }
            None => {
                let kind = if open.kind == TokenKind::Less {
                    ParseErrorKind::ExpectedTemplateArgs
                } else {
                    ParseErrorKind::MismatchedDelimiter
                };
                Err(ParseError::new(
                    kind,
                    open.span,
                    format!("unclosed {}", open.kind),
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stream(source: &str) -> TokenStream<'_> {
        TokenStream::from_source(source).0
    }

    #[test]
    fn trivia_is_filtered() {
        let s = stream("#include <x>\n// line\nint /* block */ x;");
        let kinds: Vec<_> = (0..s.len()).map(|i| s.token_at(i).kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Identifier,
                TokenKind::Identifier,
                TokenKind::Semicolon,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn empty_source_is_just_eof() {
        let s = stream("  // nothing\n");
        assert!(s.is_empty());
        assert!(s.is_eof());
    }

    #[test]
    fn navigation() {
        let mut s = stream("virtual int Foo();");
        assert!(s.check_name("virtual"));
        assert_eq!(s.peek_nth(2).lexeme, "Foo");
        assert_eq!(s.advance().lexeme, "virtual");
        assert_eq!(s.previous().lexeme, "virtual");
        assert!(s.eat_name("int").is_some());
        assert!(s.eat(TokenKind::Semicolon).is_none());
        assert!(s.expect(TokenKind::Identifier).is_ok());
    }

    #[test]
    fn advance_stops_at_eof() {
        let mut s = stream("x");
        s.advance();
        assert!(s.is_eof());
        s.advance();
        s.advance();
        assert!(s.is_eof());
        assert_eq!(s.peek_nth(10).kind, TokenKind::Eof);
    }

    #[test]
    fn expect_reports_found_token() {
        let mut s = stream("int x");
        let err = s.expect(TokenKind::Semicolon).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::ExpectedToken);
        assert_eq!(err.message, "expected ';', found identifier");
    }

    #[test]
    fn expect_at_eof_is_unexpected_eof() {
        let mut s = stream("");
        let err = s.expect(TokenKind::RightBrace).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedEof);
    }

    #[test]
    fn checkpoint_and_restore() {
        let mut s = stream("a b c");
        s.advance();
        let cp = s.checkpoint();
        s.advance();
        s.advance();
        assert!(s.is_eof());
        s.restore(cp);
        assert_eq!(s.peek().lexeme, "b");
    }

    #[test]
    fn matching_parens_and_braces() {
        let s = stream("f(a, (b), {c[1]}) ;");
        assert_eq!(s.find_matching(1), Some(14));
        assert_eq!(s.token_at(14).kind, TokenKind::RightParen);
        assert_eq!(s.find_matching(8), Some(13));
        assert_eq!(s.find_matching(0), None);
    }

    #[test]
    fn mismatched_brackets() {
        let s = stream("( ] )");
        assert_eq!(s.find_matching(0), None);
        let s = stream("{ (");
        assert_eq!(s.find_matching(0), None);
    }

    #[test]
    fn matching_nested_angles() {
        let s = stream("map<int, vector<int>> x;");
        assert_eq!(s.find_matching(1), Some(8));
        assert_eq!(s.token_at(8).kind, TokenKind::Greater);
        assert_eq!(s.find_matching(5), Some(7));
    }

    #[test]
    fn matching_angle_skips_parens() {
        let s = stream("function<int(a > b)> f;");
        assert_eq!(s.token_at(s.find_matching(1).unwrap()).span.offset, 19);
    }

    #[test]
    fn angle_gives_up_at_statement_end() {
        let s = stream("a < b; c > d");
        assert_eq!(s.find_matching(1), None);
        let s = stream("if (a < b) {}");
        assert_eq!(s.find_matching(3), None);
    }

    #[test]
    fn skip_balanced_moves_past_close() {
        let mut s = stream("(a, b) c");
        let close = s.skip_balanced().unwrap();
        assert_eq!(close.kind, TokenKind::RightParen);
        assert_eq!(s.peek().lexeme, "c");

        let mut s = stream("{ a");
        let err = s.skip_balanced().unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::MismatchedDelimiter);
    }

    #[test]
    fn span_from_covers_consumed_tokens() {
        let mut s = stream("const int x");
        let start = s.position();
        s.advance();
        s.advance();
        let span = s.span_from(start);
        assert_eq!(span.offset, 0);
        assert_eq!(span.len, 9);
    }
}
