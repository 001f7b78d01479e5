//! Parser infrastructure for C++ headers.
//!
//! Provides the main [`Parser`] struct with token navigation, error
//! recovery and the scanning helpers shared by the type and declaration
//! parsers.

use crate::ast::stream::TokenStream;
use crate::ast::{Access, ParseError, ParseErrorKind, ParseErrors, TranslationUnit};
use crate::keywords;
use crate::lexer::{Span, Token, TokenKind};
use bumpalo::Bump;

/// How deeply scopes, declarations and types may nest before the parse is
/// abandoned.
pub const MAX_NESTING_DEPTH: usize = 128;

/// Recursive-descent parser for the declaration subset of C++.
///
/// All tokens are materialized up front, so lookahead is unbounded and
/// speculative parsing is a matter of saving and restoring a position.
///
/// The `'ast` lifetime refers to the arena where AST nodes and their strings
/// are allocated. The source only needs to live as long as the parser; every
/// string that ends up in the AST is copied into the arena.
pub struct Parser<'src, 'ast> {
    /// The source buffer
    pub(super) source: &'src str,
    /// Significant tokens with the cursor
    pub(super) stream: TokenStream<'src>,
    /// Accumulated parse errors
    pub(super) errors: ParseErrors,
    /// Arena allocator for AST nodes
    pub(super) arena: &'ast Bump,
    /// Enclosing namespaces, outermost first
    pub(super) namespaces: Vec<&'ast str>,
    /// Names of the classes whose bodies are being parsed, innermost last
    pub(super) classes: Vec<&'ast str>,
    /// Access level applied to the next member
    pub(super) access: Access,
    /// Current nesting of scopes, declarations and types
    depth: usize,
    /// Set once [`MAX_NESTING_DEPTH`] has been exceeded
    pub(super) too_deep: bool,
}

impl<'src, 'ast> Parser<'src, 'ast> {
    /// Create a new parser for the given source code.
    ///
    /// Tokenizes the whole buffer. Lexer irregularities are recorded as
    /// recoverable [`ParseErrorKind::LexicalError`]s.
    pub fn new(source: &'src str, arena: &'ast Bump) -> Self {
        let (stream, lex_errors) = TokenStream::from_source(source);
        let errors = lex_errors.into_iter().map(ParseError::from).collect();

        Self {
            source,
            stream,
            errors,
            arena,
            namespaces: Vec::new(),
            classes: Vec::new(),
            access: Access::Public,
            depth: 0,
            too_deep: false,
        }
    }

    /// Parse the whole buffer, recovering from every error.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn parse_translation_unit(&mut self) -> TranslationUnit<'ast> {
        let start = self.stream.position();
        let mut declarations = Vec::new();
        self.parse_scope_body(&mut declarations, None);

        let span = self.stream.span_from(start);
        TranslationUnit::new(
            self.arena.alloc_slice_copy(&declarations),
            self.take_errors().into_vec(),
            span,
        )
    }

    /// Check if there are any errors.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Take the errors, leaving an empty error collection.
    pub fn take_errors(&mut self) -> ParseErrors {
        std::mem::take(&mut self.errors)
    }

    // ========================================================================
    // Token Navigation
    // ========================================================================

    /// Peek at the current token without consuming it.
    #[inline]
    pub fn peek(&self) -> Token<'src> {
        self.stream.peek()
    }

    /// Peek ahead n tokens without consuming.
    #[inline]
    pub fn peek_nth(&self, n: usize) -> Token<'src> {
        self.stream.peek_nth(n)
    }

    /// Get the current token and advance to the next.
    #[inline]
    pub fn advance(&mut self) -> Token<'src> {
        self.stream.advance()
    }

    /// Check if the current token matches the given kind.
    #[inline]
    pub fn check(&self, kind: TokenKind) -> bool {
        self.stream.check(kind)
    }

    /// Check if the current token is EOF.
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.stream.is_eof()
    }

    /// If the current token matches the given kind, consume it.
    #[inline]
    pub fn eat(&mut self, kind: TokenKind) -> Option<Token<'src>> {
        self.stream.eat(kind)
    }

    /// Expect the current token to be of the given kind.
    #[inline]
    pub fn expect(&mut self, kind: TokenKind) -> Result<Token<'src>, ParseError> {
        self.stream.expect(kind)
    }

    /// Check if the current token is the identifier or keyword `name`.
    #[inline]
    pub fn check_name(&self, name: &str) -> bool {
        self.stream.check_name(name)
    }

    /// Consume the identifier or keyword `name`.
    #[inline]
    pub fn eat_name(&mut self, name: &str) -> Option<Token<'src>> {
        self.stream.eat_name(name)
    }

    /// Whether the current token is an identifier that is not reserved.
    pub fn check_plain_identifier(&self) -> bool {
        let token = self.peek();
        token.kind == TokenKind::Identifier && !keywords::is_keyword(token.lexeme)
    }

    /// Expect a non-reserved identifier.
    pub fn expect_identifier(&mut self) -> Result<Token<'src>, ParseError> {
        if self.check_plain_identifier() {
            return Ok(self.advance());
        }
        let token = self.peek();
        let kind = if token.kind == TokenKind::Eof {
            ParseErrorKind::UnexpectedEof
        } else {
            ParseErrorKind::ExpectedIdentifier
        };
        Err(ParseError::new(
            kind,
            token.span,
            format!("expected identifier, found {}", describe(token)),
        ))
    }

    // ========================================================================
    // Arena helpers
    // ========================================================================

    /// Copy a string into the arena.
    #[inline]
    pub(super) fn intern(&self, text: &str) -> &'ast str {
        self.arena.alloc_str(text)
    }

    /// Copy a slice into the arena.
    #[inline]
    pub(super) fn alloc_slice<T: Copy>(&self, items: &[T]) -> &'ast [T] {
        if items.is_empty() {
            return &[];
        }
        self.arena.alloc_slice_copy(items)
    }

    /// The current namespace path, copied into the arena.
    pub(super) fn namespace_snapshot(&self) -> &'ast [&'ast str] {
        self.alloc_slice(&self.namespaces)
    }

    /// Source text from the token at `start` up to (not including) the
    /// token at `end`, with whitespace runs collapsed.
    pub(super) fn text_between(&self, start: usize, end: usize) -> String {
        if end <= start {
            return String::new();
        }
        let from = self.stream.token_at(start).span.offset;
        let to = self.stream.token_at(end - 1).span.end();
        let raw = Span::new(from, to.saturating_sub(from), 0, 0).text(self.source);
        raw.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// Token lexemes from `start` up to `end`, concatenated without spaces.
    pub(super) fn lexemes_between(&self, start: usize, end: usize) -> String {
        (start..end)
            .map(|i| self.stream.token_at(i).lexeme)
            .collect()
    }

    // ========================================================================
    // Error Handling
    // ========================================================================

    /// Record a parse error.
    pub fn error(&mut self, kind: ParseErrorKind, span: Span, message: impl Into<String>) {
        self.errors.push(ParseError::new(kind, span, message));
    }

    /// Run `parse` one nesting level deeper.
    ///
    /// Past [`MAX_NESTING_DEPTH`] a fatal [`ParseErrorKind::NestingTooDeep`]
    /// is recorded once and every nested production fails from then on.
    pub(super) fn nested<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.too_deep || self.depth >= MAX_NESTING_DEPTH {
            let error = ParseError::new(
                ParseErrorKind::NestingTooDeep,
                self.peek().span,
                format!("nesting exceeds {} levels", MAX_NESTING_DEPTH),
            );
            if !self.too_deep {
                self.too_deep = true;
                self.errors.push(error.clone());
            }
            return Err(error);
        }

        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    /// Skip the rest of the current declaration.
    ///
    /// Stops after a `;` or after a braced block at nesting depth zero, and
    /// before a `}` that closes an enclosing scope. Brackets in between are
    /// skipped as balanced groups. An unclosed `{` runs to end of file and is
    /// reported as fatal.
    pub fn synchronize(&mut self) {
        loop {
            let token = self.peek();
            match token.kind {
                TokenKind::Eof | TokenKind::RightBrace => return,
                TokenKind::Semicolon => {
                    self.advance();
                    return;
                }
                TokenKind::LeftBrace => {
                    if self.stream.skip_balanced().is_err() {
                        self.error(
                            ParseErrorKind::UnexpectedEof,
                            token.span,
                            "unclosed '{' reaches end of file",
                        );
                        while !self.is_eof() {
                            self.advance();
                        }
                        return;
                    }
                    self.eat(TokenKind::Semicolon);
                    return;
                }
                TokenKind::LeftParen | TokenKind::LeftBracket => {
                    if self.stream.skip_balanced().is_err() {
                        self.advance();
                    }
                }
                _ => {
                    self.advance();
                }
            }
        }
    }

    /// Skip a braced block, reporting an unclosed one as fatal.
    pub(super) fn skip_block(&mut self) -> Result<(), ParseError> {
        let open = self.peek();
        self.stream.skip_balanced().map(|_| ()).map_err(|_| {
            ParseError::new(
                ParseErrorKind::UnexpectedEof,
                open.span,
                "unclosed '{' reaches end of file",
            )
        })
    }

    /// Skip an expression, returning its text.
    ///
    /// Stops before a top-level `,`, before a closing bracket that was not
    /// opened inside the expression, before `;`, and, when `stop_at_greater`
    /// is set, before a `>` that does not close a template argument list
    /// opened inside the expression. A `<` counts as an opening bracket only
    /// right after a name and when a matching `>` exists.
    pub(super) fn skip_expression(&mut self, stop_at_greater: bool) -> String {
        let start = self.stream.position();
        let mut depth = 0usize;
        let mut angle = 0usize;
        loop {
            let token = self.peek();
            match token.kind {
                TokenKind::Eof | TokenKind::Semicolon => break,
                TokenKind::LeftParen | TokenKind::LeftBracket | TokenKind::LeftBrace => depth += 1,
                TokenKind::RightParen | TokenKind::RightBracket | TokenKind::RightBrace => {
                    if depth == 0 {
                        break;
                    }
                    depth -= 1;
                }
                TokenKind::Comma if depth == 0 && angle == 0 => break,
                TokenKind::Less
                    if depth == 0
                        && self.stream.position() > start
                        && self.stream.previous().kind == TokenKind::Identifier
                        && self.stream.find_matching(self.stream.position()).is_some() =>
                {
                    angle += 1
                }
                TokenKind::Greater if depth == 0 => {
                    if angle > 0 {
                        angle -= 1;
                    } else if stop_at_greater {
                        break;
                    }
                }
                _ => {}
            }
            self.advance();
        }
        self.text_between(start, self.stream.position())
    }

    /// Skip `[[...]]`, `__attribute__((...))`, `__declspec(...)` and
    /// `alignas(...)`. Returns whether anything was skipped.
    pub(super) fn skip_attributes(&mut self) -> bool {
        let mut skipped = false;
        loop {
            let token = self.peek();
            if token.kind == TokenKind::LeftBracket && self.peek_nth(1).kind == TokenKind::LeftBracket {
                if self.stream.skip_balanced().is_err() {
                    return skipped;
                }
            } else if token.kind == TokenKind::Identifier
                && matches!(
                    token.lexeme,
                    "__attribute__" | "__attribute" | "__declspec" | "alignas"
                )
            {
                self.advance();
                if self.check(TokenKind::LeftParen) && self.stream.skip_balanced().is_err() {
                    return true;
                }
            } else {
                return skipped;
            }
            skipped = true;
        }
    }

    /// Skip a `requires` clause: a disjunction/conjunction of primary
    /// constraint expressions.
    pub(super) fn skip_requires_clause(&mut self) {
        if self.eat_name("requires").is_none() {
            return;
        }
        loop {
            if self.check(TokenKind::LeftParen) {
                if self.stream.skip_balanced().is_err() {
                    return;
                }
            } else if self.check(TokenKind::Identifier) {
                self.advance();
                loop {
                    if self.check(TokenKind::Less) && self.stream.skip_balanced().is_ok() {
                        continue;
                    }
                    if self.check(TokenKind::ColonColon) && self.peek_nth(1).kind == TokenKind::Identifier {
                        self.advance();
                        self.advance();
                        continue;
                    }
                    break;
                }
            } else {
                return;
            }
            if self.eat(TokenKind::AmpAmp).is_none() && self.eat(TokenKind::PipePipe).is_none() {
                return;
            }
        }
    }
}

/// Describe a token for an error message: its spelling, or its kind when it
/// has none.
pub(super) fn describe(token: Token<'_>) -> String {
    match token.kind {
        TokenKind::Eof => token.kind.to_string(),
        _ => format!("'{}'", token.lexeme),
    }
}
