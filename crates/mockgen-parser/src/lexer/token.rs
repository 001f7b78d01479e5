//! Token types and definitions for the C++ header lexer.
//!
//! Keywords are not given their own kinds: they lex as [`TokenKind::Identifier`]
//! and are recognized by the parser through [`crate::keywords`]. Every
//! punctuator gets its own variant.

use super::Span;
use std::fmt;

/// A token from the source code.
///
/// The lexeme borrows directly from the source buffer.
#[derive(Clone, Copy, PartialEq)]
pub struct Token<'src> {
    /// The type of token.
    pub kind: TokenKind,
    /// The source text of this token.
    pub lexeme: &'src str,
    /// Location in source.
    pub span: Span,
    /// Whether whitespace or a comment separates this token from the previous one.
    pub space_before: bool,
}

impl<'src> Token<'src> {
    /// Create a new token.
    #[inline]
    pub fn new(kind: TokenKind, lexeme: &'src str, span: Span, space_before: bool) -> Self {
        Self {
            kind,
            lexeme,
            span,
            space_before,
        }
    }

    /// Whether this token is an identifier with the given spelling.
    #[inline]
    pub fn is_name(&self, text: &str) -> bool {
        self.kind == TokenKind::Identifier && self.lexeme == text
    }

    #[inline]
    pub fn category(&self) -> TokenCategory {
        self.kind.category()
    }
}

impl fmt::Debug for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({:?} @ {:?})", self.kind, self.lexeme, self.span)
    }
}

/// Coarse token categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenCategory {
    Name,
    Number,
    String,
    Char,
    /// Operators usable in expressions.
    Operator,
    /// Structural punctuation: brackets, separators, scope.
    Syntax,
    Preprocessor,
    Comment,
    End,
}

/// All possible token kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // =========================================
    // Words and literals
    // =========================================
    /// Identifier or keyword: `foo`, `class`, `MY_MACRO`
    Identifier,
    /// Numeric literal: `42`, `0x1F`, `1'000`, `3.14e-2f`
    Number,
    /// String literal, including prefixed and raw forms: `"a"`, `u8"a"`, `R"(a)"`
    String,
    /// Character literal: `'a'`, `L'\n'`
    Char,

    // =========================================
    // Trivia
    // =========================================
    /// Whole preprocessor line: `#include <x>`
    Preprocessor,
    /// `// ...`
    LineComment,
    /// `/* ... */`
    BlockComment,

    // =========================================
    // Delimiters
    // =========================================
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `[`
    LeftBracket,
    /// `]`
    RightBracket,
    /// `{`
    LeftBrace,
    /// `}`
    RightBrace,
    /// `;`
    Semicolon,
    /// `,`
    Comma,
    /// `:`
    Colon,
    /// `::`
    ColonColon,
    /// `...`
    Ellipsis,

    // =========================================
    // Operators
    // =========================================
    /// `?`
    Question,
    /// `.`
    Dot,
    /// `.*`
    DotStar,
    /// `->`
    Arrow,
    /// `->*`
    ArrowStar,
    /// `~`
    Tilde,
    /// `!`
    Bang,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `%`
    Percent,
    /// `^`
    Caret,
    /// `&`
    Amp,
    /// `|`
    Pipe,
    /// `=`
    Equal,
    /// `<`
    Less,
    /// `>`
    Greater,
    /// `++`
    PlusPlus,
    /// `--`
    MinusMinus,
    /// `+=`
    PlusEqual,
    /// `-=`
    MinusEqual,
    /// `*=`
    StarEqual,
    /// `/=`
    SlashEqual,
    /// `%=`
    PercentEqual,
    /// `^=`
    CaretEqual,
    /// `&=`
    AmpEqual,
    /// `|=`
    PipeEqual,
    /// `<<`
    LessLess,
    /// `<<=`
    LessLessEqual,
    /// `==`
    EqualEqual,
    /// `!=`
    BangEqual,
    /// `<=`
    LessEqual,
    /// `>=`
    GreaterEqual,
    /// `<=>`
    Spaceship,
    /// `&&`
    AmpAmp,
    /// `||`
    PipePipe,
    /// `#` outside a directive
    Hash,
    /// `##` outside a directive
    HashHash,

    // =========================================
    // Special
    // =========================================
    /// A byte the lexer does not recognize.
    Unknown,
    /// End of file
    Eof,
}

impl TokenKind {
    /// The coarse category of this kind.
    pub fn category(self) -> TokenCategory {
        use TokenKind::*;
        match self {
            Identifier => TokenCategory::Name,
            Number => TokenCategory::Number,
            String => TokenCategory::String,
            Char => TokenCategory::Char,
            Preprocessor => TokenCategory::Preprocessor,
            LineComment | BlockComment => TokenCategory::Comment,
            Eof => TokenCategory::End,
            LeftParen | RightParen | LeftBracket | RightBracket | LeftBrace | RightBrace
            | Semicolon | Comma | Colon | ColonColon | Ellipsis | Unknown => {
                TokenCategory::Syntax
            }
            _ => TokenCategory::Operator,
        }
    }

    /// Comments and preprocessor lines; the parser never sees these.
    #[inline]
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            TokenKind::LineComment | TokenKind::BlockComment | TokenKind::Preprocessor
        )
    }

    /// Opening bracket kinds that `find_matching` can balance.
    #[inline]
    pub fn closing(self) -> Option<TokenKind> {
        match self {
            TokenKind::LeftParen => Some(TokenKind::RightParen),
            TokenKind::LeftBracket => Some(TokenKind::RightBracket),
            TokenKind::LeftBrace => Some(TokenKind::RightBrace),
            TokenKind::Less => Some(TokenKind::Greater),
            _ => None,
        }
    }

    /// Get the string representation of this token kind for error messages.
    pub fn description(self) -> &'static str {
        use TokenKind::*;
        match self {
            Identifier => "identifier",
            Number => "number",
            String => "string literal",
            Char => "character literal",
            Preprocessor => "preprocessor directive",
            LineComment | BlockComment => "comment",
            LeftParen => "'('",
            RightParen => "')'",
            LeftBracket => "'['",
            RightBracket => "']'",
            LeftBrace => "'{'",
            RightBrace => "'}'",
            Semicolon => "';'",
            Comma => "','",
            Colon => "':'",
            ColonColon => "'::'",
            Ellipsis => "'...'",
            Question => "'?'",
            Dot => "'.'",
            DotStar => "'.*'",
            Arrow => "'->'",
            ArrowStar => "'->*'",
            Tilde => "'~'",
            Bang => "'!'",
            Plus => "'+'",
            Minus => "'-'",
            Star => "'*'",
            Slash => "'/'",
            Percent => "'%'",
            Caret => "'^'",
            Amp => "'&'",
            Pipe => "'|'",
            Equal => "'='",
            Less => "'<'",
            Greater => "'>'",
            PlusPlus => "'++'",
            MinusMinus => "'--'",
            PlusEqual => "'+='",
            MinusEqual => "'-='",
            StarEqual => "'*='",
            SlashEqual => "'/='",
            PercentEqual => "'%='",
            CaretEqual => "'^='",
            AmpEqual => "'&='",
            PipeEqual => "'|='",
            LessLess => "'<<'",
            LessLessEqual => "'<<='",
            EqualEqual => "'=='",
            BangEqual => "'!='",
            LessEqual => "'<='",
            GreaterEqual => "'>='",
            Spaceship => "'<=>'",
            AmpAmp => "'&&'",
            PipePipe => "'||'",
            Hash => "'#'",
            HashHash => "'##'",
            Unknown => "unknown character",
            Eof => "end of file",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}
