//! Type parsing functions for C++ headers.
//!
//! Implements parsing of type expressions including:
//! - Built-in types spelled with several words (`unsigned long long`)
//! - Qualified names (`::std::chrono::seconds`)
//! - Template argument lists, including function signatures
//!   (`std::function<int (std::string)>`) and non-type arguments
//! - cv-qualifiers, pointers and references
//! - `decltype(...)`

use super::parser::{Parser, describe};
use crate::ast::{ParseError, ParseErrorKind, RefKind, Type};
use crate::keywords::{self, KeywordClass};
use crate::lexer::{Span, TokenKind};

/// Words that qualify a type wherever they appear in it.
const CV_QUALIFIERS: [&str; 2] = ["const", "volatile"];

/// Elaborations that may precede a type name.
const ELABORATIONS: [&str; 5] = ["typename", "struct", "class", "union", "enum"];

impl<'src, 'ast> Parser<'src, 'ast> {
    /// Parse a complete type expression.
    ///
    /// Grammar: `CV* ELABORATION? '::'? BASE TEMPLATE_ARGS? (CV | '*' | '&' | '&&')*`
    ///
    /// Examples:
    /// - `int`
    /// - `const std::vector<int>&`
    /// - `unsigned long long`
    /// - `typename T::value_type*`
    /// - `char* const`
    pub fn parse_type(&mut self) -> Result<Type<'ast>, ParseError> {
        self.nested(Self::parse_type_at_depth)
    }

    fn parse_type_at_depth(&mut self) -> Result<Type<'ast>, ParseError> {
        let start = self.stream.position();
        let mut modifiers: Vec<&'ast str> = Vec::new();

        // Prefix qualifiers and elaborations
        loop {
            let token = self.peek();
            if token.kind != TokenKind::Identifier {
                break;
            }
            if CV_QUALIFIERS.contains(&token.lexeme) {
                push_unique(&mut modifiers, self.intern(token.lexeme));
            } else if ELABORATIONS.contains(&token.lexeme) {
                modifiers.push(self.intern(token.lexeme));
            } else {
                break;
            }
            self.advance();
        }

        let (name, template_args) = self.parse_type_base()?;

        // Suffixes
        let mut pointer_depth = 0u8;
        let mut reference = RefKind::None;
        loop {
            let token = self.peek();
            match token.kind {
                TokenKind::Star => pointer_depth = pointer_depth.saturating_add(1),
                TokenKind::Amp => reference = RefKind::LValue,
                TokenKind::AmpAmp => reference = RefKind::RValue,
                TokenKind::Identifier if CV_QUALIFIERS.contains(&token.lexeme) => {
                    push_unique(&mut modifiers, self.intern(token.lexeme));
                }
                TokenKind::Identifier
                    if matches!(token.lexeme, "__restrict" | "__restrict__" | "restrict") => {}
                _ => break,
            }
            self.advance();
        }

        Ok(Type {
            name,
            modifiers: self.alloc_slice(&modifiers),
            template_args,
            pointer_depth,
            reference,
            signature: None,
            function_pointer: false,
            span: self.stream.span_from(start),
        })
    }

    /// Parse the name part of a type and the template arguments of its last
    /// segment.
    fn parse_type_base(&mut self) -> Result<(&'ast str, &'ast [Type<'ast>]), ParseError> {
        let token = self.peek();

        // Built-in types, possibly several words: `unsigned long int`
        if token.kind == TokenKind::Identifier
            && keywords::classify(token.lexeme) == Some(KeywordClass::BuiltinType)
        {
            let mut words = Vec::new();
            while self.peek().kind == TokenKind::Identifier
                && keywords::classify(self.peek().lexeme) == Some(KeywordClass::BuiltinType)
            {
                words.push(self.advance().lexeme);
            }
            return Ok((self.intern(&words.join(" ")), &[]));
        }

        if token.is_name("auto") {
            self.advance();
            return Ok((self.intern("auto"), &[]));
        }

        if token.is_name("decltype") {
            let start = self.stream.position();
            self.advance();
            if self.check(TokenKind::LeftParen) {
                self.stream.skip_balanced()?;
            }
            let text = self.text_between(start, self.stream.position());
            return Ok((self.intern(&text), &[]));
        }

        self.parse_qualified_type_name()
    }

    /// Parse `'::'? NAME (TEMPLATE_ARGS? '::' 'template'? NAME)* TEMPLATE_ARGS?`.
    ///
    /// Template arguments on intermediate segments are folded into the name
    /// text; only the last segment's arguments are kept structurally.
    fn parse_qualified_type_name(&mut self) -> Result<(&'ast str, &'ast [Type<'ast>]), ParseError> {
        let mut name = String::new();
        if self.eat(TokenKind::ColonColon).is_some() {
            name.push_str("::");
        }

        loop {
            let token = self.peek();
            if token.kind != TokenKind::Identifier || keywords::is_keyword(token.lexeme) {
                let kind = if token.kind == TokenKind::Eof {
                    ParseErrorKind::UnexpectedEof
                } else {
                    ParseErrorKind::ExpectedType
                };
                return Err(ParseError::new(
                    kind,
                    token.span,
                    format!("expected type, found {}", describe(token)),
                ));
            }
            self.advance();
            name.push_str(token.lexeme);

            let args = if self.check(TokenKind::Less) {
                self.parse_template_args()?
            } else {
                &[]
            };

            if self.check(TokenKind::ColonColon) && self.peek_nth(1).kind == TokenKind::Identifier {
                self.advance();
                self.eat_name("template");
                if !args.is_empty() {
                    name.push_str(&render_args(args));
                }
                name.push_str("::");
                continue;
            }

            return Ok((self.intern(&name), args));
        }
    }

    /// Parse a template argument list starting at `<`.
    ///
    /// Each argument is parsed as a type when possible. Anything else (a
    /// constant, an expression) is kept as raw text in a [`Type`] whose
    /// `name` is that text.
    pub fn parse_template_args(&mut self) -> Result<&'ast [Type<'ast>], ParseError> {
        let open = self.expect(TokenKind::Less)?;
        if self.eat(TokenKind::Greater).is_some() {
            return Ok(&[]);
        }

        let mut args = Vec::new();
        loop {
            let checkpoint = self.stream.checkpoint();
            let arg = match self.parse_template_arg() {
                Ok(arg) if self.at_template_arg_end() => arg,
                Err(err) if self.too_deep => return Err(err),
                _ => {
                    self.stream.restore(checkpoint);
                    let start = self.stream.position();
                    let text = self.skip_expression(true);
                    if text.is_empty() {
                        return Err(self.template_args_error(open.span));
                    }
                    Type::named(self.intern(&text), self.stream.span_from(start))
                }
            };

            let arg = if self.eat(TokenKind::Ellipsis).is_some() {
                Type {
                    name: self.intern(&format!("{}...", arg.name)),
                    ..arg
                }
            } else {
                arg
            };
            args.push(arg);

            if self.eat(TokenKind::Comma).is_some() {
                continue;
            }
            if self.eat(TokenKind::Greater).is_some() {
                break;
            }
            return Err(self.template_args_error(open.span));
        }

        Ok(self.alloc_slice(&args))
    }

    fn at_template_arg_end(&self) -> bool {
        matches!(
            self.peek().kind,
            TokenKind::Comma | TokenKind::Greater | TokenKind::Ellipsis
        )
    }

    fn template_args_error(&self, open: Span) -> ParseError {
        let token = self.peek();
        let kind = if token.kind == TokenKind::Eof {
            ParseErrorKind::UnexpectedEof
        } else {
            ParseErrorKind::ExpectedTemplateArgs
        };
        ParseError::new(
            kind,
            token.span,
            format!(
                "expected ',' or '>' to continue template arguments opened at {}, found {}",
                open,
                describe(token)
            ),
        )
    }

    /// Parse one template argument: a type, optionally followed by a
    /// function signature (`int (std::string)`, `void (*)(int)`).
    fn parse_template_arg(&mut self) -> Result<Type<'ast>, ParseError> {
        let start = self.stream.position();
        let ty = self.parse_type()?;
        if !self.check(TokenKind::LeftParen) {
            return Ok(ty);
        }

        let function_pointer = self.peek_nth(1).kind == TokenKind::Star
            && self.peek_nth(2).kind == TokenKind::RightParen
            && self.peek_nth(3).kind == TokenKind::LeftParen;
        if function_pointer {
            self.advance();
            self.advance();
            self.advance();
        }
        let signature = self.parse_signature_types()?;

        Ok(Type {
            signature: Some(signature),
            function_pointer,
            span: self.stream.span_from(start),
            ..ty
        })
    }

    /// Parse the parameter types of a function type: `(int, const char*)`.
    ///
    /// Parameter names are allowed and dropped; `(void)` is empty.
    pub(super) fn parse_signature_types(&mut self) -> Result<&'ast [Type<'ast>], ParseError> {
        self.expect(TokenKind::LeftParen)?;
        if self.check_name("void") && self.peek_nth(1).kind == TokenKind::RightParen {
            self.advance();
        }
        let mut types = Vec::new();
        while !self.check(TokenKind::RightParen) {
            if let Some(token) = self.eat(TokenKind::Ellipsis) {
                types.push(Type::named(self.intern("..."), token.span));
            } else {
                let ty = self.parse_type()?;
                types.push(ty);
                if self.check_plain_identifier() {
                    self.advance();
                }
                while self.check(TokenKind::LeftBracket) {
                    self.stream.skip_balanced()?;
                }
            }
            if self.eat(TokenKind::Comma).is_none() {
                break;
            }
        }
        self.expect(TokenKind::RightParen)?;
        Ok(self.alloc_slice(&types))
    }
}

fn push_unique<'ast>(modifiers: &mut Vec<&'ast str>, word: &'ast str) {
    if !modifiers.contains(&word) {
        modifiers.push(word);
    }
}

fn render_args(args: &[Type<'_>]) -> String {
    let rendered: Vec<String> = args.iter().map(Type::render).collect();
    format!("<{}>", rendered.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bumpalo::Bump;

    fn parse_type_str<'ast>(source: &str, arena: &'ast Bump) -> Type<'ast> {
        let mut parser = Parser::new(source, arena);
        parser.parse_type().expect("type should parse")
    }

    #[test]
    fn builtin_types() {
        let arena = Bump::new();
        assert_eq!(parse_type_str("int", &arena).render(), "int");
        assert_eq!(
            parse_type_str("unsigned long long int", &arena).name,
            "unsigned long long int"
        );
        assert!(parse_type_str("void", &arena).is_void());
    }

    #[test]
    fn qualified_names() {
        let arena = Bump::new();
        assert_eq!(parse_type_str("std::string", &arena).name, "std::string");
        assert_eq!(parse_type_str("::std::string", &arena).name, "::std::string");
        assert_eq!(
            parse_type_str("typename std::vector<T>::template rebind<U>::other", &arena).render(),
            "typename std::vector<T>::rebind<U>::other"
        );
    }

    #[test]
    fn modifiers_pointers_and_references() {
        let arena = Bump::new();
        let ty = parse_type_str("const string&", &arena);
        assert_eq!(ty.render(), "const string&");
        assert_eq!(ty.reference, RefKind::LValue);

        let ty = parse_type_str("char const * const *", &arena);
        assert_eq!(ty.render(), "const char**");
        assert_eq!(ty.pointer_depth, 2);

        let ty = parse_type_str("Foo&&", &arena);
        assert_eq!(ty.reference, RefKind::RValue);

        let ty = parse_type_str("int* __restrict p", &arena);
        assert_eq!(ty.render(), "int*");
    }

    #[test]
    fn template_arguments() {
        let arena = Bump::new();
        let ty = parse_type_str("map<int, string>", &arena);
        assert_eq!(ty.template_args.len(), 2);
        assert_eq!(ty.render(), "map<int, string>");

        let ty = parse_type_str("std::vector<std::list<int>>", &arena);
        assert_eq!(ty.render(), "std::vector<std::list<int>>");

        let ty = parse_type_str("vector<int>*", &arena);
        assert_eq!(ty.render(), "vector<int>*");
    }

    #[test]
    fn non_type_template_arguments() {
        let arena = Bump::new();
        let ty = parse_type_str("std::array<int, 3>", &arena);
        assert_eq!(ty.template_args[1].name, "3");

        let ty = parse_type_str("Buffer<N + 1, (A > B)>", &arena);
        assert_eq!(ty.render(), "Buffer<N + 1, (A > B)>");

        let ty = parse_type_str("std::tuple<Ts...>", &arena);
        assert_eq!(ty.render(), "std::tuple<Ts...>");

        let ty = parse_type_str("Empty<>", &arena);
        assert_eq!(ty.render(), "Empty");
    }

    #[test]
    fn function_signatures_in_template_arguments() {
        let arena = Bump::new();
        let ty = parse_type_str("std::function<int (std::string)>", &arena);
        assert_eq!(ty.render(), "std::function<int (std::string)>");

        let ty = parse_type_str("std::function<void(int a, const char* b)>", &arena);
        assert_eq!(ty.render(), "std::function<void (int, const char*)>");

        let ty = parse_type_str("Callback<void (*)(int)>", &arena);
        assert_eq!(ty.render(), "Callback<void (*)(int)>");

        let ty = parse_type_str("std::function<void(void)>", &arena);
        assert_eq!(ty.render(), "std::function<void ()>");
    }

    #[test]
    fn decltype_and_auto() {
        let arena = Bump::new();
        assert_eq!(parse_type_str("decltype(a + b)", &arena).name, "decltype(a + b)");
        assert_eq!(parse_type_str("const auto&", &arena).render(), "const auto&");
    }

    #[test]
    fn unbalanced_template_arguments_fail() {
        let arena = Bump::new();
        let mut parser = Parser::new(
            "std::function<void(\n const vector<std::list<int>>&, int> FooType;",
            &arena,
        );
        let err = parser.parse_type().unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::ExpectedTemplateArgs);
    }

    #[test]
    fn keyword_is_not_a_type() {
        let arena = Bump::new();
        let mut parser = Parser::new("return x;", &arena);
        let err = parser.parse_type().unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::ExpectedType);

        let mut parser = Parser::new("", &arena);
        let err = parser.parse_type().unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedEof);
    }
}
