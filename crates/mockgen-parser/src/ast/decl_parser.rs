//! Declaration parsing functions for C++ headers.
//!
//! Implements parsing of everything that can appear at namespace or class
//! scope: namespaces, classes, templates, enums, typedefs, using-declarations,
//! functions and variables. Constructs that cannot be parsed are reported and
//! skipped up to the next `;` or braced block.

use super::parser::{Parser, describe};
use crate::ast::{
    Access, BaseSpecifier, Class, ClassKind, Declaration, Enum, Function, FunctionModifiers,
    Parameter, ParseError, ParseErrorKind, TemplateParam, Type, Typedef, Using, UsingKind,
    Variable,
};
use crate::keywords;
use crate::lexer::{Span, Token, TokenKind};

/// Keywords that start a declaration of their own.
const DECLARATION_KEYWORDS: [&str; 9] = [
    "class",
    "struct",
    "union",
    "enum",
    "namespace",
    "template",
    "typedef",
    "using",
    "friend",
];

/// A template header in front of a declaration. `Some(&[])` is `template <>`.
type TemplateHeader<'ast> = Option<&'ast [TemplateParam<'ast>]>;

/// Outcome of parsing a `class`/`struct`/`union`/`enum` specifier.
enum Specifier<'ast> {
    /// A definition with a body; the cursor is right after the closing `}`.
    Definition(Declaration<'ast>),
    /// A forward declaration, already terminated by `;`.
    Forward(Option<Declaration<'ast>>),
    /// An elaborated type specifier; the cursor was rewound to the keyword.
    Elaborated,
}

impl<'src, 'ast> Parser<'src, 'ast> {
    /// Parse declarations until end of file, or until the `}` matching
    /// `open` when one is given.
    ///
    /// A `}` at file scope and end of file inside braces are reported as
    /// fatal. Every iteration consumes at least one token.
    pub(super) fn parse_scope_body(
        &mut self,
        out: &mut Vec<Declaration<'ast>>,
        open: Option<Token<'src>>,
    ) {
        loop {
            if self.too_deep {
                return;
            }
            let token = self.peek();
            match (token.kind, open) {
                (TokenKind::Eof, None) => return,
                (TokenKind::Eof, Some(open)) => {
                    if !self.errors.has_fatal() {
                        self.error(
                            ParseErrorKind::UnexpectedEof,
                            open.span,
                            "'{' is not closed before end of file",
                        );
                    }
                    return;
                }
                (TokenKind::RightBrace, Some(_)) => {
                    self.advance();
                    return;
                }
                (TokenKind::RightBrace, None) => {
                    self.error(
                        ParseErrorKind::MismatchedDelimiter,
                        token.span,
                        "'}' does not close any scope",
                    );
                    self.advance();
                    continue;
                }
                _ => {}
            }

            let start = self.stream.position();
            if let Err(err) = self.parse_declaration(out, None) {
                if self.too_deep {
                    return;
                }
                self.errors.push(err);
                self.synchronize();
            }
            if self.stream.position() == start {
                self.advance();
            }
        }
    }

    /// Parse one declaration, appending whatever it declares to `out`.
    pub fn parse_declaration(
        &mut self,
        out: &mut Vec<Declaration<'ast>>,
        template: TemplateHeader<'ast>,
    ) -> Result<(), ParseError> {
        self.nested(|parser| parser.parse_declaration_at_depth(out, template))
    }

    fn parse_declaration_at_depth(
        &mut self,
        out: &mut Vec<Declaration<'ast>>,
        template: TemplateHeader<'ast>,
    ) -> Result<(), ParseError> {
        let token = self.peek();
        match token.kind {
            TokenKind::Semicolon => {
                self.advance();
                return Ok(());
            }
            TokenKind::LeftBracket if self.peek_nth(1).kind == TokenKind::LeftBracket => {
                self.skip_attributes();
                return self.parse_declaration(out, template);
            }
            TokenKind::Tilde | TokenKind::ColonColon => return self.parse_member(out, template),
            TokenKind::Identifier => {}
            TokenKind::Eof => {
                return Err(ParseError::new(
                    ParseErrorKind::UnexpectedEof,
                    token.span,
                    "expected declaration, found end of file",
                ));
            }
            _ => {
                return Err(ParseError::new(
                    ParseErrorKind::ExpectedDeclaration,
                    token.span,
                    format!("expected declaration, found {}", describe(token)),
                ));
            }
        }

        let next = self.peek_nth(1);
        match token.lexeme {
            "namespace" => self.parse_namespace(out),
            "inline" if next.is_name("namespace") => {
                self.advance();
                self.parse_namespace(out)
            }
            "template" => self.parse_template_declaration(out),
            "typedef" => self.parse_typedef(out),
            "using" => self.parse_using(out, template),
            "extern" if next.kind == TokenKind::String => self.parse_linkage_specification(out),
            "extern" if next.is_name("template") => {
                self.synchronize();
                Ok(())
            }
            "friend" | "static_assert" => {
                self.synchronize();
                Ok(())
            }
            "export" => {
                self.advance();
                self.parse_declaration(out, template)
            }
            "public" | "protected" | "private" => self.parse_access_label(),
            "class" | "struct" | "union" => self.parse_class(out, template),
            "enum" => self.parse_enum(out),
            _ if next.kind == TokenKind::Colon && !keywords::is_keyword(token.lexeme) => {
                // Section labels such as Qt's `signals:`
                self.advance();
                self.advance();
                Ok(())
            }
            _ => self.parse_member(out, template),
        }
    }

    // ========================================================================
    // Scopes
    // ========================================================================

    /// Parse `namespace A::B { ... }`, `namespace { ... }` or a namespace
    /// alias. Contents are appended to `out` directly.
    fn parse_namespace(&mut self, out: &mut Vec<Declaration<'ast>>) -> Result<(), ParseError> {
        self.advance();
        self.skip_attributes();

        let mut segments = Vec::new();
        if !self.check(TokenKind::LeftBrace) {
            loop {
                self.eat_name("inline");
                let name = self.expect_identifier()?;
                segments.push(self.intern(name.lexeme));
                if self.eat(TokenKind::ColonColon).is_none() {
                    break;
                }
            }
            if self.check(TokenKind::Equal) {
                // namespace alias
                self.synchronize();
                return Ok(());
            }
        } else {
            segments.push(self.intern(""));
        }
        self.skip_attributes();

        let open = self.expect(TokenKind::LeftBrace)?;
        let depth = self.namespaces.len();
        self.namespaces.extend(segments);
        self.parse_scope_body(out, Some(open));
        self.namespaces.truncate(depth);
        Ok(())
    }

    /// Parse `extern "C" { ... }` or `extern "C" declaration`.
    fn parse_linkage_specification(
        &mut self,
        out: &mut Vec<Declaration<'ast>>,
    ) -> Result<(), ParseError> {
        self.advance();
        self.advance();
        match self.eat(TokenKind::LeftBrace) {
            Some(open) => {
                self.parse_scope_body(out, Some(open));
                Ok(())
            }
            None => self.parse_declaration(out, None),
        }
    }

    /// Parse `public:`, `protected:` or `private:`, also with a trailing
    /// word such as Qt's `public slots:`.
    fn parse_access_label(&mut self) -> Result<(), ParseError> {
        let token = self.advance();
        if self.check_plain_identifier() && self.peek_nth(1).kind == TokenKind::Colon {
            self.advance();
        }
        self.expect(TokenKind::Colon)?;
        if let Some(access) = Access::from_keyword(token.lexeme) {
            self.access = access;
        }
        Ok(())
    }

    // ========================================================================
    // Templates
    // ========================================================================

    /// Parse a `template` declaration.
    ///
    /// Explicit instantiations (`template class X<int>;`) are skipped. The
    /// parameter list is attached to the declaration that follows it.
    fn parse_template_declaration(
        &mut self,
        out: &mut Vec<Declaration<'ast>>,
    ) -> Result<(), ParseError> {
        self.advance();
        if !self.check(TokenKind::Less) {
            self.synchronize();
            return Ok(());
        }
        let params = self.parse_template_params()?;
        self.skip_requires_clause();

        // Member template of a class template: the inner header applies.
        if self.check_name("template") {
            return self.parse_template_declaration(out);
        }
        self.parse_declaration(out, Some(params))
    }

    /// Parse `<...>` of a template header.
    pub fn parse_template_params(&mut self) -> Result<&'ast [TemplateParam<'ast>], ParseError> {
        let open = self.expect(TokenKind::Less)?;
        if self.eat(TokenKind::Greater).is_some() {
            return Ok(&[]);
        }

        let mut params = Vec::new();
        loop {
            params.push(self.parse_template_param()?);
            if self.eat(TokenKind::Comma).is_some() {
                continue;
            }
            if self.eat(TokenKind::Greater).is_some() {
                break;
            }
            let token = self.peek();
            return Err(ParseError::new(
                ParseErrorKind::ExpectedTemplateArgs,
                token.span,
                format!(
                    "expected ',' or '>' in template parameter list opened at {}, found {}",
                    open.span,
                    describe(token)
                ),
            ));
        }
        Ok(self.alloc_slice(&params))
    }

    fn parse_template_param(&mut self) -> Result<TemplateParam<'ast>, ParseError> {
        let start = self.stream.position();

        let mut template_template = false;
        if self.eat_name("template").is_some() {
            template_template = true;
            if self.check(TokenKind::Less) {
                self.stream.skip_balanced()?;
            }
        }

        let elaborated_type = self.peek_nth(1).kind == TokenKind::Identifier
            && self.peek_nth(2).kind == TokenKind::ColonColon;
        let is_type_param = template_template
            || ((self.check_name("typename") || self.check_name("class")) && !elaborated_type);

        let bound = if is_type_param {
            if self.eat_name("typename").is_none() && self.eat_name("class").is_none() {
                let token = self.peek();
                return Err(ParseError::new(
                    ParseErrorKind::ExpectedToken,
                    token.span,
                    format!("expected 'class' or 'typename', found {}", describe(token)),
                ));
            }
            None
        } else {
            Some(self.parse_type()?)
        };

        let variadic = self.eat(TokenKind::Ellipsis).is_some();
        let name = if self.check_plain_identifier() {
            self.intern(self.peek().lexeme)
        } else {
            ""
        };
        if !name.is_empty() {
            self.advance();
        }

        let default = if self.eat(TokenKind::Equal).is_some() {
            let text = self.skip_expression(true);
            Some(self.intern(&text))
        } else {
            None
        };

        Ok(TemplateParam {
            name,
            bound,
            default,
            variadic,
            template_template,
            span: self.stream.span_from(start),
        })
    }

    // ========================================================================
    // Classes and enums
    // ========================================================================

    fn parse_class(
        &mut self,
        out: &mut Vec<Declaration<'ast>>,
        template: TemplateHeader<'ast>,
    ) -> Result<(), ParseError> {
        match self.parse_class_specifier(template)? {
            Specifier::Definition(class) => {
                out.push(class);
                self.finish_type_definition();
                Ok(())
            }
            Specifier::Forward(class) => {
                out.extend(class);
                Ok(())
            }
            Specifier::Elaborated => self.parse_member(out, template),
        }
    }

    /// Parse a class head and, when present, its body.
    fn parse_class_specifier(
        &mut self,
        template: TemplateHeader<'ast>,
    ) -> Result<Specifier<'ast>, ParseError> {
        let checkpoint = self.stream.checkpoint();
        let start = self.stream.position();
        let keyword = self.advance();
        let Some(kind) = ClassKind::from_keyword(keyword.lexeme) else {
            self.stream.restore(checkpoint);
            return Ok(Specifier::Elaborated);
        };

        self.skip_class_head_annotations();

        // Only the last segment of a qualified name is kept.
        let mut name = "";
        if self.check_plain_identifier() {
            loop {
                name = self.advance().lexeme;
                if self.check(TokenKind::ColonColon) && self.peek_nth(1).kind == TokenKind::Identifier {
                    self.advance();
                    continue;
                }
                break;
            }
        }

        let specialization = if !name.is_empty() && self.check(TokenKind::Less) {
            match self.parse_template_args() {
                Ok(args) => Some(args),
                Err(_) => {
                    self.stream.restore(checkpoint);
                    return Ok(Specifier::Elaborated);
                }
            }
        } else {
            None
        };

        let is_final = (self.check_name("final") || self.check_name("sealed"))
            && matches!(self.peek_nth(1).kind, TokenKind::LeftBrace | TokenKind::Colon);
        if is_final {
            self.advance();
        }

        match self.peek().kind {
            TokenKind::Semicolon if !name.is_empty() => {
                self.advance();
                // A templated forward declaration declares nothing to mock.
                if template.is_some() {
                    return Ok(Specifier::Forward(None));
                }
                let class = Class {
                    kind,
                    name: self.intern(name),
                    bases: &[],
                    namespace: self.namespace_snapshot(),
                    templated_types: &[],
                    specialization,
                    body: None,
                    is_final,
                    span: self.stream.span_from(start),
                };
                return Ok(Specifier::Forward(Some(Declaration::Class(class))));
            }
            TokenKind::Colon | TokenKind::LeftBrace => {}
            _ => {
                self.stream.restore(checkpoint);
                return Ok(Specifier::Elaborated);
            }
        }

        let bases = if self.check(TokenKind::Colon) {
            self.advance();
            self.parse_base_specifiers(kind)?
        } else {
            &[]
        };

        let open = self.expect(TokenKind::LeftBrace)?;
        let name = self.intern(name);

        let saved_access = std::mem::replace(&mut self.access, kind.default_access());
        self.classes.push(name);
        let mut members = Vec::new();
        self.parse_scope_body(&mut members, Some(open));
        self.classes.pop();
        self.access = saved_access;

        let class = Class {
            kind,
            name,
            bases,
            namespace: self.namespace_snapshot(),
            templated_types: template.unwrap_or_default(),
            specialization,
            body: Some(self.alloc_slice(&members)),
            is_final,
            span: self.stream.span_from(start),
        };
        Ok(Specifier::Definition(Declaration::Class(class)))
    }

    /// Skip attributes and storage-specifier macros between the class
    /// keyword and the class name: `class DLL_EXPORT Foo`,
    /// `class DECLSPEC_UUID("...") Foo`.
    fn skip_class_head_annotations(&mut self) {
        loop {
            if self.skip_attributes() {
                continue;
            }
            let token = self.peek();
            if token.kind != TokenKind::Identifier || !keywords::looks_like_macro(token.lexeme) {
                return;
            }
            let next = self.peek_nth(1);
            if next.kind == TokenKind::LeftParen {
                let Some(close) = self.stream.find_matching(self.stream.position() + 1) else {
                    return;
                };
                if self.stream.token_at(close + 1).kind != TokenKind::Identifier {
                    return;
                }
                self.advance();
                // Matching was checked above.
                let _ = self.stream.skip_balanced();
            } else if next.kind == TokenKind::Identifier
                && !matches!(next.lexeme, "final" | "sealed")
                && !keywords::is_keyword(next.lexeme)
            {
                self.advance();
            } else {
                return;
            }
        }
    }

    /// Parse the base list after `:`.
    fn parse_base_specifiers(
        &mut self,
        kind: ClassKind,
    ) -> Result<&'ast [BaseSpecifier<'ast>], ParseError> {
        let mut bases = Vec::new();
        loop {
            self.skip_attributes();
            let mut access = kind.default_access();
            let mut is_virtual = false;
            loop {
                if self.eat_name("virtual").is_some() {
                    is_virtual = true;
                } else if let Some(explicit) = Access::from_keyword(self.peek().lexeme)
                    .filter(|_| self.check(TokenKind::Identifier))
                {
                    self.advance();
                    access = explicit;
                } else {
                    break;
                }
            }
            let ty = self.parse_type()?;
            self.eat(TokenKind::Ellipsis);
            bases.push(BaseSpecifier {
                ty,
                access,
                is_virtual,
            });
            if self.eat(TokenKind::Comma).is_none() {
                break;
            }
        }
        Ok(self.alloc_slice(&bases))
    }

    /// Skip declarators after the `}` of a class or enum definition, up to
    /// and including the `;`.
    fn finish_type_definition(&mut self) {
        if self.eat(TokenKind::Semicolon).is_some() {
            return;
        }
        let token = self.peek();
        let starts_declaration = token.kind == TokenKind::Identifier
            && DECLARATION_KEYWORDS.contains(&token.lexeme);
        if starts_declaration || matches!(token.kind, TokenKind::RightBrace | TokenKind::Eof) {
            let previous = self.stream.previous();
            self.error(
                ParseErrorKind::MissingSemicolon,
                previous.span,
                "expected ';' after type definition",
            );
            return;
        }
        self.synchronize();
    }

    fn parse_enum(&mut self, out: &mut Vec<Declaration<'ast>>) -> Result<(), ParseError> {
        match self.parse_enum_specifier()? {
            Specifier::Definition(decl) => {
                out.push(decl);
                self.finish_type_definition();
                Ok(())
            }
            Specifier::Forward(decl) => {
                out.extend(decl);
                Ok(())
            }
            Specifier::Elaborated => self.parse_member(out, None),
        }
    }

    /// Parse `enum [class|struct] [Name] [: type] ({...} | ;)`.
    fn parse_enum_specifier(&mut self) -> Result<Specifier<'ast>, ParseError> {
        let checkpoint = self.stream.checkpoint();
        let start = self.stream.position();
        self.advance();

        let is_scoped = self.eat_name("class").is_some() || self.eat_name("struct").is_some();
        self.skip_attributes();

        let mut name = "";
        if self.check_plain_identifier() {
            loop {
                name = self.advance().lexeme;
                if self.check(TokenKind::ColonColon) && self.peek_nth(1).kind == TokenKind::Identifier {
                    self.advance();
                    continue;
                }
                break;
            }
        }

        let underlying = if self.check(TokenKind::Colon) {
            self.advance();
            Some(self.parse_type()?)
        } else {
            None
        };

        let enumerators = match self.peek().kind {
            TokenKind::LeftBrace => Some(self.parse_enumerators()?),
            TokenKind::Semicolon if !name.is_empty() => {
                self.advance();
                None
            }
            _ => {
                self.stream.restore(checkpoint);
                return Ok(Specifier::Elaborated);
            }
        };

        let decl = Declaration::Enum(Enum {
            name: self.intern(name),
            is_scoped,
            underlying,
            enumerators,
            namespace: self.namespace_snapshot(),
            span: self.stream.span_from(start),
        });
        Ok(match enumerators {
            Some(_) => Specifier::Definition(decl),
            None => Specifier::Forward(Some(decl)),
        })
    }

    fn parse_enumerators(&mut self) -> Result<&'ast [&'ast str], ParseError> {
        let open = self.expect(TokenKind::LeftBrace)?;
        let mut names = Vec::new();
        loop {
            let token = self.peek();
            match token.kind {
                TokenKind::RightBrace => {
                    self.advance();
                    break;
                }
                TokenKind::Eof => {
                    return Err(ParseError::new(
                        ParseErrorKind::UnexpectedEof,
                        open.span,
                        "enum body is not closed before end of file",
                    ));
                }
                TokenKind::Identifier => {
                    self.advance();
                    names.push(self.intern(token.lexeme));
                    self.skip_attributes();
                    if self.eat(TokenKind::Equal).is_some() {
                        self.skip_expression(false);
                    }
                }
                TokenKind::LeftParen | TokenKind::LeftBracket => {
                    self.stream.skip_balanced()?;
                }
                _ => {
                    self.advance();
                }
            }
            self.eat(TokenKind::Comma);
        }
        Ok(self.alloc_slice(&names))
    }

    // ========================================================================
    // Typedef and using
    // ========================================================================

    /// Parse a `typedef`.
    ///
    /// Tries, in order: a typedef of an inline class or enum definition, a
    /// structurally parsed type with its declarator, and finally a raw scan
    /// to the terminating `;` that takes the introduced name from a
    /// `(*Name)` declarator or the last identifier.
    fn parse_typedef(&mut self, out: &mut Vec<Declaration<'ast>>) -> Result<(), ParseError> {
        let start = self.stream.position();
        self.advance();
        let body_start = self.stream.position();
        let body_checkpoint = self.stream.checkpoint();

        let token = self.peek();
        let is_specifier = token.kind == TokenKind::Identifier
            && matches!(token.lexeme, "class" | "struct" | "union" | "enum");
        if is_specifier && self.definition_follows() {
            let specifier = if token.lexeme == "enum" {
                self.parse_enum_specifier()?
            } else {
                self.parse_class_specifier(None)?
            };
            if let Specifier::Definition(decl) = specifier {
                if decl.name().is_some() {
                    out.push(decl);
                }
                let aliases = self.parse_alias_names()?;
                let raw = self.text_between(body_start, self.stream.position());
                self.expect(TokenKind::Semicolon)?;
                for alias in aliases {
                    out.push(self.typedef_node(alias, None, &raw, start));
                }
                return Ok(());
            }
            self.stream.restore(body_checkpoint);
        }

        let checkpoint = self.stream.checkpoint();
        match self.parse_typedef_declarators() {
            Ok(declarators) => {
                let raw = self.text_between(body_start, self.stream.position());
                self.advance();
                for (name, ty) in declarators {
                    out.push(self.typedef_node(name, Some(ty), &raw, start));
                }
                Ok(())
            }
            Err(_) => {
                self.stream.restore(checkpoint);
                self.parse_raw_typedef(out, start, body_start)
            }
        }
    }

    /// Whether a `{` comes before the next `;`.
    fn definition_follows(&self) -> bool {
        let mut i = self.stream.position();
        loop {
            match self.stream.token_at(i).kind {
                TokenKind::LeftBrace => return true,
                TokenKind::Semicolon | TokenKind::RightBrace | TokenKind::Eof => return false,
                _ => i += 1,
            }
        }
    }

    /// Names after the `}` of `typedef struct {...} A, *PA;`.
    fn parse_alias_names(&mut self) -> Result<Vec<&'ast str>, ParseError> {
        let mut names = Vec::new();
        loop {
            while self.eat(TokenKind::Star).is_some() || self.eat(TokenKind::Amp).is_some() {}
            let name = self.expect_identifier()?;
            names.push(self.intern(name.lexeme));
            while self.check(TokenKind::LeftBracket) {
                self.stream.skip_balanced()?;
            }
            if self.eat(TokenKind::Comma).is_none() {
                return Ok(names);
            }
        }
    }

    /// Parse `TYPE DECLARATOR (',' DECLARATOR)* ';'` of a typedef, leaving
    /// the cursor on the `;`.
    fn parse_typedef_declarators(&mut self) -> Result<Vec<(&'ast str, Type<'ast>)>, ParseError> {
        let base = self.parse_type()?;
        let mut declarators = Vec::new();
        let mut ty = base;
        loop {
            let name;
            if self.check(TokenKind::LeftParen) && self.peek_nth(1).kind == TokenKind::Star {
                // (*Name)(params)
                self.advance();
                while self.eat(TokenKind::Star).is_some() {}
                name = self.expect_identifier()?;
                self.expect(TokenKind::RightParen)?;
                let signature = self.parse_signature_types()?;
                ty = Type {
                    signature: Some(signature),
                    function_pointer: true,
                    ..ty
                };
            } else {
                name = self.expect_identifier()?;
                while self.check(TokenKind::LeftBracket) {
                    self.stream.skip_balanced()?;
                }
                if self.check(TokenKind::LeftParen) {
                    let signature = self.parse_signature_types()?;
                    ty = Type {
                        signature: Some(signature),
                        ..ty
                    };
                }
            }
            declarators.push((self.intern(name.lexeme), ty));

            if self.eat(TokenKind::Comma).is_none() {
                break;
            }
            let mut pointer_depth = 0u8;
            while self.eat(TokenKind::Star).is_some() {
                pointer_depth = pointer_depth.saturating_add(1);
            }
            ty = Type {
                pointer_depth: base.pointer_depth.saturating_add(pointer_depth),
                ..base
            };
        }

        if !self.check(TokenKind::Semicolon) {
            let token = self.peek();
            return Err(ParseError::new(
                ParseErrorKind::MissingSemicolon,
                token.span,
                format!("expected ';' after typedef, found {}", describe(token)),
            ));
        }
        Ok(declarators)
    }

    /// Scan a typedef the type parser could not follow, such as one with
    /// unbalanced template brackets.
    fn parse_raw_typedef(
        &mut self,
        out: &mut Vec<Declaration<'ast>>,
        start: usize,
        body_start: usize,
    ) -> Result<(), ParseError> {
        let mut depth = 0usize;
        let mut last_name: Option<Token<'src>> = None;
        let mut pointer_name: Option<Token<'src>> = None;
        loop {
            let token = self.peek();
            match token.kind {
                TokenKind::Eof => break,
                TokenKind::Semicolon if depth == 0 => break,
                TokenKind::RightBrace if depth == 0 => break,
                TokenKind::LeftBrace => depth += 1,
                TokenKind::RightBrace => depth -= 1,
                TokenKind::LeftParen
                    if pointer_name.is_none()
                        && self.peek_nth(1).kind == TokenKind::Star
                        && self.peek_nth(2).kind == TokenKind::Identifier
                        && self.peek_nth(3).kind == TokenKind::RightParen =>
                {
                    pointer_name = Some(self.peek_nth(2));
                }
                TokenKind::Identifier if !keywords::is_keyword(token.lexeme) => {
                    last_name = Some(token);
                }
                _ => {}
            }
            self.advance();
        }

        let raw = self.text_between(body_start, self.stream.position());
        self.eat(TokenKind::Semicolon);
        let Some(name) = pointer_name.or(last_name) else {
            return Err(ParseError::new(
                ParseErrorKind::InvalidDeclaration,
                self.stream.token_at(start).span,
                "typedef does not introduce a name",
            ));
        };
        out.push(self.typedef_node(self.intern(name.lexeme), None, &raw, start));
        Ok(())
    }

    fn typedef_node(
        &self,
        name: &'ast str,
        ty: Option<Type<'ast>>,
        raw: &str,
        start: usize,
    ) -> Declaration<'ast> {
        Declaration::Typedef(Typedef {
            name,
            ty,
            raw: self.intern(raw),
            namespace: self.namespace_snapshot(),
            span: self.stream.span_from(start),
        })
    }

    /// Parse `using namespace X;`, `using X::y;` or `using A = B;`.
    fn parse_using(
        &mut self,
        out: &mut Vec<Declaration<'ast>>,
        template: TemplateHeader<'ast>,
    ) -> Result<(), ParseError> {
        let start = self.stream.position();
        self.advance();

        let (kind, name, target) = if self.eat_name("namespace").is_some() {
            let target = self.skip_expression(false);
            let name = target.rsplit("::").next().unwrap_or_default().to_string();
            (UsingKind::Directive, name, target)
        } else if self.check_plain_identifier()
            && matches!(self.peek_nth(1).kind, TokenKind::Equal | TokenKind::LeftBracket)
        {
            let name = self.advance().lexeme.to_string();
            self.skip_attributes();
            self.expect(TokenKind::Equal)?;
            let target = self.skip_expression(false);
            (UsingKind::Alias, name, target)
        } else {
            self.eat_name("typename");
            let target = self.skip_expression(false);
            let name = target.rsplit("::").next().unwrap_or_default().trim().to_string();
            (UsingKind::Declaration, name, target)
        };
        self.expect(TokenKind::Semicolon)?;

        out.push(Declaration::Using(Using {
            kind,
            name: self.intern(&name),
            target: self.intern(&target),
            templated_types: template.unwrap_or_default(),
            namespace: self.namespace_snapshot(),
            span: self.stream.span_from(start),
        }));
        Ok(())
    }

    // ========================================================================
    // Functions and variables
    // ========================================================================

    /// Parse a function, constructor, destructor, operator or variable
    /// declaration.
    fn parse_member(
        &mut self,
        out: &mut Vec<Declaration<'ast>>,
        template: TemplateHeader<'ast>,
    ) -> Result<(), ParseError> {
        let start = self.stream.position();
        if self.skip_bare_macro() {
            return Ok(());
        }

        let mut modifiers = FunctionModifiers::empty();
        loop {
            if self.skip_attributes() {
                continue;
            }
            let token = self.peek();
            if token.kind != TokenKind::Identifier {
                break;
            }
            match token.lexeme {
                "virtual" => modifiers |= FunctionModifiers::VIRTUAL,
                "inline" | "__inline" | "__forceinline" => modifiers |= FunctionModifiers::INLINE,
                "static" => modifiers |= FunctionModifiers::STATIC,
                "explicit" => {
                    modifiers |= FunctionModifiers::EXPLICIT;
                    self.advance();
                    if self.check(TokenKind::LeftParen) {
                        self.stream.skip_balanced()?;
                    }
                    continue;
                }
                "constexpr" | "consteval" | "constinit" | "extern" | "mutable" | "thread_local"
                | "register" => {}
                _ if self.at_annotation_macro() => {}
                _ => break,
            }
            self.advance();
        }

        let token = self.peek();
        let (name, return_type) = if token.kind == TokenKind::Tilde
            && self.peek_nth(1).kind == TokenKind::Identifier
        {
            self.advance();
            let class_name = self.advance();
            modifiers |= FunctionModifiers::DTOR;
            (format!("~{}", class_name.lexeme), None)
        } else if let Some((len, special)) = self.out_of_class_special_member() {
            let position = self.stream.position();
            let mut name = self.lexemes_between(position, position + len);
            for _ in 0..len {
                self.advance();
            }
            modifiers |= special;
            let mut conversion = None;
            if special == FunctionModifiers::OPERATOR {
                let (operator, ty) = self.parse_operator_name()?;
                name.push_str(&operator);
                conversion = ty;
            }
            (name, conversion)
        } else if self.is_constructor_name() {
            modifiers |= FunctionModifiers::CTOR;
            (self.advance().lexeme.to_string(), None)
        } else if self.check_name("operator") {
            modifiers |= FunctionModifiers::OPERATOR;
            self.parse_operator_name()?
        } else if self.check_plain_identifier() && self.peek_nth(1).kind == TokenKind::LeftParen {
            return self.skip_macro_invocation();
        } else {
            let ty = self.parse_type()?;
            if self.check(TokenKind::LeftParen) && self.peek_nth(1).kind == TokenKind::Star {
                let is_static = modifiers.contains(FunctionModifiers::STATIC);
                return self.parse_function_pointer_variable(out, ty, is_static, start);
            }
            (self.parse_declarator_name(&mut modifiers)?, Some(ty))
        };

        if !self.check(TokenKind::LeftParen) {
            let Some(ty) = return_type else {
                let token = self.peek();
                return Err(ParseError::new(
                    ParseErrorKind::ExpectedParameters,
                    token.span,
                    format!("expected '(' after '{}', found {}", name, describe(token)),
                ));
            };
            let is_static = modifiers.contains(FunctionModifiers::STATIC);
            return self.finish_variable(out, ty, name, is_static, start);
        }

        // At namespace scope `T name(...)` may still be a variable with a
        // parenthesized initializer.
        let checkpoint = self.stream.checkpoint();
        let (parameters, params_span) = match return_type {
            Some(ty) if self.classes.is_empty() => match self.parse_parameter_list() {
                Ok(params) if self.at_function_tail() => params,
                _ => {
                    self.stream.restore(checkpoint);
                    let is_static = modifiers.contains(FunctionModifiers::STATIC);
                    return self.finish_variable(out, ty, name, is_static, start);
                }
            },
            _ => self.parse_parameter_list()?,
        };

        let (return_type, has_body) = self.parse_function_tail(&name, return_type, &mut modifiers)?;

        out.push(Declaration::Function(Function {
            name: self.intern(&name),
            return_type,
            parameters,
            modifiers,
            templated_types: template.unwrap_or_default(),
            access: self.access,
            has_body,
            namespace: self.namespace_snapshot(),
            params_span,
            span: self.stream.span_from(start),
        }));
        Ok(())
    }

    /// Skip an all-caps macro standing alone before `}`, an access label or
    /// a declaration keyword: `Q_OBJECT`, `DECLARE_TYPE\nclass Foo`.
    fn skip_bare_macro(&mut self) -> bool {
        let token = self.peek();
        if token.kind != TokenKind::Identifier || !keywords::looks_like_macro(token.lexeme) {
            return false;
        }
        let next = self.peek_nth(1);
        let report = match next.kind {
            TokenKind::RightBrace | TokenKind::Eof => true,
            TokenKind::Identifier
                if Access::from_keyword(next.lexeme).is_some()
                    && self.peek_nth(2).kind == TokenKind::Colon =>
            {
                true
            }
            TokenKind::Identifier if DECLARATION_KEYWORDS.contains(&next.lexeme) => {
                next.span.line > token.span.line
            }
            _ => return false,
        };
        self.advance();
        if report {
            self.error(
                ParseErrorKind::UnrecognizedMacro,
                token.span,
                format!("skipped macro '{}'", token.lexeme),
            );
        }
        true
    }

    /// Whether the current token is an annotation macro in front of a
    /// declaration, as in `DLL_EXPORT virtual void Foo();` or
    /// `DEPRECATED std::string Name();`.
    fn at_annotation_macro(&self) -> bool {
        let token = self.peek();
        if !keywords::looks_like_macro(token.lexeme) {
            return false;
        }
        let next = self.peek_nth(1);
        if next.kind != TokenKind::Identifier {
            return false;
        }
        if keywords::is_keyword(next.lexeme) {
            return !matches!(next.lexeme, "const" | "volatile" | "operator");
        }
        matches!(
            self.peek_nth(2).kind,
            TokenKind::Identifier
                | TokenKind::ColonColon
                | TokenKind::Less
                | TokenKind::Star
                | TokenKind::Amp
                | TokenKind::AmpAmp
        )
    }

    /// Skip `NAME(...)` in declaration position, with an optional `;` or
    /// braced body after it.
    fn skip_macro_invocation(&mut self) -> Result<(), ParseError> {
        let token = self.advance();
        self.stream.skip_balanced()?;
        self.error(
            ParseErrorKind::UnrecognizedMacro,
            token.span,
            format!("skipped macro invocation '{}'", token.lexeme),
        );
        if self.check(TokenKind::LeftBrace) {
            self.skip_block()?;
        }
        self.eat(TokenKind::Semicolon);
        Ok(())
    }

    /// Whether the current token names a constructor of the class being
    /// parsed.
    fn is_constructor_name(&self) -> bool {
        let token = self.peek();
        token.kind == TokenKind::Identifier
            && self.peek_nth(1).kind == TokenKind::LeftParen
            && self.classes.last().is_some_and(|class| *class == token.lexeme)
    }

    /// Detect an out-of-class constructor (`Foo::Foo(`), destructor
    /// (`Foo::~Foo(`) or conversion operator (`Foo::operator bool(`).
    ///
    /// Returns the number of tokens forming the qualified name (for
    /// operators, up to and including the last `::`) and the kind.
    fn out_of_class_special_member(&self) -> Option<(usize, FunctionModifiers)> {
        let start = self.stream.position();
        let mut i = start;
        if self.stream.token_at(i).kind == TokenKind::ColonColon {
            i += 1;
        }
        let mut segments: Vec<&str> = Vec::new();
        loop {
            let token = self.stream.token_at(i);
            if token.kind != TokenKind::Identifier || keywords::is_keyword(token.lexeme) {
                return None;
            }
            segments.push(token.lexeme);
            i += 1;
            if self.stream.token_at(i).kind == TokenKind::Less {
                i = self.stream.find_matching(i)? + 1;
            }
            if self.stream.token_at(i).kind != TokenKind::ColonColon {
                break;
            }
            i += 1;
            let next = self.stream.token_at(i);
            if next.kind == TokenKind::Tilde
                && self.stream.token_at(i + 1).kind == TokenKind::Identifier
                && self.stream.token_at(i + 2).kind == TokenKind::LeftParen
            {
                return Some((i + 2 - start, FunctionModifiers::DTOR));
            }
            if next.is_name("operator") {
                return Some((i - start, FunctionModifiers::OPERATOR));
            }
        }

        let is_ctor = segments.len() >= 2
            && segments[segments.len() - 1] == segments[segments.len() - 2]
            && self.stream.token_at(i).kind == TokenKind::LeftParen;
        is_ctor.then_some((i - start, FunctionModifiers::CTOR))
    }

    /// Parse `operator` and the operator symbol or conversion type after it.
    ///
    /// A conversion operator also returns its target type, which is what
    /// the operator returns.
    fn parse_operator_name(&mut self) -> Result<(String, Option<Type<'ast>>), ParseError> {
        let keyword = self.expect_operator_keyword()?;
        let token = self.peek();
        match token.kind {
            TokenKind::LeftParen
                if self.peek_nth(1).kind == TokenKind::RightParen
                    && self.peek_nth(2).kind == TokenKind::LeftParen =>
            {
                self.advance();
                self.advance();
                Ok(("operator()".to_string(), None))
            }
            TokenKind::LeftBracket if self.peek_nth(1).kind == TokenKind::RightBracket => {
                self.advance();
                self.advance();
                Ok(("operator[]".to_string(), None))
            }
            TokenKind::Identifier if matches!(token.lexeme, "new" | "delete" | "co_await") => {
                self.advance();
                let mut name = format!("operator {}", token.lexeme);
                if self.check(TokenKind::LeftBracket) && self.peek_nth(1).kind == TokenKind::RightBracket {
                    self.advance();
                    self.advance();
                    name.push_str("[]");
                }
                Ok((name, None))
            }
            TokenKind::Identifier => {
                let ty = self.parse_type()?;
                Ok((format!("operator {}", ty), Some(ty)))
            }
            _ => {
                let mut symbol = String::new();
                while !self.check(TokenKind::LeftParen) && !self.is_eof() && symbol.len() < 4 {
                    symbol.push_str(self.advance().lexeme);
                }
                if symbol.is_empty() {
                    return Err(ParseError::new(
                        ParseErrorKind::InvalidDeclaration,
                        keyword.span,
                        "expected operator symbol after 'operator'",
                    ));
                }
                Ok((format!("operator{}", symbol), None))
            }
        }
    }

    fn expect_operator_keyword(&mut self) -> Result<Token<'src>, ParseError> {
        match self.eat_name("operator") {
            Some(token) => Ok(token),
            None => {
                let token = self.peek();
                Err(ParseError::new(
                    ParseErrorKind::ExpectedToken,
                    token.span,
                    format!("expected 'operator', found {}", describe(token)),
                ))
            }
        }
    }

    /// Parse the declarator name after a type: `Bar`, `Foo::Bar`,
    /// `operator==`, `Foo<T>::operator()`.
    fn parse_declarator_name(
        &mut self,
        modifiers: &mut FunctionModifiers,
    ) -> Result<String, ParseError> {
        let mut name = String::new();
        if self.eat(TokenKind::ColonColon).is_some() {
            name.push_str("::");
        }
        loop {
            if self.check_name("operator") {
                *modifiers |= FunctionModifiers::OPERATOR;
                name.push_str(&self.parse_operator_name()?.0);
                return Ok(name);
            }
            if self.eat(TokenKind::Tilde).is_some() {
                name.push('~');
            }
            let id = self.expect_identifier()?;
            name.push_str(id.lexeme);

            if self.check(TokenKind::Less) {
                let position = self.stream.position();
                if let Some(close) = self.stream.find_matching(position) {
                    if self.stream.token_at(close + 1).kind == TokenKind::ColonColon {
                        name.push_str(&self.text_between(position, close + 1));
                        self.stream.skip_balanced()?;
                    }
                }
            }

            if self.check(TokenKind::ColonColon)
                && matches!(self.peek_nth(1).kind, TokenKind::Identifier | TokenKind::Tilde)
            {
                self.advance();
                name.push_str("::");
                continue;
            }
            return Ok(name);
        }
    }

    /// Whether the tokens after a parameter list can only continue a
    /// function declaration.
    fn at_function_tail(&self) -> bool {
        let token = self.peek();
        match token.kind {
            TokenKind::Semicolon
            | TokenKind::LeftBrace
            | TokenKind::Equal
            | TokenKind::Colon
            | TokenKind::Arrow
            | TokenKind::Amp
            | TokenKind::AmpAmp => true,
            TokenKind::LeftBracket => self.peek_nth(1).kind == TokenKind::LeftBracket,
            TokenKind::Identifier => !keywords::is_keyword(token.lexeme)
                || matches!(
                    token.lexeme,
                    "const" | "volatile" | "noexcept" | "throw" | "try" | "requires"
                ),
            _ => false,
        }
    }

    /// Parse `(params)`, returning the parameters and the span of the text
    /// between the parentheses.
    pub fn parse_parameter_list(&mut self) -> Result<(&'ast [Parameter<'ast>], Span), ParseError> {
        let open = self.expect(TokenKind::LeftParen)?;
        let mut params = Vec::new();

        if self.check_name("void") && self.peek_nth(1).kind == TokenKind::RightParen {
            self.advance();
        } else {
            while !self.check(TokenKind::RightParen) {
                params.push(self.parse_parameter()?);
                if self.eat(TokenKind::Comma).is_none() {
                    break;
                }
            }
        }

        let close = self.peek();
        if close.kind != TokenKind::RightParen {
            let kind = if close.kind == TokenKind::Eof {
                ParseErrorKind::UnexpectedEof
            } else {
                ParseErrorKind::ExpectedParameters
            };
            return Err(ParseError::new(
                kind,
                close.span,
                format!("expected ',' or ')' in parameter list, found {}", describe(close)),
            ));
        }
        self.advance();

        let inner_start = open.span.end();
        let span = Span::new(
            inner_start,
            close.span.offset.saturating_sub(inner_start),
            open.span.line,
            open.span.col + 1,
        );
        Ok((self.alloc_slice(&params), span))
    }

    /// Parse one parameter. Its span covers the type and name but not a
    /// default value.
    fn parse_parameter(&mut self) -> Result<Parameter<'ast>, ParseError> {
        let start = self.stream.position();
        self.skip_attributes();

        if let Some(token) = self.eat(TokenKind::Ellipsis) {
            return Ok(Parameter {
                name: None,
                ty: Type::named(self.intern("..."), token.span),
                default: None,
                span: token.span,
            });
        }

        self.eat_name("register");
        let mut ty = self.parse_type()?;
        self.eat(TokenKind::Ellipsis);

        let mut name = None;
        if self.check(TokenKind::LeftParen)
            && matches!(
                self.peek_nth(1).kind,
                TokenKind::Star | TokenKind::Amp | TokenKind::Caret
            )
        {
            // (*name)(params) or (&name)[N]
            self.advance();
            while self.eat(TokenKind::Star).is_some()
                || self.eat(TokenKind::Amp).is_some()
                || self.eat(TokenKind::Caret).is_some()
            {}
            if self.check_plain_identifier() {
                let token = self.advance();
                name = Some(self.intern(token.lexeme));
            }
            while self.check(TokenKind::LeftBracket) {
                self.stream.skip_balanced()?;
            }
            self.expect(TokenKind::RightParen)?;
            if self.check(TokenKind::LeftParen) {
                let signature = self.parse_signature_types()?;
                ty = Type {
                    signature: Some(signature),
                    function_pointer: true,
                    ..ty
                };
            }
        } else if self.check_plain_identifier() {
            let token = self.advance();
            name = Some(self.intern(token.lexeme));
        }

        if self.check(TokenKind::LeftParen) {
            // Function-typed parameter: `int callback(int)`
            let signature = self.parse_signature_types()?;
            ty = Type {
                signature: Some(signature),
                ..ty
            };
        }
        while self.check(TokenKind::LeftBracket) {
            self.stream.skip_balanced()?;
        }
        let span = self.stream.span_from(start);

        let default = if let Some(equal) = self.eat(TokenKind::Equal) {
            let text = self.skip_expression(false);
            if text.is_empty() {
                return Err(ParseError::new(
                    ParseErrorKind::InvalidDeclaration,
                    equal.span,
                    "expected default value after '='",
                ));
            }
            Some(self.intern(&text))
        } else {
            None
        };

        Ok(Parameter {
            name,
            ty,
            default,
            span,
        })
    }

    /// Parse everything after a function's parameter list: qualifiers,
    /// trailing return type, `= 0`/`= default`/`= delete`, initializer list
    /// and body.
    fn parse_function_tail(
        &mut self,
        name: &str,
        mut return_type: Option<Type<'ast>>,
        modifiers: &mut FunctionModifiers,
    ) -> Result<(Option<Type<'ast>>, bool), ParseError> {
        loop {
            if self.skip_attributes() {
                continue;
            }
            let token = self.peek();
            match token.kind {
                TokenKind::Amp | TokenKind::AmpAmp => {
                    self.advance();
                    continue;
                }
                TokenKind::Arrow => {
                    self.advance();
                    return_type = Some(self.parse_type()?);
                    continue;
                }
                TokenKind::Identifier => {}
                _ => break,
            }
            match token.lexeme {
                "const" => *modifiers |= FunctionModifiers::CONST,
                "volatile" => {}
                "override" => *modifiers |= FunctionModifiers::OVERRIDE,
                "final" => *modifiers |= FunctionModifiers::FINAL,
                "noexcept" => {
                    self.advance();
                    *modifiers |= FunctionModifiers::NOEXCEPT;
                    if self.check(TokenKind::LeftParen) {
                        let position = self.stream.position();
                        self.stream.skip_balanced()?;
                        if self.text_between(position, self.stream.position()) == "(false)" {
                            modifiers.remove(FunctionModifiers::NOEXCEPT);
                        }
                    }
                    continue;
                }
                "throw" => {
                    self.advance();
                    if self.check(TokenKind::LeftParen) {
                        self.stream.skip_balanced()?;
                    }
                    continue;
                }
                "requires" => {
                    self.skip_requires_clause();
                    continue;
                }
                word if !keywords::is_keyword(word) => {
                    *modifiers |= FunctionModifiers::UNKNOWN_ANNOTATION;
                    self.advance();
                    if self.check(TokenKind::LeftParen) {
                        self.stream.skip_balanced()?;
                    }
                    continue;
                }
                _ => break,
            }
            self.advance();
        }

        let token = self.peek();
        let has_body = match token.kind {
            TokenKind::Equal => {
                self.advance();
                let value = self.peek();
                match value.lexeme {
                    "0" => *modifiers |= FunctionModifiers::PURE_VIRTUAL,
                    "default" => *modifiers |= FunctionModifiers::DEFAULTED,
                    "delete" => *modifiers |= FunctionModifiers::DELETED,
                    _ => {
                        return Err(ParseError::new(
                            ParseErrorKind::InvalidDeclaration,
                            value.span,
                            format!(
                                "expected '0', 'default' or 'delete' after '=', found {}",
                                describe(value)
                            ),
                        ));
                    }
                }
                self.advance();
                self.expect(TokenKind::Semicolon)?;
                false
            }
            TokenKind::Semicolon => {
                self.advance();
                false
            }
            TokenKind::LeftBrace => {
                self.skip_block()?;
                self.eat(TokenKind::Semicolon);
                true
            }
            TokenKind::Colon => {
                self.skip_initializer_list()?;
                self.skip_block()?;
                self.eat(TokenKind::Semicolon);
                true
            }
            TokenKind::Identifier if token.lexeme == "try" => {
                self.advance();
                if self.check(TokenKind::Colon) {
                    self.skip_initializer_list()?;
                }
                self.skip_block()?;
                while self.eat_name("catch").is_some() {
                    if self.check(TokenKind::LeftParen) {
                        self.stream.skip_balanced()?;
                    }
                    self.skip_block()?;
                }
                true
            }
            _ => {
                return Err(ParseError::new(
                    ParseErrorKind::MissingSemicolon,
                    token.span,
                    format!(
                        "expected ';' or function body after '{}', found {}",
                        name,
                        describe(token)
                    ),
                ));
            }
        };
        Ok((return_type, has_body))
    }

    /// Skip `: a_(a), b_{b}` up to the function body.
    fn skip_initializer_list(&mut self) -> Result<(), ParseError> {
        let colon = self.expect(TokenKind::Colon)?;
        loop {
            let token = self.peek();
            match token.kind {
                TokenKind::LeftBrace
                    if matches!(
                        self.stream.previous().kind,
                        TokenKind::RightParen | TokenKind::RightBrace | TokenKind::Ellipsis
                    ) =>
                {
                    return Ok(());
                }
                TokenKind::LeftParen | TokenKind::LeftBrace | TokenKind::LeftBracket => {
                    self.stream.skip_balanced()?;
                }
                TokenKind::Eof | TokenKind::Semicolon | TokenKind::RightBrace => {
                    return Err(ParseError::new(
                        ParseErrorKind::InvalidDeclaration,
                        colon.span,
                        "constructor initializer list is not followed by a body",
                    ));
                }
                _ => {
                    self.advance();
                }
            }
        }
    }

    /// Parse `T (*name)(params)` as a variable.
    fn parse_function_pointer_variable(
        &mut self,
        out: &mut Vec<Declaration<'ast>>,
        ty: Type<'ast>,
        is_static: bool,
        start: usize,
    ) -> Result<(), ParseError> {
        self.expect(TokenKind::LeftParen)?;
        while self.eat(TokenKind::Star).is_some() {}
        let name = self.expect_identifier()?;
        self.expect(TokenKind::RightParen)?;
        let signature = self.parse_signature_types()?;
        self.eat_name("noexcept");
        let ty = Type {
            signature: Some(signature),
            function_pointer: true,
            ..ty
        };
        self.finish_variable(out, ty, name.lexeme.to_string(), is_static, start)
    }

    /// Parse the rest of a variable declaration after its first name:
    /// arrays, bit-fields, initializers and further declarators.
    fn finish_variable(
        &mut self,
        out: &mut Vec<Declaration<'ast>>,
        base: Type<'ast>,
        first_name: String,
        is_static: bool,
        start: usize,
    ) -> Result<(), ParseError> {
        let mut ty = base;
        let mut name = first_name;
        loop {
            while self.check(TokenKind::LeftBracket) {
                self.stream.skip_balanced()?;
            }
            if self.eat(TokenKind::Colon).is_some() {
                self.skip_expression(false);
            }
            if self.eat(TokenKind::Equal).is_some() {
                self.skip_expression(false);
            } else if self.check(TokenKind::LeftBrace) || self.check(TokenKind::LeftParen) {
                self.stream.skip_balanced()?;
            }

            out.push(Declaration::Variable(Variable {
                name: self.intern(&name),
                ty,
                access: self.access,
                is_static,
                namespace: self.namespace_snapshot(),
                span: self.stream.span_from(start),
            }));

            if self.eat(TokenKind::Comma).is_none() {
                break;
            }
            let mut pointer_depth = 0u8;
            while self.eat(TokenKind::Star).is_some() {
                pointer_depth = pointer_depth.saturating_add(1);
            }
            let reference = if self.eat(TokenKind::Amp).is_some() {
                crate::ast::RefKind::LValue
            } else if self.eat(TokenKind::AmpAmp).is_some() {
                crate::ast::RefKind::RValue
            } else {
                crate::ast::RefKind::None
            };
            ty = Type {
                pointer_depth,
                reference,
                ..base
            };
            name = self.expect_identifier()?.lexeme.to_string();
        }

        let token = self.peek();
        if self.eat(TokenKind::Semicolon).is_none() {
            return Err(ParseError::new(
                ParseErrorKind::MissingSemicolon,
                token.span,
                format!("expected ';' after declaration of '{}', found {}", name, describe(token)),
            ));
        }
        Ok(())
    }
}
