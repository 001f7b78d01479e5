//! Type nodes.
//!
//! Types are recorded structurally but never resolved: `name` is whatever
//! qualified name the source spelled, and `std::string` and `string` are
//! unrelated as far as the parser knows.

use crate::lexer::Span;
use std::fmt;

/// Reference kind of a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RefKind {
    #[default]
    None,
    /// `&`
    LValue,
    /// `&&`
    RValue,
}

impl RefKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RefKind::None => "",
            RefKind::LValue => "&",
            RefKind::RValue => "&&",
        }
    }
}

/// A type as spelled in the source.
///
/// Examples:
/// - `int` -> name `int`
/// - `const std::vector<int>&` -> modifiers `[const]`, name `std::vector`,
///   one template argument, lvalue reference
/// - `unsigned long long` -> name `unsigned long long`
/// - `int(std::string)` (a template argument of `std::function`) -> name
///   `int` with a one-element signature
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Type<'ast> {
    /// Qualified name, `::`-joined, without template arguments.
    pub name: &'ast str,
    /// Qualifiers and elaborations in source order: `const`, `volatile`,
    /// `typename`, `struct`, ...
    pub modifiers: &'ast [&'ast str],
    /// Template arguments of the last name segment.
    pub template_args: &'ast [Type<'ast>],
    /// Number of `*`.
    pub pointer_depth: u8,
    pub reference: RefKind,
    /// Parameter types when this is a function type.
    pub signature: Option<&'ast [Type<'ast>]>,
    /// Whether the signature is spelled through a pointer, as in `void (*)(int)`.
    pub function_pointer: bool,
    /// Source location
    pub span: Span,
}

impl<'ast> Type<'ast> {
    /// A bare named type.
    pub fn named(name: &'ast str, span: Span) -> Self {
        Self {
            name,
            modifiers: &[],
            template_args: &[],
            pointer_depth: 0,
            reference: RefKind::None,
            signature: None,
            function_pointer: false,
            span,
        }
    }

    /// Whether `modifier` was spelled on this type.
    pub fn has_modifier(&self, modifier: &str) -> bool {
        self.modifiers.contains(&modifier)
    }

    /// Whether this type is `const`.
    pub fn is_const(&self) -> bool {
        self.has_modifier("const")
    }

    /// Whether this is the plain `void` type (no pointer, no reference).
    pub fn is_void(&self) -> bool {
        self.name == "void"
            && self.pointer_depth == 0
            && self.reference == RefKind::None
            && self.signature.is_none()
    }

    /// Render the type in the fixed order: modifiers, name, template
    /// arguments, pointers, reference, then any signature.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Type<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for modifier in self.modifiers {
            write!(f, "{} ", modifier)?;
        }
        f.write_str(self.name)?;
        if !self.template_args.is_empty() {
            f.write_str("<")?;
            for (i, arg) in self.template_args.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{}", arg)?;
            }
            f.write_str(">")?;
        }
        for _ in 0..self.pointer_depth {
            f.write_str("*")?;
        }
        f.write_str(self.reference.as_str())?;
        if let Some(signature) = self.signature {
            if self.function_pointer {
                f.write_str(" (*)(")?;
            } else {
                f.write_str(" (")?;
            }
            for (i, param) in signature.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{}", param)?;
            }
            f.write_str(")")?;
        }
        Ok(())
    }
}

/// One entry of a `template <...>` header.
///
/// Examples:
/// - `typename T` -> name `T`, no bound
/// - `int N = 3` -> name `N`, bound `int`, default `3`
/// - `class... Ts` -> variadic
/// - `template <class> class C` -> template-template
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemplateParam<'ast> {
    /// Parameter name; empty when the parameter is unnamed.
    pub name: &'ast str,
    /// The type of a non-type parameter.
    pub bound: Option<Type<'ast>>,
    /// Default argument, verbatim.
    pub default: Option<&'ast str>,
    pub variadic: bool,
    pub template_template: bool,
    /// Source location
    pub span: Span,
}

impl TemplateParam<'_> {
    /// Whether this is a `typename`/`class` parameter.
    pub fn is_type_param(&self) -> bool {
        self.bound.is_none() && !self.template_template
    }
}
