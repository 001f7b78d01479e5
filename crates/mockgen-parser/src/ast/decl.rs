//! Declaration AST nodes.
//!
//! Provides nodes for everything the parser recognizes at namespace or class
//! scope:
//! - Classes, structs and unions
//! - Functions (free functions, methods, constructors, destructors, operators)
//! - Enums
//! - Typedefs and using-declarations
//! - Variables
//!
//! Namespaces do not get a node of their own. Their contents are flattened
//! into the enclosing list, and every node remembers its namespace path.

use crate::ast::types::{TemplateParam, Type};
use crate::lexer::Span;
use bitflags::bitflags;

bitflags! {
    /// Everything the parser learned about a function besides its signature.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct FunctionModifiers: u16 {
        const VIRTUAL = 0x0001;
        /// `= 0`
        const PURE_VIRTUAL = 0x0002;
        const OVERRIDE = 0x0004;
        const FINAL = 0x0008;
        /// `const` member function.
        const CONST = 0x0010;
        const STATIC = 0x0020;
        const INLINE = 0x0040;
        const EXPLICIT = 0x0080;
        const CTOR = 0x0100;
        const DTOR = 0x0200;
        /// `= default`
        const DEFAULTED = 0x0400;
        /// `= delete`
        const DELETED = 0x0800;
        const NOEXCEPT = 0x1000;
        const OPERATOR = 0x2000;
        /// A macro after the signature that the parser could not interpret.
        const UNKNOWN_ANNOTATION = 0x4000;
    }
}

impl FunctionModifiers {
    /// Flags that make a method worth mocking.
    pub const MOCKABLE: FunctionModifiers = FunctionModifiers::VIRTUAL
        .union(FunctionModifiers::PURE_VIRTUAL)
        .union(FunctionModifiers::OVERRIDE);

    /// Constructor or destructor.
    pub const SPECIAL: FunctionModifiers = FunctionModifiers::CTOR.union(FunctionModifiers::DTOR);
}

/// Member access level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Access {
    #[default]
    Public,
    Protected,
    Private,
}

impl Access {
    /// Parse an access keyword.
    pub fn from_keyword(word: &str) -> Option<Access> {
        match word {
            "public" => Some(Access::Public),
            "protected" => Some(Access::Protected),
            "private" => Some(Access::Private),
            _ => None,
        }
    }
}

/// `class`, `struct` or `union`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassKind {
    Class,
    Struct,
    Union,
}

impl ClassKind {
    pub fn from_keyword(word: &str) -> Option<ClassKind> {
        match word {
            "class" => Some(ClassKind::Class),
            "struct" => Some(ClassKind::Struct),
            "union" => Some(ClassKind::Union),
            _ => None,
        }
    }

    /// Access of members (and bases) declared without a specifier.
    pub fn default_access(self) -> Access {
        match self {
            ClassKind::Class => Access::Private,
            ClassKind::Struct | ClassKind::Union => Access::Public,
        }
    }
}

/// A declaration recognized by the parser.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Declaration<'ast> {
    Class(Class<'ast>),
    Function(Function<'ast>),
    Enum(Enum<'ast>),
    Typedef(Typedef<'ast>),
    Variable(Variable<'ast>),
    Using(Using<'ast>),
}

impl<'ast> Declaration<'ast> {
    /// Get the span of this declaration.
    pub fn span(&self) -> Span {
        match self {
            Self::Class(d) => d.span,
            Self::Function(d) => d.span,
            Self::Enum(d) => d.span,
            Self::Typedef(d) => d.span,
            Self::Variable(d) => d.span,
            Self::Using(d) => d.span,
        }
    }

    /// The declared name, if the declaration has one.
    pub fn name(&self) -> Option<&'ast str> {
        let name = match self {
            Self::Class(d) => d.name,
            Self::Function(d) => d.name,
            Self::Enum(d) => d.name,
            Self::Typedef(d) => d.name,
            Self::Variable(d) => d.name,
            Self::Using(d) => d.name,
        };
        (!name.is_empty()).then_some(name)
    }

    pub fn as_class(&self) -> Option<&Class<'ast>> {
        match self {
            Self::Class(class) => Some(class),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&Function<'ast>> {
        match self {
            Self::Function(function) => Some(function),
            _ => None,
        }
    }
}

/// A class, struct or union.
///
/// Example:
/// ```cpp
/// namespace app {
/// template <typename T>
/// class Repository : public Base<T>, private virtual Tracked {
///  public:
///   virtual T Load(int id) const = 0;
/// };
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Class<'ast> {
    pub kind: ClassKind,
    /// Unqualified name; empty for anonymous classes.
    pub name: &'ast str,
    pub bases: &'ast [BaseSpecifier<'ast>],
    /// Enclosing namespaces, outermost first. Anonymous namespaces are empty strings.
    pub namespace: &'ast [&'ast str],
    /// The `template <...>` header, in declaration order.
    pub templated_types: &'ast [TemplateParam<'ast>],
    /// Arguments of an explicit or partial specialization: `class Foo<int>`.
    pub specialization: Option<&'ast [Type<'ast>]>,
    /// Member declarations; `None` for a forward declaration.
    pub body: Option<&'ast [Declaration<'ast>]>,
    pub is_final: bool,
    /// Source location
    pub span: Span,
}

impl<'ast> Class<'ast> {
    /// Whether this is a definition rather than a forward declaration.
    #[inline]
    pub fn has_body(&self) -> bool {
        self.body.is_some()
    }

    /// Whether the class has a template header.
    #[inline]
    pub fn is_templated(&self) -> bool {
        !self.templated_types.is_empty()
    }

    /// Member functions, in declaration order.
    pub fn methods(&self) -> impl Iterator<Item = &Function<'ast>> {
        self.body
            .unwrap_or_default()
            .iter()
            .filter_map(Declaration::as_function)
    }
}

/// One entry of a base-class list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaseSpecifier<'ast> {
    pub ty: Type<'ast>,
    /// Explicit access, or the class kind's default.
    pub access: Access,
    pub is_virtual: bool,
}

/// A function declaration or definition.
///
/// Examples:
/// - `virtual int Bar(int a, char c = 'x') const = 0;`
/// - `explicit Foo(int x) : x_(x) {}`
/// - `~Foo() override;`
/// - `bool operator==(const Foo& other) const;`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Function<'ast> {
    /// Name as spelled, qualified for out-of-class definitions: `Bar`,
    /// `~Foo`, `operator==`, `Foo::Bar`.
    pub name: &'ast str,
    /// `None` for constructors, destructors and conversion operators.
    pub return_type: Option<Type<'ast>>,
    pub parameters: &'ast [Parameter<'ast>],
    pub modifiers: FunctionModifiers,
    pub templated_types: &'ast [TemplateParam<'ast>],
    pub access: Access,
    pub has_body: bool,
    /// Enclosing namespaces, outermost first.
    pub namespace: &'ast [&'ast str],
    /// Text between the parentheses of the parameter list.
    pub params_span: Span,
    /// Source location
    pub span: Span,
}

impl Function<'_> {
    #[inline]
    pub fn is_const(&self) -> bool {
        self.modifiers.contains(FunctionModifiers::CONST)
    }

    #[inline]
    pub fn is_ctor_or_dtor(&self) -> bool {
        self.modifiers.intersects(FunctionModifiers::SPECIAL)
    }

    /// Virtual (or overriding) and neither a constructor nor a destructor.
    #[inline]
    pub fn is_mockable(&self) -> bool {
        self.modifiers.intersects(FunctionModifiers::MOCKABLE) && !self.is_ctor_or_dtor()
    }

    /// Whether any parameter carries a default value.
    pub fn has_default_arguments(&self) -> bool {
        self.parameters.iter().any(|p| p.default.is_some())
    }
}

/// A function parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parameter<'ast> {
    pub name: Option<&'ast str>,
    pub ty: Type<'ast>,
    /// Default value, verbatim and unparsed.
    pub default: Option<&'ast str>,
    /// Type and name only; a default value is not included.
    pub span: Span,
}

/// An enum declaration or definition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Enum<'ast> {
    /// Empty for anonymous enums.
    pub name: &'ast str,
    /// `enum class` / `enum struct`
    pub is_scoped: bool,
    pub underlying: Option<Type<'ast>>,
    /// Enumerator names; `None` for an opaque declaration.
    pub enumerators: Option<&'ast [&'ast str]>,
    pub namespace: &'ast [&'ast str],
    /// Source location
    pub span: Span,
}

/// A `typedef`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Typedef<'ast> {
    /// The name being introduced.
    pub name: &'ast str,
    /// The aliased type, when it could be parsed structurally.
    pub ty: Option<Type<'ast>>,
    /// Everything between `typedef` and `;`, verbatim.
    pub raw: &'ast str,
    pub namespace: &'ast [&'ast str],
    /// Source location
    pub span: Span,
}

/// A variable or data member.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Variable<'ast> {
    pub name: &'ast str,
    pub ty: Type<'ast>,
    pub access: Access,
    pub is_static: bool,
    pub namespace: &'ast [&'ast str],
    /// Source location
    pub span: Span,
}

/// What a `using` declaration does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsingKind {
    /// `using namespace std;`
    Directive,
    /// `using Base::Foo;`
    Declaration,
    /// `using Alias = Type;`
    Alias,
}

/// A `using` declaration, directive or alias.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Using<'ast> {
    pub kind: UsingKind,
    /// Alias name, or the last segment of the used name.
    pub name: &'ast str,
    /// Everything after `using` (or after `=` for aliases), verbatim.
    pub target: &'ast str,
    pub templated_types: &'ast [TemplateParam<'ast>],
    pub namespace: &'ast [&'ast str],
    /// Source location
    pub span: Span,
}
