//! Reserved-word table for C++.
//!
//! The lexer does not distinguish keywords from identifiers; the parser asks
//! this table instead. A word either has exactly one [`KeywordClass`] or is
//! not a keyword at all.

use std::fmt;

/// Keyword categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordClass {
    /// `int`, `char`, `void`, ...
    BuiltinType,
    /// `const`, `static`, `virtual`, ...
    TypeModifier,
    /// `public`, `protected`, `private`, `friend`
    Access,
    /// `static_cast` and friends
    Cast,
    /// `class`, `namespace`, `operator`, `true`, ...
    Other,
    /// `struct`, `enum`, `typedef`, `template`, ...
    OtherType,
    /// `if`, `switch`, `return`, ...
    Control,
    /// `try`, `catch`, `throw`
    Exception,
    /// `for`, `while`, `break`, ...
    Loop,
}

impl fmt::Display for KeywordClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            KeywordClass::BuiltinType => "built-in type",
            KeywordClass::TypeModifier => "type modifier",
            KeywordClass::Access => "access specifier",
            KeywordClass::Cast => "cast",
            KeywordClass::Other => "keyword",
            KeywordClass::OtherType => "type keyword",
            KeywordClass::Control => "control keyword",
            KeywordClass::Exception => "exception keyword",
            KeywordClass::Loop => "loop keyword",
        };
        f.write_str(name)
    }
}

/// Look up the category of a word.
pub fn classify(word: &str) -> Option<KeywordClass> {
    use KeywordClass::*;
    match word {
        "bool" | "char" | "char8_t" | "char16_t" | "char32_t" | "wchar_t" | "int" | "long"
        | "short" | "double" | "float" | "void" | "unsigned" | "signed" => Some(BuiltinType),

        "auto" | "register" | "const" | "inline" | "extern" | "static" | "virtual"
        | "volatile" | "mutable" | "constexpr" | "consteval" | "constinit"
        | "thread_local" => Some(TypeModifier),

        "public" | "protected" | "private" | "friend" => Some(Access),

        "static_cast" | "const_cast" | "dynamic_cast" | "reinterpret_cast" => Some(Cast),

        "true" | "false" | "nullptr" | "asm" | "class" | "namespace" | "using" | "explicit"
        | "this" | "operator" | "sizeof" | "alignof" | "alignas" | "decltype" | "noexcept"
        | "static_assert" | "export" | "concept" | "requires" | "co_await" | "co_yield"
        | "co_return" => Some(Other),

        "new" | "delete" | "typedef" | "struct" | "union" | "enum" | "typeid" | "typename"
        | "template" => Some(OtherType),

        "case" | "switch" | "default" | "if" | "else" | "return" | "goto" => Some(Control),

        "try" | "catch" | "throw" => Some(Exception),

        "while" | "do" | "for" | "break" | "continue" => Some(Loop),

        _ => None,
    }
}

/// Whether `word` is reserved.
#[inline]
pub fn is_keyword(word: &str) -> bool {
    classify(word).is_some()
}

/// Whether `word` can appear as part of a built-in type spelling.
///
/// True for built-in types and type modifiers, except `virtual` and `inline`
/// which only ever qualify functions.
pub fn is_builtin_type(word: &str) -> bool {
    match classify(word) {
        Some(KeywordClass::BuiltinType) => true,
        Some(KeywordClass::TypeModifier) => !matches!(word, "virtual" | "inline"),
        _ => false,
    }
}

/// Whether `word` looks like a macro: all caps, digits and underscores, with
/// at least two characters and at least one letter.
///
/// This is a naming convention, not a guarantee; the parser only trusts it
/// where a real declaration cannot appear.
pub fn looks_like_macro(word: &str) -> bool {
    word.len() > 1
        && word.bytes().any(|b| b.is_ascii_uppercase())
        && word
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit() || b == b'_')
        && !is_keyword(word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_each_category() {
        assert_eq!(classify("int"), Some(KeywordClass::BuiltinType));
        assert_eq!(classify("wchar_t"), Some(KeywordClass::BuiltinType));
        assert_eq!(classify("mutable"), Some(KeywordClass::TypeModifier));
        assert_eq!(classify("friend"), Some(KeywordClass::Access));
        assert_eq!(classify("reinterpret_cast"), Some(KeywordClass::Cast));
        assert_eq!(classify("operator"), Some(KeywordClass::Other));
        assert_eq!(classify("typename"), Some(KeywordClass::OtherType));
        assert_eq!(classify("goto"), Some(KeywordClass::Control));
        assert_eq!(classify("throw"), Some(KeywordClass::Exception));
        assert_eq!(classify("continue"), Some(KeywordClass::Loop));
    }

    #[test]
    fn classify_non_keywords() {
        assert_eq!(classify("Foo"), None);
        assert_eq!(classify("string"), None);
        assert_eq!(classify("override"), None);
        assert_eq!(classify("final"), None);
        assert_eq!(classify(""), None);
        assert!(!is_keyword("INT"));
        assert!(is_keyword("class"));
    }

    #[test]
    fn builtin_type_excludes_virtual_and_inline() {
        assert!(is_builtin_type("unsigned"));
        assert!(is_builtin_type("const"));
        assert!(is_builtin_type("static"));
        assert!(!is_builtin_type("virtual"));
        assert!(!is_builtin_type("inline"));
        assert!(!is_builtin_type("class"));
        assert!(!is_builtin_type("Foo"));
    }

    #[test]
    fn macro_heuristic() {
        assert!(looks_like_macro("STORAGE_SPECIFIER"));
        assert!(looks_like_macro("DLL_EXPORT2"));
        assert!(!looks_like_macro("Foo"));
        assert!(!looks_like_macro("T"));
        assert!(!looks_like_macro("_"));
        assert!(!looks_like_macro("__"));
        assert!(!looks_like_macro("size_t"));
    }

    #[test]
    fn class_display() {
        assert_eq!(KeywordClass::Access.to_string(), "access specifier");
    }
}
