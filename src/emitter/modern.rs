//! `MOCK_METHOD(ret, name, (args), (qualifiers))` rendering.

use mockgen_parser::{BlockComments, Function, FunctionModifiers, normalize_parameter_text};

use super::{escape_for_macro, return_type_text};

pub(super) fn render_method(
    source: &str,
    method: &Function<'_>,
    indent: &str,
    lines: &mut Vec<String>,
) {
    let mut qualifiers = Vec::new();
    if method.is_const() {
        qualifiers.push("const");
    }
    if method.modifiers.contains(FunctionModifiers::NOEXCEPT) {
        qualifiers.push("noexcept");
    }
    qualifiers.push("override");

    lines.push(format!(
        "{}MOCK_METHOD({}, {}, ({}), ({}));",
        indent,
        escape_for_macro(&return_type_text(method)),
        method.name,
        modern_arguments(source, method).join(", "),
        qualifiers.join(", "),
    ));
}

/// Each parameter as written, without comments or default value, wrapped
/// in parentheses when it contains a bare comma.
pub fn modern_arguments(source: &str, method: &Function<'_>) -> Vec<String> {
    method
        .parameters
        .iter()
        .map(|param| normalize_parameter_text(param.span.text(source), BlockComments::Strip))
        .filter(|arg| arg != "void")
        .map(|arg| escape_for_macro(&arg))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bumpalo::Bump;
    use mockgen_parser::parse;

    fn args(source: &str) -> Vec<String> {
        let arena = Bump::new();
        let unit = parse(source, &arena).unwrap();
        let class = unit.classes().next().unwrap();
        let method = class.methods().next().unwrap();
        modern_arguments(source, method)
    }

    #[test]
    fn arguments_are_cleaned_individually() {
        assert_eq!(
            args("class A { virtual void F(int a /* c */, // d\n  char c = 'x'); };"),
            vec!["int a", "char c"]
        );
    }

    #[test]
    fn comma_arguments_are_wrapped() {
        assert_eq!(
            args("class A { virtual void F(std::map<int, int> m, std::function<int(int, int)> f); };"),
            vec!["(std::map<int, int> m)", "std::function<int(int, int)> f"]
        );
    }

    #[test]
    fn void_list_has_no_arguments() {
        assert!(args("class A { virtual void F(void); };").is_empty());
    }
}
