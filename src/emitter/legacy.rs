//! `MOCK_METHODn` rendering.

use mockgen_parser::{BlockComments, Class, Function, normalize_parameter_text};

use super::{has_unparenthesized_comma, return_type_text};

const MULTI_ARG_RETURN_WARNING: [&str; 3] = [
    "// The following line won't really compile, as the return",
    "// type has multiple template arguments.  To fix it, use a",
    "// typedef for the return type.",
];

pub(super) fn render_method(
    source: &str,
    class: &Class<'_>,
    method: &Function<'_>,
    indent: &str,
    lines: &mut Vec<String>,
) {
    let return_type = return_type_text(method);
    if has_unparenthesized_comma(&return_type) {
        for warning in MULTI_ARG_RETURN_WARNING {
            lines.push(format!("{}{}", indent, warning));
        }
    }

    let constness = if method.is_const() { "CONST_" } else { "" };
    let template_suffix = if class.is_templated() { "_T" } else { "" };
    lines.push(format!(
        "{indent}MOCK_{constness}METHOD{count}{template_suffix}({name},\n{continuation}{return_type}({args}));",
        count = method.parameters.len(),
        name = method.name,
        continuation = indent.repeat(3),
        args = legacy_arguments(source, method),
    ));
}

/// Argument text for a `MOCK_METHODn` signature.
///
/// The parameter list is echoed as written, minus `//` comments, with
/// whitespace collapsed. When any parameter has a default value only the
/// parameter types are kept.
pub fn legacy_arguments(source: &str, method: &Function<'_>) -> String {
    if method.has_default_arguments() {
        let types: Vec<String> = method.parameters.iter().map(|p| p.ty.render()).collect();
        return types.join(", ");
    }
    let raw = match (method.parameters.first(), method.parameters.last()) {
        (Some(first), Some(last)) => source
            .get(first.span.offset as usize..last.span.end() as usize)
            .unwrap_or_default(),
        _ => method.params_span.text(source),
    };
    normalize_parameter_text(raw, BlockComments::Keep)
}
