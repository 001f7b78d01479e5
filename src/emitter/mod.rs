//! Mock class rendering.
//!
//! Walks the classes of a parsed header and renders a Google Mock subclass
//! for each selected one. Method lines come from [`legacy`] or [`modern`]
//! depending on [`MockStyle`].

mod legacy;
mod modern;

use mockgen_parser::{Class, Function, TemplateParam, TranslationUnit};
use rustc_hash::FxHashSet;

use crate::config::{MockConfig, MockStyle};

pub use legacy::legacy_arguments;
pub use modern::modern_arguments;

/// Rendered mocks plus what could not be rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MockOutput {
    /// Output lines. A single entry may span several physical lines.
    pub lines: Vec<String>,
    /// Requested class names with no matching definition, sorted.
    pub missing: Vec<String>,
    /// No filter was given and the header defines no class.
    pub no_class_found: bool,
    /// Number of classes rendered.
    pub emitted: usize,
}

impl MockOutput {
    /// The generated source text.
    pub fn render(&self) -> String {
        self.lines.join("\n")
    }

    /// Messages for the user about classes that were not rendered.
    pub fn warnings(&self, filename: &str) -> Vec<String> {
        let mut warnings = Vec::new();
        if !self.missing.is_empty() {
            warnings.push(format!(
                "Class(es) not found in {}: {}",
                filename,
                self.missing.join(", ")
            ));
        }
        if self.no_class_found {
            warnings.push(format!("No class found in {}", filename));
        }
        warnings
    }
}

/// Render mock classes for the classes defined at namespace scope.
///
/// With `desired` set, only classes with those names are rendered and the
/// rest of the names are reported in [`MockOutput::missing`]. Forward
/// declarations are never rendered.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn generate_mocks(
    source: &str,
    unit: &TranslationUnit<'_>,
    desired: Option<&FxHashSet<String>>,
    config: &MockConfig,
) -> MockOutput {
    let mut output = MockOutput::default();
    let mut processed: FxHashSet<&str> = FxHashSet::default();

    for class in unit.classes() {
        if !class.has_body() || class.name.is_empty() {
            continue;
        }
        if desired.is_some_and(|names| !names.contains(class.name)) {
            continue;
        }
        processed.insert(class.name);
        render_class(source, class, config, &mut output.lines);
        output.emitted += 1;
    }

    match desired {
        Some(names) => {
            let mut missing: Vec<String> = names
                .iter()
                .filter(|name| !processed.contains(name.as_str()))
                .cloned()
                .collect();
            missing.sort();
            output.missing = missing;
        }
        None => output.no_class_found = processed.is_empty(),
    }
    output
}

fn render_class(source: &str, class: &Class<'_>, config: &MockConfig, lines: &mut Vec<String>) {
    for namespace in class.namespace {
        lines.push(namespace_opener(namespace));
    }
    if !class.namespace.is_empty() {
        lines.push(String::new());
    }

    let mut parent = class.name.to_string();
    if let Some(args) = class.specialization {
        // Specializations derive from the specialized base and keep the
        // parameter names they were declared with.
        let args: Vec<String> = args.iter().map(|arg| arg.render()).collect();
        parent.push_str(&format!("<{}>", args.join(", ")));
        if class.is_templated() {
            let decls: Vec<String> = class
                .templated_types
                .iter()
                .enumerate()
                .map(|(i, param)| template_param_decl(param, &param_name(param, i)))
                .collect();
            lines.push(format!("template <{}>", decls.join(", ")));
        }
    } else if class.is_templated() {
        let (decls, args) = positional_template_params(class.templated_types);
        lines.push(format!("template <{}>", decls.join(", ")));
        parent.push_str(&format!("<{}>", args.join(", ")));
    }

    lines.push(format!("class Mock{} : public {} {{", class.name, parent));

    let indent = config.indent_str();
    let mut methods = Vec::new();
    for method in class.methods().filter(|m| m.is_mockable()) {
        render_method(source, class, method, config, &indent, &mut methods);
    }
    if !methods.is_empty() {
        lines.push(format!("{}public:", " ".repeat(config.indent / 2)));
        lines.extend(methods);
    }

    lines.push("};".to_string());
    lines.push(String::new());

    for namespace in class.namespace.iter().rev() {
        lines.push(namespace_closer(namespace));
    }
    if !class.namespace.is_empty() {
        lines.push(String::new());
    }
}

fn render_method(
    source: &str,
    class: &Class<'_>,
    method: &Function<'_>,
    config: &MockConfig,
    indent: &str,
    lines: &mut Vec<String>,
) {
    match config.style {
        MockStyle::Legacy => legacy::render_method(source, class, method, indent, lines),
        MockStyle::Modern => modern::render_method(source, method, indent, lines),
    }
}

fn namespace_opener(namespace: &str) -> String {
    if namespace.is_empty() {
        "namespace {".to_string()
    } else {
        format!("namespace {} {{", namespace)
    }
}

fn namespace_closer(namespace: &str) -> String {
    if namespace.is_empty() {
        "}  // namespace".to_string()
    } else {
        format!("}}  // namespace {}", namespace)
    }
}

/// Template parameters renamed to `T0`, `T1`, ... with the matching base
/// class arguments.
fn positional_template_params(params: &[TemplateParam<'_>]) -> (Vec<String>, Vec<String>) {
    params
        .iter()
        .enumerate()
        .map(|(i, param)| {
            let name = format!("T{}", i);
            let arg = if param.variadic {
                format!("{}...", name)
            } else {
                name.clone()
            };
            (template_param_decl(param, &name), arg)
        })
        .unzip()
}

fn param_name(param: &TemplateParam<'_>, index: usize) -> String {
    if param.name.is_empty() {
        format!("T{}", index)
    } else {
        param.name.to_string()
    }
}

fn template_param_decl(param: &TemplateParam<'_>, name: &str) -> String {
    let ellipsis = if param.variadic { "..." } else { "" };
    if param.template_template {
        return format!("template <typename...> class{} {}", ellipsis, name);
    }
    match param.bound {
        Some(bound) => format!("{}{} {}", bound.render(), ellipsis, name),
        None => format!("typename{} {}", ellipsis, name),
    }
}

/// Whether `text` has a comma outside parentheses, which a macro argument
/// cannot carry unwrapped.
pub fn has_unparenthesized_comma(text: &str) -> bool {
    let mut depth = 0usize;
    for c in text.chars() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => return true,
            _ => {}
        }
    }
    false
}

/// Wrap `text` in parentheses when it could not be passed to a macro as is.
pub fn escape_for_macro(text: &str) -> String {
    if has_unparenthesized_comma(text) {
        format!("({})", text)
    } else {
        text.to_string()
    }
}

fn return_type_text(method: &Function<'_>) -> String {
    method
        .return_type
        .map(|ty| ty.render())
        .unwrap_or_else(|| "void".to_string())
}
