//! Verbatim parameter-list text recovery.
//!
//! Mock macros repeat a method's parameter list as the user wrote it, minus
//! the parts that cannot appear in a mock signature: `//` comments (they
//! would swallow the macro's closing parentheses) and default values. Block
//! comments are harmless inside a macro argument, so [`BlockComments::Keep`]
//! leaves them in place.

/// What to do with `/* ... */` comments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockComments {
    Keep,
    Strip,
}

/// Normalize raw parameter-list text.
///
/// - `//` comments are removed.
/// - `/* */` comments are kept or removed according to `block_comments`.
/// - A default value (`= ...`) is removed up to the next top-level comma.
///   Nesting is tracked over `()`, `[]`, `{}` and over `<>` when the `<`
///   directly follows a name.
/// - Runs of whitespace collapse to one space; the result is trimmed.
///
/// String and character literals are copied through untouched, so a `,` or
/// `//` inside a literal default does not confuse the scan.
pub fn normalize_parameter_text(raw: &str, block_comments: BlockComments) -> String {
    let chars: Vec<char> = raw.chars().collect();
    let mut out = String::with_capacity(raw.len());

    let mut in_default = false;
    let mut depth = 0usize;
    let mut angle_depth = 0usize;
    // Last non-whitespace character of code (not comments).
    let mut prev_code: Option<char> = None;

    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        let next = chars.get(i + 1).copied();

        // Comments
        if c == '/' && next == Some('/') {
            while i < chars.len() && chars[i] != '\n' {
                i += 1;
            }
            if !in_default {
                out.push(' ');
            }
            continue;
        }
        if c == '/' && next == Some('*') {
            let start = i;
            i += 2;
            while i < chars.len() && !(chars[i] == '*' && chars.get(i + 1) == Some(&'/')) {
                i += 1;
            }
            i = (i + 2).min(chars.len());
            if in_default {
                continue;
            }
            match block_comments {
                BlockComments::Keep => out.extend(&chars[start..i]),
                BlockComments::Strip => out.push(' '),
            }
            continue;
        }

        // Literals
        let is_literal_quote =
            c == '"' || (c == '\'' && !i.checked_sub(1).is_some_and(|p| chars[p].is_ascii_digit()));
        if is_literal_quote {
            let start = i;
            i += 1;
            while i < chars.len() && chars[i] != c {
                if chars[i] == '\\' {
                    i += 1;
                }
                i += 1;
            }
            i = (i + 1).min(chars.len());
            if !in_default {
                out.extend(&chars[start..i]);
            }
            prev_code = Some(c);
            continue;
        }

        if in_default {
            match c {
                '(' | '[' | '{' => depth += 1,
                ')' | ']' | '}' => depth = depth.saturating_sub(1),
                '<' if prev_code.is_some_and(is_name_char) && closes_angle(&chars, i) => {
                    angle_depth += 1
                }
                '>' if angle_depth > 0 => angle_depth -= 1,
                ',' if depth == 0 && angle_depth == 0 => {
                    in_default = false;
                    out.push(',');
                }
                _ => {}
            }
        } else if c == '=' && is_bare_assignment(prev_code, next) {
            let trimmed = out.trim_end().len();
            out.truncate(trimmed);
            in_default = true;
            depth = 0;
            angle_depth = 0;
        } else {
            out.push(c);
        }

        if !c.is_whitespace() {
            prev_code = Some(c);
        }
        i += 1;
    }

    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Whether an `=` starts a default value rather than being part of an
/// operator like `==`, `<=` or `+=`.
fn is_bare_assignment(prev: Option<char>, next: Option<char>) -> bool {
    next != Some('=')
        && !prev.is_some_and(|p| matches!(p, '=' | '!' | '<' | '>' | '+' | '-' | '*' | '/' | '%' | '&' | '|' | '^'))
}

/// Whether the `<` at `open` is closed by a `>` before the enclosing
/// bracket closes, so it can be read as a template argument list rather
/// than a comparison.
fn closes_angle(chars: &[char], open: usize) -> bool {
    let mut brackets = 0usize;
    let mut angles = 1usize;
    let mut i = open + 1;
    while i < chars.len() {
        match chars[i] {
            '(' | '[' | '{' => brackets += 1,
            ')' | ']' | '}' => {
                if brackets == 0 {
                    return false;
                }
                brackets -= 1;
            }
            '<' => angles += 1,
            '>' => {
                angles -= 1;
                if angles == 0 {
                    return true;
                }
            }
            ';' => return false,
            quote @ ('"' | '\'') if !(quote == '\'' && chars[i - 1].is_ascii_digit()) => {
                i += 1;
                while i < chars.len() && chars[i] != quote {
                    if chars[i] == '\\' {
                        i += 1;
                    }
                    i += 1;
                }
            }
            _ => {}
        }
        i += 1;
    }
    false
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
