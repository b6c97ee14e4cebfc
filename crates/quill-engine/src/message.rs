use quill_types::{format_number, LogValue};
use serde_json::Value;

/// Assemble the `{{message}}` fragment from a call's positional arguments.
///
/// When the first argument is a string it acts as a printf-style format:
/// `%s` consumes with string coercion, `%d` with numeric coercion (NaN for
/// anything non-numeric), `%j` with JSON serialization (`[Circular]` on
/// failure). A token with no remaining argument stays verbatim. Arguments
/// left over after the scan are stringified independently — structured
/// values through a depth-bounded inspection — and all fragments join with
/// single spaces.
pub fn assemble(args: &[LogValue], max_depth: usize) -> String {
    if args.is_empty() {
        return String::new();
    }

    let mut fragments = Vec::new();
    let mut rest = args;
    if let LogValue::Str(format) = &args[0] {
        rest = &args[1..];
        let (formatted, consumed) = apply_format(format, rest);
        fragments.push(formatted);
        rest = &rest[consumed..];
    }

    for arg in rest {
        if arg.is_structured() {
            fragments.push(inspect(arg, max_depth));
        } else {
            fragments.push(arg.as_display_string());
        }
    }

    fragments.join(" ")
}

// Scan for %s/%d/%j/%t left to right, consuming one argument per
// substituting token. %t is recognized but never consumes.
fn apply_format(format: &str, args: &[LogValue]) -> (String, usize) {
    let mut out = String::with_capacity(format.len());
    let mut consumed = 0usize;
    let mut chars = format.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        match chars.peek() {
            Some('s') if consumed < args.len() => {
                out.push_str(&args[consumed].as_display_string());
                consumed += 1;
                chars.next();
            }
            Some('d') if consumed < args.len() => {
                out.push_str(&format_number(args[consumed].as_number()));
                consumed += 1;
                chars.next();
            }
            Some('j') if consumed < args.len() => {
                out.push_str(&args[consumed].to_json_string());
                consumed += 1;
                chars.next();
            }
            Some(spec @ ('s' | 'd' | 'j' | 't')) => {
                // Recognized token without an argument to consume (or %t,
                // which never consumes): left verbatim.
                out.push('%');
                out.push(*spec);
                chars.next();
            }
            _ => out.push('%'),
        }
    }

    (out, consumed)
}

/// Depth-bounded single-line structural inspection for arguments that are
/// not consumed by a format token. Nesting beyond the bound collapses to
/// `[Object]`/`[Array]`.
pub fn inspect(value: &LogValue, max_depth: usize) -> String {
    match value {
        LogValue::Json(v) => inspect_json(v, max_depth),
        LogValue::Error(e) => e
            .stack
            .as_ref()
            .map(|stack| format!("{}: {}\n{}", e.name, e.message, stack))
            .unwrap_or_else(|| format!("{}: {}", e.name, e.message)),
        other => other.as_display_string(),
    }
}

fn inspect_json(value: &Value, depth: usize) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n
            .as_f64()
            .map(format_number)
            .unwrap_or_else(|| n.to_string()),
        Value::String(s) => {
            serde_json::to_string(s).unwrap_or_else(|_| "[Circular]".to_string())
        }
        Value::Array(items) => {
            if items.is_empty() {
                return "[]".to_string();
            }
            if depth == 0 {
                return "[Array]".to_string();
            }
            let rendered: Vec<String> = items
                .iter()
                .map(|item| inspect_json(item, depth - 1))
                .collect();
            format!("[{}]", rendered.join(", "))
        }
        Value::Object(map) => {
            if map.is_empty() {
                return "{}".to_string();
            }
            if depth == 0 {
                return "[Object]".to_string();
            }
            let rendered: Vec<String> = map
                .iter()
                .map(|(key, item)| format!("{}: {}", key, inspect_json(item, depth - 1)))
                .collect();
            format!("{{ {} }}", rendered.join(", "))
        }
    }
}
