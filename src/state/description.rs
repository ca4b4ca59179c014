use indexmap::IndexMap;

use crate::state::selection::format_arg_value;

/// Fill `{name}` placeholders of a calculation description with argument
/// values. Unknown names and unterminated braces are kept verbatim.
pub fn render_description(template: &str, args: &IndexMap<String, f64>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let Some(close) = after.find(['}', '{']) else {
            out.push_str(&rest[open..]);
            return out;
        };

        let name = &after[..close];
        match (after.as_bytes()[close], args.get(name)) {
            (b'}', Some(value)) => {
                out.push_str(&format_arg_value(*value));
                rest = &after[close + 1..];
            }
            _ => {
                // Keep the brace and rescan from just after it.
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}
