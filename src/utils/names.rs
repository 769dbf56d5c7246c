// image-optimizer/src/utils/names.rs

/// Turns a file stem into something safe for any filesystem and URL.
///
/// Whitespace becomes `-`, parentheses become `_`, anything else outside
/// `[A-Za-z0-9_]` becomes `-`. Runs of separators are then squeezed so that
/// no `--`, `__`, `-_` or `_-` survives, and separators are trimmed from both
/// ends. Applying it twice gives the same result as applying it once.
pub fn normalize_basename(stem: &str) -> String {
    if stem.is_empty() {
        return String::new();
    }

    let mapped: String = stem
        .trim()
        .chars()
        .map(|c| {
            if c.is_whitespace() {
                '-'
            } else if c == '(' || c == ')' {
                '_'
            } else if c.is_ascii_alphanumeric() || c == '_' {
                c
            } else {
                '-'
            }
        })
        .collect();

    let squeezed = squeeze(&mapped, '-');
    let joined = squeezed.replace("-_", "_").replace("_-", "_");

    squeeze(&joined, '_')
        .trim_matches(|c| c == '-' || c == '_')
        .to_string()
}

fn squeeze(input: &str, sep: char) -> String {
    let mut out = String::with_capacity(input.len());
    let mut last = None;
    for c in input.chars() {
        if c == sep && last == Some(sep) {
            continue;
        }
        out.push(c);
        last = Some(c);
    }
    out
}
