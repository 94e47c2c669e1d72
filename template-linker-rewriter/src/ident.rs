//! Identifier synthesis for hoisted references

/// Reduce a raw literal to the alphanumeric core of an identifier.
///
/// Every run of non-alphanumeric characters (quotes, slashes, dots,
/// underscores, escapes) becomes a single `_`; separators at either end
/// are dropped.
pub fn sanitize(literal: &str) -> String {
    let mut core = String::with_capacity(literal.len());
    for ch in literal.chars() {
        if ch.is_ascii_alphanumeric() {
            core.push(ch);
        } else if !core.is_empty() && !core.ends_with('_') {
            core.push('_');
        }
    }
    if core.ends_with('_') {
        core.pop();
    }
    core
}

/// Identifier bound to `literal` when hoisted out of a `callee(...)` call
pub fn synthesize(callee: &str, literal: &str) -> String {
    wrap(callee, &sanitize(literal))
}

/// Variant of [`synthesize`] with a numeric discriminator, used when two
/// different literals reduce to the same core
pub fn synthesize_nth(callee: &str, literal: &str, n: usize) -> String {
    wrap(callee, &format!("{}_{}", sanitize(literal), n))
}

fn wrap(callee: &str, core: &str) -> String {
    format!("__$_{}_{}__", callee, core)
}
