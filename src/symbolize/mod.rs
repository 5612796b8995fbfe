//! Turning a frame's symbol into the name printed in its body.

use std::borrow::Cow;

mod short;

pub use self::short::short_name;

/// Printed in place of anything that could not be resolved.
pub(crate) const UNKNOWN: &str = "???";

/// Returns the name to print for a frame whose symbol is `symbol`.
///
/// Symbols may come from the live symbolizer (already demangled) or from a
/// caller-provided frame list (possibly still mangled); both are first brought
/// to their qualified form. A missing symbol yields `???`.
pub(crate) fn function_name(symbol: Option<&str>, short: bool) -> Cow<'_, str> {
    let symbol = match symbol {
        Some(symbol) => symbol,
        None => return Cow::Borrowed(UNKNOWN),
    };
    let qualified = qualified_name(symbol);
    if !short {
        return qualified;
    }
    match qualified {
        Cow::Borrowed(name) => short_name(name),
        Cow::Owned(name) => Cow::Owned(short_name(&name).into_owned()),
    }
}

/// Demangles `symbol` if it is a mangled Rust symbol and drops the hash of
/// legacy Rust symbols.
///
/// Anything else, including names from other languages, is returned as-is.
pub fn qualified_name(symbol: &str) -> Cow<'_, str> {
    if let Ok(demangled) = rustc_demangle::try_demangle(symbol) {
        return Cow::Owned(format!("{:#}", demangled));
    }
    Cow::Borrowed(strip_hash(symbol))
}

// `path::to::function::h0123456789abcdef` as printed by the non-alternate
// form of a demangled legacy symbol.
fn strip_hash(name: &str) -> &str {
    if let Some(i) = name.rfind("::") {
        let hash = &name[i + 2..];
        if hash.len() == 17
            && hash.starts_with('h')
            && hash[1..].bytes().all(|b| b.is_ascii_hexdigit())
        {
            return &name[..i];
        }
    }
    name
}
