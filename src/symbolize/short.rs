//! Shortening of qualified function names.

use std::borrow::Cow;

/// Some toolchains encode a package/type boundary in generated method names
/// with a center dot instead of a period. It never shows up in Rust symbols,
/// in which case replacing it is a no-op.
const CENTER_DOT: char = '\u{00b7}';

/// Strips the qualification off `name`, leaving the bare function or method
/// name.
///
/// 1. Everything up to and including the last `/` is removed, dropping
///    package paths such as `example.com/mod/`.
/// 2. Center dots are replaced with periods.
/// 3. Everything up to and including the last `.` or `::` that is not nested
///    inside `<>`, `()`, `[]` or `{}` is removed, dropping the module and
///    type qualifiers while keeping generic arguments and closure markers
///    intact.
///
/// # Example
///
/// ```
/// use pretty_stack::short_name;
///
/// assert_eq!(short_name("example.com/mod/pkg.Type.Method"), "Method");
/// assert_eq!(short_name("my_crate::server::Server::run"), "run");
/// assert_eq!(short_name("<my_crate::Foo as core::fmt::Debug>::fmt"), "fmt");
/// ```
pub fn short_name(name: &str) -> Cow<'_, str> {
    let name = match name.rfind('/') {
        Some(i) => &name[i + 1..],
        None => name,
    };
    if name.contains(CENTER_DOT) {
        let name = name.replace(CENTER_DOT, ".");
        let start = unqualified_start(&name);
        return Cow::Owned(name[start..].to_string());
    }
    Cow::Borrowed(&name[unqualified_start(name)..])
}

/// Byte offset just past the last top-level qualifier separator.
fn unqualified_start(name: &str) -> usize {
    let bytes = name.as_bytes();
    let mut depth = 0usize;
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'<' | b'(' | b'[' | b'{' => depth += 1,
            // `->` in a fn pointer type does not close anything.
            b'>' if i > 0 && bytes[i - 1] == b'-' => {}
            b'>' | b')' | b']' | b'}' => depth = depth.saturating_sub(1),
            b'.' if depth == 0 => start = i + 1,
            b':' if depth == 0 && bytes.get(i + 1) == Some(&b':') => {
                // A turbofish belongs to the segment before it.
                if bytes.get(i + 2) != Some(&b'<') {
                    start = i + 2;
                }
                i += 1;
            }
            _ => {}
        }
        i += 1;
    }
    start
}
