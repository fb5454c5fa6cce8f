//! Lexical path cleaning shared by template registration and request lookup.

use smallvec::SmallVec;

pub(crate) const SLASH: char = '/';

pub type Segments<'a> = SmallVec<[&'a str; 8]>;

/// Splits `path` on `/` into its clean segments.
///
/// Repeated, leading and trailing separators are collapsed, `.` segments are
/// dropped and `..` removes the previous segment (it never climbs above the
/// root). The result is the same for every spelling of one logical path.
pub fn segments(path: &str) -> Segments<'_> {
    let mut out: Segments<'_> = SmallVec::new();
    for part in path.split(SLASH) {
        match part {
            "" | "." => {}
            ".." => {
                out.pop();
            }
            _ => out.push(part),
        }
    }
    out
}

/// Returns the canonical `/`-prefixed spelling of `path`.
pub fn clean(path: &str) -> String {
    let parts = segments(path);
    if parts.is_empty() {
        return String::from("/");
    }
    let mut s = String::with_capacity(path.len());
    for part in parts {
        s.push(SLASH);
        s.push_str(part);
    }
    s
}
