use std::sync::OnceLock;

use regex::Regex;

const NAME_PATTERN: &str = "^[a-zA-Z]([a-zA-Z0-9_-]*[a-zA-Z0-9])*$";

/// One parsed template segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Token<'a> {
    pub name: &'a str,
    pub is_variable: bool,
}

impl<'a> Token<'a> {
    /// Parses a raw template segment, stripping a `{}` wrapper.
    pub fn parse(raw: &'a str) -> Option<Self> {
        let (name, is_variable) = match raw.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
            Some(inner) => (inner, true),
            None => (raw, false),
        };
        if is_valid(name) {
            Some(Self { name, is_variable })
        } else {
            None
        }
    }
}

impl std::fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_variable {
            write!(f, "{{{}}}", self.name)
        } else {
            f.write_str(self.name)
        }
    }
}

pub(super) fn is_valid(name: &str) -> bool {
    static NAME_REGEX: OnceLock<Regex> = OnceLock::new();
    NAME_REGEX
        .get_or_init(|| Regex::new(NAME_PATTERN).expect("segment name pattern is valid"))
        .is_match(name)
}
