use regex::{Captures, Regex};

use crate::error::ThemeError;

/// A `#rrggbb` value in either case.
pub const HEX: &str = "#[0-9a-fA-F]{6}";

/// A region of config text that a rewriter owns.
///
/// Everything outside the matched region is left byte-for-byte intact.
/// Two optional named groups shape the substitution:
/// - `keep`: copied in front of the replacement (indentation, leading
///   punctuation).
/// - `guard`: when it captures anything, that match is left untouched. Used
///   to skip declarations that merely end with the wanted key, such as the
///   `color:` inside `background-color:`.
#[derive(Debug, Clone)]
pub struct Marker {
    pattern: Regex,
}

impl Marker {
    pub fn new(pattern: &str) -> Result<Self, ThemeError> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
        })
    }

    /// A block opened by the literal line `begin` and closed by the first
    /// match of `end` after it.
    pub fn block(begin: &str, end: &str) -> Result<Self, ThemeError> {
        Self::new(&format!("(?s){}.*?{end}", regex::escape(begin)))
    }

    /// A `key <sep> <value>` assignment at the start of a line.
    pub fn line_key(key: &str, separator: &str, value: &str) -> Result<Self, ThemeError> {
        Self::new(&format!(
            r"(?m)^(?P<keep>[ \t]*){}[ \t]*{separator}[ \t]*{value}",
            regex::escape(key)
        ))
    }

    /// A CSS declaration `key: #hex;` that is not the tail of a longer name.
    pub fn css_declaration(key: &str) -> Result<Self, ThemeError> {
        Self::new(&format!(
            r"(?P<guard>[-\w]?){}:\s*{HEX};",
            regex::escape(key)
        ))
    }

    /// Replace every owned region with `replacement`, taken literally.
    pub fn replace(&self, text: &str, replacement: &str) -> Replaced {
        let mut count = 0;
        let text = self
            .pattern
            .replace_all(text, |caps: &Captures| {
                if caps.name("guard").is_some_and(|m| !m.is_empty()) {
                    return caps[0].to_string();
                }
                count += 1;
                let keep = caps.name("keep").map_or("", |m| m.as_str());
                format!("{keep}{replacement}")
            })
            .into_owned();
        Replaced { text, count }
    }
}

/// Result of a marker substitution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replaced {
    pub text: String,
    /// Regions actually rewritten.
    pub count: usize,
}

/// Apply `(marker, replacement)` pairs in order, returning the final text and
/// the total number of rewritten regions.
pub fn replace_all(text: &str, edits: &[(Marker, String)]) -> Replaced {
    let mut out = Replaced {
        text: text.to_string(),
        count: 0,
    };
    for (marker, replacement) in edits {
        let step = marker.replace(&out.text, replacement);
        out.text = step.text;
        out.count += step.count;
    }
    out
}
