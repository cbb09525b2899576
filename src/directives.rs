//! Palette swap directives embedded in string values.
//!
//! Appearance fields such as `bodyDirectives` hold text like:
//!
//! ```text
//! ?replace;ffca8a=e0975c;e0975c=a85636?replace;735e3a=6f2919
//! ```
//!
//! Each `?replace` starts a group, and each `;name=value` inside a group is
//! one color replacement.

use std::fmt;

const GROUP_MARKER: &str = "?replace";
const GROUP_START: &str = "?replace;";
const SEPARATOR: char = ';';

/// One color replacement: the color to replace and its substitute
pub type ColorReplacement = (String, String);

/// Ordered groups of color replacements. Formatting with `Display` yields
/// the directive text, leaving out empty groups.
///
/// ```
/// use sbvj::ColorDirectives;
/// let directives = ColorDirectives::parse("?replace;body=ffaa00");
/// assert_eq!(
///     directives.groups(),
///     &[vec![("body".to_string(), "ffaa00".to_string())]]
/// );
/// assert_eq!(directives.to_string(), "?replace;body=ffaa00");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColorDirectives {
    groups: Vec<Vec<ColorReplacement>>,
}

impl ColorDirectives {
    pub fn new(groups: Vec<Vec<ColorReplacement>>) -> Self {
        ColorDirectives { groups }
    }

    /// Parses directive text.
    ///
    /// Text before the first `?replace;` is ignored, as are empty groups and
    /// empty replacements. A replacement without an `=` has an empty value.
    pub fn parse(text: &str) -> Self {
        let mut groups = Vec::new();
        let mut segments = text.split(GROUP_START);

        // whatever precedes the first marker is not a group
        segments.next();

        for segment in segments {
            let group: Vec<ColorReplacement> = segment
                .split(SEPARATOR)
                .filter(|token| !token.is_empty())
                .map(|token| match token.split_once('=') {
                    Some((name, value)) => (name.to_string(), value.to_string()),
                    None => (token.to_string(), String::new()),
                })
                .collect();

            if !group.is_empty() {
                groups.push(group);
            }
        }

        ColorDirectives { groups }
    }

    pub fn groups(&self) -> &[Vec<ColorReplacement>] {
        &self.groups
    }

    pub fn groups_mut(&mut self) -> &mut Vec<Vec<ColorReplacement>> {
        &mut self.groups
    }

    pub fn into_groups(self) -> Vec<Vec<ColorReplacement>> {
        self.groups
    }

    pub fn is_empty(&self) -> bool {
        self.groups.iter().all(|x| x.is_empty())
    }

    /// Looks up the substitute for a color in the first group that replaces it
    pub fn replacement(&self, name: &str) -> Option<&str> {
        self.groups
            .iter()
            .flatten()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

impl fmt::Display for ColorDirectives {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for group in self.groups.iter().filter(|x| !x.is_empty()) {
            f.write_str(GROUP_MARKER)?;
            for (name, value) in group {
                write!(f, ";{}={}", name, value)?;
            }
        }
        Ok(())
    }
}

impl From<Vec<Vec<ColorReplacement>>> for ColorDirectives {
    fn from(groups: Vec<Vec<ColorReplacement>>) -> Self {
        ColorDirectives::new(groups)
    }
}

/// Decodes directive text into groups of `(name, value)` pairs
pub fn decode_color_directives(text: &str) -> Vec<Vec<ColorReplacement>> {
    ColorDirectives::parse(text).into_groups()
}

/// Encodes groups of `(name, value)` pairs, skipping empty groups
pub fn encode_color_directives(groups: &[Vec<ColorReplacement>]) -> String {
    let mut out = String::new();
    for group in groups.iter().filter(|x| !x.is_empty()) {
        out.push_str(GROUP_MARKER);
        for (name, value) in group {
            out.push(SEPARATOR);
            out.push_str(name);
            out.push('=');
            out.push_str(value);
        }
    }
    out
}
