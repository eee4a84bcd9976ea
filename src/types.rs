use serde::Serialize;

/// Refined type of a JSON value, used for type-aware display.
///
/// Strings are further classified as `Date`, `Url` or `Email` when they
/// match the corresponding shape; see [`crate::value::detect_data_type`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    Null,
    Boolean,
    Number,
    String,
    Date,
    Url,
    Email,
    Object,
    Array,
}

impl DataType {
    /// Short label for the type badge next to a value.
    pub fn badge_label(self) -> &'static str {
        match self {
            DataType::Null => "null",
            DataType::Boolean => "bool",
            DataType::Number => "num",
            DataType::String => "str",
            DataType::Date => "date",
            DataType::Url => "url",
            DataType::Email => "email",
            DataType::Object => "object",
            DataType::Array => "array",
        }
    }
}

/// What part of a node a search hit landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    Key,
    Value,
    Both,
}

/// A single search hit. At most one record exists per path; a key hit and
/// a value hit on the same node merge into one record with `MatchKind::Both`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchMatch {
    pub path: String,
    pub key: Option<String>,
    pub value: Option<String>,
    pub match_kind: MatchKind,
}

/// One run of highlighted display text: the text before the hit, the hit
/// itself, and (on the final run) the trailing remainder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HighlightSpan {
    pub before: String,
    pub matched: String,
    pub after: String,
}

/// Theme requested by the host. `Auto` defers to the system preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    Auto,
}

impl Theme {
    pub fn resolve(self, system_prefers_dark: bool) -> ResolvedTheme {
        match self {
            Theme::Light => ResolvedTheme::Light,
            Theme::Dark => ResolvedTheme::Dark,
            Theme::Auto => {
                if system_prefers_dark {
                    ResolvedTheme::Dark
                } else {
                    ResolvedTheme::Light
                }
            }
        }
    }
}

/// Concrete theme after resolving `Theme::Auto`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolvedTheme {
    Light,
    Dark,
}

/// Layout direction for object tables: key/value rows, or keys transposed
/// into a header row. Orthogonal to the rendering strategy itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Rows,
    Columns,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_theme_follows_system_preference() {
        assert_eq!(Theme::Auto.resolve(true), ResolvedTheme::Dark);
        assert_eq!(Theme::Auto.resolve(false), ResolvedTheme::Light);
        assert_eq!(Theme::Dark.resolve(false), ResolvedTheme::Dark);
        assert_eq!(Theme::Light.resolve(true), ResolvedTheme::Light);
    }
}
