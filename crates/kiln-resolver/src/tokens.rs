//! Theme-path parsing of variable and style names.
//!
//! Names like `Colors/Brand/Primary/Main`, `text.secondary` or `Gray 500`
//! are parsed into `<group>.<tone>` theme paths.

use indexmap::IndexMap;

/// Canonical semantic groups.
pub const GROUPS: &[&str] = &[
    "text", "primary", "secondary", "success", "error", "warning", "info", "grey",
];

const PALETTE_TONES: &[&str] = &["main", "light", "dark", "contrastText"];
const TEXT_TONES: &[&str] = &["primary", "secondary", "disabled"];
const GREY_TONES: &[&str] = &[
    "50", "100", "200", "300", "400", "500", "600", "700", "800", "900", "A100", "A200", "A400",
    "A700",
];

const SEPARATORS: &[char] = &['/', '.', ' ', '_', '-'];

/// Project-specific names for the canonical groups.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupAliases {
    aliases: IndexMap<String, String>,
}

impl Default for GroupAliases {
    fn default() -> Self {
        let mut aliases = Self::empty();
        for (alias, group) in [
            ("brand", "primary"),
            ("accent", "secondary"),
            ("danger", "error"),
            ("negative", "error"),
            ("positive", "success"),
            ("caution", "warning"),
            ("neutral", "grey"),
            ("gray", "grey"),
            ("content", "text"),
        ] {
            aliases.insert(alias, group);
        }
        aliases
    }
}

impl GroupAliases {
    /// No aliases at all; only canonical group names are recognized.
    pub fn empty() -> Self {
        Self {
            aliases: IndexMap::new(),
        }
    }

    /// Map `alias` to `group`. Aliases to unknown groups are ignored.
    pub fn insert(&mut self, alias: &str, group: &str) {
        let group = group.trim().to_lowercase();
        if !GROUPS.contains(&group.as_str()) {
            tracing::warn!(alias, group = %group, "ignoring alias to unknown color group");
            return;
        }
        self.aliases.insert(alias.trim().to_lowercase(), group);
    }

    pub fn with_alias(mut self, alias: &str, group: &str) -> Self {
        self.insert(alias, group);
        self
    }

    /// Extend with several aliases; later entries override earlier ones.
    pub fn extend<'a>(&mut self, aliases: impl IntoIterator<Item = (&'a String, &'a String)>) {
        for (alias, group) in aliases {
            self.insert(alias, group);
        }
    }

    /// Canonical group of a lower-case segment.
    pub fn canonical<'a>(&'a self, segment: &'a str) -> Option<&'a str> {
        if GROUPS.contains(&segment) {
            return Some(segment);
        }
        self.aliases.get(segment).map(String::as_str)
    }
}

fn tones(group: &str) -> &'static [&'static str] {
    match group {
        "text" => TEXT_TONES,
        "grey" => GREY_TONES,
        _ => PALETTE_TONES,
    }
}

fn default_tone(group: &str) -> Option<&'static str> {
    match group {
        "text" => Some("primary"),
        "grey" => None,
        _ => Some("main"),
    }
}

/// Match the remaining segments against the group's tones.
fn parse_tone(group: &str, rest: &[String]) -> Option<&'static str> {
    if rest.is_empty() {
        return default_tone(group);
    }
    let joined: String = rest.concat();
    tones(group)
        .iter()
        .copied()
        .find(|tone| tone.to_lowercase() == joined)
}

/// Parse a variable or style name into a theme path such as `primary.main`.
///
/// Every segment is tried as a group in order; the first group whose
/// remaining segments form a valid tone wins.
pub fn parse_token_name(name: &str, aliases: &GroupAliases) -> Option<String> {
    let segments: Vec<String> = name
        .split(SEPARATORS)
        .filter(|segment| !segment.is_empty())
        .map(str::to_lowercase)
        .collect();

    for (index, segment) in segments.iter().enumerate() {
        let Some(group) = aliases.canonical(segment) else {
            continue;
        };
        if let Some(tone) = parse_tone(group, &segments[index + 1..]) {
            return Some(format!("{}.{}", group, tone));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn parse(name: &str) -> Option<String> {
        parse_token_name(name, &GroupAliases::default())
    }

    #[test]
    fn test_palette_names() {
        assert_eq!(parse("Primary/Main").as_deref(), Some("primary.main"));
        assert_eq!(parse("primary.light").as_deref(), Some("primary.light"));
        assert_eq!(parse("Error/Contrast Text").as_deref(), Some("error.contrastText"));
        assert_eq!(parse("warning-contrastText").as_deref(), Some("warning.contrastText"));
        assert_eq!(parse("Success").as_deref(), Some("success.main"));
    }

    #[test]
    fn test_text_group() {
        assert_eq!(parse("Text/Primary").as_deref(), Some("text.primary"));
        assert_eq!(parse("text_disabled").as_deref(), Some("text.disabled"));
        assert_eq!(parse("Text").as_deref(), Some("text.primary"));
    }

    #[test]
    fn test_grey_has_no_default_tone() {
        assert_eq!(parse("Grey/500").as_deref(), Some("grey.500"));
        assert_eq!(parse("Gray A100").as_deref(), Some("grey.A100"));
        assert_eq!(parse("Grey"), None);
        assert_eq!(parse("Grey/1000"), None);
    }

    #[test]
    fn test_aliases() {
        assert_eq!(parse("Brand/Dark").as_deref(), Some("primary.dark"));
        assert_eq!(parse("Danger").as_deref(), Some("error.main"));
        assert_eq!(parse("Neutral/200").as_deref(), Some("grey.200"));

        let custom = GroupAliases::empty().with_alias("ocean", "Info");
        assert_eq!(parse_token_name("Ocean/Light", &custom).as_deref(), Some("info.light"));
        assert_eq!(parse_token_name("Brand/Dark", &custom), None);
    }

    #[test]
    fn test_alias_to_unknown_group_is_ignored() {
        let aliases = GroupAliases::empty().with_alias("sky", "blue");
        assert_eq!(parse_token_name("Sky", &aliases), None);
    }

    #[test]
    fn test_prefixed_names_find_later_group() {
        assert_eq!(parse("Colors/Brand/Primary/Main").as_deref(), Some("primary.main"));
        assert_eq!(parse("Brand Primary").as_deref(), Some("primary.main"));
    }

    #[test]
    fn test_unparseable() {
        assert_eq!(parse("Surface/Elevated"), None);
        assert_eq!(parse(""), None);
        assert_eq!(parse("Primary/Main/Hover"), None);
    }

    proptest! {
        #[test]
        fn prop_separator_choice_is_irrelevant(
            group in prop::sample::select(vec!["primary", "secondary", "error", "info"]),
            tone in prop::sample::select(vec!["main", "light", "dark"]),
            sep in prop::sample::select(vec!["/", ".", " ", "_", "-"]),
        ) {
            let name = format!("{}{}{}", group, sep, tone);
            prop_assert_eq!(parse(&name), Some(format!("{}.{}", group, tone)));
        }

        #[test]
        fn prop_parse_never_panics(name in ".{0,40}") {
            let _ = parse(&name);
        }

        #[test]
        fn prop_parsed_paths_have_known_group(name in "[A-Za-z0-9/ ._-]{0,30}") {
            if let Some(path) = parse(&name) {
                let group = path.split('.').next().unwrap_or_default();
                prop_assert!(GROUPS.contains(&group));
            }
        }
    }
}
