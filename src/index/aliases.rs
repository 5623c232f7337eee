//! Known team nicknames that general matching would miss.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::matching::normalize;

/// Alias → team abbreviation. Includes fan nicknames and names the franchise
/// carried before relocating or rebranding.
const TEAM_ALIASES: &[(&str, &str)] = &[
    ("niners", "SF"),
    ("the niners", "SF"),
    ("pats", "NE"),
    ("bolts", "LAC"),
    ("fins", "MIA"),
    ("phins", "MIA"),
    ("g-men", "NYG"),
    ("gmen", "NYG"),
    ("big blue", "NYG"),
    ("gang green", "NYJ"),
    ("bucs", "TB"),
    ("jags", "JAX"),
    ("hawks", "SEA"),
    ("cincy", "CIN"),
    ("philly", "PHI"),
    ("pack", "GB"),
    ("america's team", "DAL"),
    ("boys", "DAL"),
    ("commies", "WAS"),
    ("skins", "WAS"),
    ("washington redskins", "WAS"),
    ("washington football team", "WAS"),
    ("oakland raiders", "LV"),
    ("san diego chargers", "LAC"),
    ("st louis rams", "LAR"),
    ("st. louis rams", "LAR"),
    ("la rams", "LAR"),
    ("la chargers", "LAC"),
    ("houston oilers", "TEN"),
    ("tennessee oilers", "TEN"),
];

static ALIAS_LOOKUP: Lazy<HashMap<String, &'static str>> = Lazy::new(|| {
    TEAM_ALIASES
        .iter()
        .map(|(alias, abbr)| (normalize(alias), *abbr))
        .collect()
});

/// Looks up an already-normalized team mention in the alias table.
pub fn team_alias(normalized: &str) -> Option<&'static str> {
    ALIAS_LOOKUP.get(normalized).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alias_lookup() {
        assert_eq!(team_alias("niners"), Some("SF"));
        assert_eq!(team_alias(&normalize("America's Team")), Some("DAL"));
        assert_eq!(team_alias(&normalize("Oakland  Raiders")), Some("LV"));
        assert_eq!(team_alias("chiefs"), None);
    }
}
