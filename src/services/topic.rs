//! Maps freeform topic phrases onto the closed topic taxonomy.
//!
//! The taxonomy content lives in [`TOPIC_RULES`]; [`match_rules`] is the only
//! matching logic and works on any rule table. Rules are tried in order and
//! the first hit wins, so more specific categories come first (injuries
//! before quarterback play, team performance before player performance).

use std::str::FromStr;

use crate::matching::normalize;
use crate::models::{clamp_confidence, CanonicalTopic, RawTopic, TopicCategory};

/// Keyword patterns for one category.
///
/// `keywords` are stems matched at the start of a word, so `"injur"` covers
/// "injury" and "injured". `words` must match a whole word, so `"torn"` does
/// not fire inside "tornado" and `"gm"` not inside "paradigm".
#[derive(Debug, Clone, Copy)]
pub struct TopicRule {
    pub category: TopicCategory,
    pub keywords: &'static [&'static str],
    pub words: &'static [&'static str],
}

impl TopicRule {
    /// True when any keyword or word occurs in a normalized phrase.
    pub fn matches(&self, normalized: &str) -> bool {
        self.keywords.iter().any(|kw| occurs(normalized, kw, false))
            || self.words.iter().any(|w| occurs(normalized, w, true))
    }
}

/// Priority-ordered rule table covering every category.
pub const TOPIC_RULES: &[TopicRule] = &[
    TopicRule {
        category: TopicCategory::InjuriesAndPlayerHealth,
        keywords: &[
            "injur",
            "concussion",
            "hamstring",
            "sprain",
            "health",
            "rehab",
            "recovery",
            "questionable",
            "doubtful",
            "ruled out",
            "out for the season",
        ],
        words: &["acl", "torn", "tear"],
    },
    TopicRule {
        category: TopicCategory::SuspensionsAndDiscipline,
        keywords: &[
            "suspen",
            "disciplin",
            "fined",
            "fines",
            "arrest",
            "conduct policy",
            "legal",
        ],
        words: &[],
    },
    TopicRule {
        category: TopicCategory::RetirementsAndLegacy,
        keywords: &[
            "retire",
            "hall of fame",
            "legacy",
            "milestone",
            "all-time",
            "all time",
        ],
        words: &[],
    },
    TopicRule {
        category: TopicCategory::FreeAgency,
        keywords: &["free agen", "franchise tag", "transition tag", "tender"],
        words: &[],
    },
    TopicRule {
        category: TopicCategory::ContractsAndSalaryCap,
        keywords: &[
            "contract",
            "extension",
            "salary",
            "cap space",
            "cap hit",
            "holdout",
            "hold-in",
            "guaranteed",
            "restructur",
        ],
        words: &[],
    },
    TopicRule {
        category: TopicCategory::BettingAndFantasy,
        keywords: &[
            "betting",
            "wager",
            "point spread",
            "against the spread",
            "over/under",
            "moneyline",
            "sportsbook",
            "prop bet",
            "fantasy",
        ],
        words: &["bets", "odds", "props", "dfs"],
    },
    TopicRule {
        category: TopicCategory::TransactionsAndRosterMoves,
        keywords: &[
            "signing",
            "signed",
            "signs",
            "roster move",
            "release",
            "waive",
            "waiver",
            "acquire",
            "acquisition",
            "practice squad",
            "activated",
            "elevated",
        ],
        words: &["trade", "trades", "traded", "trading", "cut", "cuts"],
    },
    TopicRule {
        category: TopicCategory::DraftAndProspects,
        keywords: &["draft", "prospect", "rookie", "combine", "pro day"],
        words: &["mock", "udfa"],
    },
    TopicRule {
        category: TopicCategory::CoachingAndFrontOffice,
        keywords: &[
            "coach",
            "coordinator",
            "front office",
            "general manager",
            "hire",
            "hiring",
            "fired",
            "firing",
        ],
        words: &["gm"],
    },
    TopicRule {
        category: TopicCategory::Playoffs,
        keywords: &[
            "playoff",
            "postseason",
            "super bowl",
            "wild card",
            "wild-card",
            "divisional round",
            "conference championship",
            "seeding",
            "clinch",
        ],
        words: &[],
    },
    TopicRule {
        category: TopicCategory::GamePreviews,
        keywords: &[
            "preview",
            "predict",
            "matchup",
            "keys to the game",
            "what to watch",
            "upcoming",
        ],
        words: &[],
    },
    TopicRule {
        category: TopicCategory::GameRecaps,
        keywords: &[
            "recap",
            "result",
            "final score",
            "highlight",
            "box score",
            "takeaways",
            "postgame",
            "post-game",
        ],
        words: &[],
    },
    TopicRule {
        category: TopicCategory::OffensiveLine,
        keywords: &[
            "offensive line",
            "o-line",
            "lineman",
            "linemen",
            "pass protection",
            "pass block",
            "run block",
            "sacks allowed",
        ],
        words: &["oline"],
    },
    TopicRule {
        category: TopicCategory::QuarterbackPerformance,
        keywords: &["quarterback", "passer", "signal-caller", "signal caller"],
        words: &["qb", "qbs"],
    },
    TopicRule {
        category: TopicCategory::DefensiveStrategy,
        keywords: &[
            "defens",
            "pass rush",
            "blitz",
            "coverage",
            "secondary",
            "sack",
            "turnover",
            "interception",
        ],
        words: &[],
    },
    TopicRule {
        category: TopicCategory::RushingAndRunningBacks,
        keywords: &[
            "running back",
            "rushing",
            "rusher",
            "run game",
            "ground game",
            "backfield",
        ],
        words: &["rb", "rbs"],
    },
    TopicRule {
        category: TopicCategory::ReceiversAndTightEnds,
        keywords: &[
            "receiver",
            "receiving",
            "tight end",
            "pass catcher",
            "route",
            "catches",
            "targets",
            "yards after catch",
        ],
        words: &["wr", "wrs"],
    },
    TopicRule {
        category: TopicCategory::SpecialTeams,
        keywords: &[
            "special teams",
            "kicker",
            "kicking",
            "punt",
            "field goal",
            "kick return",
            "kickoff",
            "long snapper",
            "extra point",
        ],
        words: &[],
    },
    TopicRule {
        category: TopicCategory::OffensiveStrategy,
        keywords: &[
            "offens",
            "play call",
            "play-call",
            "playcall",
            "scheme",
            "play design",
            "red zone",
            "two-minute",
            "tempo",
            "game plan",
            "play action",
            "play-action",
        ],
        words: &[],
    },
    TopicRule {
        category: TopicCategory::TeamPerformance,
        keywords: &[
            "standings",
            "team performance",
            "win streak",
            "winning streak",
            "losing streak",
            "record",
            "power ranking",
            "division race",
            "season outlook",
            "rebuild",
        ],
        words: &["tank", "tanking"],
    },
    TopicRule {
        category: TopicCategory::PlayerPerformance,
        keywords: &[
            "performance",
            "stats",
            "statistic",
            "stat line",
            "breakout",
            "career high",
            "career-high",
            "production",
            "award",
            "pro bowl",
            "all-pro",
        ],
        words: &["mvp"],
    },
    TopicRule {
        category: TopicCategory::LeaguePolicy,
        keywords: &[
            "rule change",
            "rules",
            "rulebook",
            "policy",
            "officiat",
            "referee",
            "commissioner",
            "goodell",
            "replay review",
            "penalt",
            "collective bargaining",
            "league office",
            "owners meeting",
        ],
        words: &["cba"],
    },
    TopicRule {
        category: TopicCategory::BusinessAndStadiums,
        keywords: &[
            "stadium",
            "relocat",
            "ownership",
            "owner",
            "revenue",
            "media rights",
            "broadcast",
            "ticket",
            "sponsor",
            "valuation",
            "business",
            "trademark",
        ],
        words: &[],
    },
    TopicRule {
        category: TopicCategory::OffFieldAndCommunity,
        keywords: &[
            "off-field",
            "off the field",
            "community",
            "charity",
            "foundation",
            "personal",
            "family",
            "social media",
            "interview",
            "culture",
        ],
        words: &[],
    },
];

/// Canonical category for a raw topic phrase, or `None` when the phrase is
/// outside the taxonomy.
///
/// A phrase that already names a category (label or slug) maps to that
/// category, which makes canonicalization idempotent.
pub fn canonicalize(raw_text: &str) -> Option<TopicCategory> {
    if let Ok(category) = TopicCategory::from_str(raw_text) {
        return Some(category);
    }
    match_rules(&normalize(raw_text), TOPIC_RULES)
}

/// Canonicalizes a raw topic, carrying its confidence (clamped) and rank.
pub fn canonicalize_topic(raw: &RawTopic) -> Option<CanonicalTopic> {
    let category = canonicalize(&raw.text)?;
    Some(CanonicalTopic {
        category,
        confidence: raw.confidence.map(clamp_confidence),
        rank: raw.rank,
    })
}

/// First rule matching `normalized`.
pub fn match_rules(normalized: &str, rules: &[TopicRule]) -> Option<TopicCategory> {
    if normalized.is_empty() {
        return None;
    }
    rules
        .iter()
        .find(|rule| rule.matches(normalized))
        .map(|rule| rule.category)
}

/// `needle` occurs starting at a word boundary and, if `whole`, also ends at
/// one.
fn occurs(text: &str, needle: &str, whole: bool) -> bool {
    text.match_indices(needle).any(|(at, _)| {
        let starts = text[..at]
            .chars()
            .next_back()
            .map_or(true, |prev| !prev.is_alphanumeric());
        let ends = !whole
            || text[at + needle.len()..]
                .chars()
                .next()
                .map_or(true, |next| !next.is_alphanumeric());
        starts && ends
    })
}
