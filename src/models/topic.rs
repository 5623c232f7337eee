//! Closed topic taxonomy for tagging facts.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::matching::normalize;

/// Fixed topic categories. Freeform topic text never leaves this crate;
/// it is either mapped onto one of these or dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TopicCategory {
    InjuriesAndPlayerHealth,
    SuspensionsAndDiscipline,
    ContractsAndSalaryCap,
    FreeAgency,
    TransactionsAndRosterMoves,
    DraftAndProspects,
    CoachingAndFrontOffice,
    QuarterbackPerformance,
    RushingAndRunningBacks,
    ReceiversAndTightEnds,
    OffensiveLine,
    SpecialTeams,
    OffensiveStrategy,
    DefensiveStrategy,
    PlayerPerformance,
    TeamPerformance,
    GamePreviews,
    GameRecaps,
    Playoffs,
    BettingAndFantasy,
    LeaguePolicy,
    BusinessAndStadiums,
    RetirementsAndLegacy,
    OffFieldAndCommunity,
}

impl TopicCategory {
    /// Returns every category in declaration order.
    pub fn all() -> &'static [TopicCategory] {
        use TopicCategory::*;
        &[
            InjuriesAndPlayerHealth,
            SuspensionsAndDiscipline,
            ContractsAndSalaryCap,
            FreeAgency,
            TransactionsAndRosterMoves,
            DraftAndProspects,
            CoachingAndFrontOffice,
            QuarterbackPerformance,
            RushingAndRunningBacks,
            ReceiversAndTightEnds,
            OffensiveLine,
            SpecialTeams,
            OffensiveStrategy,
            DefensiveStrategy,
            PlayerPerformance,
            TeamPerformance,
            GamePreviews,
            GameRecaps,
            Playoffs,
            BettingAndFantasy,
            LeaguePolicy,
            BusinessAndStadiums,
            RetirementsAndLegacy,
            OffFieldAndCommunity,
        ]
    }

    /// Display label, as stored by the persistence layer.
    pub fn label(&self) -> &'static str {
        use TopicCategory::*;
        match self {
            InjuriesAndPlayerHealth => "Injuries & Player Health",
            SuspensionsAndDiscipline => "Suspensions & Discipline",
            ContractsAndSalaryCap => "Contracts & Salary Cap",
            FreeAgency => "Free Agency",
            TransactionsAndRosterMoves => "Transactions & Roster Moves",
            DraftAndProspects => "Draft & Prospects",
            CoachingAndFrontOffice => "Coaching & Front Office",
            QuarterbackPerformance => "Quarterback Performance",
            RushingAndRunningBacks => "Rushing & Running Backs",
            ReceiversAndTightEnds => "Receivers & Tight Ends",
            OffensiveLine => "Offensive Line",
            SpecialTeams => "Special Teams",
            OffensiveStrategy => "Offensive Strategy & Scheme",
            DefensiveStrategy => "Defensive Strategy & Scheme",
            PlayerPerformance => "Player Performance & Statistics",
            TeamPerformance => "Team Performance & Standings",
            GamePreviews => "Game Previews & Predictions",
            GameRecaps => "Game Recaps & Results",
            Playoffs => "Playoffs & Postseason",
            BettingAndFantasy => "Betting & Fantasy",
            LeaguePolicy => "League Policy & Officiating",
            BusinessAndStadiums => "Business & Stadiums",
            RetirementsAndLegacy => "Retirements & Legacy",
            OffFieldAndCommunity => "Off-Field & Community",
        }
    }

    /// Snake-case identifier, identical to the serde representation.
    pub fn slug(&self) -> &'static str {
        use TopicCategory::*;
        match self {
            InjuriesAndPlayerHealth => "injuries_and_player_health",
            SuspensionsAndDiscipline => "suspensions_and_discipline",
            ContractsAndSalaryCap => "contracts_and_salary_cap",
            FreeAgency => "free_agency",
            TransactionsAndRosterMoves => "transactions_and_roster_moves",
            DraftAndProspects => "draft_and_prospects",
            CoachingAndFrontOffice => "coaching_and_front_office",
            QuarterbackPerformance => "quarterback_performance",
            RushingAndRunningBacks => "rushing_and_running_backs",
            ReceiversAndTightEnds => "receivers_and_tight_ends",
            OffensiveLine => "offensive_line",
            SpecialTeams => "special_teams",
            OffensiveStrategy => "offensive_strategy",
            DefensiveStrategy => "defensive_strategy",
            PlayerPerformance => "player_performance",
            TeamPerformance => "team_performance",
            GamePreviews => "game_previews",
            GameRecaps => "game_recaps",
            Playoffs => "playoffs",
            BettingAndFantasy => "betting_and_fantasy",
            LeaguePolicy => "league_policy",
            BusinessAndStadiums => "business_and_stadiums",
            RetirementsAndLegacy => "retirements_and_legacy",
            OffFieldAndCommunity => "off_field_and_community",
        }
    }
}

impl std::fmt::Display for TopicCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TopicCategory {
    type Err = String;

    /// Parses a label or slug, ignoring case and spacing.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        TopicCategory::all()
            .iter()
            .copied()
            .find(|c| normalize(c.label()) == wanted || c.slug() == wanted)
            .ok_or_else(|| format!("Unknown topic category '{}'", s))
    }
}

/// A topic phrase as emitted by the extractor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawTopic {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub rank: Option<u32>,
}

impl RawTopic {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            confidence: None,
            rank: None,
        }
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(confidence);
        self
    }
}

/// A topic mapped onto the fixed taxonomy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalTopic {
    pub category: TopicCategory,
    /// Extractor confidence in `[0, 1]`, when supplied.
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub rank: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_and_slugs_are_unique() {
        let all = TopicCategory::all();
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(a.label(), b.label());
                assert_ne!(a.slug(), b.slug());
            }
        }
    }

    #[test]
    fn test_slug_matches_serde() {
        for category in TopicCategory::all() {
            let json = serde_json::to_string(category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.slug()));
        }
    }

    #[test]
    fn test_from_str_accepts_label_and_slug() {
        assert_eq!(
            "injuries & player health".parse::<TopicCategory>(),
            Ok(TopicCategory::InjuriesAndPlayerHealth)
        );
        assert_eq!(
            "free_agency".parse::<TopicCategory>(),
            Ok(TopicCategory::FreeAgency)
        );
        assert!("weather".parse::<TopicCategory>().is_err());
    }
}
