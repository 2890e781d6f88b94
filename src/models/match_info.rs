//! Match metadata model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::MatchId;

/// Competition stage, in tournament order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Stage {
    #[serde(rename = "Group Stage")]
    GroupStage,
    #[serde(rename = "Round of 16")]
    RoundOf16,
    #[serde(rename = "Quarter Final")]
    QuarterFinal,
    #[serde(rename = "Semi Final")]
    SemiFinal,
    #[serde(rename = "Third Place Match")]
    ThirdPlaceMatch,
    #[serde(rename = "Final")]
    Final,
}

impl Stage {
    pub const COUNT: usize = 6;

    pub const ALL: [Stage; Stage::COUNT] = [
        Stage::GroupStage,
        Stage::RoundOf16,
        Stage::QuarterFinal,
        Stage::SemiFinal,
        Stage::ThirdPlaceMatch,
        Stage::Final,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Stage::GroupStage => "Group Stage",
            Stage::RoundOf16 => "Round of 16",
            Stage::QuarterFinal => "Quarter Final",
            Stage::SemiFinal => "Semi Final",
            Stage::ThirdPlaceMatch => "Third Place Match",
            Stage::Final => "Final",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Which side of a fixture a team played on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TeamSide {
    Home,
    Away,
}

impl TeamSide {
    /// Chart colour keyed by side.
    pub fn color(&self) -> &'static str {
        match self {
            TeamSide::Home => "rgba(255,77,77, 1)",
            TeamSide::Away => "rgba(77,77,255, 1)",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TeamSide::Home => "home",
            TeamSide::Away => "away",
        }
    }
}

impl std::fmt::Display for TeamSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A normalized match record from the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Match {
    pub match_id: MatchId,

    /// Home team name
    pub home: String,

    /// Away team name
    pub away: String,

    pub home_score: u32,
    pub away_score: u32,

    pub match_date: NaiveDate,

    /// Human-readable date with no leading zero on the day (e.g. "7 July 2018")
    pub display_date: String,

    /// Assigned by position in the sorted catalog, not read from the source
    pub stage: Stage,

    pub stadium: Option<String>,
    pub referee: Option<String>,

    /// "{stage} : {home} vs {away}"
    pub description: String,
}

impl Match {
    /// Create a match, deriving the display date and description.
    pub fn new(
        match_id: MatchId,
        home: String,
        away: String,
        home_score: u32,
        away_score: u32,
        match_date: NaiveDate,
        stage: Stage,
    ) -> Self {
        let display_date = match_date.format("%-d %B %Y").to_string();
        let description = format!("{} : {} vs {}", stage, home, away);

        Self {
            match_id,
            home,
            away,
            home_score,
            away_score,
            match_date,
            display_date,
            stage,
            stadium: None,
            referee: None,
            description,
        }
    }

    pub fn with_stadium(mut self, stadium: String) -> Self {
        self.stadium = Some(stadium);
        self
    }

    pub fn with_referee(mut self, referee: String) -> Self {
        self.referee = Some(referee);
        self
    }

    /// Resolve a team name to its side. Exact, case-sensitive match.
    pub fn side_of(&self, team: &str) -> Option<TeamSide> {
        if team == self.home {
            Some(TeamSide::Home)
        } else if team == self.away {
            Some(TeamSide::Away)
        } else {
            None
        }
    }

    /// Team name playing on `side`.
    pub fn team(&self, side: TeamSide) -> &str {
        match side {
            TeamSide::Home => &self.home,
            TeamSide::Away => &self.away,
        }
    }

    /// Scoreboard header, e.g. "FRANCE 4-2 CROATIA".
    pub fn header(&self) -> String {
        format!(
            "{} {}-{} {}",
            self.home.to_uppercase(),
            self.home_score,
            self.away_score,
            self.away.to_uppercase()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn final_match() -> Match {
        Match::new(
            8658,
            "France".to_string(),
            "Croatia".to_string(),
            4,
            2,
            NaiveDate::from_ymd_opt(2018, 7, 15).unwrap(),
            Stage::Final,
        )
    }

    #[test]
    fn test_display_date_has_no_leading_zero() {
        let m = Match::new(
            7525,
            "Russia".to_string(),
            "Saudi Arabia".to_string(),
            5,
            0,
            NaiveDate::from_ymd_opt(2018, 6, 4).unwrap(),
            Stage::GroupStage,
        );
        assert_eq!(m.display_date, "4 June 2018");
    }

    #[test]
    fn test_description() {
        assert_eq!(final_match().description, "Final : France vs Croatia");
    }

    #[test]
    fn test_side_of_is_exact() {
        let m = final_match();
        assert_eq!(m.side_of("France"), Some(TeamSide::Home));
        assert_eq!(m.side_of("Croatia"), Some(TeamSide::Away));
        assert_eq!(m.side_of("france"), None);
        assert_eq!(m.side_of("Belgium"), None);
    }

    #[test]
    fn test_header() {
        assert_eq!(final_match().header(), "FRANCE 4-2 CROATIA");
    }

    #[test]
    fn test_stage_serialization() {
        let json = serde_json::to_string(&Stage::RoundOf16).unwrap();
        assert_eq!(json, "\"Round of 16\"");
        let parsed: Stage = serde_json::from_str("\"Third Place Match\"").unwrap();
        assert_eq!(parsed, Stage::ThirdPlaceMatch);
    }

    #[test]
    fn test_team_side_colors_differ() {
        assert_ne!(TeamSide::Home.color(), TeamSide::Away.color());
        assert_eq!(format!("{}", TeamSide::Away), "away");
    }
}
