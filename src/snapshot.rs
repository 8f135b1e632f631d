//! The market snapshot, as published by the sportsbook for one statistic category, and the
//! extraction of a single player's odds from it.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    #[serde(default)]
    pub selections: Vec<Selection>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    /// Absent labels decode as empty, which no threshold parses from.
    #[serde(default)]
    pub label: String,

    /// The posted line, for single-statistic (Over/Under) markets only.
    #[serde(default)]
    pub points: Option<f64>,

    #[serde(default)]
    pub outcome_type: Option<OutcomeType>,

    /// Absent while the line is suspended.
    #[serde(default)]
    pub display_odds: Option<DisplayOdds>,

    #[serde(default)]
    pub participants: Vec<Participant>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutcomeType {
    Over,
    Under,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayOdds {
    pub american: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub name: String,
}

impl Selection {
    pub fn american(&self) -> Option<&str> {
        self.display_odds.as_ref().map(|odds| odds.american.as_str())
    }
}

impl MarketSnapshot {
    /// Collects the odds of every selection that names the given player, keyed by the selection's
    /// label, with `None` for a selection that has no odds posted. Should the player appear under
    /// the same label more than once, the later selection replaces the earlier one. An absent
    /// player yields an empty map.
    pub fn player_odds(&self, name: &str) -> FxHashMap<&str, Option<&str>> {
        let mut odds = FxHashMap::default();
        for selection in &self.selections {
            for participant in &selection.participants {
                if participant.name == name {
                    let american = selection.american();
                    let replaced = odds.insert(selection.label.as_str(), american);
                    if let Some(replaced) = replaced {
                        debug!(
                            "{name}: odds {replaced:?} under '{}' replaced by {american:?}",
                            selection.label
                        );
                    }
                }
            }
        }
        odds
    }

    /// The names of all participants, each listed once, in order of first appearance.
    pub fn player_names(&self) -> Vec<&str> {
        let mut seen = FxHashSet::default();
        let mut names = vec![];
        for selection in &self.selections {
            for participant in &selection.participants {
                if seen.insert(participant.name.as_str()) {
                    names.push(participant.name.as_str());
                }
            }
        }
        names
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn deserialize() {
        let json = r#"{
            "selections": [
                {
                    "id": "0QA1",
                    "label": "2+",
                    "displayOdds": { "american": "+300", "decimal": "4.00" },
                    "outcomeType": "Over",
                    "points": 1.5,
                    "participants": [{ "id": 7, "name": "Josh Allen", "type": "Player" }]
                },
                {
                    "label": "1+",
                    "displayOdds": { "american": "−150" },
                    "outcomeType": "Yes"
                }
            ],
            "markets": []
        }"#;
        let snapshot: MarketSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(2, snapshot.selections.len());

        let first = &snapshot.selections[0];
        assert_eq!("2+", first.label);
        assert_eq!(Some("+300"), first.american());
        assert_eq!(Some(OutcomeType::Over), first.outcome_type);
        assert_eq!(Some(1.5), first.points);
        assert_eq!(vec![Participant { name: "Josh Allen".into() }], first.participants);

        let second = &snapshot.selections[1];
        assert_eq!(Some("\u{2212}150"), second.american());
        assert_eq!(Some(OutcomeType::Other), second.outcome_type);
        assert_eq!(None, second.points);
        assert!(second.participants.is_empty());
    }

    #[test]
    fn deserialize_incomplete_selections() {
        let json = r#"{
            "selections": [
                {
                    "label": "1+",
                    "displayOdds": { "american": "-150" },
                    "participants": [{ "name": "Josh Allen" }]
                },
                {
                    "label": "2+",
                    "participants": [{ "name": "Bo Nix" }]
                },
                {
                    "displayOdds": { "american": "+300" },
                    "participants": [{ "name": "Jared Goff" }]
                }
            ]
        }"#;
        let snapshot: MarketSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(3, snapshot.selections.len());
        assert_eq!(Some("-150"), snapshot.selections[0].american());
        assert_eq!(None, snapshot.selections[1].american());
        assert_eq!("", snapshot.selections[2].label);

        assert_eq!(Some(&None), snapshot.player_odds("Bo Nix").get("2+"));
        assert_eq!(Some(&Some("+300")), snapshot.player_odds("Jared Goff").get(""));
    }

    #[test]
    fn player_odds_suspended_replaces_posted() {
        let snapshot = MarketSnapshot {
            selections: vec![
                selection("2+", "+300", &["Josh Allen"]),
                suspended("2+", &["Josh Allen"]),
            ],
        };
        assert_eq!(Some(&None), snapshot.player_odds("Josh Allen").get("2+"));
    }

    #[test]
    fn deserialize_without_selections() {
        let snapshot: MarketSnapshot = serde_json::from_str("{}").unwrap();
        assert!(snapshot.selections.is_empty());
    }

    #[test]
    fn player_odds() {
        let snapshot = passing_touchdowns();
        let odds = snapshot.player_odds("Josh Allen");
        assert_eq!(3, odds.len());
        assert_eq!(Some(&Some("-150")), odds.get("1+"));
        assert_eq!(Some(&Some("+300")), odds.get("2+"));
        assert_eq!(Some(&Some("+700")), odds.get("3+"));

        let odds = snapshot.player_odds("Bo Nix");
        assert_eq!(1, odds.len());
        assert_eq!(Some(&Some("-200")), odds.get("1+"));
    }

    #[test]
    fn player_odds_absent_player() {
        assert!(passing_touchdowns().player_odds("Tom Brady").is_empty());
    }

    #[test]
    fn player_odds_later_label_replaces_earlier() {
        let snapshot = MarketSnapshot {
            selections: vec![
                selection("1+", "-150", &["Josh Allen"]),
                selection("1+", "-175", &["Josh Allen"]),
            ],
        };
        let odds = snapshot.player_odds("Josh Allen");
        assert_eq!(1, odds.len());
        assert_eq!(Some(&Some("-175")), odds.get("1+"));
    }

    #[test]
    fn player_odds_shared_selection() {
        let snapshot = MarketSnapshot {
            selections: vec![
                selection("1+", "-150", &["Josh Allen", "James Cook"]),
                selection("2+", "+300", &["James Cook"]),
            ],
        };
        assert_eq!(1, snapshot.player_odds("Josh Allen").len());
        assert_eq!(2, snapshot.player_odds("James Cook").len());
    }

    #[test]
    fn player_names_first_occurrence() {
        let snapshot = MarketSnapshot {
            selections: vec![
                selection("1+", "-150", &["Josh Allen"]),
                selection("1+", "-200", &["Bo Nix", "Josh Allen"]),
                selection("2+", "+300", &["Josh Allen"]),
                selection("2+", "+400", &["Bo Nix"]),
            ],
        };
        assert_eq!(vec!["Josh Allen", "Bo Nix"], snapshot.player_names());
    }
}
