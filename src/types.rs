//! Core data types for the scorebook

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

string_id!(
    /// Identifier of a rostered player
    PlayerId
);
string_id!(
    /// Identifier of a team
    TeamId
);
string_id!(
    /// Identifier of an innings
    InningsId
);
string_id!(
    /// Identifier of a match
    MatchId
);
string_id!(
    /// Identifier of a recorded ball event
    EventId
);

/// How the runs of a delivery that did not come off the bat were conceded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ExtrasType {
    #[default]
    #[serde(rename = "NONE")]
    None,
    #[serde(rename = "WD", alias = "WIDE")]
    Wide,
    #[serde(rename = "NB", alias = "NO_BALL")]
    NoBall,
    #[serde(rename = "B", alias = "BYE")]
    Bye,
    #[serde(rename = "LB", alias = "LEG_BYE")]
    LegBye,
}

impl ExtrasType {
    /// A delivery is legal unless it is a wide or a no-ball
    pub fn is_legal(self) -> bool {
        !matches!(self, ExtrasType::Wide | ExtrasType::NoBall)
    }

    /// Wides and no-balls are charged to the bowler; byes and leg byes are not
    pub fn is_bowler_extra(self) -> bool {
        !self.is_legal()
    }

    /// Short scorebook code used on the wire and in the timeline
    pub fn code(self) -> &'static str {
        match self {
            ExtrasType::None => "",
            ExtrasType::Wide => "WD",
            ExtrasType::NoBall => "NB",
            ExtrasType::Bye => "B",
            ExtrasType::LegBye => "LB",
        }
    }
}

impl FromStr for ExtrasType {
    type Err = ValidationError;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        match code.trim().to_ascii_uppercase().as_str() {
            "" | "NONE" => Ok(ExtrasType::None),
            "WD" | "WIDE" => Ok(ExtrasType::Wide),
            "NB" | "NO_BALL" | "NOBALL" => Ok(ExtrasType::NoBall),
            "B" | "BYE" => Ok(ExtrasType::Bye),
            "LB" | "LEG_BYE" | "LEGBYE" => Ok(ExtrasType::LegBye),
            _ => Err(ValidationError::UnknownExtrasType {
                code: code.to_string(),
            }),
        }
    }
}

/// Mode of dismissal recorded on a wicket event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WicketType {
    Bowled,
    Caught,
    Lbw,
    #[serde(rename = "runout")]
    RunOut,
    Stumped,
    #[serde(rename = "hitwicket")]
    HitWicket,
    Retired,
    #[default]
    None,
}

impl WicketType {
    /// Whether the bowler is credited with the wicket
    pub fn credits_bowler(self) -> bool {
        matches!(
            self,
            WicketType::Bowled
                | WicketType::Caught
                | WicketType::Lbw
                | WicketType::Stumped
                | WicketType::HitWicket
        )
    }

    pub fn code(self) -> &'static str {
        match self {
            WicketType::Bowled => "bowled",
            WicketType::Caught => "caught",
            WicketType::Lbw => "lbw",
            WicketType::RunOut => "runout",
            WicketType::Stumped => "stumped",
            WicketType::HitWicket => "hitwicket",
            WicketType::Retired => "retired",
            WicketType::None => "none",
        }
    }
}

impl FromStr for WicketType {
    type Err = ValidationError;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        match code.trim().to_ascii_lowercase().as_str() {
            "bowled" => Ok(WicketType::Bowled),
            "caught" => Ok(WicketType::Caught),
            "lbw" => Ok(WicketType::Lbw),
            "runout" | "run_out" => Ok(WicketType::RunOut),
            "stumped" => Ok(WicketType::Stumped),
            "hitwicket" | "hit_wicket" => Ok(WicketType::HitWicket),
            "retired" => Ok(WicketType::Retired),
            "" | "none" => Ok(WicketType::None),
            _ => Err(ValidationError::UnknownWicketType {
                code: code.to_string(),
            }),
        }
    }
}

/// Cryptographic hash of a derived snapshot
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SnapshotHash(pub [u8; 32]);

impl fmt::Display for SnapshotHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

/// A rostered player; the name may be corrected, the id never changes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub team_id: TeamId,
}

/// A side with its fixed roster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub players: Vec<Player>,
}

impl Team {
    pub fn roster_size(&self) -> usize {
        self.players.len()
    }

    pub fn has_player(&self, id: &PlayerId) -> bool {
        self.players.iter().any(|p| &p.id == id)
    }
}

/// One side's turn at batting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Innings {
    pub id: InningsId,
    pub match_id: MatchId,
    pub batting_team_id: TeamId,
    pub bowling_team_id: TeamId,
    /// 1 or 2
    pub innings_number: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legality() {
        assert!(ExtrasType::None.is_legal());
        assert!(ExtrasType::Bye.is_legal());
        assert!(ExtrasType::LegBye.is_legal());
        assert!(!ExtrasType::Wide.is_legal());
        assert!(!ExtrasType::NoBall.is_legal());
    }

    #[test]
    fn test_extras_codes_parse() {
        assert_eq!("WD".parse::<ExtrasType>().unwrap(), ExtrasType::Wide);
        assert_eq!("no_ball".parse::<ExtrasType>().unwrap(), ExtrasType::NoBall);
        assert_eq!("".parse::<ExtrasType>().unwrap(), ExtrasType::None);
        assert!(matches!(
            "XX".parse::<ExtrasType>(),
            Err(ValidationError::UnknownExtrasType { .. })
        ));
    }

    #[test]
    fn test_wicket_credit() {
        assert!(WicketType::Caught.credits_bowler());
        assert!(WicketType::HitWicket.credits_bowler());
        assert!(!WicketType::RunOut.credits_bowler());
        assert!(!WicketType::Retired.credits_bowler());
        assert!(!WicketType::None.credits_bowler());
    }

    #[test]
    fn test_wicket_codes_serde() {
        let json = serde_json::to_string(&WicketType::RunOut).unwrap();
        assert_eq!(json, "\"runout\"");
        let parsed: ExtrasType = serde_json::from_str("\"LEG_BYE\"").unwrap();
        assert_eq!(parsed, ExtrasType::LegBye);
        assert!("handled".parse::<WicketType>().is_err());
    }

    #[test]
    fn test_snapshot_hash_display() {
        let hash = SnapshotHash([0xab; 32]);
        assert_eq!(hash.to_string().len(), 64);
        assert!(hash.to_string().starts_with("abab"));
    }
}
