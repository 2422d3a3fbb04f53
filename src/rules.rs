//! Match configuration

use crate::error::{SerializationError, ValidationError};
use serde::{Deserialize, Serialize};

pub const DEFAULT_OVERS_LIMIT: u32 = 20;
pub const DEFAULT_ROSTER_SIZE: usize = 11;
/// Longest innings the rules accept, in overs
pub const MAX_OVERS_LIMIT: u32 = 1000;

/// Limits that decide when an innings ends
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MatchRules {
    /// Overs per innings
    pub overs_limit: u32,
    /// Roster size assumed for a team whose roster is empty
    pub fallback_roster_size: usize,
}

impl Default for MatchRules {
    fn default() -> Self {
        Self {
            overs_limit: DEFAULT_OVERS_LIMIT,
            fallback_roster_size: DEFAULT_ROSTER_SIZE,
        }
    }
}

impl MatchRules {
    pub fn new(overs_limit: u32) -> Self {
        Self {
            overs_limit,
            ..Self::default()
        }
    }

    /// Create a builder for match rules
    pub fn builder() -> MatchRulesBuilder {
        MatchRulesBuilder::new()
    }

    /// Load rules from a JSON document; missing keys take their defaults
    pub fn from_json_str(json: &str) -> Result<Self, SerializationError> {
        serde_json::from_str(json).map_err(|e| SerializationError::DeserializationFailed {
            reason: format!("Match rules: {}", e),
        })
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.overs_limit == 0 {
            return Err(ValidationError::InvalidRules {
                reason: "overs limit must be at least 1".to_string(),
            });
        }
        if self.overs_limit > MAX_OVERS_LIMIT {
            return Err(ValidationError::InvalidRules {
                reason: format!("overs limit {} exceeds {}", self.overs_limit, MAX_OVERS_LIMIT),
            });
        }
        if self.fallback_roster_size < 2 {
            return Err(ValidationError::InvalidRules {
                reason: "a side needs at least two batters".to_string(),
            });
        }
        Ok(())
    }

    /// Legal deliveries available to one innings
    pub fn ball_limit(&self) -> u32 {
        self.overs_limit.saturating_mul(6)
    }

    /// Size used for all-out checks, falling back when a roster is empty
    pub fn roster_size(&self, roster_len: usize) -> usize {
        if roster_len == 0 {
            self.fallback_roster_size
        } else {
            roster_len
        }
    }
}

/// Fluent builder for [`MatchRules`]
#[derive(Debug, Default)]
pub struct MatchRulesBuilder {
    overs_limit: Option<u32>,
    fallback_roster_size: Option<usize>,
}

impl MatchRulesBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_overs_limit(mut self, overs: u32) -> Self {
        self.overs_limit = Some(overs);
        self
    }

    pub fn with_fallback_roster_size(mut self, size: usize) -> Self {
        self.fallback_roster_size = Some(size);
        self
    }

    /// Build and validate the rules
    pub fn build(self) -> Result<MatchRules, ValidationError> {
        let defaults = MatchRules::default();
        let rules = MatchRules {
            overs_limit: self.overs_limit.unwrap_or(defaults.overs_limit),
            fallback_roster_size: self
                .fallback_roster_size
                .unwrap_or(defaults.fallback_roster_size),
        };
        rules.validate()?;
        Ok(rules)
    }
}
