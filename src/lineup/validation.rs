use std::collections::HashSet;

use serde::Deserialize;

use crate::errors::ServiceError;
use crate::models::lineup::LineupPlayerEntry;

pub const MIN_JERSEY_NUMBER: i32 = 1;
pub const MAX_JERSEY_NUMBER: i32 = 99;

/// Whether a submitted lineup must fill every formation slot or may leave
/// some open. Configured once per deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineupPolicy {
    /// Starter count must equal the formation's slot count.
    Exact,
    /// Starter count may be at most the formation's slot count.
    AllowPartial,
}

impl Default for LineupPolicy {
    fn default() -> Self {
        LineupPolicy::Exact
    }
}

/// Number of starting slots a structure descriptor calls for: the
/// dash-separated outfield counts plus the goalkeeper ("4-4-2" -> 11).
pub fn formation_slot_count(structure: &str) -> Result<usize, ServiceError> {
    let trimmed = structure.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::validation("formation structure is empty"));
    }

    let mut outfield = 0usize;
    for part in trimmed.split('-') {
        let count: usize = part.parse().map_err(|_| {
            ServiceError::validation(format!(
                "formation structure '{}' is not dash-separated numbers",
                structure
            ))
        })?;
        if count == 0 || count > 10 {
            return Err(ServiceError::validation(format!(
                "formation line size {} out of range",
                count
            )));
        }
        outfield += count;
    }

    if outfield > 10 {
        return Err(ServiceError::validation(format!(
            "formation structure '{}' names {} outfield players (max 10)",
            structure, outfield
        )));
    }

    Ok(outfield + 1)
}

#[derive(Debug)]
pub struct LineupValidator {
    policy: LineupPolicy,
}

impl LineupValidator {
    pub fn new(policy: LineupPolicy) -> Self {
        Self { policy }
    }

    /// Structural checks on a lineup submission; squad membership is
    /// checked against the store by the lineup service.
    pub fn validate_submission(
        &self,
        structure: &str,
        players: &[LineupPlayerEntry],
    ) -> Result<(), ServiceError> {
        if players.is_empty() {
            return Err(ServiceError::validation("lineup has no players"));
        }

        let mut seen = HashSet::new();
        for player in players {
            if !seen.insert(player.player_id) {
                return Err(ServiceError::validation(format!(
                    "player {} appears more than once in the lineup",
                    player.player_id
                )));
            }
            if !(MIN_JERSEY_NUMBER..=MAX_JERSEY_NUMBER).contains(&player.jersey_number) {
                return Err(ServiceError::validation(format!(
                    "jersey number {} outside {}-{}",
                    player.jersey_number, MIN_JERSEY_NUMBER, MAX_JERSEY_NUMBER
                )));
            }
        }

        let slots = formation_slot_count(structure)?;
        let starters = players.iter().filter(|p| p.is_starter).count();
        match self.policy {
            LineupPolicy::Exact => {
                if starters != slots {
                    return Err(ServiceError::validation(format!(
                        "formation '{}' needs {} starters, got {}",
                        structure, slots, starters
                    )));
                }
            }
            LineupPolicy::AllowPartial => {
                if starters > slots {
                    return Err(ServiceError::validation(format!(
                        "formation '{}' allows at most {} starters, got {}",
                        structure, slots, starters
                    )));
                }
            }
        }

        Ok(())
    }
}
