use uuid::Uuid;

use crate::errors::ServiceError;
use crate::models::event::{AppendEventRequest, EventType};

pub const MIN_EVENT_MINUTE: i32 = 0;
pub const MAX_EVENT_MINUTE: i32 = 130;

/// Structural validation of event payloads. Pure checks only; squad
/// membership and match state are verified against the store by the
/// event service.
#[derive(Debug)]
pub struct EventValidator;

impl EventValidator {
    pub fn new() -> Self {
        Self
    }

    pub fn validate_append(&self, request: &AppendEventRequest) -> Result<(), ServiceError> {
        if request.event_type == EventType::EventVoided {
            return Err(ServiceError::validation(
                "corrections are appended through the void operation, not as raw events",
            ));
        }

        self.validate_minute(request.minute)?;

        if request.event_type.requires_player() {
            if request.player_id.is_none() {
                return Err(ServiceError::validation(format!(
                    "event type '{}' requires a player",
                    request.event_type
                )));
            }
            if request.team_id.is_none() {
                return Err(ServiceError::validation(format!(
                    "event type '{}' requires a team",
                    request.event_type
                )));
            }
        }

        if request.event_type.requires_related_player() && request.related_player_id.is_none() {
            return Err(ServiceError::validation(format!(
                "event type '{}' requires the outgoing player as related player",
                request.event_type
            )));
        }

        if request.related_player_id.is_some() && !request.event_type.allows_related_player() {
            return Err(ServiceError::validation(format!(
                "event type '{}' does not take a related player",
                request.event_type
            )));
        }

        if let (Some(player), Some(related)) = (request.player_id, request.related_player_id) {
            if player == related {
                return Err(ServiceError::validation(
                    "player and related player must differ",
                ));
            }
        }

        Ok(())
    }

    pub fn validate_minute(&self, minute: i32) -> Result<(), ServiceError> {
        if !(MIN_EVENT_MINUTE..=MAX_EVENT_MINUTE).contains(&minute) {
            return Err(ServiceError::validation(format!(
                "minute {} outside the allowed range {}-{}",
                minute, MIN_EVENT_MINUTE, MAX_EVENT_MINUTE
            )));
        }
        Ok(())
    }

    /// The team on an event must be one of the two sides of the match.
    pub fn validate_team_side(
        &self,
        team_id: Uuid,
        home_team_id: Uuid,
        away_team_id: Uuid,
    ) -> Result<(), ServiceError> {
        if team_id != home_team_id && team_id != away_team_id {
            return Err(ServiceError::validation(format!(
                "team {} is not playing in this match",
                team_id
            )));
        }
        Ok(())
    }
}

impl Default for EventValidator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(event_type: EventType) -> AppendEventRequest {
        AppendEventRequest {
            event_type,
            minute: 23,
            team_id: Some(Uuid::new_v4()),
            player_id: Some(Uuid::new_v4()),
            related_player_id: None,
            description: None,
            client_key: None,
        }
    }

    #[test]
    fn goal_requires_player() {
        let validator = EventValidator::new();
        let mut req = request(EventType::Goal);
        assert!(validator.validate_append(&req).is_ok());

        req.player_id = None;
        assert!(matches!(
            validator.validate_append(&req),
            Err(ServiceError::Validation(_))
        ));
    }

    #[test]
    fn substitution_requires_both_players() {
        let validator = EventValidator::new();
        let mut req = request(EventType::SubstitutionIn);
        assert!(matches!(
            validator.validate_append(&req),
            Err(ServiceError::Validation(_))
        ));

        req.related_player_id = Some(Uuid::new_v4());
        assert!(validator.validate_append(&req).is_ok());
    }

    #[test]
    fn assist_only_on_open_play_goals() {
        let validator = EventValidator::new();
        let mut req = request(EventType::PenaltyGoal);
        req.related_player_id = Some(Uuid::new_v4());
        assert!(matches!(
            validator.validate_append(&req),
            Err(ServiceError::Validation(_))
        ));

        let mut goal = request(EventType::Goal);
        goal.related_player_id = Some(Uuid::new_v4());
        assert!(validator.validate_append(&goal).is_ok());
    }

    #[test]
    fn ball_events_need_no_player() {
        let validator = EventValidator::new();
        for event_type in [
            EventType::Corner,
            EventType::FreeKick,
            EventType::Offside,
            EventType::Injury,
            EventType::VarDecision,
        ] {
            let req = AppendEventRequest {
                event_type,
                minute: 55,
                team_id: None,
                player_id: None,
                related_player_id: None,
                description: None,
                client_key: None,
            };
            assert!(validator.validate_append(&req).is_ok(), "{event_type}");
        }
    }

    #[test]
    fn minute_bounds() {
        let validator = EventValidator::new();
        assert!(validator.validate_minute(0).is_ok());
        assert!(validator.validate_minute(130).is_ok());
        assert!(validator.validate_minute(-1).is_err());
        assert!(validator.validate_minute(131).is_err());
    }

    #[test]
    fn raw_void_records_are_rejected() {
        let validator = EventValidator::new();
        let req = request(EventType::EventVoided);
        assert!(matches!(
            validator.validate_append(&req),
            Err(ServiceError::Validation(_))
        ));
    }

    #[test]
    fn team_must_belong_to_match() {
        let validator = EventValidator::new();
        let home = Uuid::new_v4();
        let away = Uuid::new_v4();
        assert!(validator.validate_team_side(home, home, away).is_ok());
        assert!(validator.validate_team_side(away, home, away).is_ok());
        assert!(validator
            .validate_team_side(Uuid::new_v4(), home, away)
            .is_err());
    }

    #[test]
    fn player_cannot_assist_himself() {
        let validator = EventValidator::new();
        let player = Uuid::new_v4();
        let mut req = request(EventType::Goal);
        req.player_id = Some(player);
        req.related_player_id = Some(player);
        assert!(matches!(
            validator.validate_append(&req),
            Err(ServiceError::Validation(_))
        ));
    }
}
