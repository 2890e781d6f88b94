//! Pass table extraction.

use crate::models::{Event, EventKind, Pass};

use super::DeriveError;

/// Extract one row per `Pass` event, converting the angle to degrees.
pub fn extract_passes(events: &[Event]) -> Result<Vec<Pass>, DeriveError> {
    let mut passes = Vec::new();

    for event in events {
        let EventKind::Pass(detail) = &event.kind else {
            continue;
        };

        let player = event
            .player
            .as_ref()
            .ok_or_else(|| DeriveError::MissingField {
                event_id: event.id.clone(),
                field: "player",
            })?;
        let location = event.location.ok_or_else(|| DeriveError::MissingField {
            event_id: event.id.clone(),
            field: "location",
        })?;

        passes.push(Pass {
            event_id: event.id.clone(),
            match_id: event.match_id,
            player_id: player.id,
            player_name: player.name.clone(),
            team: event.team.clone(),
            period: event.period,
            minute: event.minute,
            second: event.second,
            location,
            receiver_id: detail.recipient.as_ref().map(|r| r.id),
            receiver_name: detail.recipient.as_ref().map(|r| r.name.clone()),
            height: detail.height.clone(),
            length: detail.length,
            angle: detail.angle.map(f64::to_degrees),
            is_cross: detail.cross,
            assisted_shot_id: detail.assisted_shot_id.clone(),
            is_goal_assist: detail.goal_assist,
            possession: event.possession,
            outcome: detail.outcome.clone(),
        });
    }

    Ok(passes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::EventBuilder;
    use pretty_assertions::assert_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_missing_recipient_is_absent() {
        let events = vec![EventBuilder::new(101, "p1", "Beta")
            .player(11, "B1")
            .pass(30.0, Some(3.0), None)
            .pass_outcome("Incomplete")
            .build()];

        let passes = extract_passes(&events).unwrap();
        assert_eq!(passes.len(), 1);
        assert_eq!(passes[0].receiver_id, None);
        assert_eq!(passes[0].receiver_name, None);
        assert!(!passes[0].is_completed());
        assert!(!passes[0].is_cross);
        assert!(!passes[0].is_goal_assist);
    }

    #[test]
    fn test_angle_converted_to_degrees() {
        let events = vec![
            EventBuilder::new(101, "p1", "Alpha")
                .player(1, "A1")
                .pass(20.0, Some(PI / 2.0), Some((2, "A2")))
                .build(),
            EventBuilder::new(101, "p2", "Alpha")
                .player(1, "A1")
                .pass(0.0, None, Some((2, "A2")))
                .build(),
        ];

        let passes = extract_passes(&events).unwrap();
        let degrees = passes[0].angle.unwrap();
        assert!((degrees - 90.0).abs() < 1e-9);
        assert_eq!(passes[0].receiver_name.as_deref(), Some("A2"));
        assert!(passes[0].is_completed());
        assert_eq!(passes[1].angle, None);
    }

    #[test]
    fn test_pass_without_player_fails() {
        let events = vec![EventBuilder::new(101, "p1", "Alpha")
            .pass(20.0, Some(0.0), None)
            .build()];

        assert!(matches!(
            extract_passes(&events).unwrap_err(),
            DeriveError::MissingField { field: "player", .. }
        ));
    }

    #[test]
    fn test_only_passes_are_extracted() {
        let events = vec![
            EventBuilder::new(101, "x", "Alpha").player(1, "A1").build(),
            EventBuilder::new(101, "p", "Alpha")
                .player(1, "A1")
                .pass(12.0, Some(0.2), Some((2, "A2")))
                .cross()
                .build(),
        ];

        let passes = extract_passes(&events).unwrap();
        assert_eq!(passes.len(), 1);
        assert_eq!(passes[0].event_id, "p");
        assert!(passes[0].is_cross);
    }
}
