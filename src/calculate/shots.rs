//! Shot table extraction.

use std::collections::HashMap;

use crate::catalog::MatchCatalog;
use crate::models::{Event, EventKind, MatchId, Point, Shot, ShotOutcome, GOAL_COLOR};

use super::{resolve_side, DeriveError};

/// Own goals are drawn as if struck into the centre of the goal mouth.
const OWN_GOAL_END: Point = Point { x: 120.0, y: 40.0 };

fn shot_hover_text(shot: &Shot) -> String {
    format!(
        "{} ({})<br>Time: {}:{}<br>xG: {:.3}<br>Cum. xG: {:.3}<br>Outcome: {}<br>Body Part: {}",
        shot.player_name,
        shot.team,
        shot.minute,
        shot.second,
        shot.xg,
        shot.cum_xg,
        shot.outcome,
        shot.body_part
    )
}

fn missing(event: &Event, field: &'static str) -> DeriveError {
    DeriveError::MissingField {
        event_id: event.id.clone(),
        field,
    }
}

/// Build a shot row from a `Shot` or `Own Goal Against` event. Other events
/// yield `None`. Running totals and presentation fields are filled later.
fn shot_row(event: &Event, catalog: &MatchCatalog) -> Result<Option<Shot>, DeriveError> {
    let (team, location, xg, end_location, outcome, body_part, technique, own_goal) =
        match &event.kind {
            EventKind::Shot(detail) => (
                event.team.clone(),
                event.location.ok_or_else(|| missing(event, "location"))?,
                detail.statsbomb_xg,
                detail.end_location,
                detail.outcome,
                detail.body_part.clone(),
                detail.technique.clone(),
                false,
            ),
            // Credited to the team in possession, seen from their attacking end.
            EventKind::OwnGoalAgainst => (
                event.possession_team.clone(),
                event
                    .location
                    .ok_or_else(|| missing(event, "location"))?
                    .mirrored(),
                0.0,
                OWN_GOAL_END,
                ShotOutcome::Goal,
                "Unknown".to_string(),
                "Unknown".to_string(),
                true,
            ),
            _ => return Ok(None),
        };

    let player = event.player.as_ref().ok_or_else(|| missing(event, "player"))?;
    let team_side = resolve_side(catalog, event.match_id, &team)?;

    Ok(Some(Shot {
        shot_id: event.id.clone(),
        match_id: event.match_id,
        player_id: player.id,
        player_name: player.name.clone(),
        team,
        period: event.period,
        minute: event.minute,
        second: event.second,
        location,
        xg,
        end_location,
        outcome,
        body_part,
        technique,
        possession: event.possession,
        dec_time: event.decimal_time(),
        cum_xg: 0.0,
        hover_text: String::new(),
        team_side,
        shot_color: String::new(),
        own_goal,
    }))
}

/// Extract shots and own goals, sorted by (match, period, time), with the
/// running xG total per (match, team).
pub fn extract_shots(events: &[Event], catalog: &MatchCatalog) -> Result<Vec<Shot>, DeriveError> {
    let mut shots = Vec::new();
    for event in events {
        if let Some(shot) = shot_row(event, catalog)? {
            shots.push(shot);
        }
    }

    // Stable: simultaneous shots keep their source order.
    shots.sort_by(|a, b| {
        a.match_id
            .cmp(&b.match_id)
            .then(a.period.cmp(&b.period))
            .then(a.dec_time.total_cmp(&b.dec_time))
    });

    let mut running: HashMap<(MatchId, String), f64> = HashMap::new();
    for shot in &mut shots {
        let total = running
            .entry((shot.match_id, shot.team.clone()))
            .or_insert(0.0);
        *total += shot.xg;
        shot.cum_xg = *total;

        shot.hover_text = shot_hover_text(shot);
        shot.shot_color = if shot.is_goal() {
            GOAL_COLOR.to_string()
        } else {
            shot.team_side.color().to_string()
        };
    }

    Ok(shots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TeamSide;
    use crate::test_support::{fixture_catalog, EventBuilder};
    use pretty_assertions::assert_eq;

    fn cum_for(shots: &[Shot], team: &str) -> Vec<f64> {
        shots
            .iter()
            .filter(|s| s.team == team)
            .map(|s| (s.cum_xg * 1000.0).round() / 1000.0)
            .collect()
    }

    #[test]
    fn test_cumulative_xg_per_team() {
        let catalog = fixture_catalog();
        let events = vec![
            EventBuilder::new(101, "a2", "Alpha")
                .minute(40)
                .player(3, "A3")
                .shot(0.3, ShotOutcome::Saved)
                .build(),
            EventBuilder::new(101, "b1", "Beta")
                .minute(20)
                .player(12, "B2")
                .shot(0.2, ShotOutcome::OffTarget)
                .build(),
            EventBuilder::new(101, "a1", "Alpha")
                .minute(10)
                .player(1, "A1")
                .shot(0.1, ShotOutcome::Goal)
                .build(),
        ];

        let shots = extract_shots(&events, &catalog).unwrap();

        let order: Vec<&str> = shots.iter().map(|s| s.shot_id.as_str()).collect();
        assert_eq!(order, vec!["a1", "b1", "a2"]);
        assert_eq!(cum_for(&shots, "Alpha"), vec![0.1, 0.4]);
        assert_eq!(cum_for(&shots, "Beta"), vec![0.2]);

        assert_eq!(shots[0].shot_color, GOAL_COLOR);
        assert_eq!(shots[1].team_side, TeamSide::Away);
        assert_eq!(shots[1].shot_color, TeamSide::Away.color());
        assert_eq!(shots[2].shot_color, TeamSide::Home.color());
    }

    #[test]
    fn test_period_orders_before_time() {
        let catalog = fixture_catalog();
        let events = vec![
            EventBuilder::new(101, "late", "Alpha")
                .period(2)
                .minute(46)
                .player(1, "A1")
                .shot(0.2, ShotOutcome::Blocked)
                .build(),
            EventBuilder::new(101, "stoppage", "Alpha")
                .period(1)
                .minute(47)
                .player(1, "A1")
                .shot(0.1, ShotOutcome::Blocked)
                .build(),
        ];

        let shots = extract_shots(&events, &catalog).unwrap();
        assert_eq!(shots[0].shot_id, "stoppage");
        assert!(shots[1].cum_xg >= shots[0].cum_xg);
    }

    #[test]
    fn test_own_goal_synthesis() {
        let catalog = fixture_catalog();
        let events = vec![EventBuilder::new(101, "og", "Beta")
            .possession_team("Alpha")
            .minute(50)
            .second(12)
            .player(11, "B1")
            .location(10.0, 30.0)
            .own_goal_against()
            .build()];

        let shots = extract_shots(&events, &catalog).unwrap();
        assert_eq!(shots.len(), 1);

        let og = &shots[0];
        assert!(og.own_goal);
        assert_eq!(og.team, "Alpha");
        assert_eq!(og.team_side, TeamSide::Home);
        assert_eq!(og.outcome, ShotOutcome::Goal);
        assert_eq!(og.xg, 0.0);
        assert_eq!(og.location, Point::new(110.0, 50.0));
        assert_eq!(og.end_location, Point::new(120.0, 40.0));
        assert_eq!(og.body_part, "Unknown");
        assert_eq!(og.player_id, 11);
        assert_eq!(og.shot_color, GOAL_COLOR);
    }

    #[test]
    fn test_hover_text() {
        let catalog = fixture_catalog();
        let events = vec![EventBuilder::new(101, "s", "Alpha")
            .minute(9)
            .second(5)
            .player(1, "A1")
            .shot(0.25, ShotOutcome::Post)
            .build()];

        let shots = extract_shots(&events, &catalog).unwrap();
        assert_eq!(
            shots[0].hover_text,
            "A1 (Alpha)<br>Time: 9:5<br>xG: 0.250<br>Cum. xG: 0.250<br>Outcome: Post<br>Body Part: Right Foot"
        );
    }

    #[test]
    fn test_unknown_team_fails_loudly() {
        let catalog = fixture_catalog();
        let events = vec![EventBuilder::new(101, "x", "Gamma")
            .player(21, "G1")
            .shot(0.1, ShotOutcome::Missed)
            .build()];

        let err = extract_shots(&events, &catalog).unwrap_err();
        assert!(matches!(err, DeriveError::UnknownTeam { ref team, .. } if team == "Gamma"));
    }

    #[test]
    fn test_non_shot_events_are_ignored() {
        let catalog = fixture_catalog();
        let events = vec![EventBuilder::new(101, "p", "Alpha").player(1, "A1").build()];
        assert!(extract_shots(&events, &catalog).unwrap().is_empty());
    }
}
