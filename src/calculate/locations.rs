//! Open-play locations and starting lineups.

use std::collections::HashMap;

use tracing::warn;

use crate::catalog::MatchCatalog;
use crate::models::{Event, EventKind, Lineup, LocationEvent, MatchId, PlayerId, TeamSide};

use super::{resolve_side, DeriveError};

/// Events with both a player and a coordinate, outside set-piece restarts.
pub fn extract_locations(events: &[Event]) -> Vec<LocationEvent> {
    events
        .iter()
        .filter(|e| !e.is_restart_phase())
        .filter_map(|e| {
            let player = e.player.as_ref()?;
            let location = e.location?;
            Some(LocationEvent {
                event_id: e.id.clone(),
                match_id: e.match_id,
                player_id: player.id,
                player_name: player.name.clone(),
                team: e.team.clone(),
                period: e.period,
                minute: e.minute,
                second: e.second,
                location,
                event_type: e.event_type().name().to_string(),
            })
        })
        .collect()
}

/// Starting elevens per catalog match, from `Starting XI` events.
///
/// A side without a Starting XI gets an empty lineup. Two Starting XI
/// events for the same side, or one for a team not in the fixture, are
/// integrity errors.
pub fn extract_lineups(
    events: &[Event],
    catalog: &MatchCatalog,
) -> Result<Vec<Lineup>, DeriveError> {
    let mut found: HashMap<(MatchId, TeamSide), Vec<PlayerId>> = HashMap::new();

    for event in events {
        let EventKind::StartingXi(tactics) = &event.kind else {
            continue;
        };

        let side = resolve_side(catalog, event.match_id, &event.team)?;
        let ids = tactics.lineup.iter().map(|p| p.id).collect();
        if found.insert((event.match_id, side), ids).is_some() {
            return Err(DeriveError::DuplicateLineup {
                match_id: event.match_id,
                team: event.team.clone(),
            });
        }
    }

    let lineups = catalog
        .iter()
        .map(|m| {
            let mut lineup = Lineup::new(m.match_id);
            for side in [TeamSide::Home, TeamSide::Away] {
                match found.remove(&(m.match_id, side)) {
                    Some(ids) => match side {
                        TeamSide::Home => lineup.home = ids,
                        TeamSide::Away => lineup.away = ids,
                    },
                    None => warn!(
                        "Match {}: no Starting XI for {} ({})",
                        m.match_id,
                        m.team(side),
                        side
                    ),
                }
            }
            lineup
        })
        .collect();

    Ok(lineups)
}
