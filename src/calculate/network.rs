//! Passing networks between starters.

use std::collections::{BTreeMap, HashMap};

use crate::catalog::MatchCatalog;
use crate::models::{
    Lineup, LocationEvent, Match, NetworkEdge, NetworkNode, Pass, PassingNetwork, PlayerId,
    TeamNetwork, TeamSide,
};

use super::DeriveError;

#[derive(Debug, Default)]
struct Position {
    name: String,
    team: String,
    sum_x: f64,
    sum_y: f64,
    n: u32,
}

fn frac(n: u32, max: u32) -> f64 {
    if max == 0 {
        0.0
    } else {
        n as f64 / max as f64
    }
}

/// Build the network of one match.
///
/// Nodes are starters with at least one open-play location, placed at their
/// mean position; pass counts cover passes that found a receiver. Edges join
/// two starters of the same side regardless of direction. Both weights are
/// relative to the busiest passer (or pair) in the whole match.
pub fn compute_passing_network(
    fixture: &Match,
    passes: &[Pass],
    locations: &[LocationEvent],
    lineup: &Lineup,
) -> Result<PassingNetwork, DeriveError> {
    let match_id = fixture.match_id;

    let mut positions: BTreeMap<PlayerId, Position> = BTreeMap::new();
    for loc in locations.iter().filter(|l| l.match_id == match_id) {
        let p = positions.entry(loc.player_id).or_insert_with(|| Position {
            name: loc.player_name.clone(),
            team: loc.team.clone(),
            ..Default::default()
        });
        p.sum_x += loc.location.x;
        p.sum_y += loc.location.y;
        p.n += 1;
    }

    let mut passer_counts: HashMap<PlayerId, u32> = HashMap::new();
    let mut pair_counts: BTreeMap<(PlayerId, PlayerId), u32> = BTreeMap::new();
    for pass in passes.iter().filter(|p| p.match_id == match_id) {
        let Some(receiver) = pass.receiver_id else {
            continue;
        };
        *passer_counts.entry(pass.player_id).or_insert(0) += 1;
        if receiver != pass.player_id {
            let pair = (pass.player_id.min(receiver), pass.player_id.max(receiver));
            *pair_counts.entry(pair).or_insert(0) += 1;
        }
    }
    let max_passer = passer_counts.values().copied().max().unwrap_or(0);
    let max_pair = pair_counts.values().copied().max().unwrap_or(0);

    let side_network = |side: TeamSide| -> Result<TeamNetwork, DeriveError> {
        let starters = lineup.side(side);

        let nodes = starters
            .iter()
            .filter_map(|id| {
                let p = positions.get(id)?;
                let passes = passer_counts.get(id).copied().unwrap_or(0);
                Some(NetworkNode {
                    player_id: *id,
                    player_name: p.name.clone(),
                    team: p.team.clone(),
                    x: p.sum_x / p.n as f64,
                    y: p.sum_y / p.n as f64,
                    passes,
                    pass_frac: frac(passes, max_passer),
                })
            })
            .collect();

        let mut edges = Vec::new();
        for (&(player_1, player_2), &passes) in &pair_counts {
            if !(starters.contains(&player_1) && starters.contains(&player_2)) {
                continue;
            }
            for id in [player_1, player_2] {
                if !positions.contains_key(&id) {
                    return Err(DeriveError::DanglingPlayer {
                        match_id,
                        player_id: id,
                    });
                }
            }
            edges.push(NetworkEdge {
                player_1,
                player_2,
                passes,
                pass_frac: frac(passes, max_pair),
            });
        }

        Ok(TeamNetwork {
            team: fixture.team(side).to_string(),
            side,
            nodes,
            edges,
        })
    };

    Ok(PassingNetwork {
        match_id,
        home: side_network(TeamSide::Home)?,
        away: side_network(TeamSide::Away)?,
    })
}

/// Networks for every catalog match, in catalog order.
pub fn compute_passing_networks(
    catalog: &MatchCatalog,
    passes: &[Pass],
    locations: &[LocationEvent],
    lineups: &[Lineup],
) -> Result<Vec<PassingNetwork>, DeriveError> {
    let by_match: HashMap<_, _> = lineups.iter().map(|l| (l.match_id, l)).collect();

    catalog
        .iter()
        .map(|m| {
            let empty = Lineup::new(m.match_id);
            let lineup = by_match.get(&m.match_id).copied().unwrap_or(&empty);
            compute_passing_network(m, passes, locations, lineup)
        })
        .collect()
}
