//! Per-player passing and xG summaries.
//!
//! xG is credited per (player, shot): every completed pass in the shot's
//! possession earns the player a share in that shot. A player's role in a
//! shot is the strongest of shooter, direct assister and buildup passer,
//! so the contribution always splits exactly into the three parts.

use std::collections::{BTreeMap, HashMap};

use crate::models::{MatchId, Pass, PlayerId, PlayerMatchStats, Shot};

type PlayerKey = (MatchId, PlayerId, String);

/// How a player took part in a shot, weakest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum XgRole {
    Buildup,
    Assist,
    Shot,
}

#[derive(Debug, Default)]
struct PassAgg {
    name: String,
    count: u32,
    completed: u32,
    progressive: u32,
    length_sum: f64,
}

#[derive(Debug, Default)]
struct XgAgg {
    name: String,
    contribution: f64,
    buildup: f64,
    assist: f64,
    shot: f64,
}

struct Involvement<'a> {
    name: &'a str,
    xg: f64,
    role: XgRole,
}

fn aggregate_passes(passes: &[Pass]) -> BTreeMap<PlayerKey, PassAgg> {
    let mut aggs: BTreeMap<PlayerKey, PassAgg> = BTreeMap::new();

    for pass in passes {
        let agg = aggs
            .entry((pass.match_id, pass.player_id, pass.team.clone()))
            .or_insert_with(|| PassAgg {
                name: pass.player_name.clone(),
                ..Default::default()
            });
        agg.count += 1;
        agg.length_sum += pass.length;
        if pass.is_completed() {
            agg.completed += 1;
        }
        if pass.is_progressive() {
            agg.progressive += 1;
        }
    }

    aggs
}

fn aggregate_xg(shots: &[Shot], passes: &[Pass]) -> BTreeMap<PlayerKey, XgAgg> {
    let mut by_possession: HashMap<(MatchId, &str, u32), Vec<&Shot>> = HashMap::new();
    for shot in shots {
        by_possession
            .entry((shot.match_id, shot.team.as_str(), shot.possession))
            .or_default()
            .push(shot);
    }

    let mut involvements: BTreeMap<(PlayerKey, &str), Involvement> = BTreeMap::new();

    for pass in passes.iter().filter(|p| p.is_completed()) {
        let Some(possession_shots) =
            by_possession.get(&(pass.match_id, pass.team.as_str(), pass.possession))
        else {
            continue;
        };

        for shot in possession_shots {
            let role = if pass.assisted_shot_id.as_deref() == Some(shot.shot_id.as_str()) {
                XgRole::Assist
            } else {
                XgRole::Buildup
            };
            let key = (
                (pass.match_id, pass.player_id, pass.team.clone()),
                shot.shot_id.as_str(),
            );
            let entry = involvements.entry(key).or_insert(Involvement {
                name: &pass.player_name,
                xg: shot.xg,
                role,
            });
            entry.role = entry.role.max(role);
        }
    }

    for shot in shots {
        let key = (
            (shot.match_id, shot.player_id, shot.team.clone()),
            shot.shot_id.as_str(),
        );
        let entry = involvements.entry(key).or_insert(Involvement {
            name: &shot.player_name,
            xg: shot.xg,
            role: XgRole::Shot,
        });
        entry.role = XgRole::Shot;
    }

    let mut aggs: BTreeMap<PlayerKey, XgAgg> = BTreeMap::new();
    for ((player, _), inv) in involvements {
        let agg = aggs.entry(player).or_insert_with(|| XgAgg {
            name: inv.name.to_string(),
            ..Default::default()
        });
        agg.contribution += inv.xg;
        match inv.role {
            XgRole::Buildup => agg.buildup += inv.xg,
            XgRole::Assist => agg.assist += inv.xg,
            XgRole::Shot => agg.shot += inv.xg,
        }
    }

    aggs
}

fn ratio(n: u32, d: u32) -> f64 {
    if d == 0 {
        0.0
    } else {
        n as f64 / d as f64
    }
}

/// One row per (match, player, team) seen in either table, ordered by key.
/// Players missing from one side get zeros for that side's columns.
pub fn compute_player_match_stats(shots: &[Shot], passes: &[Pass]) -> Vec<PlayerMatchStats> {
    let mut pass_aggs = aggregate_passes(passes);
    let mut xg_aggs = aggregate_xg(shots, passes);

    let mut keys: Vec<PlayerKey> = pass_aggs.keys().chain(xg_aggs.keys()).cloned().collect();
    keys.sort();
    keys.dedup();

    keys.into_iter()
        .map(|key| {
            let pass = pass_aggs.remove(&key);
            let xg = xg_aggs.remove(&key);
            let (match_id, player_id, team) = key;

            let player_name = pass
                .as_ref()
                .map(|p| p.name.clone())
                .or_else(|| xg.as_ref().map(|x| x.name.clone()))
                .unwrap_or_default();

            let mut row = PlayerMatchStats {
                match_id,
                player_id,
                player_name,
                team,
                ..Default::default()
            };

            if let Some(p) = pass {
                row.num_passes = p.count;
                row.pass_completion_rate = ratio(p.completed, p.count);
                row.percent_progressive_passes = ratio(p.progressive, p.count);
                row.average_pass_length = if p.count == 0 {
                    0.0
                } else {
                    p.length_sum / p.count as f64
                };
            }

            if let Some(x) = xg {
                row.xg_contribution = x.contribution;
                row.xg_buildup = x.buildup;
                row.xg_assist = x.assist;
                row.xg_shot = x.shot;
            }

            row
        })
        .collect()
}
