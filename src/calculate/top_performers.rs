//! Top performers by total xG.

use std::collections::HashMap;

use crate::models::{MatchId, PlayerId, Shot, TopPerformer};

fn performer_hover_text(t: &TopPerformer) -> String {
    format!(
        "{}<br>Total xG: {:.3}<br>Shots: {}<br>Goals: {}<br>Max xG: {:.3}",
        t.player_name, t.total_xg, t.shots, t.goals, t.max_xg
    )
}

/// Keep the `n` players with the highest total xG in each match.
///
/// Players are grouped per (match, team, player) in the order they first
/// appear in the shot table; the ranking sort is stable, so ties keep that
/// order. Matches come out in ascending id order.
pub fn compute_top_performers(shots: &[Shot], n: usize) -> Vec<TopPerformer> {
    let mut groups: Vec<TopPerformer> = Vec::new();
    let mut index: HashMap<(MatchId, &str, PlayerId), usize> = HashMap::new();

    for shot in shots {
        let key = (shot.match_id, shot.team.as_str(), shot.player_id);
        let i = *index.entry(key).or_insert_with(|| {
            groups.push(TopPerformer {
                match_id: shot.match_id,
                team: shot.team.clone(),
                player_id: shot.player_id,
                player_name: shot.player_name.clone(),
                total_xg: 0.0,
                shots: 0,
                max_xg: f64::NEG_INFINITY,
                goals: 0,
                hover_text: String::new(),
            });
            groups.len() - 1
        });

        let g = &mut groups[i];
        g.total_xg += shot.xg;
        g.shots += 1;
        g.max_xg = g.max_xg.max(shot.xg);
        if shot.is_goal() {
            g.goals += 1;
        }
    }

    groups.sort_by(|a, b| {
        a.match_id
            .cmp(&b.match_id)
            .then(b.total_xg.total_cmp(&a.total_xg))
    });

    let mut kept: Vec<TopPerformer> = Vec::new();
    let mut taken: HashMap<MatchId, usize> = HashMap::new();
    for mut g in groups {
        let count = taken.entry(g.match_id).or_insert(0);
        if *count < n {
            *count += 1;
            g.hover_text = performer_hover_text(&g);
            kept.push(g);
        }
    }

    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculate::extract_shots;
    use crate::models::ShotOutcome;
    use crate::test_support::{fixture_catalog, EventBuilder};
    use pretty_assertions::assert_eq;

    fn shot(id: &str, minute: u32, team: &str, player: (u64, &str), xg: f64) -> crate::models::Event {
        EventBuilder::new(101, id, team)
            .minute(minute)
            .player(player.0, player.1)
            .shot(xg, ShotOutcome::Saved)
            .build()
    }

    #[test]
    fn test_keeps_top_three_sorted() {
        let catalog = fixture_catalog();
        let events = vec![
            shot("s1", 1, "Alpha", (1, "A1"), 0.05),
            shot("s2", 2, "Alpha", (2, "A2"), 0.4),
            shot("s3", 3, "Beta", (11, "B1"), 0.2),
            shot("s4", 4, "Beta", (12, "B2"), 0.3),
            shot("s5", 5, "Alpha", (1, "A1"), 0.05),
        ];
        let shots = extract_shots(&events, &catalog).unwrap();

        let top = compute_top_performers(&shots, 3);
        let ids: Vec<u64> = top.iter().map(|t| t.player_id).collect();
        assert_eq!(ids, vec![2, 12, 11]);
        assert!(top.windows(2).all(|w| w[0].total_xg >= w[1].total_xg));
    }

    #[test]
    fn test_aggregates_and_hover_text() {
        let catalog = fixture_catalog();
        let events = vec![
            shot("s1", 1, "Alpha", (1, "A1"), 0.1),
            EventBuilder::new(101, "s2", "Alpha")
                .minute(8)
                .player(1, "A1")
                .shot(0.35, ShotOutcome::Goal)
                .build(),
        ];
        let shots = extract_shots(&events, &catalog).unwrap();

        let top = compute_top_performers(&shots, 3);
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].shots, 2);
        assert_eq!(top[0].goals, 1);
        assert_eq!(top[0].max_xg, 0.35);
        assert_eq!(
            top[0].hover_text,
            "A1<br>Total xG: 0.450<br>Shots: 2<br>Goals: 1<br>Max xG: 0.350"
        );
    }

    #[test]
    fn test_ties_keep_encounter_order() {
        let catalog = fixture_catalog();
        let events = vec![
            shot("s1", 1, "Beta", (11, "B1"), 0.2),
            shot("s2", 2, "Alpha", (1, "A1"), 0.2),
            shot("s3", 3, "Alpha", (2, "A2"), 0.2),
            shot("s4", 4, "Beta", (12, "B2"), 0.2),
        ];
        let shots = extract_shots(&events, &catalog).unwrap();

        let top = compute_top_performers(&shots, 3);
        let ids: Vec<u64> = top.iter().map(|t| t.player_id).collect();
        assert_eq!(ids, vec![11, 1, 2]);
    }

    #[test]
    fn test_limit_is_per_match() {
        let catalog = fixture_catalog();
        let mut events = vec![
            shot("s1", 1, "Alpha", (1, "A1"), 0.1),
            shot("s2", 2, "Alpha", (2, "A2"), 0.2),
        ];
        events.push(
            EventBuilder::new(202, "g1", "Gamma")
                .player(21, "G1")
                .shot(0.5, ShotOutcome::Goal)
                .build(),
        );
        let shots = extract_shots(&events, &catalog).unwrap();

        let top = compute_top_performers(&shots, 1);
        let picked: Vec<(MatchId, u64)> = top.iter().map(|t| (t.match_id, t.player_id)).collect();
        assert_eq!(picked, vec![(101, 2), (202, 21)]);
    }
}
