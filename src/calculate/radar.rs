//! Team performance radar.

use crate::models::{
    Event, EventType, Match, Pass, RadarAttribute, RadarEntry, Shot, TeamRadar, TeamSide,
};

/// Raw attribute values for one side, indexed like [`RadarAttribute::ALL`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct SideTotals([f64; 16]);

impl SideTotals {
    fn slot(attribute: RadarAttribute) -> usize {
        RadarAttribute::ALL
            .iter()
            .position(|a| *a == attribute)
            .unwrap_or(0)
    }

    fn add(&mut self, attribute: RadarAttribute, value: f64) {
        self.0[Self::slot(attribute)] += value;
    }

    fn set(&mut self, attribute: RadarAttribute, value: f64) {
        self.0[Self::slot(attribute)] = value;
    }

    fn get(&self, attribute: RadarAttribute) -> f64 {
        self.0[Self::slot(attribute)]
    }
}

fn counted_attribute(event_type: EventType) -> Option<RadarAttribute> {
    let attribute = match event_type {
        EventType::Dribble => RadarAttribute::Dribble,
        EventType::Pressure => RadarAttribute::Pressure,
        EventType::Clearance => RadarAttribute::Clearance,
        EventType::Block => RadarAttribute::Block,
        EventType::Interception => RadarAttribute::Interception,
        EventType::Dispossessed => RadarAttribute::Dispossessed,
        EventType::FoulCommitted => RadarAttribute::FoulCommitted,
        EventType::FoulWon => RadarAttribute::FoulWon,
        _ => return None,
    };
    Some(attribute)
}

fn share(value: f64, other: f64) -> f64 {
    let total = value + other;
    if total == 0.0 {
        0.0
    } else {
        value / total
    }
}

/// Compute the radar for one match.
///
/// With a `window` of `(from, to)` minutes, events and passes are kept when
/// `from <= minute <= to` and shots when `from < decimal time < to`. Rows
/// from other matches or from teams not in the fixture are ignored.
pub fn compute_team_radar(
    fixture: &Match,
    events: &[Event],
    passes: &[Pass],
    shots: &[Shot],
    window: Option<(f64, f64)>,
) -> TeamRadar {
    let minute_ok = |minute: u32| match window {
        Some((from, to)) => {
            let m = minute as f64;
            m >= from && m <= to
        }
        None => true,
    };

    let mut totals = [SideTotals::default(), SideTotals::default()];
    let side_index = |team: &str| match fixture.side_of(team) {
        Some(TeamSide::Home) => Some(0),
        Some(TeamSide::Away) => Some(1),
        None => None,
    };

    for event in events
        .iter()
        .filter(|e| e.match_id == fixture.match_id && minute_ok(e.minute))
    {
        if let (Some(attribute), Some(i)) =
            (counted_attribute(event.event_type()), side_index(&event.team))
        {
            totals[i].add(attribute, 1.0);
        }
    }

    let mut completed_lengths = [(0.0_f64, 0_u32); 2];
    for pass in passes
        .iter()
        .filter(|p| {
            p.match_id == fixture.match_id && window.map_or(true, |(from, to)| p.within(from, to))
        })
    {
        let Some(i) = side_index(&pass.team) else {
            continue;
        };
        if pass.is_cross {
            totals[i].add(RadarAttribute::IsCross, 1.0);
        }
        if pass.is_completed() {
            totals[i].add(RadarAttribute::Passes, 1.0);
            completed_lengths[i].0 += pass.length;
            completed_lengths[i].1 += 1;
            if pass.is_progressive() {
                totals[i].add(RadarAttribute::ProgressivePasses, 1.0);
            }
        }
    }
    for (i, (sum, n)) in completed_lengths.iter().enumerate() {
        if *n > 0 {
            totals[i].set(RadarAttribute::PassLength, sum / *n as f64);
        }
    }

    for shot in shots.iter().filter(|s| {
        s.match_id == fixture.match_id
            && window.map_or(true, |(from, to)| s.within(from, to))
    }) {
        let Some(i) = side_index(&shot.team) else {
            continue;
        };
        totals[i].add(RadarAttribute::Xg, shot.xg);
        if shot.is_goal() {
            totals[i].add(RadarAttribute::Goals, 1.0);
        }
        if shot.outcome.is_on_goal() {
            totals[i].add(RadarAttribute::Sog, 1.0);
        }
        if shot.is_header() {
            totals[i].add(RadarAttribute::Headers, 1.0);
        }
    }

    let [home, away] = totals;
    let entries = RadarAttribute::ALL
        .iter()
        .map(|&attribute| {
            let home_value = home.get(attribute);
            let away_value = away.get(attribute);
            RadarEntry {
                attribute,
                angle: attribute.angle(),
                abbreviation: attribute.abbreviation().to_string(),
                label: attribute.label().to_string(),
                group: attribute.group(),
                home_value,
                away_value,
                home_share: share(home_value, away_value),
                away_share: share(away_value, home_value),
            }
        })
        .collect();

    TeamRadar {
        match_id: fixture.match_id,
        home_team: fixture.home.clone(),
        away_team: fixture.away.clone(),
        entries,
    }
}
