//! Shared test fixtures: event builders, a two-match catalog and an
//! on-disk dataset mirroring the StatsBomb layout.

use std::path::Path;

use chrono::NaiveDate;
use serde_json::{json, Value};

use crate::catalog::MatchCatalog;
use crate::config::DatasetConfig;
use crate::models::{
    Event, EventKind, EventType, Match, MatchId, PassDetail, PlayerRef, Point, ShotDetail,
    ShotOutcome, Stage, Tactics,
};
use crate::storage::StorageConfig;

/// Fluent builder for typed events. Defaults to a first-half `Pressure`
/// at the centre spot with no player.
pub struct EventBuilder {
    event: Event,
}

impl EventBuilder {
    pub fn new(match_id: MatchId, id: &str, team: &str) -> Self {
        Self {
            event: Event {
                id: id.to_string(),
                index: 0,
                match_id,
                period: 1,
                minute: 0,
                second: 0,
                kind: EventKind::Other(EventType::Pressure),
                team: team.to_string(),
                possession_team: team.to_string(),
                player: None,
                location: Some(Point::new(60.0, 40.0)),
                play_pattern: "Regular Play".to_string(),
                possession: 1,
            },
        }
    }

    pub fn minute(mut self, minute: u32) -> Self {
        self.event.minute = minute;
        self
    }

    pub fn second(mut self, second: u32) -> Self {
        self.event.second = second;
        self
    }

    pub fn period(mut self, period: u8) -> Self {
        self.event.period = period;
        self
    }

    pub fn possession(mut self, possession: u32) -> Self {
        self.event.possession = possession;
        self
    }

    pub fn possession_team(mut self, team: &str) -> Self {
        self.event.possession_team = team.to_string();
        self
    }

    pub fn play_pattern(mut self, pattern: &str) -> Self {
        self.event.play_pattern = pattern.to_string();
        self
    }

    pub fn player(mut self, id: u64, name: &str) -> Self {
        self.event.player = Some(PlayerRef::new(id, name));
        self
    }

    pub fn location(mut self, x: f64, y: f64) -> Self {
        self.event.location = Some(Point::new(x, y));
        self
    }

    pub fn no_location(mut self) -> Self {
        self.event.location = None;
        self
    }

    pub fn kind(mut self, kind: EventKind) -> Self {
        self.event.kind = kind;
        self
    }

    pub fn shot(self, xg: f64, outcome: ShotOutcome) -> Self {
        self.kind(EventKind::Shot(ShotDetail {
            statsbomb_xg: xg,
            end_location: Point::new(120.0, 40.0),
            outcome,
            body_part: "Right Foot".to_string(),
            technique: "Normal".to_string(),
        }))
    }

    pub fn shot_body_part(mut self, body_part: &str) -> Self {
        if let EventKind::Shot(detail) = &mut self.event.kind {
            detail.body_part = body_part.to_string();
        }
        self
    }

    pub fn own_goal_against(self) -> Self {
        self.kind(EventKind::OwnGoalAgainst)
    }

    /// A pass with its angle in radians; `None` recipient leaves it unreceived.
    pub fn pass(self, length: f64, angle: Option<f64>, recipient: Option<(u64, &str)>) -> Self {
        self.kind(EventKind::Pass(PassDetail {
            recipient: recipient.map(|(id, name)| PlayerRef::new(id, name)),
            height: "Ground Pass".to_string(),
            length,
            angle,
            cross: false,
            assisted_shot_id: None,
            goal_assist: false,
            outcome: None,
        }))
    }

    fn with_pass(mut self, f: impl FnOnce(&mut PassDetail)) -> Self {
        if let EventKind::Pass(detail) = &mut self.event.kind {
            f(detail);
        }
        self
    }

    pub fn pass_outcome(self, outcome: &str) -> Self {
        self.with_pass(|p| p.outcome = Some(outcome.to_string()))
    }

    pub fn cross(self) -> Self {
        self.with_pass(|p| p.cross = true)
    }

    pub fn assists(self, shot_id: &str) -> Self {
        self.with_pass(|p| p.assisted_shot_id = Some(shot_id.to_string()))
    }

    pub fn starting_xi(self, players: &[(u64, &str)]) -> Self {
        self.kind(EventKind::StartingXi(Tactics {
            formation: Some(442),
            lineup: players
                .iter()
                .map(|(id, name)| PlayerRef::new(*id, name))
                .collect(),
        }))
        .no_location()
    }

    pub fn build(self) -> Event {
        self.event
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Two fixtures: 101 Alpha v Beta (group stage, 2-0) and
/// 202 Gamma v Delta (final, 0-0).
pub fn fixture_matches() -> Vec<Match> {
    vec![
        Match::new(
            101,
            "Alpha".to_string(),
            "Beta".to_string(),
            2,
            0,
            date(2018, 6, 14),
            Stage::GroupStage,
        )
        .with_stadium("Luzhniki Stadium".to_string())
        .with_referee("Néstor Pitana".to_string()),
        Match::new(
            202,
            "Gamma".to_string(),
            "Delta".to_string(),
            0,
            0,
            date(2018, 7, 15),
            Stage::Final,
        ),
    ]
}

pub fn fixture_catalog() -> MatchCatalog {
    MatchCatalog::from_matches(fixture_matches()).unwrap()
}

fn raw_event(index: u64, id: &str, type_name: &str, team: &str, minute: u32) -> Value {
    let period = if minute >= 45 { 2 } else { 1 };
    json!({
        "id": id,
        "index": index,
        "period": period,
        "timestamp": "00:00:00.000",
        "minute": minute,
        "second": 0,
        "type": {"id": index, "name": type_name},
        "possession": index,
        "possession_team": {"id": 1, "name": team},
        "play_pattern": {"id": 1, "name": "Regular Play"},
        "team": {"id": 1, "name": team}
    })
}

fn with_player(mut v: Value, id: u64, name: &str, x: f64, y: f64) -> Value {
    v["player"] = json!({"id": id, "name": name});
    v["location"] = json!([x, y]);
    v
}

fn starting_xi(index: u64, id: &str, team: &str, players: &[(u64, &str)]) -> Value {
    let mut v = raw_event(index, id, "Starting XI", team, 0);
    let lineup: Vec<Value> = players
        .iter()
        .map(|(pid, name)| json!({"player": {"id": pid, "name": name}, "jersey_number": 1}))
        .collect();
    v["tactics"] = json!({"formation": 442, "lineup": lineup});
    v
}

fn match_101_events() -> Value {
    let mut p1 = with_player(raw_event(3, "p1", "Pass", "Alpha", 2), 1, "A1", 30.0, 40.0);
    p1["possession"] = json!(2);
    p1["pass"] = json!({
        "recipient": {"id": 2, "name": "A2"},
        "length": 20.0,
        "angle": 0.0,
        "height": {"id": 1, "name": "Ground Pass"}
    });

    let mut p2 = with_player(raw_event(4, "p2", "Pass", "Alpha", 3), 2, "A2", 50.0, 30.0);
    p2["possession"] = json!(2);
    p2["pass"] = json!({
        "recipient": {"id": 3, "name": "A3"},
        "length": 15.0,
        "angle": 0.5,
        "height": {"id": 1, "name": "Ground Pass"},
        "assisted_shot_id": "s1",
        "goal_assist": true
    });

    let mut s1 = with_player(raw_event(5, "s1", "Shot", "Alpha", 3), 3, "A3", 100.0, 40.0);
    s1["second"] = json!(30);
    s1["possession"] = json!(2);
    s1["shot"] = json!({
        "statsbomb_xg": 0.3,
        "end_location": [120.0, 38.0, 1.0],
        "outcome": {"id": 97, "name": "Goal"},
        "body_part": {"id": 40, "name": "Right Foot"},
        "technique": {"id": 93, "name": "Normal"}
    });

    let mut p3 = with_player(raw_event(6, "p3", "Pass", "Beta", 20), 11, "B1", 60.0, 40.0);
    p3["pass"] = json!({
        "length": 30.0,
        "angle": 3.0,
        "height": {"id": 3, "name": "High Pass"},
        "outcome": {"id": 9, "name": "Incomplete"}
    });

    let mut s2 = with_player(raw_event(7, "s2", "Shot", "Beta", 25), 12, "B2", 105.0, 35.0);
    s2["shot"] = json!({
        "statsbomb_xg": 0.1,
        "end_location": [120.0, 42.0],
        "outcome": {"id": 100, "name": "Saved"},
        "body_part": {"id": 37, "name": "Head"},
        "technique": {"id": 93, "name": "Normal"}
    });

    let pr1 = with_player(raw_event(8, "pr1", "Pressure", "Alpha", 30), 1, "A1", 70.0, 40.0);

    let mut og = with_player(
        raw_event(9, "og", "Own Goal Against", "Beta", 50),
        11,
        "B1",
        10.0,
        40.0,
    );
    og["possession_team"] = json!({"id": 1, "name": "Alpha"});

    let mut p4 = with_player(raw_event(10, "p4", "Pass", "Alpha", 60), 1, "A1", 119.0, 1.0);
    p4["play_pattern"] = json!({"id": 2, "name": "From Corner"});
    p4["pass"] = json!({
        "recipient": {"id": 2, "name": "A2"},
        "length": 40.0,
        "angle": -2.0,
        "height": {"id": 3, "name": "High Pass"},
        "cross": true
    });

    let mut p5 = with_player(raw_event(11, "p5", "Pass", "Beta", 70), 11, "B1", 40.0, 40.0);
    p5["pass"] = json!({
        "recipient": {"id": 12, "name": "B2"},
        "length": 10.0,
        "angle": 0.1,
        "height": {"id": 1, "name": "Ground Pass"}
    });

    let late = with_player(raw_event(12, "late", "Pressure", "Alpha", 121), 2, "A2", 80.0, 40.0);

    json!([
        starting_xi(1, "xi-a", "Alpha", &[(1, "A1"), (2, "A2"), (3, "A3")]),
        starting_xi(2, "xi-b", "Beta", &[(11, "B1"), (12, "B2")]),
        p1,
        p2,
        s1,
        p3,
        s2,
        pr1,
        og,
        p4,
        p5,
        late
    ])
}

fn match_202_events() -> Value {
    let mut g1 = with_player(raw_event(3, "g1", "Pass", "Gamma", 5), 21, "G1", 50.0, 50.0);
    g1["pass"] = json!({
        "length": 12.0,
        "angle": 1.0,
        "height": {"id": 1, "name": "Ground Pass"},
        "outcome": {"id": 75, "name": "Out"}
    });
    let d1 = with_player(raw_event(4, "d1", "Pressure", "Delta", 10), 31, "D1", 60.0, 30.0);

    json!([
        starting_xi(1, "xi-g", "Gamma", &[(21, "G1")]),
        starting_xi(2, "xi-d", "Delta", &[(31, "D1")]),
        g1,
        d1
    ])
}

fn matches_json() -> Value {
    json!([
        {
            "match_id": 202,
            "match_date": "2018-07-15",
            "home_team": {"home_team_id": 3, "home_team_name": "Gamma"},
            "away_team": {"away_team_id": 4, "away_team_name": "Delta"},
            "home_score": 0,
            "away_score": "0"
        },
        {
            "match_id": "101",
            "match_date": "2018-06-14",
            "home_team": {"home_team_id": 1, "home_team_name": "Alpha"},
            "away_team": {"away_team_id": 2, "away_team_name": "Beta"},
            "home_score": "2",
            "away_score": 0,
            "stadium": {"id": 1, "name": "Luzhniki Stadium"},
            "referee": {"id": 1, "name": "Néstor Pitana"}
        }
    ])
}

/// Write the two-match dataset under `dir` and load its catalog.
pub fn write_dataset(dir: &Path) -> (StorageConfig, MatchCatalog, DatasetConfig) {
    let storage = StorageConfig::new(dir.to_path_buf());
    let dataset = DatasetConfig {
        stage_counts: [1, 0, 0, 0, 0, 1],
        ..DatasetConfig::default()
    };

    std::fs::create_dir_all(storage.matches_path().parent().unwrap()).unwrap();
    std::fs::create_dir_all(storage.events_dir()).unwrap();

    let write = |path: std::path::PathBuf, value: Value| {
        std::fs::write(path, serde_json::to_string_pretty(&value).unwrap()).unwrap();
    };
    write(storage.matches_path(), matches_json());
    write(storage.event_path(101), match_101_events());
    write(storage.event_path(202), match_202_events());

    let catalog = MatchCatalog::load(&storage, &dataset).unwrap();
    (storage, catalog, dataset)
}
