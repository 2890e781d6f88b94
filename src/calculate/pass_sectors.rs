//! Pass-direction sector histograms.

use std::collections::BTreeMap;

use crate::models::{MatchId, Pass, PassSectorBin, PassStyle, PlayerId};

/// Number of direction sectors around the circle.
pub const SECTOR_COUNT: u8 = 16;

/// Width of one sector in degrees.
pub const SECTOR_WIDTH: f64 = 360.0 / SECTOR_COUNT as f64;

/// Sector of a pass angle in degrees.
///
/// Boundaries sit at 11.25 + k * 22.5, so each sector is centred on a
/// multiple of 22.5. Sector `k` covers the wedge centred on `k * 22.5`,
/// except the wedge around 0° which is numbered 16. A missing angle falls
/// in sector 0.
pub fn pass_sector(angle: Option<f64>) -> u8 {
    let Some(angle) = angle else {
        return 0;
    };

    let normalized = angle.rem_euclid(360.0);
    let sector = ((normalized + SECTOR_WIDTH / 2.0) / SECTOR_WIDTH).floor() as u8;

    match sector {
        0 => SECTOR_COUNT,
        s => s.min(SECTOR_COUNT),
    }
}

/// Count passes and mean length per (match, team, player, sector).
pub fn compute_pass_sectors(passes: &[Pass]) -> Vec<PassSectorBin> {
    let mut bins: BTreeMap<(MatchId, &str, PlayerId, u8), (&str, u32, f64)> = BTreeMap::new();

    for pass in passes {
        let key = (
            pass.match_id,
            pass.team.as_str(),
            pass.player_id,
            pass_sector(pass.angle),
        );
        let bin = bins
            .entry(key)
            .or_insert((pass.player_name.as_str(), 0, 0.0));
        bin.1 += 1;
        bin.2 += pass.length;
    }

    bins.into_iter()
        .map(|((match_id, team, player_id, pass_sector), (name, count, total))| {
            let mean_length = total / count as f64;
            PassSectorBin {
                match_id,
                team: team.to_string(),
                player_id,
                player_name: name.to_string(),
                pass_sector,
                count,
                mean_length,
                pass_style: PassStyle::from_mean_length(mean_length),
            }
        })
        .collect()
}
