//! JSONL (JSON Lines) export of derived tables.
//!
//! Each line is a valid JSON object representing one table row.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

#[cfg(test)]
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::info;

use super::StorageError;

/// Derived tables that can be exported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    Matches,
    Shots,
    Passes,
    PlayerStats,
    TopPerformers,
    PassSectors,
    Locations,
    Lineups,
    PassingNetworks,
}

impl TableKind {
    pub const ALL: [TableKind; 9] = [
        TableKind::Matches,
        TableKind::Shots,
        TableKind::Passes,
        TableKind::PlayerStats,
        TableKind::TopPerformers,
        TableKind::PassSectors,
        TableKind::Locations,
        TableKind::Lineups,
        TableKind::PassingNetworks,
    ];

    /// Get the filename for this table.
    pub fn filename(&self) -> &'static str {
        match self {
            TableKind::Matches => "matches.jsonl",
            TableKind::Shots => "shots.jsonl",
            TableKind::Passes => "passes.jsonl",
            TableKind::PlayerStats => "player_stats.jsonl",
            TableKind::TopPerformers => "top_xg.jsonl",
            TableKind::PassSectors => "pass_angles.jsonl",
            TableKind::Locations => "locations.jsonl",
            TableKind::Lineups => "lineups.jsonl",
            TableKind::PassingNetworks => "passing_networks.jsonl",
        }
    }
}

/// JSONL file writer.
pub struct JsonlWriter<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T: Serialize> JsonlWriter<T> {
    /// Create a new JSONL writer for the given path.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    /// Create a writer for a table inside `dir`.
    pub fn for_table(dir: &Path, table: TableKind) -> Self {
        Self::new(dir.join(table.filename()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Ensure the parent directory exists.
    fn ensure_dir(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    /// Write rows, replacing the entire file.
    pub fn write_all<'a, I>(&self, rows: I) -> Result<usize, StorageError>
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        self.ensure_dir()?;

        let file = File::create(&self.path)?;
        let mut writer = BufWriter::new(file);
        let mut count = 0;

        for row in rows {
            let json = serde_json::to_string(row)?;
            writeln!(writer, "{}", json)?;
            count += 1;
        }

        writer.flush()?;
        info!("Wrote {} rows to {:?}", count, self.path);

        Ok(count)
    }
}

/// Parse every non-blank line of a JSONL file.
#[cfg(test)]
pub fn read_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, StorageError> {
    let content = fs::read_to_string(path)?;
    let mut rows = Vec::new();
    for line in content.lines().filter(|l| !l.trim().is_empty()) {
        rows.push(serde_json::from_str(line)?);
    }
    Ok(rows)
}
