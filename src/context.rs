//! Immutable dashboard context.
//!
//! Built once at startup from the dataset on disk and shared read-only by
//! every request.

use std::path::Path;

use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::calculate::{DeriveError, DerivedTables};
use crate::catalog::{CatalogError, MatchCatalog};
use crate::config::AppConfig;
use crate::ingest::EventLog;
use crate::models::{Match, MatchId};
use crate::storage::{JsonlWriter, StorageConfig, StorageError, TableKind};

/// Startup failures. Any of them stops the process before serving.
#[derive(Debug, Error)]
pub enum ContextError {
    #[error("Failed to load match catalog: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Failed to load events: {0}")]
    Storage(#[from] StorageError),

    #[error("Data integrity error: {0}")]
    Derive(#[from] DeriveError),
}

/// Catalog, event log and derived tables.
#[derive(Debug, Clone)]
pub struct DashboardContext {
    pub catalog: MatchCatalog,
    pub events: EventLog,
    pub tables: DerivedTables,
}

impl DashboardContext {
    /// Load the dataset described by `config` and derive every table.
    pub fn build(config: &AppConfig) -> Result<Self, ContextError> {
        let storage = StorageConfig::from_config(config);
        let catalog = MatchCatalog::load(&storage, &config.dataset)?;
        let events = EventLog::load(&storage, &catalog, &config.dataset)?;
        let context = Self::from_parts(catalog, events)?;

        info!(
            "Context ready: {} matches, {} events",
            context.catalog.len(),
            context.events.len()
        );
        Ok(context)
    }

    pub fn from_parts(catalog: MatchCatalog, events: EventLog) -> Result<Self, DeriveError> {
        let tables = DerivedTables::build(&catalog, &events)?;
        Ok(Self {
            catalog,
            events,
            tables,
        })
    }

    pub fn match_info(&self, match_id: MatchId) -> Option<&Match> {
        self.catalog.get(match_id)
    }

    /// Write every derived table as JSONL under `dir`. Returns rows written.
    pub fn export(&self, dir: &Path) -> Result<usize, StorageError> {
        let mut total = 0;
        for table in TableKind::ALL {
            total += match table {
                TableKind::Matches => write_table(dir, table, self.catalog.iter())?,
                TableKind::Shots => write_table(dir, table, &self.tables.shots)?,
                TableKind::Passes => write_table(dir, table, &self.tables.passes)?,
                TableKind::PlayerStats => write_table(dir, table, &self.tables.player_stats)?,
                TableKind::TopPerformers => write_table(dir, table, &self.tables.top_performers)?,
                TableKind::PassSectors => write_table(dir, table, &self.tables.pass_sectors)?,
                TableKind::Locations => write_table(dir, table, &self.tables.locations)?,
                TableKind::Lineups => write_table(dir, table, &self.tables.lineups)?,
                TableKind::PassingNetworks => write_table(dir, table, &self.tables.networks)?,
            };
        }
        Ok(total)
    }
}

fn write_table<'a, T, I>(dir: &Path, table: TableKind, rows: I) -> Result<usize, StorageError>
where
    T: Serialize + 'a,
    I: IntoIterator<Item = &'a T>,
{
    JsonlWriter::<T>::for_table(dir, table).write_all(rows)
}
