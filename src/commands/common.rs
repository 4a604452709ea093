//! Shared command plumbing: the resources every handler works with, first-run data
//! bootstrap and player-of-interest fallback.

use anyhow::Context;
use tracing::{info, warn};

use crate::{
    cli::{types::PlayerId, GlobalOpts},
    config::{ConfigService, FileConfigStore},
    dbv::{parse_excel, RankingClient, RemoteWeek},
    storage::RankingDatabase,
    RankingError, Result,
};

/// Context containing common resources needed by most commands
pub struct CommandContext {
    pub db: RankingDatabase,
    pub client: RankingClient,
    pub config: Box<dyn ConfigService>,
    pub json: bool,
}

impl CommandContext {
    /// Open the database (`--db` or the default location), the DBV client and the
    /// config file
    pub fn new(opts: &GlobalOpts) -> anyhow::Result<Self> {
        let db = match &opts.db {
            Some(path) => RankingDatabase::open(path),
            None => RankingDatabase::open_default(),
        }
        .context("Could not open the ranking database")?;

        Ok(Self {
            db,
            client: RankingClient::new()?,
            config: Box::new(FileConfigStore::open_default()?),
            json: opts.json,
        })
    }

    pub fn with_parts(
        db: RankingDatabase,
        client: RankingClient,
        config: Box<dyn ConfigService>,
        json: bool,
    ) -> Self {
        Self {
            db,
            client,
            config,
            json,
        }
    }

    /// Progress and success messages; kept off stdout in JSON mode
    pub fn status(&self, message: impl AsRef<str>) {
        if self.json {
            eprintln!("{}", message.as_ref());
        } else {
            println!("{}", message.as_ref());
        }
    }

    /// "Nothing found" and skipped-item notices, always on stderr
    pub fn warn(&self, message: impl AsRef<str>) {
        eprintln!("⚠ {}", message.as_ref());
    }

    /// Explicit ID, else the stored player of interest
    pub fn resolve_player_id(&self, explicit: Option<PlayerId>) -> anyhow::Result<PlayerId> {
        if let Some(id) = explicit {
            return Ok(id);
        }
        match self.config.get_poi()? {
            Some(id) => Ok(id),
            None => Err(RankingError::MissingPlayerId.into()),
        }
    }

    /// Make sure at least one week is indexed, downloading the current one if the
    /// store is empty.
    ///
    /// Returns `false` (after telling the user) when nothing could be fetched.
    /// Storage failures are propagated.
    pub async fn ensure_data(&mut self) -> anyhow::Result<bool> {
        if self.db.get_current_week()?.is_some() {
            return Ok(true);
        }

        self.status("No local data found. Downloading current rankings...");
        let remote = match self.client.get_current_week().await {
            Ok(Some(remote)) => remote,
            Ok(None) => {
                self.warn("Could not fetch ranking data.");
                return Ok(false);
            }
            Err(e) => {
                self.warn(format!("Failed to download data: {e}"));
                return Ok(false);
            }
        };

        match fetch_and_index(&mut self.db, &self.client, &remote, false).await {
            Ok(count) => {
                self.status(format!(
                    "✓ Downloaded and indexed {} ({} entries)",
                    remote.week.label(),
                    count
                ));
                Ok(true)
            }
            Err(e) if e.is_fatal() => Err(e.into()),
            Err(e) => {
                self.warn(format!("Failed to download data: {e}"));
                Ok(false)
            }
        }
    }
}

/// Download (or reuse) one week's spreadsheet, parse it and replace the snapshot.
///
/// Returns the number of indexed entries. A spreadsheet that cannot be read is
/// removed from the cache so the next run downloads it again.
pub async fn fetch_and_index(
    db: &mut RankingDatabase,
    client: &RankingClient,
    remote: &RemoteWeek,
    force: bool,
) -> Result<usize> {
    let path = client.download_week(remote, force).await?;
    let entries = match parse_excel(&path) {
        Ok(entries) => entries,
        Err(e) => {
            // a broken file would otherwise be reused by every later run
            if let Err(remove) = std::fs::remove_file(&path) {
                warn!(
                    path = %path.display(),
                    error = %remove,
                    "could not remove unreadable spreadsheet"
                );
            }
            return Err(e);
        }
    };
    if entries.is_empty() {
        warn!(week = %remote.week, path = %path.display(), "spreadsheet yielded no entries");
    }
    db.index_week(remote.week, &entries)?;
    info!(week = %remote.week, entries = entries.len(), "week updated");
    Ok(entries.len())
}
