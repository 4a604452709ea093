//! Ranking file discovery and download from the DBV tournament site.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::Datelike;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::parser::FILENAME_RE;
use crate::cli::types::RankingWeek;
use crate::core::paths::excel_dir;
use crate::{RankingError, Result};

/// Public DBV tournament site.
pub const BASE_URL: &str = "https://turniere.badminton.de";

const METADATA_TIMEOUT: Duration = Duration::from_secs(30);
const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(60);

static LIVE_WEEK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Rangliste\s+KW\s*(\d+)").expect("valid live week regex"));

/// A ranking week the server offers, with its download URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemoteWeek {
    pub week: RankingWeek,
    pub url: String,
    pub is_current: bool,
}

/// Downloads ranking spreadsheets into a local directory.
#[derive(Debug, Clone)]
pub struct RankingClient {
    client: Client,
    base_url: String,
    excel_dir: PathBuf,
}

impl RankingClient {
    /// Client for the live site, storing files in the default spreadsheet directory
    pub fn new() -> Result<Self> {
        Ok(Self::with_base_url(BASE_URL, excel_dir()?))
    }

    pub fn with_base_url(base_url: impl Into<String>, excel_dir: PathBuf) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            excel_dir,
        }
    }

    pub fn excel_dir(&self) -> &Path {
        &self.excel_dir
    }

    pub fn excel_path(&self, week: RankingWeek) -> PathBuf {
        self.excel_dir.join(week.filename())
    }

    pub fn is_downloaded(&self, week: RankingWeek) -> bool {
        self.excel_path(week).exists()
    }

    /// Archive URL of a week's spreadsheet
    pub fn week_url(&self, week: RankingWeek) -> String {
        format!("{}/uploads/ranking/{}", self.base_url, week.filename())
    }

    async fn get_text(&self, path: &str) -> Result<String> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "fetching page");
        let text = self
            .client
            .get(&url)
            .timeout(METADATA_TIMEOUT)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(text)
    }

    /// All weeks listed on the history page, newest first; the first one is current.
    pub async fn get_available_weeks(&self) -> Result<Vec<RemoteWeek>> {
        let html = self.get_text("/ranking/embed/history").await?;
        let weeks = parse_available_weeks(&html, &self.base_url);
        debug!(weeks = weeks.len(), "listed remote weeks");
        Ok(weeks)
    }

    /// Week announced on the live ranking page, downloadable from `/ranking/download`.
    ///
    /// The page carries no year, so the current calendar year is assumed.
    pub async fn get_live_current_week(&self) -> Result<Option<RemoteWeek>> {
        let html = self.get_text("/ranking").await?;
        let year = chrono::Local::now().year() as u16;
        Ok(parse_live_week(&html, year).map(|week| RemoteWeek {
            week,
            url: format!("{}/ranking/download", self.base_url),
            is_current: true,
        }))
    }

    /// Live week if the ranking page yields one, otherwise the newest archived week
    pub async fn get_current_week(&self) -> Result<Option<RemoteWeek>> {
        match self.get_live_current_week().await {
            Ok(Some(week)) => return Ok(Some(week)),
            Ok(None) => debug!("live ranking page names no week"),
            Err(e) => warn!(error = %e, "live ranking page unavailable, using history"),
        }
        Ok(self.get_available_weeks().await?.into_iter().next())
    }

    /// Fetch a week's spreadsheet unless it is already on disk.
    ///
    /// `force` re-downloads regardless. An empty response body is `NoData` and
    /// nothing is written.
    pub async fn download_week(&self, remote: &RemoteWeek, force: bool) -> Result<PathBuf> {
        let path = self.excel_path(remote.week);
        if path.exists() && !force {
            debug!(week = %remote.week, "using cached spreadsheet");
            return Ok(path);
        }

        let bytes = self
            .client
            .get(&remote.url)
            .timeout(DOWNLOAD_TIMEOUT)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        if bytes.is_empty() {
            return Err(RankingError::NoData {
                what: format!("empty spreadsheet for {}", remote.week.label()),
            });
        }

        std::fs::create_dir_all(&self.excel_dir)?;
        std::fs::write(&path, &bytes)?;
        info!(week = %remote.week, bytes = bytes.len(), "downloaded spreadsheet");
        Ok(path)
    }

    /// Weeks with a spreadsheet on disk, newest first
    pub fn get_local_weeks(&self) -> Result<Vec<RankingWeek>> {
        if !self.excel_dir.exists() {
            return Ok(Vec::new());
        }

        let mut weeks = Vec::new();
        for entry in std::fs::read_dir(&self.excel_dir)? {
            let name = entry?.file_name();
            if let Some(week) = name.to_str().and_then(week_from_filename_exact) {
                weeks.push(week);
            }
        }
        weeks.sort_unstable_by(|a, b| b.cmp(a));
        Ok(weeks)
    }
}

fn week_from_filename_exact(name: &str) -> Option<RankingWeek> {
    let caps = FILENAME_RE.captures(name)?;
    if caps.get(0)?.as_str().len() != name.len() {
        return None;
    }
    Some(RankingWeek::new(caps[1].parse().ok()?, caps[2].parse().ok()?))
}

/// Weeks referenced by spreadsheet links in the history page, de-duplicated in page
/// order. The first one found is marked current.
pub fn parse_available_weeks(html: &str, base_url: &str) -> Vec<RemoteWeek> {
    static LINK_RE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"Ranking_(\d{4})_KW(\d{2})\.xlsx").expect("valid link regex"));

    let mut weeks: Vec<RemoteWeek> = Vec::new();
    for caps in LINK_RE.captures_iter(html) {
        let (Ok(year), Ok(week)) = (caps[1].parse::<u16>(), caps[2].parse::<u8>()) else {
            continue;
        };
        let week = RankingWeek::new(year, week);
        if weeks.iter().any(|w| w.week == week) {
            continue;
        }
        weeks.push(RemoteWeek {
            week,
            url: format!("{}/uploads/ranking/{}", base_url, week.filename()),
            is_current: weeks.is_empty(),
        });
    }
    weeks
}

/// Week number from the "Rangliste KW <n>" heading, combined with `year`
pub fn parse_live_week(html: &str, year: u16) -> Option<RankingWeek> {
    let caps = LIVE_WEEK_RE.captures(html)?;
    let week: u8 = caps[1].parse().ok()?;
    RankingWeek::try_new(year, week).ok()
}

#[cfg(test)]
mod tests;
