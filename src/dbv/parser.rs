//! Spreadsheet to [`Entry`] conversion.
//!
//! The DBV file has one header row followed by one row per player and discipline.
//! Columns are located by header name, so their order does not matter.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use crate::cli::types::{Discipline, PlayerId, RankingWeek};
use crate::storage::Entry;
use crate::Result;

pub(crate) static FILENAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^Ranking_(\d{4})_KW(\d{2})\.xlsx").expect("valid filename regex"));

/// Column positions by header name
#[derive(Debug, Default)]
struct Columns {
    gender: Option<usize>,
    discipline: Option<usize>,
    rank: Option<usize>,
    federation_rank: Option<usize>,
    last_name: Option<usize>,
    first_name: Option<usize>,
    player_id: Option<usize>,
    birth_year: Option<usize>,
    age_class_1: Option<usize>,
    age_class_2: Option<usize>,
    points: Option<usize>,
    tournaments: Option<usize>,
    club: Option<usize>,
    district: Option<usize>,
}

impl Columns {
    fn from_header(header: &[Data]) -> Self {
        let mut cols = Columns::default();
        for (idx, cell) in header.iter().enumerate() {
            let slot = match cell_text(cell).trim() {
                "GS" => &mut cols.gender,
                "DIS" => &mut cols.discipline,
                "Ranglistenplatz" => &mut cols.rank,
                "FRang" => &mut cols.federation_rank,
                "Nachname" => &mut cols.last_name,
                "Vorname" => &mut cols.first_name,
                "SpielerID" => &mut cols.player_id,
                "GJahr" => &mut cols.birth_year,
                "AKL1" => &mut cols.age_class_1,
                "AKL2" => &mut cols.age_class_2,
                "Points" => &mut cols.points,
                "Turniere" => &mut cols.tournaments,
                "Verein" => &mut cols.club,
                "Bezirk" => &mut cols.district,
                _ => continue,
            };
            *slot = Some(idx);
        }
        cols
    }

    /// `None` when any column is missing or a numeric cell does not parse
    fn entry(&self, row: &[Data]) -> Option<Entry> {
        let cell = |col: Option<usize>| col.and_then(|idx| row.get(idx));
        let text = |col: Option<usize>| cell(col).map(cell_text);

        let discipline = Discipline::from_code(&text(self.discipline)?)?;

        Some(Entry {
            discipline,
            rank: cell_count(cell(self.rank)?)?,
            federation_rank: cell_count(cell(self.federation_rank)?)?,
            last_name: text(self.last_name)?,
            first_name: text(self.first_name)?,
            gender: text(self.gender)?,
            player_id: PlayerId::new(text(self.player_id)?),
            birth_year: u16::try_from(cell_count(cell(self.birth_year)?)?).ok()?,
            age_class_1: text(self.age_class_1)?,
            age_class_2: text(self.age_class_2)?,
            points: cell_number(cell(self.points)?)? / 1000.0,
            tournaments: cell_count(cell(self.tournaments)?)?,
            club: text(self.club)?,
            district: text(self.district)?,
            age_group_rank: None,
        })
    }
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Numeric value of a cell; blank cells count as 0
fn cell_number(cell: &Data) -> Option<f64> {
    match cell {
        Data::Empty => Some(0.0),
        Data::Int(i) => Some(*i as f64),
        Data::Float(f) if f.is_finite() => Some(*f),
        Data::String(s) if s.trim().is_empty() => Some(0.0),
        Data::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

/// Non-negative whole number, fractions truncated
fn cell_count(cell: &Data) -> Option<u32> {
    let value = cell_number(cell)?.trunc();
    if value < 0.0 || value > f64::from(u32::MAX) {
        return None;
    }
    Some(value as u32)
}

/// Convert sheet rows (header first) into entries.
///
/// Rows with an empty first cell, an unknown discipline code, or an unreadable value
/// are skipped.
pub fn parse_rows<'a, I>(mut rows: I) -> Vec<Entry>
where
    I: Iterator<Item = &'a [Data]>,
{
    let Some(header) = rows.next() else {
        return Vec::new();
    };
    let columns = Columns::from_header(header);

    let mut entries = Vec::new();
    let mut skipped = 0usize;
    for row in rows {
        if matches!(row.first(), None | Some(Data::Empty)) {
            continue;
        }
        match columns.entry(row) {
            Some(entry) => entries.push(entry),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        debug!(skipped, "skipped unreadable rows");
    }
    entries
}

/// Read the first sheet of a ranking spreadsheet.
pub fn parse_excel(path: &Path) -> Result<Vec<Entry>> {
    let mut workbook = open_workbook_auto(path)?;
    let Some(range) = workbook.worksheet_range_at(0) else {
        warn!(path = %path.display(), "spreadsheet has no sheets");
        return Ok(Vec::new());
    };
    let range = range?;

    let entries = parse_rows(range.rows());
    debug!(path = %path.display(), entries = entries.len(), "parsed spreadsheet");
    Ok(entries)
}

/// Week encoded in a `Ranking_<yyyy>_KW<ww>.xlsx` file name
pub fn extract_week_from_filename(filename: &str) -> Option<RankingWeek> {
    let caps = FILENAME_RE.captures(filename)?;
    Some(RankingWeek::new(caps[1].parse().ok()?, caps[2].parse().ok()?))
}
