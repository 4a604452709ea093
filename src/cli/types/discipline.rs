//! Badminton discipline codes as used in the DBV ranking files.

use crate::error::RankingError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The six ranked disciplines.
///
/// Mixed doubles is ranked twice, once per gender of record (`HM` for the men,
/// `DM` for the women), so a mixed pair always consists of one `HM` and one `DM`
/// entry.
///
/// # Examples
///
/// ```rust
/// use badminton_cli::Discipline;
///
/// let d: Discipline = "hd".parse().unwrap();
/// assert_eq!(d, Discipline::HD);
/// assert!(d.is_doubles());
/// assert_eq!(d.full_name(), "Herren Doppel");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Discipline {
    /// Herren Einzel (men's singles)
    HE,
    /// Herren Doppel (men's doubles)
    HD,
    /// Damen Einzel (women's singles)
    DE,
    /// Damen Doppel (women's doubles)
    DD,
    /// Mixed, ranked for the man
    HM,
    /// Mixed, ranked for the woman
    DM,
}

impl Discipline {
    pub const ALL: [Discipline; 6] = [
        Discipline::HE,
        Discipline::HD,
        Discipline::DE,
        Discipline::DD,
        Discipline::HM,
        Discipline::DM,
    ];

    pub const DOUBLES: [Discipline; 4] =
        [Discipline::HD, Discipline::DD, Discipline::HM, Discipline::DM];

    /// Two-letter code as stored in the spreadsheet and the database.
    pub fn code(&self) -> &'static str {
        match self {
            Discipline::HE => "HE",
            Discipline::HD => "HD",
            Discipline::DE => "DE",
            Discipline::DD => "DD",
            Discipline::HM => "HM",
            Discipline::DM => "DM",
        }
    }

    /// Full German name of the discipline.
    pub fn full_name(&self) -> &'static str {
        match self {
            Discipline::HE => "Herren Einzel",
            Discipline::HD => "Herren Doppel",
            Discipline::DE => "Damen Einzel",
            Discipline::DD => "Damen Doppel",
            Discipline::HM => "Mixed (Herren)",
            Discipline::DM => "Mixed (Damen)",
        }
    }

    /// Short English name (MS, MD, WS, WD, XD).
    pub fn short_name(&self) -> &'static str {
        match self {
            Discipline::HE => "MS",
            Discipline::HD => "MD",
            Discipline::DE => "WS",
            Discipline::DD => "WD",
            Discipline::HM | Discipline::DM => "XD",
        }
    }

    pub fn is_doubles(&self) -> bool {
        !matches!(self, Discipline::HE | Discipline::DE)
    }

    /// Exact code lookup, used when reading stored or parsed values.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.code() == code)
    }
}

impl fmt::Display for Discipline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Discipline {
    type Err = RankingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(&s.trim().to_uppercase()).ok_or_else(|| RankingError::InvalidDiscipline {
            code: s.to_string(),
        })
    }
}
