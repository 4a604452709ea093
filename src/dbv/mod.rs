//! Ranking data acquisition from the German Badminton Association (DBV).

pub mod http;
pub mod parser;

pub use http::{RankingClient, RemoteWeek, BASE_URL};
pub use parser::{extract_week_from_filename, parse_excel, parse_rows};
