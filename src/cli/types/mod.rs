//! Type-safe wrappers and enums for ranking data.

pub mod discipline;
pub mod ids;
pub mod week;

pub use discipline::Discipline;
pub use ids::PlayerId;
pub use week::{parse_week_spec, RankingWeek, WeekSpan};
