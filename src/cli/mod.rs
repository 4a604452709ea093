//! CLI argument definitions and parsing.

pub mod types;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use types::{Discipline, PlayerId, RankingWeek, WeekSpan};

fn week_arg(s: &str) -> Result<RankingWeek, String> {
    s.parse().map_err(|e: crate::RankingError| e.to_string())
}

fn discipline_arg(s: &str) -> Result<Discipline, String> {
    s.parse().map_err(|e: crate::RankingError| e.to_string())
}

fn doubles_arg(s: &str) -> Result<Discipline, String> {
    let discipline = discipline_arg(s)?;
    if discipline.is_doubles() {
        Ok(discipline)
    } else {
        Err(format!("{discipline} is not a doubles discipline (use HD, DD, HM or DM)"))
    }
}

fn player_arg(s: &str) -> Result<PlayerId, String> {
    s.parse().map_err(|e: crate::RankingError| e.to_string())
}

fn span_arg(s: &str) -> Result<WeekSpan, String> {
    s.parse().map_err(|e: crate::RankingError| e.to_string())
}

/// Options every command understands
#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Print machine-readable JSON instead of tables.
    #[clap(long, global = true)]
    pub json: bool,

    /// Debug logging on stderr (RUST_LOG overrides).
    #[clap(long, short, global = true)]
    pub verbose: bool,

    /// Use this database file instead of the one in the data directory.
    #[clap(long, global = true)]
    pub db: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum PoiCmd {
    /// Show the current player of interest
    Show,
    /// Remember a player ID as the default for `player` and `graph`
    Set {
        #[clap(value_parser = player_arg)]
        player_id: PlayerId,
    },
    /// Forget the player of interest
    Clear,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Download and index ranking data.
    ///
    /// Without `--all` only the current week is fetched (always re-downloaded).
    Update {
        /// Download every week listed in the ranking archive
        #[clap(long)]
        all: bool,

        /// Re-download files that are already cached
        #[clap(long)]
        force: bool,
    },

    /// Fuzzy search for players by name
    Search {
        name: String,

        /// Maximum results to show
        #[clap(long, short = 'n', default_value_t = 10)]
        limit: usize,
    },

    /// Show one player's rankings
    Player {
        /// Player ID, e.g. 01-150083 (defaults to the player of interest)
        #[clap(value_parser = player_arg)]
        player_id: Option<PlayerId>,

        /// Ranking week, e.g. KW2 or 2026-KW02 (defaults to the newest)
        #[clap(long, short, value_parser = week_arg)]
        week: Option<RankingWeek>,

        /// Also show the rank within the player's age class
        #[clap(long)]
        age_rank: bool,
    },

    /// Compare two players side by side
    Compare {
        #[clap(value_parser = player_arg)]
        id1: PlayerId,
        #[clap(value_parser = player_arg)]
        id2: PlayerId,

        #[clap(long, short, value_parser = week_arg)]
        week: Option<RankingWeek>,
    },

    /// Combined points of a doubles pair
    Team {
        #[clap(value_parser = player_arg)]
        id1: PlayerId,
        #[clap(value_parser = player_arg)]
        id2: PlayerId,

        /// Only this doubles discipline (HD, DD, HM, DM)
        #[clap(long, short, value_parser = doubles_arg)]
        discipline: Option<Discipline>,

        #[clap(long, short, value_parser = week_arg)]
        week: Option<RankingWeek>,
    },

    /// Top of the ranking list
    Top {
        #[clap(long, short, value_parser = discipline_arg)]
        discipline: Option<Discipline>,

        #[clap(long, short = 'n', default_value_t = 20)]
        limit: usize,

        #[clap(long, short, value_parser = week_arg)]
        week: Option<RankingWeek>,

        /// Add the rank within each player's age class
        #[clap(long)]
        age_rank: bool,
    },

    /// Rank history chart for one or more players
    Graph {
        /// Player IDs (defaults to the player of interest)
        #[clap(value_parser = player_arg)]
        player_ids: Vec<PlayerId>,

        /// Discipline to plot (defaults to each player's best)
        #[clap(long, short, value_parser = discipline_arg)]
        discipline: Option<Discipline>,

        /// Plot points instead of rank
        #[clap(long, short)]
        points: bool,

        /// Plot the rank within the age class instead of the overall rank
        #[clap(long, conflicts_with = "points")]
        age_rank: bool,

        /// Only the last N weeks, months or years, e.g. 12w, 6m, 1y
        #[clap(long, value_parser = span_arg)]
        since: Option<WeekSpan>,
    },

    /// List indexed ranking weeks
    History,

    /// Manage the player of interest
    Poi {
        #[clap(subcommand)]
        cmd: Option<PoiCmd>,
    },
}

#[derive(Debug, Parser)]
#[clap(
    name = "badminton-cli",
    version,
    about = "German badminton (DBV) ranking explorer"
)]
pub struct BadmintonCli {
    #[clap(flatten)]
    pub global: GlobalOpts,

    #[clap(subcommand)]
    pub command: Commands,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Result<BadmintonCli, clap::Error> {
        BadmintonCli::try_parse_from(std::iter::once("badminton-cli").chain(args.iter().copied()))
    }

    #[test]
    fn test_cli_definition_is_valid() {
        BadmintonCli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_anywhere() {
        let cli = parse(&["top", "--json", "-n", "5", "-d", "hd"]).unwrap();
        assert!(cli.global.json);
        match cli.command {
            Commands::Top {
                discipline, limit, ..
            } => {
                assert_eq!(discipline, Some(Discipline::HD));
                assert_eq!(limit, 5);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_week_is_validated_by_parser() {
        let cli = parse(&["player", "01-1", "-w", "2026-KW02"]).unwrap();
        match cli.command {
            Commands::Player { week, .. } => assert_eq!(week, Some(RankingWeek::new(2026, 2))),
            other => panic!("unexpected command {other:?}"),
        }
        assert!(parse(&["player", "01-1", "-w", "KW60"]).is_err());
        assert!(parse(&["top", "-w", "yesterday"]).is_err());
    }

    #[test]
    fn test_team_rejects_singles() {
        assert!(parse(&["team", "a", "b", "-d", "HE"]).is_err());
        assert!(parse(&["team", "a", "b", "-d", "DM"]).is_ok());
    }

    #[test]
    fn test_graph_defaults_and_since() {
        let cli = parse(&["graph", "--since", "6m"]).unwrap();
        match cli.command {
            Commands::Graph {
                player_ids, since, ..
            } => {
                assert!(player_ids.is_empty());
                assert_eq!(since, Some(WeekSpan(26)));
            }
            other => panic!("unexpected command {other:?}"),
        }
        assert!(parse(&["graph", "--points", "--age-rank"]).is_err());
        assert!(parse(&["graph", "--since", "0w"]).is_err());
    }

    #[test]
    fn test_poi_subcommands() {
        assert!(matches!(
            parse(&["poi"]).unwrap().command,
            Commands::Poi { cmd: None }
        ));
        assert!(matches!(
            parse(&["poi", "set", "01-150083"]).unwrap().command,
            Commands::Poi {
                cmd: Some(PoiCmd::Set { .. })
            }
        ));
    }
}
