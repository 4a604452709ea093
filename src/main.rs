//! Entry point: parse CLI and dispatch to command handlers.

use badminton_cli::{
    cli::{BadmintonCli, Commands},
    commands::{
        compare::handle_compare,
        graph::{handle_graph, GraphOptions},
        history::handle_history,
        player::handle_player,
        poi::handle_poi,
        search::handle_search,
        team::handle_team,
        top::handle_top,
        update::handle_update,
        CommandContext,
    },
};
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Run the CLI.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app = BadmintonCli::parse();
    init_logging(app.global.verbose);

    let mut ctx = CommandContext::new(&app.global)?;

    match app.command {
        Commands::Update { all, force } => {
            handle_update(&mut ctx, all, force).await?;
        }
        Commands::Search { name, limit } => handle_search(&mut ctx, &name, limit).await?,
        Commands::Player {
            player_id,
            week,
            age_rank,
        } => handle_player(&mut ctx, player_id, week, age_rank).await?,
        Commands::Compare { id1, id2, week } => handle_compare(&mut ctx, &id1, &id2, week).await?,
        Commands::Team {
            id1,
            id2,
            discipline,
            week,
        } => handle_team(&mut ctx, &id1, &id2, discipline, week).await?,
        Commands::Top {
            discipline,
            limit,
            week,
            age_rank,
        } => handle_top(&mut ctx, discipline, limit, week, age_rank).await?,
        Commands::Graph {
            player_ids,
            discipline,
            points,
            age_rank,
            since,
        } => {
            let opts = GraphOptions {
                discipline,
                points,
                age_rank,
                since,
            };
            handle_graph(&mut ctx, player_ids, opts).await?
        }
        Commands::History => handle_history(&ctx)?,
        Commands::Poi { cmd } => handle_poi(&ctx, cmd)?,
    }

    Ok(())
}
