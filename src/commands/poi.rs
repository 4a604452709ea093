//! `poi`: show, set or clear the player of interest.

use serde_json::json;

use super::common::CommandContext;
use crate::cli::PoiCmd;
use crate::output::print_json;

pub fn handle_poi(ctx: &CommandContext, cmd: Option<PoiCmd>) -> anyhow::Result<()> {
    match cmd.unwrap_or(PoiCmd::Show) {
        PoiCmd::Show => {
            let poi = ctx.config.get_poi()?;
            let name = match &poi {
                Some(id) => ctx
                    .db
                    .get_player_by_id(id, None, false)?
                    .first()
                    .map(|e| e.full_name()),
                None => None,
            };

            if ctx.json {
                print_json(&json!({ "poi": poi, "name": name }))?;
            } else {
                match (poi, name) {
                    (Some(id), Some(name)) => println!("Player of interest: {id} ({name})"),
                    (Some(id), None) => println!("Player of interest: {id}"),
                    (None, _) => println!("No player of interest set."),
                }
            }
        }
        PoiCmd::Set { player_id } => {
            ctx.config.set_poi(&player_id)?;
            ctx.status(format!("✓ Player of interest set to {player_id}"));
        }
        PoiCmd::Clear => {
            ctx.config.clear_poi()?;
            ctx.status("✓ Player of interest cleared");
        }
    }
    Ok(())
}
