mod create;
mod list;
mod update;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::PlantCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `leaf plant`.
pub async fn handle(
    action: &PlantCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        PlantCommands::Create { owner, data } => create::run(*owner, data, ctx, flags).await,
        PlantCommands::Get { id } => {
            let plant = ctx.service.read_plant(*id).await?;
            output(&plant, flags.format)
        }
        PlantCommands::List { owner } => list::run(*owner, ctx, flags).await,
        PlantCommands::Update { id, data, partial } => {
            update::run(*id, data, *partial, ctx, flags).await
        }
        PlantCommands::Delete { id } => {
            let deletion = ctx.service.delete_plant(*id).await?;
            output(&deletion.to_json(*id), flags.format)
        }
    }
}
