mod create;
mod list;
mod update;

use leaf_db::repos::observation::observation_deleted_json;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ObservationCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `leaf observation`.
pub async fn handle(
    action: &ObservationCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        ObservationCommands::Create { owner, data } => create::run(*owner, data, ctx, flags).await,
        ObservationCommands::Get { id } => {
            let observation = ctx.service.read_observation(*id).await?;
            output(&observation, flags.format)
        }
        ObservationCommands::List { owner, plant } => list::run(*owner, *plant, ctx, flags).await,
        ObservationCommands::Update { id, data, partial } => {
            update::run(*id, data, *partial, ctx, flags).await
        }
        ObservationCommands::Delete { id } => {
            ctx.service.delete_observation(*id).await?;
            output(&observation_deleted_json(*id), flags.format)
        }
    }
}
