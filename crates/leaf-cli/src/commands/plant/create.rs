use crate::cli::GlobalFlags;
use crate::commands::shared::payload::parse_payload;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    owner: i64,
    data: &str,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let payload = parse_payload(data)?;
    let plant = ctx.service.create_plant_from_payload(owner, &payload).await?;
    tracing::info!(plant_id = plant.id, owner, "plant created");
    output(&plant, flags.format)
}
