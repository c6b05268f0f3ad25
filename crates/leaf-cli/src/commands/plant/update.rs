use crate::cli::GlobalFlags;
use crate::commands::shared::payload::{parse_payload, write_mode};
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    id: i64,
    data: &str,
    partial: bool,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let payload = parse_payload(data)?;
    let plant = ctx
        .service
        .update_plant_from_payload(id, &payload, write_mode(partial))
        .await?;
    output(&plant, flags.format)
}
