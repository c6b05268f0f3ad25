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
    let observation = ctx
        .service
        .update_observation_from_payload(id, &payload, write_mode(partial))
        .await?;
    output(&observation, flags.format)
}
