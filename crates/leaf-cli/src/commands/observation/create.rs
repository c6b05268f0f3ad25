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
    let observation = ctx
        .service
        .create_observation_from_payload(owner, &payload)
        .await?;
    tracing::info!(observation_id = observation.id, owner, "observation created");
    output(&observation, flags.format)
}
