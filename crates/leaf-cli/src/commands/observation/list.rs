use leaf_core::serializers::ObservationRepresentation;
use leaf_db::repos::observation::ObservationFilter;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::commands::shared::limit::effective_limit;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct ObservationListResponse {
    observations: Vec<ObservationRepresentation>,
}

pub async fn run(
    owner: Option<i64>,
    plant: Option<i64>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let filter = ObservationFilter {
        owner,
        plant,
        limit: effective_limit(flags.limit, ctx.config.general.default_limit),
    };
    let observations = ctx.service.read_observations(&filter).await?;
    output(&ObservationListResponse { observations }, flags.format)
}
