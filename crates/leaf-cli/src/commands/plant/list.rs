use leaf_core::serializers::PlantRepresentation;
use leaf_db::repos::plant::PlantFilter;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::commands::shared::limit::effective_limit;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct PlantListResponse {
    plants: Vec<PlantRepresentation>,
}

pub async fn run(owner: Option<i64>, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let filter = PlantFilter {
        owner,
        limit: effective_limit(flags.limit, ctx.config.general.default_limit),
    };
    let plants = ctx.service.read_plants(&filter).await?;
    output(&PlantListResponse { plants }, flags.format)
}
