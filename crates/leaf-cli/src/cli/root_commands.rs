use clap::Subcommand;

use crate::cli::subcommands::{ObservationCommands, PlantCommands, UserCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Record owners.
    User {
        #[command(subcommand)]
        action: UserCommands,
    },
    /// Plant records.
    Plant {
        #[command(subcommand)]
        action: PlantCommands,
    },
    /// Field observations.
    Observation {
        #[command(subcommand)]
        action: ObservationCommands,
    },
}
