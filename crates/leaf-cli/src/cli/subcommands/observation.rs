use clap::Subcommand;

/// Observation commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ObservationCommands {
    /// Create an observation from a JSON payload.
    Create {
        #[arg(long = "as", value_name = "USER_ID")]
        owner: i64,
        #[arg(long)]
        data: String,
    },
    /// Get an observation by ID.
    Get { id: i64 },
    /// List observations, newest first.
    List {
        #[arg(long)]
        owner: Option<i64>,
        #[arg(long)]
        plant: Option<i64>,
    },
    /// Update an observation from a JSON payload.
    Update {
        id: i64,
        #[arg(long)]
        data: String,
        #[arg(long)]
        partial: bool,
    },
    /// Delete an observation.
    Delete { id: i64 },
}
