use clap::Subcommand;

/// Plant record commands.
#[derive(Clone, Debug, Subcommand)]
pub enum PlantCommands {
    /// Create a plant from a JSON payload.
    Create {
        /// Owning user ID.
        #[arg(long = "as", value_name = "USER_ID")]
        owner: i64,
        /// JSON object, or `@path` to read it from a file.
        #[arg(long)]
        data: String,
    },
    /// Get a plant by ID.
    Get { id: i64 },
    /// List plants.
    List {
        #[arg(long)]
        owner: Option<i64>,
    },
    /// Update a plant from a JSON payload.
    Update {
        id: i64,
        #[arg(long)]
        data: String,
        /// Only validate the keys present in the payload.
        #[arg(long)]
        partial: bool,
    },
    /// Delete a plant. Linked observations are kept and unlinked.
    Delete { id: i64 },
}
