use clap::Subcommand;

/// User commands.
#[derive(Clone, Debug, Subcommand)]
pub enum UserCommands {
    /// Add a user.
    Add { username: String },
    /// List users.
    List,
    /// Get a user by ID.
    Get { id: i64 },
    /// Delete a user and everything they created.
    Delete { id: i64 },
}
