//! Media (uploaded image) configuration.

use serde::{Deserialize, Serialize};

/// Default public prefix for stored upload paths.
fn default_url() -> String {
    String::from("/media/")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MediaConfig {
    /// Prefix joined onto upload paths when rendering image fields,
    /// e.g. `/media/` or `https://cdn.example.com/greenleaf/`.
    #[serde(default = "default_url")]
    pub url: String,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self { url: default_url() }
    }
}
