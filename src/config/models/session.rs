//! Session persistence configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where the bearer token is kept between runs
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SessionSettings {
    /// Token file. `None` keeps the token in memory only.
    #[serde(default)]
    pub token_path: Option<PathBuf>,
}

impl SessionSettings {
    pub fn merge(mut self, other: Self) -> Self {
        if other.token_path.is_some() {
            self.token_path = other.token_path;
        }
        self
    }
}
