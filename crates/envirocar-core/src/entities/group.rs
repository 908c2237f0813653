//! User groups.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A named group of users. Membership is owned by the group service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    /// Unique group name.
    pub name: String,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Name of the user who created the group.
    pub owner: String,
    /// Creation time.
    #[serde(default = "Utc::now")]
    pub created: DateTime<Utc>,
    /// Last modification time.
    #[serde(default = "Utc::now")]
    pub modified: DateTime<Utc>,
}

impl Group {
    /// Creates a group owned by `owner`.
    pub fn new(name: impl Into<String>, owner: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            name: name.into(),
            description: None,
            owner: owner.into(),
            created: now,
            modified: now,
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Checks the group name.
    pub fn validate(&self) -> Result<()> {
        let name = self.name.trim();
        if name.is_empty() || name.len() > 64 {
            return Err(Error::validation_field(
                "name",
                "must be between 1 and 64 characters",
            ));
        }
        if name.contains('/') {
            return Err(Error::validation_field("name", "must not contain '/'"));
        }
        Ok(())
    }
}
