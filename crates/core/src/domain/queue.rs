// Queue Domain Model

use super::error::{DomainError, Result};
use serde::{Deserialize, Serialize};

/// Queue identifier (UUID v4 string)
pub type QueueId = String;

/// Storage bounds (mirrors the `queues` table column widths)
pub const MAX_NAME_LEN: usize = 128;
pub const MAX_OWNER_LEN: usize = 128;
pub const MAX_TITLE_LEN: usize = 128;
pub const MAX_DESCRIPTION_LEN: usize = 2048;

/// A stored queue. Never carries a credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Queue {
    pub id: QueueId,
    pub name: String,
    pub owner: String,
    pub title: String,
    pub description: String,
    pub number: i64,
}

/// Create response: the stored queue plus the credential minted for it.
///
/// This is the only place a credential ever appears.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatedQueue {
    #[serde(flatten)]
    pub queue: Queue,
    pub token: String,
}

/// Mutable fields of a queue. `None` leaves the stored value unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueueChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub number: Option<i64>,
}

impl QueueChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.number.is_none()
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(title) = &self.title {
            check_len("title", title, MAX_TITLE_LEN)?;
        }
        if let Some(description) = &self.description {
            check_len("description", description, MAX_DESCRIPTION_LEN)?;
        }
        Ok(())
    }
}

pub(crate) fn check_len(field: &str, value: &str, max: usize) -> Result<()> {
    let len = value.chars().count();
    if len > max {
        return Err(DomainError::ValidationError(format!(
            "{} too long ({} > {} characters)",
            field, len, max
        )));
    }
    Ok(())
}
