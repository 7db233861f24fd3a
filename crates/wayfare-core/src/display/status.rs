//! Outcome lines for commands that change stored data.

use std::fmt;

use crate::params::{OwnedId, RemoveItem};

/// A one-line outcome, prefixed `Success:` or `Error:`.
///
/// Both the CLI and the MCP server print these, so their wording lives here.
pub struct OperationStatus {
    pub message: String,
    pub success: bool,
}

impl OperationStatus {
    pub fn success(message: String) -> Self {
        Self {
            message,
            success: true,
        }
    }

    pub fn failure(message: String) -> Self {
        Self {
            message,
            success: false,
        }
    }

    /// A survey and its recommendations are gone.
    pub fn survey_deleted(params: &OwnedId) -> Self {
        Self::success(format!("Survey {} deleted", params.id))
    }

    /// Result of a removal from a bookmark list or wishlist. Removing an
    /// item that was never saved is reported, not raised.
    pub fn item_removed(params: &RemoveItem, removed: bool) -> Self {
        let label = format!("{} {}", params.item_type.as_str(), params.item_id);
        if removed {
            Self::success(format!("Removed {label} from {}", params.list))
        } else {
            Self::failure(format!("{label} is not on the {}", params.list))
        }
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = if self.success { "Success:" } else { "Error:" };
        writeln!(f, "{prefix} {}", self.message)
    }
}
