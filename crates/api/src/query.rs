//! Query parameter types shared by handlers.

use serde::Deserialize;

/// `?status=` filter for booking lists. Absent or `all` means no filter.
#[derive(Debug, Default, Deserialize)]
pub struct StatusParams {
    pub status: Option<String>,
}
