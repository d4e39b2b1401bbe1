//! Store metadata used for change detection.

use serde::{Deserialize, Serialize};

/// Revision information. The revision id is bumped on every write, so
/// clients can tell whether their slide snapshot is stale.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevisionInfo {
    pub revision_id: i64,
    pub generated_at: String,
}
