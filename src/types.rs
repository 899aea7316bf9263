use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

static RECORD_SEQ: AtomicU64 = AtomicU64::new(0);

/// One completed analysis. `formatted_output` is the untouched generator
/// output; reparsing it is deterministic. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRecord {
    pub id: String,
    pub raw_text: String,
    pub formatted_output: String,
    pub timestamp: i64,
}

impl AnalysisRecord {
    /// Created only on a successful generator call. The id combines epoch
    /// millis with a process-wide counter so two records in the same
    /// instant still differ.
    pub fn new(raw_text: String, formatted_output: String) -> Self {
        let timestamp = chrono::Utc::now().timestamp_millis();
        let seq = RECORD_SEQ.fetch_add(1, Ordering::Relaxed);
        AnalysisRecord {
            id: format!("{}-{}", timestamp, seq),
            raw_text,
            formatted_output,
            timestamp,
        }
    }
}
