//! Capped, newest-first log of past analyses, mirrored to the store as
//! one JSON snapshot under a fixed key.

use crate::db::Db;
use crate::types::AnalysisRecord;

pub const HISTORY_KEY: &str = "spendwise_history";
const HISTORY_CAP: usize = 50;

pub struct HistoryStore {
    db: Db,
    records: Vec<AnalysisRecord>,
}

impl HistoryStore {
    /// Load once at startup. A missing or unreadable stored value is
    /// treated as an empty log; the failure is logged, never propagated.
    pub fn load(db: Db) -> Self {
        let records = match db.get(HISTORY_KEY) {
            Ok(Some(json)) => match serde_json::from_str::<Vec<AnalysisRecord>>(&json) {
                Ok(records) => records,
                Err(e) => {
                    eprintln!("[history] Failed to parse stored history, starting empty: {}", e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                eprintln!("[history] Failed to read stored history, starting empty: {}", e);
                Vec::new()
            }
        };
        HistoryStore { db, records }
    }

    pub fn records(&self) -> &[AnalysisRecord] {
        &self.records
    }

    pub fn get(&self, id: &str) -> Option<&AnalysisRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Prepend the record, truncate to the 50 most recent and persist the
    /// whole snapshot.
    pub fn append(&mut self, record: AnalysisRecord) -> Result<(), String> {
        self.records.insert(0, record);
        self.records.truncate(HISTORY_CAP);
        self.persist()
    }

    /// Wipe the in-memory log and the persisted value.
    pub fn clear(&mut self) -> Result<(), String> {
        self.records.clear();
        self.db.remove(HISTORY_KEY)
    }

    fn persist(&self) -> Result<(), String> {
        let json = serde_json::to_string(&self.records).map_err(|e| e.to_string())?;
        self.db.set(HISTORY_KEY, &json)
    }
}
