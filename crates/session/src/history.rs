use form_core::PredictionRecord;
use serde_json::Value;

use crate::storage::{KeyValueStore, StorageError, HISTORY_KEY};

pub const HISTORY_PREVIEW_LIMIT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryToggle {
    ShowAll,
    ShowLess,
}

impl HistoryToggle {
    pub fn label(self) -> &'static str {
        match self {
            Self::ShowAll => "Show All",
            Self::ShowLess => "Show Less",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryView {
    /// Most recent first.
    pub entries: Vec<PredictionRecord>,
    pub total: usize,
    pub toggle: Option<HistoryToggle>,
}

impl HistoryView {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Stored predictions, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryLog {
    records: Vec<PredictionRecord>,
}

impl HistoryLog {
    pub fn records(&self) -> &[PredictionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has_overflow(&self) -> bool {
        self.records.len() > HISTORY_PREVIEW_LIMIT
    }

    pub fn render(&self, expanded: bool) -> HistoryView {
        let shown = if expanded {
            self.records.len()
        } else {
            HISTORY_PREVIEW_LIMIT
        };
        let toggle = self.has_overflow().then_some(if expanded {
            HistoryToggle::ShowLess
        } else {
            HistoryToggle::ShowAll
        });

        HistoryView {
            entries: self.records.iter().rev().take(shown).cloned().collect(),
            total: self.records.len(),
            toggle,
        }
    }
}

/// Reads the persisted log; an absent value or one that is not a JSON array
/// is an empty log. Entries are decoded one at a time, so a row that cannot
/// be read is skipped without hiding the rest.
pub fn load_history(store: &dyn KeyValueStore) -> HistoryLog {
    let records = load_stored_entries(store)
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match decode_record(entry) {
            Ok(record) => Some(record),
            Err(err) => {
                tracing::debug!(index, error = %err, "skipping unreadable history entry");
                None
            }
        })
        .collect();
    HistoryLog { records }
}

/// Read-modify-write of the whole log. Returns the new length. Stored
/// entries are written back as found, including ones `load_history` skips.
pub fn append_history(
    store: &mut dyn KeyValueStore,
    record: PredictionRecord,
) -> Result<usize, StorageError> {
    let mut entries = load_stored_entries(&*store);
    entries.push(serde_json::to_value(record)?);
    let serialized = serde_json::to_string(&entries)?;
    store.set(HISTORY_KEY, &serialized)?;
    Ok(entries.len())
}

fn load_stored_entries(store: &dyn KeyValueStore) -> Vec<Value> {
    let Some(raw) = store.get(HISTORY_KEY) else {
        return Vec::new();
    };

    match serde_json::from_str::<Value>(&raw) {
        Ok(Value::Array(entries)) => entries,
        Ok(other) => {
            tracing::debug!(kind = json_kind(&other), "ignoring non-array prediction history");
            Vec::new()
        }
        Err(err) => {
            tracing::debug!(error = %err, "ignoring malformed prediction history");
            Vec::new()
        }
    }
}

/// Numbers and booleans stored in place of strings are read as their text.
fn decode_record(mut entry: Value) -> Result<PredictionRecord, serde_json::Error> {
    if let Value::Object(fields) = &mut entry {
        for value in fields.values_mut() {
            let text = match value {
                Value::Number(number) => number.to_string(),
                Value::Bool(flag) => flag.to_string(),
                _ => continue,
            };
            *value = Value::String(text);
        }
    }
    serde_json::from_value(entry)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

pub fn clear_history(store: &mut dyn KeyValueStore) -> Result<(), StorageError> {
    store.delete(HISTORY_KEY)
}
