pub mod form;
pub mod history;
pub mod logging;
pub mod pipeline;
pub mod storage;

pub use form::{FormError, FormSession, PredictionDisplay};
pub use history::{HistoryLog, HistoryToggle, HistoryView, HISTORY_PREVIEW_LIMIT};
pub use pipeline::{
    PendingSubmission, PredictionRequestError, Predictor, SubmissionOutcome, SubmissionPipeline,
};
pub use storage::{JsonFileStore, KeyValueStore, MemoryStore, StorageError};

pub fn module_ready() -> bool {
    true
}
