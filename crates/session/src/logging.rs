#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionLogEventKind {
    ThemeApplied,
    PurposeSelected,
    FieldEdited,
    SubmissionStarted,
    PredictionDisplayed,
    PredictionFailed,
    HistoryAppended,
    HistoryCleared,
}

impl SessionLogEventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ThemeApplied => "theme_applied",
            Self::PurposeSelected => "purpose_selected",
            Self::FieldEdited => "field_edited",
            Self::SubmissionStarted => "submission_started",
            Self::PredictionDisplayed => "prediction_displayed",
            Self::PredictionFailed => "prediction_failed",
            Self::HistoryAppended => "history_appended",
            Self::HistoryCleared => "history_cleared",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionLogEvent {
    pub sequence: u64,
    pub kind: SessionLogEventKind,
    pub detail: String,
}

impl SessionLogEvent {
    pub fn new(sequence: u64, kind: SessionLogEventKind, detail: impl Into<String>) -> Self {
        Self {
            sequence,
            kind,
            detail: detail.into(),
        }
    }
}

pub trait SessionLogWriter {
    fn write(&mut self, event: SessionLogEvent);
}

#[derive(Debug, Default)]
pub struct InMemorySessionLog {
    events: Vec<SessionLogEvent>,
}

impl InMemorySessionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[SessionLogEvent] {
        &self.events
    }

    pub fn kinds(&self) -> Vec<SessionLogEventKind> {
        self.events.iter().map(|event| event.kind).collect()
    }
}

impl SessionLogWriter for InMemorySessionLog {
    fn write(&mut self, event: SessionLogEvent) {
        self.events.push(event);
    }
}

/// Forwards session events to `tracing` at debug level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSessionLog;

impl SessionLogWriter for TracingSessionLog {
    fn write(&mut self, event: SessionLogEvent) {
        tracing::debug!(
            sequence = event.sequence,
            kind = event.kind.as_str(),
            detail = %event.detail,
            "session event"
        );
    }
}
