use form_core::{
    check_form_validity, preferred_theme, FieldCheck, FieldName, FieldValues, FormState,
    PredictionRecord, PredictionResult, Purpose, PurposeSelector, Theme,
};
use thiserror::Error;

use crate::{
    history::{append_history, clear_history, load_history, HistoryView},
    logging::{SessionLogEvent, SessionLogEventKind, SessionLogWriter, TracingSessionLog},
    pipeline::{PendingSubmission, PredictionRequestError, SubmissionOutcome},
    storage::{KeyValueStore, PURPOSE_KEY, THEME_KEY},
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Please select a purpose (Buying or Selling) first!")]
    PurposeUnset,
    #[error("unknown field `{0}`")]
    UnknownField(String),
    #[error("fix the highlighted fields before requesting a prediction")]
    FormInvalid,
    #[error("a prediction request is already in progress")]
    SubmissionInFlight,
}

/// The prediction shown in the results region.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionDisplay {
    pub purpose: Purpose,
    pub values: FieldValues,
    pub result: PredictionResult,
}

/// All client-side state of the prediction form over an injected store.
///
/// Every method runs to completion synchronously. The only suspension point
/// lives outside the session: `begin_submission` hands out a snapshot, the
/// caller awaits the predictor, and `complete_submission` applies the
/// outcome. Edits, theme changes and history actions stay available while a
/// request is pending.
#[derive(Debug)]
pub struct FormSession<S, L = TracingSessionLog> {
    store: S,
    log: L,
    theme: Theme,
    purpose: PurposeSelector,
    form: FormState,
    history_expanded: bool,
    displayed: Option<PredictionDisplay>,
    in_flight: Option<u64>,
    next_submission_id: u64,
    sequence: u64,
}

impl<S: KeyValueStore> FormSession<S, TracingSessionLog> {
    pub fn load(store: S, system_theme: Option<Theme>) -> Self {
        Self::load_with_log(store, TracingSessionLog, system_theme)
    }
}

impl<S: KeyValueStore, L: SessionLogWriter> FormSession<S, L> {
    pub fn load_with_log(store: S, log: L, system_theme: Option<Theme>) -> Self {
        let theme = preferred_theme(store.get(THEME_KEY).as_deref(), system_theme);
        let purpose = PurposeSelector::restored(
            store
                .get(PURPOSE_KEY)
                .as_deref()
                .and_then(Purpose::parse),
        );
        tracing::debug!(theme = theme.as_str(), purpose = ?purpose.purpose(), "session restored");

        Self {
            store,
            log,
            theme,
            purpose,
            form: FormState::new(),
            history_expanded: false,
            displayed: None,
            in_flight: None,
            next_submission_id: 1,
            sequence: 0,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn log(&self) -> &L {
        &self.log
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn apply_theme(&mut self, theme: Theme) {
        self.theme = theme;
        self.persist(THEME_KEY, theme.as_str());
        self.record(SessionLogEventKind::ThemeApplied, theme.as_str());
    }

    pub fn toggle_theme(&mut self) -> Theme {
        let next = self.theme.toggled();
        self.apply_theme(next);
        next
    }

    pub fn purpose(&self) -> Option<Purpose> {
        self.purpose.purpose()
    }

    pub fn inputs_enabled(&self) -> bool {
        self.purpose.inputs_enabled()
    }

    /// Selecting a purpose, even the current one, clears every field.
    pub fn select_purpose(&mut self, purpose: Purpose) {
        let transition = self.purpose.select(purpose);
        self.form.clear();
        self.persist(PURPOSE_KEY, purpose.as_str());
        self.record(
            SessionLogEventKind::PurposeSelected,
            format!("{:?} -> {}", transition.from, purpose.as_str()),
        );
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn edit_field(&mut self, name: FieldName, raw: &str) -> Result<FieldCheck, FormError> {
        if !self.purpose.inputs_enabled() {
            return Err(FormError::PurposeUnset);
        }
        let check = self.form.set(name, raw).clone();
        self.record(SessionLogEventKind::FieldEdited, name.as_str());
        Ok(check)
    }

    pub fn edit_field_named(&mut self, name: &str, raw: &str) -> Result<FieldCheck, FormError> {
        let field = FieldName::parse(name).ok_or_else(|| FormError::UnknownField(name.to_owned()))?;
        self.edit_field(field, raw)
    }

    pub fn clear_form(&mut self) -> Result<(), FormError> {
        if !self.purpose.inputs_enabled() {
            return Err(FormError::PurposeUnset);
        }
        self.form.clear();
        Ok(())
    }

    pub fn form_valid(&self) -> bool {
        check_form_validity(&self.form)
    }

    pub fn can_submit(&self) -> bool {
        self.purpose.inputs_enabled() && self.form_valid() && self.in_flight.is_none()
    }

    pub fn submission_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn begin_submission(&mut self) -> Result<PendingSubmission, FormError> {
        let purpose = self.purpose.purpose().ok_or(FormError::PurposeUnset)?;
        if self.in_flight.is_some() {
            return Err(FormError::SubmissionInFlight);
        }
        if !self.form_valid() {
            return Err(FormError::FormInvalid);
        }

        let id = self.next_submission_id;
        self.next_submission_id += 1;
        self.in_flight = Some(id);
        self.record(SessionLogEventKind::SubmissionStarted, format!("#{id}"));

        Ok(PendingSubmission {
            id,
            purpose,
            values: self.form.values(),
        })
    }

    /// Applies a finished request. On success the result is displayed, the
    /// history gains one record and collapses back to its preview. On failure
    /// nothing but the in-flight marker changes.
    pub fn complete_submission(
        &mut self,
        pending: PendingSubmission,
        outcome: SubmissionOutcome,
    ) -> Result<PredictionDisplay, PredictionRequestError> {
        if self.in_flight == Some(pending.id) {
            self.in_flight = None;
        }

        let result = match outcome {
            Ok(result) => result,
            Err(err) => {
                self.record(SessionLogEventKind::PredictionFailed, err.to_string());
                return Err(err);
            }
        };

        let record = PredictionRecord::new(pending.values.clone(), result.predicted_price);
        let display = PredictionDisplay {
            purpose: pending.purpose,
            values: pending.values,
            result,
        };
        self.displayed = Some(display.clone());
        self.record(
            SessionLogEventKind::PredictionDisplayed,
            format!("#{} {}", pending.id, record.predicted_price),
        );

        match append_history(&mut self.store, record) {
            Ok(len) => self.record(SessionLogEventKind::HistoryAppended, format!("{len} entries")),
            Err(err) => tracing::warn!(error = %err, "could not persist prediction history"),
        }
        self.history_expanded = false;

        Ok(display)
    }

    pub fn displayed_prediction(&self) -> Option<&PredictionDisplay> {
        self.displayed.as_ref()
    }

    pub fn history_expanded(&self) -> bool {
        self.history_expanded
    }

    pub fn history(&self) -> HistoryView {
        load_history(&self.store).render(self.history_expanded)
    }

    /// Flips between preview and full list; a no-op while the toggle is hidden.
    pub fn toggle_history(&mut self) -> HistoryView {
        let log = load_history(&self.store);
        if log.has_overflow() {
            self.history_expanded = !self.history_expanded;
        }
        log.render(self.history_expanded)
    }

    pub fn clear_history(&mut self) {
        match clear_history(&mut self.store) {
            Ok(()) => self.record(SessionLogEventKind::HistoryCleared, ""),
            Err(err) => tracing::warn!(error = %err, "could not clear prediction history"),
        }
        self.history_expanded = false;
    }

    fn persist(&mut self, key: &str, value: &str) {
        if let Err(err) = self.store.set(key, value) {
            tracing::warn!(key, error = %err, "could not persist preference");
        }
    }

    fn record(&mut self, kind: SessionLogEventKind, detail: impl Into<String>) {
        self.sequence += 1;
        self.log.write(SessionLogEvent::new(self.sequence, kind, detail));
    }
}
