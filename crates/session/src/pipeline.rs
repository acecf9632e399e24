use async_trait::async_trait;
use form_core::{FieldValues, PredictionResult, Purpose};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PredictionRequestError {
    #[error("could not reach the prediction service: {0}")]
    Transport(String),
    #[error("prediction service responded with status {0}")]
    Status(u16),
    #[error("prediction service returned an unusable response: {0}")]
    MalformedResponse(String),
}

/// Backend that turns a validated form into a price estimate.
#[async_trait]
pub trait Predictor: Send + Sync {
    async fn predict(&self, values: &FieldValues) -> Result<PredictionResult, PredictionRequestError>;
}

/// Form snapshot taken when a submission starts; later edits do not change it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSubmission {
    pub id: u64,
    pub purpose: Purpose,
    pub values: FieldValues,
}

pub type SubmissionOutcome = Result<PredictionResult, PredictionRequestError>;

/// Sends pending submissions to a predictor. There is no retry, timeout, or
/// cancellation: a hung request stays pending until it resolves.
#[derive(Debug, Clone)]
pub struct SubmissionPipeline<P> {
    predictor: P,
}

impl<P: Predictor> SubmissionPipeline<P> {
    pub fn new(predictor: P) -> Self {
        Self { predictor }
    }

    pub fn predictor(&self) -> &P {
        &self.predictor
    }

    pub async fn send(&self, pending: &PendingSubmission) -> SubmissionOutcome {
        tracing::info!(submission = pending.id, purpose = pending.purpose.as_str(), "requesting prediction");
        let outcome = self.predictor.predict(&pending.values).await;
        match &outcome {
            Ok(result) => tracing::info!(
                submission = pending.id,
                predicted_price = result.predicted_price,
                "prediction received"
            ),
            Err(err) => tracing::warn!(submission = pending.id, error = %err, "prediction failed"),
        }
        outcome
    }

    /// Sends and hands the snapshot back with the outcome, so the caller can
    /// hold the whole request as one future while other events are handled.
    pub async fn dispatch(&self, pending: PendingSubmission) -> (PendingSubmission, SubmissionOutcome) {
        let outcome = self.send(&pending).await;
        (pending, outcome)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use form_core::{FieldValues, PredictionResult};

    use super::{PredictionRequestError, Predictor};

    /// Replays canned outcomes and records every request.
    #[derive(Debug, Default)]
    pub struct ScriptedPredictor {
        outcomes: Mutex<Vec<Result<PredictionResult, PredictionRequestError>>>,
        pub requests: Mutex<Vec<FieldValues>>,
    }

    impl ScriptedPredictor {
        pub fn new(outcomes: Vec<Result<PredictionResult, PredictionRequestError>>) -> Self {
            let mut outcomes = outcomes;
            outcomes.reverse();
            Self {
                outcomes: Mutex::new(outcomes),
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl Predictor for ScriptedPredictor {
        async fn predict(
            &self,
            values: &FieldValues,
        ) -> Result<PredictionResult, PredictionRequestError> {
            self.requests.lock().unwrap().push(values.clone());
            self.outcomes
                .lock()
                .unwrap()
                .pop()
                .unwrap_or_else(|| Err(PredictionRequestError::Transport("no scripted outcome".into())))
        }
    }
}
