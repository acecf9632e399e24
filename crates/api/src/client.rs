use async_trait::async_trait;
use form_core::{FieldValues, PredictionResult};
use reqwest::Url;
use session::{PredictionRequestError, Predictor};

use crate::wire::parse_prediction_payload;

const USER_AGENT: &str = concat!("home-price-client/", env!("CARGO_PKG_VERSION"));

/// Posts the form as JSON to the prediction service root.
#[derive(Debug, Clone)]
pub struct HttpPredictor {
    http: reqwest::Client,
    endpoint: Url,
}

impl HttpPredictor {
    pub fn new(endpoint: Url) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { http, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl Predictor for HttpPredictor {
    async fn predict(
        &self,
        values: &FieldValues,
    ) -> Result<PredictionResult, PredictionRequestError> {
        let response = self
            .http
            .post(self.endpoint.clone())
            .json(values)
            .send()
            .await
            .map_err(|err| PredictionRequestError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(endpoint = %self.endpoint, %status, "prediction service rejected request");
            return Err(PredictionRequestError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|err| PredictionRequestError::Transport(err.to_string()))?;
        parse_prediction_payload(&body).map_err(|err| {
            tracing::debug!(endpoint = %self.endpoint, error = %err, body_len = body.len(), "unusable prediction payload");
            PredictionRequestError::MalformedResponse(err.to_string())
        })
    }
}
