use form_core::PredictionResult;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParsePredictionError {
    #[error("response is not a prediction object: {0}")]
    InvalidJson(String),
    #[error("predicted_price must be a finite number")]
    InvalidPrice,
    #[error("confidence_interval must hold exactly two finite numbers")]
    InvalidConfidenceInterval,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

impl NumberOrText {
    fn to_finite(&self) -> Option<f64> {
        let value = match self {
            Self::Number(value) => *value,
            Self::Text(text) => text.trim().parse().ok()?,
        };
        value.is_finite().then_some(value)
    }
}

#[derive(Debug, Deserialize)]
struct PredictionPayload {
    predicted_price: NumberOrText,
    confidence_interval: Vec<f64>,
    #[serde(default)]
    realtor_url: Option<String>,
    #[serde(default)]
    recommendations: Vec<String>,
}

pub fn parse_prediction_payload(payload: &str) -> Result<PredictionResult, ParsePredictionError> {
    let payload: PredictionPayload = serde_json::from_str(payload)
        .map_err(|err| ParsePredictionError::InvalidJson(err.to_string()))?;

    let predicted_price = payload
        .predicted_price
        .to_finite()
        .ok_or(ParsePredictionError::InvalidPrice)?;

    let confidence_interval = match payload.confidence_interval.as_slice() {
        [low, high] if low.is_finite() && high.is_finite() => (*low, *high),
        _ => return Err(ParsePredictionError::InvalidConfidenceInterval),
    };

    Ok(PredictionResult {
        predicted_price,
        confidence_interval,
        realtor_url: payload
            .realtor_url
            .map(|url| url.trim().to_owned())
            .filter(|url| !url.is_empty()),
        recommendations: payload.recommendations,
    })
}
