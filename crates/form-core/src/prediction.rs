use serde::{Deserialize, Serialize};

use crate::field::FieldValues;

pub const REALTOR_PRICE_BAND: f64 = 50_000.0;

#[derive(Debug, Clone, PartialEq)]
pub struct PredictionResult {
    pub predicted_price: f64,
    pub confidence_interval: (f64, f64),
    pub realtor_url: Option<String>,
    pub recommendations: Vec<String>,
}

impl PredictionResult {
    pub fn new(predicted_price: f64, confidence_interval: (f64, f64)) -> Self {
        Self {
            predicted_price,
            confidence_interval,
            realtor_url: None,
            recommendations: Vec::new(),
        }
    }
}

/// One completed prediction as stored in the history log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionRecord {
    #[serde(flatten)]
    pub values: FieldValues,
    pub predicted_price: String,
}

impl PredictionRecord {
    pub fn new(values: FieldValues, predicted_price: f64) -> Self {
        Self {
            values,
            predicted_price: format!("{predicted_price:.2}"),
        }
    }

    pub fn price(&self) -> Option<f64> {
        self.predicted_price.parse().ok()
    }
}

/// Realtor.com search for homes within the price band around `predicted_price`.
pub fn realtor_search_url(zipcode: &str, predicted_price: f64) -> String {
    let min_price = (predicted_price - REALTOR_PRICE_BAND).max(0.0).round();
    let max_price = (predicted_price + REALTOR_PRICE_BAND).round();
    format!(
        "https://www.realtor.com/realestateandhomes-search/{}/price-{min_price:.0}-{max_price:.0}",
        zipcode.trim()
    )
}
