mod client;
mod wire;

pub use client::HttpPredictor;
pub use wire::{parse_prediction_payload, ParsePredictionError};

pub fn module_ready() -> bool {
    true
}
