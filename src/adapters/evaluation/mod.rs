//! Evaluation service adapter.

mod http_client;

pub use http_client::{EvaluationConfig as HttpEvaluationConfig, HttpEvaluationClient};
