//! Ports - trait boundaries isolating the agent's external collaborators.
//!
//! The workflow engine consumes these interfaces only; concrete
//! implementations live in `adapters`.

mod evaluation_client;
mod model_client;

pub use evaluation_client::{
    EvaluationClient, EvaluationError, Submission, SubmissionReceipt, SubmittedAnswer,
};
pub use model_client::{GenerateRequest, ModelClient, ModelError, ModelReply};
