use crate::TowerId;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LinkPlanError {
    #[error("{0}")]
    Validation(String),

    #[error("frequency mismatch: {a} is on {a_ghz} GHz, {b} is on {b_ghz} GHz")]
    FrequencyMismatch {
        a: TowerId,
        a_ghz: f64,
        b: TowerId,
        b_ghz: f64,
    },

    #[error("{a} and {b} are already linked")]
    DuplicateLink { a: TowerId, b: TowerId },

    #[error("waiting for a response to a pending prompt")]
    PromptPending,

    #[error("response does not match the pending prompt")]
    UnexpectedResponse,
}
