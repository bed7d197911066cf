use thiserror::Error;

/// Error kinds for the LT codec core.
///
/// `DecodeIncomplete` is deliberately absent: a stalled decode is a normal
/// outcome (see [`crate::decoder::DecodeOutcome`]), not an error.
#[derive(Error, Debug)]
pub enum LtError {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("degree distribution does not sum to 1 (got {sum})")]
    Unnormalized { sum: f64 },

    #[error("decoder received zero symbols")]
    EmptyInput,
}

pub type Result<T, E = LtError> = std::result::Result<T, E>;
