use std::fmt;

/// Represents the different types of errors that can occur in the engine.
#[derive(Debug)]
pub enum ClassifierError {
    /// Tokenizer/vocabulary used before it was loaded. This is a programming
    /// error and should not occur in the normal flow.
    NotInitialized,
    /// Model artifact missing or structurally invalid. Expected and
    /// non-fatal, the engine operates rule-only.
    ModelUnavailable(String),
    /// Runtime error during model execution. Always absorbed by the model
    /// layer and surfaced to the arbiter as an absent result.
    InferenceFailure(String),
}

impl fmt::Display for ClassifierError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotInitialized => write!(f, "Tokenizer used before vocabulary was loaded"),
            Self::ModelUnavailable(msg) => write!(f, "Model unavailable: {}", msg),
            Self::InferenceFailure(msg) => write!(f, "Inference failure: {}", msg),
        }
    }
}

impl std::error::Error for ClassifierError {}

impl From<ort::Error> for ClassifierError {
    fn from(err: ort::Error) -> Self {
        ClassifierError::InferenceFailure(err.to_string())
    }
}
