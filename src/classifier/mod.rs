mod builder;
mod engine;
mod error;
pub mod keywords;
mod model;
mod normalize;
mod rules;
mod vocab;

pub use builder::EngineBuilder;
pub use engine::Classifier;
pub use error::ClassifierError;
pub use model::{
    OnnxModel, ProbabilityModel, CONFIDENCE_THRESHOLD, MAX_SEQUENCE_LENGTH,
};
pub use normalize::normalize;
pub use rules::RuleClassifier;
pub use vocab::{Vocabulary, PAD_ID, UNK_ID};

/// Information about the current state and configuration of an engine.
#[derive(Debug, Clone)]
pub struct EngineInfo {
    /// Number of tokens in the loaded vocabulary.
    pub vocab_size: usize,
    /// Whether a model artifact was loaded; `false` means rule-only mode.
    pub model_loaded: bool,
    /// Fixed id-sequence length fed to the model.
    pub max_sequence_length: usize,
}
