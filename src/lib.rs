//! An offline, deterministic SMS classification engine.
//!
//! Messages are assigned one of a fixed set of categories plus spam and
//! importance labels. Two classifiers cooperate: a pretrained probability
//! model served through ONNX Runtime, and a deterministic keyword/pattern
//! rule set that acts as fallback and tiebreak. The engine never performs
//! network calls and degrades gracefully: with no model artifact it runs
//! rule-only.
//!
//! # Basic Usage
//!
//! ```rust
//! use textriage::{Category, Classifier};
//!
//! let engine = Classifier::builder().rule_only().build();
//!
//! let result = engine.classify("Your OTP is 482916, do not share it", "VM-ACMEBK");
//! assert_eq!(result.category, Category::Otp);
//! assert!(result.is_important);
//! assert!(!result.is_spam);
//! ```
//!
//! # Thread Safety
//!
//! The engine is `Send + Sync`; build it once at process start and share it
//! across threads with `Arc`:
//!
//! ```rust
//! use std::sync::Arc;
//! use std::thread;
//! use textriage::Classifier;
//!
//! let engine = Arc::new(Classifier::builder().rule_only().build());
//!
//! let handles: Vec<_> = (0..3)
//!     .map(|_| {
//!         let engine = Arc::clone(&engine);
//!         thread::spawn(move || engine.classify("hey, lunch today?", "FRIEND"))
//!     })
//!     .collect();
//!
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//! ```

pub mod artifacts;
mod category;
pub mod classifier;
mod runtime;

pub use artifacts::{ArtifactError, ArtifactStore};
pub use category::{Category, ClassificationResult, OfferCategory, MODEL_CATEGORIES};
pub use classifier::{
    Classifier, ClassifierError, EngineBuilder, EngineInfo, OnnxModel, ProbabilityModel,
    RuleClassifier, Vocabulary, CONFIDENCE_THRESHOLD, MAX_SEQUENCE_LENGTH,
};
pub use runtime::{create_session_builder, OptLevel, RuntimeConfig};

pub fn init_logger() {
    env_logger::init();
}
