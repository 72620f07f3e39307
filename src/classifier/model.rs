use std::collections::HashMap;
use std::path::Path;

use log::{info, warn};
use ndarray::Array2;
use ort::session::Session;
use ort::value::Tensor;

use crate::category::{Category, MODEL_CATEGORIES};
use crate::runtime::{create_session_builder, RuntimeConfig};

use super::error::ClassifierError;

/// Fixed input sequence length of the deployed model: `[1, MAX_SEQUENCE_LENGTH]`.
pub const MAX_SEQUENCE_LENGTH: usize = 128;
/// Number of output positions; must equal `MODEL_CATEGORIES.len()`.
pub const NUM_MODEL_CATEGORIES: usize = MODEL_CATEGORIES.len();

/// Minimum top-class probability for the model verdict to stand.
pub const CONFIDENCE_THRESHOLD: f32 = 0.5;

/// Produces a probability distribution over [`MODEL_CATEGORIES`] from a
/// token-id sequence.
///
/// This is the seam between the arbiter and the inference backend: the
/// production implementation is [`OnnxModel`], tests substitute a fake.
pub trait ProbabilityModel: Send + Sync {
    /// Runs inference over a `[1, MAX_SEQUENCE_LENGTH]` id sequence and
    /// returns the `NUM_MODEL_CATEGORIES` output probabilities.
    fn probabilities(&self, token_ids: &[i64]) -> Result<Vec<f32>, ClassifierError>;
}

/// The pretrained multi-class probability model, wrapped in an ONNX Runtime
/// session. The session is stateless across calls and safe for concurrent
/// use by reference.
pub struct OnnxModel {
    session: Session,
    input_name: String,
}

impl std::fmt::Debug for OnnxModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnnxModel")
            .field("input_name", &self.input_name)
            .finish_non_exhaustive()
    }
}

impl OnnxModel {
    /// Loads the model artifact and validates its structure.
    ///
    /// A missing or structurally wrong artifact yields
    /// [`ClassifierError::ModelUnavailable`]; callers treat that as "operate
    /// rule-only," not as a fatal error.
    pub fn load<P: AsRef<Path>>(
        path: P,
        config: &RuntimeConfig,
    ) -> Result<OnnxModel, ClassifierError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ClassifierError::ModelUnavailable(format!(
                "model file not found: {}",
                path.display()
            )));
        }

        let session = create_session_builder(config)
            .map_err(|e| ClassifierError::ModelUnavailable(e.to_string()))?
            .commit_from_file(path)
            .map_err(|e| ClassifierError::ModelUnavailable(e.to_string()))?;

        Self::validate_model(&session)?;
        let input_name = session.inputs[0].name.clone();
        info!("Model loaded from {} (input {:?})", path.display(), input_name);

        Ok(OnnxModel {
            session,
            input_name,
        })
    }

    /// Checks that the session has the single-input, single-output shape the
    /// engine expects. A mismatch means the artifact does not honor the
    /// deployment contract and the engine must fail safe.
    fn validate_model(session: &Session) -> Result<(), ClassifierError> {
        if session.inputs.len() != 1 {
            return Err(ClassifierError::ModelUnavailable(format!(
                "expected exactly 1 input tensor, found {}",
                session.inputs.len()
            )));
        }
        if session.outputs.is_empty() {
            return Err(ClassifierError::ModelUnavailable(
                "model has no output tensor".to_string(),
            ));
        }
        Ok(())
    }
}

impl ProbabilityModel for OnnxModel {
    fn probabilities(&self, token_ids: &[i64]) -> Result<Vec<f32>, ClassifierError> {
        if token_ids.len() != MAX_SEQUENCE_LENGTH {
            return Err(ClassifierError::InferenceFailure(format!(
                "expected {} token ids, got {}",
                MAX_SEQUENCE_LENGTH,
                token_ids.len()
            )));
        }

        let input_array = Array2::from_shape_vec((1, token_ids.len()), token_ids.to_vec())
            .map_err(|e| {
                ClassifierError::InferenceFailure(format!("failed to create input array: {}", e))
            })?;
        let input_dyn = input_array.into_dyn();
        let input_ids = input_dyn.as_standard_layout();

        let mut input_tensors = HashMap::new();
        input_tensors.insert(
            self.input_name.as_str(),
            Tensor::from_array(&input_ids).map_err(|e| {
                ClassifierError::InferenceFailure(format!("failed to create input tensor: {}", e))
            })?,
        );

        let outputs = self.session.run(input_tensors).map_err(|e| {
            ClassifierError::InferenceFailure(format!("failed to run model: {}", e))
        })?;
        let output_tensor = outputs[0].try_extract_tensor::<f32>().map_err(|e| {
            ClassifierError::InferenceFailure(format!("failed to extract output tensor: {}", e))
        })?;

        let probs: Vec<f32> = output_tensor.iter().copied().collect();
        if probs.len() != NUM_MODEL_CATEGORIES {
            return Err(ClassifierError::InferenceFailure(format!(
                "expected {} output probabilities, got {}",
                NUM_MODEL_CATEGORIES,
                probs.len()
            )));
        }
        Ok(probs)
    }
}

/// Picks the confident argmax category from a model distribution.
///
/// Returns `None` when the top probability does not exceed
/// [`CONFIDENCE_THRESHOLD`], which the arbiter reads as "defer to rules."
/// Exact ties resolve to the first index, so the lowest ordinal wins.
pub(crate) fn confident_argmax(probs: &[f32]) -> Option<Category> {
    let mut best_idx = 0usize;
    let mut best_prob = f32::MIN;
    for (i, &p) in probs.iter().enumerate() {
        if p > best_prob {
            best_prob = p;
            best_idx = i;
        }
    }
    if best_prob > CONFIDENCE_THRESHOLD {
        MODEL_CATEGORIES.get(best_idx).copied()
    } else {
        None
    }
}

/// Derives a spam likelihood from the category distribution.
///
/// The model has no spam output of its own; the score weights the
/// promotional mass: `P(Promotional) + 0.5 * P(Offer) + 0.3 * P(Coupon)`.
pub(crate) fn derived_spam_score(probs: &[f32]) -> f32 {
    let p_of = |cat: Category| {
        MODEL_CATEGORIES
            .iter()
            .position(|&c| c == cat)
            .and_then(|i| probs.get(i).copied())
            .unwrap_or(0.0)
    };
    p_of(Category::Promotional) + 0.5 * p_of(Category::Offer) + 0.3 * p_of(Category::Coupon)
}

/// Logs and discards a model-layer failure: the arbiter always has the rule
/// path, so inference errors must never propagate.
pub(crate) fn absorb_failure<T>(result: Result<T, ClassifierError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("model inference unavailable, deferring to rules: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argmax_requires_confidence() {
        let mut probs = vec![0.125f32; 8];
        assert_eq!(confident_argmax(&probs), None);

        probs = vec![0.0; 8];
        probs[1] = 0.9;
        probs[7] = 0.1;
        assert_eq!(confident_argmax(&probs), Some(Category::BankAlert));
    }

    #[test]
    fn argmax_at_exact_threshold_defers() {
        let probs = vec![0.5, 0.5, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0];
        assert_eq!(confident_argmax(&probs), None);
    }

    #[test]
    fn argmax_ties_resolve_to_lowest_ordinal() {
        let probs = vec![0.0, 0.51, 0.0, 0.0, 0.0, 0.51, 0.0, 0.0];
        // The scan keeps the first maximum it sees.
        assert_eq!(confident_argmax(&probs), Some(Category::BankAlert));
    }

    #[test]
    fn spam_score_weights_promotional_mass() {
        // Positions: [otp, bank, finance, offer, coupon, promotional,
        // personal, other].
        let probs = vec![0.0, 0.0, 0.0, 0.2, 0.1, 0.4, 0.1, 0.2];
        let score = derived_spam_score(&probs);
        assert!((score - (0.4 + 0.5 * 0.2 + 0.3 * 0.1)).abs() < 1e-6);
    }

    #[test]
    fn absorb_failure_converts_errors_to_none() {
        let ok: Result<u32, ClassifierError> = Ok(7);
        assert_eq!(absorb_failure(ok), Some(7));

        let err: Result<u32, ClassifierError> =
            Err(ClassifierError::InferenceFailure("boom".into()));
        assert_eq!(absorb_failure(err), None);
    }
}
