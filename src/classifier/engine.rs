use std::collections::HashMap;
use std::sync::Arc;

use crate::category::{Category, ClassificationResult, OfferCategory, MODEL_CATEGORIES};

use super::keywords::TRUSTED_FINANCIAL_SENDERS;
use super::model::{
    absorb_failure, confident_argmax, derived_spam_score, ProbabilityModel, MAX_SEQUENCE_LENGTH,
};
use super::normalize::normalize;
use super::rules::RuleClassifier;
use super::vocab::Vocabulary;

/// Model spam score above which a message is spam outright.
const SPAM_SCORE_HIGH: f32 = 0.7;
/// Model spam score below which a message is clean outright. Scores in the
/// ambiguous band between the two thresholds fall through to the rules.
const SPAM_SCORE_LOW: f32 = 0.3;

/// The classification engine: arbitrates between the model and the rule
/// classifier and produces the final verdict per message.
///
/// Construct one instance at process start via [`Classifier::builder`] and
/// share it by reference; the vocabulary and keyword tables are immutable
/// after construction and every classification call is independent, so
/// concurrent use needs no synchronization.
pub struct Classifier {
    vocab: Arc<Vocabulary>,
    rules: RuleClassifier,
    model: Option<Box<dyn ProbabilityModel>>,
}

// Compile-time verification of thread-safety
const _: () = {
    fn assert_send_sync<T: Send + Sync>() {}
    fn verify_thread_safety() {
        assert_send_sync::<Classifier>();
    }
};

impl std::fmt::Debug for Classifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Classifier")
            .field("vocab_size", &self.vocab.len())
            .field("model_loaded", &self.model.is_some())
            .finish()
    }
}

impl Classifier {
    /// Creates a new builder for fluent construction.
    pub fn builder() -> super::builder::EngineBuilder {
        super::builder::EngineBuilder::new()
    }

    pub(crate) fn from_parts(
        vocab: Arc<Vocabulary>,
        model: Option<Box<dyn ProbabilityModel>>,
    ) -> Classifier {
        Classifier {
            vocab,
            rules: RuleClassifier::new(),
            model,
        }
    }

    /// Whether a model artifact was successfully loaded. `false` means the
    /// engine operates rule-only, which is a supported mode, not an error.
    pub fn model_loaded(&self) -> bool {
        self.model.is_some()
    }

    /// Returns information about the engine's current state.
    pub fn info(&self) -> super::EngineInfo {
        super::EngineInfo {
            vocab_size: self.vocab.len(),
            model_loaded: self.model.is_some(),
            max_sequence_length: MAX_SEQUENCE_LENGTH,
        }
    }

    /// Runs the full pipeline and returns the model's distribution over
    /// [`MODEL_CATEGORIES`], or `None` when no model is loaded or inference
    /// failed. Failures are logged and absorbed here; they never propagate.
    fn model_distribution(&self, body: &str) -> Option<Vec<f32>> {
        let model = self.model.as_deref()?;
        let normalized = normalize(body);
        let token_ids = absorb_failure(self.vocab.tokenize(&normalized, MAX_SEQUENCE_LENGTH))?;
        absorb_failure(model.probabilities(&token_ids))
    }

    /// The model's category verdict, or `None` meaning "defer to rules":
    /// no model, inference failure, or top probability at or below the
    /// confidence threshold.
    pub fn classify_with_model(&self, body: &str) -> Option<Category> {
        let probs = self.model_distribution(body)?;
        confident_argmax(&probs)
    }

    /// The model-derived spam likelihood, or `None` when no distribution is
    /// available.
    pub fn spam_score(&self, body: &str) -> Option<f32> {
        let probs = self.model_distribution(body)?;
        Some(derived_spam_score(&probs))
    }

    /// Final category decision: a confident model verdict wins, otherwise
    /// the rule classifier decides. The sender does not influence the
    /// category; it participates in the spam decision only.
    pub fn classify_message(&self, body: &str, _sender: &str) -> Category {
        if let Some(category) = self.classify_with_model(body) {
            return category;
        }
        self.rules.classify(body)
    }

    /// Final spam decision.
    ///
    /// Trusted financial senders are never spam, regardless of content.
    /// Otherwise a decisive model score settles it, the ambiguous band
    /// `[0.3, 0.7]` falls through to the rule verdict, and with no model
    /// score at all the rules decide directly.
    pub fn is_spam(&self, body: &str, sender: &str) -> bool {
        if Self::is_trusted_sender(sender) {
            return false;
        }

        match self.spam_score(body) {
            Some(score) if score > SPAM_SCORE_HIGH => true,
            Some(score) if score < SPAM_SCORE_LOW => false,
            Some(_) => self.rules.is_spam(body),
            None => self.rules.is_spam(body),
        }
    }

    fn is_trusted_sender(sender: &str) -> bool {
        let lowered = sender.to_lowercase();
        TRUSTED_FINANCIAL_SENDERS
            .iter()
            .any(|fragment| lowered.contains(fragment))
    }

    /// Secondary classification for offer and coupon messages.
    pub fn offer_subcategory(&self, body: &str) -> OfferCategory {
        self.rules.offer_subcategory(body)
    }

    /// Classifies one message end to end and returns the full verdict.
    ///
    /// When the model produced a distribution it is included as the
    /// per-category confidence map; the values form a probability simplex.
    pub fn classify(&self, body: &str, sender: &str) -> ClassificationResult {
        let distribution = self.model_distribution(body);

        let category = distribution
            .as_deref()
            .and_then(confident_argmax)
            .unwrap_or_else(|| self.rules.classify(body));

        let is_spam = if Self::is_trusted_sender(sender) {
            false
        } else {
            match distribution.as_deref().map(derived_spam_score) {
                Some(score) if score > SPAM_SCORE_HIGH => true,
                Some(score) if score < SPAM_SCORE_LOW => false,
                _ => self.rules.is_spam(body),
            }
        };

        let confidence_scores = distribution.map(|probs| {
            MODEL_CATEGORIES
                .iter()
                .copied()
                .zip(probs)
                .collect::<HashMap<Category, f32>>()
        });

        ClassificationResult {
            category,
            confidence_scores,
            is_spam,
            is_important: category.is_important(),
        }
    }
}
