use std::path::PathBuf;
use std::sync::Arc;

use log::{info, warn};

use crate::artifacts::ArtifactStore;
use crate::runtime::RuntimeConfig;

use super::engine::Classifier;
use super::model::{OnnxModel, ProbabilityModel};
use super::vocab::Vocabulary;

/// A builder for constructing a [`Classifier`] with a fluent interface.
///
/// Construction never fails: a missing or unreadable vocabulary falls back
/// to the deterministic built-in table, and a missing or invalid model
/// artifact leaves the engine in rule-only mode. Both degradations are
/// logged. Initialization is idempotent; build as many engines as you like,
/// the process-wide runtime init happens once.
pub struct EngineBuilder {
    model_path: Option<PathBuf>,
    vocab_path: Option<PathBuf>,
    backend: Option<Box<dyn ProbabilityModel>>,
    model_enabled: bool,
    runtime_config: RuntimeConfig,
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EngineBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineBuilder")
            .field("model_path", &self.model_path)
            .field("vocab_path", &self.vocab_path)
            .field("custom_backend", &self.backend.is_some())
            .field("model_enabled", &self.model_enabled)
            .finish()
    }
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self {
            model_path: None,
            vocab_path: None,
            backend: None,
            model_enabled: true,
            runtime_config: RuntimeConfig::default(),
        }
    }

    /// Sets an explicit model artifact path.
    pub fn with_model_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.model_path = Some(path.into());
        self
    }

    /// Sets an explicit vocabulary file path.
    pub fn with_vocab_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.vocab_path = Some(path.into());
        self
    }

    /// Points both artifact paths at an [`ArtifactStore`].
    pub fn with_artifact_store(mut self, store: &ArtifactStore) -> Self {
        self.model_path = Some(store.model_path());
        self.vocab_path = Some(store.vocab_path());
        self
    }

    /// Substitutes a custom inference backend. Intended for embedders that
    /// bring their own model runtime, and used by the test suite to inject
    /// deterministic fakes.
    pub fn with_backend(mut self, backend: Box<dyn ProbabilityModel>) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Disables model inference entirely; the engine will classify with
    /// rules alone.
    pub fn rule_only(mut self) -> Self {
        self.model_enabled = false;
        self
    }

    /// Sets the runtime configuration for model execution.
    pub fn with_runtime_config(mut self, config: RuntimeConfig) -> Self {
        self.runtime_config = config;
        self
    }

    fn load_vocabulary(&self) -> Vocabulary {
        if let Some(path) = &self.vocab_path {
            match Vocabulary::from_file(path) {
                Ok(vocab) if !vocab.is_empty() => return vocab,
                Ok(_) => {
                    warn!("vocabulary at {:?} is empty, using built-in fallback", path)
                }
                Err(e) => warn!(
                    "failed to load vocabulary from {:?} ({}), using built-in fallback",
                    path, e
                ),
            }
        }
        Vocabulary::builtin()
    }

    fn load_model(&mut self) -> Option<Box<dyn ProbabilityModel>> {
        if !self.model_enabled {
            info!("model inference disabled, engine is rule-only");
            return None;
        }
        if let Some(backend) = self.backend.take() {
            return Some(backend);
        }
        let path = self.model_path.clone()?;
        match OnnxModel::load(&path, &self.runtime_config) {
            Ok(model) => Some(Box::new(model)),
            Err(e) => {
                warn!("{}; engine is rule-only", e);
                None
            }
        }
    }

    /// Builds the engine. Infallible by design: classification must never
    /// error out the surrounding application, so every load failure
    /// degrades to a weaker but working configuration.
    pub fn build(mut self) -> Classifier {
        let vocab = Arc::new(self.load_vocabulary());
        let model = self.load_model();
        info!(
            "engine ready: vocab_size={}, model_loaded={}",
            vocab.len(),
            model.is_some()
        );
        Classifier::from_parts(vocab, model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_artifacts_degrade_to_rule_only() {
        let engine = EngineBuilder::new()
            .with_model_file("/nonexistent/model.onnx")
            .with_vocab_file("/nonexistent/vocab.txt")
            .build();
        assert!(!engine.model_loaded());
        assert!(engine.info().vocab_size > 0);
    }

    #[test]
    fn rule_only_skips_model_loading() {
        let engine = EngineBuilder::new()
            .with_model_file("/nonexistent/model.onnx")
            .rule_only()
            .build();
        assert!(!engine.model_loaded());
    }

    #[test]
    fn no_paths_at_all_is_a_valid_engine() {
        let engine = EngineBuilder::new().build();
        let info = engine.info();
        assert!(!info.model_loaded);
        assert_eq!(info.max_sequence_length, 128);
    }
}
