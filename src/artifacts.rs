use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::debug;

/// File name of the serialized probability model inside the artifact dir.
pub const MODEL_FILE: &str = "model.onnx";
/// File name of the newline-delimited vocabulary table.
pub const VOCAB_FILE: &str = "vocab.txt";

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Artifact not found: {0}")]
    NotFound(PathBuf),
}

/// Resolves where the model and vocabulary artifacts live on disk.
///
/// The engine is fully offline: artifacts are deployed out of band and this
/// type only locates them. Absence of either file is an expected state, not
/// an error; the engine then runs rule-only.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    artifacts_dir: PathBuf,
}

impl ArtifactStore {
    /// Creates a store over the default artifact directory.
    pub fn new_default() -> io::Result<Self> {
        Self::new(Self::default_artifacts_dir())
    }

    /// Returns the default artifact directory path, first match wins:
    /// the `TEXTRIAGE_HOME` environment variable, the platform cache
    /// directory, `~/.cache`, and finally the system temp directory.
    pub fn default_artifacts_dir() -> PathBuf {
        if let Ok(path) = env::var("TEXTRIAGE_HOME") {
            return PathBuf::from(path).join("artifacts");
        }

        if let Some(cache_dir) = dirs::cache_dir() {
            return cache_dir.join("textriage").join("artifacts");
        }

        if let Some(home_dir) = dirs::home_dir() {
            return home_dir.join(".cache").join("textriage").join("artifacts");
        }

        env::temp_dir().join("textriage").join("artifacts")
    }

    pub fn new<P: AsRef<Path>>(artifacts_dir: P) -> io::Result<Self> {
        let artifacts_dir = artifacts_dir.as_ref().to_path_buf();
        fs::create_dir_all(&artifacts_dir)?;
        Ok(Self { artifacts_dir })
    }

    pub fn model_path(&self) -> PathBuf {
        self.artifacts_dir.join(MODEL_FILE)
    }

    pub fn vocab_path(&self) -> PathBuf {
        self.artifacts_dir.join(VOCAB_FILE)
    }

    pub fn has_model(&self) -> bool {
        let present = self.model_path().exists();
        debug!("model artifact at {:?}: present={}", self.model_path(), present);
        present
    }

    pub fn has_vocab(&self) -> bool {
        let present = self.vocab_path().exists();
        debug!("vocab artifact at {:?}: present={}", self.vocab_path(), present);
        present
    }

    /// Returns the vocabulary path, erroring when the file is missing.
    pub fn require_vocab(&self) -> Result<PathBuf, ArtifactError> {
        let path = self.vocab_path();
        if path.exists() {
            Ok(path)
        } else {
            Err(ArtifactError::NotFound(path))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_dir_honors_env_override() {
        env::set_var("TEXTRIAGE_HOME", "/tmp/textriage-test-home");
        let path = ArtifactStore::default_artifacts_dir();
        assert!(path
            .to_str()
            .unwrap()
            .contains("/tmp/textriage-test-home/artifacts"));
        env::remove_var("TEXTRIAGE_HOME");

        let path = ArtifactStore::default_artifacts_dir();
        assert!(path.to_str().unwrap().contains("textriage"));
    }

    #[test]
    fn missing_artifacts_are_reported_not_fatal() {
        let store = ArtifactStore::new("/tmp/textriage-test-empty").unwrap();
        let _ = std::fs::remove_file(store.model_path());
        let _ = std::fs::remove_file(store.vocab_path());
        assert!(!store.has_model());
        assert!(!store.has_vocab());
        assert!(store.require_vocab().is_err());
    }

    #[test]
    fn paths_join_expected_file_names() {
        let store = ArtifactStore::new("/tmp/textriage-test-paths").unwrap();
        assert!(store.model_path().ends_with(MODEL_FILE));
        assert!(store.vocab_path().ends_with(VOCAB_FILE));
    }
}
