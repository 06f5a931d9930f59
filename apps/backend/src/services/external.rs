//! External collaborators: audio synthesis and dictionary lookup.
//!
//! Both are blocking calls behind traits. The async helpers here run them on
//! the blocking thread pool.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Playback speed of a synthesized prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioSpeed {
    Slow,
    Normal,
}

impl Default for AudioSpeed {
    fn default() -> Self {
        Self::Normal
    }
}

impl AudioSpeed {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Slow => "slow",
            Self::Normal => "normal",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "slow" => Some(Self::Slow),
            "normal" => Some(Self::Normal),
            _ => None,
        }
    }
}

/// Opaque handle to synthesized audio (a path or URL)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioRef(pub String);

#[derive(Debug, Error)]
pub enum SynthesisError {
    #[error("could not synthesize '{word}': {reason}")]
    Failed { word: String, reason: String },
}

/// Text-to-speech backend
pub trait Synthesizer: Send + Sync {
    fn synthesize(&self, word: &str, speed: AudioSpeed) -> Result<AudioRef, SynthesisError>;
}

/// Dictionary details for a word
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordDetails {
    pub meaning: Option<String>,
    pub example: Option<String>,
    pub phonetic: Option<String>,
}

/// Dictionary backend. `None` means the word is unknown or the lookup failed.
pub trait Dictionary: Send + Sync {
    fn lookup(&self, word: &str) -> Option<WordDetails>;
}

/// Synthesize on the blocking pool
pub async fn synthesize(
    synthesizer: Arc<dyn Synthesizer>,
    word: String,
    speed: AudioSpeed,
) -> Result<AudioRef, SynthesisError> {
    let target = word.clone();
    tokio::task::spawn_blocking(move || synthesizer.synthesize(&target, speed))
        .await
        .unwrap_or_else(|e| {
            Err(SynthesisError::Failed {
                word,
                reason: e.to_string(),
            })
        })
}

/// Look up details on the blocking pool
pub async fn lookup_details(dictionary: Arc<dyn Dictionary>, word: String) -> Option<WordDetails> {
    match tokio::task::spawn_blocking(move || dictionary.lookup(&word)).await {
        Ok(details) => details,
        Err(e) => {
            tracing::warn!("Dictionary lookup task failed: {}", e);
            None
        }
    }
}
