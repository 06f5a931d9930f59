//! Test fixtures and fake collaborators.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use chrono::{DateTime, TimeZone, Utc};

use spelling_practice_backend::models::NewWord;
use spelling_practice_backend::services::external::{
    AudioRef, AudioSpeed, Dictionary, SynthesisError, Synthesizer, WordDetails,
};

/// Fixed start of every test timeline.
pub fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 9, 2, 8, 0, 0).unwrap()
}

/// Words with spelling only.
pub fn new_words(words: &[&str]) -> Vec<NewWord> {
    words.iter().map(|w| NewWord::new(*w)).collect()
}

/// Synthesizer that records its calls and fails for chosen words.
#[derive(Default)]
pub struct FakeSynthesizer {
    failing: Mutex<HashSet<String>>,
    calls: Mutex<Vec<(String, AudioSpeed)>>,
}

impl FakeSynthesizer {
    pub fn fail_on(&self, word: &str) {
        self.failing.lock().unwrap().insert(word.to_string());
    }

    pub fn calls(&self) -> Vec<(String, AudioSpeed)> {
        self.calls.lock().unwrap().clone()
    }
}

impl Synthesizer for FakeSynthesizer {
    fn synthesize(&self, word: &str, speed: AudioSpeed) -> Result<AudioRef, SynthesisError> {
        self.calls.lock().unwrap().push((word.to_string(), speed));
        if self.failing.lock().unwrap().contains(word) {
            return Err(SynthesisError::Failed {
                word: word.to_string(),
                reason: "voice unavailable".to_string(),
            });
        }
        Ok(AudioRef(format!("audio/{}_{}.mp3", word, speed.as_str())))
    }
}

/// Dictionary backed by a mutable map.
#[derive(Default)]
pub struct FakeDictionary {
    entries: Mutex<HashMap<String, WordDetails>>,
}

impl FakeDictionary {
    pub fn insert(&self, word: &str, meaning: &str, example: &str) {
        self.entries.lock().unwrap().insert(
            word.to_string(),
            WordDetails {
                meaning: Some(meaning.to_string()),
                example: Some(example.to_string()),
                phonetic: None,
            },
        );
    }
}

impl Dictionary for FakeDictionary {
    fn lookup(&self, word: &str) -> Option<WordDetails> {
        self.entries.lock().unwrap().get(word).cloned()
    }
}
