//! Tone selection for duplicate-day replies.

use rand::prelude::*;
use rand_pcg::Mcg128Xsl64;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    Playful,
    Annoyed,
    Tired,
}

impl Mood {
    pub const ALL: [Mood; 3] = [Mood::Playful, Mood::Annoyed, Mood::Tired];
}

/// Chooses a [`Mood`]. Any `FnMut() -> Mood` is a picker.
pub trait MoodPicker {
    fn pick(&mut self) -> Mood;
}

impl<F: FnMut() -> Mood> MoodPicker for F {
    fn pick(&mut self) -> Mood {
        self()
    }
}

/// Uniform choice over [`Mood::ALL`].
pub struct SeededMoodPicker {
    rng: Mcg128Xsl64,
}

impl SeededMoodPicker {
    /// Seeded for reproducible replies, or from entropy when `seed` is `None`.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => Mcg128Xsl64::seed_from_u64(seed),
            None => Mcg128Xsl64::from_entropy(),
        };
        Self { rng }
    }
}

impl MoodPicker for SeededMoodPicker {
    fn pick(&mut self) -> Mood {
        Mood::ALL[self.rng.gen_range(0..Mood::ALL.len())]
    }
}
