//! Prompt pool
//!
//! The ordered list of prompts is fixed at build time. A subset is "forced
//! answered": it counts as already revealed from the very first run.

use thiserror::Error;

/// The built-in holiday prompts, one per advent day.
pub const HOLIDAY_PROMPTS: [&str; 11] = [
    "What was the moment you realized you were falling for me?",
    "Invent ridiculous nicknames and use them all night.",
    "What’s one thing I do that instantly makes you feel loved?",
    "Put on one song and dance like no one’s watching.",
    "What makes our relationship feel different from any other you’ve had?",
    "Try to make each other laugh without touching.",
    "What’s your favorite funny or embarrassing moment we’ve shared?",
    "Write each other a love note—romantic, playful, or heartfelt. Read it out loud.",
    "What’s something new you’d love for us to try together someday?",
    "Cuddle and talk about your favorite moments together this year—slow, soft, and present.",
    "Why do you choose us—even on the hard days?",
];

/// Prompts treated as answered before the first reveal (yesterday's gift).
pub const HOLIDAY_FORCED: [&str; 1] = ["What’s one thing I do that instantly makes you feel loved?"];

/// Errors from building a pool
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PoolError {
    #[error("prompt pool is empty")]
    Empty,
    #[error("duplicate prompt in pool: {0}")]
    Duplicate(String),
    #[error("forced prompt is not in the pool: {0}")]
    UnknownForced(String),
}

/// Ordered, duplicate-free prompt list with its forced-answered subset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionPool {
    prompts: Vec<String>,
    forced: Vec<String>,
}

impl QuestionPool {
    /// Build a pool, rejecting duplicates and forced prompts outside the pool
    pub fn new<P, F>(prompts: P, forced: F) -> Result<Self, PoolError>
    where
        P: IntoIterator,
        P::Item: Into<String>,
        F: IntoIterator,
        F::Item: Into<String>,
    {
        let mut list: Vec<String> = Vec::new();
        for prompt in prompts {
            let prompt = prompt.into();
            if list.contains(&prompt) {
                return Err(PoolError::Duplicate(prompt));
            }
            list.push(prompt);
        }
        if list.is_empty() {
            return Err(PoolError::Empty);
        }

        let mut forced_list: Vec<String> = Vec::new();
        for prompt in forced {
            let prompt = prompt.into();
            if !list.contains(&prompt) {
                return Err(PoolError::UnknownForced(prompt));
            }
            if !forced_list.contains(&prompt) {
                forced_list.push(prompt);
            }
        }

        Ok(Self {
            prompts: list,
            forced: forced_list,
        })
    }

    /// The built-in holiday calendar
    pub fn holiday() -> Self {
        Self {
            prompts: HOLIDAY_PROMPTS.iter().map(|s| s.to_string()).collect(),
            forced: HOLIDAY_FORCED.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    pub fn forced(&self) -> &[String] {
        &self.forced
    }

    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }

    pub fn contains(&self, prompt: &str) -> bool {
        self.prompts.iter().any(|p| p == prompt)
    }

    /// Position of a prompt in pool order
    pub fn position(&self, prompt: &str) -> Option<usize> {
        self.prompts.iter().position(|p| p == prompt)
    }

    /// Pool entries not in `answered`, in pool order
    pub fn remaining(&self, answered: &[String]) -> Vec<String> {
        self.prompts
            .iter()
            .filter(|p| !answered.contains(p))
            .cloned()
            .collect()
    }
}

impl Default for QuestionPool {
    fn default() -> Self {
        Self::holiday()
    }
}
