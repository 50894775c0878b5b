//! Daily reveal state machine
//!
//! Tracks which prompts have been revealed, locks further reveals until the
//! next calendar day and keeps the set of saved memories. Everything is
//! mirrored into a `PersistedStore` so a reload picks up where it left off.
//!
//! A reveal commits immediately: the answered set, the lock and the last
//! reveal date are written before the page shows the prompt. The page calls
//! `finish_reveal` once its display delay runs out. Leaving mid-delay still
//! uses up the day.

use chrono::NaiveDate;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use thiserror::Error;

use crate::calendar::day_string;
use crate::persistence::{PersistedStore, StorageKeys, load_list, save_list};
use crate::questions::QuestionPool;

/// Why a reveal was refused. None of these change any state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RevealError {
    #[error("already revealed today's prompt")]
    Locked,
    #[error("every prompt has been revealed")]
    Empty,
    #[error("a reveal is already in progress")]
    InProgress,
}

/// Where the page stands for today
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Today's prompt has been revealed
    Locked,
    /// A reveal is available
    UnlockedWithRemaining,
    /// Nothing left to reveal (terminal)
    UnlockedExhausted,
}

/// Picks an index in `0..len` (`len` is never zero)
pub trait IndexSource {
    fn pick(&mut self, len: usize) -> usize;
}

impl<F: FnMut(usize) -> usize> IndexSource for F {
    fn pick(&mut self, len: usize) -> usize {
        self(len)
    }
}

/// Uniform picks from a seeded PCG stream
#[derive(Debug, Clone)]
pub struct SeededIndexSource {
    rng: Pcg32,
}

impl SeededIndexSource {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }
}

impl IndexSource for SeededIndexSource {
    fn pick(&mut self, len: usize) -> usize {
        self.rng.random_range(0..len)
    }
}

/// Reveal state backed by a persisted store
pub struct RevealStateManager<S, R = SeededIndexSource> {
    pool: QuestionPool,
    store: S,
    source: R,
    keys: StorageKeys,
    /// Unanswered prompts in pool order
    remaining: Vec<String>,
    /// Answered prompts in reveal order
    answered: Vec<String>,
    /// Saved memories in save order
    memories: Vec<String>,
    last_reveal_date: Option<String>,
    locked: bool,
    day: usize,
    /// Prompt committed by the latest reveal this session
    revealed: Option<String>,
    /// Slot in `remaining` the latest reveal landed on
    last_slot: Option<usize>,
    in_progress: bool,
}

impl<S: PersistedStore, R: IndexSource> RevealStateManager<S, R> {
    /// Create a manager using the standard storage keys.
    ///
    /// Nothing is loaded until `initialize` is called.
    pub fn new(pool: QuestionPool, store: S, source: R) -> Self {
        Self::with_keys(pool, store, source, StorageKeys::STANDARD)
    }

    pub fn with_keys(pool: QuestionPool, store: S, source: R, keys: StorageKeys) -> Self {
        Self {
            pool,
            store,
            source,
            keys,
            remaining: Vec::new(),
            answered: Vec::new(),
            memories: Vec::new(),
            last_reveal_date: None,
            locked: false,
            day: 1,
            revealed: None,
            last_slot: None,
            in_progress: false,
        }
    }

    /// Load and reconcile persisted state for `today`
    pub fn initialize(&mut self, today: NaiveDate) {
        let mut answered = dedup(load_list(&self.store, self.keys.answered));
        let stored = answered.len();
        answered.retain(|p| self.pool.contains(p));
        if answered.len() != stored {
            log::warn!("Dropped {} answered entries not in the pool", stored - answered.len());
        }
        for prompt in self.pool.forced() {
            if !answered.contains(prompt) {
                answered.push(prompt.clone());
            }
        }
        save_list(&mut self.store, self.keys.answered, &answered);

        self.remaining = self.pool.remaining(&answered);
        self.day = answered.len() + 1;
        self.answered = answered;

        // Forced prompts count as saved memories too
        let mut memories = dedup(load_list(&self.store, self.keys.memories));
        for prompt in self.pool.forced() {
            if !memories.contains(prompt) {
                memories.push(prompt.clone());
            }
        }
        save_list(&mut self.store, self.keys.memories, &memories);
        self.memories = memories;

        self.last_reveal_date = self.store.get_item(self.keys.last_reveal_date);
        self.refresh_lock(today);

        self.revealed = None;
        self.last_slot = None;
        self.in_progress = false;

        log::info!(
            "Loaded day {} ({} answered, {} remaining, {} memories, {:?})",
            self.day,
            self.answered.len(),
            self.remaining.len(),
            self.memories.len(),
            self.phase()
        );
    }

    /// Draw and commit today's prompt
    pub fn reveal(&mut self, today: NaiveDate) -> Result<String, RevealError> {
        if self.in_progress {
            log::debug!("Reveal ignored: already in progress");
            return Err(RevealError::InProgress);
        }
        if self.remaining.is_empty() {
            return Err(RevealError::Empty);
        }
        self.refresh_lock(today);
        if self.locked {
            return Err(RevealError::Locked);
        }

        let len = self.remaining.len();
        let slot = self.source.pick(len).min(len - 1);
        let chosen = self.remaining.remove(slot);

        self.answered.push(chosen.clone());
        self.locked = true;
        let date = day_string(today);
        self.store.set_item(self.keys.last_reveal_date, &date);
        self.last_reveal_date = Some(date);
        save_list(&mut self.store, self.keys.answered, &self.answered);
        self.day = self.answered.len() + 1;

        self.revealed = Some(chosen.clone());
        self.last_slot = Some(slot);
        self.in_progress = true;

        log::info!(
            "Revealed slot {} of {} ({} remaining)",
            slot,
            len,
            self.remaining.len()
        );
        Ok(chosen)
    }

    /// Recompute the daily lock for `today`. Returns true if it changed.
    pub fn refresh_lock(&mut self, today: NaiveDate) -> bool {
        let locked = self.last_reveal_date.as_deref() == Some(day_string(today).as_str());
        let changed = locked != self.locked;
        self.locked = locked;
        if changed && !locked {
            log::info!("New day, reveal unlocked");
        }
        changed
    }

    /// End the display delay; returns the prompt now on screen
    pub fn finish_reveal(&mut self) -> Option<&str> {
        if !self.in_progress {
            return None;
        }
        self.in_progress = false;
        self.revealed.as_deref()
    }

    /// Save the prompt on screen as a memory.
    ///
    /// False when nothing is on screen, `prompt` is not the one shown, or it is already saved.
    pub fn save_memory(&mut self, prompt: &str) -> bool {
        if self.displayed() != Some(prompt) {
            return false;
        }
        if self.memories.iter().any(|m| m == prompt) {
            log::debug!("Memory already saved");
            return false;
        }
        self.memories.push(prompt.to_string());
        save_list(&mut self.store, self.keys.memories, &self.memories);
        log::info!("Memory saved ({} total)", self.memories.len());
        true
    }

    /// Save the prompt currently on screen
    pub fn save_revealed(&mut self) -> bool {
        match self.displayed().map(str::to_string) {
            Some(prompt) => self.save_memory(&prompt),
            None => false,
        }
    }

    /// Exhausted wins over the lock: nothing is left to unlock.
    pub fn phase(&self) -> Phase {
        if self.remaining.is_empty() {
            Phase::UnlockedExhausted
        } else if self.locked {
            Phase::Locked
        } else {
            Phase::UnlockedWithRemaining
        }
    }

    pub fn can_reveal(&self) -> bool {
        !self.in_progress && self.phase() == Phase::UnlockedWithRemaining
    }

    /// Prompt on screen (hidden while a reveal is in progress)
    pub fn displayed(&self) -> Option<&str> {
        if self.in_progress {
            None
        } else {
            self.revealed.as_deref()
        }
    }

    pub fn revealed(&self) -> Option<&str> {
        self.revealed.as_deref()
    }

    pub fn is_revealing(&self) -> bool {
        self.in_progress
    }

    pub fn last_slot(&self) -> Option<usize> {
        self.last_slot
    }

    pub fn remaining(&self) -> &[String] {
        &self.remaining
    }

    pub fn answered(&self) -> &[String] {
        &self.answered
    }

    pub fn memories(&self) -> &[String] {
        &self.memories
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn day(&self) -> usize {
        self.day
    }

    pub fn last_reveal_date(&self) -> Option<&str> {
        self.last_reveal_date.as_deref()
    }

    pub fn pool(&self) -> &QuestionPool {
        &self.pool
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

/// Drop repeated entries, keeping first occurrences
fn dedup(list: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(list.len());
    for item in list {
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}
