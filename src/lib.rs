//! Holiday Heart Spin - a daily gift-reveal advent calendar
//!
//! Core modules:
//! - `questions`: The fixed prompt pool and its forced-answered subset
//! - `persistence`: Key-value storage (LocalStorage on web, in-memory elsewhere)
//! - `reveal`: Daily reveal state machine (answered set, lock, memories)
//! - `calendar`: Calendar-day strings and advent date labels
//! - `settings`: Persisted user preferences
//! - `ui`: Text model for the page (labels, button state, wheel angle)

pub mod calendar;
pub mod persistence;
pub mod questions;
pub mod reveal;
pub mod settings;
pub mod ui;

pub use persistence::{MemoryStore, PersistedStore, StorageKeys};
pub use questions::{PoolError, QuestionPool};
pub use reveal::{IndexSource, Phase, RevealError, RevealStateManager, SeededIndexSource};
pub use settings::{KeyScheme, Settings};

/// Advent calendar constants
pub mod consts {
    /// Day of December the calendar starts on
    pub const START_DAY: u32 = 16;
    /// Number of days (one per prompt)
    pub const TOTAL_DAYS: u32 = 11;

    /// Default delay between committing a reveal and showing it
    pub const REVEAL_DELAY_MS: u32 = 3000;
    /// Full wheel turns before landing on the chosen slice
    pub const EXTRA_SPINS: u32 = 5;
    /// Upper bound for configured extra spins
    pub const MAX_EXTRA_SPINS: u32 = 20;
}
