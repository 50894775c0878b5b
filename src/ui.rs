//! Text model for the page
//!
//! Everything the DOM shows is derived here so it can be tested without a browser.

use crate::calendar::unlock_date;
use crate::consts::TOTAL_DAYS;
use crate::persistence::PersistedStore;
use crate::reveal::{IndexSource, Phase, RevealStateManager};

/// Snapshot of the labels and button state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    pub day_label: String,
    pub unlock_label: String,
    pub button_label: &'static str,
    pub button_enabled: bool,
    /// Prompt on screen, if any
    pub revealed: Option<String>,
    pub memories: Vec<String>,
}

impl View {
    pub fn from_manager<S: PersistedStore, R: IndexSource>(m: &RevealStateManager<S, R>) -> Self {
        let day = m.day() as u32;
        let phase = m.phase();
        Self {
            day_label: day_label(day),
            unlock_label: unlock_label(day, !m.is_locked()),
            button_label: button_label(phase, m.is_revealing()),
            button_enabled: m.can_reveal(),
            revealed: m.displayed().map(str::to_string),
            memories: m.memories().to_vec(),
        }
    }
}

/// Day counter for display; stays on the last day once everything is opened
pub fn day_label(day: u32) -> String {
    format!("Day {} of {}", day.min(TOTAL_DAYS), TOTAL_DAYS)
}

pub fn unlock_label(day: u32, unlocked: bool) -> String {
    if unlocked {
        format!("Unlocked: Dec {}", unlock_date(day))
    } else {
        format!("Next unlock: Dec {}", unlock_date(day + 1))
    }
}

pub fn button_label(phase: Phase, revealing: bool) -> &'static str {
    if revealing {
        return "Opening…";
    }
    match phase {
        Phase::UnlockedWithRemaining => "Open Today’s Gift 🎄",
        Phase::Locked => "Come Back Tomorrow 🎅",
        Phase::UnlockedExhausted => "All Gifts Opened 🎁",
    }
}

/// Accumulated wheel angle (degrees)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Wheel {
    pub rotation: f32,
}

impl Wheel {
    /// Turn for a reveal landing on `slot` out of `pool_len` slices
    pub fn spin(&mut self, slot: usize, pool_len: usize, extra_spins: u32) -> f32 {
        let slice = 360.0 / pool_len.max(1) as f32;
        self.rotation += extra_spins as f32 * 360.0 + slot as f32 * slice;
        self.rotation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use crate::questions::QuestionPool;
    use chrono::NaiveDate;

    #[test]
    fn test_labels() {
        assert_eq!(day_label(2), "Day 2 of 11");
        assert_eq!(day_label(14), "Day 11 of 11");
        assert_eq!(unlock_label(2, true), "Unlocked: Dec 17");
        assert_eq!(unlock_label(2, false), "Next unlock: Dec 18");
        assert_eq!(button_label(Phase::Locked, true), "Opening…");
        assert_eq!(button_label(Phase::UnlockedExhausted, false), "All Gifts Opened 🎁");
    }

    #[test]
    fn test_view_through_a_reveal() {
        let today = NaiveDate::from_ymd_opt(2025, 12, 17).unwrap();
        let mut m = RevealStateManager::new(QuestionPool::holiday(), MemoryStore::new(), |_len: usize| 0);
        m.initialize(today);

        let view = View::from_manager(&m);
        assert_eq!(view.day_label, "Day 2 of 11");
        assert_eq!(view.unlock_label, "Unlocked: Dec 17");
        assert_eq!(view.button_label, "Open Today’s Gift 🎄");
        assert!(view.button_enabled);
        assert_eq!(view.revealed, None);
        assert_eq!(view.memories.len(), 1);

        let prompt = m.reveal(today).unwrap();
        let view = View::from_manager(&m);
        assert_eq!(view.button_label, "Opening…");
        assert!(!view.button_enabled);
        assert_eq!(view.revealed, None);

        m.finish_reveal();
        let view = View::from_manager(&m);
        assert_eq!(view.day_label, "Day 3 of 11");
        assert_eq!(view.unlock_label, "Next unlock: Dec 19");
        assert_eq!(view.button_label, "Come Back Tomorrow 🎅");
        assert_eq!(view.revealed, Some(prompt));
    }

    #[test]
    fn test_view_when_last_gift_opened() {
        let today = NaiveDate::from_ymd_opt(2025, 12, 26).unwrap();
        let mut store = MemoryStore::new();
        let opened: Vec<String> = QuestionPool::holiday().prompts()[..10].to_vec();
        crate::persistence::save_list(&mut store, "answered_questions", &opened);

        let mut m = RevealStateManager::new(QuestionPool::holiday(), store, |_len: usize| 0);
        m.initialize(today);
        m.reveal(today).unwrap();
        m.finish_reveal();

        let view = View::from_manager(&m);
        assert_eq!(m.day(), 12);
        assert_eq!(view.day_label, "Day 11 of 11");
        assert_eq!(view.button_label, "All Gifts Opened 🎁");
        assert!(!view.button_enabled);
        assert!(view.unlock_label.starts_with("Next unlock"));
    }

    #[test]
    fn test_wheel_accumulates() {
        let mut wheel = Wheel::default();
        assert_eq!(wheel.spin(0, 11, 5), 1800.0);
        let slice = 360.0 / 11.0;
        assert!((wheel.spin(2, 11, 5) - (3600.0 + 2.0 * slice)).abs() < 1e-3);
    }
}
