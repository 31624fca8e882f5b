//! User-defined shortcut table.
//!
//! Triggers are short ASCII strings matched literally against the trailing
//! lowercase run of the buffer; the longest trigger that is a suffix of the
//! run wins, and on a tie the most recently inserted one does. Insertion
//! order is part of the contract, so the table is a plain ordered list,
//! never a hash-only structure.

use serde::{Deserialize, Serialize};

pub const MAX_TRIGGER: usize = 32;
pub const MAX_REPLACEMENT: usize = 255;

/// One trigger → replacement pair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shortcut {
    pub trigger: String,
    pub replacement: String,
}

/// Insertion-ordered trigger table.
#[derive(Clone, Debug, Default)]
pub struct ShortcutTable {
    entries: Vec<Shortcut>,
}

impl ShortcutTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Shortcut> {
        self.entries.iter()
    }

    /// Insert or replace a trigger. Replacing refreshes its recency.
    ///
    /// Returns `false` (and leaves the table unchanged) for out-of-contract
    /// input: an empty or non-ASCII trigger, a trigger over 32 bytes, or a
    /// replacement over 255 scalars.
    pub fn insert(&mut self, trigger: &str, replacement: &str) -> bool {
        if trigger.is_empty() || trigger.len() > MAX_TRIGGER || !trigger.is_ascii() {
            return false;
        }
        if replacement.chars().count() > MAX_REPLACEMENT {
            return false;
        }
        let trigger = trigger.to_ascii_lowercase();
        self.entries.retain(|e| e.trigger != trigger);
        self.entries.push(Shortcut {
            trigger,
            replacement: replacement.to_string(),
        });
        true
    }

    pub fn remove(&mut self, trigger: &str) -> bool {
        let trigger = trigger.to_ascii_lowercase();
        let before = self.entries.len();
        self.entries.retain(|e| e.trigger != trigger);
        self.entries.len() != before
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Longest trigger that is a suffix of `run`; ties go to the most
    /// recently inserted entry. Returns the trigger length in characters and
    /// the replacement.
    pub fn match_suffix(&self, run: &str) -> Option<(usize, &str)> {
        let mut best: Option<(usize, usize)> = None;
        for (idx, entry) in self.entries.iter().enumerate() {
            if !run.ends_with(entry.trigger.as_str()) {
                continue;
            }
            let len = entry.trigger.len();
            match best {
                Some((best_len, _)) if best_len > len => {}
                _ => best = Some((len, idx)),
            }
        }
        best.map(|(len, idx)| (len, self.entries[idx].replacement.as_str()))
    }
}
