//! Session-scoped rotation state.
//!
//! One instance per active chat session, owned by the caller and passed in
//! on every turn. Fields are private so the two invariants hold by
//! construction: the cursor never decreases and the exclusion set never
//! shrinks within a session.

use crate::text::normalize;
use std::collections::HashSet;

#[derive(Debug, Clone, Default)]
pub struct SessionState {
    cursor: usize,
    excluded: HashSet<String>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rotation cursor. Monotonic; callers read it modulo the pool size.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn advance(&mut self, steps: usize) {
        self.cursor = self.cursor.saturating_add(steps);
    }

    /// Item names already surfaced this session.
    pub fn excluded(&self) -> &HashSet<String> {
        &self.excluded
    }

    pub fn is_excluded(&self, name: &str) -> bool {
        self.excluded.contains(name)
    }

    pub fn exclude_all<I>(&mut self, names: I)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        for name in names {
            self.excluded.insert(name.into());
        }
    }
}

/// Detect "tell me more" continuations: short affirmative openers matched
/// as a whole-word prefix, case/accent-insensitive ("Sì, dimmi" counts,
/// "sito" does not). A continuation turn advances the cursor by two.
pub fn is_continuation(question: &str) -> bool {
    let q = normalize(question);
    let phrases = [
        "si", "ok", "va bene", "quali", "altri", "altro", "ancora", "poi", "dimmi", "cos'altro",
    ];
    phrases.iter().any(|p| {
        q == *p
            || (q.starts_with(p)
                && q[p.len()..].chars().next().is_some_and(|c| !c.is_alphanumeric()))
    })
}
