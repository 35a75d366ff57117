//! Two-state navigation: the course list or one course's detail.
//!
//! History entries are stored the way a host history API stores them, as
//! opaque state values. Moving back or forward re-derives the view from the
//! stored value, so a tampered or foreign entry degrades to `Home`.

use course_core::model::CourseId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The view a history entry points at.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "view", rename_all = "lowercase")]
pub enum NavEntry {
    Home,
    Course {
        #[serde(rename = "courseId")]
        course_id: CourseId,
    },
}

impl NavEntry {
    #[must_use]
    pub fn course(course_id: CourseId) -> Self {
        Self::Course { course_id }
    }

    /// Interpret a stored history state; anything unrecognized is `Home`.
    #[must_use]
    pub fn from_history_state(state: Option<&Value>) -> Self {
        state
            .and_then(|value| Self::deserialize(value).ok())
            .unwrap_or(Self::Home)
    }

    #[must_use]
    pub fn to_history_state(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// Linear history with a cursor, like a browser tab's session history.
#[derive(Clone, Debug, PartialEq)]
pub struct Navigation {
    entries: Vec<Value>,
    cursor: usize,
    current: NavEntry,
}

impl Navigation {
    #[must_use]
    pub fn new(initial: NavEntry) -> Self {
        Self {
            entries: vec![initial.to_history_state()],
            cursor: 0,
            current: initial,
        }
    }

    #[must_use]
    pub fn current(&self) -> &NavEntry {
        &self.current
    }

    /// Navigate to `entry`, dropping any forward entries.
    pub fn push(&mut self, entry: NavEntry) {
        tracing::debug!(?entry, "navigate");
        self.entries.truncate(self.cursor + 1);
        self.entries.push(entry.to_history_state());
        self.cursor = self.entries.len() - 1;
        self.current = entry;
    }

    /// Step back one entry. Returns `false` at the start of history.
    pub fn back(&mut self) -> bool {
        if !self.can_go_back() {
            return false;
        }
        self.cursor -= 1;
        self.restore();
        true
    }

    /// Step forward one entry. Returns `false` at the end of history.
    pub fn forward(&mut self) -> bool {
        if !self.can_go_forward() {
            return false;
        }
        self.cursor += 1;
        self.restore();
        true
    }

    #[must_use]
    pub fn can_go_back(&self) -> bool {
        self.cursor > 0
    }

    #[must_use]
    pub fn can_go_forward(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    fn restore(&mut self) {
        self.current = NavEntry::from_history_state(self.entries.get(self.cursor));
        tracing::debug!(entry = ?self.current, "restored history entry");
    }
}

impl Default for Navigation {
    fn default() -> Self {
        Self::new(NavEntry::Home)
    }
}
