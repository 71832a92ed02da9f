//! Selection & navigation state for the result list.
//!
//! The selected index ranges over `[0, len)` and wraps at both ends.
//! A new candidate list always resets the selection to the top, even if
//! the previously selected prompt is still present at another position.

/// Direction of a keyboard navigation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavDirection {
    Up,
    Down,
}

/// Tracks which result row is active.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    index: usize,
    len: usize,
}

impl Selection {
    pub fn new() -> Self {
        Selection::default()
    }

    /// The selected row, or `None` when the list is empty or the index
    /// has drifted out of range (renders as "nothing selected" rather
    /// than panicking).
    pub fn selected(&self) -> Option<usize> {
        if self.index < self.len {
            Some(self.index)
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Install a fresh candidate list. Selection unconditionally returns
    /// to the top; it never tries to follow the previously selected
    /// prompt to a new position.
    pub fn reset(&mut self, len: usize) {
        self.index = 0;
        self.len = len;
    }

    /// Move one step with wraparound. No-op on an empty list.
    pub fn move_selection(&mut self, direction: NavDirection) {
        if self.len == 0 {
            return;
        }
        self.index = match direction {
            NavDirection::Up => (self.index + self.len - 1) % self.len,
            NavDirection::Down => (self.index + 1) % self.len,
        };
    }

    /// Hover sets the index directly. Indices outside the rendered list
    /// are ignored.
    pub fn set_hovered(&mut self, index: usize) {
        if index < self.len {
            self.index = index;
        }
    }
}
