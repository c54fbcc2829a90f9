use super::domain::SpendInput;

/// How many edits back an interactive session can travel.
pub const UNDO_CAPACITY: usize = 20;

/// Bounded undo/redo trail for interactive spend editing.
///
/// The engine itself is stateless; whoever drives it owns one of these and
/// hands over a snapshot of the inputs before applying each edit.
#[derive(Debug, Clone)]
pub struct UndoHistory {
    undo: Vec<SpendInput>,
    redo: Vec<SpendInput>,
    capacity: usize,
}

impl UndoHistory {
    pub fn new() -> Self {
        Self::with_capacity(UNDO_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            undo: Vec::new(),
            redo: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    /// Remembers the state as it was before an edit. Starts a fresh timeline,
    /// so any redo steps are dropped; the oldest snapshot falls off once the
    /// trail is full.
    pub fn record(&mut self, snapshot: SpendInput) {
        self.undo.push(snapshot);
        if self.undo.len() > self.capacity {
            self.undo.remove(0);
        }
        self.redo.clear();
    }

    /// Steps back once, parking `current` on the redo trail.
    pub fn undo(&mut self, current: SpendInput) -> Option<SpendInput> {
        let previous = self.undo.pop()?;
        self.redo.push(current);
        Some(previous)
    }

    /// Replays one undone step, parking `current` back on the undo trail.
    pub fn redo(&mut self, current: SpendInput) -> Option<SpendInput> {
        let next = self.redo.pop()?;
        self.undo.push(current);
        Some(next)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }
}

impl Default for UndoHistory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(total: f64) -> SpendInput {
        SpendInput::new(total, 0.0, 0.0, 0.0)
    }

    #[test]
    fn undo_returns_snapshots_newest_first() {
        let mut history = UndoHistory::new();
        history.record(snapshot(1000.0));
        history.record(snapshot(2000.0));

        assert_eq!(history.undo(snapshot(3000.0)), Some(snapshot(2000.0)));
        assert_eq!(history.undo(snapshot(2000.0)), Some(snapshot(1000.0)));
        assert_eq!(history.undo(snapshot(1000.0)), None);
    }

    #[test]
    fn redo_replays_what_undo_parked() {
        let mut history = UndoHistory::new();
        history.record(snapshot(1000.0));

        let previous = history.undo(snapshot(2000.0)).expect("one step back");
        assert_eq!(previous, snapshot(1000.0));
        assert!(history.can_redo());

        assert_eq!(history.redo(previous), Some(snapshot(2000.0)));
        assert!(history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn recording_clears_the_redo_trail() {
        let mut history = UndoHistory::new();
        history.record(snapshot(1000.0));
        history.undo(snapshot(2000.0));
        assert!(history.can_redo());

        history.record(snapshot(1500.0));
        assert!(!history.can_redo());
    }

    #[test]
    fn trail_is_bounded_and_evicts_oldest() {
        let mut history = UndoHistory::with_capacity(3);
        for step in 0..5 {
            history.record(snapshot(step as f64));
        }

        assert_eq!(history.undo(snapshot(99.0)), Some(snapshot(4.0)));
        assert_eq!(history.undo(snapshot(4.0)), Some(snapshot(3.0)));
        assert_eq!(history.undo(snapshot(3.0)), Some(snapshot(2.0)));
        // Snapshots 0 and 1 were evicted by the cap.
        assert_eq!(history.undo(snapshot(2.0)), None);
    }
}
