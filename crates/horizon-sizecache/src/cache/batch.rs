//! Batch bracket bookkeeping.

/// Outcome of closing a batch bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchEnd {
    /// The outermost bracket closed; no batch is in progress any more.
    Outermost,
    /// An inner bracket closed; the enclosing batch is still open.
    Nested,
    /// `end` was called with no open bracket. Nothing changed.
    Unbalanced,
}

/// Nesting counter for `begin_batch` / `end_batch` pairs.
///
/// Mutations are applied eagerly whatever the depth; the counter only tells
/// observers whether a multi-operation replay is mid-flight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchState {
    depth: usize,
}

impl BatchState {
    /// Creates a state with no open bracket.
    pub const fn new() -> Self {
        Self { depth: 0 }
    }

    /// Opens a bracket and returns `true` if it is the outermost one.
    pub fn begin(&mut self) -> bool {
        self.depth += 1;
        self.depth == 1
    }

    /// Closes the innermost bracket.
    pub fn end(&mut self) -> BatchEnd {
        match self.depth {
            0 => BatchEnd::Unbalanced,
            1 => {
                self.depth = 0;
                BatchEnd::Outermost
            }
            _ => {
                self.depth -= 1;
                BatchEnd::Nested
            }
        }
    }

    /// Returns the number of open brackets.
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Returns `true` while at least one bracket is open.
    #[inline]
    pub fn is_batching(&self) -> bool {
        self.depth > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nesting() {
        let mut state = BatchState::new();
        assert!(!state.is_batching());

        assert!(state.begin());
        assert!(!state.begin());
        assert_eq!(state.depth(), 2);

        assert_eq!(state.end(), BatchEnd::Nested);
        assert!(state.is_batching());
        assert_eq!(state.end(), BatchEnd::Outermost);
        assert!(!state.is_batching());
    }

    #[test]
    fn test_unbalanced_end_is_noop() {
        let mut state = BatchState::new();
        assert_eq!(state.end(), BatchEnd::Unbalanced);
        assert_eq!(state.depth(), 0);

        state.begin();
        assert_eq!(state.end(), BatchEnd::Outermost);
        assert_eq!(state.end(), BatchEnd::Unbalanced);
    }
}
