//! Error types for the size cache.

use crate::model::ChangeKind;

/// Result type alias for cache operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading, mutating, or syncing a cache.
///
/// The variants fall into two classes:
///
/// - **Out of range** ([`Error::is_out_of_range`]): a section or item index
///   that is not currently present. Structural mutations that hit this leave
///   the cache untouched.
/// - **Shape mismatch** ([`Error::is_shape_mismatch`]): the cache and its data
///   source disagree on section or item counts. This is a contract violation
///   between the source and whoever replays its changes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The section index does not exist.
    #[error("section {section} out of range (section count {section_count})")]
    SectionOutOfRange { section: usize, section_count: usize },

    /// The item index does not exist within an existing section.
    #[error("item {item} out of range in section {section} (item count {item_count})")]
    ItemOutOfRange {
        section: usize,
        item: usize,
        item_count: usize,
    },

    /// The cache holds a different number of sections than the source.
    #[error("shape mismatch: cache has {cached} sections, source reports {reported}")]
    SectionCountMismatch { cached: usize, reported: usize },

    /// A cached section holds a different number of items than the source.
    #[error("shape mismatch: section {section} has {cached} items, source reports {reported}")]
    ItemCountMismatch {
        section: usize,
        cached: usize,
        reported: usize,
    },

    /// A change notification lacks the position its kind requires.
    #[error("malformed {kind:?} notification: {reason}")]
    MalformedNotification {
        kind: ChangeKind,
        reason: &'static str,
    },
}

impl Error {
    /// Create a section range error.
    pub fn section_out_of_range(section: usize, section_count: usize) -> Self {
        Self::SectionOutOfRange {
            section,
            section_count,
        }
    }

    /// Create an item range error.
    pub fn item_out_of_range(section: usize, item: usize, item_count: usize) -> Self {
        Self::ItemOutOfRange {
            section,
            item,
            item_count,
        }
    }

    /// Returns `true` for errors caused by an index that is not present.
    pub fn is_out_of_range(&self) -> bool {
        matches!(
            self,
            Self::SectionOutOfRange { .. } | Self::ItemOutOfRange { .. }
        )
    }

    /// Returns `true` for errors caused by the cache diverging from its source.
    pub fn is_shape_mismatch(&self) -> bool {
        matches!(
            self,
            Self::SectionCountMismatch { .. } | Self::ItemCountMismatch { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classes() {
        assert!(Error::section_out_of_range(3, 2).is_out_of_range());
        assert!(Error::item_out_of_range(0, 5, 5).is_out_of_range());
        assert!(!Error::item_out_of_range(0, 5, 5).is_shape_mismatch());

        let mismatch = Error::SectionCountMismatch {
            cached: 1,
            reported: 2,
        };
        assert!(mismatch.is_shape_mismatch());
        assert!(!mismatch.is_out_of_range());

        let malformed = Error::MalformedNotification {
            kind: ChangeKind::Insert,
            reason: "missing new position",
        };
        assert!(!malformed.is_out_of_range());
        assert!(!malformed.is_shape_mismatch());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            Error::item_out_of_range(1, 4, 2).to_string(),
            "item 4 out of range in section 1 (item count 2)"
        );
        assert_eq!(
            Error::ItemCountMismatch {
                section: 0,
                cached: 3,
                reported: 4
            }
            .to_string(),
            "shape mismatch: section 0 has 3 items, source reports 4"
        );
    }
}
