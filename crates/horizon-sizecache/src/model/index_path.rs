//! Two-level positions for addressing items in sectioned collections.
//!
//! An `IndexPath` is the only way a cache slot is addressed. It carries no
//! item identity: the same path refers to whatever item currently occupies
//! that position in the data source.

use std::fmt;

/// A `(section, item)` position within a sectioned collection.
///
/// # Index Validity
///
/// Index paths should be used immediately and not stored long-term. After
/// insertions, deletions, or moves, a stored path may address a different
/// item, or nothing at all.
///
/// # Ordering
///
/// Paths order section-major: every item of section 0 sorts before any item
/// of section 1.
///
/// # Example
///
/// ```
/// use horizon_sizecache::model::IndexPath;
///
/// let path = IndexPath::new(1, 4);
/// assert_eq!(path.section(), 1);
/// assert_eq!(path.item(), 4);
/// assert_eq!(path, IndexPath::from((1, 4)));
/// assert!(IndexPath::new(0, 9) < path);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct IndexPath {
    /// The section index. Declared first so the derived ordering is section-major.
    section: usize,
    /// The item index within the section.
    item: usize,
}

impl IndexPath {
    /// Creates a new index path.
    #[inline]
    pub const fn new(section: usize, item: usize) -> Self {
        Self { section, item }
    }

    /// Returns the section index.
    #[inline]
    pub const fn section(&self) -> usize {
        self.section
    }

    /// Returns the item index within the section.
    #[inline]
    pub const fn item(&self) -> usize {
        self.item
    }

    /// Returns `true` if both paths address the same section.
    #[inline]
    pub const fn is_same_section(&self, other: &IndexPath) -> bool {
        self.section == other.section
    }
}

impl From<(usize, usize)> for IndexPath {
    fn from((section, item): (usize, usize)) -> Self {
        Self::new(section, item)
    }
}

impl From<IndexPath> for (usize, usize) {
    fn from(path: IndexPath) -> Self {
        (path.section, path.item)
    }
}

impl fmt::Display for IndexPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.section, self.item)
    }
}
