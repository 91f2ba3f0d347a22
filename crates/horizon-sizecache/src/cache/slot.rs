//! Cached measurement values.

/// A measured layout size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    /// Create a new size.
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Zero size.
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    /// Check if the size has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

impl From<(f32, f32)> for Size {
    fn from((width, height): (f32, f32)) -> Self {
        Self { width, height }
    }
}

/// The cache entry for one `(section, item)` position.
///
/// `None` means "not yet computed or invalidated". A slot has no identity of
/// its own: it describes whatever item currently sits at its position.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Slot {
    value: Option<Size>,
}

impl Slot {
    /// An empty slot.
    pub const EMPTY: Self = Self { value: None };

    /// Returns the cached size, if any.
    #[inline]
    pub fn value(&self) -> Option<Size> {
        self.value
    }

    /// Replaces the cached size.
    #[inline]
    pub fn set(&mut self, value: Option<Size>) {
        self.value = value;
    }

    /// Forgets the cached size. Returns `true` if there was one.
    #[inline]
    pub fn clear(&mut self) -> bool {
        self.value.take().is_some()
    }

    /// Returns `true` if the slot holds a size.
    #[inline]
    pub fn is_cached(&self) -> bool {
        self.value.is_some()
    }
}
