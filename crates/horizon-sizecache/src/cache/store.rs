//! Nested ordered storage addressed by `(section, item)`.
//!
//! `SectionStore<T>` is a `Vec<Vec<T>>` with bounds-checked primitives. Every
//! primitive validates all of its indices before touching anything, so a
//! failed call leaves the store exactly as it was.

use crate::error::{Error, Result};
use crate::model::IndexPath;

/// Ordered sections of ordered elements.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionStore<T> {
    sections: Vec<Vec<T>>,
}

impl<T> Default for SectionStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<Vec<Vec<T>>> for SectionStore<T> {
    fn from(sections: Vec<Vec<T>>) -> Self {
        Self { sections }
    }
}

impl<T> SectionStore<T> {
    /// Creates a store with no sections.
    pub fn new() -> Self {
        Self {
            sections: Vec::new(),
        }
    }

    /// Creates a store whose section `i` holds `shape[i]` elements made by `fill`.
    pub fn with_shape<I, F>(shape: I, mut fill: F) -> Self
    where
        I: IntoIterator<Item = usize>,
        F: FnMut() -> T,
    {
        let sections = shape
            .into_iter()
            .map(|count| (0..count).map(|_| fill()).collect())
            .collect();
        Self { sections }
    }

    /// Returns the number of sections.
    #[inline]
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Returns the number of elements in `section`, or `None` if it does not exist.
    #[inline]
    pub fn item_count(&self, section: usize) -> Option<usize> {
        self.sections.get(section).map(Vec::len)
    }

    /// Returns the element count of every section, in order.
    pub fn shape(&self) -> Vec<usize> {
        self.sections.iter().map(Vec::len).collect()
    }

    /// Returns the number of elements across all sections.
    pub fn len(&self) -> usize {
        self.sections.iter().map(Vec::len).sum()
    }

    /// Returns `true` if no section holds any element.
    pub fn is_empty(&self) -> bool {
        self.sections.iter().all(Vec::is_empty)
    }

    /// Returns the element at `at`.
    #[inline]
    pub fn get(&self, at: IndexPath) -> Option<&T> {
        self.sections.get(at.section())?.get(at.item())
    }

    /// Returns the element at `at` mutably.
    #[inline]
    pub fn get_mut(&mut self, at: IndexPath) -> Option<&mut T> {
        self.sections.get_mut(at.section())?.get_mut(at.item())
    }

    /// Returns the element at `at`, or the range error describing why not.
    pub fn try_get_mut(&mut self, at: IndexPath) -> Result<&mut T> {
        let items = self.section_mut(at.section())?;
        let item_count = items.len();
        items
            .get_mut(at.item())
            .ok_or_else(|| Error::item_out_of_range(at.section(), at.item(), item_count))
    }

    /// Returns the elements of `section`.
    pub fn section(&self, section: usize) -> Option<&[T]> {
        self.sections.get(section).map(Vec::as_slice)
    }

    /// Returns the elements of `section` mutably. The length cannot change.
    pub fn section_slice_mut(&mut self, section: usize) -> Result<&mut [T]> {
        self.section_mut(section).map(Vec::as_mut_slice)
    }

    /// Iterates over every element with its position, section-major.
    pub fn iter(&self) -> impl Iterator<Item = (IndexPath, &T)> + '_ {
        self.sections.iter().enumerate().flat_map(|(section, items)| {
            items
                .iter()
                .enumerate()
                .map(move |(item, value)| (IndexPath::new(section, item), value))
        })
    }

    // -------------------------------------------------------------------------
    // Item primitives
    // -------------------------------------------------------------------------

    /// Inserts `value` at `at`, shifting later elements of the section up.
    ///
    /// `at.item()` may equal the section length (append).
    pub fn insert(&mut self, at: IndexPath, value: T) -> Result<()> {
        let items = self.section_mut(at.section())?;
        if at.item() > items.len() {
            return Err(Error::item_out_of_range(at.section(), at.item(), items.len()));
        }
        items.insert(at.item(), value);
        Ok(())
    }

    /// Removes and returns the element at `at`, shifting later elements down.
    pub fn remove(&mut self, at: IndexPath) -> Result<T> {
        let items = self.section_mut(at.section())?;
        if at.item() >= items.len() {
            return Err(Error::item_out_of_range(at.section(), at.item(), items.len()));
        }
        Ok(items.remove(at.item()))
    }

    /// Moves the element at `from` to `to`.
    ///
    /// The element is removed first; `to.item()` then indexes the destination
    /// section as it is after that removal. For a move within one section
    /// this means `to.item()` is the element's final index.
    pub fn move_item(&mut self, from: IndexPath, to: IndexPath) -> Result<()> {
        let source_len = self.section_len(from.section())?;
        if from.item() >= source_len {
            return Err(Error::item_out_of_range(from.section(), from.item(), source_len));
        }
        let dest_len = self.section_len(to.section())?;
        let dest_len = if from.is_same_section(&to) {
            dest_len - 1
        } else {
            dest_len
        };
        if to.item() > dest_len {
            return Err(Error::item_out_of_range(to.section(), to.item(), dest_len));
        }

        let value = self.sections[from.section()].remove(from.item());
        self.sections[to.section()].insert(to.item(), value);
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Section primitives
    // -------------------------------------------------------------------------

    /// Inserts a section holding `items` at `index`.
    ///
    /// `index` may equal the section count (append).
    pub fn insert_section(&mut self, index: usize, items: Vec<T>) -> Result<()> {
        if index > self.sections.len() {
            return Err(Error::section_out_of_range(index, self.sections.len()));
        }
        self.sections.insert(index, items);
        Ok(())
    }

    /// Removes the section at `index` and returns its elements.
    pub fn remove_section(&mut self, index: usize) -> Result<Vec<T>> {
        self.section_len(index)?;
        Ok(self.sections.remove(index))
    }

    fn section_len(&self, section: usize) -> Result<usize> {
        self.item_count(section)
            .ok_or_else(|| Error::section_out_of_range(section, self.sections.len()))
    }

    fn section_mut(&mut self, section: usize) -> Result<&mut Vec<T>> {
        let section_count = self.sections.len();
        self.sections
            .get_mut(section)
            .ok_or_else(|| Error::section_out_of_range(section, section_count))
    }
}
