use super::RBTreeMultiset;
use crate::raw::RawTree;

impl<T> RBTreeMultiset<T> {
    /// Creates an empty multiset with capacity for at least `capacity`
    /// elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use ruby_tree::RBTreeMultiset;
    ///
    /// let multiset: RBTreeMultiset<i32> = RBTreeMultiset::with_capacity(32);
    /// assert!(multiset.is_empty());
    /// ```
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        RBTreeMultiset {
            raw: RawTree::with_capacity(capacity),
        }
    }

    /// Returns the current capacity for the multiset.
    ///
    /// # Examples
    ///
    /// ```
    /// use ruby_tree::RBTreeMultiset;
    ///
    /// let multiset: RBTreeMultiset<i32> = RBTreeMultiset::with_capacity(32);
    /// assert_eq!(multiset.capacity(), 32);
    /// ```
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }
}
