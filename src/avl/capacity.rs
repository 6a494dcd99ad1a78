use super::AvlTree;
use crate::raw::RawAvlTree;

impl<T> AvlTree<T> {
    /// Creates an empty tree with room for at least `capacity` nodes.
    ///
    /// Removed nodes free their slot for the next insert, so a tree whose size
    /// stays under `capacity` never reallocates.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_tree::AvlTree;
    ///
    /// let tree: AvlTree<i32> = AvlTree::with_capacity(16);
    /// assert!(tree.is_empty());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(capacity) for memory allocation.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        AvlTree {
            raw: RawAvlTree::with_capacity(capacity),
        }
    }

    /// Returns the number of nodes the tree can hold without reallocating.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_tree::AvlTree;
    ///
    /// let mut tree = AvlTree::with_capacity(32);
    /// assert!(tree.capacity() >= 32);
    ///
    /// for key in 0..32 {
    ///     tree.insert(key);
    /// }
    /// let capacity = tree.capacity();
    /// tree.remove(&7);
    /// tree.insert(100);
    /// assert_eq!(tree.capacity(), capacity);
    /// ```
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }
}
