use core::borrow::Borrow;
use core::fmt;
use core::iter::FusedIterator;
use core::ptr;

use crate::Error;
use crate::raw::{Handle, RawAvlTree, Spine};

mod capacity;
mod print;

pub use print::Pretty;

/// An ordered set based on an AVL tree.
///
/// Every node records its balance factor, `height(left) - height(right)`, and the tree
/// rotates after each insert and remove so that every factor stays within `-1..=1`.
/// Lookups, inserts and removes are therefore O(log n) in the worst case.
///
/// The tree is a *set*: inserting a key equal to one already present leaves the tree
/// untouched.
///
/// It is a logic error for a key to be modified in such a way that its ordering relative
/// to any other key, as determined by the [`Ord`] trait, changes while it is in the tree.
/// This is normally only possible through [`Cell`], [`RefCell`], global state, I/O, or
/// unsafe code. The behavior resulting from such a logic error is not specified, but will
/// be encapsulated to the `AvlTree` that observed the logic error and not result in
/// undefined behavior.
///
/// [`Cell`]: core::cell::Cell
/// [`RefCell`]: core::cell::RefCell
///
/// # Examples
///
/// ```
/// use avl_tree::AvlTree;
///
/// let mut tree = AvlTree::new();
///
/// tree.insert(10);
/// tree.insert(20);
/// tree.insert(5);
/// tree.insert(15);
///
/// // Duplicates are ignored.
/// assert!(!tree.insert(5));
/// assert_eq!(tree.len(), 4);
///
/// tree.remove(&20);
/// assert!(tree.find(&20).is_none());
///
/// for key in &tree {
///     println!("{key}");
/// }
/// ```
///
/// An `AvlTree` with a known list of keys can be initialized from an array:
///
/// ```
/// use avl_tree::AvlTree;
///
/// let tree = AvlTree::from([2, 1, 6, 4, 3, 5, 7]);
/// assert_eq!(tree.height(), 3);
/// ```
pub struct AvlTree<T> {
    raw: RawAvlTree<T>,
}

/// A handle to a node found in an [`AvlTree`].
///
/// This `struct` is created by the [`find`] method on [`AvlTree`]. It borrows the tree, so
/// the node it refers to cannot be moved or removed while the handle is alive.
///
/// # Examples
///
/// ```
/// use avl_tree::AvlTree;
///
/// let tree = AvlTree::from([1, 2, 3]);
/// let root = tree.find(&2).unwrap();
/// assert_eq!(root.left().map(|n| *n.key()), Some(1));
/// assert_eq!(root.right().map(|n| *n.key()), Some(3));
/// assert_eq!(root.balance_factor(), 0);
/// ```
///
/// [`find`]: AvlTree::find
pub struct NodeRef<'a, T> {
    tree: &'a RawAvlTree<T>,
    handle: Handle,
}

/// An in-order cursor over the keys of an [`AvlTree`].
///
/// This `struct` is created by the [`iter`] and [`end`] methods on [`AvlTree`]. Besides
/// being an [`Iterator`], it can be driven by hand: [`current`] peeks at the key the
/// cursor sits on, [`advance`] steps past it and [`reset`] rewinds to the smallest key.
///
/// The cursor keeps an explicit stack of ancestors whose keys are still to come, so each
/// step is amortized O(1) and the whole walk needs O(height) memory.
///
/// The cursor borrows the tree. Inserting, removing or clearing while a cursor is alive
/// is rejected at compile time.
///
/// Two exhausted cursors always compare equal, so `it == tree.end()` tests for the end.
/// Two live cursors compare equal only when they sit on the same node of the same tree.
/// Comparing positions alone would make cursors over different trees, or at different
/// keys, equal.
///
/// # Examples
///
/// ```
/// use avl_tree::{AvlTree, Error};
///
/// let tree = AvlTree::from([5, 3, 8]);
/// let mut it = tree.iter();
///
/// assert_eq!(it.current(), Some(&3));
/// it.advance()?.advance()?;
/// assert_eq!(it.current(), Some(&8));
/// it.advance()?;
///
/// assert_eq!(it, tree.end());
/// assert_eq!(it.advance().err(), Some(Error::OutOfRange));
///
/// it.reset();
/// assert_eq!(it.collect::<Vec<_>>(), [&3, &5, &8]);
/// # Ok::<(), Error>(())
/// ```
///
/// [`iter`]: AvlTree::iter
/// [`end`]: AvlTree::end
/// [`current`]: Iter::current
/// [`advance`]: Iter::advance
/// [`reset`]: Iter::reset
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, T: 'a> {
    tree: Option<&'a RawAvlTree<T>>,
    root: Option<Handle>,
    stack: Spine,
    remaining: usize,
}

impl<T> AvlTree<T> {
    /// Makes a new, empty `AvlTree`.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_tree::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    ///
    /// // keys can now be inserted into the empty tree
    /// tree.insert(1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn new() -> AvlTree<T> {
        AvlTree {
            raw: RawAvlTree::new(),
        }
    }

    /// Returns the number of keys in the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_tree::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// assert_eq!(tree.len(), 0);
    /// tree.insert(1);
    /// assert_eq!(tree.len(), 1);
    /// ```
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the tree contains no keys.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Returns the height of the tree: 0 when empty, 1 for a single key.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_tree::AvlTree;
    ///
    /// // Sorted input would degenerate a plain BST into a list.
    /// let tree: AvlTree<_> = (0..1000).collect();
    /// assert_eq!(tree.height(), 10);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn height(&self) -> usize {
        usize::from(self.raw.height(self.raw.root()))
    }

    /// Clears the tree, removing all keys.
    ///
    /// Nodes are released bottom-up: every key is dropped after the keys in its
    /// subtrees.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_tree::AvlTree;
    ///
    /// let mut tree = AvlTree::from([1, 2, 3]);
    /// tree.clear();
    /// assert!(tree.is_empty());
    /// assert_eq!(tree.iter(), tree.end());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Returns a handle to the node holding a key equal to `key`, or `None`.
    ///
    /// The key may be any borrowed form of the tree's key type, but the ordering on the
    /// borrowed form *must* match the ordering on the key type.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_tree::AvlTree;
    ///
    /// let tree = AvlTree::from([10, 5, 15]);
    /// assert_eq!(tree.find(&5).map(|node| *node.key()), Some(5));
    /// assert!(tree.find(&25).is_none());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn find<Q>(&self, key: &Q) -> Option<NodeRef<'_, T>>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.find(key).map(|handle| NodeRef {
            tree: &self.raw,
            handle,
        })
    }

    /// Returns a handle to the root node, or `None` if the tree is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_tree::AvlTree;
    ///
    /// let tree = AvlTree::from([5, 4, 1, 2]);
    /// let root = tree.root().unwrap();
    /// assert_eq!(*root.key(), 4);
    /// assert_eq!(root.height(), tree.height());
    /// ```
    #[must_use]
    pub fn root(&self) -> Option<NodeRef<'_, T>> {
        self.raw.root().map(|handle| NodeRef {
            tree: &self.raw,
            handle,
        })
    }

    /// Returns `true` if the tree contains a key equal to `key`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.find(key).is_some()
    }

    /// Returns a reference to the stored key equal to `key`, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_tree::AvlTree;
    ///
    /// let tree = AvlTree::from([String::from("a"), String::from("b")]);
    /// assert_eq!(tree.get("b").map(String::as_str), Some("b"));
    /// assert_eq!(tree.get("c"), None);
    /// ```
    pub fn get<Q>(&self, key: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.find(key).map(|node| node.key())
    }

    /// Returns the stored balance factor of the node holding `key`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the tree has no key equal to `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_tree::{AvlTree, Error};
    ///
    /// let tree = AvlTree::from([10, 20, 5, 15]);
    /// assert_eq!(tree.balance_factor(&10), Ok(-1));
    /// assert_eq!(tree.balance_factor(&20), Ok(1));
    /// assert_eq!(tree.balance_factor(&7), Err(Error::NotFound));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn balance_factor<Q>(&self, key: &Q) -> Result<i8, Error>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let node = self.find(key).ok_or(Error::NotFound)?;
        Ok(Self::node_balance_factor(Some(node)))
    }

    /// Returns the balance factor stored in `node`, or 0 for an absent node.
    ///
    /// The factor is read as stored, not recomputed.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_tree::AvlTree;
    ///
    /// let tree = AvlTree::from([2, 1]);
    /// assert_eq!(AvlTree::node_balance_factor(tree.find(&2)), 1);
    /// assert_eq!(AvlTree::node_balance_factor(tree.find(&3)), 0);
    /// ```
    #[must_use]
    pub fn node_balance_factor(node: Option<NodeRef<'_, T>>) -> i8 {
        node.map_or(0, |node| node.balance_factor())
    }

    /// Returns a reference to the smallest key in the tree, if any.
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        let root = self.raw.root()?;
        Some(self.raw.node(self.raw.leftmost(root)).key())
    }

    /// Returns a reference to the largest key in the tree, if any.
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        let root = self.raw.root()?;
        Some(self.raw.node(self.raw.rightmost(root)).key())
    }

    /// Removes the key equal to `key` from the tree and returns it.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_tree::AvlTree;
    ///
    /// let mut tree = AvlTree::from([1, 2, 3]);
    /// assert_eq!(tree.take(&2), Some(2));
    /// assert_eq!(tree.take(&2), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn take<Q>(&mut self, key: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.remove(key)
    }

    /// Removes the key equal to `key` from the tree. Returns whether such a key
    /// was present.
    ///
    /// A node with two children keeps its place in the tree: it takes over the key
    /// of its in-order successor, whose node is released instead. Removing an absent
    /// key leaves the tree exactly as it was.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_tree::AvlTree;
    ///
    /// let mut tree = AvlTree::from([10, 20, 5, 15]);
    /// assert!(tree.remove(&10));
    /// assert!(!tree.remove(&100));
    /// assert_eq!(tree.to_string(), "5 15 20");
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.take(key).is_some()
    }

    /// Gets an in-order cursor positioned on the smallest key.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_tree::AvlTree;
    ///
    /// let tree = AvlTree::from([3, 1, 2]);
    /// let mut iter = tree.iter();
    /// assert_eq!(iter.next(), Some(&1));
    /// assert_eq!(iter.next(), Some(&2));
    /// assert_eq!(iter.next(), Some(&3));
    /// assert_eq!(iter.next(), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n) to create the iterator; each step is amortized O(1).
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.raw, self.raw.root())
    }

    /// Gets the exhausted cursor that every finished iteration compares equal to.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_tree::AvlTree;
    ///
    /// let tree = AvlTree::from([1]);
    /// let mut it = tree.iter();
    /// assert_ne!(it, tree.end());
    /// it.next();
    /// assert_eq!(it, tree.end());
    /// ```
    pub fn end(&self) -> Iter<'_, T> {
        Iter::new(&self.raw, None)
    }
}

impl<T: Ord> AvlTree<T> {
    /// Adds a key to the tree.
    ///
    /// Returns whether the key was newly inserted. That is:
    ///
    /// - If the tree did not previously contain an equal key, `true` is returned.
    /// - If the tree already contained an equal key, `false` is returned, and the
    ///   tree is not modified: the stored key is kept and `key` is dropped.
    ///
    /// At most one single or double rotation fires, at the lowest ancestor that the
    /// new leaf unbalanced.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_tree::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    ///
    /// assert_eq!(tree.insert(2), true);
    /// assert_eq!(tree.insert(2), false);
    /// assert_eq!(tree.len(), 1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn insert(&mut self, key: T) -> bool {
        self.raw.insert(key)
    }
}

impl<'a, T> NodeRef<'a, T> {
    /// Returns the key stored in this node.
    #[must_use]
    pub fn key(&self) -> &'a T {
        self.tree.node(self.handle).key()
    }

    /// Returns the stored balance factor, `height(left) - height(right)`.
    #[must_use]
    pub fn balance_factor(&self) -> i8 {
        self.tree.node(self.handle).balance_factor()
    }

    /// Returns the height of the subtree rooted at this node; a leaf has height 1.
    #[must_use]
    pub fn height(&self) -> usize {
        usize::from(self.tree.node(self.handle).height())
    }

    /// Returns the left child, if any.
    #[must_use]
    pub fn left(&self) -> Option<NodeRef<'a, T>> {
        self.child(self.tree.node(self.handle).left())
    }

    /// Returns the right child, if any.
    #[must_use]
    pub fn right(&self) -> Option<NodeRef<'a, T>> {
        self.child(self.tree.node(self.handle).right())
    }

    fn child(&self, handle: Option<Handle>) -> Option<NodeRef<'a, T>> {
        handle.map(|handle| NodeRef {
            tree: self.tree,
            handle,
        })
    }
}

impl<'a, T> Iter<'a, T> {
    fn new(tree: &'a RawAvlTree<T>, root: Option<Handle>) -> Self {
        let mut iter = Iter {
            tree: Some(tree),
            root,
            stack: Spine::new(),
            remaining: 0,
        };
        iter.reset();
        iter
    }

    /// Returns `true` while the cursor is positioned on a key.
    #[must_use]
    pub fn has_next(&self) -> bool {
        !self.stack.is_empty()
    }

    /// Returns the key the cursor is positioned on without moving it.
    #[must_use]
    pub fn current(&self) -> Option<&'a T> {
        let tree = self.tree?;
        let &handle = self.stack.last()?;
        Some(tree.node(handle).key())
    }

    /// Moves the cursor past its current key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if the cursor is already exhausted.
    pub fn advance(&mut self) -> Result<&mut Self, Error> {
        self.pop().ok_or(Error::OutOfRange)?;
        Ok(self)
    }

    /// Rewinds the cursor to the smallest key of the tree it was created from.
    pub fn reset(&mut self) {
        self.stack.clear();
        self.remaining = 0;
        if let Some(tree) = self.tree {
            tree.push_left_spine(self.root, &mut self.stack);
            if self.root.is_some() {
                self.remaining = tree.len();
            }
        }
    }

    fn pop(&mut self) -> Option<&'a T> {
        let tree = self.tree?;
        let handle = self.stack.pop()?;
        let node = tree.node(handle);
        tree.push_left_spine(node.right(), &mut self.stack);
        self.remaining -= 1;
        Some(node.key())
    }
}

impl<T: Clone> Clone for AvlTree<T> {
    fn clone(&self) -> Self {
        AvlTree {
            raw: self.raw.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for AvlTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T> Default for AvlTree<T> {
    /// Creates an empty `AvlTree`.
    fn default() -> AvlTree<T> {
        AvlTree::new()
    }
}

impl<T: PartialEq> PartialEq for AvlTree<T> {
    /// Trees are equal when they hold the same keys; their shapes may differ.
    fn eq(&self, other: &AvlTree<T>) -> bool {
        self.len() == other.len() && Iterator::eq(self.iter(), other.iter())
    }
}

impl<T: Eq> Eq for AvlTree<T> {}

impl<T: Ord> FromIterator<T> for AvlTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> AvlTree<T> {
        let mut tree = AvlTree::new();
        tree.extend(iter);
        tree
    }
}

impl<T: Ord> Extend<T> for AvlTree<T> {
    #[inline]
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        iter.into_iter().for_each(move |key| {
            self.insert(key);
        });
    }
}

impl<'a, T: 'a + Ord + Copy> Extend<&'a T> for AvlTree<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T: Ord, const N: usize> From<[T; N]> for AvlTree<T> {
    fn from(arr: [T; N]) -> Self {
        AvlTree::from_iter(arr)
    }
}

impl<'a, T> IntoIterator for &'a AvlTree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<T> Clone for NodeRef<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for NodeRef<'_, T> {}

impl<T> PartialEq for NodeRef<'_, T> {
    /// Handles are equal when they refer to the same node of the same tree.
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.tree, other.tree) && self.handle == other.handle
    }
}

impl<T> Eq for NodeRef<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for NodeRef<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("key", self.key())
            .field("balance_factor", &self.balance_factor())
            .field("height", &self.height())
            .finish()
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        self.pop()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> PartialEq for Iter<'_, T> {
    /// Exhausted cursors are all equal, whatever tree they came from. Live cursors
    /// are equal when they sit on the same node of the same tree.
    fn eq(&self, other: &Self) -> bool {
        match (self.stack.last(), other.stack.last()) {
            (None, None) => true,
            (Some(a), Some(b)) => a == b && matches!((self.tree, other.tree), (Some(x), Some(y)) if ptr::eq(x, y)),
            _ => false,
        }
    }
}

impl<T> Eq for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter {
            tree: self.tree,
            root: self.root,
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<T> Default for Iter<'_, T> {
    /// Creates an exhausted `avl::Iter`.
    ///
    /// ```
    /// use avl_tree::avl;
    ///
    /// let iter: avl::Iter<'_, u8> = Default::default();
    /// assert_eq!(iter.len(), 0);
    /// ```
    fn default() -> Self {
        Iter {
            tree: None,
            root: None,
            stack: Spine::new(),
            remaining: 0,
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn iter_len_tracks_progress() {
        let tree = AvlTree::from([4, 2, 6, 1, 3]);
        let mut iter = tree.iter();
        assert_eq!(iter.len(), 5);
        iter.next();
        iter.next();
        assert_eq!(iter.len(), 3);
        iter.reset();
        assert_eq!(iter.len(), 5);
        assert_eq!(tree.end().len(), 0);
    }

    #[test]
    fn iter_stack_holds_left_spine() {
        let tree = AvlTree::from([4, 2, 6, 1, 3]);
        let iter = tree.iter();
        let spine: Vec<_> = iter.stack.iter().map(|&handle| *tree.raw.node(handle).key()).collect();
        assert_eq!(spine, [4, 2, 1]);
    }

    #[test]
    fn default_iter_equals_end_of_any_tree() {
        let a = AvlTree::from([1, 2]);
        let b: AvlTree<i32> = AvlTree::new();
        let empty = Iter::default();
        assert_eq!(empty, a.end());
        assert_eq!(b.iter(), a.end());
        assert_ne!(a.iter(), empty);
        assert_eq!(empty.current(), None);
    }

    #[test]
    fn live_iterators_compare_by_position() {
        let tree = AvlTree::from([1, 2, 3]);
        let other = tree.clone();
        let mut a = tree.iter();
        let b = tree.iter();
        assert_eq!(a, b);
        assert_ne!(a, other.iter());
        a.next();
        assert_ne!(a, b);
    }

    #[test]
    fn node_ref_identity() {
        let tree = AvlTree::from([1, 2, 3]);
        let root = tree.find(&2).unwrap();
        assert_eq!(root.left(), tree.find(&1));
        assert_ne!(root.right(), tree.find(&1));
    }
}
