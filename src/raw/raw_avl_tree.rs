use core::borrow::Borrow;
use core::cmp::Ordering::{Equal, Greater, Less};

use smallvec::SmallVec;

use super::arena::Arena;
use super::handle::Handle;
use super::node::Node;

/// A stack of node handles along a root-to-leaf path.
///
/// An AVL tree of height 32 holds millions of keys, so the inline capacity
/// covers every realistic traversal without touching the heap.
pub(crate) type Spine = SmallVec<[Handle; 32]>;

/// The AVL tree behind `AvlTree`.
///
/// Nodes are stored in an arena and linked by handles. Every node exclusively
/// owns its children; rotations move child handles between nodes and never
/// copy a node.
#[derive(Clone)]
pub(crate) struct RawAvlTree<T> {
    /// Arena storing all tree nodes.
    nodes: Arena<Node<T>>,
    /// Handle to the root node, if the tree is non-empty.
    root: Option<Handle>,
}

impl<T> RawAvlTree<T> {
    /// Creates a new, empty tree.
    pub(crate) const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
        }
    }

    /// Creates a new tree with room for `capacity` nodes.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Returns the number of keys in the tree.
    pub(crate) const fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub(crate) const fn root(&self) -> Option<Handle> {
        self.root
    }

    /// Returns a reference to a node by handle.
    pub(crate) fn node(&self, handle: Handle) -> &Node<T> {
        self.nodes.get(handle)
    }

    /// Height of the subtree at `node`; an absent subtree has height 0.
    #[inline]
    pub(crate) fn height(&self, node: Option<Handle>) -> u8 {
        node.map_or(0, |handle| self.nodes.get(handle).height())
    }

    /// Recomputes the height and balance factor of `node` from its children.
    fn update_balance_factor(&mut self, node: Option<Handle>) {
        let Some(handle) = node else {
            return;
        };

        let current = self.nodes.get(handle);
        let left = self.height(current.left());
        let right = self.height(current.right());
        self.nodes.get_mut(handle).set_child_heights(left, right);
    }

    /// Rotates the subtree at `handle` to the right and returns its new root
    /// (the former left child).
    fn rotate_right(&mut self, handle: Handle) -> Handle {
        let pivot = self.nodes.get(handle).left().expect("`RawAvlTree::rotate_right()` - node has no left child!");
        let inner = self.nodes.get(pivot).right();

        self.nodes.get_mut(handle).set_left(inner);
        self.nodes.get_mut(pivot).set_right(Some(handle));

        // The old root is now the pivot's child, so it is updated first.
        self.update_balance_factor(Some(handle));
        self.update_balance_factor(Some(pivot));
        pivot
    }

    /// Mirror of [`rotate_right`](Self::rotate_right).
    fn rotate_left(&mut self, handle: Handle) -> Handle {
        let pivot = self.nodes.get(handle).right().expect("`RawAvlTree::rotate_left()` - node has no right child!");
        let inner = self.nodes.get(pivot).left();

        self.nodes.get_mut(handle).set_right(inner);
        self.nodes.get_mut(pivot).set_left(Some(handle));

        self.update_balance_factor(Some(handle));
        self.update_balance_factor(Some(pivot));
        pivot
    }

    /// Restores the AVL property at `handle` and returns the root of the subtree.
    ///
    /// Both children must already be balanced, which holds bottom-up after a
    /// single insert or remove.
    fn balance(&mut self, handle: Handle) -> Handle {
        self.update_balance_factor(Some(handle));
        let node = self.nodes.get(handle);

        if node.balance_factor() > 1 {
            let left = node.left().expect("`RawAvlTree::balance()` - left-heavy node has no left child!");
            let left_node = self.nodes.get(left);
            // Equal heights take the single rotation.
            if self.height(left_node.left()) < self.height(left_node.right()) {
                let pivot = self.rotate_left(left);
                self.nodes.get_mut(handle).set_left(Some(pivot));
            }
            self.rotate_right(handle)
        } else if node.balance_factor() < -1 {
            let right = node.right().expect("`RawAvlTree::balance()` - right-heavy node has no right child!");
            let right_node = self.nodes.get(right);
            if self.height(right_node.right()) < self.height(right_node.left()) {
                let pivot = self.rotate_right(right);
                self.nodes.get_mut(handle).set_right(Some(pivot));
            }
            self.rotate_left(handle)
        } else {
            handle
        }
    }

    /// [`balance`](Self::balance) lifted over an optional subtree.
    fn rebalance(&mut self, node: Option<Handle>) -> Option<Handle> {
        node.map(|handle| self.balance(handle))
    }

    /// Unlinks the leftmost node of the subtree at `handle`, rebalancing the
    /// path back up. Returns the new subtree root and the unlinked key.
    fn remove_min(&mut self, handle: Handle) -> (Option<Handle>, T) {
        let node = self.nodes.get(handle);
        match node.left() {
            None => {
                let right = node.right();
                (right, self.nodes.take(handle).into_key())
            }
            Some(left) => {
                let (left, key) = self.remove_min(left);
                self.nodes.get_mut(handle).set_left(left);
                (self.rebalance(Some(handle)), key)
            }
        }
    }

    /// Returns the leftmost handle of the subtree at `handle`.
    pub(crate) fn leftmost(&self, mut handle: Handle) -> Handle {
        while let Some(left) = self.nodes.get(handle).left() {
            handle = left;
        }
        handle
    }

    /// Returns the rightmost handle of the subtree at `handle`.
    pub(crate) fn rightmost(&self, mut handle: Handle) -> Handle {
        while let Some(right) = self.nodes.get(handle).right() {
            handle = right;
        }
        handle
    }

    /// Pushes `node` and every node on its left spine onto `stack`.
    pub(crate) fn push_left_spine(&self, mut node: Option<Handle>, stack: &mut Spine) {
        while let Some(handle) = node {
            stack.push(handle);
            node = self.nodes.get(handle).left();
        }
    }

    /// Searches for a key and returns the handle of the node holding it.
    pub(crate) fn find<Q>(&self, key: &Q) -> Option<Handle>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self.root;
        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            current = match key.cmp(node.key().borrow()) {
                Less => node.left(),
                Greater => node.right(),
                Equal => return Some(handle),
            };
        }
        None
    }

    /// Removes the node holding `key`, returning the key that was stored.
    pub(crate) fn remove<Q>(&mut self, key: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let (root, removed) = self.remove_at(self.root, key);
        self.root = root;
        removed
    }

    fn remove_at<Q>(&mut self, node: Option<Handle>, key: &Q) -> (Option<Handle>, Option<T>)
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let Some(handle) = node else {
            return (None, None);
        };

        let current = self.nodes.get(handle);
        let (left, right) = (current.left(), current.right());
        let removed = match key.cmp(current.key().borrow()) {
            Less => {
                let (left, removed) = self.remove_at(left, key);
                self.nodes.get_mut(handle).set_left(left);
                removed
            }
            Greater => {
                let (right, removed) = self.remove_at(right, key);
                self.nodes.get_mut(handle).set_right(right);
                removed
            }
            Equal => match (left, right) {
                (None, child) | (child, None) => {
                    return (child, Some(self.nodes.take(handle).into_key()));
                }
                (Some(_), Some(right)) => {
                    // Two children: the in-order successor's slot is released and
                    // its key takes the place of the matched one.
                    let (right, successor) = self.remove_min(right);
                    let node = self.nodes.get_mut(handle);
                    node.set_right(right);
                    Some(node.replace_key(successor))
                }
            },
        };

        (Some(self.balance(handle)), removed)
    }

    /// Releases every node, children before their parent, and empties the tree.
    pub(crate) fn clear(&mut self) {
        let root = self.root.take();
        self.release(root);
        self.nodes.clear();
    }

    fn release(&mut self, node: Option<Handle>) {
        if let Some(handle) = node {
            let node = self.nodes.take(handle);
            self.release(node.left());
            self.release(node.right());
            drop(node);
        }
    }
}

impl<T: Ord> RawAvlTree<T> {
    /// Inserts `key`, returning `false` if an equal key is already present.
    pub(crate) fn insert(&mut self, key: T) -> bool {
        let (root, inserted) = self.insert_at(self.root, key);
        self.root = Some(root);
        inserted
    }

    fn insert_at(&mut self, node: Option<Handle>, key: T) -> (Handle, bool) {
        let Some(handle) = node else {
            return (self.nodes.alloc(Node::new(key)), true);
        };

        let current = self.nodes.get(handle);
        let (left, right) = (current.left(), current.right());
        let inserted = match key.cmp(current.key()) {
            Less => {
                let (left, inserted) = self.insert_at(left, key);
                self.nodes.get_mut(handle).set_left(Some(left));
                inserted
            }
            Greater => {
                let (right, inserted) = self.insert_at(right, key);
                self.nodes.get_mut(handle).set_right(Some(right));
                inserted
            }
            Equal => false,
        };

        (self.balance(handle), inserted)
    }
}
