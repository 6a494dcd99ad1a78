use super::handle::Handle;

/// A single AVL tree node.
///
/// Children are owned through their handles: a node is reachable from exactly one
/// parent link (or the tree root) and nothing points back up.
#[derive(Clone, Debug)]
pub(crate) struct Node<T> {
    key: T,
    left: Option<Handle>,
    right: Option<Handle>,
    // Height of the subtree rooted here; a leaf is 1.
    height: u8,
    // height(left) - height(right); within -1..=1 between operations.
    balance_factor: i8,
}

impl<T> Node<T> {
    /// Creates a new leaf.
    pub(crate) const fn new(key: T) -> Self {
        Self {
            key,
            left: None,
            right: None,
            height: 1,
            balance_factor: 0,
        }
    }

    #[inline]
    pub(crate) const fn key(&self) -> &T {
        &self.key
    }

    /// Swaps in a new key, returning the old one.
    pub(crate) fn replace_key(&mut self, key: T) -> T {
        core::mem::replace(&mut self.key, key)
    }

    pub(crate) fn into_key(self) -> T {
        self.key
    }

    #[inline]
    pub(crate) const fn left(&self) -> Option<Handle> {
        self.left
    }

    #[inline]
    pub(crate) const fn right(&self) -> Option<Handle> {
        self.right
    }

    #[inline]
    pub(crate) fn set_left(&mut self, left: Option<Handle>) {
        self.left = left;
    }

    #[inline]
    pub(crate) fn set_right(&mut self, right: Option<Handle>) {
        self.right = right;
    }

    #[inline]
    pub(crate) const fn height(&self) -> u8 {
        self.height
    }

    #[inline]
    pub(crate) const fn balance_factor(&self) -> i8 {
        self.balance_factor
    }

    /// Stores the height and balance factor derived from the two child heights.
    #[allow(clippy::cast_possible_wrap)]
    pub(crate) fn set_child_heights(&mut self, left: u8, right: u8) {
        self.height = 1 + left.max(right);
        self.balance_factor = left as i8 - right as i8;
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn new_node_is_balanced_leaf() {
        let node = Node::new(7);
        assert_eq!((node.left(), node.right()), (None, None));
        assert_eq!(*node.key(), 7);
        assert_eq!(node.height(), 1);
        assert_eq!(node.balance_factor(), 0);
    }

    #[test]
    fn child_heights_drive_balance_factor() {
        let mut node = Node::new(());
        node.set_child_heights(3, 1);
        assert_eq!(node.height(), 4);
        assert_eq!(node.balance_factor(), 2);

        node.set_child_heights(0, 2);
        assert_eq!(node.height(), 3);
        assert_eq!(node.balance_factor(), -2);
    }

    #[test]
    fn replace_key_returns_previous() {
        let mut node = Node::new("old");
        assert_eq!(node.replace_key("new"), "old");
        assert_eq!(node.into_key(), "new");
    }
}
