use core::fmt;

use super::AvlTree;
use crate::raw::{Handle, RawAvlTree};

/// Number of spaces each tree level is indented by in [`Pretty`] output.
const INDENT: usize = 2;

/// Renders an [`AvlTree`] sideways: one key per line, indented by depth, right
/// subtree above its parent and left subtree below.
///
/// This `struct` is created by the [`pretty`] method on [`AvlTree`].
///
/// # Examples
///
/// ```
/// use avl_tree::AvlTree;
///
/// let tree = AvlTree::from([2, 1, 3]);
/// assert_eq!(tree.pretty().to_string(), "  3\n2\n  1\n");
/// ```
///
/// [`pretty`]: AvlTree::pretty
pub struct Pretty<'a, T> {
    tree: &'a RawAvlTree<T>,
}

impl<T> AvlTree<T> {
    /// Returns a [`Display`](fmt::Display) adapter drawing the tree's shape.
    #[must_use]
    pub fn pretty(&self) -> Pretty<'_, T> {
        Pretty {
            tree: &self.raw,
        }
    }

    /// Prints the tree's shape to stdout, as rendered by [`pretty`](Self::pretty).
    ///
    /// An empty tree prints nothing.
    #[cfg(feature = "std")]
    pub fn print_tree(&self)
    where
        T: fmt::Display,
    {
        std::print!("{}", self.pretty());
    }
}

impl<T: fmt::Display> Pretty<'_, T> {
    fn write_subtree(&self, f: &mut fmt::Formatter<'_>, node: Option<Handle>, depth: usize) -> fmt::Result {
        let Some(handle) = node else {
            return Ok(());
        };

        let node = self.tree.node(handle);
        self.write_subtree(f, node.right(), depth + 1)?;
        writeln!(f, "{:indent$}{}", "", node.key(), indent = depth * INDENT)?;
        self.write_subtree(f, node.left(), depth + 1)
    }
}

impl<T: fmt::Display> fmt::Display for Pretty<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_subtree(f, self.tree.root(), 0)
    }
}

impl<T: fmt::Display> fmt::Display for AvlTree<T> {
    /// Writes the keys in ascending order, separated by single spaces.
    ///
    /// ```
    /// use avl_tree::AvlTree;
    ///
    /// let tree = AvlTree::from([3, 1, 2]);
    /// assert_eq!(tree.to_string(), "1 2 3");
    /// assert_eq!(AvlTree::<u8>::new().to_string(), "");
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys = self.iter();
        if let Some(first) = keys.next() {
            write!(f, "{first}")?;
            for key in keys {
                write!(f, " {key}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn pretty_puts_right_branch_first() {
        let tree = AvlTree::from([7, 8, 5, 6, 3, 4, 1]);
        let expected = "    8\n  7\n    6\n5\n    4\n  3\n    1\n";
        assert_eq!(tree.pretty().to_string(), expected);
    }

    #[test]
    fn pretty_of_empty_tree_is_empty() {
        let tree: AvlTree<i32> = AvlTree::new();
        assert_eq!(tree.pretty().to_string(), "");
    }

    #[test]
    fn display_lists_keys_in_order() {
        let tree = AvlTree::from([10, 20, 5, 15]);
        assert_eq!(tree.to_string(), "5 10 15 20");
    }
}
