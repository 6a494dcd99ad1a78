use thiserror::Error;

/// Errors reported by [`AvlTree`](crate::AvlTree) queries and its iterator.
///
/// Neither error is raised part-way through a mutation; the tree is never left
/// in a modified state when one is returned.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Error)]
pub enum Error {
    /// The requested key is not present in the tree.
    #[error("key not found")]
    NotFound,
    /// An iterator was advanced after it had already yielded its last key.
    #[error("no more elements in the iterator")]
    OutOfRange,
}
