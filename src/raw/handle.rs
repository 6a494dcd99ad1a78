use core::num::NonZero;

#[cfg(test)]
type RawHandle = u16;
#[cfg(not(test))]
type RawHandle = u32;

/// Index of a node slot in the tree's arena.
///
/// Stored as `index + 1` so that `Option<Handle>` (an optional child link) costs no
/// more than a bare `Handle`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub(crate) struct Handle(NonZero<RawHandle>);

impl Handle {
    /// The largest slot index a `Handle` can address.
    pub(crate) const MAX: usize = (RawHandle::MAX - 1) as usize;

    #[inline]
    pub(crate) fn from_index(index: usize) -> Self {
        assert!(index <= Self::MAX, "`Handle::from_index()` - `index` > `Handle::MAX`!");
        #[allow(clippy::cast_possible_truncation)]
        let raw = (index + 1) as RawHandle;
        Self(NonZero::new(raw).expect("`Handle::from_index()` - `index + 1` is never zero!"))
    }

    #[inline]
    pub(crate) const fn to_index(self) -> usize {
        (self.0.get() - 1) as usize
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use static_assertions::assert_eq_size;

    // Child links are `Option<Handle>`; they must not grow past the raw index.
    assert_eq_size!(Handle, Option<Handle>);
    assert_eq_size!(Handle, RawHandle);

    #[test]
    #[should_panic(expected = "`Handle::from_index()` - `index` > `Handle::MAX`!")]
    fn index_past_max_panics() {
        let _ = Handle::from_index(Handle::MAX + 1);
    }

    #[test]
    fn first_and_last_index() {
        assert_eq!(Handle::from_index(0).to_index(), 0);
        assert_eq!(Handle::from_index(Handle::MAX).to_index(), Handle::MAX);
    }

    proptest! {
        #[test]
        fn index_survives_handle(index in 0..=Handle::MAX) {
            prop_assert_eq!(Handle::from_index(index).to_index(), index);
        }
    }
}
