#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]

mod arena;
pub mod ordered_dict;

extern crate alloc;

#[cfg(feature = "std")]
type RandomState = std::hash::RandomState;
#[cfg(not(feature = "std"))]
type RandomState = hashbrown::DefaultHashBuilder;

/// A hash map with a deterministic, mutable iteration order, implemented as a
/// sentinel-anchored circular doubly-linked list indexed by a hash table.
///
/// This is the main type alias using the default hasher. For custom hashers,
/// use [`ordered_dict::OrderedDict`] directly.
///
/// # Examples
///
/// ```
/// use ordered_dict::OrderedDict;
///
/// let mut dict = OrderedDict::new();
/// dict.set("a", 1).set("b", 2);
///
/// // Iterates in insertion order
/// let entries: Vec<_> = dict.iter().collect();
/// assert_eq!(entries, [(&"a", &1), (&"b", &2)]);
/// ```
pub type OrderedDict<K, V> = crate::ordered_dict::OrderedDict<K, V, RandomState>;
use core::num::NonZeroU32;

pub use ordered_dict::IntoIter;
pub use ordered_dict::Iter;
pub use ordered_dict::IterMut;
pub use ordered_dict::Keys;
pub use ordered_dict::Values;
pub use ordered_dict::ValuesMut;

/// Index of a slot in the node arena.
///
/// Slot 0 always holds the sentinel, so `Ptr::SENTINEL` doubles as the
/// "before the first" and "after the last" position of the sequence.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub(crate) struct Ptr(NonZeroU32);

impl core::fmt::Debug for Ptr {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if *self == Ptr::SENTINEL {
            write!(f, "Ptr(sentinel)")
        } else {
            write!(f, "Ptr({})", self.unchecked_get())
        }
    }
}

impl Ptr {
    pub(crate) const SENTINEL: Ptr = Ptr(NonZeroU32::MIN);

    pub(crate) fn unchecked_from(index: usize) -> Self {
        debug_assert!(
            index < u32::MAX as usize,
            "Index too large to fit in Ptr: {index}"
        );
        Ptr(NonZeroU32::MIN.saturating_add(index as u32))
    }

    pub(crate) fn unchecked_get(self) -> usize {
        self.0.get() as usize - 1
    }
}
