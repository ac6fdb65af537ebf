use core::iter::FusedIterator;
use core::marker::PhantomData;

use crate::Ptr;
use crate::arena::Arena;
use crate::arena::Node;
use crate::arena::Slot;

#[cold]
#[inline(never)]
fn sentinel_reached() -> ! {
    panic!("Iterator walked onto the sentinel before its count ran out");
}

/// An iterator over the entries of an `OrderedDict`, in order.
///
/// This struct is created by the [`iter`] method on [`OrderedDict`]. See its
/// documentation for more.
///
/// [`iter`]: super::OrderedDict::iter
/// [`OrderedDict`]: super::OrderedDict
///
/// # Examples
///
/// ```
/// use ordered_dict::OrderedDict;
///
/// let mut dict = OrderedDict::new();
/// dict.set("a", 1).set("b", 2);
///
/// for (key, value) in dict.iter() {
///     println!("{}: {}", key, value);
/// }
/// ```
#[derive(Debug)]
pub struct Iter<'a, K, T> {
    nodes: &'a Arena<K, T>,
    forward_ptr: Ptr,
    reverse_ptr: Ptr,
    remaining: usize,
}

impl<'a, K, T> Iter<'a, K, T> {
    pub(crate) fn new(nodes: &'a Arena<K, T>) -> Self {
        Iter {
            nodes,
            forward_ptr: nodes.first(),
            reverse_ptr: nodes.last(),
            remaining: nodes.len(),
        }
    }
}

impl<K, T> Clone for Iter<'_, K, T> {
    fn clone(&self) -> Self {
        Iter {
            nodes: self.nodes,
            forward_ptr: self.forward_ptr,
            reverse_ptr: self.reverse_ptr,
            remaining: self.remaining,
        }
    }
}

impl<'a, K, T> Iterator for Iter<'a, K, T> {
    type Item = (&'a K, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let nodes = self.nodes;
        let node = &nodes[self.forward_ptr];
        self.forward_ptr = nodes.next(self.forward_ptr);
        self.remaining -= 1;

        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, T> DoubleEndedIterator for Iter<'_, K, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let nodes = self.nodes;
        let node = &nodes[self.reverse_ptr];
        self.reverse_ptr = nodes.prev(self.reverse_ptr);
        self.remaining -= 1;

        Some((&node.key, &node.value))
    }
}

impl<K, T> ExactSizeIterator for Iter<'_, K, T> {}

impl<K, T> FusedIterator for Iter<'_, K, T> {}

/// An iterator over the keys of an `OrderedDict`, in order.
///
/// This struct is created by [`OrderedDict::keys`](super::OrderedDict::keys).
#[derive(Debug)]
pub struct Keys<'a, K, T> {
    pub(crate) iter: Iter<'a, K, T>,
}

impl<K, T> Clone for Keys<'_, K, T> {
    fn clone(&self) -> Self {
        Keys {
            iter: self.iter.clone(),
        }
    }
}

impl<'a, K, T> Iterator for Keys<'a, K, T> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<K, T> DoubleEndedIterator for Keys<'_, K, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.iter.next_back().map(|(key, _)| key)
    }
}

impl<K, T> ExactSizeIterator for Keys<'_, K, T> {}

impl<K, T> FusedIterator for Keys<'_, K, T> {}

/// An iterator over the values of an `OrderedDict`, in order.
///
/// This struct is created by
/// [`OrderedDict::values`](super::OrderedDict::values).
#[derive(Debug)]
pub struct Values<'a, K, T> {
    pub(crate) iter: Iter<'a, K, T>,
}

impl<K, T> Clone for Values<'_, K, T> {
    fn clone(&self) -> Self {
        Values {
            iter: self.iter.clone(),
        }
    }
}

impl<'a, K, T> Iterator for Values<'a, K, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<K, T> DoubleEndedIterator for Values<'_, K, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.iter.next_back().map(|(_, value)| value)
    }
}

impl<K, T> ExactSizeIterator for Values<'_, K, T> {}

impl<K, T> FusedIterator for Values<'_, K, T> {}

/// A mutable iterator over the entries of an `OrderedDict`, in order.
///
/// This struct is created by the [`iter_mut`] method on [`OrderedDict`]. See
/// its documentation for more.
///
/// [`iter_mut`]: super::OrderedDict::iter_mut
/// [`OrderedDict`]: super::OrderedDict
///
/// # Examples
///
/// ```
/// use ordered_dict::OrderedDict;
///
/// let mut dict = OrderedDict::new();
/// dict.set("a", 1).set("b", 2);
///
/// for (_, value) in dict.iter_mut() {
///     *value *= 2;
/// }
/// assert_eq!(dict.get(&"b"), Some(&4));
/// ```
#[derive(Debug)]
pub struct IterMut<'a, K, T> {
    slots: *mut Slot<K, T>,
    forward_ptr: Ptr,
    reverse_ptr: Ptr,
    remaining: usize,
    _nodes: PhantomData<&'a mut Arena<K, T>>,
}

// SAFETY: `IterMut` behaves like `&'a mut Arena<K, T>` handing out
// `(&K, &mut T)`, so it follows the same auto trait rules.
unsafe impl<K: Send, T: Send> Send for IterMut<'_, K, T> {}
// SAFETY: See above.
unsafe impl<K: Sync, T: Sync> Sync for IterMut<'_, K, T> {}

impl<'a, K, T> IterMut<'a, K, T> {
    pub(crate) fn new(nodes: &'a mut Arena<K, T>) -> Self {
        IterMut {
            forward_ptr: nodes.first(),
            reverse_ptr: nodes.last(),
            remaining: nodes.len(),
            slots: nodes.slots_ptr(),
            _nodes: PhantomData,
        }
    }

    /// Returns the links of `ptr` along with its entry.
    ///
    /// # Safety
    ///
    /// `ptr` must be a linked slot that this iterator has not yielded yet.
    unsafe fn take(&mut self, ptr: Ptr) -> (Ptr, Ptr, &'a K, &'a mut T) {
        // SAFETY: The arena is mutably borrowed for 'a and cannot reallocate.
        // Linked slots are distinct, and the caller guarantees `ptr` has not
        // been handed out, so this is the only live reference to the slot.
        let slot: &'a mut Slot<K, T> = unsafe { &mut *self.slots.add(ptr.unchecked_get()) };
        let (prev, next) = (slot.prev(), slot.next());
        let Some(Node { key, value, .. }) = slot.node_mut() else {
            sentinel_reached()
        };
        (prev, next, key, value)
    }
}

impl<'a, K, T> Iterator for IterMut<'a, K, T> {
    type Item = (&'a K, &'a mut T);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        // SAFETY: `remaining` is non-zero, so `forward_ptr` is a linked slot
        // that neither end has yielded.
        let (_, next, key, value) = unsafe { self.take(self.forward_ptr) };
        self.forward_ptr = next;
        self.remaining -= 1;

        Some((key, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, T> DoubleEndedIterator for IterMut<'_, K, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        // SAFETY: `remaining` is non-zero, so `reverse_ptr` is a linked slot
        // that neither end has yielded.
        let (prev, _, key, value) = unsafe { self.take(self.reverse_ptr) };
        self.reverse_ptr = prev;
        self.remaining -= 1;

        Some((key, value))
    }
}

impl<K, T> ExactSizeIterator for IterMut<'_, K, T> {}

impl<K, T> FusedIterator for IterMut<'_, K, T> {}

/// A mutable iterator over the values of an `OrderedDict`, in order.
///
/// This struct is created by
/// [`OrderedDict::values_mut`](super::OrderedDict::values_mut).
#[derive(Debug)]
pub struct ValuesMut<'a, K, T> {
    pub(crate) iter: IterMut<'a, K, T>,
}

impl<'a, K, T> Iterator for ValuesMut<'a, K, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<K, T> DoubleEndedIterator for ValuesMut<'_, K, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.iter.next_back().map(|(_, value)| value)
    }
}

impl<K, T> ExactSizeIterator for ValuesMut<'_, K, T> {}

impl<K, T> FusedIterator for ValuesMut<'_, K, T> {}

/// An owning iterator over the entries of an `OrderedDict`, in order.
///
/// This struct is created by the [`into_iter`] method on `OrderedDict`
/// (provided by the [`IntoIterator`] trait). Entries not yet yielded are
/// dropped with the iterator.
///
/// [`into_iter`]: IntoIterator::into_iter
/// [`IntoIterator`]: core::iter::IntoIterator
///
/// # Examples
///
/// ```
/// use ordered_dict::OrderedDict;
///
/// let mut dict = OrderedDict::new();
/// dict.set("a", 1).set("b", 2);
///
/// let entries: Vec<_> = dict.into_iter().collect();
/// assert_eq!(entries, [("a", 1), ("b", 2)]);
/// ```
#[derive(Debug)]
pub struct IntoIter<K, T> {
    nodes: Arena<K, T>,
}

impl<K, T> IntoIter<K, T> {
    pub(crate) fn new(nodes: Arena<K, T>) -> Self {
        IntoIter { nodes }
    }

    fn take(&mut self, ptr: Ptr) -> Option<(K, T)> {
        if ptr == Ptr::SENTINEL {
            return None;
        }
        let Node { key, value, .. } = self.nodes.free(ptr);
        Some((key, value))
    }
}

impl<K, T> Iterator for IntoIter<K, T> {
    type Item = (K, T);

    fn next(&mut self) -> Option<Self::Item> {
        let ptr = self.nodes.first();
        self.take(ptr)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.nodes.len(), Some(self.nodes.len()))
    }
}

impl<K, T> DoubleEndedIterator for IntoIter<K, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let ptr = self.nodes.last();
        self.take(ptr)
    }
}

impl<K, T> ExactSizeIterator for IntoIter<K, T> {}

impl<K, T> FusedIterator for IntoIter<K, T> {}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::string::ToString;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::assert_eq;

    use crate::OrderedDict;

    fn sample() -> OrderedDict<i32, String> {
        (1..=5).map(|i| (i, i.to_string())).collect()
    }

    #[test]
    fn test_iter_empty() {
        let dict: OrderedDict<i32, i32> = OrderedDict::new();
        assert_eq!(dict.iter().next(), None);
        assert_eq!(dict.iter().next_back(), None);
        assert_eq!(dict.keys().len(), 0);
        assert_eq!(dict.values().count(), 0);
    }

    #[test]
    fn test_iter_forward_and_back() {
        let dict = sample();
        let keys: Vec<_> = dict.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec![1, 2, 3, 4, 5]);

        let keys: Vec<_> = dict.iter().rev().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec![5, 4, 3, 2, 1]);
    }

    #[test]
    fn test_iter_meets_in_middle() {
        let dict = sample();
        let mut iter = dict.iter();

        assert_eq!(iter.len(), 5);
        assert_eq!(iter.next().map(|(k, _)| *k), Some(1));
        assert_eq!(iter.next_back().map(|(k, _)| *k), Some(5));
        assert_eq!(iter.next().map(|(k, _)| *k), Some(2));
        assert_eq!(iter.next_back().map(|(k, _)| *k), Some(4));
        assert_eq!(iter.len(), 1);
        assert_eq!(iter.next().map(|(k, _)| *k), Some(3));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
        assert_eq!(iter.len(), 0);
    }

    #[test]
    fn test_iter_clone_is_independent() {
        let dict = sample();
        let mut iter = dict.iter();
        iter.next();

        let rest: Vec<_> = iter.clone().map(|(k, _)| *k).collect();
        assert_eq!(rest, vec![2, 3, 4, 5]);
        assert_eq!(iter.len(), 4);
    }

    #[test]
    fn test_iter_restarts_from_current_state() {
        let mut dict = sample();
        let before: Vec<_> = dict.keys().copied().collect();

        dict.to_start(&5);
        dict.delete(&3);

        let after: Vec<_> = dict.keys().copied().collect();
        assert_eq!(before, vec![1, 2, 3, 4, 5]);
        assert_eq!(after, vec![5, 1, 2, 4]);
    }

    #[test]
    fn test_keys_and_values() {
        let dict = sample();
        assert_eq!(dict.keys().copied().collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);
        assert_eq!(
            dict.values().rev().cloned().collect::<Vec<_>>(),
            vec!["5", "4", "3", "2", "1"]
        );
    }

    #[test]
    fn test_iter_mut_both_ends() {
        let mut dict = sample();
        {
            let mut iter = dict.iter_mut();
            let (k, v) = iter.next().unwrap();
            assert_eq!(*k, 1);
            v.push('a');
            let (k, v) = iter.next_back().unwrap();
            assert_eq!(*k, 5);
            v.push('z');
            assert_eq!(iter.len(), 3);
        }

        assert_eq!(dict.get(&1).map(String::as_str), Some("1a"));
        assert_eq!(dict.get(&5).map(String::as_str), Some("5z"));
        assert_eq!(dict.get(&3).map(String::as_str), Some("3"));
    }

    #[test]
    fn test_iter_mut_after_reorder() {
        let mut dict: OrderedDict<i32, i32> = (0..4).map(|i| (i, i)).collect();
        dict.to_start(&3);
        dict.delete(&1);
        dict.set(9, 9);

        for (i, (_, value)) in dict.iter_mut().enumerate() {
            *value = i as i32 * 100;
        }

        let entries: Vec<_> = dict.iter().map(|(k, v)| (*k, *v)).collect();
        assert_eq!(entries, vec![(3, 0), (0, 100), (2, 200), (9, 300)]);
    }

    #[test]
    fn test_values_mut() {
        let mut dict = sample();
        for value in dict.values_mut().rev() {
            value.insert(0, '#');
        }
        assert_eq!(
            dict.values().cloned().collect::<Vec<_>>(),
            vec!["#1", "#2", "#3", "#4", "#5"]
        );
    }

    #[test]
    fn test_into_iter_both_ends() {
        let mut iter = sample().into_iter();
        assert_eq!(iter.len(), 5);
        assert_eq!(iter.next(), Some((1, "1".to_string())));
        assert_eq!(iter.next_back(), Some((5, "5".to_string())));

        let rest: Vec<_> = iter.map(|(k, _)| k).collect();
        assert_eq!(rest, vec![2, 3, 4]);
    }

    #[test]
    fn test_into_iter_partial_drop() {
        let mut iter = sample().into_iter();
        iter.next();
        drop(iter);
    }

    #[test]
    fn test_ref_into_iter() {
        let mut dict = sample();
        let mut count = 0;
        for (_, value) in &mut dict {
            value.clear();
            count += 1;
        }
        assert_eq!(count, 5);

        for (_, value) in &dict {
            assert!(value.is_empty());
        }
    }
}
