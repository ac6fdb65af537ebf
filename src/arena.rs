use alloc::vec::Vec;
use core::ops::{
    Index,
    IndexMut,
};

use crate::Ptr;

#[cold]
#[inline(never)]
fn assert_occupied() -> ! {
    panic!("Attempted to access data of a sentinel or free slot");
}

#[cold]
#[inline(never)]
fn corrupt_free_list() -> ! {
    panic!("Free list points at a slot that is not free");
}

#[derive(Debug, Clone)]
pub(crate) struct Node<K, T> {
    pub(crate) hash: u64,
    pub(crate) key: K,
    pub(crate) value: T,
}

#[derive(Debug, Clone)]
enum SlotState<K, T> {
    /// The permanent anchor of the ring. Carries no key, so no caller key can
    /// ever compare equal to it.
    Sentinel,
    Free {
        next_free: Option<Ptr>,
    },
    Occupied(Node<K, T>),
}

#[derive(Debug, Clone)]
pub(crate) struct Slot<K, T> {
    prev: Ptr,
    next: Ptr,
    state: SlotState<K, T>,
}

impl<K, T> Slot<K, T> {
    fn sentinel() -> Self {
        Slot {
            prev: Ptr::SENTINEL,
            next: Ptr::SENTINEL,
            state: SlotState::Sentinel,
        }
    }

    pub(crate) fn next(&self) -> Ptr {
        self.next
    }

    pub(crate) fn prev(&self) -> Ptr {
        self.prev
    }

    pub(crate) fn node_mut(&mut self) -> Option<&mut Node<K, T>> {
        match &mut self.state {
            SlotState::Occupied(node) => Some(node),
            _ => None,
        }
    }
}

/// Slot storage for the sequence backbone.
///
/// Slot 0 is the sentinel. It is created with the arena, survives `clear`,
/// and is never handed out by `alloc` or accepted by `free`. Every other slot
/// is either occupied by a node or chained into the free list.
#[derive(Debug, Clone)]
pub(crate) struct Arena<K, T> {
    slots: Vec<Slot<K, T>>,
    free_head: Option<Ptr>,
    len: usize,
}

impl<K, T> Arena<K, T> {
    pub(crate) fn new() -> Self {
        Arena::with_capacity(0)
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity.saturating_add(1));
        slots.push(Slot::sentinel());
        Arena {
            slots,
            free_head: None,
            len: 0,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Number of nodes the arena can hold without reallocating.
    pub(crate) fn capacity(&self) -> usize {
        self.slots.capacity() - 1
    }

    pub(crate) fn reserve(&mut self, additional: usize) {
        let free = self.slots.len() - 1 - self.len;
        self.slots.reserve(additional.saturating_sub(free));
    }

    pub(crate) fn shrink_to_fit(&mut self) {
        // Free slots cannot be compacted away: their indices are chained in the
        // free list and may sit below occupied slots.
        self.slots.shrink_to_fit();
    }

    pub(crate) fn clear(&mut self) {
        self.slots.truncate(1);
        self.slots[0] = Slot::sentinel();
        self.free_head = None;
        self.len = 0;
    }

    pub(crate) fn first(&self) -> Ptr {
        self.slots[0].next
    }

    pub(crate) fn last(&self) -> Ptr {
        self.slots[0].prev
    }

    pub(crate) fn next(&self, ptr: Ptr) -> Ptr {
        self.slots[ptr.unchecked_get()].next
    }

    pub(crate) fn prev(&self, ptr: Ptr) -> Ptr {
        self.slots[ptr.unchecked_get()].prev
    }

    /// Returns the node at `ptr`, or `None` for the sentinel.
    pub(crate) fn node(&self, ptr: Ptr) -> Option<&Node<K, T>> {
        match &self.slots[ptr.unchecked_get()].state {
            SlotState::Occupied(node) => Some(node),
            _ => None,
        }
    }

    pub(crate) fn is_occupied(&self, ptr: Ptr) -> bool {
        self.slots
            .get(ptr.unchecked_get())
            .is_some_and(|slot| matches!(slot.state, SlotState::Occupied(_)))
    }

    /// Stores `node` in a free slot, reusing freed slots first. The new slot
    /// is detached: it links only to itself until `link_before` or
    /// `link_after` splices it into the ring.
    pub(crate) fn alloc(&mut self, node: Node<K, T>) -> Ptr {
        let slot = |ptr| Slot {
            prev: ptr,
            next: ptr,
            state: SlotState::Occupied(node),
        };

        let ptr = match self.free_head {
            Some(ptr) => {
                let old = core::mem::replace(&mut self.slots[ptr.unchecked_get()], slot(ptr));
                self.free_head = match old.state {
                    SlotState::Free { next_free } => next_free,
                    _ => corrupt_free_list(),
                };
                ptr
            }
            None => {
                let ptr = Ptr::unchecked_from(self.slots.len());
                self.slots.push(slot(ptr));
                ptr
            }
        };

        self.len += 1;
        ptr
    }

    /// Unlinks the node at `ptr` and releases its slot to the free list.
    pub(crate) fn free(&mut self, ptr: Ptr) -> Node<K, T> {
        assert!(self.is_occupied(ptr), "Pointer to free must be occupied");
        self.unlink(ptr);

        let old = core::mem::replace(
            &mut self.slots[ptr.unchecked_get()],
            Slot {
                prev: ptr,
                next: ptr,
                state: SlotState::Free {
                    next_free: self.free_head,
                },
            },
        );
        self.free_head = Some(ptr);
        self.len -= 1;

        match old.state {
            SlotState::Occupied(node) => node,
            _ => assert_occupied(),
        }
    }

    /// Splices the detached slot `ptr` in immediately before `anchor`.
    pub(crate) fn link_before(&mut self, ptr: Ptr, anchor: Ptr) {
        debug_assert!(
            self.next(ptr) == ptr && self.prev(ptr) == ptr,
            "Linked slot must be detached first"
        );

        let prev = self.prev(anchor);
        let slot = &mut self.slots[ptr.unchecked_get()];
        slot.prev = prev;
        slot.next = anchor;
        self.slots[prev.unchecked_get()].next = ptr;
        self.slots[anchor.unchecked_get()].prev = ptr;
    }

    /// Splices the detached slot `ptr` in immediately after `anchor`.
    pub(crate) fn link_after(&mut self, ptr: Ptr, anchor: Ptr) {
        let next = self.next(anchor);
        self.link_before(ptr, next);
    }

    /// Joins the neighbours of `ptr` to each other and detaches `ptr`.
    pub(crate) fn unlink(&mut self, ptr: Ptr) {
        debug_assert_ne!(ptr, Ptr::SENTINEL, "The sentinel is never unlinked");

        let prev = self.prev(ptr);
        let next = self.next(ptr);
        self.slots[prev.unchecked_get()].next = next;
        self.slots[next.unchecked_get()].prev = prev;

        let slot = &mut self.slots[ptr.unchecked_get()];
        slot.prev = ptr;
        slot.next = ptr;
    }

    pub(crate) fn slots_ptr(&mut self) -> *mut Slot<K, T> {
        self.slots.as_mut_ptr()
    }
}

impl<K, T> Index<Ptr> for Arena<K, T> {
    type Output = Node<K, T>;

    fn index(&self, index: Ptr) -> &Self::Output {
        match &self.slots[index.unchecked_get()].state {
            SlotState::Occupied(node) => node,
            _ => assert_occupied(),
        }
    }
}

impl<K, T> IndexMut<Ptr> for Arena<K, T> {
    fn index_mut(&mut self, index: Ptr) -> &mut Self::Output {
        match &mut self.slots[index.unchecked_get()].state {
            SlotState::Occupied(node) => node,
            _ => assert_occupied(),
        }
    }
}
