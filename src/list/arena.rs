/*!
 * Node Arena
 * Fixed storage for list sentinels and elements, addressed by `Handle`
 *
 * The arena is built once before the timed region and never grows. Lists
 * only rewrite link words; they never allocate or free nodes. Links are
 * relaxed atomics so an unsynchronized run races on plain words instead of
 * invoking undefined behavior. The shard lock supplies ordering otherwise.
 */

use crate::core::types::{Handle, Key, KeyId, KeyValue, NIL};
use std::sync::atomic::{AtomicUsize, Ordering};

struct Node {
    key: Option<Key>,
    prev: AtomicUsize,
    next: AtomicUsize,
}

impl Node {
    fn new(key: Option<Key>) -> Self {
        Self {
            key,
            prev: AtomicUsize::new(NIL),
            next: AtomicUsize::new(NIL),
        }
    }
}

/// Sentinel and element storage
///
/// Slots `0..lists` are sentinels, the rest are elements in the order their
/// key values were supplied.
pub struct Arena {
    nodes: Box<[Node]>,
    lists: usize,
}

impl Arena {
    /// Build an arena with `lists` sentinels followed by one element per value
    pub fn new<I>(lists: usize, values: I) -> Self
    where
        I: IntoIterator<Item = KeyValue>,
    {
        let values = values.into_iter();
        let mut nodes = Vec::with_capacity(lists + values.size_hint().0);
        nodes.extend((0..lists).map(|_| Node::new(None)));
        nodes.extend(
            values
                .enumerate()
                .map(|(i, value)| Node::new(Some(Key::new(KeyId(i as u32), value)))),
        );

        Self {
            nodes: nodes.into_boxed_slice(),
            lists,
        }
    }

    /// Total node count, sentinels included
    #[inline]
    pub fn capacity(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn list_count(&self) -> usize {
        self.lists
    }

    #[inline]
    pub fn element_count(&self) -> usize {
        self.nodes.len() - self.lists
    }

    /// Sentinel of list `index`
    #[inline]
    pub fn sentinel(&self, index: usize) -> Handle {
        debug_assert!(index < self.lists);
        Handle(index)
    }

    /// The `ordinal`-th element (0-based, in creation order)
    #[inline]
    pub fn element(&self, ordinal: usize) -> Handle {
        debug_assert!(ordinal < self.element_count());
        Handle(self.lists + ordinal)
    }

    /// Contiguous run of `len` elements starting at `start`
    pub fn elements(&self, start: usize, len: usize) -> impl Iterator<Item = Handle> + '_ {
        (start..start + len).map(move |ordinal| self.element(ordinal))
    }

    /// Key of an element; sentinels carry none
    #[inline(always)]
    pub fn key(&self, node: Handle) -> Option<Key> {
        self.nodes[node.0].key
    }

    #[inline(always)]
    pub fn is_sentinel(&self, node: Handle) -> bool {
        node.0 < self.lists
    }

    /// Resolve a raw link word to a handle, if it names a node
    #[inline(always)]
    pub fn resolve(&self, raw: usize) -> Option<Handle> {
        (raw != NIL && raw < self.nodes.len()).then_some(Handle(raw))
    }

    #[inline(always)]
    pub(crate) fn next(&self, node: Handle) -> usize {
        self.nodes[node.0].next.load(Ordering::Relaxed)
    }

    #[inline(always)]
    pub(crate) fn prev(&self, node: Handle) -> usize {
        self.nodes[node.0].prev.load(Ordering::Relaxed)
    }

    #[inline(always)]
    pub(crate) fn set_next(&self, node: Handle, to: Handle) {
        self.nodes[node.0].next.store(to.0, Ordering::Relaxed);
    }

    #[inline(always)]
    pub(crate) fn set_prev(&self, node: Handle, to: Handle) {
        self.nodes[node.0].prev.store(to.0, Ordering::Relaxed);
    }

    /// Whether the node has ever been linked
    #[inline]
    pub fn is_linked(&self, node: Handle) -> bool {
        self.next(node) != NIL
    }
}
