/*!
 * Sorted Circular List
 *
 * Sentinel-based, doubly-linked, ascending by key value. Elements live in
 * an [`Arena`]; this type only rewrites their links. Every operation walks
 * the list, so cost grows with list length and shows up as lock hold time.
 *
 * None of these operations synchronize. Callers serialize them per list
 * through the shard lock, or deliberately don't.
 */

use super::arena::Arena;
use super::hooks::{YieldPoint, YieldPoints};
use crate::core::errors::ListError;
use crate::core::types::{Handle, Key, NIL};

/// View of one list: its sentinel plus the arena holding its nodes
#[derive(Clone, Copy)]
pub struct SortedList<'a> {
    arena: &'a Arena,
    head: Handle,
    yields: YieldPoints,
}

/// Bounded walk along `next` links
///
/// A sound list returns to the sentinel within `capacity` steps. Anything
/// longer, or a step onto an unlinked node, is a fault.
struct Walk<'a> {
    arena: &'a Arena,
    head: Handle,
    budget: usize,
}

impl<'a> Walk<'a> {
    fn new(arena: &'a Arena, head: Handle) -> Self {
        Self {
            arena,
            head,
            budget: arena.capacity(),
        }
    }

    #[inline]
    fn step(&mut self, from: Handle) -> Result<Handle, ListError> {
        let fault = ListError::Fault {
            list: self.head,
            at: from,
        };
        if self.budget == 0 {
            return Err(fault);
        }
        self.budget -= 1;
        self.arena.resolve(self.arena.next(from)).ok_or(fault)
    }
}

impl<'a> SortedList<'a> {
    pub fn new(arena: &'a Arena, head: Handle, yields: YieldPoints) -> Self {
        debug_assert!(arena.is_sentinel(head));
        Self {
            arena,
            head,
            yields,
        }
    }

    #[inline]
    pub fn head(&self) -> Handle {
        self.head
    }

    /// Key of a node reached by a walk; a keyless node other than our own
    /// sentinel means the walk left this list
    #[inline]
    fn key_at(&self, node: Handle) -> Result<Key, ListError> {
        self.arena.key(node).ok_or(ListError::Fault {
            list: self.head,
            at: node,
        })
    }

    /// Insert `element` before the first node whose key is not less than its
    /// own, so equal keys come out newest first
    pub fn insert(&self, element: Handle) -> Result<(), ListError> {
        let arena = self.arena;
        let key = self.key_at(element)?.value();

        if arena.next(self.head) == NIL {
            self.yields.fire(YieldPoint::Insert);
            arena.set_next(self.head, self.head);
            arena.set_prev(self.head, self.head);
        }

        let mut walk = Walk::new(arena, self.head);
        let mut cur = walk.step(self.head)?;
        while cur != self.head && key > self.key_at(cur)?.value() {
            cur = walk.step(cur)?;
        }

        self.yields.fire(YieldPoint::Insert);

        let before = arena.resolve(arena.prev(cur)).ok_or(ListError::Fault {
            list: self.head,
            at: cur,
        })?;
        arena.set_next(before, element);
        arena.set_prev(element, before);
        arena.set_next(element, cur);
        arena.set_prev(cur, element);
        Ok(())
    }

    /// Unlink `element` after checking its neighbors point back at it
    ///
    /// On a failed check nothing is written.
    pub fn delete(&self, element: Handle) -> Result<(), ListError> {
        let arena = self.arena;
        let corrupted = ListError::Corrupted { element };

        if arena.is_sentinel(element) {
            return Err(corrupted);
        }
        let next = arena.resolve(arena.next(element)).ok_or(corrupted)?;
        let prev = arena.resolve(arena.prev(element)).ok_or(corrupted)?;
        if arena.prev(next) != element.index() || arena.next(prev) != element.index() {
            return Err(corrupted);
        }

        self.yields.fire(YieldPoint::Delete);

        arena.set_prev(next, prev);
        arena.set_next(prev, next);
        Ok(())
    }

    /// First element carrying exactly this key reference
    pub fn lookup(&self, key: &Key) -> Result<Option<Handle>, ListError> {
        if !self.arena.is_linked(self.head) {
            return Ok(None);
        }

        let mut walk = Walk::new(self.arena, self.head);
        let mut cur = walk.step(self.head)?;
        while cur != self.head {
            if self.key_at(cur)?.is(key) {
                return Ok(Some(cur));
            }
            self.yields.fire(YieldPoint::Lookup);
            cur = walk.step(cur)?;
        }
        Ok(None)
    }

    /// Element count, by full traversal
    pub fn length(&self) -> Result<usize, ListError> {
        if !self.arena.is_linked(self.head) {
            return Ok(0);
        }

        let mut walk = Walk::new(self.arena, self.head);
        let mut length = 0;
        let mut cur = walk.step(self.head)?;
        while cur != self.head {
            length += 1;
            self.yields.fire(YieldPoint::Lookup);
            cur = walk.step(cur)?;
        }
        Ok(length)
    }

    /// Elements in traversal order
    pub fn handles(&self) -> Result<Vec<Handle>, ListError> {
        let mut out = Vec::new();
        if !self.arena.is_linked(self.head) {
            return Ok(out);
        }

        let mut walk = Walk::new(self.arena, self.head);
        let mut cur = walk.step(self.head)?;
        while cur != self.head {
            out.push(cur);
            cur = walk.step(cur)?;
        }
        Ok(out)
    }

    /// Keys in traversal order
    pub fn keys(&self) -> Result<Vec<Key>, ListError> {
        self.handles()?
            .into_iter()
            .map(|node| self.key_at(node))
            .collect()
    }

    /// Check neighbor consistency for every node and ascending key order
    ///
    /// Returns the element count. Only meaningful at a quiescent point.
    pub fn validate(&self) -> Result<usize, ListError> {
        let arena = self.arena;
        if !arena.is_linked(self.head) {
            return Ok(0);
        }

        let mut walk = Walk::new(arena, self.head);
        let mut count = 0;
        let mut last = None;
        let mut cur = self.head;
        loop {
            let next = walk.step(cur)?;
            if arena.prev(next) != cur.index() {
                return Err(ListError::Corrupted { element: next });
            }
            if next == self.head {
                return Ok(count);
            }

            let value = self.key_at(next)?.value();
            if last.is_some_and(|prev| prev > value) {
                return Err(ListError::Corrupted { element: next });
            }
            last = Some(value);
            count += 1;
            cur = next;
        }
    }
}
