//! Sentinel-bounded doubly linked list backed by `SlotArena`.
//!
//! Nodes live in a [`SlotArena`] and link to each other by [`SlotId`]. Two
//! sentinel nodes, `head` and `tail`, are allocated up front and never carry a
//! value, so splicing at either end needs no special cases for an empty list.
//!
//! ## Architecture
//!
//! ```text
//!   arena (SlotArena<Node<T>>)
//!   ┌────────┬─────────────────────────────────────────────────┐
//!   │ SlotId │ Node { value, prev, next }                      │
//!   ├────────┼─────────────────────────────────────────────────┤
//!   │ 0      │ head: { None, prev: None,     next: Some(2) }   │
//!   │ 1      │ tail: { None, prev: Some(3),  next: None }      │
//!   │ 2      │ { Some(A), prev: Some(0), next: Some(3) }       │
//!   │ 3      │ { Some(B), prev: Some(2), next: Some(1) }       │
//!   └────────┴─────────────────────────────────────────────────┘
//!
//!   head ─► [A] ◄──► [B] ◄── tail
//!           LRU      MRU
//! ```
//!
//! The front (`head.next`) is the least recently used value and the back
//! (`tail.prev`) the most recently used one.
//!
//! ## Invariants
//! - `head.prev` and `tail.next` are `None`; every real node has both links.
//! - For every real node `n`: `n.prev.next == n` and `n.next.prev == n`.
//! - Walking `head.next .. tail` visits each live value exactly once.
//!
//! `check_invariants()` verifies all of the above in O(n).
//!
//! ## Performance
//! - `push_back` / `pop_front` / `move_to_back` / `remove`: O(1)
//! - `iter`: O(n)

use crate::ds::slot_arena::{SlotArena, SlotId};
use crate::error::InvariantError;

#[derive(Debug)]
struct Node<T> {
    value: Option<T>,
    prev: Option<SlotId>,
    next: Option<SlotId>,
}

impl<T> Node<T> {
    fn sentinel() -> Self {
        Self {
            value: None,
            prev: None,
            next: None,
        }
    }
}

/// Recency-ordered list of values, least recently used at the front.
#[derive(Debug)]
pub struct RecencyList<T> {
    arena: SlotArena<Node<T>>,
    head: SlotId,
    tail: SlotId,
}

impl<T> RecencyList<T> {
    /// Creates an empty list (two sentinel slots allocated).
    pub fn new() -> Self {
        Self::with_arena(SlotArena::new())
    }

    /// Creates an empty list with room for `capacity` values.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_arena(SlotArena::with_capacity(capacity.saturating_add(2)))
    }

    fn with_arena(mut arena: SlotArena<Node<T>>) -> Self {
        let head = arena.insert(Node::sentinel());
        let tail = arena.insert(Node::sentinel());
        if let Some(node) = arena.get_mut(head) {
            node.next = Some(tail);
        }
        if let Some(node) = arena.get_mut(tail) {
            node.prev = Some(head);
        }
        Self { arena, head, tail }
    }

    /// Returns the number of values in the list.
    pub fn len(&self) -> usize {
        self.arena.len() - 2
    }

    /// Returns `true` if the list holds no values.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if `id` refers to a live value in this list.
    pub fn contains(&self, id: SlotId) -> bool {
        !self.is_sentinel(id) && self.arena.contains(id)
    }

    /// Returns the SlotId of the least recently used value.
    pub fn front_id(&self) -> Option<SlotId> {
        let next = self.arena.get(self.head)?.next?;
        (next != self.tail).then_some(next)
    }

    /// Returns the SlotId of the most recently used value.
    pub fn back_id(&self) -> Option<SlotId> {
        let prev = self.arena.get(self.tail)?.prev?;
        (prev != self.head).then_some(prev)
    }

    /// Returns the least recently used value.
    pub fn front(&self) -> Option<&T> {
        self.front_id().and_then(|id| self.get(id))
    }

    /// Returns the most recently used value.
    pub fn back(&self) -> Option<&T> {
        self.back_id().and_then(|id| self.get(id))
    }

    /// Returns the value for a node id, if present.
    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.arena.get(id).and_then(|node| node.value.as_ref())
    }

    /// Returns a mutable reference to a node value, if present.
    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.arena.get_mut(id).and_then(|node| node.value.as_mut())
    }

    /// Appends a value at the most recently used end and returns its `SlotId`.
    pub fn push_back(&mut self, value: T) -> SlotId {
        let id = self.arena.insert(Node {
            value: Some(value),
            prev: None,
            next: None,
        });
        self.link_before_tail(id);
        id
    }

    /// Removes and returns the least recently used value.
    pub fn pop_front(&mut self) -> Option<T> {
        let id = self.front_id()?;
        self.remove(id)
    }

    /// Removes the node `id` from the list and returns its value.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        if !self.contains(id) {
            return None;
        }
        self.unlink(id);
        self.arena.remove(id).and_then(|node| node.value)
    }

    /// Moves an existing node to the most recently used end.
    ///
    /// Returns `false` if `id` is not a live node.
    pub fn move_to_back(&mut self, id: SlotId) -> bool {
        if !self.contains(id) {
            return false;
        }
        if self.back_id() == Some(id) {
            return true;
        }
        self.unlink(id);
        self.link_before_tail(id);
        true
    }

    /// Drops every value and resets the sentinels.
    pub fn clear(&mut self) {
        self.arena.clear();
        *self = Self::with_arena(std::mem::take(&mut self.arena));
    }

    /// Iterates values from least to most recently used.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> + ExactSizeIterator + '_ {
        self.iter_entries().map(|(_, value)| value)
    }

    /// Iterates SlotIds from least to most recently used.
    pub fn iter_ids(&self) -> impl DoubleEndedIterator<Item = SlotId> + ExactSizeIterator + '_ {
        self.iter_entries().map(|(id, _)| id)
    }

    /// Iterates `(SlotId, &T)` pairs from least to most recently used.
    pub fn iter_entries(&self) -> RecencyIter<'_, T> {
        RecencyIter {
            list: self,
            front: self.arena.get(self.head).and_then(|node| node.next),
            back: self.arena.get(self.tail).and_then(|node| node.prev),
            remaining: self.len(),
        }
    }

    /// Walks the list and verifies sentinel and link invariants.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let head = self
            .arena
            .get(self.head)
            .ok_or_else(|| InvariantError::new("head sentinel missing from arena"))?;
        let tail = self
            .arena
            .get(self.tail)
            .ok_or_else(|| InvariantError::new("tail sentinel missing from arena"))?;
        if head.value.is_some() || tail.value.is_some() {
            return Err(InvariantError::new("sentinel node carries a value"));
        }
        if head.prev.is_some() {
            return Err(InvariantError::new("head sentinel has a prev link"));
        }
        if tail.next.is_some() {
            return Err(InvariantError::new("tail sentinel has a next link"));
        }

        let mut count = 0usize;
        let mut prev = self.head;
        let mut current = head
            .next
            .ok_or_else(|| InvariantError::new("head sentinel has no next link"))?;

        while current != self.tail {
            count += 1;
            if count > self.len() {
                return Err(InvariantError::new(format!(
                    "walked {} nodes but len is {} (cycle or orphan)",
                    count,
                    self.len()
                )));
            }
            let node = self.arena.get(current).ok_or_else(|| {
                InvariantError::new(format!("stale SlotId {:?} in list", current))
            })?;
            if node.value.is_none() {
                return Err(InvariantError::new(format!(
                    "node {:?} between sentinels has no value",
                    current
                )));
            }
            if node.prev != Some(prev) {
                return Err(InvariantError::new(format!(
                    "node {:?} prev link is {:?}, expected {:?}",
                    current, node.prev, prev
                )));
            }
            prev = current;
            current = node.next.ok_or_else(|| {
                InvariantError::new(format!("node {:?} has no next link", prev))
            })?;
        }

        if tail.prev != Some(prev) {
            return Err(InvariantError::new(format!(
                "tail prev link is {:?}, expected {:?}",
                tail.prev, prev
            )));
        }
        if count != self.len() {
            return Err(InvariantError::new(format!(
                "walked {} nodes but len is {}",
                count,
                self.len()
            )));
        }
        Ok(())
    }

    fn is_sentinel(&self, id: SlotId) -> bool {
        id == self.head || id == self.tail
    }

    /// Splices `id` out, leaving its slot allocated with cleared links.
    fn unlink(&mut self, id: SlotId) -> Option<()> {
        let (prev, next) = {
            let node = self.arena.get(id)?;
            (node.prev?, node.next?)
        };

        if let Some(prev_node) = self.arena.get_mut(prev) {
            prev_node.next = Some(next);
        }
        if let Some(next_node) = self.arena.get_mut(next) {
            next_node.prev = Some(prev);
        }
        if let Some(node) = self.arena.get_mut(id) {
            node.prev = None;
            node.next = None;
        }
        Some(())
    }

    /// Splices a detached node `id` in immediately before `tail`.
    fn link_before_tail(&mut self, id: SlotId) -> Option<()> {
        let tail = self.tail;
        let last = self.arena.get(tail)?.prev?;

        let node = self.arena.get_mut(id)?;
        node.prev = Some(last);
        node.next = Some(tail);

        if let Some(last_node) = self.arena.get_mut(last) {
            last_node.next = Some(id);
        }
        if let Some(tail_node) = self.arena.get_mut(tail) {
            tail_node.prev = Some(id);
        }
        Some(())
    }
}

impl<T> Default for RecencyList<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over `(SlotId, &T)` pairs, least to most recently used.
pub struct RecencyIter<'a, T> {
    list: &'a RecencyList<T>,
    front: Option<SlotId>,
    back: Option<SlotId>,
    remaining: usize,
}

impl<'a, T> Iterator for RecencyIter<'a, T> {
    type Item = (SlotId, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.front?;
        let node = self.list.arena.get(id)?;
        self.front = node.next;
        self.remaining -= 1;
        Some((id, node.value.as_ref()?))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for RecencyIter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.back?;
        let node = self.list.arena.get(id)?;
        self.back = node.prev;
        self.remaining -= 1;
        Some((id, node.value.as_ref()?))
    }
}

impl<T> ExactSizeIterator for RecencyIter<'_, T> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(list: &RecencyList<u32>) -> Vec<u32> {
        list.iter().copied().collect()
    }

    #[test]
    fn recency_list_starts_empty_with_linked_sentinels() {
        let list: RecencyList<u32> = RecencyList::new();
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
        assert_eq!(list.front_id(), None);
        assert_eq!(list.back_id(), None);
        assert_eq!(list.iter().count(), 0);
        list.check_invariants().unwrap();
    }

    #[test]
    fn recency_list_push_back_orders_lru_to_mru() {
        let mut list = RecencyList::new();
        let a = list.push_back(1);
        list.push_back(2);
        let c = list.push_back(3);

        assert_eq!(values(&list), vec![1, 2, 3]);
        assert_eq!(list.front_id(), Some(a));
        assert_eq!(list.back_id(), Some(c));
        assert_eq!(list.front(), Some(&1));
        assert_eq!(list.back(), Some(&3));
        list.check_invariants().unwrap();
    }

    #[test]
    fn recency_list_move_to_back_edges() {
        let mut list = RecencyList::new();
        let a = list.push_back(1);
        let b = list.push_back(2);
        let c = list.push_back(3);

        assert!(list.move_to_back(a));
        assert_eq!(values(&list), vec![2, 3, 1]);

        // Already at the back.
        assert!(list.move_to_back(a));
        assert_eq!(values(&list), vec![2, 3, 1]);

        assert!(list.move_to_back(c));
        assert_eq!(values(&list), vec![2, 1, 3]);

        assert!(list.move_to_back(b));
        assert_eq!(values(&list), vec![1, 3, 2]);
        list.check_invariants().unwrap();
    }

    #[test]
    fn recency_list_rejects_sentinel_and_stale_ids() {
        let mut list = RecencyList::new();
        let a = list.push_back(10u32);
        let head = list.head;
        let tail = list.tail;

        assert!(!list.contains(head));
        assert!(!list.contains(tail));
        assert!(!list.move_to_back(head));
        assert_eq!(list.remove(tail), None);
        assert_eq!(list.get(head), None);

        assert_eq!(list.remove(a), Some(10));
        assert!(!list.move_to_back(a));
        assert_eq!(list.remove(a), None);
        list.check_invariants().unwrap();
    }

    #[test]
    fn recency_list_remove_middle_and_ends() {
        let mut list = RecencyList::new();
        let a = list.push_back(1);
        let b = list.push_back(2);
        let c = list.push_back(3);

        assert_eq!(list.remove(b), Some(2));
        assert_eq!(values(&list), vec![1, 3]);
        list.check_invariants().unwrap();

        assert_eq!(list.remove(a), Some(1));
        assert_eq!(values(&list), vec![3]);
        assert_eq!(list.front_id(), Some(c));
        assert_eq!(list.back_id(), Some(c));

        assert_eq!(list.remove(c), Some(3));
        assert!(list.is_empty());
        list.check_invariants().unwrap();
    }

    #[test]
    fn recency_list_pop_front_drains_in_order() {
        let mut list = RecencyList::new();
        for v in 0..5 {
            list.push_back(v);
        }
        let drained: Vec<_> = std::iter::from_fn(|| list.pop_front()).collect();
        assert_eq!(drained, vec![0, 1, 2, 3, 4]);
        assert_eq!(list.pop_front(), None);
        list.check_invariants().unwrap();
    }

    #[test]
    fn recency_list_reuses_freed_slots() {
        let mut list = RecencyList::new();
        let a = list.push_back(1u32);
        list.remove(a);
        let b = list.push_back(2);
        assert_eq!(a, b);
        assert_eq!(values(&list), vec![2]);
        list.check_invariants().unwrap();
    }

    #[test]
    fn recency_list_clear_resets_state() {
        let mut list = RecencyList::with_capacity(4);
        list.push_back(1u32);
        list.push_back(2);
        list.clear();

        assert!(list.is_empty());
        assert_eq!(list.front(), None);
        list.check_invariants().unwrap();

        list.push_back(3);
        assert_eq!(values(&list), vec![3]);
        list.check_invariants().unwrap();
    }

    #[test]
    fn recency_list_get_mut_updates_value() {
        let mut list = RecencyList::new();
        let id = list.push_back(5u32);
        if let Some(value) = list.get_mut(id) {
            *value = 50;
        }
        assert_eq!(list.get(id), Some(&50));
    }

    #[test]
    fn recency_list_iterates_both_directions() {
        let mut list = RecencyList::new();
        let ids: Vec<_> = (0..4u32).map(|v| list.push_back(v)).collect();

        assert_eq!(list.iter_ids().collect::<Vec<_>>(), ids);
        assert_eq!(list.iter().rev().copied().collect::<Vec<_>>(), vec![3, 2, 1, 0]);
        assert_eq!(list.iter().len(), 4);

        let mut iter = list.iter();
        assert_eq!(iter.next(), Some(&0));
        assert_eq!(iter.next_back(), Some(&3));
        assert_eq!(iter.next(), Some(&1));
        assert_eq!(iter.next_back(), Some(&2));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
    }

    #[test]
    fn recency_list_detects_broken_back_link() {
        let mut list = RecencyList::new();
        list.push_back(1u32);
        let b = list.push_back(2);
        if let Some(node) = list.arena.get_mut(b) {
            node.prev = Some(b);
        }
        let err = list.check_invariants().unwrap_err();
        assert!(err.message().contains("prev link"));
    }

    #[test]
    fn recency_list_detects_orphaned_node() {
        let mut list = RecencyList::new();
        list.push_back(1u32);
        let b = list.push_back(2);
        list.push_back(3);
        // Splice b out without freeing its slot.
        list.unlink(b);
        assert!(list.check_invariants().is_err());
    }
}
