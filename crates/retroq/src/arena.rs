//! Slab-style arena for timeline nodes.
//!
//! The timeline is a doubly linked chain, but the links are stable arena
//! indices rather than pointers. The arena owns every node; freed slots go
//! onto an explicit free list and are only handed out again by `alloc`.
//! A removed event is therefore reclaimed exactly once, and no alias to it
//! can outlive the removal.

use crate::time::LogicalTime;

/// Stable index of a live node slot.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct NodeIdx(usize);

/// One enqueue event plus its chronological chain links.
#[derive(Debug)]
pub(crate) struct Node<V> {
    pub time: LogicalTime,
    pub value: V,
    pub prev: Option<NodeIdx>,
    pub next: Option<NodeIdx>,
}

#[derive(Debug)]
enum Slot<V> {
    Occupied(Node<V>),
    Vacant { next_free: Option<usize> },
}

/// Arena of timeline nodes with free-list reclamation.
///
/// Callers must only pass indices of live nodes; the queue upholds this by
/// dropping every index to a node when it frees it (same discipline as the
/// `slab` crate).
#[derive(Debug)]
pub(crate) struct NodeArena<V> {
    slots: Vec<Slot<V>>,
    free_head: Option<usize>,
    len: usize,
}

impl<V> NodeArena<V> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_head: None,
            len: 0,
        }
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Allocate an unlinked node, reusing a vacant slot when one exists.
    pub fn alloc(&mut self, time: LogicalTime, value: V) -> NodeIdx {
        let node = Node {
            time,
            value,
            prev: None,
            next: None,
        };
        self.len += 1;
        match self.free_head {
            Some(slot) => {
                let next_free = match &self.slots[slot] {
                    Slot::Vacant { next_free } => *next_free,
                    Slot::Occupied(_) => unreachable!("free list points at occupied slot"),
                };
                self.free_head = next_free;
                self.slots[slot] = Slot::Occupied(node);
                NodeIdx(slot)
            }
            None => {
                self.slots.push(Slot::Occupied(node));
                NodeIdx(self.slots.len() - 1)
            }
        }
    }

    /// Free a node, returning it by value. The slot joins the free list.
    pub fn free(&mut self, idx: NodeIdx) -> Node<V> {
        let slot = std::mem::replace(
            &mut self.slots[idx.0],
            Slot::Vacant {
                next_free: self.free_head,
            },
        );
        self.free_head = Some(idx.0);
        self.len -= 1;
        match slot {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => unreachable!("freed a vacant slot"),
        }
    }

    pub fn get(&self, idx: NodeIdx) -> &Node<V> {
        match &self.slots[idx.0] {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => unreachable!("read a vacant slot"),
        }
    }

    pub fn get_mut(&mut self, idx: NodeIdx) -> &mut Node<V> {
        match &mut self.slots[idx.0] {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => unreachable!("wrote a vacant slot"),
        }
    }
}
