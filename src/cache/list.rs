//! Recency List Module
//!
//! Doubly linked list of cache entries ordered by access time.

use generational_arena::{Arena, Index};

use crate::cache::CacheEntry;

#[derive(Debug)]
struct Node<K, V> {
    entry: CacheEntry<K, V>,
    prev: Option<Index>,
    next: Option<Index>,
}

// == Recency List ==
/// Arena-backed doubly linked list of entries.
///
/// - Head = Most recently used
/// - Tail = Least recently used
///
/// Nodes are addressed by their arena [`Index`], which stays valid until the
/// node is removed, so callers can keep it in a lookup map.
#[derive(Debug)]
pub struct RecencyList<K, V> {
    nodes: Arena<Node<K, V>>,
    head: Option<Index>,
    tail: Option<Index>,
}

impl<K, V> RecencyList<K, V> {
    // == Constructor ==
    pub fn new() -> Self {
        Self {
            nodes: Arena::new(),
            head: None,
            tail: None,
        }
    }

    // Detaches a node from its neighbours without freeing it.
    fn unlink(&mut self, index: Index) {
        let (prev, next) = {
            let node = &self.nodes[index];
            (node.prev, node.next)
        };

        match prev {
            Some(prev) => self.nodes[prev].next = next,
            None => self.head = next,
        }
        match next {
            Some(next) => self.nodes[next].prev = prev,
            None => self.tail = prev,
        }
    }

    // Links an already allocated node in as the new head.
    fn link_front(&mut self, index: Index) {
        let old_head = self.head;
        {
            let node = &mut self.nodes[index];
            node.prev = None;
            node.next = old_head;
        }

        if let Some(old_head) = old_head {
            self.nodes[old_head].prev = Some(index);
        }
        self.head = Some(index);

        if self.tail.is_none() {
            self.tail = Some(index);
        }
    }

    // == Push Front ==
    /// Inserts a new entry as most recently used and returns its index.
    pub fn push_front(&mut self, entry: CacheEntry<K, V>) -> Index {
        let index = self.nodes.insert(Node {
            entry,
            prev: None,
            next: None,
        });
        self.link_front(index);
        index
    }

    // == Move To Front ==
    /// Marks a node as most recently used.
    pub fn move_to_front(&mut self, index: Index) {
        if self.head == Some(index) || !self.nodes.contains(index) {
            return;
        }
        self.unlink(index);
        self.link_front(index);
    }

    // == Remove ==
    /// Unlinks and frees a node, returning its entry.
    pub fn remove(&mut self, index: Index) -> Option<CacheEntry<K, V>> {
        if !self.nodes.contains(index) {
            return None;
        }
        self.unlink(index);
        self.nodes.remove(index).map(|node| node.entry)
    }

    // == Pop Back ==
    /// Removes the least recently used entry.
    pub fn pop_back(&mut self) -> Option<CacheEntry<K, V>> {
        let tail = self.tail?;
        self.remove(tail)
    }

    pub fn get(&self, index: Index) -> Option<&CacheEntry<K, V>> {
        self.nodes.get(index).map(|node| &node.entry)
    }

    pub fn get_mut(&mut self, index: Index) -> Option<&mut CacheEntry<K, V>> {
        self.nodes.get_mut(index).map(|node| &mut node.entry)
    }

    // == Clear ==
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.head = None;
        self.tail = None;
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // == Iterate ==
    /// Walks entries from most to least recently used.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            list: self,
            cursor: self.head,
        }
    }
}

impl<K, V> Default for RecencyList<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Front-to-back iterator over a [`RecencyList`].
pub struct Iter<'a, K, V> {
    list: &'a RecencyList<K, V>,
    cursor: Option<Index>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (Index, &'a CacheEntry<K, V>);

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.cursor?;
        let list = self.list;
        let node = &list.nodes[index];
        self.cursor = node.next;
        Some((index, &node.entry))
    }
}
