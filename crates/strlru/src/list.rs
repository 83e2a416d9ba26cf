//! Recency list: an index-linked doubly-linked list of keys.
//!
//! Nodes live in a `Vec` arena and refer to each other by slot index, so a
//! slot index is a stable handle for as long as the key stays in the list.
//! Freed slots are recycled through a free list.

use std::sync::Arc;

/// Node in the recency list
struct Node {
    key: Arc<str>,
    prev: Option<usize>,
    next: Option<usize>,
}

/// Doubly-linked list of keys, front = most recently used
pub(crate) struct KeyList {
    nodes: Vec<Option<Node>>,
    head: Option<usize>,
    tail: Option<usize>,
    free_list: Vec<usize>,
    len: usize,
}

impl KeyList {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            head: None,
            tail: None,
            free_list: Vec::new(),
            len: 0,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Link `key` in at the front and return its slot.
    pub(crate) fn push_front(&mut self, key: Arc<str>) -> usize {
        let idx = self.alloc(Node {
            key,
            prev: None,
            next: None,
        });
        self.link_front(idx);
        self.len += 1;
        idx
    }

    pub(crate) fn move_to_front(&mut self, idx: usize) {
        if self.head == Some(idx) || self.nodes[idx].is_none() {
            return;
        }
        self.unlink(idx);
        self.link_front(idx);
    }

    /// Excise the node at `idx`, returning its key.
    pub(crate) fn remove(&mut self, idx: usize) -> Option<Arc<str>> {
        self.nodes[idx].as_ref()?;
        self.unlink(idx);
        let node = self.nodes[idx].take()?;
        self.free_list.push(idx);
        self.len -= 1;
        Some(node.key)
    }

    /// Remove and return the least recently used key.
    pub(crate) fn pop_back(&mut self) -> Option<Arc<str>> {
        let tail_idx = self.tail?;
        self.remove(tail_idx)
    }

    pub(crate) fn key(&self, idx: usize) -> Option<&Arc<str>> {
        self.nodes.get(idx)?.as_ref().map(|node| &node.key)
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.free_list.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    /// Iterate keys from most to least recently used.
    pub(crate) fn iter(&self) -> Iter<'_> {
        Iter {
            list: self,
            cursor: self.head,
            remaining: self.len,
        }
    }

    /// Slot-level view of the chain, for consistency checks.
    ///
    /// Yields `(slot, prev, next)` from head to tail and stops after `len`
    /// steps even if the links form a cycle.
    pub(crate) fn links(&self) -> impl Iterator<Item = (usize, Option<usize>, Option<usize>)> + '_ {
        let mut cursor = self.head;
        let mut remaining = self.len;
        std::iter::from_fn(move || {
            if remaining == 0 {
                return None;
            }
            let idx = cursor?;
            let node = self.nodes.get(idx)?.as_ref()?;
            cursor = node.next;
            remaining -= 1;
            Some((idx, node.prev, node.next))
        })
    }

    #[cfg(test)]
    pub(crate) fn head(&self) -> Option<usize> {
        self.head
    }

    pub(crate) fn tail(&self) -> Option<usize> {
        self.tail
    }

    /// Splice a detached node in ahead of the current head.
    fn link_front(&mut self, idx: usize) {
        let old_head = self.head;
        if let Some(node) = self.nodes[idx].as_mut() {
            node.prev = None;
            node.next = old_head;
        }
        match old_head.and_then(|h| self.nodes[h].as_mut()) {
            Some(head) => head.prev = Some(idx),
            None => self.tail = Some(idx),
        }
        self.head = Some(idx);
    }

    /// Detach a node from its neighbours, patching head/tail as needed.
    fn unlink(&mut self, idx: usize) {
        let Some((prev, next)) = self.nodes[idx].as_ref().map(|n| (n.prev, n.next)) else {
            return;
        };

        match prev.and_then(|p| self.nodes[p].as_mut()) {
            Some(before) => before.next = next,
            None => self.head = next,
        }
        match next.and_then(|n| self.nodes[n].as_mut()) {
            Some(after) => after.prev = prev,
            None => self.tail = prev,
        }
    }

    /// Place `node` in a recycled slot, or grow the arena.
    fn alloc(&mut self, node: Node) -> usize {
        match self.free_list.pop() {
            Some(idx) => {
                self.nodes[idx] = Some(node);
                idx
            }
            None => {
                self.nodes.push(Some(node));
                self.nodes.len() - 1
            }
        }
    }
}

/// Front-to-back key iterator
pub(crate) struct Iter<'a> {
    list: &'a KeyList,
    cursor: Option<usize>,
    remaining: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Arc<str>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.list.nodes.get(self.cursor?)?.as_ref()?;
        self.cursor = node.next;
        self.remaining -= 1;
        Some(&node.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(list: &KeyList) -> Vec<&str> {
        list.iter().map(|k| &**k).collect()
    }

    #[test]
    fn test_push_front_order() {
        let mut list = KeyList::with_capacity(4);

        list.push_front(Arc::from("a"));
        list.push_front(Arc::from("b"));
        list.push_front(Arc::from("c"));

        assert_eq!(keys(&list), vec!["c", "b", "a"]);
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_move_to_front() {
        let mut list = KeyList::with_capacity(4);

        let a = list.push_front(Arc::from("a"));
        list.push_front(Arc::from("b"));
        let c = list.push_front(Arc::from("c"));

        list.move_to_front(a);
        assert_eq!(keys(&list), vec!["a", "c", "b"]);

        // Already at front
        list.move_to_front(a);
        assert_eq!(keys(&list), vec!["a", "c", "b"]);

        list.move_to_front(c);
        assert_eq!(keys(&list), vec!["c", "a", "b"]);
        assert_eq!(list.key(list.tail().unwrap()).map(|k| &**k), Some("b"));
    }

    #[test]
    fn test_remove_middle_and_ends() {
        let mut list = KeyList::with_capacity(4);

        let a = list.push_front(Arc::from("a"));
        let b = list.push_front(Arc::from("b"));
        let c = list.push_front(Arc::from("c"));

        assert_eq!(list.remove(b).as_deref(), Some("b"));
        assert_eq!(keys(&list), vec!["c", "a"]);

        assert_eq!(list.remove(c).as_deref(), Some("c"));
        assert_eq!(keys(&list), vec!["a"]);
        assert_eq!(list.head(), Some(a));
        assert_eq!(list.tail(), Some(a));

        assert_eq!(list.remove(a).as_deref(), Some("a"));
        assert_eq!(list.len(), 0);
        assert_eq!(list.head(), None);
        assert_eq!(list.tail(), None);

        // Slot already freed
        assert_eq!(list.remove(a), None);
    }

    #[test]
    fn test_pop_back_and_slot_reuse() {
        let mut list = KeyList::with_capacity(2);

        let a = list.push_front(Arc::from("a"));
        list.push_front(Arc::from("b"));

        assert_eq!(list.pop_back().as_deref(), Some("a"));
        let c = list.push_front(Arc::from("c"));

        assert_eq!(c, a);
        assert_eq!(keys(&list), vec!["c", "b"]);
    }

    #[test]
    fn test_clear() {
        let mut list = KeyList::with_capacity(2);

        list.push_front(Arc::from("a"));
        list.push_front(Arc::from("b"));
        list.clear();

        assert_eq!(list.len(), 0);
        assert_eq!(list.pop_back(), None);
        assert_eq!(list.links().count(), 0);
    }
}
