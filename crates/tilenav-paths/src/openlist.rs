//! Binary min-heap over node ids, keyed by A* `f` cost.
//!
//! Entries are ordered by `(f, id)`: among equal `f` the smaller node id
//! comes out first. That tie-break decides which of several optimal paths
//! the search returns, so it is fixed here rather than left to insertion
//! order.

use std::cmp::Ordering;

const NOT_IN_HEAP: usize = usize::MAX;

/// One open-list entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeapEntry {
    pub id: usize,
    pub f: i32,
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.f.cmp(&other.f).then(self.id.cmp(&other.id))
    }
}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Array-backed binary min-heap with decrease-key.
///
/// `slots[id]` holds the heap position of node `id`, so [`replace`](Self::replace)
/// finds its entry in O(1). The backing array grows past its initial
/// capacity rather than dropping inserts.
#[derive(Debug, Clone)]
pub struct OpenList {
    heap: Vec<HeapEntry>,
    slots: Vec<usize>,
    capacity: usize,
    grew: bool,
}

impl OpenList {
    /// An empty list for ids `0..node_count` with room for `capacity` entries.
    pub fn new(node_count: usize, capacity: usize) -> Self {
        Self {
            heap: Vec::with_capacity(capacity),
            slots: vec![NOT_IN_HEAP; node_count],
            capacity,
            grew: false,
        }
    }

    /// Add a node. The id must not already be in the list.
    pub fn insert(&mut self, id: usize, f: i32) {
        debug_assert!(!self.contains(id), "node {id} inserted twice");
        if id >= self.slots.len() {
            self.slots.resize(id + 1, NOT_IN_HEAP);
        }
        if self.heap.len() == self.capacity && !self.grew {
            self.grew = true;
            log::warn!(
                "open list grew past its initial capacity of {}",
                self.capacity
            );
        }
        let slot = self.heap.len();
        self.heap.push(HeapEntry { id, f });
        self.slots[id] = slot;
        self.sift_up(slot);
    }

    /// Re-key a node already in the list. Returns `false` if it is absent.
    pub fn replace(&mut self, id: usize, f: i32) -> bool {
        let Some(&slot) = self.slots.get(id) else {
            return false;
        };
        if slot == NOT_IN_HEAP {
            return false;
        }
        self.heap[slot].f = f;
        let slot = self.sift_up(slot);
        self.sift_down(slot);
        true
    }

    /// The entry with the smallest `f`.
    #[inline]
    pub fn peek_min(&self) -> Option<HeapEntry> {
        self.heap.first().copied()
    }

    /// Remove and return the entry with the smallest `f`.
    pub fn pop_min(&mut self) -> Option<HeapEntry> {
        if self.heap.is_empty() {
            return None;
        }
        let last = self.heap.len() - 1;
        self.swap(0, last);
        let min = self.heap.pop()?;
        self.slots[min.id] = NOT_IN_HEAP;
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Some(min)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    #[inline]
    pub fn contains(&self, id: usize) -> bool {
        self.slots.get(id).is_some_and(|&s| s != NOT_IN_HEAP)
    }

    /// Remove every entry, keeping the allocation.
    pub fn clear(&mut self) {
        for e in &self.heap {
            self.slots[e.id] = NOT_IN_HEAP;
        }
        self.heap.clear();
        self.grew = false;
    }

    // -----------------------------------------------------------------------
    // Heap maintenance
    // -----------------------------------------------------------------------

    #[inline]
    fn swap(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.slots[self.heap[a].id] = a;
        self.slots[self.heap[b].id] = b;
    }

    /// Returns the slot the entry ended up in.
    fn sift_up(&mut self, mut slot: usize) -> usize {
        while slot > 0 {
            let parent = (slot - 1) / 2;
            if self.heap[slot] >= self.heap[parent] {
                break;
            }
            self.swap(slot, parent);
            slot = parent;
        }
        slot
    }

    fn sift_down(&mut self, mut slot: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * slot + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let child = if right < len && self.heap[right] < self.heap[left] {
                right
            } else {
                left
            };
            if self.heap[child] >= self.heap[slot] {
                break;
            }
            self.swap(slot, child);
            slot = child;
        }
    }

    #[cfg(test)]
    fn is_valid_heap(&self) -> bool {
        (1..self.heap.len()).all(|i| self.heap[(i - 1) / 2] <= self.heap[i])
            && self
                .heap
                .iter()
                .enumerate()
                .all(|(slot, e)| self.slots[e.id] == slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn pops_in_f_order() {
        let mut open = OpenList::new(10, 4);
        open.insert(3, 5);
        open.insert(1, 2);
        open.insert(7, 9);
        open.insert(4, 1);
        assert_eq!(open.peek_min(), Some(HeapEntry { id: 4, f: 1 }));
        let order: Vec<_> = std::iter::from_fn(|| open.pop_min()).map(|e| e.id).collect();
        assert_eq!(order, vec![4, 1, 3, 7]);
        assert!(open.is_empty());
    }

    #[test]
    fn equal_f_breaks_ties_by_id() {
        let mut open = OpenList::new(10, 8);
        for id in [6, 2, 9, 0] {
            open.insert(id, 3);
        }
        let order: Vec<_> = std::iter::from_fn(|| open.pop_min()).map(|e| e.id).collect();
        assert_eq!(order, vec![0, 2, 6, 9]);
    }

    #[test]
    fn replace_moves_entry_up() {
        let mut open = OpenList::new(8, 8);
        open.insert(0, 10);
        open.insert(1, 20);
        open.insert(2, 30);
        assert!(open.replace(2, 5));
        assert_eq!(open.peek_min(), Some(HeapEntry { id: 2, f: 5 }));
        assert!(!open.replace(5, 1));
        assert!(open.is_valid_heap());
    }

    #[test]
    fn grows_past_capacity() {
        let mut open = OpenList::new(16, 2);
        for id in 0..16 {
            open.insert(id, 16 - id as i32);
        }
        assert_eq!(open.len(), 16);
        assert_eq!(open.pop_min().map(|e| e.id), Some(15));
    }

    #[test]
    fn clear_forgets_membership() {
        let mut open = OpenList::new(4, 4);
        open.insert(1, 1);
        open.insert(2, 2);
        open.clear();
        assert!(open.is_empty());
        assert!(!open.contains(1));
        open.insert(1, 4);
        assert!(open.contains(1));
    }

    #[test]
    fn matches_sorted_reference_under_random_ops() {
        let mut rng = StdRng::seed_from_u64(7);
        let n = 64;
        let mut open = OpenList::new(n, 16);
        let mut reference: Vec<HeapEntry> = Vec::new();

        for _ in 0..2000 {
            match rng.random_range(0..3u32) {
                0 => {
                    let id = rng.random_range(0..n);
                    if !open.contains(id) {
                        let f = rng.random_range(0..50);
                        open.insert(id, f);
                        reference.push(HeapEntry { id, f });
                    }
                }
                1 if !reference.is_empty() => {
                    let k = rng.random_range(0..reference.len());
                    let f = reference[k].f - rng.random_range(0..5);
                    reference[k].f = f;
                    assert!(open.replace(reference[k].id, f));
                }
                _ => {
                    reference.sort();
                    let expected = if reference.is_empty() {
                        None
                    } else {
                        Some(reference.remove(0))
                    };
                    assert_eq!(open.pop_min(), expected);
                }
            }
            reference.sort();
            assert_eq!(open.peek_min(), reference.first().copied());
            assert_eq!(open.len(), reference.len());
            assert!(open.is_valid_heap());
        }
    }
}
