//! Bounded top-k selection over point ids, ordered by distance then id.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// A candidate point and its distance to the query.
#[derive(Debug, Clone, Copy)]
pub struct Neighbor {
    pub distance: f32,
    pub id: usize,
}

impl Neighbor {
    pub fn new(id: usize, distance: f32) -> Self {
        Self { distance, id }
    }
}

impl PartialEq for Neighbor {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Neighbor {}

impl PartialOrd for Neighbor {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// Equal distances fall back to the id so every search breaks ties the same way.
impl Ord for Neighbor {
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance
            .total_cmp(&other.distance)
            .then_with(|| self.id.cmp(&other.id))
    }
}

/// Keeps the `limit` closest neighbours seen so far (furthest on top).
#[derive(Debug)]
pub struct TopK {
    heap: BinaryHeap<Neighbor>,
    limit: usize,
}

impl TopK {
    pub fn new(limit: usize) -> Self {
        Self {
            heap: BinaryHeap::new(),
            limit,
        }
    }

    pub fn push(&mut self, n: Neighbor) {
        if self.limit == 0 {
            return;
        }
        if self.heap.len() < self.limit {
            self.heap.push(n);
        } else if self.heap.peek().map_or(false, |worst| n < *worst) {
            self.heap.pop();
            self.heap.push(n);
        }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Drain into a Vec, nearest first.
    pub fn into_sorted_vec(self) -> Vec<Neighbor> {
        self.heap.into_sorted_vec()
    }
}
