use super::trace::Trace;
use crate::chunk::ChunkId;
use crate::heap::Heap;
use log::{trace, warn};

/// Depth first marker driven by an explicit work list.
///
/// A chunk is marked when it is popped, and only if it is still unmarked.
/// That check happens before any of its references are pushed, so cycles
/// and shared children are visited exactly once. Children are pushed in
/// reverse so that pops follow slot order, giving the same preorder as a
/// recursive walk without using the native stack.
pub struct Tracer {
    work: Vec<ChunkId>,
    visited: Vec<ChunkId>,
    dangling: usize,
}

impl Default for Tracer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tracer {
    pub fn new() -> Self {
        Self {
            work: vec![],
            visited: vec![],
            dangling: 0,
        }
    }

    /// Queues `id` to be visited.
    pub fn trace(&mut self, id: ChunkId) {
        self.work.push(id);
    }

    /// Queues every reference held by `root` so that they are visited in
    /// the order `root` reports them.
    pub fn trace_root<T: Trace + ?Sized>(&mut self, root: &T) {
        let start = self.work.len();
        root.trace(self);
        self.work[start..].reverse();
    }

    pub fn get_mark_count(&self) -> usize {
        self.visited.len()
    }

    /// Chunks in the order they were marked.
    pub fn visited(&self) -> &[ChunkId] {
        &self.visited
    }

    /// Number of references followed to chunks no longer in the heap.
    pub fn dangling(&self) -> usize {
        self.dangling
    }

    pub fn into_visited(self) -> Vec<ChunkId> {
        self.visited
    }

    /// Drains the work list, marking everything reachable from it.
    /// Returns the total number of chunks this tracer has marked.
    pub fn trace_loop(&mut self, heap: &mut Heap) -> usize {
        while let Some(id) = self.work.pop() {
            let Some(chunk) = heap.get_mut(id) else {
                warn!("(TRACER) skipping dangling reference to {}", id);
                self.dangling += 1;
                continue;
            };

            if chunk.is_marked() {
                continue;
            }

            trace!("(TRACER) MARK {} ({})", id, chunk.label());
            chunk.set_marked(true);
            self.visited.push(id);

            let start = self.work.len();
            chunk.trace(self);
            self.work[start..].reverse();
        }

        self.get_mark_count()
    }
}
