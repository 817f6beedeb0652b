use crate::chunk::{ChunkId, EdgeLayout, HeapChunk};
use crate::error::{GcError, Region};
use log::trace;

/// A chunk removed from the heap by [`Heap::retain`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FreedChunk {
    pub id: ChunkId,
    pub label: String,
}

/// The registry of every live chunk.
///
/// Chunks live in `slots`, indexed by their id. `order` is the dense
/// registry sequence in allocation order; compaction rewrites `order` and
/// empties the slots of freed chunks, which releases their edge storage.
pub struct Heap {
    slots: Vec<Option<HeapChunk>>,
    order: Vec<ChunkId>,
    capacity: Option<usize>,
}

impl Heap {
    pub fn new(capacity: Option<usize>) -> Self {
        Self {
            slots: Vec::new(),
            order: Vec::new(),
            capacity,
        }
    }

    pub fn allocate(&mut self, label: String, layout: EdgeLayout) -> Result<ChunkId, GcError> {
        if let Some(capacity) = self.capacity {
            if self.order.len() >= capacity {
                return Err(GcError::AllocationExhausted {
                    region: Region::Heap,
                    name: label,
                    capacity,
                });
            }
        }

        let id = match u32::try_from(self.slots.len()) {
            Ok(raw) => ChunkId(raw),
            Err(_) => {
                return Err(GcError::AllocationExhausted {
                    region: Region::Heap,
                    name: label,
                    capacity: self.slots.len(),
                })
            }
        };
        trace!("ALLOC {} ({}) {:?}", id, label, layout);

        self.slots.push(Some(HeapChunk::new(id, label, layout)));
        self.order.push(id);

        Ok(id)
    }

    pub fn get(&self, id: ChunkId) -> Option<&HeapChunk> {
        self.slots.get(id.index()).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, id: ChunkId) -> Option<&mut HeapChunk> {
        self.slots.get_mut(id.index()).and_then(Option::as_mut)
    }

    pub(crate) fn live(&mut self, id: ChunkId) -> Result<&mut HeapChunk, GcError> {
        self.get_mut(id).ok_or(GcError::DanglingHandle(id))
    }

    pub fn contains(&self, id: ChunkId) -> bool {
        self.get(id).is_some()
    }

    /// True if `id` was ever handed out by this heap, live or not.
    pub fn issued(&self, id: ChunkId) -> bool {
        id.index() < self.slots.len()
    }

    pub(crate) fn check_issued(&self, id: ChunkId) -> Result<(), GcError> {
        if self.issued(id) {
            Ok(())
        } else {
            Err(GcError::ForeignHandle(id))
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    /// Ids of every live chunk in registry order.
    pub fn ids(&self) -> &[ChunkId] {
        &self.order
    }

    /// Every live chunk in registry order.
    pub fn iter(&self) -> impl Iterator<Item = &HeapChunk> + '_ {
        self.order.iter().filter_map(|id| self.get(*id))
    }

    pub fn reset_marks(&mut self) {
        for id in self.order.iter() {
            if let Some(chunk) = self.slots[id.index()].as_mut() {
                chunk.set_marked(false);
            }
        }
    }

    /// Removes every chunk failing `keep`, preserving the relative order of
    /// the survivors. This is the only way a chunk ever leaves the heap.
    pub fn retain<F>(&mut self, mut keep: F) -> Vec<FreedChunk>
    where
        F: FnMut(&HeapChunk) -> bool,
    {
        let mut freed = vec![];
        let slots = &mut self.slots;

        self.order.retain(|id| {
            let slot = &mut slots[id.index()];
            let kept = slot.as_ref().is_some_and(|chunk| keep(chunk));

            if !kept {
                if let Some(chunk) = slot.take() {
                    trace!("FREE {} ({})", chunk.id(), chunk.label());
                    freed.push(FreedChunk {
                        id: chunk.id(),
                        label: chunk.label().to_string(),
                    });
                }
            }

            kept
        });

        freed
    }
}
