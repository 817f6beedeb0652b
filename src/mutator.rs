use crate::chunk::{ChunkId, EdgeLayout, HeapChunk};
use crate::error::GcError;
use crate::heap::Heap;
use crate::stack::Stack;
use log::trace;

/// A mutation context over a program's heap and stack.
///
/// Holding a `Mutator` borrows the whole program state, so no collection can
/// run while the graph is being rewired.
pub struct Mutator<'s> {
    heap: &'s mut Heap,
    stack: &'s mut Stack,
}

impl<'s> Mutator<'s> {
    pub(crate) fn new(heap: &'s mut Heap, stack: &'s mut Stack) -> Self {
        Self { heap, stack }
    }

    /// Allocates a chunk with no references that grows one slot per
    /// [`Mutator::append_reference`].
    pub fn alloc(&mut self, label: impl Into<String>) -> Result<ChunkId, GcError> {
        self.heap.allocate(label.into(), EdgeLayout::Growable)
    }

    /// Allocates a chunk with `capacity` empty reference slots.
    pub fn alloc_with_capacity(
        &mut self,
        label: impl Into<String>,
        capacity: usize,
    ) -> Result<ChunkId, GcError> {
        self.heap.allocate(label.into(), EdgeLayout::Fixed(capacity))
    }

    pub fn set_var(&mut self, name: &str, target: Option<ChunkId>) -> Result<(), GcError> {
        trace!("SET {} -> {:?}", name, target);
        if let Some(target) = target {
            self.heap.check_issued(target)?;
        }
        self.stack.set_var(name, target)
    }

    /// Writes `target` into reference slot `slot` of `source`.
    ///
    /// Targets may be freed chunks, but must have come from this heap.
    pub fn connect(
        &mut self,
        source: ChunkId,
        slot: usize,
        target: Option<ChunkId>,
    ) -> Result<(), GcError> {
        trace!("CONNECT {}[{}] -> {:?}", source, slot, target);
        if let Some(target) = target {
            self.heap.check_issued(target)?;
        }
        self.heap.live(source)?.set_reference(slot, target)
    }

    /// Adds one reference from `source` to `target`.
    pub fn append_reference(&mut self, source: ChunkId, target: ChunkId) -> Result<(), GcError> {
        trace!("APPEND {} -> {}", source, target);
        self.heap.check_issued(target)?;
        self.heap.live(source)?.push_reference(target)
    }

    pub fn chunk(&self, id: ChunkId) -> Option<&HeapChunk> {
        self.heap.get(id)
    }

    pub fn var(&self, name: &str) -> Option<Option<ChunkId>> {
        self.stack.get(name)
    }
}
