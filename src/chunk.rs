use crate::error::GcError;
use std::fmt;

/// A stable handle to a chunk in a [`crate::heap::Heap`].
///
/// Ids are handed out in allocation order and are never reused, so a handle
/// to a reclaimed chunk stays dangling instead of aliasing a newer chunk.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChunkId(pub(crate) u32);

impl ChunkId {
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ChunkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:04x}", self.0)
    }
}

/// How a chunk's outgoing references are stored.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EdgeLayout {
    /// A fixed number of slots, all empty at allocation and written by index.
    Fixed(usize),
    /// Starts empty and gains one slot per appended reference.
    Growable,
}

/// One unit of allocation on the simulated heap.
#[derive(Clone, Debug)]
pub struct HeapChunk {
    id: ChunkId,
    label: String,
    marked: bool,
    layout: EdgeLayout,
    references: Vec<Option<ChunkId>>,
}

impl HeapChunk {
    pub(crate) fn new(id: ChunkId, label: String, layout: EdgeLayout) -> Self {
        let references = match layout {
            EdgeLayout::Fixed(capacity) => vec![None; capacity],
            EdgeLayout::Growable => Vec::new(),
        };

        Self {
            id,
            label,
            marked: false,
            layout,
            references,
        }
    }

    pub fn id(&self) -> ChunkId {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_marked(&self) -> bool {
        self.marked
    }

    pub(crate) fn set_marked(&mut self, marked: bool) {
        self.marked = marked;
    }

    pub fn layout(&self) -> EdgeLayout {
        self.layout
    }

    /// Outgoing references in slot order. Empty slots are `None`.
    pub fn references(&self) -> &[Option<ChunkId>] {
        &self.references
    }

    pub(crate) fn set_reference(
        &mut self,
        slot: usize,
        target: Option<ChunkId>,
    ) -> Result<(), GcError> {
        match self.references.get_mut(slot) {
            Some(edge) => {
                *edge = target;
                Ok(())
            }
            None => Err(GcError::IndexOutOfBounds {
                label: self.label.clone(),
                index: slot,
                capacity: self.references.len(),
            }),
        }
    }

    pub(crate) fn push_reference(&mut self, target: ChunkId) -> Result<(), GcError> {
        if let EdgeLayout::Fixed(capacity) = self.layout {
            return Err(GcError::IndexOutOfBounds {
                label: self.label.clone(),
                index: capacity,
                capacity,
            });
        }

        self.references.push(Some(target));
        Ok(())
    }
}
