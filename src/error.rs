use crate::chunk::ChunkId;
use std::fmt;

/// The simulated memory region that ran out of room.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Region {
    Heap,
    Stack,
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Region::Heap => f.write_str("heap"),
            Region::Stack => f.write_str("stack"),
        }
    }
}

/// Every failure the simulator can report.
///
/// These are construction bugs in whatever is driving the simulator, not
/// conditions to retry. A driver is expected to abort on the first one.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GcError {
    #[error("{region} capacity of {capacity} exceeded when allocating {name}")]
    AllocationExhausted {
        region: Region,
        name: String,
        capacity: usize,
    },
    #[error("reference index {index} out of bounds for {label} (capacity {capacity})")]
    IndexOutOfBounds {
        label: String,
        index: usize,
        capacity: usize,
    },
    #[error("{0} refers to a chunk that has been reclaimed")]
    DanglingHandle(ChunkId),
    #[error("{0} was never allocated by this heap")]
    ForeignHandle(ChunkId),
}
