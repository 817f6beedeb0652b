use crate::chunk::ChunkId;
use crate::heap::{FreedChunk, Heap};
use crate::state::ProgramState;
use std::fmt;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Reachability {
    Reachable,
    Garbage,
}

impl Reachability {
    pub fn from_mark(marked: bool) -> Self {
        if marked {
            Reachability::Reachable
        } else {
            Reachability::Garbage
        }
    }
}

impl fmt::Display for Reachability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reachability::Reachable => f.write_str("reachable"),
            Reachability::Garbage => f.write_str("garbage"),
        }
    }
}

/// The classification of one chunk by the report sweep.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportEntry {
    /// Position of the chunk in registry order.
    pub index: usize,
    pub id: ChunkId,
    pub label: String,
    pub status: Reachability,
}

impl fmt::Display for ReportEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "HeapChunk[{}] @ {} ({}) is {}.",
            self.index, self.id, self.label, self.status
        )
    }
}

/// Output of the report sweep, one entry per chunk in registry order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SweepReport {
    pub entries: Vec<ReportEntry>,
}

impl SweepReport {
    pub fn reachable(&self) -> impl Iterator<Item = &ReportEntry> + '_ {
        self.entries
            .iter()
            .filter(|entry| entry.status == Reachability::Reachable)
    }

    pub fn garbage(&self) -> impl Iterator<Item = &ReportEntry> + '_ {
        self.entries
            .iter()
            .filter(|entry| entry.status == Reachability::Garbage)
    }

    pub fn status_of(&self, id: ChunkId) -> Option<Reachability> {
        self.entries
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| entry.status)
    }
}

impl fmt::Display for SweepReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in self.entries.iter() {
            writeln!(f, "{}", entry)?;
        }

        Ok(())
    }
}

/// Output of the reclaim sweep.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReclaimSummary {
    /// Chunks left in the heap.
    pub kept: usize,
    /// Chunks removed, in the registry order they had before the sweep.
    pub freed: Vec<FreedChunk>,
}

impl fmt::Display for ReclaimSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Freed {} chunk(s), kept {}.", self.freed.len(), self.kept)?;

        for chunk in self.freed.iter() {
            writeln!(f, "  freed {} ({})", chunk.id, chunk.label)?;
        }

        Ok(())
    }
}

/// The result of one full mark and sweep cycle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Collection {
    Report(SweepReport),
    Reclaim(ReclaimSummary),
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Collection::Report(report) => fmt::Display::fmt(report, f),
            Collection::Reclaim(summary) => fmt::Display::fmt(summary, f),
        }
    }
}

// Labels for the state dump. A reference to a freed chunk is still printed
// so that a dangling binding is visible rather than hidden.
fn target_label(heap: &Heap, target: Option<ChunkId>) -> String {
    match target {
        None => "NULL".to_string(),
        Some(id) => match heap.get(id) {
            Some(chunk) => chunk.label().to_string(),
            None => format!("<freed {}>", id),
        },
    }
}

impl fmt::Display for ProgramState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let heap = self.heap();

        writeln!(f, "Stack:")?;
        for var in self.stack().iter() {
            writeln!(f, "  {} -> {}", var.name(), target_label(heap, var.reference()))?;
        }

        writeln!(f)?;
        writeln!(f, "Heap:")?;
        for chunk in heap.iter() {
            write!(
                f,
                "  {} (marked={}) refs:",
                chunk.label(),
                u8::from(chunk.is_marked())
            )?;

            for target in chunk.references() {
                write!(f, " {}", target_label(heap, *target))?;
            }

            writeln!(f)?;
        }

        Ok(())
    }
}
