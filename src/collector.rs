use crate::chunk::{ChunkId, HeapChunk};
use crate::config::SweepPolicy;
use crate::heap::Heap;
use crate::metrics::Metrics;
use crate::report::{Collection, Reachability, ReclaimSummary, ReportEntry, SweepReport};
use crate::stack::Stack;
use crate::trace::Tracer;
use log::debug;

/// What a single mark phase found.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MarkOutcome {
    /// Number of distinct chunks marked.
    pub marked: usize,
    /// Chunks in the order they were marked.
    pub visit_order: Vec<ChunkId>,
    /// References followed to chunks that had already been reclaimed.
    pub dangling: usize,
}

/// Runs mark and sweep cycles over a heap and keeps count of them.
#[derive(Debug, Default)]
pub struct Collector {
    metrics: Metrics,
}

impl Collector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears every mark, then marks everything reachable from the stack.
    pub fn mark(&mut self, heap: &mut Heap, stack: &Stack) -> MarkOutcome {
        debug!("Beginning mark phase over {} chunks", heap.len());

        heap.reset_marks();

        let mut tracer = Tracer::new();
        tracer.trace_root(stack);
        let marked = tracer.trace_loop(heap);
        let dangling = tracer.dangling();

        debug!("Mark complete! marked: {}, dangling: {}", marked, dangling);
        self.metrics.last_marked = marked;

        MarkOutcome {
            marked,
            visit_order: tracer.into_visited(),
            dangling,
        }
    }

    /// A full cycle: mark from the stack, then sweep with `policy`.
    pub fn collect(&mut self, heap: &mut Heap, stack: &Stack, policy: SweepPolicy) -> Collection {
        debug!("Starting {:?} collection", policy);

        if self.metrics.max_heap_size < heap.len() {
            self.metrics.max_heap_size = heap.len();
        }

        self.mark(heap, stack);

        let collection = match policy {
            SweepPolicy::Report => {
                self.metrics.report_collections += 1;
                Collection::Report(report(heap))
            }
            SweepPolicy::Reclaim => {
                let summary = reclaim(heap);

                self.metrics.reclaim_collections += 1;
                self.metrics.last_freed = summary.freed.len();
                self.metrics.total_freed += summary.freed.len();

                Collection::Reclaim(summary)
            }
        };

        self.metrics.collections += 1;

        collection
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }
}

/// Classifies every chunk by its current mark, without touching the heap.
pub fn report(heap: &Heap) -> SweepReport {
    let entries = heap
        .iter()
        .enumerate()
        .map(|(index, chunk)| ReportEntry {
            index,
            id: chunk.id(),
            label: chunk.label().to_string(),
            status: Reachability::from_mark(chunk.is_marked()),
        })
        .collect();

    SweepReport { entries }
}

/// Frees every unmarked chunk and clears the marks of the survivors.
pub fn reclaim(heap: &mut Heap) -> ReclaimSummary {
    let freed = heap.retain(HeapChunk::is_marked);

    heap.reset_marks();
    debug!("Sweep complete! freed: {}, kept: {}", freed.len(), heap.len());

    ReclaimSummary {
        kept: heap.len(),
        freed,
    }
}
