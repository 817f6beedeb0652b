use crate::chunk::{ChunkId, HeapChunk};
use crate::collector::{self, Collector, MarkOutcome};
use crate::config::{Config, SweepPolicy};
use crate::error::GcError;
use crate::heap::Heap;
use crate::metrics::Metrics;
use crate::mutator::Mutator;
use crate::report::{Collection, SweepReport};
use crate::stack::Stack;

/// A simulated program: a stack of named roots and a heap of chunks.
///
/// Every mutating and collecting method takes `&mut self`, so a collection
/// always sees a graph that nothing else is changing.
pub struct ProgramState {
    heap: Heap,
    stack: Stack,
    collector: Collector,
    config: Config,
}

impl Default for ProgramState {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl ProgramState {
    pub fn new(config: Config) -> Self {
        Self {
            heap: Heap::new(config.heap_capacity),
            stack: Stack::new(config.stack_capacity),
            collector: Collector::new(),
            config,
        }
    }

    /// Provides a [`Mutator`] for allocating, binding and linking chunks.
    ///
    /// ```
    /// use marksweep::ProgramState;
    ///
    /// let mut state = ProgramState::default();
    ///
    /// let head = state.mutate(|mu| {
    ///     let head = mu.alloc("head")?;
    ///     let tail = mu.alloc("tail")?;
    ///
    ///     mu.append_reference(head, tail)?;
    ///     mu.set_var("list", Some(head))?;
    ///
    ///     Ok::<_, marksweep::GcError>(head)
    /// }).unwrap();
    ///
    /// state.mark();
    /// assert!(state.chunk(head).unwrap().is_marked());
    /// ```
    pub fn mutate<F, O>(&mut self, f: F) -> O
    where
        F: FnOnce(&mut Mutator<'_>) -> O,
    {
        let mut mutator = Mutator::new(&mut self.heap, &mut self.stack);

        f(&mut mutator)
    }

    pub fn allocate(&mut self, label: impl Into<String>) -> Result<ChunkId, GcError> {
        self.mutate(|mu| mu.alloc(label))
    }

    pub fn allocate_with_capacity(
        &mut self,
        label: impl Into<String>,
        capacity: usize,
    ) -> Result<ChunkId, GcError> {
        self.mutate(|mu| mu.alloc_with_capacity(label, capacity))
    }

    pub fn set_var(&mut self, name: &str, target: Option<ChunkId>) -> Result<(), GcError> {
        self.mutate(|mu| mu.set_var(name, target))
    }

    pub fn connect(
        &mut self,
        source: ChunkId,
        slot: usize,
        target: Option<ChunkId>,
    ) -> Result<(), GcError> {
        self.mutate(|mu| mu.connect(source, slot, target))
    }

    pub fn append_reference(&mut self, source: ChunkId, target: ChunkId) -> Result<(), GcError> {
        self.mutate(|mu| mu.append_reference(source, target))
    }

    /// Runs only the mark phase. Marks are left set for inspection.
    pub fn mark(&mut self) -> MarkOutcome {
        self.collector.mark(&mut self.heap, &self.stack)
    }

    /// Classifies chunks by their current marks without marking first.
    pub fn report(&self) -> SweepReport {
        collector::report(&self.heap)
    }

    /// A full mark and sweep cycle using the configured sweep policy.
    pub fn collect(&mut self) -> Collection {
        self.collect_with(self.config.sweep_policy)
    }

    pub fn collect_with(&mut self, policy: SweepPolicy) -> Collection {
        self.collector.collect(&mut self.heap, &self.stack, policy)
    }

    pub fn heap(&self) -> &Heap {
        &self.heap
    }

    pub fn stack(&self) -> &Stack {
        &self.stack
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn chunk(&self, id: ChunkId) -> Option<&HeapChunk> {
        self.heap.get(id)
    }

    pub fn var(&self, name: &str) -> Option<Option<ChunkId>> {
        self.stack.get(name)
    }

    pub fn metrics(&self) -> Metrics {
        Metrics {
            heap_size: self.heap.len(),
            ..*self.collector.metrics()
        }
    }
}
