use super::tracer::Tracer;
use crate::chunk::{ChunkId, HeapChunk};
use crate::stack::{Stack, Var};

/// Anything that can hold references into the heap.
///
/// Implementors report each reference they hold to the tracer, in order.
/// The tracer decides whether the target still needs visiting.
pub trait Trace {
    fn trace(&self, tracer: &mut Tracer);
}

impl Trace for ChunkId {
    fn trace(&self, tracer: &mut Tracer) {
        tracer.trace(*self);
    }
}

impl<T: Trace> Trace for Option<T> {
    fn trace(&self, tracer: &mut Tracer) {
        if let Some(value) = self.as_ref() {
            value.trace(tracer)
        }
    }
}

impl<T: Trace> Trace for [T] {
    fn trace(&self, tracer: &mut Tracer) {
        for item in self.iter() {
            item.trace(tracer)
        }
    }
}

impl Trace for HeapChunk {
    fn trace(&self, tracer: &mut Tracer) {
        self.references().trace(tracer)
    }
}

impl Trace for Var {
    fn trace(&self, tracer: &mut Tracer) {
        self.reference().trace(tracer)
    }
}

impl Trace for Stack {
    fn trace(&self, tracer: &mut Tracer) {
        for var in self.iter() {
            var.trace(tracer)
        }
    }
}
