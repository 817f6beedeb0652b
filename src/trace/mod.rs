mod trace;
mod tracer;

pub use trace::Trace;
pub use tracer::Tracer;
