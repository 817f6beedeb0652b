/// What the sweep phase does with the marks left by the trace.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum SweepPolicy {
    /// Classify every chunk as reachable or garbage, leave the heap alone.
    #[default]
    Report,
    /// Free every unmarked chunk and compact the survivors.
    Reclaim,
}

/// This structure contains the configuration settings for a simulated program.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Maximum number of chunks the heap may hold at once. `None` means
    /// the heap grows without bound.
    pub heap_capacity: Option<usize>,
    /// Maximum number of distinct variables on the stack. `None` means
    /// unbounded.
    pub stack_capacity: Option<usize>,
    /// The sweep used by [`crate::ProgramState::collect`].
    pub sweep_policy: SweepPolicy,
}

pub const CONFIG_DEFAULT_HEAP_CAPACITY: usize = 16;
pub const CONFIG_DEFAULT_STACK_CAPACITY: usize = 8;

// The defaults mirror the small fixed arrays of the classroom demos, so a
// runaway scenario fails loudly instead of quietly growing.
impl Default for Config {
    fn default() -> Self {
        Config {
            heap_capacity: Some(CONFIG_DEFAULT_HEAP_CAPACITY),
            stack_capacity: Some(CONFIG_DEFAULT_STACK_CAPACITY),
            sweep_policy: SweepPolicy::Report,
        }
    }
}

impl Config {
    /// A config with no capacity limits on either region.
    pub fn unbounded() -> Self {
        Config {
            heap_capacity: None,
            stack_capacity: None,
            ..Config::default()
        }
    }

    pub fn with_policy(self, sweep_policy: SweepPolicy) -> Self {
        Config {
            sweep_policy,
            ..self
        }
    }
}
