use crate::chunk::ChunkId;
use crate::error::{GcError, Region};

/// A named root slot on the simulated stack.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Var {
    name: String,
    reference: Option<ChunkId>,
}

impl Var {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn reference(&self) -> Option<ChunkId> {
        self.reference
    }
}

/// The root set: variables in insertion order, unique by name.
///
/// The stack never owns chunks; a binding only keeps its target reachable.
#[derive(Clone, Debug, Default)]
pub struct Stack {
    vars: Vec<Var>,
    capacity: Option<usize>,
}

impl Stack {
    pub fn new(capacity: Option<usize>) -> Self {
        Self {
            vars: Vec::new(),
            capacity,
        }
    }

    /// Binds `name` to `target`, updating an existing binding in place.
    pub fn set_var(&mut self, name: &str, target: Option<ChunkId>) -> Result<(), GcError> {
        if let Some(var) = self.vars.iter_mut().find(|var| var.name == name) {
            var.reference = target;
            return Ok(());
        }

        if let Some(capacity) = self.capacity {
            if self.vars.len() >= capacity {
                return Err(GcError::AllocationExhausted {
                    region: Region::Stack,
                    name: name.to_string(),
                    capacity,
                });
            }
        }

        self.vars.push(Var {
            name: name.to_string(),
            reference: target,
        });

        Ok(())
    }

    /// `None` if nothing is named `name`, `Some(None)` if it is bound to
    /// nothing.
    pub fn get(&self, name: &str) -> Option<Option<ChunkId>> {
        self.vars
            .iter()
            .find(|var| var.name == name)
            .map(Var::reference)
    }

    /// Every non-empty binding in stack order. A chunk bound by two
    /// variables is yielded twice.
    pub fn roots(&self) -> impl Iterator<Item = ChunkId> + '_ {
        self.vars.iter().filter_map(Var::reference)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Var> + '_ {
        self.vars.iter()
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}
