//! Chain resolution: follow `base` references down to concrete models
//!
//! The walk is a small state machine so the same rules drive both the
//! in-memory resolver and the async one, which suspends at each lookup.

use std::collections::HashSet;
use tracing::debug;
use vmodel_schema::{ConcreteModelBase, ModelBase, VirtualModelDefinition};

use crate::error::{LookupError, ResolveError};
use crate::lookup::{AsyncDefinitionLookup, DefinitionLookup};

/// Maximum number of definitions in one chain
pub const MAX_CHAIN_DEPTH: usize = 32;

/// Definitions from most specific (the start) to least specific, plus the
/// concrete bases the last one points at.
#[derive(Debug, Clone, PartialEq)]
pub struct Chain {
    definitions: Vec<VirtualModelDefinition>,
    concrete_bases: Vec<ConcreteModelBase>,
}

impl Chain {
    /// Build a chain from already-ordered definitions. The last definition
    /// must have a concrete base.
    pub fn from_definitions(definitions: Vec<VirtualModelDefinition>) -> Option<Self> {
        let concrete_bases = match &definitions.last()?.base {
            ModelBase::Concrete(bases) => bases.clone(),
            ModelBase::Reference(_) => return None,
        };
        Some(Self {
            definitions,
            concrete_bases,
        })
    }

    pub fn definitions(&self) -> &[VirtualModelDefinition] {
        &self.definitions
    }

    pub fn concrete_bases(&self) -> &[ConcreteModelBase] {
        &self.concrete_bases
    }

    /// The starting model key
    pub fn model(&self) -> &str {
        &self.definitions[0].model
    }

    pub fn keys(&self) -> Vec<&str> {
        self.definitions.iter().map(|d| d.model.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

/// Cooperative traversal state
#[derive(Debug)]
pub struct ChainWalker {
    start: String,
    pending: String,
    path: Vec<String>,
    visited: HashSet<String>,
    definitions: Vec<VirtualModelDefinition>,
}

impl ChainWalker {
    pub fn new(start: impl Into<String>) -> Self {
        let start = start.into();
        let mut visited = HashSet::new();
        visited.insert(start.clone());
        Self {
            pending: start.clone(),
            path: vec![start.clone()],
            start,
            visited,
            definitions: Vec::new(),
        }
    }

    /// The key the walker is waiting on
    pub fn pending(&self) -> &str {
        &self.pending
    }

    /// Feed the answer for [`ChainWalker::pending`]. Returns the finished
    /// chain once a concrete base is reached, `None` while more lookups are
    /// needed.
    pub fn accept(
        &mut self,
        found: Result<Option<VirtualModelDefinition>, LookupError>,
    ) -> Result<Option<Chain>, ResolveError> {
        let definition = match found {
            Ok(Some(definition)) => definition,
            Ok(None) => return Err(self.unresolved(LookupError::NotFound)),
            Err(reason) => return Err(self.unresolved(reason)),
        };

        let next = match &definition.base {
            ModelBase::Concrete(bases) => {
                debug!(
                    model = %definition.model,
                    bases = bases.len(),
                    "chain reached concrete bases"
                );
                let concrete_bases = bases.clone();
                self.definitions.push(definition);
                return Ok(Some(Chain {
                    definitions: std::mem::take(&mut self.definitions),
                    concrete_bases,
                }));
            }
            ModelBase::Reference(next) => next.clone(),
        };

        debug!(model = %definition.model, base = %next, "following base reference");
        self.definitions.push(definition);

        if self.visited.contains(&next) {
            let from = self.path.iter().position(|k| k == &next).unwrap_or(0);
            let mut cycle = self.path[from..].to_vec();
            cycle.push(next);
            return Err(ResolveError::CyclicChain { cycle });
        }

        if self.path.len() >= MAX_CHAIN_DEPTH {
            return Err(ResolveError::ChainTooDeep {
                start: self.start.clone(),
                depth: MAX_CHAIN_DEPTH,
            });
        }

        self.visited.insert(next.clone());
        self.path.push(next.clone());
        self.pending = next;
        Ok(None)
    }

    fn unresolved(&self, reason: LookupError) -> ResolveError {
        ResolveError::UnresolvedBase {
            key: self.pending.clone(),
            reason,
        }
    }
}

/// Resolve the chain starting at `start` against an in-memory lookup
pub fn resolve_chain<L: DefinitionLookup + ?Sized>(
    start: &str,
    lookup: &L,
) -> Result<Chain, ResolveError> {
    let mut walker = ChainWalker::new(start);
    loop {
        let found = lookup.lookup(walker.pending());
        if let Some(chain) = walker.accept(Ok(found))? {
            return Ok(chain);
        }
    }
}

/// Resolve the chain starting at `start`, awaiting each lookup in turn
pub async fn resolve_chain_async<L: AsyncDefinitionLookup + ?Sized>(
    start: &str,
    lookup: &L,
) -> Result<Chain, ResolveError> {
    let mut walker = ChainWalker::new(start);
    loop {
        let found = lookup.lookup(walker.pending()).await;
        if let Some(chain) = walker.accept(found)? {
            return Ok(chain);
        }
    }
}
