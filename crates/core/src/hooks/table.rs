//! Registered hooks, keyed by function path

use std::collections::HashMap;

use kitsy_engine::{Engine, FnPath};

use super::chain::compose;
use super::types::{Hook, HookError, HookPosition};

/// Befores and afters registered for one path
#[derive(Debug, Clone)]
pub struct HookList {
    path: FnPath,
    befores: Vec<Hook>,
    afters: Vec<Hook>,
}

impl HookList {
    fn new(path: FnPath) -> Self {
        Self {
            path,
            befores: Vec::new(),
            afters: Vec::new(),
        }
    }

    pub fn path(&self) -> &FnPath {
        &self.path
    }

    pub fn befores(&self) -> &[Hook] {
        &self.befores
    }

    pub fn afters(&self) -> &[Hook] {
        &self.afters
    }
}

/// All hook lists in first-registration order
///
/// Lists are append-only. They stay in place after composition as the record
/// of what was applied.
#[derive(Debug, Default)]
pub struct HookTable {
    lists: Vec<HookList>,
    by_path: HashMap<String, usize>,
}

impl HookTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `hook` to the list for `path`, creating the list if absent
    pub fn push(&mut self, path: &str, position: HookPosition, hook: Hook) -> Result<(), HookError> {
        let index = match self.by_path.get(path) {
            Some(index) => *index,
            None => {
                let parsed =
                    FnPath::parse(path).map_err(|_| HookError::InvalidPath(path.to_string()))?;
                self.lists.push(HookList::new(parsed));
                self.by_path.insert(path.to_string(), self.lists.len() - 1);
                self.lists.len() - 1
            }
        };

        let list = &mut self.lists[index];
        match position {
            HookPosition::Before => list.befores.push(hook),
            HookPosition::After => list.afters.push(hook),
        }

        tracing::trace!(
            "Added {:?} hook for '{}' (total: {} before, {} after)",
            position,
            path,
            list.befores.len(),
            list.afters.len()
        );
        Ok(())
    }

    pub fn get(&self, path: &str) -> Option<&HookList> {
        self.by_path.get(path).map(|index| &self.lists[*index])
    }

    pub fn iter(&self) -> impl Iterator<Item = &HookList> {
        self.lists.iter()
    }

    /// Number of hooked paths
    pub fn len(&self) -> usize {
        self.lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    /// Replace every hooked function on `engine` with its composed chain
    ///
    /// Stops at the first path whose owning object cannot be resolved; paths
    /// composed before it stay composed.
    pub fn apply(&self, engine: &Engine) -> Result<usize, HookError> {
        for list in &self.lists {
            let wrap = |source| HookError::Engine {
                path: list.path.to_string(),
                source,
            };

            let original = engine.lookup(&list.path).map_err(wrap)?;
            if original.is_none() {
                tracing::debug!("'{}' has no original function, composing hooks only", list.path);
            }

            let composed = compose(list.path.as_str(), &list.befores, original, &list.afters);
            engine.replace(&list.path, composed).map_err(wrap)?;

            tracing::debug!(
                "Hooked '{}' ({} before, {} after)",
                list.path,
                list.befores.len(),
                list.afters.len()
            );
        }
        Ok(self.lists.len())
    }
}
