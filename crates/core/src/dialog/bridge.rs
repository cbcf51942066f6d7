//! Dialogue tag registration and installation

use std::collections::HashMap;
use std::sync::Arc;

use bitflags::bitflags;
use kitsy_engine::{Engine, FnPath, TagFn, Value};

use super::queue::{DeferredQueue, TagCall};
use super::syntax::convert_tag_syntax;
use crate::config::EnginePaths;
use crate::hooks::{Hook, HookError, HookPosition, HookTable};

/// Suffix naming the immediate half of a dual tag
pub const IMMEDIATE_SUFFIX: &str = "Now";

bitflags! {
    /// How a dialogue tag runs its handler
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct TagMode: u8 {
        /// Handler runs as soon as the interpreter reaches the tag
        const IMMEDIATE = 0x01;
        /// Handler runs once the dialogue box closes
        const DEFERRED = 0x02;
    }
}

/// A registered dialogue tag
pub struct DialogTagEntry {
    tag: String,
    handler: TagFn,
    deferred: Option<Arc<DeferredQueue>>,
}

impl DialogTagEntry {
    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn is_deferred(&self) -> bool {
        self.deferred.is_some()
    }

    /// Calls waiting for the dialogue box to close
    pub fn pending(&self) -> usize {
        self.deferred.as_ref().map(|q| q.len()).unwrap_or(0)
    }

    /// The function placed in the engine's tag table
    fn dispatch_fn(&self) -> TagFn {
        match &self.deferred {
            None => self.handler.clone(),
            Some(queue) => {
                let queue = queue.clone();
                Arc::new(move |environment: &Value, parameters: &[Value]| {
                    queue.push(TagCall {
                        environment: environment.clone(),
                        parameters: parameters.to_vec(),
                    });
                    Value::Null
                })
            }
        }
    }
}

/// All registered dialogue tags
#[derive(Default)]
pub(crate) struct DialogTags {
    entries: Vec<DialogTagEntry>,
    by_tag: HashMap<String, usize>,
}

impl DialogTags {
    /// Register `tag` according to `mode`
    ///
    /// With both flags set, the immediate variant is registered as
    /// `<tag>Now` and the deferred one as `<tag>`, sharing `handler`.
    /// Returns `false` if any of the names was already taken; names that were
    /// free are still registered.
    pub fn register(
        &mut self,
        tag: &str,
        mode: TagMode,
        handler: TagFn,
        hooks: &mut HookTable,
        paths: &EnginePaths,
    ) -> Result<bool, HookError> {
        if !is_valid_tag_name(tag) {
            return Err(HookError::InvalidTag(tag.to_string()));
        }
        for path in [&paths.load_game, &paths.dialog_exit, &paths.reset] {
            FnPath::parse(path).map_err(|_| HookError::InvalidPath(path.clone()))?;
        }

        let registered = if mode == TagMode::IMMEDIATE | TagMode::DEFERRED {
            let now = format!("{tag}{IMMEDIATE_SUFFIX}");
            let immediate = self.register_one(&now, false, handler.clone(), hooks, paths)?;
            let deferred = self.register_one(tag, true, handler, hooks, paths)?;
            immediate && deferred
        } else {
            let deferred = mode.contains(TagMode::DEFERRED);
            self.register_one(tag, deferred, handler, hooks, paths)?
        };
        Ok(registered)
    }

    fn register_one(
        &mut self,
        tag: &str,
        deferred: bool,
        handler: TagFn,
        hooks: &mut HookTable,
        paths: &EnginePaths,
    ) -> Result<bool, HookError> {
        if self.by_tag.contains_key(tag) {
            tracing::warn!("The dialog tag \"{}\" already exists", tag);
            return Ok(false);
        }

        hooks.push(&paths.load_game, HookPosition::Before, rewrite_hook(tag))?;

        let queue = if deferred {
            let queue = Arc::new(DeferredQueue::new());
            hooks.push(
                &paths.dialog_exit,
                HookPosition::After,
                drain_hook(tag, queue.clone(), handler.clone()),
            )?;
            hooks.push(&paths.reset, HookPosition::After, clear_hook(tag, queue.clone()))?;
            Some(queue)
        } else {
            None
        };

        self.entries.push(DialogTagEntry {
            tag: tag.to_string(),
            handler,
            deferred: queue,
        });
        self.by_tag.insert(tag.to_string(), self.entries.len() - 1);

        tracing::debug!(
            "Registered {} dialog tag '{}'",
            if deferred { "deferred" } else { "immediate" },
            tag
        );
        Ok(true)
    }

    pub fn get(&self, tag: &str) -> Option<&DialogTagEntry> {
        self.by_tag.get(tag).map(|index| &self.entries[*index])
    }

    pub fn iter(&self) -> impl Iterator<Item = &DialogTagEntry> {
        self.entries.iter()
    }

    /// Put every tag into the engine's tag table
    pub fn install(&self, engine: &Engine) -> usize {
        for entry in &self.entries {
            engine.tags().insert(&entry.tag, entry.dispatch_fn());
        }
        self.entries.len()
    }
}

fn is_valid_tag_name(tag: &str) -> bool {
    !tag.is_empty()
        && !tag
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '(' | ')' | '{' | '}' | '"' | '\\'))
}

/// Rewrites convenience calls in freshly loaded game data
fn rewrite_hook(tag: &str) -> Hook {
    let tag = tag.to_string();
    Hook::sync(move |args| match args.first() {
        Some(Value::String(data)) => {
            let mut rewritten = args.to_vec();
            rewritten[0] = Value::String(convert_tag_syntax(data, &tag));
            Value::Array(rewritten)
        }
        _ => Value::Null,
    })
}

fn drain_hook(tag: &str, queue: Arc<DeferredQueue>, handler: TagFn) -> Hook {
    let tag = tag.to_string();
    Hook::sync(move |_| {
        let ran = queue.drain(|call| {
            handler(&call.environment, &call.parameters);
        });
        if ran > 0 {
            tracing::trace!("Ran {} deferred '{}' call(s)", ran, tag);
        }
        Value::Null
    })
}

fn clear_hook(tag: &str, queue: Arc<DeferredQueue>) -> Hook {
    let tag = tag.to_string();
    Hook::sync(move |_| {
        let dropped = queue.clear();
        if dropped > 0 {
            tracing::debug!("Dropped {} pending '{}' call(s) on reset", dropped, tag);
        }
        Value::Null
    })
}
