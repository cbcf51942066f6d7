//! Hook composition
//!
//! Turns the `befores` / original / `afters` triple registered for a path
//! into a single function installed in place of the original.
//!
//! # Chain semantics
//!
//! Steps run strictly in order: befores (registration order), the original
//! (if the path had one), afters (registration order). Each step sees the
//! current argument list:
//!
//! - A sync step returning a non-empty array replaces the arguments for the
//!   next step. Its return is captured as the chain result, except that a hook
//!   returning `Null` leaves the captured result alone (the original's return
//!   is always captured).
//! - An async step receives the arguments and a [`Resume`]. The composed
//!   function returns `Null` to its caller immediately; the remaining steps
//!   run when `Resume` is consumed, and the final result is returned from that
//!   call instead.

use std::sync::Arc;

use kitsy_engine::{host_fn, HostFn, Value};

use super::types::Hook;

#[derive(Clone)]
enum Step {
    Hook(Hook),
    Original(HostFn),
}

/// State of one invocation of a composed function
struct ChainRun {
    path: Arc<str>,
    steps: Arc<[Step]>,
    index: usize,
    args: Vec<Value>,
    result: Value,
}

impl ChainRun {
    fn run(mut self) -> Value {
        while let Some(step) = self.steps.get(self.index).cloned() {
            self.index += 1;
            match step {
                Step::Original(f) => {
                    let value = f(&self.args);
                    self.capture(value, true);
                }
                Step::Hook(Hook::Sync(f)) => {
                    let value = f(&self.args);
                    self.capture(value, false);
                }
                Step::Hook(Hook::Async(f)) => {
                    tracing::trace!("Chain '{}' suspended at step {}", self.path, self.index - 1);
                    let args = self.args.clone();
                    f(args, Resume { run: Some(self) });
                    return Value::Null;
                }
            }
        }
        self.result
    }

    fn capture(&mut self, value: Value, from_original: bool) {
        if let Value::Array(items) = &value {
            if !items.is_empty() {
                self.args = items.clone();
            }
        }
        if from_original || !value.is_null() {
            self.result = value;
        }
    }
}

/// Continuation handed to an asynchronous hook
///
/// Consuming it runs the rest of the chain, so a chain can never be resumed
/// twice. Dropping it unused stalls the chain for good; that is logged.
pub struct Resume {
    run: Option<ChainRun>,
}

impl Resume {
    /// Continue the chain with the current arguments
    pub fn resume(mut self) -> Value {
        match self.run.take() {
            Some(run) => run.run(),
            None => Value::Null,
        }
    }

    /// Continue the chain, replacing the arguments
    pub fn resume_with(mut self, args: Vec<Value>) -> Value {
        match self.run.take() {
            Some(mut run) => {
                run.args = args;
                run.run()
            }
            None => Value::Null,
        }
    }

    /// Path of the composed function this continuation belongs to
    pub fn path(&self) -> &str {
        self.run.as_ref().map(|run| &*run.path).unwrap_or("")
    }
}

impl Drop for Resume {
    fn drop(&mut self) {
        if let Some(run) = &self.run {
            tracing::warn!(
                "Asynchronous hook on '{}' dropped its continuation; remaining {} step(s) will never run",
                run.path,
                run.steps.len() - run.index
            );
        }
    }
}

/// Build the composed function for `path`
pub(crate) fn compose(path: &str, befores: &[Hook], original: Option<HostFn>, afters: &[Hook]) -> HostFn {
    let steps: Arc<[Step]> = befores
        .iter()
        .cloned()
        .map(Step::Hook)
        .chain(original.map(Step::Original))
        .chain(afters.iter().cloned().map(Step::Hook))
        .collect();
    let path: Arc<str> = Arc::from(path);

    host_fn(move |args| {
        ChainRun {
            path: path.clone(),
            steps: steps.clone(),
            index: 0,
            args: args.to_vec(),
            result: Value::Null,
        }
        .run()
    })
}
