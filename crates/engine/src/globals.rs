//! Engine host state
//!
//! [`Engine`] is the live target the toolkit patches: the object graph of
//! engine functions, the page's script document, the dialogue tag table and
//! the factories that construct engine subsystems.
//!
//! # Locking
//!
//! Function handles are cloned out of the graph before they are invoked, so
//! a running function may freely call back into the engine.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;
use serde_json::Value;

use crate::document::{ScriptDocument, ScriptKey};
use crate::error::EngineError;
use crate::object::{HostFn, Member, Object};
use crate::path::FnPath;
use crate::tags::{scan_tags, TagTable};

/// Builds a fresh subsystem object
pub type SubsystemFactory = Arc<dyn Fn(&Engine) -> Object + Send + Sync>;

/// Runs script elements inserted into the document
///
/// This is the seam where a host re-parses patched source text.
pub trait ScriptExecutor: Send + Sync {
    fn execute(&self, engine: &Engine, key: ScriptKey, source: &str);
}

/// Host engine state
pub struct Engine {
    root: RwLock<Object>,
    document: RwLock<ScriptDocument>,
    tags: TagTable,
    subsystems: RwLock<HashMap<String, SubsystemFactory>>,
    executor: RwLock<Option<Arc<dyn ScriptExecutor>>>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    pub fn new() -> Self {
        Self {
            root: RwLock::new(Object::new()),
            document: RwLock::new(ScriptDocument::new()),
            tags: TagTable::new(),
            subsystems: RwLock::new(HashMap::new()),
            executor: RwLock::new(None),
        }
    }

    /// Create an engine whose page holds the given script document
    pub fn with_document(document: ScriptDocument) -> Self {
        let engine = Self::new();
        *engine.document.write() = document;
        engine
    }

    /// Set the executor that runs newly inserted scripts
    pub fn set_executor(&self, executor: Arc<dyn ScriptExecutor>) {
        *self.executor.write() = Some(executor);
    }

    // === Object graph ===

    /// Define a function at `path`, creating intermediate objects
    pub fn define(&self, path: &str, f: HostFn) -> Result<(), EngineError> {
        let path = FnPath::parse(path)?;
        self.root
            .write()
            .walk_or_create(path.parent())?
            .insert(path.name(), Member::Function(f));
        Ok(())
    }

    /// Install an object at a top-level name
    pub fn define_object(&self, name: &str, object: Object) {
        self.root.write().insert(name, Member::Object(object));
    }

    /// Resolve the function at `path`
    ///
    /// Fails if an intermediate object is missing. Returns `Ok(None)` when
    /// the owning object exists but has no function under the final name.
    pub fn lookup(&self, path: &FnPath) -> Result<Option<HostFn>, EngineError> {
        let root = self.root.read();
        let owner = root.walk(path.parent())?;
        Ok(owner.function(path.name()))
    }

    /// Install `f` at `path`, returning whatever function was there before
    pub fn replace(&self, path: &FnPath, f: HostFn) -> Result<Option<HostFn>, EngineError> {
        let mut root = self.root.write();
        let owner = root.walk_mut(path.parent())?;
        let previous = owner.insert(path.name(), Member::Function(f));
        Ok(match previous {
            Some(Member::Function(old)) => Some(old),
            _ => None,
        })
    }

    /// Call the function at `path`
    pub fn call(&self, path: &str, args: &[Value]) -> Result<Value, EngineError> {
        let parsed = FnPath::parse(path)?;
        let f = self
            .lookup(&parsed)?
            .ok_or_else(|| EngineError::UnknownFunction(path.to_string()))?;
        Ok(f(args))
    }

    // === Script document ===

    /// The page's script elements
    pub fn document(&self) -> &RwLock<ScriptDocument> {
        &self.document
    }

    /// Run a document element through the executor, if one is set
    pub fn execute_script(&self, key: ScriptKey) -> Result<(), EngineError> {
        let source = self
            .document
            .read()
            .text(key)
            .map(str::to_string)
            .ok_or(EngineError::UnknownScript)?;

        let executor = self.executor.read().clone();
        match executor {
            Some(executor) => executor.execute(self, key, &source),
            None => tracing::trace!("No script executor set, script not run"),
        }
        Ok(())
    }

    // === Subsystems ===

    /// Register the factory for a subsystem installed at the root
    pub fn register_subsystem<F>(&self, name: &str, factory: F)
    where
        F: Fn(&Engine) -> Object + Send + Sync + 'static,
    {
        self.subsystems
            .write()
            .insert(name.to_string(), Arc::new(factory));
    }

    pub fn has_subsystem(&self, name: &str) -> bool {
        self.subsystems.read().contains_key(name)
    }

    /// Construct a fresh subsystem object, replacing the existing one
    pub fn rebuild_subsystem(&self, name: &str) -> Result<(), EngineError> {
        let factory = self
            .subsystems
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| EngineError::UnknownSubsystem(name.to_string()))?;

        let object = factory(self);
        self.root.write().insert(name, Member::Object(object));
        tracing::debug!("Rebuilt subsystem '{}'", name);
        Ok(())
    }

    // === Dialogue ===

    /// The dialogue tag dispatch table
    pub fn tags(&self) -> &TagTable {
        &self.tags
    }

    /// Evaluate dialogue text, dispatching each registered tag in order
    ///
    /// Unknown tags are skipped. Returns the result of every dispatched tag.
    pub fn run_dialog(&self, text: &str, environment: &Value) -> Vec<Value> {
        scan_tags(text)
            .into_iter()
            .filter_map(|tag| match self.tags.get(&tag.name) {
                Some(f) => Some(f(environment, &tag.params)),
                None => {
                    tracing::trace!("Skipping unknown dialogue tag '{}'", tag.name);
                    None
                }
            })
            .collect()
    }
}

/// Global engine storage
static ENGINE: OnceLock<Arc<Engine>> = OnceLock::new();

/// Initialize the global engine
///
/// Called once when the page is loaded. Returns error if already initialized.
pub fn init_engine(engine: Arc<Engine>) -> Result<(), &'static str> {
    ENGINE
        .set(engine)
        .map_err(|_| "Engine already initialized")
}

/// Try to get the global engine
pub fn try_engine() -> Option<Arc<Engine>> {
    ENGINE.get().cloned()
}

/// Check if the global engine is initialized
pub fn is_engine_initialized() -> bool {
    ENGINE.get().is_some()
}
