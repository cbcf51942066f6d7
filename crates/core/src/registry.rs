//! The toolkit registry
//!
//! [`Kitsy`] collects everything hacks register while they load (source
//! injections, hooks and dialogue tags) and applies all of it to the engine
//! in one pass, exactly once.
//!
//! # Apply order
//!
//! 1. Injections, in registration order
//! 2. Subsystem reinitialization
//! 3. Dialogue tag installation
//! 4. Hook composition for every hooked path
//!
//! A failed step stops the pass; earlier steps stay applied.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

use kitsy_engine::{Engine, TagFn, Value};
use parking_lot::RwLock;
use regex::Captures;

use crate::bootstrap;
use crate::config::{EnginePaths, KitsyConfig};
use crate::dialog::{DialogTags, TagMode};
use crate::error::KitsyError;
use crate::hooks::{Hook, HookError, HookPosition, HookTable, Resume};
use crate::inject::{apply_injection, replace_fn, Fragment, InjectionRequest, Replacement, SearchPattern};
use crate::reinit::{Reinitializer, SubsystemReinitializer};

/// What one apply pass did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplyReport {
    pub injections: usize,
    pub subsystems: usize,
    pub dialog_tags: usize,
    pub hooked_paths: usize,
}

#[derive(Default)]
struct Registry {
    injections: Vec<InjectionRequest>,
    hooks: HookTable,
    dialog_tags: DialogTags,
}

/// Hook, injection and dialogue tag registry
pub struct Kitsy {
    registry: RwLock<Registry>,
    paths: EnginePaths,
    reinitializer: RwLock<Arc<dyn Reinitializer>>,
    applied: AtomicBool,
}

impl Default for Kitsy {
    fn default() -> Self {
        Self::new()
    }
}

impl Kitsy {
    /// Create a registry with the default engine paths
    pub fn new() -> Self {
        Self::with_config(&KitsyConfig::default())
    }

    /// Create a registry using the paths and rebuild order from `config`
    pub fn with_config(config: &KitsyConfig) -> Self {
        Self {
            registry: RwLock::new(Registry::default()),
            paths: config.engine.clone(),
            reinitializer: RwLock::new(Arc::new(SubsystemReinitializer::new(config.reinit.clone()))),
            applied: AtomicBool::new(false),
        }
    }

    /// Replace the subsystem rebuild step
    pub fn set_reinitializer<R>(&self, reinitializer: R)
    where
        R: Reinitializer + 'static,
    {
        *self.reinitializer.write() = Arc::new(reinitializer);
    }

    pub fn paths(&self) -> &EnginePaths {
        &self.paths
    }

    // === Injections ===

    /// Queue a source injection
    ///
    /// Replacement fragments are flattened and concatenated. Returns `false`
    /// if an identical injection is already queued.
    pub fn inject<P, R>(&self, pattern: P, replacement: R) -> bool
    where
        P: Into<SearchPattern>,
        R: Into<Fragment>,
    {
        let text = replacement.into().flatten();
        self.queue_injection(InjectionRequest::new(pattern.into(), Replacement::Text(text)))
    }

    /// Queue a source injection whose replacement is computed from the match
    pub fn inject_with<P, F>(&self, pattern: P, replacement: F) -> bool
    where
        P: Into<SearchPattern>,
        F: Fn(&Captures) -> String + Send + Sync + 'static,
    {
        self.queue_injection(InjectionRequest::new(
            pattern.into(),
            Replacement::Computed(replace_fn(replacement)),
        ))
    }

    fn queue_injection(&self, request: InjectionRequest) -> bool {
        let mut registry = self.registry.write();
        if registry.injections.contains(&request) {
            tracing::warn!("Ignored duplicate inject for {}", request.pattern);
            return false;
        }
        tracing::debug!("Queued inject for {}", request.pattern);
        registry.injections.push(request);
        true
    }

    pub fn injection_count(&self) -> usize {
        self.registry.read().injections.len()
    }

    // === Hooks ===

    /// Run `hook` before the function at `path`
    pub fn before<F>(&self, path: &str, hook: F) -> Result<(), HookError>
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        self.add_hook(path, HookPosition::Before, Hook::sync(hook))
    }

    /// Run `hook` after the function at `path`
    pub fn after<F>(&self, path: &str, hook: F) -> Result<(), HookError>
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        self.add_hook(path, HookPosition::After, Hook::sync(hook))
    }

    /// Run an asynchronous `hook` before the function at `path`
    pub fn before_async<F>(&self, path: &str, hook: F) -> Result<(), HookError>
    where
        F: Fn(Vec<Value>, Resume) + Send + Sync + 'static,
    {
        self.add_hook(path, HookPosition::Before, Hook::asynchronous(hook))
    }

    /// Run an asynchronous `hook` after the function at `path`
    pub fn after_async<F>(&self, path: &str, hook: F) -> Result<(), HookError>
    where
        F: Fn(Vec<Value>, Resume) + Send + Sync + 'static,
    {
        self.add_hook(path, HookPosition::After, Hook::asynchronous(hook))
    }

    /// Register an already built hook
    pub fn add_hook(&self, path: &str, position: HookPosition, hook: Hook) -> Result<(), HookError> {
        if self.is_applied() {
            tracing::warn!("Hook on '{}' registered after apply; it will not be composed", path);
        }
        self.registry.write().hooks.push(path, position, hook)
    }

    /// Number of (before, after) hooks registered for `path`
    pub fn hook_counts(&self, path: &str) -> (usize, usize) {
        self.registry
            .read()
            .hooks
            .get(path)
            .map(|list| (list.befores().len(), list.afters().len()))
            .unwrap_or((0, 0))
    }

    // === Dialogue tags ===

    /// Add a tag whose handler runs when the interpreter reaches it
    pub fn add_dialog_tag<F>(&self, tag: &str, handler: F) -> Result<bool, HookError>
    where
        F: Fn(&Value, &[Value]) -> Value + Send + Sync + 'static,
    {
        self.add_tag(tag, TagMode::IMMEDIATE, handler)
    }

    /// Add a tag whose handler runs once the dialogue box closes
    pub fn add_deferred_dialog_tag<F>(&self, tag: &str, handler: F) -> Result<bool, HookError>
    where
        F: Fn(&Value, &[Value]) -> Value + Send + Sync + 'static,
    {
        self.add_tag(tag, TagMode::DEFERRED, handler)
    }

    /// Add `<tag>Now` (immediate) and `<tag>` (deferred) sharing `handler`
    pub fn add_dual_dialog_tag<F>(&self, tag: &str, handler: F) -> Result<bool, HookError>
    where
        F: Fn(&Value, &[Value]) -> Value + Send + Sync + 'static,
    {
        self.add_tag(tag, TagMode::IMMEDIATE | TagMode::DEFERRED, handler)
    }

    /// Add a tag in the given mode
    ///
    /// Returns `Ok(false)` if the tag name is already registered; the first
    /// registration wins.
    pub fn add_tag<F>(&self, tag: &str, mode: TagMode, handler: F) -> Result<bool, HookError>
    where
        F: Fn(&Value, &[Value]) -> Value + Send + Sync + 'static,
    {
        if self.is_applied() {
            tracing::warn!("Dialog tag '{}' registered after apply; it will not be installed", tag);
        }
        let handler: TagFn = Arc::new(handler);
        let mut registry = self.registry.write();
        let Registry {
            hooks, dialog_tags, ..
        } = &mut *registry;
        dialog_tags.register(tag, mode, handler, hooks, &self.paths)
    }

    /// Registered tag names in registration order
    pub fn dialog_tags(&self) -> Vec<String> {
        self.registry
            .read()
            .dialog_tags
            .iter()
            .map(|entry| entry.tag().to_string())
            .collect()
    }

    /// Calls of a deferred tag waiting for the dialogue box to close
    pub fn pending_dialog_calls(&self, tag: &str) -> Option<usize> {
        self.registry.read().dialog_tags.get(tag).map(|entry| entry.pending())
    }

    // === Apply ===

    pub fn is_applied(&self) -> bool {
        self.applied.load(Ordering::Acquire)
    }

    /// Apply everything registered so far to `engine`
    ///
    /// Runs once per registry; later calls return `Ok(None)`. The pass is not
    /// retried after a failure.
    #[tracing::instrument(skip_all)]
    pub fn apply(&self, engine: &Engine) -> Result<Option<ApplyReport>, KitsyError> {
        if self.applied.swap(true, Ordering::AcqRel) {
            tracing::debug!("Kitsy already applied, skipping");
            return Ok(None);
        }

        let mut report = ApplyReport::default();

        let injections = self.registry.read().injections.clone();
        for request in &injections {
            apply_injection(engine, request)?;
            report.injections += 1;
        }
        tracing::info!("Applied {} injection(s)", report.injections);

        let reinitializer = self.reinitializer.read().clone();
        report.subsystems = reinitializer.reinitialize(engine)?;

        let registry = self.registry.read();
        report.dialog_tags = registry.dialog_tags.install(engine);
        report.hooked_paths = registry.hooks.apply(engine)?;
        tracing::info!(
            "Installed {} dialog tag(s), hooked {} function(s)",
            report.dialog_tags,
            report.hooked_paths
        );

        Ok(Some(report))
    }

    /// Wrap the engine's start entry point so the first call applies the
    /// registry before the game starts
    ///
    /// Every registry installed on the same engine shares one wrapper and is
    /// applied in install order. Installing a registry twice is a no-op that
    /// returns `Ok(false)`.
    pub fn install_bootstrap(self: &Arc<Self>, engine: &Arc<Engine>) -> Result<bool, KitsyError> {
        bootstrap::install(self, engine)
    }
}

/// Process-wide registry shared by every hack in the page
static KITSY: OnceLock<Arc<Kitsy>> = OnceLock::new();

/// Create the shared registry from `config`
///
/// Returns `false` if the shared registry already exists.
pub fn configure_global(config: &KitsyConfig) -> bool {
    let mut created = false;
    KITSY.get_or_init(|| {
        created = true;
        Arc::new(Kitsy::with_config(config))
    });
    created
}

/// Get the shared registry, creating it with defaults on first use
pub fn global() -> Arc<Kitsy> {
    Arc::clone(KITSY.get_or_init(|| {
        tracing::debug!("Creating shared Kitsy registry");
        Arc::new(Kitsy::new())
    }))
}
