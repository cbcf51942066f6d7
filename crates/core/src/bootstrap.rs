//! Start entry point wrapper
//!
//! One wrapper is installed per engine start function, no matter how many
//! registries (or how many times the same registry) ask for it. Every
//! registry that asks joins the wrapper's list. The first start call puts the
//! original function back, applies each registry in the order they joined,
//! then calls the start path so hooks on it run.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, LazyLock, OnceLock, Weak};

use kitsy_engine::{host_fn, Engine, EngineError, FnPath, HostFn, Value};
use parking_lot::Mutex;

use crate::error::KitsyError;
use crate::registry::Kitsy;

type WeakHostFn = Weak<dyn Fn(&[Value]) -> Value + Send + Sync>;

/// A wrapper waiting for its first call
struct Bootstrap {
    engine: Weak<Engine>,
    start: FnPath,
    original: HostFn,
    wrapper: OnceLock<WeakHostFn>,
    registries: Mutex<Vec<Arc<Kitsy>>>,
    fired: AtomicBool,
}

impl Bootstrap {
    /// Whether `f` is this bootstrap's wrapper
    fn is_wrapper(&self, f: &HostFn) -> bool {
        self.wrapper
            .get()
            .and_then(Weak::upgrade)
            .is_some_and(|wrapper| std::ptr::addr_eq(Arc::as_ptr(&wrapper), Arc::as_ptr(f)))
    }

    fn run(&self, args: &[Value]) -> Value {
        let Some(engine) = self.engine.upgrade() else {
            return Value::Null;
        };

        if self.fired.swap(true, Ordering::AcqRel) {
            return (self.original)(args);
        }
        PENDING
            .lock()
            .retain(|pending| !std::ptr::eq(Arc::as_ptr(pending), self));

        // Something may have wrapped the start path after us; only unwind
        // ourselves if we are still the installed function.
        let installed = match engine.lookup(&self.start) {
            Ok(Some(current)) => self.is_wrapper(&current),
            _ => false,
        };
        if installed {
            if let Err(e) = engine.replace(&self.start, self.original.clone()) {
                tracing::error!("Failed to restore '{}': {}", self.start, e);
                return Value::Null;
            }
        }

        let registries = self.registries.lock().clone();
        for kitsy in &registries {
            if let Err(e) = kitsy.apply(&engine) {
                tracing::error!("Kitsy bootstrap failed: {}", e);
                return Value::Null;
            }
        }

        if !installed {
            return (self.original)(args);
        }
        match engine.call(self.start.as_str(), args) {
            Ok(value) => value,
            Err(e) => {
                tracing::error!("Failed to start game: {}", e);
                Value::Null
            }
        }
    }
}

/// Wrappers installed but not yet called
static PENDING: LazyLock<Mutex<Vec<Arc<Bootstrap>>>> = LazyLock::new(|| Mutex::new(Vec::new()));

/// Install or join the start wrapper on `engine`
///
/// Returns `false` if `kitsy` had already joined the wrapper.
pub(crate) fn install(kitsy: &Arc<Kitsy>, engine: &Arc<Engine>) -> Result<bool, KitsyError> {
    let start = FnPath::parse(&kitsy.paths().start)
        .map_err(|_| crate::hooks::HookError::InvalidPath(kitsy.paths().start.clone()))?;
    let current = engine
        .lookup(&start)?
        .ok_or_else(|| EngineError::UnknownFunction(start.to_string()))?;

    let mut pending = PENDING.lock();
    pending.retain(|bootstrap| bootstrap.engine.strong_count() > 0);

    if let Some(bootstrap) = pending.iter().find(|bootstrap| bootstrap.is_wrapper(&current)) {
        let mut registries = bootstrap.registries.lock();
        if registries.iter().any(|joined| Arc::ptr_eq(joined, kitsy)) {
            tracing::debug!("Registry already waiting on '{}'", start);
            return Ok(false);
        }
        registries.push(Arc::clone(kitsy));
        tracing::debug!("Joined bootstrap on '{}' ({} registries)", start, registries.len());
        return Ok(true);
    }

    let bootstrap = Arc::new(Bootstrap {
        engine: Arc::downgrade(engine),
        start: start.clone(),
        original: current,
        wrapper: OnceLock::new(),
        registries: Mutex::new(vec![Arc::clone(kitsy)]),
        fired: AtomicBool::new(false),
    });

    let state = Arc::clone(&bootstrap);
    let wrapper = host_fn(move |args| state.run(args));
    let _ = bootstrap.wrapper.set(Arc::downgrade(&wrapper));

    engine.replace(&start, wrapper)?;
    pending.push(bootstrap);
    tracing::debug!("Bootstrap installed on '{}'", start);
    Ok(true)
}
