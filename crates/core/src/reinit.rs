//! Engine reinitialization
//!
//! Subsystem objects built before injections ran still carry the unpatched
//! definitions. After every injection has been executed they are rebuilt,
//! in construction order, so later calls reach the patched code.

use kitsy_engine::{Engine, EngineError};

/// Rebuilds engine state after source injection
pub trait Reinitializer: Send + Sync {
    /// Returns the number of subsystems rebuilt
    fn reinitialize(&self, engine: &Engine) -> Result<usize, EngineError>;
}

/// Rebuilds a fixed, ordered list of subsystems from their factories
///
/// Subsystems the engine has no factory for are skipped with a warning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubsystemReinitializer {
    subsystems: Vec<String>,
}

impl SubsystemReinitializer {
    pub fn new(subsystems: Vec<String>) -> Self {
        Self { subsystems }
    }

    pub fn subsystems(&self) -> &[String] {
        &self.subsystems
    }
}

impl Default for SubsystemReinitializer {
    fn default() -> Self {
        Self::new(kitsy_sdk::REINIT_ORDER.iter().map(|s| s.to_string()).collect())
    }
}

impl Reinitializer for SubsystemReinitializer {
    fn reinitialize(&self, engine: &Engine) -> Result<usize, EngineError> {
        let mut rebuilt = 0;
        for name in &self.subsystems {
            match engine.rebuild_subsystem(name) {
                Ok(()) => rebuilt += 1,
                Err(EngineError::UnknownSubsystem(_)) => {
                    tracing::warn!("No factory for subsystem '{}', not rebuilt", name);
                }
                Err(e) => return Err(e),
            }
        }
        tracing::info!("Reinitialized {} engine subsystem(s)", rebuilt);
        Ok(rebuilt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use kitsy_engine::Object;
    use parking_lot::Mutex;
    use serde_json::json;

    #[test]
    fn test_rebuilds_in_order_and_skips_unknown() {
        let engine = Engine::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        for name in ["dialogModule", "dialogBuffer"] {
            let order = order.clone();
            engine.register_subsystem(name, move |_| {
                order.lock().push(name);
                Object::new().with_value("name", json!(name))
            });
        }

        let reinit = SubsystemReinitializer::new(vec![
            "dialogModule".into(),
            "renderer".into(),
            "dialogBuffer".into(),
        ]);

        assert_eq!(reinit.reinitialize(&engine), Ok(2));
        assert_eq!(*order.lock(), ["dialogModule", "dialogBuffer"]);
    }

    #[test]
    fn test_default_order_from_sdk() {
        let reinit = SubsystemReinitializer::default();
        assert_eq!(reinit.subsystems()[0], kitsy_sdk::versions::SCRIPT_MODULE);
    }
}
