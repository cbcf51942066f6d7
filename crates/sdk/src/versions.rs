//! Engine version and subsystem definitions
//!
//! The rebuild order mirrors the engine's own bootstrap sequence and must be
//! kept in sync with it when targeting a new engine release.

/// Engine release these definitions were taken from
pub const ENGINE_VERSION: &str = "7.12";

/// Script module (owns the interpreter class)
pub const SCRIPT_MODULE: &str = "scriptModule";

/// Script interpreter instance
pub const SCRIPT_INTERPRETER: &str = "scriptInterpreter";

/// Dialog module (owns renderer and buffer classes)
pub const DIALOG_MODULE: &str = "dialogModule";

/// Dialog renderer instance
pub const DIALOG_RENDERER: &str = "dialogRenderer";

/// Dialog buffer instance
pub const DIALOG_BUFFER: &str = "dialogBuffer";

/// Tile renderer instance
pub const RENDERER: &str = "renderer";

/// Room transition manager
pub const TRANSITION: &str = "transition";

/// Subsystems rebuilt after injections, in construction order
pub const REINIT_ORDER: &[&str] = &[
    SCRIPT_MODULE,
    SCRIPT_INTERPRETER,
    DIALOG_MODULE,
    DIALOG_RENDERER,
    DIALOG_BUFFER,
    RENDERER,
    TRANSITION,
];
