//! Well-known function paths inside the host engine
//!
//! Paths are dotted property chains starting at the engine's global root.
//! They must match what the exported engine actually defines.

/// Parses raw game data text into the world (the data-load path)
pub const LOAD_GAME: &str = "load_game";

/// Documented entry point called by the exported page to start the game
pub const START_GAME: &str = "startExportedGame";

/// Called when the current dialogue box is dismissed
pub const DIALOG_EXIT: &str = "onExitDialog";

/// Called when the game is reset and all world data is discarded
pub const RESET_GAME: &str = "clearGameData";
