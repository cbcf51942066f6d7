//! Error types for host engine access

/// Error type for object graph, document and subsystem operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// Dotted path is empty or has an empty/whitespace segment
    #[error("Invalid function path: {0:?}")]
    InvalidPath(String),

    /// An intermediate object along the path does not exist
    #[error("Path not found: {0}")]
    UnknownPath(String),

    /// An intermediate member along the path is not an object
    #[error("Not an object: {0}")]
    NotAnObject(String),

    /// Script element key is stale or was never part of this document
    #[error("Script element not found in document")]
    UnknownScript,

    /// No factory registered for a subsystem
    #[error("Subsystem not registered: {0}")]
    UnknownSubsystem(String),

    /// Called a path that resolves to nothing callable
    #[error("Function not found: {0}")]
    UnknownFunction(String),
}
