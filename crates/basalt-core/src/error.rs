//! Error types for Basalt

use thiserror::Error;

/// The main error type for Basalt operations
#[derive(Debug, Error)]
pub enum BasaltError {
    #[error("Entity not found: {0}")]
    EntityNotFound(String),

    #[error("Entity {entity} has no {component} component")]
    ComponentNotFound { entity: String, component: String },

    #[error("Duplicate entity name: {0}")]
    DuplicateEntityName(String),

    #[error("Axis slot index out of range: {0} (valid: 0..8)")]
    UnknownAxisSlot(usize),

    #[error("Button slot index out of range: {0} (valid: 0..4)")]
    UnknownButtonSlot(usize),

    #[error("Physics error: {0}")]
    PhysicsError(String),
}

/// Result type alias for Basalt operations
pub type Result<T> = std::result::Result<T, BasaltError>;
