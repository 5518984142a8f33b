//! Runtime errors.

use game_content::LoadError;
use game_core::{EntityError, ErrorSeverity, GameError};

/// Failures surfaced by the combat engine's command surface.
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    /// Content could not be hydrated during initialization or an encounter reset.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// An entity rejected an equipment command.
    #[error(transparent)]
    Entity(#[from] EntityError),

    /// The configured roster has no archetype to spawn.
    #[error("Enemy roster is empty")]
    EmptyRoster,

    /// The acting side cannot currently use the requested action.
    #[error("Action not available: {0}")]
    UnknownAction(String),

    /// The hero tried to equip an item it does not carry.
    #[error("Item not in inventory: {0}")]
    ItemNotHeld(String),
}

pub type Result<T> = std::result::Result<T, RuntimeError>;

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Load(err) => err.severity(),
            Self::Entity(err) => err.severity(),
            Self::EmptyRoster => ErrorSeverity::Fatal,
            Self::UnknownAction(_) | Self::ItemNotHeld(_) => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Load(err) => err.error_code(),
            Self::Entity(err) => err.error_code(),
            Self::EmptyRoster => "RUNTIME_EMPTY_ROSTER",
            Self::UnknownAction(_) => "RUNTIME_UNKNOWN_ACTION",
            Self::ItemNotHeld(_) => "RUNTIME_ITEM_NOT_HELD",
        }
    }
}
