//! Game settings loaded from TOML.
//!
//! Settings are passed to [`Game::with_settings`](crate::Game::with_settings)
//! explicitly; nothing reads them from global state.

use chessboard_core::{MoveFlag, PieceKind};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur when loading or parsing settings.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// Failed to read the settings file from disk.
    #[error("Failed to read settings file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the settings file as valid TOML.
    #[error("Failed to parse settings: {0}")]
    ParseError(#[from] toml::de::Error),
    /// `default_promotion` names a kind a pawn cannot become.
    #[error("Cannot promote to {0}")]
    InvalidPromotion(PieceKind),
}

/// Which automatic draw rules apply, and how to read UCI moves without a
/// promotion letter.
///
/// Every field has a default, so an empty file yields [`GameSettings::default`].
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct GameSettings {
    /// End the game after 100 half-moves without a pawn move or capture.
    pub fifty_move_rule: bool,
    /// End the game when a position occurs for the third time.
    pub threefold_repetition: bool,
    /// End the game when neither side can mate.
    pub insufficient_material: bool,
    /// Piece a pawn becomes when a UCI move reaching the last rank omits the
    /// promotion letter.
    pub default_promotion: PieceKind,
}

impl Default for GameSettings {
    fn default() -> Self {
        GameSettings {
            fifty_move_rule: true,
            threefold_repetition: true,
            insufficient_material: true,
            default_promotion: PieceKind::Queen,
        }
    }
}

impl GameSettings {
    /// Loads settings from [`Self::config_path()`].
    ///
    /// A missing file is not an error: defaults are returned.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::ReadError`] if the file exists but cannot be
    /// read, or the errors of [`Self::from_toml_str`].
    pub fn load() -> Result<Self, SettingsError> {
        let path = Self::config_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            debug!(path = %path.display(), "settings file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Loads settings from an explicit path, which must exist.
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parses settings from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::ParseError`] for malformed TOML and
    /// [`SettingsError::InvalidPromotion`] when `default_promotion` is a
    /// pawn or king.
    pub fn from_toml_str(content: &str) -> Result<Self, SettingsError> {
        let settings: GameSettings = toml::from_str(content)?;
        if MoveFlag::promote_to(settings.default_promotion).is_none() {
            return Err(SettingsError::InvalidPromotion(settings.default_promotion));
        }
        Ok(settings)
    }

    /// Returns the default settings file path: `chessboard.toml` in the
    /// current working directory.
    pub fn config_path() -> PathBuf {
        PathBuf::from("chessboard.toml")
    }

    /// Renders the settings as TOML.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string(self)
    }
}
