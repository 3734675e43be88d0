//! Error types for storage and configuration.
//!
//! Neither reaches the user as a failure of a command: storage errors are
//! downgraded to [`SaveOutcome::Ignored`](crate::persist::SaveOutcome) and a
//! notice, configuration errors only surface where the host loads its config.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by a [`SlotStorage`](crate::persist::SlotStorage) backend.
#[derive(Debug, Error)]
pub enum StorageError {
	/// The backend refuses every access (private browsing, disabled storage).
	#[error("storage unavailable: {0}")]
	Unavailable(String),

	/// Reading or writing the slot file failed.
	#[error("I/O error on {path}: {error}")]
	Io {
		/// Path of the slot file.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// The selection could not be encoded.
	#[error("failed to encode selection: {0}")]
	Serialize(#[from] serde_json::Error),
}

/// Errors that can occur when loading the engine configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error parsing TOML syntax or shape.
	#[error("TOML parse error: {0}")]
	Toml(#[from] toml::de::Error),

	/// Error reading a configuration file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
