//! Error Types
//!
//! This module defines the error types used throughout the crate.
//!
//! # Overview
//!
//! The main error type [`SceneryError`] covers the failure modes of the core:
//! - Malformed persisted animation clips
//! - Animation channels referring to clips that were never loaded
//! - Hierarchy operations that would break the tree
//! - File I/O and settings decoding
//!
//! Lookups that simply find nothing (e.g. [`Scene::find`](crate::scene::Scene::find))
//! are not errors and return `Option` instead.
//!
//! # Usage
//!
//! ```rust,ignore
//! use scenery::errors::{SceneryError, Result};
//!
//! fn load(library: &mut ClipLibrary) -> Result<()> {
//!     library.load_clip("robot/Head")?;
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// The main error type for the scene core.
#[derive(Error, Debug)]
pub enum SceneryError {
    // ========================================================================
    // Animation Errors
    // ========================================================================
    /// A persisted clip could not be parsed. Nothing was installed.
    #[error("Clip '{clip}' is malformed at line {line}: {message}")]
    ClipParse {
        /// Name of the clip being parsed
        clip: String,
        /// 1-based line number of the offending line
        line: usize,
        /// What was wrong with it
        message: String,
    },

    /// A channel was started for a clip the library does not contain.
    #[error("Animation clip not found: {0}")]
    ClipNotFound(String),

    // ========================================================================
    // Scene Graph Errors
    // ========================================================================
    /// A hierarchy mutation was rejected and the tree left untouched.
    #[error("Invalid hierarchy operation: {0}")]
    Hierarchy(String),

    // ========================================================================
    // I/O & Configuration Errors
    // ========================================================================
    /// File I/O error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Settings could not be decoded.
    #[error("Settings parse error: {0}")]
    Settings(#[from] serde_json::Error),
}

/// Alias for `Result<T, SceneryError>`.
pub type Result<T> = std::result::Result<T, SceneryError>;
