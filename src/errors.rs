//! Error Types
//!
//! This module defines the error types used throughout the crate.
//!
//! # Overview
//!
//! The main error type [`DepotError`] covers every failure mode:
//! - Geometric parameters rejected during model composition
//! - Animators or the control arbiter invoked without a target
//! - Control handlers that were never registered
//! - Scene hierarchy edits that would break the tree
//! - Settings files that cannot be read, parsed or hold out-of-range tuning
//!
//! None of these are fatal. Each one is confined to the operation that
//! raised it, and a failed composition never attaches a partial model.
//!
//! # Usage
//!
//! All fallible APIs return [`Result<T>`] which is an alias for
//! `std::result::Result<T, DepotError>`.
//!
//! ```rust,ignore
//! use depot::errors::{DepotError, Result};
//! use depot::models::{Dimensions, ModelKind};
//!
//! fn build() -> Result<()> {
//!     let _box = ModelKind::Box.build(Dimensions::new(200.0, 150.0, 200.0, 5.0))?;
//!     Ok(())
//! }
//! ```

use thiserror::Error;

use crate::controls::ControlKind;

/// The main error type for the crate.
#[derive(Error, Debug)]
pub enum DepotError {
    // ========================================================================
    // Composition Errors
    // ========================================================================
    /// A width/height/depth/thickness parameter was zero, negative or not finite.
    #[error("Invalid dimension for {model}: {parameter} = {value}")]
    InvalidDimension {
        /// Model being composed (e.g. "box", "shelf")
        model: &'static str,
        /// Name of the rejected parameter
        parameter: &'static str,
        /// The rejected value
        value: f32,
    },

    // ========================================================================
    // Runtime Errors
    // ========================================================================
    /// An animator or the control arbiter has nothing to act on.
    #[error("No tracked entity: {0}")]
    NoTrackedEntity(String),

    /// The arbiter was asked to activate a handler that is not registered.
    #[error("Control handler unavailable: {0}")]
    HandlerUnavailable(ControlKind),

    /// A control identifier could not be parsed.
    #[error("Unknown control identifier: {0}")]
    UnknownControl(String),

    /// A hierarchy edit would create a cycle or references a missing node.
    #[error("Invalid hierarchy: {0}")]
    InvalidHierarchy(String),

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// A control tuning value is out of range (e.g. min distance above max).
    #[error("Invalid setting {section}.{parameter} = {value}")]
    InvalidSetting {
        /// Settings section (e.g. "orbit", "trackball")
        section: &'static str,
        /// Name of the rejected field
        parameter: &'static str,
        /// The rejected value
        value: f32,
    },

    /// File I/O error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Alias for `Result<T, DepotError>`.
pub type Result<T> = std::result::Result<T, DepotError>;
