//! Error Types
//!
//! This module defines the error types used when loading and validating
//! mood data.
//!
//! # Overview
//!
//! The main error type [`MoodError`] covers:
//! - Sequence and configuration parsing failures
//! - Validation of configuration values
//! - Structurally broken timeline data
//!
//! Runtime operations (requesting a mood, ticking a blend) never fail: every
//! problem they meet degrades to "no visual change this tick".
//!
//! # Usage
//!
//! ```rust,ignore
//! use mood::errors::Result;
//! use mood::timeline::Sequence;
//!
//! fn load(json: &str) -> Result<Sequence> {
//!     Sequence::from_json(json)
//! }
//! ```

use thiserror::Error;

/// The main error type for the mood engine.
#[derive(Error, Debug)]
pub enum MoodError {
    // ========================================================================
    // Format & Parsing Errors
    // ========================================================================
    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// File I/O error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Blend duration must be a finite number of seconds greater than zero.
    #[error("Invalid blend time: {0} (must be > 0 seconds)")]
    InvalidBlendTime(f32),

    /// Recapture delay must be finite and non-negative.
    #[error("Invalid first recapture delay: {0} (must be >= 0 seconds)")]
    InvalidRecaptureDelay(f32),

    // ========================================================================
    // Timeline Errors
    // ========================================================================
    /// Tick resolution with a zero numerator or denominator.
    #[error("Invalid tick resolution: {numerator}/{denominator}")]
    InvalidTickResolution {
        /// Frames per `denominator` seconds
        numerator: u32,
        /// Seconds per `numerator` frames
        denominator: u32,
    },

    /// A transform section must carry exactly nine channels.
    #[error("Transform section in binding '{binding}' has {found} channels (expected 9)")]
    InvalidTransformSection {
        /// Name of the binding owning the track
        binding: String,
        /// Number of channels found
        found: usize,
    },

    /// Keyframe times and values disagree in length.
    #[error("Channel in '{context}' has {times} times but {values} values")]
    ChannelLengthMismatch {
        /// Where the channel lives
        context: String,
        /// Number of key times
        times: usize,
        /// Number of key values
        values: usize,
    },
}

/// Alias for `Result<T, MoodError>`.
pub type Result<T> = std::result::Result<T, MoodError>;
