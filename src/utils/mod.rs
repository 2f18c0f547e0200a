//! Utility Module
//!
//! - [`interner`]: String interning for property and parameter names
//! - [`ChangeTracker`]: Version counter used as the visual refresh signal
//!
//! # String Interning
//!
//! Snapshot maps are keyed by interned names. Interned strings (Symbols)
//! can be compared in O(1) time.
//!
//! ```rust,ignore
//! use mood::utils::interner;
//!
//! let sym1 = interner::intern("FogDensity");
//! let sym2 = interner::intern("FogDensity");
//! assert_eq!(sym1, sym2); // O(1) comparison
//! ```

pub mod interner;
pub mod version_tracker;

pub use interner::Symbol;
pub use version_tracker::ChangeTracker;
