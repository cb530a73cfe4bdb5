//! # Input utilities for genome submission files.
//!
//! This small crate reads the file formats whose contents the
//! `seqloc-core` models interpret. Today that is AGP: plain or
//! gzip-compressed files of component placements, read into
//! [`seqloc_core::AgpRow`] lists ready for length and placement-order
//! computation.
pub mod agp;
pub mod utils;

// re-expose core functions
pub use agp::*;
pub use utils::*;
