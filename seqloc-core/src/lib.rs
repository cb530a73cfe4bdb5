//! # Coordinate model and sequence reconstruction for genome submission files
//!
//! This crate is the coordinate engine underlying a flat-file submission
//! validator: it represents feature locations (single positions, ranges,
//! junctions, gaps, local and cross-record references), parses and
//! re-emits the textual location grammar byte-for-byte, and resolves a
//! location (or an AGP component list) into the byte content it denotes.
//!
//! # Module Structure
//!
//! - `models` - location primitives, compound locations, sequences and
//!   AGP rows
//! - `parse` - location grammar text -> [`CompoundLocation`]
//! - `write` - [`CompoundLocation`] -> canonical text (`Display`), the
//!   exact inverse of `parse`
//! - `resolve` - segment resolution against local content and an injected
//!   [`SequenceRetrievalService`]
//! - `complement` - the nucleotide/ambiguity-code complement table
//!
//! File readers (flat file, FASTA, AGP) populate the models; this crate
//! only interprets them. It performs no I/O of its own.

pub mod complement;
pub mod errors;
pub mod models;
pub mod parse;
pub mod resolve;
pub mod write;

// re-expose the core surface
pub use complement::{complement_symbol, reverse_complement};
pub use errors::{LocationError, ParseResult, ResolveError, ResolveResult};
pub use models::{
    AgpRow, Base, Between, CompoundLocation, GAP_FILL_SYMBOL, Gap, Location, Operator, Origin,
    Range, Sequence, Topology, UNKNOWN_GAP_LENGTH, flip_partials,
};
pub use parse::parse_compound_location;
pub use resolve::{SegmentResolver, SequenceRetrievalService};
